//! Data models for the benchmark aggregator.
//!
//! This module contains the aggregated row type, the fixed CSV column
//! order, and the scalar-to-cell rendering used by the report writer.

use serde_json::Value;

/// Column order of the ablation CSV, written verbatim as the header row.
pub const ABLATION_HEADER: [&str; 16] = [
    "pair",
    "config",
    "cand_exact_med",
    "cand_exact_p95",
    "cand_near_med",
    "cand_near_p95",
    "wl_relaxed_l1",
    "wl_size_band",
    "wl_gate_passes",
    "wl_candidates",
    "wl_hits",
    "wl_accepted",
    "flat_detected",
    "near_before",
    "near_after",
    "mappings_lines",
];

/// One aggregated benchmark run.
///
/// `pair` and `config` come from the run's filename; the metric fields are
/// extracted from the run's JSON document and stay `None` when the document
/// does not carry them. `mappings_lines` is the line count of the sibling
/// `.tiny` file, `None` when no companion exists.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AblationRow {
    pub pair: String,
    pub config: String,
    pub cand_exact_med: Option<Value>,
    pub cand_exact_p95: Option<Value>,
    pub cand_near_med: Option<Value>,
    pub cand_near_p95: Option<Value>,
    pub wl_relaxed_l1: Option<Value>,
    pub wl_size_band: Option<Value>,
    pub wl_gate_passes: Option<Value>,
    pub wl_candidates: Option<Value>,
    pub wl_hits: Option<Value>,
    pub wl_accepted: Option<Value>,
    pub flat_detected: Option<Value>,
    pub near_before: Option<Value>,
    pub near_after: Option<Value>,
    pub mappings_lines: Option<u64>,
}

impl AblationRow {
    /// Render the row as CSV cells, in [`ABLATION_HEADER`] order.
    pub fn to_record(&self) -> Vec<String> {
        vec![
            self.pair.clone(),
            self.config.clone(),
            cell(&self.cand_exact_med),
            cell(&self.cand_exact_p95),
            cell(&self.cand_near_med),
            cell(&self.cand_near_p95),
            cell(&self.wl_relaxed_l1),
            cell(&self.wl_size_band),
            cell(&self.wl_gate_passes),
            cell(&self.wl_candidates),
            cell(&self.wl_hits),
            cell(&self.wl_accepted),
            cell(&self.flat_detected),
            cell(&self.near_before),
            cell(&self.near_after),
            self.mappings_lines
                .map(|n| n.to_string())
                .unwrap_or_default(),
        ]
    }

    /// Sort key: pair first, config as tie-break (byte-wise ordering).
    pub fn sort_key(&self) -> (&str, &str) {
        (&self.pair, &self.config)
    }
}

/// Render an extracted scalar as a CSV cell.
///
/// Absent values and JSON `null` both become an empty cell. Strings are
/// written bare; numbers and booleans use their JSON display form.
fn cell(value: &Option<Value>) -> String {
    match value {
        None | Some(Value::Null) => String::new(),
        Some(Value::String(s)) => s.clone(),
        Some(other) => other.to_string(),
    }
}
