//! Row aggregation over discovered benchmark runs.
//!
//! Each run's JSON document is parsed, its telemetry fields extracted,
//! and the companion mapping count joined in. Malformed JSON aborts the
//! whole aggregation; a missing companion does not.

use crate::analysis::extract::build_row;
use crate::models::AblationRow;
use crate::scanner::DiscoveredRun;
use anyhow::{Context, Result};
use indicatif::{ProgressBar, ProgressStyle};
use serde_json::Value;
use std::fs;
use std::path::Path;
use tracing::debug;

/// Parse every discovered run into a sorted set of rows.
///
/// Rows come back ordered by `(pair, config)`. Duplicate keys from
/// different subdirectories are kept as-is, the sort makes them adjacent.
pub fn collect_rows(runs: &[DiscoveredRun], show_progress: bool) -> Result<Vec<AblationRow>> {
    let bar = if show_progress && !runs.is_empty() {
        let bar = ProgressBar::new(runs.len() as u64);
        bar.set_style(
            ProgressStyle::with_template("   {bar:30.cyan/blue} {pos}/{len} {msg}")
                .unwrap_or_else(|_| ProgressStyle::default_bar()),
        );
        bar
    } else {
        ProgressBar::hidden()
    };

    let mut rows = Vec::with_capacity(runs.len());

    for run in runs {
        bar.set_message(
            run.path
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_default(),
        );

        let content = fs::read_to_string(&run.path)
            .with_context(|| format!("Failed to read result file {}", run.path.display()))?;
        let doc: Value = serde_json::from_str(&content)
            .with_context(|| format!("Malformed result file {}", run.path.display()))?;

        let mappings_lines = companion_line_count(&run.companion_path())?;
        if mappings_lines.is_none() {
            debug!("No companion for {}", run.path.display());
        }

        rows.push(build_row(
            run.pair.clone(),
            run.config.clone(),
            &doc,
            mappings_lines,
        ));
        bar.inc(1);
    }

    bar.finish_and_clear();

    sort_rows(&mut rows);
    Ok(rows)
}

/// Sort rows by pair, then config (byte-wise string ordering).
pub fn sort_rows(rows: &mut [AblationRow]) {
    rows.sort_by(|a, b| a.sort_key().cmp(&b.sort_key()));
}

/// Count line terminators in the companion file, as raw bytes.
///
/// Returns `Ok(None)` when no companion exists. A final line without a
/// trailing `\n` does not contribute to the count.
fn companion_line_count(path: &Path) -> Result<Option<u64>> {
    if !path.exists() {
        return Ok(None);
    }

    let bytes = fs::read(path)
        .with_context(|| format!("Failed to read companion file {}", path.display()))?;
    let count = bytes.iter().filter(|&&b| b == b'\n').count() as u64;

    Ok(Some(count))
}
