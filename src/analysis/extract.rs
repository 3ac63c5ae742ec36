//! Defensive field extraction from parsed result documents.
//!
//! Benchmark telemetry carries no enforced schema. Extraction never
//! fails: a missing key or a non-object along the path yields `None`.

use crate::models::AblationRow;
use serde_json::Value;

/// Walk `path` through nested JSON objects.
///
/// Returns `None` as soon as an intermediate value is not an object or
/// the next key is absent.
pub fn lookup<'a>(doc: &'a Value, path: &[&str]) -> Option<&'a Value> {
    let mut current = doc;
    for key in path {
        current = current.as_object()?.get(*key)?;
    }
    Some(current)
}

/// Build an aggregated row from a run's parsed document.
///
/// `mappings_lines` comes from the companion file and is passed through
/// unchanged.
pub fn build_row(
    pair: String,
    config: String,
    doc: &Value,
    mappings_lines: Option<u64>,
) -> AblationRow {
    let get = |path: &[&str]| lookup(doc, path).cloned();

    AblationRow {
        pair,
        config,
        cand_exact_med: get(&["candidate_stats", "cand_count_exact_median"]),
        cand_exact_p95: get(&["candidate_stats", "cand_count_exact_p95"]),
        cand_near_med: get(&["candidate_stats", "cand_count_near_median"]),
        cand_near_p95: get(&["candidate_stats", "cand_count_near_p95"]),
        wl_relaxed_l1: get(&["wl_relaxed_l1"]),
        wl_size_band: get(&["wl_relaxed_size_band"]),
        wl_gate_passes: get(&["wl_relaxed_gate_passes"]),
        wl_candidates: get(&["wl_relaxed_candidates"]),
        wl_hits: get(&["wl_relaxed_hits"]),
        wl_accepted: get(&["wl_relaxed_accepted"]),
        flat_detected: get(&["flattening_detected"]),
        near_before: get(&["near_before_gates"]),
        near_after: get(&["near_after_gates"]),
        mappings_lines,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_lookup_nested_hit() {
        let doc = json!({"x": {"y": 5}});
        assert_eq!(lookup(&doc, &["x", "y"]), Some(&json!(5)));
    }

    #[test]
    fn test_lookup_missing_leaf() {
        let doc = json!({"x": {"y": 5}});
        assert_eq!(lookup(&doc, &["x", "z"]), None);
    }

    #[test]
    fn test_lookup_missing_root_key() {
        let doc = json!({"x": {"y": 5}});
        assert_eq!(lookup(&doc, &["w", "y"]), None);
    }

    #[test]
    fn test_lookup_non_object_intermediate() {
        let doc = json!({"x": 5});
        assert_eq!(lookup(&doc, &["x", "y"]), None);
    }

    #[test]
    fn test_lookup_non_object_document() {
        assert_eq!(lookup(&json!([1, 2, 3]), &["x"]), None);
        assert_eq!(lookup(&json!(42), &["x"]), None);
    }

    #[test]
    fn test_lookup_empty_path_is_identity() {
        let doc = json!({"x": 1});
        assert_eq!(lookup(&doc, &[]), Some(&doc));
    }

    #[test]
    fn test_build_row_extracts_known_fields() {
        let doc = json!({
            "candidate_stats": {
                "cand_count_exact_median": 2,
                "cand_count_exact_p95": 7
            },
            "wl_relaxed_l1": 0.15,
            "flattening_detected": true
        });

        let row = build_row("p1".to_string(), "c1".to_string(), &doc, Some(5));

        assert_eq!(row.pair, "p1");
        assert_eq!(row.config, "c1");
        assert_eq!(row.cand_exact_med, Some(json!(2)));
        assert_eq!(row.cand_exact_p95, Some(json!(7)));
        assert_eq!(row.cand_near_med, None);
        assert_eq!(row.wl_relaxed_l1, Some(json!(0.15)));
        assert_eq!(row.flat_detected, Some(json!(true)));
        assert_eq!(row.near_after, None);
        assert_eq!(row.mappings_lines, Some(5));
    }

    #[test]
    fn test_build_row_tolerates_scalar_document() {
        let row = build_row("p".to_string(), "c".to_string(), &json!(3), None);
        assert_eq!(row.cand_exact_med, None);
        assert_eq!(row.wl_relaxed_l1, None);
        assert_eq!(row.mappings_lines, None);
    }
}
