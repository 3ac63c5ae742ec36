//! CSV table generation.
//!
//! Writes the aggregated table as a single CSV file with a fixed header.
//! Cells containing delimiters, quotes, or line breaks are quoted by the
//! writer; empty cells stand for absent values.

use crate::models::{AblationRow, ABLATION_HEADER};
use anyhow::{Context, Result};
use std::fs;
use std::path::Path;

/// Write the sorted table to `dest`, creating parent directories as needed.
///
/// The destination is overwritten on every run. Returns the number of data
/// rows written (the header does not count).
pub fn write_csv(rows: &[AblationRow], dest: &Path) -> Result<usize> {
    if let Some(parent) = dest.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create output directory {}", parent.display())
            })?;
        }
    }

    let mut writer = csv::Writer::from_path(dest)
        .with_context(|| format!("Failed to create output file {}", dest.display()))?;

    writer
        .write_record(ABLATION_HEADER)
        .context("Failed to write CSV header")?;

    for row in rows {
        writer
            .write_record(row.to_record())
            .with_context(|| format!("Failed to write row for {}/{}", row.pair, row.config))?;
    }

    writer
        .flush()
        .with_context(|| format!("Failed to flush output file {}", dest.display()))?;

    Ok(rows.len())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::collect_rows;
    use crate::scanner::ResultScanner;
    use tempfile::TempDir;

    #[test]
    fn test_empty_table_writes_header_only() {
        let temp_dir = TempDir::new().unwrap();
        let dest = temp_dir.path().join("ablation.csv");

        let count = write_csv(&[], &dest).unwrap();

        assert_eq!(count, 0);
        let content = fs::read_to_string(&dest).unwrap();
        assert_eq!(content, format!("{}\n", ABLATION_HEADER.join(",")));
    }

    #[test]
    fn test_creates_parent_directories() {
        let temp_dir = TempDir::new().unwrap();
        let dest = temp_dir.path().join("bench").join("out").join("ablation.csv");

        write_csv(&[], &dest).unwrap();

        assert!(dest.exists());
    }

    #[test]
    fn test_fields_with_delimiters_are_quoted() {
        let temp_dir = TempDir::new().unwrap();
        let dest = temp_dir.path().join("ablation.csv");

        let row = AblationRow {
            pair: "p1".to_string(),
            config: "c,1".to_string(),
            ..Default::default()
        };
        write_csv(&[row], &dest).unwrap();

        let content = fs::read_to_string(&dest).unwrap();
        assert!(content.contains("p1,\"c,1\""));
    }

    #[test]
    fn test_end_to_end_scenario() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path().join("out");
        fs::create_dir(&root).unwrap();
        fs::write(
            root.join("p1_c1.json"),
            r#"{"candidate_stats":{"cand_count_exact_median":2}}"#,
        )
        .unwrap();
        fs::write(root.join("p1_c1.tiny"), "1\n2\n3\n4\n5\n").unwrap();

        let dest = temp_dir.path().join("ablation.csv");
        let runs = ResultScanner::new(root).scan().unwrap();
        let rows = collect_rows(&runs, false).unwrap();
        let count = write_csv(&rows, &dest).unwrap();

        assert_eq!(count, 1);
        let content = fs::read_to_string(&dest).unwrap();
        let mut lines = content.lines();
        assert_eq!(lines.next(), Some(ABLATION_HEADER.join(",").as_str()));
        assert_eq!(lines.next(), Some("p1,c1,2,,,,,,,,,,,,,5"));
        assert_eq!(lines.next(), None);
    }

    #[test]
    fn test_repeated_runs_are_byte_identical() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path().join("out");
        let sub = root.join("nested");
        fs::create_dir_all(&sub).unwrap();
        fs::write(root.join("b_x.json"), r#"{"wl_relaxed_hits":1}"#).unwrap();
        fs::write(sub.join("a_y.json"), "{}").unwrap();
        fs::write(sub.join("a_x.json"), r#"{"flattening_detected":false}"#).unwrap();

        let dest = temp_dir.path().join("ablation.csv");
        let scanner = ResultScanner::new(root);

        let rows = collect_rows(&scanner.scan().unwrap(), false).unwrap();
        write_csv(&rows, &dest).unwrap();
        let first = fs::read(&dest).unwrap();

        let rows = collect_rows(&scanner.scan().unwrap(), false).unwrap();
        write_csv(&rows, &dest).unwrap();
        let second = fs::read(&dest).unwrap();

        assert_eq!(first, second);

        // Sorted by (pair, config) regardless of discovery order.
        let content = String::from_utf8(first).unwrap();
        let keys: Vec<String> = content
            .lines()
            .skip(1)
            .map(|l| l.split(',').take(2).collect::<Vec<_>>().join("/"))
            .collect();
        assert_eq!(keys, vec!["a/x", "a/y", "b/x"]);
    }
}
