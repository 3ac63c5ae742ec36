//! Results-tree scanner for discovering benchmark runs.
//!
//! A run is a `<pair>_<config>.json` file anywhere under the results root,
//! optionally accompanied by a `<pair>_<config>.tiny` mapping file in the
//! same directory.

use anyhow::{Context, Result};
use regex::Regex;
use std::path::PathBuf;
use std::sync::OnceLock;
use tracing::{debug, warn};
use walkdir::WalkDir;

/// Extension of primary result files.
pub const RESULT_EXT: &str = "json";

/// Extension of companion mapping files.
pub const COMPANION_EXT: &str = "tiny";

/// A benchmark run discovered under the results root.
#[derive(Debug, Clone, PartialEq)]
pub struct DiscoveredRun {
    /// Path to the `.json` result file.
    pub path: PathBuf,
    /// Pair identifier from the filename.
    pub pair: String,
    /// Config identifier from the filename.
    pub config: String,
}

impl DiscoveredRun {
    /// Path of the sibling `.tiny` companion (which may not exist).
    pub fn companion_path(&self) -> PathBuf {
        self.path.with_extension(COMPANION_EXT)
    }
}

/// Scanner for benchmark result trees.
pub struct ResultScanner {
    root: PathBuf,
}

impl ResultScanner {
    /// Create a scanner rooted at `root`.
    pub fn new(root: PathBuf) -> Self {
        Self { root }
    }

    /// Discover all result files under the root, recursively.
    ///
    /// A missing (or non-directory) root yields an empty set; filenames
    /// that do not match the run pattern are skipped. Directory entries
    /// that cannot be read abort the scan.
    pub fn scan(&self) -> Result<Vec<DiscoveredRun>> {
        if !self.root.is_dir() {
            warn!(
                "Results root {} does not exist, nothing to aggregate",
                self.root.display()
            );
            return Ok(Vec::new());
        }

        let mut runs = Vec::new();

        for entry in WalkDir::new(&self.root) {
            let entry = entry.with_context(|| {
                format!("Failed to walk results root {}", self.root.display())
            })?;

            if !entry.file_type().is_file() {
                continue;
            }

            let ext = entry.path().extension().and_then(|e| e.to_str());
            if ext != Some(RESULT_EXT) {
                continue;
            }

            let name = entry.file_name().to_string_lossy();
            match parse_run_name(&name) {
                Some((pair, config, _)) => runs.push(DiscoveredRun {
                    path: entry.into_path(),
                    pair,
                    config,
                }),
                None => {
                    debug!(
                        "Skipping {}: name does not match <pair>_<config>.{}",
                        entry.path().display(),
                        RESULT_EXT
                    );
                }
            }
        }

        debug!("Discovered {} run(s) under {}", runs.len(), self.root.display());
        Ok(runs)
    }
}

/// Split a run filename into its `(pair, config, extension)` parts.
///
/// The pattern is `<pair>_<config>.<ext>` with non-greedy parts, so the
/// first underscore separates pair from config and the config may itself
/// contain underscores. Returns `None` when the name has no underscore or
/// the extension is not one of the two recognized suffixes.
pub fn parse_run_name(name: &str) -> Option<(String, String, String)> {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    let pattern = PATTERN
        .get_or_init(|| Regex::new(r"^(.+?)_(.+?)\.(json|tiny)$").expect("pattern compiles"));

    let caps = pattern.captures(name)?;
    Some((
        caps[1].to_string(),
        caps[2].to_string(),
        caps[3].to_string(),
    ))
}
