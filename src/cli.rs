//! Command-line interface argument parsing.
//!
//! This module handles all CLI argument parsing using clap,
//! including validation and default values.

use clap::Parser;
use std::path::PathBuf;

/// BenchAgg - benchmark telemetry aggregator
///
/// Walks a directory of per-run mapper benchmark results, extracts the
/// candidate/WL-relaxed/flattening telemetry from each JSON file, joins the
/// companion mapping counts, and writes one sorted ablation CSV table.
///
/// Examples:
///   benchagg
///   benchagg --results-dir bench/out --output bench/ablation.csv
///   benchagg --dry-run
///   benchagg --init-config
#[derive(Parser, Debug, Clone)]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Args {
    /// Directory containing per-run result files
    ///
    /// Overrides the config file setting. Built-in default: bench/out.
    /// Can also be set via the BENCHAGG_RESULTS_DIR env var.
    #[arg(short, long, value_name = "DIR", env = "BENCHAGG_RESULTS_DIR")]
    pub results_dir: Option<PathBuf>,

    /// Output CSV file path
    ///
    /// Overrides the config file setting. Built-in default: bench/ablation.csv.
    /// Can also be set via the BENCHAGG_OUTPUT env var.
    #[arg(short, long, value_name = "FILE", env = "BENCHAGG_OUTPUT")]
    pub output: Option<PathBuf>,

    /// Path to configuration file
    ///
    /// If not specified, looks for .benchagg.toml in the current directory
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Enable verbose logging output
    #[arg(short, long)]
    pub verbose: bool,

    /// Run in quiet mode (minimal output)
    #[arg(short, long)]
    pub quiet: bool,

    /// Dry run: discover and list runs without parsing or writing
    #[arg(long)]
    pub dry_run: bool,

    /// Generate a default .benchagg.toml configuration file
    #[arg(long)]
    pub init_config: bool,
}

impl Args {
    /// Parse command-line arguments.
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Validate the parsed arguments.
    pub fn validate(&self) -> Result<(), String> {
        // Check for conflicting options
        if self.verbose && self.quiet {
            return Err("Cannot use both --verbose and --quiet".to_string());
        }

        if let Some(ref output) = self.output {
            if output.as_os_str().is_empty() {
                return Err("Output path must not be empty".to_string());
            }
        }

        if let Some(ref results_dir) = self.results_dir {
            if results_dir.as_os_str().is_empty() {
                return Err("Results directory must not be empty".to_string());
            }
        }

        Ok(())
    }

    /// Returns the log level based on verbosity settings.
    pub fn log_level(&self) -> tracing::Level {
        if self.quiet {
            tracing::Level::ERROR
        } else if self.verbose {
            tracing::Level::DEBUG
        } else {
            tracing::Level::INFO
        }
    }
}
