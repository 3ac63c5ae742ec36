//! BenchAgg - benchmark ablation-result aggregator
//!
//! A CLI tool that walks a tree of per-run mapper benchmark results,
//! extracts telemetry from each JSON file, joins the companion mapping
//! counts, and writes one sorted CSV table.
//!
//! Exit codes:
//!   0 - Success (including an empty or missing results tree)
//!   1 - Runtime error (malformed result file, I/O failure, bad config)

mod analysis;
mod cli;
mod config;
mod models;
mod report;
mod scanner;

use anyhow::{Context, Result};
use cli::Args;
use config::Config;
use scanner::{DiscoveredRun, ResultScanner};
use tracing::{debug, error, info, warn};
use tracing_subscriber::FmtSubscriber;

fn main() -> Result<()> {
    // Parse command-line arguments
    let args = Args::parse_args();

    // Validate arguments
    if let Err(e) = args.validate() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }

    // Handle --init-config early (no logging needed)
    if args.init_config {
        return handle_init_config();
    }

    // Initialize logging
    init_logging(&args);

    info!("BenchAgg v{}", env!("CARGO_PKG_VERSION"));
    debug!("Arguments: {:?}", args);

    // Run the aggregation
    match run_aggregation(args) {
        Ok(exit_code) => {
            std::process::exit(exit_code);
        }
        Err(e) => {
            error!("Aggregation failed: {}", e);
            eprintln!("\n❌ Error: {}", e);
            std::process::exit(1);
        }
    }
}

/// Handle --init-config: generate a default .benchagg.toml.
fn handle_init_config() -> Result<()> {
    let path = std::path::Path::new(config::CONFIG_FILE);

    if path.exists() {
        eprintln!(
            "⚠️  {} already exists. Remove it first or edit it manually.",
            config::CONFIG_FILE
        );
        std::process::exit(1);
    }

    let content = Config::default_toml();
    std::fs::write(path, &content)
        .with_context(|| format!("Failed to write {}", config::CONFIG_FILE))?;

    println!("✅ Created {} with default settings.", config::CONFIG_FILE);
    println!("   Edit it to customize the results directory and output path.");
    Ok(())
}

/// Initialize logging based on verbosity settings.
fn init_logging(args: &Args) {
    let level = args.log_level();

    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .compact()
        .finish();

    tracing::subscriber::set_global_default(subscriber).expect("Failed to set tracing subscriber");
}

/// Run the complete aggregation workflow. Returns the process exit code.
fn run_aggregation(args: Args) -> Result<i32> {
    // Load configuration
    let mut config = load_config(&args)?;
    config.merge_with_args(&args);

    let results_dir = config.paths.results_dir.clone();
    let output = config.paths.output.clone();

    // Step 1: Discover runs
    if !args.quiet {
        println!("🔍 Scanning results under {}", results_dir.display());
    }
    let scanner = ResultScanner::new(results_dir);
    let runs = scanner.scan()?;
    info!("Discovered {} run(s)", runs.len());

    // Handle --dry-run: list runs and exit
    if args.dry_run {
        return handle_dry_run(&runs);
    }

    // Step 2: Parse, extract, and sort
    let rows = analysis::collect_rows(&runs, !args.quiet)?;
    let companions = rows.iter().filter(|r| r.mappings_lines.is_some()).count();

    // Step 3: Write the CSV table
    let row_count = report::write_csv(&rows, &output)?;

    // Print summary
    if !args.quiet {
        println!("\n📊 Aggregation summary:");
        println!("   Runs aggregated: {}", row_count);
        println!("   Companion files: {}", companions);
    }
    println!("\n✅ Wrote {} ({} rows)", output.display(), row_count);

    Ok(0)
}

/// Handle --dry-run: list discovered runs, write nothing.
fn handle_dry_run(runs: &[DiscoveredRun]) -> Result<i32> {
    println!("\n🔍 Dry run: listing discovered runs (no CSV written)...\n");

    if runs.is_empty() {
        println!("   No matching result files found.");
    } else {
        for run in runs {
            let companion = if run.companion_path().exists() {
                " [+tiny]"
            } else {
                ""
            };
            println!(
                "     📄 {} (pair={}, config={}){}",
                run.path.display(),
                run.pair,
                run.config,
                companion
            );
        }
        println!("\n   Total: {} runs", runs.len());
    }

    println!("\n✅ Dry run complete. No output was written.");
    Ok(0)
}

/// Load configuration from file or use defaults.
fn load_config(args: &Args) -> Result<Config> {
    // Try explicit config path
    if let Some(ref config_path) = args.config {
        info!("Loading config from: {}", config_path.display());
        return Config::load(config_path);
    }

    // Try default location
    match Config::load_default() {
        Ok(Some(config)) => {
            info!("Loaded default config from {}", config::CONFIG_FILE);
            Ok(config)
        }
        Ok(None) => {
            debug!("No config file found, using defaults");
            Ok(Config::default())
        }
        Err(e) => {
            warn!("Failed to load config: {}", e);
            Ok(Config::default())
        }
    }
}
