//! Command-line interface for cleancheck.

use clap::{Parser, Subcommand};
use indicatif::{ProgressBar, ProgressStyle};
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::config::ScanConfig;
use crate::engine::ScanEngine;
use crate::report;

/// Exit codes.
pub const EXIT_SUCCESS: i32 = 0;
pub const EXIT_FAILED: i32 = 1;
pub const EXIT_ERROR: i32 = 2;

/// Default config file names to search for.
const DEFAULT_CONFIG_NAMES: &[&str] = &["cleancheck.yaml", ".cleancheck.yaml"];

/// Starter configuration written by `cleancheck init`.
const DEFAULT_CONFIG_TEMPLATE: &str = r#"# cleancheck scan configuration
roots:
  - .

exclude_patterns:
  - "**/vendor/**"
  - "**/node_modules/**"
  - "**/target/**"

# Extensions to analyze; empty means every supported language.
extensions: []

skip_test_files: true
aggressive: false
require_documentation: false

thresholds:
  function_lines: 50
  complexity: 10
  parameters: 5
  nesting_depth: 4
  class_lines: 300

performance:
  concurrent_files: 0   # 0 = one worker per logical CPU
  max_file_size: 1048576
  cache_capacity: 256
  cache_ttl_secs: 300
"#;

/// Multi-language clean code scanner.
///
/// Cleancheck scans source trees for clean-code violations: long
/// functions, excessive complexity, deep nesting, too many parameters,
/// poorly chosen names, and leftover technical-debt markers.
#[derive(Parser)]
#[command(name = "cleancheck")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Scan paths for clean-code violations
    #[command(visible_alias = "check")]
    Scan(ScanArgs),
    /// Create a starter cleancheck configuration file
    Init(InitArgs),
}

/// Arguments for the scan command.
#[derive(Parser)]
pub struct ScanArgs {
    /// Paths to scan (files or directories); overrides the config roots
    pub paths: Vec<PathBuf>,

    /// Path to config YAML file (default: auto-discover)
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Output format: pretty or json
    #[arg(short, long, default_value = "pretty")]
    pub format: String,

    /// Worker count (0 = one per logical CPU)
    #[arg(short, long)]
    pub jobs: Option<usize>,

    /// Glob patterns to exclude (repeatable)
    #[arg(short, long = "exclude")]
    pub excludes: Vec<String>,

    /// Analyze test files too
    #[arg(long)]
    pub aggressive: bool,

    /// Require doc comments on exported functions
    #[arg(long)]
    pub require_docs: bool,

    /// Override the function line-count threshold
    #[arg(long)]
    pub function_lines: Option<usize>,

    /// Override the cyclomatic complexity threshold
    #[arg(long)]
    pub complexity: Option<usize>,

    /// Override the parameter-count threshold
    #[arg(long)]
    pub parameters: Option<usize>,

    /// Override the nesting-depth threshold
    #[arg(long)]
    pub nesting_depth: Option<usize>,

    /// Show AST cache statistics after the scan
    #[arg(long)]
    pub cache_stats: bool,

    /// Disable the progress spinner
    #[arg(short, long)]
    pub quiet: bool,
}

/// Arguments for the init command.
#[derive(Parser)]
pub struct InitArgs {
    /// Output file path
    #[arg(short, long, default_value = "cleancheck.yaml")]
    pub output: PathBuf,
}

/// Discover a config file in the current directory.
fn discover_config() -> Option<PathBuf> {
    DEFAULT_CONFIG_NAMES
        .iter()
        .map(PathBuf::from)
        .find(|path| path.exists())
}

/// Build the effective config from file plus CLI overrides.
fn resolve_config(args: &ScanArgs) -> anyhow::Result<ScanConfig> {
    let mut config = match &args.config {
        Some(path) => ScanConfig::parse_file(path)?,
        None => match discover_config() {
            Some(path) => ScanConfig::parse_file(&path)?,
            None => ScanConfig::default(),
        },
    };

    if !args.paths.is_empty() {
        config.roots = args.paths.clone();
    }
    if config.roots.is_empty() {
        config.roots = vec![PathBuf::from(".")];
    }

    config.exclude_patterns.extend(args.excludes.iter().cloned());
    if args.aggressive {
        config.aggressive = Some(true);
    }
    if args.require_docs {
        config.require_documentation = Some(true);
    }
    if let Some(jobs) = args.jobs {
        config.performance.concurrent_files = jobs;
    }
    if let Some(value) = args.function_lines {
        config.thresholds.function_lines = value;
    }
    if let Some(value) = args.complexity {
        config.thresholds.complexity = value;
    }
    if let Some(value) = args.parameters {
        config.thresholds.parameters = value;
    }
    if let Some(value) = args.nesting_depth {
        config.thresholds.nesting_depth = value;
    }

    Ok(config)
}

/// Run the scan command.
pub fn run_scan(args: &ScanArgs) -> anyhow::Result<i32> {
    if args.format != "pretty" && args.format != "json" {
        eprintln!(
            "Error: invalid format {:?}, must be 'pretty' or 'json'",
            args.format
        );
        return Ok(EXIT_ERROR);
    }

    let config = match resolve_config(args) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error loading config: {}", e);
            return Ok(EXIT_ERROR);
        }
    };
    let cache_enabled = config.performance.cache_capacity > 0;

    let mut engine = match ScanEngine::new(config) {
        Ok(engine) => engine,
        Err(e) => {
            eprintln!("Error: invalid configuration: {}", e);
            return Ok(EXIT_ERROR);
        }
    };

    // Spinner only makes sense for interactive pretty output.
    let spinner = if args.format == "pretty" && !args.quiet {
        let bar = ProgressBar::new_spinner();
        bar.set_style(
            ProgressStyle::with_template("{spinner} {msg}")
                .unwrap_or_else(|_| ProgressStyle::default_spinner()),
        );
        bar.enable_steady_tick(Duration::from_millis(100));
        Some(bar)
    } else {
        None
    };

    if let Some(bar) = &spinner {
        let bar = bar.clone();
        engine = engine.with_progress(Box::new(move |message| {
            bar.set_message(message.to_string());
        }));
    }

    let outcome = engine.scan()?;

    if let Some(bar) = spinner {
        bar.finish_and_clear();
    }

    let cache = if cache_enabled {
        Some(outcome.cache_stats.clone())
    } else {
        None
    };

    match args.format.as_str() {
        "json" => report::write_json(&outcome.summary, &outcome.results, cache)?,
        _ => report::write_pretty(
            &outcome.summary,
            &outcome.results,
            cache.as_ref(),
            args.cache_stats,
        ),
    }

    if outcome.summary.total_violations == 0 {
        Ok(EXIT_SUCCESS)
    } else {
        Ok(EXIT_FAILED)
    }
}

/// Run the init command.
pub fn run_init(args: &InitArgs) -> anyhow::Result<i32> {
    if args.output.exists() {
        eprintln!("Error: file already exists: {}", args.output.display());
        eprintln!("Remove it or use --output to specify a different path");
        return Ok(EXIT_ERROR);
    }

    if let Some(parent) = args.output.parent() {
        if !parent.as_os_str().is_empty() && parent != Path::new(".") {
            std::fs::create_dir_all(parent)?;
        }
    }

    std::fs::write(&args.output, DEFAULT_CONFIG_TEMPLATE)?;

    println!("Created {}", args.output.display());
    println!();
    println!("Next steps:");
    println!("  1. Edit {} to fit your project", args.output.display());
    println!("  2. Run: cleancheck scan");

    Ok(EXIT_SUCCESS)
}
