//! Output formatting for scan results.
//!
//! Two formats:
//! - Pretty: colored terminal output for human readability
//! - JSON: structured output for programmatic consumption
//!
//! Reporters consume the engine's `ScanSummary` and `ScanResult` list
//! verbatim and perform no analysis of their own.

use colored::*;
use serde::{Deserialize, Serialize};

use crate::analysis::CacheStats;
use crate::detect::{Severity, Violation};
use crate::engine::{ScanResult, ScanSummary};

/// Top-level JSON report schema.
#[derive(Serialize, Deserialize)]
pub struct JsonReport {
    pub version: String,
    pub summary: ScanSummary,
    /// Per-file results, already sorted by path.
    pub files: Vec<ScanResult>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cache: Option<CacheStats>,
}

/// Write results as pretty-printed JSON on stdout.
pub fn write_json(
    summary: &ScanSummary,
    results: &[ScanResult],
    cache: Option<CacheStats>,
) -> anyhow::Result<()> {
    let report = JsonReport {
        version: env!("CARGO_PKG_VERSION").to_string(),
        summary: summary.clone(),
        files: results.to_vec(),
        cache,
    };
    let json = serde_json::to_string_pretty(&report)?;
    println!("{}", json);
    Ok(())
}

/// Write results in pretty (human-readable) format.
pub fn write_pretty(
    summary: &ScanSummary,
    results: &[ScanResult],
    cache: Option<&CacheStats>,
    show_cache: bool,
) {
    // Header
    println!();
    print!("  ");
    print!("{}", "cleancheck".cyan().bold());
    println!(" v{}", env!("CARGO_PKG_VERSION"));
    println!();

    // Per-file violations
    let mut flagged_files = 0;
    for result in results {
        if result.violations.is_empty() && result.file.error.is_none() {
            continue;
        }
        flagged_files += 1;

        println!("  {}", result.file.path.display().to_string().blue().bold());
        if let Some(error) = &result.file.error {
            println!("    {} {}", "ERROR".red(), error);
        }
        for violation in &result.violations {
            write_violation(violation);
        }
        println!();
    }

    if flagged_files == 0 {
        println!("  {}", "No violations found.".green());
        println!();
    }

    // Summary
    write_summary(summary);

    if show_cache {
        if let Some(stats) = cache {
            println!("  {}{}", "Cache: ".dimmed(), stats);
        }
    }
    println!();

    write_final_status(summary);
    println!();
}

fn write_violation(v: &Violation) {
    write_severity_tag(&v.severity);
    print!("{:<17}", v.rule_id().dimmed());
    print!("{}", format!("{}:{}", v.line, v.column).dimmed());
    println!("  {}", v.message);
    if let Some(suggestion) = &v.suggestion {
        println!("           {}", format!("hint: {}", suggestion).dimmed());
    }
}

fn write_severity_tag(severity: &Severity) {
    match severity {
        Severity::Critical => print!("    {} ", "CRIT ".red().bold()),
        Severity::High => print!("    {} ", "HIGH ".red()),
        Severity::Medium => print!("    {} ", "MED  ".yellow()),
        Severity::Low => print!("    {} ", "LOW  ".yellow().dimmed()),
        Severity::Info => print!("    {} ", "INFO ".blue()),
    }
}

fn write_summary(summary: &ScanSummary) {
    println!("  {}", "Summary:".bold());
    println!(
        "    {} files ({} scanned, {} skipped) in {}ms",
        summary.total_files, summary.scanned_files, summary.skipped_files, summary.duration_ms
    );

    if summary.total_violations > 0 {
        let plural = if summary.total_violations != 1 { "s" } else { "" };
        println!(
            "    {} violation{}:",
            summary.total_violations.to_string().bold(),
            plural
        );
        for (kind, count) in &summary.violations_by_kind {
            println!("      {:<18} {:>4}", kind, count);
        }
    }
}

fn write_final_status(summary: &ScanSummary) {
    if summary.total_violations == 0 {
        println!("  {}", "PASSED".green().bold());
    } else {
        println!(
            "  {} ({} violations)",
            "FAILED".red().bold(),
            summary.total_violations
        );
    }
}
