//! Result types produced by the scan engine.

use std::collections::BTreeMap;
use std::path::PathBuf;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::analysis::Language;
use crate::detect::{Violation, ViolationKind};

/// Immutable per-file facts recorded at discovery/analysis time.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FileInfo {
    pub path: PathBuf,
    pub extension: String,
    pub size: u64,
    pub line_count: usize,
    pub language: Language,
    /// Analysis error, when extraction failed; the file still appears in
    /// the results with zero violations.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Basic per-file counts for reporters.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FileMetrics {
    pub total_lines: usize,
    pub blank_lines: usize,
    pub comment_lines: usize,
    pub function_count: usize,
    pub type_count: usize,
}

/// One scanned file: its info, metrics, and ordered violations.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScanResult {
    pub file: FileInfo,
    pub metrics: FileMetrics,
    pub violations: Vec<Violation>,
}

/// Aggregate counts for a whole scan run.
///
/// Mutated only during aggregation inside the engine; immutable once
/// handed to callers.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScanSummary {
    /// Files discovered under the roots (scanned + skipped).
    pub total_files: usize,
    /// Files that went through the analysis pipeline.
    pub scanned_files: usize,
    /// Files excluded before analysis (pattern, extension, test policy,
    /// size guard).
    pub skipped_files: usize,
    pub total_violations: usize,
    /// Violation counts keyed by rule identifier.
    pub violations_by_kind: BTreeMap<String, usize>,
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
    pub duration_ms: u64,
}

impl ScanSummary {
    /// Count of violations for one rule.
    pub fn count_for(&self, kind: ViolationKind) -> usize {
        self.violations_by_kind
            .get(kind.as_str())
            .copied()
            .unwrap_or(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_summary_count_for_missing_kind() {
        let summary = ScanSummary {
            total_files: 0,
            scanned_files: 0,
            skipped_files: 0,
            total_violations: 0,
            violations_by_kind: BTreeMap::new(),
            started_at: Utc::now(),
            finished_at: Utc::now(),
            duration_ms: 0,
        };
        assert_eq!(summary.count_for(ViolationKind::Naming), 0);
    }
}
