//! Technical-debt marker detection in comments.
//!
//! Scans the comments extracted by the language adapters for markers like
//! TODO and FIXME, case-insensitively, one marker-colon-text pattern for
//! all of them. Plain comments without a recognized marker are never
//! flagged.

use lazy_static::lazy_static;
use regex::Regex;

use crate::analysis::{AnalysisInfo, CommentInfo};
use crate::engine::FileInfo;

use super::runner::Detector;
use super::{Severity, Violation, ViolationKind};

lazy_static! {
    /// Marker, optional colon, then the remainder of the line.
    static ref MARKER_PATTERN: Regex =
        Regex::new(r"(?i)\b(TODO|FIXME|HACK|XXX|BUG|OPTIMIZE|REFACTOR)\b\s*:?\s*(.*)").unwrap();
}

/// Severity and suggestion for one marker word.
fn marker_policy(marker: &str) -> (Severity, &'static str) {
    match marker.to_uppercase().as_str() {
        "BUG" => (Severity::High, "investigate and fix the underlying defect"),
        "FIXME" => (Severity::High, "resolve the known problem before it ships"),
        "HACK" => (Severity::Medium, "replace the workaround with a proper fix"),
        "XXX" => (Severity::Medium, "review and resolve the flagged concern"),
        "OPTIMIZE" => (Severity::Low, "profile first, then optimize or drop the note"),
        "REFACTOR" => (Severity::Low, "schedule the cleanup or drop the note"),
        // TODO and anything future-proofed.
        _ => (Severity::Low, "finish the planned work or track it in an issue"),
    }
}

/// Flags technical-debt markers left in comments.
pub struct TodoDetector;

impl TodoDetector {
    pub fn new() -> Self {
        Self
    }

    fn scan_comment(&self, file: &FileInfo, comment: &CommentInfo) -> Vec<Violation> {
        let mut violations = Vec::new();
        let file_str = file.path.to_string_lossy().to_string();

        // Block comments span lines; report each marker on its own line.
        for (offset, line) in comment.text.lines().enumerate() {
            let Some(caps) = MARKER_PATTERN.captures(line) else {
                continue;
            };
            let marker = caps.get(1).map(|m| m.as_str()).unwrap_or("TODO");
            let rest = caps.get(2).map(|m| m.as_str().trim()).unwrap_or("");
            let (severity, suggestion) = marker_policy(marker);

            let message = if rest.is_empty() {
                format!("{} marker in comment", marker.to_uppercase())
            } else {
                format!("{} marker: {}", marker.to_uppercase(), rest)
            };

            violations.push(Violation {
                kind: ViolationKind::TodoMarker,
                severity,
                file: file_str.clone(),
                line: comment.span.start_line + offset,
                column: if offset == 0 { comment.span.start_col } else { 1 },
                end_line: None,
                end_column: None,
                message,
                suggestion: Some(suggestion.to_string()),
                snippet: Some(line.trim().to_string()),
            });
        }

        violations
    }
}

impl Default for TodoDetector {
    fn default() -> Self {
        Self::new()
    }
}

impl Detector for TodoDetector {
    fn name(&self) -> &'static str {
        "todos"
    }

    fn detect(&self, file: &FileInfo, analysis: &AnalysisInfo) -> Vec<Violation> {
        let source = match analysis {
            AnalysisInfo::Rust(source)
            | AnalysisInfo::Go(source)
            | AnalysisInfo::Python(source) => source,
            AnalysisInfo::Unsupported => return Vec::new(),
        };

        source
            .comments
            .iter()
            .flat_map(|comment| self.scan_comment(file, comment))
            .collect()
    }
}
