//! Identifier quality checks, delegating to the term analyzer.
//!
//! Function and type names scoring below the confidence threshold are
//! flagged with the analyzer's suggested fixes. Leading and trailing
//! underscores are stripped first so Python's privacy and dunder
//! conventions are not themselves penalized.

use crate::analysis::AnalysisInfo;
use crate::engine::FileInfo;
use crate::naming::TermAnalyzer;

use super::runner::Detector;
use super::{Severity, Violation, ViolationKind};

/// Identifiers scoring below this are flagged.
const CONFIDENCE_THRESHOLD: f64 = 0.5;
/// Identifiers scoring below this escalate from Low to Medium.
const POOR_CONFIDENCE: f64 = 0.3;

/// Flags poorly named functions and types.
pub struct NamingDetector {
    analyzer: TermAnalyzer,
}

impl NamingDetector {
    pub fn new() -> Self {
        Self {
            analyzer: TermAnalyzer::new(),
        }
    }

    fn check_identifier(
        &self,
        file: &FileInfo,
        name: &str,
        what: &str,
        line: usize,
        column: usize,
    ) -> Option<Violation> {
        let bare = name.trim_matches('_');
        if bare.is_empty() {
            return None;
        }

        let result = self.analyzer.analyze(bare);
        if result.confidence >= CONFIDENCE_THRESHOLD {
            return None;
        }

        let severity = if result.confidence < POOR_CONFIDENCE {
            Severity::Medium
        } else {
            Severity::Low
        };

        let suggestion = if result.suggestions.is_empty() {
            None
        } else {
            Some(result.suggestions.join("; "))
        };

        Some(Violation {
            kind: ViolationKind::Naming,
            severity,
            file: file.path.to_string_lossy().to_string(),
            line,
            column,
            end_line: None,
            end_column: None,
            message: format!(
                "{} name '{}' has low naming confidence ({:.2})",
                what, name, result.confidence
            ),
            suggestion,
            snippet: None,
        })
    }
}

impl Default for NamingDetector {
    fn default() -> Self {
        Self::new()
    }
}

impl Detector for NamingDetector {
    fn name(&self) -> &'static str {
        "naming"
    }

    fn detect(&self, file: &FileInfo, analysis: &AnalysisInfo) -> Vec<Violation> {
        let source = match analysis {
            AnalysisInfo::Rust(source)
            | AnalysisInfo::Go(source)
            | AnalysisInfo::Python(source) => source,
            AnalysisInfo::Unsupported => return Vec::new(),
        };

        let mut violations = Vec::new();
        for func in &source.functions {
            violations.extend(self.check_identifier(
                file,
                &func.name,
                "function",
                func.span.start_line,
                func.span.start_col,
            ));
        }
        for ty in &source.types {
            violations.extend(self.check_identifier(
                file,
                &ty.name,
                ty.kind.as_str(),
                ty.span.start_line,
                ty.span.start_col,
            ));
        }
        violations
    }
}
