//! Metric checks on extracted functions and types.
//!
//! Each breached metric produces its own violation, so one oversized
//! function can be flagged for length, complexity, parameters, and nesting
//! at once. Severity follows the shared escalation bands in `types`.

use crate::analysis::{AnalysisInfo, BodyNode, FunctionInfo, SourceInfo, TypeInfo};
use crate::config::Thresholds;
use crate::engine::FileInfo;

use super::runner::Detector;
use super::{escalate, Severity, Violation, ViolationKind};

/// Checks function length, cyclomatic complexity, parameter count, nesting
/// depth, type length, and missing documentation.
pub struct FunctionDetector {
    thresholds: Thresholds,
    require_documentation: bool,
}

impl FunctionDetector {
    pub fn new(thresholds: Thresholds, require_documentation: bool) -> Self {
        Self {
            thresholds,
            require_documentation,
        }
    }

    fn check_function(&self, file: &FileInfo, func: &FunctionInfo) -> Vec<Violation> {
        let mut violations = Vec::new();
        let file_str = file.path.to_string_lossy().to_string();
        let t = &self.thresholds;

        let lines = func.line_count();
        if let Some(severity) = escalate(lines, t.function_lines) {
            violations.push(self.violation(
                ViolationKind::FunctionLength,
                severity,
                &file_str,
                func,
                format!(
                    "function '{}' is {} lines long (threshold {})",
                    func.name, lines, t.function_lines
                ),
                Some("split the function into smaller, focused helpers".to_string()),
            ));
        }

        let complexity = func.control_flow.cyclomatic_complexity() as usize;
        if let Some(severity) = escalate(complexity, t.complexity) {
            violations.push(self.violation(
                ViolationKind::Complexity,
                severity,
                &file_str,
                func,
                format!(
                    "function '{}' has cyclomatic complexity {} (threshold {})",
                    func.name, complexity, t.complexity
                ),
                Some("extract branches into separate functions".to_string()),
            ));
        }

        let params = func.parameters.len();
        if let Some(severity) = escalate(params, t.parameters) {
            violations.push(self.violation(
                ViolationKind::ParameterCount,
                severity,
                &file_str,
                func,
                format!(
                    "function '{}' takes {} parameters (threshold {})",
                    func.name, params, t.parameters
                ),
                Some("group related parameters into a struct or options type".to_string()),
            ));
        }

        if let Some(body) = &func.body {
            let depth = max_nesting_depth(body);
            if let Some(severity) = escalate(depth, t.nesting_depth) {
                violations.push(self.violation(
                    ViolationKind::NestingDepth,
                    severity,
                    &file_str,
                    func,
                    format!(
                        "function '{}' nests {} levels deep (threshold {})",
                        func.name, depth, t.nesting_depth
                    ),
                    Some("flatten with early returns or extracted helpers".to_string()),
                ));
            }
        }

        if self.require_documentation && func.exported && !func.has_doc {
            violations.push(self.violation(
                ViolationKind::MissingDoc,
                Severity::Medium,
                &file_str,
                func,
                format!("exported function '{}' has no doc comment", func.name),
                Some("document what the function does and when it errors".to_string()),
            ));
        }

        violations
    }

    fn check_type(&self, file: &FileInfo, ty: &TypeInfo) -> Option<Violation> {
        let lines = ty.span.line_count();
        let severity = escalate(lines, self.thresholds.class_lines)?;
        Some(Violation {
            kind: ViolationKind::ClassLength,
            severity,
            file: file.path.to_string_lossy().to_string(),
            line: ty.span.start_line,
            column: ty.span.start_col,
            end_line: Some(ty.span.end_line),
            end_column: Some(ty.span.end_col),
            message: format!(
                "{} '{}' spans {} lines (threshold {})",
                ty.kind.as_str(),
                ty.name,
                lines,
                self.thresholds.class_lines
            ),
            suggestion: Some("split responsibilities into smaller types".to_string()),
            snippet: None,
        })
    }

    fn violation(
        &self,
        kind: ViolationKind,
        severity: Severity,
        file: &str,
        func: &FunctionInfo,
        message: String,
        suggestion: Option<String>,
    ) -> Violation {
        Violation {
            kind,
            severity,
            file: file.to_string(),
            line: func.span.start_line,
            column: func.span.start_col,
            end_line: Some(func.span.end_line),
            end_column: Some(func.span.end_col),
            message,
            suggestion,
            snippet: None,
        }
    }

    fn check_source(&self, file: &FileInfo, source: &SourceInfo) -> Vec<Violation> {
        let mut violations = Vec::new();
        for func in &source.functions {
            violations.extend(self.check_function(file, func));
        }
        for ty in &source.types {
            violations.extend(self.check_type(file, ty));
        }
        violations
    }
}

impl Detector for FunctionDetector {
    fn name(&self) -> &'static str {
        "functions"
    }

    fn detect(&self, file: &FileInfo, analysis: &AnalysisInfo) -> Vec<Violation> {
        match analysis {
            AnalysisInfo::Rust(source)
            | AnalysisInfo::Go(source)
            | AnalysisInfo::Python(source) => self.check_source(file, source),
            AnalysisInfo::Unsupported => Vec::new(),
        }
    }
}

/// Maximum nesting depth of a body tree.
///
/// Explicit stack-based depth-first walk: reentrant, no shared mutable
/// state, safe to call from any worker. The root block sits at depth zero;
/// each if/loop/switch/select adds one level, and else branches were
/// already folded to their if's level by the adapters.
pub fn max_nesting_depth(root: &BodyNode) -> usize {
    let mut max_depth = 0;
    let mut stack: Vec<(&BodyNode, usize)> = vec![(root, 0)];

    while let Some((node, parent_depth)) = stack.pop() {
        let depth = parent_depth + usize::from(node.kind.increments_depth());
        max_depth = max_depth.max(depth);
        for child in &node.children {
            stack.push((child, depth));
        }
    }

    max_depth
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::{ControlFlowInfo, Language, NestKind, Span};
    use std::path::PathBuf;

    fn span(start_line: usize, end_line: usize) -> Span {
        Span {
            start_byte: 0,
            end_byte: 0,
            start_line,
            start_col: 1,
            end_line,
            end_col: 1,
        }
    }

    fn file_info() -> FileInfo {
        FileInfo {
            path: PathBuf::from("test.go"),
            extension: "go".to_string(),
            size: 100,
            line_count: 100,
            language: Language::Go,
            error: None,
        }
    }

    fn function(name: &str, lines: usize) -> FunctionInfo {
        FunctionInfo {
            name: name.to_string(),
            span: span(1, lines),
            parameters: vec![],
            result_count: 0,
            exported: false,
            has_doc: false,
            control_flow: ControlFlowInfo::default(),
            body: Some(BodyNode::block(vec![])),
        }
    }

    fn detector() -> FunctionDetector {
        FunctionDetector::new(Thresholds::default(), false)
    }

    fn nested_ifs(levels: usize) -> BodyNode {
        let mut node = BodyNode {
            kind: NestKind::If,
            children: vec![],
        };
        for _ in 1..levels {
            node = BodyNode {
                kind: NestKind::If,
                children: vec![node],
            };
        }
        BodyNode::block(vec![node])
    }

    #[test]
    fn test_max_nesting_depth_sequential_ifs() {
        assert_eq!(max_nesting_depth(&nested_ifs(4)), 4);
        assert_eq!(max_nesting_depth(&nested_ifs(1)), 1);
        assert_eq!(max_nesting_depth(&BodyNode::block(vec![])), 0);
    }

    #[test]
    fn test_max_nesting_depth_takes_deepest_branch() {
        let tree = BodyNode::block(vec![
            nested_ifs(2).children.into_iter().next().unwrap(),
            nested_ifs(3).children.into_iter().next().unwrap(),
        ]);
        assert_eq!(max_nesting_depth(&tree), 3);
    }

    #[test]
    fn test_length_violation_severity_bands() {
        let thresholds = Thresholds {
            function_lines: 25,
            ..Default::default()
        };
        let detector = FunctionDetector::new(thresholds, false);
        let file = file_info();

        // 30 lines at threshold 25 is 1.2x: Low.
        let violations = detector.check_function(&file, &function("smallish", 30));
        assert_eq!(violations.len(), 1);
        assert_eq!(violations[0].kind, ViolationKind::FunctionLength);
        assert_eq!(violations[0].severity, Severity::Low);

        // 51 lines at threshold 25 is 2.04x: High.
        let violations = detector.check_function(&file, &function("huge", 51));
        assert_eq!(violations[0].severity, Severity::High);

        // At the threshold: clean.
        let violations = detector.check_function(&file, &function("fine", 25));
        assert!(violations.is_empty());
    }

    #[test]
    fn test_nesting_violation_reports_depth() {
        let thresholds = Thresholds {
            nesting_depth: 3,
            ..Default::default()
        };
        let detector = FunctionDetector::new(thresholds, false);

        let mut func = function("deep", 10);
        func.body = Some(nested_ifs(4));

        let violations = detector.check_function(&file_info(), &func);
        assert_eq!(violations.len(), 1);
        assert_eq!(violations[0].kind, ViolationKind::NestingDepth);
        assert!(violations[0].message.contains("nests 4 levels"));
    }

    #[test]
    fn test_parameter_count_violation() {
        let detector = detector();
        let mut func = function("wide", 5);
        func.parameters = (0..8).map(|i| format!("p{}", i)).collect();

        let violations = detector.check_function(&file_info(), &func);
        assert_eq!(violations.len(), 1);
        assert_eq!(violations[0].kind, ViolationKind::ParameterCount);
        assert_eq!(violations[0].severity, Severity::Medium);
    }

    #[test]
    fn test_complexity_violation() {
        let detector = detector();
        let mut func = function("branchy", 5);
        func.control_flow.if_count = 12;

        let violations = detector.check_function(&file_info(), &func);
        assert_eq!(violations.len(), 1);
        assert_eq!(violations[0].kind, ViolationKind::Complexity);
    }

    #[test]
    fn test_missing_doc_only_when_required() {
        let mut func = function("Exported", 5);
        func.exported = true;

        let relaxed = FunctionDetector::new(Thresholds::default(), false);
        assert!(relaxed.check_function(&file_info(), &func).is_empty());

        let strict = FunctionDetector::new(Thresholds::default(), true);
        let violations = strict.check_function(&file_info(), &func);
        assert_eq!(violations.len(), 1);
        assert_eq!(violations[0].kind, ViolationKind::MissingDoc);
        assert_eq!(violations[0].severity, Severity::Medium);

        // Unexported functions never need docs.
        func.exported = false;
        assert!(strict.check_function(&file_info(), &func).is_empty());
    }

    #[test]
    fn test_unsupported_analysis_is_noop() {
        let detector = detector();
        assert!(detector
            .detect(&file_info(), &AnalysisInfo::Unsupported)
            .is_empty());
    }
}
