//! Core types for detection results.

use serde::{Deserialize, Serialize};

/// Severity levels for violations, ordered least to most severe.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Info,
    Low,
    Medium,
    High,
    Critical,
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Severity::Info => "info",
            Severity::Low => "low",
            Severity::Medium => "medium",
            Severity::High => "high",
            Severity::Critical => "critical",
        };
        write!(f, "{}", s)
    }
}

impl std::str::FromStr for Severity {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "info" => Ok(Severity::Info),
            "low" => Ok(Severity::Low),
            "medium" => Ok(Severity::Medium),
            "high" => Ok(Severity::High),
            "critical" => Ok(Severity::Critical),
            _ => Err(format!("unknown severity: {}", s)),
        }
    }
}

/// Rule names for the different violation types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ViolationKind {
    #[serde(rename = "function-length")]
    FunctionLength,
    #[serde(rename = "complexity")]
    Complexity,
    #[serde(rename = "parameter-count")]
    ParameterCount,
    #[serde(rename = "nesting-depth")]
    NestingDepth,
    #[serde(rename = "class-length")]
    ClassLength,
    #[serde(rename = "missing-doc")]
    MissingDoc,
    #[serde(rename = "naming")]
    Naming,
    #[serde(rename = "todo-marker")]
    TodoMarker,
}

impl ViolationKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ViolationKind::FunctionLength => "function-length",
            ViolationKind::Complexity => "complexity",
            ViolationKind::ParameterCount => "parameter-count",
            ViolationKind::NestingDepth => "nesting-depth",
            ViolationKind::ClassLength => "class-length",
            ViolationKind::MissingDoc => "missing-doc",
            ViolationKind::Naming => "naming",
            ViolationKind::TodoMarker => "todo-marker",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "function-length" => Some(ViolationKind::FunctionLength),
            "complexity" => Some(ViolationKind::Complexity),
            "parameter-count" => Some(ViolationKind::ParameterCount),
            "nesting-depth" => Some(ViolationKind::NestingDepth),
            "class-length" => Some(ViolationKind::ClassLength),
            "missing-doc" => Some(ViolationKind::MissingDoc),
            "naming" => Some(ViolationKind::Naming),
            "todo-marker" => Some(ViolationKind::TodoMarker),
            _ => None,
        }
    }

    /// All kinds, in reporting order.
    pub fn all() -> &'static [ViolationKind] {
        &[
            ViolationKind::FunctionLength,
            ViolationKind::Complexity,
            ViolationKind::ParameterCount,
            ViolationKind::NestingDepth,
            ViolationKind::ClassLength,
            ViolationKind::MissingDoc,
            ViolationKind::Naming,
            ViolationKind::TodoMarker,
        ]
    }
}

impl std::fmt::Display for ViolationKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A single detected issue. Immutable once created.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Violation {
    pub kind: ViolationKind,
    pub severity: Severity,
    pub file: String,
    pub line: usize,
    pub column: usize,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_line: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_column: Option<usize>,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub suggestion: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub snippet: Option<String>,
}

impl Violation {
    /// Stable rule identifier for reporters.
    pub fn rule_id(&self) -> &'static str {
        self.kind.as_str()
    }
}

/// Compare severity of a metric value against its threshold.
///
/// Values at or under the threshold pass; overruns escalate with the ratio:
/// up to 1.5x is Low, up to 2x is Medium, beyond that High.
pub fn escalate(value: usize, threshold: usize) -> Option<Severity> {
    if threshold == 0 || value <= threshold {
        return None;
    }
    let ratio = value as f64 / threshold as f64;
    Some(if ratio <= 1.5 {
        Severity::Low
    } else if ratio <= 2.0 {
        Severity::Medium
    } else {
        Severity::High
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_severity_ordering() {
        assert!(Severity::Info < Severity::Low);
        assert!(Severity::Low < Severity::Medium);
        assert!(Severity::Medium < Severity::High);
        assert!(Severity::High < Severity::Critical);
    }

    #[test]
    fn test_kind_round_trip() {
        for kind in ViolationKind::all() {
            assert_eq!(ViolationKind::parse(kind.as_str()), Some(*kind));
        }
        assert_eq!(ViolationKind::parse("bogus"), None);
    }

    #[test]
    fn test_escalation_bands() {
        assert_eq!(escalate(25, 25), None);
        assert_eq!(escalate(30, 25), Some(Severity::Low));
        // Exactly 1.5x stays in the Low band.
        assert_eq!(escalate(36, 24), Some(Severity::Low));
        assert_eq!(escalate(45, 25), Some(Severity::Medium));
        assert_eq!(escalate(50, 25), Some(Severity::Medium));
        // 51 lines against a threshold of 25 is 2.04x: High.
        assert_eq!(escalate(51, 25), Some(Severity::High));
    }

    #[test]
    fn test_escalation_zero_threshold_disables() {
        assert_eq!(escalate(100, 0), None);
    }
}
