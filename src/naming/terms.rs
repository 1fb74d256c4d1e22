//! Whole-identifier analysis built on the morphology engine.
//!
//! Classifies identifiers (acronym, common term, naming convention), splits
//! compound names into components, and blends per-component morphology into
//! an overall confidence score with suggested fixes for weak names.

use super::dictionary;
use super::morphology::{MorphInfo, MorphologyEngine};

/// Naming convention detected on an identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CaseConvention {
    Camel,
    Pascal,
    Snake,
    Kebab,
}

impl CaseConvention {
    pub fn as_str(&self) -> &'static str {
        match self {
            CaseConvention::Camel => "camelCase",
            CaseConvention::Pascal => "PascalCase",
            CaseConvention::Snake => "snake_case",
            CaseConvention::Kebab => "kebab-case",
        }
    }
}

/// Analysis result for one identifier.
#[derive(Debug, Clone)]
pub struct ProgrammingTermResult {
    /// The identifier as given.
    pub term: String,
    /// Exact match against the acronym table.
    pub is_acronym: bool,
    /// Exact match against the common-term table.
    pub is_common_term: bool,
    /// Detected naming convention, if any.
    pub convention: Option<CaseConvention>,
    /// Lowercased word components after compound splitting.
    pub components: Vec<String>,
    /// Morphology results for each component, in component order.
    pub morphology: Vec<MorphInfo>,
    /// Overall naming confidence, 0.0 to 1.0.
    pub confidence: f64,
    /// Suggested fixes, populated when confidence is below 0.5.
    pub suggestions: Vec<String>,
}

/// Identifier analyzer. Owns a morphology engine so component results are
/// memoized across identifiers within one analyzer instance.
pub struct TermAnalyzer {
    morphology: MorphologyEngine,
}

/// Confidence granted to identifiers in the acronym table.
const ACRONYM_CONFIDENCE: f64 = 0.95;
/// Confidence for short all-caps tokens not in the table.
const UNKNOWN_ACRONYM_CONFIDENCE: f64 = 0.3;
/// Flagging threshold below which suggestions are generated.
const SUGGESTION_THRESHOLD: f64 = 0.5;

impl TermAnalyzer {
    pub fn new() -> Self {
        Self {
            morphology: MorphologyEngine::new(),
        }
    }

    /// Borrow the underlying morphology engine.
    pub fn morphology(&self) -> &MorphologyEngine {
        &self.morphology
    }

    /// Analyze an identifier. Each call computes a fresh result; only the
    /// per-word morphology underneath is memoized.
    pub fn analyze(&self, identifier: &str) -> ProgrammingTermResult {
        let term = identifier.trim();
        let lower = term.to_lowercase();

        if term.is_empty() {
            return ProgrammingTermResult {
                term: String::new(),
                is_acronym: false,
                is_common_term: false,
                convention: None,
                components: Vec::new(),
                morphology: Vec::new(),
                confidence: 0.0,
                suggestions: Vec::new(),
            };
        }

        // Acronym short-circuit: table hits are accepted outright, and
        // unknown shouty short tokens are rejected outright.
        if dictionary::is_known_acronym(&lower) {
            return ProgrammingTermResult {
                term: term.to_string(),
                is_acronym: true,
                is_common_term: false,
                convention: None,
                components: vec![lower],
                morphology: Vec::new(),
                confidence: ACRONYM_CONFIDENCE,
                suggestions: Vec::new(),
            };
        }
        if is_unknown_caps_token(term) {
            let mut result = ProgrammingTermResult {
                term: term.to_string(),
                is_acronym: false,
                is_common_term: false,
                convention: None,
                components: vec![lower],
                morphology: Vec::new(),
                confidence: UNKNOWN_ACRONYM_CONFIDENCE,
                suggestions: Vec::new(),
            };
            result.suggestions = self.build_suggestions(&result);
            return result;
        }

        let is_common_term = dictionary::is_common_term(&lower);
        let convention = detect_convention(term);
        let components = split_identifier(term);
        let morphology: Vec<MorphInfo> = components
            .iter()
            .map(|c| self.morphology.analyze(c))
            .collect();

        let avg_morph = if morphology.is_empty() {
            0.0
        } else {
            morphology.iter().map(|m| m.confidence).sum::<f64>() / morphology.len() as f64
        };

        let mut confidence = 0.0;
        if is_common_term {
            confidence += 0.4;
        }
        if convention.is_some() {
            confidence += 0.3;
        }
        confidence += 0.4 * avg_morph;
        if term.chars().count() <= 3 && !is_common_term {
            confidence *= 0.5;
        }
        confidence = confidence.clamp(0.0, 1.0);

        let mut result = ProgrammingTermResult {
            term: term.to_string(),
            is_acronym: false,
            is_common_term,
            convention,
            components,
            morphology,
            confidence,
            suggestions: Vec::new(),
        };
        if confidence < SUGGESTION_THRESHOLD {
            result.suggestions = self.build_suggestions(&result);
        }
        result
    }

    /// Assemble suggestions for a low-confidence identifier.
    fn build_suggestions(&self, result: &ProgrammingTermResult) -> Vec<String> {
        let mut suggestions = Vec::new();
        let lower = result.term.to_lowercase();

        if let Some(expansion) = dictionary::acronym_expansion(&lower) {
            suggestions.push(format!("'{}' stands for {}", result.term, expansion));
        }

        for (component, info) in result.components.iter().zip(&result.morphology) {
            if info.confidence >= SUGGESTION_THRESHOLD || !component.chars().any(|c| c.is_alphabetic()) {
                continue;
            }
            if let Some(expansion) = dictionary::abbreviation_expansion(component) {
                suggestions.push(format!("expand '{}' to '{}'", component, expansion));
                continue;
            }
            let expansions = self.morphology.suggested_expansions(component);
            if !expansions.is_empty() {
                suggestions.push(format!(
                    "'{}' may be an abbreviation of: {}",
                    component,
                    expansions.join(", ")
                ));
            }
        }

        if result.convention.is_none() && result.components.len() > 1 {
            suggestions.push(
                "use a consistent naming convention (camelCase or snake_case)".to_string(),
            );
        }

        if result.term.chars().count() <= 3 && !result.is_common_term && !result.is_acronym {
            suggestions.push("use a more descriptive name".to_string());
        }

        suggestions
    }
}

impl Default for TermAnalyzer {
    fn default() -> Self {
        Self::new()
    }
}

/// All-caps alphabetic token short enough to read as an acronym.
fn is_unknown_caps_token(term: &str) -> bool {
    let mut chars = term.chars();
    chars.all(|c| c.is_uppercase()) && term.chars().count() <= 5 && !term.is_empty()
}

/// Detect the naming convention of an identifier, if it cleanly follows one.
///
/// A lowercase multi-character word with no separators and no interior
/// uppercase follows none of the conventions.
pub fn detect_convention(term: &str) -> Option<CaseConvention> {
    if term.is_empty() {
        return None;
    }

    let has_underscore = term.contains('_');
    let has_hyphen = term.contains('-');

    if has_underscore || has_hyphen {
        if has_underscore && has_hyphen {
            return None;
        }
        let sep = if has_underscore { '_' } else { '-' };
        let doubled = [sep, sep].iter().collect::<String>();
        if term.starts_with(sep)
            || term.ends_with(sep)
            || term.contains(&doubled)
            || term.chars().any(|c| c.is_uppercase())
        {
            return None;
        }
        return Some(if has_underscore {
            CaseConvention::Snake
        } else {
            CaseConvention::Kebab
        });
    }

    let first = term.chars().next()?;
    let has_interior_upper = term.chars().skip(1).any(|c| c.is_uppercase());
    let has_lower = term.chars().any(|c| c.is_lowercase());

    if first.is_lowercase() && has_interior_upper {
        return Some(CaseConvention::Camel);
    }
    if first.is_uppercase() && has_lower {
        return Some(CaseConvention::Pascal);
    }
    None
}

/// Split a compound identifier into lowercased components.
///
/// Boundaries: `_` and `-` separators, lower-to-upper transitions,
/// acronym-to-word transitions (`HTTPServer` -> `http` + `server`), and
/// letter/digit transitions. Unicode-aware via `char` case queries.
pub fn split_identifier(identifier: &str) -> Vec<String> {
    let chars: Vec<char> = identifier.chars().collect();
    let mut components = Vec::new();
    let mut current = String::new();

    for (i, &c) in chars.iter().enumerate() {
        if c == '_' || c == '-' {
            flush(&mut current, &mut components);
            continue;
        }

        if let Some(prev) = current.chars().next_back() {
            let acronym_end = prev.is_uppercase()
                && c.is_uppercase()
                && chars.get(i + 1).is_some_and(|n| n.is_lowercase());
            let boundary = (prev.is_lowercase() && c.is_uppercase())
                || (prev.is_alphabetic() && c.is_numeric())
                || (prev.is_numeric() && c.is_alphabetic())
                || acronym_end;
            if boundary {
                flush(&mut current, &mut components);
            }
        }

        current.push(c);
    }
    flush(&mut current, &mut components);
    components
}

fn flush(current: &mut String, components: &mut Vec<String>) {
    if !current.is_empty() {
        components.push(current.to_lowercase());
        current.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_acronym_boundary() {
        assert_eq!(split_identifier("HTTPServer"), vec!["http", "server"]);
    }

    #[test]
    fn test_split_digit_boundaries() {
        assert_eq!(split_identifier("userID123"), vec!["user", "id", "123"]);
        assert_eq!(
            split_identifier("getUser2Factor"),
            vec!["get", "user", "2", "factor"]
        );
    }

    #[test]
    fn test_split_separators() {
        assert_eq!(split_identifier("parse_config_file"), vec!["parse", "config", "file"]);
        assert_eq!(split_identifier("dry-run"), vec!["dry", "run"]);
        assert_eq!(split_identifier("__init__"), vec!["init"]);
    }

    #[test]
    fn test_known_acronym_scores_high() {
        let analyzer = TermAnalyzer::new();
        for term in ["HTTP", "API", "http", "api"] {
            let result = analyzer.analyze(term);
            assert!(result.is_acronym, "{} should be a known acronym", term);
            assert!(result.confidence >= 0.9);
        }
    }

    #[test]
    fn test_unknown_caps_scores_low() {
        let analyzer = TermAnalyzer::new();
        let result = analyzer.analyze("QZX");
        assert!(!result.is_acronym);
        assert!(result.confidence <= 0.3);
        assert!(!result.suggestions.is_empty());
    }

    #[test]
    fn test_convention_detection() {
        assert_eq!(detect_convention("parseFile"), Some(CaseConvention::Camel));
        assert_eq!(detect_convention("ParseFile"), Some(CaseConvention::Pascal));
        assert_eq!(detect_convention("parse_file"), Some(CaseConvention::Snake));
        assert_eq!(detect_convention("parse-file"), Some(CaseConvention::Kebab));

        // A plain lowercase word follows none of the conventions.
        assert_eq!(detect_convention("handler"), None);
        // Malformed separators disqualify.
        assert_eq!(detect_convention("_leading"), None);
        assert_eq!(detect_convention("trailing_"), None);
        assert_eq!(detect_convention("double__sep"), None);
        assert_eq!(detect_convention("Mixed_Case"), None);
    }

    #[test]
    fn test_descriptive_camel_case_passes() {
        let analyzer = TermAnalyzer::new();
        let result = analyzer.analyze("parseConfigFile");
        assert!(result.confidence >= 0.5, "got {}", result.confidence);
        assert!(result.suggestions.is_empty());
    }

    #[test]
    fn test_abbreviated_identifier_flagged() {
        let analyzer = TermAnalyzer::new();
        let result = analyzer.analyze("cfgMgr");
        assert!(result.confidence < 0.5, "got {}", result.confidence);
        assert!(result
            .suggestions
            .iter()
            .any(|s| s.contains("config") || s.contains("manager")));
    }

    #[test]
    fn test_short_term_penalty() {
        let analyzer = TermAnalyzer::new();
        // "xs" is short, unknown, and not a common term.
        let result = analyzer.analyze("xs");
        assert!(result.confidence < 0.5);
        assert!(result
            .suggestions
            .iter()
            .any(|s| s.contains("more descriptive")));

        // "get" is equally short but a common term, so no penalty applies.
        let result = analyzer.analyze("get");
        assert!(result.confidence >= 0.4);
    }

    #[test]
    fn test_confidence_clamped() {
        let analyzer = TermAnalyzer::new();
        let result = analyzer.analyze("parseConfigurationHandler");
        assert!(result.confidence <= 1.0);
        assert!(result.confidence >= 0.0);
    }
}
