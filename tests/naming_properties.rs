//! Identifier-analysis properties exercised through the public API.

use cleancheck::naming::split_identifier;
use cleancheck::{MorphologyEngine, TermAnalyzer};

#[test]
fn known_acronyms_score_high() {
    let analyzer = TermAnalyzer::new();
    for term in ["HTTP", "API"] {
        let result = analyzer.analyze(term);
        assert!(
            result.confidence >= 0.9,
            "{} scored {}",
            term,
            result.confidence
        );
        assert!(result.is_acronym);
    }
}

#[test]
fn listed_abbreviations_score_low_and_incomplete() {
    let engine = MorphologyEngine::new();
    for word in ["cfg", "mgr"] {
        let info = engine.analyze(word);
        assert!(info.confidence < 0.5, "{} scored {}", word, info.confidence);
        assert!(!info.is_complete);
    }
}

#[test]
fn recognized_words_score_high_and_complete() {
    let engine = MorphologyEngine::new();
    for word in ["handler", "configuration"] {
        let info = engine.analyze(word);
        assert!(
            info.confidence >= 0.7,
            "{} scored {}",
            word,
            info.confidence
        );
        assert!(info.is_complete);
    }
}

#[test]
fn compound_identifiers_segment_correctly() {
    assert_eq!(split_identifier("HTTPServer"), vec!["http", "server"]);
    assert_eq!(split_identifier("userID123"), vec!["user", "id", "123"]);
    assert_eq!(
        split_identifier("getUser2Factor"),
        vec!["get", "user", "2", "factor"]
    );
}

#[test]
fn morphology_memo_survives_across_identifiers() {
    let analyzer = TermAnalyzer::new();
    analyzer.analyze("parseHandler");
    analyzer.analyze("storeHandler");

    // "handler" was analyzed once and memoized; both results agree.
    let first = analyzer.morphology().analyze("handler");
    let memo_len = analyzer.morphology().memo_len();
    analyzer.morphology().analyze("handler");
    assert_eq!(analyzer.morphology().memo_len(), memo_len);
    assert!(first.is_complete);
}
