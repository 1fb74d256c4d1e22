//! Dictionary-based word morphology.
//!
//! Decides whether a single identifier fragment is a recognized whole word
//! (possibly root + affixes) or a probable abbreviation, with a confidence
//! score. Results are memoized per word for the lifetime of the engine; the
//! memo is safe for concurrent readers because naming analysis runs inside
//! the scan worker pool.

use std::collections::HashMap;
use std::sync::RwLock;

use super::dictionary::{self, PREFIXES, ROOT_WORDS, SUFFIXES};

/// Kind of morpheme within a word.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MorphemeKind {
    Prefix,
    Root,
    Suffix,
}

/// A dictionary-recognized unit of a word.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Morpheme {
    /// Surface text as it appears in the word (lowercased).
    pub text: String,
    pub kind: MorphemeKind,
    /// Start offset within the analyzed word.
    pub start: usize,
}

/// Analysis result for a single word.
#[derive(Debug, Clone)]
pub struct MorphInfo {
    /// The analyzed word, lowercased.
    pub word: String,
    /// Whether the word is a recognized complete word.
    pub is_complete: bool,
    /// Confidence in the classification, 0.0 to 1.0.
    pub confidence: f64,
    /// Recognized morphemes in order of appearance.
    pub morphemes: Vec<Morpheme>,
}

impl MorphInfo {
    fn abbreviation(word: &str, confidence: f64) -> Self {
        Self {
            word: word.to_string(),
            is_complete: false,
            confidence,
            morphemes: Vec::new(),
        }
    }
}

/// Dictionary-driven morphological analyzer with a per-word memo.
pub struct MorphologyEngine {
    memo: RwLock<HashMap<String, MorphInfo>>,
}

impl MorphologyEngine {
    pub fn new() -> Self {
        Self {
            memo: RwLock::new(HashMap::new()),
        }
    }

    /// Analyze a word, returning the memoized result when available.
    pub fn analyze(&self, word: &str) -> MorphInfo {
        let key = word.to_lowercase();

        if let Ok(memo) = self.memo.read() {
            if let Some(info) = memo.get(&key) {
                return info.clone();
            }
        }

        let info = analyze_word(&key);
        if let Ok(mut memo) = self.memo.write() {
            memo.insert(key, info.clone());
        }
        info
    }

    /// Dictionary entries that extend the given word and are strictly longer.
    ///
    /// Listed abbreviations resolve to their preferred expansion first; the
    /// rest are prefix matches against the root dictionary.
    pub fn suggested_expansions(&self, word: &str) -> Vec<String> {
        let key = word.to_lowercase();
        if key.is_empty() {
            return Vec::new();
        }

        let mut expansions = Vec::new();
        if let Some(expansion) = dictionary::abbreviation_expansion(&key) {
            expansions.push(expansion.to_string());
        }

        for root in ROOT_WORDS.iter() {
            if root.len() > key.len() && root.starts_with(key.as_str()) {
                expansions.push((*root).to_string());
            }
        }

        expansions.sort();
        expansions.dedup();
        expansions.truncate(MAX_EXPANSIONS);
        expansions
    }

    /// Number of memoized words.
    pub fn memo_len(&self) -> usize {
        self.memo.read().map(|m| m.len()).unwrap_or(0)
    }

    /// Empty the memo without touching the dictionaries.
    pub fn clear_cache(&self) {
        if let Ok(mut memo) = self.memo.write() {
            memo.clear();
        }
    }
}

impl Default for MorphologyEngine {
    fn default() -> Self {
        Self::new()
    }
}

/// Cap on expansion suggestions per word.
const MAX_EXPANSIONS: usize = 5;

/// Confidence for listed abbreviations.
const ABBREVIATION_CONFIDENCE: f64 = 0.3;
/// Confidence for short tokens with no dictionary match.
const SHORT_UNKNOWN_CONFIDENCE: f64 = 0.25;
/// Confidence for long tokens with no dictionary match.
const LONG_UNKNOWN_CONFIDENCE: f64 = 0.4;
/// Base confidence for a bare root match.
const ROOT_CONFIDENCE: f64 = 0.7;
/// Base confidence for a root recognized together with affixes.
const COMPOUND_CONFIDENCE: f64 = 0.8;

fn analyze_word(word: &str) -> MorphInfo {
    if word.is_empty() || !word.chars().any(|c| c.is_alphabetic()) {
        return MorphInfo::abbreviation(word, 0.0);
    }

    if dictionary::is_known_abbreviation(word) {
        return MorphInfo::abbreviation(word, ABBREVIATION_CONFIDENCE);
    }

    if let Some(morphemes) = decompose(word) {
        let base = if morphemes.len() > 1 {
            COMPOUND_CONFIDENCE
        } else {
            ROOT_CONFIDENCE
        };
        // Longer recognized words are less likely to be accidental matches.
        let bonus = 0.02 * word.len().saturating_sub(4) as f64;
        return MorphInfo {
            word: word.to_string(),
            is_complete: true,
            confidence: (base + bonus).min(0.95),
            morphemes,
        };
    }

    if word.len() <= 3 {
        MorphInfo::abbreviation(word, SHORT_UNKNOWN_CONFIDENCE)
    } else {
        MorphInfo::abbreviation(word, LONG_UNKNOWN_CONFIDENCE)
    }
}

/// Split a word into prefix/root/suffix morphemes, or None when no known
/// root can be found.
fn decompose(word: &str) -> Option<Vec<Morpheme>> {
    if let Some(morphemes) = decompose_suffixed(word, 0) {
        return Some(morphemes);
    }

    // Try a single leading prefix, then suffix stripping on the remainder.
    for prefix in PREFIXES {
        if let Some(rest) = word.strip_prefix(prefix) {
            if rest.len() < 3 {
                continue;
            }
            if let Some(mut morphemes) = decompose_suffixed(rest, prefix.len()) {
                morphemes.insert(
                    0,
                    Morpheme {
                        text: (*prefix).to_string(),
                        kind: MorphemeKind::Prefix,
                        start: 0,
                    },
                );
                return Some(morphemes);
            }
        }
    }

    None
}

/// Recursively strip suffixes until the remaining stem resolves to a root.
fn decompose_suffixed(word: &str, offset: usize) -> Option<Vec<Morpheme>> {
    if ROOT_WORDS.contains(word) {
        return Some(vec![Morpheme {
            text: word.to_string(),
            kind: MorphemeKind::Root,
            start: offset,
        }]);
    }

    for suffix in SUFFIXES {
        let Some(stem) = word.strip_suffix(suffix) else {
            continue;
        };
        if stem.len() < 2 {
            continue;
        }

        let suffix_morpheme = Morpheme {
            text: (*suffix).to_string(),
            kind: MorphemeKind::Suffix,
            start: offset + stem.len(),
        };

        if let Some(root) = resolve_stem(stem) {
            return Some(vec![
                Morpheme {
                    text: root,
                    kind: MorphemeKind::Root,
                    start: offset,
                },
                suffix_morpheme,
            ]);
        }

        // Stacked suffixes, e.g. "configurations" = configure + ation + s.
        if let Some(mut morphemes) = decompose_suffixed(stem, offset) {
            morphemes.push(suffix_morpheme);
            return Some(morphemes);
        }
    }

    None
}

/// Resolve a suffix-stripped stem to a dictionary root, allowing the usual
/// English spelling adjustments.
fn resolve_stem(stem: &str) -> Option<String> {
    if ROOT_WORDS.contains(stem) {
        return Some(stem.to_string());
    }

    // Dropped final e: "configur" + "ation" -> configure.
    let with_e = format!("{}e", stem);
    if ROOT_WORDS.contains(with_e.as_str()) {
        return Some(stem.to_string());
    }

    // Doubled final consonant: "runn" + "ing" -> run.
    let mut chars = stem.chars();
    if let (Some(last), Some(prev)) = (chars.next_back(), chars.next_back()) {
        if last == prev && ROOT_WORDS.contains(&stem[..stem.len() - last.len_utf8()]) {
            return Some(stem.to_string());
        }
    }

    // y-to-i mutation: "entri" + "es" -> entry.
    if let Some(base) = stem.strip_suffix('i') {
        let with_y = format!("{}y", base);
        if ROOT_WORDS.contains(with_y.as_str()) {
            return Some(stem.to_string());
        }
    }

    None
}
