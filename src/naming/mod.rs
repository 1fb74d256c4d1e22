//! Identifier quality analysis.
//!
//! Two layers: `morphology` decides whether a single word fragment is a
//! recognized word or a probable abbreviation, and `terms` classifies whole
//! identifiers (acronyms, naming conventions, compound splitting) on top of
//! it. Both are backed by the immutable tables in `dictionary`.

pub mod dictionary;
mod morphology;
mod terms;

pub use morphology::{MorphInfo, Morpheme, MorphemeKind, MorphologyEngine};
pub use terms::{
    detect_convention, split_identifier, CaseConvention, ProgrammingTermResult, TermAnalyzer,
};
