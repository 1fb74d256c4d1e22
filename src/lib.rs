//! Cleancheck - multi-language clean code scanner.
//!
//! Cleancheck scans source trees and flags "clean code" violations: long
//! functions, excessive cyclomatic complexity, deep nesting, too many
//! parameters, poorly chosen identifiers, and leftover technical-debt
//! markers. Analysis is syntactic only; there is no type checking and no
//! cross-file analysis.
//!
//! # Architecture
//!
//! The pipeline is built on tree-sitter for AST extraction:
//!
//! - `analysis`: per-language adapters producing normalized facts, fronted
//!   by a TTL/LRU-bounded cache
//! - `detect`: detection rules (metrics, naming, debt markers) consuming
//!   those facts
//! - `naming`: dictionary-driven morphology and identifier scoring
//! - `engine`: file discovery, the scan worker pool, and aggregation
//! - `config`: YAML scan configuration and validation
//! - `report`: output formatting (text, JSON)
//!
//! # Adding a New Language
//!
//! See `src/analysis/languages/` for examples. Implement `LanguageAdapter`
//! and register the adapter in `languages/mod.rs`.

pub mod analysis;
pub mod cli;
pub mod config;
pub mod detect;
pub mod engine;
pub mod naming;
pub mod report;

pub use analysis::{
    register_adapters, AnalysisContext, AnalysisInfo, CacheStats, Language, SourceInfo,
};
pub use config::{ConfigError, ScanConfig, Thresholds};
pub use detect::{Detector, DetectorRegistry, Severity, Violation, ViolationKind};
pub use engine::{ScanEngine, ScanOutcome, ScanResult, ScanSummary};
pub use naming::{MorphologyEngine, TermAnalyzer};
