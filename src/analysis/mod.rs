//! Per-language syntax extraction.
//!
//! Each supported language implements [`LanguageAdapter`], producing a
//! normalized [`SourceInfo`] (functions with control flow and body trees,
//! types, imports, constants, comments). [`AnalysisContext`] fronts the
//! adapters with a fingerprint-keyed, TTL/LRU-bounded cache so unchanged
//! files are never re-parsed within a run.

pub mod cache;
mod context;
mod facts;
mod languages;
mod traits;

pub use cache::{AstCache, CacheStats, Fingerprint};
pub use context::AnalysisContext;
pub use facts::{
    AnalysisInfo, BodyNode, CommentInfo, ConstInfo, ControlFlowInfo, FunctionInfo, ImportInfo,
    Language, NestKind, SourceInfo, Span, TypeInfo, TypeKind,
};
pub use languages::{
    adapter_for, register_adapters, supported_extensions, GoAdapter, PythonAdapter, RustAdapter,
};
pub use traits::{LanguageAdapter, ParsedFile};
