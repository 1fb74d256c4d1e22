//! Core trait for language adapters.

use std::path::Path;

use super::{Language, SourceInfo};

/// Holds a parsed tree-sitter tree and the source it came from.
///
/// Kept separate from the extracted facts so an adapter can run several
/// extraction passes without re-parsing.
pub struct ParsedFile {
    /// The tree-sitter parse tree.
    pub tree: tree_sitter::Tree,
    /// The original source bytes (kept for node text extraction).
    pub source: Vec<u8>,
    /// File path, for error reporting.
    pub path: String,
}

impl ParsedFile {
    /// Get text for a tree-sitter node.
    pub fn node_text(&self, node: tree_sitter::Node) -> &str {
        node.utf8_text(&self.source).unwrap_or("")
    }
}

/// Per-language syntax extraction.
///
/// # Thread Safety
///
/// `tree_sitter::Parser` is not `Sync`, so implementations create a parser
/// per call instead of holding one.
pub trait LanguageAdapter: Send + Sync {
    /// The language this adapter extracts.
    fn language(&self) -> Language;

    /// File extensions this adapter handles (without dot).
    fn file_extensions(&self) -> &'static [&'static str];

    /// Parse a source file into a tree-sitter tree.
    ///
    /// Returns an error only when parsing fails completely; partial parse
    /// errors still yield a tree with ERROR nodes.
    fn parse(&self, path: &Path, source: &[u8]) -> anyhow::Result<ParsedFile>;

    /// Extract normalized facts from a parsed file: functions with control
    /// flow and body trees, type declarations, imports, and comments.
    fn extract(&self, parsed: &ParsedFile) -> anyhow::Result<SourceInfo>;
}
