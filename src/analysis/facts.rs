//! Normalized syntax facts extracted from source files.

use std::fmt;

/// Supported source languages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    Rust,
    Go,
    Python,
    Unknown,
}

impl Language {
    /// Map a file extension (without dot) to a language.
    pub fn from_extension(ext: &str) -> Self {
        match ext {
            "rs" => Language::Rust,
            "go" => Language::Go,
            "py" => Language::Python,
            _ => Language::Unknown,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Language::Rust => "rust",
            Language::Go => "go",
            Language::Python => "python",
            Language::Unknown => "unknown",
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Source location span with byte offsets and 1-indexed line/column positions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Span {
    pub start_byte: usize,
    pub end_byte: usize,
    pub start_line: usize,
    pub start_col: usize,
    pub end_line: usize,
    pub end_col: usize,
}

impl Span {
    /// Create a span from a tree-sitter node (tree-sitter is 0-indexed).
    pub fn from_node(node: tree_sitter::Node) -> Self {
        let start = node.start_position();
        let end = node.end_position();
        Self {
            start_byte: node.start_byte(),
            end_byte: node.end_byte(),
            start_line: start.row + 1,
            start_col: start.column + 1,
            end_line: end.row + 1,
            end_col: end.column + 1,
        }
    }

    /// Number of source lines the span covers.
    pub fn line_count(&self) -> usize {
        self.end_line.saturating_sub(self.start_line) + 1
    }
}

impl fmt::Display for Span {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.start_line, self.start_col)
    }
}

/// Block kinds that matter for nesting depth.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NestKind {
    /// Plain body block; does not increase depth.
    Block,
    If,
    Loop,
    Switch,
    Select,
}

impl NestKind {
    /// Whether entering this node adds one nesting level.
    pub fn increments_depth(&self) -> bool {
        !matches!(self, NestKind::Block)
    }
}

/// Normalized control-flow tree of a function body.
///
/// Adapters collapse else/elif branches into their owning `If` node so a
/// branch never reads one level deeper than its condition. The tree is the
/// walkable handle the function detector traverses for nesting depth.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BodyNode {
    pub kind: NestKind,
    pub children: Vec<BodyNode>,
}

impl BodyNode {
    pub fn block(children: Vec<BodyNode>) -> Self {
        Self {
            kind: NestKind::Block,
            children,
        }
    }
}

/// Branch counts used for cyclomatic complexity.
///
/// CC = 1 + decision points; decision points are conditionals, loops, case
/// arms, select arms, short-circuit operators, ternaries, and catch clauses.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ControlFlowInfo {
    pub if_count: usize,
    pub loop_count: usize,
    pub case_count: usize,
    pub select_count: usize,
    pub and_count: usize,
    pub or_count: usize,
    pub ternary_count: usize,
    pub catch_count: usize,
}

impl ControlFlowInfo {
    pub fn cyclomatic_complexity(&self) -> u32 {
        let decision_points = self.if_count
            + self.loop_count
            + self.case_count
            + self.select_count
            + self.and_count
            + self.or_count
            + self.ternary_count
            + self.catch_count;
        1 + decision_points as u32
    }
}

/// One extracted function or method.
#[derive(Debug, Clone)]
pub struct FunctionInfo {
    pub name: String,
    pub span: Span,
    /// Parameter names in declaration order (receiver/self excluded).
    pub parameters: Vec<String>,
    /// Number of declared results/return values.
    pub result_count: usize,
    /// Whether the function is exported/public in its language's terms.
    pub exported: bool,
    /// Whether a doc comment immediately precedes the declaration.
    pub has_doc: bool,
    pub control_flow: ControlFlowInfo,
    /// Walkable body tree for nesting-depth analysis; absent for bodyless
    /// declarations (trait methods, interface members).
    pub body: Option<BodyNode>,
}

impl FunctionInfo {
    /// Raw line count of the whole declaration.
    pub fn line_count(&self) -> usize {
        self.span.line_count()
    }
}

/// Kind of extracted type declaration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TypeKind {
    Struct,
    Enum,
    Interface,
    Trait,
    Class,
    Alias,
}

impl TypeKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            TypeKind::Struct => "struct",
            TypeKind::Enum => "enum",
            TypeKind::Interface => "interface",
            TypeKind::Trait => "trait",
            TypeKind::Class => "class",
            TypeKind::Alias => "type alias",
        }
    }
}

/// One extracted type declaration.
#[derive(Debug, Clone)]
pub struct TypeInfo {
    pub name: String,
    pub kind: TypeKind,
    pub span: Span,
    pub exported: bool,
}

/// One import/use declaration.
#[derive(Debug, Clone)]
pub struct ImportInfo {
    pub path: String,
    pub span: Span,
}

/// One constant declaration.
#[derive(Debug, Clone)]
pub struct ConstInfo {
    pub name: String,
    pub span: Span,
    pub exported: bool,
}

/// One source comment.
#[derive(Debug, Clone)]
pub struct CommentInfo {
    pub text: String,
    pub span: Span,
}

/// Everything extracted from a single file by a language adapter.
#[derive(Debug, Clone, Default)]
pub struct SourceInfo {
    pub functions: Vec<FunctionInfo>,
    pub types: Vec<TypeInfo>,
    pub imports: Vec<ImportInfo>,
    pub constants: Vec<ConstInfo>,
    pub comments: Vec<CommentInfo>,
}

/// Language-tagged analysis payload, one variant per supported language.
///
/// Detectors match this exhaustively; a detector that only understands one
/// language simply no-ops on the rest.
#[derive(Debug, Clone)]
pub enum AnalysisInfo {
    Rust(SourceInfo),
    Go(SourceInfo),
    Python(SourceInfo),
    Unsupported,
}

impl AnalysisInfo {
    pub fn language(&self) -> Language {
        match self {
            AnalysisInfo::Rust(_) => Language::Rust,
            AnalysisInfo::Go(_) => Language::Go,
            AnalysisInfo::Python(_) => Language::Python,
            AnalysisInfo::Unsupported => Language::Unknown,
        }
    }

    /// The extracted facts, when the language is supported.
    pub fn source(&self) -> Option<&SourceInfo> {
        match self {
            AnalysisInfo::Rust(info) | AnalysisInfo::Go(info) | AnalysisInfo::Python(info) => {
                Some(info)
            }
            AnalysisInfo::Unsupported => None,
        }
    }
}
