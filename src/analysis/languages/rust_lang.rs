//! Rust language adapter using tree-sitter.
//!
//! `pub` visibility marks exports, `///` line comments count as docs, and
//! `match` maps onto the switch nesting kind.

use std::path::Path;

use streaming_iterator::StreamingIterator;
use tree_sitter::{Language as TsLanguage, Node, Parser, Query, QueryCursor};

use crate::analysis::{
    BodyNode, CommentInfo, ConstInfo, ControlFlowInfo, FunctionInfo, ImportInfo, Language,
    LanguageAdapter, NestKind, ParsedFile, SourceInfo, Span, TypeInfo, TypeKind,
};

const DECLARATION_QUERY: &str = r#"
(function_item
  name: (identifier) @func_name
) @function

(struct_item
  name: (type_identifier) @type_name
) @struct

(enum_item
  name: (type_identifier) @type_name
) @enum

(trait_item
  name: (type_identifier) @type_name
) @trait

(type_item
  name: (type_identifier) @type_name
) @type_alias

(const_item
  name: (identifier) @const_name
) @const

(static_item
  name: (identifier) @const_name
) @const
"#;

const IMPORT_QUERY: &str = r#"
(use_declaration
  argument: (_) @path
) @import
"#;

const CONTROL_FLOW_QUERY: &str = r#"
(if_expression) @if
(for_expression) @loop
(while_expression) @loop
(loop_expression) @loop
(match_arm) @case
(binary_expression operator: "&&") @and
(binary_expression operator: "||") @or
"#;

const COMMENT_QUERY: &str = r#"
(line_comment) @comment
(block_comment) @comment
"#;

/// Rust adapter.
pub struct RustAdapter {
    language: TsLanguage,
}

impl RustAdapter {
    pub fn new() -> Self {
        Self {
            language: tree_sitter_rust::LANGUAGE.into(),
        }
    }

    fn create_parser(&self) -> anyhow::Result<Parser> {
        let mut parser = Parser::new();
        parser.set_language(&self.language)?;
        Ok(parser)
    }

    fn extract_declarations(
        &self,
        parsed: &ParsedFile,
        info: &mut SourceInfo,
    ) -> anyhow::Result<()> {
        let query = Query::new(&self.language, DECLARATION_QUERY)?;
        let mut cursor = QueryCursor::new();
        let mut matches = cursor.matches(&query, parsed.tree.root_node(), &parsed.source[..]);

        while let Some(m) = matches.next() {
            let mut name = String::new();
            let mut decl_node = None;
            let mut type_kind = None;
            let mut is_function = false;
            let mut is_const = false;

            for capture in m.captures {
                match query.capture_names()[capture.index as usize] {
                    "func_name" | "type_name" | "const_name" => {
                        name = parsed.node_text(capture.node).to_string();
                    }
                    "function" => {
                        decl_node = Some(capture.node);
                        is_function = true;
                    }
                    "struct" => {
                        decl_node = Some(capture.node);
                        type_kind = Some(TypeKind::Struct);
                    }
                    "enum" => {
                        decl_node = Some(capture.node);
                        type_kind = Some(TypeKind::Enum);
                    }
                    "trait" => {
                        decl_node = Some(capture.node);
                        type_kind = Some(TypeKind::Trait);
                    }
                    "type_alias" => {
                        decl_node = Some(capture.node);
                        type_kind = Some(TypeKind::Alias);
                    }
                    "const" => {
                        decl_node = Some(capture.node);
                        is_const = true;
                    }
                    _ => {}
                }
            }

            let Some(node) = decl_node else { continue };
            if name.is_empty() {
                continue;
            }
            let exported = is_public(node);

            if is_function {
                info.functions.push(FunctionInfo {
                    name,
                    span: Span::from_node(node),
                    parameters: extract_parameters(parsed, node),
                    result_count: usize::from(node.child_by_field_name("return_type").is_some()),
                    exported,
                    has_doc: has_doc_comment(parsed, node),
                    control_flow: self.extract_control_flow(parsed, node)?,
                    body: node.child_by_field_name("body").map(build_body_tree),
                });
            } else if is_const {
                info.constants.push(ConstInfo {
                    name,
                    span: Span::from_node(node),
                    exported,
                });
            } else if let Some(kind) = type_kind {
                info.types.push(TypeInfo {
                    name,
                    kind,
                    span: Span::from_node(node),
                    exported,
                });
            }
        }

        Ok(())
    }

    fn extract_control_flow(
        &self,
        parsed: &ParsedFile,
        func_node: Node,
    ) -> anyhow::Result<ControlFlowInfo> {
        let Some(body) = func_node.child_by_field_name("body") else {
            return Ok(ControlFlowInfo::default());
        };

        let query = Query::new(&self.language, CONTROL_FLOW_QUERY)?;
        let mut cursor = QueryCursor::new();
        let mut matches = cursor.matches(&query, body, &parsed.source[..]);

        let mut cf = ControlFlowInfo::default();
        while let Some(m) = matches.next() {
            for capture in m.captures {
                match query.capture_names()[capture.index as usize] {
                    "if" => cf.if_count += 1,
                    "loop" => cf.loop_count += 1,
                    "case" => cf.case_count += 1,
                    "and" => cf.and_count += 1,
                    "or" => cf.or_count += 1,
                    _ => {}
                }
            }
        }
        Ok(cf)
    }

    fn extract_imports(&self, parsed: &ParsedFile, info: &mut SourceInfo) -> anyhow::Result<()> {
        let query = Query::new(&self.language, IMPORT_QUERY)?;
        let mut cursor = QueryCursor::new();
        let mut matches = cursor.matches(&query, parsed.tree.root_node(), &parsed.source[..]);

        while let Some(m) = matches.next() {
            for capture in m.captures {
                if query.capture_names()[capture.index as usize] == "path" {
                    info.imports.push(ImportInfo {
                        path: parsed.node_text(capture.node).to_string(),
                        span: Span::from_node(capture.node),
                    });
                }
            }
        }
        Ok(())
    }

    fn extract_comments(&self, parsed: &ParsedFile, info: &mut SourceInfo) -> anyhow::Result<()> {
        let query = Query::new(&self.language, COMMENT_QUERY)?;
        let mut cursor = QueryCursor::new();
        let mut matches = cursor.matches(&query, parsed.tree.root_node(), &parsed.source[..]);

        while let Some(m) = matches.next() {
            for capture in m.captures {
                info.comments.push(CommentInfo {
                    text: parsed.node_text(capture.node).to_string(),
                    span: Span::from_node(capture.node),
                });
            }
        }
        Ok(())
    }
}

impl Default for RustAdapter {
    fn default() -> Self {
        Self::new()
    }
}

impl LanguageAdapter for RustAdapter {
    fn language(&self) -> Language {
        Language::Rust
    }

    fn file_extensions(&self) -> &'static [&'static str] {
        &["rs"]
    }

    fn parse(&self, path: &Path, source: &[u8]) -> anyhow::Result<ParsedFile> {
        let mut parser = self.create_parser()?;
        let tree = parser
            .parse(source, None)
            .ok_or_else(|| anyhow::anyhow!("failed to parse Rust source: {}", path.display()))?;

        Ok(ParsedFile {
            tree,
            source: source.to_vec(),
            path: path.to_string_lossy().to_string(),
        })
    }

    fn extract(&self, parsed: &ParsedFile) -> anyhow::Result<SourceInfo> {
        if parsed.tree.root_node().has_error() {
            anyhow::bail!("syntax errors in {}", parsed.path);
        }

        let mut info = SourceInfo::default();
        self.extract_declarations(parsed, &mut info)?;
        self.extract_imports(parsed, &mut info)?;
        self.extract_comments(parsed, &mut info)?;

        info.functions.sort_by_key(|f| f.span.start_byte);
        info.types.sort_by_key(|t| t.span.start_byte);
        info.imports.sort_by_key(|i| i.span.start_byte);
        info.constants.sort_by_key(|c| c.span.start_byte);
        info.comments.sort_by_key(|c| c.span.start_byte);

        Ok(info)
    }
}

/// Whether the declaration carries a `pub` visibility modifier.
fn is_public(decl: Node) -> bool {
    let mut cursor = decl.walk();
    let has_vis = decl
        .children(&mut cursor)
        .any(|c| c.kind() == "visibility_modifier");
    has_vis
}

/// Whether a `///` doc comment (or doc attribute) directly precedes the item.
fn has_doc_comment(parsed: &ParsedFile, decl: Node) -> bool {
    let mut node = decl;
    while let Some(prev) = node.prev_sibling() {
        match prev.kind() {
            "line_comment" | "block_comment" => {
                let text = parsed.node_text(prev);
                let adjacent = prev.end_position().row + 1 == node.start_position().row;
                return adjacent && (text.starts_with("///") || text.starts_with("/**"));
            }
            "attribute_item" => {
                node = prev;
                continue;
            }
            _ => return false,
        }
    }
    false
}

/// Parameter names in order, skipping the self receiver.
fn extract_parameters(parsed: &ParsedFile, func_node: Node) -> Vec<String> {
    let mut params = Vec::new();
    let Some(list) = func_node.child_by_field_name("parameters") else {
        return params;
    };

    let mut cursor = list.walk();
    for child in list.children(&mut cursor) {
        match child.kind() {
            "parameter" => {
                let name = child
                    .child_by_field_name("pattern")
                    .map(|n| parsed.node_text(n).to_string())
                    .unwrap_or_default();
                if !name.is_empty() {
                    params.push(name);
                }
            }
            "self_parameter" => {}
            _ => {}
        }
    }
    params
}

fn build_body_tree(body: Node) -> BodyNode {
    BodyNode::block(collect_nested(body))
}

fn collect_nested(node: Node) -> Vec<BodyNode> {
    let mut out = Vec::new();
    let mut cursor = node.walk();
    for child in node.children(&mut cursor) {
        match child.kind() {
            "if_expression" => out.push(build_if_chain(child)),
            "for_expression" | "while_expression" | "loop_expression" => out.push(BodyNode {
                kind: NestKind::Loop,
                children: collect_nested(child),
            }),
            "match_expression" => out.push(BodyNode {
                kind: NestKind::Switch,
                children: collect_nested(child),
            }),
            _ => out.extend(collect_nested(child)),
        }
    }
    out
}

/// Fold if/else-if/else into one `If` node; every branch body sits at the
/// depth of the first condition.
fn build_if_chain(if_node: Node) -> BodyNode {
    let mut children = Vec::new();
    let mut current = if_node;

    loop {
        if let Some(consequence) = current.child_by_field_name("consequence") {
            children.extend(collect_nested(consequence));
        }
        let Some(else_clause) = current.child_by_field_name("alternative") else {
            break;
        };
        // else_clause wraps either a block or a chained if_expression.
        let mut next_if = None;
        let mut cursor = else_clause.walk();
        for child in else_clause.children(&mut cursor) {
            match child.kind() {
                "if_expression" => next_if = Some(child),
                "block" => children.extend(collect_nested(child)),
                _ => {}
            }
        }
        match next_if {
            Some(chained) => current = chained,
            None => break,
        }
    }

    BodyNode {
        kind: NestKind::If,
        children,
    }
}
