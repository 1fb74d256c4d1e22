//! Go language adapter using tree-sitter.
//!
//! Extracts:
//! - Function and method declarations with parameters and results
//! - Type and constant declarations
//! - Imports and comments
//! - Control flow counts and a normalized body tree per function

use std::path::Path;

use streaming_iterator::StreamingIterator;
use tree_sitter::{Language as TsLanguage, Node, Parser, Query, QueryCursor};

use crate::analysis::{
    BodyNode, CommentInfo, ConstInfo, ControlFlowInfo, FunctionInfo, ImportInfo, Language,
    LanguageAdapter, NestKind, ParsedFile, SourceInfo, Span, TypeInfo, TypeKind,
};

/// Tree-sitter query for declarations.
const DECLARATION_QUERY: &str = r#"
(function_declaration
  name: (identifier) @func_name
) @function

(method_declaration
  name: (field_identifier) @func_name
) @function

(type_declaration
  (type_spec
    name: (type_identifier) @type_name
    type: (struct_type)
  )
) @struct

(type_declaration
  (type_spec
    name: (type_identifier) @type_name
    type: (interface_type)
  )
) @interface

(type_declaration
  (type_spec
    name: (type_identifier) @type_name
    type: (_) @other_type
  )
) @type_alias

(const_declaration
  (const_spec
    name: (identifier) @const_name
  )
) @const
"#;

/// Tree-sitter query for imports.
const IMPORT_QUERY: &str = r#"
(import_spec
  path: (interpreted_string_literal) @path
) @import
"#;

/// Tree-sitter query for control flow nodes.
const CONTROL_FLOW_QUERY: &str = r#"
(if_statement) @if
(for_statement) @loop
(expression_case) @case
(type_case) @case
(communication_case) @case
(select_statement) @select
(binary_expression operator: "&&") @and
(binary_expression operator: "||") @or
"#;

const COMMENT_QUERY: &str = "(comment) @comment";

/// Go adapter.
pub struct GoAdapter {
    language: TsLanguage,
}

impl GoAdapter {
    pub fn new() -> Self {
        Self {
            language: tree_sitter_go::LANGUAGE.into(),
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

        let mut seen = std::collections::HashSet::new();

        while let Some(m) = matches.next() {
            let mut name = String::new();
            let mut decl_node = None;
            let mut type_kind = None;
            let mut is_function = false;
            let mut is_const = false;

            for capture in m.captures {
                let capture_name = query.capture_names()[capture.index as usize];
                match capture_name {
                    "func_name" => name = parsed.node_text(capture.node).to_string(),
                    "type_name" => name = parsed.node_text(capture.node).to_string(),
                    "const_name" => name = parsed.node_text(capture.node).to_string(),
                    "function" => {
                        decl_node = Some(capture.node);
                        is_function = true;
                    }
                    "struct" => {
                        decl_node = Some(capture.node);
                        type_kind = Some(TypeKind::Struct);
                    }
                    "interface" => {
                        decl_node = Some(capture.node);
                        type_kind = Some(TypeKind::Interface);
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
            if name.is_empty() || !seen.insert((node.start_byte(), name.clone())) {
                continue;
            }
            let exported = is_exported_name(&name);

            if is_function {
                info.functions.push(FunctionInfo {
                    name,
                    span: Span::from_node(node),
                    parameters: extract_parameters(parsed, node),
                    result_count: count_results(node),
                    exported,
                    has_doc: has_leading_doc(node),
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

    /// Count control flow inside one function declaration.
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
                    "select" => cf.select_count += 1,
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
                    let raw = parsed.node_text(capture.node);
                    info.imports.push(ImportInfo {
                        path: raw.trim_matches('"').to_string(),
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

impl Default for GoAdapter {
    fn default() -> Self {
        Self::new()
    }
}

impl LanguageAdapter for GoAdapter {
    fn language(&self) -> Language {
        Language::Go
    }

    fn file_extensions(&self) -> &'static [&'static str] {
        &["go"]
    }

    fn parse(&self, path: &Path, source: &[u8]) -> anyhow::Result<ParsedFile> {
        let mut parser = self.create_parser()?;
        let tree = parser
            .parse(source, None)
            .ok_or_else(|| anyhow::anyhow!("failed to parse Go source: {}", path.display()))?;

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

        // Deterministic ordering regardless of query match order.
        info.functions.sort_by_key(|f| f.span.start_byte);
        info.types.sort_by_key(|t| t.span.start_byte);
        info.imports.sort_by_key(|i| i.span.start_byte);
        info.constants.sort_by_key(|c| c.span.start_byte);
        info.comments.sort_by_key(|c| c.span.start_byte);

        Ok(info)
    }
}

/// Go exports anything whose name starts with an uppercase letter.
fn is_exported_name(name: &str) -> bool {
    name.chars().next().is_some_and(|c| c.is_uppercase())
}

/// Whether a comment ends on the line directly above the declaration.
fn has_leading_doc(decl: Node) -> bool {
    let Some(prev) = decl.prev_sibling() else {
        return false;
    };
    prev.kind() == "comment" && prev.end_position().row + 1 == decl.start_position().row
}

/// Parameter names in order; unnamed parameters count as "_".
fn extract_parameters(parsed: &ParsedFile, func_node: Node) -> Vec<String> {
    let mut params = Vec::new();
    let Some(list) = func_node.child_by_field_name("parameters") else {
        return params;
    };

    let mut cursor = list.walk();
    for child in list.children(&mut cursor) {
        if !matches!(
            child.kind(),
            "parameter_declaration" | "variadic_parameter_declaration"
        ) {
            continue;
        }
        let mut name_cursor = child.walk();
        let names: Vec<_> = child
            .children_by_field_name("name", &mut name_cursor)
            .map(|n| parsed.node_text(n).to_string())
            .collect();
        if names.is_empty() {
            params.push("_".to_string());
        } else {
            params.extend(names);
        }
    }
    params
}

/// Number of declared results.
fn count_results(func_node: Node) -> usize {
    let Some(result) = func_node.child_by_field_name("result") else {
        return 0;
    };
    if result.kind() != "parameter_list" {
        return 1;
    }
    let mut cursor = result.walk();
    result
        .children(&mut cursor)
        .filter(|c| c.kind() == "parameter_declaration")
        .map(|c| {
            let mut name_cursor = c.walk();
            c.children_by_field_name("name", &mut name_cursor)
                .count()
                .max(1)
        })
        .sum()
}

/// Build the normalized nesting tree for a function body block.
fn build_body_tree(body: Node) -> BodyNode {
    BodyNode::block(collect_nested(body))
}

/// Collect nesting-relevant children, descending transparently through
/// everything else.
fn collect_nested(node: Node) -> Vec<BodyNode> {
    let mut out = Vec::new();
    let mut cursor = node.walk();
    for child in node.children(&mut cursor) {
        match child.kind() {
            "if_statement" => out.push(build_if_chain(child)),
            "for_statement" => out.push(BodyNode {
                kind: NestKind::Loop,
                children: collect_nested(child),
            }),
            "expression_switch_statement" | "type_switch_statement" => out.push(BodyNode {
                kind: NestKind::Switch,
                children: collect_nested(child),
            }),
            "select_statement" => out.push(BodyNode {
                kind: NestKind::Select,
                children: collect_nested(child),
            }),
            _ => out.extend(collect_nested(child)),
        }
    }
    out
}

/// Fold an if/else-if/else chain into a single `If` node so every branch
/// body sits at the same depth as the first condition.
fn build_if_chain(if_node: Node) -> BodyNode {
    let mut children = Vec::new();
    let mut current = if_node;

    loop {
        if let Some(consequence) = current.child_by_field_name("consequence") {
            children.extend(collect_nested(consequence));
        }
        match current.child_by_field_name("alternative") {
            Some(alt) if alt.kind() == "if_statement" => current = alt,
            Some(alt) => {
                children.extend(collect_nested(alt));
                break;
            }
            None => break,
        }
    }

    BodyNode {
        kind: NestKind::If,
        children,
    }
}
