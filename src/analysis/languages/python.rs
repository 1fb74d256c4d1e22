//! Python language adapter using tree-sitter.
//!
//! Python has no visibility keywords; a leading underscore marks a
//! definition as private by convention, and a docstring as the first body
//! statement counts as documentation.

use std::path::Path;

use streaming_iterator::StreamingIterator;
use tree_sitter::{Language as TsLanguage, Node, Parser, Query, QueryCursor};

use crate::analysis::{
    BodyNode, CommentInfo, ControlFlowInfo, FunctionInfo, ImportInfo, Language, LanguageAdapter,
    NestKind, ParsedFile, SourceInfo, Span, TypeInfo, TypeKind,
};

const DECLARATION_QUERY: &str = r#"
(function_definition
  name: (identifier) @func_name
) @function

(class_definition
  name: (identifier) @class_name
) @class
"#;

const IMPORT_QUERY: &str = r#"
(import_statement
  name: (dotted_name) @path
)

(import_from_statement
  module_name: (dotted_name) @path
)
"#;

const CONTROL_FLOW_QUERY: &str = r#"
(if_statement) @if
(elif_clause) @if
(for_statement) @loop
(while_statement) @loop
(case_clause) @case
(conditional_expression) @ternary
(except_clause) @catch
(boolean_operator operator: "and") @and
(boolean_operator operator: "or") @or
"#;

const COMMENT_QUERY: &str = "(comment) @comment";

/// Python adapter.
pub struct PythonAdapter {
    language: TsLanguage,
}

impl PythonAdapter {
    pub fn new() -> Self {
        Self {
            language: tree_sitter_python::LANGUAGE.into(),
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
            let mut func_node = None;
            let mut class_node = None;

            for capture in m.captures {
                match query.capture_names()[capture.index as usize] {
                    "func_name" | "class_name" => {
                        name = parsed.node_text(capture.node).to_string();
                    }
                    "function" => func_node = Some(capture.node),
                    "class" => class_node = Some(capture.node),
                    _ => {}
                }
            }
            if name.is_empty() {
                continue;
            }
            let exported = !name.starts_with('_');

            if let Some(node) = func_node {
                info.functions.push(FunctionInfo {
                    name,
                    span: Span::from_node(node),
                    parameters: extract_parameters(parsed, node),
                    result_count: usize::from(node.child_by_field_name("return_type").is_some()),
                    exported,
                    has_doc: has_docstring(node),
                    control_flow: self.extract_control_flow(parsed, node)?,
                    body: node.child_by_field_name("body").map(build_body_tree),
                });
            } else if let Some(node) = class_node {
                info.types.push(TypeInfo {
                    name,
                    kind: TypeKind::Class,
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
                    "ternary" => cf.ternary_count += 1,
                    "catch" => cf.catch_count += 1,
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

        let mut seen = std::collections::HashSet::new();
        while let Some(m) = matches.next() {
            for capture in m.captures {
                if query.capture_names()[capture.index as usize] != "path" {
                    continue;
                }
                let path = parsed.node_text(capture.node).to_string();
                if seen.insert((capture.node.start_byte(), path.clone())) {
                    info.imports.push(ImportInfo {
                        path,
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

impl Default for PythonAdapter {
    fn default() -> Self {
        Self::new()
    }
}

impl LanguageAdapter for PythonAdapter {
    fn language(&self) -> Language {
        Language::Python
    }

    fn file_extensions(&self) -> &'static [&'static str] {
        &["py"]
    }

    fn parse(&self, path: &Path, source: &[u8]) -> anyhow::Result<ParsedFile> {
        let mut parser = self.create_parser()?;
        let tree = parser
            .parse(source, None)
            .ok_or_else(|| anyhow::anyhow!("failed to parse Python source: {}", path.display()))?;

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
        info.comments.sort_by_key(|c| c.span.start_byte);

        Ok(info)
    }
}

/// Parameter names, skipping the conventional self/cls receiver.
fn extract_parameters(parsed: &ParsedFile, func_node: Node) -> Vec<String> {
    let mut params = Vec::new();
    let Some(list) = func_node.child_by_field_name("parameters") else {
        return params;
    };

    let mut cursor = list.walk();
    for (index, child) in list.children(&mut cursor).enumerate() {
        let name = match child.kind() {
            "identifier" => parsed.node_text(child).to_string(),
            "typed_parameter" | "default_parameter" | "typed_default_parameter" => child
                .child_by_field_name("name")
                .or_else(|| child.named_child(0))
                .map(|n| parsed.node_text(n).to_string())
                .unwrap_or_default(),
            "list_splat_pattern" | "dictionary_splat_pattern" => child
                .named_child(0)
                .map(|n| parsed.node_text(n).to_string())
                .unwrap_or_default(),
            _ => continue,
        };
        if name.is_empty() {
            continue;
        }
        // First parameter named self/cls is a receiver, not an argument.
        if index == 1 && (name == "self" || name == "cls") {
            continue;
        }
        params.push(name);
    }
    params
}

/// Whether the first body statement is a string expression (docstring).
fn has_docstring(func_node: Node) -> bool {
    let Some(body) = func_node.child_by_field_name("body") else {
        return false;
    };
    let Some(first) = body.named_child(0) else {
        return false;
    };
    first.kind() == "expression_statement"
        && first.named_child(0).is_some_and(|n| n.kind() == "string")
}

fn build_body_tree(body: Node) -> BodyNode {
    BodyNode::block(collect_nested(body))
}

fn collect_nested(node: Node) -> Vec<BodyNode> {
    let mut out = Vec::new();
    let mut cursor = node.walk();
    for child in node.children(&mut cursor) {
        match child.kind() {
            // elif/else clauses are children of the if_statement, so the
            // whole chain naturally folds into one If node.
            "if_statement" => out.push(BodyNode {
                kind: NestKind::If,
                children: collect_branch_bodies(child),
            }),
            "for_statement" | "while_statement" => out.push(BodyNode {
                kind: NestKind::Loop,
                children: collect_nested(child),
            }),
            "match_statement" => out.push(BodyNode {
                kind: NestKind::Switch,
                children: collect_nested(child),
            }),
            _ => out.extend(collect_nested(child)),
        }
    }
    out
}

/// Children of an if statement's branches: consequence plus every elif and
/// else body, all at the same level.
fn collect_branch_bodies(if_node: Node) -> Vec<BodyNode> {
    let mut out = Vec::new();
    let mut cursor = if_node.walk();
    for child in if_node.children(&mut cursor) {
        match child.kind() {
            "block" => out.extend(collect_nested(child)),
            "elif_clause" | "else_clause" => {
                if let Some(body) = child.child_by_field_name("body") {
                    out.extend(collect_nested(body));
                } else {
                    out.extend(collect_nested(child));
                }
            }
            _ => {}
        }
    }
    out
}
