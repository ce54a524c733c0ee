//! Parsing entry points backed by tree-sitter-go.

use crate::ast::{Decl, Expr, File, Pos, Spec};
use crate::builder::{build_file, first_word, node_pos};
use crate::error::{ParseError, ParseResult};
use tree_sitter::{Node, Parser, Tree};

const BYTE_ORDER_MARK: char = '\u{feff}';

/// Wraps a standalone expression into a file; everything is on line 1.
const EXPR_PREFIX: &str = "package p; var _ = ";

/// Parse a complete Go source file.
pub fn parse_file(source: &str) -> ParseResult<File> {
    let source = source.strip_prefix(BYTE_ORDER_MARK).unwrap_or(source);
    let tree = syntax_tree(source)?;
    let root = tree.root_node();
    check_syntax(root, source)?;
    build_file(root, source)
}

/// Parse a standalone expression, e.g. for tests or directive tooling.
pub fn parse_expr(source: &str) -> ParseResult<Expr> {
    let wrapped = format!("{EXPR_PREFIX}{source}\n");
    let file = parse_file(&wrapped).map_err(unwrap_position)?;

    let mut decls = file.decls.into_iter();
    if let (Some(Decl::Gen(decl)), None) = (decls.next(), decls.next()) {
        if let [Spec::Value(spec)] = decl.specs.as_slice() {
            if let [value] = spec.values.as_slice() {
                return Ok(value.clone());
            }
        }
    }
    Err(ParseError::new(Pos::new(1, 1), "expected a single expression"))
}

/// Map an error position in the wrapped source back to the expression.
fn unwrap_position(err: ParseError) -> ParseError {
    let mut pos = err.pos;
    if pos.line == 1 {
        pos.column = pos.column.saturating_sub(EXPR_PREFIX.len() as u32).max(1);
    }
    ParseError::new(pos, err.message)
}

fn syntax_tree(source: &str) -> ParseResult<Tree> {
    let mut parser = Parser::new();
    parser
        .set_language(&tree_sitter_go::LANGUAGE.into())
        .map_err(|e| ParseError::new(Pos::new(1, 1), format!("failed to load Go grammar: {e}")))?;
    parser
        .parse(source, None)
        .ok_or_else(|| ParseError::new(Pos::new(1, 1), "parser returned no syntax tree"))
}

/// Report the first `ERROR` or missing node of the tree, if any.
fn check_syntax(root: Node<'_>, source: &str) -> ParseResult<()> {
    let Some(node) = first_error(root) else {
        return Ok(());
    };

    let message = if node.is_missing() {
        if node.is_named() {
            format!("expected {}", node.kind().replace('_', " "))
        } else {
            format!("expected '{}'", node.kind())
        }
    } else {
        match first_word(&node, source) {
            "" => "syntax error".to_string(),
            word => format!("unexpected '{word}'"),
        }
    };
    Err(ParseError::new(node_pos(&node), message))
}

fn first_error(node: Node<'_>) -> Option<Node<'_>> {
    if node.is_error() || node.is_missing() {
        return Some(node);
    }
    if !node.has_error() {
        return None;
    }
    let mut cursor = node.walk();
    let children: Vec<Node<'_>> = node.children(&mut cursor).collect();
    children.into_iter().find_map(first_error)
}
