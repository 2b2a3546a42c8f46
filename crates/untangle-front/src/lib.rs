//! JavaScript front end for the untangle deobfuscator.
//!
//! ## Pipeline
//!
//! 1. tree-sitter parses the source with the JavaScript grammar
//! 2. inputs nested deeper than [`MAX_NESTING_DEPTH`] are rejected
//! 3. the first `ERROR`/`MISSING` node, if any, becomes a [`ParseError`]
//! 4. [`astgen`] lowers the CST into an [`untangle_ast::Program`]
//!
//! Lowering, and everything that later walks the tree, recurses once per
//! nesting level. Callers handling untrusted input should run on a thread
//! whose stack fits [`MAX_NESTING_DEPTH`] levels; `untangle::deobfuscate`
//! does.

pub mod astgen;

use derive_more::{Display, Error};
use tree_sitter::{Node, Parser};
use untangle_ast::Program;

/// Deepest CST nesting accepted by [`parse`].
pub const MAX_NESTING_DEPTH: usize = 16_384;

/// A syntax error in the input. Nothing is transformed when parsing fails.
#[derive(Clone, Debug, Display, Error, PartialEq, Eq)]
#[display("{message} at line {line}, column {column}")]
pub struct ParseError {
    pub message: String,
    /// Byte range of the offending node.
    pub offset: usize,
    pub end: usize,
    /// One-based line number.
    pub line: usize,
    /// One-based column, in bytes.
    pub column: usize,
}

impl ParseError {
    fn at(message: impl Into<String>, node: &Node) -> Self {
        let position = node.start_position();
        Self {
            message: message.into(),
            offset: node.start_byte(),
            end: node.end_byte(),
            line: position.row + 1,
            column: position.column + 1,
        }
    }

    fn internal(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            offset: 0,
            end: 0,
            line: 1,
            column: 1,
        }
    }
}

/// Parse JavaScript source text into a tree.
pub fn parse(source: &str) -> Result<Program, ParseError> {
    let mut parser = Parser::new();
    parser
        .set_language(&tree_sitter_javascript::LANGUAGE.into())
        .map_err(|e| ParseError::internal(format!("failed to load JavaScript grammar: {e}")))?;
    let tree = parser
        .parse(source, None)
        .ok_or_else(|| ParseError::internal("parser produced no tree"))?;

    let root = tree.root_node();
    check_depth(root)?;
    if root.has_error() {
        let error = first_error(root, source)
            .unwrap_or_else(|| ParseError::at("syntax error", &root));
        tracing::debug!(line = error.line, column = error.column, "parse failed");
        return Err(error);
    }

    let ctx = astgen::LoweringCtx::new(source);
    Ok(astgen::lower_program(&ctx, root))
}

/// Reject trees nested deeper than [`MAX_NESTING_DEPTH`], walking with a
/// cursor so the check itself does not recurse.
fn check_depth(root: Node) -> Result<(), ParseError> {
    let mut cursor = root.walk();
    let mut depth = 0;
    loop {
        if depth > MAX_NESTING_DEPTH {
            let node = cursor.node();
            tracing::debug!(depth, "input nested too deeply");
            return Err(ParseError::at("nesting too deep", &node));
        }
        if cursor.goto_first_child() {
            depth += 1;
            continue;
        }
        while !cursor.goto_next_sibling() {
            if !cursor.goto_parent() {
                return Ok(());
            }
            depth -= 1;
        }
    }
}

/// Depth-first search for the first error or missing node.
fn first_error(node: Node, source: &str) -> Option<ParseError> {
    if node.is_missing() {
        return Some(ParseError::at(format!("expected `{}`", node.kind()), &node));
    }
    if node.is_error() {
        let text = source.get(node.byte_range()).unwrap_or("");
        let snippet: String = text.chars().take(20).collect();
        let message = if snippet.trim().is_empty() {
            "unexpected input".to_owned()
        } else {
            format!("unexpected `{}`", snippet.trim())
        };
        return Some(ParseError::at(message, &node));
    }
    if !node.has_error() {
        return None;
    }
    let mut cursor = node.walk();
    let children: Vec<Node> = node.children(&mut cursor).collect();
    children
        .into_iter()
        .find_map(|child| first_error(child, source))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reports_first_syntax_error() {
        let err = parse("var a = 1;\nvar = ;").unwrap_err();
        assert_eq!(err.line, 2);
        assert!(err.offset >= 11);
    }

    #[test]
    fn test_rejects_excessive_nesting() {
        let depth = MAX_NESTING_DEPTH + 10;
        let source = format!("x = {}0{};", "[".repeat(depth), "]".repeat(depth));
        let err = parse(&source).unwrap_err();
        assert_eq!(err.message, "nesting too deep");
        assert_eq!(err.line, 1);
    }

    #[test]
    fn test_hashbang_is_kept() {
        let program = parse("#!/usr/bin/env node\nrun();").unwrap();
        assert_eq!(program.hashbang.as_deref(), Some("#!/usr/bin/env node"));
        assert_eq!(program.body.len(), 1);
    }
}
