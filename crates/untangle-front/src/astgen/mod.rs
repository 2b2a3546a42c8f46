//! CST to AST lowering.
//!
//! Converts a tree-sitter JavaScript CST into the closed [`untangle_ast`]
//! tree. Comments are dropped. Node kinds the tree has no variant for are
//! kept as `Raw` source text, so lowering never fails on a CST without
//! syntax errors.

mod context;
mod expressions;
mod helpers;
mod literals;
mod patterns;
mod statements;

use tree_sitter::Node;
use untangle_ast::Program;

pub use context::LoweringCtx;
pub use expressions::lower_expr;
pub use helpers::is_comment;
pub use patterns::lower_pattern;
pub use statements::{lower_stmt, lower_stmt_list};

/// Lower the `program` root node.
pub fn lower_program(ctx: &LoweringCtx, root: Node) -> Program {
    let hashbang = helpers::named_children(root)
        .into_iter()
        .find(|child| child.kind() == "hash_bang_line")
        .map(|line| ctx.node_text(&line).trim_end().to_owned());
    Program {
        hashbang,
        body: lower_stmt_list(ctx, root),
    }
}
