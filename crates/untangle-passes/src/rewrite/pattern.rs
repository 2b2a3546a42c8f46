//! Rewrite pattern traits.

use untangle_ast::{Expr, Stmt};

use super::result::RewriteResult;
use crate::context::RunContext;

/// A pattern that matches and transforms one statement.
///
/// The statement is handed over mutably so a matching pattern can move its
/// children out instead of cloning them. A pattern that returns
/// [`RewriteResult::Unchanged`] must not have touched it, so the shape check
/// always comes before the first `take`.
pub trait StmtPattern {
    fn rewrite_stmt(&self, stmt: &mut Stmt, ctx: &mut RunContext) -> RewriteResult<Stmt>;
}

/// A pattern that matches and transforms one expression.
///
/// `None` means no match and, like [`StmtPattern`], an untouched node.
pub trait ExprPattern {
    fn rewrite_expr(&self, expr: &mut Expr, ctx: &mut RunContext) -> Option<Expr>;
}
