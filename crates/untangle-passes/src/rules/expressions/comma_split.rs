//! Splitting comma sequences in `return`, `if` tests and long expression
//! statements.
//!
//! ```text
//! return a = 1, b(), c;   →   a = 1; b(); return c;
//! if ((x = f(), x)) …     →   x = f(); if (x) …
//! ```
//!
//! Only applies when every leading element is side-effecting (assignment,
//! call, update, `new`) or pure (literal, identifier, `this`); pure leading
//! elements are dropped.

use untangle_ast::{Expr, IfStmt, Program, Stmt};

use crate::context::RunContext;
use crate::error::RuleResult;
use crate::rewrite::{PatternApplicator, RewriteResult, StmtPattern};
use crate::rule::Rule;

pub struct CommaSplit;

impl Rule for CommaSplit {
    fn name(&self) -> &'static str {
        "expressions/comma-split"
    }

    fn phase(&self) -> i32 {
        4
    }

    fn description(&self) -> &'static str {
        "Hoist the leading elements of comma sequences in return, if and expression statements"
    }

    fn run(&self, program: &mut Program, ctx: &mut RunContext) -> RuleResult<usize> {
        Ok(PatternApplicator::new()
            .add_stmt_pattern(SplitCommaPattern)
            .apply(program, ctx))
    }
}

struct SplitCommaPattern;

impl StmtPattern for SplitCommaPattern {
    fn rewrite_stmt(&self, stmt: &mut Stmt, _ctx: &mut RunContext) -> RewriteResult<Stmt> {
        match stmt {
            Stmt::Return(Some(arg)) => {
                let Some((mut stmts, last)) = split(arg, 2) else {
                    return RewriteResult::Unchanged;
                };
                stmts.push(Stmt::Return(Some(last)));
                RewriteResult::Expand(stmts)
            }
            Stmt::If(if_stmt) => {
                let Some((mut stmts, last)) = split(&mut if_stmt.test, 1) else {
                    return RewriteResult::Unchanged;
                };
                stmts.push(Stmt::If(IfStmt {
                    test: last,
                    cons: Box::new(if_stmt.cons.take()),
                    alt: if_stmt.alt.take(),
                }));
                RewriteResult::Expand(stmts)
            }
            Stmt::Expr(expr) => {
                let Some((mut stmts, last)) = split(expr, 3) else {
                    return RewriteResult::Unchanged;
                };
                stmts.push(Stmt::Expr(last));
                RewriteResult::Expand(stmts)
            }
            _ => RewriteResult::Unchanged,
        }
    }
}

/// A sequence of more than `min_len` elements whose leading elements can
/// be hoisted.
fn splittable(expr: &Expr, min_len: usize) -> bool {
    let Expr::Seq(items) = expr.peel_parens() else {
        return false;
    };
    let Some((_, leading)) = items.split_last() else {
        return false;
    };
    items.len() > min_len
        && leading
            .iter()
            .all(|item| item.is_side_effecting() || item.is_pure())
}

/// Move the sequence out of `expr`: leading elements as statements (pure
/// ones dropped) plus the last element.
fn split(expr: &mut Expr, min_len: usize) -> Option<(Vec<Stmt>, Expr)> {
    if !splittable(expr, min_len) {
        return None;
    }
    let Expr::Seq(mut items) = expr.take().unparen() else {
        return None;
    };
    let last = items.pop()?;
    let stmts = items
        .into_iter()
        .filter(|item| !item.is_pure())
        .map(Stmt::Expr)
        .collect();
    Some((stmts, last))
}
