//! `if (false)` branches and empty sequence statements.

use untangle_ast::{Expr, Lit, Program, Stmt};

use crate::context::RunContext;
use crate::error::RuleResult;
use crate::rewrite::{PatternApplicator, RewriteResult, StmtPattern};
use crate::rule::Rule;
use crate::rules::inline_branch;

pub struct DeadCode;

impl Rule for DeadCode {
    fn name(&self) -> &'static str {
        "optimization/dead-code"
    }

    fn phase(&self) -> i32 {
        60
    }

    fn description(&self) -> &'static str {
        "Remove if (false) statements and empty expression statements"
    }

    fn run(&self, program: &mut Program, ctx: &mut RunContext) -> RuleResult<usize> {
        Ok(PatternApplicator::new()
            .add_stmt_pattern(DeadStmtPattern)
            .apply(program, ctx))
    }
}

struct DeadStmtPattern;

impl StmtPattern for DeadStmtPattern {
    fn rewrite_stmt(&self, stmt: &mut Stmt, _ctx: &mut RunContext) -> RewriteResult<Stmt> {
        match stmt {
            Stmt::If(if_stmt) if matches!(if_stmt.test.as_lit(), Some(Lit::Bool(false))) => {
                match if_stmt.alt.take() {
                    Some(alt) => inline_branch(*alt),
                    None => RewriteResult::Erase,
                }
            }
            Stmt::Expr(Expr::Seq(exprs)) if exprs.is_empty() => RewriteResult::Erase,
            _ => RewriteResult::Unchanged,
        }
    }
}
