//! `a(), b(), c();` → `a(); b(); c();`

use untangle_ast::{Expr, Program, Stmt};

use crate::context::RunContext;
use crate::error::RuleResult;
use crate::rewrite::{PatternApplicator, RewriteResult, StmtPattern};
use crate::rule::Rule;

pub struct SequenceFlatten;

impl Rule for SequenceFlatten {
    fn name(&self) -> &'static str {
        "expressions/sequence-flatten"
    }

    fn phase(&self) -> i32 {
        5
    }

    fn description(&self) -> &'static str {
        "Split comma-sequence expression statements into one statement per element"
    }

    fn run(&self, program: &mut Program, ctx: &mut RunContext) -> RuleResult<usize> {
        Ok(PatternApplicator::new()
            .add_stmt_pattern(FlattenSequencePattern)
            .apply(program, ctx))
    }
}

struct FlattenSequencePattern;

impl StmtPattern for FlattenSequencePattern {
    fn rewrite_stmt(&self, stmt: &mut Stmt, _ctx: &mut RunContext) -> RewriteResult<Stmt> {
        let Stmt::Expr(expr) = stmt else {
            return RewriteResult::Unchanged;
        };
        if !matches!(expr.peel_parens(), Expr::Seq(items) if items.len() > 1) {
            return RewriteResult::Unchanged;
        }
        let Expr::Seq(items) = expr.take().unparen() else {
            return RewriteResult::Unchanged;
        };
        RewriteResult::Expand(items.into_iter().map(Stmt::Expr).collect())
    }
}

#[cfg(test)]
mod tests {
    use crate::rules::test_support::{apply_rule, assert_idempotent};

    use super::SequenceFlatten;

    #[test]
    fn test_splits_in_order() {
        assert_eq!(
            apply_rule(&SequenceFlatten, "a(), b = 1, c;"),
            "a();\nb = 1;\nc;\n"
        );
        assert_eq!(apply_rule(&SequenceFlatten, "(a(), b());"), "a();\nb();\n");
    }

    #[test]
    fn test_single_statement_slot_gets_a_block() {
        insta::assert_snapshot!(apply_rule(&SequenceFlatten, "if (x) a(), b();"), @r"
        if (x) {
          a();
          b();
        }
        ");
    }

    #[test]
    fn test_idempotent() {
        assert_idempotent(&SequenceFlatten, "a(), b(); while (x) c(), d();");
    }
}
