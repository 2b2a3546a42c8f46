//! `lit ? a : b` → the arm the literal selects.

use untangle_ast::{Expr, Program};

use crate::context::RunContext;
use crate::error::RuleResult;
use crate::rewrite::{ExprPattern, PatternApplicator};
use crate::rule::Rule;

pub struct TernaryFold;

impl Rule for TernaryFold {
    fn name(&self) -> &'static str {
        "expressions/ternary-fold"
    }

    fn phase(&self) -> i32 {
        11
    }

    fn description(&self) -> &'static str {
        "Replace conditional expressions with a literal test by the taken arm"
    }

    fn run(&self, program: &mut Program, ctx: &mut RunContext) -> RuleResult<usize> {
        Ok(PatternApplicator::new()
            .add_expr_pattern(FoldTernaryPattern)
            .apply(program, ctx))
    }
}

struct FoldTernaryPattern;

impl ExprPattern for FoldTernaryPattern {
    fn rewrite_expr(&self, expr: &mut Expr, _ctx: &mut RunContext) -> Option<Expr> {
        let Expr::Cond { test, cons, alt } = expr else {
            return None;
        };
        let taken = if test.as_lit()?.truthiness()? {
            cons
        } else {
            alt
        };
        Some(taken.take())
    }
}

#[cfg(test)]
mod tests {
    use crate::rules::test_support::{apply_rule, assert_idempotent};

    use super::TernaryFold;

    #[test]
    fn test_takes_literal_arm() {
        assert_eq!(apply_rule(&TernaryFold, "x = 1 ? a : b;"), "x = a;\n");
        assert_eq!(apply_rule(&TernaryFold, r#"x = "" ? a : b;"#), "x = b;\n");
        assert_eq!(apply_rule(&TernaryFold, "x = (null) ? a : b;"), "x = b;\n");
        assert_eq!(apply_rule(&TernaryFold, "x = c ? a : b;"), "x = c ? a : b;\n");
    }

    #[test]
    fn test_idempotent() {
        assert_idempotent(&TernaryFold, "x = true ? (0 ? a : b) : c;");
    }
}
