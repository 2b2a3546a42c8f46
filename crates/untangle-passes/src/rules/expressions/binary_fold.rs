//! Constant folding of binary expressions on literals.
//!
//! `"a" + "b"` → `"ab"`, `0x10 | 1` → `17`, `"1" == 1` → `true`. Grouping
//! parentheses around an operand are seen through. Results without a
//! literal form (`NaN`, `Infinity`, `-0`) are left unfolded.

use untangle_ast::{Expr, Lit, Program};

use crate::context::RunContext;
use crate::error::RuleResult;
use crate::eval::{Value, eval_binary};
use crate::rewrite::{ExprPattern, PatternApplicator};
use crate::rule::Rule;

pub struct BinaryFold;

impl Rule for BinaryFold {
    fn name(&self) -> &'static str {
        "expressions/binary-fold"
    }

    fn phase(&self) -> i32 {
        10
    }

    fn description(&self) -> &'static str {
        "Fold binary operators applied to two literals"
    }

    fn run(&self, program: &mut Program, ctx: &mut RunContext) -> RuleResult<usize> {
        Ok(PatternApplicator::new()
            .add_expr_pattern(FoldBinaryPattern)
            .apply(program, ctx))
    }
}

struct FoldBinaryPattern;

impl ExprPattern for FoldBinaryPattern {
    fn rewrite_expr(&self, expr: &mut Expr, _ctx: &mut RunContext) -> Option<Expr> {
        let Expr::Binary { op, left, right } = expr else {
            return None;
        };
        let left = Value::from_lit(left.as_lit()?)?;
        let right = Value::from_lit(right.as_lit()?)?;
        let folded: Lit = eval_binary(*op, &left, &right)?.into_lit()?;
        Some(Expr::Lit(folded))
    }
}

#[cfg(test)]
mod tests {
    use crate::rules::test_support::{apply_rule, assert_idempotent};

    use super::BinaryFold;

    #[test]
    fn test_folds_arithmetic_and_strings() {
        assert_eq!(apply_rule(&BinaryFold, "x = 1 + 2 * 3;"), "x = 7;\n");
        assert_eq!(apply_rule(&BinaryFold, r#"x = "a" + "b" + 1;"#), "x = \"ab1\";\n");
        assert_eq!(apply_rule(&BinaryFold, "x = 0x10 | 1;"), "x = 17;\n");
        assert_eq!(apply_rule(&BinaryFold, "x = (2) ** (3);"), "x = 8;\n");
    }

    #[test]
    fn test_folds_comparisons() {
        assert_eq!(apply_rule(&BinaryFold, r#"x = "1" == 1;"#), "x = true;\n");
        assert_eq!(apply_rule(&BinaryFold, r#"x = "1" === 1;"#), "x = false;\n");
        assert_eq!(apply_rule(&BinaryFold, r#"x = "b" > "a";"#), "x = true;\n");
        assert_eq!(apply_rule(&BinaryFold, "x = null >= 0;"), "x = true;\n");
    }

    #[test]
    fn test_leaves_non_literal_operands() {
        assert_eq!(apply_rule(&BinaryFold, "x = a + 1;"), "x = a + 1;\n");
        assert_eq!(apply_rule(&BinaryFold, r#"x = "a" in o;"#), "x = \"a\" in o;\n");
        assert_eq!(apply_rule(&BinaryFold, "x = 1 / 0;"), "x = 1 / 0;\n");
        assert_eq!(apply_rule(&BinaryFold, "x = 1 && 2;"), "x = 1 && 2;\n");
    }

    #[test]
    fn test_idempotent() {
        assert_idempotent(&BinaryFold, r#"x = 1 + 2; y = "a" + 5 + f();"#);
    }
}
