//! Constant folding of unary operators on literals.
//!
//! `!0` → `true`, `-"3"` → `-3`, `typeof "s"` → `"string"`, and the
//! boolean idioms `![]` / `!{}` → `false`.

use untangle_ast::{Expr, Lit, Program, UnaryOp};

use crate::context::RunContext;
use crate::error::RuleResult;
use crate::eval::{Value, eval_unary};
use crate::rewrite::{ExprPattern, PatternApplicator};
use crate::rule::Rule;

pub struct UnaryFold;

impl Rule for UnaryFold {
    fn name(&self) -> &'static str {
        "expressions/unary-fold"
    }

    fn phase(&self) -> i32 {
        9
    }

    fn description(&self) -> &'static str {
        "Fold !, -, +, ~ and typeof applied to literals"
    }

    fn run(&self, program: &mut Program, ctx: &mut RunContext) -> RuleResult<usize> {
        Ok(PatternApplicator::new()
            .add_expr_pattern(FoldUnaryPattern)
            .apply(program, ctx))
    }
}

struct FoldUnaryPattern;

impl ExprPattern for FoldUnaryPattern {
    fn rewrite_expr(&self, expr: &mut Expr, _ctx: &mut RunContext) -> Option<Expr> {
        let Expr::Unary { op, arg } = expr else {
            return None;
        };
        let arg = arg.peel_parens();

        // Empty array and object literals are always truthy.
        if *op == UnaryOp::Not {
            match arg {
                Expr::Array(elems) if elems.is_empty() => return Some(Expr::Lit(Lit::Bool(false))),
                Expr::Object(props) if props.is_empty() => {
                    return Some(Expr::Lit(Lit::Bool(false)));
                }
                _ => {}
            }
        }

        let Expr::Lit(lit) = arg else {
            return None;
        };
        if let (UnaryOp::Not, Lit::Regex(_)) = (*op, lit) {
            return Some(Expr::Lit(Lit::Bool(false)));
        }
        let value = Value::from_lit(lit)?;
        Some(Expr::Lit(eval_unary(*op, &value)?.into_lit()?))
    }
}

#[cfg(test)]
mod tests {
    use crate::rules::test_support::{apply_rule, assert_idempotent};

    use super::UnaryFold;

    #[test]
    fn test_folds_unary_literals() {
        assert_eq!(apply_rule(&UnaryFold, "x = !0;"), "x = true;\n");
        assert_eq!(apply_rule(&UnaryFold, "x = !![];"), "x = true;\n");
        assert_eq!(apply_rule(&UnaryFold, r#"x = -"3";"#), "x = -3;\n");
        assert_eq!(apply_rule(&UnaryFold, "x = ~5;"), "x = -6;\n");
        assert_eq!(apply_rule(&UnaryFold, r#"x = typeof "s";"#), "x = \"string\";\n");
        assert_eq!(apply_rule(&UnaryFold, "x = !{};"), "x = false;\n");
    }

    #[test]
    fn test_leaves_unfoldable() {
        assert_eq!(apply_rule(&UnaryFold, "x = -0;"), "x = -0;\n");
        assert_eq!(apply_rule(&UnaryFold, "x = !a;"), "x = !a;\n");
        assert_eq!(apply_rule(&UnaryFold, "x = void 0;"), "x = void 0;\n");
        assert_eq!(apply_rule(&UnaryFold, "x = -\"a\";"), "x = -\"a\";\n");
    }

    #[test]
    fn test_idempotent() {
        assert_idempotent(&UnaryFold, "x = !0; y = -1; z = ~~2;");
    }
}
