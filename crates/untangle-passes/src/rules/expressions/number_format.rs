//! Hex, octal, binary and legacy-octal number literals → decimal.

use untangle_ast::text::is_radix_literal;
use untangle_ast::{Expr, JsNum, Lit, Program};

use crate::context::RunContext;
use crate::error::RuleResult;
use crate::rewrite::{ExprPattern, PatternApplicator};
use crate::rule::Rule;

pub struct NumberFormat;

impl Rule for NumberFormat {
    fn name(&self) -> &'static str {
        "expressions/number-format"
    }

    fn phase(&self) -> i32 {
        7
    }

    fn description(&self) -> &'static str {
        "Print non-decimal number literals in decimal"
    }

    fn run(&self, program: &mut Program, ctx: &mut RunContext) -> RuleResult<usize> {
        Ok(PatternApplicator::new()
            .add_expr_pattern(DecimalPattern)
            .apply(program, ctx))
    }
}

struct DecimalPattern;

impl ExprPattern for DecimalPattern {
    fn rewrite_expr(&self, expr: &mut Expr, _ctx: &mut RunContext) -> Option<Expr> {
        match expr {
            Expr::Lit(Lit::Num(JsNum {
                value,
                raw: Some(raw),
            })) if is_radix_literal(raw) => Some(Expr::Lit(Lit::num(*value))),
            _ => None,
        }
    }
}
