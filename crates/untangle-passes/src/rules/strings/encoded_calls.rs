//! Calls to string-decoder functions: `_0x1a2b(5)`, `_0x1a2b("key")`.
//!
//! The decoded text comes from the run's decode table, keyed by
//! `name(arg)`. Calls with an entry are replaced by the string literal;
//! the others get an `unresolved encoded call` comment. Decoder functions
//! are never evaluated.

use untangle_ast::{Expr, Lit, Program};

use crate::context::RunContext;
use crate::error::RuleResult;
use crate::rewrite::{ExprPattern, PatternApplicator};
use crate::rule::Rule;
use crate::rules::is_encoded_callee;

pub struct EncodedCalls;

impl Rule for EncodedCalls {
    fn name(&self) -> &'static str {
        "strings/encoded-calls"
    }

    fn phase(&self) -> i32 {
        6
    }

    fn description(&self) -> &'static str {
        "Replace calls to string-decoder functions with their decoded text"
    }

    fn run(&self, program: &mut Program, ctx: &mut RunContext) -> RuleResult<usize> {
        Ok(PatternApplicator::new()
            .add_expr_pattern(EncodedCallPattern)
            .apply(program, ctx))
    }
}

struct EncodedCallPattern;

impl ExprPattern for EncodedCallPattern {
    fn rewrite_expr(&self, expr: &mut Expr, ctx: &mut RunContext) -> Option<Expr> {
        let Expr::Call(call) = expr else {
            return None;
        };
        let name = call.callee.as_ident().filter(|name| is_encoded_callee(name))?;
        let [arg] = call.args.as_slice() else {
            return None;
        };
        let key = match arg.as_lit()? {
            lit @ (Lit::Num(_) | Lit::Str(_)) => format!("{name}({})", lit.lookup_key()?),
            _ => return None,
        };

        if let Some(decoded) = ctx.decoded(&key) {
            return Some(Expr::Lit(Lit::str(decoded)));
        }

        let comment = format!("unresolved encoded call: {key}");
        if call.comments.contains(&comment) {
            return None;
        }
        tracing::debug!(call = %key, "no decode table entry");
        let Expr::Call(mut call) = expr.take() else {
            return None;
        };
        call.comments.push(comment);
        Some(Expr::Call(call))
    }
}
