//! Non-boolean literal loop tests become `true` / `false`:
//! `while (1)` → `while (true)`, `for (;0;)` → `for (;false;)`.

use untangle_ast::{Expr, Lit, Program, Stmt};

use crate::context::RunContext;
use crate::error::RuleResult;
use crate::rewrite::{PatternApplicator, RewriteResult, StmtPattern};
use crate::rule::Rule;

pub struct LoopNormalize;

impl Rule for LoopNormalize {
    fn name(&self) -> &'static str {
        "control/loop-normalize"
    }

    fn phase(&self) -> i32 {
        1
    }

    fn description(&self) -> &'static str {
        "Rewrite literal loop conditions as boolean literals"
    }

    fn run(&self, program: &mut Program, ctx: &mut RunContext) -> RuleResult<usize> {
        Ok(PatternApplicator::new()
            .add_stmt_pattern(BooleanTestPattern)
            .apply(program, ctx))
    }
}

/// The boolean a non-boolean literal test stands for.
fn normalized(test: &Expr) -> Option<bool> {
    match test.as_lit()? {
        Lit::Bool(_) => None,
        lit => lit.truthiness(),
    }
}

struct BooleanTestPattern;

impl StmtPattern for BooleanTestPattern {
    fn rewrite_stmt(&self, stmt: &mut Stmt, _ctx: &mut RunContext) -> RewriteResult<Stmt> {
        let test = match stmt {
            Stmt::While { test, .. } | Stmt::DoWhile { test, .. } => test,
            Stmt::For(for_stmt) => match &mut for_stmt.test {
                Some(test) => test,
                None => return RewriteResult::Unchanged,
            },
            _ => return RewriteResult::Unchanged,
        };
        let Some(value) = normalized(test) else {
            return RewriteResult::Unchanged;
        };
        *test = Expr::Lit(Lit::Bool(value));
        RewriteResult::Replace(stmt.take())
    }
}

#[cfg(test)]
mod tests {
    use crate::rules::test_support::{apply_rule, assert_idempotent};

    use super::LoopNormalize;

    #[test]
    fn test_normalizes_tests() {
        assert_eq!(apply_rule(&LoopNormalize, "while (1) f();"), "while (true) f();\n");
        assert_eq!(apply_rule(&LoopNormalize, "do f(); while (0);"), "do f();\nwhile (false);\n");
        assert_eq!(apply_rule(&LoopNormalize, r#"for (;"x";) f();"#), "for (; true;) f();\n");
        assert_eq!(apply_rule(&LoopNormalize, "while (!0) f();"), "while (!0) f();\n");
    }

    #[test]
    fn test_idempotent() {
        assert_idempotent(&LoopNormalize, "while (1) { do {} while (0); }");
    }
}
