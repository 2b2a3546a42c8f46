//! `for` loops that do nothing, or never run their body, are reduced to
//! their initializer.

use untangle_ast::{ForInit, ForStmt, Lit, Program, Stmt};

use crate::context::RunContext;
use crate::error::RuleResult;
use crate::rewrite::{PatternApplicator, RewriteResult, StmtPattern};
use crate::rule::Rule;

pub struct ForSimplify;

impl Rule for ForSimplify {
    fn name(&self) -> &'static str {
        "loops/for-simplify"
    }

    fn phase(&self) -> i32 {
        30
    }

    fn description(&self) -> &'static str {
        "Reduce for loops with an empty body or a false test to their initializer"
    }

    fn run(&self, program: &mut Program, ctx: &mut RunContext) -> RuleResult<usize> {
        Ok(PatternApplicator::new()
            .add_stmt_pattern(InertForPattern)
            .apply(program, ctx))
    }
}

struct InertForPattern;

impl StmtPattern for InertForPattern {
    fn rewrite_stmt(&self, stmt: &mut Stmt, _ctx: &mut RunContext) -> RewriteResult<Stmt> {
        let Stmt::For(for_stmt) = stmt else {
            return RewriteResult::Unchanged;
        };
        if !is_inert(for_stmt) {
            return RewriteResult::Unchanged;
        }
        match for_stmt.init.take() {
            None => RewriteResult::Erase,
            Some(ForInit::Expr(expr)) => RewriteResult::Replace(Stmt::Expr(expr)),
            Some(ForInit::Var(decl)) => {
                let decl = Stmt::Var(decl);
                // `let`/`const` stay scoped to a block of their own.
                if decl.is_lexical_decl() {
                    RewriteResult::Replace(Stmt::Block(vec![decl]))
                } else {
                    RewriteResult::Replace(decl)
                }
            }
        }
    }
}

/// An empty block body with a test that can end the loop, or a statically
/// false test.
fn is_inert(for_stmt: &ForStmt) -> bool {
    let test = for_stmt
        .test
        .as_ref()
        .map(|test| test.as_lit().and_then(Lit::truthiness));
    if test == Some(Some(false)) {
        return true;
    }
    let empty_body = matches!(&*for_stmt.body, Stmt::Block(stmts) if stmts.is_empty());
    // `for (;;) {}` never terminates, so it is not dropped.
    let endless = matches!(test, None | Some(Some(true)));
    empty_body && !endless
}

#[cfg(test)]
mod tests {
    use crate::rules::test_support::{apply_rule, assert_idempotent, reprint};

    use super::ForSimplify;

    #[test]
    fn test_empty_body() {
        assert_eq!(
            apply_rule(&ForSimplify, "for (i = 0; i < n; i++) {}"),
            "i = 0;\n"
        );
        assert_eq!(
            apply_rule(&ForSimplify, "for (var i = 0; i < n; i++) {}"),
            "var i = 0;\n"
        );
        assert_eq!(apply_rule(&ForSimplify, "for (; x;) {}\nf();"), "f();\n");
    }

    #[test]
    fn test_false_test() {
        assert_eq!(
            apply_rule(&ForSimplify, "for (var i = 0; false; i++) f(i);"),
            "var i = 0;\n"
        );
        assert_eq!(apply_rule(&ForSimplify, "for (; 0;) f();"), "");
    }

    #[test]
    fn test_lexical_initializer_keeps_block() {
        insta::assert_snapshot!(apply_rule(&ForSimplify, "for (let i = 0; null;) f(i);"), @r"
        {
          let i = 0;
        }
        ");
    }

    #[test]
    fn test_keeps_live_loops() {
        for source in ["for (;;) {}", "for (; true;) {}", "for (i = 0; i < n; i++) f(i);"] {
            assert_eq!(apply_rule(&ForSimplify, source), reprint(source));
        }
    }

    #[test]
    fn test_idempotent() {
        assert_idempotent(&ForSimplify, "for (let i = 0; 0;) {}\nfor (a; b;) {}");
    }
}
