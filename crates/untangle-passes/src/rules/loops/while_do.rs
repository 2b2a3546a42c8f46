//! `while (falsy)` loops are removed and `do … while (falsy)` runs its body
//! once, inline.

use untangle_ast::{Expr, Lit, Program, Stmt};

use crate::context::RunContext;
use crate::error::RuleResult;
use crate::rewrite::{PatternApplicator, RewriteResult, StmtPattern};
use crate::rule::Rule;
use crate::rules::flow::has_escaping_jump;
use crate::rules::inline_branch;

pub struct WhileDoSimplify;

impl Rule for WhileDoSimplify {
    fn name(&self) -> &'static str {
        "loops/while-do-simplify"
    }

    fn phase(&self) -> i32 {
        31
    }

    fn description(&self) -> &'static str {
        "Remove while (false) loops and unwrap do { ... } while (false)"
    }

    fn run(&self, program: &mut Program, ctx: &mut RunContext) -> RuleResult<usize> {
        Ok(PatternApplicator::new()
            .add_stmt_pattern(FalsyLoopPattern)
            .apply(program, ctx))
    }
}

fn is_falsy(test: &Expr) -> bool {
    test.as_lit().and_then(Lit::truthiness) == Some(false)
}

struct FalsyLoopPattern;

impl StmtPattern for FalsyLoopPattern {
    fn rewrite_stmt(&self, stmt: &mut Stmt, _ctx: &mut RunContext) -> RewriteResult<Stmt> {
        match stmt {
            Stmt::While { test, .. } if is_falsy(test) => RewriteResult::Erase,
            // A `break` or `continue` in the body would lose its target.
            Stmt::DoWhile { body, test }
                if is_falsy(test) && !has_escaping_jump(body, true, true) =>
            {
                inline_branch(body.take())
            }
            _ => RewriteResult::Unchanged,
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::rules::test_support::{apply_rule, assert_idempotent, reprint};

    use super::WhileDoSimplify;

    #[test]
    fn test_while_false_removed() {
        assert_eq!(
            apply_rule(&WhileDoSimplify, "while (false) f();\nwhile (0) {}\ng();"),
            "g();\n"
        );
    }

    #[test]
    fn test_do_while_false_inlined() {
        assert_eq!(
            apply_rule(&WhileDoSimplify, "do { a(); b(); } while (false);"),
            "a();\nb();\n"
        );
        assert_eq!(apply_rule(&WhileDoSimplify, "do a(); while (null);"), "a();\n");
    }

    #[test]
    fn test_do_while_with_jump_kept() {
        let source = "do { if (x) break; a(); } while (0);";
        assert_eq!(apply_rule(&WhileDoSimplify, source), reprint(source));

        let nested = "do { for (;;) break; } while (0);";
        insta::assert_snapshot!(apply_rule(&WhileDoSimplify, nested), @"for (;;) break;");
    }

    #[test]
    fn test_idempotent() {
        assert_idempotent(&WhileDoSimplify, "do { let a = 1; f(a); } while (false);");
    }
}
