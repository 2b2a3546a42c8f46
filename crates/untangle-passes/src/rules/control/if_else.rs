//! `if` statements with a literal test are replaced by the branch they take.

use untangle_ast::{Program, Stmt};

use crate::context::RunContext;
use crate::error::RuleResult;
use crate::rewrite::{PatternApplicator, RewriteResult, StmtPattern};
use crate::rule::Rule;
use crate::rules::inline_branch;

pub struct IfElseSimplify;

impl Rule for IfElseSimplify {
    fn name(&self) -> &'static str {
        "control/if-else-simplify"
    }

    fn phase(&self) -> i32 {
        20
    }

    fn description(&self) -> &'static str {
        "Replace if statements with a literal test by the branch taken"
    }

    fn run(&self, program: &mut Program, ctx: &mut RunContext) -> RuleResult<usize> {
        Ok(PatternApplicator::new()
            .add_stmt_pattern(TakenBranchPattern)
            .apply(program, ctx))
    }
}

struct TakenBranchPattern;

impl StmtPattern for TakenBranchPattern {
    fn rewrite_stmt(&self, stmt: &mut Stmt, _ctx: &mut RunContext) -> RewriteResult<Stmt> {
        let Stmt::If(if_stmt) = stmt else {
            return RewriteResult::Unchanged;
        };
        let Some(taken) = if_stmt.test.as_lit().and_then(|lit| lit.truthiness()) else {
            return RewriteResult::Unchanged;
        };
        let branch = if taken {
            Some(if_stmt.cons.take())
        } else {
            if_stmt.alt.take().map(|alt| *alt)
        };
        match branch {
            Some(branch) => inline_branch(branch),
            None => RewriteResult::Erase,
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::rules::test_support::{apply_rule, assert_idempotent};

    use super::IfElseSimplify;

    #[test]
    fn test_true_inlines_consequent() {
        assert_eq!(
            apply_rule(&IfElseSimplify, "if (1) { a(); b(); } else { c(); }"),
            "a();\nb();\n"
        );
    }

    #[test]
    fn test_false_takes_alternative_or_removes() {
        assert_eq!(apply_rule(&IfElseSimplify, r#"if ("") a(); else c();"#), "c();\n");
        assert_eq!(apply_rule(&IfElseSimplify, "if (null) a(); d();"), "d();\n");
    }

    #[test]
    fn test_keeps_blocks_with_lexical_declarations() {
        insta::assert_snapshot!(apply_rule(&IfElseSimplify, "if (true) { let a = 1; f(a); }"), @r"
        {
          let a = 1;
          f(a);
        }
        ");
    }

    #[test]
    fn test_nested_slot() {
        assert_eq!(
            apply_rule(&IfElseSimplify, "while (x) if (0) a(); else { b(); c(); }"),
            "while (x) {\n  b();\n  c();\n}\n"
        );
    }

    #[test]
    fn test_idempotent() {
        assert_idempotent(&IfElseSimplify, "if (1) { if (0) a(); else b(); } if (x) y();");
    }
}
