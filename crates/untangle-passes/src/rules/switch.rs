//! `switch` statements over a literal are replaced by the body of the
//! matching case, up to its first `break`. Cases that fall through into the
//! next one are left alone.

use untangle_ast::{Program, Stmt, SwitchStmt};

use crate::context::RunContext;
use crate::error::RuleResult;
use crate::eval::{Value, strict_equals};
use crate::rewrite::{PatternApplicator, RewriteResult, StmtPattern};
use crate::rule::Rule;
use crate::rules::flow::has_escaping_jump;

pub struct SwitchSimplify;

impl Rule for SwitchSimplify {
    fn name(&self) -> &'static str {
        "switch/switch-simplify"
    }

    fn phase(&self) -> i32 {
        40
    }

    fn description(&self) -> &'static str {
        "Replace switch statements over a literal with the case that runs"
    }

    fn run(&self, program: &mut Program, ctx: &mut RunContext) -> RuleResult<usize> {
        Ok(PatternApplicator::new()
            .add_stmt_pattern(LiteralSwitchPattern)
            .apply(program, ctx))
    }
}

struct LiteralSwitchPattern;

impl StmtPattern for LiteralSwitchPattern {
    fn rewrite_stmt(&self, stmt: &mut Stmt, _ctx: &mut RunContext) -> RewriteResult<Stmt> {
        let Stmt::Switch(switch) = stmt else {
            return RewriteResult::Unchanged;
        };
        let Some(target) = target_case(switch) else {
            return RewriteResult::Unchanged;
        };

        let body = &switch.cases[target].body;
        let mut taken = Vec::new();
        let mut ended = false;
        for stmt in body {
            if matches!(stmt, Stmt::Break(None)) {
                ended = true;
                break;
            }
            // A nested `break` would have left the switch early.
            if has_escaping_jump(stmt, true, false) {
                tracing::trace!("literal switch declined: nested break");
                return RewriteResult::Unchanged;
            }
            taken.push(stmt.clone());
        }
        let is_last = target + 1 == switch.cases.len();
        let falls_through = !ended && !is_last && !body.last().is_some_and(Stmt::is_jump);
        if falls_through {
            tracing::trace!("literal switch declined: matched case falls through");
            return RewriteResult::Unchanged;
        }

        if taken.is_empty() {
            RewriteResult::Erase
        } else if taken.iter().any(Stmt::is_lexical_decl) {
            RewriteResult::Replace(Stmt::Block(taken))
        } else {
            RewriteResult::Expand(taken)
        }
    }
}

/// Index of the case a literal discriminant selects: the first case whose
/// test is strictly equal, else `default`. `None` when the discriminant is
/// not a literal, when a test before the match is not one, or when nothing
/// matches and there is no `default`.
fn target_case(switch: &SwitchStmt) -> Option<usize> {
    let value = Value::from_lit(switch.discriminant.as_lit()?)?;
    let mut default = None;
    for (index, case) in switch.cases.iter().enumerate() {
        let Some(test) = &case.test else {
            default.get_or_insert(index);
            continue;
        };
        let test = Value::from_lit(test.as_lit()?)?;
        if strict_equals(&value, &test) {
            return Some(index);
        }
    }
    default
}

#[cfg(test)]
mod tests {
    use crate::rules::test_support::{apply_rule, assert_idempotent, reprint};

    use super::SwitchSimplify;

    #[test]
    fn test_matching_case() {
        let source = "switch (2) { case 1: a(); break; case 2: b(); break; default: c(); }";
        assert_eq!(apply_rule(&SwitchSimplify, source), "b();\n");
    }

    #[test]
    fn test_default_case() {
        let source =
            r#"switch ("x") { case "y": e(); break; default: d(); break; case "z": f(); }"#;
        assert_eq!(apply_rule(&SwitchSimplify, source), "d();\n");
    }

    #[test]
    fn test_only_matched_case_body() {
        let source = "switch (1) { case 1: a(); break; b(); case 2: c(); }";
        assert_eq!(apply_rule(&SwitchSimplify, source), "a();\n");
        let source = "switch (2) { case 1: a(); break; case 2: c(); }";
        assert_eq!(apply_rule(&SwitchSimplify, source), "c();\n");
    }

    #[test]
    fn test_case_ending_in_return() {
        let source = "function f() { switch (1) { case 1: return a(); case 2: b(); } }";
        assert_eq!(
            apply_rule(&SwitchSimplify, source),
            "function f() {\n  return a();\n}\n"
        );
    }

    #[test]
    fn test_strict_equality() {
        let source = r#"switch (1) { case "1": a(); break; case true: b(); break; case 1: c(); }"#;
        assert_eq!(apply_rule(&SwitchSimplify, source), "c();\n");
    }

    #[test]
    fn test_no_match_removed() {
        assert_eq!(
            apply_rule(&SwitchSimplify, "switch (3) { case 1: a(); }\ng();"),
            "g();\n"
        );
        assert_eq!(
            apply_rule(&SwitchSimplify, "switch (1) { case 1: break; }"),
            ""
        );
    }

    #[test]
    fn test_declines() {
        for source in [
            "switch (x) { case 1: a(); }",
            "switch (1) { case y: a(); break; case 1: b(); }",
            "switch (1) { case 1: if (c) break; b(); }",
            "switch (1) { case 1: a(); case 2: b(); break; default: c(); }",
            r#"switch ("x") { default: d(); case "y": e(); break; }"#,
        ] {
            assert_eq!(apply_rule(&SwitchSimplify, source), reprint(source));
        }
    }

    #[test]
    fn test_lexical_case_body() {
        insta::assert_snapshot!(
            apply_rule(&SwitchSimplify, "switch (0) { case 0: let a = f(); g(a); }"),
            @r"
        {
          let a = f();
          g(a);
        }
        "
        );
    }

    #[test]
    fn test_idempotent() {
        assert_idempotent(
            &SwitchSimplify,
            "switch (0) { case 0: const a = 1; f(a); break; }\n\
             switch (1) { case 1: for (;;) break; }",
        );
    }
}
