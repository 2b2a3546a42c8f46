//! Statements after a jump in the same list.
//!
//! Function declarations are hoisted and stay where they are. `var`
//! declarations are hoisted too, so they stay without their initializers.

use untangle_ast::visit::walk_stmts;
use untangle_ast::{Pat, Program, Stmt, VarDecl, VarDeclarator, VarKind, VisitMut};

use crate::context::RunContext;
use crate::error::RuleResult;
use crate::rule::Rule;
use crate::rules::bound_names;

pub struct Unreachable;

impl Rule for Unreachable {
    fn name(&self) -> &'static str {
        "optimization/unreachable"
    }

    fn phase(&self) -> i32 {
        61
    }

    fn enabled_by_default(&self) -> bool {
        false
    }

    fn description(&self) -> &'static str {
        "Remove statements after return, throw, break or continue"
    }

    fn run(&self, program: &mut Program, _ctx: &mut RunContext) -> RuleResult<usize> {
        let mut pruner = Pruner { changes: 0 };
        pruner.visit_program(program);
        Ok(pruner.changes)
    }
}

struct Pruner {
    changes: usize,
}

impl VisitMut for Pruner {
    fn visit_stmts(&mut self, stmts: &mut Vec<Stmt>) {
        walk_stmts(self, stmts);
        let Some(jump) = stmts.iter().position(Stmt::is_jump) else {
            return;
        };
        let tail = stmts.split_off(jump + 1);
        for stmt in tail {
            match stmt {
                Stmt::Function(_) => stmts.push(stmt),
                Stmt::Var(decl) if decl.kind == VarKind::Var => {
                    let (hoisted, changed) = without_initializers(decl);
                    if changed {
                        self.changes += 1;
                    }
                    if !hoisted.decls.is_empty() {
                        stmts.push(Stmt::Var(hoisted));
                    }
                }
                _ => self.changes += 1,
            }
        }
    }
}

/// `var a = 1, [b, c] = xs` → `var a, b, c`, with whether anything changed.
fn without_initializers(decl: VarDecl) -> (VarDecl, bool) {
    let mut changed = false;
    let mut decls = Vec::with_capacity(decl.decls.len());
    for declarator in decl.decls {
        match declarator {
            VarDeclarator {
                name: name @ Pat::Ident(_),
                init: None,
            } => decls.push(VarDeclarator { name, init: None }),
            VarDeclarator { name, .. } => {
                changed = true;
                let mut names = Vec::new();
                bound_names(&name, &mut names);
                decls.extend(names.into_iter().map(|name| VarDeclarator {
                    name: Pat::ident(name),
                    init: None,
                }));
            }
        }
    }
    (
        VarDecl {
            kind: VarKind::Var,
            decls,
        },
        changed,
    )
}

#[cfg(test)]
mod tests {
    use crate::rules::test_support::{apply_rule, assert_idempotent, reprint};

    use super::Unreachable;

    #[test]
    fn test_after_return() {
        insta::assert_snapshot!(apply_rule(&Unreachable, "
            function f() {
                return 1;
                g();
                var a = 2, { b, c: [d] } = o;
                let e = 3;
                function h() {}
            }
        "), @r"
        function f() {
          return 1;
          var a, b, d;
          function h() {}
        }
        ");
    }

    #[test]
    fn test_switch_case_lists() {
        insta::assert_snapshot!(
            apply_rule(&Unreachable, "switch (x) { case 0: a(); break; b(); case 1: c(); }"),
            @r"
        switch (x) {
          case 0:
            a();
            break;
          case 1:
            c();
        }
        "
        );
    }

    #[test]
    fn test_nothing_after_jump() {
        let source = "while (x) { if (y) continue; f(); }";
        assert_eq!(apply_rule(&Unreachable, source), reprint(source));
    }

    #[test]
    fn test_idempotent() {
        assert_idempotent(
            &Unreachable,
            "function f() { throw e; var a = 1; var b; function g() {} h(); }",
        );
    }
}
