//! `;` and `{}` in statement lists.

use untangle_ast::visit::walk_stmts;
use untangle_ast::{Program, Stmt, VisitMut};

use crate::context::RunContext;
use crate::error::RuleResult;
use crate::rule::Rule;

pub struct EmptyStatements;

impl Rule for EmptyStatements {
    fn name(&self) -> &'static str {
        "optimization/empty-statements"
    }

    fn phase(&self) -> i32 {
        62
    }

    fn description(&self) -> &'static str {
        "Remove empty statements and empty blocks from statement lists"
    }

    fn run(&self, program: &mut Program, _ctx: &mut RunContext) -> RuleResult<usize> {
        let mut sweeper = Sweeper { changes: 0 };
        sweeper.visit_program(program);
        Ok(sweeper.changes)
    }
}

struct Sweeper {
    changes: usize,
}

fn is_empty(stmt: &Stmt) -> bool {
    match stmt {
        Stmt::Empty => true,
        Stmt::Block(stmts) => stmts.is_empty(),
        _ => false,
    }
}

impl VisitMut for Sweeper {
    fn visit_stmts(&mut self, stmts: &mut Vec<Stmt>) {
        walk_stmts(self, stmts);
        let before = stmts.len();
        stmts.retain(|stmt| !is_empty(stmt));
        self.changes += before - stmts.len();
    }
}

#[cfg(test)]
mod tests {
    use crate::rules::test_support::{apply_rule, assert_idempotent};

    use super::EmptyStatements;

    #[test]
    fn test_removes_from_lists() {
        assert_eq!(
            apply_rule(&EmptyStatements, "a();;\n{}\n{ ; }\nb();"),
            "a();\nb();\n"
        );
    }

    #[test]
    fn test_keeps_slots() {
        assert_eq!(
            apply_rule(&EmptyStatements, "if (x) {} else ;\nwhile (y);"),
            "if (x) {} else;\nwhile (y);\n"
        );
    }

    #[test]
    fn test_idempotent() {
        assert_idempotent(&EmptyStatements, "function f() { ;{ {} } return; }");
    }
}
