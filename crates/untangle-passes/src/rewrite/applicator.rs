//! Pattern applicator for driving tree rewrites.
//!
//! The `PatternApplicator` walks the whole program once, children before
//! parents, and offers each statement and expression to its patterns. A
//! node produced by a pattern is offered again (bounded by
//! `max_reapply`), so chains like "remove parens, then collapse the
//! sequence that was inside" finish in one walk.

use untangle_ast::visit::{VisitMut, walk_expr, walk_stmt};
use untangle_ast::{Expr, Program, Stmt};

use super::pattern::{ExprPattern, StmtPattern};
use super::result::RewriteResult;
use crate::context::RunContext;

pub struct PatternApplicator {
    stmt_patterns: Vec<Box<dyn StmtPattern>>,
    expr_patterns: Vec<Box<dyn ExprPattern>>,
    max_reapply: usize,
}

impl PatternApplicator {
    pub fn new() -> Self {
        Self {
            stmt_patterns: Vec::new(),
            expr_patterns: Vec::new(),
            max_reapply: 32,
        }
    }

    /// Set how often a node produced by a pattern is offered again.
    pub fn with_max_reapply(mut self, max: usize) -> Self {
        self.max_reapply = max;
        self
    }

    pub fn add_stmt_pattern<P>(mut self, pattern: P) -> Self
    where
        P: StmtPattern + 'static,
    {
        self.stmt_patterns.push(Box::new(pattern));
        self
    }

    pub fn add_expr_pattern<P>(mut self, pattern: P) -> Self
    where
        P: ExprPattern + 'static,
    {
        self.expr_patterns.push(Box::new(pattern));
        self
    }

    /// Rewrite `program` in place and return the number of edits.
    pub fn apply(&self, program: &mut Program, ctx: &mut RunContext) -> usize {
        let mut walker = Walker {
            applicator: self,
            ctx,
            changes: 0,
        };
        walker.visit_program(program);
        walker.changes
    }
}

impl Default for PatternApplicator {
    fn default() -> Self {
        Self::new()
    }
}

struct Walker<'a, 'c> {
    applicator: &'a PatternApplicator,
    ctx: &'c mut RunContext,
    changes: usize,
}

impl Walker<'_, '_> {
    /// First changed result among the statement patterns, in order.
    fn rewrite_once(&mut self, stmt: &mut Stmt) -> RewriteResult<Stmt> {
        let applicator = self.applicator;
        for pattern in &applicator.stmt_patterns {
            let result = pattern.rewrite_stmt(stmt, self.ctx);
            if result.is_changed() {
                return result;
            }
        }
        RewriteResult::Unchanged
    }

    /// List mode: push whatever `stmt` turns into onto `out`.
    fn rewrite_into(&mut self, mut stmt: Stmt, out: &mut Vec<Stmt>, depth: usize) {
        if depth >= self.applicator.max_reapply {
            tracing::trace!("statement re-application limit reached");
            out.push(stmt);
            return;
        }
        match self.rewrite_once(&mut stmt) {
            RewriteResult::Unchanged => out.push(stmt),
            RewriteResult::Replace(new) => {
                self.changes += 1;
                self.rewrite_into(new, out, depth + 1);
            }
            RewriteResult::Expand(stmts) => {
                self.changes += 1;
                for new in stmts {
                    self.rewrite_into(new, out, depth + 1);
                }
            }
            RewriteResult::Erase => self.changes += 1,
        }
    }

    /// Single-slot mode: the result has to fit back into one statement.
    fn rewrite_slot(&mut self, stmt: &mut Stmt) {
        for _ in 0..self.applicator.max_reapply {
            let was_empty = matches!(stmt, Stmt::Empty);
            let replacement = match self.rewrite_once(stmt) {
                RewriteResult::Unchanged => return,
                RewriteResult::Replace(new) => new,
                RewriteResult::Expand(stmts) => into_slot(stmts),
                RewriteResult::Erase => Stmt::Empty,
            };
            // Erasing `;` in a slot leaves `;`.
            if was_empty && matches!(replacement, Stmt::Empty) {
                *stmt = Stmt::Empty;
                return;
            }
            *stmt = replacement;
            self.changes += 1;
        }
        tracing::trace!("statement re-application limit reached");
    }
}

fn into_slot(mut stmts: Vec<Stmt>) -> Stmt {
    match stmts.len() {
        0 => Stmt::Empty,
        1 if !stmts[0].is_lexical_decl() => stmts.pop().unwrap_or_default(),
        _ => Stmt::Block(stmts),
    }
}

impl VisitMut for Walker<'_, '_> {
    fn visit_stmts(&mut self, stmts: &mut Vec<Stmt>) {
        let old = std::mem::take(stmts);
        let mut out = Vec::with_capacity(old.len());
        for mut stmt in old {
            walk_stmt(self, &mut stmt);
            self.rewrite_into(stmt, &mut out, 0);
        }
        *stmts = out;
    }

    fn visit_stmt(&mut self, stmt: &mut Stmt) {
        walk_stmt(self, stmt);
        self.rewrite_slot(stmt);
    }

    fn visit_expr(&mut self, expr: &mut Expr) {
        walk_expr(self, expr);
        let applicator = self.applicator;
        'reapply: for _ in 0..applicator.max_reapply {
            for pattern in &applicator.expr_patterns {
                if let Some(new) = pattern.rewrite_expr(expr, self.ctx) {
                    *expr = new;
                    self.changes += 1;
                    continue 'reapply;
                }
            }
            return;
        }
        tracing::trace!("expression re-application limit reached");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use untangle_ast::{CallExpr, IfStmt, Lit, print_program};

    /// `debugger;` is erased, `x;` expands to `a; b;`.
    struct ToyStmtPattern;

    impl StmtPattern for ToyStmtPattern {
        fn rewrite_stmt(&self, stmt: &mut Stmt, _ctx: &mut RunContext) -> RewriteResult<Stmt> {
            match stmt {
                Stmt::Debugger => RewriteResult::Erase,
                Stmt::Expr(Expr::Ident(ident)) if ident.name == "x" => RewriteResult::Expand(vec![
                    Stmt::Expr(Expr::ident("a")),
                    Stmt::Expr(Expr::ident("b")),
                ]),
                _ => RewriteResult::Unchanged,
            }
        }
    }

    /// `one` becomes `1`.
    struct ToyExprPattern;

    impl ExprPattern for ToyExprPattern {
        fn rewrite_expr(&self, expr: &mut Expr, _ctx: &mut RunContext) -> Option<Expr> {
            match expr.as_ident() {
                Some("one") => Some(Expr::Lit(Lit::num(1.0))),
                _ => None,
            }
        }
    }

    fn program(body: Vec<Stmt>) -> Program {
        Program {
            hashbang: None,
            body,
        }
    }

    #[test]
    fn test_list_mode_splices_and_erases() {
        let mut program = program(vec![
            Stmt::Debugger,
            Stmt::Expr(Expr::ident("x")),
            Stmt::Expr(Expr::Call(CallExpr::new(
                Expr::ident("f"),
                vec![Expr::ident("one")],
            ))),
        ]);
        let applicator = PatternApplicator::new()
            .add_stmt_pattern(ToyStmtPattern)
            .add_expr_pattern(ToyExprPattern);
        let changes = applicator.apply(&mut program, &mut RunContext::new());
        assert_eq!(changes, 3);
        assert_eq!(print_program(&program), "a;\nb;\nf(1);\n");
    }

    #[test]
    fn test_slot_mode_wraps_and_empties() {
        let mut program = program(vec![Stmt::If(IfStmt {
            test: Expr::ident("c"),
            cons: Box::new(Stmt::Expr(Expr::ident("x"))),
            alt: Some(Box::new(Stmt::Debugger)),
        })]);
        let applicator = PatternApplicator::new().add_stmt_pattern(ToyStmtPattern);
        let changes = applicator.apply(&mut program, &mut RunContext::new());
        assert_eq!(changes, 2);
        assert_eq!(
            print_program(&program),
            "if (c) {\n  a;\n  b;\n} else;\n"
        );

        // Already empty slots stay quiet.
        let again = applicator.apply(&mut program, &mut RunContext::new());
        assert_eq!(again, 0);
    }
}
