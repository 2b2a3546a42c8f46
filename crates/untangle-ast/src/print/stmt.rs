//! Statement printing.

use crate::ast::*;

use super::Printer;
use super::expr::{PREC_ASSIGN, PREC_LHS, starts_ambiguously};

impl Printer {
    pub(super) fn stmt(&mut self, stmt: &Stmt) {
        match stmt {
            Stmt::Expr(expr) => {
                // Directives are kept as raw text, so a string statement here
                // must not print as one.
                if starts_ambiguously(expr) || matches!(expr, Expr::Lit(Lit::Str(_))) {
                    self.write("(");
                    self.expr(expr, 0);
                    self.write(")");
                } else {
                    self.expr(expr, 0);
                }
                self.write(";");
            }
            Stmt::Var(decl) => {
                self.var_decl(decl);
                self.write(";");
            }
            Stmt::Function(function) => self.function(function),
            Stmt::Class(class) => self.class(class),
            Stmt::Block(stmts) => self.block(stmts),
            Stmt::Empty => self.write(";"),
            Stmt::If(if_stmt) => self.if_stmt(if_stmt),
            Stmt::Switch(switch) => self.switch(switch),
            Stmt::For(for_stmt) => {
                self.write("for (");
                self.in_for_init = true;
                match &for_stmt.init {
                    Some(ForInit::Var(decl)) => self.var_decl(decl),
                    Some(ForInit::Expr(expr)) => self.expr(expr, 0),
                    None => {}
                }
                self.in_for_init = false;
                self.write(";");
                if let Some(test) = &for_stmt.test {
                    self.write(" ");
                    self.expr(test, 0);
                }
                self.write(";");
                if let Some(update) = &for_stmt.update {
                    self.write(" ");
                    self.expr(update, 0);
                }
                self.write(")");
                self.body(&for_stmt.body);
            }
            Stmt::ForIn(for_in) => {
                self.write("for ");
                if for_in.is_await {
                    self.write("await ");
                }
                self.write("(");
                match &for_in.head {
                    ForHead::Var(kind, pat) => {
                        self.write(kind.as_str());
                        self.write(" ");
                        self.pat(pat);
                    }
                    ForHead::Target(AssignTarget::Expr(expr)) => self.expr(expr, PREC_LHS),
                    ForHead::Target(AssignTarget::Pat(pat)) => self.pat(pat),
                }
                self.write(if for_in.of { " of " } else { " in " });
                self.expr(&for_in.right, if for_in.of { PREC_ASSIGN } else { 0 });
                self.write(")");
                self.body(&for_in.body);
            }
            Stmt::While { test, body } => {
                self.write("while (");
                self.expr(test, 0);
                self.write(")");
                self.body(body);
            }
            Stmt::DoWhile { body, test } => {
                self.write("do");
                self.body(body);
                if matches!(**body, Stmt::Block(_)) {
                    self.write(" ");
                } else {
                    self.newline();
                }
                self.write("while (");
                self.expr(test, 0);
                self.write(");");
            }
            Stmt::Try(try_stmt) => {
                self.write("try ");
                self.block(&try_stmt.block);
                if let Some(handler) = &try_stmt.handler {
                    self.write(" catch ");
                    if let Some(param) = &handler.param {
                        self.write("(");
                        self.pat(param);
                        self.write(") ");
                    }
                    self.block(&handler.body);
                }
                if let Some(finalizer) = &try_stmt.finalizer {
                    self.write(" finally ");
                    self.block(finalizer);
                }
            }
            Stmt::With { object, body } => {
                self.write("with (");
                self.expr(object, 0);
                self.write(")");
                self.body(body);
            }
            Stmt::Labeled { label, body } => {
                self.write(label);
                self.write(":");
                self.body(body);
            }
            Stmt::Break(label) => self.jump("break", label.as_deref()),
            Stmt::Continue(label) => self.jump("continue", label.as_deref()),
            Stmt::Return(arg) => {
                self.write("return");
                if let Some(arg) = arg {
                    self.write(" ");
                    self.expr(arg, 0);
                }
                self.write(";");
            }
            Stmt::Throw(arg) => {
                self.write("throw ");
                self.expr(arg, 0);
                self.write(";");
            }
            Stmt::Debugger => self.write("debugger;"),
            Stmt::Raw(text) => self.write(text),
        }
    }

    fn jump(&mut self, keyword: &str, label: Option<&str>) {
        self.write(keyword);
        if let Some(label) = label {
            self.write(" ");
            self.write(label);
        }
        self.write(";");
    }

    pub(super) fn var_decl(&mut self, decl: &VarDecl) {
        self.write(decl.kind.as_str());
        self.write(" ");
        self.comma_list(&decl.decls, |p, declarator| {
            p.pat(&declarator.name);
            if let Some(init) = &declarator.init {
                p.write(" = ");
                p.expr(init, PREC_ASSIGN);
            }
        });
    }

    /// `{ … }` with one statement per line, `{}` when empty.
    pub(super) fn block(&mut self, stmts: &[Stmt]) {
        if stmts.is_empty() {
            self.write("{}");
            return;
        }
        self.write("{");
        self.indent += 1;
        for stmt in stmts {
            self.newline();
            self.stmt(stmt);
        }
        self.indent -= 1;
        self.newline();
        self.write("}");
    }

    /// Body of a compound statement, written after its header.
    fn body(&mut self, stmt: &Stmt) {
        match stmt {
            Stmt::Empty => self.write(";"),
            other => {
                self.write(" ");
                self.stmt(other);
            }
        }
    }

    fn if_stmt(&mut self, if_stmt: &IfStmt) {
        self.write("if (");
        self.expr(&if_stmt.test, 0);
        self.write(")");
        let Some(alt) = &if_stmt.alt else {
            self.body(&if_stmt.cons);
            return;
        };

        let cons_is_block = if ends_with_open_if(&if_stmt.cons) {
            self.write(" ");
            self.block(std::slice::from_ref(&*if_stmt.cons));
            true
        } else {
            self.body(&if_stmt.cons);
            matches!(*if_stmt.cons, Stmt::Block(_))
        };
        if cons_is_block {
            self.write(" ");
        } else {
            self.newline();
        }
        self.write("else");
        self.body(alt);
    }

    fn switch(&mut self, switch: &SwitchStmt) {
        self.write("switch (");
        self.expr(&switch.discriminant, 0);
        self.write(") ");
        if switch.cases.is_empty() {
            self.write("{}");
            return;
        }
        self.write("{");
        self.indent += 1;
        for case in &switch.cases {
            self.newline();
            match &case.test {
                Some(test) => {
                    self.write("case ");
                    self.expr(test, 0);
                    self.write(":");
                }
                None => self.write("default:"),
            }
            self.indent += 1;
            for stmt in &case.body {
                self.newline();
                self.stmt(stmt);
            }
            self.indent -= 1;
        }
        self.indent -= 1;
        self.newline();
        self.write("}");
    }
}

/// Whether `stmt` ends in an `if` without `else`, which would capture a
/// following `else` when printed without braces.
fn ends_with_open_if(stmt: &Stmt) -> bool {
    match stmt {
        Stmt::If(if_stmt) => match &if_stmt.alt {
            None => true,
            Some(alt) => ends_with_open_if(alt),
        },
        Stmt::While { body, .. } | Stmt::With { body, .. } | Stmt::Labeled { body, .. } => {
            ends_with_open_if(body)
        }
        Stmt::For(for_stmt) => ends_with_open_if(&for_stmt.body),
        Stmt::ForIn(for_in) => ends_with_open_if(&for_in.body),
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::super::print_stmt;
    use crate::ast::*;

    fn call_stmt(name: &str) -> Stmt {
        Stmt::Expr(Expr::Call(CallExpr::new(Expr::ident(name), vec![])))
    }

    #[test]
    fn test_switch_layout() {
        let stmt = Stmt::Switch(SwitchStmt {
            discriminant: Expr::ident("x"),
            cases: vec![
                SwitchCase {
                    test: Some(Expr::Lit(Lit::num(0.0))),
                    body: vec![call_stmt("a"), Stmt::Break(None)],
                },
                SwitchCase {
                    test: None,
                    body: vec![call_stmt("b")],
                },
            ],
        });
        insta::assert_snapshot!(print_stmt(&stmt), @r"
        switch (x) {
          case 0:
            a();
            break;
          default:
            b();
        }
        ");
    }

    #[test]
    fn test_for_init_with_in_operator() {
        let init = Expr::Assign {
            op: AssignOp::Assign,
            target: AssignTarget::Expr(Box::new(Expr::ident("x"))),
            value: Box::new(Expr::Binary {
                op: BinaryOp::In,
                left: Box::new(Expr::Lit(Lit::str("a"))),
                right: Box::new(Expr::ident("o")),
            }),
        };
        let stmt = Stmt::For(ForStmt {
            init: Some(ForInit::Expr(init)),
            test: None,
            update: None,
            body: Box::new(Stmt::Empty),
        });
        assert_eq!(print_stmt(&stmt), r#"for (x = ("a" in o);;);"#);
    }

    #[test]
    fn test_string_statement_is_not_a_directive() {
        let stmt = Stmt::Expr(Expr::Lit(Lit::str("use strict")));
        assert_eq!(print_stmt(&stmt), r#"("use strict");"#);
    }

    #[test]
    fn test_do_while() {
        let stmt = Stmt::DoWhile {
            body: Box::new(Stmt::Block(vec![call_stmt("a")])),
            test: Expr::Lit(Lit::Bool(false)),
        };
        assert_eq!(print_stmt(&stmt), "do {\n  a();\n} while (false);");
    }

    #[test]
    fn test_try_catch_finally() {
        let stmt = Stmt::Try(TryStmt {
            block: vec![call_stmt("a")],
            handler: Some(CatchClause {
                param: Some(Pat::ident("e")),
                body: vec![],
            }),
            finalizer: Some(vec![call_stmt("b")]),
        });
        assert_eq!(
            print_stmt(&stmt),
            "try {\n  a();\n} catch (e) {} finally {\n  b();\n}"
        );
    }
}
