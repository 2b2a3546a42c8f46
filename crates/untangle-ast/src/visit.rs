//! Exhaustive mutable traversal.
//!
//! Every `visit_*` method defaults to the matching `walk_*` function, which
//! visits all children in source order. Implementors override the hooks they
//! care about and call the `walk_*` function to keep descending.
//!
//! Statement lists go through [`VisitMut::visit_stmts`]; statements sitting
//! in a single-statement slot (an `if` branch, a loop body, a label body)
//! go through [`VisitMut::visit_stmt`] directly.

use crate::ast::*;

pub trait VisitMut {
    fn visit_program(&mut self, program: &mut Program) {
        walk_program(self, program)
    }

    fn visit_stmts(&mut self, stmts: &mut Vec<Stmt>) {
        walk_stmts(self, stmts)
    }

    fn visit_stmt(&mut self, stmt: &mut Stmt) {
        walk_stmt(self, stmt)
    }

    fn visit_expr(&mut self, expr: &mut Expr) {
        walk_expr(self, expr)
    }

    fn visit_pat(&mut self, pat: &mut Pat) {
        walk_pat(self, pat)
    }

    fn visit_function(&mut self, function: &mut Function) {
        walk_function(self, function)
    }

    fn visit_arrow(&mut self, arrow: &mut Arrow) {
        walk_arrow(self, arrow)
    }

    fn visit_class(&mut self, class: &mut Class) {
        walk_class(self, class)
    }

    fn visit_prop_key(&mut self, key: &mut PropKey) {
        walk_prop_key(self, key)
    }

    fn visit_var_decl(&mut self, decl: &mut VarDecl) {
        walk_var_decl(self, decl)
    }
}

pub fn walk_program<V: VisitMut + ?Sized>(v: &mut V, program: &mut Program) {
    v.visit_stmts(&mut program.body);
}

pub fn walk_stmts<V: VisitMut + ?Sized>(v: &mut V, stmts: &mut Vec<Stmt>) {
    for stmt in stmts.iter_mut() {
        v.visit_stmt(stmt);
    }
}

pub fn walk_stmt<V: VisitMut + ?Sized>(v: &mut V, stmt: &mut Stmt) {
    match stmt {
        Stmt::Expr(expr) | Stmt::Throw(expr) => v.visit_expr(expr),
        Stmt::Var(decl) => v.visit_var_decl(decl),
        Stmt::Function(function) => v.visit_function(function),
        Stmt::Class(class) => v.visit_class(class),
        Stmt::Block(stmts) => v.visit_stmts(stmts),
        Stmt::If(if_stmt) => {
            v.visit_expr(&mut if_stmt.test);
            v.visit_stmt(&mut if_stmt.cons);
            if let Some(alt) = &mut if_stmt.alt {
                v.visit_stmt(alt);
            }
        }
        Stmt::Switch(switch) => {
            v.visit_expr(&mut switch.discriminant);
            for case in &mut switch.cases {
                if let Some(test) = &mut case.test {
                    v.visit_expr(test);
                }
                v.visit_stmts(&mut case.body);
            }
        }
        Stmt::For(for_stmt) => {
            match &mut for_stmt.init {
                Some(ForInit::Var(decl)) => v.visit_var_decl(decl),
                Some(ForInit::Expr(expr)) => v.visit_expr(expr),
                None => {}
            }
            if let Some(test) = &mut for_stmt.test {
                v.visit_expr(test);
            }
            if let Some(update) = &mut for_stmt.update {
                v.visit_expr(update);
            }
            v.visit_stmt(&mut for_stmt.body);
        }
        Stmt::ForIn(for_in) => {
            match &mut for_in.head {
                ForHead::Var(_, pat) => v.visit_pat(pat),
                ForHead::Target(target) => walk_assign_target(v, target),
            }
            v.visit_expr(&mut for_in.right);
            v.visit_stmt(&mut for_in.body);
        }
        Stmt::While { test, body } => {
            v.visit_expr(test);
            v.visit_stmt(body);
        }
        Stmt::DoWhile { body, test } => {
            v.visit_stmt(body);
            v.visit_expr(test);
        }
        Stmt::Try(try_stmt) => {
            v.visit_stmts(&mut try_stmt.block);
            if let Some(handler) = &mut try_stmt.handler {
                if let Some(param) = &mut handler.param {
                    v.visit_pat(param);
                }
                v.visit_stmts(&mut handler.body);
            }
            if let Some(finalizer) = &mut try_stmt.finalizer {
                v.visit_stmts(finalizer);
            }
        }
        Stmt::With { object, body } => {
            v.visit_expr(object);
            v.visit_stmt(body);
        }
        Stmt::Labeled { body, .. } => v.visit_stmt(body),
        Stmt::Return(arg) => {
            if let Some(arg) = arg {
                v.visit_expr(arg);
            }
        }
        Stmt::Empty
        | Stmt::Break(_)
        | Stmt::Continue(_)
        | Stmt::Debugger
        | Stmt::Raw(_) => {}
    }
}

pub fn walk_var_decl<V: VisitMut + ?Sized>(v: &mut V, decl: &mut VarDecl) {
    for declarator in &mut decl.decls {
        v.visit_pat(&mut declarator.name);
        if let Some(init) = &mut declarator.init {
            v.visit_expr(init);
        }
    }
}

pub fn walk_expr<V: VisitMut + ?Sized>(v: &mut V, expr: &mut Expr) {
    match expr {
        Expr::Ident(_) | Expr::Lit(_) | Expr::This | Expr::Super | Expr::Raw(_) => {}
        Expr::Array(elems) => {
            for elem in elems.iter_mut().flatten() {
                v.visit_expr(elem);
            }
        }
        Expr::Object(props) => {
            for prop in props {
                walk_prop(v, prop);
            }
        }
        Expr::Function(function) => v.visit_function(function),
        Expr::Arrow(arrow) => v.visit_arrow(arrow),
        Expr::Class(class) => v.visit_class(class),
        Expr::Template(template) => {
            for expr in &mut template.exprs {
                v.visit_expr(expr);
            }
        }
        Expr::TaggedTemplate { tag, template } => {
            v.visit_expr(tag);
            for expr in &mut template.exprs {
                v.visit_expr(expr);
            }
        }
        Expr::Unary { arg, .. }
        | Expr::Update { arg, .. }
        | Expr::Spread(arg)
        | Expr::Await(arg)
        | Expr::Paren(arg) => v.visit_expr(arg),
        Expr::Binary { left, right, .. } => {
            v.visit_expr(left);
            v.visit_expr(right);
        }
        Expr::Assign { target, value, .. } => {
            walk_assign_target(v, target);
            v.visit_expr(value);
        }
        Expr::Cond { test, cons, alt } => {
            v.visit_expr(test);
            v.visit_expr(cons);
            v.visit_expr(alt);
        }
        Expr::Call(call) => {
            v.visit_expr(&mut call.callee);
            for arg in &mut call.args {
                v.visit_expr(arg);
            }
        }
        Expr::New { callee, args } => {
            v.visit_expr(callee);
            for arg in args {
                v.visit_expr(arg);
            }
        }
        Expr::Member(member) => {
            v.visit_expr(&mut member.object);
            if let MemberProp::Computed(prop) = &mut member.prop {
                v.visit_expr(prop);
            }
        }
        Expr::Seq(exprs) => {
            for expr in exprs {
                v.visit_expr(expr);
            }
        }
        Expr::Yield { arg, .. } => {
            if let Some(arg) = arg {
                v.visit_expr(arg);
            }
        }
    }
}

pub fn walk_assign_target<V: VisitMut + ?Sized>(v: &mut V, target: &mut AssignTarget) {
    match target {
        AssignTarget::Expr(expr) => v.visit_expr(expr),
        AssignTarget::Pat(pat) => v.visit_pat(pat),
    }
}

pub fn walk_prop<V: VisitMut + ?Sized>(v: &mut V, prop: &mut Prop) {
    match prop {
        Prop::KeyValue { key, value, .. } => {
            v.visit_prop_key(key);
            v.visit_expr(value);
        }
        Prop::Method(method) => {
            v.visit_prop_key(&mut method.key);
            v.visit_function(&mut method.function);
        }
        Prop::Spread(expr) => v.visit_expr(expr),
    }
}

pub fn walk_prop_key<V: VisitMut + ?Sized>(v: &mut V, key: &mut PropKey) {
    if let PropKey::Computed(expr) = key {
        v.visit_expr(expr);
    }
}

pub fn walk_pat<V: VisitMut + ?Sized>(v: &mut V, pat: &mut Pat) {
    match pat {
        Pat::Ident(_) => {}
        Pat::Array(elems) => {
            for elem in elems.iter_mut().flatten() {
                v.visit_pat(elem);
            }
        }
        Pat::Object(props) => {
            for prop in props {
                match prop {
                    ObjectPatProp::KeyValue { key, value, .. } => {
                        v.visit_prop_key(key);
                        v.visit_pat(value);
                    }
                    ObjectPatProp::Rest(pat) => v.visit_pat(pat),
                }
            }
        }
        Pat::Assign { left, right } => {
            v.visit_pat(left);
            v.visit_expr(right);
        }
        Pat::Rest(pat) => v.visit_pat(pat),
        Pat::Expr(expr) => v.visit_expr(expr),
    }
}

pub fn walk_function<V: VisitMut + ?Sized>(v: &mut V, function: &mut Function) {
    for param in &mut function.params {
        v.visit_pat(param);
    }
    v.visit_stmts(&mut function.body);
}

pub fn walk_arrow<V: VisitMut + ?Sized>(v: &mut V, arrow: &mut Arrow) {
    for param in &mut arrow.params {
        v.visit_pat(param);
    }
    match &mut arrow.body {
        ArrowBody::Expr(expr) => v.visit_expr(expr),
        ArrowBody::Block(stmts) => v.visit_stmts(stmts),
    }
}

pub fn walk_class<V: VisitMut + ?Sized>(v: &mut V, class: &mut Class) {
    if let Some(super_class) = &mut class.super_class {
        v.visit_expr(super_class);
    }
    for member in &mut class.members {
        match member {
            ClassMember::Method { method, .. } => {
                v.visit_prop_key(&mut method.key);
                v.visit_function(&mut method.function);
            }
            ClassMember::Field { key, value, .. } => {
                v.visit_prop_key(key);
                if let Some(value) = value {
                    v.visit_expr(value);
                }
            }
            ClassMember::StaticBlock(stmts) => v.visit_stmts(stmts),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct IdentCounter(usize);

    impl VisitMut for IdentCounter {
        fn visit_expr(&mut self, expr: &mut Expr) {
            if matches!(expr, Expr::Ident(_)) {
                self.0 += 1;
            }
            walk_expr(self, expr);
        }
    }

    #[test]
    fn test_walk_reaches_nested_expressions() {
        // if (a) { b(c); } else d;
        let mut program = Program {
            hashbang: None,
            body: vec![Stmt::If(IfStmt {
                test: Expr::ident("a"),
                cons: Box::new(Stmt::Block(vec![Stmt::Expr(Expr::Call(CallExpr::new(
                    Expr::ident("b"),
                    vec![Expr::ident("c")],
                )))])),
                alt: Some(Box::new(Stmt::Expr(Expr::ident("d")))),
            })],
        };
        let mut counter = IdentCounter(0);
        counter.visit_program(&mut program);
        assert_eq!(counter.0, 4);
    }
}
