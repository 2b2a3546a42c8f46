//! Lexical scopes and binding resolution.
//!
//! [`ScopeWalker`] visits every identifier that names a binding, in source
//! order, and hands it to an [`IdentSink`] together with the binding it
//! resolves to. Declarations are registered when their scope is entered, so
//! hoisted `var` and function bindings resolve from anywhere in the body.
//!
//! Scopes: the program and each function (params, `var`, top-level
//! functions), blocks (`let`, `const`, `class`, nested functions), `catch`
//! clauses, `for` heads with lexical declarations and `switch` bodies.
//! Named function and class expressions get a scope of their own for the
//! name.

use std::collections::HashMap;

use untangle_ast::visit::{walk_arrow, walk_expr, walk_pat, walk_stmt};
use untangle_ast::{
    Arrow, ArrowBody, Expr, ForHead, ForInStmt, ForInit, ForStmt, Function, Pat, Program, Stmt,
    VarKind, VisitMut,
};

use crate::rules::bound_names;

pub(crate) type ScopeId = usize;
pub(crate) type BindingId = usize;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum BindingKind {
    Function,
    Variable,
}

#[derive(Debug)]
pub(crate) struct Binding {
    pub name: String,
    pub kind: BindingKind,
    pub scope: ScopeId,
}

#[derive(Debug, Default)]
struct Scope {
    parent: Option<ScopeId>,
    names: HashMap<String, BindingId>,
    /// Reachable from `eval` or a `with` body: names may be looked up
    /// dynamically.
    dynamic: bool,
}

#[derive(Debug)]
pub(crate) struct ScopeTree {
    scopes: Vec<Scope>,
    bindings: Vec<Binding>,
}

impl ScopeTree {
    fn new() -> Self {
        Self {
            scopes: vec![Scope::default()],
            bindings: Vec::new(),
        }
    }

    fn push(&mut self, parent: ScopeId) -> ScopeId {
        self.scopes.push(Scope {
            parent: Some(parent),
            ..Scope::default()
        });
        self.scopes.len() - 1
    }

    /// Redeclaring a name in the same scope reuses the first binding.
    fn declare(&mut self, scope: ScopeId, name: String, kind: BindingKind) {
        let Some(entry) = self.scopes.get_mut(scope) else {
            return;
        };
        if entry.names.contains_key(&name) {
            return;
        }
        entry.names.insert(name.clone(), self.bindings.len());
        self.bindings.push(Binding { name, kind, scope });
    }

    fn resolve(&self, mut scope: ScopeId, name: &str) -> Option<BindingId> {
        loop {
            let entry = self.scopes.get(scope)?;
            if let Some(&binding) = entry.names.get(name) {
                return Some(binding);
            }
            scope = entry.parent?;
        }
    }

    fn mark_dynamic(&mut self, mut scope: ScopeId) {
        while let Some(entry) = self.scopes.get_mut(scope) {
            entry.dynamic = true;
            match entry.parent {
                Some(parent) => scope = parent,
                None => break,
            }
        }
    }

    pub fn bindings(&self) -> &[Binding] {
        &self.bindings
    }

    pub fn is_dynamic(&self, binding: BindingId) -> bool {
        self.bindings
            .get(binding)
            .and_then(|binding| self.scopes.get(binding.scope))
            .is_some_and(|scope| scope.dynamic)
    }
}

/// Receives every binding identifier the walker passes.
pub(crate) trait IdentSink {
    fn occurrence(&mut self, name: &mut String, binding: Option<BindingId>);
}

/// Everything a walk produced.
pub(crate) struct Walked<S> {
    pub tree: ScopeTree,
    /// Text of every raw statement and expression, which may mention
    /// bindings the walker cannot see.
    pub raw: Vec<String>,
    pub sink: S,
}

pub(crate) struct ScopeWalker<S> {
    tree: ScopeTree,
    current: ScopeId,
    raw: Vec<String>,
    sink: S,
}

impl<S: IdentSink> ScopeWalker<S> {
    pub fn walk(program: &mut Program, sink: S) -> Walked<S> {
        let mut walker = Self {
            tree: ScopeTree::new(),
            current: 0,
            raw: Vec::new(),
            sink,
        };
        walker.visit_program(program);
        Walked {
            tree: walker.tree,
            raw: walker.raw,
            sink: walker.sink,
        }
    }

    fn enter(&mut self, names: Vec<(String, BindingKind)>) -> ScopeId {
        let scope = self.tree.push(self.current);
        self.current = scope;
        self.declare(names);
        scope
    }

    fn leave(&mut self, scope: ScopeId) {
        self.current = self
            .tree
            .scopes
            .get(scope)
            .and_then(|scope| scope.parent)
            .unwrap_or(0);
    }

    fn declare(&mut self, names: Vec<(String, BindingKind)>) {
        for (name, kind) in names {
            self.tree.declare(self.current, name, kind);
        }
    }

    fn occurrence(&mut self, name: &mut String) {
        let binding = self.tree.resolve(self.current, name);
        self.sink.occurrence(name, binding);
    }

    /// A list with its own block scope (`try` and `finally` bodies).
    fn scoped_list(&mut self, stmts: &mut Vec<Stmt>) {
        let scope = self.enter(lexical_names(stmts));
        self.visit_stmts(stmts);
        self.leave(scope);
    }
}

impl<S: IdentSink> VisitMut for ScopeWalker<S> {
    fn visit_program(&mut self, program: &mut Program) {
        self.declare(function_scope_names(&[], &program.body));
        self.visit_stmts(&mut program.body);
    }

    fn visit_stmt(&mut self, stmt: &mut Stmt) {
        let scope = match stmt {
            Stmt::Block(stmts) => Some(self.enter(lexical_names(stmts))),
            Stmt::For(ForStmt {
                init: Some(ForInit::Var(decl)),
                ..
            }) if decl.kind != VarKind::Var => {
                let mut names = Vec::new();
                for declarator in &decl.decls {
                    bound_names(&declarator.name, &mut names);
                }
                Some(self.enter(variables(names)))
            }
            Stmt::ForIn(ForInStmt {
                head: ForHead::Var(kind, pat),
                ..
            }) if *kind != VarKind::Var => {
                let mut names = Vec::new();
                bound_names(pat, &mut names);
                Some(self.enter(variables(names)))
            }
            Stmt::Switch(switch) => {
                self.visit_expr(&mut switch.discriminant);
                let names = switch
                    .cases
                    .iter()
                    .flat_map(|case| lexical_names(&case.body))
                    .collect();
                let scope = self.enter(names);
                for case in &mut switch.cases {
                    if let Some(test) = &mut case.test {
                        self.visit_expr(test);
                    }
                    self.visit_stmts(&mut case.body);
                }
                self.leave(scope);
                return;
            }
            Stmt::Try(try_stmt) => {
                self.scoped_list(&mut try_stmt.block);
                if let Some(handler) = &mut try_stmt.handler {
                    let mut names = Vec::new();
                    if let Some(param) = &handler.param {
                        bound_names(param, &mut names);
                    }
                    let mut names = variables(names);
                    names.extend(lexical_names(&handler.body));
                    let scope = self.enter(names);
                    if let Some(param) = &mut handler.param {
                        self.visit_pat(param);
                    }
                    self.visit_stmts(&mut handler.body);
                    self.leave(scope);
                }
                if let Some(finalizer) = &mut try_stmt.finalizer {
                    self.scoped_list(finalizer);
                }
                return;
            }
            Stmt::With { object, body } => {
                self.visit_expr(object);
                self.tree.mark_dynamic(self.current);
                self.visit_stmt(body);
                return;
            }
            Stmt::Function(function) => {
                if let Some(name) = &mut function.name {
                    self.occurrence(&mut name.name);
                }
                self.visit_function(function);
                return;
            }
            Stmt::Class(class) => {
                if let Some(name) = &mut class.name {
                    self.occurrence(&mut name.name);
                }
                self.visit_class(class);
                return;
            }
            Stmt::Raw(text) => {
                self.raw.push(text.clone());
                return;
            }
            _ => None,
        };
        walk_stmt(self, stmt);
        if let Some(scope) = scope {
            self.leave(scope);
        }
    }

    fn visit_function(&mut self, function: &mut Function) {
        let scope = self.enter(function_scope_names(&function.params, &function.body));
        for param in &mut function.params {
            self.visit_pat(param);
        }
        self.visit_stmts(&mut function.body);
        self.leave(scope);
    }

    fn visit_arrow(&mut self, arrow: &mut Arrow) {
        let body: &[Stmt] = match &arrow.body {
            ArrowBody::Block(stmts) => stmts,
            ArrowBody::Expr(_) => &[],
        };
        let scope = self.enter(function_scope_names(&arrow.params, body));
        walk_arrow(self, arrow);
        self.leave(scope);
    }

    fn visit_expr(&mut self, expr: &mut Expr) {
        match expr {
            Expr::Ident(ident) => self.occurrence(&mut ident.name),
            Expr::Function(function) => match &mut function.name {
                Some(name) => {
                    let scope = self.enter(vec![(name.name.clone(), BindingKind::Function)]);
                    self.occurrence(&mut name.name);
                    self.visit_function(function);
                    self.leave(scope);
                }
                None => self.visit_function(function),
            },
            Expr::Class(class) => match &mut class.name {
                Some(name) => {
                    let scope = self.enter(vec![(name.name.clone(), BindingKind::Variable)]);
                    self.occurrence(&mut name.name);
                    self.visit_class(class);
                    self.leave(scope);
                }
                None => self.visit_class(class),
            },
            Expr::Call(call) if call.callee.as_ident() == Some("eval") => {
                self.tree.mark_dynamic(self.current);
                walk_expr(self, expr);
            }
            Expr::Raw(text) => self.raw.push(text.clone()),
            _ => walk_expr(self, expr),
        }
    }

    fn visit_pat(&mut self, pat: &mut Pat) {
        match pat {
            Pat::Ident(ident) => self.occurrence(&mut ident.name),
            _ => walk_pat(self, pat),
        }
    }
}

fn variables(names: Vec<String>) -> Vec<(String, BindingKind)> {
    names
        .into_iter()
        .map(|name| (name, BindingKind::Variable))
        .collect()
}

/// Declarations scoped to the block holding `stmts`.
fn lexical_names(stmts: &[Stmt]) -> Vec<(String, BindingKind)> {
    let mut names = Vec::new();
    for stmt in stmts {
        match stmt {
            Stmt::Var(decl) if decl.kind != VarKind::Var => {
                let mut bound = Vec::new();
                for declarator in &decl.decls {
                    bound_names(&declarator.name, &mut bound);
                }
                names.extend(variables(bound));
            }
            Stmt::Class(class) => {
                if let Some(name) = &class.name {
                    names.push((name.name.clone(), BindingKind::Variable));
                }
            }
            Stmt::Function(function) => {
                if let Some(name) = &function.name {
                    names.push((name.name.clone(), BindingKind::Function));
                }
            }
            _ => {}
        }
    }
    names
}

/// Params, hoisted `var`s and top-level declarations of a function body.
fn function_scope_names(params: &[Pat], body: &[Stmt]) -> Vec<(String, BindingKind)> {
    let mut bound = Vec::new();
    for param in params {
        bound_names(param, &mut bound);
    }
    hoisted_vars(body, &mut bound);
    let mut names = variables(bound);
    names.extend(lexical_names(body));
    names
}

fn hoisted_vars(stmts: &[Stmt], out: &mut Vec<String>) {
    for stmt in stmts {
        hoisted_vars_in(stmt, out);
    }
}

/// `var` declarations anywhere in `stmt` outside nested functions.
fn hoisted_vars_in(stmt: &Stmt, out: &mut Vec<String>) {
    match stmt {
        Stmt::Var(decl) if decl.kind == VarKind::Var => {
            for declarator in &decl.decls {
                bound_names(&declarator.name, out);
            }
        }
        Stmt::Block(stmts) => hoisted_vars(stmts, out),
        Stmt::If(if_stmt) => {
            hoisted_vars_in(&if_stmt.cons, out);
            if let Some(alt) = &if_stmt.alt {
                hoisted_vars_in(alt, out);
            }
        }
        Stmt::For(for_stmt) => {
            if let Some(ForInit::Var(decl)) = &for_stmt.init {
                if decl.kind == VarKind::Var {
                    for declarator in &decl.decls {
                        bound_names(&declarator.name, out);
                    }
                }
            }
            hoisted_vars_in(&for_stmt.body, out);
        }
        Stmt::ForIn(for_in) => {
            if let ForHead::Var(VarKind::Var, pat) = &for_in.head {
                bound_names(pat, out);
            }
            hoisted_vars_in(&for_in.body, out);
        }
        Stmt::While { body, .. }
        | Stmt::DoWhile { body, .. }
        | Stmt::With { body, .. }
        | Stmt::Labeled { body, .. } => hoisted_vars_in(body, out),
        Stmt::Switch(switch) => {
            for case in &switch.cases {
                hoisted_vars(&case.body, out);
            }
        }
        Stmt::Try(try_stmt) => {
            hoisted_vars(&try_stmt.block, out);
            if let Some(handler) = &try_stmt.handler {
                hoisted_vars(&handler.body, out);
            }
            if let Some(finalizer) = &try_stmt.finalizer {
                hoisted_vars(finalizer, out);
            }
        }
        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct Recorder(Vec<(String, Option<BindingId>)>);

    impl IdentSink for Recorder {
        fn occurrence(&mut self, name: &mut String, binding: Option<BindingId>) {
            self.0.push((name.clone(), binding));
        }
    }

    fn record(source: &str) -> Walked<Recorder> {
        let mut program = untangle_front::parse(source).unwrap();
        ScopeWalker::walk(&mut program, Recorder::default())
    }

    fn occurrences(walked: &Walked<Recorder>) -> Vec<(&str, Option<BindingId>)> {
        walked
            .sink
            .0
            .iter()
            .map(|(name, binding)| (name.as_str(), *binding))
            .collect()
    }

    #[test]
    fn test_block_shadowing() {
        let walked = record("let a = 1; { let a = 2; f(a); } f(a);");
        assert_eq!(
            occurrences(&walked),
            vec![
                ("a", Some(0)),
                ("a", Some(1)),
                ("f", None),
                ("a", Some(1)),
                ("f", None),
                ("a", Some(0)),
            ]
        );
    }

    #[test]
    fn test_hoisting() {
        let walked = record("g(x); function g(p) { if (p) { var x; } return x; } var x;");
        let bindings: Vec<_> = walked
            .tree
            .bindings()
            .iter()
            .map(|binding| (binding.name.as_str(), binding.kind))
            .collect();
        assert_eq!(
            bindings,
            vec![
                ("x", BindingKind::Variable),
                ("g", BindingKind::Function),
                ("p", BindingKind::Variable),
                ("x", BindingKind::Variable),
            ]
        );
        // `return x` inside `g` sees the inner hoisted `var x`.
        assert_eq!(walked.sink.0.get(5), Some(&("x".to_owned(), Some(3))));
    }

    #[test]
    fn test_eval_and_with_are_dynamic() {
        let walked = record("function f() { var a; eval(s); } function g() { var b; }");
        let dynamic: Vec<_> = (0..walked.tree.bindings().len())
            .map(|binding| walked.tree.is_dynamic(binding))
            .collect();
        // f, g and a are in scopes `eval` can see; b is not.
        assert_eq!(dynamic, vec![true, true, true, false]);

        let walked = record("var o; with (o) { x; }");
        assert!(walked.tree.is_dynamic(0));
    }

    #[test]
    fn test_catch_param_scope() {
        let walked = record("try { t(); } catch (e) { h(e); } e;");
        let resolved: Vec<_> = occurrences(&walked)
            .into_iter()
            .filter(|(name, _)| *name == "e")
            .map(|(_, binding)| binding)
            .collect();
        assert_eq!(resolved, vec![Some(0), Some(0), None]);
    }
}
