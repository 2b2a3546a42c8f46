//! Local expression cleanups.
//!
//! - pure leading elements of a sequence are dropped: `(0, a, f())` → `f()`
//! - a one-element sequence becomes its element
//! - `void <literal>` → `undefined`
//! - grouping parentheses are removed; the printer puts back the ones the
//!   precedence requires
//!
//! A sequence in callee position ending in a member access, such as
//! `(0, obj.method)(x)`, calls the method without `obj` as `this` and is
//! kept. `(0, eval)(x)` is an indirect eval and is kept for the same reason.
//! Parentheses that end an optional chain (`(a?.b).c`) are kept too.
//!
//! A string statement left bare by these cleanups, `("use strict");` → a
//! lone string, still prints parenthesized, so it never turns into a
//! directive.

use untangle_ast::visit::{VisitMut, walk_expr};
use untangle_ast::{Expr, Program, UnaryOp};

use crate::context::RunContext;
use crate::error::RuleResult;
use crate::rule::Rule;

pub struct Simplify;

impl Rule for Simplify {
    fn name(&self) -> &'static str {
        "expressions/simplify"
    }

    fn phase(&self) -> i32 {
        8
    }

    fn description(&self) -> &'static str {
        "Drop pure sequence elements, void literals and redundant parentheses"
    }

    fn run(&self, program: &mut Program, _ctx: &mut RunContext) -> RuleResult<usize> {
        let mut simplifier = Simplifier { edits: 0 };
        simplifier.visit_program(program);
        Ok(simplifier.edits)
    }
}

struct Simplifier {
    edits: usize,
}

impl Simplifier {
    fn simplify(&mut self, expr: &mut Expr, keep_sequence: bool) {
        loop {
            let replacement = match expr {
                Expr::Paren(inner) if !is_optional_chain(inner) => inner.take(),
                Expr::Seq(items) if !keep_sequence => {
                    let Some(simplified) = simplify_sequence(items) else {
                        return;
                    };
                    simplified
                }
                Expr::Unary {
                    op: UnaryOp::Void,
                    arg,
                } if matches!(arg.peel_parens(), Expr::Lit(_)) => Expr::undefined(),
                _ => return,
            };
            *expr = replacement;
            self.edits += 1;
        }
    }
}

impl VisitMut for Simplifier {
    fn visit_expr(&mut self, expr: &mut Expr) {
        if let Expr::Call(call) = expr {
            if is_method_detach(&call.callee) {
                // Only the sequence's elements are simplified; the
                // sequence itself stays.
                let Expr::Seq(items) = call.callee.peel_parens_mut() else {
                    return;
                };
                for item in items.iter_mut() {
                    self.visit_expr(item);
                }
                self.simplify(&mut call.callee, true);
                for arg in &mut call.args {
                    self.visit_expr(arg);
                }
                return;
            }
        }
        walk_expr(self, expr);
        self.simplify(expr, false);
    }
}

/// `(0, obj.method)`, `(0, eval)` and similar: a sequence whose last element
/// is a member access or `eval`, preceded by at least one other element.
fn is_method_detach(callee: &Expr) -> bool {
    let Expr::Seq(items) = callee.peel_parens() else {
        return false;
    };
    match items.last() {
        Some(Expr::Member(_)) => items.len() > 1,
        Some(Expr::Ident(ident)) => items.len() > 1 && ident.name == "eval",
        _ => false,
    }
}

fn is_optional_chain(expr: &Expr) -> bool {
    match expr {
        Expr::Member(member) => member.optional || is_optional_chain(&member.object),
        Expr::Call(call) => call.optional || is_optional_chain(&call.callee),
        _ => false,
    }
}

fn is_droppable(expr: &Expr) -> bool {
    expr.is_pure() || expr.is_void_literal()
}

/// `None` when the sequence is already as small as it gets.
fn simplify_sequence(items: &mut Vec<Expr>) -> Option<Expr> {
    let (_, leading) = items.split_last()?;
    let droppable = leading.iter().filter(|item| is_droppable(item)).count();
    if droppable == 0 && items.len() > 1 {
        return None;
    }
    let mut kept: Vec<Expr> = Vec::with_capacity(items.len() - droppable);
    let last_index = items.len() - 1;
    for (index, item) in items.drain(..).enumerate() {
        if index == last_index || !is_droppable(&item) {
            kept.push(item);
        }
    }
    if kept.len() == 1 {
        kept.pop()
    } else {
        Some(Expr::Seq(kept))
    }
}

#[cfg(test)]
mod tests {
    use crate::rules::test_support::{apply_rule, assert_idempotent};

    use super::Simplify;

    #[test]
    fn test_drops_pure_leading_elements() {
        assert_eq!(apply_rule(&Simplify, "x = (0, a, f());"), "x = f();\n");
        assert_eq!(apply_rule(&Simplify, "x = (g(), 1, f());"), "x = (g(), f());\n");
        assert_eq!(apply_rule(&Simplify, "x = (void 0, y);"), "x = y;\n");
    }

    #[test]
    fn test_void_literal() {
        assert_eq!(apply_rule(&Simplify, "x = void 0;"), "x = undefined;\n");
        assert_eq!(apply_rule(&Simplify, "x = void f();"), "x = void f();\n");
    }

    #[test]
    fn test_removes_parentheses() {
        assert_eq!(apply_rule(&Simplify, "x = ((a)) + (b * c);"), "x = a + b * c;\n");
        assert_eq!(apply_rule(&Simplify, "x = (a + b) * c;"), "x = (a + b) * c;\n");
    }

    #[test]
    fn test_keeps_method_detach_and_optional_chains() {
        assert_eq!(apply_rule(&Simplify, "(0, obj.method)(x);"), "(0, obj.method)(x);\n");
        assert_eq!(apply_rule(&Simplify, "(0, fn)(x);"), "fn(x);\n");
        assert_eq!(apply_rule(&Simplify, r#"(0, eval)("1");"#), "(0, eval)(\"1\");\n");
        assert_eq!(apply_rule(&Simplify, "x = (a?.b).c;"), "x = (a?.b).c;\n");
    }

    #[test]
    fn test_string_statement_stays_an_expression() {
        assert_eq!(
            apply_rule(&Simplify, r#"function f() { (("use strict")); g(); }"#),
            "function f() {\n  (\"use strict\");\n  g();\n}\n"
        );
        assert_eq!(
            apply_rule(&Simplify, r#"function f() { "use strict"; g(); }"#),
            "function f() {\n  \"use strict\";\n  g();\n}\n"
        );
    }

    #[test]
    fn test_idempotent() {
        assert_idempotent(
            &Simplify,
            "x = (0, a, (b, c)); (0, o.m)(void 0); (0, eval)(s); y = (a?.b).c;",
        );
    }
}
