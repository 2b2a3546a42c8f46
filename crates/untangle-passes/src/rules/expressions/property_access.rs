//! Computed string keys → identifier keys.
//!
//! `obj["name"]` → `obj.name`, `{ "a": 1, ["b"]: 2 }` → `{ a: 1, b: 2 }`,
//! and the same for methods and class members. Names must be ASCII
//! identifiers and not reserved words. Computed `__proto__` and
//! `constructor` keys mean something different from their identifier
//! forms and are kept.

use untangle_ast::text::is_identifier_name;
use untangle_ast::visit::{VisitMut, walk_expr, walk_prop_key};
use untangle_ast::{Expr, Lit, MemberProp, Program, PropKey};

use crate::context::RunContext;
use crate::error::RuleResult;
use crate::rule::Rule;

pub struct PropertyAccess;

impl Rule for PropertyAccess {
    fn name(&self) -> &'static str {
        "expressions/property-access"
    }

    fn phase(&self) -> i32 {
        12
    }

    fn description(&self) -> &'static str {
        "Turn computed string property names into dotted access and identifier keys"
    }

    fn run(&self, program: &mut Program, _ctx: &mut RunContext) -> RuleResult<usize> {
        let mut rewriter = PropertyRewriter { edits: 0 };
        rewriter.visit_program(program);
        Ok(rewriter.edits)
    }
}

const RESERVED_WORDS: &[&str] = &[
    "await", "break", "case", "catch", "class", "const", "continue", "debugger", "default",
    "delete", "do", "else", "enum", "export", "extends", "false", "finally", "for", "function",
    "if", "implements", "import", "in", "instanceof", "interface", "let", "new", "null",
    "package", "private", "protected", "public", "return", "static", "super", "switch", "this",
    "throw", "true", "try", "typeof", "var", "void", "while", "with", "yield",
];

fn usable_name(name: &str) -> bool {
    is_identifier_name(name) && !RESERVED_WORDS.contains(&name)
}

fn string_value(expr: &Expr) -> Option<&str> {
    match expr.as_lit()? {
        Lit::Str(s) => Some(&s.value),
        _ => None,
    }
}

struct PropertyRewriter {
    edits: usize,
}

impl VisitMut for PropertyRewriter {
    fn visit_expr(&mut self, expr: &mut Expr) {
        walk_expr(self, expr);
        let Expr::Member(member) = expr else {
            return;
        };
        let MemberProp::Computed(prop) = &member.prop else {
            return;
        };
        let Some(name) = string_value(prop).filter(|name| usable_name(name)) else {
            return;
        };
        member.prop = MemberProp::Ident(name.to_owned());
        self.edits += 1;
    }

    fn visit_prop_key(&mut self, key: &mut PropKey) {
        walk_prop_key(self, key);
        let name = match key {
            PropKey::Str(s) => &s.value,
            PropKey::Computed(expr) => match string_value(expr) {
                Some(name) if name != "__proto__" && name != "constructor" => name,
                _ => return,
            },
            _ => return,
        };
        if !usable_name(name) {
            return;
        }
        *key = PropKey::Ident(name.to_owned());
        self.edits += 1;
    }
}

#[cfg(test)]
mod tests {
    use crate::rules::test_support::{apply_rule, assert_idempotent};

    use super::PropertyAccess;

    #[test]
    fn test_member_access() {
        assert_eq!(apply_rule(&PropertyAccess, r#"a["b"]["c"](1);"#), "a.b.c(1);\n");
        assert_eq!(
            apply_rule(&PropertyAccess, r#"a["b-c"] = a["if"];"#),
            "a[\"b-c\"] = a[\"if\"];\n"
        );
        assert_eq!(apply_rule(&PropertyAccess, "a[0] = 1;"), "a[0] = 1;\n");
    }

    #[test]
    fn test_object_and_class_keys() {
        insta::assert_snapshot!(
            apply_rule(&PropertyAccess, r#"x = { "a": 1, ["b"]: 2, ["__proto__"]: p, "c d": 3 };"#),
            @r#"
        x = {
          a: 1,
          b: 2,
          ["__proto__"]: p,
          "c d": 3
        };
        "#
        );
        insta::assert_snapshot!(
            apply_rule(&PropertyAccess, r#"class A { ["run"]() {} ["constructor"]() {} }"#),
            @r#"
        class A {
          run() {}
          ["constructor"]() {}
        }
        "#
        );
    }

    #[test]
    fn test_idempotent() {
        assert_idempotent(&PropertyAccess, r#"a["x"]["y"] = { "k": a["z"] };"#);
    }
}
