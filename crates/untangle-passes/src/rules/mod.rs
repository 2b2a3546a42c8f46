//! The rule library.
//!
//! Rules are grouped by what they undo:
//!
//! - [`expressions`]: constant folding, sequences, literal and member forms
//! - [`strings`]: escaped literals and encoded-string calls
//! - [`control`]: literal branches and switch-dispatch state machines
//! - [`loops`]: loops that never iterate
//! - [`switch`]: switches over a literal
//! - [`optimization`]: dead and unreachable code
//! - [`variables`]: generated binding names

pub mod control;
pub mod expressions;
mod flow;
pub mod loops;
pub mod optimization;
pub mod strings;
pub mod switch;
pub mod variables;

use untangle_ast::{Pat, Stmt};

use crate::registry::RuleRegistry;
use crate::rewrite::RewriteResult;

pub(crate) fn builtin_rules() -> RuleRegistry {
    RuleRegistry::new()
        .with_rule(control::LoopNormalize)
        .with_rule(expressions::CommaSplit)
        .with_rule(expressions::SequenceFlatten)
        .with_rule(strings::DecodeEscapes)
        .with_rule(strings::EncodedCalls)
        .with_rule(expressions::NumberFormat)
        .with_rule(expressions::Simplify)
        .with_rule(expressions::UnaryFold)
        .with_rule(expressions::BinaryFold)
        .with_rule(expressions::TernaryFold)
        .with_rule(expressions::PropertyAccess)
        .with_rule(control::Unflatten)
        .with_rule(control::IfElseSimplify)
        .with_rule(loops::ForSimplify)
        .with_rule(loops::WhileDoSimplify)
        .with_rule(switch::SwitchSimplify)
        .with_rule(optimization::DeadCode)
        .with_rule(optimization::Unreachable)
        .with_rule(optimization::EmptyStatements)
        .with_rule(variables::Rename)
}

/// Names like `_0x4f2a`, as emitted for string-decoder functions.
pub(crate) fn is_encoded_callee(name: &str) -> bool {
    name.strip_prefix("_0x")
        .is_some_and(|hex| !hex.is_empty() && hex.chars().all(|c| c.is_ascii_hexdigit()))
}

/// Names an obfuscator is likely to have produced: a `_0x` prefix, or at
/// least 10 characters of which 3 or more, and at least a quarter, are
/// underscores.
pub(crate) fn is_generated_name(name: &str) -> bool {
    if name.starts_with("_0x") {
        return true;
    }
    let len = name.chars().count();
    let underscores = name.chars().filter(|&c| c == '_').count();
    len >= 10 && underscores >= 3 && underscores * 4 >= len
}

/// Put a taken branch where its `if` (or loop) was. Blocks are opened up
/// unless they hold lexical declarations.
pub(crate) fn inline_branch(branch: Stmt) -> RewriteResult<Stmt> {
    match branch {
        Stmt::Block(stmts) if !stmts.iter().any(Stmt::is_lexical_decl) => {
            RewriteResult::Expand(stmts)
        }
        Stmt::Empty => RewriteResult::Erase,
        other => RewriteResult::Replace(other),
    }
}

/// Names bound by a declaration pattern, in source order.
pub(crate) fn bound_names(pat: &Pat, out: &mut Vec<String>) {
    match pat {
        Pat::Ident(ident) => out.push(ident.name.clone()),
        Pat::Array(elems) => {
            for elem in elems.iter().flatten() {
                bound_names(elem, out);
            }
        }
        Pat::Object(props) => {
            for prop in props {
                match prop {
                    untangle_ast::ObjectPatProp::KeyValue { value, .. } => bound_names(value, out),
                    untangle_ast::ObjectPatProp::Rest(rest) => bound_names(rest, out),
                }
            }
        }
        Pat::Assign { left, .. } => bound_names(left, out),
        Pat::Rest(inner) => bound_names(inner, out),
        Pat::Expr(_) => {}
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    use untangle_ast::print_program;

    use crate::context::RunContext;
    use crate::rule::Rule;

    fn parse(source: &str) -> untangle_ast::Program {
        untangle_front::parse(source).expect("test source should parse")
    }

    /// Parse and print without rewriting.
    pub(crate) fn reprint(source: &str) -> String {
        print_program(&parse(source))
    }

    /// Run `rule` once over `source` and print the result.
    pub(crate) fn apply_rule(rule: &dyn Rule, source: &str) -> String {
        let mut program = parse(source);
        rule.run(&mut program, &mut RunContext::new())
            .expect("rule should succeed");
        print_program(&program)
    }

    /// A second run over a rule's own output makes no edits.
    pub(crate) fn assert_idempotent(rule: &dyn Rule, source: &str) {
        let mut program = parse(source);
        let mut ctx = RunContext::new();
        rule.run(&mut program, &mut ctx).expect("first run should succeed");
        let printed = print_program(&program);
        let edits = rule.run(&mut program, &mut ctx).expect("second run should succeed");
        assert_eq!(
            edits,
            0,
            "{} is not idempotent on:\n{printed}",
            rule.name()
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_rules_have_unique_names() {
        let infos = builtin_rules().describe();
        assert_eq!(infos.len(), 20);
        let mut names: Vec<_> = infos.iter().map(|info| info.name).collect();
        names.sort_unstable();
        names.dedup();
        assert_eq!(names.len(), 20);
    }

    #[test]
    fn test_name_heuristics() {
        assert!(is_encoded_callee("_0x4f2a"));
        assert!(!is_encoded_callee("_0x"));
        assert!(!is_encoded_callee("_0xzz"));

        assert!(is_generated_name("_0xabc"));
        assert!(is_generated_name("a__b__c__d"));
        assert!(!is_generated_name("some_long_name"));
        assert!(!is_generated_name("a_b_c"));
    }

    #[test]
    fn test_bound_names() {
        let program = untangle_front::parse("var [a, { b, c: d = 1 }, ...e] = xs;").unwrap();
        let Some(Stmt::Var(decl)) = program.body.first() else {
            panic!("expected a declaration");
        };
        let mut names = Vec::new();
        bound_names(&decl.decls[0].name, &mut names);
        assert_eq!(names, ["a", "b", "d", "e"]);
    }
}
