//! Rule registry and selection.
//!
//! The registry owns every known rule. A [`RuleSelection`] picks the rules
//! taking part in a run and fixes their order:
//!
//! 1. default-enabled rules, plus the ones named in `enable`
//! 2. narrowed to `include` when it is non-empty
//! 3. minus `exclude`
//! 4. sorted by position in `order` (unlisted rules last, ties by phase),
//!    or by phase when no order is given
//!
//! Names are exact, or a prefix when they end in `*` (`"loops/*"`). Unknown
//! names match nothing.

use serde::{Deserialize, Serialize};

use crate::rule::Rule;

#[derive(Clone, Debug, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct RuleSelection {
    pub include: Vec<String>,
    pub exclude: Vec<String>,
    /// Default-disabled rules to run anyway.
    pub enable: Vec<String>,
    pub order: Option<Vec<String>>,
    pub max_passes: usize,
}

impl Default for RuleSelection {
    fn default() -> Self {
        Self {
            include: Vec::new(),
            exclude: Vec::new(),
            enable: Vec::new(),
            order: None,
            max_passes: 3,
        }
    }
}

/// Summary of one rule, for listings.
#[derive(Clone, Debug, Serialize, PartialEq, Eq)]
pub struct RuleInfo {
    pub name: &'static str,
    pub phase: i32,
    pub enabled_by_default: bool,
    pub description: &'static str,
}

#[derive(Default)]
pub struct RuleRegistry {
    rules: Vec<Box<dyn Rule>>,
}

impl RuleRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry holding the full rule library.
    pub fn builtin() -> Self {
        crate::rules::builtin_rules()
    }

    pub fn with_rule<R>(mut self, rule: R) -> Self
    where
        R: Rule + 'static,
    {
        self.rules.push(Box::new(rule));
        self
    }

    pub fn get(&self, name: &str) -> Option<&dyn Rule> {
        self.rules
            .iter()
            .find(|rule| rule.name() == name)
            .map(|rule| rule.as_ref())
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    pub fn select(&self, selection: &RuleSelection) -> Vec<&dyn Rule> {
        let mut selected: Vec<&dyn Rule> = self
            .rules
            .iter()
            .map(|rule| rule.as_ref())
            .filter(|rule| rule.enabled_by_default() || matches_any(rule.name(), &selection.enable))
            .filter(|rule| {
                selection.include.is_empty() || matches_any(rule.name(), &selection.include)
            })
            .filter(|rule| !matches_any(rule.name(), &selection.exclude))
            .collect();

        match &selection.order {
            Some(order) => selected.sort_by_key(|rule| {
                let position = order
                    .iter()
                    .position(|pattern| matches(rule.name(), pattern))
                    .unwrap_or(usize::MAX);
                (position, rule.phase())
            }),
            None => selected.sort_by_key(|rule| rule.phase()),
        }
        selected
    }

    /// Every rule, in phase order.
    pub fn describe(&self) -> Vec<RuleInfo> {
        let mut infos: Vec<RuleInfo> = self
            .rules
            .iter()
            .map(|rule| RuleInfo {
                name: rule.name(),
                phase: rule.phase(),
                enabled_by_default: rule.enabled_by_default(),
                description: rule.description(),
            })
            .collect();
        infos.sort_by_key(|info| info.phase);
        infos
    }
}

fn matches(name: &str, pattern: &str) -> bool {
    match pattern.strip_suffix('*') {
        Some(prefix) => name.starts_with(prefix),
        None => name == pattern,
    }
}

fn matches_any(name: &str, patterns: &[String]) -> bool {
    patterns.iter().any(|pattern| matches(name, pattern))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::RunContext;
    use crate::error::RuleResult;
    use untangle_ast::Program;

    struct Named {
        name: &'static str,
        phase: i32,
        default: bool,
    }

    impl Rule for Named {
        fn name(&self) -> &'static str {
            self.name
        }

        fn phase(&self) -> i32 {
            self.phase
        }

        fn enabled_by_default(&self) -> bool {
            self.default
        }

        fn description(&self) -> &'static str {
            "test rule"
        }

        fn run(&self, _program: &mut Program, _ctx: &mut RunContext) -> RuleResult<usize> {
            Ok(0)
        }
    }

    fn rule(name: &'static str, phase: i32) -> Named {
        Named {
            name,
            phase,
            default: true,
        }
    }

    fn registry() -> RuleRegistry {
        RuleRegistry::new()
            .with_rule(rule("b/late", 20))
            .with_rule(rule("a/early", 5))
            .with_rule(rule("a/middle", 10))
            .with_rule(rule("c/tied", 10))
            .with_rule(Named {
                name: "c/off",
                phase: 1,
                default: false,
            })
    }

    fn names(rules: &[&dyn Rule]) -> Vec<&'static str> {
        rules.iter().map(|rule| rule.name()).collect()
    }

    #[test]
    fn test_default_order_is_by_phase_then_registration() {
        let registry = registry();
        let selected = registry.select(&RuleSelection::default());
        assert_eq!(names(&selected), ["a/early", "a/middle", "c/tied", "b/late"]);
    }

    #[test]
    fn test_include_exclude_and_enable() {
        let registry = registry();
        let selection = RuleSelection {
            include: vec!["a/*".into(), "c/*".into()],
            exclude: vec!["a/middle".into()],
            enable: vec!["c/off".into()],
            ..RuleSelection::default()
        };
        let selected = registry.select(&selection);
        assert_eq!(names(&selected), ["c/off", "a/early", "c/tied"]);
    }

    #[test]
    fn test_explicit_order_with_phase_tiebreak() {
        let registry = registry();
        let selection = RuleSelection {
            order: Some(vec!["b/late".into(), "a/early".into()]),
            ..RuleSelection::default()
        };
        let selected = registry.select(&selection);
        assert_eq!(names(&selected), ["b/late", "a/early", "a/middle", "c/tied"]);
    }

    #[test]
    fn test_unknown_names_match_nothing() {
        let registry = registry();
        let selection = RuleSelection {
            include: vec!["nope/rule".into()],
            ..RuleSelection::default()
        };
        assert!(registry.select(&selection).is_empty());
    }

    #[test]
    fn test_selection_deserializes_with_defaults() {
        let selection: RuleSelection =
            serde_json::from_str(r#"{ "exclude": ["variables/*"] }"#).unwrap();
        assert_eq!(selection.max_passes, 3);
        assert_eq!(selection.exclude, ["variables/*"]);
        assert_eq!(selection.order, None);
    }
}
