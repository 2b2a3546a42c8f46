//! Renaming of generated-looking bindings.
//!
//! ## Pipeline
//!
//! 1. Walk the program once, recording every binding identifier and the
//!    binding it resolves to.
//! 2. Pick a fresh `func_N` / `var_N` for each binding whose name looks
//!    generated, unless its scope is reachable from `eval` or `with`, or
//!    raw source mentions the name.
//! 3. Walk again and replay the recorded resolutions, rewriting names.
//!
//! The second walk never resolves names itself: after a declaration is
//! renamed, lookups by name would no longer find it.

use std::collections::HashSet;

use untangle_ast::Program;

use super::scope::{BindingId, BindingKind, IdentSink, ScopeWalker, Walked};
use crate::context::RunContext;
use crate::error::{RuleError, RuleResult};
use crate::rule::Rule;
use crate::rules::is_generated_name;

pub struct Rename;

impl Rule for Rename {
    fn name(&self) -> &'static str {
        "variables/rename"
    }

    fn phase(&self) -> i32 {
        100
    }

    fn description(&self) -> &'static str {
        "Rename generated-looking bindings to var_N / func_N"
    }

    fn run(&self, program: &mut Program, ctx: &mut RunContext) -> RuleResult<usize> {
        let Walked {
            tree,
            raw,
            sink: Collector(occurrences),
        } = ScopeWalker::walk(program, Collector::default());

        let taken: HashSet<&str> = occurrences.iter().map(|(name, _)| name.as_str()).collect();
        let mut renames = vec![None; tree.bindings().len()];
        let mut renamed = 0;
        for (id, binding) in tree.bindings().iter().enumerate() {
            if !is_generated_name(&binding.name)
                || tree.is_dynamic(id)
                || raw.iter().any(|text| mentions(text, &binding.name))
            {
                continue;
            }
            let prefix = match binding.kind {
                BindingKind::Function => "func",
                BindingKind::Variable => "var",
            };
            let fresh = ctx.names().fresh(prefix, |name| taken.contains(name));
            tracing::trace!(from = %binding.name, to = %fresh, "renaming binding");
            renames[id] = Some(fresh);
            renamed += 1;
        }
        if renamed == 0 {
            return Ok(0);
        }

        let replay = Replay {
            occurrences: occurrences.iter(),
            renames: &renames,
            diverged: None,
        };
        let Walked { sink: replay, .. } = ScopeWalker::walk(program, replay);
        if let Some(name) = replay.diverged {
            return Err(RuleError::internal(format!(
                "rename replay diverged at `{name}`"
            )));
        }
        Ok(renamed)
    }
}

#[derive(Default)]
struct Collector(Vec<(String, Option<BindingId>)>);

impl IdentSink for Collector {
    fn occurrence(&mut self, name: &mut String, binding: Option<BindingId>) {
        self.0.push((name.clone(), binding));
    }
}

struct Replay<'a, I> {
    occurrences: I,
    renames: &'a [Option<String>],
    diverged: Option<String>,
}

impl<'a, I> IdentSink for Replay<'a, I>
where
    I: Iterator<Item = &'a (String, Option<BindingId>)>,
{
    fn occurrence(&mut self, name: &mut String, _binding: Option<BindingId>) {
        if self.diverged.is_some() {
            return;
        }
        match self.occurrences.next() {
            Some((recorded, binding)) if recorded == name => {
                let fresh = binding.and_then(|binding| self.renames.get(binding)?.as_ref());
                if let Some(fresh) = fresh {
                    name.clone_from(fresh);
                }
            }
            _ => self.diverged = Some(name.clone()),
        }
    }
}

/// Whether `name` occurs in `text` as a whole identifier.
fn mentions(text: &str, name: &str) -> bool {
    let is_ident_char = |c: char| c.is_alphanumeric() || c == '_' || c == '$';
    text.match_indices(name).any(|(start, _)| {
        let before = text[..start].chars().next_back();
        let after = text[start + name.len()..].chars().next();
        !before.is_some_and(is_ident_char) && !after.is_some_and(is_ident_char)
    })
}
