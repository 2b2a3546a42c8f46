//! Multi-pass fixpoint driver.
//!
//! ## Execution
//!
//! ```text
//! for pass in 1..=max_passes
//!     for rule in selected rules (in order)
//!         checkpoint ─► rule.run ─► edits / rollback
//!     stop when the pass made no edits
//! ```
//!
//! A rule that errors or panics is rolled back to the checkpoint taken just
//! before it ran, counts as zero edits, and the run continues with the next
//! rule. Running out of passes is not an error.

use std::panic::{self, AssertUnwindSafe};

use serde::Serialize;
use untangle_ast::Program;

use crate::context::RunContext;
use crate::error::{RuleError, RuleResult};
use crate::rule::Rule;

/// One rule invocation that changed the tree.
#[derive(Clone, Debug, Serialize, PartialEq, Eq)]
pub struct TraceEntry {
    pub rule: String,
    pub pass: usize,
    pub edits: usize,
}

/// One rule invocation that was rolled back.
#[derive(Clone, Debug, Serialize, PartialEq, Eq)]
pub struct RuleFailure {
    pub rule: String,
    pub pass: usize,
    pub message: String,
}

#[derive(Clone, Debug, Default, Serialize)]
pub struct PipelineResult {
    pub trace: Vec<TraceEntry>,
    pub failures: Vec<RuleFailure>,
    /// Passes actually run, including the final quiet one.
    pub passes: usize,
    /// Whether a pass made no edits before the pass limit.
    pub reached_fixpoint: bool,
}

impl PipelineResult {
    pub fn total_edits(&self) -> usize {
        self.trace.iter().map(|entry| entry.edits).sum()
    }
}

/// Receives the tree after every rule invocation with edits.
pub trait PassObserver {
    fn rule_applied(&mut self, entry: &TraceEntry, program: &Program);
}

pub struct Pipeline<'r> {
    rules: Vec<&'r dyn Rule>,
    max_passes: usize,
}

impl<'r> Pipeline<'r> {
    pub fn new(rules: Vec<&'r dyn Rule>, max_passes: usize) -> Self {
        Self { rules, max_passes }
    }

    pub fn run(
        &self,
        program: &mut Program,
        ctx: &mut RunContext,
        mut observer: Option<&mut dyn PassObserver>,
    ) -> PipelineResult {
        let mut result = PipelineResult::default();

        for pass in 1..=self.max_passes {
            result.passes = pass;
            let mut pass_edits = 0;

            for rule in &self.rules {
                let checkpoint = program.clone();
                let edits = match run_guarded(*rule, program, ctx) {
                    Ok(edits) => edits,
                    Err(error) => {
                        tracing::warn!(
                            rule = rule.name(),
                            pass,
                            %error,
                            "rule failed, rolled back"
                        );
                        *program = checkpoint;
                        result.failures.push(RuleFailure {
                            rule: rule.name().to_owned(),
                            pass,
                            message: error.to_string(),
                        });
                        0
                    }
                };
                if edits == 0 {
                    continue;
                }

                tracing::debug!(rule = rule.name(), pass, edits, "rule applied");
                pass_edits += edits;
                let entry = TraceEntry {
                    rule: rule.name().to_owned(),
                    pass,
                    edits,
                };
                if let Some(observer) = observer.as_deref_mut() {
                    observer.rule_applied(&entry, program);
                }
                result.trace.push(entry);
            }

            if pass_edits == 0 {
                tracing::info!(passes = pass, "reached fixpoint");
                result.reached_fixpoint = true;
                return result;
            }
        }

        tracing::info!(passes = self.max_passes, "pass limit reached");
        result
    }
}

fn run_guarded(rule: &dyn Rule, program: &mut Program, ctx: &mut RunContext) -> RuleResult<usize> {
    match panic::catch_unwind(AssertUnwindSafe(|| rule.run(program, ctx))) {
        Ok(result) => result,
        Err(payload) => {
            let message = payload
                .downcast_ref::<&str>()
                .map(|s| s.to_string())
                .or_else(|| payload.downcast_ref::<String>().cloned())
                .unwrap_or_else(|| "unknown panic".to_owned());
            Err(RuleError::panicked(message))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use untangle_ast::{Expr, Stmt, print_program};

    /// Removes one `debugger;` per run.
    struct RemoveOne;

    impl Rule for RemoveOne {
        fn name(&self) -> &'static str {
            "test/remove-one"
        }

        fn description(&self) -> &'static str {
            "removes one debugger statement"
        }

        fn run(&self, program: &mut Program, _ctx: &mut RunContext) -> RuleResult<usize> {
            match program.body.iter().position(|s| matches!(s, Stmt::Debugger)) {
                Some(index) => {
                    program.body.remove(index);
                    Ok(1)
                }
                None => Ok(0),
            }
        }
    }

    /// Clears the program, then fails.
    struct Vandal {
        panic: bool,
    }

    impl Rule for Vandal {
        fn name(&self) -> &'static str {
            "test/vandal"
        }

        fn description(&self) -> &'static str {
            "breaks things"
        }

        fn run(&self, program: &mut Program, _ctx: &mut RunContext) -> RuleResult<usize> {
            program.body.clear();
            if self.panic {
                panic!("vandal panicked");
            }
            Err(RuleError::internal("vandal failed"))
        }
    }

    struct Recorder(Vec<(String, usize)>);

    impl PassObserver for Recorder {
        fn rule_applied(&mut self, entry: &TraceEntry, program: &Program) {
            self.0.push((entry.rule.clone(), program.body.len()));
        }
    }

    fn debuggers(n: usize) -> Program {
        let mut body = vec![Stmt::Debugger; n];
        body.push(Stmt::Expr(Expr::ident("keep")));
        Program {
            hashbang: None,
            body,
        }
    }

    #[test]
    fn test_stops_at_fixpoint() {
        let rule = RemoveOne;
        let mut program = debuggers(2);
        let result = Pipeline::new(vec![&rule as &dyn Rule], 10).run(
            &mut program,
            &mut RunContext::new(),
            None,
        );
        assert!(result.reached_fixpoint);
        assert_eq!(result.passes, 3);
        assert_eq!(result.total_edits(), 2);
        assert_eq!(
            result.trace,
            vec![
                TraceEntry {
                    rule: "test/remove-one".into(),
                    pass: 1,
                    edits: 1
                },
                TraceEntry {
                    rule: "test/remove-one".into(),
                    pass: 2,
                    edits: 1
                },
            ]
        );
    }

    #[test]
    fn test_pass_limit_is_not_an_error() {
        let rule = RemoveOne;
        let mut program = debuggers(5);
        let result = Pipeline::new(vec![&rule as &dyn Rule], 3).run(
            &mut program,
            &mut RunContext::new(),
            None,
        );
        assert!(!result.reached_fixpoint);
        assert_eq!(result.passes, 3);
        assert_eq!(program.body.len(), 3);
    }

    #[test]
    fn test_failing_rules_are_rolled_back() {
        for panic in [false, true] {
            let vandal = Vandal { panic };
            let remove = RemoveOne;
            let mut program = debuggers(1);
            let result = Pipeline::new(vec![&vandal as &dyn Rule, &remove], 3).run(
                &mut program,
                &mut RunContext::new(),
                None,
            );
            assert_eq!(print_program(&program), "keep;\n");
            assert_eq!(result.failures.len(), 2);
            assert_eq!(result.failures[0].rule, "test/vandal");
            assert!(result.reached_fixpoint);
        }
    }

    #[test]
    fn test_observer_sees_tree_after_each_rule() {
        let rule = RemoveOne;
        let mut program = debuggers(2);
        let mut recorder = Recorder(Vec::new());
        Pipeline::new(vec![&rule as &dyn Rule], 3).run(
            &mut program,
            &mut RunContext::new(),
            Some(&mut recorder),
        );
        assert_eq!(
            recorder.0,
            vec![
                ("test/remove-one".to_owned(), 2),
                ("test/remove-one".to_owned(), 1)
            ]
        );
    }
}
