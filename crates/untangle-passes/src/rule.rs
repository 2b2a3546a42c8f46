//! The rule interface.

use untangle_ast::Program;

use crate::context::RunContext;
use crate::error::RuleResult;

/// A named, phase-ordered tree transform.
///
/// Rules are stateless; anything that must survive between invocations
/// lives in the [`RunContext`]. Running a rule on its own output must
/// report zero edits.
pub trait Rule: Send + Sync {
    /// Unique `family/rule` name.
    fn name(&self) -> &'static str;

    /// Ordering key; lower runs earlier.
    fn phase(&self) -> i32 {
        0
    }

    fn enabled_by_default(&self) -> bool {
        true
    }

    fn description(&self) -> &'static str;

    /// Rewrite `program` in place and return the number of edits made.
    fn run(&self, program: &mut Program, ctx: &mut RunContext) -> RuleResult<usize>;
}
