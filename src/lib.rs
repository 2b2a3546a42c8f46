//! untangle: a best-effort JavaScript deobfuscator.
//!
//! ## Pipeline
//!
//! ```text
//! source ─► untangle_front::parse ─► Program
//!        ─► RuleRegistry::select ─► Pipeline::run (fixpoint over passes)
//!        ─► untangle_ast::print_program ─► code
//! ```
//!
//! Parsing is the only step that can fail. Rules that fail are rolled back
//! and reported in [`PipelineResult::failures`].

pub mod config;
pub mod diagnostics;
pub mod snapshot;

use std::panic;
use std::sync::{Mutex, PoisonError};
use std::thread;

use untangle_ast::print_program;
use untangle_passes::{Pipeline, RuleRegistry};

pub use untangle_front::ParseError;
pub use untangle_passes::{
    DecodeTable, PassObserver, PipelineResult, RuleFailure, RuleInfo, RuleSelection, RunContext,
    TraceEntry,
};

/// What to run and with which inputs.
#[derive(Clone, Debug, Default)]
pub struct DeobfuscateOptions {
    pub selection: RuleSelection,
    /// Known results of string-decoder calls, keyed by `name(arg)`.
    pub decode_table: DecodeTable,
}

/// Output of one run.
#[derive(Clone, Debug)]
pub struct Deobfuscated {
    pub code: String,
    pub result: PipelineResult,
}

pub fn deobfuscate(source: &str, options: &DeobfuscateOptions) -> Result<Deobfuscated, ParseError> {
    deobfuscate_with_observer(source, options, None)
}

/// Stack of the thread a run executes on. Parsing, every rule and the
/// printer recurse once per nesting level, up to
/// [`untangle_front::MAX_NESTING_DEPTH`] levels.
const WORKER_STACK_SIZE: usize = 1 << 30;

/// Like [`deobfuscate`], reporting the tree to `observer` after every rule
/// invocation that made edits.
///
/// The run happens on a dedicated thread with a large stack, so deeply
/// nested input is either processed or rejected with a [`ParseError`].
pub fn deobfuscate_with_observer(
    source: &str,
    options: &DeobfuscateOptions,
    observer: Option<&mut (dyn PassObserver + Send)>,
) -> Result<Deobfuscated, ParseError> {
    let observer = Mutex::new(observer);
    let job = || {
        let mut observer = observer.lock().unwrap_or_else(PoisonError::into_inner);
        let observer = observer
            .as_deref_mut()
            .map(|observer| observer as &mut dyn PassObserver);
        run(source, options, observer)
    };

    thread::scope(|scope| {
        let worker = thread::Builder::new()
            .name("untangle-run".to_owned())
            .stack_size(WORKER_STACK_SIZE)
            .spawn_scoped(scope, job);
        match worker {
            Ok(handle) => handle
                .join()
                .unwrap_or_else(|payload| panic::resume_unwind(payload)),
            Err(err) => {
                tracing::warn!(%err, "failed to spawn worker thread, running in place");
                job()
            }
        }
    })
}

fn run(
    source: &str,
    options: &DeobfuscateOptions,
    observer: Option<&mut dyn PassObserver>,
) -> Result<Deobfuscated, ParseError> {
    let mut program = untangle_front::parse(source)?;

    let registry = RuleRegistry::builtin();
    let rules = registry.select(&options.selection);
    tracing::debug!(rules = rules.len(), "selected rules");

    let mut ctx = RunContext::with_decode_table(options.decode_table.clone());
    let result =
        Pipeline::new(rules, options.selection.max_passes).run(&mut program, &mut ctx, observer);

    Ok(Deobfuscated {
        code: print_program(&program),
        result,
    })
}

/// Every built-in rule, in phase order.
pub fn rules() -> Vec<RuleInfo> {
    RuleRegistry::builtin().describe()
}
