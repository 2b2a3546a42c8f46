//! Rewrite rules and the pass driver for the untangle deobfuscator.
//!
//! This crate holds the rule library, the registry that selects and orders
//! rules, and the pipeline that runs them over a [`untangle_ast::Program`]
//! until nothing changes.
//!
//! ## Pipeline
//!
//! 1. [`RuleRegistry::select`] turns a [`RuleSelection`] into an ordered rule
//!    list.
//! 2. [`Pipeline::run`] applies every rule in order, pass after pass, until a
//!    whole pass makes no edits or the pass limit is reached.
//! 3. A rule that fails or panics is rolled back and recorded; the other
//!    rules keep running.

// === Infrastructure ===
pub mod context;
pub mod error;
pub mod eval;
pub mod rewrite;
pub mod rule;

// === Driver ===
pub mod pipeline;
pub mod registry;

// === Rule library ===
pub mod rules;

// Re-exports
pub use context::{DecodeTable, NameAllocator, RunContext};
pub use error::{RuleError, RuleErrorKind, RuleResult};
pub use pipeline::{PassObserver, Pipeline, PipelineResult, RuleFailure, TraceEntry};
pub use registry::{RuleInfo, RuleRegistry, RuleSelection};
pub use rule::Rule;
