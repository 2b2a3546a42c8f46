//! Slot-replacing rewrite infrastructure.
//!
//! # Overview
//!
//! - [`StmtPattern`] / [`ExprPattern`]: match one node and produce its
//!   replacement
//! - [`PatternApplicator`]: walks a program bottom-up, offers every node to
//!   the patterns and writes the results back into the parent's slot
//!
//! Most rules are a single pattern plus an applicator. Rules that need to
//! see a whole statement list or the whole program at once implement
//! [`VisitMut`](untangle_ast::VisitMut) themselves.

mod applicator;
mod pattern;
mod result;

pub use applicator::PatternApplicator;
pub use pattern::{ExprPattern, StmtPattern};
pub use result::RewriteResult;
