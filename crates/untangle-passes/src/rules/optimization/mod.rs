//! Removal of code that cannot run or does nothing.

mod dead_code;
mod empty_statements;
mod unreachable;

pub use dead_code::DeadCode;
pub use empty_statements::EmptyStatements;
pub use unreachable::Unreachable;
