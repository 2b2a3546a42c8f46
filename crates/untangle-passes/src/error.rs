//! Error type for rule failures.
//!
//! A failing rule never aborts the pipeline: the driver rolls the tree back
//! and moves on to the next rule.

use derive_more::{Display, Error};

pub type RuleResult<T> = Result<T, RuleError>;

#[derive(Display, Debug, Error)]
#[display("{kind}")]
pub struct RuleError {
    kind: Box<RuleErrorKind>,
}

impl<E> From<E> for RuleError
where
    RuleErrorKind: From<E>,
{
    fn from(error: E) -> Self {
        RuleError {
            kind: Box::new(RuleErrorKind::from(error)),
        }
    }
}

impl RuleError {
    /// A rule found the tree in a state it cannot handle.
    pub fn internal(msg: impl std::fmt::Display) -> Self {
        RuleErrorKind::Internal(msg.to_string()).into()
    }

    /// Built by the driver from a caught panic payload.
    pub fn panicked(msg: impl std::fmt::Display) -> Self {
        RuleErrorKind::Panicked(msg.to_string()).into()
    }

    pub fn kind(&self) -> &RuleErrorKind {
        &self.kind
    }
}

#[derive(Display, Debug, PartialEq, Eq)]
pub enum RuleErrorKind {
    #[display("Internal rule error: {_0}")]
    Internal(String),

    #[display("Rule panicked: {_0}")]
    Panicked(String),
}
