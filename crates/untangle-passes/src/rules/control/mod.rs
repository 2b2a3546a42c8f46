//! Control-flow reconstruction: literal branches, constant loop tests and
//! switch-dispatch state machines.

mod if_else;
mod loop_normalize;
mod unflatten;

pub use if_else::IfElseSimplify;
pub use loop_normalize::LoopNormalize;
pub use unflatten::Unflatten;
