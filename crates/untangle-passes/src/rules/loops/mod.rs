//! Loops that never iterate, or iterate to no effect.

mod for_simplify;
mod while_do;

pub use for_simplify::ForSimplify;
pub use while_do::WhileDoSimplify;
