//! Literal and expression simplification rules.

mod binary_fold;
mod comma_split;
mod number_format;
mod property_access;
mod sequence_flatten;
mod simplify;
mod ternary_fold;
mod unary_fold;

pub use binary_fold::BinaryFold;
pub use comma_split::CommaSplit;
pub use number_format::NumberFormat;
pub use property_access::PropertyAccess;
pub use sequence_flatten::SequenceFlatten;
pub use simplify::Simplify;
pub use ternary_fold::TernaryFold;
pub use unary_fold::UnaryFold;
