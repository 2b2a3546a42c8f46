//! JavaScript syntax tree for the untangle deobfuscator.
//!
//! - [`ast`]: closed node enums; every child is owned by one parent slot
//! - [`visit`]: exhaustive mutable traversal
//! - [`print`]: canonical source printer
//! - [`text`]: literal text conversions shared by the parser, printer and
//!   constant evaluator

pub mod ast;
pub mod print;
pub mod text;
pub mod visit;

pub use ast::*;
pub use print::{print_expr, print_program, print_stmt};
pub use visit::VisitMut;
