//! Binding analysis and renaming.

mod rename;
mod scope;

pub use rename::Rename;
