//! The JavaScript syntax tree.
//!
//! Every node kind is a closed enum and every child is owned by exactly one
//! parent slot, so a rewrite is always "replace the value in this slot".
//! Constructs the tree does not model are kept as `Raw` source text.

mod expr;
mod lit;
mod pat;
mod stmt;

pub use expr::*;
pub use lit::*;
pub use pat::*;
pub use stmt::*;

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Ident {
    pub name: String,
}

impl Ident {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Function {
    pub name: Option<Ident>,
    pub params: Vec<Pat>,
    pub body: Vec<Stmt>,
    pub is_async: bool,
    pub is_generator: bool,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Class {
    pub name: Option<Ident>,
    pub super_class: Option<Box<Expr>>,
    pub members: Vec<ClassMember>,
}

#[derive(Clone, Debug, PartialEq)]
pub enum ClassMember {
    Method {
        is_static: bool,
        method: MethodProp,
    },
    Field {
        is_static: bool,
        key: PropKey,
        value: Option<Expr>,
    },
    StaticBlock(Vec<Stmt>),
}

/// A whole script.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Program {
    /// `#!` line, without the trailing newline.
    pub hashbang: Option<String>,
    pub body: Vec<Stmt>,
}
