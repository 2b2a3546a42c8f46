//! Binding and assignment patterns.

use super::{Expr, Ident, PropKey};

#[derive(Clone, Debug, PartialEq)]
pub enum Pat {
    Ident(Ident),
    /// `[a, , b]`; `None` elements are holes.
    Array(Vec<Option<Pat>>),
    Object(Vec<ObjectPatProp>),
    /// `a = default`
    Assign {
        left: Box<Pat>,
        right: Box<Expr>,
    },
    /// `...rest`
    Rest(Box<Pat>),
    /// Member targets inside destructuring assignments (`[a.b] = xs`).
    Expr(Box<Expr>),
}

impl Pat {
    pub fn ident(name: impl Into<String>) -> Self {
        Pat::Ident(Ident::new(name))
    }

    /// Identifier bound by a simple pattern, if that is all it is.
    pub fn as_ident(&self) -> Option<&Ident> {
        match self {
            Pat::Ident(ident) => Some(ident),
            _ => None,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum ObjectPatProp {
    KeyValue {
        key: PropKey,
        value: Pat,
        shorthand: bool,
    },
    Rest(Pat),
}
