//! Literal values.

use crate::text::number_to_string;

/// A string literal.
///
/// `raw` holds the source text including quotes. When it is `None` the
/// printer emits a canonical double-quoted form of `value`.
#[derive(Clone, Debug, PartialEq)]
pub struct JsStr {
    pub value: String,
    pub raw: Option<String>,
}

impl JsStr {
    pub fn new(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            raw: None,
        }
    }
}

/// A numeric literal. `raw` works like [`JsStr::raw`].
#[derive(Clone, Debug, PartialEq)]
pub struct JsNum {
    pub value: f64,
    pub raw: Option<String>,
}

impl JsNum {
    pub fn new(value: f64) -> Self {
        Self { value, raw: None }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum Lit {
    Str(JsStr),
    Num(JsNum),
    Bool(bool),
    Null,
    /// Source text of a BigInt literal, including the `n` suffix.
    BigInt(String),
    /// Source text of a regular expression literal.
    Regex(String),
}

impl Lit {
    pub fn str(value: impl Into<String>) -> Self {
        Lit::Str(JsStr::new(value))
    }

    pub fn num(value: f64) -> Self {
        Lit::Num(JsNum::new(value))
    }

    /// Statically known truthiness, if any.
    ///
    /// Booleans are themselves, numbers are false only for `0` and `NaN`,
    /// strings only when empty, and `null` is always false.
    pub fn truthiness(&self) -> Option<bool> {
        match self {
            Lit::Bool(b) => Some(*b),
            Lit::Num(n) => Some(n.value != 0.0 && !n.value.is_nan()),
            Lit::Str(s) => Some(!s.value.is_empty()),
            Lit::Null => Some(false),
            Lit::Regex(_) => Some(true),
            Lit::BigInt(_) => None,
        }
    }

    /// Value of `typeof` applied to this literal.
    pub fn type_of(&self) -> &'static str {
        match self {
            Lit::Str(_) => "string",
            Lit::Num(_) => "number",
            Lit::Bool(_) => "boolean",
            Lit::Null | Lit::Regex(_) => "object",
            Lit::BigInt(_) => "bigint",
        }
    }

    /// Key used when a literal appears as a call argument in decode tables:
    /// numbers use their JS string form, strings are double-quoted.
    pub fn lookup_key(&self) -> Option<String> {
        match self {
            Lit::Num(n) => Some(number_to_string(n.value)),
            Lit::Str(s) => Some(format!("\"{}\"", s.value)),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truthiness() {
        assert_eq!(Lit::num(0.0).truthiness(), Some(false));
        assert_eq!(Lit::num(f64::NAN).truthiness(), Some(false));
        assert_eq!(Lit::num(-1.0).truthiness(), Some(true));
        assert_eq!(Lit::str("").truthiness(), Some(false));
        assert_eq!(Lit::str("0").truthiness(), Some(true));
        assert_eq!(Lit::Null.truthiness(), Some(false));
        assert_eq!(Lit::BigInt("0n".into()).truthiness(), None);
    }

    #[test]
    fn test_lookup_key() {
        assert_eq!(Lit::num(5.0).lookup_key().as_deref(), Some("5"));
        assert_eq!(Lit::str("ab").lookup_key().as_deref(), Some("\"ab\""));
        assert_eq!(Lit::Bool(true).lookup_key(), None);
    }
}
