//! Constant evaluation of primitive JavaScript values.
//!
//! Implements the coercions the folding rules need: `ToNumber`,
//! `ToString`, `ToInt32`/`ToUint32`, strict and loose equality and the
//! relational comparison (UTF-16 code unit order for strings). Nothing here
//! ever runs user code.

use std::cmp::Ordering;

use untangle_ast::text::{number_to_string, string_to_number};
use untangle_ast::{BinaryOp, Lit, UnaryOp};

/// A primitive value a literal can denote.
#[derive(Clone, Debug, PartialEq)]
pub enum Value {
    Null,
    Bool(bool),
    Num(f64),
    Str(String),
}

impl Value {
    /// The value of a string, number, boolean or null literal.
    pub fn from_lit(lit: &Lit) -> Option<Self> {
        match lit {
            Lit::Str(s) => Some(Value::Str(s.value.clone())),
            Lit::Num(n) => Some(Value::Num(n.value)),
            Lit::Bool(b) => Some(Value::Bool(*b)),
            Lit::Null => Some(Value::Null),
            Lit::BigInt(_) | Lit::Regex(_) => None,
        }
    }

    /// Literal for this value. Non-finite numbers and `-0` have no
    /// literal form.
    pub fn into_lit(self) -> Option<Lit> {
        match self {
            Value::Null => Some(Lit::Null),
            Value::Bool(b) => Some(Lit::Bool(b)),
            Value::Num(n) if n == 0.0 && n.is_sign_negative() => None,
            Value::Num(n) if n.is_finite() => Some(Lit::num(n)),
            Value::Num(_) => None,
            Value::Str(s) => Some(Lit::str(s)),
        }
    }

    pub fn to_number(&self) -> f64 {
        match self {
            Value::Null => 0.0,
            Value::Bool(b) => f64::from(u8::from(*b)),
            Value::Num(n) => *n,
            Value::Str(s) => string_to_number(s),
        }
    }

    pub fn to_js_string(&self) -> String {
        match self {
            Value::Null => "null".to_owned(),
            Value::Bool(b) => b.to_string(),
            Value::Num(n) => number_to_string(*n),
            Value::Str(s) => s.clone(),
        }
    }

    pub fn truthy(&self) -> bool {
        match self {
            Value::Null => false,
            Value::Bool(b) => *b,
            Value::Num(n) => *n != 0.0 && !n.is_nan(),
            Value::Str(s) => !s.is_empty(),
        }
    }

    pub fn type_of(&self) -> &'static str {
        match self {
            Value::Null => "object",
            Value::Bool(_) => "boolean",
            Value::Num(_) => "number",
            Value::Str(_) => "string",
        }
    }
}

/// `ToInt32`.
pub fn to_int32(n: f64) -> i32 {
    to_uint32(n) as i32
}

/// `ToUint32`.
pub fn to_uint32(n: f64) -> u32 {
    if !n.is_finite() {
        return 0;
    }
    let int = n.trunc().rem_euclid(4_294_967_296.0);
    int as u32
}

/// `===` on primitives.
pub fn strict_equals(a: &Value, b: &Value) -> bool {
    match (a, b) {
        (Value::Num(x), Value::Num(y)) => x == y,
        _ => a == b,
    }
}

/// `==` on primitives. `null` only equals itself here since `undefined`
/// is not a literal.
pub fn loose_equals(a: &Value, b: &Value) -> bool {
    match (a, b) {
        (Value::Null, Value::Null) => true,
        (Value::Null, _) | (_, Value::Null) => false,
        (Value::Num(_), Value::Num(_))
        | (Value::Str(_), Value::Str(_))
        | (Value::Bool(_), Value::Bool(_)) => strict_equals(a, b),
        _ => a.to_number() == b.to_number(),
    }
}

/// Abstract relational comparison; `None` when either side is `NaN`.
pub fn compare(a: &Value, b: &Value) -> Option<Ordering> {
    match (a, b) {
        (Value::Str(x), Value::Str(y)) => Some(x.encode_utf16().cmp(y.encode_utf16())),
        _ => a.to_number().partial_cmp(&b.to_number()),
    }
}

/// Evaluate `a <op> b`. `None` for operators that cannot be folded on
/// primitives (`in`, `instanceof`, the logical operators).
pub fn eval_binary(op: BinaryOp, a: &Value, b: &Value) -> Option<Value> {
    let num = |f: fn(f64, f64) -> f64| Some(Value::Num(f(a.to_number(), b.to_number())));
    let int = |f: fn(i32, u32) -> i32| {
        Some(Value::Num(f64::from(f(
            to_int32(a.to_number()),
            to_uint32(b.to_number()),
        ))))
    };

    match op {
        BinaryOp::Add => match (a, b) {
            (Value::Str(_), _) | (_, Value::Str(_)) => {
                Some(Value::Str(a.to_js_string() + &b.to_js_string()))
            }
            _ => num(|x, y| x + y),
        },
        BinaryOp::Sub => num(|x, y| x - y),
        BinaryOp::Mul => num(|x, y| x * y),
        BinaryOp::Div => num(|x, y| x / y),
        BinaryOp::Rem => num(js_rem),
        BinaryOp::Exp => num(js_pow),
        BinaryOp::Shl => int(|x, y| x.wrapping_shl(y & 31)),
        BinaryOp::Shr => int(|x, y| x >> (y & 31)),
        BinaryOp::UShr => {
            let x = to_uint32(a.to_number());
            let y = to_uint32(b.to_number()) & 31;
            Some(Value::Num(f64::from(x >> y)))
        }
        BinaryOp::BitAnd => int(|x, y| x & y as i32),
        BinaryOp::BitOr => int(|x, y| x | y as i32),
        BinaryOp::BitXor => int(|x, y| x ^ y as i32),
        BinaryOp::StrictEq => Some(Value::Bool(strict_equals(a, b))),
        BinaryOp::StrictNotEq => Some(Value::Bool(!strict_equals(a, b))),
        BinaryOp::Eq => Some(Value::Bool(loose_equals(a, b))),
        BinaryOp::NotEq => Some(Value::Bool(!loose_equals(a, b))),
        BinaryOp::Lt => Some(Value::Bool(compare(a, b) == Some(Ordering::Less))),
        BinaryOp::Gt => Some(Value::Bool(compare(a, b) == Some(Ordering::Greater))),
        BinaryOp::LtEq => Some(Value::Bool(matches!(
            compare(a, b),
            Some(Ordering::Less | Ordering::Equal)
        ))),
        BinaryOp::GtEq => Some(Value::Bool(matches!(
            compare(a, b),
            Some(Ordering::Greater | Ordering::Equal)
        ))),
        BinaryOp::In | BinaryOp::InstanceOf | BinaryOp::And | BinaryOp::Or | BinaryOp::Nullish => {
            None
        }
    }
}

/// Evaluate `<op> a`. `delete` and `void` are left to other rules.
pub fn eval_unary(op: UnaryOp, a: &Value) -> Option<Value> {
    match op {
        UnaryOp::Not => Some(Value::Bool(!a.truthy())),
        UnaryOp::Minus => Some(Value::Num(-a.to_number())),
        UnaryOp::Plus => Some(Value::Num(a.to_number())),
        UnaryOp::BitNot => Some(Value::Num(f64::from(!to_int32(a.to_number())))),
        UnaryOp::TypeOf => Some(Value::Str(a.type_of().to_owned())),
        UnaryOp::Void | UnaryOp::Delete => None,
    }
}

/// `%`: the sign follows the dividend, as with `fmod`.
fn js_rem(x: f64, y: f64) -> f64 {
    x % y
}

/// `**` differs from `powf` for `1 ** ±Infinity` and `1 ** NaN`.
fn js_pow(x: f64, y: f64) -> f64 {
    if y.is_nan() || (x.abs() == 1.0 && y.is_infinite()) {
        return f64::NAN;
    }
    x.powf(y)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn num(n: f64) -> Value {
        Value::Num(n)
    }

    fn s(text: &str) -> Value {
        Value::Str(text.to_owned())
    }

    #[test]
    fn test_addition_coerces_to_string() {
        assert_eq!(eval_binary(BinaryOp::Add, &s("a"), &num(1.0)), Some(s("a1")));
        assert_eq!(eval_binary(BinaryOp::Add, &num(1.5), &s("")), Some(s("1.5")));
        assert_eq!(
            eval_binary(BinaryOp::Add, &Value::Bool(true), &num(1.0)),
            Some(num(2.0))
        );
        assert_eq!(eval_binary(BinaryOp::Add, &Value::Null, &s("x")), Some(s("nullx")));
    }

    #[test]
    fn test_bitwise_wraps_to_int32() {
        assert_eq!(eval_binary(BinaryOp::BitOr, &num(4294967295.0), &num(0.0)), Some(num(-1.0)));
        assert_eq!(eval_binary(BinaryOp::Shl, &num(1.0), &num(33.0)), Some(num(2.0)));
        assert_eq!(eval_binary(BinaryOp::UShr, &num(-1.0), &num(0.0)), Some(num(4294967295.0)));
        assert_eq!(eval_binary(BinaryOp::Shr, &num(-8.0), &num(1.0)), Some(num(-4.0)));
        assert_eq!(
            eval_binary(BinaryOp::BitXor, &num(0x5a as f64), &num(0xff as f64)),
            Some(num(165.0))
        );
    }

    #[test]
    fn test_equality() {
        assert_eq!(eval_binary(BinaryOp::Eq, &s("1"), &num(1.0)), Some(Value::Bool(true)));
        assert_eq!(eval_binary(BinaryOp::StrictEq, &s("1"), &num(1.0)), Some(Value::Bool(false)));
        assert_eq!(eval_binary(BinaryOp::Eq, &Value::Null, &num(0.0)), Some(Value::Bool(false)));
        assert_eq!(
            eval_binary(BinaryOp::StrictEq, &num(f64::NAN), &num(f64::NAN)),
            Some(Value::Bool(false))
        );
        assert_eq!(eval_binary(BinaryOp::Eq, &Value::Bool(false), &s("")), Some(Value::Bool(true)));
    }

    #[test]
    fn test_relational() {
        assert_eq!(eval_binary(BinaryOp::Lt, &s("10"), &s("9")), Some(Value::Bool(true)));
        assert_eq!(eval_binary(BinaryOp::Lt, &s("10"), &num(9.0)), Some(Value::Bool(false)));
        assert_eq!(eval_binary(BinaryOp::GtEq, &s("a"), &num(1.0)), Some(Value::Bool(false)));
        assert_eq!(eval_binary(BinaryOp::LtEq, &Value::Null, &num(0.0)), Some(Value::Bool(true)));
    }

    #[test]
    fn test_arithmetic_edge_cases() {
        assert_eq!(eval_binary(BinaryOp::Rem, &num(-7.0), &num(2.0)), Some(num(-1.0)));
        assert_eq!(eval_binary(BinaryOp::Exp, &num(2.0), &num(10.0)), Some(num(1024.0)));
        let Some(Value::Num(n)) = eval_binary(BinaryOp::Exp, &num(1.0), &num(f64::INFINITY)) else {
            panic!("expected a number");
        };
        assert!(n.is_nan());
        assert_eq!(eval_binary(BinaryOp::In, &s("a"), &s("b")), None);
    }

    #[test]
    fn test_unary() {
        assert_eq!(eval_unary(UnaryOp::Not, &s("")), Some(Value::Bool(true)));
        assert_eq!(eval_unary(UnaryOp::BitNot, &num(0.0)), Some(num(-1.0)));
        assert_eq!(eval_unary(UnaryOp::Plus, &s(" 12 ")), Some(num(12.0)));
        assert_eq!(eval_unary(UnaryOp::TypeOf, &Value::Null), Some(s("object")));
        assert_eq!(eval_unary(UnaryOp::Void, &num(0.0)), None);
    }

    #[test]
    fn test_non_finite_has_no_literal() {
        assert_eq!(num(f64::INFINITY).into_lit(), None);
        assert_eq!(num(-0.0).into_lit(), None);
        assert_eq!(num(3.0).into_lit(), Some(Lit::num(3.0)));
    }
}
