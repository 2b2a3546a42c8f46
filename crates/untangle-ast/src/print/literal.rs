use crate::ast::{JsNum, JsStr, Lit};
use crate::text::{number_to_string, quote_string};

pub fn str_to_string(s: &JsStr) -> String {
    match &s.raw {
        Some(raw) => raw.clone(),
        None => quote_string(&s.value),
    }
}

pub fn num_to_string(n: &JsNum) -> String {
    match &n.raw {
        Some(raw) => raw.clone(),
        None => number_to_string(n.value),
    }
}

pub fn lit_to_string(lit: &Lit) -> String {
    match lit {
        Lit::Str(s) => str_to_string(s),
        Lit::Num(n) => num_to_string(n),
        Lit::Bool(true) => "true".to_owned(),
        Lit::Bool(false) => "false".to_owned(),
        Lit::Null => "null".to_owned(),
        Lit::BigInt(raw) | Lit::Regex(raw) => raw.clone(),
    }
}

/// Whether a numeric literal prints with a leading minus sign.
pub(super) fn is_negative(n: &JsNum) -> bool {
    match &n.raw {
        Some(raw) => raw.starts_with('-'),
        None => n.value < 0.0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_raw_text_wins() {
        let n = JsNum {
            value: 255.0,
            raw: Some("0xff".to_owned()),
        };
        assert_eq!(num_to_string(&n), "0xff");
        assert_eq!(num_to_string(&JsNum::new(255.0)), "255");
    }

    #[test]
    fn test_canonical_string() {
        let s = JsStr {
            value: "A".to_owned(),
            raw: Some(r#"'\x41'"#.to_owned()),
        };
        assert_eq!(str_to_string(&s), r#"'\x41'"#);
        assert_eq!(str_to_string(&JsStr::new("A")), r#""A""#);
    }
}
