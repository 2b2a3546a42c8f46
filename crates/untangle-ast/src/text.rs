//! Conversions between JavaScript literal source text and values.
//!
//! Shared by the lowering (source text → value), the printer
//! (value → canonical text) and the constant evaluator (`ToString` on
//! numbers).

/// JavaScript `Number::toString(10)`.
///
/// Uses the shortest round-trip digits and the exponent thresholds of the
/// language: plain notation for decimal exponents in `-7 < e < 21`,
/// exponential (`1e+21`, `1e-7`) otherwise.
pub fn number_to_string(value: f64) -> String {
    if value.is_nan() {
        return "NaN".to_owned();
    }
    if value == 0.0 {
        return "0".to_owned();
    }
    if value.is_infinite() {
        return if value > 0.0 { "Infinity" } else { "-Infinity" }.to_owned();
    }
    if value < 0.0 {
        return format!("-{}", number_to_string(-value));
    }

    let sci = format!("{value:e}");
    let Some((mantissa, exp)) = sci.split_once('e') else {
        return sci;
    };
    let exp: i32 = exp.parse().unwrap_or(0);
    let digits: String = mantissa.chars().filter(|c| *c != '.').collect();
    let k = digits.len() as i32;
    let n = exp + 1;

    if k <= n && n <= 21 {
        let mut out = digits;
        out.extend(std::iter::repeat_n('0', (n - k) as usize));
        out
    } else if 0 < n && n <= 21 {
        let (int, frac) = digits.split_at(n as usize);
        format!("{int}.{frac}")
    } else if -6 < n && n <= 0 {
        let zeros = "0".repeat((-n) as usize);
        format!("0.{zeros}{digits}")
    } else {
        let e = n - 1;
        let sign = if e >= 0 { '+' } else { '-' };
        let (first, rest) = digits.split_at(1);
        if rest.is_empty() {
            format!("{first}e{sign}{}", e.abs())
        } else {
            format!("{first}.{rest}e{sign}{}", e.abs())
        }
    }
}

/// Parse the source text of a numeric literal.
///
/// Handles `0x`/`0o`/`0b` prefixes, legacy octal (`017`), numeric
/// separators and plain decimal forms. BigInt literals are not numbers and
/// yield `None`.
pub fn parse_number(raw: &str) -> Option<f64> {
    if raw.ends_with('n') {
        return None;
    }
    let text: String = raw.chars().filter(|c| *c != '_').collect();
    let lower = text.to_ascii_lowercase();

    let radix_digits = |digits: &str, radix: u32| -> Option<f64> {
        if digits.is_empty() {
            return None;
        }
        digits.chars().try_fold(0.0f64, |acc, c| {
            c.to_digit(radix).map(|d| acc * radix as f64 + d as f64)
        })
    };

    if let Some(digits) = lower.strip_prefix("0x") {
        return radix_digits(digits, 16);
    }
    if let Some(digits) = lower.strip_prefix("0o") {
        return radix_digits(digits, 8);
    }
    if let Some(digits) = lower.strip_prefix("0b") {
        return radix_digits(digits, 2);
    }
    if is_legacy_octal(&text) {
        return radix_digits(&text[1..], 8);
    }
    if !text
        .chars()
        .all(|c| c.is_ascii_digit() || matches!(c, '.' | 'e' | 'E' | '+' | '-'))
    {
        return None;
    }
    text.parse().ok()
}

/// Whether a numeric literal is written in a non-decimal radix.
pub fn is_radix_literal(raw: &str) -> bool {
    let lower = raw.to_ascii_lowercase();
    lower.starts_with("0x")
        || lower.starts_with("0o")
        || lower.starts_with("0b")
        || is_legacy_octal(raw)
}

fn is_legacy_octal(text: &str) -> bool {
    text.len() > 1 && text.starts_with('0') && text.chars().all(|c| ('0'..='7').contains(&c))
}

/// JavaScript `StringToNumber`, used for `ToNumber` on string values.
pub fn string_to_number(value: &str) -> f64 {
    let trimmed = value.trim_matches(is_js_whitespace);
    if trimmed.is_empty() {
        return 0.0;
    }
    match trimmed {
        "Infinity" | "+Infinity" => return f64::INFINITY,
        "-Infinity" => return f64::NEG_INFINITY,
        _ => {}
    }
    let lower = trimmed.to_ascii_lowercase();
    if lower.starts_with("0x") || lower.starts_with("0o") || lower.starts_with("0b") {
        // Separators are not allowed here, unlike in source literals.
        if trimmed.contains('_') {
            return f64::NAN;
        }
        return parse_number(trimmed).unwrap_or(f64::NAN);
    }
    if !trimmed
        .chars()
        .all(|c| c.is_ascii_digit() || matches!(c, '.' | 'e' | 'E' | '+' | '-'))
    {
        return f64::NAN;
    }
    trimmed.parse().unwrap_or(f64::NAN)
}

fn is_js_whitespace(c: char) -> bool {
    c.is_whitespace() || c == '\u{feff}'
}

/// Decode the body of a string literal (without quotes).
///
/// Returns the decoded value and whether the decoding was lossless. Lone
/// surrogate escapes cannot be represented in a Rust string; they decode
/// to U+FFFD and mark the result lossy.
pub fn unescape_string(body: &str) -> (String, bool) {
    let mut out = String::with_capacity(body.len());
    let mut lossless = true;
    let mut chars = body.chars().peekable();

    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        let Some(esc) = chars.next() else {
            break;
        };
        match esc {
            'n' => out.push('\n'),
            't' => out.push('\t'),
            'r' => out.push('\r'),
            'b' => out.push('\u{8}'),
            'f' => out.push('\u{c}'),
            'v' => out.push('\u{b}'),
            '\r' => {
                if chars.peek() == Some(&'\n') {
                    chars.next();
                }
            }
            '\n' | '\u{2028}' | '\u{2029}' => {}
            'x' => {
                let hex: String = take_hex(&mut chars, 2);
                match u32::from_str_radix(&hex, 16).ok().and_then(char::from_u32) {
                    Some(ch) if hex.len() == 2 => out.push(ch),
                    _ => {
                        out.push('x');
                        out.push_str(&hex);
                    }
                }
            }
            'u' => {
                let unit = if chars.peek() == Some(&'{') {
                    chars.next();
                    let hex: String = chars.by_ref().take_while(|c| *c != '}').collect();
                    u32::from_str_radix(&hex, 16).ok()
                } else {
                    let hex = take_hex(&mut chars, 4);
                    if hex.len() == 4 {
                        u32::from_str_radix(&hex, 16).ok()
                    } else {
                        None
                    }
                };
                match unit {
                    Some(high @ 0xD800..=0xDBFF) => match take_low_surrogate(&mut chars) {
                        Some(low) => {
                            let cp = 0x10000 + ((high - 0xD800) << 10) + (low - 0xDC00);
                            out.push(char::from_u32(cp).unwrap_or('\u{fffd}'));
                        }
                        None => {
                            out.push('\u{fffd}');
                            lossless = false;
                        }
                    },
                    Some(unit) => match char::from_u32(unit) {
                        Some(ch) => out.push(ch),
                        None => {
                            out.push('\u{fffd}');
                            lossless = false;
                        }
                    },
                    None => {
                        out.push('\u{fffd}');
                        lossless = false;
                    }
                }
            }
            '0'..='7' => {
                let mut value = esc.to_digit(8).unwrap_or(0);
                let max_len = if esc <= '3' { 3 } else { 2 };
                for _ in 1..max_len {
                    match chars.peek().and_then(|c| c.to_digit(8)) {
                        Some(d) => {
                            value = value * 8 + d;
                            chars.next();
                        }
                        None => break,
                    }
                }
                out.push(char::from_u32(value).unwrap_or('\u{fffd}'));
            }
            other => out.push(other),
        }
    }

    (out, lossless)
}

fn take_hex(chars: &mut std::iter::Peekable<std::str::Chars<'_>>, len: usize) -> String {
    let mut hex = String::with_capacity(len);
    while hex.len() < len {
        match chars.peek() {
            Some(c) if c.is_ascii_hexdigit() => {
                hex.push(*c);
                chars.next();
            }
            _ => break,
        }
    }
    hex
}

fn take_low_surrogate(chars: &mut std::iter::Peekable<std::str::Chars<'_>>) -> Option<u32> {
    let mut lookahead = chars.clone();
    if lookahead.next() != Some('\\') || lookahead.next() != Some('u') {
        return None;
    }
    let hex = take_hex(&mut lookahead, 4);
    let unit = u32::from_str_radix(&hex, 16).ok()?;
    if hex.len() != 4 || !(0xDC00..=0xDFFF).contains(&unit) {
        return None;
    }
    *chars = lookahead;
    Some(unit)
}

/// Whether the raw text of a string literal (quotes included) contains a
/// hex, unicode or octal escape.
pub fn has_encoded_escape(raw: &str) -> bool {
    let mut chars = raw.chars();
    while let Some(c) = chars.next() {
        if c == '\\' {
            match chars.next() {
                Some('x' | 'u' | '0'..='7') => return true,
                _ => {}
            }
        }
    }
    false
}

/// Canonical double-quoted source form of a string value.
pub fn quote_string(value: &str) -> String {
    let mut out = String::with_capacity(value.len() + 2);
    out.push('"');
    let mut chars = value.chars().peekable();
    while let Some(c) = chars.next() {
        match c {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            '\u{8}' => out.push_str("\\b"),
            '\u{b}' => out.push_str("\\v"),
            '\u{c}' => out.push_str("\\f"),
            '\0' => {
                if chars.peek().is_some_and(|c| c.is_ascii_digit()) {
                    out.push_str("\\x00");
                } else {
                    out.push_str("\\0");
                }
            }
            '\u{2028}' => out.push_str("\\u2028"),
            '\u{2029}' => out.push_str("\\u2029"),
            c if (c as u32) < 0x20 || c as u32 == 0x7f => {
                out.push_str(&format!("\\x{:02x}", c as u32));
            }
            c => out.push(c),
        }
    }
    out.push('"');
    out
}

/// Whether `name` is an ASCII identifier name (`[A-Za-z_$][A-Za-z0-9_$]*`).
pub fn is_identifier_name(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' || c == '$' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '$')
}
