//! String literals written with `\xHH`, `\uHHHH`, `\u{…}` or octal
//! escapes are printed from their decoded value.
//!
//! The value is decoded when the source is parsed; this rule only drops the
//! raw text so the printer falls back to the canonical form. Literals whose
//! escapes do not survive decoding (lone surrogates) keep their raw text.

use untangle_ast::text::{has_encoded_escape, unescape_string};
use untangle_ast::visit::{VisitMut, walk_expr, walk_prop_key};
use untangle_ast::{Expr, JsStr, Lit, Program, PropKey};

use crate::context::RunContext;
use crate::error::RuleResult;
use crate::rule::Rule;

pub struct DecodeEscapes;

impl Rule for DecodeEscapes {
    fn name(&self) -> &'static str {
        "strings/decode-escapes"
    }

    fn phase(&self) -> i32 {
        6
    }

    fn description(&self) -> &'static str {
        "Decode hex, unicode and octal escapes in string literals"
    }

    fn run(&self, program: &mut Program, _ctx: &mut RunContext) -> RuleResult<usize> {
        let mut decoder = EscapeDecoder { edits: 0 };
        decoder.visit_program(program);
        Ok(decoder.edits)
    }
}

struct EscapeDecoder {
    edits: usize,
}

impl EscapeDecoder {
    fn decode(&mut self, s: &mut JsStr) {
        let Some(raw) = &s.raw else {
            return;
        };
        if !has_encoded_escape(raw) {
            return;
        }
        let body = raw.get(1..raw.len().saturating_sub(1)).unwrap_or("");
        let (_, lossless) = unescape_string(body);
        if lossless {
            s.raw = None;
            self.edits += 1;
        }
    }
}

impl VisitMut for EscapeDecoder {
    fn visit_expr(&mut self, expr: &mut Expr) {
        walk_expr(self, expr);
        if let Expr::Lit(Lit::Str(s)) = expr {
            self.decode(s);
        }
    }

    fn visit_prop_key(&mut self, key: &mut PropKey) {
        walk_prop_key(self, key);
        if let PropKey::Str(s) = key {
            self.decode(s);
        }
    }
}
