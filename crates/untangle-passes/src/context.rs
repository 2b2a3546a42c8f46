//! Per-run mutable state shared by the rules.
//!
//! A [`RunContext`] is created for one input, threaded through every rule
//! invocation of every pass, and dropped afterwards. Rules themselves hold
//! no state between runs.

use std::collections::HashMap;

/// Mapping from an encoded call written as `name(arg)` to its decoded text.
///
/// Keys use the literal's lookup form: numbers in their JS string form,
/// strings wrapped in double quotes (`_0x1a(5)`, `_0x1a("k")`).
pub type DecodeTable = HashMap<String, String>;

#[derive(Debug, Default)]
pub struct RunContext {
    names: NameAllocator,
    decode_table: DecodeTable,
}

impl RunContext {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_decode_table(decode_table: DecodeTable) -> Self {
        Self {
            names: NameAllocator::default(),
            decode_table,
        }
    }

    pub fn names(&mut self) -> &mut NameAllocator {
        &mut self.names
    }

    /// Look up the decoded text for `key` (see [`DecodeTable`]).
    pub fn decoded(&self, key: &str) -> Option<&str> {
        self.decode_table.get(key).map(String::as_str)
    }
}

/// Issues fresh identifiers like `var_1`, `func_1`.
///
/// Counters are per prefix and live for the whole run, so names issued in
/// one pass are never reissued in a later pass.
#[derive(Debug, Default)]
pub struct NameAllocator {
    counters: HashMap<&'static str, usize>,
}

impl NameAllocator {
    /// Next `{prefix}_{n}` not rejected by `is_taken`.
    pub fn fresh(&mut self, prefix: &'static str, is_taken: impl Fn(&str) -> bool) -> String {
        let counter = self.counters.entry(prefix).or_insert(0);
        loop {
            *counter += 1;
            let name = format!("{prefix}_{counter}");
            if !is_taken(&name) {
                return name;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fresh_names_skip_taken() {
        let mut names = NameAllocator::default();
        assert_eq!(names.fresh("var", |_| false), "var_1");
        assert_eq!(names.fresh("var", |name| name == "var_2"), "var_3");
        assert_eq!(names.fresh("func", |_| false), "func_1");
        assert_eq!(names.fresh("var", |_| false), "var_4");
    }

    #[test]
    fn test_decode_lookup() {
        let mut table = DecodeTable::new();
        table.insert("_0x1a(5)".to_owned(), "hello".to_owned());
        let ctx = RunContext::with_decode_table(table);
        assert_eq!(ctx.decoded("_0x1a(5)"), Some("hello"));
        assert_eq!(ctx.decoded("_0x1a(6)"), None);
    }
}
