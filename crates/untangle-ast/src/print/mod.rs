//! Canonical source printer.
//!
//! Printing is total: every tree prints. Grouping parentheses are inserted
//! from operator precedence, so rules may drop `Paren` nodes freely.
//! Layout is two-space indentation with one statement per line; literal
//! raw text is reproduced when present.

mod expr;
mod literal;
mod stmt;

use crate::ast::{Expr, Program, Stmt};

pub use literal::{lit_to_string, num_to_string};

/// Print a whole program. Each top-level statement ends with a newline.
pub fn print_program(program: &Program) -> String {
    let mut printer = Printer::new();
    if let Some(hashbang) = &program.hashbang {
        printer.write(hashbang);
        printer.write("\n");
    }
    for stmt in &program.body {
        printer.stmt(stmt);
        printer.write("\n");
    }
    printer.finish()
}

/// Print a single statement at indentation level zero.
pub fn print_stmt(stmt: &Stmt) -> String {
    let mut printer = Printer::new();
    printer.stmt(stmt);
    printer.finish()
}

/// Print a single expression.
pub fn print_expr(expr: &Expr) -> String {
    let mut printer = Printer::new();
    printer.expr(expr, 0);
    printer.finish()
}

pub(crate) struct Printer {
    out: String,
    indent: usize,
    /// Inside a `for (…;` initializer, where a bare `in` would be parsed as
    /// a `for … in` head.
    in_for_init: bool,
}

impl Printer {
    fn new() -> Self {
        Self {
            out: String::new(),
            indent: 0,
            in_for_init: false,
        }
    }

    fn finish(self) -> String {
        self.out
    }

    fn write(&mut self, text: &str) {
        self.out.push_str(text);
    }

    fn newline(&mut self) {
        self.out.push('\n');
        for _ in 0..self.indent {
            self.out.push_str("  ");
        }
    }

    /// Write items separated by `", "`.
    fn comma_list<T>(&mut self, items: &[T], mut each: impl FnMut(&mut Self, &T)) {
        for (i, item) in items.iter().enumerate() {
            if i > 0 {
                self.write(", ");
            }
            each(self, item);
        }
    }
}
