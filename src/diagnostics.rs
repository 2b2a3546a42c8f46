//! Diagnostic formatting utilities for the untangle CLI.

use std::ops::Range;

use ariadne::{Color, Config, IndexType, Label, Report, ReportKind, Source};

use crate::{ParseError, RuleFailure};

/// Normalize a span to ensure end > start (required by ariadne).
pub fn normalize_span(start: usize, end: usize) -> (usize, usize) {
    (start, end.max(start + 1))
}

fn parse_error_report<'a>(
    error: &ParseError,
    file_path: &'a str,
    color: bool,
) -> Report<'a, (&'a str, Range<usize>)> {
    let (start, end) = normalize_span(error.offset, error.end);
    let mut label = Label::new((file_path, start..end)).with_message(&error.message);
    if color {
        label = label.with_color(Color::Red);
    }
    Report::build(ReportKind::Error, (file_path, start..end))
        .with_config(
            Config::default()
                .with_color(color)
                .with_index_type(IndexType::Byte),
        )
        .with_message("syntax error")
        .with_label(label)
        .finish()
}

/// Print a parse error against its source using ariadne.
pub fn print_parse_error(error: &ParseError, source: &str, file_path: &str) {
    parse_error_report(error, file_path, true)
        .eprint((file_path, Source::from(source)))
        .ok();
}

/// Render a parse error without colors.
pub fn render_parse_error(error: &ParseError, source: &str, file_path: &str) -> String {
    let mut out = Vec::new();
    parse_error_report(error, file_path, false)
        .write((file_path, Source::from(source)), &mut out)
        .ok();
    String::from_utf8_lossy(&out).into_owned()
}

/// One-line summary of a rolled-back rule.
pub fn format_failure(failure: &RuleFailure) -> String {
    format!(
        "rule {} failed in pass {} and was rolled back: {}",
        failure.rule, failure.pass, failure.message
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_span_valid() {
        assert_eq!(normalize_span(0, 10), (0, 10));
        assert_eq!(normalize_span(5, 15), (5, 15));
    }

    #[test]
    fn test_normalize_span_zero_length() {
        // Zero-length span should become length 1
        assert_eq!(normalize_span(5, 5), (5, 6));
        assert_eq!(normalize_span(0, 0), (0, 1));
    }

    #[test]
    fn test_render_parse_error() {
        let source = "var a = 1;\nvar = ;\n";
        let error = untangle_front::parse(source).unwrap_err();
        let rendered = render_parse_error(&error, source, "input.js");
        assert!(rendered.contains("syntax error"));
        assert!(rendered.contains("input.js"));
        assert!(rendered.contains(&error.message));
    }

    #[test]
    fn test_format_failure() {
        let failure = RuleFailure {
            rule: "variables/rename".to_owned(),
            pass: 2,
            message: "Rule panicked: boom".to_owned(),
        };
        assert_eq!(
            format_failure(&failure),
            "rule variables/rename failed in pass 2 and was rolled back: Rule panicked: boom"
        );
    }
}
