//! End-to-end runs of the full rule library.

use untangle::snapshot::SnapshotWriter;
use untangle::{
    DecodeTable, DeobfuscateOptions, RuleSelection, deobfuscate, deobfuscate_with_observer,
};

const SAMPLE: &str = r#"
var _0x3f2a = function (_0x1b) { return "\x68\x65\x6c\x6c\x6f" + _0x1b; };
if (!![]) { console["log"](_0x3f2a(0x2a)); } else { never(); }
"#;

#[test]
fn test_sample_without_decode_table() {
    let output = deobfuscate(SAMPLE, &DeobfuscateOptions::default()).unwrap();
    assert!(output.result.reached_fixpoint);
    assert!(output.result.failures.is_empty());
    insta::assert_snapshot!(output.code, @r#"
    var var_1 = function (var_2) {
      return "hello" + var_2;
    };
    console.log(/* unresolved encoded call: _0x3f2a(42) */ var_1(42));
    "#);
}

#[test]
fn test_sample_with_decode_table() {
    let mut decode_table = DecodeTable::new();
    decode_table.insert("_0x3f2a(42)".to_owned(), "hello world".to_owned());
    let options = DeobfuscateOptions {
        decode_table,
        ..DeobfuscateOptions::default()
    };
    let output = deobfuscate(SAMPLE, &options).unwrap();
    insta::assert_snapshot!(output.code, @r#"
    var var_1 = function (var_2) {
      return "hello" + var_2;
    };
    console.log("hello world");
    "#);
}

#[test]
fn test_selection_limits_rules() {
    let options = DeobfuscateOptions {
        selection: RuleSelection {
            include: vec!["expressions/*".to_owned()],
            exclude: vec!["expressions/property-access".to_owned()],
            ..RuleSelection::default()
        },
        ..DeobfuscateOptions::default()
    };
    let output = deobfuscate(r#"if (!0) o["k"] = 1 + 2;"#, &options).unwrap();
    assert_eq!(output.code, "if (true) o[\"k\"] = 3;\n");
    assert!(
        output
            .result
            .trace
            .iter()
            .all(|entry| entry.rule.starts_with("expressions/"))
    );
}

#[test]
fn test_parse_error_stops_the_run() {
    let err = deobfuscate("function (", &DeobfuscateOptions::default()).unwrap_err();
    assert_eq!(err.line, 1);
}

#[test]
fn test_long_concatenation_folds() {
    let terms = vec![r#""a""#; 10_000];
    let source = format!("x = {};", terms.join(" + "));
    let output = deobfuscate(&source, &DeobfuscateOptions::default()).unwrap();
    assert_eq!(output.code, format!("x = \"{}\";\n", "a".repeat(10_000)));
}

#[test]
fn test_long_identifier_chain_round_trips() {
    let terms: Vec<String> = (0..10_000).map(|i| format!("a{i}")).collect();
    let source = format!("x = {};\n", terms.join(" + "));
    let output = deobfuscate(&source, &DeobfuscateOptions::default()).unwrap();
    assert_eq!(output.code, source);
}

#[test]
fn test_deeply_nested_blocks() {
    let depth = 3_000;
    let source = format!("{}f();{}", "if (a) {".repeat(depth), "}".repeat(depth));
    let output = deobfuscate(&source, &DeobfuscateOptions::default()).unwrap();
    assert_eq!(output.code.lines().count(), 2 * depth + 1);
    assert!(output.code.contains("f();"));
}

#[test]
fn test_nesting_beyond_limit_is_a_parse_error() {
    let depth = 20_000;
    let source = format!("x = {}0{};", "[".repeat(depth), "]".repeat(depth));
    let err = deobfuscate(&source, &DeobfuscateOptions::default()).unwrap_err();
    assert_eq!(err.message, "nesting too deep");
}

#[test]
fn test_snapshot_directory() {
    let dir = tempfile::tempdir().unwrap();
    let mut writer = SnapshotWriter::create(dir.path().join("snapshots")).unwrap();
    let output = deobfuscate_with_observer(
        "if (1) { a(); }",
        &DeobfuscateOptions::default(),
        Some(&mut writer),
    )
    .unwrap();
    assert_eq!(output.code, "a();\n");

    let names: Vec<String> = writer
        .written()
        .iter()
        .filter_map(|path| path.file_name())
        .map(|name| name.to_string_lossy().into_owned())
        .collect();
    assert_eq!(names.len(), output.result.trace.len());
    assert!(names.contains(&"01-control_if-else-simplify.js".to_owned()));

    let last = writer.written().last().unwrap();
    assert_eq!(std::fs::read_to_string(last).unwrap(), "a();\n");
}
