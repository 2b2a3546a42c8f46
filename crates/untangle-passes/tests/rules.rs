//! Properties of the whole rule library over a corpus of obfuscated
//! snippets.

use untangle_ast::{Program, print_program};
use untangle_passes::{Pipeline, PipelineResult, RuleRegistry, RuleSelection, RunContext};

const CORPUS: &[&str] = &[
    r#"var _0x1f = 0x10 + 0x20, _0x2e = "\x68\x69";"#,
    "if (!![]) { a(); } else { b(); }",
    "(function () { return 1, 2, f(), x; })();",
    r#"switch ("b") { case "a": x(); break; case "b": y(); break; default: z(); }"#,
    "for (var i = 0; false; i++) {}\ndo { k(); } while (0);",
    r#"o["key"] = o["other"] + void 0;
typeof x === "undefined" ? p() : q();"#,
    "function _0xabc(_0x12, _0x34) { let _0x56 = _0x12 * _0x34; return _0x56; }",
    r#"if (false) dead(); ;; {} x = 1 ? "a" : "b";"#,
    "try { t(); } catch (_0xe) { log(_0xe); } finally { done(); }",
    "label: for (;;) { if (c) break label; continue; }",
    r#"class A { m() { return this["p"]; } }"#,
    "const f = (_0xa) => (_0xa, _0xa + 1);",
    "_0x4a(5) + _0x4a(6);",
    "function g() { return 1; h(); var late = 2; }",
    "while (1) { if (x) break; }",
];

fn parse(source: &str) -> Program {
    untangle_front::parse(source).expect("corpus snippet should parse")
}

fn run_all(program: &mut Program, max_passes: usize) -> PipelineResult {
    let registry = RuleRegistry::builtin();
    let selection = RuleSelection {
        enable: vec!["*".to_owned()],
        max_passes,
        ..RuleSelection::default()
    };
    let rules = registry.select(&selection);
    Pipeline::new(rules, max_passes).run(program, &mut RunContext::new(), None)
}

#[test]
fn test_every_rule_is_idempotent() {
    let registry = RuleRegistry::builtin();
    for info in registry.describe() {
        let rule = registry.get(info.name).expect("described rule is registered");
        for source in CORPUS {
            let mut program = parse(source);
            let mut ctx = RunContext::new();
            rule.run(&mut program, &mut ctx).expect("first run");
            let printed = print_program(&program);
            let edits = rule.run(&mut program, &mut ctx).expect("second run");
            assert_eq!(edits, 0, "{} is not idempotent on:\n{printed}", info.name);
        }
    }
}

#[test]
fn test_pipeline_reaches_fixpoint() {
    for source in CORPUS {
        let mut program = parse(source);
        let result = run_all(&mut program, 20);
        assert!(result.reached_fixpoint, "no fixpoint for {source:?}");
        assert!(result.failures.is_empty(), "{:?}", result.failures);

        let again = run_all(&mut program, 20);
        assert_eq!(again.total_edits(), 0, "edits after fixpoint for {source:?}");
        assert_eq!(again.passes, 1);
    }
}

#[test]
fn test_state_machine_reversal() {
    let mut program = parse(
        "
        function run() {
            var state = 0;
            while (!0) {
                switch (state) {
                    case 0x2: finish(); return;
                    case 0x0: start(); state = 0x1; break;
                    case 0x1: middle(); state = 0x2; break;
                }
            }
        }",
    );
    let registry = RuleRegistry::builtin();
    let selection = RuleSelection::default();
    let result = Pipeline::new(registry.select(&selection), selection.max_passes).run(
        &mut program,
        &mut RunContext::new(),
        None,
    );
    assert!(result.reached_fixpoint);
    assert!(
        result
            .trace
            .iter()
            .any(|entry| entry.rule == "control/unflatten")
    );
    insta::assert_snapshot!(print_program(&program), @r"
    function run() {
      var state = 0;
      start();
      middle();
      finish();
      return;
    }
    ");
}

#[test]
fn test_rename_is_consistent_across_scopes() {
    let mut program = parse(
        r#"
        var _0x5a1b = ["log"];
        function _0x3c(_0x1, _0x2) { return _0x5a1b[_0x1] + _0x2; }
        console[_0x5a1b[0]](_0x3c(0, "!"));
        "#,
    );
    run_all(&mut program, 3);
    insta::assert_snapshot!(print_program(&program), @r#"
    var var_1 = ["log"];
    function func_1(var_2, var_3) {
      return var_1[var_2] + var_3;
    }
    console[var_1[0]](func_1(0, "!"));
    "#);
}
