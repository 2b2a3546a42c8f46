//! Parse, print, and parse the printed text again.

use untangle_ast::print_program;
use untangle_front::parse;

fn reprint(source: &str) -> String {
    print_program(&parse(source).expect("source should parse"))
}

#[test]
fn test_declarations() {
    insta::assert_snapshot!(reprint("var a = 1, b; let [c, d] = e; const {f, g: h} = i;"), @r"
    var a = 1, b;
    let [c, d] = e;
    const {f, g: h} = i;
    ");
}

#[test]
fn test_else_if_chain() {
    insta::assert_snapshot!(reprint("if (a) b(); else if (c) d(); else { e(); }"), @r"
    if (a) b();
    else if (c) d();
    else {
      e();
    }
    ");
}

#[test]
fn test_literal_text_is_kept() {
    assert_eq!(
        reprint("x = 0x1F + 'a' + 1e3;"),
        "x = 0x1F + 'a' + 1e3;\n"
    );
}

#[test]
fn test_directives_are_kept_as_written() {
    let source = r#"'use strict'
function f() { "use\x20strict"; ("x"); }"#;
    insta::assert_snapshot!(reprint(source), @r#"
    'use strict';
    function f() {
      "use\x20strict";
      ("x");
    }
    "#);
}

#[test]
fn test_functions_and_classes() {
    insta::assert_snapshot!(reprint("
        function f(a, ...rest) { return a; }
        const g = async (x) => ({ x });
        class C extends B { static n = 1; get v() { return this.n; } }
    "), @r"
    function f(a, ...rest) {
      return a;
    }
    const g = async (x) => ({
      x
    });
    class C extends B {
      static n = 1;
      get v() {
        return this.n;
      }
    }
    ");
}

#[test]
fn test_printing_is_stable() {
    let corpus = [
        "for (var i = 0, n = xs.length; i < n; i++) { if (!xs[i]) continue; f(xs[i]); }",
        "switch (k) { case 1: a(); break; default: b(); }",
        "try { t(); } catch ({ message }) { log(message); } finally { done(); }",
        "label: while (x) { do { y--; } while (y > 0); break label; }",
        "var o = { a: 1, 'b-c': [1, , 2], [k]: function () {}, m() {} };",
        "x = a ? b : c ? d : e; y = (a, b); z = -(-1); w = typeof void 0;",
        "new (f())(); new a.b.C(1); (function () {})(); (() => {})();",
        "for (const [k, v] of Object.entries(o)) { for (p in v) g(k, p); }",
        "`a${b}c${`d${e}`}`; tag`x`; /re+/g.test(s);",
        "a ?? (b || c); a?.b?.[c]?.(d); x **= 2; y >>>= 1;",
    ];
    for source in corpus {
        let first = reprint(source);
        let second = reprint(&first);
        assert_eq!(first, second, "printing is not stable for {source:?}");
    }
}
