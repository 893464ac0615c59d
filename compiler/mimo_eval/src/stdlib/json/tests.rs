use pretty_assertions::assert_eq;

use crate::test_support::{error, output};

fn with_json(body: &str) -> String {
    output(&format!("import \"json\" as json\n{body}"))
}

#[test]
fn parse_builds_ordered_values() {
    let out = with_json(
        "set v call json.parse(\"{\\\"b\\\": [1, 2.5, null], \\\"a\\\": {\\\"ok\\\": true}}\")\n\
         show v\n\
         show v.a.ok\n\
         show call keys(v)",
    );
    assert_eq!(out, "{b: [1, 2.5, null], a: {ok: true}}\ntrue\n[b, a]\n");
}

#[test]
fn parse_errors() {
    let err = error("import \"json\" as json\ncall json.parse(\"{bad\")");
    assert_eq!(err.code, "JSON001");
    assert!(err.message.starts_with("Failed to parse JSON string: "));
    let err = error("import \"json\" as json\ncall json.parse(5)");
    assert_eq!(err.code, "TYPE001");
}

#[test]
fn stringify_compact() {
    let out = with_json(
        "show call json.stringify({name: \"Ada\", tags: [1, 2.5, true], none: null})\n\
         show call json.stringify(\"q\\\"\")\n\
         show call json.stringify(42)",
    );
    assert_eq!(
        out,
        "{\"name\":\"Ada\",\"tags\":[1,2.5,true],\"none\":null}\n\"q\\\"\"\n42\n"
    );
}

#[test]
fn stringify_with_indent() {
    let out = with_json("show call json.stringify({a: [1]}, 2)");
    assert_eq!(out, "{\n  \"a\": [\n    1\n  ]\n}\n");
    let out = with_json("show call json.stringify([1], \"--\")");
    assert_eq!(out, "[\n--1\n]\n");
}

#[test]
fn stringify_drops_what_json_cannot_hold() {
    let out = with_json(
        "import \"math\" as m\n\
         show call json.stringify({f: len, n: call m.sqrt(- 0 1), xs: [len]})\n\
         show call json.stringify(len)",
    );
    assert_eq!(out, "{\"n\":null,\"xs\":[null]}\nnull\n");
}

#[test]
fn stringify_rejects_cycles() {
    let err = error(
        "import \"json\" as json\n\
         set o {}\n\
         set o.me o\n\
         call json.stringify(o)",
    );
    assert_eq!(err.code, "JSON001");
    assert_eq!(err.message, "Failed to stringify value to JSON: circular structure");
}

#[test]
fn stringify_indent_validation() {
    assert_eq!(error("import \"json\" as json\ncall json.stringify(1, - 0 1)").code, "ARG001");
    assert_eq!(error("import \"json\" as json\ncall json.stringify(1, true)").code, "TYPE001");
}
