use pretty_assertions::assert_eq;

use crate::test_support::{error, output};

fn with_object(body: &str) -> String {
    output(&format!("import \"object\" as obj\n{body}"))
}

#[test]
fn merge_later_wins_and_keeps_first_position() {
    let out = with_object(
        "set a {x: 1, y: 2}\n\
         show call obj.merge(a, {y: 3, z: 4})\n\
         show a\n\
         show call obj.merge()",
    );
    assert_eq!(out, "{x: 1, y: 3, z: 4}\n{x: 1, y: 2}\n{}\n");
}

#[test]
fn pick_and_omit() {
    let out = with_object(
        "set o {a: 1, b: 2, c: 3}\n\
         show call obj.pick(o, [\"c\", \"a\", \"zz\"])\n\
         show call obj.omit(o, [\"b\"])",
    );
    assert_eq!(out, "{c: 3, a: 1}\n{a: 1, c: 3}\n");
    let err = error("import \"object\" as obj\ncall obj.pick({}, [1])");
    assert_eq!(
        err.message,
        "pick() expects key list to contain strings. Got 'number' at index 0."
    );
}

#[test]
fn map_values_passes_key() {
    let out = with_object(
        "show call obj.map_values({a: 1, b: 2}, fn v -> return * v 2 end)\n\
         show call obj.map_values({a: 1}, fn v k -> return `${k}=${v}` end)",
    );
    assert_eq!(out, "{a: 2, b: 4}\n{a: a=1}\n");
}

#[test]
fn from_entries_stringifies_keys() {
    let out = with_object(
        "show call obj.from_entries([[\"a\", 1], [2, \"two\"], [\"a\", 3]])\n\
         show call obj.is_empty({})\n\
         show call obj.is_empty({k: null})",
    );
    assert_eq!(out, "{a: 3, 2: two}\ntrue\nfalse\n");
    let err = error("import \"object\" as obj\ncall obj.from_entries([[\"a\"]])");
    assert_eq!(
        err.message,
        "from_entries() expects each item to be an array [key, value]. Invalid entry at index 0."
    );
}

#[test]
fn arguments_must_be_objects() {
    let err = error("import \"object\" as obj\ncall obj.merge({}, [1])");
    assert_eq!(err.code, "TYPE001");
    assert_eq!(err.message, "merge() expects an object as argument 2. Got 'array'.");
    assert_eq!(
        err.suggestion.as_deref(),
        Some("Provide a plain object for argument 2 of merge().")
    );
}
