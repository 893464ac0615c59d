use pretty_assertions::assert_eq;

use super::translate_replacement;
use crate::test_support::{error, output};

fn with_regex(body: &str) -> String {
    output(&format!("import \"regex\" as re\n{body}"))
}

#[test]
fn find_matches_global_and_first() {
    let out = with_regex(
        "show call re.find_matches(\"\\\\d+\", \"a1 b22 c333\")\n\
         show call re.find_matches(\"(\\\\w)(\\\\d+)\", \"a1 b22\", \"\")\n\
         show call re.find_matches(\"z\", \"abc\")",
    );
    assert_eq!(out, "[1, 22, 333]\n[a1, a, 1]\nnull\n");
}

#[test]
fn is_match_with_flags() {
    let out = with_regex(
        "show call re.is_match(\"^abc$\", \"ABC\")\n\
         show call re.is_match(\"^abc$\", \"ABC\", \"i\")\n\
         show call re.is_match(\"^b$\", \"a\\nb\", \"m\")",
    );
    assert_eq!(out, "false\ntrue\ntrue\n");
}

#[test]
fn replace_all_translates_references() {
    let out = with_regex(
        "show call re.replace_all(\"john smith\", \"(\\\\w+) (\\\\w+)\", \"$2, $1\")\n\
         show call re.replace_all(\"a-b-c\", \"-\", \"+\")\n\
         show call re.replace_all(\"a-b-c\", \"-\", \"+\", \"i\")\n\
         show call re.replace_all(\"x1\", \"(?<d>\\\\d)\", \"<$<d>>\")\n\
         show call re.replace_all(\"cost\", \"cost\", \"$$5\")",
    );
    assert_eq!(out, "smith, john\na+b+c\na+b-c\nx<1>\n$5\n");
}

#[test]
fn extract_returns_groups_with_nulls() {
    let out = with_regex(
        "show call re.extract(\"(a)(x)?\", \"ab\")\n\
         show call re.extract(\"q\", \"ab\")",
    );
    assert_eq!(out, "[a, a, null]\nnull\n");
}

#[test]
fn invalid_patterns_and_flags() {
    let err = error("import \"regex\" as re\ncall re.is_match(\"(\", \"x\")");
    assert_eq!(err.code, "REGEX001");
    assert!(err.message.starts_with("Invalid regular expression: "));
    let err = error("import \"regex\" as re\ncall re.is_match(\"a\", \"a\", \"y\")");
    assert_eq!(err.message, "Invalid regular expression: invalid flag 'y'");
}

#[test]
fn replacement_syntax() {
    assert_eq!(translate_replacement("$1-$2"), "${1}-${2}");
    assert_eq!(translate_replacement("[$&]"), "[${0}]");
    assert_eq!(translate_replacement("$<year>/"), "${year}/");
    assert_eq!(translate_replacement("$$ and $x"), "$$ and $$x");
    assert_eq!(translate_replacement("é$<n>é"), "é${n}é");
    assert_eq!(translate_replacement("$<open"), "$$<open");
}
