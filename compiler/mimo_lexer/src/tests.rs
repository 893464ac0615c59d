#![expect(clippy::unwrap_used, reason = "tests unwrap lexer results")]

use super::*;
use pretty_assertions::assert_eq;
use proptest::prelude::*;

fn kinds(source: &str) -> Vec<(TokenKind, String)> {
    tokenize(source, "test.mimo")
        .unwrap()
        .into_iter()
        .map(|t| (t.kind, t.value))
        .collect()
}

fn k(kind: TokenKind, value: &str) -> (TokenKind, String) {
    (kind, value.to_string())
}

#[test]
fn keywords_identifiers_and_literals() {
    assert_eq!(
        kinds("set total true null show"),
        vec![
            k(TokenKind::Keyword, "set"),
            k(TokenKind::Identifier, "total"),
            k(TokenKind::Boolean, "true"),
            k(TokenKind::Null, "null"),
            k(TokenKind::Keyword, "show"),
            k(TokenKind::Eof, ""),
        ]
    );
}

#[test]
fn numbers() {
    assert_eq!(
        kinds("42 3.14 1e3 2.5E-2 7."),
        vec![
            k(TokenKind::Number, "42"),
            k(TokenKind::Number, "3.14"),
            k(TokenKind::Number, "1e3"),
            k(TokenKind::Number, "2.5E-2"),
            k(TokenKind::Number, "7"),
            k(TokenKind::Operator, "."),
            k(TokenKind::Eof, ""),
        ]
    );
}

#[test]
fn range_between_numbers() {
    assert_eq!(
        kinds("1..5"),
        vec![
            k(TokenKind::Number, "1"),
            k(TokenKind::Range, ".."),
            k(TokenKind::Number, "5"),
            k(TokenKind::Eof, ""),
        ]
    );
}

#[test]
fn operators_match_longest_first() {
    assert_eq!(
        kinds("=== !== == -> ?. ?? |> ... ! ="),
        vec![
            k(TokenKind::Operator, "==="),
            k(TokenKind::Operator, "!=="),
            k(TokenKind::Operator, "=="),
            k(TokenKind::Operator, "->"),
            k(TokenKind::Operator, "?."),
            k(TokenKind::Operator, "??"),
            k(TokenKind::Operator, "|>"),
            k(TokenKind::Spread, "..."),
            k(TokenKind::Operator, "!"),
            k(TokenKind::Operator, "="),
            k(TokenKind::Eof, ""),
        ]
    );
}

#[test]
fn comments_are_skipped() {
    assert_eq!(
        kinds("show 1 // trailing\n/* block\n comment */ show 2 /* open"),
        vec![
            k(TokenKind::Keyword, "show"),
            k(TokenKind::Number, "1"),
            k(TokenKind::Keyword, "show"),
            k(TokenKind::Number, "2"),
            k(TokenKind::Eof, ""),
        ]
    );
}

#[test]
fn string_escapes_are_decoded() {
    let tokens = tokenize(r#""a\tb\n\"q\"\\""#, "t").unwrap();
    assert_eq!(tokens[0].kind, TokenKind::String);
    assert_eq!(tokens[0].value, "a\tb\n\"q\"\\");
    assert_eq!(tokens[0].span, Span::new(0, 15));
}

#[test]
fn locations_are_one_based_and_skip_whitespace() {
    let tokens = tokenize("set x 1\n  show x", "main.mimo").unwrap();
    let show = &tokens[3];
    assert_eq!(show.value, "show");
    assert_eq!((show.line, show.column), (2, 3));
    assert_eq!(show.span, Span::new(10, 14));
    assert_eq!(&*show.file, "main.mimo");
}

#[test]
fn template_literal_states() {
    assert_eq!(
        kinds("`Hello, ${name}! ${ + 1 2 }`"),
        vec![
            k(TokenKind::Backtick, "`"),
            k(TokenKind::StringFragment, "Hello, "),
            k(TokenKind::InterpolationStart, "${"),
            k(TokenKind::Identifier, "name"),
            k(TokenKind::InterpolationEnd, "}"),
            k(TokenKind::StringFragment, "! "),
            k(TokenKind::InterpolationStart, "${"),
            k(TokenKind::Operator, "+"),
            k(TokenKind::Number, "1"),
            k(TokenKind::Number, "2"),
            k(TokenKind::InterpolationEnd, "}"),
            k(TokenKind::Backtick, "`"),
            k(TokenKind::Eof, ""),
        ]
    );
}

#[test]
fn whitespace_between_interpolations_is_a_fragment() {
    assert_eq!(
        kinds("` ${a} ${b}`"),
        vec![
            k(TokenKind::Backtick, "`"),
            k(TokenKind::StringFragment, " "),
            k(TokenKind::InterpolationStart, "${"),
            k(TokenKind::Identifier, "a"),
            k(TokenKind::InterpolationEnd, "}"),
            k(TokenKind::StringFragment, " "),
            k(TokenKind::InterpolationStart, "${"),
            k(TokenKind::Identifier, "b"),
            k(TokenKind::InterpolationEnd, "}"),
            k(TokenKind::Backtick, "`"),
            k(TokenKind::Eof, ""),
        ]
    );
}

#[test]
fn template_fragment_keeps_whitespace_comments_and_newlines() {
    assert_eq!(
        kinds("`  a // b\n  c`"),
        vec![
            k(TokenKind::Backtick, "`"),
            k(TokenKind::StringFragment, "  a // b\n  c"),
            k(TokenKind::Backtick, "`"),
            k(TokenKind::Eof, ""),
        ]
    );
}

#[test]
fn template_escapes() {
    let tokens = tokenize(r"`\${x} \` \n`", "t").unwrap();
    assert_eq!(tokens[1].kind, TokenKind::StringFragment);
    assert_eq!(tokens[1].value, "${x} ` \n");
}

#[test]
fn template_state_and_depth_tracking() {
    let mut lexer = Lexer::new("`a${b}c`", "t");
    assert_eq!(lexer.state(), TemplateState::Normal);
    lexer.next_token().unwrap();
    assert_eq!(lexer.state(), TemplateState::Fragment);
    assert_eq!(lexer.template_depth(), 1);
    lexer.next_token().unwrap(); // a
    lexer.next_token().unwrap(); // ${
    assert_eq!(lexer.state(), TemplateState::Interpolation);
    lexer.next_token().unwrap(); // b
    lexer.next_token().unwrap(); // }
    assert_eq!(lexer.state(), TemplateState::AfterInterpolation);
    lexer.next_token().unwrap(); // c
    lexer.next_token().unwrap(); // `
    assert_eq!(lexer.state(), TemplateState::Normal);
    assert_eq!(lexer.template_depth(), 0);
    assert_eq!(lexer.next_token().unwrap(), None);
}

#[test]
fn braces_outside_interpolation_are_plain() {
    assert_eq!(
        kinds("{a: 1}"),
        vec![
            k(TokenKind::LBrace, "{"),
            k(TokenKind::Identifier, "a"),
            k(TokenKind::Colon, ":"),
            k(TokenKind::Number, "1"),
            k(TokenKind::RBrace, "}"),
            k(TokenKind::Eof, ""),
        ]
    );
}

#[test]
fn newline_in_string_is_an_error() {
    let err = tokenize("show \"abc\ndef\"", "t").unwrap_err();
    assert_eq!(err.code, "LEX004");
    assert_eq!(err.message, "Unterminated string literal. Newline encountered.");
    assert_eq!((err.location.line, err.location.column), (1, 10));
}

#[test]
fn unterminated_string() {
    let err = tokenize("\"abc", "t").unwrap_err();
    assert_eq!(err.code, "LEX005");
    assert_eq!(err.message, "Unterminated string literal.");
    assert_eq!(
        err.suggestion.as_deref(),
        Some("A string starting with \" was not properly closed.")
    );
}

#[test]
fn escape_errors() {
    assert_eq!(tokenize(r#""a\q""#, "t").unwrap_err().code, "LEX003");
    assert_eq!(tokenize("\"a\\", "t").unwrap_err().code, "LEX005");
    assert_eq!(tokenize(r"`a\q`", "t").unwrap_err().code, "LEX005");
    assert_eq!(tokenize("`a\\", "t").unwrap_err().code, "LEX004");
}

#[test]
fn unrecognized_symbol() {
    let err = tokenize("set a 1\nshow @a", "t").unwrap_err();
    assert_eq!(err.code, "LEX007");
    assert_eq!(err.message, "Unrecognized symbol or character: '@'.");
    assert_eq!((err.location.line, err.location.column), (2, 6));
    assert_eq!(err.snippet.as_deref(), Some("show @a"));
}

proptest! {
    #[test]
    fn never_panics(source in "\\PC{0,64}") {
        let _ = tokenize(&source, "fuzz.mimo");
    }

    #[test]
    fn tokens_are_ordered(source in "[a-z0-9 +\\-*/(){}\\[\\],:\n]{0,64}") {
        if let Ok(tokens) = tokenize(&source, "fuzz.mimo") {
            for pair in tokens.windows(2) {
                prop_assert!(pair[0].span.end <= pair[1].span.start);
            }
            prop_assert_eq!(tokens.last().map(|t| t.kind), Some(TokenKind::Eof));
        }
    }
}
