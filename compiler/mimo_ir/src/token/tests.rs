use super::*;
use pretty_assertions::assert_eq;

#[test]
fn keyword_table_has_no_literals() {
    for literal in ["true", "false", "null"] {
        assert!(!KEYWORDS.contains(&literal), "{literal} must lex as a literal");
    }
}

#[test]
fn token_predicates() {
    let kw = Token::dummy(TokenKind::Keyword, "end");
    assert!(kw.is_keyword("end"));
    assert!(!kw.is_keyword("else"));
    assert!(!kw.is_operator("end"));

    let op = Token::dummy(TokenKind::Operator, "->");
    assert!(op.is_operator("->"));
}

#[test]
fn location_copies_position() {
    let token = Token::new(
        TokenKind::Identifier,
        "total",
        Span::new(10, 15),
        3,
        5,
        Arc::from("main.mimo"),
    );
    let loc = token.location();
    assert_eq!(loc.to_string(), "main.mimo:3:5");
    assert_eq!(loc.start(), 10);
    assert_eq!(loc.length(), 5);
}

#[test]
fn display_names() {
    assert_eq!(TokenKind::Eof.to_string(), "EOF");
    assert_eq!(TokenKind::LBracket.display_name(), "LBracket");
}
