//! Token types for the Mimo lexer.

use std::fmt;
use std::sync::Arc;

use crate::{Location, Span};

/// Reserved words. `true`, `false` and `null` are lexed as literals instead.
pub const KEYWORDS: &[&str] = &[
    "set",
    "let",
    "const",
    "global",
    "if",
    "else",
    "while",
    "for",
    "in",
    "match",
    "case",
    "default",
    "break",
    "continue",
    "function",
    "fn",
    "call",
    "return",
    "try",
    "catch",
    "throw",
    "import",
    "export",
    "from",
    "as",
    "show",
    "end",
    "guard",
    "loop",
    "destructure",
    "when",
    "not",
    "and",
    "or",
    "then",
];

/// Classification of a token.
///
/// The token's text lives in [`Token::value`]; kinds carry no payload so
/// the parser can compare them cheaply.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum TokenKind {
    Identifier,
    Keyword,
    Number,
    String,
    Boolean,
    Null,
    Operator,
    LParen,
    RParen,
    LBracket,
    RBracket,
    LBrace,
    RBrace,
    Comma,
    Colon,
    /// `...`
    Spread,
    /// `..`
    Range,
    Backtick,
    /// Literal text between template delimiters, escapes already decoded.
    StringFragment,
    /// `${` inside a template literal.
    InterpolationStart,
    /// `}` closing an interpolation.
    InterpolationEnd,
    Eof,
}

impl TokenKind {
    /// Human-readable name used in syntax error messages.
    pub const fn display_name(self) -> &'static str {
        match self {
            TokenKind::Identifier => "Identifier",
            TokenKind::Keyword => "Keyword",
            TokenKind::Number => "Number",
            TokenKind::String => "String",
            TokenKind::Boolean => "Boolean",
            TokenKind::Null => "Null",
            TokenKind::Operator => "Operator",
            TokenKind::LParen => "LParen",
            TokenKind::RParen => "RParen",
            TokenKind::LBracket => "LBracket",
            TokenKind::RBracket => "RBracket",
            TokenKind::LBrace => "LBrace",
            TokenKind::RBrace => "RBrace",
            TokenKind::Comma => "Comma",
            TokenKind::Colon => "Colon",
            TokenKind::Spread => "Spread",
            TokenKind::Range => "Range",
            TokenKind::Backtick => "Backtick",
            TokenKind::StringFragment => "StringFragment",
            TokenKind::InterpolationStart => "InterpolationStart",
            TokenKind::InterpolationEnd => "InterpolationEnd",
            TokenKind::Eof => "EOF",
        }
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

/// A located token.
///
/// `value` is the decoded text: escapes are resolved for strings and
/// template fragments, numbers keep their source spelling.
#[derive(Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Token {
    pub kind: TokenKind,
    pub value: String,
    pub span: Span,
    pub line: u32,
    pub column: u32,
    #[cfg_attr(feature = "serde", serde(skip))]
    pub file: Arc<str>,
}

impl Token {
    pub fn new(
        kind: TokenKind,
        value: impl Into<String>,
        span: Span,
        line: u32,
        column: u32,
        file: Arc<str>,
    ) -> Self {
        Token {
            kind,
            value: value.into(),
            span,
            line,
            column,
            file,
        }
    }

    /// Create an unlocated token for tests.
    pub fn dummy(kind: TokenKind, value: impl Into<String>) -> Self {
        Token::new(kind, value, Span::DUMMY, 1, 1, Arc::from("<test>"))
    }

    /// Check kind and text together.
    #[inline]
    pub fn is(&self, kind: TokenKind, value: &str) -> bool {
        self.kind == kind && self.value == value
    }

    #[inline]
    pub fn is_keyword(&self, word: &str) -> bool {
        self.is(TokenKind::Keyword, word)
    }

    #[inline]
    pub fn is_operator(&self, op: &str) -> bool {
        self.is(TokenKind::Operator, op)
    }

    pub fn location(&self) -> Location {
        Location::new(Arc::clone(&self.file), self.line, self.column, self.span)
    }
}

impl fmt::Debug for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:?}({:?}) @ {}:{}",
            self.kind, self.value, self.line, self.column
        )
    }
}

#[cfg(test)]
mod tests;
