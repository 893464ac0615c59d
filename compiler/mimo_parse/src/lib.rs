//! Recursive descent parser for Mimo.
//!
//! Consumes the token list produced by `mimo_lexer` and builds a
//! [`Program`]. Binary and unary expressions are prefix (`+ a b`), so no
//! precedence climbing is needed: an operator is read, then its left
//! operand, and a right operand only when the expression has not ended.
//!
//! The first syntax error aborts parsing; there is no recovery.

mod cursor;
mod grammar;

pub use cursor::Cursor;

use std::sync::Arc;

use mimo_diagnostic::MimoError;
use mimo_ir::{Program, Token, TokenKind};

/// Keywords that close a block.
pub const END_KEYWORDS: &[&str] = &["end", "else", "catch", "case", "default"];

/// Keywords that can only begin a statement; seeing one ends an expression.
const STATEMENT_START_KEYWORDS: &[&str] = &[
    "set",
    "let",
    "const",
    "global",
    "if",
    "guard",
    "while",
    "for",
    "loop",
    "function",
    "call",
    "show",
    "return",
    "try",
    "throw",
    "match",
    "import",
    "export",
    "break",
    "continue",
    "destructure",
];

pub(crate) type ParseResult<T> = Result<T, MimoError>;

/// Parser state.
pub struct Parser<'a> {
    cursor: Cursor<'a>,
    source: Option<&'a str>,
    file: Arc<str>,
}

impl<'a> Parser<'a> {
    pub fn new(tokens: &'a [Token], file: impl Into<Arc<str>>) -> Self {
        let file = file.into();
        Parser {
            cursor: Cursor::new(tokens, &file),
            source: None,
            file,
        }
    }

    /// Attach the source text so syntax errors carry the offending line.
    #[must_use]
    pub fn with_source(mut self, source: &'a str) -> Self {
        self.source = Some(source);
        self
    }

    /// Parse statements until end of input.
    #[tracing::instrument(level = "debug", skip_all, fields(file = %self.file))]
    pub fn parse_program(mut self) -> ParseResult<Program> {
        let location = self.cursor.current().location();
        let mut statements = Vec::new();
        while !self.cursor.is_at_end() {
            statements.push(self.parse_statement()?);
        }
        tracing::debug!(statements = statements.len(), "parsed program");
        Ok(Program {
            statements,
            location,
        })
    }

    // Error construction

    #[cold]
    pub(crate) fn error_at(
        &self,
        code: &'static str,
        message: impl Into<String>,
        token: &Token,
        suggestion: &str,
    ) -> MimoError {
        let err = MimoError::syntax_at(code, message, token).with_suggestion(suggestion);
        match self.source {
            Some(source) => err.with_source(source),
            None => err,
        }
    }

    #[cold]
    pub(crate) fn error_here(
        &self,
        code: &'static str,
        message: impl Into<String>,
        suggestion: &str,
    ) -> MimoError {
        self.error_at(code, message, self.cursor.current(), suggestion)
    }

    // Expectation helpers

    /// Consume a token of `kind` (and text `value`, when given) or fail.
    pub(crate) fn expect(
        &mut self,
        kind: TokenKind,
        value: Option<&str>,
        code: &'static str,
        suggestion: &str,
    ) -> ParseResult<Token> {
        let tok = self.cursor.current();
        if tok.kind == kind && value.is_none_or(|v| tok.value == v) {
            return Ok(self.cursor.advance());
        }
        let wanted = match value {
            Some(v) => format!("'{v}' ({kind})"),
            None => kind.to_string(),
        };
        let message = format!("Expected {wanted} but got {}.", describe(tok));
        Err(self.error_here(code, message, suggestion))
    }

    pub(crate) fn expect_keyword(
        &mut self,
        word: &str,
        code: &'static str,
        suggestion: &str,
    ) -> ParseResult<Token> {
        self.expect_keyword_in(&[word], code, suggestion)
    }

    /// Consume a keyword from `words` or fail.
    pub(crate) fn expect_keyword_in(
        &mut self,
        words: &[&str],
        code: &'static str,
        suggestion: &str,
    ) -> ParseResult<Token> {
        let tok = self.cursor.current();
        if tok.kind != TokenKind::Keyword {
            let message = format!("Expected keyword but got {}.", describe(tok));
            return Err(self.error_here(code, message, suggestion));
        }
        if words.contains(&tok.value.as_str()) {
            return Ok(self.cursor.advance());
        }
        let message = match words {
            [single] => format!("Expected '{single}' (keyword) but got {}.", describe(tok)),
            _ => {
                let expected: Vec<String> = words.iter().map(|w| format!("'{w}'")).collect();
                format!(
                    "Expected one of {} but got {}.",
                    expected.join(", "),
                    describe(tok)
                )
            }
        };
        Err(self.error_here(code, message, suggestion))
    }

    /// Consume an identifier token or fail.
    pub(crate) fn parse_identifier(
        &mut self,
        code: &'static str,
        suggestion: &str,
    ) -> ParseResult<Token> {
        let tok = self.cursor.current();
        if tok.kind == TokenKind::Identifier {
            return Ok(self.cursor.advance());
        }
        let message = format!("Expected an identifier but got {} '{}'.", tok.kind, tok.value);
        Err(self.error_here(code, message, suggestion))
    }

    /// Whether the current token closes a block.
    pub(crate) fn at_block_end(&self) -> bool {
        self.cursor
            .current_keyword()
            .is_some_and(|word| END_KEYWORDS.contains(&word))
    }
}

/// `'value' (Kind)`, or just the kind for tokens without text.
fn describe(tok: &Token) -> String {
    if tok.value.is_empty() {
        tok.kind.to_string()
    } else {
        format!("'{}' ({})", tok.value, tok.kind)
    }
}

/// Parse a token list into a program.
pub fn parse(tokens: &[Token], file: &str) -> Result<Program, MimoError> {
    Parser::new(tokens, file).parse_program()
}

/// Parse with `source` available for error snippets.
pub fn parse_with_source(tokens: &[Token], file: &str, source: &str) -> Result<Program, MimoError> {
    Parser::new(tokens, file).with_source(source).parse_program()
}
