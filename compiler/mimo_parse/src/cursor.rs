//! Token cursor for navigating the token stream.
//!
//! Provides lookahead, consumption and kind/text checks. The stream always
//! ends with an `Eof` token, so `current()` is total.

use std::borrow::Cow;
use std::sync::Arc;

use mimo_ir::{Span, Token, TokenKind};

pub struct Cursor<'a> {
    tokens: Cow<'a, [Token]>,
    pos: usize,
}

impl<'a> Cursor<'a> {
    /// Create a cursor at the start of `tokens`.
    ///
    /// A trailing `Eof` token is synthesized when the slice lacks one.
    pub fn new(tokens: &'a [Token], file: &Arc<str>) -> Self {
        let tokens = match tokens.last() {
            Some(last) if last.kind == TokenKind::Eof => Cow::Borrowed(tokens),
            Some(last) => {
                let mut owned = tokens.to_vec();
                let column = last.column + last.value.chars().count() as u32;
                owned.push(Token::new(
                    TokenKind::Eof,
                    "",
                    Span::point(last.span.end),
                    last.line,
                    column,
                    Arc::clone(&last.file),
                ));
                Cow::Owned(owned)
            }
            None => Cow::Owned(vec![Token::new(
                TokenKind::Eof,
                "",
                Span::DUMMY,
                1,
                1,
                Arc::clone(file),
            )]),
        };
        Cursor { tokens, pos: 0 }
    }

    /// Position in the token stream, used for progress checks in tests.
    pub fn position(&self) -> usize {
        self.pos
    }

    #[inline]
    pub fn current(&self) -> &Token {
        self.peek(0)
    }

    #[inline]
    pub fn current_kind(&self) -> TokenKind {
        self.current().kind
    }

    /// Token `offset` places ahead, clamped to the trailing `Eof`.
    pub fn peek(&self, offset: usize) -> &Token {
        let last = self.tokens.len() - 1;
        &self.tokens[(self.pos + offset).min(last)]
    }

    /// The token consumed most recently.
    pub fn previous(&self) -> Option<&Token> {
        self.pos.checked_sub(1).and_then(|i| self.tokens.get(i))
    }

    #[inline]
    pub fn is_at_end(&self) -> bool {
        self.current_kind() == TokenKind::Eof
    }

    #[inline]
    pub fn check(&self, kind: TokenKind) -> bool {
        self.current_kind() == kind
    }

    #[inline]
    pub fn check_keyword(&self, word: &str) -> bool {
        self.current().is_keyword(word)
    }

    #[inline]
    pub fn check_operator(&self, op: &str) -> bool {
        self.current().is_operator(op)
    }

    /// Current keyword text, if the current token is a keyword.
    pub fn current_keyword(&self) -> Option<&str> {
        let tok = self.current();
        (tok.kind == TokenKind::Keyword).then_some(tok.value.as_str())
    }

    /// Whether the current token starts exactly where the previous one ended.
    pub fn current_adjacent_to_previous(&self) -> bool {
        self.previous()
            .is_some_and(|prev| prev.span.is_adjacent_to(self.current().span))
    }

    /// Consume and return the current token. `Eof` is never consumed.
    pub fn advance(&mut self) -> Token {
        let tok = self.current().clone();
        if !self.is_at_end() {
            self.pos += 1;
        }
        tok
    }

    /// Consume the current token if it has `kind`.
    pub fn eat(&mut self, kind: TokenKind) -> bool {
        if self.check(kind) {
            self.advance();
            true
        } else {
            false
        }
    }

    pub fn eat_keyword(&mut self, word: &str) -> bool {
        if self.check_keyword(word) {
            self.advance();
            true
        } else {
            false
        }
    }

    pub fn eat_operator(&mut self, op: &str) -> bool {
        if self.check_operator(op) {
            self.advance();
            true
        } else {
            false
        }
    }
}
