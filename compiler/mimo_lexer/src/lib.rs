//! Lexer for Mimo.
//!
//! Normal code is tokenized with logos. Template literals need context the
//! regular grammar cannot express, so the lexer carries a four-state machine:
//!
//! ```text
//!   Normal ──`──▶ Fragment ──${──▶ Interpolation ──}──▶ AfterInterpolation
//!     ▲              │                                        │
//!     └──────`───────┴──────────────────`─────────────────────┘
//! ```
//!
//! In `Fragment`/`AfterInterpolation` the lexer scans raw text (whitespace
//! and comment markers included) up to the next backtick or `${`. Inside an
//! interpolation it lexes normally until a `}`.
//!
//! Nesting is tracked with a single depth counter, so a template literal
//! inside another template's interpolation ends the outer template early.

mod line_index;
mod raw_token;

use std::sync::Arc;

use logos::Logos;
use mimo_diagnostic::MimoError;
use mimo_ir::{Span, Token, TokenKind, KEYWORDS};

use line_index::LineIndex;
use raw_token::RawToken;

/// Where the lexer is relative to template literals.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum TemplateState {
    Normal,
    /// Just saw an opening backtick.
    Fragment,
    /// Inside `${ ... }`.
    Interpolation,
    /// Just saw the `}` closing an interpolation.
    AfterInterpolation,
}

/// Pull-based lexer over one source file.
pub struct Lexer<'src> {
    source: &'src str,
    file: Arc<str>,
    pos: usize,
    state: TemplateState,
    depth: u32,
    lines: LineIndex,
}

impl<'src> Lexer<'src> {
    pub fn new(source: &'src str, file: impl Into<Arc<str>>) -> Self {
        Lexer {
            source,
            file: file.into(),
            pos: 0,
            state: TemplateState::Normal,
            depth: 0,
            lines: LineIndex::new(source),
        }
    }

    pub fn state(&self) -> TemplateState {
        self.state
    }

    /// Number of currently open template literals.
    pub fn template_depth(&self) -> u32 {
        self.depth
    }

    /// Produce the next token, or `None` at end of input.
    pub fn next_token(&mut self) -> Result<Option<Token>, MimoError> {
        if matches!(
            self.state,
            TemplateState::Fragment | TemplateState::AfterInterpolation
        ) {
            return self.template_token();
        }
        self.normal_token()
    }

    fn rest(&self) -> &'src str {
        &self.source[self.pos..]
    }

    fn make(&self, kind: TokenKind, value: impl Into<String>, start: usize, end: usize) -> Token {
        let (line, column) = self.lines.line_col(self.source, start);
        Token::new(
            kind,
            value,
            Span::from_range(start..end),
            line,
            column,
            Arc::clone(&self.file),
        )
    }

    #[cold]
    fn error_at(
        &self,
        offset: usize,
        code: &'static str,
        message: String,
        suggestion: &str,
    ) -> MimoError {
        let (line, column) = self.lines.line_col(self.source, offset);
        let width = self.source[offset..].chars().next().map_or(1, char::len_utf8);
        let location = mimo_ir::Location::new(
            Arc::clone(&self.file),
            line,
            column,
            Span::from_range(offset..offset + width),
        );
        MimoError::lexer(code, message, location)
            .with_suggestion(suggestion)
            .with_source(self.source)
    }

    fn normal_token(&mut self) -> Result<Option<Token>, MimoError> {
        let base = self.pos;
        let mut raw = RawToken::lexer(self.rest());
        let Some(result) = raw.next() else {
            self.pos = self.source.len();
            return Ok(None);
        };
        let range = raw.span();
        let start = base + range.start;
        let end = base + range.end;
        let slice = raw.slice();

        let Ok(kind) = result else {
            let ch = slice.chars().next().unwrap_or('?');
            return Err(self.error_at(
                start,
                "LEX007",
                format!("Unrecognized symbol or character: '{ch}'."),
                &format!(
                    "The symbol or character '{ch}' is not recognized. Check for typos or unsupported operators."
                ),
            ));
        };

        self.pos = end;
        let token = match kind {
            RawToken::Quote => return self.string_token(start).map(Some),
            RawToken::Word => {
                let kind = match slice {
                    "true" | "false" => TokenKind::Boolean,
                    "null" => TokenKind::Null,
                    w if KEYWORDS.contains(&w) => TokenKind::Keyword,
                    _ => TokenKind::Identifier,
                };
                self.make(kind, slice, start, end)
            }
            RawToken::Number => self.make(TokenKind::Number, slice, start, end),
            RawToken::Backtick => {
                self.state = TemplateState::Fragment;
                self.depth += 1;
                self.make(TokenKind::Backtick, "`", start, end)
            }
            RawToken::RBrace if self.state == TemplateState::Interpolation => {
                self.state = TemplateState::AfterInterpolation;
                self.make(TokenKind::InterpolationEnd, "}", start, end)
            }
            RawToken::RBrace => self.make(TokenKind::RBrace, slice, start, end),
            RawToken::LParen => self.make(TokenKind::LParen, slice, start, end),
            RawToken::RParen => self.make(TokenKind::RParen, slice, start, end),
            RawToken::LBracket => self.make(TokenKind::LBracket, slice, start, end),
            RawToken::RBracket => self.make(TokenKind::RBracket, slice, start, end),
            RawToken::LBrace => self.make(TokenKind::LBrace, slice, start, end),
            RawToken::Comma => self.make(TokenKind::Comma, slice, start, end),
            RawToken::Colon => self.make(TokenKind::Colon, slice, start, end),
            RawToken::Spread => self.make(TokenKind::Spread, slice, start, end),
            RawToken::Range => self.make(TokenKind::Range, slice, start, end),
            RawToken::Operator => self.make(TokenKind::Operator, slice, start, end),
            // Skipped by its callback; never yielded.
            RawToken::BlockComment => return self.normal_token(),
        };
        Ok(Some(token))
    }

    /// Scan a double-quoted string whose opening quote is at `start`.
    fn string_token(&mut self, start: usize) -> Result<Token, MimoError> {
        let mut value = String::new();
        let mut chars = self.source[start + 1..].char_indices();

        while let Some((i, ch)) = chars.next() {
            let at = start + 1 + i;
            match ch {
                '"' => {
                    self.pos = at + 1;
                    return Ok(self.make(TokenKind::String, value, start, self.pos));
                }
                '\n' => {
                    return Err(self.error_at(
                        at,
                        "LEX004",
                        "Unterminated string literal. Newline encountered.".to_string(),
                        "String literals must be closed on the same line or use '\\n' for a newline character.",
                    ));
                }
                '\\' => {
                    let Some((j, escaped)) = chars.next() else {
                        return Err(self.error_at(
                            self.source.len(),
                            "LEX005",
                            "Unterminated escape sequence at end of file.".to_string(),
                            "",
                        ));
                    };
                    value.push(match escaped {
                        'n' => '\n',
                        't' => '\t',
                        'r' => '\r',
                        '\\' => '\\',
                        '"' => '"',
                        other => {
                            return Err(self.error_at(
                                start + 1 + j,
                                "LEX003",
                                format!("Invalid escape sequence: \\{other}"),
                                "",
                            ));
                        }
                    });
                }
                other => value.push(other),
            }
        }

        Err(self.error_at(
            self.source.len(),
            "LEX005",
            "Unterminated string literal.".to_string(),
            "A string starting with \" was not properly closed.",
        ))
    }

    /// Token inside a template literal, outside any interpolation.
    fn template_token(&mut self) -> Result<Option<Token>, MimoError> {
        let start = self.pos;
        let rest = self.rest();
        if rest.is_empty() {
            return Ok(None);
        }
        if rest.starts_with('`') {
            self.pos += 1;
            self.state = TemplateState::Normal;
            self.depth = self.depth.saturating_sub(1);
            return Ok(Some(self.make(TokenKind::Backtick, "`", start, self.pos)));
        }
        if rest.starts_with("${") {
            self.pos += 2;
            self.state = TemplateState::Interpolation;
            return Ok(Some(self.make(
                TokenKind::InterpolationStart,
                "${",
                start,
                self.pos,
            )));
        }

        let mut fragment = String::new();
        let mut chars = rest.char_indices().peekable();
        let mut end = self.source.len();
        while let Some(&(i, ch)) = chars.peek() {
            if ch == '`' || rest[i..].starts_with("${") {
                end = start + i;
                break;
            }
            chars.next();
            if ch != '\\' {
                fragment.push(ch);
                continue;
            }
            let Some((j, escaped)) = chars.next() else {
                return Err(self.error_at(
                    self.source.len(),
                    "LEX004",
                    "Unterminated escape sequence in template fragment.".to_string(),
                    "Complete the escape sequence or close the template literal.",
                ));
            };
            fragment.push(match escaped {
                'n' => '\n',
                't' => '\t',
                'r' => '\r',
                '\\' => '\\',
                '`' => '`',
                '$' => '$',
                '{' => '{',
                other => {
                    return Err(self.error_at(
                        start + j,
                        "LEX005",
                        format!("Unrecognized escape sequence in template: '\\{other}'."),
                        "Use valid escape sequences like '\\n', '\\t', '\\\\', '\\`', '\\$'.",
                    ));
                }
            });
        }

        self.pos = end;
        Ok(Some(self.make(TokenKind::StringFragment, fragment, start, end)))
    }
}

/// Lex a whole file, appending an `Eof` token.
#[tracing::instrument(level = "debug", skip(source))]
pub fn tokenize(source: &str, file: &str) -> Result<Vec<Token>, MimoError> {
    let mut lexer = Lexer::new(source, file);
    let mut tokens = Vec::new();
    while let Some(token) = lexer.next_token()? {
        tokens.push(token);
    }
    let eof = source.len();
    tokens.push(lexer.make(TokenKind::Eof, "", eof, eof));
    tracing::trace!(count = tokens.len(), "lexed");
    Ok(tokens)
}

#[cfg(test)]
mod tests;
