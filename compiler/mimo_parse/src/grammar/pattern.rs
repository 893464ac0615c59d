//! Destructuring targets and `match` patterns.

use mimo_ir::{DestructurePattern, Literal, MatchPattern, TokenKind};

use crate::{ParseResult, Parser};

impl Parser<'_> {
    /// `[a, b]` or `{a, b}`
    pub(crate) fn parse_destructuring_pattern(&mut self) -> ParseResult<DestructurePattern> {
        match self.cursor.current_kind() {
            TokenKind::LBracket => {
                self.cursor.advance();
                let names = self.parse_pattern_names(
                    TokenKind::RBracket,
                    "SYN110",
                    "Expected an identifier in destructuring pattern.",
                )?;
                self.expect(
                    TokenKind::RBracket,
                    None,
                    "SYN111",
                    "Expected a closing \"]\" for array destructuring pattern.",
                )?;
                Ok(DestructurePattern::Array(names))
            }
            TokenKind::LBrace => {
                self.cursor.advance();
                let names = self.parse_pattern_names(
                    TokenKind::RBrace,
                    "SYN116",
                    "Expected an identifier for property in object destructuring.",
                )?;
                self.expect(
                    TokenKind::RBrace,
                    None,
                    "SYN117",
                    "Expected \"}\" to close object destructuring pattern.",
                )?;
                Ok(DestructurePattern::Object(names))
            }
            _ => Err(self.error_here(
                "SYN112",
                "Expected an array or object pattern (e.g., [a, b] or {a, b}) for destructuring.",
                "",
            )),
        }
    }

    fn parse_pattern_names(
        &mut self,
        close: TokenKind,
        code: &'static str,
        suggestion: &str,
    ) -> ParseResult<Vec<String>> {
        let mut names = Vec::new();
        if self.cursor.check(close) {
            return Ok(names);
        }
        loop {
            names.push(self.parse_identifier(code, suggestion)?.value);
            if !self.cursor.eat(TokenKind::Comma) {
                return Ok(names);
            }
        }
    }

    /// Pattern after `case`.
    pub(crate) fn parse_match_pattern(&mut self) -> ParseResult<MatchPattern> {
        if self.cursor.check(TokenKind::LBracket) {
            self.parse_array_pattern(
                ("SYN087", "Expected an opening square bracket to start an array pattern."),
                ("SYN088", "Expected a closing square bracket to end an array pattern."),
            )
        } else {
            self.parse_pattern_element()
        }
    }

    fn parse_array_pattern(
        &mut self,
        open: (&'static str, &str),
        close: (&'static str, &str),
    ) -> ParseResult<MatchPattern> {
        self.expect(TokenKind::LBracket, None, open.0, open.1)?;
        let mut elements = Vec::new();
        if !self.cursor.check(TokenKind::RBracket) {
            loop {
                elements.push(self.parse_pattern_element()?);
                if !self.cursor.eat(TokenKind::Comma) {
                    break;
                }
            }
        }
        self.expect(TokenKind::RBracket, None, close.0, close.1)?;
        Ok(MatchPattern::Array(elements))
    }

    fn parse_pattern_element(&mut self) -> ParseResult<MatchPattern> {
        let tok = self.cursor.current();
        match tok.kind {
            TokenKind::LBracket => self.parse_array_pattern(
                ("SYN089", "Expected an opening square bracket for nested array pattern."),
                ("SYN090", "Expected a closing square bracket for nested array pattern."),
            ),
            TokenKind::Number => {
                let tok = self.cursor.advance();
                let Ok(n) = tok.value.parse::<f64>() else {
                    let message = format!("Invalid number literal '{}' in pattern.", tok.value);
                    return Err(self.error_at("SYN091", message, &tok, ""));
                };
                Ok(MatchPattern::Literal(Literal::Number(n)))
            }
            TokenKind::String => Ok(MatchPattern::Literal(Literal::String(
                self.cursor.advance().value,
            ))),
            TokenKind::Boolean => Ok(MatchPattern::Literal(Literal::Boolean(
                self.cursor.advance().value == "true",
            ))),
            TokenKind::Null => {
                self.cursor.advance();
                Ok(MatchPattern::Literal(Literal::Null))
            }
            TokenKind::Identifier => Ok(MatchPattern::Identifier(self.cursor.advance().value)),
            TokenKind::Eof => Err(self.error_here(
                "SYN088A",
                "Unexpected end of input while parsing pattern element.",
                "A pattern element (literal, identifier, or array) is expected here.",
            )),
            kind => {
                let message = format!(
                    "Unexpected token '{}' ({kind}) in pattern. Expected a literal, identifier, or array pattern.",
                    tok.value
                );
                Err(self.error_here(
                    "SYN091",
                    message,
                    "Patterns can be simple values (like 10, \"hello\", true), identifiers (to bind values), or array patterns (like [a, b]).",
                ))
            }
        }
    }
}
