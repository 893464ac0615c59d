//! Expression parsing.
//!
//! Layers, outermost first:
//!
//! - `parse_expression`: a prefix expression followed by `|>` pipes
//! - `parse_prefix`: `op left [right]`; the right operand is omitted when
//!   the expression has visibly ended, which makes `- x` unary
//! - `parse_postfix`: `.prop`, `?.prop`, `[i]`, `?.[i]`, `?.(args)`
//! - `parse_atom`: literals, identifiers, groups, functions, `call`

use mimo_ir::{
    BinaryOp, Element, Expr, ExprKind, Literal, ObjectEntry, TemplatePart, Token, TokenKind,
    UnaryOp,
};
use mimo_stack::ensure_sufficient_stack;

use crate::{ParseResult, Parser, END_KEYWORDS, STATEMENT_START_KEYWORDS};

impl Parser<'_> {
    pub(crate) fn parse_expression(&mut self) -> ParseResult<Expr> {
        ensure_sufficient_stack(|| self.parse_expression_inner())
    }

    fn parse_expression_inner(&mut self) -> ParseResult<Expr> {
        let mut value = self.parse_prefix()?;
        while self.cursor.check_operator("|>") {
            let pipe = self.cursor.advance();
            let (callee, arguments) = self.parse_pipe_callee()?;
            value = Expr::new(
                ExprKind::Pipe {
                    value: Box::new(value),
                    callee: Box::new(callee),
                    arguments,
                },
                pipe.location(),
            );
        }
        Ok(value)
    }

    /// Callee after `|>`: `f`, `mod.f`, either with extra `(args)`, or
    /// `if cond then f else g`.
    fn parse_pipe_callee(&mut self) -> ParseResult<(Expr, Vec<Element>)> {
        if self.cursor.check_keyword("if") {
            let if_tok = self.cursor.advance();
            let condition = self.parse_expression()?;
            self.expect_keyword(
                "then",
                "SYN130",
                "Expected 'then' after condition in pipe inline-if.",
            )?;
            let consequent = self.parse_expression()?;
            self.expect_keyword("else", "SYN131", "Expected 'else' in pipe inline-if.")?;
            let alternate = self.parse_expression()?;
            let callee = Expr::new(
                ExprKind::InlineIf {
                    condition: Box::new(condition),
                    consequent: Box::new(consequent),
                    alternate: Box::new(alternate),
                },
                if_tok.location(),
            );
            return Ok((callee, Vec::new()));
        }

        let first = self.expect(
            TokenKind::Identifier,
            None,
            "SYN132",
            "Expected a function name after '|>'.",
        )?;
        let callee = if self.cursor.eat_operator(".") {
            let property = self.expect(
                TokenKind::Identifier,
                None,
                "SYN133",
                "Expected property name after '.' in pipe callee.",
            )?;
            Expr::new(
                ExprKind::ModuleAccess {
                    module: first.value.clone(),
                    property: property.value,
                },
                first.location(),
            )
        } else {
            Expr::new(ExprKind::Identifier(first.value.clone()), first.location())
        };

        let mut arguments = Vec::new();
        if self.cursor.eat(TokenKind::LParen) {
            arguments = self.parse_arguments()?;
            self.expect(
                TokenKind::RParen,
                None,
                "SYN134",
                "Expected ')' after pipe arguments.",
            )?;
        }
        Ok((callee, arguments))
    }

    fn parse_prefix(&mut self) -> ParseResult<Expr> {
        let tok = self.cursor.current();
        let is_operator = match tok.kind {
            TokenKind::Operator => !matches!(tok.value.as_str(), "." | "?." | "|>"),
            TokenKind::Keyword => matches!(tok.value.as_str(), "not" | "and" | "or"),
            _ => false,
        };
        if !is_operator {
            return self.parse_postfix();
        }

        let op_tok = self.cursor.advance();
        if op_tok.value == "not" {
            let operand = self.parse_expression()?;
            return Ok(unary(UnaryOp::Not, operand, &op_tok));
        }
        let Some(op) = BinaryOp::from_symbol(&op_tok.value) else {
            let message = format!("Unexpected operator '{}' in expression.", op_tok.value);
            return Err(self.error_at(
                "SYN010",
                message,
                &op_tok,
                "'->' only separates 'fn' parameters from the body or names the result of a 'call' statement.",
            ));
        };

        let left = self.parse_expression()?;
        if self.at_expression_end() {
            if op != BinaryOp::Sub {
                let message = format!(
                    "Operator '{}' cannot be used as a unary operator.",
                    op_tok.value
                );
                return Err(self.error_at(
                    "SYN039",
                    message,
                    &op_tok,
                    "Did you mean to provide a second argument?",
                ));
            }
            return Ok(unary(UnaryOp::Neg, left, &op_tok));
        }

        let right = self.parse_expression()?;
        Ok(Expr::new(
            ExprKind::Binary {
                op,
                left: Box::new(left),
                right: Box::new(right),
            },
            op_tok.location(),
        ))
    }

    /// True when no further operand can follow: end of input, a closing
    /// delimiter, `->`, or a keyword that ends a block or starts a statement.
    fn at_expression_end(&self) -> bool {
        let tok = self.cursor.current();
        match tok.kind {
            TokenKind::Eof
            | TokenKind::RParen
            | TokenKind::RBracket
            | TokenKind::RBrace
            | TokenKind::Comma
            | TokenKind::Colon
            | TokenKind::InterpolationEnd
            | TokenKind::Backtick => true,
            TokenKind::Operator => tok.value == "->",
            TokenKind::Keyword => {
                let word = tok.value.as_str();
                END_KEYWORDS.contains(&word)
                    || STATEMENT_START_KEYWORDS.contains(&word)
                    || word == "then"
            }
            _ => false,
        }
    }

    fn parse_postfix(&mut self) -> ParseResult<Expr> {
        let mut expr = self.parse_atom()?;
        loop {
            if self.cursor.check_operator(".") || self.cursor.check_operator("?.") {
                let op = self.cursor.advance();
                let safe = op.value == "?.";

                if safe && self.cursor.eat(TokenKind::LBracket) {
                    let index = self.parse_expression()?;
                    self.expect(
                        TokenKind::RBracket,
                        None,
                        "SYN041",
                        "Expected closing square bracket for safe array/object access.",
                    )?;
                    expr = Expr::new(
                        ExprKind::ArrayAccess {
                            object: Box::new(expr),
                            index: Box::new(index),
                            safe: true,
                        },
                        op.location(),
                    );
                    continue;
                }

                if safe && self.cursor.eat(TokenKind::LParen) {
                    let arguments = self.parse_arguments()?;
                    self.expect(
                        TokenKind::RParen,
                        None,
                        "SYN067",
                        "Expected a closing parenthesis for safe function call.",
                    )?;
                    expr = Expr::new(
                        ExprKind::Call {
                            callee: Box::new(expr),
                            arguments,
                            safe: true,
                        },
                        op.location(),
                    );
                    continue;
                }

                let property = self.expect(
                    TokenKind::Identifier,
                    None,
                    "SYN042",
                    "Expected property name after dot operator.",
                )?;
                expr = Expr::new(
                    ExprKind::PropertyAccess {
                        object: Box::new(expr),
                        property: property.value.clone(),
                        safe,
                    },
                    property.location(),
                );
            } else if self.cursor.check(TokenKind::LBracket) {
                let bracket = self.cursor.advance();
                let index = self.parse_expression()?;
                self.expect(
                    TokenKind::RBracket,
                    None,
                    "SYN041",
                    "Expected closing square bracket for array/object access (e.g., arr[index]).",
                )?;
                expr = Expr::new(
                    ExprKind::ArrayAccess {
                        object: Box::new(expr),
                        index: Box::new(index),
                        safe: false,
                    },
                    bracket.location(),
                );
            } else {
                return Ok(expr);
            }
        }
    }

    fn parse_atom(&mut self) -> ParseResult<Expr> {
        let tok = self.cursor.current();
        match tok.kind {
            TokenKind::Identifier => {
                let tok = self.cursor.advance();
                let location = tok.location();
                Ok(Expr::new(ExprKind::Identifier(tok.value), location))
            }
            TokenKind::Number => {
                let tok = self.cursor.advance();
                let Ok(n) = tok.value.parse::<f64>() else {
                    let message = format!("Invalid number literal '{}'.", tok.value);
                    return Err(self.error_at("SYN010", message, &tok, ""));
                };
                Ok(literal(Literal::Number(n), &tok))
            }
            TokenKind::String => {
                let tok = self.cursor.advance();
                let location = tok.location();
                Ok(Expr::new(
                    ExprKind::Literal(Literal::String(tok.value)),
                    location,
                ))
            }
            TokenKind::Boolean => {
                let tok = self.cursor.advance();
                Ok(literal(Literal::Boolean(tok.value == "true"), &tok))
            }
            TokenKind::Null => {
                let tok = self.cursor.advance();
                Ok(literal(Literal::Null, &tok))
            }
            TokenKind::Backtick => self.parse_template(),
            TokenKind::LBracket => self.parse_array_literal(),
            TokenKind::LBrace => self.parse_object_literal(),
            TokenKind::LParen => {
                self.cursor.advance();
                let expr = self.parse_expression()?;
                self.expect(
                    TokenKind::RParen,
                    None,
                    "SYN018",
                    "Expected a closing parenthesis for grouped expression.",
                )?;
                Ok(expr)
            }
            TokenKind::Keyword => match tok.value.as_str() {
                "function" | "fn" => {
                    let keyword = self.cursor.advance();
                    self.parse_anonymous_function(&keyword)
                }
                "call" => {
                    let keyword = self.cursor.advance();
                    let (callee, arguments) = self.parse_call_parts()?;
                    Ok(Expr::new(
                        ExprKind::Call {
                            callee: Box::new(callee),
                            arguments,
                            safe: false,
                        },
                        keyword.location(),
                    ))
                }
                other => {
                    let message = format!("Unexpected keyword \"{other}\" in expression context.");
                    Err(self.error_here("SYN010", message, ""))
                }
            },
            TokenKind::Eof => Err(self.error_here(
                "SYN010",
                "Unexpected end of input in expression.",
                "Expected a literal, identifier, array, object, or function.",
            )),
            _ => {
                let message = format!("Unexpected token in expression \"{}\".", tok.value);
                Err(self.error_here(
                    "SYN010",
                    message,
                    "Expected a literal, identifier, array, object, or function.",
                ))
            }
        }
    }

    /// Comma-separated call arguments up to (not including) `)`.
    pub(crate) fn parse_arguments(&mut self) -> ParseResult<Vec<Element>> {
        let mut arguments = Vec::new();
        if self.cursor.check(TokenKind::RParen) {
            return Ok(arguments);
        }
        loop {
            arguments.push(self.parse_element()?);
            if !self.cursor.eat(TokenKind::Comma) {
                return Ok(arguments);
            }
        }
    }

    fn parse_element(&mut self) -> ParseResult<Element> {
        if self.cursor.eat(TokenKind::Spread) {
            Ok(Element::Spread(self.parse_expression()?))
        } else {
            Ok(Element::Item(self.parse_expression()?))
        }
    }

    fn parse_array_literal(&mut self) -> ParseResult<Expr> {
        let open = self.expect(
            TokenKind::LBracket,
            None,
            "SYN011",
            "Expected an opening square bracket to start an array literal.",
        )?;
        let mut elements = Vec::new();
        if !self.cursor.check(TokenKind::RBracket) {
            elements.push(self.parse_element()?);
            while self.cursor.eat(TokenKind::Comma) {
                if self.cursor.check(TokenKind::RBracket) {
                    break;
                }
                elements.push(self.parse_element()?);
            }
        }
        self.expect(
            TokenKind::RBracket,
            None,
            "SYN012",
            "Expected a closing square bracket to end an array literal.",
        )?;
        Ok(Expr::new(ExprKind::Array(elements), open.location()))
    }

    fn parse_object_literal(&mut self) -> ParseResult<Expr> {
        let open = self.expect(
            TokenKind::LBrace,
            None,
            "SYN013",
            "Expected an opening curly brace to start an object literal.",
        )?;
        let mut entries = Vec::new();
        if !self.cursor.check(TokenKind::RBrace) {
            entries.push(self.parse_object_entry(true)?);
            while self.cursor.eat(TokenKind::Comma) {
                if self.cursor.check(TokenKind::RBrace) {
                    break;
                }
                entries.push(self.parse_object_entry(false)?);
            }
        }
        self.expect(
            TokenKind::RBrace,
            None,
            "SYN018",
            "Expected a closing curly brace to end an object literal.",
        )?;
        Ok(Expr::new(ExprKind::Object(entries), open.location()))
    }

    fn parse_object_entry(&mut self, first: bool) -> ParseResult<ObjectEntry> {
        if self.cursor.eat(TokenKind::Spread) {
            return Ok(ObjectEntry::Spread(self.parse_expression()?));
        }
        let key = if first {
            self.expect(
                TokenKind::Identifier,
                None,
                "SYN014",
                "Expected a property name (identifier) in object literal.",
            )?
        } else {
            self.expect(
                TokenKind::Identifier,
                None,
                "SYN016",
                "Expected another property name (identifier) after comma in object literal.",
            )?
        };
        self.expect(
            TokenKind::Colon,
            None,
            if first { "SYN015" } else { "SYN017" },
            "Expected a colon \":\" after property name in object literal.",
        )?;
        let value = self.parse_expression()?;
        Ok(ObjectEntry::Property {
            key: key.value,
            value,
        })
    }

    fn parse_template(&mut self) -> ParseResult<Expr> {
        let open = self.expect(
            TokenKind::Backtick,
            None,
            "SYN104",
            "Expected backtick ` to start a template literal.",
        )?;
        let mut parts = Vec::new();
        while !self.cursor.is_at_end() && !self.cursor.check(TokenKind::Backtick) {
            match self.cursor.current_kind() {
                TokenKind::StringFragment => {
                    let fragment = self.cursor.advance();
                    if !fragment.value.is_empty() {
                        parts.push(TemplatePart::Text(fragment.value));
                    }
                }
                TokenKind::InterpolationStart => {
                    self.cursor.advance();
                    parts.push(TemplatePart::Expr(self.parse_expression()?));
                    self.expect(
                        TokenKind::InterpolationEnd,
                        None,
                        "SYN105",
                        "Expected closing brace } after expression in template literal.",
                    )?;
                }
                _ => {
                    let message = format!(
                        "Unexpected token '{}' inside a template literal.",
                        self.cursor.current().value
                    );
                    return Err(self.error_here("SYN106", message, ""));
                }
            }
        }
        self.expect(
            TokenKind::Backtick,
            None,
            "SYN107",
            "Expected backtick ` to end a template literal.",
        )?;
        Ok(Expr::new(ExprKind::Template(parts), open.location()))
    }
}

fn literal(value: Literal, tok: &Token) -> Expr {
    Expr::new(ExprKind::Literal(value), tok.location())
}

fn unary(op: UnaryOp, operand: Expr, tok: &Token) -> Expr {
    Expr::new(
        ExprKind::Unary {
            op,
            operand: Box::new(operand),
        },
        tok.location(),
    )
}
