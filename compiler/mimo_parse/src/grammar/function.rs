//! Functions and calls.

use std::rc::Rc;

use mimo_ir::{Element, Expr, ExprKind, FunctionDef, Param, Stmt, StmtKind, Token, TokenKind};

use crate::{ParseResult, Parser};

/// How a parameter list is delimited.
#[derive(Copy, Clone, PartialEq, Eq)]
enum ParamStyle {
    /// `(a, b: 1, ...rest)`
    Parenthesized,
    /// `fn a b -> ...`
    Arrow,
}

impl Parser<'_> {
    /// `function name(params) body end`
    pub(crate) fn parse_function_declaration(
        &mut self,
        export_tok: Option<Token>,
    ) -> ParseResult<Stmt> {
        let function_tok =
            self.expect_keyword("function", "SYN053", "Expected \"function\" keyword.")?;
        let name = self.expect(
            TokenKind::Identifier,
            None,
            "SYN054",
            "Expected a function name (identifier).",
        )?;
        self.expect(
            TokenKind::LParen,
            None,
            "SYN055",
            "Expected an opening parenthesis for function parameters.",
        )?;
        let (params, rest) = self.parse_params(ParamStyle::Parenthesized)?;
        let body = self.parse_function_body()?;

        let location = export_tok.as_ref().unwrap_or(&function_tok).location();
        let function = Rc::new(FunctionDef {
            name: Some(name.value),
            params,
            rest,
            body,
            location: function_tok.location(),
        });
        Ok(Stmt::new(
            StmtKind::FunctionDeclaration {
                function,
                is_exported: export_tok.is_some(),
            },
            location,
        ))
    }

    /// `function(params) body end` or `fn params -> body end`, after the
    /// keyword has been consumed.
    pub(crate) fn parse_anonymous_function(&mut self, keyword: &Token) -> ParseResult<Expr> {
        let style = if keyword.value == "fn" {
            ParamStyle::Arrow
        } else {
            self.expect(
                TokenKind::LParen,
                None,
                "SYN020",
                "Expected an opening parenthesis for function parameters.",
            )?;
            ParamStyle::Parenthesized
        };
        let (params, rest) = self.parse_params(style)?;
        let body = self.parse_function_body()?;
        let location = keyword.location();
        Ok(Expr::new(
            ExprKind::Function(Rc::new(FunctionDef {
                name: None,
                params,
                rest,
                body,
                location: location.clone(),
            })),
            location,
        ))
    }

    fn parse_function_body(&mut self) -> ParseResult<Vec<Stmt>> {
        let body = self.parse_block()?;
        self.expect(
            TokenKind::Keyword,
            Some("end"),
            "SYN027",
            "Expected \"end\" keyword to close function declaration.",
        )?;
        Ok(body)
    }

    /// Parameter list including its closing delimiter (`)` or `->`).
    ///
    /// Defaulted parameters must trail the required ones; a rest parameter
    /// must come last.
    fn parse_params(&mut self, style: ParamStyle) -> ParseResult<(Vec<Param>, Option<String>)> {
        let mut params: Vec<Param> = Vec::new();
        let mut rest = None;

        let closed = match style {
            ParamStyle::Parenthesized => self.cursor.check(TokenKind::RParen),
            ParamStyle::Arrow => self.cursor.eat_operator("->"),
        };

        if !closed {
            loop {
                if self.cursor.eat(TokenKind::Spread) {
                    let name = self.expect(
                        TokenKind::Identifier,
                        None,
                        "SYN056",
                        "Expected an identifier for rest parameter.",
                    )?;
                    if self.cursor.check(TokenKind::Comma) {
                        return Err(self.error_at(
                            "SYN063",
                            "Rest parameter must be the last parameter.",
                            &name,
                            "",
                        ));
                    }
                    if style == ParamStyle::Arrow {
                        self.cursor.eat_operator("->");
                    }
                    rest = Some(name.value);
                    break;
                }

                let name =
                    self.parse_identifier("SYN021", "Expected a parameter name (identifier).")?;
                let default = if self.cursor.eat(TokenKind::Colon) {
                    Some(self.parse_expression()?)
                } else {
                    if params.iter().any(|p| p.default.is_some()) {
                        return Err(self.error_at(
                            "SYN_DEFAULT_ORDER",
                            "Parameter without default value cannot follow parameter with default value.",
                            &name,
                            "",
                        ));
                    }
                    None
                };
                params.push(Param {
                    name: name.value,
                    default,
                });

                match style {
                    ParamStyle::Parenthesized => {
                        if !self.cursor.eat(TokenKind::Comma) {
                            break;
                        }
                    }
                    ParamStyle::Arrow => {
                        if self.cursor.eat_operator("->") {
                            break;
                        }
                        if self.cursor.check(TokenKind::Comma) {
                            return Err(self.error_here(
                                "SYN135",
                                "Comma-separated parameters are not supported in 'fn' syntax. Use '->' to separate parameters from the body.",
                                "Write: fn x y -> expression end or use 'function' keyword for multi-param functions.",
                            ));
                        }
                    }
                }
            }
        }

        if style == ParamStyle::Parenthesized {
            if rest.is_some() && !self.cursor.check(TokenKind::RParen) {
                return Err(self.error_here(
                    "SYN060",
                    "No parameters allowed after a rest parameter.",
                    "",
                ));
            }
            self.expect(
                TokenKind::RParen,
                None,
                "SYN026",
                "Expected a closing parenthesis for function parameters.",
            )?;
        }
        Ok((params, rest))
    }

    /// `name(args)` or `module.name(args)` after `call`.
    pub(crate) fn parse_call_parts(&mut self) -> ParseResult<(Expr, Vec<Element>)> {
        let first = self.expect(
            TokenKind::Identifier,
            None,
            "SYN064",
            "Expected a function name (identifier) or module name after \"call\".",
        )?;
        let callee = if self.cursor.eat_operator(".") {
            let property = self.expect(
                TokenKind::Identifier,
                None,
                "SYN065",
                "Expected a property name (identifier) after \".\" for module access.",
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

        self.expect(
            TokenKind::LParen,
            None,
            "SYN066",
            "Expected an opening parenthesis for function arguments.",
        )?;
        let arguments = self.parse_arguments()?;
        self.expect(
            TokenKind::RParen,
            None,
            "SYN067",
            "Expected a closing parenthesis for function arguments.",
        )?;
        Ok((callee, arguments))
    }

    /// `call f(args) [-> destination]`
    pub(crate) fn parse_call_statement(&mut self) -> ParseResult<Stmt> {
        let tok = self.expect_keyword(
            "call",
            "SYN063",
            "Expected \"call\" keyword to initiate a function call.",
        )?;
        let (callee, arguments) = self.parse_call_parts()?;
        let destination = if self.cursor.eat_operator("->") {
            let dest = self.expect(
                TokenKind::Identifier,
                None,
                "SYN069",
                "Expected an identifier for the assignment destination after \"->\".",
            )?;
            Some(dest.value)
        } else {
            None
        };
        Ok(Stmt::new(
            StmtKind::Call {
                callee,
                arguments,
                destination,
            },
            tok.location(),
        ))
    }
}
