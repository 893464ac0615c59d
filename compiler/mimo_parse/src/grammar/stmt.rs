//! Statement parsing.
//!
//! Dispatch is on the leading keyword. `identifier:` introduces a loop
//! label; anything else is an expression statement.

use mimo_ir::{
    BindingTarget, CaseClause, DeclKind, ElseBranch, Expr, ExprKind, Stmt, StmtKind, Token,
    TokenKind,
};
use mimo_stack::ensure_sufficient_stack;

use crate::{ParseResult, Parser};

impl Parser<'_> {
    pub(crate) fn parse_statement(&mut self) -> ParseResult<Stmt> {
        ensure_sufficient_stack(|| self.parse_statement_inner())
    }

    fn parse_statement_inner(&mut self) -> ParseResult<Stmt> {
        if self.cursor.is_at_end() {
            return Err(self.error_here(
                "SYN000",
                "Unexpected end of input.",
                "Expected a statement or expression, but found end of file.",
            ));
        }

        if let Some(word) = self.cursor.current_keyword() {
            tracing::trace!(keyword = word, "statement");
            return match word {
                "destructure" => self.parse_destructure(),
                "set" | "let" | "const" | "global" => self.parse_variable(None),
                "if" => self.parse_if(),
                "guard" => self.parse_guard(),
                "for" => self.parse_for(),
                "while" => self.parse_while(),
                "loop" => self.parse_loop(),
                "break" | "continue" => Ok(self.parse_jump()),
                "try" => self.parse_try(),
                "function" => self.parse_function_declaration(None),
                "call" => self.parse_call_statement(),
                "return" => self.parse_return(),
                "show" => {
                    let tok = self.expect_keyword("show", "SYN071", "Expected \"show\" keyword.")?;
                    let value = self.parse_expression()?;
                    Ok(Stmt::new(StmtKind::Show { value }, tok.location()))
                }
                "throw" => {
                    let tok =
                        self.expect_keyword("throw", "SYN072", "Expected \"throw\" keyword.")?;
                    let value = self.parse_expression()?;
                    Ok(Stmt::new(StmtKind::Throw { value }, tok.location()))
                }
                "match" => self.parse_match(),
                "import" => self.parse_import(),
                "export" => self.parse_export(),
                "not" | "and" | "or" | "fn" => {
                    let expr = self.parse_expression()?;
                    let location = expr.location.clone();
                    Ok(Stmt::new(StmtKind::Expression(expr), location))
                }
                other => {
                    let message = format!("Unexpected keyword '{other}' at the start of a statement.");
                    Err(self.error_here(
                        "SYN005",
                        message,
                        "Expected a statement keyword (like 'set', 'if', 'function', 'call', 'show', etc.).",
                    ))
                }
            };
        }

        if self.cursor.check(TokenKind::Identifier) && self.cursor.peek(1).kind == TokenKind::Colon {
            let label = self.cursor.advance();
            self.cursor.advance();
            let body = self.parse_statement()?;
            return Ok(Stmt::new(
                StmtKind::Labeled {
                    label: label.value.clone(),
                    body: Box::new(body),
                },
                label.location(),
            ));
        }

        let expr = self.parse_expression()?;
        let location = expr.location.clone();
        Ok(Stmt::new(StmtKind::Expression(expr), location))
    }

    /// Statements up to (not including) the next block-closing keyword.
    pub(crate) fn parse_block(&mut self) -> ParseResult<Vec<Stmt>> {
        let mut statements = Vec::new();
        while !self.cursor.is_at_end() && !self.at_block_end() {
            statements.push(self.parse_statement()?);
        }
        Ok(statements)
    }

    fn expect_end(&mut self, code: &'static str, suggestion: &str) -> ParseResult<Token> {
        self.expect_keyword("end", code, suggestion)
    }

    // Declarations

    /// `set|let|const|global` declarations and `set` member assignments.
    ///
    /// `export_tok` is the preceding `export` keyword, which then becomes
    /// the statement's location.
    pub(crate) fn parse_variable(&mut self, export_tok: Option<Token>) -> ParseResult<Stmt> {
        let kind_tok =
            self.expect_keyword_in(&["set", "let", "const", "global"], "SYN092", "Syntax error.")?;
        let is_exported = export_tok.is_some();
        let location = export_tok.as_ref().unwrap_or(&kind_tok).location();
        let Some(kind) = DeclKind::from_keyword(&kind_tok.value) else {
            return Err(self.error_at("SYN092", "Invalid declaration keyword.", &kind_tok, ""));
        };

        if self.cursor.check(TokenKind::LBracket) || self.cursor.check(TokenKind::LBrace) {
            let pattern = self.parse_destructuring_pattern()?;
            let value = self.parse_expression()?;
            return Ok(Stmt::new(
                StmtKind::VariableDeclaration {
                    kind,
                    target: BindingTarget::Pattern(pattern),
                    value,
                    is_exported,
                },
                location,
            ));
        }

        let name = self.expect(
            TokenKind::Identifier,
            None,
            "SYN097",
            "Expected an identifier for the variable name.",
        )?;

        // `obj.x` and `arr[0]` (no space before the bracket) are member
        // targets; `arr [1, 2]` declares `arr` with an array value.
        let is_member = self.cursor.check_operator(".")
            || (self.cursor.check(TokenKind::LBracket)
                && name.span.is_adjacent_to(self.cursor.current().span));

        if !is_member {
            let value = self.parse_expression()?;
            return Ok(Stmt::new(
                StmtKind::VariableDeclaration {
                    kind,
                    target: BindingTarget::Name(name.value),
                    value,
                    is_exported,
                },
                location,
            ));
        }

        if kind != DeclKind::Set {
            let message = format!(
                "The '{}' keyword is for declarations. Use 'set' for direct member assignment.",
                kind_tok.value
            );
            return Err(self.error_at("SYN102", message, &kind_tok, ""));
        }

        let mut target = Expr::new(ExprKind::Identifier(name.value.clone()), name.location());
        loop {
            if self.cursor.eat_operator(".") {
                let property = self.expect(
                    TokenKind::Identifier,
                    None,
                    "SYN098",
                    "Expected property name after dot.",
                )?;
                target = Expr::new(
                    ExprKind::PropertyAccess {
                        object: Box::new(target),
                        property: property.value.clone(),
                        safe: false,
                    },
                    property.location(),
                );
            } else if self.cursor.check(TokenKind::LBracket)
                && self.cursor.current_adjacent_to_previous()
            {
                let bracket = self.cursor.advance();
                let index = self.parse_expression()?;
                self.expect(
                    TokenKind::RBracket,
                    None,
                    "SYN100",
                    "Expected a closing ']' after index.",
                )?;
                target = Expr::new(
                    ExprKind::ArrayAccess {
                        object: Box::new(target),
                        index: Box::new(index),
                        safe: false,
                    },
                    bracket.location(),
                );
            } else {
                break;
            }
        }

        let value = self.parse_expression()?;
        let kind = match target.kind {
            ExprKind::PropertyAccess {
                object, property, ..
            } => StmtKind::PropertyAssignment {
                object: *object,
                property,
                value,
            },
            ExprKind::ArrayAccess { object, index, .. } => StmtKind::BracketAssignment {
                object: *object,
                index: *index,
                value,
            },
            _ => {
                return Err(self.error_at("SYN103", "Invalid member assignment target.", &name, ""));
            }
        };
        Ok(Stmt::new(kind, location))
    }

    fn parse_destructure(&mut self) -> ParseResult<Stmt> {
        let tok = self.expect_keyword("destructure", "SYN113", "Syntax error.")?;
        let pattern = self.parse_destructuring_pattern()?;
        self.expect_keyword(
            "from",
            "SYN114",
            "Expected \"from\" keyword after destructuring pattern.",
        )?;
        let value = self.parse_expression()?;
        Ok(Stmt::new(
            StmtKind::DestructuringAssignment { pattern, value },
            tok.location(),
        ))
    }

    // Control flow

    fn parse_if(&mut self) -> ParseResult<Stmt> {
        let tok = self.expect_keyword(
            "if",
            "SYN046",
            "Expected \"if\" keyword to start an if statement.",
        )?;
        let condition = self.parse_expression()?;
        let consequent = self.parse_block()?;

        let mut alternate = None;
        if self.cursor.eat_keyword("else") {
            if self.cursor.check_keyword("if") {
                // The nested `if` owns the single `end` of the whole chain.
                let nested = self.parse_if()?;
                return Ok(Stmt::new(
                    StmtKind::If {
                        condition,
                        consequent,
                        alternate: Some(ElseBranch::If(Box::new(nested))),
                    },
                    tok.location(),
                ));
            }
            alternate = Some(ElseBranch::Block(self.parse_block()?));
        }

        self.expect_end("SYN047", "Expected \"end\" keyword to close if statement.")?;
        Ok(Stmt::new(
            StmtKind::If {
                condition,
                consequent,
                alternate,
            },
            tok.location(),
        ))
    }

    fn parse_guard(&mut self) -> ParseResult<Stmt> {
        let tok = self.expect_keyword(
            "guard",
            "SYN120",
            "Expected \"guard\" keyword to start a guard statement.",
        )?;
        let condition = self.parse_expression()?;
        self.expect_keyword(
            "else",
            "SYN121",
            "Expected \"else\" keyword after guard condition.",
        )?;
        let alternate = self.parse_block()?;
        self.expect_end("SYN122", "Expected \"end\" keyword to close guard statement.")?;
        Ok(Stmt::new(
            StmtKind::Guard {
                condition,
                alternate,
            },
            tok.location(),
        ))
    }

    fn parse_while(&mut self) -> ParseResult<Stmt> {
        let tok = self.expect_keyword("while", "SYN000", "Syntax error.")?;
        let condition = self.parse_expression()?;
        let body = self.parse_block()?;
        self.expect_end("SYN000", "Expected \"end\" keyword to close while loop.")?;
        Ok(Stmt::new(StmtKind::While { condition, body }, tok.location()))
    }

    fn parse_loop(&mut self) -> ParseResult<Stmt> {
        let tok = self.expect_keyword("loop", "SYN000", "Syntax error.")?;
        let body = self.parse_block()?;
        self.expect_end("SYN000", "Expected \"end\" keyword to close loop.")?;
        Ok(Stmt::new(StmtKind::Loop { body }, tok.location()))
    }

    fn parse_for(&mut self) -> ParseResult<Stmt> {
        let tok = self.expect_keyword(
            "for",
            "SYN048",
            "Expected \"for\" keyword to start a for loop.",
        )?;
        let variable = self.parse_identifier(
            "SYN048A",
            "Expected an identifier for the loop variable.",
        )?;
        self.expect_keyword(
            "in",
            "SYN049",
            "Expected \"in\" keyword in for loop (e.g., for item in iterable).",
        )?;
        let iterable = self.parse_expression()?;
        let body = self.parse_block()?;
        self.expect_end("SYN050", "Expected \"end\" keyword to close for loop.")?;
        Ok(Stmt::new(
            StmtKind::For {
                variable: variable.value,
                iterable,
                body,
            },
            tok.location(),
        ))
    }

    /// `break [label]` / `continue [label]`
    fn parse_jump(&mut self) -> Stmt {
        let tok = self.cursor.advance();
        let label = self
            .cursor
            .check(TokenKind::Identifier)
            .then(|| self.cursor.advance().value);
        let kind = if tok.value == "break" {
            StmtKind::Break { label }
        } else {
            StmtKind::Continue { label }
        };
        Stmt::new(kind, tok.location())
    }

    fn parse_try(&mut self) -> ParseResult<Stmt> {
        let tok = self.expect_keyword(
            "try",
            "SYN051",
            "Expected \"try\" keyword to start a try-catch block.",
        )?;
        let body = self.parse_block()?;

        let mut catch_var = None;
        let mut catch_body = None;
        if self.cursor.eat_keyword("catch") {
            if self.cursor.check(TokenKind::Identifier) {
                let var = self.parse_identifier(
                    "SYN051A",
                    "Expected an identifier for the catch variable.",
                )?;
                catch_var = Some(var.value);
            }
            catch_body = Some(self.parse_block()?);
        }

        self.expect_end("SYN052", "Expected \"end\" keyword to close try-catch block.")?;
        Ok(Stmt::new(
            StmtKind::Try {
                body,
                catch_var,
                catch_body,
            },
            tok.location(),
        ))
    }

    fn parse_return(&mut self) -> ParseResult<Stmt> {
        let tok = self.expect_keyword("return", "SYN070", "Expected \"return\" keyword.")?;
        let value = if self.cursor.is_at_end() || self.at_block_end() {
            None
        } else {
            Some(self.parse_expression()?)
        };
        Ok(Stmt::new(StmtKind::Return { value }, tok.location()))
    }

    fn parse_match(&mut self) -> ParseResult<Stmt> {
        let tok = self.expect_keyword(
            "match",
            "SYN081",
            "Expected \"match\" keyword to start a match statement.",
        )?;
        let discriminant = self.parse_expression()?;

        let mut cases = Vec::new();
        loop {
            if self.cursor.check_keyword("case") {
                let case_tok = self.expect_keyword(
                    "case",
                    "SYN082",
                    "Expected \"case\" keyword for a match clause.",
                )?;
                let pattern = self.parse_match_pattern()?;
                let guard = if self.cursor.eat_keyword("when") {
                    Some(self.parse_expression()?)
                } else {
                    None
                };
                self.expect(
                    TokenKind::Colon,
                    None,
                    "SYN083",
                    "Expected a colon (:) after the pattern in a match clause.",
                )?;
                let body = self.parse_block()?;
                cases.push(CaseClause {
                    pattern: Some(pattern),
                    guard,
                    body,
                    location: case_tok.location(),
                });
            } else if self.cursor.check_keyword("default") {
                let default_tok = self.expect_keyword(
                    "default",
                    "SYN084",
                    "Expected \"default\" keyword for the fallback match clause.",
                )?;
                self.expect(
                    TokenKind::Colon,
                    None,
                    "SYN085",
                    "Expected a colon (:) after \"default\" in a match clause.",
                )?;
                let body = self.parse_block()?;
                cases.push(CaseClause {
                    pattern: None,
                    guard: None,
                    body,
                    location: default_tok.location(),
                });
            } else {
                break;
            }
        }

        if cases.is_empty() {
            return Err(self.error_at(
                "SYN085A",
                "Match statement must have at least one 'case' or 'default' clause.",
                &tok,
                "Add at least one 'case ... : ...' or 'default: ...' block.",
            ));
        }

        self.expect_end("SYN086", "Expected \"end\" keyword to close match statement.")?;
        Ok(Stmt::new(
            StmtKind::Match {
                discriminant,
                cases,
            },
            tok.location(),
        ))
    }

    // Modules

    /// `import "path" as alias` or `import name from "path" [as alias]`.
    fn parse_import(&mut self) -> ParseResult<Stmt> {
        let tok = self.expect_keyword("import", "SYN073", "Expected \"import\" keyword.")?;

        if self.cursor.check(TokenKind::String) {
            let path = self.cursor.advance();
            self.expect_keyword("as", "SYN075", "Expected \"as\" keyword after the module path.")?;
            let alias = self.expect(
                TokenKind::Identifier,
                None,
                "SYN076",
                "Expected an identifier for the module alias.",
            )?;
            return Ok(Stmt::new(
                StmtKind::Import {
                    path: path.value,
                    alias: alias.value,
                },
                tok.location(),
            ));
        }

        let name = self.expect(
            TokenKind::Identifier,
            None,
            "SYN073a",
            "Expected an identifier for the module to import.",
        )?;
        self.expect_keyword("from", "SYN074a", "Expected \"from\" keyword after imported name.")?;
        let path = self.expect(
            TokenKind::String,
            None,
            "SYN074",
            "Expected a string literal for the module path (e.g., \"my_module\").",
        )?;
        let alias = if self.cursor.eat_keyword("as") {
            self.expect(
                TokenKind::Identifier,
                None,
                "SYN076",
                "Expected an identifier for the module alias.",
            )?
            .value
        } else {
            name.value
        };
        Ok(Stmt::new(
            StmtKind::Import {
                path: path.value,
                alias,
            },
            tok.location(),
        ))
    }

    fn parse_export(&mut self) -> ParseResult<Stmt> {
        let tok = self.expect_keyword("export", "SYN077", "Expected \"export\" keyword.")?;

        if self.cursor.is_at_end() {
            return Err(self.error_at(
                "SYN078",
                "Unexpected end of input after 'export'.",
                &tok,
                "Expected a variable or function declaration to export.",
            ));
        }

        match self.cursor.current_keyword() {
            Some("set" | "let" | "const" | "global") => self.parse_variable(Some(tok)),
            Some("function") => self.parse_function_declaration(Some(tok)),
            Some(other) => {
                let message =
                    format!("Cannot export statement of type '{other}'. Expected a declaration.");
                Err(self.error_here(
                    "SYN079",
                    message,
                    "Only 'set', 'let', 'const', 'global', or 'function' declarations can be exported.",
                ))
            }
            None => Err(self.error_here(
                "SYN080",
                "Expected a declaration keyword (set, let, const, global, function) after 'export'.",
                "Only variable and function declarations can be exported.",
            )),
        }
    }
}
