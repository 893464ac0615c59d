//! Mimo IR - tokens, locations and the syntax tree
//!
//! This crate holds the data shared by every phase of the interpreter:
//! - `Span` byte ranges and `Location` (file, line, column, span)
//! - `Token` and `TokenKind` produced by the lexer
//! - AST nodes (`Program`, `Stmt`, `Expr`, patterns, function definitions)
//!
//! # Design
//!
//! The AST is a closed set of enums so the evaluator can match on it
//! exhaustively. Every statement and expression node carries its
//! `Location`. Function definitions are reference-counted so a closure value
//! can share its declaration with the tree it came from.

pub mod ast;
mod location;
mod span;
mod token;

pub use ast::{
    BinaryOp, BindingTarget, CaseClause, DeclKind, DestructurePattern, Element, ElseBranch, Expr,
    ExprKind, FunctionDef, Literal, MatchPattern, ObjectEntry, Param, Program, Stmt, StmtKind,
    TemplatePart, UnaryOp,
};
pub use location::Location;
pub use span::{Span, SpanError};
pub use token::{Token, TokenKind, KEYWORDS};
