//! Raw tokens for normal (non-template) lexing.
//!
//! The `RawToken` enum is the logos-derived tokenizer output. Whitespace and
//! both comment forms are skipped here; string bodies are scanned by hand
//! in `lib.rs` because their escape errors need precise positions.

use logos::{Lexer, Logos, Skip};

/// Skip a `/* ... */` comment. An unterminated comment runs to end of input.
fn block_comment(lex: &mut Lexer<RawToken>) -> Skip {
    let rest = lex.remainder();
    let len = rest.find("*/").map_or(rest.len(), |i| i + 2);
    lex.bump(len);
    Skip
}

#[derive(Logos, Debug, Clone, Copy, PartialEq, Eq)]
#[logos(skip r"[ \t\r\n]+")]
#[logos(skip r"//[^\n]*")]
pub(crate) enum RawToken {
    #[token("/*", block_comment)]
    BlockComment,

    #[regex(r"[a-zA-Z_][a-zA-Z0-9_]*")]
    Word,

    #[regex(r"[0-9]+(\.[0-9]+)?([eE][+-]?[0-9]+)?")]
    Number,

    /// Opening quote; the body is scanned manually.
    #[token("\"")]
    Quote,

    #[token("`")]
    Backtick,

    #[token("(")]
    LParen,
    #[token(")")]
    RParen,
    #[token("[")]
    LBracket,
    #[token("]")]
    RBracket,
    #[token("{")]
    LBrace,
    #[token("}")]
    RBrace,
    #[token(",")]
    Comma,
    #[token(":")]
    Colon,
    #[token("...")]
    Spread,
    #[token("..")]
    Range,

    #[token("?.")]
    #[token(".")]
    #[token("+")]
    #[token("-")]
    #[token("*")]
    #[token("/")]
    #[token("%")]
    #[token(">")]
    #[token("<")]
    #[token("=")]
    #[token("==")]
    #[token("===")]
    #[token("!")]
    #[token("!=")]
    #[token("!==")]
    #[token(">=")]
    #[token("<=")]
    #[token("&&")]
    #[token("||")]
    #[token("->")]
    #[token("??")]
    #[token("|>")]
    Operator,
}
