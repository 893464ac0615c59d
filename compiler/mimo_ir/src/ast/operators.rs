//! Binary and unary operators.
//!
//! Binary expressions are written operator-first (`+ a b`), so an
//! operator's source spelling is all the parser needs to pick one.

/// Binary operators.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum BinaryOp {
    // Arithmetic
    Add,
    Sub,
    Mul,
    Div,
    Mod,

    // Comparison
    Gt,
    Lt,
    GtEq,
    LtEq,

    // Strict (in)equality: `=`, `==`, `===` / `!`, `!=`, `!==`
    Eq,
    NotEq,

    // Logical
    And,
    Or,

    /// `??`
    Coalesce,
}

impl BinaryOp {
    /// Map an operator token or logical keyword to a binary operator.
    pub fn from_symbol(symbol: &str) -> Option<BinaryOp> {
        let op = match symbol {
            "+" => BinaryOp::Add,
            "-" => BinaryOp::Sub,
            "*" => BinaryOp::Mul,
            "/" => BinaryOp::Div,
            "%" => BinaryOp::Mod,
            ">" => BinaryOp::Gt,
            "<" => BinaryOp::Lt,
            ">=" => BinaryOp::GtEq,
            "<=" => BinaryOp::LtEq,
            "=" | "==" | "===" => BinaryOp::Eq,
            "!" | "!=" | "!==" => BinaryOp::NotEq,
            "and" | "&&" => BinaryOp::And,
            "or" | "||" => BinaryOp::Or,
            "??" => BinaryOp::Coalesce,
            _ => return None,
        };
        Some(op)
    }

    /// Canonical source spelling, used in error messages.
    pub const fn as_symbol(self) -> &'static str {
        match self {
            BinaryOp::Add => "+",
            BinaryOp::Sub => "-",
            BinaryOp::Mul => "*",
            BinaryOp::Div => "/",
            BinaryOp::Mod => "%",
            BinaryOp::Gt => ">",
            BinaryOp::Lt => "<",
            BinaryOp::GtEq => ">=",
            BinaryOp::LtEq => "<=",
            BinaryOp::Eq => "==",
            BinaryOp::NotEq => "!=",
            BinaryOp::And => "and",
            BinaryOp::Or => "or",
            BinaryOp::Coalesce => "??",
        }
    }
}

/// Unary operators.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum UnaryOp {
    /// `- x`
    Neg,
    /// `not x`
    Not,
}

impl UnaryOp {
    pub const fn as_symbol(self) -> &'static str {
        match self {
            UnaryOp::Neg => "-",
            UnaryOp::Not => "not",
        }
    }
}
