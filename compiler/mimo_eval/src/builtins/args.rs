//! Argument access and type checks shared by builtins and stdlib modules.
//!
//! Positions are 1-based, as they appear in error messages.

use std::rc::Rc;

use mimo_diagnostic::MimoError;
use mimo_ir::Location;

use crate::function::FunctionValue;
use crate::value::{ArrayRef, Value};

/// Argument `pos` unless it is absent or `null`.
pub(crate) fn optional(args: &[Value], pos: usize) -> Option<&Value> {
    args.get(pos - 1).filter(|v| !v.is_null())
}

/// `TYPE001` with a custom message.
#[cold]
pub(crate) fn type_error(message: impl Into<String>, loc: &Location) -> MimoError {
    MimoError::runtime("TYPE001", message, loc.clone())
}

/// `TYPE001`: argument `pos` of `func` is not `what` ("a number", "an array", ...).
#[cold]
pub(crate) fn wrong_type(func: &str, what: &str, pos: usize, got: &Value, loc: &Location) -> MimoError {
    type_error(
        format!(
            "{func}() expects {what} as argument {pos}. Got '{}'.",
            got.type_name()
        ),
        loc,
    )
    .with_suggestion(format!("Ensure argument {pos} for '{func}' is {what}."))
}

pub(crate) fn expect_number(func: &str, value: &Value, pos: usize, loc: &Location) -> Result<f64, MimoError> {
    match value {
        Value::Number(n) => Ok(*n),
        other => Err(wrong_type(func, "a number", pos, other, loc)),
    }
}

pub(crate) fn expect_string<'v>(
    func: &str,
    value: &'v Value,
    pos: usize,
    loc: &Location,
) -> Result<&'v str, MimoError> {
    match value {
        Value::String(s) => Ok(s),
        other => Err(wrong_type(func, "a string", pos, other, loc)),
    }
}

pub(crate) fn expect_array(func: &str, value: &Value, pos: usize, loc: &Location) -> Result<ArrayRef, MimoError> {
    match value {
        Value::Array(items) => Ok(Rc::clone(items)),
        other => Err(wrong_type(func, "an array", pos, other, loc)),
    }
}

/// A user-defined function, as required by callback-taking functions.
pub(crate) fn expect_function(
    func: &str,
    value: &Value,
    pos: usize,
    loc: &Location,
) -> Result<Rc<FunctionValue>, MimoError> {
    match value {
        Value::Function(f) => Ok(Rc::clone(f)),
        other => Err(wrong_type(func, "a Mimo function", pos, other, loc)),
    }
}

/// Resolve a possibly negative index against `len` the way `slice` does:
/// truncate toward zero, count negative values from the end, clamp to
/// `0..=len`.
pub(crate) fn relative_index(index: f64, len: usize) -> usize {
    let len_f = len as f64;
    let index = if index.is_nan() { 0.0 } else { index.trunc() };
    let resolved = if index < 0.0 {
        (len_f + index).max(0.0)
    } else {
        index.min(len_f)
    };
    resolved as usize
}

/// Integer value of a number clamped into `usize`, with `NaN` as 0.
pub(crate) fn clamp_to_usize(n: f64) -> usize {
    if n.is_nan() || n <= 0.0 {
        0
    } else {
        n.trunc() as usize
    }
}

#[cfg(test)]
mod tests;
