//! `assert`: failing assertions raise `ASSERT_FAIL`, passing ones return `true`.

use mimo_diagnostic::MimoError;
use mimo_ir::Location;

use crate::builtins::args::{optional, type_error};
use crate::builtins::function_table;
use crate::function::{Arity, BuiltinFunction};
use crate::interpreter::Interpreter;
use crate::value::Value;

const FUNCTIONS: &[BuiltinFunction] = &[
    BuiltinFunction::new("eq", Arity::Range(2, 3), eq),
    BuiltinFunction::new("neq", Arity::Range(2, 3), neq),
    BuiltinFunction::new("true", Arity::Range(1, 2), assert_true),
    BuiltinFunction::new("false", Arity::Range(1, 2), assert_false),
    BuiltinFunction::new("throws", Arity::Range(1, 2), throws),
];

pub(crate) fn module() -> Value {
    function_table(FUNCTIONS)
}

#[cold]
fn failure(message: String, loc: &Location) -> MimoError {
    MimoError::runtime("ASSERT_FAIL", message, loc.clone())
}

/// `": message"` when a truthy message argument was given.
fn detail(args: &[Value], pos: usize) -> String {
    match optional(args, pos) {
        Some(message) if message.is_truthy() => format!(": {message}"),
        _ => String::new(),
    }
}

fn eq(_: &mut Interpreter, args: &[Value], loc: &Location) -> Result<Value, MimoError> {
    let (actual, expected) = (&args[0], &args[1]);
    if actual.deep_equals(expected) {
        return Ok(Value::Bool(true));
    }
    Err(failure(
        format!(
            "Assertion Failed{}.\n   Expected: {expected}\n   Actual:   {actual}",
            detail(args, 3)
        ),
        loc,
    ))
}

fn neq(_: &mut Interpreter, args: &[Value], loc: &Location) -> Result<Value, MimoError> {
    if !args[0].deep_equals(&args[1]) {
        return Ok(Value::Bool(true));
    }
    Err(failure(
        format!(
            "Assertion Failed{}. Expected values to be different.",
            detail(args, 3)
        ),
        loc,
    ))
}

/// Only the boolean itself passes; truthy values do not.
fn expect_bool(expected: bool, args: &[Value], loc: &Location) -> Result<Value, MimoError> {
    if matches!(args[0], Value::Bool(b) if b == expected) {
        return Ok(Value::Bool(true));
    }
    Err(failure(
        format!(
            "Assertion Failed{}. Expected {expected}, got {}",
            detail(args, 2),
            args[0]
        ),
        loc,
    ))
}

fn assert_true(_: &mut Interpreter, args: &[Value], loc: &Location) -> Result<Value, MimoError> {
    expect_bool(true, args, loc)
}

fn assert_false(_: &mut Interpreter, args: &[Value], loc: &Location) -> Result<Value, MimoError> {
    expect_bool(false, args, loc)
}

/// Call the function with no arguments; any error it raises is a pass.
fn throws(interp: &mut Interpreter, args: &[Value], loc: &Location) -> Result<Value, MimoError> {
    let func = &args[0];
    if !func.is_callable() {
        return Err(type_error(
            "assert.throws expects a function as the first argument.",
            loc,
        ));
    }
    match interp.call_value(func, Vec::new(), loc, "assert.throws") {
        Err(err) => {
            tracing::debug!(code = err.code, "assert.throws caught error");
            Ok(Value::Bool(true))
        }
        Ok(_) => Err(failure(
            format!(
                "Assertion Failed{}. Expected function to throw an error, but it did not.",
                detail(args, 2)
            ),
            loc,
        )),
    }
}
