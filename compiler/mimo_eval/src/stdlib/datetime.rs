//! `datetime`: instants as UTC timestamps with millisecond precision.
//!
//! `format` renders in the local time zone with the tokens `YYYY`, `MM`,
//! `DD`, `hh`, `mm` and `ss`.

use chrono::{DateTime, Datelike, Local, SecondsFormat, Timelike, Utc};
use mimo_diagnostic::MimoError;
use mimo_ir::Location;

use crate::builtins::args::type_error;
use crate::builtins::function_table;
use crate::function::{Arity, BuiltinFunction};
use crate::interpreter::Interpreter;
use crate::value::Value;

const FUNCTIONS: &[BuiltinFunction] = &[
    BuiltinFunction::new("now", Arity::Exact(0), now),
    BuiltinFunction::new("get_timestamp", Arity::Exact(1), get_timestamp),
    BuiltinFunction::new("from_timestamp", Arity::Exact(1), from_timestamp),
    BuiltinFunction::new("to_iso_string", Arity::Exact(1), to_iso_string),
    BuiltinFunction::new("format", Arity::Exact(2), format),
];

pub(crate) fn module() -> Value {
    function_table(FUNCTIONS)
}

fn expect_datetime(func: &str, value: &Value, loc: &Location) -> Result<DateTime<Utc>, MimoError> {
    match value {
        Value::DateTime(dt) => Ok(*dt),
        _ => Err(type_error(
            format!("{func}() expects a datetime object as its first argument."),
            loc,
        )
        .with_suggestion("Use a value returned from datetime.now() or datetime.from_timestamp().")),
    }
}

fn now(_: &mut Interpreter, _: &[Value], _: &Location) -> Result<Value, MimoError> {
    Ok(Value::DateTime(Utc::now()))
}

fn get_timestamp(_: &mut Interpreter, args: &[Value], loc: &Location) -> Result<Value, MimoError> {
    let dt = expect_datetime("datetime.get_timestamp", &args[0], loc)?;
    Ok(Value::Number(dt.timestamp_millis() as f64))
}

fn from_timestamp(_: &mut Interpreter, args: &[Value], loc: &Location) -> Result<Value, MimoError> {
    let Value::Number(millis) = args[0] else {
        return Err(type_error(
            format!(
                "datetime.from_timestamp() expects a number (milliseconds). Got '{}'.",
                args[0].type_name()
            ),
            loc,
        )
        .with_suggestion("Provide a numeric timestamp."));
    };
    let dt = if millis.is_finite() {
        DateTime::from_timestamp_millis(millis.trunc() as i64)
    } else {
        None
    };
    dt.map(Value::DateTime).ok_or_else(|| {
        MimoError::runtime(
            "ARG001",
            format!("datetime.from_timestamp() received an out-of-range timestamp: {millis}."),
            loc.clone(),
        )
    })
}

fn to_iso_string(_: &mut Interpreter, args: &[Value], loc: &Location) -> Result<Value, MimoError> {
    let dt = expect_datetime("datetime.to_iso_string", &args[0], loc)?;
    Ok(Value::from(dt.to_rfc3339_opts(SecondsFormat::Millis, true)))
}

fn format(_: &mut Interpreter, args: &[Value], loc: &Location) -> Result<Value, MimoError> {
    let dt = expect_datetime("datetime.format", &args[0], loc)?;
    let Value::String(pattern) = &args[1] else {
        return Err(type_error(
            format!(
                "datetime.format() expects a format string as its second argument. Got '{}'.",
                args[1].type_name()
            ),
            loc,
        )
        .with_suggestion("Provide a format string (e.g., \"YYYY-MM-DD\")."));
    };
    Ok(Value::from(render(&dt.with_timezone(&Local), pattern)))
}

/// Replace every format token. Tokens are case-sensitive: `MM` is the
/// month, `mm` the minutes.
fn render<T: Datelike + Timelike>(dt: &T, pattern: &str) -> String {
    [
        ("YYYY", dt.year().to_string()),
        ("MM", format!("{:02}", dt.month())),
        ("DD", format!("{:02}", dt.day())),
        ("hh", format!("{:02}", dt.hour())),
        ("mm", format!("{:02}", dt.minute())),
        ("ss", format!("{:02}", dt.second())),
    ]
    .iter()
    .fold(pattern.to_string(), |out, (token, value)| out.replace(token, value))
}

#[cfg(test)]
mod tests;
