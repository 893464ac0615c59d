//! `json`: conversion between Mimo values and JSON text via `serde_json`.
//!
//! Stringification follows the usual JSON rules for values JSON cannot
//! represent: non-finite numbers become `null`, functions are dropped from
//! objects and become `null` in arrays, and datetimes become ISO strings.
//! Circular structures are an error.

use chrono::SecondsFormat;
use mimo_diagnostic::MimoError;
use mimo_ir::Location;
use serde::Serialize;
use serde_json::ser::{PrettyFormatter, Serializer};
use serde_json::{Map, Number};

use crate::builtins::args::type_error;
use crate::builtins::function_table;
use crate::function::{Arity, BuiltinFunction};
use crate::interpreter::Interpreter;
use crate::value::{ObjectMap, Value};

const FUNCTIONS: &[BuiltinFunction] = &[
    BuiltinFunction::new("parse", Arity::Exact(1), parse),
    BuiltinFunction::new("stringify", Arity::Range(1, 2), stringify),
];

/// Largest integer every f64 represents exactly.
const MAX_SAFE_INTEGER: f64 = 9_007_199_254_740_991.0;

/// Indentation strings are capped at ten characters.
const MAX_INDENT: usize = 10;

pub(crate) fn module() -> Value {
    function_table(FUNCTIONS)
}

#[cold]
fn json_error(message: String, suggestion: &str, loc: &Location) -> MimoError {
    MimoError::runtime("JSON001", message, loc.clone()).with_suggestion(suggestion)
}

fn parse(_: &mut Interpreter, args: &[Value], loc: &Location) -> Result<Value, MimoError> {
    let Value::String(text) = &args[0] else {
        return Err(type_error("json.parse() expects a JSON string as its argument.", loc)
            .with_suggestion("Provide a string containing valid JSON."));
    };
    let parsed: serde_json::Value = serde_json::from_str(text).map_err(|e| {
        json_error(
            format!("Failed to parse JSON string: {e}"),
            "Ensure the string contains valid JSON syntax.",
            loc,
        )
    })?;
    Ok(from_json(parsed))
}

fn from_json(json: serde_json::Value) -> Value {
    match json {
        serde_json::Value::Null => Value::Null,
        serde_json::Value::Bool(b) => Value::Bool(b),
        serde_json::Value::Number(n) => Value::Number(n.as_f64().unwrap_or(f64::NAN)),
        serde_json::Value::String(s) => Value::from(s),
        serde_json::Value::Array(items) => {
            Value::array(items.into_iter().map(from_json).collect())
        }
        serde_json::Value::Object(map) => Value::object(
            map.into_iter()
                .map(|(key, value)| (key, from_json(value)))
                .collect::<ObjectMap>(),
        ),
    }
}

/// Resolve the optional indent argument to the string used per level.
fn indent_arg(args: &[Value], loc: &Location) -> Result<String, MimoError> {
    match args.get(1) {
        None | Some(Value::Null) => Ok(String::new()),
        Some(Value::Number(n)) if *n < 0.0 => Err(MimoError::runtime(
            "ARG001",
            "json.stringify() indent number must be non-negative.",
            loc.clone(),
        )
        .with_suggestion("Provide a non-negative number for indentation.")),
        Some(Value::Number(n)) => Ok(" ".repeat((n.trunc() as usize).min(MAX_INDENT))),
        Some(Value::String(s)) => Ok(s.chars().take(MAX_INDENT).collect()),
        Some(_) => Err(type_error(
            "json.stringify() second argument (indent) must be a number or a string.",
            loc,
        )
        .with_suggestion("Provide a number for spaces or a string for the indent characters.")),
    }
}

fn stringify(_: &mut Interpreter, args: &[Value], loc: &Location) -> Result<Value, MimoError> {
    let indent = indent_arg(args, loc)?;
    let Some(json) = to_json(&args[0], &mut Vec::new()).map_err(|cause| {
        json_error(
            format!("Failed to stringify value to JSON: {cause}"),
            "Ensure the value can be serialized to JSON (e.g., no functions or circular references).",
            loc,
        )
    })?
    else {
        return Ok(Value::Null);
    };

    let text = if indent.is_empty() {
        serde_json::to_string(&json)
    } else {
        let mut out = Vec::new();
        let mut serializer =
            Serializer::with_formatter(&mut out, PrettyFormatter::with_indent(indent.as_bytes()));
        json.serialize(&mut serializer)
            .map(|()| String::from_utf8_lossy(&out).into_owned())
    };
    text.map(Value::from).map_err(|e| {
        json_error(
            format!("Failed to stringify value to JSON: {e}"),
            "Ensure the value can be serialized to JSON (e.g., no functions or circular references).",
            loc,
        )
    })
}

/// Convert to JSON. `None` means the value has no JSON form (functions).
fn to_json(
    value: &Value,
    seen: &mut Vec<*const ()>,
) -> Result<Option<serde_json::Value>, &'static str> {
    let json = match value {
        Value::Null => serde_json::Value::Null,
        Value::Bool(b) => serde_json::Value::Bool(*b),
        Value::Number(n) => number_to_json(*n),
        Value::String(s) => serde_json::Value::String(s.to_string()),
        Value::DateTime(dt) => {
            serde_json::Value::String(dt.to_rfc3339_opts(SecondsFormat::Millis, true))
        }
        Value::Function(_) | Value::Builtin(_) => return Ok(None),
        Value::Array(items) => {
            let ptr = std::rc::Rc::as_ptr(items).cast();
            if seen.contains(&ptr) {
                return Err("circular structure");
            }
            seen.push(ptr);
            let mut out = Vec::with_capacity(items.borrow().len());
            for item in items.borrow().iter() {
                out.push(to_json(item, seen)?.unwrap_or(serde_json::Value::Null));
            }
            seen.pop();
            serde_json::Value::Array(out)
        }
        Value::Object(map) => {
            let ptr = std::rc::Rc::as_ptr(map).cast();
            if seen.contains(&ptr) {
                return Err("circular structure");
            }
            seen.push(ptr);
            let mut out = Map::new();
            for (key, item) in map.borrow().iter() {
                if let Some(json) = to_json(item, seen)? {
                    out.insert(key.to_string(), json);
                }
            }
            seen.pop();
            serde_json::Value::Object(out)
        }
    };
    Ok(Some(json))
}

/// Integral numbers serialize without a fractional part.
fn number_to_json(n: f64) -> serde_json::Value {
    if n.fract() == 0.0 && n.abs() <= MAX_SAFE_INTEGER {
        return serde_json::Value::Number(Number::from(n as i64));
    }
    Number::from_f64(n).map_or(serde_json::Value::Null, serde_json::Value::Number)
}

#[cfg(test)]
mod tests;
