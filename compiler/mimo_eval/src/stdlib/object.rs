//! `object`: shallow, non-mutating object helpers.

use mimo_diagnostic::MimoError;
use mimo_ir::Location;

use crate::builtins::args::{expect_function, type_error};
use crate::builtins::function_table;
use crate::function::{Arity, BuiltinFunction};
use crate::interpreter::Interpreter;
use crate::value::{ArrayRef, ObjectMap, ObjectRef, Value};

const FUNCTIONS: &[BuiltinFunction] = &[
    BuiltinFunction::new("merge", Arity::AtLeast(0), merge),
    BuiltinFunction::new("pick", Arity::Exact(2), pick),
    BuiltinFunction::new("omit", Arity::Exact(2), omit),
    BuiltinFunction::new("map_values", Arity::Exact(2), map_values),
    BuiltinFunction::new("from_entries", Arity::Exact(1), from_entries),
    BuiltinFunction::new("is_empty", Arity::Exact(1), is_empty),
];

pub(crate) fn module() -> Value {
    function_table(FUNCTIONS)
}

fn object_arg(func: &str, value: &Value, pos: usize, loc: &Location) -> Result<ObjectRef, MimoError> {
    match value {
        Value::Object(map) => Ok(map.clone()),
        other => Err(type_error(
            format!(
                "{func}() expects an object as argument {pos}. Got '{}'.",
                other.type_name()
            ),
            loc,
        )
        .with_suggestion(format!(
            "Provide a plain object for argument {pos} of {func}()."
        ))),
    }
}

fn array_arg(func: &str, value: &Value, pos: usize, loc: &Location) -> Result<ArrayRef, MimoError> {
    match value {
        Value::Array(items) => Ok(items.clone()),
        other => Err(type_error(
            format!(
                "{func}() expects an array as argument {pos}. Got '{}'.",
                other.type_name()
            ),
            loc,
        )
        .with_suggestion(format!("Provide an array for argument {pos} of {func}()."))),
    }
}

/// The key list of `pick`/`omit`; every entry must be a string.
fn key_list(func: &str, value: &Value, loc: &Location) -> Result<Vec<String>, MimoError> {
    let items = array_arg(func, value, 2, loc)?;
    let items = items.borrow();
    items
        .iter()
        .enumerate()
        .map(|(i, key)| match key {
            Value::String(key) => Ok(key.to_string()),
            other => Err(type_error(
                format!(
                    "{func}() expects key list to contain strings. Got '{}' at index {i}.",
                    other.type_name()
                ),
                loc,
            )),
        })
        .collect()
}

/// Later objects win on key conflicts.
fn merge(_: &mut Interpreter, args: &[Value], loc: &Location) -> Result<Value, MimoError> {
    let mut merged = ObjectMap::new();
    for (i, value) in args.iter().enumerate() {
        let map = object_arg("merge", value, i + 1, loc)?;
        for (key, item) in map.borrow().iter() {
            merged.insert(key, item.clone());
        }
    }
    Ok(Value::object(merged))
}

fn pick(_: &mut Interpreter, args: &[Value], loc: &Location) -> Result<Value, MimoError> {
    let source = object_arg("pick", &args[0], 1, loc)?;
    let keys = key_list("pick", &args[1], loc)?;
    let source = source.borrow();
    let picked = keys
        .into_iter()
        .filter_map(|key| source.get(&key).cloned().map(|value| (key, value)))
        .collect::<ObjectMap>();
    Ok(Value::object(picked))
}

fn omit(_: &mut Interpreter, args: &[Value], loc: &Location) -> Result<Value, MimoError> {
    let source = object_arg("omit", &args[0], 1, loc)?;
    let excluded = key_list("omit", &args[1], loc)?;
    let kept = source
        .borrow()
        .iter()
        .filter(|(key, _)| !excluded.iter().any(|ex| ex == key))
        .map(|(key, value)| (key, value.clone()))
        .collect::<ObjectMap>();
    Ok(Value::object(kept))
}

/// Callback receives `(value, key, object)` truncated to its parameter count.
fn map_values(interp: &mut Interpreter, args: &[Value], loc: &Location) -> Result<Value, MimoError> {
    let source = object_arg("map_values", &args[0], 1, loc)?;
    let callback = expect_function("map_values", &args[1], 2, loc)?;
    let entries: Vec<(String, Value)> = source
        .borrow()
        .iter()
        .map(|(key, value)| (key.to_string(), value.clone()))
        .collect();

    let mut mapped = ObjectMap::new();
    for (key, value) in entries {
        let mut call_args = vec![value, Value::from(key.as_str()), args[0].clone()];
        if !callback.has_rest() {
            call_args.truncate(callback.param_count());
        }
        let result = interp.call_user(&callback, call_args, loc)?;
        mapped.insert(key, result);
    }
    Ok(Value::object(mapped))
}

/// Keys are stringified; later duplicates overwrite earlier ones.
fn from_entries(_: &mut Interpreter, args: &[Value], loc: &Location) -> Result<Value, MimoError> {
    let entries = array_arg("from_entries", &args[0], 1, loc)?;
    let mut map = ObjectMap::new();
    for (i, entry) in entries.borrow().iter().enumerate() {
        let pair = match entry {
            Value::Array(pair) if pair.borrow().len() >= 2 => pair.borrow(),
            _ => {
                return Err(type_error(
                    format!(
                        "from_entries() expects each item to be an array [key, value]. Invalid entry at index {i}."
                    ),
                    loc,
                ))
            }
        };
        map.insert(pair[0].property_key(), pair[1].clone());
    }
    Ok(Value::object(map))
}

fn is_empty(_: &mut Interpreter, args: &[Value], loc: &Location) -> Result<Value, MimoError> {
    let map = object_arg("is_empty", &args[0], 1, loc)?;
    let empty = map.borrow().is_empty();
    Ok(Value::Bool(empty))
}

#[cfg(test)]
mod tests;
