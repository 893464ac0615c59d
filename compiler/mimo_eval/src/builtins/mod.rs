//! Global builtin functions.
//!
//! Every entry of [`BUILTINS`] is bound in the global scope with `set`
//! semantics, so programs may shadow or rebind them. The `array` standard
//! library module is additionally exposed as the global `Array`.

pub(crate) mod args;

use mimo_diagnostic::MimoError;
use mimo_ir::{DeclKind, Location};

use crate::environment::Environment;
use crate::function::{Arity, BuiltinFunction};
use crate::errors;
use crate::interpreter::eval::{len_value, store_at};
use crate::interpreter::Interpreter;
use crate::stdlib;
use crate::value::{ObjectMap, Value, MAX_COLLECTION_LEN};

use args::type_error;

/// Bind every builtin, plus `Array`, in `global`.
pub(crate) fn install(global: &Environment) {
    for builtin in BUILTINS {
        let defined = global.define(builtin.name, Value::builtin(builtin.clone()), DeclKind::Set);
        debug_assert!(defined.is_ok(), "builtin {} bound twice", builtin.name);
    }
    if let Some(array) = stdlib::build("array") {
        let defined = global.define("Array", array, DeclKind::Set);
        debug_assert!(defined.is_ok(), "Array bound twice");
    }
}

pub(crate) const BUILTINS: &[BuiltinFunction] = &[
    BuiltinFunction::new("len", Arity::Exact(1), len),
    BuiltinFunction::new("get", Arity::Exact(2), get),
    BuiltinFunction::new("update", Arity::Exact(3), update),
    BuiltinFunction::new("type", Arity::Exact(1), type_of),
    BuiltinFunction::new("push", Arity::Exact(2), push),
    BuiltinFunction::new("pop", Arity::Exact(1), pop),
    BuiltinFunction::new("slice", Arity::Range(1, 3), slice),
    BuiltinFunction::new("range", Arity::Range(1, 3), range),
    BuiltinFunction::new("join", Arity::Exact(2), join),
    BuiltinFunction::new("has_property", Arity::Exact(2), has_property),
    BuiltinFunction::new("keys", Arity::Exact(1), keys),
    BuiltinFunction::new("values", Arity::Exact(1), values),
    BuiltinFunction::new("entries", Arity::Exact(1), entries),
    BuiltinFunction::new("get_arguments", Arity::Exact(0), get_arguments),
    BuiltinFunction::new("get_env", Arity::Exact(1), get_env),
    BuiltinFunction::new("exit_code", Arity::Exact(1), exit_code),
    BuiltinFunction::new("coalesce", Arity::Exact(2), coalesce),
    BuiltinFunction::new("get_property_safe", Arity::Exact(2), get_property_safe),
    BuiltinFunction::new("if_else", Arity::Exact(3), if_else),
];

fn len(_: &mut Interpreter, args: &[Value], loc: &Location) -> Result<Value, MimoError> {
    match &args[0] {
        Value::Array(items) => Ok(len_value(items.borrow().len())),
        Value::String(s) => Ok(len_value(s.chars().count())),
        other => Err(type_error(
            format!("len() expects an array or string. Got '{}'.", other.type_name()),
            loc,
        )
        .with_suggestion("Provide an array or string to len().")),
    }
}

#[cold]
fn index_not_integer(key: &Value, loc: &Location) -> MimoError {
    type_error(
        format!("Array index must be an integer. Got '{}'.", key.type_name()),
        loc,
    )
}

fn get(_: &mut Interpreter, args: &[Value], loc: &Location) -> Result<Value, MimoError> {
    let (collection, key) = (&args[0], &args[1]);
    match collection {
        Value::Array(items) => {
            let Some(index) = key.as_integer() else {
                return Err(index_not_integer(key, loc));
            };
            let items = items.borrow();
            Ok(usize::try_from(index)
                .ok()
                .and_then(|i| items.get(i).cloned())
                .unwrap_or(Value::Null))
        }
        Value::Object(map) => Ok(map
            .borrow()
            .get(&key.property_key())
            .cloned()
            .unwrap_or(Value::Null)),
        other => Err(MimoError::runtime(
            "TYPE002",
            format!(
                "Cannot 'get' from type '{}'. Expected array or object.",
                other.type_name()
            ),
            loc.clone(),
        )),
    }
}

fn update(_: &mut Interpreter, args: &[Value], loc: &Location) -> Result<Value, MimoError> {
    let (collection, key, value) = (&args[0], &args[1], &args[2]);
    match collection {
        Value::Array(items) => {
            let Some(index) = key.as_integer() else {
                return Err(index_not_integer(key, loc));
            };
            let Ok(index) = usize::try_from(index) else {
                return Err(MimoError::runtime(
                    "INDEX001",
                    format!("Index {index} cannot be negative."),
                    loc.clone(),
                ));
            };
            store_at(&mut items.borrow_mut(), index, value.clone(), loc)?;
            Ok(value.clone())
        }
        Value::Object(map) => {
            map.borrow_mut().insert(key.property_key(), value.clone());
            Ok(value.clone())
        }
        other => Err(MimoError::runtime(
            "TYPE002",
            format!(
                "Cannot 'update' on type '{}'. Expected array or object.",
                other.type_name()
            ),
            loc.clone(),
        )),
    }
}

fn type_of(_: &mut Interpreter, args: &[Value], _: &Location) -> Result<Value, MimoError> {
    Ok(Value::from(args[0].type_name()))
}

fn push(_: &mut Interpreter, args: &[Value], loc: &Location) -> Result<Value, MimoError> {
    let Value::Array(items) = &args[0] else {
        return Err(type_error("push() requires an array as first argument", loc)
            .with_suggestion("Provide an array as the first argument to push()."));
    };
    items.borrow_mut().push(args[1].clone());
    Ok(args[0].clone())
}

fn pop(_: &mut Interpreter, args: &[Value], loc: &Location) -> Result<Value, MimoError> {
    let Value::Array(items) = &args[0] else {
        return Err(type_error("pop() requires an array", loc)
            .with_suggestion("Provide an array to pop()."));
    };
    items.borrow_mut().pop().ok_or_else(|| {
        MimoError::runtime("INDEX001", "Cannot pop from empty array", loc.clone())
            .with_suggestion("Check if the array has elements before calling pop().")
    })
}

fn slice(_: &mut Interpreter, args: &[Value], loc: &Location) -> Result<Value, MimoError> {
    let Value::Array(items) = &args[0] else {
        return Err(type_error("slice() requires an array as first argument", loc)
            .with_suggestion("Provide an array as the first argument to slice()."));
    };
    stdlib::array::slice_items(&items.borrow(), args, loc)
}

fn range(_: &mut Interpreter, args: &[Value], loc: &Location) -> Result<Value, MimoError> {
    let mut numbers = Vec::with_capacity(args.len());
    for value in args {
        let Value::Number(n) = value else {
            return Err(type_error("range() arguments must be numbers.", loc)
                .with_suggestion("Ensure start, end, and step values are numbers."));
        };
        numbers.push(*n);
    }
    if numbers.iter().any(|n| !n.is_finite() || n.fract() != 0.0) {
        return Err(type_error("range() arguments must be integers.", loc)
            .with_suggestion("Ensure start, end, and step values are whole numbers."));
    }
    let (start, end, step) = match numbers[..] {
        [end] => (0.0, end, 1.0),
        [start, end] => (start, end, 1.0),
        [start, end, step, ..] => (start, end, step),
        [] => (0.0, 0.0, 1.0),
    };
    if step == 0.0 {
        return Err(
            MimoError::runtime("ARG001", "range() step argument cannot be zero.", loc.clone())
                .with_suggestion("Provide a non-zero step value."),
        );
    }

    let count = ((end - start) / step).ceil().max(0.0);
    if count > MAX_COLLECTION_LEN as f64 {
        return Err(errors::result_too_large("range", count, loc.clone()));
    }
    let out = (0..count as usize)
        .map(|k| Value::Number(start + k as f64 * step))
        .collect();
    Ok(Value::array(out))
}

fn join(_: &mut Interpreter, args: &[Value], loc: &Location) -> Result<Value, MimoError> {
    let Value::Array(items) = &args[0] else {
        return Err(type_error("join() requires an array as first argument", loc)
            .with_suggestion("Provide an array as the first argument to join()."));
    };
    let Value::String(separator) = &args[1] else {
        return Err(type_error("join() requires a string separator as second argument", loc)
            .with_suggestion("Provide a string as the second argument to join()."));
    };
    let joined = items
        .borrow()
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(separator);
    Ok(Value::from(joined))
}

fn has_property(_: &mut Interpreter, args: &[Value], _: &Location) -> Result<Value, MimoError> {
    let key = args[1].property_key();
    let found = match &args[0] {
        Value::Object(map) => map.borrow().contains_key(&key),
        Value::Array(items) => key
            .parse::<usize>()
            .is_ok_and(|i| i.to_string() == key && i < items.borrow().len()),
        _ => false,
    };
    Ok(Value::Bool(found))
}

/// Shared argument check of `keys`, `values` and `entries`.
fn collection_arg<'a>(func: &str, value: &'a Value, loc: &Location) -> Result<&'a Value, MimoError> {
    match value {
        Value::Array(_) | Value::Object(_) => Ok(value),
        Value::Null => Err(type_error(format!("{func}() requires a non-null object."), loc)
            .with_suggestion(format!("Provide an object or array to {func}()."))),
        _ => Err(type_error(format!("{func}() requires an object argument."), loc)
            .with_suggestion(format!("Provide an object or array to {func}()."))),
    }
}

fn keys(_: &mut Interpreter, args: &[Value], loc: &Location) -> Result<Value, MimoError> {
    let keys = match collection_arg("keys", &args[0], loc)? {
        Value::Array(items) => (0..items.borrow().len()).map(len_value).collect(),
        Value::Object(map) => map.borrow().keys().map(Value::from).collect(),
        _ => Vec::new(),
    };
    Ok(Value::array(keys))
}

fn values(_: &mut Interpreter, args: &[Value], loc: &Location) -> Result<Value, MimoError> {
    let values = match collection_arg("values", &args[0], loc)? {
        Value::Array(items) => items.borrow().clone(),
        Value::Object(map) => map.borrow().values().cloned().collect(),
        _ => Vec::new(),
    };
    Ok(Value::array(values))
}

fn entries(_: &mut Interpreter, args: &[Value], loc: &Location) -> Result<Value, MimoError> {
    let pair = |key: String, value: &Value| Value::array(vec![Value::from(key), value.clone()]);
    let entries = match collection_arg("entries", &args[0], loc)? {
        Value::Array(items) => items
            .borrow()
            .iter()
            .enumerate()
            .map(|(i, value)| pair(i.to_string(), value))
            .collect(),
        Value::Object(map) => map
            .borrow()
            .iter()
            .map(|(key, value)| pair(key.to_string(), value))
            .collect(),
        _ => Vec::new(),
    };
    Ok(Value::array(entries))
}

fn get_arguments(interp: &mut Interpreter, _: &[Value], _: &Location) -> Result<Value, MimoError> {
    let arguments = interp.host.arguments().into_iter().map(Value::from).collect();
    Ok(Value::array(arguments))
}

fn get_env(interp: &mut Interpreter, args: &[Value], loc: &Location) -> Result<Value, MimoError> {
    let Value::String(name) = &args[0] else {
        return Err(
            type_error("get_env() expects a string variable name as its argument.", loc)
                .with_suggestion("Provide a string environment variable name."),
        );
    };
    Ok(interp.host.env_var(name).map_or(Value::Null, Value::from))
}

fn exit_code(interp: &mut Interpreter, args: &[Value], loc: &Location) -> Result<Value, MimoError> {
    let Value::Number(code) = &args[0] else {
        return Err(
            type_error("exit_code() expects a numeric exit code as its argument.", loc)
                .with_suggestion("Provide a number for the exit code."),
        );
    };
    let code = code.floor() as i32;
    interp.host.exit(code).map_err(|e| {
        MimoError::runtime("ADAPTER001", format!("exit_code() failed: {e}"), loc.clone())
            .with_suggestion("Use a host that can terminate the process.")
    })?;
    Ok(Value::Null)
}

fn coalesce(_: &mut Interpreter, args: &[Value], _: &Location) -> Result<Value, MimoError> {
    Ok(if args[0].is_null() {
        args[1].clone()
    } else {
        args[0].clone()
    })
}

fn get_property_safe(_: &mut Interpreter, args: &[Value], loc: &Location) -> Result<Value, MimoError> {
    let target = &args[0];
    if target.is_null() {
        return Ok(Value::Null);
    }
    let Value::String(property) = &args[1] else {
        return Err(type_error(
            format!(
                "get_property_safe() expects a string property name as argument 2. Got '{}'.",
                args[1].type_name()
            ),
            loc,
        )
        .with_suggestion("Provide a string literal for the property name (e.g., \"name\")."));
    };
    match target {
        Value::Number(_) | Value::Bool(_) => Err(MimoError::runtime(
            "TYPE002",
            format!(
                "Cannot safely access property '{property}' of non-object/non-string value of type '{}'.",
                target.type_name()
            ),
            loc.clone(),
        )
        .with_suggestion(
            "get_property_safe() is only applicable to objects, functions, or strings.",
        )),
        _ => crate::interpreter::eval::property_of(target, property, true, loc),
    }
}

fn if_else(_: &mut Interpreter, args: &[Value], _: &Location) -> Result<Value, MimoError> {
    Ok(if args[0].is_truthy() {
        args[1].clone()
    } else {
        args[2].clone()
    })
}

/// An object built from `(name, value)` pairs, used by stdlib modules.
pub(crate) fn module_object<'a>(members: impl IntoIterator<Item = (&'a str, Value)>) -> Value {
    Value::object(members.into_iter().collect::<ObjectMap>())
}

/// The export object of a stdlib module made only of functions.
pub(crate) fn function_table(functions: &[BuiltinFunction]) -> Value {
    module_object(
        functions
            .iter()
            .map(|f| (f.name, Value::builtin(f.clone()))),
    )
}

#[cfg(test)]
mod tests;
