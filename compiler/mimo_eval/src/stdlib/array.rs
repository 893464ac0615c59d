//! `array`: higher-order, search, access, transformation and set functions.
//!
//! Functions never mutate their input; results are new arrays. Callbacks
//! receive `(item, index, array)` (`reduce`: `(acc, item, index, array)`)
//! truncated to the number of parameters they declare, and see later
//! writes to the array while it is being iterated.

use std::cmp::Ordering;
use std::rc::Rc;

use mimo_diagnostic::MimoError;
use mimo_ir::Location;

use crate::builtins::args::{
    expect_array, expect_function, expect_number, optional, relative_index,
};
use crate::builtins::function_table;
use crate::function::{Arity, BuiltinFunction, FunctionValue};
use crate::interpreter::eval::len_value;
use crate::interpreter::Interpreter;
use crate::value::{ArrayRef, Value};

const FUNCTIONS: &[BuiltinFunction] = &[
    BuiltinFunction::new("map", Arity::Exact(2), map),
    BuiltinFunction::new("filter", Arity::Exact(2), filter),
    BuiltinFunction::new("reduce", Arity::Range(2, 3), reduce),
    BuiltinFunction::new("for_each", Arity::Exact(2), for_each),
    BuiltinFunction::new("find", Arity::Exact(2), find),
    BuiltinFunction::new("find_index", Arity::Exact(2), find_index),
    BuiltinFunction::new("includes", Arity::Range(2, 3), includes),
    BuiltinFunction::new("index_of", Arity::Range(2, 3), index_of),
    BuiltinFunction::new("last_index_of", Arity::Range(2, 3), last_index_of),
    BuiltinFunction::new("slice", Arity::Range(1, 3), slice),
    BuiltinFunction::new("first", Arity::Exact(1), first),
    BuiltinFunction::new("last", Arity::Exact(1), last),
    BuiltinFunction::new("is_empty", Arity::Exact(1), is_empty),
    BuiltinFunction::new("sort", Arity::Exact(1), sort),
    BuiltinFunction::new("reverse", Arity::Exact(1), reverse),
    BuiltinFunction::new("concat", Arity::AtLeast(1), concat),
    BuiltinFunction::new("unique", Arity::Exact(1), unique),
    BuiltinFunction::new("intersection", Arity::Exact(2), intersection),
    BuiltinFunction::new("union", Arity::Exact(2), union),
    BuiltinFunction::new("difference", Arity::Exact(2), difference),
];

pub(crate) fn module() -> Value {
    function_table(FUNCTIONS)
}

/// Element `i`, re-read on every step so callbacks observe mutations.
fn item_at(items: &ArrayRef, i: usize) -> Option<Value> {
    items.borrow().get(i).cloned()
}

/// Call `callback` with the leading `full` arguments it declares.
fn invoke(
    interp: &mut Interpreter,
    callback: &Rc<FunctionValue>,
    mut full: Vec<Value>,
    loc: &Location,
) -> Result<Value, MimoError> {
    if !callback.has_rest() {
        full.truncate(callback.param_count());
    }
    interp.call_user(callback, full, loc)
}

/// Iterate `(index, item)` and call the callback with `(item, index, array)`,
/// stopping as soon as `visit` returns `Some`.
fn each_with_callback<T>(
    interp: &mut Interpreter,
    func: &str,
    args: &[Value],
    loc: &Location,
    mut visit: impl FnMut(usize, Value, Value) -> Option<T>,
) -> Result<Option<T>, MimoError> {
    let items = expect_array(func, &args[0], 1, loc)?;
    let callback = expect_function(func, &args[1], 2, loc)?;
    let mut i = 0;
    while let Some(item) = item_at(&items, i) {
        let full = vec![item.clone(), len_value(i), args[0].clone()];
        let result = invoke(interp, &callback, full, loc)?;
        if let Some(done) = visit(i, item, result) {
            return Ok(Some(done));
        }
        i += 1;
    }
    Ok(None)
}

fn map(interp: &mut Interpreter, args: &[Value], loc: &Location) -> Result<Value, MimoError> {
    let mut out = Vec::new();
    each_with_callback::<()>(interp, "map", args, loc, |_, _, mapped| {
        out.push(mapped);
        None
    })?;
    Ok(Value::array(out))
}

fn filter(interp: &mut Interpreter, args: &[Value], loc: &Location) -> Result<Value, MimoError> {
    let mut out = Vec::new();
    each_with_callback::<()>(interp, "filter", args, loc, |_, item, keep| {
        if keep.is_truthy() {
            out.push(item);
        }
        None
    })?;
    Ok(Value::array(out))
}

fn for_each(interp: &mut Interpreter, args: &[Value], loc: &Location) -> Result<Value, MimoError> {
    each_with_callback::<()>(interp, "for_each", args, loc, |_, _, _| None)?;
    Ok(Value::Null)
}

fn find(interp: &mut Interpreter, args: &[Value], loc: &Location) -> Result<Value, MimoError> {
    let found = each_with_callback(interp, "find", args, loc, |_, item, hit| {
        hit.is_truthy().then_some(item)
    })?;
    Ok(found.unwrap_or(Value::Null))
}

fn find_index(interp: &mut Interpreter, args: &[Value], loc: &Location) -> Result<Value, MimoError> {
    let found = each_with_callback(interp, "find_index", args, loc, |i, _, hit| {
        hit.is_truthy().then_some(i)
    })?;
    Ok(found.map_or(Value::Number(-1.0), len_value))
}

fn reduce(interp: &mut Interpreter, args: &[Value], loc: &Location) -> Result<Value, MimoError> {
    let items = expect_array("reduce", &args[0], 1, loc)?;
    let callback = expect_function("reduce", &args[1], 2, loc)?;

    let (mut acc, mut i) = match args.get(2) {
        Some(initial) => (initial.clone(), 0),
        None => match item_at(&items, 0) {
            Some(head) => (head, 1),
            None => {
                return Err(MimoError::runtime(
                    "ARG001",
                    "reduce() of empty array with no initial value.",
                    loc.clone(),
                )
                .with_suggestion(
                    "Provide an initial value to reduce() when operating on an empty array.",
                ))
            }
        },
    };
    while let Some(item) = item_at(&items, i) {
        let full = vec![acc, item, len_value(i), args[0].clone()];
        acc = invoke(interp, &callback, full, loc)?;
        i += 1;
    }
    Ok(acc)
}

fn includes(_: &mut Interpreter, args: &[Value], loc: &Location) -> Result<Value, MimoError> {
    let items = expect_array("includes", &args[0], 1, loc)?;
    let from = match args.get(2) {
        None => 0,
        Some(Value::Number(n)) => relative_index(*n, items.borrow().len()),
        Some(_) => {
            return Err(MimoError::runtime(
                "ARG001",
                "includes() fromIndex (arg 3) must be a number.",
                loc.clone(),
            )
            .with_suggestion("Provide a number for the fromIndex parameter."))
        }
    };
    let needle = &args[1];
    let found = items
        .borrow()
        .iter()
        .skip(from)
        .any(|item| item.same_value_zero(needle));
    Ok(Value::Bool(found))
}

fn index_of(_: &mut Interpreter, args: &[Value], loc: &Location) -> Result<Value, MimoError> {
    let items = expect_array("index_of", &args[0], 1, loc)?;
    let items = items.borrow();
    let from = match args.get(2) {
        None => 0,
        Some(value) => relative_index(expect_number("index_of", value, 3, loc)?, items.len()),
    };
    let needle = &args[1];
    let position = items
        .iter()
        .enumerate()
        .skip(from)
        .find(|(_, item)| item.strict_equals(needle))
        .map(|(i, _)| i);
    Ok(position.map_or(Value::Number(-1.0), len_value))
}

fn last_index_of(_: &mut Interpreter, args: &[Value], loc: &Location) -> Result<Value, MimoError> {
    let items = expect_array("last_index_of", &args[0], 1, loc)?;
    let items = items.borrow();
    if items.is_empty() {
        return Ok(Value::Number(-1.0));
    }
    let len = items.len() as f64;
    let from = match args.get(2) {
        None => len - 1.0,
        Some(value) => {
            let n = expect_number("last_index_of", value, 3, loc)?.trunc();
            if n < 0.0 {
                len + n
            } else {
                n.min(len - 1.0)
            }
        }
    };
    if from.is_nan() || from < 0.0 {
        return Ok(Value::Number(-1.0));
    }
    let from = from as usize;
    let position = items[..=from]
        .iter()
        .rposition(|item| item.strict_equals(&args[1]));
    Ok(position.map_or(Value::Number(-1.0), len_value))
}

/// `slice(array, begin?, end?)` over already borrowed items. A `null`
/// bound means the default.
pub(crate) fn slice_items(items: &[Value], args: &[Value], loc: &Location) -> Result<Value, MimoError> {
    let len = items.len();
    let begin = match optional(args, 2) {
        Some(value) => relative_index(expect_number("slice", value, 2, loc)?, len),
        None => 0,
    };
    let end = match optional(args, 3) {
        Some(value) => relative_index(expect_number("slice", value, 3, loc)?, len),
        None => len,
    };
    let out = if begin < end {
        items[begin..end].to_vec()
    } else {
        Vec::new()
    };
    Ok(Value::array(out))
}

fn slice(_: &mut Interpreter, args: &[Value], loc: &Location) -> Result<Value, MimoError> {
    let items = expect_array("slice", &args[0], 1, loc)?;
    let items = items.borrow();
    slice_items(&items, args, loc)
}

fn first(_: &mut Interpreter, args: &[Value], loc: &Location) -> Result<Value, MimoError> {
    let items = expect_array("first", &args[0], 1, loc)?;
    let first = items.borrow().first().cloned();
    Ok(first.unwrap_or(Value::Null))
}

fn last(_: &mut Interpreter, args: &[Value], loc: &Location) -> Result<Value, MimoError> {
    let items = expect_array("last", &args[0], 1, loc)?;
    let last = items.borrow().last().cloned();
    Ok(last.unwrap_or(Value::Null))
}

fn is_empty(_: &mut Interpreter, args: &[Value], loc: &Location) -> Result<Value, MimoError> {
    let items = expect_array("is_empty", &args[0], 1, loc)?;
    let empty = items.borrow().is_empty();
    Ok(Value::Bool(empty))
}

/// Numbers sort numerically, strings by code point, and mixed arrays by
/// their printed form.
fn sort(_: &mut Interpreter, args: &[Value], loc: &Location) -> Result<Value, MimoError> {
    let items = expect_array("sort", &args[0], 1, loc)?;
    let mut sorted = items.borrow().clone();
    if sorted.iter().all(|v| matches!(v, Value::Number(_))) {
        sorted.sort_by(|a, b| {
            let (a, b) = (a.as_number().unwrap_or(0.0), b.as_number().unwrap_or(0.0));
            a.partial_cmp(&b).unwrap_or(Ordering::Equal)
        });
    } else if sorted.iter().all(|v| matches!(v, Value::String(_))) {
        sorted.sort_by(|a, b| a.as_str().cmp(&b.as_str()));
    } else {
        sorted.sort_by_cached_key(ToString::to_string);
    }
    Ok(Value::array(sorted))
}

fn reverse(_: &mut Interpreter, args: &[Value], loc: &Location) -> Result<Value, MimoError> {
    let items = expect_array("reverse", &args[0], 1, loc)?;
    let reversed = items.borrow().iter().rev().cloned().collect();
    Ok(Value::array(reversed))
}

fn concat(_: &mut Interpreter, args: &[Value], loc: &Location) -> Result<Value, MimoError> {
    let mut out = Vec::new();
    for (i, value) in args.iter().enumerate() {
        let items = expect_array("concat", value, i + 1, loc)?;
        out.extend(items.borrow().iter().cloned());
    }
    Ok(Value::array(out))
}

/// Append `value` unless an equal (`NaN`-aware strict) value is present.
fn push_unique(out: &mut Vec<Value>, value: &Value) {
    if !out.iter().any(|v| v.same_value_zero(value)) {
        out.push(value.clone());
    }
}

fn contains(items: &[Value], value: &Value) -> bool {
    items.iter().any(|v| v.same_value_zero(value))
}

fn unique(_: &mut Interpreter, args: &[Value], loc: &Location) -> Result<Value, MimoError> {
    let items = expect_array("unique", &args[0], 1, loc)?;
    let mut out = Vec::new();
    for value in items.borrow().iter() {
        push_unique(&mut out, value);
    }
    Ok(Value::array(out))
}

fn two_arrays(func: &str, args: &[Value], loc: &Location) -> Result<(Vec<Value>, Vec<Value>), MimoError> {
    let a = expect_array(func, &args[0], 1, loc)?;
    let b = expect_array(func, &args[1], 2, loc)?;
    let (a, b) = (a.borrow().clone(), b.borrow().clone());
    Ok((a, b))
}

fn intersection(_: &mut Interpreter, args: &[Value], loc: &Location) -> Result<Value, MimoError> {
    let (a, b) = two_arrays("intersection", args, loc)?;
    Ok(Value::array(a.into_iter().filter(|v| contains(&b, v)).collect()))
}

fn union(_: &mut Interpreter, args: &[Value], loc: &Location) -> Result<Value, MimoError> {
    let (a, b) = two_arrays("union", args, loc)?;
    let mut out = Vec::new();
    for value in a.iter().chain(b.iter()) {
        push_unique(&mut out, value);
    }
    Ok(Value::array(out))
}

fn difference(_: &mut Interpreter, args: &[Value], loc: &Location) -> Result<Value, MimoError> {
    let (a, b) = two_arrays("difference", args, loc)?;
    Ok(Value::array(a.into_iter().filter(|v| !contains(&b, v)).collect()))
}

#[cfg(test)]
mod tests;
