//! `string`: case, trimming, padding, searching, slicing and replacement.
//!
//! Indexes and lengths count characters, not bytes.

use mimo_diagnostic::MimoError;
use mimo_ir::Location;

use crate::builtins::args::{clamp_to_usize, expect_number, expect_string, relative_index, type_error};
use crate::builtins::function_table;
use crate::errors;
use crate::function::{Arity, BuiltinFunction};
use crate::interpreter::eval::len_value;
use crate::interpreter::Interpreter;
use crate::value::{Value, MAX_COLLECTION_LEN};

const FUNCTIONS: &[BuiltinFunction] = &[
    BuiltinFunction::new("to_upper", Arity::Exact(1), to_upper),
    BuiltinFunction::new("to_lower", Arity::Exact(1), to_lower),
    BuiltinFunction::new("trim", Arity::Exact(1), trim),
    BuiltinFunction::new("trim_start", Arity::Exact(1), trim_start),
    BuiltinFunction::new("trim_end", Arity::Exact(1), trim_end),
    BuiltinFunction::new("pad_start", Arity::Range(2, 3), pad_start),
    BuiltinFunction::new("pad_end", Arity::Range(2, 3), pad_end),
    BuiltinFunction::new("contains", Arity::Range(2, 3), contains),
    BuiltinFunction::new("starts_with", Arity::Range(2, 3), starts_with),
    BuiltinFunction::new("ends_with", Arity::Range(2, 3), ends_with),
    BuiltinFunction::new("index_of", Arity::Range(2, 3), index_of),
    BuiltinFunction::new("last_index_of", Arity::Range(2, 3), last_index_of),
    BuiltinFunction::new("substring", Arity::Range(2, 3), substring),
    BuiltinFunction::new("slice", Arity::Range(2, 3), slice),
    BuiltinFunction::new("split", Arity::Range(1, 3), split),
    BuiltinFunction::new("replace", Arity::Exact(3), replace),
    BuiltinFunction::new("replace_all", Arity::Exact(3), replace_all),
    BuiltinFunction::new("repeat", Arity::Exact(2), repeat),
    BuiltinFunction::new("char_at", Arity::Exact(2), char_at),
    BuiltinFunction::new("is_empty", Arity::Exact(1), is_empty),
    BuiltinFunction::new("is_blank", Arity::Exact(1), is_blank),
    BuiltinFunction::new("to_title_case", Arity::Exact(1), to_title_case),
    BuiltinFunction::new("capitalize", Arity::Exact(1), capitalize),
];

pub(crate) fn module() -> Value {
    function_table(FUNCTIONS)
}

/// Optional numeric argument at `pos`.
fn optional_number(func: &str, args: &[Value], pos: usize, loc: &Location) -> Result<Option<f64>, MimoError> {
    args.get(pos - 1)
        .map(|value| expect_number(func, value, pos, loc))
        .transpose()
}

fn chars(s: &str) -> Vec<char> {
    s.chars().collect()
}

/// Character index of `needle` in `hay`, searching from `from`.
fn find_from(hay: &[char], needle: &[char], from: usize) -> Option<usize> {
    if needle.is_empty() {
        return Some(from.min(hay.len()));
    }
    if needle.len() > hay.len() {
        return None;
    }
    (from..=hay.len() - needle.len()).find(|&i| hay[i..].starts_with(needle))
}

/// Last character index of `needle` in `hay` starting at or before `from`.
fn rfind_from(hay: &[char], needle: &[char], from: usize) -> Option<usize> {
    if needle.len() > hay.len() {
        return None;
    }
    let last_start = (hay.len() - needle.len()).min(from);
    (0..=last_start).rev().find(|&i| hay[i..].starts_with(needle))
}

fn index_value(index: Option<usize>) -> Value {
    index.map_or(Value::Number(-1.0), len_value)
}

macro_rules! transform {
    ($($name:ident => $op:expr;)*) => {
        $(
            fn $name(_: &mut Interpreter, args: &[Value], loc: &Location) -> Result<Value, MimoError> {
                let s = expect_string(stringify!($name), &args[0], 1, loc)?;
                let op: fn(&str) -> String = $op;
                Ok(Value::from(op(s)))
            }
        )*
    };
}

transform! {
    to_upper => str::to_uppercase;
    to_lower => str::to_lowercase;
    trim => |s| s.trim().to_string();
    trim_start => |s| s.trim_start().to_string();
    trim_end => |s| s.trim_end().to_string();
    to_title_case => title_case;
    capitalize => capitalize_first;
}

fn capitalize_first(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Lowercase everything, then capitalize each space-separated word.
fn title_case(s: &str) -> String {
    s.to_lowercase()
        .split(' ')
        .map(capitalize_first)
        .collect::<Vec<_>>()
        .join(" ")
}

/// Padding to fill `s` up to `target` characters, cycling `pad`.
fn padding(func: &str, args: &[Value], loc: &Location) -> Result<(String, String), MimoError> {
    let s = expect_string(func, &args[0], 1, loc)?;
    let target = clamp_to_usize(expect_number(func, &args[1], 2, loc)?);
    let pad = match args.get(2) {
        Some(value) => expect_string(func, value, 3, loc)?,
        None => " ",
    };
    let len = s.chars().count();
    let fill = if target <= len || pad.is_empty() {
        String::new()
    } else if target > MAX_COLLECTION_LEN {
        return Err(errors::result_too_large(func, target as f64, loc.clone()));
    } else {
        pad.chars().cycle().take(target - len).collect()
    };
    Ok((s.to_string(), fill))
}

fn pad_start(_: &mut Interpreter, args: &[Value], loc: &Location) -> Result<Value, MimoError> {
    let (s, fill) = padding("pad_start", args, loc)?;
    Ok(Value::from(fill + &s))
}

fn pad_end(_: &mut Interpreter, args: &[Value], loc: &Location) -> Result<Value, MimoError> {
    let (s, fill) = padding("pad_end", args, loc)?;
    Ok(Value::from(s + &fill))
}

/// `contains(s, search, position?)`. The search string must not be empty.
fn contains(_: &mut Interpreter, args: &[Value], loc: &Location) -> Result<Value, MimoError> {
    let s = expect_string("contains", &args[0], 1, loc)?;
    let search = expect_string("contains", &args[1], 2, loc)?;
    if search.is_empty() {
        return Err(errors::invalid_argument(
            "contains() argument 2 cannot be an empty string.",
            loc.clone(),
        )
        .with_suggestion("Provide a non-empty string for argument 2 of 'contains'."));
    }
    let from = clamp_to_usize(optional_number("contains", args, 3, loc)?.unwrap_or(0.0));
    Ok(Value::Bool(find_from(&chars(s), &chars(search), from).is_some()))
}

fn starts_with(_: &mut Interpreter, args: &[Value], loc: &Location) -> Result<Value, MimoError> {
    let s = chars(expect_string("starts_with", &args[0], 1, loc)?);
    let search = chars(expect_string("starts_with", &args[1], 2, loc)?);
    let from = clamp_to_usize(optional_number("starts_with", args, 3, loc)?.unwrap_or(0.0));
    let from = from.min(s.len());
    Ok(Value::Bool(s[from..].starts_with(&search)))
}

/// `ends_with(s, search, length?)`: only the first `length` characters count.
fn ends_with(_: &mut Interpreter, args: &[Value], loc: &Location) -> Result<Value, MimoError> {
    let s = chars(expect_string("ends_with", &args[0], 1, loc)?);
    let search = chars(expect_string("ends_with", &args[1], 2, loc)?);
    let end = match optional_number("ends_with", args, 3, loc)? {
        Some(n) => clamp_to_usize(n).min(s.len()),
        None => s.len(),
    };
    Ok(Value::Bool(s[..end].ends_with(&search)))
}

fn index_of(_: &mut Interpreter, args: &[Value], loc: &Location) -> Result<Value, MimoError> {
    let s = chars(expect_string("index_of", &args[0], 1, loc)?);
    let search = chars(expect_string("index_of", &args[1], 2, loc)?);
    let from = clamp_to_usize(optional_number("index_of", args, 3, loc)?.unwrap_or(0.0));
    Ok(index_value(find_from(&s, &search, from)))
}

fn last_index_of(_: &mut Interpreter, args: &[Value], loc: &Location) -> Result<Value, MimoError> {
    let s = chars(expect_string("last_index_of", &args[0], 1, loc)?);
    let search = chars(expect_string("last_index_of", &args[1], 2, loc)?);
    let from = match optional_number("last_index_of", args, 3, loc)? {
        Some(n) if n.is_nan() => s.len(),
        Some(n) => clamp_to_usize(n),
        None => s.len(),
    };
    Ok(index_value(rfind_from(&s, &search, from)))
}

/// `substring(s, start, end?)`: bounds clamp to the string and are
/// swapped when `start > end`.
fn substring(_: &mut Interpreter, args: &[Value], loc: &Location) -> Result<Value, MimoError> {
    let s = chars(expect_string("substring", &args[0], 1, loc)?);
    let start = clamp_to_usize(expect_number("substring", &args[1], 2, loc)?).min(s.len());
    let end = match optional_number("substring", args, 3, loc)? {
        Some(n) => clamp_to_usize(n).min(s.len()),
        None => s.len(),
    };
    let (start, end) = if start > end { (end, start) } else { (start, end) };
    Ok(Value::from(s[start..end].iter().collect::<String>()))
}

/// `slice(s, begin, end?)`: negative bounds count from the end.
fn slice(_: &mut Interpreter, args: &[Value], loc: &Location) -> Result<Value, MimoError> {
    let s = chars(expect_string("slice", &args[0], 1, loc)?);
    let begin = relative_index(expect_number("slice", &args[1], 2, loc)?, s.len());
    let end = match optional_number("slice", args, 3, loc)? {
        Some(n) => relative_index(n, s.len()),
        None => s.len(),
    };
    let out: String = if begin < end {
        s[begin..end].iter().collect()
    } else {
        String::new()
    };
    Ok(Value::from(out))
}

/// `split(s, separator?, limit?)`. Without a separator the whole string is
/// the only element; an empty separator splits into characters. Numbers
/// are accepted as separators and used in printed form.
fn split(_: &mut Interpreter, args: &[Value], loc: &Location) -> Result<Value, MimoError> {
    let s = expect_string("split", &args[0], 1, loc)?;
    let separator = match args.get(1) {
        None => None,
        Some(Value::String(sep)) => Some(sep.to_string()),
        Some(n @ Value::Number(_)) => Some(n.to_string()),
        Some(other) => {
            return Err(type_error(
                format!(
                    "split() expects a string or number as argument 2. Got '{}'.",
                    other.type_name()
                ),
                loc,
            )
            .with_suggestion("Ensure argument 2 for 'split' is a string or number."))
        }
    };
    let limit = optional_number("split", args, 3, loc)?.map_or(usize::MAX, clamp_to_usize);

    let parts: Vec<Value> = match separator.as_deref() {
        None => vec![Value::from(s)],
        Some("") => s.chars().map(|c| Value::from(c.to_string())).collect(),
        Some(sep) => s.split(sep).map(Value::from).collect(),
    };
    Ok(Value::array(parts.into_iter().take(limit).collect()))
}

fn pattern_arg<'a>(func: &str, args: &'a [Value], loc: &Location) -> Result<&'a str, MimoError> {
    match &args[1] {
        Value::String(pattern) => Ok(pattern),
        Value::Number(_) => Err(type_error(
            format!("{func}() pattern (arg 2) must be a string for Mimo's string.{func}."),
            loc,
        )
        .with_suggestion("Provide a string for the pattern to replace.")),
        other => Err(type_error(
            format!(
                "{func}() expects a string or number as argument 2. Got '{}'.",
                other.type_name()
            ),
            loc,
        )
        .with_suggestion(format!(
            "Ensure argument 2 for '{func}' is a string or number."
        ))),
    }
}

/// Replace the first occurrence. The replacement is inserted literally.
fn replace(_: &mut Interpreter, args: &[Value], loc: &Location) -> Result<Value, MimoError> {
    let s = expect_string("replace", &args[0], 1, loc)?;
    let pattern = pattern_arg("replace", args, loc)?;
    let replacement = expect_string("replace", &args[2], 3, loc)?;
    Ok(Value::from(s.replacen(pattern, replacement, 1)))
}

/// An empty pattern inserts the replacement between every character.
fn replace_all(_: &mut Interpreter, args: &[Value], loc: &Location) -> Result<Value, MimoError> {
    let s = expect_string("replace_all", &args[0], 1, loc)?;
    let pattern = pattern_arg("replace_all", args, loc)?;
    let replacement = expect_string("replace_all", &args[2], 3, loc)?;
    Ok(Value::from(s.replace(pattern, replacement)))
}

fn repeat(_: &mut Interpreter, args: &[Value], loc: &Location) -> Result<Value, MimoError> {
    let s = expect_string("repeat", &args[0], 1, loc)?;
    let count = expect_number("repeat", &args[1], 2, loc)?;
    if count < 0.0 || count.is_infinite() {
        return Err(errors::invalid_argument(
            format!("repeat() count must be a non-negative finite number. Got {count}."),
            loc.clone(),
        ));
    }
    let count = clamp_to_usize(count);
    if s.len().saturating_mul(count) > MAX_COLLECTION_LEN {
        let len = s.len() as f64 * count as f64;
        return Err(errors::result_too_large("repeat", len, loc.clone()));
    }
    Ok(Value::from(s.repeat(count)))
}

/// Character at `index`, or `""` when out of range.
fn char_at(_: &mut Interpreter, args: &[Value], loc: &Location) -> Result<Value, MimoError> {
    let s = expect_string("char_at", &args[0], 1, loc)?;
    let index = expect_number("char_at", &args[1], 2, loc)?.trunc();
    let c = if index < 0.0 {
        None
    } else {
        s.chars().nth(clamp_to_usize(index))
    };
    Ok(Value::from(c.map(String::from).unwrap_or_default()))
}

fn is_empty(_: &mut Interpreter, args: &[Value], loc: &Location) -> Result<Value, MimoError> {
    let s = expect_string("is_empty", &args[0], 1, loc)?;
    Ok(Value::Bool(s.is_empty()))
}

fn is_blank(_: &mut Interpreter, args: &[Value], loc: &Location) -> Result<Value, MimoError> {
    let s = expect_string("is_blank", &args[0], 1, loc)?;
    Ok(Value::Bool(s.trim().is_empty()))
}
