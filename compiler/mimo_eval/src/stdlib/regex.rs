//! `regex`: pattern matching with the `regex` crate.
//!
//! Flags: `i` case-insensitive, `m` multi-line anchors, `s` dot matches
//! newline, `g` global (all matches instead of the first), `u` accepted
//! and ignored. Replacement strings use `$1`, `$<name>`, `$&` and `$$`.

use ::regex::{Captures, Regex, RegexBuilder};
use mimo_diagnostic::MimoError;
use mimo_ir::Location;

use crate::builtins::args::type_error;
use crate::builtins::function_table;
use crate::function::{Arity, BuiltinFunction};
use crate::interpreter::Interpreter;
use crate::value::Value;

const FUNCTIONS: &[BuiltinFunction] = &[
    BuiltinFunction::new("find_matches", Arity::Range(2, 3), find_matches),
    BuiltinFunction::new("is_match", Arity::Range(2, 3), is_match),
    BuiltinFunction::new("replace_all", Arity::Range(3, 4), replace_all),
    BuiltinFunction::new("extract", Arity::Range(2, 3), extract),
];

pub(crate) fn module() -> Value {
    function_table(FUNCTIONS)
}

fn string_arg<'a>(func: &str, value: &'a Value, pos: usize, loc: &Location) -> Result<&'a str, MimoError> {
    match value {
        Value::String(s) => Ok(s),
        other => Err(type_error(
            format!(
                "{func}() expects a string as argument {pos}. Got '{}'.",
                other.type_name()
            ),
            loc,
        )),
    }
}

#[cold]
fn invalid(message: impl std::fmt::Display, loc: &Location) -> MimoError {
    MimoError::runtime(
        "REGEX001",
        format!("Invalid regular expression: {message}"),
        loc.clone(),
    )
}

/// A compiled pattern plus whether the `g` flag was present.
struct Compiled {
    regex: Regex,
    global: bool,
}

fn compile(pattern: &str, flags: &str, loc: &Location) -> Result<Compiled, MimoError> {
    let mut builder = RegexBuilder::new(pattern);
    let mut global = false;
    for flag in flags.chars() {
        match flag {
            'i' => {
                builder.case_insensitive(true);
            }
            'm' => {
                builder.multi_line(true);
            }
            's' => {
                builder.dot_matches_new_line(true);
            }
            'g' => global = true,
            'u' => {}
            other => return Err(invalid(format!("invalid flag '{other}'"), loc)),
        }
    }
    let regex = builder.build().map_err(|e| invalid(e, loc))?;
    Ok(Compiled { regex, global })
}

/// The flags argument at `pos`, or `default` when it is absent or empty.
fn flags_arg<'a>(
    func: &str,
    args: &'a [Value],
    pos: usize,
    default: &'a str,
    loc: &Location,
) -> Result<&'a str, MimoError> {
    match args.get(pos - 1) {
        None | Some(Value::Null) => Ok(default),
        Some(value) => {
            let flags = string_arg(func, value, pos, loc)?;
            Ok(if flags.is_empty() { default } else { flags })
        }
    }
}

/// Full match followed by every group; unmatched groups are `null`.
fn captures_value(caps: &Captures<'_>) -> Value {
    Value::array(
        caps.iter()
            .map(|group| group.map_or(Value::Null, |m| Value::from(m.as_str())))
            .collect(),
    )
}

/// With `g`, every matched substring; otherwise the first match with its
/// groups. `null` when nothing matches.
fn find_matches(_: &mut Interpreter, args: &[Value], loc: &Location) -> Result<Value, MimoError> {
    let pattern = string_arg("regex.find_matches", &args[0], 1, loc)?;
    let text = string_arg("regex.find_matches", &args[1], 2, loc)?;
    let flags = match args.get(2) {
        None => "g",
        Some(value) => string_arg("regex.find_matches", value, 3, loc)?,
    };
    let compiled = compile(pattern, flags, loc)?;
    if compiled.global {
        let matches: Vec<Value> = compiled
            .regex
            .find_iter(text)
            .map(|m| Value::from(m.as_str()))
            .collect();
        return Ok(if matches.is_empty() {
            Value::Null
        } else {
            Value::array(matches)
        });
    }
    Ok(compiled
        .regex
        .captures(text)
        .map_or(Value::Null, |caps| captures_value(&caps)))
}

fn is_match(_: &mut Interpreter, args: &[Value], loc: &Location) -> Result<Value, MimoError> {
    let pattern = string_arg("regex.is_match", &args[0], 1, loc)?;
    let text = string_arg("regex.is_match", &args[1], 2, loc)?;
    let flags = flags_arg("regex.is_match", args, 3, "", loc)?;
    let compiled = compile(pattern, flags, loc)?;
    Ok(Value::Bool(compiled.regex.is_match(text)))
}

/// `replace_all(text, pattern, replacement, flags?)`. Flags default to
/// `g`; without it only the first match is replaced.
fn replace_all(_: &mut Interpreter, args: &[Value], loc: &Location) -> Result<Value, MimoError> {
    let text = string_arg("regex.replace_all", &args[0], 1, loc)?;
    let pattern = string_arg("regex.replace_all", &args[1], 2, loc)?;
    let replacement = string_arg("regex.replace_all", &args[2], 3, loc)?;
    let flags = flags_arg("regex.replace_all", args, 4, "g", loc)?;
    let compiled = compile(pattern, flags, loc)?;
    let replacement = translate_replacement(replacement);
    let replaced = if compiled.global {
        compiled.regex.replace_all(text, replacement.as_str())
    } else {
        compiled.regex.replace(text, replacement.as_str())
    };
    Ok(Value::from(replaced.into_owned()))
}

fn extract(_: &mut Interpreter, args: &[Value], loc: &Location) -> Result<Value, MimoError> {
    let pattern = string_arg("regex.extract", &args[0], 1, loc)?;
    let text = string_arg("regex.extract", &args[1], 2, loc)?;
    let flags = flags_arg("regex.extract", args, 3, "", loc)?;
    let compiled = compile(pattern, flags, loc)?;
    Ok(compiled
        .regex
        .captures(text)
        .map_or(Value::Null, |caps| captures_value(&caps)))
}

/// Rewrite `$&`, `$n` and `$<name>` into the braced forms the `regex`
/// crate expects. A `$` that starts no reference stays literal.
fn translate_replacement(replacement: &str) -> String {
    let mut out = String::with_capacity(replacement.len());
    let mut chars = replacement.chars().peekable();
    while let Some(c) = chars.next() {
        if c != '$' {
            out.push(c);
            continue;
        }
        match chars.peek().copied() {
            Some('$') => {
                chars.next();
                out.push_str("$$");
            }
            Some('&') => {
                chars.next();
                out.push_str("${0}");
            }
            Some(d) if d.is_ascii_digit() => {
                let mut digits = String::new();
                while let Some(d) = chars.peek().copied().filter(char::is_ascii_digit) {
                    digits.push(d);
                    chars.next();
                }
                out.push_str(&format!("${{{digits}}}"));
            }
            Some('<') => {
                let rest: String = chars.clone().collect();
                match rest.find('>') {
                    Some(end) => {
                        let name = &rest[1..end];
                        out.push_str(&format!("${{{name}}}"));
                        for _ in rest[..=end].chars() {
                            chars.next();
                        }
                    }
                    None => out.push_str("$$"),
                }
            }
            _ => out.push_str("$$"),
        }
    }
    out
}

#[cfg(test)]
mod tests;
