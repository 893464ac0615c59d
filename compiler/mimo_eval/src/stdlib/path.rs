//! `path`: POSIX path manipulation delegated to the host.

use mimo_diagnostic::MimoError;
use mimo_ir::Location;

use crate::builtins::args::type_error;
use crate::builtins::function_table;
use crate::function::{Arity, BuiltinFunction};
use crate::interpreter::Interpreter;
use crate::value::Value;

const FUNCTIONS: &[BuiltinFunction] = &[
    BuiltinFunction::new("join", Arity::AtLeast(1), join),
    BuiltinFunction::new("dirname", Arity::Exact(1), dirname),
    BuiltinFunction::new("basename", Arity::Range(1, 2), basename),
    BuiltinFunction::new("extname", Arity::Exact(1), extname),
    BuiltinFunction::new("resolve", Arity::AtLeast(1), resolve),
    BuiltinFunction::new("is_absolute", Arity::Exact(1), is_absolute),
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
        )
        .with_suggestion("Provide a string path value.")),
    }
}

fn segments<'a>(func: &str, args: &'a [Value], loc: &Location) -> Result<Vec<&'a str>, MimoError> {
    args.iter()
        .enumerate()
        .map(|(i, value)| string_arg(func, value, i + 1, loc))
        .collect()
}

fn join(interp: &mut Interpreter, args: &[Value], loc: &Location) -> Result<Value, MimoError> {
    let parts = segments("path.join", args, loc)?;
    Ok(Value::from(interp.host.join_path(&parts)))
}

fn dirname(interp: &mut Interpreter, args: &[Value], loc: &Location) -> Result<Value, MimoError> {
    let path = string_arg("path.dirname", &args[0], 1, loc)?;
    Ok(Value::from(interp.host.dirname(path)))
}

fn basename(interp: &mut Interpreter, args: &[Value], loc: &Location) -> Result<Value, MimoError> {
    let path = string_arg("path.basename", &args[0], 1, loc)?;
    let ext = match args.get(1) {
        Some(ext) => Some(string_arg("path.basename", ext, 2, loc)?),
        None => None,
    };
    Ok(Value::from(interp.host.basename(path, ext)))
}

fn extname(interp: &mut Interpreter, args: &[Value], loc: &Location) -> Result<Value, MimoError> {
    let path = string_arg("path.extname", &args[0], 1, loc)?;
    Ok(Value::from(interp.host.extname(path)))
}

/// Absolute path resolved right to left, against the host's working
/// directory when no segment is absolute.
fn resolve(interp: &mut Interpreter, args: &[Value], loc: &Location) -> Result<Value, MimoError> {
    let parts = segments("path.resolve", args, loc)?;
    Ok(Value::from(interp.host.resolve_path(&parts)))
}

fn is_absolute(interp: &mut Interpreter, args: &[Value], loc: &Location) -> Result<Value, MimoError> {
    let path = string_arg("path.is_absolute", &args[0], 1, loc)?;
    Ok(Value::Bool(interp.host.is_absolute(path)))
}
