//! `fs`: synchronous file system access through the host.
//!
//! Host failures surface as `FS001`..`FS006`, one code per operation.

use mimo_diagnostic::MimoError;
use mimo_ir::Location;

use crate::builtins::args::type_error;
use crate::builtins::function_table;
use crate::function::{Arity, BuiltinFunction};
use crate::host::HostError;
use crate::interpreter::Interpreter;
use crate::value::Value;

const FUNCTIONS: &[BuiltinFunction] = &[
    BuiltinFunction::new("read_file", Arity::Exact(1), read_file),
    BuiltinFunction::new("write_file", Arity::Exact(2), write_file),
    BuiltinFunction::new("exists", Arity::Exact(1), exists),
    BuiltinFunction::new("list_dir", Arity::Exact(1), list_dir),
    BuiltinFunction::new("make_dir", Arity::Range(1, 2), make_dir),
    BuiltinFunction::new("remove_file", Arity::Exact(1), remove_file),
    BuiltinFunction::new("remove_dir", Arity::Range(1, 2), remove_dir),
];

pub(crate) fn module() -> Value {
    function_table(FUNCTIONS)
}

fn path_arg<'a>(func: &str, value: &'a Value, loc: &Location) -> Result<&'a str, MimoError> {
    match value {
        Value::String(path) => Ok(path),
        other => Err(type_error(
            format!(
                "{func}() expects a string path as argument 1. Got '{}'.",
                other.type_name()
            ),
            loc,
        )
        .with_suggestion("Provide a string path (e.g., \"./my_file.txt\").")),
    }
}

/// Only a literal `true` turns the recursive option on.
fn recursive_flag(args: &[Value]) -> bool {
    matches!(args.get(1), Some(Value::Bool(true)))
}

#[cold]
fn host_failure(
    code: &'static str,
    action: &str,
    path: &str,
    err: &HostError,
    suggestion: &str,
    loc: &Location,
) -> MimoError {
    MimoError::runtime(code, format!("Failed to {action} '{path}': {err}"), loc.clone())
        .with_suggestion(suggestion)
}

fn read_file(interp: &mut Interpreter, args: &[Value], loc: &Location) -> Result<Value, MimoError> {
    let path = path_arg("fs.read_file", &args[0], loc)?;
    interp.host.read_file(path).map(Value::from).map_err(|e| {
        host_failure(
            "FS001",
            "read file",
            path,
            &e,
            "Ensure the file exists and you have read permissions.",
            loc,
        )
    })
}

fn write_file(interp: &mut Interpreter, args: &[Value], loc: &Location) -> Result<Value, MimoError> {
    let path = path_arg("fs.write_file", &args[0], loc)?;
    let Value::String(contents) = &args[1] else {
        return Err(
            type_error("fs.write_file() expects string content as its second argument.", loc)
                .with_suggestion("Provide the string content to write to the file."),
        );
    };
    interp.host.write_file(path, contents).map_err(|e| {
        host_failure(
            "FS002",
            "write to file",
            path,
            &e,
            "Ensure you have write permissions for the directory.",
            loc,
        )
    })?;
    Ok(Value::Null)
}

fn exists(interp: &mut Interpreter, args: &[Value], loc: &Location) -> Result<Value, MimoError> {
    let path = path_arg("fs.exists", &args[0], loc)?;
    Ok(Value::Bool(interp.host.exists(path)))
}

fn list_dir(interp: &mut Interpreter, args: &[Value], loc: &Location) -> Result<Value, MimoError> {
    let path = path_arg("fs.list_dir", &args[0], loc)?;
    let entries = interp.host.list_dir(path).map_err(|e| {
        host_failure(
            "FS003",
            "list directory",
            path,
            &e,
            "Ensure the path is a directory and you have read permissions.",
            loc,
        )
    })?;
    Ok(Value::array(entries.into_iter().map(Value::from).collect()))
}

fn make_dir(interp: &mut Interpreter, args: &[Value], loc: &Location) -> Result<Value, MimoError> {
    let path = path_arg("fs.make_dir", &args[0], loc)?;
    interp
        .host
        .make_dir(path, recursive_flag(args))
        .map_err(|e| {
            host_failure(
                "FS004",
                "create directory",
                path,
                &e,
                "Ensure the parent directory exists and you have write permissions.",
                loc,
            )
        })?;
    Ok(Value::Bool(true))
}

fn remove_file(interp: &mut Interpreter, args: &[Value], loc: &Location) -> Result<Value, MimoError> {
    let path = path_arg("fs.remove_file", &args[0], loc)?;
    interp.host.remove_file(path).map_err(|e| {
        host_failure(
            "FS005",
            "remove file",
            path,
            &e,
            "Ensure the file exists and you have write permissions.",
            loc,
        )
    })?;
    Ok(Value::Bool(true))
}

fn remove_dir(interp: &mut Interpreter, args: &[Value], loc: &Location) -> Result<Value, MimoError> {
    let path = path_arg("fs.remove_dir", &args[0], loc)?;
    interp
        .host
        .remove_dir(path, recursive_flag(args))
        .map_err(|e| {
            host_failure(
                "FS006",
                "remove directory",
                path,
                &e,
                "Ensure the directory exists and you have write permissions. Use the recursive option for non-empty directories.",
                loc,
            )
        })?;
    Ok(Value::Bool(true))
}
