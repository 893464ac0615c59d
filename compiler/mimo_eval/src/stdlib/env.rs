//! `env`: read-only access to the host's environment variables.

use mimo_diagnostic::MimoError;
use mimo_ir::Location;

use crate::builtins::args::type_error;
use crate::builtins::{function_table, module_object};
use crate::function::{Arity, BuiltinFunction};
use crate::interpreter::Interpreter;
use crate::value::Value;

const FUNCTIONS: &[BuiltinFunction] = &[
    BuiltinFunction::new("get", Arity::Range(1, 2), get),
    BuiltinFunction::new("has", Arity::Exact(1), has),
    BuiltinFunction::new("all", Arity::Exact(0), all),
];

pub(crate) fn module() -> Value {
    function_table(FUNCTIONS)
}

fn variable_name<'a>(func: &str, value: &'a Value, loc: &Location) -> Result<&'a str, MimoError> {
    match value {
        Value::String(name) => Ok(name),
        other => Err(type_error(
            format!(
                "{func}() expects a string as argument 1. Got '{}'.",
                other.type_name()
            ),
            loc,
        )
        .with_suggestion("Provide an environment variable name as a string.")),
    }
}

/// `env.get(name, fallback?)`: the fallback (default `null`) when unset.
fn get(interp: &mut Interpreter, args: &[Value], loc: &Location) -> Result<Value, MimoError> {
    let name = variable_name("env.get", &args[0], loc)?;
    Ok(match interp.host.env_var(name) {
        Some(value) => Value::from(value),
        None => args.get(1).cloned().unwrap_or(Value::Null),
    })
}

fn has(interp: &mut Interpreter, args: &[Value], loc: &Location) -> Result<Value, MimoError> {
    let name = variable_name("env.has", &args[0], loc)?;
    Ok(Value::Bool(interp.host.env_var(name).is_some()))
}

fn all(interp: &mut Interpreter, _: &[Value], _: &Location) -> Result<Value, MimoError> {
    let vars = interp.host.env_vars();
    Ok(module_object(
        vars.iter().map(|(name, value)| (name.as_str(), Value::from(value.as_str()))),
    ))
}
