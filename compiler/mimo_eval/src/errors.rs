//! Runtime error constructors for the evaluator.
//!
//! Every runtime failure the interpreter raises is built here so codes,
//! messages and suggestions stay consistent. All constructors are `#[cold]`:
//! errors are the unlikely path.

use mimo_diagnostic::{did_you_mean, MimoError};
use mimo_ir::{BinaryOp, Location};

use crate::environment::EnvError;
use crate::value::MAX_COLLECTION_LEN;

// Operators

#[cold]
pub fn binary_type_mismatch(op: BinaryOp, left: &str, right: &str, loc: Location) -> MimoError {
    let op = op.as_symbol();
    MimoError::runtime(
        "TYPE001",
        format!("Operator '{op}' expects numbers. Got '{left}' and '{right}'."),
        loc,
    )
    .with_suggestion(format!("Ensure both operands for '{op}' are numbers."))
}

#[cold]
pub fn division_by_zero(loc: Location) -> MimoError {
    MimoError::runtime("MATH001", "Division by zero is not allowed.", loc)
        .with_suggestion("Ensure the divisor is not zero.")
}

#[cold]
pub fn modulo_by_zero(loc: Location) -> MimoError {
    MimoError::runtime("MATH001", "Modulo by zero is not allowed.", loc)
        .with_suggestion("Ensure the divisor is not zero.")
}

#[cold]
pub fn unary_minus_type(type_name: &str, loc: Location) -> MimoError {
    MimoError::runtime(
        "TYPE001",
        format!("Unary minus expects a number. Got '{type_name}'."),
        loc,
    )
    .with_suggestion("Provide a number for unary minus operation.")
}

// Collections

#[cold]
pub fn spread_non_array(type_name: &str, loc: Location) -> MimoError {
    MimoError::runtime(
        "TYPE001",
        format!("Cannot spread non-array value of type '{type_name}'."),
        loc,
    )
    .with_suggestion("Spread operator \"...\" can only be used with arrays.")
}

#[cold]
pub fn spread_non_object(type_name: &str, loc: Location) -> MimoError {
    MimoError::runtime(
        "TYPE001",
        format!("Cannot spread non-object value of type '{type_name}'."),
        loc,
    )
    .with_suggestion("Object spread operator \"...\" can only be used with objects.")
}

#[cold]
pub fn spread_argument_non_array(loc: Location) -> MimoError {
    MimoError::runtime("TYPE001", "Cannot spread non-array value in function call.", loc)
        .with_suggestion("Spread operator \"...\" can only be used with arrays.")
}

#[cold]
pub fn array_index_not_integer(type_name: &str, loc: Location) -> MimoError {
    MimoError::runtime(
        "TYPE001",
        format!("Array index must be an integer. Got type '{type_name}'."),
        loc,
    )
    .with_suggestion("Provide an integer for array indexing.")
}

#[cold]
pub fn string_index_not_integer(type_name: &str, loc: Location) -> MimoError {
    MimoError::runtime(
        "TYPE001",
        format!("String index must be an integer. Got type '{type_name}'."),
        loc,
    )
    .with_suggestion("Provide an integer for string character access.")
}

#[cold]
pub fn not_indexable(type_name: &str, loc: Location) -> MimoError {
    MimoError::runtime(
        "TYPE002",
        format!(
            "Cannot access property on value of type '{type_name}'. Only arrays, objects, and strings can be indexed."
        ),
        loc,
    )
    .with_suggestion("Ensure you are using bracket notation on a valid collection type.")
}

#[cold]
pub fn property_of_null(property: &str, loc: Location) -> MimoError {
    MimoError::runtime(
        "REF001",
        format!("Cannot access property '{property}' of 'null'."),
        loc,
    )
    .with_suggestion(
        "Ensure the object is not null or undefined before accessing its properties. Consider using safe navigation (?. ).",
    )
}

#[cold]
pub fn property_of_primitive(property: &str, type_name: &str, loc: Location) -> MimoError {
    MimoError::runtime(
        "TYPE002",
        format!("Cannot access property '{property}' of non-object value of type '{type_name}'."),
        loc,
    )
    .with_suggestion("Properties can only be accessed on objects or strings.")
}

// Assignment

#[cold]
pub fn set_property_on_non_object(property: &str, type_name: &str, loc: Location) -> MimoError {
    MimoError::runtime(
        "TYPE004",
        format!("Cannot set property '{property}' on a non-object value (got {type_name})."),
        loc,
    )
    .with_suggestion("Ensure the target is an object before setting its properties.")
}

#[cold]
pub fn assign_index_not_integer(type_name: &str, loc: Location) -> MimoError {
    MimoError::runtime(
        "TYPE001",
        format!("Array index for assignment must be an integer. Got '{type_name}'."),
        loc,
    )
}

#[cold]
pub fn negative_index(index: i64, loc: Location) -> MimoError {
    MimoError::runtime(
        "INDEX001",
        format!("Array index cannot be negative. Got {index}."),
        loc,
    )
}

#[cold]
pub fn index_too_large(index: usize, loc: Location) -> MimoError {
    MimoError::runtime(
        "INDEX001",
        format!(
            "Array index {index} is too large. Arrays hold at most {MAX_COLLECTION_LEN} elements."
        ),
        loc,
    )
}

#[cold]
pub fn result_too_large(func: &str, len: f64, loc: Location) -> MimoError {
    MimoError::runtime(
        "ARG001",
        format!("{func}() result would have length {len}, over the limit of {MAX_COLLECTION_LEN}."),
        loc,
    )
}

#[cold]
pub fn set_index_on_non_collection(type_name: &str, loc: Location) -> MimoError {
    MimoError::runtime(
        "TYPE002",
        format!("Cannot set property on value of type '{type_name}'."),
        loc,
    )
}

#[cold]
pub fn destructure_non_array(loc: Location) -> MimoError {
    MimoError::runtime(
        "TYPE002",
        "Cannot destructure non-array value into an array pattern.",
        loc,
    )
}

#[cold]
pub fn destructure_non_object(loc: Location) -> MimoError {
    MimoError::runtime(
        "TYPE002",
        "Cannot destructure non-object value into an object pattern.",
        loc,
    )
}

// Variables

#[cold]
pub fn undefined_variable(name: &str, nearest: Option<&str>, loc: Location) -> MimoError {
    let suggestion = match nearest {
        Some(candidate) => did_you_mean(candidate),
        None => format!("Declare '{name}' with set, let or const before using it."),
    };
    MimoError::runtime("REF002", format!("Undefined variable: {name}"), loc)
        .with_suggestion(suggestion)
}

#[cold]
pub fn already_declared(name: &str, loc: Location) -> MimoError {
    MimoError::runtime(
        "DECL001",
        format!("Variable '{name}' is already declared in this scope"),
        loc,
    )
    .with_suggestion("Use 'set' to reassign it, or choose a different name.")
}

#[cold]
pub fn assign_to_const(name: &str, loc: Location) -> MimoError {
    MimoError::runtime(
        "CONST001",
        format!("Cannot assign to const variable '{name}'"),
        loc,
    )
    .with_suggestion("Declare it with 'let' or 'set' if it needs to change.")
}

/// Map a scope failure to the matching runtime error.
#[cold]
pub fn from_env(err: EnvError, name: &str, loc: Location) -> MimoError {
    match err {
        EnvError::AlreadyDeclared => already_declared(name, loc),
        EnvError::Const => assign_to_const(name, loc),
        EnvError::Undefined => undefined_variable(name, None, loc),
    }
}

// Calls

#[cold]
pub fn not_callable(name: &str, loc: Location) -> MimoError {
    MimoError::runtime("TYPE002", format!("'{name}' is not a callable function."), loc)
        .with_suggestion("Ensure you are calling a function or method.")
}

#[cold]
pub fn too_few_arguments(name: &str, required: usize, got: usize, loc: Location) -> MimoError {
    MimoError::runtime(
        "FUNC001",
        format!("Function '{name}' expects at least {required} arguments but received {got}."),
        loc,
    )
}

#[cold]
pub fn too_many_arguments(name: &str, max: usize, got: usize, loc: Location) -> MimoError {
    MimoError::runtime(
        "FUNC002",
        format!("Function '{name}' expects at most {max} arguments but received {got}."),
        loc,
    )
}

#[cold]
pub fn builtin_arity(name: &str, expected: &str, got: usize, loc: Location) -> MimoError {
    MimoError::runtime(
        "BUILTIN001",
        format!("Built-in function '{name}' expects {expected} arguments but received {got}."),
        loc,
    )
    .with_suggestion(format!(
        "Check the arguments provided to built-in function '{name}'."
    ))
}

#[cold]
pub fn call_depth_exceeded(max: usize, loc: Location) -> MimoError {
    MimoError::runtime(
        "STACK001",
        format!("Maximum call depth of {max} exceeded."),
        loc,
    )
    .with_suggestion("Check for unbounded recursion.")
}

/// Generic bad-argument error raised by builtins.
#[cold]
pub fn invalid_argument(message: impl Into<String>, loc: Location) -> MimoError {
    MimoError::runtime("ARG001", message, loc)
}

// Control flow

#[cold]
pub fn for_requires_array(type_name: &str, loc: Location) -> MimoError {
    MimoError::runtime(
        "TYPE001",
        format!("For loop requires an iterable (array). Got '{type_name}'."),
        loc,
    )
    .with_suggestion("Ensure the expression after \"in\" is an array.")
}

#[cold]
pub fn guard_must_exit(loc: Location) -> MimoError {
    MimoError::runtime(
        "CTRL001",
        "A guard statement's 'else' block must terminate execution (e.g., via return, throw, break, or continue).",
        loc,
    )
    .with_suggestion(
        "Add a return, throw, break, or continue statement to the end of the guard's else block.",
    )
}

#[cold]
pub fn stray_control_flow(keyword: &str, label: Option<&str>, loc: Location) -> MimoError {
    let message = match label {
        Some(label) => format!("'{keyword} {label}' does not refer to an enclosing loop."),
        None => format!("'{keyword}' can only be used inside a loop."),
    };
    MimoError::runtime("CTRL002", message, loc)
        .with_suggestion("Move the statement into a while, for or loop body, or check the label.")
}

#[cold]
pub fn no_match(value: &str, loc: Location) -> MimoError {
    MimoError::runtime(
        "MATCH001",
        format!("No matching pattern found for value: {value}"),
        loc,
    )
    .with_suggestion(
        "Add an 'default:' clause or ensure all possible values are covered by 'case' clauses.",
    )
}

#[cold]
pub fn user_throw(message: String, loc: Location) -> MimoError {
    MimoError::runtime("USER001", message, loc)
        .with_suggestion("This error was thrown by the \"throw\" statement.")
}

// Modules

#[cold]
pub fn module_access_non_object(module: &str, loc: Location) -> MimoError {
    MimoError::runtime(
        "TYPE002",
        format!("Cannot access property on non-module/non-object '{module}'."),
        loc,
    )
}

#[cold]
pub fn module_property_missing(
    property: &str,
    module: &str,
    available: &[String],
    nearest: Option<&str>,
    loc: Location,
) -> MimoError {
    let mut suggestion = format!("Available properties in '{module}': {}", available.join(", "));
    if let Some(candidate) = nearest {
        suggestion.push(' ');
        suggestion.push_str(&did_you_mean(candidate));
    }
    MimoError::runtime(
        "MOD002",
        format!("Property '{property}' not found in module '{module}'."),
        loc,
    )
    .with_suggestion(suggestion)
}

#[cold]
pub fn module_not_found(path: &str, tried: &[String], loc: Location) -> MimoError {
    let mut message = format!("Module '{path}' not found. Tried paths:");
    for candidate in tried {
        message.push_str("\n  - ");
        message.push_str(candidate);
    }
    MimoError::runtime("MOD001", message, loc)
        .with_suggestion("Check the module path and ensure the file exists.")
}

#[cold]
pub fn import_bind_failed(alias: &str, loc: Location) -> MimoError {
    MimoError::runtime(
        "MOD001",
        format!("Cannot bind module alias '{alias}': the name is already declared in this scope."),
        loc,
    )
    .with_suggestion("Check if the module path is correct and the module exists.")
}

#[cold]
pub fn circular_import(chain: &[String], path: &str, loc: Location) -> MimoError {
    let mut cycle: Vec<&str> = chain.iter().map(String::as_str).collect();
    cycle.push(path);
    MimoError::runtime(
        "MOD003",
        format!("Circular module dependency detected: {}.", cycle.join(" -> ")),
        loc,
    )
    .with_suggestion("Break the circular dependency by redesigning your module imports.")
}

#[cold]
pub fn module_load_failed(path: &str, cause: &str, loc: Location) -> MimoError {
    MimoError::runtime(
        "MOD004",
        format!("Error loading module '{path}': {cause}"),
        loc,
    )
    .with_suggestion(
        "An unexpected error occurred while loading this module. Check its syntax or dependencies.",
    )
}
