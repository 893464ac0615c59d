//! Mimo Eval - tree-walking evaluator for Mimo programs.
//!
//! This crate turns a parsed [`mimo_ir::Program`] into side effects and a
//! result [`Value`].
//!
//! # Architecture
//!
//! - [`Value`]: dynamically typed runtime values; arrays and objects are
//!   shared, mutable and compared by identity
//! - [`Environment`]: parent-linked scope records with four roles (global,
//!   module root, function, block)
//! - [`Interpreter`]: statement execution and expression evaluation over one
//!   explicit execution context (current environment, file, call stack)
//! - [`FunctionValue`] / [`BuiltinFunction`]: user closures and native,
//!   arity-checked functions
//! - `module_loader`: import resolution, caching and cycle detection
//! - `stdlib`: the name-resolved standard modules (`array`, `math`, `fs`, ...)
//! - [`Host`]: the capability surface (files, paths, HTTP, process) the
//!   runtime consumes; [`NullHost`] disables every capability
//!
//! Return, break and continue travel as an explicit `Flow` value through
//! statement execution. Only language errors travel as `Err`.

mod builtins;
mod diagnostics;
mod environment;
pub mod errors;
mod function;
mod host;
pub mod interpreter;
mod module_loader;
mod print_handler;
mod stdlib;
mod value;

#[cfg(test)]
mod test_support;

pub use diagnostics::CallStack;
pub use environment::{EnvError, Environment, ScopeRole};
pub use function::{Arity, BuiltinFunction, FunctionValue, NativeFn};
pub use host::{Host, HostError, HttpRequest, HttpResponse, NullHost};
pub use interpreter::{Interpreter, InterpreterConfig, DEFAULT_MAX_CALL_DEPTH};
pub use print_handler::{
    buffer_handler, silent_handler, stdout_handler, BufferPrintHandler, PrintHandlerImpl,
    SharedPrintHandler, StdoutPrintHandler,
};
pub use stdlib::STDLIB_MODULES;
pub use value::{format_number, ArrayRef, ObjectMap, ObjectRef, OrderedMap, Value};
