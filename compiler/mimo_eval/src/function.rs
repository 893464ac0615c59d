//! Callable values: user closures and native builtins.

use std::fmt;
use std::rc::Rc;

use mimo_diagnostic::MimoError;
use mimo_ir::{FunctionDef, Location};

use crate::environment::Environment;
use crate::errors;
use crate::interpreter::Interpreter;
use crate::value::Value;

/// A user-defined function: its declaration plus the scope it was created in.
///
/// The closure scope stays alive for as long as the function value does.
pub struct FunctionValue {
    pub def: Rc<FunctionDef>,
    pub closure: Environment,
}

impl FunctionValue {
    pub fn new(def: Rc<FunctionDef>, closure: Environment) -> Self {
        FunctionValue { def, closure }
    }

    pub fn name(&self) -> &str {
        self.def.display_name()
    }

    /// Number of declared (non-rest) parameters.
    pub fn param_count(&self) -> usize {
        self.def.params.len()
    }

    pub fn has_rest(&self) -> bool {
        self.def.rest.is_some()
    }
}

impl fmt::Debug for FunctionValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FunctionValue")
            .field("name", &self.name())
            .field("params", &self.def.params.len())
            .finish_non_exhaustive()
    }
}

/// Native implementation of a builtin.
///
/// Receives the interpreter (for callbacks, output and host access), the
/// already arity-checked arguments and the call-site location.
pub type NativeFn = fn(&mut Interpreter, &[Value], &Location) -> Result<Value, MimoError>;

/// Accepted argument counts of a builtin.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Arity {
    Exact(usize),
    /// Inclusive range.
    Range(usize, usize),
    AtLeast(usize),
}

impl Arity {
    pub fn accepts(self, n: usize) -> bool {
        match self {
            Arity::Exact(k) => n == k,
            Arity::Range(min, max) => (min..=max).contains(&n),
            Arity::AtLeast(min) => n >= min,
        }
    }

    fn describe(self) -> String {
        match self {
            Arity::Exact(k) => k.to_string(),
            Arity::Range(min, max) => format!("{min}-{max}"),
            Arity::AtLeast(min) => format!("at least {min}"),
        }
    }
}

/// A native function exposed to Mimo programs.
#[derive(Clone)]
pub struct BuiltinFunction {
    pub name: &'static str,
    pub arity: Arity,
    pub func: NativeFn,
}

impl BuiltinFunction {
    pub const fn new(name: &'static str, arity: Arity, func: NativeFn) -> Self {
        BuiltinFunction { name, arity, func }
    }

    /// Check the argument count, then run the native implementation.
    pub fn call(
        &self,
        interp: &mut Interpreter,
        args: &[Value],
        location: &Location,
    ) -> Result<Value, MimoError> {
        if !self.arity.accepts(args.len()) {
            return Err(errors::builtin_arity(
                self.name,
                &self.arity.describe(),
                args.len(),
                location.clone(),
            ));
        }
        (self.func)(interp, args, location)
    }
}

impl fmt::Debug for BuiltinFunction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BuiltinFunction")
            .field("name", &self.name)
            .field("arity", &self.arity)
            .finish_non_exhaustive()
    }
}
