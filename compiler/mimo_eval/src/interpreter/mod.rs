//! Tree-walking interpreter for Mimo.
//!
//! # Architecture
//!
//! Statements and expressions are walked by two cooperating halves that
//! share one execution context (current environment, current file, call
//! stack):
//!
//! - `exec` - statement execution, blocks, loops, `try`, declarations
//! - `eval` - expression evaluation, operators, collections, access
//! - `call` - argument binding and invocation of user and native functions
//! - `patterns` - `match` statements and case patterns
//! - `context` - guard that swaps the environment/file and restores it on
//!   every exit path
//!
//! `return`, `break` and `continue` never travel as errors. Every statement
//! yields a [`Flow`]; block and loop executors inspect it and stop, unwind
//! or resume accordingly. Only [`MimoError`] travels through `Err`.

mod call;
mod context;
pub(crate) mod eval;
mod exec;
mod patterns;

use std::rc::Rc;
use std::sync::Arc;

use mimo_diagnostic::{MimoError, SourceMap};
use mimo_ir::{Location, Program};

use crate::builtins;
use crate::diagnostics::{self, CallStack};
use crate::environment::Environment;
use crate::errors;
use crate::host::{Host, NullHost};
use crate::module_loader::ModuleLoader;
use crate::print_handler::{stdout_handler, SharedPrintHandler};
use crate::stdlib::math;
use crate::value::Value;

/// Outcome of executing a statement.
#[derive(Debug)]
pub(crate) enum Flow {
    /// Completed normally, with the statement's result value.
    Normal(Value),
    Return(Value),
    Break(Jump),
    Continue(Jump),
}

/// Payload of a `break` or `continue`.
#[derive(Clone, Debug)]
pub(crate) struct Jump {
    pub label: Option<String>,
    pub location: Location,
}

impl Jump {
    /// Whether a loop labeled `loop_label` consumes this jump.
    ///
    /// Unlabeled jumps target the innermost loop; labeled ones only the
    /// loop carrying the same label.
    pub fn targets(&self, loop_label: Option<&str>) -> bool {
        match &self.label {
            None => true,
            Some(label) => loop_label == Some(label.as_str()),
        }
    }
}

impl Flow {
    /// Error for a `break`/`continue` that escaped every loop.
    #[cold]
    pub(crate) fn stray(keyword: &str, jump: &Jump) -> MimoError {
        errors::stray_control_flow(keyword, jump.label.as_deref(), jump.location.clone())
    }

    /// Resolve a flow at a function or module boundary: `return` yields its
    /// value, and `break`/`continue` cannot cross the boundary.
    pub(crate) fn into_boundary_value(self, normal_is_null: bool) -> Result<Value, MimoError> {
        match self {
            Flow::Return(value) => Ok(value),
            Flow::Normal(value) => Ok(if normal_is_null { Value::Null } else { value }),
            Flow::Break(jump) => Err(Flow::stray("break", &jump)),
            Flow::Continue(jump) => Err(Flow::stray("continue", &jump)),
        }
    }
}

/// Call depth allowed unless [`InterpreterConfig::with_max_call_depth`]
/// says otherwise.
pub const DEFAULT_MAX_CALL_DEPTH: usize = 10_000;

/// Runtime configuration of an [`Interpreter`].
///
/// ```ignore
/// let config = InterpreterConfig::default()
///     .with_print_handler(buffer_handler())
///     .with_max_call_depth(200);
/// let mut interp = Interpreter::with_config(config);
/// ```
#[derive(Clone)]
pub struct InterpreterConfig {
    print: SharedPrintHandler,
    host: Rc<dyn Host>,
    max_call_depth: Option<usize>,
    random_seed: Option<f64>,
}

impl Default for InterpreterConfig {
    fn default() -> Self {
        InterpreterConfig {
            print: stdout_handler(),
            host: Rc::new(NullHost),
            max_call_depth: Some(DEFAULT_MAX_CALL_DEPTH),
            random_seed: None,
        }
    }
}

impl InterpreterConfig {
    /// Where `show` and diagnostics are written.
    #[must_use]
    pub fn with_print_handler(mut self, print: SharedPrintHandler) -> Self {
        self.print = print;
        self
    }

    /// Capabilities available to the program (files, HTTP, process).
    #[must_use]
    pub fn with_host(mut self, host: Rc<dyn Host>) -> Self {
        self.host = host;
        self
    }

    /// Limit nested user function calls.
    #[must_use]
    pub fn with_max_call_depth(mut self, depth: usize) -> Self {
        self.max_call_depth = Some(depth);
        self
    }

    /// Make `math.random` deterministic from the start.
    #[must_use]
    pub fn with_random_seed(mut self, seed: f64) -> Self {
        self.random_seed = Some(seed);
        self
    }
}

/// Tree-walking interpreter.
///
/// One instance runs one program (and the modules it imports) on one
/// thread. The global scope, module cache and source map persist across
/// [`Interpreter::interpret`] calls.
pub struct Interpreter {
    pub(crate) global: Environment,
    pub(crate) env: Environment,
    pub(crate) current_file: Arc<str>,
    pub(crate) call_stack: CallStack,
    pub(crate) sources: SourceMap,
    pub(crate) modules: ModuleLoader,
    pub(crate) host: Rc<dyn Host>,
    pub(crate) print: SharedPrintHandler,
    /// Park-Miller state for `math.random`; `None` until seeded.
    pub(crate) random_state: Option<i64>,
}

impl Default for Interpreter {
    fn default() -> Self {
        Self::new()
    }
}

impl Interpreter {
    pub fn new() -> Self {
        Self::with_config(InterpreterConfig::default())
    }

    pub fn with_config(config: InterpreterConfig) -> Self {
        let global = Environment::global();
        builtins::install(&global);
        Interpreter {
            env: global.clone(),
            global,
            current_file: Arc::from("<main>"),
            call_stack: CallStack::new(config.max_call_depth),
            sources: SourceMap::new(),
            modules: ModuleLoader::new(),
            host: config.host,
            print: config.print,
            random_state: config.random_seed.map(math::normalize_seed),
        }
    }

    /// Register source text so runtime errors in `file` can quote it.
    pub fn add_source(&mut self, file: &str, source: &str) {
        self.sources.add(Arc::from(file), Arc::from(source));
    }

    pub fn print_handler(&self) -> &SharedPrintHandler {
        &self.print
    }

    pub fn host(&self) -> &Rc<dyn Host> {
        &self.host
    }

    /// The global scope: builtins plus `global` declarations and top-level
    /// bindings of the main program.
    pub fn globals(&self) -> &Environment {
        &self.global
    }

    /// Execute `program` as the main file `file` and return the value of its
    /// last statement (or of a top-level `return`).
    ///
    /// Errors carry the source snippet when the file was registered with
    /// [`Interpreter::add_source`], and the call stack at the failure point.
    #[tracing::instrument(level = "debug", skip_all, fields(file = %file))]
    pub fn interpret(&mut self, program: &Program, file: &str) -> Result<Value, MimoError> {
        let file: Arc<str> = Arc::from(file);
        self.call_stack
            .push(diagnostics::frame("<root>", &program.location))
            .map_err(|e| self.finish_error(e))?;

        let global = self.global.clone();
        let result = self
            .scoped_file(global, file)
            .run_statements(&program.statements)
            .and_then(|flow| flow.into_boundary_value(false));
        let result = result.map_err(|e| self.finish_error(e));

        self.call_stack.pop();
        result
    }

    /// Call a function value with already evaluated arguments.
    ///
    /// Used by embedders; stdlib callbacks go through the same path.
    pub fn call_function(
        &mut self,
        callee: &Value,
        args: Vec<Value>,
        location: &Location,
    ) -> Result<Value, MimoError> {
        self.call_value(callee, args, location, "<expression>")
    }

    /// Attach the call stack and source snippet to an escaping error.
    fn finish_error(&self, err: MimoError) -> MimoError {
        let err = self.call_stack.attach(err);
        if err.snippet.is_some() {
            return err;
        }
        match self.sources.get(&err.location.file) {
            Some(source) => err.with_source(source),
            None => err,
        }
    }
}

#[cfg(test)]
mod tests;
