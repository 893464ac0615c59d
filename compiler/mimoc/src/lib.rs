//! Mimo front door.
//!
//! Programmatic entry points shared by the `mimo` binary and embedders:
//!
//! ```text
//! tokenize(source) ──► Vec<Token>
//!     │
//!     ▼
//! parse(tokens) ──► Program
//!     │
//!     ▼
//! interpret(program) ──► Value
//! ```
//!
//! `run` composes all three. Failures come back as the fully rendered
//! error block, the same text the command line prints.
//!
//! [`NativeHost`] backs the runtime's capabilities with the real
//! filesystem, environment, HTTP and process.

pub mod commands;
mod native_host;
mod tracing_setup;

use std::any::Any;
use std::panic::{self, AssertUnwindSafe};
use std::rc::Rc;

use mimo_diagnostic::MimoError;
use mimo_eval::{Interpreter, InterpreterConfig, Value};
use mimo_ir::{Location, Program, Token};

pub use native_host::NativeHost;
pub use tracing_setup::init_tracing;

/// Lex `source` into tokens, ending with `Eof`.
pub fn tokenize(source: &str, file: &str) -> Result<Vec<Token>, String> {
    mimo_lexer::tokenize(source, file).map_err(|e| with_snippet(e, source).format())
}

/// Parse a token list produced by [`tokenize`].
pub fn parse(tokens: &[Token], file: &str) -> Result<Program, String> {
    mimo_parse::parse(tokens, file).map_err(|e| e.format())
}

/// Run a parsed program with the native host and stdout output.
pub fn interpret(program: &Program, file: &str) -> Result<Value, String> {
    let mut interp = Interpreter::with_config(native_config(Vec::new()));
    execute(&mut interp, program, file).map_err(|e| e.format())
}

/// Tokenize, parse and run `source` as `file`.
pub fn run(source: &str, file: &str) -> Result<Value, String> {
    run_with_config(source, file, native_config(Vec::new())).map_err(|e| e.format())
}

/// [`run`] with an explicit configuration, keeping the structured error.
pub fn run_with_config(
    source: &str,
    file: &str,
    config: InterpreterConfig,
) -> Result<Value, MimoError> {
    let tokens = mimo_lexer::tokenize(source, file).map_err(|e| with_snippet(e, source))?;
    let program = mimo_parse::parse_with_source(&tokens, file, source)?;
    let mut interp = Interpreter::with_config(config);
    interp.add_source(file, source);
    execute(&mut interp, &program, file)
}

/// Default configuration for native runs: stdout output and a
/// [`NativeHost`] that hands `args` to the script.
pub fn native_config(args: Vec<String>) -> InterpreterConfig {
    InterpreterConfig::default().with_host(Rc::new(NativeHost::new(args)))
}

/// Run `program`, turning a panic inside the evaluator into `INT001`.
fn execute(interp: &mut Interpreter, program: &Program, file: &str) -> Result<Value, MimoError> {
    match panic::catch_unwind(AssertUnwindSafe(|| interp.interpret(program, file))) {
        Ok(result) => result,
        Err(payload) => Err(internal_error(payload.as_ref(), file)),
    }
}

#[cold]
fn internal_error(payload: &(dyn Any + Send), file: &str) -> MimoError {
    let detail = payload
        .downcast_ref::<&str>()
        .map(ToString::to_string)
        .or_else(|| payload.downcast_ref::<String>().cloned())
        .unwrap_or_else(|| "unknown panic".to_string());
    tracing::error!(%detail, "evaluator panicked");
    MimoError::runtime(
        "INT001",
        format!("Internal error: {detail}"),
        Location::synthetic(file),
    )
    .with_suggestion("This is a bug in the interpreter, not in your program. Please report it.")
}

fn with_snippet(err: MimoError, source: &str) -> MimoError {
    if err.snippet.is_none() {
        err.with_source(source)
    } else {
        err
    }
}
