//! Command handlers for the `mimo` binary.
//!
//! Each handler returns the process exit status instead of exiting, so
//! `main` stays the only place that terminates.

use std::io::IsTerminal;
use std::process::ExitCode;

use mimo_diagnostic::emitter::{ColorMode, TerminalEmitter};
use mimo_diagnostic::MimoError;

mod debug;
mod run;

pub use debug::{dump_ast, dump_tokens};
pub use run::{eval_source, run_file};

/// Options shared by every command.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct CliOptions {
    pub color: ColorMode,
}

impl CliOptions {
    /// Colour mode from an explicit `--color=` value, else `NO_COLOR`.
    pub fn from_flag(flag: Option<ColorMode>) -> Self {
        let color = flag.unwrap_or_else(|| {
            if std::env::var_os("NO_COLOR").is_some_and(|v| !v.is_empty()) {
                ColorMode::Never
            } else {
                ColorMode::Auto
            }
        });
        CliOptions { color }
    }
}

/// Render `error` to stderr and return the failure status.
pub(crate) fn report_error(error: &MimoError, options: CliOptions) -> ExitCode {
    let stderr = std::io::stderr();
    let is_tty = stderr.is_terminal();
    let mut emitter = TerminalEmitter::with_color_mode(stderr.lock(), options.color, is_tty);
    if emitter.emit(error).is_err() {
        eprint!("{}", error.format());
    }
    ExitCode::FAILURE
}

/// Read a source file, describing failures the way a user would.
pub(crate) fn read_source(path: &str) -> Result<String, String> {
    std::fs::read_to_string(path).map_err(|e| match e.kind() {
        std::io::ErrorKind::NotFound => format!("cannot find file '{path}'"),
        std::io::ErrorKind::PermissionDenied => format!("permission denied reading '{path}'"),
        std::io::ErrorKind::InvalidData => format!("'{path}' contains invalid UTF-8 data"),
        _ => format!("error reading '{path}': {e}"),
    })
}
