//! Diagnostic system for Mimo errors.
//!
//! Every failure the interpreter reports is a [`MimoError`]:
//! - a category (lexer, syntax or runtime) and a stable code for searchability
//! - a message saying what went wrong
//! - the location and the source line it points into
//! - an optional suggestion saying how to fix it
//! - for runtime errors, the call stack at the moment of construction
//!
//! [`MimoError::format`] renders the plain text block surfaced by the
//! programmatic entry points; [`emitter::TerminalEmitter`] renders the same
//! block with optional ANSI colours for the command line.

pub mod emitter;
mod error;
mod source;
mod suggest;

pub use error::{CallFrame, ErrorCategory, MimoError};
pub use source::{line_of, SourceMap};
pub use suggest::{did_you_mean, edit_distance, suggest_nearest, SUGGESTION_THRESHOLD};
