//! The structured error type shared by every phase.

use std::fmt::Write as _;

use mimo_ir::{Location, Token};

use crate::source::line_of;

/// Which phase produced an error.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum ErrorCategory {
    Lexer,
    Syntax,
    Runtime,
}

impl ErrorCategory {
    /// Name shown in the rendered header, e.g. `[SyntaxError SYN010]`.
    pub const fn type_name(self) -> &'static str {
        match self {
            ErrorCategory::Lexer => "LexerError",
            ErrorCategory::Syntax => "SyntaxError",
            ErrorCategory::Runtime => "RuntimeError",
        }
    }
}

/// One active invocation at the time a runtime error was raised.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CallFrame {
    pub function: String,
    /// Call site, not the definition.
    pub location: Location,
}

/// A located, coded error with an optional fix-it suggestion.
///
/// Built once through the constructors and `with_*` builders, then treated
/// as immutable.
#[derive(Clone, Debug, PartialEq, thiserror::Error)]
#[error("[{} {}]: {}", .category.type_name(), .code, .message)]
pub struct MimoError {
    pub category: ErrorCategory,
    pub code: &'static str,
    pub message: String,
    pub suggestion: Option<String>,
    pub location: Location,
    /// The full source line the location points into.
    pub snippet: Option<String>,
    /// Active call frames, most recent first. Empty for lexer and syntax errors.
    pub stack: Vec<CallFrame>,
}

impl MimoError {
    pub fn new(
        category: ErrorCategory,
        code: &'static str,
        message: impl Into<String>,
        location: Location,
    ) -> Self {
        MimoError {
            category,
            code,
            message: message.into(),
            suggestion: None,
            location,
            snippet: None,
            stack: Vec::new(),
        }
    }

    #[cold]
    pub fn lexer(code: &'static str, message: impl Into<String>, location: Location) -> Self {
        Self::new(ErrorCategory::Lexer, code, message, location)
    }

    #[cold]
    pub fn syntax(code: &'static str, message: impl Into<String>, location: Location) -> Self {
        Self::new(ErrorCategory::Syntax, code, message, location)
    }

    /// Syntax error positioned at `token`.
    #[cold]
    pub fn syntax_at(code: &'static str, message: impl Into<String>, token: &Token) -> Self {
        Self::syntax(code, message, token.location())
    }

    #[cold]
    pub fn runtime(code: &'static str, message: impl Into<String>, location: Location) -> Self {
        Self::new(ErrorCategory::Runtime, code, message, location)
    }

    #[must_use]
    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        let suggestion = suggestion.into();
        self.suggestion = if suggestion.is_empty() {
            None
        } else {
            Some(suggestion)
        };
        self
    }

    /// Capture the source line at this error's location from `source`.
    #[must_use]
    pub fn with_source(mut self, source: &str) -> Self {
        self.snippet = line_of(source, self.location.line).map(str::to_string);
        self
    }

    /// Attach call frames, ordered most recent first.
    #[must_use]
    pub fn with_stack(mut self, stack: Vec<CallFrame>) -> Self {
        self.stack = stack;
        self
    }

    pub fn is_runtime(&self) -> bool {
        self.category == ErrorCategory::Runtime
    }

    /// Render the human-readable block:
    ///
    /// ```text
    /// [RuntimeError MATH001]: Division by zero is not allowed.
    ///     at main.mimo:3:6
    /// > show / x 0
    ///        ^
    /// Suggestion: Ensure the divisor is not zero.
    /// Mimo Stack:
    ///     at divide (main.mimo:7:1)
    /// ```
    pub fn format(&self) -> String {
        let mut out = String::new();
        let _ = writeln!(out, "{self}");
        let _ = writeln!(out, "    at {}", self.location);

        if let Some(line) = self.snippet.as_deref() {
            let trimmed = line.trim();
            let _ = writeln!(out, "> {trimmed}");
            if !trimmed.is_empty() {
                let _ = writeln!(out, "  {}^", " ".repeat(self.caret_offset(line)));
            }
        }

        if let Some(suggestion) = &self.suggestion {
            let _ = writeln!(out, "Suggestion: {suggestion}");
        }

        if !self.stack.is_empty() {
            out.push_str("Mimo Stack:\n");
            for frame in &self.stack {
                let _ = writeln!(out, "    at {} ({})", frame.function, frame.location);
            }
        }
        out
    }

    /// Caret column inside the trimmed snippet line.
    pub(crate) fn caret_offset(&self, line: &str) -> usize {
        let leading = line.chars().count() - line.trim_start().chars().count();
        (self.location.column as usize)
            .saturating_sub(1)
            .saturating_sub(leading)
    }
}
