//! Terminal Emitter
//!
//! Writes rendered errors with optional ANSI colour. The layout is the same
//! as [`MimoError::format`]; colour only highlights the header, caret and
//! suggestion.

use std::io::{self, Write};

use crate::MimoError;

/// ANSI color codes for terminal output.
mod colors {
    pub const ERROR: &str = "\x1b[1;31m"; // Bold red
    pub const HELP: &str = "\x1b[1;32m"; // Bold green
    pub const BOLD: &str = "\x1b[1m";
    pub const SECONDARY: &str = "\x1b[1;34m"; // Bold blue
    pub const RESET: &str = "\x1b[0m";
}

/// Color output mode for terminal emitter.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ColorMode {
    /// Colour when writing to a terminal.
    #[default]
    Auto,
    Always,
    Never,
}

impl ColorMode {
    /// Parse the value of a `--color=` flag.
    pub fn parse(value: &str) -> Option<ColorMode> {
        match value {
            "auto" => Some(ColorMode::Auto),
            "always" => Some(ColorMode::Always),
            "never" => Some(ColorMode::Never),
            _ => None,
        }
    }

    /// Resolve to a boolean; `is_tty` only matters for `Auto`.
    pub fn should_use_colors(self, is_tty: bool) -> bool {
        match self {
            ColorMode::Auto => is_tty,
            ColorMode::Always => true,
            ColorMode::Never => false,
        }
    }
}

/// Error writer with optional color support.
pub struct TerminalEmitter<W: Write> {
    writer: W,
    colors: bool,
}

impl<W: Write> TerminalEmitter<W> {
    pub fn with_color_mode(writer: W, mode: ColorMode, is_tty: bool) -> Self {
        TerminalEmitter {
            writer,
            colors: mode.should_use_colors(is_tty),
        }
    }

    fn write_colored(&mut self, color: &str, text: &str) -> io::Result<()> {
        if self.colors {
            write!(self.writer, "{color}{text}{}", colors::RESET)
        } else {
            write!(self.writer, "{text}")
        }
    }

    /// Write one error block.
    pub fn emit(&mut self, error: &MimoError) -> io::Result<()> {
        self.write_colored(colors::ERROR, &error.to_string())?;
        writeln!(self.writer)?;
        write!(self.writer, "    at ")?;
        self.write_colored(colors::SECONDARY, &error.location.to_string())?;
        writeln!(self.writer)?;

        if let Some(line) = error.snippet.as_deref() {
            let trimmed = line.trim();
            writeln!(self.writer, "> {trimmed}")?;
            if !trimmed.is_empty() {
                write!(self.writer, "  {}", " ".repeat(error.caret_offset(line)))?;
                self.write_colored(colors::ERROR, "^")?;
                writeln!(self.writer)?;
            }
        }

        if let Some(suggestion) = &error.suggestion {
            self.write_colored(colors::HELP, "Suggestion:")?;
            writeln!(self.writer, " {suggestion}")?;
        }

        if !error.stack.is_empty() {
            self.write_colored(colors::BOLD, "Mimo Stack:")?;
            writeln!(self.writer)?;
            for frame in &error.stack {
                writeln!(self.writer, "    at {} ({})", frame.function, frame.location)?;
            }
        }
        self.writer.flush()
    }

    /// Consume the emitter and return the writer.
    pub fn into_inner(self) -> W {
        self.writer
    }
}

#[cfg(test)]
mod tests;
