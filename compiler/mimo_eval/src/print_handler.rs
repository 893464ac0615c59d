//! Output channels for `show` and uncaught diagnostics.
//!
//! Programs write to two channels, normal and error:
//! - Native: stdout / stderr (default)
//! - Embedding and tests: in-memory buffers
//! - Silent: output discarded
//!
//! Uses enum dispatch instead of trait objects; `show` is on the hot path.

use std::sync::Arc;

use parking_lot::Mutex;

/// Writes the normal channel to stdout and the error channel to stderr.
#[derive(Default)]
pub struct StdoutPrintHandler;

impl StdoutPrintHandler {
    pub fn println(&self, msg: &str) {
        println!("{msg}");
    }

    pub fn print(&self, msg: &str) {
        print!("{msg}");
    }

    pub fn eprintln(&self, msg: &str) {
        eprintln!("{msg}");
    }
}

/// Captures both channels in memory.
#[derive(Default)]
pub struct BufferPrintHandler {
    output: Mutex<String>,
    errors: Mutex<String>,
}

impl BufferPrintHandler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn println(&self, msg: &str) {
        let mut buf = self.output.lock();
        buf.push_str(msg);
        buf.push('\n');
    }

    pub fn print(&self, msg: &str) {
        self.output.lock().push_str(msg);
    }

    pub fn eprintln(&self, msg: &str) {
        let mut buf = self.errors.lock();
        buf.push_str(msg);
        buf.push('\n');
    }

    /// Everything written to the normal channel so far.
    pub fn get_output(&self) -> String {
        self.output.lock().clone()
    }

    /// Everything written to the error channel so far.
    pub fn get_errors(&self) -> String {
        self.errors.lock().clone()
    }

    pub fn clear(&self) {
        self.output.lock().clear();
        self.errors.lock().clear();
    }
}

/// Print handler implementation using enum dispatch.
pub enum PrintHandlerImpl {
    /// stdout / stderr (default).
    Stdout(StdoutPrintHandler),
    /// In-memory capture.
    Buffer(BufferPrintHandler),
    /// Discards all output.
    Silent,
}

impl PrintHandlerImpl {
    /// Write a line to the normal channel.
    pub fn println(&self, msg: &str) {
        match self {
            Self::Stdout(h) => h.println(msg),
            Self::Buffer(h) => h.println(msg),
            Self::Silent => {}
        }
    }

    /// Write to the normal channel without a newline.
    pub fn print(&self, msg: &str) {
        match self {
            Self::Stdout(h) => h.print(msg),
            Self::Buffer(h) => h.print(msg),
            Self::Silent => {}
        }
    }

    /// Write a line to the error channel.
    pub fn eprintln(&self, msg: &str) {
        match self {
            Self::Stdout(h) => h.eprintln(msg),
            Self::Buffer(h) => h.eprintln(msg),
            Self::Silent => {}
        }
    }

    /// Captured normal output. Empty for handlers that don't capture.
    pub fn get_output(&self) -> String {
        match self {
            Self::Buffer(h) => h.get_output(),
            Self::Stdout(_) | Self::Silent => String::new(),
        }
    }

    /// Captured error output. Empty for handlers that don't capture.
    pub fn get_errors(&self) -> String {
        match self {
            Self::Buffer(h) => h.get_errors(),
            Self::Stdout(_) | Self::Silent => String::new(),
        }
    }

    pub fn clear(&self) {
        if let Self::Buffer(h) = self {
            h.clear();
        }
    }
}

/// Shared print handler that can be passed around.
pub type SharedPrintHandler = Arc<PrintHandlerImpl>;

/// Create a default stdout print handler.
pub fn stdout_handler() -> SharedPrintHandler {
    Arc::new(PrintHandlerImpl::Stdout(StdoutPrintHandler))
}

/// Create a buffer print handler for capturing output.
pub fn buffer_handler() -> SharedPrintHandler {
    Arc::new(PrintHandlerImpl::Buffer(BufferPrintHandler::new()))
}

/// Create a silent print handler that discards all output.
pub fn silent_handler() -> SharedPrintHandler {
    Arc::new(PrintHandlerImpl::Silent)
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn buffer_handler_println_captures_with_newline() {
        let handler = BufferPrintHandler::new();
        handler.println("hello");
        assert_eq!(handler.get_output(), "hello\n");
    }

    #[test]
    fn buffer_handler_mixes_print_and_println() {
        let handler = BufferPrintHandler::new();
        handler.print("hello");
        handler.print(" ");
        handler.println("world");
        assert_eq!(handler.get_output(), "hello world\n");
    }

    #[test]
    fn error_channel_is_separate() {
        let handler = buffer_handler();
        handler.println("out");
        handler.eprintln("err");
        assert_eq!(handler.get_output(), "out\n");
        assert_eq!(handler.get_errors(), "err\n");
    }

    #[test]
    fn clear_empties_both_channels() {
        let handler = buffer_handler();
        handler.println("a");
        handler.eprintln("b");
        handler.clear();
        assert_eq!(handler.get_output(), "");
        assert_eq!(handler.get_errors(), "");
    }

    #[test]
    fn stdout_handler_captures_nothing() {
        let handler = stdout_handler();
        assert_eq!(handler.get_output(), "");
        handler.clear();
    }

    #[test]
    fn silent_handler_discards_output() {
        let handler = silent_handler();
        handler.println("hello");
        handler.print("world");
        handler.eprintln("oops");
        assert_eq!(handler.get_output(), "");
        assert_eq!(handler.get_errors(), "");
    }
}
