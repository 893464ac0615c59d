//! Live call-stack tracking for runtime diagnostics.
//!
//! Each user function call pushes a frame (function name and call site)
//! and pops it on every exit path. When a runtime error escapes a call,
//! the frames are snapshotted onto the error, most recent call first.

use mimo_diagnostic::{CallFrame, MimoError};
use mimo_ir::Location;

use crate::errors;

/// Live call stack for one interpreter.
///
/// ```ignore
/// stack.push(CallFrame { function, location })?;
/// // ... evaluate function body ...
/// stack.pop();
/// ```
#[derive(Clone, Debug, Default)]
pub struct CallStack {
    frames: Vec<CallFrame>,
    max_depth: Option<usize>,
}

impl CallStack {
    /// `max_depth` is `None` for unlimited depth.
    pub fn new(max_depth: Option<usize>) -> Self {
        CallStack {
            frames: Vec::new(),
            max_depth,
        }
    }

    /// Push a call frame, checking the depth limit.
    ///
    /// The frame is not pushed on overflow.
    pub fn push(&mut self, frame: CallFrame) -> Result<(), MimoError> {
        if let Some(max) = self.max_depth {
            if self.frames.len() >= max {
                return Err(errors::call_depth_exceeded(max, frame.location));
            }
        }
        self.frames.push(frame);
        Ok(())
    }

    pub fn pop(&mut self) {
        debug_assert!(!self.frames.is_empty(), "CallStack::pop() on empty stack");
        self.frames.pop();
    }

    #[inline]
    pub fn depth(&self) -> usize {
        self.frames.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    /// Snapshot of the active frames, most recent first.
    pub fn capture(&self) -> Vec<CallFrame> {
        self.frames.iter().rev().cloned().collect()
    }

    /// Attach the current frames to `err` unless it already carries a stack.
    ///
    /// The innermost call that sees an error records it, so the snapshot is
    /// taken at the deepest point.
    pub fn attach(&self, err: MimoError) -> MimoError {
        if err.stack.is_empty() && err.is_runtime() && !self.frames.is_empty() {
            let stack = self.capture();
            err.with_stack(stack)
        } else {
            err
        }
    }
}

/// Frame for a call to `function` made at `location`.
pub fn frame(function: impl Into<String>, location: &Location) -> CallFrame {
    CallFrame {
        function: function.into(),
        location: location.clone(),
    }
}
