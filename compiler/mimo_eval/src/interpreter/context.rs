//! Guards that swap the interpreter's execution context.
//!
//! Entering a block, function body or module replaces the current
//! environment (and, for modules, the current file). The guard holds
//! `&mut Interpreter` and implements `Deref`/`DerefMut`, so evaluation runs
//! through it; dropping it restores the previous context on every exit path,
//! including `?` returns and unwinding.
//!
//! ```text
//! let flow = self.scoped(block_env).run_statements(body)?;
//! // previous environment restored here
//! ```

use std::ops::{Deref, DerefMut};
use std::sync::Arc;

use super::Interpreter;
use crate::environment::Environment;

/// Restores the saved environment (and file) when dropped.
pub(crate) struct ContextGuard<'a> {
    interpreter: &'a mut Interpreter,
    saved_env: Option<Environment>,
    saved_file: Option<Arc<str>>,
}

impl Drop for ContextGuard<'_> {
    fn drop(&mut self) {
        if let Some(env) = self.saved_env.take() {
            self.interpreter.env = env;
        }
        if let Some(file) = self.saved_file.take() {
            self.interpreter.current_file = file;
        }
    }
}

impl Deref for ContextGuard<'_> {
    type Target = Interpreter;

    fn deref(&self) -> &Self::Target {
        self.interpreter
    }
}

impl DerefMut for ContextGuard<'_> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        self.interpreter
    }
}

impl Interpreter {
    /// Make `env` the current environment until the guard is dropped.
    pub(crate) fn scoped(&mut self, env: Environment) -> ContextGuard<'_> {
        let saved = std::mem::replace(&mut self.env, env);
        ContextGuard {
            interpreter: self,
            saved_env: Some(saved),
            saved_file: None,
        }
    }

    /// Like [`Interpreter::scoped`], also switching the current file.
    pub(crate) fn scoped_file(&mut self, env: Environment, file: Arc<str>) -> ContextGuard<'_> {
        let saved_env = std::mem::replace(&mut self.env, env);
        let saved_file = std::mem::replace(&mut self.current_file, file);
        ContextGuard {
            interpreter: self,
            saved_env: Some(saved_env),
            saved_file: Some(saved_file),
        }
    }
}
