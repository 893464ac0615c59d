//! Import resolution, execution and caching.
//!
//! An import names either a standard library module (resolved by name,
//! never touching the host) or a file path relative to the importing file.
//! File modules run once, in their own module-root scope under the global
//! scope; later imports of the same resolved path get the cached export
//! object, so every importer shares one instance. A path that is imported
//! again while it is still loading is a circular import.

use std::sync::Arc;

use mimo_diagnostic::MimoError;
use mimo_ir::{BindingTarget, Location, Program, StmtKind};
use rustc_hash::FxHashMap;
use tracing::debug;

use crate::environment::{Environment, ScopeRole};
use crate::errors;
use crate::interpreter::Interpreter;
use crate::stdlib;
use crate::value::{ObjectMap, Value};

/// Per-interpreter module state.
#[derive(Default)]
pub(crate) struct ModuleLoader {
    /// Export objects keyed by stdlib name or resolved path.
    cache: FxHashMap<String, Value>,
    /// Resolved paths currently executing, outermost first.
    loading: Vec<String>,
}

impl ModuleLoader {
    pub(crate) fn new() -> Self {
        Self::default()
    }
}

/// Tokenize and parse `source` as `file`.
///
/// Lexer and syntax errors come back with the offending source line attached.
pub(crate) fn parse_source(source: &str, file: &str) -> Result<Program, MimoError> {
    let tokens = mimo_lexer::tokenize(source, file).map_err(|e| {
        if e.snippet.is_none() {
            e.with_source(source)
        } else {
            e
        }
    })?;
    mimo_parse::parse_with_source(&tokens, file, source)
}

impl Interpreter {
    /// Resolve `path` from the current file and return the module's exports.
    pub(crate) fn load_module(&mut self, path: &str, loc: &Location) -> Result<Value, MimoError> {
        if stdlib::STDLIB_MODULES.contains(&path) {
            if let Some(exports) = self.modules.cache.get(path) {
                return Ok(exports.clone());
            }
            if let Some(exports) = stdlib::build(path) {
                debug!(module = path, "built stdlib module");
                self.modules.cache.insert(path.to_string(), exports.clone());
                return Ok(exports);
            }
        }

        let resolved = self.resolve_module_path(path, loc)?;
        if let Some(exports) = self.modules.cache.get(&resolved) {
            debug!(path = %resolved, "module cache hit");
            return Ok(exports.clone());
        }
        if self.modules.loading.contains(&resolved) {
            debug!(path = %resolved, chain = ?self.modules.loading, "circular import");
            return Err(errors::circular_import(&self.modules.loading, &resolved, loc.clone()));
        }

        self.modules.loading.push(resolved.clone());
        let result = self.execute_module(&resolved, loc);
        self.modules.loading.pop();

        let exports = result?;
        self.modules.cache.insert(resolved, exports.clone());
        Ok(exports)
    }

    /// Try `path` as given, then with the `.mimo` extension, relative to the
    /// directory of the current file.
    fn resolve_module_path(&self, path: &str, loc: &Location) -> Result<String, MimoError> {
        let dir = self.host.dirname(&self.current_file);
        let with_ext = format!("{path}.mimo");
        let mut tried = Vec::with_capacity(2);
        for candidate in [path, with_ext.as_str()] {
            let resolved = self.host.resolve_path(&[&dir, candidate]);
            if self.host.exists(&resolved) {
                return Ok(resolved);
            }
            tried.push(resolved);
        }
        Err(errors::module_not_found(path, &tried, loc.clone()))
    }

    #[tracing::instrument(level = "debug", skip(self, loc))]
    fn execute_module(&mut self, path: &str, loc: &Location) -> Result<Value, MimoError> {
        let source = self
            .host
            .read_file(path)
            .map_err(|e| errors::module_load_failed(path, &e.to_string(), loc.clone()))?;
        self.add_source(path, &source);
        let program = parse_source(&source, path)?;

        let module_env = self.global.child(ScopeRole::ModuleRoot);
        self.scoped_file(module_env.clone(), Arc::from(path))
            .run_statements(&program.statements)?
            .into_boundary_value(false)?;

        Ok(collect_exports(&program, &module_env))
    }
}

/// Build the export object of a finished module.
///
/// With at least one `export`, only exported top-level declarations are
/// visible; otherwise every module-root binding is.
fn collect_exports(program: &Program, module_env: &Environment) -> Value {
    let mut exports = ObjectMap::new();
    if !program.has_exports() {
        for (name, value) in module_env.bindings() {
            exports.insert(name, value);
        }
        return Value::object(exports);
    }

    for stmt in program.statements.iter().filter(|s| s.is_exported()) {
        let names: Vec<&str> = match &stmt.kind {
            StmtKind::FunctionDeclaration { function, .. } => {
                function.name.as_deref().into_iter().collect()
            }
            StmtKind::VariableDeclaration { target, .. } => match target {
                BindingTarget::Name(name) => vec![name.as_str()],
                BindingTarget::Pattern(pattern) => {
                    pattern.names().iter().map(String::as_str).collect()
                }
            },
            _ => Vec::new(),
        };
        for name in names {
            let value = module_env.lookup(name).unwrap_or(Value::Null);
            exports.insert(name, value);
        }
    }
    Value::object(exports)
}

#[cfg(test)]
mod tests;
