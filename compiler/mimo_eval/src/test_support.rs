//! Shared helpers for running Mimo source in unit tests.

#![expect(clippy::unwrap_used, reason = "test helpers unwrap expected outcomes")]

use std::cell::RefCell;
use std::collections::{BTreeMap, BTreeSet};
use std::io;
use std::rc::Rc;

use mimo_diagnostic::MimoError;

use crate::host::{Host, HostError, HttpRequest, HttpResponse};
use crate::interpreter::{Interpreter, InterpreterConfig};
use crate::module_loader::parse_source;
use crate::print_handler::buffer_handler;
use crate::value::Value;

/// Path the main program runs as. Imports resolve against `/work`.
pub(crate) const MAIN_FILE: &str = "/work/main.mimo";

/// In-memory host: a flat file table, a directory set, fixed arguments and
/// environment. HTTP requests are recorded and echoed back.
#[derive(Default)]
pub(crate) struct MemoryHost {
    files: RefCell<BTreeMap<String, String>>,
    dirs: RefCell<BTreeSet<String>>,
    args: Vec<String>,
    env: Vec<(String, String)>,
    pub requests: RefCell<Vec<HttpRequest>>,
    pub exit_code: RefCell<Option<i32>>,
}

fn not_found(path: &str) -> HostError {
    HostError::Io(io::Error::new(
        io::ErrorKind::NotFound,
        format!("no such file or directory: {path}"),
    ))
}

impl MemoryHost {
    pub fn new() -> Self {
        let host = Self::default();
        host.dirs.borrow_mut().insert("/".to_string());
        host.dirs.borrow_mut().insert("/work".to_string());
        host
    }

    #[must_use]
    pub fn with_file(self, path: &str, contents: &str) -> Self {
        self.files
            .borrow_mut()
            .insert(path.to_string(), contents.to_string());
        self
    }

    #[must_use]
    pub fn with_args(mut self, args: &[&str]) -> Self {
        self.args = args.iter().map(ToString::to_string).collect();
        self
    }

    #[must_use]
    pub fn with_env(mut self, name: &str, value: &str) -> Self {
        self.env.push((name.to_string(), value.to_string()));
        self
    }

    pub fn file(&self, path: &str) -> Option<String> {
        self.files.borrow().get(path).cloned()
    }

    fn children(&self, dir: &str) -> Vec<String> {
        let prefix = if dir.ends_with('/') {
            dir.to_string()
        } else {
            format!("{dir}/")
        };
        let files = self.files.borrow();
        let dirs = self.dirs.borrow();
        let mut names: BTreeSet<String> = BTreeSet::new();
        for path in files.keys().chain(dirs.iter()) {
            if let Some(rest) = path.strip_prefix(&prefix) {
                if let Some(name) = rest.split('/').next().filter(|n| !n.is_empty()) {
                    names.insert(name.to_string());
                }
            }
        }
        names.into_iter().collect()
    }
}

impl Host for MemoryHost {
    fn read_file(&self, path: &str) -> Result<String, HostError> {
        self.file(path).ok_or_else(|| not_found(path))
    }

    fn write_file(&self, path: &str, contents: &str) -> Result<(), HostError> {
        self.files
            .borrow_mut()
            .insert(path.to_string(), contents.to_string());
        Ok(())
    }

    fn exists(&self, path: &str) -> bool {
        self.files.borrow().contains_key(path) || self.dirs.borrow().contains(path)
    }

    fn list_dir(&self, path: &str) -> Result<Vec<String>, HostError> {
        if !self.dirs.borrow().contains(path) {
            return Err(not_found(path));
        }
        Ok(self.children(path))
    }

    fn make_dir(&self, path: &str, recursive: bool) -> Result<(), HostError> {
        let parent = self.dirname(path);
        if !recursive && !self.dirs.borrow().contains(&parent) {
            return Err(not_found(&parent));
        }
        let mut dirs = self.dirs.borrow_mut();
        let mut current = String::new();
        for part in path.split('/').filter(|p| !p.is_empty()) {
            current.push('/');
            current.push_str(part);
            dirs.insert(current.clone());
        }
        Ok(())
    }

    fn remove_file(&self, path: &str) -> Result<(), HostError> {
        self.files
            .borrow_mut()
            .remove(path)
            .map(|_| ())
            .ok_or_else(|| not_found(path))
    }

    fn remove_dir(&self, path: &str, recursive: bool) -> Result<(), HostError> {
        if !self.dirs.borrow().contains(path) {
            return Err(not_found(path));
        }
        if !recursive && !self.children(path).is_empty() {
            return Err(HostError::Io(io::Error::other(format!(
                "directory not empty: {path}"
            ))));
        }
        let prefix = format!("{path}/");
        self.dirs
            .borrow_mut()
            .retain(|d| d != path && !d.starts_with(&prefix));
        self.files.borrow_mut().retain(|f, _| !f.starts_with(&prefix));
        Ok(())
    }

    fn fetch(&self, request: &HttpRequest) -> Result<HttpResponse, HostError> {
        self.requests.borrow_mut().push(request.clone());
        if request.url.contains("unreachable") {
            return Err(HostError::Http("connection refused".to_string()));
        }
        Ok(HttpResponse {
            status: 200,
            body: request.body.clone().unwrap_or_else(|| request.url.clone()),
        })
    }

    fn arguments(&self) -> Vec<String> {
        self.args.clone()
    }

    fn env_var(&self, name: &str) -> Option<String> {
        self.env
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.clone())
    }

    fn env_vars(&self) -> Vec<(String, String)> {
        self.env.clone()
    }

    fn exit(&self, code: i32) -> Result<(), HostError> {
        *self.exit_code.borrow_mut() = Some(code);
        Ok(())
    }

    fn cwd(&self) -> String {
        "/work".to_string()
    }
}

/// Outcome of one program run: its result and everything `show` printed.
pub(crate) struct Run {
    pub result: Result<Value, MimoError>,
    pub output: String,
}

pub(crate) fn run_with_host(source: &str, host: Rc<dyn Host>) -> Run {
    let print = buffer_handler();
    let config = InterpreterConfig::default()
        .with_print_handler(print.clone())
        .with_host(host);
    let mut interp = Interpreter::with_config(config);
    interp.add_source(MAIN_FILE, source);
    let result = parse_source(source, MAIN_FILE).and_then(|program| interp.interpret(&program, MAIN_FILE));
    Run {
        result,
        output: print.get_output(),
    }
}

pub(crate) fn run(source: &str) -> Run {
    run_with_host(source, Rc::new(MemoryHost::new()))
}

/// Printed output of a program that must succeed.
pub(crate) fn output(source: &str) -> String {
    let run = run(source);
    if let Err(e) = &run.result {
        panic!("program failed: {}", e.format());
    }
    run.output
}

/// Value of the last statement of a program that must succeed.
pub(crate) fn eval(source: &str) -> Value {
    run(source).result.unwrap()
}

/// Error of a program that must fail.
pub(crate) fn error(source: &str) -> MimoError {
    match run(source).result {
        Ok(value) => panic!("expected an error, got {value}"),
        Err(e) => e,
    }
}
