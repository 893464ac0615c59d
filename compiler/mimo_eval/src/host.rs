//! Host capabilities consumed by the runtime.
//!
//! The evaluator never touches the operating system directly: file access,
//! HTTP, process arguments, environment variables and exit all go through
//! a [`Host`]. Path manipulation has POSIX default implementations so most
//! hosts only provide the I/O primitives.

use std::io;

/// A failed host operation.
#[derive(Debug, thiserror::Error)]
pub enum HostError {
    #[error("{0}")]
    Io(#[from] io::Error),
    #[error("{0}")]
    Http(String),
    #[error("{0} is not available in this environment")]
    Unsupported(&'static str),
}

/// A synchronous HTTP request.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HttpRequest {
    pub method: String,
    pub url: String,
    /// In insertion order; later entries override earlier ones.
    pub headers: Vec<(String, String)>,
    pub body: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u16,
    pub body: String,
}

/// Everything the runtime may ask of its environment.
///
/// All operations are blocking.
pub trait Host {
    fn read_file(&self, path: &str) -> Result<String, HostError>;
    fn write_file(&self, path: &str, contents: &str) -> Result<(), HostError>;
    fn exists(&self, path: &str) -> bool;
    /// Entry names (not paths) of a directory.
    fn list_dir(&self, path: &str) -> Result<Vec<String>, HostError>;
    fn make_dir(&self, path: &str, recursive: bool) -> Result<(), HostError>;
    fn remove_file(&self, path: &str) -> Result<(), HostError>;
    fn remove_dir(&self, path: &str, recursive: bool) -> Result<(), HostError>;

    fn fetch(&self, request: &HttpRequest) -> Result<HttpResponse, HostError>;

    /// Arguments passed to the script, excluding the interpreter and script path.
    fn arguments(&self) -> Vec<String>;
    fn env_var(&self, name: &str) -> Option<String>;
    fn env_vars(&self) -> Vec<(String, String)>;
    /// Terminate the process. Hosts that cannot exit return an error.
    fn exit(&self, code: i32) -> Result<(), HostError>;
    fn cwd(&self) -> String;

    fn join_path(&self, segments: &[&str]) -> String {
        join(segments)
    }

    fn dirname(&self, path: &str) -> String {
        dirname(path)
    }

    /// Last path component, with `ext` removed when it is a proper suffix.
    fn basename(&self, path: &str, ext: Option<&str>) -> String {
        basename(path, ext)
    }

    fn extname(&self, path: &str) -> String {
        extname(path)
    }

    fn is_absolute(&self, path: &str) -> bool {
        path.starts_with('/')
    }

    /// Resolve `segments` right to left into an absolute, normalized path,
    /// falling back to [`Host::cwd`] when none of them is absolute.
    fn resolve_path(&self, segments: &[&str]) -> String {
        let mut parts: Vec<&str> = Vec::new();
        let mut absolute = false;
        for segment in segments.iter().rev().filter(|s| !s.is_empty()) {
            parts.push(segment);
            if segment.starts_with('/') {
                absolute = true;
                break;
            }
        }
        let cwd = self.cwd();
        if !absolute {
            parts.push(&cwd);
        }
        parts.reverse();
        let normalized = normalize_segments(&parts.join("/"), true);
        match normalized.strip_suffix('/') {
            Some(trimmed) if !trimmed.is_empty() => trimmed.to_string(),
            _ => normalized,
        }
    }
}

/// A host with every capability disabled.
///
/// Used by tests and sandboxed embedding: nothing exists, nothing can be
/// read or written, and the process cannot be exited.
#[derive(Clone, Copy, Debug, Default)]
pub struct NullHost;

impl Host for NullHost {
    fn read_file(&self, _path: &str) -> Result<String, HostError> {
        Err(HostError::Unsupported("filesystem access"))
    }

    fn write_file(&self, _path: &str, _contents: &str) -> Result<(), HostError> {
        Err(HostError::Unsupported("filesystem access"))
    }

    fn exists(&self, _path: &str) -> bool {
        false
    }

    fn list_dir(&self, _path: &str) -> Result<Vec<String>, HostError> {
        Err(HostError::Unsupported("filesystem access"))
    }

    fn make_dir(&self, _path: &str, _recursive: bool) -> Result<(), HostError> {
        Err(HostError::Unsupported("filesystem access"))
    }

    fn remove_file(&self, _path: &str) -> Result<(), HostError> {
        Err(HostError::Unsupported("filesystem access"))
    }

    fn remove_dir(&self, _path: &str, _recursive: bool) -> Result<(), HostError> {
        Err(HostError::Unsupported("filesystem access"))
    }

    fn fetch(&self, _request: &HttpRequest) -> Result<HttpResponse, HostError> {
        Err(HostError::Unsupported("network access"))
    }

    fn arguments(&self) -> Vec<String> {
        Vec::new()
    }

    fn env_var(&self, _name: &str) -> Option<String> {
        None
    }

    fn env_vars(&self) -> Vec<(String, String)> {
        Vec::new()
    }

    fn exit(&self, _code: i32) -> Result<(), HostError> {
        Err(HostError::Unsupported("process exit"))
    }

    fn cwd(&self) -> String {
        "/".to_string()
    }
}

/// Collapse `.`, `..` and repeated separators. Keeps a trailing `/`.
fn normalize_segments(path: &str, keep_trailing: bool) -> String {
    if path.is_empty() {
        return ".".to_string();
    }
    let absolute = path.starts_with('/');
    let trailing = keep_trailing && path.ends_with('/');
    let mut out: Vec<&str> = Vec::new();
    for part in path.split('/') {
        match part {
            "" | "." => {}
            ".." => {
                if out.last().is_some_and(|last| *last != "..") {
                    out.pop();
                } else if !absolute {
                    out.push("..");
                }
            }
            other => out.push(other),
        }
    }
    let mut result = out.join("/");
    if absolute {
        result.insert(0, '/');
    }
    if result.is_empty() {
        return ".".to_string();
    }
    if trailing && !result.ends_with('/') {
        result.push('/');
    }
    result
}

pub(crate) fn join(segments: &[&str]) -> String {
    let joined = segments
        .iter()
        .filter(|s| !s.is_empty())
        .copied()
        .collect::<Vec<_>>()
        .join("/");
    normalize_segments(&joined, true)
}

fn trim_trailing_slashes(path: &str) -> &str {
    let trimmed = path.trim_end_matches('/');
    if trimmed.is_empty() && path.starts_with('/') {
        "/"
    } else {
        trimmed
    }
}

pub(crate) fn dirname(path: &str) -> String {
    if path.is_empty() {
        return ".".to_string();
    }
    let path = trim_trailing_slashes(path);
    if path == "/" {
        return "/".to_string();
    }
    match path.rfind('/') {
        None => ".".to_string(),
        Some(0) => "/".to_string(),
        Some(i) => trim_trailing_slashes(&path[..i]).to_string(),
    }
}

pub(crate) fn basename(path: &str, ext: Option<&str>) -> String {
    let path = trim_trailing_slashes(path);
    if path == "/" {
        return String::new();
    }
    let base = path.rsplit('/').next().unwrap_or(path);
    match ext {
        Some(ext) if !ext.is_empty() && base != ext => {
            base.strip_suffix(ext).unwrap_or(base).to_string()
        }
        _ => base.to_string(),
    }
}

pub(crate) fn extname(path: &str) -> String {
    let base = basename(path, None);
    match base.rfind('.') {
        Some(i) if i > 0 => base[i..].to_string(),
        _ => String::new(),
    }
}
