//! Standard library modules.
//!
//! Each module is an object of builtin functions (plus constants for
//! `math`), built on first import and then cached by the module loader.
//! Stdlib names take precedence over file paths.

pub(crate) mod array;
mod assert;
mod datetime;
mod env;
mod fs;
mod http;
mod json;
pub(crate) mod math;
mod object;
mod path;
mod regex;
mod string;

use crate::value::Value;

/// Names that `import` resolves without touching the filesystem.
pub const STDLIB_MODULES: &[&str] = &[
    "array", "assert", "datetime", "env", "fs", "http", "json", "math", "object", "path",
    "regex", "string",
];

/// Build the export object of the stdlib module `name`.
pub(crate) fn build(name: &str) -> Option<Value> {
    let module = match name {
        "array" => array::module(),
        "assert" => assert::module(),
        "datetime" => datetime::module(),
        "env" => env::module(),
        "fs" => fs::module(),
        "http" => http::module(),
        "json" => json::module(),
        "math" => math::module(),
        "object" => object::module(),
        "path" => path::module(),
        "regex" => regex::module(),
        "string" => string::module(),
        _ => return None,
    };
    Some(module)
}
