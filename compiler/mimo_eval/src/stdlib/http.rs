//! `http`: blocking GET/POST through the host. Responses are
//! `{status, body}` objects; non-2xx statuses are not errors.

use mimo_diagnostic::MimoError;
use mimo_ir::Location;

use crate::builtins::args::type_error;
use crate::builtins::{function_table, module_object};
use crate::function::{Arity, BuiltinFunction};
use crate::host::{HttpRequest, HttpResponse};
use crate::interpreter::Interpreter;
use crate::value::Value;

const FUNCTIONS: &[BuiltinFunction] = &[
    BuiltinFunction::new("get", Arity::Exact(1), get),
    BuiltinFunction::new("post", Arity::Range(2, 3), post),
];

pub(crate) fn module() -> Value {
    function_table(FUNCTIONS)
}

fn url_arg<'a>(func: &str, value: &'a Value, loc: &Location) -> Result<&'a str, MimoError> {
    match value {
        Value::String(url) => Ok(url),
        other => Err(type_error(
            format!(
                "{func}() expects a string as argument 1. Got '{}'.",
                other.type_name()
            ),
            loc,
        )
        .with_suggestion("Provide a URL string.")),
    }
}

fn response_value(response: HttpResponse) -> Value {
    module_object([
        ("status", Value::Number(f64::from(response.status))),
        ("body", Value::from(response.body)),
    ])
}

fn get(interp: &mut Interpreter, args: &[Value], loc: &Location) -> Result<Value, MimoError> {
    let url = url_arg("http.get", &args[0], loc)?;
    let request = HttpRequest {
        method: "GET".to_string(),
        url: url.to_string(),
        headers: Vec::new(),
        body: None,
    };
    tracing::debug!(url, "http get");
    interp.host.fetch(&request).map(response_value).map_err(|e| {
        MimoError::runtime("HTTP001", format!("HTTP GET request failed: {e}"), loc.clone())
    })
}

/// `http.post(url, body, headers?)`. The body must already be a string;
/// `Content-Type: application/json` is sent unless overridden.
fn post(interp: &mut Interpreter, args: &[Value], loc: &Location) -> Result<Value, MimoError> {
    let url = url_arg("http.post", &args[0], loc)?;
    let Value::String(body) = &args[1] else {
        return Err(type_error(
            "http.post() body must be a string. Use json.stringify(data) first.",
            loc,
        ));
    };

    let mut headers = vec![("Content-Type".to_string(), "application/json".to_string())];
    if let Some(extra) = args.get(2) {
        let Value::Object(extra) = extra else {
            return Err(type_error("http.post() expects an object as argument 3.", loc));
        };
        for (name, value) in extra.borrow().iter() {
            headers.retain(|(existing, _)| existing != name);
            headers.push((name.to_string(), value.to_string()));
        }
    }

    let request = HttpRequest {
        method: "POST".to_string(),
        url: url.to_string(),
        headers,
        body: Some(body.to_string()),
    };
    tracing::debug!(url, "http post");
    interp.host.fetch(&request).map(response_value).map_err(|e| {
        MimoError::runtime("HTTP002", format!("HTTP POST request failed: {e}"), loc.clone())
    })
}
