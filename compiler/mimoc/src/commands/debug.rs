//! Debug commands: `tokens` and `ast` for inspecting the front end.

use std::io::Write;
use std::process::ExitCode;

use super::{read_source, report_error, CliOptions};

/// Print one JSON object per token.
pub fn dump_tokens(path: &str, options: CliOptions) -> ExitCode {
    let source = match read_source(path) {
        Ok(source) => source,
        Err(message) => {
            eprintln!("error: {message}");
            return ExitCode::FAILURE;
        }
    };
    let tokens = match mimo_lexer::tokenize(&source, path) {
        Ok(tokens) => tokens,
        Err(error) => return report_error(&error.with_source(&source), options),
    };

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    for token in &tokens {
        let line = match serde_json::to_string(token) {
            Ok(line) => line,
            Err(e) => {
                eprintln!("error: cannot serialize token {token:?}: {e}");
                return ExitCode::FAILURE;
            }
        };
        if writeln!(out, "{line}").is_err() {
            return ExitCode::FAILURE;
        }
    }
    ExitCode::SUCCESS
}

/// Print the parsed program in debug form.
pub fn dump_ast(path: &str, options: CliOptions) -> ExitCode {
    let source = match read_source(path) {
        Ok(source) => source,
        Err(message) => {
            eprintln!("error: {message}");
            return ExitCode::FAILURE;
        }
    };
    let program = mimo_lexer::tokenize(&source, path)
        .map_err(|e| e.with_source(&source))
        .and_then(|tokens| mimo_parse::parse_with_source(&tokens, path, &source));
    match program {
        Ok(program) => {
            println!("{program:#?}");
            ExitCode::SUCCESS
        }
        Err(error) => report_error(&error, options),
    }
}
