//! `run` and `eval`: execute Mimo source with the native host.

use std::process::ExitCode;

use super::{read_source, report_error, CliOptions};
use crate::{native_config, run_with_config};

/// Run the file at `path`, passing `args` to the script.
///
/// The path is made absolute first so relative imports resolve from the
/// script's directory no matter where `mimo` was started.
pub fn run_file(path: &str, args: Vec<String>, options: CliOptions) -> ExitCode {
    let source = match read_source(path) {
        Ok(source) => source,
        Err(message) => {
            eprintln!("error: {message}");
            return ExitCode::FAILURE;
        }
    };
    let file = absolute(path);
    tracing::debug!(file = %file, args = args.len(), "running file");
    match run_with_config(&source, &file, native_config(args)) {
        Ok(_) => ExitCode::SUCCESS,
        Err(error) => report_error(&error, options),
    }
}

/// Run a source snippet given on the command line.
pub fn eval_source(source: &str, options: CliOptions) -> ExitCode {
    match run_with_config(source, "<eval>", native_config(Vec::new())) {
        Ok(_) => ExitCode::SUCCESS,
        Err(error) => report_error(&error, options),
    }
}

fn absolute(path: &str) -> String {
    std::path::absolute(path).map_or_else(
        |_| path.to_string(),
        |p| p.to_string_lossy().into_owned(),
    )
}
