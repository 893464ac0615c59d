//! Mimo command line.

use std::process::ExitCode;

use mimo_diagnostic::emitter::ColorMode;
use mimoc::commands::{dump_ast, dump_tokens, eval_source, run_file, CliOptions};

fn main() -> ExitCode {
    mimoc::init_tracing();

    let mut args: Vec<String> = std::env::args().skip(1).collect();

    // `--color=` may appear anywhere before the command's own arguments.
    let mut color = None;
    if let Some(pos) = args.iter().position(|a| a.starts_with("--color=")) {
        let flag = args.remove(pos);
        let value = flag.trim_start_matches("--color=");
        let Some(mode) = ColorMode::parse(value) else {
            eprintln!("error: invalid --color value '{value}' (expected auto, always or never)");
            return ExitCode::FAILURE;
        };
        color = Some(mode);
    }
    let options = CliOptions::from_flag(color);

    let Some(command) = args.first().cloned() else {
        print_usage();
        return ExitCode::SUCCESS;
    };

    match command.as_str() {
        "run" => {
            let Some(path) = args.get(1) else {
                eprintln!("Usage: mimo run <file.mimo> [args...]");
                return ExitCode::FAILURE;
            };
            run_file(path, args[2..].to_vec(), options)
        }
        "eval" => {
            let Some(source) = args.get(1) else {
                eprintln!("Usage: mimo eval \"<source>\"");
                return ExitCode::FAILURE;
            };
            eval_source(source, options)
        }
        "tokens" => {
            let Some(path) = args.get(1) else {
                eprintln!("Usage: mimo tokens <file.mimo>");
                return ExitCode::FAILURE;
            };
            dump_tokens(path, options)
        }
        "ast" => {
            let Some(path) = args.get(1) else {
                eprintln!("Usage: mimo ast <file.mimo>");
                return ExitCode::FAILURE;
            };
            dump_ast(path, options)
        }
        "help" | "--help" | "-h" => {
            print_usage();
            ExitCode::SUCCESS
        }
        "version" | "--version" | "-V" => {
            println!("mimo {}", env!("CARGO_PKG_VERSION"));
            ExitCode::SUCCESS
        }
        _ => {
            // A bare `.mimo` path runs the file.
            if std::path::Path::new(&command)
                .extension()
                .is_some_and(|ext| ext.eq_ignore_ascii_case("mimo"))
            {
                return run_file(&command, args[1..].to_vec(), options);
            }
            eprintln!("Unknown command: {command}");
            eprintln!();
            print_usage();
            ExitCode::FAILURE
        }
    }
}

fn print_usage() {
    println!("Mimo interpreter");
    println!();
    println!("Usage: mimo [--color=auto|always|never] <command> [options]");
    println!();
    println!("Commands:");
    println!("  run <file.mimo> [args...]  Run a Mimo program");
    println!("  eval \"<source>\"            Run a source snippet");
    println!("  tokens <file.mimo>         Print the token stream as JSON lines");
    println!("  ast <file.mimo>            Print the syntax tree");
    println!("  help                       Show this help message");
    println!("  --version                  Show the version");
    println!();
    println!("Environment:");
    println!("  RUST_LOG         Enable interpreter logging (e.g. RUST_LOG=mimo_eval=debug)");
    println!("  MIMO_TRACE_TREE  Render logs as a call tree");
    println!("  NO_COLOR         Disable coloured error output");
}
