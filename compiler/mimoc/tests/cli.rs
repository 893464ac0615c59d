// Test code uses unwrap for clarity; a panic is a clear failure message.
#![allow(clippy::unwrap_used)]

//! End-to-end tests of the `mimo` binary.

use std::fs;
use std::process::{Command, Output};

use pretty_assertions::assert_eq;
use tempfile::TempDir;

fn mimo(args: &[&str], dir: &TempDir) -> Output {
    Command::new(env!("CARGO_BIN_EXE_mimo"))
        .args(args)
        .current_dir(dir.path())
        .env_remove("RUST_LOG")
        .env("NO_COLOR", "1")
        .output()
        .unwrap()
}

fn stdout(output: &Output) -> String {
    String::from_utf8(output.stdout.clone()).unwrap()
}

fn stderr(output: &Output) -> String {
    String::from_utf8(output.stderr.clone()).unwrap()
}

#[test]
fn run_prints_show_output() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("main.mimo"), "show \"hello\"\nshow + 1 2\n").unwrap();
    let out = mimo(&["run", "main.mimo"], &dir);
    assert!(out.status.success(), "{}", stderr(&out));
    assert_eq!(stdout(&out), "hello\n3\n");
}

#[test]
fn run_resolves_imports_next_to_the_script() {
    let dir = TempDir::new().unwrap();
    fs::create_dir(dir.path().join("lib")).unwrap();
    fs::write(
        dir.path().join("lib/util.mimo"),
        "export function twice(x)\n  return * x 2\nend\n",
    )
    .unwrap();
    fs::write(
        dir.path().join("lib/main.mimo"),
        "import \"util\" as u\nshow call u.twice(21)\n",
    )
    .unwrap();
    let out = mimo(&["run", "lib/main.mimo"], &dir);
    assert!(out.status.success(), "{}", stderr(&out));
    assert_eq!(stdout(&out), "42\n");
}

#[test]
fn script_arguments_and_files() {
    let dir = TempDir::new().unwrap();
    fs::write(
        dir.path().join("main.mimo"),
        "import \"fs\" as fs\nset args call get_arguments()\ncall fs.write_file(\"out.txt\", call join(args, \",\"))\n",
    )
    .unwrap();
    let out = mimo(&["run", "main.mimo", "a", "b"], &dir);
    assert!(out.status.success(), "{}", stderr(&out));
    assert_eq!(fs::read_to_string(dir.path().join("out.txt")).unwrap(), "a,b");
}

#[test]
fn exit_code_ends_the_process() {
    let dir = TempDir::new().unwrap();
    let out = mimo(&["eval", "show 1\ncall exit_code(4)\nshow 2"], &dir);
    assert_eq!(out.status.code(), Some(4));
    assert_eq!(stdout(&out), "1\n");
}

#[test]
fn uncaught_errors_go_to_stderr() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("bad.mimo"), "show 1\nshow / 1 0\n").unwrap();
    let out = mimo(&["run", "bad.mimo"], &dir);
    assert_eq!(out.status.code(), Some(1));
    assert_eq!(stdout(&out), "1\n");
    let err = stderr(&out);
    assert!(err.starts_with("[RuntimeError MATH001]"), "{err}");
    assert!(err.contains("> show / 1 0"), "{err}");
    assert!(!err.contains('\x1b'), "NO_COLOR must disable colours: {err}");
}

#[test]
fn forced_colour() {
    let dir = TempDir::new().unwrap();
    let out = mimo(&["--color=always", "eval", "throw \"x\""], &dir);
    assert!(stderr(&out).contains("\x1b[1;31m"));
}

#[test]
fn tokens_are_json_lines() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("t.mimo"), "show 1").unwrap();
    let out = mimo(&["tokens", "t.mimo"], &dir);
    assert!(out.status.success());
    let lines: Vec<serde_json::Value> = stdout(&out)
        .lines()
        .map(|l| serde_json::from_str(l).unwrap())
        .collect();
    assert_eq!(lines.len(), 3);
    assert_eq!(lines[0]["kind"], "Keyword");
    assert_eq!(lines[0]["value"], "show");
    assert_eq!(lines[1]["kind"], "Number");
    assert_eq!(lines[2]["kind"], "Eof");
}

#[test]
fn ast_dump() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("t.mimo"), "set x 1").unwrap();
    let out = mimo(&["ast", "t.mimo"], &dir);
    assert!(out.status.success());
    assert!(stdout(&out).contains("VariableDeclaration"));
}

#[test]
fn missing_file_and_unknown_command() {
    let dir = TempDir::new().unwrap();
    let out = mimo(&["run", "nope.mimo"], &dir);
    assert_eq!(out.status.code(), Some(1));
    assert!(stderr(&out).contains("cannot find file 'nope.mimo'"));

    let out = mimo(&["frobnicate"], &dir);
    assert_eq!(out.status.code(), Some(1));
    assert!(stderr(&out).contains("Unknown command: frobnicate"));
}

#[test]
fn version_and_help() {
    let dir = TempDir::new().unwrap();
    let out = mimo(&["--version"], &dir);
    assert!(stdout(&out).starts_with("mimo "));
    let out = mimo(&["help"], &dir);
    assert!(stdout(&out).contains("Usage: mimo"));
}
