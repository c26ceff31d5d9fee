//! End-to-end tests: lines go through the lexer, parser and the process
//! executor, and the results are checked on disk.

use std::fs;
use std::path::Path;
use std::time::{Duration, Instant};

use pipesh::config::Config;
use pipesh::executor::{ExecError, ExecOutcome};
use pipesh::parser::SyntaxError;
use pipesh::{Repl, ShellError};

fn repl() -> Repl {
    Repl::new(Config {
        show_prompt: false,
        ..Config::default()
    })
}

fn read(path: &Path) -> String {
    fs::read_to_string(path).unwrap()
}

#[test]
fn ls_into_wc_spawns_two_processes() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("a"), "").unwrap();
    fs::write(dir.path().join("b"), "").unwrap();
    let out = dir.path().join("count");
    let mut repl = repl();

    let outcome = repl
        .process_line(&format!("ls {} | wc -l > {}", dir.path().display(), out.display()))
        .unwrap();

    let outcome = outcome.unwrap();
    assert_eq!(outcome.spawned(), 2);
    assert_eq!(outcome.code(), Some(0));
    // `count` itself may or may not be listed yet.
    let listed: usize = read(&out).trim().parse().unwrap();
    assert!(listed >= 2);
}

#[test]
fn redirect_out_waits_for_the_process() {
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("out.txt");
    let mut repl = repl();

    let outcome = repl
        .process_line(&format!("echo written > {}", out.display()))
        .unwrap();

    assert_eq!(outcome.map(|o| o.spawned()), Some(1));
    assert_eq!(read(&out), "written\n");
}

#[test]
fn empty_command_between_pipes_spawns_nothing() {
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("never");
    let mut repl = repl();

    let err = repl
        .process_line(&format!("echo hi > {} | | cat", out.display()))
        .unwrap_err();

    assert!(matches!(err, ShellError::Syntax(SyntaxError::MissingCommandAfterPipe)));
    assert!(!out.exists());
}

#[test]
fn missing_input_file_is_a_resource_error() {
    let dir = tempfile::tempdir().unwrap();
    let missing = dir.path().join("missing.txt");
    let mut repl = repl();

    let err = repl
        .process_line(&format!("< {} cat", missing.display()))
        .unwrap_err();

    assert!(matches!(err, ShellError::Exec(ExecError::Redirect { .. })));
    assert!(err.to_string().contains("missing.txt"));
}

#[test]
fn background_line_returns_before_the_process_ends() {
    let mut repl = repl();
    let started = Instant::now();

    let outcome = repl.process_line("sleep 2 &").unwrap();

    assert!(started.elapsed() < Duration::from_secs(1));
    assert!(matches!(outcome, Some(ExecOutcome::Background { ref pids }) if pids.len() == 1));
    assert_eq!(repl.executor().jobs().len(), 1);
}

#[test]
fn next_line_runs_while_background_job_is_alive() {
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("out.txt");
    let mut repl = repl();

    repl.process_line("sleep 2 &").unwrap();
    repl.process_line(&format!("echo still here > {}", out.display()))
        .unwrap();

    assert_eq!(read(&out), "still here\n");
    assert_eq!(repl.executor().jobs().len(), 1);
}
