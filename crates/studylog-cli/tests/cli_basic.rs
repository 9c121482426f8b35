//! Basic CLI E2E tests.
//!
//! Only exercises commands that do not need a reachable backend.

use std::process::Command;

/// Run a CLI command and return (stdout, stderr, exit code).
fn run_cli(args: &[&str]) -> (String, String, i32) {
    let output = Command::new("cargo")
        .args(["run", "-p", "studylog-cli", "--quiet", "--"])
        .args(args)
        .env("STUDYLOG_ENV", "dev")
        .output()
        .expect("Failed to execute CLI command");

    let stdout = String::from_utf8_lossy(&output.stdout).to_string();
    let stderr = String::from_utf8_lossy(&output.stderr).to_string();
    let code = output.status.code().unwrap_or(-1);

    (stdout, stderr, code)
}

#[test]
fn test_help() {
    let (stdout, _stderr, code) = run_cli(&["--help"]);
    assert_eq!(code, 0, "help failed");
    assert!(stdout.contains("Studylog CLI"));
    assert!(stdout.contains("timer"));
    assert!(stdout.contains("stats"));
}

#[test]
fn test_timer_help() {
    let (stdout, _stderr, code) = run_cli(&["timer", "--help"]);
    assert_eq!(code, 0, "timer help failed");
    assert!(stdout.contains("run"));
}

#[test]
fn test_log_requires_minutes() {
    let (_stdout, stderr, code) = run_cli(&["log"]);
    assert_ne!(code, 0, "log without --minutes should fail");
    assert!(stderr.contains("--minutes"));
}

#[test]
fn test_config_path() {
    let (stdout, _stderr, code) = run_cli(&["config", "path"]);
    assert_eq!(code, 0, "config path failed");
    assert!(stdout.contains("config.toml"));
}

#[test]
fn test_completions_bash() {
    let (stdout, _stderr, code) = run_cli(&["completions", "bash"]);
    assert_eq!(code, 0, "completions failed");
    assert!(stdout.contains("studylog-cli"));
}
