//! Basic CLI E2E tests.
//!
//! Tests invoke CLI commands via cargo run against an isolated HOME so they
//! never touch a real user's data directory.

use std::path::PathBuf;
use std::process::Command;

fn test_home() -> PathBuf {
    let home = std::env::temp_dir().join(format!("glowtrack-cli-test-{}", std::process::id()));
    std::fs::create_dir_all(&home).expect("Failed to create test HOME");
    home
}

/// Run a CLI command and return (stdout, stderr, exit code).
fn run_cli(args: &[&str]) -> (String, String, i32) {
    let output = Command::new("cargo")
        .args(["run", "-p", "glowtrack-cli", "--"])
        .args(args)
        .env("HOME", test_home())
        .env("GLOWTRACK_ENV", "dev")
        .output()
        .expect("Failed to execute CLI command");

    let stdout = String::from_utf8_lossy(&output.stdout).to_string();
    let stderr = String::from_utf8_lossy(&output.stderr).to_string();
    let code = output.status.code().unwrap_or(-1);

    (stdout, stderr, code)
}

#[test]
fn test_config_show() {
    let (stdout, _, code) = run_cli(&["config", "show"]);
    assert_eq!(code, 0, "config show failed");
    assert!(stdout.contains("media_retry_limit"));
}

#[test]
fn test_status_for_new_user() {
    let (stdout, _, code) = run_cli(&["status", "--user", "e2e-status"]);
    assert_eq!(code, 0, "status failed");
    let parsed: serde_json::Value = serde_json::from_str(&stdout).expect("status is JSON");
    assert_eq!(parsed["current_streak"], 0);
    assert_eq!(parsed["warning_level"], "none");
}

#[test]
fn test_checkin_then_status() {
    let (stdout, stderr, code) = run_cli(&[
        "checkin",
        "record",
        "--user",
        "e2e-streak",
        "--date",
        "2024-01-01",
        "--today",
        "2024-01-01",
        "--step",
        "cleanse",
    ]);
    assert_eq!(code, 0, "checkin record failed: {stderr}");
    let parsed: serde_json::Value = serde_json::from_str(&stdout).expect("check-in is JSON");
    assert_eq!(parsed["routine_completed"], true);

    let (stdout, _, code) = run_cli(&[
        "status",
        "--user",
        "e2e-streak",
        "--today",
        "2024-01-01",
    ]);
    assert_eq!(code, 0);
    let parsed: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(parsed["current_streak"], 1);
}

#[test]
fn test_milestone_show() {
    let (stdout, _, code) = run_cli(&["milestone", "show", "--user", "e2e-milestone"]);
    assert_eq!(code, 0, "milestone show failed");
    let parsed: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(parsed["next_milestone"], "three_day");
}

#[test]
fn test_empty_record_fails() {
    let (_, stderr, code) = run_cli(&["checkin", "record", "--user", "e2e-empty"]);
    assert_ne!(code, 0, "empty record should fail");
    assert!(stderr.contains("nothing to record"));
}
