//! Basic CLI E2E tests.
//!
//! Tests invoke CLI commands via cargo run and verify outputs. Each test
//! gets its own HOME so the stores never collide.

use std::io::Write;
use std::path::PathBuf;
use std::process::{Command, Stdio};

fn test_home(name: &str) -> PathBuf {
    let home = std::env::temp_dir().join("pausa-cli-e2e").join(name);
    let _ = std::fs::remove_dir_all(&home);
    std::fs::create_dir_all(&home).expect("Failed to create test home");
    home
}

/// Cargo invocation with HOME pointed at the test directory. CARGO_HOME
/// and RUSTUP_HOME keep their real locations so the toolchain still
/// resolves.
fn cargo_cmd(home: &PathBuf) -> Command {
    let real_home = std::env::var_os("HOME").unwrap_or_default();
    let real_home = PathBuf::from(real_home);
    let cargo_home =
        std::env::var_os("CARGO_HOME").map_or_else(|| real_home.join(".cargo"), PathBuf::from);
    let rustup_home =
        std::env::var_os("RUSTUP_HOME").map_or_else(|| real_home.join(".rustup"), PathBuf::from);

    let mut cmd = Command::new("cargo");
    cmd.env("HOME", home)
        .env("CARGO_HOME", cargo_home)
        .env("RUSTUP_HOME", rustup_home);
    cmd
}

/// Run a CLI command and return (stdout, stderr, exit code).
fn run_cli(home: &PathBuf, args: &[&str]) -> (String, String, i32) {
    let output = cargo_cmd(home)
        .args(["run", "-p", "pausa-cli", "--"])
        .args(args)
        .output()
        .expect("Failed to execute CLI command");

    let stdout = String::from_utf8_lossy(&output.stdout).to_string();
    let stderr = String::from_utf8_lossy(&output.stderr).to_string();
    let code = output.status.code().unwrap_or(-1);

    (stdout, stderr, code)
}

/// Run `pausa run` with the given stdin script.
fn run_interactive(home: &PathBuf, script: &str) -> (String, i32) {
    let mut child = cargo_cmd(home)
        .args(["run", "-p", "pausa-cli", "--", "run"])
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::null())
        .spawn()
        .expect("Failed to spawn CLI");

    child
        .stdin
        .take()
        .expect("no stdin")
        .write_all(script.as_bytes())
        .expect("Failed to write stdin");

    let output = child.wait_with_output().expect("Failed to wait for CLI");
    let stdout = String::from_utf8_lossy(&output.stdout).to_string();
    (stdout, output.status.code().unwrap_or(-1))
}

#[test]
fn test_history_empty() {
    let home = test_home("history_empty");
    let (stdout, _, code) = run_cli(&home, &["history"]);
    assert_eq!(code, 0, "History failed");
    assert!(stdout.contains("no history yet"));
}

#[test]
fn test_stats_empty() {
    let home = test_home("stats_empty");
    let (stdout, _, code) = run_cli(&home, &["stats"]);
    assert_eq!(code, 0, "Stats failed");
    let totals: serde_json::Value = serde_json::from_str(&stdout).expect("stats not JSON");
    assert_eq!(totals["total_work_minutes"], 0);
    assert_eq!(totals["completed_work_sessions"], 0);
}

#[test]
fn test_preset_list_empty() {
    let home = test_home("preset_list_empty");
    let (stdout, _, code) = run_cli(&home, &["preset", "list"]);
    assert_eq!(code, 0, "Preset list failed");
    assert!(stdout.contains("no presets saved"));
}

#[test]
fn test_preset_save_then_list() {
    let home = test_home("preset_save");
    let (_, _, code) = run_cli(
        &home,
        &[
            "preset",
            "save",
            "--work",
            "1500",
            "--short-break",
            "300",
            "--long-break",
            "900",
            "--cycles",
            "4",
        ],
    );
    assert_eq!(code, 0, "Preset save failed");

    let (stdout, _, code) = run_cli(&home, &["preset", "list"]);
    assert_eq!(code, 0, "Preset list failed");
    assert!(stdout.contains("1. work 1500s"));
}

#[test]
fn test_preset_save_rejects_zero() {
    let home = test_home("preset_zero");
    let (_, stderr, code) = run_cli(
        &home,
        &[
            "preset",
            "save",
            "--work",
            "0",
            "--short-break",
            "300",
            "--long-break",
            "900",
            "--cycles",
            "4",
        ],
    );
    assert_eq!(code, 1, "Zero duration should be rejected");
    assert!(stderr.contains("positive"));
}

#[test]
fn test_config_get() {
    let home = test_home("config_get");
    let (stdout, _, code) = run_cli(&home, &["config", "get", "durations.work_secs"]);
    assert_eq!(code, 0, "Config get failed");
    assert_eq!(stdout.trim(), "1500");
}

#[test]
fn test_config_get_unknown_key() {
    let home = test_home("config_unknown");
    let (_, _, code) = run_cli(&home, &["config", "get", "durations.bogus"]);
    assert_eq!(code, 1, "Unknown key should fail");
}

#[test]
fn test_config_set_roundtrip() {
    let home = test_home("config_set");
    let (_, _, code) = run_cli(&home, &["config", "set", "durations.work_secs", "3000"]);
    assert_eq!(code, 0, "Config set failed");

    let (stdout, _, code) = run_cli(&home, &["config", "get", "durations.work_secs"]);
    assert_eq!(code, 0, "Config get failed");
    assert_eq!(stdout.trim(), "3000");
}

#[test]
fn test_config_list() {
    let home = test_home("config_list");
    let (stdout, _, code) = run_cli(&home, &["config", "list"]);
    assert_eq!(code, 0, "Config list failed");
    let json: serde_json::Value = serde_json::from_str(&stdout).expect("config not JSON");
    assert_eq!(json["durations"]["short_break_secs"], 300);
}

#[test]
fn test_run_stop_and_decline_restart_exits_zero() {
    let home = test_home("run_stop");
    // Default durations, decline the preset save, stop, answer N.
    let (stdout, code) = run_interactive(&home, "\n\n\n\nn\ns\nn\n");
    assert_eq!(code, 0, "Graceful quit should exit 0");
    assert!(stdout.contains("session 1: work for 25:00"));
    assert!(stdout.contains("start a new session?"));

    // Stopping mid-session appends nothing.
    let (stdout, _, code) = run_cli(&home, &["history"]);
    assert_eq!(code, 0);
    assert!(stdout.contains("no history yet"));
}
