// CLI Tests
// Run the logsight binary against log files in a scratch directory

use std::fs;
use std::path::Path;
use std::process::{Command, Output};
use tempfile::TempDir;

const AUTH_LOG: &str = "\
2024-01-01 10:00:00 login failed for admin
2024-01-01 10:05:00 warning: disk usage at 91%
2024-01-01 10:10:00 Permission denied for user bob
";

fn run(dir: &Path, args: &[&str]) -> Output {
    // Keep the user's real configuration out of the picture
    Command::new(env!("CARGO_BIN_EXE_logsight"))
        .args(args)
        .current_dir(dir)
        .env("HOME", dir)
        .env("XDG_CONFIG_HOME", dir.join(".config"))
        .env_remove("RUST_LOG")
        .output()
        .expect("failed to run logsight binary")
}

fn scratch_with(files: &[(&str, &str)]) -> TempDir {
    let dir = TempDir::new().unwrap();
    for (name, content) in files {
        fs::write(dir.path().join(name), content).unwrap();
    }
    dir
}

fn stdout_json(output: &Output) -> serde_json::Value {
    serde_json::from_slice(&output.stdout).expect("stdout should be JSON")
}

#[test]
fn test_json_report_for_single_file() {
    let dir = scratch_with(&[("auth.log", AUTH_LOG)]);
    let output = run(dir.path(), &["--format", "json", "auth.log"]);

    assert!(output.status.success());
    let report = stdout_json(&output);
    assert_eq!(report["file"]["name"], "auth.log");
    assert_eq!(report["file"]["size"], AUTH_LOG.len());
    assert_eq!(report["summary"]["error_count"], 1);
    assert_eq!(report["summary"]["warning_count"], 1);
    assert_eq!(report["statistics"]["total_lines"], 3);
    assert_eq!(report["timeline"].as_array().unwrap().len(), 3);
}

#[test]
fn test_console_report_is_default() {
    let dir = scratch_with(&[("auth.log", AUTH_LOG)]);
    let output = run(dir.path(), &["auth.log"]);

    assert!(output.status.success());
    let text = String::from_utf8(output.stdout).unwrap();
    assert!(text.starts_with("=== auth.log"));
    assert!(text.contains("Time range: 2024-01-01 10:00:00 to 2024-01-01 10:10:00"));
    assert!(text.contains("Found 1 error(s)"));
    assert!(text.contains("Security events:"));
}

#[test]
fn test_missing_file_fails() {
    let dir = scratch_with(&[]);
    let output = run(dir.path(), &["missing.log"]);

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Failed to read log file"));
    assert!(output.stdout.is_empty());
}

#[test]
fn test_failed_file_does_not_hide_others() {
    let dir = scratch_with(&[("auth.log", AUTH_LOG)]);
    let output = run(dir.path(), &["-f", "json", "missing.log", "auth.log"]);

    assert!(!output.status.success());
    let report = stdout_json(&output);
    assert_eq!(report["file"]["name"], "auth.log");
}

#[test]
fn test_multiple_files_keep_argument_order() {
    let dir = scratch_with(&[
        ("b.log", "warning only\n"),
        ("a.log", AUTH_LOG),
        ("c.log", ""),
    ]);
    let output = run(dir.path(), &["-f", "json", "b.log", "a.log", "c.log"]);

    assert!(output.status.success());
    let reports = stdout_json(&output);
    let names: Vec<&str> = reports
        .as_array()
        .unwrap()
        .iter()
        .map(|r| r["file"]["name"].as_str().unwrap())
        .collect();
    assert_eq!(names, vec!["b.log", "a.log", "c.log"]);
    assert_eq!(reports[2]["summary"]["time_range"], "No timestamps found");
}

#[test]
fn test_unified_errors_flag_changes_error_rate() {
    let dir = scratch_with(&[("auth.log", AUTH_LOG)]);

    let keyword = stdout_json(&run(dir.path(), &["-f", "json", "auth.log"]));
    assert_eq!(keyword["statistics"]["error_rate"], 0.0);

    let unified = stdout_json(&run(
        dir.path(),
        &["-f", "json", "--unified-errors", "auth.log"],
    ));
    let rate = unified["statistics"]["error_rate"].as_f64().unwrap();
    assert!((rate - 100.0 / 3.0).abs() < 1e-9);
}

#[test]
fn test_config_file_sets_format() {
    let dir = scratch_with(&[
        ("auth.log", AUTH_LOG),
        ("custom.toml", "[output]\nformat = \"json\"\n"),
    ]);
    let output = run(dir.path(), &["--config", "custom.toml", "auth.log"]);

    assert!(output.status.success());
    assert_eq!(stdout_json(&output)["file"]["name"], "auth.log");
}

#[test]
fn test_project_config_is_discovered() {
    let dir = scratch_with(&[
        ("auth.log", AUTH_LOG),
        (".logsight.toml", "[analysis]\nerror_rate_basis = \"classified\"\n\n[output]\nformat = \"json\"\n"),
    ]);
    let output = run(dir.path(), &["auth.log"]);

    assert!(output.status.success());
    let rate = stdout_json(&output)["statistics"]["error_rate"]
        .as_f64()
        .unwrap();
    assert!(rate > 0.0);
}

#[test]
fn test_max_size_rejects_large_files() {
    let dir = scratch_with(&[("auth.log", AUTH_LOG)]);
    let output = run(dir.path(), &["--max-size", "10", "auth.log"]);

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("byte limit"));
}

#[test]
fn test_invalid_format_is_rejected() {
    let dir = scratch_with(&[("auth.log", AUTH_LOG)]);
    let output = run(dir.path(), &["--format", "pdf", "auth.log"]);

    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("Invalid output format"));
}

#[test]
fn test_unknown_format_in_config_fails_before_reading_logs() {
    let dir = scratch_with(&[
        ("auth.log", AUTH_LOG),
        ("custom.toml", "[output]\nformat = \"jsno\"\n"),
    ]);
    let output = run(dir.path(), &["--config", "custom.toml", "auth.log"]);

    assert!(!output.status.success());
    assert!(output.stdout.is_empty());
    assert!(String::from_utf8_lossy(&output.stderr).contains("Configuration error"));
}
