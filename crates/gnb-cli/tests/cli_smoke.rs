//! CLI binary smoke tests using assert_cmd.
//!
//! These tests exercise the compiled `gnb` binary end-to-end: argument
//! parsing, the console report and error exits.

use std::io::Write;

use assert_cmd::Command;
use predicates::prelude::*;

fn cmd() -> Command {
    Command::cargo_bin("gnb").unwrap()
}

/// Two well separated classes, 10 rows each, written to `dir/data.csv`.
fn write_dataset(dir: &tempfile::TempDir) -> std::path::PathBuf {
    let path = dir.path().join("data.csv");
    let mut file = std::fs::File::create(&path).unwrap();
    writeln!(file, "f1,f2,label").unwrap();
    for i in 0..10 {
        let d = i as f64 * 0.1;
        writeln!(file, "{},{},0", 1.0 + d, 2.0 - d).unwrap();
        writeln!(file, "{},{},1", 8.0 + d, 9.0 - d).unwrap();
    }
    path
}

// ---------------------------------------------------------------------------
// Top-level
// ---------------------------------------------------------------------------

#[test]
fn no_args_shows_help() {
    cmd()
        .assert()
        .failure()
        .stderr(predicate::str::contains("Usage"));
}

#[test]
fn help_lists_run() {
    cmd()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("run"));
}

#[test]
fn version_flag() {
    cmd()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("gnb"));
}

// ---------------------------------------------------------------------------
// run
// ---------------------------------------------------------------------------

#[test]
fn run_requires_dataset() {
    cmd().arg("run").assert().failure();
}

#[test]
fn run_prints_report() {
    let dir = tempfile::tempdir().unwrap();
    let data = write_dataset(&dir);
    cmd()
        .arg("run")
        .arg(&data)
        .args(["--repetitions", "5"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Mean accuracy: 1"))
        .stdout(predicate::str::contains("Representative realization (index): 0"))
        .stdout(predicate::str::contains("[["));
}

#[test]
fn run_writes_decision_surface() {
    let dir = tempfile::tempdir().unwrap();
    let data = write_dataset(&dir);
    let grid = dir.path().join("grid.csv");
    cmd()
        .arg("run")
        .arg(&data)
        .args(["--repetitions", "2", "--surface-step", "0.5"])
        .arg("--surface-out")
        .arg(&grid)
        .assert()
        .success();

    let content = std::fs::read_to_string(&grid).unwrap();
    assert!(content.starts_with("x,y,label"));
    assert!(content.lines().count() > 1);
}

#[test]
fn run_reads_json_config() {
    let dir = tempfile::tempdir().unwrap();
    let data = write_dataset(&dir);
    let config = dir.path().join("config.json");
    std::fs::write(&config, r#"{"resample": {"repetitions": 3, "test_fraction": 0.5}}"#).unwrap();
    cmd()
        .arg("run")
        .arg(&data)
        .arg(&config)
        .assert()
        .success()
        .stdout(predicate::str::contains("Mean accuracy"));
}

#[test]
fn run_rejects_unknown_policy() {
    let dir = tempfile::tempdir().unwrap();
    let data = write_dataset(&dir);
    cmd()
        .arg("run")
        .arg(&data)
        .args(["--zero-variance", "laplace"])
        .assert()
        .failure();
}

#[test]
fn run_fails_on_bad_fraction() {
    let dir = tempfile::tempdir().unwrap();
    let data = write_dataset(&dir);
    cmd()
        .arg("run")
        .arg(&data)
        .args(["--test-fraction", "1.5"])
        .assert()
        .failure();
}

#[test]
fn run_fails_on_missing_file() {
    cmd()
        .args(["run", "/nonexistent/path/data.csv"])
        .assert()
        .failure();
}
