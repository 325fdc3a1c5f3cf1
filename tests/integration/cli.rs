#![allow(missing_docs)]

use assert_cmd::Command;
use tempfile::TempDir;

fn hexdag() -> Command {
    Command::cargo_bin("hexdag").expect("binary built")
}

#[test]
fn oversized_width_is_rejected_before_reading_input() {
    let output = hexdag()
        .args(["hex-lines", "2000"])
        .write_stdin("0041\n")
        .output()
        .expect("run");
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("outside supported range"), "stderr: {stderr}");
}

#[test]
fn svg_export_goes_to_stdout_and_summary_to_stderr() {
    let output = hexdag()
        .args(["hex-lines", "3"])
        .write_stdin("0041ff\nnot-hex\n0041ff\n")
        .output()
        .expect("run");
    assert!(output.status.success());

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.starts_with("<svg"));
    assert!(stdout.trim_end().ends_with("</svg>"));

    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("2 records stored, 1 inputs skipped"), "stderr: {stderr}");
}

#[test]
fn json_export_describes_every_column() {
    let output = hexdag()
        .args(["hex-lines", "4", "--output", "json"])
        .write_stdin("00414243\n0041\n")
        .output()
        .expect("run");
    assert!(output.status.success());

    let value: serde_json::Value =
        serde_json::from_slice(&output.stdout).expect("json export parses");
    assert_eq!(value["columns"].as_array().map(Vec::len), Some(4));
}

#[test]
fn out_flag_writes_the_export_file() {
    let dir = TempDir::new().expect("tempdir");
    let out = dir.path().join("graph.svg");
    hexdag()
        .args(["hex-lines", "2", "--out"])
        .arg(&out)
        .write_stdin("0041\n")
        .assert()
        .success();
    let svg = std::fs::read_to_string(&out).expect("export written");
    assert!(svg.starts_with("<svg"));
}

#[test]
fn db_flag_persists_records_across_runs() {
    let dir = TempDir::new().expect("tempdir");
    let db = dir.path().join("staging.db");

    hexdag()
        .args(["hex-lines", "2", "--db"])
        .arg(&db)
        .args(["--output", "json"])
        .write_stdin("0041\n")
        .assert()
        .success();

    let output = hexdag()
        .args(["hex-lines", "2", "--db"])
        .arg(&db)
        .args(["--output", "json"])
        .write_stdin("0042\n")
        .output()
        .expect("run");
    assert!(output.status.success());

    let value: serde_json::Value = serde_json::from_slice(&output.stdout).expect("json");
    // Second run aggregates over both batches.
    assert_eq!(value["columns"][0]["total"], 2);
}
