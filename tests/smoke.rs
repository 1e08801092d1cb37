//! Smoke tests -- verify the binary runs against the bundled fixture.

use assert_cmd::Command;
use predicates::prelude::*;
use std::io::Write;

const FIXTURE: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/data/eve.json");

fn eveboard() -> Command {
    let mut cmd = Command::cargo_bin("eveboard").unwrap();
    // Keep a developer's own config from leaking into the tests.
    cmd.env_remove("EVEBOARD_CONFIG").env_remove("RUST_LOG");
    cmd
}

#[test]
fn test_cli_help() {
    eveboard()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Dashboard over static IDS alert fixtures"));
}

#[test]
fn test_cli_version() {
    eveboard()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("eveboard"));
}

#[test]
fn test_serve_subcommand_exists() {
    eveboard().args(["serve", "--help"]).assert().success();
}

#[test]
fn test_summary_text() {
    eveboard()
        .args(["--data", FIXTURE, "summary"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Number of Alerts by Type"))
        .stdout(predicate::str::contains("Severity Distribution"))
        .stdout(predicate::str::contains("ET SCAN Potential SSH Scan"));
}

#[test]
fn test_summary_json() {
    let output = eveboard()
        .args(["--data", FIXTURE, "summary", "--json"])
        .output()
        .unwrap();
    assert!(output.status.success());
    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json["summary"]["total_records"], 15);
    assert_eq!(json["summary"]["with_signature"], 14);
    assert_eq!(json["summary"]["with_severity"], 13);
    assert_eq!(json["charts"]["severity"]["labels"][0], "Severity 2");
}

#[test]
fn test_table_filter_json() {
    let output = eveboard()
        .args([
            "--data", FIXTURE, "table", "--src-ip", "10.0", "--severity", "1", "--json",
        ])
        .output()
        .unwrap();
    assert!(output.status.success());
    let rows: Vec<serde_json::Value> = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(rows.len(), 3);
    assert!(rows.iter().all(|r| r["alert"]["severity"] == 1));
}

#[test]
fn test_table_sort_and_limit() {
    eveboard()
        .args([
            "--data", FIXTURE, "table", "--sort", "port", "--desc", "--limit", "2",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("Port ▼"))
        .stdout(predicate::str::contains("8080"))
        .stdout(predicate::str::contains("showing 2 of 15 matching rows"));
}

#[test]
fn test_unknown_sort_column_rejected() {
    eveboard()
        .args(["--data", FIXTURE, "table", "--sort", "flow_id"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown column"));
}

#[test]
fn test_broken_env_config_warns_and_falls_back() {
    let mut config = tempfile::NamedTempFile::new().unwrap();
    writeln!(config, "[server\nbind = ").unwrap();

    eveboard()
        .env("EVEBOARD_CONFIG", config.path())
        .args(["--data", FIXTURE, "summary", "--json"])
        .assert()
        .success()
        .stderr(predicate::str::contains("could not be loaded"));
}

#[test]
fn test_missing_data_file_fails() {
    eveboard()
        .args(["--data", "no/such/eve.json", "summary"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("could not load alerts"));
}
