//! CLI smoke tests: argument surface only, no network.

use assert_cmd::Command;
use predicates::prelude::*;

fn sheetboard() -> Command {
    let mut cmd = Command::cargo_bin("sheetboard").unwrap();
    cmd.env_remove("SHEET_URL");
    cmd
}

#[test]
fn test_help_lists_commands() {
    sheetboard()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("serve"))
        .stdout(predicate::str::contains("columns"))
        .stdout(predicate::str::contains("counts"))
        .stdout(predicate::str::contains("rows"));
}

#[test]
fn test_version() {
    sheetboard()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn test_missing_sheet_url_is_an_argument_error() {
    sheetboard()
        .arg("columns")
        .assert()
        .failure()
        .stderr(predicate::str::contains("--sheet-url"));
}

#[test]
fn test_counts_help_documents_filters() {
    sheetboard()
        .args(["counts", "--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("--type"))
        .stdout(predicate::str::contains("--start"))
        .stdout(predicate::str::contains("--field"));
}

#[test]
fn test_server_binary_help() {
    let mut cmd = Command::cargo_bin("sheetboard-server").unwrap();
    cmd.env_remove("SHEET_URL");
    cmd.arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("/api/data"))
        .stdout(predicate::str::contains("--port"));
}
