use assert_cmd::Command;
use predicates::prelude::*;

/// Help lists the command groups.
#[test]
fn test_cli_help() {
    let mut cmd = Command::cargo_bin("stratus").unwrap();
    cmd.arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("create"))
        .stdout(predicate::str::contains("delete"))
        .stdout(predicate::str::contains("list"));
}

#[test]
fn test_cli_version() {
    let mut cmd = Command::cargo_bin("stratus").unwrap();
    cmd.arg("version")
        .assert()
        .success()
        .stdout(predicate::str::contains("stratus"));
}

/// `create cluster` takes a positional name.
#[test]
fn test_create_cluster_help() {
    let mut cmd = Command::cargo_bin("stratus").unwrap();
    cmd.args(["create", "cluster", "--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("<NAME>"));
}

#[test]
fn test_create_cluster_requires_name() {
    let mut cmd = Command::cargo_bin("stratus").unwrap();
    cmd.args(["create", "cluster"]).assert().failure();
}

/// Missing credentials abort before any provider call, naming the
/// variable.
#[test]
fn test_create_cluster_without_credentials() {
    let mut cmd = Command::cargo_bin("stratus").unwrap();
    cmd.env_remove("AWS_ACCESS_KEY_ID")
        .env_remove("AWS_SECRET_ACCESS_KEY")
        .args(["create", "cluster", "demo"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("AWS_ACCESS_KEY_ID"));
}

#[test]
fn test_delete_cluster_without_credentials() {
    let mut cmd = Command::cargo_bin("stratus").unwrap();
    cmd.env_remove("AWS_ACCESS_KEY_ID")
        .env_remove("AWS_SECRET_ACCESS_KEY")
        .args(["delete", "cluster", "demo"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("AWS_ACCESS_KEY_ID"));
}

#[test]
fn test_invalid_command() {
    let mut cmd = Command::cargo_bin("stratus").unwrap();
    cmd.arg("invalid-command").assert().failure();
}
