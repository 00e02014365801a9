//! Smoke tests for argument handling; none of these reach a database

use assert_cmd::Command;
use predicates::prelude::*;

#[test]
fn test_help_lists_positionals() {
    let mut cmd = Command::cargo_bin("shopctl").unwrap();
    cmd.arg("--help");

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("<DBNAME>"))
        .stdout(predicate::str::contains("<PORT>"))
        .stdout(predicate::str::contains("<USER>"));
}

#[test]
fn test_missing_positionals_print_usage() {
    let mut cmd = Command::cargo_bin("shopctl").unwrap();
    cmd.arg("shop");

    cmd.assert()
        .failure()
        .code(2)
        .stderr(predicate::str::contains("Usage:"))
        .stdout(predicate::str::contains("Connecting").not());
}

#[test]
fn test_extra_positionals_print_usage() {
    let mut cmd = Command::cargo_bin("shopctl").unwrap();
    cmd.args(["shop", "5432", "me", "extra"]);

    cmd.assert()
        .failure()
        .code(2)
        .stderr(predicate::str::contains("Usage:"));
}

#[test]
fn test_port_must_be_numeric() {
    let mut cmd = Command::cargo_bin("shopctl").unwrap();
    cmd.args(["shop", "not-a-port", "me"]);

    cmd.assert()
        .failure()
        .code(2)
        .stderr(predicate::str::contains("invalid value"));
}

#[test]
fn test_missing_config_file_fails_before_connecting() {
    let dir = tempfile::tempdir().unwrap();
    let mut cmd = Command::cargo_bin("shopctl").unwrap();
    cmd.args(["shop", "5432", "me", "--quiet", "--config"])
        .arg(dir.path().join("absent.toml"));

    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("Failed to read config file"))
        .stdout(predicate::str::contains("Connecting").not());
}
