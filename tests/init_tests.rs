//! Integration tests for init and config commands

#![allow(deprecated)]

use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

mod common;
use common::{babyjournal_cmd, journal_cmd};

#[test]
fn test_init_creates_config() {
    let temp = TempDir::new().unwrap();

    babyjournal_cmd()
        .arg("init")
        .arg(temp.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("Backend: local"));

    let config_path = temp.path().join(".babyjournal/config.toml");
    assert!(config_path.exists());

    let content = fs::read_to_string(config_path).unwrap();
    assert!(content.contains("backend = \"local\""));
}

#[test]
fn test_init_with_sheet_backend() {
    let temp = TempDir::new().unwrap();

    babyjournal_cmd()
        .arg("init")
        .arg(temp.path())
        .arg("--backend")
        .arg("sheet")
        .assert()
        .success();

    let content = fs::read_to_string(temp.path().join(".babyjournal/config.toml")).unwrap();
    assert!(content.contains("backend = \"sheet\""));
}

#[test]
fn test_init_invalid_backend_fails() {
    let temp = TempDir::new().unwrap();

    babyjournal_cmd()
        .arg("init")
        .arg(temp.path())
        .arg("--backend")
        .arg("browser")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid backend"));
}

#[test]
fn test_init_already_initialized_fails() {
    let temp = TempDir::new().unwrap();

    babyjournal_cmd().arg("init").arg(temp.path()).assert().success();
    babyjournal_cmd().arg("init").arg(temp.path()).assert().failure();
}

#[test]
fn test_commands_outside_journal_fail() {
    let temp = TempDir::new().unwrap();

    journal_cmd(temp.path())
        .arg("list")
        .assert()
        .code(4)
        .stderr(predicate::str::contains("babyjournal init"));
}

#[test]
fn test_config_get_and_set_backend() {
    let temp = TempDir::new().unwrap();
    babyjournal_cmd().arg("init").arg(temp.path()).assert().success();

    journal_cmd(temp.path())
        .args(["config", "backend"])
        .assert()
        .success()
        .stdout(predicate::str::contains("local"));

    journal_cmd(temp.path())
        .args(["config", "backend", "sheet"])
        .assert()
        .success();

    journal_cmd(temp.path())
        .args(["config", "backend"])
        .assert()
        .success()
        .stdout(predicate::str::contains("sheet"));
}

#[test]
fn test_config_list() {
    let temp = TempDir::new().unwrap();
    babyjournal_cmd().arg("init").arg(temp.path()).assert().success();

    journal_cmd(temp.path())
        .args(["config", "--list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("backend = local"))
        .stdout(predicate::str::contains("owner = "))
        .stdout(predicate::str::contains("sheet.account = "))
        .stdout(predicate::str::contains("created").not());
}

#[test]
fn test_config_unknown_key_fails() {
    let temp = TempDir::new().unwrap();
    babyjournal_cmd().arg("init").arg(temp.path()).assert().success();

    journal_cmd(temp.path())
        .args(["config", "created"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unknown config key: 'created'"));
}
