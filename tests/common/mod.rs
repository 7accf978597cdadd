#![allow(dead_code)]

use assert_cmd::Command;
use std::path::Path;

pub fn babyjournal_cmd() -> Command {
    let mut cmd = Command::cargo_bin("babyjournal").unwrap();
    cmd.env_remove("BABYJOURNAL_ROOT");
    cmd.env_remove("BABYJOURNAL_BACKEND");
    cmd.env_remove("RUST_LOG");
    cmd
}

/// Command running inside an existing journal
pub fn journal_cmd(root: &Path) -> Command {
    let mut cmd = babyjournal_cmd();
    cmd.current_dir(root);
    cmd
}

/// Initialize a local journal with a profile born on 2023-04-01
pub fn local_journal_with_profile(root: &Path) {
    babyjournal_cmd().arg("init").arg(root).assert().success();
    journal_cmd(root)
        .args(["profile", "--name", "Mali", "--birth-date", "2023-04-01"])
        .assert()
        .success();
}

/// Run `add` and return the new entry id
pub fn add_entry(root: &Path, args: &[&str]) -> String {
    let output = journal_cmd(root)
        .arg("add")
        .args(args)
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();
    let stdout = String::from_utf8(output).unwrap();
    stdout
        .split_whitespace()
        .nth(2)
        .expect("add prints the entry id")
        .to_string()
}
