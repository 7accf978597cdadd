//! Integration tests for profile, entry and filter commands

#![allow(deprecated)]

use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

mod common;
use common::{add_entry, babyjournal_cmd, journal_cmd, local_journal_with_profile};

#[test]
fn test_profile_show_and_set() {
    let temp = TempDir::new().unwrap();
    babyjournal_cmd().arg("init").arg(temp.path()).assert().success();

    journal_cmd(temp.path())
        .arg("profile")
        .assert()
        .success()
        .stdout(predicate::str::contains("No profile yet"));

    journal_cmd(temp.path())
        .args(["profile", "--name", "Mali", "--birth-date", "2023-04-01"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Mali (born 2023-04-01)"));

    journal_cmd(temp.path())
        .args(["profile", "--name", "Mali Jr"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Mali Jr (born 2023-04-01)"));

    journal_cmd(temp.path())
        .arg("profile")
        .assert()
        .success()
        .stdout(predicate::str::contains("Mali Jr (born 2023-04-01)"))
        .stdout(predicate::str::contains("Age today:"));
}

#[test]
fn test_first_profile_needs_birth_date() {
    let temp = TempDir::new().unwrap();
    babyjournal_cmd().arg("init").arg(temp.path()).assert().success();

    journal_cmd(temp.path())
        .args(["profile", "--name", "Mali"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("--birth-date is required"));
}

#[test]
fn test_add_requires_profile() {
    let temp = TempDir::new().unwrap();
    babyjournal_cmd().arg("init").arg(temp.path()).assert().success();

    journal_cmd(temp.path())
        .args(["add", "--date", "2024-01-01"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("babyjournal profile"));
}

#[test]
fn test_add_rejects_bad_date() {
    let temp = TempDir::new().unwrap();
    local_journal_with_profile(temp.path());

    journal_cmd(temp.path())
        .args(["add", "--date", "2024-02-30"])
        .assert()
        .code(5)
        .stderr(predicate::str::contains("YYYY-MM-DD"));
}

#[test]
fn test_add_and_list_newest_first() {
    let temp = TempDir::new().unwrap();
    local_journal_with_profile(temp.path());

    add_entry(
        temp.path(),
        &["--date", "2023-05-15", "--notes", "First smile", "--tag", "happy"],
    );
    add_entry(
        temp.path(),
        &["--date", "2024-04-01", "--notes", "First birthday", "--tag", "milestone"],
    );

    let output = journal_cmd(temp.path())
        .arg("list")
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();
    let stdout = String::from_utf8(output).unwrap();
    let lines: Vec<&str> = stdout.lines().collect();

    assert_eq!(lines.len(), 2);
    assert!(lines[0].starts_with("2024-04-01  1 years  [milestone]  First birthday"));
    assert!(lines[1].starts_with("2023-05-15  1 months 14 days  [happy]  First smile"));
}

#[test]
fn test_list_empty() {
    let temp = TempDir::new().unwrap();
    local_journal_with_profile(temp.path());

    journal_cmd(temp.path())
        .arg("list")
        .assert()
        .success()
        .stdout(predicate::str::contains("No entries found"));
}

#[test]
fn test_list_filters_combine() {
    let temp = TempDir::new().unwrap();
    local_journal_with_profile(temp.path());

    add_entry(
        temp.path(),
        &["--date", "2023-06-01", "--notes", "Rolled over in the PARK", "--tag", "milestone"],
    );
    add_entry(
        temp.path(),
        &["--date", "2024-05-01", "--notes", "Walked in the park", "--tag", "milestone"],
    );
    add_entry(
        temp.path(),
        &["--date", "2024-05-02", "--notes", "Nap in the park", "--tag", "sleep"],
    );

    journal_cmd(temp.path())
        .args(["list", "--search", "park", "--tag", "milestone"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Rolled over"))
        .stdout(predicate::str::contains("Walked"))
        .stdout(predicate::str::contains("Nap").not());

    journal_cmd(temp.path())
        .args(["list", "--search", "park", "--tag", "milestone", "--age-year", "1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Walked"))
        .stdout(predicate::str::contains("Rolled over").not());

    journal_cmd(temp.path())
        .args(["list", "--tag", "funny"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No entries found"));
}

#[test]
fn test_facets() {
    let temp = TempDir::new().unwrap();
    local_journal_with_profile(temp.path());

    add_entry(temp.path(), &["--date", "2024-05-01", "--tag", "a", "--tag", "b"]);
    add_entry(temp.path(), &["--date", "2023-05-01", "--tag", "b", "--tag", "c"]);

    journal_cmd(temp.path())
        .arg("facets")
        .assert()
        .success()
        .stdout(predicate::str::contains("tags:  b, c, a"))
        .stdout(predicate::str::contains("years: 0, 1"));
}

#[test]
fn test_edit_entry() {
    let temp = TempDir::new().unwrap();
    local_journal_with_profile(temp.path());
    let id = add_entry(
        temp.path(),
        &["--date", "2023-05-01", "--notes", "Rolled over", "--tag", "milestone"],
    );

    journal_cmd(temp.path())
        .args(["edit", &id, "--date", "2024-04-01", "--clear-tags"])
        .assert()
        .success()
        .stdout(predicate::str::contains("1 years"));

    journal_cmd(temp.path())
        .args(["show", &id])
        .assert()
        .success()
        .stdout(predicate::str::contains("date:  2024-04-01"))
        .stdout(predicate::str::contains("age:   1 years"))
        .stdout(predicate::str::contains("tags:").not())
        .stdout(predicate::str::contains("Rolled over"));
}

#[test]
fn test_edit_unknown_entry() {
    let temp = TempDir::new().unwrap();
    local_journal_with_profile(temp.path());

    journal_cmd(temp.path())
        .args(["edit", "nope", "--notes", "x"])
        .assert()
        .code(6);
}

#[test]
fn test_photos_attach_and_drop() {
    let temp = TempDir::new().unwrap();
    local_journal_with_profile(temp.path());
    let photo = temp.path().join("smile.jpg");
    fs::write(&photo, b"jpeg").unwrap();

    let id = add_entry(
        temp.path(),
        &["--date", "2023-05-01", "--photo", photo.to_str().unwrap()],
    );

    let output = journal_cmd(temp.path())
        .args(["show", &id])
        .assert()
        .success()
        .stdout(predicate::str::contains("image/jpeg"))
        .get_output()
        .stdout
        .clone();
    let stdout = String::from_utf8(output).unwrap();
    let photo_id = stdout
        .lines()
        .find(|line| line.starts_with("photo:"))
        .and_then(|line| line.split_whitespace().nth(1))
        .unwrap()
        .to_string();

    journal_cmd(temp.path())
        .args(["edit", &id, "--drop-photo", &photo_id])
        .assert()
        .success();

    journal_cmd(temp.path())
        .args(["show", &id])
        .assert()
        .success()
        .stdout(predicate::str::contains("photo:").not());
}

#[test]
fn test_delete_entry() {
    let temp = TempDir::new().unwrap();
    local_journal_with_profile(temp.path());
    let id = add_entry(temp.path(), &["--date", "2023-05-01", "--notes", "Bye"]);

    journal_cmd(temp.path())
        .args(["delete", &id])
        .assert()
        .success()
        .stdout(predicate::str::contains(format!("Deleted entry {}", id)));

    journal_cmd(temp.path())
        .arg("list")
        .assert()
        .success()
        .stdout(predicate::str::contains("No entries found"));
}

#[test]
fn test_delete_unknown_entry_is_noop() {
    let temp = TempDir::new().unwrap();
    local_journal_with_profile(temp.path());
    add_entry(temp.path(), &["--date", "2023-05-01", "--notes", "Stays"]);

    journal_cmd(temp.path())
        .args(["delete", "no-such-id"])
        .assert()
        .success()
        .code(0);

    journal_cmd(temp.path())
        .arg("list")
        .assert()
        .success()
        .stdout(predicate::str::contains("Stays"));
}

#[test]
fn test_age_snapshot_kept_after_birth_date_change() {
    let temp = TempDir::new().unwrap();
    local_journal_with_profile(temp.path());
    add_entry(temp.path(), &["--date", "2024-04-01"]);

    journal_cmd(temp.path())
        .args(["profile", "--birth-date", "2023-01-01"])
        .assert()
        .success();

    journal_cmd(temp.path())
        .arg("list")
        .assert()
        .success()
        .stdout(predicate::str::contains("2024-04-01  1 years  "));

    journal_cmd(temp.path())
        .args(["age", "2024-04-01"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Mali is 1 years 3 months old on 2024-04-01"));
}

#[test]
fn test_tags_defaults_and_add() {
    let temp = TempDir::new().unwrap();
    local_journal_with_profile(temp.path());

    journal_cmd(temp.path())
        .arg("tags")
        .assert()
        .success()
        .stdout("happy\nmilestone\nfunny\nsleep\nfamily\n");

    journal_cmd(temp.path())
        .args(["tags", "--add", "first words"])
        .assert()
        .success()
        .stdout(predicate::str::ends_with("family\nfirst words\n"));

    add_entry(temp.path(), &["--date", "2023-05-01", "--tag", "bath"]);

    journal_cmd(temp.path())
        .arg("tags")
        .assert()
        .success()
        .stdout(predicate::str::ends_with("first words\nbath\n"));
}
