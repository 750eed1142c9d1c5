use assert_cmd::Command;
use file_mutex::FileMutex;
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

#[test]
fn test_write_appends_tagged_lines() {
    let dir = TempDir::new().unwrap();
    let output = dir.path().join("output.txt");

    let mut cmd = Command::cargo_bin("file-mutex").unwrap();
    cmd.arg(output.to_str().unwrap())
        .arg("alpha")
        .args(["--count", "3", "--interval-ms", "0"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Writing 0 alpha"));

    assert_eq!(
        fs::read_to_string(&output).unwrap(),
        "alpha\nalpha\nalpha\n"
    );
    assert!(dir.path().join("output.txt.lock").exists());
}

#[test]
fn test_no_wait_exits_with_lock_code_when_contended() {
    let dir = TempDir::new().unwrap();
    let output = dir.path().join("output.txt");

    let holder = FileMutex::new(&output).unwrap();
    holder.lock().unwrap();

    let mut cmd = Command::cargo_bin("file-mutex").unwrap();
    cmd.arg(output.to_str().unwrap())
        .arg("alpha")
        .args(["--no-wait", "--count", "1"])
        .assert()
        .failure()
        .code(2)
        .stderr(predicate::str::contains("held by another process"));

    holder.unlock().unwrap();
}

#[test]
fn test_timeout_expires_when_contended() {
    let dir = TempDir::new().unwrap();
    let output = dir.path().join("output.txt");

    let holder = FileMutex::new(&output).unwrap();
    holder.lock().unwrap();

    let mut cmd = Command::cargo_bin("file-mutex").unwrap();
    cmd.arg(output.to_str().unwrap())
        .arg("alpha")
        .args(["--timeout", "1", "--count", "1"])
        .assert()
        .failure()
        .code(2);

    holder.unlock().unwrap();
}

#[test]
fn test_sharable_holders_do_not_block_each_other() {
    let dir = TempDir::new().unwrap();
    let output = dir.path().join("output.txt");

    let reader = FileMutex::new(&output).unwrap();
    reader.lock_sharable().unwrap();

    let mut cmd = Command::cargo_bin("file-mutex").unwrap();
    cmd.arg(output.to_str().unwrap())
        .arg("beta")
        .args(["--sharable", "--no-wait", "--count", "1", "--interval-ms", "0"])
        .assert()
        .success();

    reader.unlock_sharable().unwrap();
}

#[test]
fn test_remove_subcommand() {
    let dir = TempDir::new().unwrap();
    let output = dir.path().join("output.txt");

    drop(FileMutex::new(&output).unwrap());

    let mut cmd = Command::cargo_bin("file-mutex").unwrap();
    cmd.arg("remove")
        .arg(output.to_str().unwrap())
        .assert()
        .success()
        .stdout(predicate::str::contains("Removed lock file"));

    let mut cmd = Command::cargo_bin("file-mutex").unwrap();
    cmd.arg("remove")
        .arg(output.to_str().unwrap())
        .assert()
        .success()
        .stdout(predicate::str::contains("No lock file"));
}

#[test]
fn test_missing_tag_is_usage_error() {
    let dir = TempDir::new().unwrap();
    let output = dir.path().join("output.txt");

    let mut cmd = Command::cargo_bin("file-mutex").unwrap();
    cmd.arg(output.to_str().unwrap())
        .assert()
        .failure()
        .code(2)
        .stderr(predicate::str::contains("required"));
}
