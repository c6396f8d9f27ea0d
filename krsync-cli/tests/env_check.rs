//! Binary smoke tests for the environment check.

use std::process::Command;

use assert_cmd::prelude::*;
use predicates::str::contains;
use tempfile::TempDir;

fn krsync_cmd() -> Command {
    Command::new(assert_cmd::cargo::cargo_bin!("krsync"))
}

#[test]
fn help_prints_and_succeeds() {
    krsync_cmd()
        .arg("--help")
        .assert()
        .success()
        .stdout(contains("kr-library"));
}

#[test]
fn fails_with_exit_1_outside_a_git_repository() {
    let dir = TempDir::new().expect("tempdir");
    krsync_cmd()
        .current_dir(dir.path())
        .env("GIT_CEILING_DIRECTORIES", dir.path().parent().expect("parent"))
        .assert()
        .failure()
        .code(1)
        .stderr(contains("error"));
}

#[test]
fn rejects_positional_arguments() {
    krsync_cmd().arg("unexpected").assert().failure();
}
