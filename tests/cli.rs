// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 stackflow contributors

//! Binary-level CLI checks

use assert_cmd::Command;
use predicates::prelude::*;

#[test]
fn test_help_lists_commands() {
    Command::cargo_bin("stackflow")
        .unwrap()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("init"))
        .stdout(predicate::str::contains("stack"));
}

#[test]
fn test_stack_requires_subcommand() {
    Command::cargo_bin("stackflow")
        .unwrap()
        .arg("stack")
        .assert()
        .failure();
}

#[test]
fn test_stack_up_without_project_file_fails() {
    let dir = tempfile::tempdir().unwrap();

    Command::cargo_bin("stackflow")
        .unwrap()
        .args(["-C"])
        .arg(dir.path())
        .args(["stack", "up", "mystack", "/stacks/mystack.ts"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Project file not found"));
}

#[test]
fn test_stack_up_dry_run_prints_plan() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("Pulumi.yaml"), "name: demo\n").unwrap();

    Command::cargo_bin("stackflow")
        .unwrap()
        .args(["-C"])
        .arg(dir.path())
        .args(["stack", "up", "mystack", "/stacks/mystack.ts", "--dry-run"])
        .assert()
        .success()
        .stdout(predicate::str::contains("get_project_name"))
        .stdout(predicate::str::contains("get_stack_name"))
        .stdout(predicate::str::contains("stack_up"));
}
