//! CLI-level tests for the `locate` subcommand.

use assert_cmd::Command;
use predicates::prelude::*;

fn launcher_name() -> &'static str {
    if cfg!(windows) { "patched.cmd" } else { "patched" }
}

#[test]
fn help_runs() {
    Command::cargo_bin("patched-lsp")
        .unwrap()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("locate"));
}

#[test]
fn locate_finds_the_project_launcher() {
    let root = tempfile::tempdir().unwrap();
    let bin_dir = root.path().join("node_modules").join(".bin");
    std::fs::create_dir_all(&bin_dir).unwrap();
    std::fs::write(bin_dir.join(launcher_name()), "").unwrap();

    Command::cargo_bin("patched-lsp")
        .unwrap()
        .env("PATH", "")
        .arg("locate")
        .arg(root.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("node_modules"));
}

#[test]
fn locate_reports_an_unavailable_tool() {
    let root = tempfile::tempdir().unwrap();

    Command::cargo_bin("patched-lsp")
        .unwrap()
        .env("PATH", "")
        .arg("locate")
        .arg(root.path())
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("no patched executable found"));
}
