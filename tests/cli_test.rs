//! Integration tests for the updatewatch binary.
// The cargo_bin function is marked deprecated in favor of cargo_bin! macro,
// but both work correctly. Suppressing until assert_cmd stabilizes the new API.
#![allow(deprecated)]

use assert_cmd::cargo::cargo_bin;
use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

fn setup_dir(checks: &str) -> TempDir {
    let temp = TempDir::new().unwrap();
    fs::write(temp.path().join("updates.yaml"), checks).unwrap();
    temp
}

fn updatewatch(temp: &TempDir) -> Command {
    let mut cmd = Command::new(cargo_bin("updatewatch"));
    cmd.arg("--dir").arg(temp.path()).arg("--no-color");
    cmd.env_remove("RUST_LOG");
    cmd
}

const TWO_CHECKS: &str = r#"
description: first
command: echo pkgA
---
description: second
command: echo pkgB
"#;

#[test]
fn cli_shows_help() -> Result<(), Box<dyn std::error::Error>> {
    let mut cmd = Command::new(cargo_bin("updatewatch"));
    cmd.arg("--help");
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("Poll for new software updates"))
        .stdout(predicate::str::contains("--log"));
    Ok(())
}

#[test]
fn cli_shows_version() -> Result<(), Box<dyn std::error::Error>> {
    let mut cmd = Command::new(cargo_bin("updatewatch"));
    cmd.arg("--version");
    cmd.assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
    Ok(())
}

#[test]
fn cli_no_args_runs_and_shows_new() -> Result<(), Box<dyn std::error::Error>> {
    let temp = setup_dir(TWO_CHECKS);

    updatewatch(&temp)
        .assert()
        .success()
        .stdout(predicate::str::contains(" Checking first..."))
        .stdout(predicate::str::contains("+pkgA"))
        .stdout(predicate::str::contains("+pkgB"));
    Ok(())
}

#[test]
fn cli_second_run_is_silent() -> Result<(), Box<dyn std::error::Error>> {
    let temp = setup_dir(TWO_CHECKS);

    updatewatch(&temp).arg("run").assert().success();
    updatewatch(&temp)
        .arg("run")
        .assert()
        .success()
        .stdout(predicate::str::is_empty());
    Ok(())
}

#[test]
fn cli_run_from_cache_replays_last_run() -> Result<(), Box<dyn std::error::Error>> {
    let temp = setup_dir(TWO_CHECKS);

    updatewatch(&temp).arg("run").assert().success();
    updatewatch(&temp)
        .args(["run", "--from-cache"])
        .assert()
        .success()
        .stdout(predicate::str::contains("+pkgB"));
    Ok(())
}

#[test]
fn cli_list_shows_everything() -> Result<(), Box<dyn std::error::Error>> {
    let temp = setup_dir(TWO_CHECKS);

    updatewatch(&temp)
        .args(["list", "--single"])
        .assert()
        .success()
        .stdout("Checking first...\npkgA\n\nChecking second...\npkgB\n\n");
    Ok(())
}

#[test]
fn cli_list_from_cache() -> Result<(), Box<dyn std::error::Error>> {
    let temp = setup_dir(TWO_CHECKS);

    updatewatch(&temp)
        .args(["list", "--from-cache"])
        .assert()
        .success()
        .stdout(predicate::str::is_empty());

    updatewatch(&temp).assert().success();

    updatewatch(&temp)
        .args(["list", "--from-cache"])
        .assert()
        .success()
        .stdout(predicate::str::contains("pkgA"))
        .stdout(predicate::str::contains("+").not());
    Ok(())
}

#[test]
fn cli_missing_checks_file_fails() -> Result<(), Box<dyn std::error::Error>> {
    let temp = TempDir::new().unwrap();

    updatewatch(&temp)
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("Error:"))
        .stderr(predicate::str::contains("updates.yaml"));
    Ok(())
}

#[test]
fn cli_invalid_checks_fail() -> Result<(), Box<dyn std::error::Error>> {
    let temp = setup_dir("description: no command\n");

    updatewatch(&temp)
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid check #1"));
    Ok(())
}

#[test]
fn cli_missing_dir_is_rejected() -> Result<(), Box<dyn std::error::Error>> {
    let temp = TempDir::new().unwrap();

    Command::new(cargo_bin("updatewatch"))
        .arg("--dir")
        .arg(temp.path().join("missing"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("not an existing directory"));
    Ok(())
}

#[test]
fn cli_cache_keys_and_clear() -> Result<(), Box<dyn std::error::Error>> {
    let temp = setup_dir(TWO_CHECKS);
    updatewatch(&temp).assert().success();

    updatewatch(&temp)
        .args(["cache", "keys"])
        .assert()
        .success()
        .stdout(predicate::str::contains("2 checks, 2 items"));

    updatewatch(&temp)
        .args(["cache", "clear"])
        .assert()
        .success()
        .stdout("Cleared 1 entries\n");

    updatewatch(&temp)
        .args(["cache", "keys"])
        .assert()
        .success()
        .stdout(predicate::str::is_empty());
    Ok(())
}

#[test]
fn cli_cache_path() -> Result<(), Box<dyn std::error::Error>> {
    let temp = TempDir::new().unwrap();
    let expected = temp.path().join("cache");

    updatewatch(&temp)
        .args(["cache", "path"])
        .assert()
        .success()
        .stdout(predicate::str::contains(expected.to_str().unwrap()));
    Ok(())
}

#[test]
fn cli_debug_logs_to_stderr() -> Result<(), Box<dyn std::error::Error>> {
    let temp = setup_dir(TWO_CHECKS);

    updatewatch(&temp)
        .arg("--debug")
        .assert()
        .success()
        .stderr(predicate::str::contains("DEBUG"))
        .stdout(predicate::str::contains("DEBUG").not());
    Ok(())
}

#[test]
fn cli_log_writes_default_file() -> Result<(), Box<dyn std::error::Error>> {
    let temp = setup_dir(TWO_CHECKS);

    updatewatch(&temp).args(["--debug", "--log"]).assert().success();

    let log = fs::read_to_string(temp.path().join("updatewatch.log"))?;
    assert!(log.contains("DEBUG"));
    assert!(!log.contains('\x1b'));
    Ok(())
}

#[test]
fn cli_log_writes_given_file() -> Result<(), Box<dyn std::error::Error>> {
    let temp = setup_dir("description: broken\ncommand: exit 3\n");
    let logfile = temp.path().join("custom.log");

    updatewatch(&temp)
        .arg(format!("--log={}", logfile.display()))
        .assert()
        .success();

    let log = fs::read_to_string(&logfile)?;
    assert!(log.contains("check 'broken' failed with status 3"));
    Ok(())
}

#[test]
fn cli_generates_completions() -> Result<(), Box<dyn std::error::Error>> {
    let temp = TempDir::new().unwrap();

    updatewatch(&temp)
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("updatewatch"));
    Ok(())
}
