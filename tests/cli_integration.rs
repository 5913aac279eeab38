//! CLI integration tests for doit
//!
//! These tests drive the built binary end to end: write a rule file into a
//! temp directory, run doit there, and check what landed on disk.

use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

/// Get a command instance for the doit binary
fn doit_cmd() -> assert_cmd::Command {
    assert_cmd::Command::new(assert_cmd::cargo::cargo_bin!("doit"))
}

/// Create a temp directory holding a rule file with the default name
fn setup_rules(rules: &str) -> TempDir {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("doit"), rules).unwrap();
    dir
}

// =============================================================================
// Execution Tests
// =============================================================================

#[test]
#[cfg(unix)]
fn test_runs_rules_and_creates_targets() {
    let dir = setup_rules("out.txt : touch out.txt\n");

    doit_cmd()
        .current_dir(dir.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("touch out.txt"));

    assert!(dir.path().join("out.txt").is_file());
}

#[test]
#[cfg(unix)]
fn test_existing_target_is_skipped() {
    let dir = setup_rules("out.txt : touch out.txt\n");
    fs::write(dir.path().join("out.txt"), "already here").unwrap();

    doit_cmd()
        .current_dir(dir.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("touch").not());

    let content = fs::read_to_string(dir.path().join("out.txt")).unwrap();
    assert_eq!(content, "already here");
}

#[test]
#[cfg(unix)]
fn test_rules_run_in_file_order() {
    let dir = setup_rules("a : echo a >> log\nb : echo b >> log\n");

    doit_cmd().current_dir(dir.path()).assert().success();

    let log = fs::read_to_string(dir.path().join("log")).unwrap();
    assert_eq!(log, "a\nb\n");
}

#[test]
#[cfg(unix)]
fn test_missing_sources_do_not_block_a_rule() {
    // Staleness is target existence only; sources are never consulted.
    let dir = setup_rules("out <- never-made : touch out\n");

    doit_cmd().current_dir(dir.path()).assert().success();

    assert!(dir.path().join("out").is_file());
}

#[test]
#[cfg(unix)]
fn test_quoted_target_with_spaces() {
    let dir = setup_rules("'my file' : touch 'my file'\n");

    doit_cmd().current_dir(dir.path()).assert().success();

    assert!(dir.path().join("my file").is_file());
}

#[test]
#[cfg(unix)]
fn test_explicit_rule_file_argument() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("build.rules"), "out : touch out\n").unwrap();

    doit_cmd()
        .current_dir(dir.path())
        .arg("build.rules")
        .assert()
        .success();

    assert!(dir.path().join("out").is_file());
}

// =============================================================================
// Failure Policy Tests
// =============================================================================

#[test]
#[cfg(unix)]
fn test_failing_rule_stops_the_run() {
    let dir = setup_rules("a : false\nb : touch b\n");

    doit_cmd()
        .current_dir(dir.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("exited with status 1"));

    assert!(!dir.path().join("b").exists());
}

#[test]
#[cfg(unix)]
fn test_keep_going_continues_after_failure() {
    let dir = setup_rules("a : false\nb : touch b\n");

    doit_cmd()
        .current_dir(dir.path())
        .arg("--keep-going")
        .assert()
        .failure();

    assert!(dir.path().join("b").is_file());
}

#[test]
#[cfg(unix)]
fn test_nonzero_exit_status_is_reported() {
    let dir = setup_rules("a : exit 7\n");

    doit_cmd()
        .current_dir(dir.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("exited with status 7"));
}

#[test]
fn test_unusable_shell_is_reported() {
    let dir = setup_rules("out : true\n");

    doit_cmd()
        .current_dir(dir.path())
        .args(["--shell", "/nonexistent/interpreter"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("failed to spawn"));
}

// =============================================================================
// Parse and Startup Failure Tests
// =============================================================================

#[test]
fn test_missing_rule_file_is_a_distinct_error() {
    let dir = TempDir::new().unwrap();

    doit_cmd()
        .current_dir(dir.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("no such rule file"));
}

#[test]
fn test_syntax_error_aborts_before_anything_runs() {
    let dir = setup_rules("ok : touch ok\nbroken rule : nope\n");

    doit_cmd()
        .current_dir(dir.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("expected '<-'"));

    // The first rule was valid, but nothing may execute from a file that
    // fails to parse.
    assert!(!dir.path().join("ok").exists());
}

// =============================================================================
// Flag Tests
// =============================================================================

#[test]
#[cfg(unix)]
fn test_dry_run_prints_without_running() {
    let dir = setup_rules("out : touch out\n");

    doit_cmd()
        .current_dir(dir.path())
        .arg("--dry-run")
        .assert()
        .success()
        .stdout(predicate::str::contains("touch out"));

    assert!(!dir.path().join("out").exists());
}

#[test]
#[cfg(unix)]
fn test_json_format_emits_rule_reports() {
    let dir = setup_rules("out : touch out\n");

    doit_cmd()
        .current_dir(dir.path())
        .args(["--format", "json"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"target\":\"out\""))
        .stdout(predicate::str::contains("\"exit_status\":0"));
}

#[test]
#[cfg(unix)]
fn test_verbose_lists_parsed_rules() {
    let dir = setup_rules("out <- src : touch out\n");

    doit_cmd()
        .current_dir(dir.path())
        .arg("--verbose")
        .assert()
        .success()
        .stderr(predicate::str::contains("parsed 1 rule"))
        .stderr(predicate::str::contains("out <- src : touch out"));
}
