//! Command line tests for the dirtree binary


use assert_cmd::Command;
use harness::{TestDir, run_dirtree};
use predicates::prelude::*;

fn dirtree_cmd() -> Command {
    let mut cmd = Command::cargo_bin("dirtree").expect("binary builds");
    cmd.env("NO_COLOR", "1");
    cmd
}

#[test]
fn test_basic_tree_output() {
    let dir = TestDir::reference();

    let (stdout, _stderr, success) = run_dirtree(dir.path(), &[]);
    assert!(success, "dirtree should succeed");
    assert!(stdout.contains("some_dir"), "should show some_dir: {}", stdout);
    assert!(stdout.contains("another_dir"), "should show nested dir");
    assert!(stdout.contains("3 directories, 7 files"), "footer: {}", stdout);
}

#[test]
fn test_extension_filter() {
    let dir = TestDir::reference();

    dirtree_cmd()
        .current_dir(dir.path())
        .args(["-e", r"\.txt$"])
        .assert()
        .success()
        .stdout(predicate::str::contains(".gitkeep").not())
        .stdout(predicate::str::contains("3 directories, 6 files"));
}

#[test]
fn test_depth_limit() {
    let dir = TestDir::reference();

    dirtree_cmd()
        .current_dir(dir.path())
        .args(["-L", "1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("some_dir"))
        .stdout(predicate::str::contains("another_dir").not());
}

#[test]
fn test_exclude_regex_and_glob() {
    let dir = TestDir::reference();

    dirtree_cmd()
        .current_dir(dir.path())
        .args(["-x", "another_dir", "-I", "some_dir_2"])
        .assert()
        .success()
        .stdout(predicate::str::contains("another_dir").not())
        .stdout(predicate::str::contains("some_dir_2").not())
        .stdout(predicate::str::contains("1 directories, 4 files"));
}

#[test]
fn test_size_with_depth_is_rejected() {
    let dir = TestDir::reference();

    dirtree_cmd()
        .current_dir(dir.path())
        .args(["-L", "2", "-a", "size,type"])
        .assert()
        .failure()
        .stderr(predicate::str::contains(
            "usage of size attribute with depth option is prohibited",
        ));
}

#[test]
fn test_json_output() {
    let dir = TestDir::reference();

    let output = dirtree_cmd()
        .current_dir(dir.path())
        .args(["--json", "-a", "size,type,extension", "-e", r"\.txt$"])
        .output()
        .expect("Failed to run dirtree");
    assert!(output.status.success());

    let value: serde_json::Value = serde_json::from_slice(&output.stdout).expect("valid JSON");
    assert_eq!(value["type"], "directory");
    assert_eq!(value["size"], 11_536);
    assert_eq!(value["children"].as_array().map(Vec::len), Some(4));
}

#[test]
fn test_size_annotation() {
    let dir = TestDir::reference();

    dirtree_cmd()
        .current_dir(dir.path())
        .args(["-a", "size"])
        .assert()
        .success()
        .stdout(predicate::str::contains("file_b.txt  [2.9K]"));
}

#[test]
fn test_missing_path_fails() {
    let dir = TestDir::new();

    dirtree_cmd()
        .current_dir(dir.path())
        .arg("does_not_exist")
        .assert()
        .failure()
        .stderr(predicate::str::contains("cannot access 'does_not_exist'"));
}

#[test]
fn test_invalid_pattern_fails() {
    let dir = TestDir::new();

    dirtree_cmd()
        .current_dir(dir.path())
        .args(["-x", "("])
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid regex pattern"));
}

#[test]
fn test_unknown_attribute_fails() {
    let dir = TestDir::new();

    dirtree_cmd()
        .current_dir(dir.path())
        .args(["-a", "inode"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown attribute"));
}

#[test]
fn test_log_level_writes_to_stderr() {
    let dir = TestDir::reference();

    dirtree_cmd()
        .current_dir(dir.path())
        .args(["--json", "--log-level", "debug"])
        .assert()
        .success()
        .stderr(predicate::str::contains("tree built"));
}
