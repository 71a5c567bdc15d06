//! Integration tests for the stash binary

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

fn stash(workspace: &Path, cache_dir: Option<&Path>) -> Command {
    let mut cmd = Command::cargo_bin("stash").unwrap();
    cmd.env_clear()
        .env("STASH_REPOSITORY", "acme/widgets")
        .env("STASH_REF", "main")
        .current_dir(workspace);
    if let Some(dir) = cache_dir {
        cmd.env("STASH_CACHE_DIR", dir);
    }
    cmd
}

fn seed_dist(workspace: &Path) {
    fs::create_dir_all(workspace.join("dist")).unwrap();
    fs::write(workspace.join("dist/app.js"), b"console.log(1)").unwrap();
}

#[test]
fn save_then_restore_round_trips() {
    let cache_dir = TempDir::new().unwrap();
    let producer = TempDir::new().unwrap();
    seed_dist(producer.path());

    stash(producer.path(), Some(cache_dir.path()))
        .args(["save", "--path", "./dist", "--key", "build-v1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("saved cache entry 'build-v1'"));

    let consumer = TempDir::new().unwrap();
    stash(consumer.path(), Some(cache_dir.path()))
        .args(["restore", "--path", "./dist", "--key", "build-v1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("restored cache entry 'build-v1'"));

    assert_eq!(
        fs::read(consumer.path().join("dist/app.js")).unwrap(),
        b"console.log(1)"
    );
}

#[test]
fn restore_miss_exits_successfully() {
    let cache_dir = TempDir::new().unwrap();
    let workspace = TempDir::new().unwrap();

    stash(workspace.path(), Some(cache_dir.path()))
        .args(["restore", "--path", "./dist", "--key", "absent"])
        .assert()
        .success()
        .stdout(predicate::str::contains("cache miss"));
}

#[test]
fn comma_key_is_rejected() {
    let cache_dir = TempDir::new().unwrap();
    let workspace = TempDir::new().unwrap();
    seed_dist(workspace.path());

    stash(workspace.path(), Some(cache_dir.path()))
        .args(["save", "--path", "./dist", "--key", "bad,key"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("comma"));
}

#[test]
fn unconfigured_cache_skips_save() {
    let workspace = TempDir::new().unwrap();
    seed_dist(workspace.path());

    stash(workspace.path(), None)
        .args(["save", "--path", "./dist", "--key", "build-v1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("save skipped"));
}

#[test]
fn lookup_only_reports_presence_without_extracting() {
    let cache_dir = TempDir::new().unwrap();
    let producer = TempDir::new().unwrap();
    seed_dist(producer.path());

    stash(producer.path(), Some(cache_dir.path()))
        .args(["save", "--path", "./dist", "--key", "probe"])
        .assert()
        .success();

    let consumer = TempDir::new().unwrap();
    stash(consumer.path(), Some(cache_dir.path()))
        .args([
            "restore",
            "--path",
            "./dist",
            "--key",
            "probe",
            "--lookup-only",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("cache entry 'probe' exists"));
    assert!(!consumer.path().join("dist").exists());
}

#[test]
fn json_output_is_machine_readable() {
    let cache_dir = TempDir::new().unwrap();
    let workspace = TempDir::new().unwrap();

    let output = stash(workspace.path(), Some(cache_dir.path()))
        .args(["restore", "--path", "./dist", "--key", "absent", "--json"])
        .output()
        .unwrap();
    assert!(output.status.success());
    let parsed: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(parsed["outcome"], "miss");
}

#[test]
fn restore_key_fallback_matches() {
    let cache_dir = TempDir::new().unwrap();
    let producer = TempDir::new().unwrap();
    seed_dist(producer.path());

    stash(producer.path(), Some(cache_dir.path()))
        .args(["save", "--path", "./dist", "--key", "build-old"])
        .assert()
        .success();

    let consumer = TempDir::new().unwrap();
    stash(consumer.path(), Some(cache_dir.path()))
        .args([
            "restore",
            "--path",
            "./dist",
            "--key",
            "build-new",
            "--restore-key",
            "build-old",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("restored cache entry 'build-old'"));
}
