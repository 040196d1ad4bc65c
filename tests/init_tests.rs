//! Integration tests for init and config commands

#![allow(deprecated)]

use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

mod common;
use common::notepub_cmd;

#[test]
fn test_init_creates_config() {
    let temp = TempDir::new().unwrap();

    notepub_cmd()
        .arg("init")
        .arg(temp.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("Initialized notepub collection"));

    let config_path = temp.path().join(".notepub/config.toml");
    assert!(config_path.exists());

    let content = fs::read_to_string(config_path).unwrap();
    assert!(content.contains("[favorites]"));
    assert!(content.contains("columns = 4"));
    assert!(content.contains("tag_separator = \",\""));
}

#[test]
fn test_init_already_initialized_fails() {
    let temp = TempDir::new().unwrap();

    notepub_cmd().arg("init").arg(temp.path()).assert().success();
    notepub_cmd()
        .arg("init")
        .arg(temp.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("already initialized"));
}

#[test]
fn test_config_get_and_set() {
    let temp = TempDir::new().unwrap();
    notepub_cmd().arg("init").arg(temp.path()).assert().success();

    notepub_cmd()
        .current_dir(temp.path())
        .args(["config", "favorites.columns", "3"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Set favorites.columns = 3"));

    notepub_cmd()
        .current_dir(temp.path())
        .args(["config", "favorites.columns"])
        .assert()
        .success()
        .stdout("3\n");
}

#[test]
fn test_config_rejects_invalid_value() {
    let temp = TempDir::new().unwrap();
    notepub_cmd().arg("init").arg(temp.path()).assert().success();

    notepub_cmd()
        .current_dir(temp.path())
        .args(["config", "favorites.columns", "7"])
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("Invalid columns value"));
}

#[test]
fn test_config_list() {
    let temp = TempDir::new().unwrap();
    notepub_cmd().arg("init").arg(temp.path()).assert().success();

    notepub_cmd()
        .current_dir(temp.path())
        .args(["config", "--list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("favorites.tags"))
        .stdout(predicate::str::contains("publish.index_file"));
}

#[test]
fn test_config_outside_collection() {
    let temp = TempDir::new().unwrap();

    notepub_cmd()
        .current_dir(temp.path())
        .args(["config", "--list"])
        .assert()
        .failure()
        .code(2)
        .stderr(predicate::str::contains("notepub init"));
}

#[test]
fn test_notepub_root_env_var() {
    let temp = TempDir::new().unwrap();
    let elsewhere = TempDir::new().unwrap();
    notepub_cmd().arg("init").arg(temp.path()).assert().success();

    notepub_cmd()
        .current_dir(elsewhere.path())
        .env("NOTEPUB_ROOT", temp.path())
        .args(["config", "publish.title"])
        .assert()
        .success()
        .stdout("Notes\n");
}
