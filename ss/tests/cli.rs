//! End-to-end tests for the `ss` binary

use assert_cmd::Command;
use predicates::prelude::*;
use serial_test::serial;
use tempfile::tempdir;

use sessionstore::{Session, SessionStore};

/// Write a config file pointing the store at `store_dir`
fn write_config(dir: &std::path::Path, store_dir: &std::path::Path) -> std::path::PathBuf {
    let config_path = dir.join("config.yml");
    std::fs::write(
        &config_path,
        format!("store_path: {}\n", store_dir.display()),
    )
    .unwrap();
    config_path
}

#[test]
#[serial]
fn test_list_empty_store() {
    let temp = tempdir().unwrap();
    let config = write_config(temp.path(), &temp.path().join("store"));

    Command::cargo_bin("ss")
        .unwrap()
        .args(["--config", config.to_str().unwrap(), "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No sessions found"));
}

#[test]
#[serial]
fn test_list_shows_saved_session() {
    let temp = tempdir().unwrap();
    let store_dir = temp.path().join("store");
    let config = write_config(temp.path(), &store_dir);

    let store = SessionStore::open(&store_dir).unwrap();
    let mut session = Session::create(Some("build a blog"));
    session.advance_turn();
    store.save(&session).unwrap();

    Command::cargo_bin("ss")
        .unwrap()
        .args(["--config", config.to_str().unwrap(), "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains(session.id()));
}

#[test]
#[serial]
fn test_summary_of_missing_session_fails() {
    let temp = tempdir().unwrap();
    let config = write_config(temp.path(), &temp.path().join("store"));

    Command::cargo_bin("ss")
        .unwrap()
        .args(["--config", config.to_str().unwrap(), "summary", "no-such-id"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("no-such-id"));
}

#[test]
#[serial]
fn test_show_dumps_record() {
    let temp = tempdir().unwrap();
    let store_dir = temp.path().join("store");
    let config = write_config(temp.path(), &store_dir);

    let store = SessionStore::open(&store_dir).unwrap();
    let session = Session::create(None);
    store.save(&session).unwrap();

    Command::cargo_bin("ss")
        .unwrap()
        .args(["--config", config.to_str().unwrap(), "show", session.id()])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"current_conversation_turn\": 0"));
}

#[test]
#[serial]
fn test_delete_removes_session() {
    let temp = tempdir().unwrap();
    let store_dir = temp.path().join("store");
    let config = write_config(temp.path(), &store_dir);

    let store = SessionStore::open(&store_dir).unwrap();
    let session = Session::create(None);
    store.save(&session).unwrap();

    Command::cargo_bin("ss")
        .unwrap()
        .args(["--config", config.to_str().unwrap(), "delete", session.id()])
        .assert()
        .success()
        .stdout(predicate::str::contains("Deleted session"));

    assert!(store.list().unwrap().is_empty());
}
