//! End-to-end tests for the `sealdoc` binary.


use predicates::prelude::*;
use std::fs;
use tempfile::tempdir;
use test_helpers::{base_sealdoc_command, TEST_PASSPHRASE};

#[test]
fn test_cli_requires_subcommand() {
    let dir = tempdir().unwrap();
    base_sealdoc_command(&dir.path().join("vault.sdoc"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("Usage"));
}

#[test]
fn test_init_add_list_show() {
    let dir = tempdir().unwrap();
    let document = dir.path().join("store").join("vault.sdoc");

    base_sealdoc_command(&document)
        .arg("init")
        .assert()
        .success()
        .stdout(predicate::str::contains("Created"));
    assert!(document.exists());

    base_sealdoc_command(&document)
        .args(["add", "--title", "Mail", "--user", "alice"])
        .env("SEALDOC_ENTRY_PASSWORD", "hunter2")
        .assert()
        .success()
        .stdout(predicate::str::contains("Added 'Mail' (1 entries)"));

    base_sealdoc_command(&document)
        .args(["add", "--title", "Bank"])
        .assert()
        .success();

    base_sealdoc_command(&document)
        .arg("list")
        .assert()
        .success()
        .stdout("Bank\nMail\n");

    base_sealdoc_command(&document)
        .args(["show", "mail"])
        .assert()
        .success()
        .stdout(predicate::str::contains("User:     alice"))
        .stdout(predicate::str::contains("hunter2").not());

    base_sealdoc_command(&document)
        .args(["show", "mail", "--reveal"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Password: hunter2"));
}

#[test]
fn test_init_twice_fails() {
    let dir = tempdir().unwrap();
    let document = dir.path().join("vault.sdoc");

    base_sealdoc_command(&document).arg("init").assert().success();
    base_sealdoc_command(&document)
        .arg("init")
        .assert()
        .failure()
        .stderr(predicate::str::contains("already exists"));
}

#[test]
fn test_wrong_passphrase_reports_authentication_failure() {
    let dir = tempdir().unwrap();
    let document = dir.path().join("vault.sdoc");
    base_sealdoc_command(&document).arg("init").assert().success();

    base_sealdoc_command(&document)
        .arg("list")
        .env("SEALDOC_PASSPHRASE", "not-the-passphrase")
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Incorrect password or corrupted file"))
        .stderr(predicate::str::contains("Check the passphrase"));
}

#[test]
fn test_rekey_flow() {
    let dir = tempdir().unwrap();
    let document = dir.path().join("vault.sdoc");
    base_sealdoc_command(&document).arg("init").assert().success();
    base_sealdoc_command(&document)
        .args(["add", "--title", "Mail"])
        .assert()
        .success();

    base_sealdoc_command(&document)
        .arg("rekey")
        .env("SEALDOC_NEW_PASSPHRASE", "fresh-passphrase")
        .assert()
        .success()
        .stdout(predicate::str::contains("Passphrase changed (1 entries)"));

    base_sealdoc_command(&document)
        .arg("list")
        .assert()
        .failure();
    base_sealdoc_command(&document)
        .arg("list")
        .env("SEALDOC_PASSPHRASE", "fresh-passphrase")
        .assert()
        .success()
        .stdout("Mail\n");
}

#[test]
fn test_export_import_and_plain_mode() {
    let dir = tempdir().unwrap();
    let document = dir.path().join("vault.sdoc");
    let exported = dir.path().join("plain.json");
    let copy = dir.path().join("copy.sdoc");

    base_sealdoc_command(&document).arg("init").assert().success();
    base_sealdoc_command(&document)
        .args(["add", "--title", "Mail", "--notes", "work"])
        .assert()
        .success();

    base_sealdoc_command(&document)
        .args(["export", "--output"])
        .arg(&exported)
        .assert()
        .success()
        .stdout(predicate::str::contains("Exported 1 entries"));
    let text = fs::read_to_string(&exported).unwrap();
    assert!(text.contains("\"Mail\""));

    base_sealdoc_command(&exported)
        .args(["--plain", "list"])
        .assert()
        .success()
        .stdout("Mail\n");

    base_sealdoc_command(&copy)
        .args(["import", "--input"])
        .arg(&exported)
        .assert()
        .success()
        .stdout(predicate::str::contains("Imported 1 entries"));

    let raw = fs::read(&copy).unwrap();
    assert_eq!(&raw[..4], &[0x23, 0x57, 0x79, 0xCF]);
    base_sealdoc_command(&copy)
        .args(["show", "Mail"])
        .env("SEALDOC_PASSPHRASE", TEST_PASSPHRASE)
        .assert()
        .success()
        .stdout(predicate::str::contains("Notes:    work"));
}

#[test]
fn test_inspect_needs_no_passphrase() {
    let dir = tempdir().unwrap();
    let document = dir.path().join("vault.sdoc");
    base_sealdoc_command(&document).arg("init").assert().success();

    base_sealdoc_command(&document)
        .arg("inspect")
        .env_remove("SEALDOC_PASSPHRASE")
        .assert()
        .success()
        .stdout(predicate::str::contains("23 57 79 cf"))
        .stdout(predicate::str::contains("65535 iterations"));
}

#[test]
fn test_json_logs_on_stderr() {
    let dir = tempdir().unwrap();
    let document = dir.path().join("vault.sdoc");

    base_sealdoc_command(&document)
        .args(["--log-format", "json", "init"])
        .assert()
        .success()
        .stdout(predicate::str::contains("{").not())
        .stderr(predicate::str::contains("\"level\":\"INFO\""));
}

#[test]
fn test_missing_document_is_error() {
    let dir = tempdir().unwrap();
    base_sealdoc_command(&dir.path().join("absent.sdoc"))
        .arg("list")
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Error:"));
}
