//! Integration tests for document storage and sessions.

use sealdoc::document::{read_document, write_document, DocumentSession, Entries, Entry};
use sealdoc::errors::DocumentErrorKind;
use secrecy::SecretString;
use std::error::Error;
use std::fs;
use tempfile::tempdir;

fn secret(value: &str) -> SecretString {
    SecretString::from(value.to_string())
}

fn two_entries() -> Entries {
    let mut entries = Entries::new();
    entries
        .add(
            Entry::new("Почта")
                .with_user("ivan")
                .with_password("пароль-1")
                .with_url("https://mail.example"),
        )
        .expect("add first entry");
    entries
        .add(Entry::new("Bank").with_user("ivan").with_password("p2"))
        .expect("add second entry");
    entries
}

#[test]
fn test_rekey_keeps_both_entries() {
    let dir = tempdir().expect("create temp dir");
    let path = dir.path().join("vault.sdoc");
    write_document(&path, &two_entries(), Some(&secret("1234"))).expect("initial write");

    let mut session = DocumentSession::open(&path, Some(secret("1234"))).expect("open with 1234");
    assert_eq!(session.entries().len(), 2);
    session
        .change_passphrase(secret("4321"))
        .expect("change passphrase");
    drop(session);

    let err = read_document(&path, Some(&secret("1234"))).expect_err("old passphrase rejected");
    assert_eq!(err.kind(), DocumentErrorKind::Authentication);
    assert_eq!(err.to_string(), "Incorrect password or corrupted file");

    let entries = read_document(&path, Some(&secret("4321"))).expect("new passphrase accepted");
    assert_eq!(entries, two_entries());
    assert_eq!(
        entries.find("почта").and_then(|e| e.password.as_deref()),
        Some("пароль-1")
    );
}

#[test]
fn test_plaintext_mode_has_no_header() {
    let dir = tempdir().expect("create temp dir");
    let path = dir.path().join("vault.json");
    write_document(&path, &two_entries(), None).expect("plain write");

    let raw = fs::read_to_string(&path).expect("plain file is UTF-8");
    assert!(raw.trim_start().starts_with('{'));
    assert!(raw.contains("\"Bank\""));
    assert_eq!(read_document(&path, None).expect("plain read"), two_entries());
}

#[test]
fn test_encrypted_file_hides_plaintext() {
    let dir = tempdir().expect("create temp dir");
    let path = dir.path().join("vault.sdoc");
    write_document(&path, &two_entries(), Some(&secret("1234"))).expect("write");

    let raw = fs::read(&path).expect("read raw");
    assert_eq!(&raw[..4], &[0x23, 0x57, 0x79, 0xCF]);
    for needle in [&b"Bank"[..], &b"ivan"[..], &b"mail.example"[..]] {
        assert!(!raw.windows(needle.len()).any(|w| w == needle));
    }
}

#[test]
fn test_truncated_file_reports_format_error() {
    let dir = tempdir().expect("create temp dir");
    let path = dir.path().join("vault.sdoc");
    write_document(&path, &two_entries(), Some(&secret("1234"))).expect("write");

    let raw = fs::read(&path).expect("read raw");
    fs::write(&path, &raw[..10]).expect("truncate");

    let err = read_document(&path, Some(&secret("1234"))).expect_err("truncated file rejected");
    assert_eq!(err.kind(), DocumentErrorKind::Format);
    assert!(err.message().contains("truncated"));
    assert!(err.source().is_some());
}

#[test]
fn test_error_messages_are_single_short_lines() {
    let dir = tempdir().expect("create temp dir");
    let path = dir.path().join("vault.json");
    fs::write(&path, "{\"entries\": [ {\"title\": 42 } ]}\n\nextra").expect("write junk");

    let err = read_document(&path, None).expect_err("junk rejected");
    assert_eq!(err.kind(), DocumentErrorKind::Parse);
    assert!(!err.message().contains('\n'));
    assert!(err.message().chars().count() <= 83);
}

#[test]
fn test_independent_sessions_coexist() {
    let dir = tempdir().expect("create temp dir");
    let first_path = dir.path().join("first.sdoc");
    let second_path = dir.path().join("second.sdoc");

    let mut first = DocumentSession::create(&first_path, Some(secret("one"))).expect("create first");
    let mut second =
        DocumentSession::create(&second_path, Some(secret("two"))).expect("create second");

    first.entries_mut().add(Entry::new("A")).expect("add A");
    second.entries_mut().add(Entry::new("B")).expect("add B");
    first.save().expect("save first");
    second.save().expect("save second");

    assert_eq!(
        read_document(&first_path, Some(&secret("one"))).expect("read first").titles(),
        vec!["A"]
    );
    assert_eq!(
        read_document(&second_path, Some(&secret("two"))).expect("read second").titles(),
        vec!["B"]
    );
}

#[test]
fn test_legacy_document_loads() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("legacy.sdoc");
    fs::write(&path, include_bytes!("fixtures/legacy_v1.sdoc")).unwrap();

    let entries = read_document(&path, Some(&secret("пароль-tpsxuc9w"))).unwrap();
    assert_eq!(entries.len(), 1);
    let entry = entries.find("почта").expect("entry should be found");
    assert_eq!(entry.user.as_deref(), Some("ivan"));
    assert_eq!(entry.password.as_deref(), Some("tpsxuc9w"));
    assert!(entry.url.is_none());
}
