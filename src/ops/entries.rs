//! Listing, showing, adding and removing entries.

use std::fmt;
use std::path::Path;

use secrecy::SecretString;
use tracing::info;
use zeroize::Zeroizing;

use crate::constants::MASKED_PASSWORD;
use crate::document::{DocumentSession, Entry};
use crate::errors::{AppResult, EntryError};

/// Printable view of one entry.
///
/// The password is masked unless the view was built with `reveal`.
#[derive(Clone, PartialEq, Eq)]
pub struct EntryView {
    pub title: String,
    pub url: Option<String>,
    pub user: Option<String>,
    pub password: Option<Zeroizing<String>>,
    pub notes: Option<String>,
}

impl EntryView {
    fn from_entry(entry: &Entry, reveal: bool) -> Self {
        let password = entry.password.as_ref().map(|password| {
            if reveal {
                Zeroizing::new(password.clone())
            } else {
                Zeroizing::new(MASKED_PASSWORD.to_string())
            }
        });
        Self {
            title: entry.title().to_string(),
            url: entry.url.clone(),
            user: entry.user.clone(),
            password,
            notes: entry.notes.clone(),
        }
    }
}

impl fmt::Debug for EntryView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EntryView")
            .field("title", &self.title)
            .field("url", &self.url)
            .field("user", &self.user)
            .field("password", &self.password.as_ref().map(|_| MASKED_PASSWORD))
            .field("notes", &self.notes)
            .finish()
    }
}

impl fmt::Display for EntryView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Title:    {}", self.title)?;
        let fields = [
            ("URL", self.url.as_deref()),
            ("User", self.user.as_deref()),
            ("Password", self.password.as_ref().map(|p| p.as_str())),
            ("Notes", self.notes.as_deref()),
        ];
        for (label, value) in fields {
            if let Some(value) = value {
                writeln!(f, "{:<9} {}", format!("{}:", label), value)?;
            }
        }
        Ok(())
    }
}

/// Titles of every entry, sorted.
pub fn list_entries(path: &Path, passphrase: Option<&SecretString>) -> AppResult<Vec<String>> {
    let session = DocumentSession::open(path, passphrase.cloned())?;
    Ok(session.entries().titles())
}

/// Looks up one entry by title.
///
/// # Errors
///
/// Returns `EntryError::NotFound` if no entry has that title.
pub fn show_entry(
    path: &Path,
    passphrase: Option<&SecretString>,
    title: &str,
    reveal: bool,
) -> AppResult<EntryView> {
    let session = DocumentSession::open(path, passphrase.cloned())?;
    let entry = session
        .entries()
        .find(title)
        .ok_or_else(|| EntryError::NotFound(title.to_string()))?;
    Ok(EntryView::from_entry(entry, reveal))
}

/// Adds `entry` and saves the document. Returns the new entry count.
pub fn add_entry(path: &Path, passphrase: Option<&SecretString>, entry: Entry) -> AppResult<usize> {
    let mut session = DocumentSession::open(path, passphrase.cloned())?;
    session.entries_mut().add(entry)?;
    session.save()?;
    let count = session.entries().len();
    info!(entry_count = count, "Entry added");
    Ok(count)
}

/// Removes the entry titled `title` and saves the document.
pub fn remove_entry(
    path: &Path,
    passphrase: Option<&SecretString>,
    title: &str,
) -> AppResult<usize> {
    let mut session = DocumentSession::open(path, passphrase.cloned())?;
    session.entries_mut().remove(title)?;
    session.save()?;
    let count = session.entries().len();
    info!(entry_count = count, "Entry removed");
    Ok(count)
}
