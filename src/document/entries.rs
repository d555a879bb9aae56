//! The password-entry list carried inside a container.

use std::fmt;

use serde::{Deserialize, Serialize};
use zeroize::{Zeroize, ZeroizeOnDrop};

use crate::constants::REDACTED_PLACEHOLDER;
use crate::errors::EntryError;

/// A single stored credential. Every field is optional free text.
///
/// Field contents are zeroized when the entry is dropped and the password
/// never appears in `Debug` output.
#[derive(Clone, Default, PartialEq, Eq, Serialize, Deserialize, Zeroize, ZeroizeOnDrop)]
pub struct Entry {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl Entry {
    /// Creates an entry with only a title set.
    pub fn new(title: impl Into<String>) -> Self {
        let mut entry = Self::default();
        entry.title = non_empty(title.into());
        entry
    }

    pub fn with_url(mut self, url: impl Into<String>) -> Self {
        self.url = non_empty(url.into());
        self
    }

    pub fn with_user(mut self, user: impl Into<String>) -> Self {
        self.user = non_empty(user.into());
        self
    }

    pub fn with_password(mut self, password: impl Into<String>) -> Self {
        self.password = non_empty(password.into());
        self
    }

    pub fn with_notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = non_empty(notes.into());
        self
    }

    /// The title, or an empty string for untitled entries.
    pub fn title(&self) -> &str {
        self.title.as_deref().unwrap_or("")
    }

    fn has_title(&self, title: &str) -> bool {
        self.title
            .as_deref()
            .is_some_and(|t| t.trim().to_lowercase() == title.trim().to_lowercase())
    }
}

impl fmt::Debug for Entry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Entry")
            .field("title", &self.title)
            .field("url", &self.url)
            .field("user", &self.user)
            .field(
                "password",
                &self.password.as_ref().map(|_| REDACTED_PLACEHOLDER),
            )
            .field("notes", &self.notes)
            .finish()
    }
}

// Blank form fields are stored as absent rather than as empty strings.
fn non_empty(value: String) -> Option<String> {
    if value.is_empty() {
        None
    } else {
        Some(value)
    }
}

/// The whole document: an ordered list of entries.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Entries {
    #[serde(default)]
    entries: Vec<Entry>,
}

impl Entries {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Entry> {
        self.entries.iter()
    }

    /// Finds an entry by title, ignoring case.
    pub fn find(&self, title: &str) -> Option<&Entry> {
        self.entries.iter().find(|e| e.has_title(title))
    }

    /// Appends an entry.
    ///
    /// # Errors
    ///
    /// - `EntryError::MissingTitle` if the title is absent or blank
    /// - `EntryError::DuplicateTitle` if another entry has the same title
    pub fn add(&mut self, entry: Entry) -> Result<(), EntryError> {
        let title = entry.title().trim();
        if title.is_empty() {
            return Err(EntryError::MissingTitle);
        }
        if self.find(title).is_some() {
            return Err(EntryError::DuplicateTitle(title.to_string()));
        }
        self.entries.push(entry);
        Ok(())
    }

    /// Removes the entry with the given title and returns it.
    pub fn remove(&mut self, title: &str) -> Result<Entry, EntryError> {
        let index = self
            .entries
            .iter()
            .position(|e| e.has_title(title))
            .ok_or_else(|| EntryError::NotFound(title.to_string()))?;
        Ok(self.entries.remove(index))
    }

    /// All titles, sorted case-insensitively.
    pub fn titles(&self) -> Vec<String> {
        let mut titles: Vec<String> = self.entries.iter().map(|e| e.title().to_string()).collect();
        titles.sort_by_key(|t| t.to_lowercase());
        titles
    }
}
