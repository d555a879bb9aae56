//! An open document together with the passphrase that protects it.
//!
//! A [`DocumentSession`] is what an editor front-end holds while the user
//! works: the path, the passphrase (if any), the loaded entries and whether
//! they have unsaved changes. Sessions are plain values; several can be open
//! at once.

use std::path::{Path, PathBuf};

use secrecy::SecretString;
use tracing::{debug, info};

use crate::document::entries::Entries;
use crate::document::store::DocumentStore;
use crate::errors::DocumentProcessError;

/// Tracks one open document.
///
/// # Example
///
/// ```no_run
/// use sealdoc::document::DocumentSession;
/// use secrecy::SecretString;
///
/// let passphrase = SecretString::from("correct horse".to_string());
/// let mut session = DocumentSession::open("vault.sdoc", Some(passphrase))?;
/// println!("{} entries", session.entries().len());
/// session.save()?;
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[derive(Default)]
pub struct DocumentSession {
    path: Option<PathBuf>,
    passphrase: Option<SecretString>,
    entries: Entries,
    modified: bool,
}

impl DocumentSession {
    /// An empty session with no file attached.
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads the document at `path`.
    pub fn open(
        path: impl Into<PathBuf>,
        passphrase: Option<SecretString>,
    ) -> Result<Self, DocumentProcessError> {
        let path = path.into();
        let entries = DocumentStore::new(&path).read(passphrase.as_ref())?;
        debug!(entry_count = entries.len(), "Session opened");
        Ok(Self {
            path: Some(path),
            passphrase,
            entries,
            modified: false,
        })
    }

    /// Starts a new, empty document at `path` and writes it immediately.
    pub fn create(
        path: impl Into<PathBuf>,
        passphrase: Option<SecretString>,
    ) -> Result<Self, DocumentProcessError> {
        let path = path.into();
        let entries = Entries::new();
        DocumentStore::new(&path).write(&entries, passphrase.as_ref())?;
        info!(path = ?path, "Created document");
        Ok(Self {
            path: Some(path),
            passphrase,
            entries,
            modified: false,
        })
    }

    /// Writes the entries back to the current path with the current passphrase.
    pub fn save(&mut self) -> Result<(), DocumentProcessError> {
        let path = self.path.as_deref().ok_or_else(|| {
            DocumentProcessError::from(std::io::Error::new(
                std::io::ErrorKind::NotFound,
                "No document path set",
            ))
        })?;
        DocumentStore::new(path).write(&self.entries, self.passphrase.as_ref())?;
        self.modified = false;
        Ok(())
    }

    /// Writes the entries to `path` under `passphrase` and makes both current.
    ///
    /// Passing the same path with a different passphrase re-keys the file;
    /// passing `None` stores it as plaintext.
    pub fn save_as(
        &mut self,
        path: impl Into<PathBuf>,
        passphrase: Option<SecretString>,
    ) -> Result<(), DocumentProcessError> {
        let path = path.into();
        DocumentStore::new(&path).write(&self.entries, passphrase.as_ref())?;
        self.path = Some(path);
        self.passphrase = passphrase;
        self.modified = false;
        Ok(())
    }

    /// Re-encrypts the current file under `passphrase`.
    pub fn change_passphrase(
        &mut self,
        passphrase: SecretString,
    ) -> Result<(), DocumentProcessError> {
        let path = self.path.clone().ok_or_else(|| {
            DocumentProcessError::from(std::io::Error::new(
                std::io::ErrorKind::NotFound,
                "No document path set",
            ))
        })?;
        self.save_as(path, Some(passphrase))?;
        info!("Passphrase changed");
        Ok(())
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    pub fn entries(&self) -> &Entries {
        &self.entries
    }

    /// Mutable access to the entries; marks the session as modified.
    pub fn entries_mut(&mut self) -> &mut Entries {
        self.modified = true;
        &mut self.entries
    }

    pub fn is_modified(&self) -> bool {
        self.modified
    }

    pub fn is_encrypted(&self) -> bool {
        self.passphrase.is_some()
    }

    /// Forgets the document and the passphrase.
    pub fn clear(&mut self) {
        self.path = None;
        self.passphrase = None;
        self.entries = Entries::new();
        self.modified = false;
        debug!("Session cleared");
    }
}

impl Drop for DocumentSession {
    fn drop(&mut self) {
        if self.modified {
            debug!("Session dropped with unsaved changes");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::entries::Entry;
    use crate::errors::DocumentErrorKind;
    use tempfile::tempdir;

    fn secret(value: &str) -> SecretString {
        SecretString::from(value.to_string())
    }

    #[test]
    fn test_new_session_is_empty() {
        let session = DocumentSession::new();
        assert!(session.path().is_none());
        assert!(session.entries().is_empty());
        assert!(!session.is_modified());
        assert!(!session.is_encrypted());
    }

    #[test]
    fn test_entries_mut_marks_modified() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("vault.sdoc");
        let mut session = DocumentSession::create(&path, Some(secret("pw"))).unwrap();
        assert!(!session.is_modified());

        session.entries_mut().add(Entry::new("Mail")).unwrap();
        assert!(session.is_modified());

        session.save().unwrap();
        assert!(!session.is_modified());

        let reopened = DocumentSession::open(&path, Some(secret("pw"))).unwrap();
        assert!(reopened.entries().find("mail").is_some());
    }

    #[test]
    fn test_save_without_path_fails() {
        let mut session = DocumentSession::new();
        let err = session.save().unwrap_err();
        assert_eq!(err.kind(), DocumentErrorKind::Io);
    }

    #[test]
    fn test_save_as_plaintext_then_encrypted() {
        let dir = tempdir().unwrap();
        let plain = dir.path().join("vault.json");
        let sealed = dir.path().join("vault.sdoc");

        let mut session = DocumentSession::create(&plain, None).unwrap();
        session.entries_mut().add(Entry::new("Bank")).unwrap();
        session.save().unwrap();
        assert!(!session.is_encrypted());

        session.save_as(&sealed, Some(secret("pw"))).unwrap();
        assert!(session.is_encrypted());
        assert_eq!(session.path(), Some(sealed.as_path()));

        let reopened = DocumentSession::open(&sealed, Some(secret("pw"))).unwrap();
        assert_eq!(reopened.entries().titles(), vec!["Bank"]);
    }

    #[test]
    fn test_clear_forgets_everything() {
        let dir = tempdir().unwrap();
        let mut session =
            DocumentSession::create(dir.path().join("vault.sdoc"), Some(secret("pw"))).unwrap();
        session.entries_mut().add(Entry::new("Mail")).unwrap();

        session.clear();
        assert!(session.path().is_none());
        assert!(!session.is_encrypted());
        assert!(session.entries().is_empty());
        assert!(!session.is_modified());
    }
}
