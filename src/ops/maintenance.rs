//! Whole-document operations: init, rekey, export and import.

use std::path::Path;

use secrecy::SecretString;
use tracing::{info, warn};

use crate::document::{read_document, write_document, DocumentSession};
use crate::errors::{AppError, AppResult};
use crate::ops::ensure_parent_directory;

/// Creates a new, empty document at `path`.
///
/// # Errors
///
/// Returns `AppError::Usage` if a file already exists there; `init` never
/// overwrites.
pub fn init_document(path: &Path, passphrase: Option<&SecretString>) -> AppResult<()> {
    if path.exists() {
        return Err(AppError::Usage(format!(
            "A document already exists at {}",
            path.display()
        )));
    }
    ensure_parent_directory(path)?;
    DocumentSession::create(path, passphrase.cloned())?;
    if passphrase.is_none() {
        warn!("Document created without encryption");
    }
    Ok(())
}

/// Re-encrypts the document under `new_passphrase`. Returns the entry count.
///
/// The file is replaced atomically, so a failure leaves it readable with the
/// old passphrase.
pub fn rekey_document(
    path: &Path,
    old_passphrase: &SecretString,
    new_passphrase: SecretString,
) -> AppResult<usize> {
    let mut session = DocumentSession::open(path, Some(old_passphrase.clone()))?;
    session.change_passphrase(new_passphrase)?;
    Ok(session.entries().len())
}

/// Writes a plaintext copy of the document to `output`. Returns the entry count.
pub fn export_document(
    path: &Path,
    passphrase: Option<&SecretString>,
    output: &Path,
) -> AppResult<usize> {
    if same_file(path, output) {
        return Err(AppError::Usage(
            "Export target must differ from the document file".to_string(),
        ));
    }
    let entries = read_document(path, passphrase)?;
    ensure_parent_directory(output)?;
    write_document(output, &entries, None)?;
    warn!("Exported entries without encryption");
    Ok(entries.len())
}

/// Stores the plaintext document at `input` into `path`, encrypted when a
/// passphrase is given. Returns the entry count.
pub fn import_document(
    input: &Path,
    path: &Path,
    passphrase: Option<&SecretString>,
) -> AppResult<usize> {
    if same_file(input, path) {
        return Err(AppError::Usage(
            "Import source must differ from the document file".to_string(),
        ));
    }
    let entries = read_document(input, None)?;
    ensure_parent_directory(path)?;
    write_document(path, &entries, passphrase)?;
    info!(entry_count = entries.len(), "Imported entries");
    Ok(entries.len())
}

fn same_file(a: &Path, b: &Path) -> bool {
    match (a.canonicalize(), b.canonicalize()) {
        (Ok(a), Ok(b)) => a == b,
        _ => a == b,
    }
}
