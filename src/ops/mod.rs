//! High-level operations behind the `sealdoc` commands.
//!
//! Each operation takes the document path and an optional passphrase
//! (`None` means plaintext mode), does its work through the document layer
//! and returns data for the caller to print. Nothing here prompts or writes to
//! stdout.

pub mod entries;
pub mod inspect;
pub mod maintenance;

use std::fs;
use std::path::Path;

use tracing::debug;

use crate::errors::{AppError, AppResult};

#[cfg(unix)]
use crate::constants::DEFAULT_DIR_PERMISSIONS;
#[cfg(unix)]
use std::fs::Permissions;
#[cfg(unix)]
use std::os::unix::fs::PermissionsExt;

pub use entries::{add_entry, list_entries, remove_entry, show_entry, EntryView};
pub use inspect::{inspect_document, ContainerSummary};
pub use maintenance::{export_document, import_document, init_document, rekey_document};

/// Creates the directory that will hold `document_path`, owner-only on Unix.
///
/// Existing directories are left as they are.
pub fn ensure_parent_directory(document_path: &Path) -> AppResult<()> {
    let Some(parent) = document_path.parent() else {
        return Ok(());
    };
    if parent.as_os_str().is_empty() || parent.exists() {
        return Ok(());
    }

    fs::create_dir_all(parent).map_err(|e| {
        AppError::Io(std::io::Error::new(
            e.kind(),
            format!("Failed to create document directory: {}", e),
        ))
    })?;

    #[cfg(unix)]
    {
        fs::set_permissions(parent, Permissions::from_mode(DEFAULT_DIR_PERMISSIONS)).map_err(
            |e| {
                AppError::Io(std::io::Error::new(
                    e.kind(),
                    format!("Failed to set permissions on document directory: {}", e),
                ))
            },
        )?;
        debug!("Set 0o700 permissions on document directory");
    }
    #[cfg(not(unix))]
    debug!("Created document directory");
    Ok(())
}
