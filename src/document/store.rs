//! Reads and writes whole documents on disk.
//!
//! A [`DocumentStore`] ties a file path to a [`PayloadFormat`]. With a
//! passphrase the payload goes through the container codec; without one it is
//! stored as pretty-printed plaintext with no header. Every failure is reported
//! as a [`DocumentProcessError`].

use std::fs::File;
use std::io::{BufReader, BufWriter, Read, Write};
use std::path::{Path, PathBuf};

use secrecy::SecretString;
use tempfile::NamedTempFile;
use tracing::{debug, info};
use zeroize::Zeroizing;

use crate::crypto::{ContainerHeader, DecryptingSource, EncryptingSink};
use crate::document::entries::Entries;
use crate::document::payload::{JsonPayload, PayloadFormat};
use crate::errors::DocumentProcessError;

/// A document file and the payload format stored in it.
#[derive(Debug, Clone)]
pub struct DocumentStore<F: PayloadFormat = JsonPayload> {
    path: PathBuf,
    format: F,
}

impl DocumentStore<JsonPayload> {
    /// Creates a store for a JSON entry document at `path`.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self::with_format(path, JsonPayload)
    }
}

impl<F: PayloadFormat> DocumentStore<F> {
    /// Creates a store using a custom payload format.
    pub fn with_format(path: impl Into<PathBuf>, format: F) -> Self {
        Self {
            path: path.into(),
            format,
        }
    }

    /// Path of the document file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Loads the document.
    ///
    /// `None` reads the file as plaintext; `Some` decrypts it first. The
    /// plaintext is only handed to the payload format after the container
    /// has been fully authenticated.
    ///
    /// # Errors
    ///
    /// Returns a `DocumentProcessError` whose kind tells a missing file
    /// (`Io`), a foreign or damaged file (`Format`), a wrong passphrase
    /// (`Authentication`) and an unparsable payload (`Parse`) apart.
    pub fn read(
        &self,
        passphrase: Option<&SecretString>,
    ) -> Result<F::Document, DocumentProcessError> {
        debug!(path = ?self.path, encrypted = passphrase.is_some(), "Reading document");
        let mut reader = BufReader::new(File::open(&self.path)?);

        let payload = match passphrase {
            None => {
                let mut buf = Zeroizing::new(Vec::new());
                reader.read_to_end(&mut buf)?;
                buf
            }
            Some(passphrase) => {
                let mut source = DecryptingSource::open(reader, passphrase)?;
                let plaintext = source.read_all()?;
                source.close();
                plaintext
            }
        };

        let document = self
            .format
            .read_from(&mut payload.as_slice())
            .map_err(DocumentProcessError::payload)?;
        info!(path = ?self.path, "Loaded document");
        Ok(document)
    }

    /// Stores `document`, replacing any existing file atomically.
    ///
    /// The output is written to a temporary file next to the destination,
    /// synced and then renamed over it, so a failure at any point leaves the
    /// previous file as it was. The parent directory must already exist.
    pub fn write(
        &self,
        document: &F::Document,
        passphrase: Option<&SecretString>,
    ) -> Result<(), DocumentProcessError> {
        let directory = match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };
        let mut temp = NamedTempFile::new_in(directory)?;

        {
            let mut writer = BufWriter::new(temp.as_file_mut());
            match passphrase {
                None => self
                    .format
                    .write_to(document, &mut writer, true)
                    .map_err(DocumentProcessError::payload)?,
                Some(passphrase) => {
                    let mut sink = EncryptingSink::open(&mut writer, passphrase)?;
                    self.format
                        .write_to(document, &mut sink, false)
                        .map_err(DocumentProcessError::payload)?;
                    sink.finish()?;
                }
            }
            writer.flush()?;
        }

        temp.as_file().sync_all()?;
        temp.persist(&self.path)
            .map_err(|e| DocumentProcessError::from(e.error))?;
        info!(path = ?self.path, encrypted = passphrase.is_some(), "Saved document");
        Ok(())
    }

    /// Reads only the container header, without needing the passphrase.
    pub fn read_header(&self) -> Result<ContainerHeader, DocumentProcessError> {
        let mut reader = BufReader::new(File::open(&self.path)?);
        Ok(ContainerHeader::read_from(&mut reader)?)
    }
}

/// Loads the JSON entry document at `path`.
pub fn read_document(
    path: &Path,
    passphrase: Option<&SecretString>,
) -> Result<Entries, DocumentProcessError> {
    DocumentStore::new(path).read(passphrase)
}

/// Stores `entries` as a JSON entry document at `path`.
pub fn write_document(
    path: &Path,
    entries: &Entries,
    passphrase: Option<&SecretString>,
) -> Result<(), DocumentProcessError> {
    DocumentStore::new(path).write(entries, passphrase)
}
