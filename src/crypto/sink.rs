//! Encrypting sink: compress, then seal with AES-256-GCM.
//!
//! The header goes out as soon as the sink is opened. Plaintext written to the
//! sink is gzip-compressed into an in-memory buffer; `close` seals the whole
//! buffer in one AES-GCM operation and appends ciphertext and tag to the
//! destination. GCM carries a single tag for the whole body, so nothing after
//! the header reaches the destination before `close`.

use std::io::{self, Write};

use aes_gcm::aead::{Aead, KeyInit};
use aes_gcm::{Aes256Gcm, Nonce};
use flate2::write::GzEncoder;
use flate2::Compression;
use secrecy::SecretString;
use tracing::{debug, warn};
use zeroize::{Zeroize, Zeroizing};

use crate::crypto::header::ContainerHeader;
use crate::crypto::key::derive_key;
use crate::crypto::profile::{CipherProfile, NONCE_LEN};
use crate::errors::CodecError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SinkState {
    Open,
    Closed,
    Failed,
}

/// A `Write` adapter that produces a complete container on `close`.
///
/// # Example
///
/// ```
/// use sealdoc::crypto::{DecryptingSource, EncryptingSink};
/// use secrecy::SecretString;
/// use std::io::Write;
///
/// let passphrase = SecretString::from("correct horse".to_string());
/// let mut sink = EncryptingSink::open(Vec::new(), &passphrase)?;
/// sink.write_all(b"hello, container")?;
/// let container = sink.finish()?;
///
/// let mut source = DecryptingSource::open(container.as_slice(), &passphrase)?;
/// assert_eq!(source.read_all()?.as_slice(), b"hello, container");
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
pub struct EncryptingSink<W: Write> {
    destination: Option<W>,
    compressor: Option<GzEncoder<Vec<u8>>>,
    cipher: Aes256Gcm,
    nonce: [u8; NONCE_LEN],
    state: SinkState,
}

impl<W: Write> EncryptingSink<W> {
    /// Opens a sink using the current cipher profile.
    ///
    /// Generates salt and nonce, derives the key and writes the header to
    /// `destination` before returning.
    ///
    /// # Errors
    ///
    /// - `CodecError::RandomSource` if no secure random source is available
    /// - `CodecError::KeyDerivation` if the key or cipher cannot be set up
    /// - `CodecError::Io` if the header cannot be written
    pub fn open(destination: W, passphrase: &SecretString) -> Result<Self, CodecError> {
        Self::open_with_profile(destination, passphrase, CipherProfile::current())
    }

    /// Opens a sink for an explicit profile.
    pub fn open_with_profile(
        mut destination: W,
        passphrase: &SecretString,
        profile: &'static CipherProfile,
    ) -> Result<Self, CodecError> {
        let header = ContainerHeader::generate(profile)?;
        let key = derive_key(passphrase, header.salt(), profile)?;
        let cipher = Aes256Gcm::new_from_slice(key.as_bytes())
            .map_err(|e| CodecError::KeyDerivation(format!("Cipher rejected key: {}", e)))?;
        drop(key);

        header.write_to(&mut destination)?;
        debug!(
            salt_len = header.salt().len(),
            nonce_len = header.nonce().len(),
            "Wrote container header"
        );

        Ok(Self {
            destination: Some(destination),
            compressor: Some(GzEncoder::new(Vec::new(), Compression::default())),
            cipher,
            nonce: *header.nonce(),
            state: SinkState::Open,
        })
    }

    /// Finishes the container and releases the destination.
    ///
    /// Safe to call more than once. After a successful close further calls do
    /// nothing; after a failed one they keep failing.
    ///
    /// # Errors
    ///
    /// Returns `CodecError::Io` if the compressed body cannot be finished or
    /// the ciphertext cannot be written to the destination, or if an earlier
    /// close already failed.
    pub fn close(&mut self) -> Result<(), CodecError> {
        let result = self.seal();
        self.destination = None;
        result
    }

    /// Finishes the container and hands the destination back.
    ///
    /// # Errors
    ///
    /// Same as [`close`](Self::close), plus an I/O error if the sink was
    /// already closed.
    pub fn finish(mut self) -> Result<W, CodecError> {
        if self.state != SinkState::Open {
            return Err(CodecError::Io(closed_error()));
        }
        self.seal()?;
        self.destination
            .take()
            .ok_or_else(|| CodecError::Io(closed_error()))
    }

    /// True once the container has been sealed or the sink has failed.
    pub fn is_closed(&self) -> bool {
        self.state != SinkState::Open
    }

    fn seal(&mut self) -> Result<(), CodecError> {
        let Some(compressor) = self.compressor.take() else {
            return match self.state {
                SinkState::Failed => Err(CodecError::Io(failed_error())),
                _ => Ok(()),
            };
        };
        self.state = SinkState::Failed;

        let compressed = Zeroizing::new(compressor.finish()?);
        let ciphertext = self
            .cipher
            .encrypt(Nonce::from_slice(&self.nonce), compressed.as_slice())
            .map_err(|_| {
                CodecError::Io(io::Error::new(
                    io::ErrorKind::InvalidInput,
                    "payload exceeds AES-GCM message limits",
                ))
            })?;

        let destination = self
            .destination
            .as_mut()
            .ok_or_else(|| CodecError::Io(closed_error()))?;
        destination.write_all(&ciphertext)?;
        destination.flush()?;

        self.state = SinkState::Closed;
        debug!(
            compressed_len = compressed.len(),
            ciphertext_len = ciphertext.len(),
            "Sealed container body"
        );
        Ok(())
    }
}

impl<W: Write> Write for EncryptingSink<W> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        match self.compressor.as_mut() {
            Some(compressor) => compressor.write(buf),
            None => Err(closed_error()),
        }
    }

    /// Flushes the compression stage only; ciphertext is emitted on close.
    fn flush(&mut self) -> io::Result<()> {
        match self.compressor.as_mut() {
            Some(compressor) => compressor.flush(),
            None => Ok(()),
        }
    }
}

impl<W: Write> Drop for EncryptingSink<W> {
    fn drop(&mut self) {
        if let Some(compressor) = self.compressor.as_mut() {
            warn!("Encrypting sink dropped without close; container is incomplete");
            compressor.get_mut().zeroize();
        }
        self.nonce.zeroize();
    }
}

fn closed_error() -> io::Error {
    io::Error::new(io::ErrorKind::BrokenPipe, "encrypting sink is closed")
}

fn failed_error() -> io::Error {
    io::Error::other("encrypting sink failed; container is incomplete")
}
