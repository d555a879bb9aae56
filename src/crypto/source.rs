//! Decrypting source: verify and open AES-256-GCM, then decompress.
//!
//! Opening parses the header and derives the key. The first read pulls the
//! whole body from the underlying stream, checks the authentication tag and
//! only then inflates the plaintext; nothing is handed out before the tag
//! verifies. Once a read has failed the source stays failed.

use std::io::{self, Read};

use aes_gcm::aead::{Aead, KeyInit};
use aes_gcm::{Aes256Gcm, Nonce};
use flate2::read::GzDecoder;
use secrecy::SecretString;
use tracing::{debug, warn};
use zeroize::{Zeroize, Zeroizing};

use crate::crypto::header::ContainerHeader;
use crate::crypto::key::derive_key;
use crate::crypto::profile::{CipherProfile, NONCE_LEN};
use crate::errors::{CodecError, FormatError};

/// Observable stage of a [`DecryptingSource`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceStage {
    /// Header parsed and key derived; body not yet read.
    HeaderRead,
    /// Tag verified; plaintext is being served.
    Verified,
    /// Verification or decompression failed. Terminal.
    Failed,
    /// Resources released.
    Closed,
}

/// Failure remembered by a failed source so every later read reports it again.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Failure {
    Authentication,
    CorruptPayload,
    Io(io::ErrorKind),
}

impl Failure {
    fn to_error(self) -> CodecError {
        match self {
            Failure::Authentication => CodecError::Authentication,
            Failure::CorruptPayload => CodecError::Format(FormatError::CorruptPayload(
                io::Error::new(io::ErrorKind::InvalidData, "invalid gzip stream"),
            )),
            Failure::Io(kind) => CodecError::Io(io::Error::new(kind, "container read failed")),
        }
    }
}

enum SourceState {
    HeaderRead,
    Verified {
        plaintext: Zeroizing<Vec<u8>>,
        position: usize,
    },
    Failed(Failure),
    Closed,
}

/// A `Read` adapter that yields the plaintext of a container.
pub struct DecryptingSource<R: Read> {
    source: Option<R>,
    cipher: Aes256Gcm,
    nonce: [u8; NONCE_LEN],
    tag_len: usize,
    state: SourceState,
}

impl<R: Read> DecryptingSource<R> {
    /// Parses the header from `source` and derives the key.
    ///
    /// # Errors
    ///
    /// - `FormatError::UnknownMagic` if the file is not a container
    /// - `FormatError::TruncatedHeader` if the stream is shorter than the header
    /// - `CodecError::KeyDerivation` if the key or cipher cannot be set up
    /// - `CodecError::Io` for other read failures
    ///
    /// A wrong passphrase is not detected here; it surfaces as
    /// `CodecError::Authentication` on the first read.
    pub fn open(mut source: R, passphrase: &SecretString) -> Result<Self, CodecError> {
        let header = ContainerHeader::read_from(&mut source)?;
        let profile: &CipherProfile = header.profile();
        let key = derive_key(passphrase, header.salt(), profile)?;
        let cipher = Aes256Gcm::new_from_slice(key.as_bytes())
            .map_err(|e| CodecError::KeyDerivation(format!("Cipher rejected key: {}", e)))?;
        drop(key);
        debug!("Parsed container header");

        Ok(Self {
            source: Some(source),
            cipher,
            nonce: *header.nonce(),
            tag_len: profile.tag_len(),
            state: SourceState::HeaderRead,
        })
    }

    /// Current stage of the source.
    pub fn stage(&self) -> SourceStage {
        match self.state {
            SourceState::HeaderRead => SourceStage::HeaderRead,
            SourceState::Verified { .. } => SourceStage::Verified,
            SourceState::Failed(_) => SourceStage::Failed,
            SourceState::Closed => SourceStage::Closed,
        }
    }

    /// Reads the entire remaining plaintext.
    ///
    /// # Errors
    ///
    /// - `CodecError::Authentication` if the tag does not verify
    /// - `FormatError::CorruptPayload` if the verified body does not inflate
    /// - `CodecError::Io` if the underlying stream fails or the source is closed
    pub fn read_all(&mut self) -> Result<Zeroizing<Vec<u8>>, CodecError> {
        self.ensure_verified()?;
        match &mut self.state {
            SourceState::Verified {
                plaintext,
                position,
            } => {
                let rest = Zeroizing::new(plaintext[*position..].to_vec());
                *position = plaintext.len();
                Ok(rest)
            }
            _ => Err(CodecError::Io(closed_error())),
        }
    }

    /// Releases the underlying stream and scrubs any buffered plaintext.
    ///
    /// Safe to call at any stage and more than once.
    pub fn close(&mut self) {
        self.source = None;
        self.state = SourceState::Closed;
    }

    fn ensure_verified(&mut self) -> Result<(), CodecError> {
        match self.state {
            SourceState::Verified { .. } => return Ok(()),
            SourceState::Failed(failure) => return Err(failure.to_error()),
            SourceState::Closed => return Err(CodecError::Io(closed_error())),
            SourceState::HeaderRead => {}
        }

        match self.verify_body() {
            Ok(plaintext) => {
                debug!(plaintext_len = plaintext.len(), "Container verified");
                self.state = SourceState::Verified {
                    plaintext,
                    position: 0,
                };
                self.source = None;
                Ok(())
            }
            Err(err) => {
                let failure = match &err {
                    CodecError::Authentication => Failure::Authentication,
                    CodecError::Format(FormatError::CorruptPayload(_)) => Failure::CorruptPayload,
                    CodecError::Io(e) => Failure::Io(e.kind()),
                    _ => Failure::Io(io::ErrorKind::Other),
                };
                warn!(?failure, "Container rejected");
                self.state = SourceState::Failed(failure);
                self.source = None;
                Err(err)
            }
        }
    }

    fn verify_body(&mut self) -> Result<Zeroizing<Vec<u8>>, CodecError> {
        let source = self
            .source
            .as_mut()
            .ok_or_else(|| CodecError::Io(closed_error()))?;

        let mut body = Vec::new();
        source.read_to_end(&mut body)?;
        if body.len() < self.tag_len {
            return Err(CodecError::Authentication);
        }

        let compressed = Zeroizing::new(
            self.cipher
                .decrypt(Nonce::from_slice(&self.nonce), body.as_slice())
                .map_err(|_| CodecError::Authentication)?,
        );

        let mut plaintext = Zeroizing::new(Vec::new());
        GzDecoder::new(compressed.as_slice())
            .read_to_end(&mut plaintext)
            .map_err(|e| CodecError::Format(FormatError::CorruptPayload(e)))?;
        Ok(plaintext)
    }
}

impl<R: Read> Read for DecryptingSource<R> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        self.ensure_verified().map_err(CodecError::into_io)?;
        match &mut self.state {
            SourceState::Verified {
                plaintext,
                position,
            } => {
                let available = &plaintext[*position..];
                let count = available.len().min(buf.len());
                buf[..count].copy_from_slice(&available[..count]);
                *position += count;
                Ok(count)
            }
            _ => Err(closed_error()),
        }
    }
}

impl<R: Read> Drop for DecryptingSource<R> {
    fn drop(&mut self) {
        self.nonce.zeroize();
    }
}

fn closed_error() -> io::Error {
    io::Error::new(io::ErrorKind::BrokenPipe, "decrypting source is closed")
}
