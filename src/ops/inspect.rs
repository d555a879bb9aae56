//! Header summary for a container, readable without the passphrase.

use std::fmt;
use std::fs;
use std::path::Path;

use crate::crypto::{CipherAlgorithm, KdfAlgorithm};
use crate::document::DocumentStore;
use crate::errors::AppResult;

/// What `inspect` reports. Contains no secret material.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContainerSummary {
    pub magic: [u8; 4],
    pub kdf: KdfAlgorithm,
    pub kdf_iterations: u32,
    pub cipher: CipherAlgorithm,
    pub key_bits: usize,
    pub salt_len: usize,
    pub nonce_len: usize,
    pub tag_bits: usize,
    pub file_len: u64,
    /// Ciphertext and tag length; 0 if the file stops right after the header.
    pub body_len: u64,
}

impl fmt::Display for ContainerSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let magic: Vec<String> = self.magic.iter().map(|b| format!("{:02x}", b)).collect();
        writeln!(f, "Magic:       {}", magic.join(" "))?;
        writeln!(
            f,
            "KDF:         {} ({} iterations)",
            kdf_name(self.kdf),
            self.kdf_iterations
        )?;
        writeln!(
            f,
            "Cipher:      {} ({}-bit key, {}-bit tag)",
            cipher_name(self.cipher),
            self.key_bits,
            self.tag_bits
        )?;
        writeln!(f, "Salt:        {} bytes", self.salt_len)?;
        writeln!(f, "Nonce:       {} bytes", self.nonce_len)?;
        writeln!(f, "File size:   {} bytes", self.file_len)?;
        writeln!(f, "Body:        {} bytes", self.body_len)
    }
}

fn kdf_name(kdf: KdfAlgorithm) -> &'static str {
    match kdf {
        KdfAlgorithm::Pbkdf2HmacSha256 => "PBKDF2-HMAC-SHA256",
    }
}

fn cipher_name(cipher: CipherAlgorithm) -> &'static str {
    match cipher {
        CipherAlgorithm::Aes256Gcm => "AES-256-GCM",
    }
}

/// Reads the header of the container at `path`.
///
/// # Errors
///
/// Fails with a `Format` document error if the file is not a container.
pub fn inspect_document(path: &Path) -> AppResult<ContainerSummary> {
    let header = DocumentStore::new(path).read_header()?;
    let profile = header.profile();
    let file_len = fs::metadata(path)?.len();

    Ok(ContainerSummary {
        magic: *profile.magic(),
        kdf: profile.kdf(),
        kdf_iterations: profile.kdf_iterations(),
        cipher: profile.cipher(),
        key_bits: profile.key_bits(),
        salt_len: profile.salt_len(),
        nonce_len: profile.nonce_len(),
        tag_bits: profile.tag_bits(),
        file_len,
        body_len: file_len.saturating_sub(profile.header_len() as u64),
    })
}
