//! Key derivation and secure randomness.
//!
//! Keys are derived with PBKDF2-HMAC-SHA256 from the passphrase's UTF-8
//! bytes and a per-container salt. Salts and nonces come straight from the
//! operating system's CSPRNG.

use hmac::Hmac;
use secrecy::{ExposeSecret, SecretString};
use sha2::Sha256;
use zeroize::{Zeroize, ZeroizeOnDrop};

use crate::crypto::profile::{CipherProfile, KdfAlgorithm, KEY_LEN};
use crate::errors::CodecError;

/// A symmetric key derived from a passphrase.
///
/// Key material is zeroized when the value is dropped and never shows up in
/// `Debug` output.
#[derive(ZeroizeOnDrop)]
pub struct DerivedKey {
    key: [u8; KEY_LEN],
}

impl DerivedKey {
    /// Get a reference to the raw key bytes.
    ///
    /// Avoid storing or logging this value. Use only to initialise a cipher.
    pub fn as_bytes(&self) -> &[u8; KEY_LEN] {
        &self.key
    }
}

impl std::fmt::Debug for DerivedKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DerivedKey")
            .field("key", &"[REDACTED]")
            .finish()
    }
}

/// Derive the container key for `passphrase` and `salt` under `profile`.
///
/// Same passphrase, salt and profile always produce the same key.
///
/// # Errors
///
/// Returns `CodecError::KeyDerivation` if the passphrase is empty, the salt
/// does not have the profile's length, or the KDF rejects its input.
pub fn derive_key(
    passphrase: &SecretString,
    salt: &[u8],
    profile: &CipherProfile,
) -> Result<DerivedKey, CodecError> {
    let secret = passphrase.expose_secret();
    if secret.is_empty() {
        return Err(CodecError::KeyDerivation(
            "Passphrase cannot be empty".to_string(),
        ));
    }

    if salt.len() != profile.salt_len() {
        return Err(CodecError::KeyDerivation(format!(
            "Salt must be {} bytes (got {})",
            profile.salt_len(),
            salt.len()
        )));
    }

    let mut key = [0u8; KEY_LEN];
    match profile.kdf() {
        KdfAlgorithm::Pbkdf2HmacSha256 => {
            pbkdf2_sha256(secret.as_bytes(), salt, profile.kdf_iterations(), &mut key)?
        }
    }

    let derived = DerivedKey { key };
    key.zeroize();
    Ok(derived)
}

fn pbkdf2_sha256(
    password: &[u8],
    salt: &[u8],
    rounds: u32,
    out: &mut [u8],
) -> Result<(), CodecError> {
    pbkdf2::pbkdf2::<Hmac<Sha256>>(password, salt, rounds, out)
        .map_err(|e| CodecError::KeyDerivation(format!("PBKDF2 rejected its input: {}", e)))
}

/// Fill `buf` from the operating system's secure random source.
///
/// # Errors
///
/// Returns `CodecError::RandomSource` when no secure source is available.
pub fn fill_random(buf: &mut [u8]) -> Result<(), CodecError> {
    getrandom::getrandom(buf).map_err(CodecError::RandomSource)
}
