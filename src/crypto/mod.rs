//! The container codec.
//!
//! A container is `magic | salt | nonce | AES-256-GCM(gzip(plaintext)) | tag`.
//! Keys come from PBKDF2-HMAC-SHA256 over the passphrase and a fresh random
//! salt, and every container gets a fresh random nonce, so no key/nonce pair
//! is ever used twice.
//!
//! # Module Structure
//!
//! - `profile`: fixed algorithm choices and sizes, looked up by magic bytes
//! - `key`: key derivation and secure randomness
//! - `header`: the fixed-size container header
//! - `sink`: `Write` side, compress then encrypt
//! - `source`: `Read` side, verify and decrypt then decompress
//!
//! # Example
//!
//! ```
//! use sealdoc::crypto::{decrypt_bytes, encrypt_bytes};
//! use secrecy::SecretString;
//!
//! let passphrase = SecretString::from("my-secret-passphrase".to_string());
//! let container = encrypt_bytes(b"Secret entry", &passphrase)?;
//! let plaintext = decrypt_bytes(&container, &passphrase)?;
//! assert_eq!(plaintext.as_slice(), b"Secret entry");
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod header;
pub mod key;
pub mod profile;
pub mod sink;
pub mod source;

use std::io::Write;

use secrecy::SecretString;
use zeroize::Zeroizing;

use crate::errors::CodecError;

pub use self::header::ContainerHeader;
pub use self::key::{derive_key, DerivedKey};
pub use self::profile::{CipherAlgorithm, CipherProfile, KdfAlgorithm};
pub use self::sink::EncryptingSink;
pub use self::source::{DecryptingSource, SourceStage};

/// Encrypts `plaintext` into a complete in-memory container.
pub fn encrypt_bytes(plaintext: &[u8], passphrase: &SecretString) -> Result<Vec<u8>, CodecError> {
    let mut sink = EncryptingSink::open(Vec::new(), passphrase)?;
    sink.write_all(plaintext)?;
    sink.finish()
}

/// Decrypts a complete in-memory container.
pub fn decrypt_bytes(
    container: &[u8],
    passphrase: &SecretString,
) -> Result<Zeroizing<Vec<u8>>, CodecError> {
    let mut source = DecryptingSource::open(container, passphrase)?;
    let plaintext = source.read_all()?;
    source.close();
    Ok(plaintext)
}
