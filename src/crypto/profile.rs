//! Cipher profiles: the fixed algorithm choices and sizes of a container format.
//!
//! A profile is identified on disk only by its magic bytes. Changing any value
//! of an existing profile breaks every container already written with it, so
//! new parameters must come as a new profile with its own magic, registered in
//! [`KNOWN_PROFILES`].

/// Key derivation functions a profile can name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KdfAlgorithm {
    /// PBKDF2 with HMAC-SHA-256 as the PRF.
    Pbkdf2HmacSha256,
}

/// Authenticated ciphers a profile can name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CipherAlgorithm {
    /// AES-256 in Galois/Counter Mode.
    Aes256Gcm,
}

/// Nonce length required by AES-GCM in this crate, in bytes.
pub const NONCE_LEN: usize = 12;

/// Derived key length used by AES-256, in bytes.
pub const KEY_LEN: usize = 32;

/// An immutable set of container parameters.
#[derive(Debug, PartialEq, Eq)]
pub struct CipherProfile {
    magic: [u8; 4],
    salt_len: usize,
    nonce_len: usize,
    tag_bits: usize,
    key_bits: usize,
    kdf_iterations: u32,
    kdf: KdfAlgorithm,
    cipher: CipherAlgorithm,
}

/// The original container format.
pub const V1: CipherProfile = CipherProfile {
    magic: [0x23, 0x57, 0x79, 0xCF],
    salt_len: 8,
    nonce_len: NONCE_LEN,
    tag_bits: 128,
    key_bits: KEY_LEN * 8,
    kdf_iterations: 65535,
    kdf: KdfAlgorithm::Pbkdf2HmacSha256,
    cipher: CipherAlgorithm::Aes256Gcm,
};

/// Every profile the decrypting side understands, newest first.
pub static KNOWN_PROFILES: &[&CipherProfile] = &[&V1];

// The AES-GCM and key plumbing is sized at compile time; keep profiles honest.
const _: () = assert!(V1.nonce_len == NONCE_LEN);
const _: () = assert!(V1.key_bits == KEY_LEN * 8);
const _: () = assert!(V1.tag_bits == 128);

impl CipherProfile {
    /// The profile used for every newly written container.
    pub fn current() -> &'static CipherProfile {
        &V1
    }

    /// Looks up the profile whose magic matches `magic`.
    ///
    /// ```
    /// use sealdoc::crypto::CipherProfile;
    ///
    /// let profile = CipherProfile::for_magic(&[0x23, 0x57, 0x79, 0xCF]).unwrap();
    /// assert_eq!(profile.kdf_iterations(), 65535);
    /// assert!(CipherProfile::for_magic(b"PK\x03\x04").is_none());
    /// ```
    pub fn for_magic(magic: &[u8; 4]) -> Option<&'static CipherProfile> {
        KNOWN_PROFILES
            .iter()
            .copied()
            .find(|profile| &profile.magic == magic)
    }

    pub fn magic(&self) -> &[u8; 4] {
        &self.magic
    }

    pub fn salt_len(&self) -> usize {
        self.salt_len
    }

    pub fn nonce_len(&self) -> usize {
        self.nonce_len
    }

    pub fn tag_bits(&self) -> usize {
        self.tag_bits
    }

    /// Authentication tag length in bytes.
    pub fn tag_len(&self) -> usize {
        self.tag_bits / 8
    }

    pub fn key_bits(&self) -> usize {
        self.key_bits
    }

    pub fn kdf_iterations(&self) -> u32 {
        self.kdf_iterations
    }

    pub fn kdf(&self) -> KdfAlgorithm {
        self.kdf
    }

    pub fn cipher(&self) -> CipherAlgorithm {
        self.cipher
    }

    /// Size of `magic | salt | nonce`.
    pub fn header_len(&self) -> usize {
        self.magic.len() + self.salt_len + self.nonce_len
    }

    /// Smallest possible container: a header and an empty ciphertext's tag.
    pub fn min_container_len(&self) -> usize {
        self.header_len() + self.tag_len()
    }
}
