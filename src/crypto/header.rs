//! The fixed-size container header: `magic | salt | nonce`.

use std::io::{self, Read, Write};

use crate::crypto::key::fill_random;
use crate::crypto::profile::{CipherProfile, NONCE_LEN};
use crate::errors::{CodecError, FormatError};

/// Parsed or freshly generated header of one container.
///
/// Salt and nonce are not secret; they are stored in clear in every file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContainerHeader {
    profile: &'static CipherProfile,
    salt: Vec<u8>,
    nonce: [u8; NONCE_LEN],
}

impl ContainerHeader {
    /// Creates a header with a random salt and nonce for `profile`.
    ///
    /// # Errors
    ///
    /// Returns `CodecError::RandomSource` if the CSPRNG is unavailable.
    pub fn generate(profile: &'static CipherProfile) -> Result<Self, CodecError> {
        let mut salt = vec![0u8; profile.salt_len()];
        fill_random(&mut salt)?;
        let mut nonce = [0u8; NONCE_LEN];
        fill_random(&mut nonce)?;
        Ok(Self {
            profile,
            salt,
            nonce,
        })
    }

    /// Reads and validates a header from the front of `reader`.
    ///
    /// # Errors
    ///
    /// - `FormatError::UnknownMagic` if the magic bytes match no known profile
    /// - `FormatError::TruncatedHeader` if the stream ends inside the header
    /// - `CodecError::Io` for any other read failure
    pub fn read_from<R: Read>(reader: &mut R) -> Result<Self, CodecError> {
        let mut magic = [0u8; 4];
        read_header_field(reader, &mut magic)?;
        let profile = CipherProfile::for_magic(&magic).ok_or(FormatError::UnknownMagic)?;

        let mut salt = vec![0u8; profile.salt_len()];
        read_header_field(reader, &mut salt)?;
        let mut nonce = [0u8; NONCE_LEN];
        read_header_field(reader, &mut nonce)?;

        Ok(Self {
            profile,
            salt,
            nonce,
        })
    }

    /// Parses a header from the start of an in-memory container.
    pub fn parse(bytes: &[u8]) -> Result<Self, CodecError> {
        let mut cursor = bytes;
        Self::read_from(&mut cursor)
    }

    /// Writes the header bytes.
    pub fn write_to<W: Write>(&self, writer: &mut W) -> io::Result<()> {
        writer.write_all(self.profile.magic())?;
        writer.write_all(&self.salt)?;
        writer.write_all(&self.nonce)
    }

    pub fn profile(&self) -> &'static CipherProfile {
        self.profile
    }

    pub fn salt(&self) -> &[u8] {
        &self.salt
    }

    pub fn nonce(&self) -> &[u8; NONCE_LEN] {
        &self.nonce
    }
}

fn read_header_field<R: Read>(reader: &mut R, buf: &mut [u8]) -> Result<(), CodecError> {
    reader.read_exact(buf).map_err(|e| match e.kind() {
        io::ErrorKind::UnexpectedEof => CodecError::Format(FormatError::TruncatedHeader),
        _ => CodecError::Io(e),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::crypto::profile::V1;

    #[test]
    fn test_generated_header_layout() {
        let header = ContainerHeader::generate(CipherProfile::current()).unwrap();
        let mut bytes = Vec::new();
        header.write_to(&mut bytes).unwrap();

        assert_eq!(bytes.len(), V1.header_len());
        assert_eq!(&bytes[..4], V1.magic());
        assert_eq!(&bytes[4..12], header.salt());
        assert_eq!(&bytes[12..24], header.nonce());
    }

    #[test]
    fn test_parse_round_trip() {
        let header = ContainerHeader::generate(CipherProfile::current()).unwrap();
        let mut bytes = Vec::new();
        header.write_to(&mut bytes).unwrap();
        bytes.extend_from_slice(b"body bytes are ignored");

        assert_eq!(ContainerHeader::parse(&bytes).unwrap(), header);
    }

    #[test]
    fn test_unknown_magic_rejected() {
        let bytes = [0u8; 24];
        assert!(matches!(
            ContainerHeader::parse(&bytes),
            Err(CodecError::Format(FormatError::UnknownMagic))
        ));
    }

    #[test]
    fn test_truncated_header_rejected() {
        let mut bytes = V1.magic().to_vec();
        bytes.extend_from_slice(&[1, 2, 3, 4, 5, 6]);
        assert_eq!(bytes.len(), 10);
        assert!(matches!(
            ContainerHeader::parse(&bytes),
            Err(CodecError::Format(FormatError::TruncatedHeader))
        ));

        assert!(matches!(
            ContainerHeader::parse(&[0x23, 0x57]),
            Err(CodecError::Format(FormatError::TruncatedHeader))
        ));
    }

    #[test]
    fn test_other_read_errors_stay_io() {
        struct Broken;
        impl Read for Broken {
            fn read(&mut self, _buf: &mut [u8]) -> io::Result<usize> {
                Err(io::Error::new(io::ErrorKind::PermissionDenied, "denied"))
            }
        }

        match ContainerHeader::read_from(&mut Broken) {
            Err(CodecError::Io(e)) => assert_eq!(e.kind(), io::ErrorKind::PermissionDenied),
            other => panic!("Expected CodecError::Io, got {:?}", other),
        }
    }
}
