/*!
# Sealdoc

Sealdoc keeps a list of password entries in a single passphrase-protected file.
The file is a small self-describing container: a fixed header followed by the
gzip-compressed document, encrypted and authenticated with AES-256-GCM under a
key derived from the passphrase with PBKDF2-HMAC-SHA256.

## Architecture

- `crypto`: the container codec (cipher profile, encrypting sink, decrypting source)
- `document`: the entry list, its payload format, file storage and open sessions
- `ops`: the operations behind each command
- `cli`: command-line interface handling using clap
- `config`: configuration loading and validation
- `passphrase`: passphrase prompts with environment overrides
- `errors`: error handling infrastructure

## Usage Example

```rust,no_run
use sealdoc::document::{DocumentSession, Entry};
use secrecy::SecretString;

fn main() -> sealdoc::AppResult<()> {
    let passphrase = SecretString::from("correct horse battery staple".to_string());
    let mut session = DocumentSession::create("/tmp/vault.sdoc", Some(passphrase))?;
    session.entries_mut().add(Entry::new("Mail").with_user("alice"))?;
    session.save()?;
    Ok(())
}
```
*/

/// Command-line interface for parsing and handling user arguments
pub mod cli;
/// Configuration loading and management
pub mod config;
/// Application-wide constants
pub mod constants;
/// Container codec
pub mod crypto;
/// Documents stored in containers
pub mod document;
/// Error types and utilities for error handling
pub mod errors;
/// Operations behind the CLI commands
pub mod ops;
/// Passphrase prompts
pub mod passphrase;

// Re-export important types for convenience
pub use cli::CliArgs;
pub use config::Config;
pub use crypto::{decrypt_bytes, encrypt_bytes, DecryptingSource, EncryptingSink};
pub use document::{read_document, write_document, DocumentSession, DocumentStore, Entries, Entry};
pub use errors::{AppError, AppResult, CodecError, DocumentProcessError};
