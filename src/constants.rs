//! Constants used throughout the application.
//!
//! Grouped by concern. Container layout constants live with the cipher profile
//! in [`crate::crypto::profile`]; everything here is about the binary and the
//! files it manages.

// Application Metadata
/// The name of the application.
pub const APP_NAME: &str = "sealdoc";
/// The description of the application used in CLI help text.
pub const APP_DESCRIPTION: &str = "A passphrase-encrypted store for password entries";

// CLI Arguments & Defaults
/// Log format identifier for plain text.
pub const LOG_FORMAT_TEXT: &str = "text";
/// Log format identifier for JSON.
pub const LOG_FORMAT_JSON: &str = "json";
/// Default log level.
pub const DEFAULT_LOG_LEVEL: &str = "info";
/// Log levels accepted by `SEALDOC_LOG_LEVEL`.
pub const VALID_LOG_LEVELS: &[&str] = &["trace", "debug", "info", "warn", "error"];

// Configuration Keys & Environment Variables
/// Environment variable naming the document file.
pub const ENV_VAR_SEALDOC_FILE: &str = "SEALDOC_FILE";
/// Environment variable selecting the log format.
pub const ENV_VAR_SEALDOC_LOG_FORMAT: &str = "SEALDOC_LOG_FORMAT";
/// Environment variable selecting the log level.
pub const ENV_VAR_SEALDOC_LOG_LEVEL: &str = "SEALDOC_LOG_LEVEL";
/// Environment variable that supplies the passphrase without prompting.
pub const ENV_VAR_SEALDOC_PASSPHRASE: &str = "SEALDOC_PASSPHRASE";
/// Environment variable that supplies the new passphrase for `rekey`.
pub const ENV_VAR_SEALDOC_NEW_PASSPHRASE: &str = "SEALDOC_NEW_PASSPHRASE";
/// Environment variable that supplies an entry password for `add`.
pub const ENV_VAR_SEALDOC_ENTRY_PASSWORD: &str = "SEALDOC_ENTRY_PASSWORD";
/// Default document location, expanded with `shellexpand`.
pub const DEFAULT_DOCUMENT_PATH: &str = "~/.sealdoc/entries.sdoc";

// Validation
/// Placeholder string for redacted information in debug output.
pub const REDACTED_PLACEHOLDER: &str = "[REDACTED]";
/// Shown instead of an entry password unless `--reveal` is given.
pub const MASKED_PASSWORD: &str = "********";

// File System Parameters
/// Default POSIX permissions for newly created directories (owner read/write/execute).
#[cfg(unix)]
pub const DEFAULT_DIR_PERMISSIONS: u32 = 0o700;
/// Default POSIX permissions for newly created files (owner read/write).
#[cfg(unix)]
pub const DEFAULT_FILE_PERMISSIONS: u32 = 0o600;

// Logging Configuration
/// Service name used in tracing spans and structured logs.
pub const TRACING_SERVICE_NAME: &str = "sealdoc";
/// Name for the root tracing span covering an application invocation.
pub const TRACING_ROOT_SPAN_NAME: &str = "app_invocation";
