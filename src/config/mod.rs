//! Configuration management for the sealdoc application.
//!
//! Settings are read from environment variables with sensible defaults; command
//! line flags are applied on top by the binary.
//!
//! # Environment Variables
//!
//! - `SEALDOC_FILE`: Path to the document file (defaults to ~/.sealdoc/entries.sdoc)
//! - `SEALDOC_LOG_FORMAT`: `text` or `json` (defaults to text)
//! - `SEALDOC_LOG_LEVEL`: `trace`, `debug`, `info`, `warn` or `error` (defaults to info)

use crate::constants::{
    DEFAULT_DOCUMENT_PATH, DEFAULT_LOG_LEVEL, ENV_VAR_SEALDOC_FILE, ENV_VAR_SEALDOC_LOG_FORMAT,
    ENV_VAR_SEALDOC_LOG_LEVEL, LOG_FORMAT_JSON, LOG_FORMAT_TEXT, REDACTED_PLACEHOLDER,
    VALID_LOG_LEVELS,
};
use crate::errors::{AppError, AppResult};
use std::env;
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

/// Output format for log lines.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    /// Human-readable lines.
    #[default]
    Text,
    /// One JSON object per line.
    Json,
}

impl FromStr for LogFormat {
    type Err = AppError;

    fn from_str(value: &str) -> AppResult<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            LOG_FORMAT_TEXT => Ok(LogFormat::Text),
            LOG_FORMAT_JSON => Ok(LogFormat::Json),
            other => Err(AppError::Config(format!(
                "Unknown log format '{}'; expected '{}' or '{}'",
                other, LOG_FORMAT_TEXT, LOG_FORMAT_JSON
            ))),
        }
    }
}

impl fmt::Display for LogFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LogFormat::Text => f.write_str(LOG_FORMAT_TEXT),
            LogFormat::Json => f.write_str(LOG_FORMAT_JSON),
        }
    }
}

/// Configuration for the sealdoc application.
///
/// # Examples
///
/// ```
/// use sealdoc::config::{Config, LogFormat};
/// use std::path::PathBuf;
///
/// let config = Config {
///     document_path: PathBuf::from("/home/user/.sealdoc/entries.sdoc"),
///     log_format: LogFormat::Text,
///     log_level: "info".to_string(),
/// };
/// assert!(config.validate().is_ok());
/// ```
pub struct Config {
    /// The document file the commands operate on.
    pub document_path: PathBuf,

    /// Format of log output on stderr.
    pub log_format: LogFormat,

    /// Default log level when `RUST_LOG` is not set.
    pub log_level: String,
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("document_path", &REDACTED_PLACEHOLDER)
            .field("log_format", &self.log_format)
            .field("log_level", &self.log_level)
            .finish()
    }
}

impl Default for Config {
    fn default() -> Self {
        Config {
            document_path: PathBuf::from(""),
            log_format: LogFormat::Text,
            log_level: DEFAULT_LOG_LEVEL.to_string(),
        }
    }
}

impl Config {
    /// Loads configuration from environment variables with sensible defaults.
    ///
    /// The document path is expanded with `shellexpand`, so `~` and `$VAR`
    /// references work.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Config` if:
    /// - The document path expansion fails or yields an empty path
    /// - `SEALDOC_LOG_FORMAT` names an unknown format
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use sealdoc::config::Config;
    ///
    /// match Config::load() {
    ///     Ok(config) => println!("Using {}", config.document_path.display()),
    ///     Err(err) => eprintln!("Failed to load config: {}", err),
    /// }
    /// ```
    pub fn load() -> AppResult<Self> {
        let raw_path = env::var(ENV_VAR_SEALDOC_FILE)
            .ok()
            .filter(|value| !value.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_DOCUMENT_PATH.to_string());
        let document_path = expand_path(&raw_path)?;

        let log_format = match env::var(ENV_VAR_SEALDOC_LOG_FORMAT) {
            Ok(value) if !value.trim().is_empty() => value.parse()?,
            _ => LogFormat::default(),
        };

        let log_level = env::var(ENV_VAR_SEALDOC_LOG_LEVEL)
            .ok()
            .map(|value| value.trim().to_ascii_lowercase())
            .filter(|value| !value.is_empty())
            .unwrap_or_else(|| DEFAULT_LOG_LEVEL.to_string());

        Ok(Config {
            document_path,
            log_format,
            log_level,
        })
    }

    /// Validates that the configuration is usable.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Config` with one of the following messages:
    /// - "Document path is empty"
    /// - "Document path must be an absolute path"
    /// - "Unknown log level ..." if the level is not one of the accepted names
    pub fn validate(&self) -> AppResult<()> {
        if self.document_path.as_os_str().is_empty() {
            return Err(AppError::Config("Document path is empty".to_string()));
        }

        if !self.document_path.is_absolute() {
            return Err(AppError::Config(
                "Document path must be an absolute path".to_string(),
            ));
        }

        if !VALID_LOG_LEVELS.contains(&self.log_level.as_str()) {
            return Err(AppError::Config(format!(
                "Unknown log level '{}'; expected one of {}",
                self.log_level,
                VALID_LOG_LEVELS.join(", ")
            )));
        }

        Ok(())
    }
}

/// Expands `~` and environment variables in a user-supplied path.
pub fn expand_path(raw: &str) -> AppResult<PathBuf> {
    let expanded = shellexpand::full(raw)
        .map_err(|e| AppError::Config(format!("Failed to expand path: {}", e)))?;
    let path = PathBuf::from(expanded.into_owned());
    if path.as_os_str().is_empty() {
        return Err(AppError::Config("Document path is empty".to_string()));
    }
    Ok(path)
}
