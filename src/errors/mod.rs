//! Error handling utilities for the sealdoc crate.
//!
//! The codec reports failures through [`CodecError`], the document layer folds
//! codec and payload failures into a single user-facing [`DocumentProcessError`],
//! and the binary works in terms of [`AppError`] / [`AppResult`].

use std::error::Error as StdError;
use std::fmt;
use std::io;
use thiserror::Error;

/// Longest user-facing message produced by [`strip_message`].
pub const MAX_MESSAGE_LEN: usize = 80;

/// Problems with the framing of a container, as opposed to its contents.
///
/// # Examples
///
/// ```
/// use sealdoc::errors::FormatError;
///
/// let error = FormatError::UnknownMagic;
/// assert!(format!("{}", error).contains("not a valid container"));
/// ```
#[derive(Debug, Error)]
pub enum FormatError {
    /// The first four bytes do not name any known cipher profile.
    #[error("File is not a valid container (unrecognized header)")]
    UnknownMagic,

    /// The stream ended before the fixed-size header was complete.
    #[error("File is not a valid container (header is truncated)")]
    TruncatedHeader,

    /// The body authenticated but does not decompress.
    #[error("Container payload is not valid compressed data: {0}")]
    CorruptPayload(#[source] io::Error),
}

/// Failures raised by the encrypting sink and the decrypting source.
///
/// `Authentication` deliberately covers both a wrong passphrase and a damaged
/// file: under AES-GCM the two are indistinguishable, so callers have to offer
/// both explanations to the user.
///
/// # Examples
///
/// ```
/// use sealdoc::errors::CodecError;
///
/// let error = CodecError::Authentication;
/// let message = format!("{}", error);
/// assert!(message.contains("Incorrect password"));
/// assert!(message.contains("corrupted"));
/// ```
#[derive(Debug, Error)]
pub enum CodecError {
    /// The operating system could not supply secure random bytes.
    #[error("Secure random source unavailable: {0}")]
    RandomSource(#[source] getrandom::Error),

    /// Key derivation or cipher initialisation failed.
    #[error("Key derivation failed: {0}")]
    KeyDerivation(String),

    /// Header or payload framing is wrong.
    #[error(transparent)]
    Format(#[from] FormatError),

    /// The authentication tag did not verify.
    #[error("Incorrect password or corrupted file")]
    Authentication,

    /// The underlying byte stream failed.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

impl CodecError {
    /// Recovers a `CodecError` that crossed a `std::io::Read`/`Write` boundary.
    ///
    /// The sink and source report their own failures as `io::Error` values
    /// wrapping a `CodecError`; anything else stays a plain `Io` error.
    ///
    /// ```
    /// use sealdoc::errors::CodecError;
    /// use std::io;
    ///
    /// let wrapped = io::Error::new(io::ErrorKind::InvalidData, CodecError::Authentication);
    /// assert!(matches!(CodecError::from_io(wrapped), CodecError::Authentication));
    ///
    /// let plain = io::Error::new(io::ErrorKind::NotFound, "gone");
    /// assert!(matches!(CodecError::from_io(plain), CodecError::Io(_)));
    /// ```
    pub fn from_io(err: io::Error) -> Self {
        let carries_codec_error = err
            .get_ref()
            .map(|inner| inner.is::<CodecError>())
            .unwrap_or(false);
        if !carries_codec_error {
            return CodecError::Io(err);
        }
        match err.into_inner().map(|inner| inner.downcast::<CodecError>()) {
            Some(Ok(codec)) => *codec,
            Some(Err(other)) => CodecError::Io(io::Error::other(other)),
            None => CodecError::Io(io::Error::other("unknown stream failure")),
        }
    }

    /// Wraps this error so it can be returned from `Read`/`Write` methods.
    pub fn into_io(self) -> io::Error {
        match self {
            CodecError::Io(err) => err,
            CodecError::Format(FormatError::TruncatedHeader) => {
                io::Error::new(io::ErrorKind::UnexpectedEof, self)
            }
            other => io::Error::new(io::ErrorKind::InvalidData, other),
        }
    }
}

/// Coarse classification of a [`DocumentProcessError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentErrorKind {
    /// Filesystem or stream failure.
    Io,
    /// Not a container, or a damaged payload frame.
    Format,
    /// Wrong passphrase or tampered file.
    Authentication,
    /// Key derivation could not run.
    KeyDerivation,
    /// No secure randomness available.
    RandomSource,
    /// The structured payload could not be parsed or rendered.
    Parse,
}

/// The single error type the document layer hands to its callers.
///
/// Its `Display` is a short, single-line message meant for the user; the
/// original error, with its full detail, stays reachable through
/// [`std::error::Error::source`] for diagnostics.
///
/// # Examples
///
/// ```
/// use sealdoc::errors::{CodecError, DocumentErrorKind, DocumentProcessError};
///
/// let error = DocumentProcessError::from(CodecError::Authentication);
/// assert_eq!(error.kind(), DocumentErrorKind::Authentication);
/// assert_eq!(error.to_string(), "Incorrect password or corrupted file");
/// ```
#[derive(Debug, Error)]
#[error("{message}")]
pub struct DocumentProcessError {
    kind: DocumentErrorKind,
    message: String,
    #[source]
    source: Option<Box<dyn StdError + Send + Sync + 'static>>,
}

impl DocumentProcessError {
    /// Builds an error from any cause, stripping its message for display.
    pub fn new<E>(kind: DocumentErrorKind, cause: E) -> Self
    where
        E: StdError + Send + Sync + 'static,
    {
        Self {
            kind,
            message: strip_message(&cause.to_string()),
            source: Some(Box::new(cause)),
        }
    }

    /// Builds a parse-level error from a payload collaborator failure.
    pub fn parse<E>(cause: E) -> Self
    where
        E: StdError + Send + Sync + 'static,
    {
        Self::new(DocumentErrorKind::Parse, cause)
    }

    /// Builds an error from a payload collaborator failure.
    ///
    /// Stream failures that surface through the payload format, such as a
    /// full disk under `serde_json::to_writer`, keep the `Io` kind; anything
    /// else is a `Parse` failure.
    pub fn payload<E>(cause: E) -> Self
    where
        E: StdError + Send + Sync + 'static,
    {
        let boxed: Box<dyn StdError + Send + Sync + 'static> = Box::new(cause);
        let boxed = match boxed.downcast::<serde_json::Error>() {
            Ok(json) if json.is_io() => return io::Error::from(*json).into(),
            Ok(json) => return Self::parse(*json),
            Err(other) => other,
        };
        match boxed.downcast::<io::Error>() {
            Ok(err) => (*err).into(),
            Err(other) => Self {
                kind: DocumentErrorKind::Parse,
                message: strip_message(&other.to_string()),
                source: Some(other),
            },
        }
    }

    /// Returns the category of the failure.
    pub fn kind(&self) -> DocumentErrorKind {
        self.kind
    }

    /// Returns the stripped, user-facing message.
    pub fn message(&self) -> &str {
        &self.message
    }
}

impl From<CodecError> for DocumentProcessError {
    fn from(err: CodecError) -> Self {
        let kind = match &err {
            CodecError::RandomSource(_) => DocumentErrorKind::RandomSource,
            CodecError::KeyDerivation(_) => DocumentErrorKind::KeyDerivation,
            CodecError::Format(_) => DocumentErrorKind::Format,
            CodecError::Authentication => DocumentErrorKind::Authentication,
            CodecError::Io(_) => DocumentErrorKind::Io,
        };
        Self::new(kind, err)
    }
}

impl From<io::Error> for DocumentProcessError {
    fn from(err: io::Error) -> Self {
        CodecError::from_io(err).into()
    }
}

/// Reduces an error message to one trimmed line of at most [`MAX_MESSAGE_LEN`]
/// characters, so parser internals and nested causes never reach the user.
///
/// ```
/// use sealdoc::errors::strip_message;
///
/// assert_eq!(strip_message("  bad header \n at offset 4"), "bad header");
/// let long = "x".repeat(200);
/// assert!(strip_message(&long).ends_with("..."));
/// ```
pub fn strip_message(text: &str) -> String {
    let line = text.lines().map(str::trim).find(|l| !l.is_empty()).unwrap_or("");
    if line.chars().count() <= MAX_MESSAGE_LEN {
        return line.to_string();
    }
    let mut stripped: String = line.chars().take(MAX_MESSAGE_LEN).collect();
    stripped.push_str("...");
    stripped
}

/// Problems with the contents of an entry list.
///
/// # Examples
///
/// ```
/// use sealdoc::errors::EntryError;
///
/// let error = EntryError::DuplicateTitle("Mail".to_string());
/// assert!(format!("{}", error).contains("already exists"));
/// ```
#[derive(Debug, Error, PartialEq, Eq)]
pub enum EntryError {
    /// Every entry needs a non-blank title.
    #[error("Entry title cannot be empty")]
    MissingTitle,

    /// Titles are unique, compared case-insensitively.
    #[error("An entry titled '{0}' already exists")]
    DuplicateTitle(String),

    /// No entry carries the requested title.
    #[error("No entry titled '{0}'")]
    NotFound(String),
}

/// Represents all possible errors that can occur in the sealdoc binary.
///
/// # Examples
///
/// ```
/// use sealdoc::errors::AppError;
///
/// let error = AppError::Config("Missing document path".to_string());
/// assert_eq!(format!("{}", error), "Configuration error: Missing document path");
/// ```
#[derive(Debug, Error)]
pub enum AppError {
    /// Errors related to configuration loading or validation.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Input/output errors from filesystem operations outside the codec.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Errors raised directly by the container codec.
    #[error("{0}")]
    Codec(#[from] CodecError),

    /// Errors raised while reading or writing a document.
    #[error("{0}")]
    Document(#[from] DocumentProcessError),

    /// Errors in the entry list itself.
    #[error("{0}")]
    Entry(#[from] EntryError),

    /// Passphrase could not be obtained or confirmed.
    #[error("Passphrase error: {0}")]
    Passphrase(String),

    /// A command was given arguments that make no sense for the loaded document.
    #[error("{0}")]
    Usage(String),
}

impl AppError {
    /// True when the failure may be fixed by asking for the passphrase again.
    pub fn is_authentication_failure(&self) -> bool {
        match self {
            AppError::Codec(CodecError::Authentication) => true,
            AppError::Document(err) => err.kind() == DocumentErrorKind::Authentication,
            _ => false,
        }
    }
}

/// A type alias for `Result<T, AppError>`.
pub type AppResult<T> = Result<T, AppError>;

/// Formats an error together with its chain of sources, for debug logs.
pub struct ErrorChain<'a>(pub &'a (dyn StdError + 'static));

impl fmt::Display for ErrorChain<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)?;
        let mut source = self.0.source();
        while let Some(cause) = source {
            write!(f, ": {}", cause)?;
            source = cause.source();
        }
        Ok(())
    }
}
