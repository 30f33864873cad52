//! Error types used across vdataset.
use thiserror::Error;

/// High-level error categories surfaced by mount, unmount and the collaborators.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Error)]
pub enum ErrorKind {
    /// The mount description is not a mapping/sequence where one is required,
    /// holds an unsupported value, or places a link outside the mount root.
    #[error("invalid input")]
    InvalidInput,
    /// A temp-directory prefix does not exist as a directory.
    #[error("invalid prefix")]
    InvalidPrefix,
    /// A scan directory, index file or unmount location is missing or of the wrong kind.
    #[error("invalid location")]
    InvalidLocation,
    /// Index file extension is neither JSON nor YAML.
    #[error("unsupported format")]
    UnsupportedFormat,
    /// A dotted key path does not resolve in the loaded index.
    #[error("key not found")]
    KeyNotFound,
    /// Two links (or a link and a directory) claim the same path in the mount root.
    #[error("link collision")]
    LinkCollision,
    /// Index file content could not be parsed.
    #[error("parse error")]
    Parse,
    #[error("io error")]
    Io,
}

/// Structured error with a kind and human message.
#[derive(Debug, Error)]
#[error("{kind}: {msg}")]
pub struct Error {
    pub kind: ErrorKind,
    pub msg: String,
}

impl Error {
    pub fn new(kind: ErrorKind, msg: impl Into<String>) -> Self {
        Self {
            kind,
            msg: msg.into(),
        }
    }

    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        self.kind
    }
}

impl From<std::io::Error> for Error {
    fn from(e: std::io::Error) -> Self {
        Self::new(ErrorKind::Io, e.to_string())
    }
}

/// Convenient alias for results returning a `types::Error`.
pub type Result<T> = std::result::Result<T, Error>;
