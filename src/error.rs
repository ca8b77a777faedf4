//! Error types for file state inspection.
//!
//! Not-found is deliberately absent from [`StateError`]: a path that does not
//! exist resolves to [`FileState::Missing`](crate::state::FileState::Missing).
//! Everything that prevented the provider from *knowing* the state is an error.

use std::fmt;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Failure to determine the state of a path
#[derive(Debug, Error)]
pub enum StateError {
    #[error("Permission denied for {}: {source}", path.display())]
    PermissionDenied {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("I/O failure for {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Unsupported file type for {}: {kind}", path.display())]
    UnsupportedType { path: PathBuf, kind: SpecialKind },
}

/// Coarse error category, for callers that branch without matching payloads
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    PermissionDenied,
    Io,
    UnsupportedType,
}

/// Non-regular, non-directory path types that the provider rejects
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SpecialKind {
    /// Symbolic link, reported only when links are not followed
    Symlink,
    /// Symbolic link whose target does not exist
    BrokenSymlink,
    Fifo,
    Socket,
    BlockDevice,
    CharDevice,
    Unknown,
}

impl fmt::Display for SpecialKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            SpecialKind::Symlink => "symbolic link",
            SpecialKind::BrokenSymlink => "broken symbolic link",
            SpecialKind::Fifo => "fifo",
            SpecialKind::Socket => "socket",
            SpecialKind::BlockDevice => "block device",
            SpecialKind::CharDevice => "character device",
            SpecialKind::Unknown => "unknown file type",
        };
        f.write_str(name)
    }
}

impl StateError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            StateError::PermissionDenied { .. } => ErrorKind::PermissionDenied,
            StateError::Io { .. } => ErrorKind::Io,
            StateError::UnsupportedType { .. } => ErrorKind::UnsupportedType,
        }
    }

    /// Path the failure refers to
    pub fn path(&self) -> &Path {
        match self {
            StateError::PermissionDenied { path, .. }
            | StateError::Io { path, .. }
            | StateError::UnsupportedType { path, .. } => path,
        }
    }

    pub fn unsupported(path: &Path, kind: SpecialKind) -> Self {
        StateError::UnsupportedType {
            path: path.to_path_buf(),
            kind,
        }
    }
}

/// Classify an I/O error raised while inspecting or reading `path`.
///
/// Callers must handle not-found themselves before reaching this point; here a
/// `NotFound` (e.g. the file vanished between stat and open) is an I/O failure.
pub fn classify_io_error(path: &Path, err: io::Error) -> StateError {
    let path = path.to_path_buf();
    match err.kind() {
        io::ErrorKind::PermissionDenied => StateError::PermissionDenied { path, source: err },
        _ => StateError::Io { path, source: err },
    }
}

/// Whether a stat error means the path does not exist.
///
/// `NotADirectory` covers a parent component that is a regular file: no entry
/// can exist below it.
pub fn is_not_found(err: &io::Error) -> bool {
    matches!(
        err.kind(),
        io::ErrorKind::NotFound | io::ErrorKind::NotADirectory
    )
}

/// Errors decoding a persisted file state record
#[derive(Debug, Error)]
pub enum RecordError {
    #[error("Record for a {0} must not carry a digest")]
    UnexpectedDigest(&'static str),

    #[error("File record is missing its digest")]
    MissingDigest,

    #[error("Invalid digest encoding: {0}")]
    InvalidDigest(#[from] hex::FromHexError),

    #[error("JSON encoding error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Binary encoding error: {0}")]
    Binary(#[from] bincode::Error),
}

/// Configuration and logging setup errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Configuration error: {0}")]
    Invalid(String),

    #[error("Failed to load configuration: {0}")]
    Load(#[from] config::ConfigError),

    #[error("Logging setup failed: {0}")]
    Logging(String),
}

/// CLI-level failures outside individual path inspection
#[derive(Debug, Error)]
pub enum CliError {
    #[error("Failed to read snapshot {}: {source}", path.display())]
    SnapshotRead {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Invalid snapshot {}: {source}", path.display())]
    SnapshotParse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Failed to encode snapshot: {0}")]
    SnapshotEncode(#[source] serde_json::Error),

    #[error("Invalid record for {}: {source}", path.display())]
    Record {
        path: PathBuf,
        #[source]
        source: RecordError,
    },

    #[error(transparent)]
    Config(#[from] ConfigError),
}
