//! Error types for confsync-fs

use std::path::PathBuf;

/// Result type for confsync-fs operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while reading or writing configuration documents
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Lock acquisition failed for {path}")]
    LockFailed { path: PathBuf },

    #[error("Write rejected for {path}: {message}")]
    WriteRejected { path: PathBuf, message: String },
}

impl Error {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}
