//! Error types for tplsync-fs

use std::path::PathBuf;

/// Result type for tplsync-fs operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in tplsync-fs operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("File {path} is {size} bytes, exceeding the {limit} byte limit")]
    SizeLimitExceeded {
        path: PathBuf,
        size: u64,
        limit: usize,
    },

    #[error("Template root not found: {path}")]
    RootNotFound { path: PathBuf },

    #[error("Failed to walk {path}: {message}")]
    Walk { path: PathBuf, message: String },
}

impl Error {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}
