//! Error types for tplsync-core

use std::path::PathBuf;

/// Result type for tplsync-core operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that abort a run.
///
/// Per-record failures never show up here; handlers turn them into
/// counters on [`crate::RunStats`].
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The template root could not be located
    #[error("Template root not found at {path}")]
    RootNotFound { path: PathBuf },

    /// The policy file exists but could not be parsed
    #[error("Failed to parse {format} policy at {path}: {message}")]
    ConfigParse {
        path: PathBuf,
        format: String,
        message: String,
    },

    /// The policy file has an extension we cannot read
    #[error("Unsupported policy format: {extension}")]
    UnsupportedFormat { extension: String },

    /// The database exists but could not be read
    #[error("Failed to read database {path}: {source}")]
    DatabaseRead {
        path: PathBuf,
        #[source]
        source: tplsync_fs::Error,
    },

    /// The database could not be written; no files were deleted
    #[error("Failed to write database {path}: {source}")]
    DatabaseWrite {
        path: PathBuf,
        #[source]
        source: tplsync_fs::Error,
    },

    /// Filesystem error from tplsync-fs
    #[error(transparent)]
    Fs(#[from] tplsync_fs::Error),
}
