//! Error types for the resgen snapshot generator.

use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while building a snapshot.
///
/// Every variant is terminal: a run either succeeds completely or aborts on
/// the first error.
#[derive(Debug, Error)]
pub enum SnapshotError {
    #[error("Path does not exist: {0}")]
    MissingPath(PathBuf),

    #[error("Path {0} is not a directory")]
    NotADirectory(PathBuf),

    #[error("Failed to scan {path} for markers: {source}")]
    Scan {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Serialization failed: {0}")]
    Serialize(String),

    #[error("Failed to write header into {path}: {source}")]
    PostProcess {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("File name is not valid UTF-8: {0}")]
    InvalidFileName(PathBuf),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("I/O error: {0}")]
    Io(#[source] std::io::Error),
}

impl From<std::io::Error> for SnapshotError {
    fn from(err: std::io::Error) -> Self {
        match crate::vfs::invalid_file_name(&err) {
            Some(path) => SnapshotError::InvalidFileName(path),
            None => SnapshotError::Io(err),
        }
    }
}

impl From<config::ConfigError> for SnapshotError {
    fn from(err: config::ConfigError) -> Self {
        SnapshotError::Config(err.to_string())
    }
}
