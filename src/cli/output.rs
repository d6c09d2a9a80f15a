//! CLI output: error mapping from snapshot errors to stable CLI surface.

use crate::error::SnapshotError;

/// Map snapshot errors to a string for CLI output.
pub fn map_error(e: &SnapshotError) -> String {
    match e {
        SnapshotError::MissingPath(_) | SnapshotError::NotADirectory(_) => {
            format!("Invalid arguments: {}", e)
        }
        SnapshotError::Config(_) => e.to_string(),
        _ => format!("Snapshot failed: {}", e),
    }
}
