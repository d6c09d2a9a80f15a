//! resgen: Deterministic Resource Snapshots
//!
//! Embeds a directory tree into a generated Rust source file. The tree is
//! filtered by extension, name and path-prefix rules plus marker files,
//! modification times are pinned so unchanged inputs produce byte-identical
//! output, and a license header is prepended to the result.

pub mod cli;
pub mod config;
pub mod error;
pub mod header;
pub mod logging;
pub mod rules;
pub mod scanner;
pub mod serializer;
pub mod snapshot;
pub mod vfs;

pub use error::SnapshotError;
pub use snapshot::{SnapshotDriver, SnapshotPlan, SnapshotReport, SnapshotRequest};
