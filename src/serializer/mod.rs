//! Artifact serializers
//!
//! A serializer turns a (filtered, normalized) virtual filesystem into a
//! source artifact that embeds every visible file.

pub mod rust_source;

use crate::error::SnapshotError;
use crate::vfs::FileSystem;
use serde::Serialize;
use std::path::PathBuf;

pub use rust_source::RustSourceSerializer;

/// Output target handed to a serializer.
#[derive(Debug, Clone)]
pub struct GenerateOptions {
    /// File to write (overwritten if present)
    pub filename: PathBuf,
    /// Identifier naming the embedded resource set
    pub identifier: String,
}

/// What a serializer embedded.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct GenerateSummary {
    pub files: usize,
    pub dirs: usize,
    pub bytes: u64,
}

/// Encodes a virtual filesystem into an artifact on disk.
pub trait Serializer {
    fn generate(
        &self,
        vfs: &dyn FileSystem,
        options: &GenerateOptions,
    ) -> Result<GenerateSummary, SnapshotError>;
}
