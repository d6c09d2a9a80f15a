//! Deterministic modification times
//!
//! Serialized artifacts record entry metadata, so filesystem timestamp noise
//! would otherwise make two runs over the same tree produce different output.

use crate::vfs::{FileSystem, Metadata, VfsFile};
use std::io::{self, Read};
use std::time::{SystemTime, UNIX_EPOCH};

/// Modification time reported for every entry seen through [`FixedModTime`].
pub const ZERO_TIME: SystemTime = UNIX_EPOCH;

/// Decorator reporting [`ZERO_TIME`] as the modification time of every entry.
///
/// Name, size and directory flag pass through untouched, as do all errors.
/// The wrapped view is never written to.
#[derive(Debug, Clone)]
pub struct FixedModTime<F> {
    inner: F,
}

impl<F: FileSystem> FixedModTime<F> {
    pub fn new(inner: F) -> Self {
        Self { inner }
    }

    pub fn into_inner(self) -> F {
        self.inner
    }
}

struct FixedModTimeFile {
    inner: Box<dyn VfsFile>,
}

impl Read for FixedModTimeFile {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        self.inner.read(buf)
    }
}

impl VfsFile for FixedModTimeFile {
    fn metadata(&self) -> io::Result<Metadata> {
        Ok(self.inner.metadata()?.with_modified(ZERO_TIME))
    }
}

impl<F: FileSystem> FileSystem for FixedModTime<F> {
    fn open(&self, path: &str) -> io::Result<Box<dyn VfsFile>> {
        let inner = self.inner.open(path)?;
        Ok(Box::new(FixedModTimeFile { inner }))
    }

    fn stat(&self, path: &str) -> io::Result<Metadata> {
        Ok(self.inner.stat(path)?.with_modified(ZERO_TIME))
    }

    fn read_dir(&self, path: &str) -> io::Result<Vec<Metadata>> {
        Ok(self
            .inner
            .read_dir(path)?
            .into_iter()
            .map(|m| m.with_modified(ZERO_TIME))
            .collect())
    }
}
