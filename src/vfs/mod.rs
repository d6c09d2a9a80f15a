//! Virtual filesystem layer
//!
//! A small read-only file-tree capability (`open`, `stat`, `read_dir`) that
//! snapshot stages compose as decorators: an OS-backed view at the bottom,
//! then metadata normalization, then rule-based filtering on top.

pub mod filter;
pub mod memory;
pub mod modtime;
pub mod os;
pub mod path;
pub mod walk;

use std::io::{self, Read};
use std::path::PathBuf;
use std::time::SystemTime;
use thiserror::Error;

pub use filter::Filtered;
pub use memory::MemoryFs;
pub use modtime::FixedModTime;
pub use os::OsFs;
pub use walk::{Entry, Walker};

/// Metadata reported for a single filesystem entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Metadata {
    /// Base name of the entry (`/` for the root)
    pub name: String,
    /// Size in bytes (0 for directories)
    pub size: u64,
    /// Last modification time as reported by the view
    pub modified: SystemTime,
    /// Whether the entry is a directory
    pub is_dir: bool,
}

impl Metadata {
    /// Metadata for a regular file.
    pub fn file(name: impl Into<String>, size: u64, modified: SystemTime) -> Self {
        Self {
            name: name.into(),
            size,
            modified,
            is_dir: false,
        }
    }

    /// Metadata for a directory.
    pub fn dir(name: impl Into<String>, modified: SystemTime) -> Self {
        Self {
            name: name.into(),
            size: 0,
            modified,
            is_dir: true,
        }
    }

    /// Same metadata with the modification time replaced.
    pub fn with_modified(mut self, modified: SystemTime) -> Self {
        self.modified = modified;
        self
    }
}

/// An open handle returned by [`FileSystem::open`].
pub trait VfsFile: Read {
    /// Metadata of the opened entry.
    fn metadata(&self) -> io::Result<Metadata>;
}

/// Read-only file-tree capability.
///
/// Paths are virtual: `/`-rooted and `/`-separated. Implementations clean
/// the paths they receive with [`path::clean`].
pub trait FileSystem {
    /// Open an entry for reading.
    fn open(&self, path: &str) -> io::Result<Box<dyn VfsFile>>;

    /// Metadata for an entry.
    fn stat(&self, path: &str) -> io::Result<Metadata>;

    /// Metadata of a directory's children, sorted by name.
    fn read_dir(&self, path: &str) -> io::Result<Vec<Metadata>>;
}

impl<F: FileSystem + ?Sized> FileSystem for &F {
    fn open(&self, path: &str) -> io::Result<Box<dyn VfsFile>> {
        (**self).open(path)
    }

    fn stat(&self, path: &str) -> io::Result<Metadata> {
        (**self).stat(path)
    }

    fn read_dir(&self, path: &str) -> io::Result<Vec<Metadata>> {
        (**self).read_dir(path)
    }
}

impl<F: FileSystem + ?Sized> FileSystem for Box<F> {
    fn open(&self, path: &str) -> io::Result<Box<dyn VfsFile>> {
        (**self).open(path)
    }

    fn stat(&self, path: &str) -> io::Result<Metadata> {
        (**self).stat(path)
    }

    fn read_dir(&self, path: &str) -> io::Result<Vec<Metadata>> {
        (**self).read_dir(path)
    }
}

/// Error for paths hidden by a view or absent from it.
pub(crate) fn not_found(path: &str) -> io::Error {
    io::Error::new(
        io::ErrorKind::NotFound,
        format!("{}: no such file or directory", path),
    )
}

/// Error for operations that need a directory but got a file.
pub(crate) fn not_a_directory(path: &str) -> io::Error {
    io::Error::new(
        io::ErrorKind::Other,
        format!("{}: not a directory", path),
    )
}

/// A directory entry whose name cannot be expressed as a virtual path.
///
/// Carried inside an [`io::Error`] of kind `InvalidData` so it survives the
/// trait boundary; recover it with [`invalid_file_name`].
#[derive(Debug, Error)]
#[error("file name is not valid UTF-8: {}", .0.display())]
pub struct InvalidFileName(pub PathBuf);

pub(crate) fn invalid_file_name_error(real_path: PathBuf) -> io::Error {
    io::Error::new(io::ErrorKind::InvalidData, InvalidFileName(real_path))
}

/// Real path of the offending entry if `err` reports an [`InvalidFileName`].
pub fn invalid_file_name(err: &io::Error) -> Option<PathBuf> {
    err.get_ref()
        .and_then(|inner| inner.downcast_ref::<InvalidFileName>())
        .map(|name| name.0.clone())
}
