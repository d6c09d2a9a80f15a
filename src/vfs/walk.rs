//! Depth-first traversal of a virtual filesystem

use crate::vfs::path::{self, ROOT};
use crate::vfs::{FileSystem, Metadata};
use std::io;

/// Filesystem entry types
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Entry {
    /// A file entry with its virtual path
    File { path: String, metadata: Metadata },
    /// A directory entry with its virtual path
    Directory { path: String, metadata: Metadata },
}

impl Entry {
    pub fn path(&self) -> &str {
        match self {
            Entry::File { path, .. } | Entry::Directory { path, .. } => path,
        }
    }

    pub fn metadata(&self) -> &Metadata {
        match self {
            Entry::File { metadata, .. } | Entry::Directory { metadata, .. } => metadata,
        }
    }

    pub fn is_dir(&self) -> bool {
        matches!(self, Entry::Directory { .. })
    }
}

/// Walker over any [`FileSystem`]
///
/// Only descends into directories the view lists, so a filtered view's
/// skipped subtrees are never visited.
pub struct Walker<'a, F: ?Sized> {
    vfs: &'a F,
    start: String,
}

impl<'a, F: FileSystem + ?Sized> Walker<'a, F> {
    /// Create a walker starting at the view's root
    pub fn new(vfs: &'a F) -> Self {
        Self {
            vfs,
            start: ROOT.to_string(),
        }
    }

    /// Start the walk at a different directory
    pub fn from_dir(mut self, dir: &str) -> Self {
        self.start = path::clean(dir);
        self
    }

    /// Walk the view and collect all entries below the start directory
    ///
    /// Entries come out depth-first in name order, so the sequence is
    /// deterministic for a given tree. The start directory itself is not
    /// included.
    pub fn walk(&self) -> io::Result<Vec<Entry>> {
        let mut entries = Vec::new();
        self.walk_dir(&self.start, &mut entries)?;
        Ok(entries)
    }

    fn walk_dir(&self, dir: &str, entries: &mut Vec<Entry>) -> io::Result<()> {
        let mut children = self.vfs.read_dir(dir)?;
        children.sort_by(|a, b| a.name.cmp(&b.name));

        for metadata in children {
            let child_path = path::join(dir, &metadata.name);
            if metadata.is_dir {
                entries.push(Entry::Directory {
                    path: child_path.clone(),
                    metadata,
                });
                self.walk_dir(&child_path, entries)?;
            } else {
                entries.push(Entry::File {
                    path: child_path,
                    metadata,
                });
            }
        }
        Ok(())
    }
}
