//! Marker scan for snapshot exclusions.
//!
//! A directory is excluded from a snapshot, together with everything below
//! it, when it contains the marker file (`.vfsignore` by default). Only the
//! marker's presence matters; its contents are never read. The scan runs
//! once per snapshot and yields the set of excluded subtree prefixes,
//! relative to the scanned subtree and always starting with `/`.

use crate::error::SnapshotError;
use crate::vfs::path::{self, ROOT};
use crate::vfs::{FileSystem, OsFs, Walker};
use std::collections::BTreeSet;
use std::fmt;
use std::io;
use std::path::Path;
use tracing::{debug, instrument, trace};

/// Normalized subtree path excluded from a snapshot.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ExclusionPrefix(String);

impl ExclusionPrefix {
    /// Build a prefix from a path relative to the scanned subtree.
    ///
    /// `sub`, `/sub` and `/sub/` all become `/sub`; the subtree root itself
    /// becomes `/`.
    pub fn new(relative: &str) -> Self {
        Self(path::clean(relative))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ExclusionPrefix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for ExclusionPrefix {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Finds directories carrying the marker file.
#[derive(Debug, Clone)]
pub struct MarkerScanner {
    marker: String,
}

impl MarkerScanner {
    pub fn new(marker: impl Into<String>) -> Self {
        Self {
            marker: marker.into(),
        }
    }

    /// Marker file name this scanner looks for
    pub fn marker(&self) -> &str {
        &self.marker
    }

    /// Whether `dir` contains the marker file.
    ///
    /// A missing marker is the normal case; any other failure is fatal.
    pub fn has_marker<F: FileSystem + ?Sized>(
        &self,
        vfs: &F,
        dir: &str,
    ) -> Result<bool, SnapshotError> {
        let marker_path = path::join(dir, &self.marker);
        match vfs.stat(&marker_path) {
            Ok(_) => Ok(true),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(false),
            Err(e) => Err(SnapshotError::Scan {
                path: marker_path,
                source: e,
            }),
        }
    }

    /// Scan every directory of a view, root included.
    pub fn scan<F: FileSystem + ?Sized>(
        &self,
        vfs: &F,
    ) -> Result<BTreeSet<ExclusionPrefix>, SnapshotError> {
        let mut exclusions = BTreeSet::new();

        if self.has_marker(vfs, ROOT)? {
            trace!(dir = ROOT, "Marker found");
            exclusions.insert(ExclusionPrefix::new(ROOT));
        }

        let entries = Walker::new(vfs)
            .walk()
            .map_err(|e| match crate::vfs::invalid_file_name(&e) {
                Some(real_path) => SnapshotError::InvalidFileName(real_path),
                None => SnapshotError::Scan {
                    path: ROOT.to_string(),
                    source: e,
                },
            })?;

        for entry in entries.iter().filter(|e| e.is_dir()) {
            if self.has_marker(vfs, entry.path())? {
                trace!(dir = entry.path(), "Marker found");
                exclusions.insert(ExclusionPrefix::new(entry.path()));
            }
        }

        Ok(exclusions)
    }

    /// Scan `root/<name>` for each subtree name and merge the results.
    ///
    /// Prefixes are relative to each scanned subtree, so a marker in
    /// `root/a/x` and one in `root/b/x` both yield `/x`.
    #[instrument(skip(self, names), fields(marker = %self.marker))]
    pub fn scan_subtrees(
        &self,
        root: &Path,
        names: &[String],
    ) -> Result<BTreeSet<ExclusionPrefix>, SnapshotError> {
        let mut exclusions = BTreeSet::new();
        for name in names {
            let subtree = root.join(name);
            let found = self.scan(&OsFs::new(&subtree))?;
            debug!(
                subtree = %subtree.display(),
                count = found.len(),
                "Scanned subtree for markers"
            );
            exclusions.extend(found);
        }
        Ok(exclusions)
    }
}
