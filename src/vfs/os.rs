//! OS-backed virtual filesystem rooted at a real directory

use crate::vfs::path::{self, ROOT};
use crate::vfs::{invalid_file_name_error, not_a_directory, FileSystem, Metadata, VfsFile};
use std::fs;
use std::io::{self, Read};
use std::path::{Path, PathBuf};
use std::time::UNIX_EPOCH;
use walkdir::WalkDir;

/// Filesystem view over a directory on disk.
///
/// Virtual `/` maps to `root`. Symbolic links are followed so that embedded
/// contents match the sizes reported for them. Listing a directory holding a
/// name that is not valid UTF-8 fails with [`InvalidFileName`].
///
/// [`InvalidFileName`]: crate::vfs::InvalidFileName
#[derive(Debug, Clone)]
pub struct OsFs {
    root: PathBuf,
}

impl OsFs {
    /// Create a view rooted at the given directory
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Directory this view is rooted at
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Real path backing a virtual path. Cleaning keeps `..` from escaping the root.
    fn resolve(&self, virtual_path: &str) -> (String, PathBuf) {
        let cleaned = path::clean(virtual_path);
        let real = if cleaned == ROOT {
            self.root.clone()
        } else {
            self.root.join(cleaned.trim_start_matches('/'))
        };
        (cleaned, real)
    }

    fn to_metadata(cleaned: &str, meta: &fs::Metadata) -> Metadata {
        let name = path::base_name(cleaned).to_string();
        let modified = meta.modified().unwrap_or(UNIX_EPOCH);
        if meta.is_dir() {
            Metadata::dir(name, modified)
        } else {
            Metadata::file(name, meta.len(), modified)
        }
    }
}

/// Open handle on a real file or directory.
struct OsFile {
    path: String,
    file: Option<fs::File>,
    metadata: Metadata,
}

impl Read for OsFile {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        match self.file.as_mut() {
            Some(file) => file.read(buf),
            None => Err(io::Error::new(
                io::ErrorKind::Other,
                format!("{}: is a directory", self.path),
            )),
        }
    }
}

impl VfsFile for OsFile {
    fn metadata(&self) -> io::Result<Metadata> {
        Ok(self.metadata.clone())
    }
}

impl FileSystem for OsFs {
    fn open(&self, virtual_path: &str) -> io::Result<Box<dyn VfsFile>> {
        let (cleaned, real) = self.resolve(virtual_path);
        let meta = fs::metadata(&real)?;
        let metadata = Self::to_metadata(&cleaned, &meta);
        let file = if meta.is_dir() {
            None
        } else {
            Some(fs::File::open(&real)?)
        };
        Ok(Box::new(OsFile {
            path: cleaned,
            file,
            metadata,
        }))
    }

    fn stat(&self, virtual_path: &str) -> io::Result<Metadata> {
        let (cleaned, real) = self.resolve(virtual_path);
        let meta = fs::metadata(&real)?;
        Ok(Self::to_metadata(&cleaned, &meta))
    }

    fn read_dir(&self, virtual_path: &str) -> io::Result<Vec<Metadata>> {
        let (cleaned, real) = self.resolve(virtual_path);
        let meta = fs::metadata(&real)?;
        if !meta.is_dir() {
            return Err(not_a_directory(&cleaned));
        }

        let walker = WalkDir::new(&real)
            .follow_links(true)
            .min_depth(1)
            .max_depth(1)
            .sort_by_file_name();

        let mut children = Vec::new();
        for entry in walker {
            let entry = entry.map_err(io::Error::from)?;
            let child_meta = entry.metadata().map_err(io::Error::from)?;
            let name = match entry.file_name().to_str() {
                Some(name) => name.to_string(),
                None => return Err(invalid_file_name_error(entry.path().to_path_buf())),
            };
            let child_path = path::join(&cleaned, &name);
            children.push(Self::to_metadata(&child_path, &child_meta));
        }
        Ok(children)
    }
}
