//! In-memory filesystem for exercising views without touching disk

use crate::vfs::path::{self, ROOT};
use crate::vfs::{not_a_directory, not_found, FileSystem, Metadata, VfsFile};
use std::collections::{BTreeMap, BTreeSet};
use std::io::{self, Cursor, Read};
use std::time::{Duration, SystemTime, UNIX_EPOCH};

#[derive(Debug, Clone)]
enum Node {
    Dir,
    File(Vec<u8>),
}

/// A file tree held entirely in memory.
///
/// Parent directories are created implicitly. Paths registered with
/// [`MemoryFs::with_denied`] fail every access with `PermissionDenied`.
#[derive(Debug, Clone)]
pub struct MemoryFs {
    nodes: BTreeMap<String, Node>,
    modified: SystemTime,
    denied: BTreeSet<String>,
}

impl Default for MemoryFs {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryFs {
    /// Create an empty tree containing only the root directory
    pub fn new() -> Self {
        let mut nodes = BTreeMap::new();
        nodes.insert(ROOT.to_string(), Node::Dir);
        Self {
            nodes,
            modified: UNIX_EPOCH + Duration::from_secs(1_700_000_000),
            denied: BTreeSet::new(),
        }
    }

    /// Add a file (and any missing parent directories)
    pub fn with_file(mut self, file_path: &str, contents: impl AsRef<[u8]>) -> Self {
        let cleaned = path::clean(file_path);
        self.ensure_parents(&cleaned);
        self.nodes
            .insert(cleaned, Node::File(contents.as_ref().to_vec()));
        self
    }

    /// Add a directory (and any missing parent directories)
    pub fn with_dir(mut self, dir_path: &str) -> Self {
        let cleaned = path::clean(dir_path);
        self.ensure_parents(&cleaned);
        self.nodes.insert(cleaned, Node::Dir);
        self
    }

    /// Modification time reported for every entry
    pub fn with_modified(mut self, modified: SystemTime) -> Self {
        self.modified = modified;
        self
    }

    /// Make every access to `path` fail with `PermissionDenied`
    pub fn with_denied(mut self, denied_path: &str) -> Self {
        self.denied.insert(path::clean(denied_path));
        self
    }

    fn ensure_parents(&mut self, cleaned: &str) {
        let ancestors = path::ancestors(cleaned);
        for ancestor in ancestors.iter().take(ancestors.len().saturating_sub(1)) {
            self.nodes
                .entry((*ancestor).to_string())
                .or_insert(Node::Dir);
        }
    }

    fn lookup(&self, virtual_path: &str) -> io::Result<(String, &Node)> {
        let cleaned = path::clean(virtual_path);
        if self.denied.contains(&cleaned) {
            return Err(io::Error::new(
                io::ErrorKind::PermissionDenied,
                format!("{}: permission denied", cleaned),
            ));
        }
        match self.nodes.get(&cleaned) {
            Some(node) => Ok((cleaned, node)),
            None => Err(not_found(&cleaned)),
        }
    }

    fn metadata_for(&self, cleaned: &str, node: &Node) -> Metadata {
        let name = path::base_name(cleaned).to_string();
        match node {
            Node::Dir => Metadata::dir(name, self.modified),
            Node::File(contents) => Metadata::file(name, contents.len() as u64, self.modified),
        }
    }
}

struct MemoryFile {
    reader: Cursor<Vec<u8>>,
    metadata: Metadata,
}

impl Read for MemoryFile {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        self.reader.read(buf)
    }
}

impl VfsFile for MemoryFile {
    fn metadata(&self) -> io::Result<Metadata> {
        Ok(self.metadata.clone())
    }
}

impl FileSystem for MemoryFs {
    fn open(&self, virtual_path: &str) -> io::Result<Box<dyn VfsFile>> {
        let (cleaned, node) = self.lookup(virtual_path)?;
        let metadata = self.metadata_for(&cleaned, node);
        let contents = match node {
            Node::File(contents) => contents.clone(),
            Node::Dir => Vec::new(),
        };
        Ok(Box::new(MemoryFile {
            reader: Cursor::new(contents),
            metadata,
        }))
    }

    fn stat(&self, virtual_path: &str) -> io::Result<Metadata> {
        let (cleaned, node) = self.lookup(virtual_path)?;
        Ok(self.metadata_for(&cleaned, node))
    }

    fn read_dir(&self, virtual_path: &str) -> io::Result<Vec<Metadata>> {
        let (cleaned, node) = self.lookup(virtual_path)?;
        if let Node::File(_) = node {
            return Err(not_a_directory(&cleaned));
        }

        let prefix = if cleaned == ROOT {
            ROOT.to_string()
        } else {
            format!("{}/", cleaned)
        };

        let mut children = Vec::new();
        for (child_path, child) in self.nodes.range(prefix.clone()..) {
            if !child_path.starts_with(&prefix) {
                break;
            }
            if child_path == &cleaned {
                continue;
            }
            let rest = &child_path[prefix.len()..];
            if rest.contains('/') {
                continue;
            }
            children.push(self.metadata_for(child_path, child));
        }
        children.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(children)
    }
}
