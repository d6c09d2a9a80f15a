//! Rust source serializer
//!
//! Emits a self-contained Rust module holding sorted `DIRS` and `FILES`
//! tables plus lookup helpers. The output is a pure function of the view:
//! entries are visited in name order and every value written comes from the
//! view's metadata, so an unchanged tree behind [`FixedModTime`] always
//! renders to the same bytes.
//!
//! [`FixedModTime`]: crate::vfs::FixedModTime

use crate::error::SnapshotError;
use crate::serializer::{GenerateOptions, GenerateSummary, Serializer};
use crate::vfs::path::ROOT;
use crate::vfs::{Entry, FileSystem, Metadata, Walker};
use std::collections::BTreeMap;
use std::fmt::{self, Write as _};
use std::io::Read;
use std::time::UNIX_EPOCH;
use tracing::{debug, instrument};

/// First line of every generated artifact.
pub const GENERATED_MARKER: &str = "// Code generated by resgen. DO NOT EDIT.";

/// Writes embedded resources as a Rust module.
#[derive(Debug, Clone, Default)]
pub struct RustSourceSerializer;

struct EmbeddedDir {
    path: String,
    metadata: Metadata,
    entries: Vec<String>,
}

struct EmbeddedFile {
    path: String,
    metadata: Metadata,
    contents: Vec<u8>,
}

impl RustSourceSerializer {
    pub fn new() -> Self {
        Self
    }

    /// Render the artifact text without writing it.
    pub fn render(
        &self,
        vfs: &dyn FileSystem,
        identifier: &str,
    ) -> Result<(String, GenerateSummary), SnapshotError> {
        let root_metadata = vfs.stat(ROOT)?;
        let entries = Walker::new(vfs).walk()?;

        let mut dirs: BTreeMap<String, EmbeddedDir> = BTreeMap::new();
        dirs.insert(
            ROOT.to_string(),
            EmbeddedDir {
                path: ROOT.to_string(),
                metadata: root_metadata,
                entries: Vec::new(),
            },
        );
        let mut files: BTreeMap<String, EmbeddedFile> = BTreeMap::new();

        for entry in entries {
            let parent = parent_of(entry.path()).to_string();
            if let Some(dir) = dirs.get_mut(&parent) {
                dir.entries.push(entry.metadata().name.clone());
            }
            match entry {
                Entry::Directory { path, metadata } => {
                    dirs.insert(
                        path.clone(),
                        EmbeddedDir {
                            path,
                            metadata,
                            entries: Vec::new(),
                        },
                    );
                }
                Entry::File { path, metadata } => {
                    let mut contents = Vec::with_capacity(metadata.size as usize);
                    vfs.open(&path)?.read_to_end(&mut contents)?;
                    files.insert(
                        path.clone(),
                        EmbeddedFile {
                            path,
                            metadata,
                            contents,
                        },
                    );
                }
            }
        }

        let summary = GenerateSummary {
            files: files.len(),
            dirs: dirs.len(),
            bytes: files.values().map(|f| f.contents.len() as u64).sum(),
        };

        let mut out = String::new();
        write_module(&mut out, identifier, &dirs, &files)
            .map_err(|e| SnapshotError::Serialize(format!("Failed to render module: {}", e)))?;
        Ok((out, summary))
    }
}

impl Serializer for RustSourceSerializer {
    #[instrument(skip(self, vfs, options), fields(file = %options.filename.display()))]
    fn generate(
        &self,
        vfs: &dyn FileSystem,
        options: &GenerateOptions,
    ) -> Result<GenerateSummary, SnapshotError> {
        let (source, summary) = self.render(vfs, &options.identifier)?;
        std::fs::write(&options.filename, source).map_err(|e| {
            SnapshotError::Serialize(format!(
                "Failed to write {}: {}",
                options.filename.display(),
                e
            ))
        })?;
        debug!(
            files = summary.files,
            dirs = summary.dirs,
            bytes = summary.bytes,
            "Wrote embedded resources"
        );
        Ok(summary)
    }
}

fn parent_of(path: &str) -> &str {
    match path.rfind('/') {
        Some(0) | None => ROOT,
        Some(idx) => &path[..idx],
    }
}

fn mod_time_secs(metadata: &Metadata) -> u64 {
    metadata
        .modified
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0)
}

fn write_module(
    out: &mut String,
    identifier: &str,
    dirs: &BTreeMap<String, EmbeddedDir>,
    files: &BTreeMap<String, EmbeddedFile>,
) -> fmt::Result {
    writeln!(out, "{}", GENERATED_MARKER)?;
    writeln!(out)?;
    writeln!(out, "// Embedded resources for `{}`.", identifier)?;
    writeln!(out)?;
    writeln!(out, "/// Identifier of this resource set.")?;
    writeln!(out, "pub const NAMESPACE: &str = {:?};", identifier)?;
    writeln!(out)?;
    out.push_str(TYPES);
    writeln!(out)?;

    writeln!(out, "/// Embedded directories, sorted by path.")?;
    writeln!(out, "pub static DIRS: &[EmbeddedDir] = &[")?;
    for dir in dirs.values() {
        writeln!(out, "    EmbeddedDir {{")?;
        writeln!(out, "        path: {:?},", dir.path)?;
        writeln!(out, "        name: {:?},", dir.metadata.name)?;
        writeln!(out, "        mod_time: {},", mod_time_secs(&dir.metadata))?;
        write!(out, "        entries: &[")?;
        for (idx, name) in dir.entries.iter().enumerate() {
            if idx > 0 {
                write!(out, ", ")?;
            }
            write!(out, "{:?}", name)?;
        }
        writeln!(out, "],")?;
        writeln!(out, "    }},")?;
    }
    writeln!(out, "];")?;
    writeln!(out)?;

    writeln!(out, "/// Embedded files, sorted by path.")?;
    writeln!(out, "pub static FILES: &[EmbeddedFile] = &[")?;
    for file in files.values() {
        writeln!(out, "    EmbeddedFile {{")?;
        writeln!(out, "        path: {:?},", file.path)?;
        writeln!(out, "        name: {:?},", file.metadata.name)?;
        writeln!(out, "        size: {},", file.contents.len())?;
        writeln!(out, "        mod_time: {},", mod_time_secs(&file.metadata))?;
        writeln!(out, "        contents: {},", byte_literal(&file.contents))?;
        writeln!(out, "    }},")?;
    }
    writeln!(out, "];")?;
    writeln!(out)?;
    out.push_str(LOOKUPS);
    Ok(())
}

/// Escape bytes into a Rust byte-string literal.
pub fn byte_literal(bytes: &[u8]) -> String {
    let mut out = String::with_capacity(bytes.len() + 3);
    out.push_str("b\"");
    for &b in bytes {
        match b {
            b'\\' => out.push_str("\\\\"),
            b'"' => out.push_str("\\\""),
            b'\n' => out.push_str("\\n"),
            b'\r' => out.push_str("\\r"),
            b'\t' => out.push_str("\\t"),
            0x20..=0x7e => out.push(b as char),
            _ => out.push_str(&format!("\\x{:02x}", b)),
        }
    }
    out.push('"');
    out
}

const TYPES: &str = r#"/// A directory captured in the snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EmbeddedDir {
    pub path: &'static str,
    pub name: &'static str,
    pub mod_time: u64,
    pub entries: &'static [&'static str],
}

/// A file captured in the snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EmbeddedFile {
    pub path: &'static str,
    pub name: &'static str,
    pub size: u64,
    pub mod_time: u64,
    pub contents: &'static [u8],
}
"#;

const LOOKUPS: &str = r#"/// Look up an embedded file by its `/`-rooted path.
pub fn file(path: &str) -> Option<&'static EmbeddedFile> {
    FILES
        .binary_search_by(|f| f.path.cmp(path))
        .ok()
        .map(|idx| &FILES[idx])
}

/// Look up an embedded directory by its `/`-rooted path.
pub fn dir(path: &str) -> Option<&'static EmbeddedDir> {
    DIRS
        .binary_search_by(|d| d.path.cmp(path))
        .ok()
        .map(|idx| &DIRS[idx])
}

/// Contents of an embedded file.
pub fn read(path: &str) -> Option<&'static [u8]> {
    file(path).map(|f| f.contents)
}
"#;
