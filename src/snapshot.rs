//! Snapshot driver
//!
//! Validates the requested directories, scans for marker files, stacks the
//! views (OS directory, fixed modification times, rule filter), hands the
//! result to the serializer and finally injects the header.

use crate::config::ResgenConfig;
use crate::error::SnapshotError;
use crate::header;
use crate::rules::RuleChain;
use crate::scanner::{ExclusionPrefix, MarkerScanner};
use crate::serializer::{GenerateOptions, Serializer};
use crate::vfs::{path, Entry, FileSystem, Filtered, FixedModTime, OsFs, Walker};
use serde::Serialize;
use std::collections::BTreeSet;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::time::Instant;
use tracing::{debug, info, instrument};

/// Directories a run reads from and writes to.
#[derive(Debug, Clone)]
pub struct SnapshotRequest {
    /// Directory the targets are resolved against
    pub root: PathBuf,
    /// Target subdirectory names; the first is snapshotted, all are scanned for markers
    pub targets: Vec<String>,
    /// Directory receiving the artifact
    pub dest: PathBuf,
}

impl SnapshotRequest {
    /// The subdirectory that is actually snapshotted.
    pub fn primary_target(&self) -> Result<&str, SnapshotError> {
        self.targets
            .first()
            .map(String::as_str)
            .ok_or_else(|| SnapshotError::Config("At least one target directory is required".to_string()))
    }
}

/// Summary of a completed run.
#[derive(Debug, Clone, Serialize)]
pub struct SnapshotReport {
    pub artifact: PathBuf,
    pub identifier: String,
    pub target: String,
    pub files: usize,
    pub dirs: usize,
    pub bytes: u64,
    pub exclusions: Vec<String>,
    /// BLAKE3 digest of the final artifact, hex encoded
    pub digest: String,
}

/// One entry that would be embedded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PlannedEntry {
    pub path: String,
    pub is_dir: bool,
    pub size: u64,
}

/// Result of a dry run.
#[derive(Debug, Clone, Serialize)]
pub struct SnapshotPlan {
    pub target: String,
    pub artifact: PathBuf,
    pub exclusions: Vec<String>,
    pub entries: Vec<PlannedEntry>,
}

/// Check that `path` exists and is a directory.
pub fn check_dir(path: &Path) -> Result<(), SnapshotError> {
    match fs::metadata(path) {
        Ok(meta) if meta.is_dir() => Ok(()),
        Ok(_) => Err(SnapshotError::NotADirectory(path.to_path_buf())),
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            Err(SnapshotError::MissingPath(path.to_path_buf()))
        }
        Err(e) => Err(SnapshotError::Io(e)),
    }
}

/// Turn a directory name into a Rust identifier.
///
/// Characters outside `[A-Za-z0-9_]` become `_`; a leading digit gets a `_` prefix.
pub fn sanitize_identifier(name: &str) -> String {
    let mut ident: String = name
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() || c == '_' { c } else { '_' })
        .collect();
    if ident.is_empty() {
        ident.push_str("resources");
    }
    if ident.starts_with(|c: char| c.is_ascii_digit()) {
        ident.insert(0, '_');
    }
    ident
}

/// Identifier derived from the destination directory's name.
pub fn artifact_identifier(dest: &Path) -> Result<String, SnapshotError> {
    let canonical = dunce::canonicalize(dest)?;
    let name = canonical
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    Ok(sanitize_identifier(&name))
}

/// Runs snapshots with a given configuration and serializer.
pub struct SnapshotDriver<'a, S> {
    config: &'a ResgenConfig,
    serializer: S,
}

impl<'a, S: Serializer> SnapshotDriver<'a, S> {
    pub fn new(config: &'a ResgenConfig, serializer: S) -> Self {
        Self { config, serializer }
    }

    /// Validate directories and assemble the filtered, deterministic view.
    fn prepare(
        &self,
        request: &SnapshotRequest,
    ) -> Result<(Filtered<FixedModTime<OsFs>>, BTreeSet<ExclusionPrefix>), SnapshotError> {
        let target = request.primary_target()?;
        check_dir(&request.root)?;
        let target_dir = request.root.join(target);
        check_dir(&target_dir)?;
        check_dir(&request.dest)?;

        let scanner = MarkerScanner::new(self.config.rules.marker_file.clone());
        let exclusions = scanner.scan_subtrees(&request.root, &request.targets)?;
        debug!(
            exclusions = ?exclusions.iter().map(|e| e.as_str()).collect::<Vec<_>>(),
            "Computed marker exclusions"
        );

        let rules = RuleChain::from_config(&self.config.rules, &exclusions);
        let view = Filtered::new(FixedModTime::new(OsFs::new(target_dir)), rules);
        Ok((view, exclusions))
    }

    fn artifact_path(&self, request: &SnapshotRequest) -> PathBuf {
        request.dest.join(&self.config.output.file_name)
    }

    /// Generate the artifact and inject the header.
    #[instrument(skip(self, request), fields(root = %request.root.display(), dest = %request.dest.display()))]
    pub fn run(&self, request: &SnapshotRequest) -> Result<SnapshotReport, SnapshotError> {
        let start = Instant::now();
        let (view, exclusions) = self.prepare(request)?;
        let target = request.primary_target()?.to_string();
        let header_text = self.config.output.resolve_header(&request.root)?;

        let options = GenerateOptions {
            filename: self.artifact_path(request),
            identifier: artifact_identifier(&request.dest)?,
        };
        info!(
            target = %target,
            artifact = %options.filename.display(),
            "Generating snapshot"
        );

        let summary = self.serializer.generate(&view, &options)?;
        header::prepend_header(&options.filename, &header_text)?;

        let final_bytes = fs::read(&options.filename).map_err(|e| SnapshotError::PostProcess {
            path: options.filename.clone(),
            source: e,
        })?;
        let digest = hex::encode(blake3::hash(&final_bytes).as_bytes());

        info!(
            files = summary.files,
            dirs = summary.dirs,
            bytes = summary.bytes,
            duration_ms = start.elapsed().as_millis() as u64,
            "Snapshot complete"
        );

        Ok(SnapshotReport {
            artifact: options.filename,
            identifier: options.identifier,
            target,
            files: summary.files,
            dirs: summary.dirs,
            bytes: summary.bytes,
            exclusions: exclusions.iter().map(|e| e.to_string()).collect(),
            digest,
        })
    }

    /// List what `run` would embed without writing anything.
    #[instrument(skip(self, request), fields(root = %request.root.display()))]
    pub fn plan(&self, request: &SnapshotRequest) -> Result<SnapshotPlan, SnapshotError> {
        let (view, exclusions) = self.prepare(request)?;

        // Report skipped children of every visible directory at debug level.
        if tracing::enabled!(tracing::Level::DEBUG) {
            self.log_skipped(&view)?;
        }

        let entries = Walker::new(&view)
            .walk()?
            .into_iter()
            .map(|entry| PlannedEntry {
                path: entry.path().to_string(),
                is_dir: entry.is_dir(),
                size: entry.metadata().size,
            })
            .collect();

        Ok(SnapshotPlan {
            target: request.primary_target()?.to_string(),
            artifact: self.artifact_path(request),
            exclusions: exclusions.iter().map(|e| e.to_string()).collect(),
            entries,
        })
    }

    fn log_skipped(&self, view: &Filtered<FixedModTime<OsFs>>) -> Result<(), SnapshotError> {
        let mut dirs = vec![path::ROOT.to_string()];
        dirs.extend(
            Walker::new(view)
                .walk()?
                .into_iter()
                .filter(Entry::is_dir)
                .map(|e| e.path().to_string()),
        );
        for dir in dirs {
            for child in view.inner().read_dir(&dir)? {
                let child_path = path::join(&dir, &child.name);
                if let Some(rule) = view.rules().explain(&child_path, &child) {
                    debug!(path = %child_path, rule, "Skipped");
                }
            }
        }
        Ok(())
    }
}
