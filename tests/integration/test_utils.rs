//! Shared test utilities for integration tests
//!
//! Builds resource trees on disk and runs the snapshot driver or the
//! `resgen` binary against them in isolation.

use resgen::config::ResgenConfig;
use resgen::serializer::RustSourceSerializer;
use resgen::{SnapshotDriver, SnapshotError, SnapshotReport, SnapshotRequest};
use std::fs;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};
use tempfile::TempDir;

/// A temporary project: `root/` holds the targets, `root/out/` receives the artifact.
pub struct Fixture {
    pub dir: TempDir,
}

impl Fixture {
    pub fn new() -> Self {
        let dir = TempDir::new().unwrap();
        fs::create_dir_all(dir.path().join("out")).unwrap();
        Self { dir }
    }

    pub fn root(&self) -> &Path {
        self.dir.path()
    }

    pub fn dest(&self) -> PathBuf {
        self.root().join("out")
    }

    pub fn artifact(&self) -> PathBuf {
        self.dest().join("resources.rs")
    }

    /// Create a file (and its parents) relative to the root.
    pub fn file(&self, rel: &str, contents: &str) -> &Self {
        let path = self.root().join(rel);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(path, contents).unwrap();
        self
    }

    /// Create a directory relative to the root.
    pub fn dir(&self, rel: &str) -> &Self {
        fs::create_dir_all(self.root().join(rel)).unwrap();
        self
    }

    pub fn request(&self, targets: &[&str]) -> SnapshotRequest {
        SnapshotRequest {
            root: self.root().to_path_buf(),
            targets: targets.iter().map(|t| t.to_string()).collect(),
            dest: self.dest(),
        }
    }

    /// Run the driver in-process with `config`.
    pub fn run_with(
        &self,
        config: &ResgenConfig,
        targets: &[&str],
    ) -> Result<SnapshotReport, SnapshotError> {
        SnapshotDriver::new(config, RustSourceSerializer::new()).run(&self.request(targets))
    }

    /// Run the driver in-process with the default configuration.
    pub fn run(&self, targets: &[&str]) -> Result<SnapshotReport, SnapshotError> {
        self.run_with(&ResgenConfig::default(), targets)
    }

    pub fn read_artifact(&self) -> String {
        fs::read_to_string(self.artifact()).unwrap()
    }

    /// Run the `resgen` binary from the root with an isolated config home.
    pub fn resgen(&self, args: &[&str]) -> Output {
        let config_home = self.root().join(".xdg");
        fs::create_dir_all(&config_home).unwrap();
        Command::new(env!("CARGO_BIN_EXE_resgen"))
            .current_dir(self.root())
            .env("XDG_CONFIG_HOME", &config_home)
            .env_remove("RESGEN_LOG")
            .args(args)
            .output()
            .unwrap()
    }
}

/// True if the artifact embeds an entry at `path`.
pub fn embeds(artifact: &str, path: &str) -> bool {
    artifact.contains(&format!("path: {:?},", path))
}
