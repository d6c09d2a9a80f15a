//! CLI route: run context resolution and dispatch to the snapshot driver and presentation.

use crate::cli::parse::Cli;
use crate::cli::presentation::{format_plan, format_report};
use crate::config::{ConfigLoader, ResgenConfig};
use crate::error::SnapshotError;
use crate::serializer::RustSourceSerializer;
use crate::snapshot::{SnapshotDriver, SnapshotRequest};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Manifest whose presence marks the default root directory.
const PROJECT_MANIFEST: &str = "Cargo.toml";

/// Nearest ancestor of `start` (inclusive) containing `Cargo.toml`, or `start` itself.
pub fn find_project_root(start: &Path) -> PathBuf {
    start
        .ancestors()
        .find(|dir| dir.join(PROJECT_MANIFEST).is_file())
        .unwrap_or(start)
        .to_path_buf()
}

/// Runtime context for CLI execution: resolved directories and loaded configuration.
pub struct RunContext {
    root: PathBuf,
    dest: PathBuf,
    config: ResgenConfig,
}

impl RunContext {
    /// Resolve root and destination against the working directory and load configuration.
    pub fn new(
        root: Option<PathBuf>,
        dest: Option<PathBuf>,
        config_path: Option<PathBuf>,
    ) -> Result<Self, SnapshotError> {
        let cwd = std::env::current_dir()?;
        let root = match root {
            Some(root) => cwd.join(root),
            None => find_project_root(&cwd),
        };
        let dest = dest.map(|d| cwd.join(d)).unwrap_or(cwd);

        let config = match config_path {
            Some(ref path) => ConfigLoader::load_from_file(path)?,
            None => ConfigLoader::load(&root)?,
        };
        debug!(
            root = %root.display(),
            dest = %dest.display(),
            "Resolved run context"
        );

        Ok(Self { root, dest, config })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn dest(&self) -> &Path {
        &self.dest
    }

    pub fn config(&self) -> &ResgenConfig {
        &self.config
    }

    /// Execute the parsed command and return the text to print on stdout.
    pub fn execute(&self, cli: &Cli) -> Result<String, SnapshotError> {
        if cli.print_config {
            return self.config.to_toml();
        }

        let request = SnapshotRequest {
            root: self.root.clone(),
            targets: cli.targets.clone(),
            dest: self.dest.clone(),
        };
        let driver = SnapshotDriver::new(&self.config, RustSourceSerializer::new());

        if cli.dry_run {
            info!("Dry run requested");
            let plan = driver.plan(&request)?;
            return format_plan(&plan, cli.format);
        }

        let report = driver.run(&request)?;
        format_report(&report, cli.format)
    }
}
