//! Config loading facade: assembles sources in precedence order and validates.

use crate::config::merge::merge_policy;
use crate::config::sources::{environment, global_file, workspace_file};
use crate::config::ResgenConfig;
use crate::error::SnapshotError;
use std::path::Path;
use tracing::debug;

/// Loads [`ResgenConfig`] from defaults, files and environment.
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration for a project root.
    ///
    /// Precedence (lowest to highest): defaults, user-level file,
    /// `resgen.toml`, `resgen.{RESGEN_ENV}.toml`, `RESGEN_*` variables.
    pub fn load(project_root: &Path) -> Result<ResgenConfig, SnapshotError> {
        let builder = merge_policy::builder_with_defaults()?;
        let builder = global_file::add_to_builder(builder)?;
        let builder = workspace_file::add_to_builder(builder, project_root)?;
        let builder = environment::add_to_builder(builder);
        let config: ResgenConfig = builder.build()?.try_deserialize()?;
        debug!(project_root = %project_root.display(), "Loaded configuration");
        Self::validated(config)
    }

    /// Load configuration from an explicit file, skipping file discovery.
    pub fn load_from_file(config_path: &Path) -> Result<ResgenConfig, SnapshotError> {
        let builder = merge_policy::builder_with_defaults()?;
        let builder = workspace_file::add_explicit(builder, config_path);
        let builder = environment::add_to_builder(builder);
        let config: ResgenConfig = builder.build()?.try_deserialize()?;
        debug!(config_path = %config_path.display(), "Loaded configuration file");
        Self::validated(config)
    }

    fn validated(config: ResgenConfig) -> Result<ResgenConfig, SnapshotError> {
        config.validate().map_err(|errors| {
            SnapshotError::Config(
                errors
                    .iter()
                    .map(|e| e.to_string())
                    .collect::<Vec<_>>()
                    .join("; "),
            )
        })?;
        Ok(config)
    }
}
