//! Project config file source: resgen.toml and resgen.{env}.toml in the project root

use crate::config::CONFIG_FILE_NAME;
use config::builder::DefaultState;
use config::ConfigBuilder;
use config::ConfigError;
use config::File;
use std::path::Path;

/// Add project config files to builder.
/// Precedence: resgen.toml (base) then resgen.{RESGEN_ENV}.toml when RESGEN_ENV is set.
pub fn add_to_builder(
    builder: ConfigBuilder<DefaultState>,
    project_root: &Path,
) -> Result<ConfigBuilder<DefaultState>, ConfigError> {
    let mut builder = builder;

    let base_config_path = project_root.join(CONFIG_FILE_NAME);
    if base_config_path.is_file() {
        builder = builder.add_source(File::from(base_config_path).required(false));
    }

    if let Ok(env_name) = std::env::var("RESGEN_ENV") {
        let env_config_path = project_root.join(format!("resgen.{}.toml", env_name));
        if env_config_path.is_file() {
            builder = builder.add_source(File::from(env_config_path).required(false));
        }
    }

    Ok(builder)
}

/// Add an explicitly requested config file. Missing files are an error.
pub fn add_explicit(
    builder: ConfigBuilder<DefaultState>,
    config_path: &Path,
) -> ConfigBuilder<DefaultState> {
    builder.add_source(File::from(config_path).required(true))
}
