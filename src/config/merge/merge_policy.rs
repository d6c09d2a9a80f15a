//! Merge rules: defaults, override order, conflict handling.

use config::Config;
use config::ConfigBuilder;
use config::ConfigError;

/// Create a Config builder with merge policy defaults applied.
///
/// List-valued settings take their defaults from serde so that a file
/// setting one list does not have to repeat the others.
pub fn builder_with_defaults() -> Result<ConfigBuilder<config::builder::DefaultState>, ConfigError>
{
    Config::builder()
        .set_default("rules.marker_file", crate::rules::DEFAULT_MARKER_FILE)?
        .set_default("rules.prefix_match", "boundary")?
        .set_default("output.file_name", "resources.rs")?
        .set_default("logging.level", "warn")
}
