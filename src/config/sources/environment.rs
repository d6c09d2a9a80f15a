//! Environment source: RESGEN_<SECTION>__<KEY> variables.

use config::builder::DefaultState;
use config::ConfigBuilder;
use config::Environment;

/// Add the environment source to builder. List settings accept comma-separated values,
/// e.g. `RESGEN_RULES__EXCLUDED_EXTENSIONS=.rs,.go`.
pub fn add_to_builder(builder: ConfigBuilder<DefaultState>) -> ConfigBuilder<DefaultState> {
    builder.add_source(
        Environment::with_prefix("RESGEN")
            .prefix_separator("_")
            .separator("__")
            .try_parsing(true)
            .list_separator(",")
            .with_list_parse_key("rules.excluded_extensions")
            .with_list_parse_key("rules.excluded_names")
            .with_list_parse_key("rules.excluded_prefixes"),
    )
}
