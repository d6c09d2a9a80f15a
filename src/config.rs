//! Configuration System
//!
//! Layered configuration for snapshot runs: built-in defaults, then the
//! user-level file, then `resgen.toml` in the project root (or an explicit
//! `--config` file), then `RESGEN_*` environment variables.

use crate::error::SnapshotError;
use crate::header::DEFAULT_HEADER;
use crate::logging::LoggingConfig;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub use crate::rules::{PrefixMatch, RuleConfig};

mod facade;
mod merge;
mod sources;

pub use facade::ConfigLoader;

/// Name of the project-level configuration file.
pub const CONFIG_FILE_NAME: &str = "resgen.toml";

/// Root configuration structure
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ResgenConfig {
    /// Exclusion rules
    #[serde(default)]
    pub rules: RuleConfig,

    /// Artifact settings
    #[serde(default)]
    pub output: OutputConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Artifact settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutputConfig {
    /// File name of the artifact inside the destination directory
    #[serde(default = "default_file_name")]
    pub file_name: String,

    /// Header text prepended to the artifact (defaults to the license block)
    #[serde(default)]
    pub header: Option<String>,

    /// File holding the header text, relative to the project root
    #[serde(default)]
    pub header_file: Option<PathBuf>,
}

fn default_file_name() -> String {
    "resources.rs".to_string()
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            file_name: default_file_name(),
            header: None,
            header_file: None,
        }
    }
}

impl OutputConfig {
    /// Validate artifact settings
    pub fn validate(&self) -> Result<(), String> {
        if self.file_name.trim().is_empty() {
            return Err("Artifact file name cannot be empty".to_string());
        }
        if self.file_name.contains('/') || self.file_name.contains('\\') {
            return Err(format!(
                "Artifact file name must not contain separators: {}",
                self.file_name
            ));
        }
        if self.header.is_some() && self.header_file.is_some() {
            return Err("Set either header or header_file, not both".to_string());
        }
        Ok(())
    }

    /// Header text to prepend, reading `header_file` relative to `root`.
    pub fn resolve_header(&self, root: &Path) -> Result<String, SnapshotError> {
        if let Some(ref header_file) = self.header_file {
            let path = if header_file.is_absolute() {
                header_file.clone()
            } else {
                root.join(header_file)
            };
            return std::fs::read_to_string(&path).map_err(|e| {
                SnapshotError::Config(format!(
                    "Failed to read header file {}: {}",
                    path.display(),
                    e
                ))
            });
        }
        Ok(self
            .header
            .clone()
            .unwrap_or_else(|| DEFAULT_HEADER.to_string()))
    }
}

/// Configuration validation errors
#[derive(Debug, Clone)]
pub enum ValidationError {
    Rules(String),
    Output(String),
    Logging(String),
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ValidationError::Rules(msg) => write!(f, "Rules: {}", msg),
            ValidationError::Output(msg) => write!(f, "Output: {}", msg),
            ValidationError::Logging(msg) => write!(f, "Logging: {}", msg),
        }
    }
}

impl std::error::Error for ValidationError {}

impl ResgenConfig {
    /// Validate the entire configuration
    pub fn validate(&self) -> Result<(), Vec<ValidationError>> {
        let mut errors = Vec::new();

        if let Err(e) = self.rules.validate() {
            errors.push(ValidationError::Rules(e));
        }
        if let Err(e) = self.output.validate() {
            errors.push(ValidationError::Output(e));
        }
        if let Err(e) = self.logging.validate() {
            errors.push(ValidationError::Logging(e));
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }

    /// Render the configuration as TOML (used by `--print-config`).
    pub fn to_toml(&self) -> Result<String, SnapshotError> {
        toml::to_string_pretty(self)
            .map_err(|e| SnapshotError::Config(format!("Failed to render config: {}", e)))
    }
}
