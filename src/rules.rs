//! Rule chain deciding which entries stay out of a snapshot.
//!
//! Each rule is a pure predicate over `(path, metadata)` returning `true` when
//! the entry should be skipped. The chain skips an entry when any rule does,
//! so evaluation order never changes the outcome.

use crate::scanner::ExclusionPrefix;
use crate::vfs::path::{self, normalize_path_string};
use crate::vfs::Metadata;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;

/// Default extensions kept out of snapshots (source files, including the
/// generated artifact's own language).
pub const DEFAULT_EXCLUDED_EXTENSIONS: &[&str] = &[".rs", ".go"];

/// Default infrastructure file names kept out of snapshots.
pub const DEFAULT_EXCLUDED_NAMES: &[&str] = &[
    "kustomization.yaml",
    "Makefile",
    "Dockerfile",
    ".gitignore",
    "PROJECT",
    "Cargo.toml",
    "build.rs",
];

/// Default packaging subtrees kept out of snapshots.
pub const DEFAULT_EXCLUDED_PREFIXES: &[&str] = &["/bundle", "/operator/patches"];

/// Default sentinel file marking a directory as excluded.
pub const DEFAULT_MARKER_FILE: &str = ".vfsignore";

/// How prefix rules compare a path against a prefix.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PrefixMatch {
    /// Match only on a separator boundary: `/bundle` covers `/bundle` and
    /// `/bundle/x` but not `/bundle2`.
    #[default]
    Boundary,
    /// Plain string prefix: `/bundle` also covers `/bundle2`.
    Raw,
}

impl PrefixMatch {
    /// Whether `candidate` falls under `prefix` in this mode.
    pub fn matches(self, candidate: &str, prefix: &str) -> bool {
        if !candidate.starts_with(prefix) {
            return false;
        }
        match self {
            PrefixMatch::Raw => true,
            PrefixMatch::Boundary => {
                prefix.ends_with('/')
                    || candidate.len() == prefix.len()
                    || candidate.as_bytes()[prefix.len()] == b'/'
            }
        }
    }
}

/// Exclusion settings consumed by [`RuleChain::from_config`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RuleConfig {
    /// File extensions to skip, with or without the leading dot
    #[serde(default = "default_excluded_extensions")]
    pub excluded_extensions: Vec<String>,

    /// Exact file base names to skip wherever they appear
    #[serde(default = "default_excluded_names")]
    pub excluded_names: Vec<String>,

    /// Subtrees to skip, relative to the snapshot root
    #[serde(default = "default_excluded_prefixes")]
    pub excluded_prefixes: Vec<String>,

    /// Sentinel file name whose presence excludes a directory
    #[serde(default = "default_marker_file")]
    pub marker_file: String,

    /// Prefix comparison mode for static and marker prefixes
    #[serde(default)]
    pub prefix_match: PrefixMatch,
}

fn to_strings(values: &[&str]) -> Vec<String> {
    values.iter().map(|s| (*s).to_string()).collect()
}

fn default_excluded_extensions() -> Vec<String> {
    to_strings(DEFAULT_EXCLUDED_EXTENSIONS)
}

fn default_excluded_names() -> Vec<String> {
    to_strings(DEFAULT_EXCLUDED_NAMES)
}

fn default_excluded_prefixes() -> Vec<String> {
    to_strings(DEFAULT_EXCLUDED_PREFIXES)
}

fn default_marker_file() -> String {
    DEFAULT_MARKER_FILE.to_string()
}

impl Default for RuleConfig {
    fn default() -> Self {
        Self {
            excluded_extensions: default_excluded_extensions(),
            excluded_names: default_excluded_names(),
            excluded_prefixes: default_excluded_prefixes(),
            marker_file: default_marker_file(),
            prefix_match: PrefixMatch::default(),
        }
    }
}

impl RuleConfig {
    /// Validate rule settings
    pub fn validate(&self) -> Result<(), String> {
        if self.marker_file.trim().is_empty() {
            return Err("Marker file name cannot be empty".to_string());
        }
        if self.marker_file.contains('/') || self.marker_file.contains('\\') {
            return Err(format!(
                "Marker file name must not contain separators: {}",
                self.marker_file
            ));
        }
        for ext in &self.excluded_extensions {
            if ext.trim_start_matches('.').is_empty() {
                return Err("Excluded extensions cannot be empty".to_string());
            }
        }
        for prefix in &self.excluded_prefixes {
            if !path::config_separators(prefix).starts_with('/') {
                return Err(format!(
                    "Excluded prefix must start with '/': {}",
                    prefix
                ));
            }
        }
        Ok(())
    }
}

/// A skip predicate: `true` means "leave this entry out".
pub type Predicate = Box<dyn Fn(&str, &Metadata) -> bool>;

struct Rule {
    name: &'static str,
    predicate: Predicate,
}

/// Ordered set of skip predicates.
#[derive(Default)]
pub struct RuleChain {
    rules: Vec<Rule>,
}

impl fmt::Debug for RuleChain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list()
            .entries(self.rules.iter().map(|r| r.name))
            .finish()
    }
}

impl RuleChain {
    /// Empty chain (skips nothing)
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a named predicate
    pub fn skip<P>(mut self, name: &'static str, predicate: P) -> Self
    where
        P: Fn(&str, &Metadata) -> bool + 'static,
    {
        self.rules.push(Rule {
            name,
            predicate: Box::new(predicate),
        });
        self
    }

    /// Build the standard chain: extensions, names, static prefixes, then
    /// the prefixes produced by the marker scan.
    pub fn from_config(config: &RuleConfig, exclusions: &BTreeSet<ExclusionPrefix>) -> Self {
        let prefixes: Vec<String> = exclusions.iter().map(|e| e.as_str().to_string()).collect();
        let static_prefixes: Vec<String> = config
            .excluded_prefixes
            .iter()
            .map(|p| path::config_separators(p))
            .collect();
        Self::new()
            .skip(
                "extension",
                files_with_extensions(&config.excluded_extensions),
            )
            .skip("name", named_files(&config.excluded_names))
            .skip(
                "prefix",
                parent_dirs(&static_prefixes, config.prefix_match),
            )
            .skip("marker", parent_dirs(&prefixes, config.prefix_match))
    }

    /// Whether any rule skips the entry.
    pub fn should_skip(&self, entry_path: &str, metadata: &Metadata) -> bool {
        self.explain(entry_path, metadata).is_some()
    }

    /// Name of the first rule skipping the entry, if any.
    pub fn explain(&self, entry_path: &str, metadata: &Metadata) -> Option<&'static str> {
        let normalized = normalize_path_string(entry_path);
        self.rules
            .iter()
            .find(|rule| (rule.predicate)(&normalized, metadata))
            .map(|rule| rule.name)
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

/// Skip files whose extension is one of `extensions`.
///
/// A dot-file has no extension: a file named exactly `.go` is kept even when
/// `.go` is excluded.
pub fn files_with_extensions(extensions: &[String]) -> impl Fn(&str, &Metadata) -> bool {
    let extensions: Vec<String> = extensions
        .iter()
        .map(|ext| format!(".{}", ext.trim_start_matches('.')))
        .collect();
    move |entry_path, metadata| {
        if metadata.is_dir {
            return false;
        }
        match path::extension(entry_path) {
            Some(ext) => extensions.iter().any(|e| e == ext),
            None => false,
        }
    }
}

/// Skip files whose base name is exactly one of `names`. Directories are kept.
pub fn named_files(names: &[String]) -> impl Fn(&str, &Metadata) -> bool {
    let names: Vec<String> = names.iter().map(|n| normalize_name(n)).collect();
    move |entry_path, metadata| {
        if metadata.is_dir {
            return false;
        }
        let base = path::base_name(entry_path);
        names.iter().any(|n| n == base)
    }
}

/// Skip everything at or below any of `prefixes`.
pub fn parent_dirs(prefixes: &[String], mode: PrefixMatch) -> impl Fn(&str, &Metadata) -> bool {
    let prefixes: Vec<String> = prefixes
        .iter()
        .map(|p| normalize_prefix(p, mode))
        .collect();
    move |entry_path, _metadata| prefixes.iter().any(|p| mode.matches(entry_path, p))
}

fn normalize_name(name: &str) -> String {
    path::base_name(&normalize_path_string(name)).to_string()
}

/// Boundary prefixes are cleaned; raw prefixes keep their exact spelling
/// apart from Unicode normalization.
fn normalize_prefix(prefix: &str, mode: PrefixMatch) -> String {
    use unicode_normalization::UnicodeNormalization;
    match mode {
        PrefixMatch::Boundary => normalize_path_string(prefix),
        PrefixMatch::Raw => prefix.nfc().collect(),
    }
}
