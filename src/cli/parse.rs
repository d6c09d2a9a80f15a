//! CLI parse: clap types for resgen. No behavior; definitions only.

use clap::{Parser, ValueEnum};
use std::path::PathBuf;

/// resgen - Embed a directory tree as a deterministic Rust source snapshot
#[derive(Parser, Debug)]
#[command(name = "resgen")]
#[command(about = "Generate a deterministic Rust source snapshot of a resource directory")]
pub struct Cli {
    /// Target subdirectories of the root; the first is snapshotted, all are scanned for markers
    #[arg(required_unless_present = "print_config")]
    pub targets: Vec<String>,

    /// Directory the targets are resolved against (default: nearest ancestor with Cargo.toml)
    #[arg(long)]
    pub root: Option<PathBuf>,

    /// Output directory for the artifact (default: current directory)
    #[arg(long)]
    pub dest: Option<PathBuf>,

    /// Configuration file path (overrides default config loading)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// List what would be embedded without writing anything
    #[arg(long)]
    pub dry_run: bool,

    /// Print the effective configuration as TOML and exit
    #[arg(long)]
    pub print_config: bool,

    /// Output format for the run summary
    #[arg(long, value_enum, default_value = "text")]
    pub format: OutputFormat,

    /// Enable verbose logging (debug level)
    #[arg(long, default_value = "false")]
    pub verbose: bool,

    /// Disable logging entirely
    #[arg(long, short = 'q', conflicts_with = "verbose")]
    pub quiet: bool,

    /// Log level (trace, debug, info, warn, error, off)
    #[arg(long)]
    pub log_level: Option<String>,

    /// Log format (json, text)
    #[arg(long)]
    pub log_format: Option<String>,

    /// Log output (stdout, stderr, file)
    #[arg(long)]
    pub log_output: Option<String>,

    /// Log file path (if output is "file")
    #[arg(long)]
    pub log_file: Option<PathBuf>,
}

/// Format of the run summary printed to stdout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}
