//! CLI presentation: text and json formatters for run summaries and dry runs.

use crate::cli::parse::OutputFormat;
use crate::error::SnapshotError;
use crate::snapshot::{SnapshotPlan, SnapshotReport};

fn to_json<T: serde::Serialize>(value: &T) -> Result<String, SnapshotError> {
    serde_json::to_string_pretty(value)
        .map_err(|e| SnapshotError::Serialize(format!("Failed to render summary: {}", e)))
}

fn format_exclusions(exclusions: &[String]) -> String {
    if exclusions.is_empty() {
        "none".to_string()
    } else {
        exclusions.join(", ")
    }
}

pub fn format_report(report: &SnapshotReport, format: OutputFormat) -> Result<String, SnapshotError> {
    match format {
        OutputFormat::Json => to_json(report),
        OutputFormat::Text => Ok(format!(
            "Snapshot written: {}\n  Identifier: {}\n  Target: {}\n  Files: {}\n  Directories: {}\n  Bytes: {}\n  Marker exclusions: {}\n  BLAKE3: {}",
            report.artifact.display(),
            report.identifier,
            report.target,
            report.files,
            report.dirs,
            report.bytes,
            format_exclusions(&report.exclusions),
            report.digest
        )),
    }
}

pub fn format_plan(plan: &SnapshotPlan, format: OutputFormat) -> Result<String, SnapshotError> {
    match format {
        OutputFormat::Json => to_json(plan),
        OutputFormat::Text => {
            let mut s = format!(
                "Dry run: {} -> {}\n  Marker exclusions: {}\n\nEntries ({}):",
                plan.target,
                plan.artifact.display(),
                format_exclusions(&plan.exclusions),
                plan.entries.len()
            );
            for entry in &plan.entries {
                if entry.is_dir {
                    s.push_str(&format!("\n  {}/", entry.path));
                } else {
                    s.push_str(&format!("\n  {} ({} bytes)", entry.path, entry.size));
                }
            }
            Ok(s)
        }
    }
}
