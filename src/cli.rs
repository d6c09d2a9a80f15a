//! CLI domain: parse, route, output, and presentation only.
//! No snapshot logic; the route hands requests to the snapshot driver.

mod output;
mod parse;
mod presentation;
mod route;

pub use output::map_error;
pub use parse::{Cli, OutputFormat};
pub use presentation::{format_plan, format_report};
pub use route::{find_project_root, RunContext};
