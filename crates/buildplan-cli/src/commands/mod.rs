//! Subcommand implementations.

mod list;
mod plan;
mod validate;

pub use list::{run_modules, run_targets};
pub use plan::run_plan;
pub use validate::run_validate;

use crate::cli::CliError;
use buildplan_core::Project;
use std::path::Path;

/// Load the project from the manifest path shared by every subcommand.
pub fn load_project(manifest: &Path) -> Result<Project, CliError> {
    Project::load(manifest).map_err(CliError::from)
}
