//! The `plan` subcommand: resolve and print a build plan.

use crate::cli::{CliError, OkEnvelope};
use buildplan_core::resolve;
use std::path::Path;
use tracing::debug;

/// Resolve a build plan for `module` on `target` and print it.
pub fn run_plan(manifest: &Path, module: &str, target: &str, json: bool) -> Result<(), CliError> {
    let project = super::load_project(manifest)?;
    let resolution = resolve(&project, module, target)?;

    debug!(
        module,
        target,
        steps = resolution.steps.len(),
        "Resolved build plan"
    );

    if json {
        let envelope = OkEnvelope::new(&resolution);
        let rendered = serde_json::to_string(&envelope)
            .map_err(|e| CliError::other(format!("Failed to serialize plan: {e}")))?;
        println!("{rendered}");
        return Ok(());
    }

    println!("Build plan for '{module}' (target: {target})");
    for (position, step) in resolution.steps.iter().enumerate() {
        println!("  {}. {} [{}]", position + 1, step.module, step.target);
    }
    if resolution.stages.len() > 1 {
        println!("Parallelizable stages:");
        for (level, stage) in resolution.stages.iter().enumerate() {
            println!("  stage {}: {}", level, stage.join(", "));
        }
    }

    Ok(())
}
