//! The `validate` subcommand: check the manifest's dependency graph.

use crate::cli::{CliError, OkEnvelope};
use std::path::Path;

/// Validate the dependency graph declared in the manifest.
///
/// Dangling dependencies and cycles surface while the graph is wired; a
/// structural re-check runs on the built graph afterwards.
pub fn run_validate(manifest: &Path, json: bool) -> Result<(), CliError> {
    let project = super::load_project(manifest)?;
    let graph = project.graph().map_err(CliError::from)?;

    let result = graph.validate();
    if !result.is_valid {
        let messages: Vec<String> = result.errors.iter().map(|e| e.to_string()).collect();
        return Err(CliError::resolution(messages.join("; ")));
    }

    if json {
        let envelope = OkEnvelope::new(serde_json::json!({
            "modules": graph.module_count(),
            "valid": true,
        }));
        let rendered = serde_json::to_string(&envelope)
            .map_err(|e| CliError::other(format!("Failed to serialize result: {e}")))?;
        println!("{rendered}");
    } else {
        println!(
            "Manifest OK: {} modules, no cycles, no dangling dependencies",
            graph.module_count()
        );
    }

    Ok(())
}
