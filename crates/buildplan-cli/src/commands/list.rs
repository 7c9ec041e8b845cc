//! The `modules` and `targets` listing subcommands.

use crate::cli::{CliError, OkEnvelope};
use std::path::Path;

/// List the modules declared in the manifest, in declaration order.
pub fn run_modules(manifest: &Path, json: bool) -> Result<(), CliError> {
    let project = super::load_project(manifest)?;

    if json {
        let data: Vec<serde_json::Value> = project
            .modules()
            .iter()
            .map(|module| {
                serde_json::json!({
                    "name": module.name,
                    "targets": module.targets,
                    "dependencies": module.dependencies,
                })
            })
            .collect();
        let rendered = serde_json::to_string(&OkEnvelope::new(data))
            .map_err(|e| CliError::other(format!("Failed to serialize modules: {e}")))?;
        println!("{rendered}");
        return Ok(());
    }

    for module in project.modules() {
        let targets: Vec<&str> = module
            .targets
            .iter()
            .map(|target| target.id.as_str())
            .collect();
        println!("{} (targets: {})", module.name, targets.join(", "));
        for dep in &module.dependencies {
            println!("  -> {} ({})", dep.module, dep.kind);
        }
    }

    Ok(())
}

/// List the targets one module declares, with their platform families.
pub fn run_targets(manifest: &Path, module: &str, json: bool) -> Result<(), CliError> {
    let project = super::load_project(manifest)?;

    let Some(found) = project.module(module) else {
        return Err(CliError::from(buildplan_core::Error::UnknownModule {
            name: module.to_string(),
        }));
    };

    if json {
        let rendered = serde_json::to_string(&OkEnvelope::new(&found.targets))
            .map_err(|e| CliError::other(format!("Failed to serialize targets: {e}")))?;
        println!("{rendered}");
        return Ok(());
    }

    for target in &found.targets {
        println!("{} ({})", target.id, target.family);
    }

    Ok(())
}
