//! Build plan resolution.
//!
//! Resolution answers one question: for a requested module+target pair, what
//! has to build, in what order. The answer is the module's dependency
//! closure in dependency-first order. If some member of the closure does
//! not declare the requested target, resolution fails naming the first
//! offender in closure order.

use crate::error::{Error, Result};
use crate::module::Module;
use crate::project::Project;
use crate::target::Target;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// One entry of a build plan: a module compiled for a target.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BuildStep {
    /// Module to build.
    pub module: String,
    /// Target to build it for.
    pub target: Target,
}

/// A resolved build plan.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Resolution {
    /// The module the plan was requested for.
    pub module: String,
    /// The requested target.
    pub target: Target,
    /// Build steps in dependency-first order; the requested module is last.
    pub steps: Vec<BuildStep>,
    /// Module names grouped into stages that may build in parallel.
    ///
    /// Stage N+1 may only start once stage N has completed; modules within a
    /// stage have no dependency edges between them.
    pub stages: Vec<Vec<String>>,
}

/// Resolve a build plan for `module` on `target_id`.
///
/// # Errors
///
/// - [`Error::UnknownModule`] if the module is not declared.
/// - [`Error::UnknownTarget`] if the module itself does not declare the target.
/// - [`Error::TargetMismatch`] if a dependency in the closure does not
///   declare the target; deterministic, naming the offender at the lowest
///   closure position.
/// - [`Error::Graph`] for cycles or dangling dependency names.
pub fn resolve(project: &Project, module: &str, target_id: &str) -> Result<Resolution> {
    if project.module(module).is_none() {
        return Err(Error::UnknownModule {
            name: module.to_string(),
        });
    }

    let graph = project.graph()?;
    let closure = graph.closure(module)?;

    debug!(
        module,
        target = target_id,
        closure_size = closure.len(),
        "Resolving build plan"
    );

    // Walk the closure in order; the first member lacking the target loses.
    // The requested module sits last, so a mismatch on it means every
    // dependency passed and the request itself named an undeclared target.
    for node in &closure {
        if !project.registry().has_target(&node.name, target_id) {
            if node.name == module {
                return Err(Error::UnknownTarget {
                    module: module.to_string(),
                    target: target_id.to_string(),
                });
            }
            return Err(Error::TargetMismatch {
                module: node.name.clone(),
                target: target_id.to_string(),
            });
        }
    }

    let steps: Vec<BuildStep> = closure
        .iter()
        .map(|node| BuildStep {
            module: node.name.clone(),
            target: Target::new(target_id),
        })
        .collect();

    let stages = closure_stages(&graph, &closure)?;

    Ok(Resolution {
        module: module.to_string(),
        target: Target::new(target_id),
        steps,
        stages,
    })
}

/// Project the whole-graph parallel stages down to the closure members.
fn closure_stages(
    graph: &buildplan_module_graph::ModuleGraph<Module>,
    closure: &[buildplan_module_graph::GraphNode<Module>],
) -> Result<Vec<Vec<String>>> {
    let members: std::collections::HashSet<&str> =
        closure.iter().map(|node| node.name.as_str()).collect();

    let stages = graph
        .parallel_stages()?
        .into_iter()
        .map(|stage| {
            stage
                .into_iter()
                .filter(|node| members.contains(node.name.as_str()))
                .map(|node| node.name)
                .collect::<Vec<String>>()
        })
        .filter(|stage| !stage.is_empty())
        .collect();

    Ok(stages)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::manifest::Manifest;

    fn project(toml: &str) -> Project {
        Project::from_manifest(Manifest::from_toml_str(toml).unwrap()).unwrap()
    }

    const PRODUCER_CONSUMER: &str = r#"
[[module]]
name = "producer"
targets = ["jvm", "linuxX64"]

[[module]]
name = "consumer"
targets = ["jvm", "linuxX64", "js"]
dependencies = [{ module = "producer", kind = "implementation" }]
"#;

    #[test]
    fn test_resolve_succeeds_on_shared_target() {
        let project = project(PRODUCER_CONSUMER);
        let resolution = resolve(&project, "consumer", "jvm").unwrap();

        let order: Vec<&str> = resolution
            .steps
            .iter()
            .map(|step| step.module.as_str())
            .collect();
        assert_eq!(order, vec!["producer", "consumer"]);
        assert_eq!(resolution.target.id, "jvm");
    }

    #[test]
    fn test_resolve_fails_on_missing_dependency_target() {
        let project = project(PRODUCER_CONSUMER);
        let err = resolve(&project, "consumer", "js").unwrap_err();

        match err {
            Error::TargetMismatch { module, target } => {
                assert_eq!(module, "producer");
                assert_eq!(target, "js");
            }
            other => panic!("expected TargetMismatch, got {other:?}"),
        }
    }

    #[test]
    fn test_resolve_unknown_module() {
        let project = project(PRODUCER_CONSUMER);
        let err = resolve(&project, "ghost", "jvm").unwrap_err();
        assert!(matches!(err, Error::UnknownModule { .. }));
    }

    #[test]
    fn test_resolve_target_not_declared_by_requested_module() {
        let project = project(PRODUCER_CONSUMER);
        let err = resolve(&project, "producer", "js").unwrap_err();
        assert!(matches!(err, Error::UnknownTarget { .. }));
    }

    #[test]
    fn test_mismatch_names_lowest_closure_position() {
        // Both base and mid lack js; base sits earlier in closure order.
        let project = project(
            r#"
[[module]]
name = "base"
targets = ["jvm"]

[[module]]
name = "mid"
targets = ["jvm"]
dependencies = [{ module = "base" }]

[[module]]
name = "app"
targets = ["jvm", "js"]
dependencies = [{ module = "mid" }]
"#,
        );

        let err = resolve(&project, "app", "js").unwrap_err();
        match err {
            Error::TargetMismatch { module, .. } => assert_eq!(module, "base"),
            other => panic!("expected TargetMismatch, got {other:?}"),
        }
    }

    #[test]
    fn test_resolution_excludes_unrelated_modules() {
        let project = project(
            r#"
[[module]]
name = "producer"
targets = ["jvm"]

[[module]]
name = "consumer"
targets = ["jvm"]
dependencies = [{ module = "producer" }]

[[module]]
name = "island"
targets = ["jvm"]
"#,
        );

        let resolution = resolve(&project, "consumer", "jvm").unwrap();
        assert!(
            resolution
                .steps
                .iter()
                .all(|step| step.module != "island")
        );
    }

    #[test]
    fn test_resolution_stages_are_dependency_ordered() {
        let project = project(
            r#"
[[module]]
name = "base"
targets = ["jvm"]

[[module]]
name = "left"
targets = ["jvm"]
dependencies = [{ module = "base" }]

[[module]]
name = "right"
targets = ["jvm"]
dependencies = [{ module = "base" }]

[[module]]
name = "app"
targets = ["jvm"]
dependencies = [{ module = "left" }, { module = "right" }]
"#,
        );

        let resolution = resolve(&project, "app", "jvm").unwrap();
        assert_eq!(
            resolution.stages,
            vec![
                vec!["base".to_string()],
                vec!["left".to_string(), "right".to_string()],
                vec!["app".to_string()],
            ]
        );
    }

    #[test]
    fn test_resolve_cycle_reported() {
        let project = project(
            r#"
[[module]]
name = "a"
targets = ["jvm"]
dependencies = [{ module = "b" }]

[[module]]
name = "b"
targets = ["jvm"]
dependencies = [{ module = "a" }]
"#,
        );

        let err = resolve(&project, "a", "jvm").unwrap_err();
        assert!(matches!(
            err,
            Error::Graph(buildplan_module_graph::Error::CycleDetected { .. })
        ));
    }
}
