//! Error types for module graph operations.

use miette::Diagnostic;
use thiserror::Error;

/// Result type for module graph operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur during module graph operations.
#[derive(Error, Debug, Clone, Diagnostic)]
pub enum Error {
    /// Adding an edge would close a dependency cycle.
    #[error("Dependency cycle detected: {path}")]
    #[diagnostic(
        code(buildplan::graph::cycle),
        help("Remove one of the dependency declarations along the cycle")
    )]
    CycleDetected {
        /// The cycle rendered as `a -> b -> a`.
        path: String,
    },

    /// A module depends on a module that was never declared.
    #[error("Module '{module}' depends on unknown module '{dependency}'")]
    #[diagnostic(
        code(buildplan::graph::missing_dependency),
        help("Declare the missing module in the manifest or fix the dependency name")
    )]
    MissingDependency {
        /// The module that declares the dangling dependency.
        module: String,
        /// The name of the missing dependency.
        dependency: String,
    },

    /// Multiple dangling dependency declarations were found.
    #[error("Missing dependencies: {}", format_missing(.missing))]
    #[diagnostic(
        code(buildplan::graph::missing_dependencies),
        help("Declare the missing modules in the manifest or fix the dependency names")
    )]
    MissingDependencies {
        /// List of (module, missing dependency) pairs.
        missing: Vec<(String, String)>,
    },

    /// A lookup referenced a module that is not in the graph.
    #[error("Unknown module '{name}'")]
    #[diagnostic(
        code(buildplan::graph::unknown_module),
        help("Check the module name against the manifest's module declarations")
    )]
    UnknownModule {
        /// The name that failed to resolve.
        name: String,
    },
}

fn format_missing(missing: &[(String, String)]) -> String {
    missing
        .iter()
        .map(|(module, dep)| format!("module '{module}' depends on unknown module '{dep}'"))
        .collect::<Vec<_>>()
        .join(", ")
}
