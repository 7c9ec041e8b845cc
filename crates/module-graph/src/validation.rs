//! Validation utilities for module graphs.

use crate::{Error, GraphNodeData, ModuleGraph};

/// Result of graph validation.
#[derive(Debug, Clone)]
pub struct ValidationResult {
    /// Whether the graph is valid (no cycles, no dangling dependencies).
    pub is_valid: bool,
    /// List of validation errors, if any.
    pub errors: Vec<Error>,
}

impl ValidationResult {
    /// Create a valid result.
    #[must_use]
    pub fn valid() -> Self {
        Self {
            is_valid: true,
            errors: vec![],
        }
    }

    /// Create an invalid result with errors.
    #[must_use]
    pub fn invalid(errors: Vec<Error>) -> Self {
        Self {
            is_valid: false,
            errors,
        }
    }
}

impl<T: GraphNodeData> ModuleGraph<T> {
    /// Validate the graph structure.
    ///
    /// Checks for:
    /// - Cycles in the dependency graph
    /// - Dependency names that never resolved to a node
    ///
    /// Dangling dependencies are normally caught by `add_dependency_edges`;
    /// this re-checks them so a graph wired through lower-level edge calls
    /// still gets a full report.
    #[must_use]
    pub fn validate(&self) -> ValidationResult {
        let mut errors = Vec::new();

        if self.has_cycles() {
            errors.push(Error::CycleDetected {
                path: "module dependency graph contains a cycle".to_string(),
            });
        }

        let mut missing = Vec::new();
        for (_, node) in self.iter_nodes() {
            for dep_name in node.data.dependency_names() {
                if !self.contains_module(dep_name) {
                    missing.push((node.name.clone(), dep_name.to_string()));
                }
            }
        }
        if !missing.is_empty() {
            errors.push(Error::MissingDependencies { missing });
        }

        if errors.is_empty() {
            ValidationResult::valid()
        } else {
            ValidationResult::invalid(errors)
        }
    }
}
