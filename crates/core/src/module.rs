//! Module declarations and dependency edges.

use crate::target::Target;
use buildplan_module_graph::GraphNodeData;
use serde::{Deserialize, Serialize};
use std::fmt;

/// The kind of a dependency edge.
///
/// `implementation` dependencies are internal to the consumer; `api`
/// dependencies are re-exported to the consumer's own consumers. The
/// distinction is carried through plan output but does not change
/// resolution semantics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum DependencyKind {
    /// Dependency used internally by the consumer.
    #[default]
    Implementation,
    /// Dependency exposed through the consumer's own API.
    Api,
}

impl fmt::Display for DependencyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Implementation => "implementation",
            Self::Api => "api",
        };
        write!(f, "{s}")
    }
}

/// A single declared dependency edge from one module to another.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DependencyDecl {
    /// Name of the destination module.
    pub module: String,
    /// Kind of the edge.
    #[serde(default)]
    pub kind: DependencyKind,
}

/// A unit of source code configured to produce one or more targets.
///
/// Modules are defined once at configuration load and are immutable for the
/// duration of a build.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Module {
    /// Unique module name.
    pub name: String,
    /// Declared compilation targets, in declaration order.
    pub targets: Vec<Target>,
    /// Declared outgoing dependency edges, in declaration order.
    pub dependencies: Vec<DependencyDecl>,
}

impl Module {
    /// Check whether this module declares the given target identifier.
    #[must_use]
    pub fn declares_target(&self, target_id: &str) -> bool {
        self.targets.iter().any(|target| target.id == target_id)
    }
}

impl GraphNodeData for Module {
    fn dependency_names(&self) -> impl Iterator<Item = &str> {
        self.dependencies.iter().map(|dep| dep.module.as_str())
    }
}
