//! Module graph DAG algorithms and dependency ordering for buildplan.
//!
//! This crate provides a directed acyclic graph (DAG) implementation for
//! module dependency resolution and build ordering using petgraph.
//!
//! # Key Types
//!
//! - [`ModuleGraph`]: The main graph structure for building and querying module dependencies
//! - [`GraphNodeData`]: Trait that module types must implement to be stored in the graph
//! - [`GraphNode`]: A node in the graph containing the module name and data
//!
//! # Example
//!
//! ```
//! use buildplan_module_graph::{ModuleGraph, GraphNodeData};
//!
//! // Define a simple module type
//! #[derive(Clone)]
//! struct MyModule {
//!     depends_on: Vec<String>,
//! }
//!
//! impl GraphNodeData for MyModule {
//!     fn dependency_names(&self) -> impl Iterator<Item = &str> {
//!         self.depends_on.iter().map(String::as_str)
//!     }
//! }
//!
//! // Build a graph
//! # fn main() -> buildplan_module_graph::Result<()> {
//! let mut graph = ModuleGraph::new();
//! graph.add_module("producer", MyModule { depends_on: vec![] })?;
//! graph.add_module("consumer", MyModule { depends_on: vec!["producer".to_string()] })?;
//! graph.add_dependency_edges()?;
//!
//! // Get build order (dependencies first)
//! let sorted = graph.topological_sort()?;
//! assert_eq!(sorted[0].name, "producer");
//! # Ok(())
//! # }
//! ```

mod error;
mod graph;
mod validation;

pub use error::{Error, Result};
pub use graph::{GraphNode, ModuleGraph};
pub use validation::ValidationResult;

/// Trait for module data that can be stored in the module graph.
///
/// Implement this trait for your module type to enable it to be stored
/// in a [`ModuleGraph`] and participate in dependency ordering.
pub trait GraphNodeData: Clone {
    /// Returns the names of modules this module depends on.
    fn dependency_names(&self) -> impl Iterator<Item = &str>;
}
