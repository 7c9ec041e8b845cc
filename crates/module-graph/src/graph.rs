//! Module graph builder using petgraph.
//!
//! This module builds directed acyclic graphs (DAGs) from module declarations
//! to handle dependencies and determine build order. Nodes are inserted in
//! declaration order, and every ordering operation breaks ties by that order,
//! so a given manifest always produces the same build plan.

use crate::{Error, GraphNodeData, Result};
use petgraph::Direction;
use petgraph::graph::{DiGraph, NodeIndex};
use petgraph::visit::IntoNodeReferences;
use std::cmp::Reverse;
use std::collections::{BinaryHeap, HashMap, HashSet};
use tracing::debug;

/// A node in the module graph.
#[derive(Debug, Clone)]
pub struct GraphNode<T> {
    /// Name of the module.
    pub name: String,
    /// The module data.
    pub data: T,
}

/// Module graph for dependency ordering and build planning.
///
/// This is a generic graph that can hold any module type implementing
/// [`GraphNodeData`]. It provides methods for building the graph, wiring
/// dependency edges, and computing deterministic build order.
///
/// Edges point from a dependency to its dependent, so a topological sort
/// yields dependencies first.
#[derive(Debug)]
pub struct ModuleGraph<T: GraphNodeData> {
    /// The directed graph of modules.
    graph: DiGraph<GraphNode<T>, ()>,
    /// Map from module names to node indices.
    name_to_node: HashMap<String, NodeIndex>,
}

impl<T: GraphNodeData> ModuleGraph<T> {
    /// Create a new empty module graph.
    #[must_use]
    pub fn new() -> Self {
        Self {
            graph: DiGraph::new(),
            name_to_node: HashMap::new(),
        }
    }

    /// Add a single module to the graph.
    ///
    /// If a module with the same name already exists, returns the existing
    /// node index. Insertion order is significant: it is the declaration
    /// order used for tie-breaking in [`Self::topological_sort`].
    ///
    /// # Errors
    ///
    /// Currently infallible, but returns `Result` for API consistency.
    pub fn add_module(&mut self, name: &str, data: T) -> Result<NodeIndex> {
        if let Some(&node) = self.name_to_node.get(name) {
            return Ok(node);
        }

        let node = GraphNode {
            name: name.to_string(),
            data,
        };

        let node_index = self.graph.add_node(node);
        self.name_to_node.insert(name.to_string(), node_index);
        debug!("Added module node '{}'", name);

        Ok(node_index)
    }

    /// Get a reference to a module node by name.
    #[must_use]
    pub fn get_node_by_name(&self, name: &str) -> Option<&GraphNode<T>> {
        self.name_to_node
            .get(name)
            .and_then(|&idx| self.graph.node_weight(idx))
    }

    /// Get the node index for a module by name.
    #[must_use]
    pub fn get_node_index(&self, name: &str) -> Option<NodeIndex> {
        self.name_to_node.get(name).copied()
    }

    /// Check if a module exists in the graph.
    #[must_use]
    pub fn contains_module(&self, name: &str) -> bool {
        self.name_to_node.contains_key(name)
    }

    /// Get the number of modules in the graph.
    #[must_use]
    pub fn module_count(&self) -> usize {
        self.graph.node_count()
    }

    /// Iterate over all nodes in the graph.
    pub fn iter_nodes(&self) -> impl Iterator<Item = (NodeIndex, &GraphNode<T>)> {
        self.graph.node_references()
    }

    /// Add a dependency edge from `dependency` to `dependent`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::CycleDetected`] if the edge would close a cycle,
    /// including a self-edge. The graph is left unchanged in that case.
    pub fn add_edge(&mut self, dependency: NodeIndex, dependent: NodeIndex) -> Result<()> {
        if dependency == dependent {
            let name = self.node_name(dependency);
            return Err(Error::CycleDetected {
                path: format!("{name} -> {name}"),
            });
        }

        // A path dependent -> ... -> dependency means the new edge closes a cycle.
        if let Some(path) = self.find_path(dependent, dependency) {
            let mut names: Vec<&str> = path.iter().map(|&idx| self.node_name(idx)).collect();
            names.push(self.node_name(dependent));
            return Err(Error::CycleDetected {
                path: names.join(" -> "),
            });
        }

        self.graph.add_edge(dependency, dependent, ());
        Ok(())
    }

    /// Add dependency edges after all modules have been added.
    ///
    /// Dangling dependency names are collected and reported together before
    /// any edge is added; cycle detection then runs edge by edge.
    ///
    /// # Errors
    ///
    /// Returns [`Error::MissingDependency`] or [`Error::MissingDependencies`]
    /// if any module depends on a module that is not in the graph, or
    /// [`Error::CycleDetected`] if an edge would close a cycle.
    pub fn add_dependency_edges(&mut self) -> Result<()> {
        let mut missing = Vec::new();
        let mut edges_to_add = Vec::new();

        for (node_index, node) in self.graph.node_references() {
            for dep_name in node.data.dependency_names() {
                if let Some(&dep_index) = self.name_to_node.get(dep_name) {
                    edges_to_add.push((dep_index, node_index));
                } else {
                    missing.push((node.name.clone(), dep_name.to_string()));
                }
            }
        }

        if missing.len() == 1 {
            let (module, dependency) = missing.remove(0);
            return Err(Error::MissingDependency { module, dependency });
        }
        if !missing.is_empty() {
            return Err(Error::MissingDependencies { missing });
        }

        for (dependency, dependent) in edges_to_add {
            self.add_edge(dependency, dependent)?;
        }

        Ok(())
    }

    /// Check if the graph has cycles.
    ///
    /// Edges added through [`Self::add_edge`] can never introduce one; this
    /// guards ordering operations regardless of how edges were wired.
    #[must_use]
    pub fn has_cycles(&self) -> bool {
        petgraph::algo::is_cyclic_directed(&self.graph)
    }

    /// Get the deterministic topologically sorted list of modules.
    ///
    /// Dependencies come before dependents; among modules whose dependencies
    /// are all satisfied, declaration order wins.
    ///
    /// # Errors
    ///
    /// Returns [`Error::CycleDetected`] if the graph contains cycles.
    pub fn topological_sort(&self) -> Result<Vec<GraphNode<T>>> {
        Ok(self
            .sorted_indices()?
            .into_iter()
            .map(|idx| self.graph[idx].clone())
            .collect())
    }

    /// Compute the transitive dependency closure of one module.
    ///
    /// Returns every module needed to build `name`, in dependency-first
    /// order with the requested module last. Each module appears exactly
    /// once, shared dependencies included.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnknownModule`] if `name` is not in the graph, or
    /// [`Error::CycleDetected`] if the graph contains cycles.
    pub fn closure(&self, name: &str) -> Result<Vec<GraphNode<T>>> {
        let start = self
            .get_node_index(name)
            .ok_or_else(|| Error::UnknownModule {
                name: name.to_string(),
            })?;

        let mut members = HashSet::from([start]);
        let mut frontier = vec![start];
        while let Some(idx) = frontier.pop() {
            for dep in self.graph.neighbors_directed(idx, Direction::Incoming) {
                if members.insert(dep) {
                    frontier.push(dep);
                }
            }
        }

        Ok(self
            .sorted_indices()?
            .into_iter()
            .filter(|idx| members.contains(idx))
            .map(|idx| self.graph[idx].clone())
            .collect())
    }

    /// Get all modules grouped into stages that can build in parallel.
    ///
    /// Returns a vector of stages, where each stage contains modules with no
    /// dependencies on each other. All modules in stage N must complete
    /// before stage N+1 can start.
    ///
    /// # Errors
    ///
    /// Returns [`Error::CycleDetected`] if the graph contains cycles.
    pub fn parallel_stages(&self) -> Result<Vec<Vec<GraphNode<T>>>> {
        let sorted = self.sorted_indices()?;

        let mut stages: Vec<Vec<GraphNode<T>>> = Vec::new();
        let mut levels: HashMap<NodeIndex, usize> = HashMap::new();

        for idx in sorted {
            let level = self
                .graph
                .neighbors_directed(idx, Direction::Incoming)
                .filter_map(|dep| levels.get(&dep))
                .map(|&dep_level| dep_level + 1)
                .max()
                .unwrap_or(0);

            if level >= stages.len() {
                stages.resize(level + 1, Vec::new());
            }
            stages[level].push(self.graph[idx].clone());
            levels.insert(idx, level);
        }

        Ok(stages)
    }

    /// Kahn's algorithm with a min-heap ready set.
    ///
    /// The heap drains ready nodes in ascending `NodeIndex` order, which is
    /// insertion order, which is declaration order.
    fn sorted_indices(&self) -> Result<Vec<NodeIndex>> {
        let mut in_degree: HashMap<NodeIndex, usize> = self
            .graph
            .node_indices()
            .map(|idx| {
                (
                    idx,
                    self.graph.neighbors_directed(idx, Direction::Incoming).count(),
                )
            })
            .collect();

        let mut ready: BinaryHeap<Reverse<NodeIndex>> = in_degree
            .iter()
            .filter(|&(_, &degree)| degree == 0)
            .map(|(&idx, _)| Reverse(idx))
            .collect();

        let mut order = Vec::with_capacity(self.graph.node_count());
        while let Some(Reverse(idx)) = ready.pop() {
            order.push(idx);
            for succ in self.graph.neighbors_directed(idx, Direction::Outgoing) {
                if let Some(degree) = in_degree.get_mut(&succ) {
                    *degree -= 1;
                    if *degree == 0 {
                        ready.push(Reverse(succ));
                    }
                }
            }
        }

        if order.len() == self.graph.node_count() {
            Ok(order)
        } else {
            Err(Error::CycleDetected {
                path: "module dependency graph contains a cycle".to_string(),
            })
        }
    }

    /// Depth-first path search from `start` to `goal` along edge direction.
    fn find_path(&self, start: NodeIndex, goal: NodeIndex) -> Option<Vec<NodeIndex>> {
        if start == goal {
            return Some(vec![start]);
        }

        let mut stack = vec![start];
        let mut visited = HashSet::from([start]);
        let mut came_from: HashMap<NodeIndex, NodeIndex> = HashMap::new();

        while let Some(idx) = stack.pop() {
            for succ in self.graph.neighbors_directed(idx, Direction::Outgoing) {
                if visited.insert(succ) {
                    came_from.insert(succ, idx);
                    if succ == goal {
                        let mut path = vec![goal];
                        let mut current = goal;
                        while let Some(&prev) = came_from.get(&current) {
                            path.push(prev);
                            current = prev;
                        }
                        path.reverse();
                        return Some(path);
                    }
                    stack.push(succ);
                }
            }
        }

        None
    }

    fn node_name(&self, idx: NodeIndex) -> &str {
        self.graph
            .node_weight(idx)
            .map_or("<unknown>", |node| node.name.as_str())
    }
}

impl<T: GraphNodeData> Default for ModuleGraph<T> {
    fn default() -> Self {
        Self::new()
    }
}
