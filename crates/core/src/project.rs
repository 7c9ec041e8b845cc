//! The immutable project configuration.

use crate::error::{Error, Result};
use crate::manifest::Manifest;
use crate::module::Module;
use crate::registry::TargetRegistry;
use crate::target::Target;
use buildplan_module_graph::ModuleGraph;
use std::collections::HashSet;
use std::path::Path;
use tracing::debug;

/// A fully loaded project: ordered modules plus their target registry.
///
/// Built once from a [`Manifest`] at configuration load and never mutated
/// afterwards; graph construction and resolution are pure reads over it.
#[derive(Debug, Clone)]
pub struct Project {
    modules: Vec<Module>,
    registry: TargetRegistry,
}

impl Project {
    /// Build a project from a parsed manifest.
    ///
    /// # Errors
    ///
    /// Returns [`Error::DuplicateModule`] if two declarations share a name.
    pub fn from_manifest(manifest: Manifest) -> Result<Self> {
        let mut seen = HashSet::new();
        let mut modules = Vec::with_capacity(manifest.modules.len());
        let mut registry = TargetRegistry::new();

        for decl in manifest.modules {
            if !seen.insert(decl.name.clone()) {
                return Err(Error::DuplicateModule { name: decl.name });
            }

            let targets: Vec<Target> = decl.targets.iter().map(Target::new).collect();
            for target in &targets {
                registry.register(&decl.name, target.clone());
            }

            modules.push(Module {
                name: decl.name,
                targets,
                dependencies: decl.dependencies,
            });
        }

        debug!("Loaded project with {} modules", modules.len());

        Ok(Self { modules, registry })
    }

    /// Load a project from a manifest file.
    ///
    /// # Errors
    ///
    /// Returns manifest loading errors or [`Error::DuplicateModule`].
    pub fn load(path: &Path) -> Result<Self> {
        Self::from_manifest(Manifest::load(path)?)
    }

    /// The modules of this project, in declaration order.
    #[must_use]
    pub fn modules(&self) -> &[Module] {
        &self.modules
    }

    /// Look up a module by name.
    #[must_use]
    pub fn module(&self, name: &str) -> Option<&Module> {
        self.modules.iter().find(|module| module.name == name)
    }

    /// The target registry populated from the manifest.
    #[must_use]
    pub fn registry(&self) -> &TargetRegistry {
        &self.registry
    }

    /// Build the dependency graph for the whole project.
    ///
    /// Modules are inserted in declaration order so the graph's tie-breaking
    /// follows the manifest.
    ///
    /// # Errors
    ///
    /// Returns graph errors for dangling dependencies or cycles.
    pub fn graph(&self) -> Result<ModuleGraph<Module>> {
        let mut graph = ModuleGraph::new();
        for module in &self.modules {
            graph.add_module(&module.name, module.clone())?;
        }
        graph.add_dependency_edges()?;
        Ok(graph)
    }
}
