//! Core types for the buildplan ecosystem.
//!
//! This crate holds the data model for multi-target module builds (modules,
//! compilation targets, dependency declarations) plus manifest loading, the
//! per-module target registry, and the resolver that turns a module+target
//! request into a dependency-first build plan.
//!
//! # Example
//!
//! ```
//! use buildplan_core::{Manifest, Project, resolve};
//!
//! # fn main() -> buildplan_core::Result<()> {
//! let manifest = Manifest::from_toml_str(r#"
//! [[module]]
//! name = "producer"
//! targets = ["jvm", "linuxX64"]
//!
//! [[module]]
//! name = "consumer"
//! targets = ["jvm", "linuxX64", "js"]
//! dependencies = [{ module = "producer" }]
//! "#)?;
//!
//! let project = Project::from_manifest(manifest)?;
//! let plan = resolve(&project, "consumer", "jvm")?;
//! assert_eq!(plan.steps.len(), 2);
//!
//! // producer never declared "js", so a js plan fails deterministically
//! assert!(resolve(&project, "consumer", "js").is_err());
//! # Ok(())
//! # }
//! ```

mod error;
pub mod manifest;
pub mod module;
pub mod project;
pub mod registry;
pub mod resolver;
pub mod target;

pub use error::{Error, Result};
pub use manifest::{Manifest, ModuleDecl};
pub use module::{DependencyDecl, DependencyKind, Module};
pub use project::Project;
pub use registry::TargetRegistry;
pub use resolver::{BuildStep, Resolution, resolve};
pub use target::{PlatformFamily, Target};
