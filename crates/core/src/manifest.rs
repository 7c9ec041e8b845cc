//! Manifest parsing.
//!
//! A manifest declares modules as an array of tables, which preserves
//! declaration order. Every tie-break in planning falls back to that order.
//!
//! ```toml
//! [[module]]
//! name = "producer"
//! targets = ["jvm", "linuxX64"]
//!
//! [[module]]
//! name = "consumer"
//! targets = ["jvm", "linuxX64", "js"]
//! dependencies = [{ module = "producer", kind = "implementation" }]
//! ```

use crate::error::{Error, Result};
use crate::module::DependencyDecl;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// A single module declaration as it appears in the manifest.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModuleDecl {
    /// Unique module name.
    pub name: String,
    /// Target identifiers the module declares.
    #[serde(default)]
    pub targets: Vec<String>,
    /// Dependency declarations.
    #[serde(default)]
    pub dependencies: Vec<DependencyDecl>,
}

/// The parsed manifest: an ordered list of module declarations.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Manifest {
    /// Module declarations in file order.
    #[serde(rename = "module", default)]
    pub modules: Vec<ModuleDecl>,
}

impl Manifest {
    /// Parse a manifest from TOML text.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Toml`] if the text is not valid manifest TOML.
    pub fn from_toml_str(text: &str) -> Result<Self> {
        Ok(toml::from_str(text)?)
    }

    /// Parse a manifest from JSON text.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Json`] if the text is not valid manifest JSON.
    pub fn from_json_str(text: &str) -> Result<Self> {
        Ok(serde_json::from_str(text)?)
    }

    /// Load a manifest from a file, choosing the parser by extension.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Io`] if the file cannot be read,
    /// [`Error::UnsupportedManifestFormat`] for unrecognized extensions, or
    /// a parse error with the path attached.
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path).map_err(|source| Error::Io {
            source,
            path: Some(path.to_path_buf()),
            operation: "reading manifest".to_string(),
        })?;

        match path.extension().and_then(|ext| ext.to_str()) {
            Some("toml") => Self::from_toml_str(&text).map_err(|err| err.with_path(path)),
            Some("json") => Self::from_json_str(&text).map_err(|err| err.with_path(path)),
            _ => Err(Error::UnsupportedManifestFormat {
                path: path.to_path_buf(),
            }),
        }
    }
}

impl Error {
    /// Attach a manifest path to a parse error for reporting.
    fn with_path(self, path: &Path) -> Self {
        match self {
            Self::Toml { source, .. } => Self::Toml {
                source,
                path: Some(path.to_path_buf()),
            },
            Self::Json { source, .. } => Self::Json {
                source,
                path: Some(path.to_path_buf()),
            },
            other => other,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::module::DependencyKind;

    const EXAMPLE_TOML: &str = r#"
[[module]]
name = "producer"
targets = ["jvm", "linuxX64"]

[[module]]
name = "consumer"
targets = ["jvm", "linuxX64", "js"]
dependencies = [{ module = "producer", kind = "implementation" }]
"#;

    #[test]
    fn test_parse_toml_manifest() {
        let manifest = Manifest::from_toml_str(EXAMPLE_TOML).unwrap();

        assert_eq!(manifest.modules.len(), 2);
        assert_eq!(manifest.modules[0].name, "producer");
        assert_eq!(manifest.modules[0].targets, vec!["jvm", "linuxX64"]);
        assert!(manifest.modules[0].dependencies.is_empty());

        assert_eq!(manifest.modules[1].name, "consumer");
        assert_eq!(
            manifest.modules[1].dependencies,
            vec![DependencyDecl {
                module: "producer".to_string(),
                kind: DependencyKind::Implementation,
            }]
        );
    }

    #[test]
    fn test_parse_json_manifest() {
        let manifest = Manifest::from_json_str(
            r#"{
                "module": [
                    { "name": "producer", "targets": ["jvm"] },
                    {
                        "name": "consumer",
                        "targets": ["jvm"],
                        "dependencies": [{ "module": "producer", "kind": "api" }]
                    }
                ]
            }"#,
        )
        .unwrap();

        assert_eq!(manifest.modules.len(), 2);
        assert_eq!(manifest.modules[1].dependencies[0].kind, DependencyKind::Api);
    }

    #[test]
    fn test_declaration_order_preserved() {
        let manifest = Manifest::from_toml_str(
            r#"
[[module]]
name = "zeta"

[[module]]
name = "alpha"
"#,
        )
        .unwrap();

        let names: Vec<&str> = manifest
            .modules
            .iter()
            .map(|decl| decl.name.as_str())
            .collect();
        assert_eq!(names, vec!["zeta", "alpha"]);
    }

    #[test]
    fn test_invalid_toml_fails() {
        let err = Manifest::from_toml_str("not valid = [").unwrap_err();
        assert!(matches!(err, Error::Toml { .. }));
    }

    #[test]
    fn test_load_rejects_unknown_extension() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("build.yaml");
        std::fs::write(&path, "module: []").unwrap();

        let err = Manifest::load(&path).unwrap_err();
        assert!(matches!(err, Error::UnsupportedManifestFormat { .. }));
    }

    #[test]
    fn test_load_missing_file() {
        let err = Manifest::load(Path::new("/nonexistent/build.toml")).unwrap_err();
        match err {
            Error::Io { path, .. } => {
                assert_eq!(path.as_deref(), Some(Path::new("/nonexistent/build.toml")));
            }
            other => panic!("expected Io error, got {other:?}"),
        }
    }
}
