//! Error types for buildplan configuration and resolution.

use miette::Diagnostic;
use std::path::PathBuf;
use thiserror::Error;

/// Result type for buildplan operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while loading a manifest or resolving a build plan.
#[derive(Error, Debug, Diagnostic)]
pub enum Error {
    /// A module in the dependency closure does not declare the requested target.
    #[error("Module '{module}' does not declare target '{target}'")]
    #[diagnostic(
        code(buildplan::core::target_mismatch),
        help(
            "Add the target to the module's declared targets, or request a target every module in the closure supports"
        )
    )]
    TargetMismatch {
        /// The first module in closure order missing the target.
        module: String,
        /// The requested target identifier.
        target: String,
    },

    /// The requested module is not declared in the manifest.
    #[error("Unknown module '{name}'")]
    #[diagnostic(
        code(buildplan::core::unknown_module),
        help("Check the module name against the manifest's module declarations")
    )]
    UnknownModule {
        /// The name that failed to resolve.
        name: String,
    },

    /// The requested module does not declare the requested target itself.
    #[error("Module '{module}' does not declare target '{target}' in the manifest")]
    #[diagnostic(
        code(buildplan::core::unknown_target),
        help("Declare the target on the module before requesting a plan for it")
    )]
    UnknownTarget {
        /// The module the request named.
        module: String,
        /// The undeclared target identifier.
        target: String,
    },

    /// Two module declarations share a name.
    #[error("Module '{name}' is declared more than once")]
    #[diagnostic(
        code(buildplan::core::duplicate_module),
        help("Module names must be unique within a manifest")
    )]
    DuplicateModule {
        /// The duplicated name.
        name: String,
    },

    /// A graph-level failure (cycle, dangling dependency).
    #[error(transparent)]
    #[diagnostic(transparent)]
    Graph(#[from] buildplan_module_graph::Error),

    /// The manifest file extension is not one of the supported formats.
    #[error("Unsupported manifest format for {path}")]
    #[diagnostic(
        code(buildplan::core::unsupported_manifest),
        help("Supported manifest formats: .toml, .json")
    )]
    UnsupportedManifestFormat {
        /// The manifest path in question.
        path: PathBuf,
    },

    /// I/O error occurred.
    #[error("I/O error during {operation}{}: {source}", path.as_ref().map(|p| format!(" at {}", p.display())).unwrap_or_default())]
    #[diagnostic(
        code(buildplan::core::io_error),
        help("Check that the referenced paths exist and that you have permission to read them")
    )]
    Io {
        /// The underlying I/O error.
        #[source]
        source: std::io::Error,
        /// Optional path where the error occurred.
        path: Option<PathBuf>,
        /// Description of the operation being performed.
        operation: String,
    },

    /// TOML parsing error.
    #[error("TOML parsing error{}: {source}", path.as_ref().map(|p| format!(" in {}", p.display())).unwrap_or_default())]
    #[diagnostic(
        code(buildplan::core::toml_error),
        help("Ensure the TOML has valid syntax and matches the expected manifest schema")
    )]
    Toml {
        /// The underlying TOML error.
        #[source]
        source: Box<toml::de::Error>,
        /// Optional path to the file being parsed.
        path: Option<PathBuf>,
    },

    /// JSON parsing error.
    #[error("JSON parsing error{}: {source}", path.as_ref().map(|p| format!(" in {}", p.display())).unwrap_or_default())]
    #[diagnostic(
        code(buildplan::core::json_error),
        help("Ensure the JSON has valid syntax and matches the expected manifest schema")
    )]
    Json {
        /// The underlying JSON error.
        #[source]
        source: serde_json::Error,
        /// Optional path to the file being parsed.
        path: Option<PathBuf>,
    },
}

impl From<std::io::Error> for Error {
    fn from(source: std::io::Error) -> Self {
        Self::Io {
            source,
            path: None,
            operation: "file operation".to_string(),
        }
    }
}

impl From<toml::de::Error> for Error {
    fn from(source: toml::de::Error) -> Self {
        Self::Toml {
            source: Box::new(source),
            path: None,
        }
    }
}

impl From<serde_json::Error> for Error {
    fn from(source: serde_json::Error) -> Self {
        Self::Json { source, path: None }
    }
}
