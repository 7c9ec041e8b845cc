//! Command-line interface definition and error mapping.

use crate::tracing::LogLevel;
use clap::{Parser, Subcommand};
use miette::{Diagnostic, Report};
use serde::Serialize;
use std::io::{self, Write};
use std::path::PathBuf;
use thiserror::Error;

/// Exit code for successful runs
pub const EXIT_OK: i32 = 0;
/// Manifest or configuration error exit code
pub const EXIT_CONFIG: i32 = 2;
/// Graph or resolution error exit code
pub const EXIT_RESOLUTION: i32 = 3;

/// CLI-specific error types with proper exit code mapping
#[derive(Error, Debug, Clone, Diagnostic)]
pub enum CliError {
    /// Manifest or configuration error (exit code 2)
    #[error("Configuration error: {message}")]
    #[diagnostic(code(buildplan::cli::config))]
    Config {
        /// The error message
        message: String,
        /// Optional help text
        #[help]
        help: Option<String>,
    },
    /// Graph construction or resolution error (exit code 3)
    #[error("Resolution error: {message}")]
    #[diagnostic(code(buildplan::cli::resolution))]
    Resolution {
        /// The error message
        message: String,
        /// Optional help text
        #[help]
        help: Option<String>,
    },
    /// Other unexpected error (exit code 3)
    #[error("Unexpected error: {message}")]
    #[diagnostic(code(buildplan::cli::other))]
    Other {
        /// The error message
        message: String,
        /// Optional help text
        #[help]
        help: Option<String>,
    },
}

impl CliError {
    /// Create a new configuration error
    #[must_use]
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
            help: None,
        }
    }

    /// Create a new resolution error
    #[must_use]
    pub fn resolution(message: impl Into<String>) -> Self {
        Self::Resolution {
            message: message.into(),
            help: None,
        }
    }

    /// Create a new other error
    #[must_use]
    pub fn other(message: impl Into<String>) -> Self {
        Self::Other {
            message: message.into(),
            help: None,
        }
    }

    /// Add help text to an existing error, returning a new error with the help text set.
    #[must_use]
    pub fn with_help(self, help_text: impl Into<String>) -> Self {
        let help = Some(help_text.into());
        match self {
            Self::Config { message, .. } => Self::Config { message, help },
            Self::Resolution { message, .. } => Self::Resolution { message, help },
            Self::Other { message, .. } => Self::Other { message, help },
        }
    }
}

/// Convert `buildplan_core::Error` to the appropriate `CliError` variant.
///
/// Manifest loading problems are configuration errors (exit code 2); graph
/// and target resolution problems are resolution errors (exit code 3). Help
/// text from the source diagnostic is carried over.
impl From<buildplan_core::Error> for CliError {
    fn from(err: buildplan_core::Error) -> Self {
        use buildplan_core::Error as CoreError;

        let help = Diagnostic::help(&err).map(|h| h.to_string());
        let message = err.to_string();

        let base = match err {
            CoreError::Io { .. }
            | CoreError::Toml { .. }
            | CoreError::Json { .. }
            | CoreError::UnsupportedManifestFormat { .. }
            | CoreError::DuplicateModule { .. } => Self::config(message),
            CoreError::TargetMismatch { .. }
            | CoreError::UnknownModule { .. }
            | CoreError::UnknownTarget { .. }
            | CoreError::Graph(_) => Self::resolution(message),
        };

        match help {
            Some(h) => base.with_help(h),
            None => base,
        }
    }
}

/// Map CLI error to appropriate exit code
#[must_use]
pub const fn exit_code_for(err: &CliError) -> i32 {
    match err {
        CliError::Config { .. } => EXIT_CONFIG,
        CliError::Resolution { .. } | CliError::Other { .. } => EXIT_RESOLUTION,
    }
}

/// Render error appropriately based on JSON flag
pub fn render_error(err: &CliError, json_mode: bool) {
    if json_mode {
        let envelope = ErrorEnvelope::new(serde_json::json!({
            "code": match err {
                CliError::Config { .. } => "config",
                CliError::Resolution { .. } => "resolution",
                CliError::Other { .. } => "other",
            },
            "message": err.to_string()
        }));

        match serde_json::to_string(&envelope) {
            Ok(json) => println!("{json}"),
            Err(_) => eprintln!("Error serializing error response"),
        }
    } else {
        // Use miette for human-friendly error display
        let report = Report::new(err.clone());
        eprintln!("{report:?}");
        // Ensure output is flushed before potential process exit
        let _ = io::stderr().flush();
    }
}

/// Success response envelope for JSON output
#[derive(Debug, Clone, Serialize)]
pub struct OkEnvelope<T> {
    /// Status indicator - always "ok" for success
    pub status: &'static str,
    /// The actual data payload
    pub data: T,
}

impl<T> OkEnvelope<T> {
    /// Create a new success envelope
    #[must_use]
    pub const fn new(data: T) -> Self {
        Self { status: "ok", data }
    }
}

/// Error response envelope for JSON output
#[derive(Debug, Clone, Serialize)]
pub struct ErrorEnvelope<T> {
    /// Status indicator - always "error" for failures
    pub status: &'static str,
    /// The error payload
    pub error: T,
}

impl<T> ErrorEnvelope<T> {
    /// Create a new error envelope
    #[must_use]
    pub const fn new(error: T) -> Self {
        Self {
            status: "error",
            error,
        }
    }
}

/// Multi-target build planner: resolves dependency-first build orders for
/// module+target pairs declared in a manifest.
#[derive(Debug, Parser)]
#[command(name = "buildplan", version, about)]
pub struct Cli {
    /// Path to the manifest file
    #[arg(
        long,
        global = true,
        default_value = "build.toml",
        env = "BUILDPLAN_MANIFEST"
    )]
    pub manifest: PathBuf,

    /// Emit machine-readable JSON on stdout
    #[arg(long, global = true)]
    pub json: bool,

    /// Log level for diagnostics on stderr
    #[arg(long, short = 'l', global = true, value_enum, default_value = "warn")]
    pub level: LogLevel,

    /// Subcommand to run
    #[command(subcommand)]
    pub command: Command,
}

/// Available subcommands
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Resolve a dependency-first build plan for a module and target
    Plan {
        /// Module to build
        module: String,
        /// Target to build it for (e.g. jvm, linuxX64, js)
        target: String,
    },
    /// Validate the manifest's dependency graph
    Validate,
    /// List the modules declared in the manifest
    Modules,
    /// List the targets a module declares
    Targets {
        /// Module to inspect
        module: String,
    },
}

/// Parse command line arguments
#[must_use]
pub fn parse() -> Cli {
    Cli::parse()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exit_codes() {
        assert_eq!(exit_code_for(&CliError::config("bad manifest")), EXIT_CONFIG);
        assert_eq!(
            exit_code_for(&CliError::resolution("no such target")),
            EXIT_RESOLUTION
        );
        assert_eq!(exit_code_for(&CliError::other("boom")), EXIT_RESOLUTION);
    }

    #[test]
    fn test_core_error_mapping() {
        let err: CliError = buildplan_core::Error::TargetMismatch {
            module: "producer".to_string(),
            target: "js".to_string(),
        }
        .into();
        assert!(matches!(err, CliError::Resolution { .. }));

        let err: CliError = buildplan_core::Error::DuplicateModule {
            name: "core".to_string(),
        }
        .into();
        assert!(matches!(err, CliError::Config { .. }));
    }

    #[test]
    fn test_ok_envelope_serialization() {
        let envelope = OkEnvelope::new(vec!["producer", "consumer"]);
        let json = serde_json::to_string(&envelope).unwrap();
        assert!(json.contains(r#""status":"ok""#));
        assert!(json.contains("producer"));
    }

    #[test]
    fn test_cli_parses_plan_command() {
        let cli = Cli::try_parse_from([
            "buildplan",
            "--manifest",
            "custom.toml",
            "plan",
            "consumer",
            "jvm",
        ])
        .unwrap();

        assert_eq!(cli.manifest, PathBuf::from("custom.toml"));
        match cli.command {
            Command::Plan { module, target } => {
                assert_eq!(module, "consumer");
                assert_eq!(target, "jvm");
            }
            other => panic!("expected Plan, got {other:?}"),
        }
    }
}
