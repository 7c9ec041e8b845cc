//! buildplan CLI application.
//!
//! Command-line front end for the buildplan resolver: reads a module
//! manifest, answers build-plan queries for module+target pairs, and
//! validates dependency graph structure.

// CLI binary needs to output to stdout/stderr - this is intentional
#![allow(clippy::print_stdout, clippy::print_stderr)]

mod cli;
mod commands;
mod tracing;

use crate::cli::{CliError, Command, EXIT_OK, exit_code_for, render_error};
use crate::tracing::{TracingConfig, TracingFormat};

fn main() {
    // NOTE: Using eprintln! in the panic hook is intentional - tracing
    // infrastructure may be corrupted during a panic.
    std::panic::set_hook(Box::new(|panic_info| {
        eprintln!("Application panicked: {panic_info}");
        eprintln!("Internal error occurred. Run with RUST_LOG=debug for more information.");
    }));

    let args = cli::parse();

    let tracing_config = TracingConfig {
        format: if args.json {
            TracingFormat::Json
        } else {
            TracingFormat::Compact
        },
        level: args.level.into(),
        ..Default::default()
    };
    if let Err(error) = crate::tracing::init_tracing(tracing_config) {
        eprintln!("Failed to initialize tracing: {error}");
    }

    match run(&args) {
        Ok(()) => std::process::exit(EXIT_OK),
        Err(error) => {
            render_error(&error, args.json);
            std::process::exit(exit_code_for(&error));
        }
    }
}

fn run(args: &cli::Cli) -> Result<(), CliError> {
    match &args.command {
        Command::Plan { module, target } => {
            commands::run_plan(&args.manifest, module, target, args.json)
        }
        Command::Validate => commands::run_validate(&args.manifest, args.json),
        Command::Modules => commands::run_modules(&args.manifest, args.json),
        Command::Targets { module } => commands::run_targets(&args.manifest, module, args.json),
    }
}
