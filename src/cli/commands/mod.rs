//! Command implementations for the Haushalt processor CLI
//!
//! This module contains the command execution logic, progress reporting,
//! and error handling for the CLI interface. Each command is implemented in
//! its own module.

pub mod process;
pub mod registry;
pub mod shared;

// Re-export the main types and functions
pub use shared::ProcessingStats;

use crate::cli::args::{Args, Commands};
use crate::{Error, Result};

/// Main command runner
///
/// Dispatches to the appropriate subcommand handler:
/// - `process`: parse documents and write the CSV exports
/// - `registry`: parse documents and print the Teilhaushalt registry
pub fn run(args: Args) -> Result<ProcessingStats> {
    match args.command {
        Some(Commands::Process(process_args)) => process::run_process(process_args),
        Some(Commands::Registry(registry_args)) => registry::run_registry(registry_args),
        None => Err(Error::configuration("No command given")),
    }
}
