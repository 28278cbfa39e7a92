//! Command-line argument definitions for the Haushalt processor
//!
//! This module defines the CLI interface using the clap derive API.

use crate::config::RowPolicy;
use crate::{Error, Result};
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// CLI arguments for the Haushalt budget table processor
///
/// Reads budget documents extracted as heading and table blocks, parses the
/// Ergebnishaushalt, Finanzhaushalt and Investitionsübersicht tables and
/// writes flat CSV exports.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "haushalt-processor",
    version,
    about = "Parse municipal budget tables and export them as flat CSV files",
    long_about = "Reads municipal budget documents that were extracted into JSON block streams \
                  (headings and cell grids), recognises the Ergebnishaushalt, Finanzhaushalt and \
                  Investitionsübersicht tables, tracks the Teilhaushalt / Produktbereich / \
                  Produktgruppe scope from the headings and writes one CSV file per export stream."
)]
pub struct Args {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available subcommands
#[derive(Debug, Clone, Subcommand)]
pub enum Commands {
    /// Parse documents and write the CSV exports (main command)
    Process(ProcessArgs),
    /// Parse documents and print the Teilhaushalt registry
    Registry(RegistryArgs),
}

/// Row policy as accepted on the command line
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum RowPolicyArg {
    /// Every structural violation aborts the document
    Strict,
    /// Drop value-less and row-local broken rows with a warning
    Tolerant,
}

impl From<RowPolicyArg> for RowPolicy {
    fn from(arg: RowPolicyArg) -> Self {
        match arg {
            RowPolicyArg::Strict => RowPolicy::Strict,
            RowPolicyArg::Tolerant => RowPolicy::Tolerant,
        }
    }
}

/// Arguments for the process command
#[derive(Debug, Clone, Parser)]
pub struct ProcessArgs {
    /// Input documents
    ///
    /// Each input is a JSON document, a directory searched recursively for
    /// `*.json` files, or a glob pattern. Inputs are processed in the order
    /// given.
    #[arg(value_name = "INPUT", required = true, help = "Documents, directories or glob patterns")]
    pub inputs: Vec<String>,

    /// Output directory for the CSV files
    #[arg(
        short = 'o',
        long = "output",
        value_name = "PATH",
        help = "Output directory for the CSV exports"
    )]
    pub output_path: Option<PathBuf>,

    /// Configuration file path
    ///
    /// Defaults to <config dir>/haushalt-processor/config.toml if it exists.
    #[arg(
        short = 'c',
        long = "config",
        value_name = "FILE",
        help = "Configuration file path"
    )]
    pub config_file: Option<PathBuf>,

    #[arg(
        long = "row-policy",
        value_enum,
        value_name = "POLICY",
        help = "How to treat rows that break the table hierarchy"
    )]
    pub row_policy: Option<RowPolicyArg>,

    /// Emit summary Positions and Positions alongside their children
    #[arg(long = "include-summaries", help = "Include summary positions in the exports")]
    pub include_summaries: bool,

    #[arg(
        long = "delimiter",
        value_name = "CHAR",
        help = "CSV field delimiter (single ASCII character)"
    )]
    pub delimiter: Option<char>,

    /// Output format for the processing report
    #[arg(
        long = "output-format",
        value_enum,
        default_value = "human",
        help = "Output format for the processing report"
    )]
    pub output_format: OutputFormat,

    /// Suppress progress output and reduce log noise
    #[arg(
        short = 'q',
        long = "quiet",
        conflicts_with = "verbose",
        help = "Suppress progress bars and non-error output"
    )]
    pub quiet: bool,

    /// Increase logging verbosity (-v info, -vv debug, -vvv trace)
    #[arg(
        short = 'v',
        long = "verbose",
        action = clap::ArgAction::Count,
        help = "Increase logging verbosity"
    )]
    pub verbose: u8,
}

/// Arguments for the registry command
#[derive(Debug, Clone, Parser)]
pub struct RegistryArgs {
    /// Input documents, directories or glob patterns
    #[arg(value_name = "INPUT", required = true, help = "Documents, directories or glob patterns")]
    pub inputs: Vec<String>,

    #[arg(
        short = 'c',
        long = "config",
        value_name = "FILE",
        help = "Configuration file path"
    )]
    pub config_file: Option<PathBuf>,

    #[arg(
        long = "row-policy",
        value_enum,
        value_name = "POLICY",
        help = "How to treat rows that break the table hierarchy"
    )]
    pub row_policy: Option<RowPolicyArg>,

    #[arg(
        short = 'f',
        long = "format",
        value_enum,
        default_value = "human",
        help = "Output format for the registry"
    )]
    pub format: RegistryFormat,

    /// Write the registry to a file instead of stdout
    #[arg(long = "output-file", value_name = "FILE", help = "Write the registry to a file")]
    pub output_file: Option<PathBuf>,

    #[arg(
        short = 'v',
        long = "verbose",
        action = clap::ArgAction::Count,
        help = "Increase logging verbosity"
    )]
    pub verbose: u8,
}

/// Output format options for machine-readable results
#[derive(Debug, Clone, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable output
    Human,
    /// JSON format for scripting
    Json,
    /// CSV format for data analysis
    Csv,
}

/// Output format of the registry command
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum RegistryFormat {
    /// Indented tree
    Human,
    /// Nested JSON objects keyed by identifier
    Json,
}

impl ProcessArgs {
    /// Validate the process command arguments for consistency
    pub fn validate(&self) -> Result<()> {
        if let Some(config_file) = &self.config_file {
            if !config_file.exists() {
                return Err(Error::configuration(format!(
                    "Config file does not exist: {}",
                    config_file.display()
                )));
            }
        }

        if let Some(delimiter) = self.delimiter {
            if !delimiter.is_ascii() {
                return Err(Error::configuration(format!(
                    "Delimiter '{}' is not a single ASCII character",
                    delimiter
                )));
            }
        }

        if let Some(output_path) = &self.output_path {
            if output_path.is_file() {
                return Err(Error::configuration(format!(
                    "Output path is a file: {}",
                    output_path.display()
                )));
            }
        }

        Ok(())
    }

    /// Determine the appropriate log level based on verbosity flags
    pub fn get_log_level(&self) -> &'static str {
        if self.quiet {
            "error"
        } else {
            log_level(self.verbose)
        }
    }

    /// Check if we should show progress bars (not in quiet mode)
    pub fn show_progress(&self) -> bool {
        !self.quiet
    }
}

impl RegistryArgs {
    /// Validate the registry command arguments for consistency
    pub fn validate(&self) -> Result<()> {
        if let Some(config_file) = &self.config_file {
            if !config_file.exists() {
                return Err(Error::configuration(format!(
                    "Config file does not exist: {}",
                    config_file.display()
                )));
            }
        }

        // Validate output file directory exists if specified
        if let Some(output_file) = &self.output_file {
            if let Some(parent) = output_file
                .parent()
                .filter(|parent| !parent.as_os_str().is_empty())
            {
                if !parent.exists() {
                    return Err(Error::configuration(format!(
                        "Output file directory does not exist: {}",
                        parent.display()
                    )));
                }
            }
        }

        Ok(())
    }

    /// Determine the appropriate log level based on verbosity flags
    pub fn get_log_level(&self) -> &'static str {
        log_level(self.verbose)
    }
}

fn log_level(verbose: u8) -> &'static str {
    match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    }
}
