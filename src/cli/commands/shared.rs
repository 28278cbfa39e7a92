//! Shared components for CLI commands
//!
//! This module contains common types, utilities, and functions used by both
//! commands: logging setup, layered configuration and the document loop.

use crate::app::adapters::document_loader::{discover_documents, load_document};
use crate::app::models::ParsedTable;
use crate::app::services::document_processor::{DocumentProcessor, DocumentResult, DocumentStats};
use crate::app::services::heading_state::TeilhaushaltRegistry;
use crate::cli::args::ProcessArgs;
use crate::config::{Config, RowPolicy};
use crate::Result;
use anyhow::Context;
use indicatif::{ProgressBar, ProgressStyle};
use std::path::{Path, PathBuf};
use tracing::{debug, error, info, warn};

/// Processing statistics for reporting across all commands
#[derive(Debug, Clone, Default)]
pub struct ProcessingStats {
    /// Number of documents processed successfully
    pub documents_processed: usize,
    /// Number of documents that failed and were skipped
    pub documents_failed: usize,
    /// Number of tables parsed (continuations not counted)
    pub tables_parsed: usize,
    /// Number of rows written across all exports
    pub rows_exported: usize,
    /// Number of rows dropped by the tolerant row policy
    pub rows_dropped: usize,
    /// Number of Positions whose values differ from their children's sums
    pub sum_mismatches: usize,
    /// Share of body rows that became records or project markers (percentage)
    pub row_success_rate: f64,
    /// Total processing time
    pub processing_time: std::time::Duration,
    /// Output file sizes in bytes
    pub output_sizes: Vec<(String, u64)>,
    /// Failed documents with their error chains
    pub failures: Vec<(String, String)>,
}

impl ProcessingStats {
    /// Calculate total output size in bytes
    pub fn total_output_size(&self) -> u64 {
        self.output_sizes.iter().map(|(_, size)| size).sum()
    }

    /// Format output size in human-readable format
    pub fn format_size(bytes: u64) -> String {
        const UNITS: &[&str] = &["B", "KB", "MB", "GB", "TB"];
        let mut size = bytes as f64;
        let mut unit_index = 0;

        while size >= 1024.0 && unit_index < UNITS.len() - 1 {
            size /= 1024.0;
            unit_index += 1;
        }

        if unit_index == 0 {
            format!("{} {}", bytes, UNITS[unit_index])
        } else {
            format!("{:.2} {}", size, UNITS[unit_index])
        }
    }
}

/// Outcome of running every input document through one processor
#[derive(Debug)]
pub struct DocumentRun {
    /// Tables of all successful documents, in discovery order
    pub tables: Vec<ParsedTable>,
    /// Counters summed over the successful documents
    pub stats: DocumentStats,
    pub documents_processed: usize,
    /// Failed documents with their error chains
    pub failures: Vec<(String, String)>,
    /// Registry accumulated over the run
    pub registry: TeilhaushaltRegistry,
}

/// Set up structured logging
///
/// `RUST_LOG` takes precedence over the level derived from the verbosity
/// flags. Quiet mode switches to compact output.
pub fn setup_logging(log_level: &str, quiet: bool) -> Result<()> {
    use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

    // Create filter
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("haushalt_processor={}", log_level)));

    if quiet {
        // Minimal logging for quiet mode
        tracing_subscriber::registry()
            .with(filter)
            .with(
                fmt::layer()
                    .with_target(false)
                    .with_level(true)
                    .with_writer(std::io::stderr)
                    .compact(),
            )
            .init();
    } else {
        // Standard logging with timestamps
        tracing_subscriber::registry()
            .with(filter)
            .with(
                fmt::layer()
                    .with_target(false)
                    .with_level(true)
                    .with_timer(fmt::time::uptime())
                    .with_writer(std::io::stderr),
            )
            .init();
    }

    debug!("Logging initialized at level: {}", log_level);
    Ok(())
}

/// Load configuration using layered approach (file -> env)
///
/// Without an explicit file the default location is used if it exists.
/// CLI overrides and validation are left to the caller.
pub fn load_layered_configuration(config_file: Option<&Path>) -> Result<Config> {
    info!("Loading configuration");

    let default_config_path = if config_file.is_none() {
        Config::default_config_path().ok()
    } else {
        None
    };

    let config_file = config_file.or_else(|| {
        default_config_path
            .as_deref()
            .filter(|path| path.exists())
    });

    if let Some(config_path) = config_file {
        info!("Using config file: {}", config_path.display());
    } else {
        info!("No config file found, using defaults and environment variables");
    }

    Config::load_layered(config_file)
}

/// Load the configuration of the process command
pub fn load_configuration(args: &ProcessArgs) -> Result<Config> {
    let mut config = load_layered_configuration(args.config_file.as_deref())?;

    // Apply CLI argument overrides
    apply_cli_overrides(&mut config, args);

    // Final validation
    config.validate()?;

    Ok(config)
}

/// Apply CLI argument overrides to configuration
pub fn apply_cli_overrides(config: &mut Config, args: &ProcessArgs) {
    if let Some(output_path) = &args.output_path {
        config.export.output_dir = output_path.clone();
    }
    if let Some(policy) = args.row_policy {
        config.parsing.row_policy = policy.into();
    }
    if let Some(delimiter) = args.delimiter {
        config.export.delimiter = delimiter;
    }
    if args.include_summaries {
        config.export.include_summaries = true;
    }
}

/// Resolve inputs and process every document with one shared registry
///
/// A failing document is logged with its error chain and skipped; its
/// tables are not exported. Unresolvable inputs abort the run.
pub fn process_documents(
    inputs: &[String],
    policy: RowPolicy,
    show_progress: bool,
) -> Result<DocumentRun> {
    let paths = discover_documents(inputs)?;
    if paths.is_empty() {
        warn!("No documents to process");
    }

    let mut processor = DocumentProcessor::new(TeilhaushaltRegistry::new(), policy);
    let mut tables = Vec::new();
    let mut stats = DocumentStats::new();
    let mut documents_processed = 0;
    let mut failures = Vec::new();

    let progress = show_progress.then(|| create_progress_bar(paths.len() as u64, "Parsing documents"));

    for path in &paths {
        if let Some(pb) = &progress {
            pb.set_message(display_name(path));
        }

        match process_document_file(&mut processor, path) {
            Ok(result) => {
                documents_processed += 1;
                stats.merge(&result.stats);
                tables.extend(result.tables);
            }
            Err(e) => {
                error!("{:#}", e);
                failures.push((path.display().to_string(), format!("{:#}", e)));
            }
        }

        if let Some(pb) = &progress {
            pb.inc(1);
        }
    }

    if let Some(pb) = progress {
        pb.finish_with_message("Parsing complete");
    }

    info!(
        "Processed {} documents ({} failed): {} tables",
        documents_processed,
        failures.len(),
        tables.len()
    );

    Ok(DocumentRun {
        tables,
        stats,
        documents_processed,
        failures,
        registry: processor.into_registry(),
    })
}

fn process_document_file(
    processor: &mut DocumentProcessor,
    path: &Path,
) -> anyhow::Result<DocumentResult> {
    let document = load_document(path)
        .with_context(|| format!("Failed to load document '{}'", path.display()))?;

    info!("Processing document: {}", document.name);
    processor
        .process_document(document.blocks)
        .with_context(|| format!("Failed to process document '{}'", document.name))
}

fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().to_string())
        .unwrap_or_else(|| path.display().to_string())
}

/// Create a progress bar with appropriate styling
pub fn create_progress_bar(total: u64, message: &str) -> ProgressBar {
    let pb = ProgressBar::new(total);
    let style = ProgressStyle::default_bar()
        .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} {msg}")
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .progress_chars("#>-");
    pb.set_style(style);
    pb.set_message(message.to_string());
    pb
}

/// Write text to a file, or to stdout when no file is given
pub fn write_output(output_file: Option<&PathBuf>, content: &str) -> Result<()> {
    match output_file {
        Some(path) => {
            std::fs::write(path, content).map_err(|e| {
                crate::Error::io(format!("Failed to write '{}'", path.display()), e)
            })?;
            info!("Wrote {}", path.display());
        }
        None => println!("{}", content),
    }
    Ok(())
}
