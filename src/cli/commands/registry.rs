//! Registry command implementation
//!
//! Parses the input documents like `process` but writes no exports; instead
//! the Teilhaushalt registry accumulated from their headings is printed as
//! an indented tree or as JSON.

use super::shared::{
    ProcessingStats, load_layered_configuration, process_documents, setup_logging, write_output,
};
use crate::app::services::heading_state::TeilhaushaltRegistry;
use crate::cli::args::{RegistryArgs, RegistryFormat};
use crate::{Error, Result};
use colored::Colorize;
use std::fmt::Write;
use std::time::Instant;
use tracing::{debug, info, warn};

/// Registry command runner
pub fn run_registry(args: RegistryArgs) -> Result<ProcessingStats> {
    let start_time = Instant::now();

    setup_logging(args.get_log_level(), false)?;
    debug!("Command line arguments: {:?}", args);

    args.validate()?;

    let mut config = load_layered_configuration(args.config_file.as_deref())?;
    if let Some(policy) = args.row_policy {
        config.parsing.row_policy = policy.into();
    }
    config.validate()?;

    let run = process_documents(&args.inputs, config.parsing.row_policy, false)?;
    for (document, reason) in &run.failures {
        warn!("Registry may be incomplete, {} failed: {}", document, reason);
    }

    info!(
        "Registry: {} Teilhaushalte, {} Produktbereiche, {} Produktgruppen",
        run.registry.len(),
        run.registry.produktbereich_count(),
        run.registry.produktgruppe_count()
    );

    let content = match args.format {
        RegistryFormat::Human => render_human(&run.registry),
        RegistryFormat::Json => render_json(&run.registry)?,
    };

    if args.output_file.is_none() && args.format == RegistryFormat::Human {
        println!("{}", "Teilhaushalt Registry".green().bold());
        println!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");
    }
    write_output(args.output_file.as_ref(), &content)?;

    Ok(ProcessingStats {
        documents_processed: run.documents_processed,
        documents_failed: run.failures.len(),
        tables_parsed: run.stats.parse.tables_parsed,
        failures: run.failures,
        processing_time: start_time.elapsed(),
        ..Default::default()
    })
}

/// Indented tree, two spaces per level, in identifier order
pub fn render_human(registry: &TeilhaushaltRegistry) -> String {
    if registry.is_empty() {
        return "(no Teilhaushalt headings found)".to_string();
    }

    let mut out = String::new();
    for teilhaushalt in registry.iter() {
        let _ = writeln!(out, "THH {} {}", teilhaushalt.id, teilhaushalt.title);
        for produktbereich in teilhaushalt.produktbereiche.values() {
            let _ = writeln!(out, "  {} {}", produktbereich.id, produktbereich.title);
            for produktgruppe in produktbereich.produktgruppen.values() {
                let _ = writeln!(out, "    {} {}", produktgruppe.id, produktgruppe.title);
            }
        }
    }

    out.truncate(out.trim_end().len());
    out
}

/// Nested JSON objects keyed by identifier
pub fn render_json(registry: &TeilhaushaltRegistry) -> Result<String> {
    serde_json::to_string_pretty(registry).map_err(|e| {
        Error::document_format("registry", "Failed to serialize the registry", Some(e))
    })
}
