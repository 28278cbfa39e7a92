//! Process command implementation
//!
//! This module contains the complete workflow: configuration loading,
//! document parsing, CSV export of every stream and report generation.

use super::shared::{ProcessingStats, load_configuration, process_documents, setup_logging};
use crate::app::adapters::csv_export::CsvExporter;
use crate::app::models::ParsedTable;
use crate::app::services::flattener::export_rows;
use crate::cli::args::{OutputFormat, ProcessArgs};
use crate::config::Config;
use crate::Result;
use colored::Colorize;
use indicatif::HumanDuration;
use std::time::Instant;
use tracing::{debug, info, warn};

/// Process command runner
///
/// This function orchestrates the entire processing workflow:
/// 1. Set up logging and configuration
/// 2. Parse every input document, skipping failed ones
/// 3. Write one CSV file per export stream
/// 4. Generate summary statistics
pub fn run_process(args: ProcessArgs) -> Result<ProcessingStats> {
    let start_time = Instant::now();

    setup_logging(args.get_log_level(), args.quiet)?;

    info!("Starting Haushalt processor");
    debug!("Command line arguments: {:?}", args);

    args.validate()?;

    let config = load_configuration(&args)?;
    debug!("Loaded configuration: {:?}", config);

    let run = process_documents(
        &args.inputs,
        config.parsing.row_policy,
        args.show_progress(),
    )?;

    let mut stats = ProcessingStats {
        documents_processed: run.documents_processed,
        documents_failed: run.failures.len(),
        tables_parsed: run.stats.parse.tables_parsed,
        rows_dropped: run.stats.parse.rows_dropped,
        sum_mismatches: run.stats.parse.sum_mismatches,
        row_success_rate: run.stats.parse.success_rate(),
        failures: run.failures,
        ..Default::default()
    };

    export_streams(&config, &run.tables, &mut stats)?;

    stats.processing_time = start_time.elapsed();

    generate_final_report(&args, &stats)?;

    Ok(stats)
}

/// Write every configured stream; output errors abort the run
pub fn export_streams(
    config: &Config,
    tables: &[ParsedTable],
    stats: &mut ProcessingStats,
) -> Result<()> {
    let exporter = CsvExporter::new(config.export.delimiter)?;

    for stream in &config.export.streams {
        let rows = export_rows(tables, stream, config.export.include_summaries);
        if rows.is_empty() {
            warn!("Stream {} has no rows", stream.name);
        }

        let summary = exporter.write_stream(&config.output_file(stream), stream, &rows)?;
        info!("Exported {}: {} rows", summary.stream, summary.rows);

        stats.rows_exported += summary.rows;
        stats.output_sizes.push((stream.file_name.clone(), summary.bytes));
    }

    Ok(())
}

/// Generate final processing report
fn generate_final_report(args: &ProcessArgs, stats: &ProcessingStats) -> Result<()> {
    info!("Generating final report");

    match args.output_format {
        OutputFormat::Human => generate_human_report(stats),
        OutputFormat::Json => generate_json_report(stats),
        OutputFormat::Csv => generate_csv_report(stats),
    }
}

/// Generate human-readable report
fn generate_human_report(stats: &ProcessingStats) -> Result<()> {
    let duration = HumanDuration(stats.processing_time);
    let total_size = ProcessingStats::format_size(stats.total_output_size());

    println!("\n{}", "Haushalt Processing Complete".green().bold());
    println!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");
    println!("Processing Summary:");
    println!("   • Documents processed: {}", stats.documents_processed);
    println!("   • Tables parsed: {}", stats.tables_parsed);
    println!("   • Rows exported: {}", stats.rows_exported);
    println!("   • Row success rate: {:.1}%", stats.row_success_rate);
    println!("   • Total output size: {}", total_size);
    println!("   • Processing time: {}", duration);

    if stats.rows_dropped > 0 {
        println!(
            "{}",
            format!("   • Rows dropped: {}", stats.rows_dropped).yellow()
        );
    }
    if stats.sum_mismatches > 0 {
        println!(
            "{}",
            format!("   • Sum mismatches: {}", stats.sum_mismatches).yellow()
        );
    }

    if !stats.output_sizes.is_empty() {
        println!("\nOutput Files:");
        for (filename, size) in &stats.output_sizes {
            println!("   • {}: {}", filename, ProcessingStats::format_size(*size));
        }
    }

    if !stats.failures.is_empty() {
        println!(
            "\n{}",
            format!("Failed documents: {}", stats.documents_failed).red().bold()
        );
        for (document, reason) in &stats.failures {
            println!("   • {}: {}", document.red(), reason);
        }
    }

    println!();
    Ok(())
}

/// Generate JSON report for machine consumption
fn generate_json_report(stats: &ProcessingStats) -> Result<()> {
    // Alternate formatting pretty-prints
    println!("{:#}", json_report(stats));
    Ok(())
}

fn json_report(stats: &ProcessingStats) -> serde_json::Value {
    serde_json::json!({
        "documents_processed": stats.documents_processed,
        "documents_failed": stats.documents_failed,
        "tables_parsed": stats.tables_parsed,
        "rows_exported": stats.rows_exported,
        "rows_dropped": stats.rows_dropped,
        "sum_mismatches": stats.sum_mismatches,
        "row_success_rate_percent": stats.row_success_rate,
        "processing_time_seconds": stats.processing_time.as_secs_f64(),
        "total_output_size_bytes": stats.total_output_size(),
        "output_files": stats.output_sizes.iter().map(|(name, size)| {
            serde_json::json!({
                "filename": name,
                "size_bytes": size
            })
        }).collect::<Vec<_>>(),
        "failures": stats.failures.iter().map(|(document, reason)| {
            serde_json::json!({
                "document": document,
                "error": reason
            })
        }).collect::<Vec<_>>()
    })
}

/// Generate CSV report for data analysis
fn generate_csv_report(stats: &ProcessingStats) -> Result<()> {
    println!("metric,value");
    println!("documents_processed,{}", stats.documents_processed);
    println!("documents_failed,{}", stats.documents_failed);
    println!("tables_parsed,{}", stats.tables_parsed);
    println!("rows_exported,{}", stats.rows_exported);
    println!("rows_dropped,{}", stats.rows_dropped);
    println!("sum_mismatches,{}", stats.sum_mismatches);
    println!("row_success_rate_percent,{:.2}", stats.row_success_rate);
    println!(
        "processing_time_seconds,{}",
        stats.processing_time.as_secs_f64()
    );
    println!("total_output_size_bytes,{}", stats.total_output_size());

    Ok(())
}
