//! Flattening/export transform for parsed budget tables
//!
//! This module turns the Position/child trees of parsed tables back into
//! flat rows, one per value, ready for a tabular writer.
//!
//! ## Architecture
//!
//! - [`export_stream`] - Stream definitions: table selection, scope columns, fields
//! - [`flatten`] - Summary exclusion, inheritance and per-value row expansion
//!
//! ## Usage
//!
//! ```rust
//! use haushalt_processor::app::services::flattener::{default_streams, export_rows};
//!
//! # fn example(tables: &[haushalt_processor::ParsedTable]) {
//! for stream in default_streams() {
//!     let rows = export_rows(tables, &stream, false);
//!     println!("{}: {} rows", stream.file_name, rows.len());
//! }
//! # }
//! ```

pub mod export_stream;
pub mod flatten;

#[cfg(test)]
pub mod tests;

// Re-export main types for easy access
pub use export_stream::{ExportField, ExportStream, ScopeField, ScopeFilter, default_streams};
pub use flatten::{Cell, ExportPolicy, FlatRow, flatten_table};

use crate::app::models::ParsedTable;
use tracing::debug;

/// Flatten every table a stream accepts, in discovery order
pub fn export_rows(
    tables: &[ParsedTable],
    stream: &ExportStream,
    include_summaries: bool,
) -> Vec<FlatRow> {
    let policy = stream.policy(include_summaries);

    let rows: Vec<FlatRow> = tables
        .iter()
        .filter(|table| stream.accepts(table))
        .flat_map(|table| flatten_table(table, &policy, &stream.leading_fields(&table.scope)))
        .collect();

    debug!("Stream {}: {} rows", stream.name, rows.len());
    rows
}
