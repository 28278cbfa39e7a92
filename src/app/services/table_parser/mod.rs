//! Budget table parser for Ergebnishaushalt, Finanzhaushalt and
//! Investitionsübersicht grids
//!
//! This module turns a table's raw cell grid into the hierarchical record
//! model. All three layouts share one parsing algorithm; what differs between
//! them is described as data in a layout configuration table rather than in
//! separate parser types.
//!
//! ## Architecture
//!
//! The parser is organized into logical components:
//! - [`field_parsers`] - Amount, integer and whitespace primitives
//! - [`layout`] - Per-layout meta column configuration and the header dispatcher
//! - [`header`] - Meta and value column classification of a header row
//! - [`record_parser`] - Individual row extraction and marker row detection
//! - [`parser`] - Position/child grouping, Projects and continuation tables
//! - [`stats`] - Parsing statistics
//!
//! ## Usage
//!
//! ```rust
//! use haushalt_processor::app::services::table_parser::{classify, ParseStats, TableParser};
//! use haushalt_processor::config::RowPolicy;
//! use haushalt_processor::TableScope;
//!
//! # fn example(grid: Vec<Vec<String>>) -> haushalt_processor::Result<()> {
//! let parser = TableParser::new(RowPolicy::Strict);
//! let mut stats = ParseStats::new();
//!
//! if let Some(layout) = classify(&grid[0]) {
//!     let table = parser.parse(layout, &grid, TableScope::default(), &mut stats)?;
//!     println!("{} positions in {}", table.position_count(), table.layout);
//! }
//! # Ok(())
//! # }
//! ```

pub mod field_parsers;
pub mod header;
pub mod layout;
pub mod parser;
pub mod record_parser;
pub mod stats;

#[cfg(test)]
pub mod tests;

// Re-export main types for easy access
pub use header::describe_header;
pub use layout::{LayoutSpec, classify};
pub use parser::TableParser;
pub use stats::ParseStats;
