//! Document traversal for budget documents
//!
//! This module drives the core for one document at a time: it resets the
//! heading scope, feeds headings to the state machine, dispatches tables
//! to the parser and merges header-less continuation tables into the
//! table before them.
//!
//! ## Architecture
//!
//! - [`processor`] - Block traversal, dispatch and continuation merging
//! - [`stats`] - Per-document statistics
//!
//! ## Usage
//!
//! ```rust
//! use haushalt_processor::app::models::Block;
//! use haushalt_processor::app::services::document_processor::DocumentProcessor;
//! use haushalt_processor::app::services::heading_state::TeilhaushaltRegistry;
//! use haushalt_processor::config::RowPolicy;
//!
//! # fn example(documents: Vec<Vec<Block>>) -> haushalt_processor::Result<()> {
//! let mut processor = DocumentProcessor::new(TeilhaushaltRegistry::new(), RowPolicy::Strict);
//! for blocks in documents {
//!     let result = processor.process_document(blocks)?;
//!     println!("{} tables", result.tables.len());
//! }
//! let registry = processor.into_registry();
//! # Ok(())
//! # }
//! ```

pub mod processor;
pub mod stats;

#[cfg(test)]
pub mod tests;

// Re-export main types for easy access
pub use processor::{DocumentProcessor, DocumentResult};
pub use stats::DocumentStats;
