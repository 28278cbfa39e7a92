//! Heading scope tracking for budget documents
//!
//! The headings between tables tell which Teilhaushalt, Produktbereich and
//! Produktgruppe the following tables belong to. This module infers that
//! scope from the heading stream and records every level it sees in a
//! registry that outlives individual documents.
//!
//! ## Architecture
//!
//! - [`state`] - The forward-only scope state machine
//! - [`registry`] - Cross-document Teilhaushalt registry
//!
//! ## Usage
//!
//! ```rust
//! use haushalt_processor::app::services::heading_state::{HeadingState, TeilhaushaltRegistry};
//!
//! let mut headings = HeadingState::new(TeilhaushaltRegistry::new());
//! headings.register_heading("THH 01 Bildung");
//! headings.register_heading("02 Schulen");
//!
//! let scope = headings.scope();
//! assert_eq!(scope.teilhaushalt.as_deref(), Some("01"));
//! assert_eq!(scope.produktbereich.as_deref(), Some("02"));
//! ```

pub mod registry;
pub mod state;

#[cfg(test)]
pub mod tests;

// Re-export main types for easy access
pub use registry::{Entry, Produktbereich, Produktgruppe, Teilhaushalt, TeilhaushaltRegistry};
pub use state::{HeadingState, HeadingTransition, ScopeLevel};
