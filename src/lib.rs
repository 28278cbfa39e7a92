//! Haushalt Processor Library
//!
//! A Rust library for turning municipal budget tables, extracted from budget
//! documents as raw grids of cell text, into a uniform hierarchical record
//! model and flattening that model into CSV exports.
//!
//! This library provides tools for:
//! - Recognising the three budget table layouts (Ergebnishaushalt,
//!   Finanzhaushalt, Investitionsübersicht) from their header text
//! - Parsing rows into Positions, children and Projects
//! - Tracking the Teilhaushalt / Produktbereich / Produktgruppe scope from
//!   the headings between tables
//! - Flattening parsed tables into export rows with summary and inheritance rules

pub mod config;
pub mod constants;

// Core application modules
pub mod app {
    pub mod models;
    pub mod services {
        pub mod document_processor;
        pub mod flattener;
        pub mod heading_state;
        pub mod table_parser;
    }
    pub mod adapters {
        pub mod csv_export;
        pub mod document_loader;
    }
}

// CLI modules
pub mod cli {
    pub mod args;
    pub mod commands;
}

// Re-export commonly used types
pub use app::models::{Layout, ParsedTable, Position, Project, Record, TableScope};
pub use config::Config;

/// Result type alias for the Haushalt processor
pub type Result<T> = std::result::Result<T, Error>;

/// Error types for Haushalt processing operations
#[derive(thiserror::Error, Debug)]
pub enum Error {
    /// I/O operation failed
    #[error("I/O error: {message}")]
    Io {
        message: String,
        #[source]
        source: std::io::Error,
    },

    /// CSV writing error
    #[error("CSV writing error: {message}")]
    CsvWriting {
        message: String,
        #[source]
        source: csv::Error,
    },

    /// Directory traversal error
    #[error("Directory traversal error: {message}")]
    DirectoryTraversal {
        message: String,
        #[source]
        source: walkdir::Error,
    },

    /// Invalid input glob pattern
    #[error("Invalid input pattern '{pattern}'")]
    InputPattern {
        pattern: String,
        #[source]
        source: glob::PatternError,
    },

    /// Input document could not be read as a block stream
    #[error("Document format error in '{document}': {message}")]
    DocumentFormat {
        document: String,
        message: String,
        #[source]
        source: Option<serde_json::Error>,
    },

    /// Non-empty cell text that should be numeric but is not
    #[error("Numeric format error: '{value}' is not a valid {expected}")]
    NumericFormat { value: String, expected: &'static str },

    /// A row breaks the Position/child hierarchy
    #[error("Structural violation in row {row}")]
    Structural {
        row: usize,
        #[source]
        violation: StructuralViolation,
    },

    /// Header-less table with nothing to continue
    #[error("Continuation table cannot be merged: {reason}")]
    OrphanContinuation { reason: String },

    /// Failure inside one table of a document
    #[error("Table {table}")]
    Table {
        table: usize,
        #[source]
        source: Box<Error>,
    },

    /// Configuration error
    #[error("Configuration error: {message}")]
    Configuration { message: String },
}

/// Rows that break the two-level hierarchy invariants
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum StructuralViolation {
    #[error("position {number} has no sign")]
    PositionWithoutSign { number: i64 },

    #[error("child row carries sign '{sign}'")]
    ChildWithSign { sign: String },

    #[error("child row carries Kontogruppe {kontogruppe}")]
    ChildWithKontogruppe { kontogruppe: i64 },

    #[error("child row appears before any position")]
    ChildBeforePosition,

    #[error("row appears before any project marker")]
    RowOutsideProject,

    #[error("project marker '{text}' has no ':' separator")]
    MalformedProjectMarker { text: String },

    #[error("row has {found} cells but the header has {expected}")]
    ColumnCountMismatch { expected: usize, found: usize },
}

impl StructuralViolation {
    /// Violations confined to one row, which the tolerant row policy may drop
    ///
    /// Column count mismatches and broken project markers make the rest of
    /// the table unreadable and are never tolerated.
    pub fn is_tolerable(&self) -> bool {
        matches!(
            self,
            Self::PositionWithoutSign { .. }
                | Self::ChildWithSign { .. }
                | Self::ChildWithKontogruppe { .. }
                | Self::ChildBeforePosition
        )
    }
}

impl Error {
    /// Create an I/O error with context
    pub fn io(message: impl Into<String>, source: std::io::Error) -> Self {
        Self::Io {
            message: message.into(),
            source,
        }
    }

    /// Create a CSV writing error with context
    pub fn csv_writing(message: impl Into<String>, source: csv::Error) -> Self {
        Self::CsvWriting {
            message: message.into(),
            source,
        }
    }

    /// Create a directory traversal error
    pub fn directory_traversal(message: impl Into<String>, source: walkdir::Error) -> Self {
        Self::DirectoryTraversal {
            message: message.into(),
            source,
        }
    }

    /// Create an input pattern error
    pub fn input_pattern(pattern: impl Into<String>, source: glob::PatternError) -> Self {
        Self::InputPattern {
            pattern: pattern.into(),
            source,
        }
    }

    /// Create a document format error
    pub fn document_format(
        document: impl Into<String>,
        message: impl Into<String>,
        source: Option<serde_json::Error>,
    ) -> Self {
        Self::DocumentFormat {
            document: document.into(),
            message: message.into(),
            source,
        }
    }

    /// Create a numeric format error
    pub fn numeric_format(value: impl Into<String>, expected: &'static str) -> Self {
        Self::NumericFormat {
            value: value.into(),
            expected,
        }
    }

    /// Create a structural violation error for a grid row
    pub fn structural(row: usize, violation: StructuralViolation) -> Self {
        Self::Structural { row, violation }
    }

    /// Create an orphan continuation error
    pub fn orphan_continuation(reason: impl Into<String>) -> Self {
        Self::OrphanContinuation {
            reason: reason.into(),
        }
    }

    /// Wrap an error with the index of the table it happened in
    pub fn table(table: usize, source: Error) -> Self {
        Self::Table {
            table,
            source: Box::new(source),
        }
    }

    /// Create a configuration error
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }
}

impl From<std::io::Error> for Error {
    fn from(error: std::io::Error) -> Self {
        Self::Io {
            message: "I/O operation failed".to_string(),
            source: error,
        }
    }
}

impl From<csv::Error> for Error {
    fn from(error: csv::Error) -> Self {
        Self::CsvWriting {
            message: "CSV writing failed".to_string(),
            source: error,
        }
    }
}

impl From<walkdir::Error> for Error {
    fn from(error: walkdir::Error) -> Self {
        Self::DirectoryTraversal {
            message: "Directory traversal failed".to_string(),
            source: error,
        }
    }
}
