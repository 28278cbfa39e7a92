//! Per-document processing statistics

use crate::app::services::table_parser::ParseStats;
use serde::{Deserialize, Serialize};

/// Statistics for one processed document
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DocumentStats {
    /// Blocks read from the document
    pub blocks: usize,

    /// Heading blocks seen
    pub headings_seen: usize,

    /// Headings that changed the scope
    pub headings_applied: usize,

    /// Table blocks without any rows
    pub empty_grids: usize,

    /// Row level counters of all tables
    pub parse: ParseStats,
}

impl DocumentStats {
    pub fn new() -> Self {
        Self::default()
    }

    /// Table blocks seen, parsed or appended
    pub fn table_blocks(&self) -> usize {
        self.parse.tables_parsed + self.parse.continuation_tables + self.empty_grids
    }

    /// Add the counters of another document
    pub fn merge(&mut self, other: &DocumentStats) {
        self.blocks += other.blocks;
        self.headings_seen += other.headings_seen;
        self.headings_applied += other.headings_applied;
        self.empty_grids += other.empty_grids;
        self.parse.merge(&other.parse);
    }
}
