//! Parsing statistics for budget tables
//!
//! This module provides the counters the parser keeps while walking rows,
//! including the rows a tolerant run dropped and why.

/// Parsing statistics, accumulated over any number of tables
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ParseStats {
    /// Tables parsed from a classified header
    pub tables_parsed: usize,

    /// Header-less tables appended to a previous table
    pub continuation_tables: usize,

    /// Total number of body rows encountered
    pub total_rows: usize,

    /// Rows that became a Position or child record
    pub records_parsed: usize,

    /// Project marker rows
    pub projects_opened: usize,

    /// Rows dropped under the tolerant row policy
    pub rows_dropped: usize,

    /// Positions whose values differ from the sum of their children
    pub sum_mismatches: usize,

    /// Messages for dropped rows, for reporting
    pub warnings: Vec<String>,
}

impl ParseStats {
    /// Create new empty statistics
    pub fn new() -> Self {
        Self {
            tables_parsed: 0,
            continuation_tables: 0,
            total_rows: 0,
            records_parsed: 0,
            projects_opened: 0,
            rows_dropped: 0,
            sum_mismatches: 0,
            warnings: Vec::new(),
        }
    }

    /// Record a dropped row
    pub fn add_dropped(&mut self, message: String) {
        self.rows_dropped += 1;
        self.warnings.push(message);
    }

    /// Add the counters of another run
    pub fn merge(&mut self, other: &ParseStats) {
        self.tables_parsed += other.tables_parsed;
        self.continuation_tables += other.continuation_tables;
        self.total_rows += other.total_rows;
        self.records_parsed += other.records_parsed;
        self.projects_opened += other.projects_opened;
        self.rows_dropped += other.rows_dropped;
        self.sum_mismatches += other.sum_mismatches;
        self.warnings.extend(other.warnings.iter().cloned());
    }

    /// Share of body rows that became records or markers, as a percentage
    pub fn success_rate(&self) -> f64 {
        if self.total_rows == 0 {
            100.0
        } else {
            ((self.records_parsed + self.projects_opened) as f64 / self.total_rows as f64) * 100.0
        }
    }
}

impl Default for ParseStats {
    fn default() -> Self {
        Self::new()
    }
}
