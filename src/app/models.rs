//! Data models for budget table processing
//!
//! This module contains the core data structures for representing parsed
//! budget tables: the layouts, header descriptors, records with their
//! per-year values, the Position/child hierarchy and investment Projects.

use crate::constants::{self, HEADER_ROWS};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

// =============================================================================
// Layouts and Header Description
// =============================================================================

/// Table layouts found in the budget documents
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Layout {
    /// Income/expense statement, optionally with a Kontogruppe column
    Ergebnishaushalt,
    /// Cash-flow statement
    Finanzhaushalt,
    /// Investment overview, grouped by Project
    Investitionsuebersicht,
}

impl Layout {
    /// Human-readable layout name as used in the documents
    pub fn name(self) -> &'static str {
        match self {
            Layout::Ergebnishaushalt => "Ergebnishaushalt",
            Layout::Finanzhaushalt => "Finanzhaushalt",
            Layout::Investitionsuebersicht => "Investitionsübersicht",
        }
    }
}

impl fmt::Display for Layout {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Non-value ("meta") fields a table column can hold
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MetaField {
    Number,
    Kontogruppe,
    Sign,
    Title,
}

/// A meta column located in the header
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MetaColumn {
    pub index: usize,
    pub field: MetaField,
}

/// A value column decoded from a header cell like "Ansatz 2016 EUR"
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValueColumn {
    pub index: usize,
    pub value_type: String,
    pub year: i32,
}

/// Column layout of one table instance
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct HeaderDescriptor {
    /// Meta columns in column order
    pub meta_columns: Vec<MetaColumn>,

    /// Value columns in column order
    pub value_columns: Vec<ValueColumn>,

    /// Number of cells in the header row; every row must match it
    pub column_count: usize,
}

impl HeaderDescriptor {
    /// Column index of a meta field, if the table has it
    pub fn index_of(&self, field: MetaField) -> Option<usize> {
        self.meta_columns
            .iter()
            .find(|column| column.field == field)
            .map(|column| column.index)
    }
}

// =============================================================================
// Records
// =============================================================================

/// One monetary amount of a record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Value {
    pub value_type: String,
    pub year: i32,
    pub amount: Decimal,
}

/// A data row of a budget table
///
/// Every layout produces the same field set; fields a layout has no column
/// for are `None`.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Record {
    /// Running number, present on Positions only
    pub number: Option<i64>,

    /// Account group code (Ergebnishaushalt with Kontogruppe column only)
    pub kontogruppe: Option<i64>,

    /// Sign marker, present and non-empty on Positions only
    pub sign: Option<String>,

    /// Whitespace-normalised title
    pub title: String,

    /// One value per value column, in header order
    pub values: Vec<Value>,
}

impl Record {
    /// Check if this record restates an aggregate ("=" sign)
    pub fn is_summary(&self) -> bool {
        self.sign.as_deref().is_some_and(constants::is_summary_sign)
    }
}

/// A top-level line item with its sub-items
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Position {
    pub record: Record,
    pub children: Vec<Record>,
}

impl Position {
    pub fn new(record: Record) -> Self {
        Self {
            record,
            children: Vec::new(),
        }
    }

    /// Check that the Position's values equal the sums over its children
    ///
    /// Positions without children always balance.
    pub fn children_balance(&self) -> bool {
        if self.children.is_empty() {
            return true;
        }

        self.record
            .values
            .iter()
            .enumerate()
            .all(|(index, value)| {
                let sum: Decimal = self
                    .children
                    .iter()
                    .filter_map(|child| child.values.get(index))
                    .map(|child_value| child_value.amount)
                    .sum();
                sum == value.amount
            })
    }
}

/// A run of Positions belonging to one investment project
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Project {
    pub id: String,
    pub title: String,
    pub positions: Vec<Position>,
}

impl Project {
    pub fn new(id: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            positions: Vec::new(),
        }
    }
}

// =============================================================================
// Tables
// =============================================================================

/// Organisational scope a table was found in
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct TableScope {
    pub teilhaushalt: Option<String>,
    pub produktbereich: Option<String>,
    pub produktgruppe: Option<String>,
}

impl TableScope {
    /// Tables without Teilhaushalt belong to the overall ("Gesamt") budget
    pub fn has_teilhaushalt(&self) -> bool {
        self.teilhaushalt.is_some()
    }
}

/// Parsed rows of a table, grouped as its layout requires
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TableBody {
    Positions(Vec<Position>),
    Projects(Vec<Project>),
}

/// A fully parsed budget table
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParsedTable {
    pub layout: Layout,
    pub header: HeaderDescriptor,
    pub scope: TableScope,
    pub body: TableBody,
}

impl ParsedTable {
    /// All Positions of the table in row order, with their Project if any
    pub fn positions(&self) -> Vec<(Option<&Project>, &Position)> {
        match &self.body {
            TableBody::Positions(positions) => {
                positions.iter().map(|position| (None, position)).collect()
            }
            TableBody::Projects(projects) => projects
                .iter()
                .flat_map(|project| {
                    project
                        .positions
                        .iter()
                        .map(move |position| (Some(project), position))
                })
                .collect(),
        }
    }

    /// Number of Positions over all Projects
    pub fn position_count(&self) -> usize {
        match &self.body {
            TableBody::Positions(positions) => positions.len(),
            TableBody::Projects(projects) => {
                projects.iter().map(|project| project.positions.len()).sum()
            }
        }
    }

    /// Projects of an Investitionsübersicht (empty for other layouts)
    pub fn projects(&self) -> &[Project] {
        match &self.body {
            TableBody::Projects(projects) => projects,
            TableBody::Positions(_) => &[],
        }
    }
}

// =============================================================================
// Documents
// =============================================================================

/// A block of a document, in document order
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Block {
    /// Heading text found between tables
    Heading(String),
    /// Cell grid of one table, row-major
    Table(Vec<Vec<String>>),
}

/// An input document as a sequence of blocks
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Document {
    #[serde(default)]
    pub name: String,
    pub blocks: Vec<Block>,
}

/// Data rows of a grid (everything after the two header rows)
pub fn data_rows(grid: &[Vec<String>]) -> &[Vec<String>] {
    grid.get(HEADER_ROWS..).unwrap_or(&[])
}
