//! Flattening of parsed tables into export rows
//!
//! Every (record, value) pair becomes one row. Summary Positions are
//! skipped unless requested; without summaries a Position with children is
//! replaced by its children, which inherit blank fields from it.

use crate::app::models::{ParsedTable, Position, Project, Record};
use rust_decimal::Decimal;
use tracing::debug;

use super::export_stream::ExportField;

/// What to emit when flattening a table
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportPolicy {
    /// Emit summary Positions, and Positions alongside their children
    pub include_summaries: bool,

    /// Fields written after the leading scope fields, in order
    pub fields: Vec<ExportField>,
}

/// A single output cell
///
/// Writers quote text cells and leave numeric cells bare, so identifiers
/// such as `0201` keep their leading zeros for readers that convert
/// unquoted fields to numbers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Cell {
    Text(String),
    Numeric(String),
}

impl Cell {
    pub fn text(value: impl Into<String>) -> Self {
        Cell::Text(value.into())
    }

    pub fn numeric(value: impl ToString) -> Self {
        Cell::Numeric(value.to_string())
    }

    pub fn as_str(&self) -> &str {
        match self {
            Cell::Text(value) | Cell::Numeric(value) => value,
        }
    }
}

/// One output row
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FlatRow {
    /// Scope identifiers, always text
    pub leading: Vec<Option<String>>,
    pub fields: Vec<Option<Cell>>,
    pub year: i32,
    pub value_type: String,
    pub amount: Decimal,
}

impl FlatRow {
    /// Cells for writing; absent values become empty text cells
    pub fn to_cells(&self) -> Vec<Cell> {
        let leading = self
            .leading
            .iter()
            .map(|value| Cell::text(value.clone().unwrap_or_default()));
        let fields = self
            .fields
            .iter()
            .map(|value| value.clone().unwrap_or_else(|| Cell::text("")));

        leading
            .chain(fields)
            .chain([
                Cell::numeric(self.year),
                Cell::text(self.value_type.clone()),
                Cell::numeric(self.amount),
            ])
            .collect()
    }
}

/// Flatten one parsed table, prefixing every row with `leading`
pub fn flatten_table(
    table: &ParsedTable,
    policy: &ExportPolicy,
    leading: &[Option<String>],
) -> Vec<FlatRow> {
    let mut rows = Vec::new();

    for (project, position) in table.positions() {
        if position.record.is_summary() && !policy.include_summaries {
            debug!("Skipping summary position '{}'", position.record.title);
            continue;
        }

        if position.children.is_empty() || policy.include_summaries {
            let fields = resolve_fields(&policy.fields, &position.record, project);
            emit(&mut rows, leading, fields, &position.record);
        }

        for child in &position.children {
            let fields = if policy.include_summaries {
                resolve_fields(&policy.fields, child, project)
            } else {
                inherit_fields(&policy.fields, child, position, project)
            };
            emit(&mut rows, leading, fields, child);
        }
    }

    rows
}

fn emit(
    rows: &mut Vec<FlatRow>,
    leading: &[Option<String>],
    fields: Vec<Option<Cell>>,
    record: &Record,
) {
    rows.extend(record.values.iter().map(|value| FlatRow {
        leading: leading.to_vec(),
        fields: fields.clone(),
        year: value.year,
        value_type: value.value_type.clone(),
        amount: value.amount,
    }));
}

fn resolve_fields(
    fields: &[ExportField],
    record: &Record,
    project: Option<&Project>,
) -> Vec<Option<Cell>> {
    fields
        .iter()
        .map(|&field| field_value(field, record, project))
        .collect()
}

// Blank child fields take the parent's value; a child's own title is
// qualified with the parent's.
fn inherit_fields(
    fields: &[ExportField],
    child: &Record,
    parent: &Position,
    project: Option<&Project>,
) -> Vec<Option<Cell>> {
    fields
        .iter()
        .map(|&field| match field_value(field, child, project) {
            None => field_value(field, &parent.record, project),
            Some(title) if field == ExportField::Title => Some(Cell::text(format!(
                "{}: {}",
                parent.record.title,
                title.as_str()
            ))),
            value => value,
        })
        .collect()
}

// Only the running number is numeric; Kontogruppe codes are written as text.
fn field_value(field: ExportField, record: &Record, project: Option<&Project>) -> Option<Cell> {
    let value = match field {
        ExportField::Number => record.number.map(Cell::numeric),
        ExportField::Kontogruppe => record.kontogruppe.map(|code| Cell::text(code.to_string())),
        ExportField::Sign => record.sign.clone().map(Cell::text),
        ExportField::Title => Some(Cell::text(record.title.clone())),
        ExportField::ProjectId => project.map(|project| Cell::text(project.id.clone())),
        ExportField::ProjectTitle => project.map(|project| Cell::text(project.title.clone())),
    };
    value.filter(|cell| !cell.as_str().trim().is_empty())
}
