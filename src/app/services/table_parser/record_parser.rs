//! Individual row parsing for budget tables
//!
//! This module extracts the meta fields and values of a single data row and
//! recognises the merged-cell marker rows that open investment projects.

use super::field_parsers::{normalize_whitespace, parse_amount, parse_int};
use crate::app::models::{HeaderDescriptor, MetaField, Record, Value};
use crate::constants::PROJECT_MARKER_SEPARATOR;
use crate::{Result, StructuralViolation};

/// Raw fields of a data row, before it is placed in the hierarchy
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RowFields {
    pub number: Option<i64>,
    pub kontogruppe: Option<i64>,
    pub sign: String,
    pub title: String,
    pub values: Vec<Value>,
}

impl RowFields {
    /// Turn the row into a Position record (sign kept)
    pub fn into_position_record(self) -> Record {
        Record {
            number: self.number,
            kontogruppe: self.kontogruppe,
            sign: Some(self.sign),
            title: self.title,
            values: self.values,
        }
    }

    /// Turn the row into a child record (no number, sign or Kontogruppe)
    pub fn into_child_record(self) -> Record {
        Record {
            number: None,
            kontogruppe: None,
            sign: None,
            title: self.title,
            values: self.values,
        }
    }
}

/// Parse a single data row according to the header descriptor
pub fn parse_row(header: &HeaderDescriptor, row: &[String]) -> Result<RowFields> {
    let mut fields = RowFields::default();

    for column in &header.meta_columns {
        let cell = cell(row, column.index);
        match column.field {
            MetaField::Number => fields.number = parse_int(cell)?,
            MetaField::Kontogruppe => fields.kontogruppe = parse_int(cell)?,
            MetaField::Sign => fields.sign = cell.trim().to_string(),
            MetaField::Title => fields.title = normalize_whitespace(cell),
        }
    }

    fields.values = header
        .value_columns
        .iter()
        .map(|column| {
            Ok(Value {
                value_type: column.value_type.clone(),
                year: column.year,
                amount: parse_amount(cell(row, column.index))?,
            })
        })
        .collect::<Result<Vec<_>>>()?;

    Ok(fields)
}

/// Check whether any value column of the row holds text
pub fn has_populated_values(header: &HeaderDescriptor, row: &[String]) -> bool {
    header
        .value_columns
        .iter()
        .any(|column| !cell(row, column.index).trim().is_empty())
}

/// A marker row is one merged cell: every cell holds the same non-empty text
pub fn is_project_marker(row: &[String]) -> bool {
    match row.split_first() {
        Some((first, rest)) => !first.trim().is_empty() && rest.iter().all(|cell| cell == first),
        None => false,
    }
}

/// Split marker text "<id>: <title>" at the first colon
pub fn parse_project_marker(
    text: &str,
) -> std::result::Result<(String, String), StructuralViolation> {
    text.split_once(PROJECT_MARKER_SEPARATOR)
        .map(|(id, title)| (id.trim().to_string(), title.trim().to_string()))
        .ok_or_else(|| StructuralViolation::MalformedProjectMarker {
            text: text.to_string(),
        })
}

fn cell(row: &[String], index: usize) -> &str {
    row.get(index).map(String::as_str).unwrap_or("")
}
