//! Header classification for budget tables
//!
//! This module locates the meta columns of a header row according to the
//! layout configuration and decodes the value columns ("Ansatz 2016 EUR")
//! into value type and year.

use super::field_parsers::{normalize_whitespace, parse_int, split_whitespace};
use super::layout::{LayoutSpec, Presence};
use crate::app::models::{HeaderDescriptor, MetaColumn, ValueColumn};
use crate::constants::CURRENCY_MARKER;
use tracing::debug;

/// Build the header descriptor of a table from its first header row
pub fn describe_header(spec: &LayoutSpec, header: &[String]) -> HeaderDescriptor {
    let meta_columns = locate_meta_columns(spec, header);
    let value_columns = header
        .iter()
        .enumerate()
        .skip(meta_columns.len())
        .filter_map(|(index, cell)| {
            decode_value_header(cell).map(|(value_type, year)| ValueColumn {
                index,
                value_type,
                year,
            })
        })
        .collect::<Vec<_>>();

    debug!(
        "{} header: {} meta columns, {} value columns",
        spec.layout,
        meta_columns.len(),
        value_columns.len()
    );

    HeaderDescriptor {
        meta_columns,
        value_columns,
        column_count: header.len(),
    }
}

/// Assign meta fields to the leading columns
///
/// Optional columns whose header label is missing are skipped without
/// consuming a column.
pub fn locate_meta_columns(spec: &LayoutSpec, header: &[String]) -> Vec<MetaColumn> {
    let mut columns = Vec::with_capacity(spec.meta_columns.len());
    let mut index = 0;

    for column_spec in spec.meta_columns {
        if let Presence::HeaderEquals(label) = column_spec.presence {
            let matches = header
                .get(index)
                .is_some_and(|cell| normalize_whitespace(cell) == normalize_whitespace(label));
            if !matches {
                debug!("Optional {:?} column absent", column_spec.field);
                continue;
            }
        }

        columns.push(MetaColumn {
            index,
            field: column_spec.field,
        });
        index += 1;
    }

    columns
}

/// Decode a value column header into (value type, year)
///
/// Cells that are not "<type> <year> EUR" are decorative and yield `None`.
pub fn decode_value_header(cell: &str) -> Option<(String, i32)> {
    let parts = split_whitespace(cell, None);
    if parts.len() != 3 || parts[2] != CURRENCY_MARKER {
        return None;
    }

    match parse_int::<i32>(parts[1]) {
        Ok(Some(year)) => Some((normalize_whitespace(parts[0]), year)),
        _ => {
            debug!("Skipping header cell '{}': not a year", cell);
            None
        }
    }
}
