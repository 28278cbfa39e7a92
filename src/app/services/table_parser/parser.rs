//! Core table parser implementation
//!
//! This module walks the data rows of a grid and builds the Position/child
//! hierarchy, and for investment overviews the Projects around it. It also
//! appends header-less continuation grids to an existing table.

use tracing::{debug, warn};

use super::header::describe_header;
use super::layout::{Grouping, LayoutSpec};
use super::record_parser::{
    RowFields, has_populated_values, is_project_marker, parse_project_marker, parse_row,
};
use super::stats::ParseStats;
use crate::app::models::{
    HeaderDescriptor, Layout, ParsedTable, Position, Project, TableBody, TableScope, data_rows,
};
use crate::config::RowPolicy;
use crate::constants::HEADER_ROWS;
use crate::{Error, Result, StructuralViolation};

/// Budget table parser
///
/// One parser serves all layouts; the layout configuration decides which
/// meta columns are read and how rows are grouped. The row policy decides
/// whether rows breaking the hierarchy abort the table or are dropped.
#[derive(Debug, Clone, Copy)]
pub struct TableParser {
    policy: RowPolicy,
}

/// Tracks whether child rows currently have a Position to attach to
#[derive(Debug, Default)]
struct PositionCursor {
    open: bool,
}

impl PositionCursor {
    fn accept(
        &mut self,
        positions: &mut Vec<Position>,
        fields: RowFields,
    ) -> std::result::Result<(), StructuralViolation> {
        // A running number of 0 still opens a Position; only a missing number marks a child
        let Some(number) = fields.number else {
            let position = match positions.last_mut() {
                Some(position) if self.open => position,
                _ => return Err(StructuralViolation::ChildBeforePosition),
            };
            if !fields.sign.is_empty() {
                return Err(StructuralViolation::ChildWithSign { sign: fields.sign });
            }
            if let Some(kontogruppe) = fields.kontogruppe {
                return Err(StructuralViolation::ChildWithKontogruppe { kontogruppe });
            }
            position.children.push(fields.into_child_record());
            return Ok(());
        };

        if fields.sign.is_empty() {
            self.open = false;
            return Err(StructuralViolation::PositionWithoutSign { number });
        }
        positions.push(Position::new(fields.into_position_record()));
        self.open = true;
        Ok(())
    }

    fn reset(&mut self) {
        self.open = false;
    }
}

impl TableParser {
    /// Create a new parser with the given row policy
    pub fn new(policy: RowPolicy) -> Self {
        Self { policy }
    }

    /// Parse a complete grid (two header rows, then data rows)
    pub fn parse(
        &self,
        layout: Layout,
        grid: &[Vec<String>],
        scope: TableScope,
        stats: &mut ParseStats,
    ) -> Result<ParsedTable> {
        let spec = LayoutSpec::for_layout(layout);
        let header = describe_header(spec, grid.first().map(Vec::as_slice).unwrap_or(&[]));
        let rows = data_rows(grid);

        let body = match spec.grouping {
            Grouping::Positions => {
                TableBody::Positions(self.parse_positions(&header, rows, HEADER_ROWS, stats)?)
            }
            Grouping::Projects => {
                TableBody::Projects(self.parse_projects(&header, rows, HEADER_ROWS, stats)?)
            }
        };

        stats.tables_parsed += 1;
        let table = ParsedTable {
            layout,
            header,
            scope,
            body,
        };

        debug!(
            "Parsed {} with {} positions in scope {:?}",
            table.layout,
            table.position_count(),
            table.scope
        );

        Ok(table)
    }

    /// Append a header-less continuation grid to an investment overview
    ///
    /// Every row of the grid is a body row; the projects found are added
    /// after the table's existing ones.
    pub fn append(
        &self,
        table: &mut ParsedTable,
        grid: &[Vec<String>],
        stats: &mut ParseStats,
    ) -> Result<()> {
        let TableBody::Projects(existing) = &mut table.body else {
            return Err(Error::orphan_continuation(format!(
                "previous table is a {}, which has no continuation tables",
                table.layout
            )));
        };

        let projects = self.parse_projects(&table.header, grid, 0, stats)?;
        debug!(
            "Appending {} projects to {}",
            projects.len(),
            table.layout
        );
        existing.extend(projects);
        stats.continuation_tables += 1;

        Ok(())
    }

    fn parse_positions(
        &self,
        header: &HeaderDescriptor,
        rows: &[Vec<String>],
        first_row: usize,
        stats: &mut ParseStats,
    ) -> Result<Vec<Position>> {
        let mut positions = Vec::new();
        let mut cursor = PositionCursor::default();

        for (offset, row) in rows.iter().enumerate() {
            let row_index = first_row + offset;
            stats.total_rows += 1;

            if let Some(fields) = self.prepare_row(header, row, row_index, &mut cursor, stats)? {
                self.place(&mut cursor, &mut positions, fields, row_index, stats)?;
            }
        }

        check_sums(&positions, stats);
        Ok(positions)
    }

    fn parse_projects(
        &self,
        header: &HeaderDescriptor,
        rows: &[Vec<String>],
        first_row: usize,
        stats: &mut ParseStats,
    ) -> Result<Vec<Project>> {
        let mut projects: Vec<Project> = Vec::new();
        let mut cursor = PositionCursor::default();

        for (offset, row) in rows.iter().enumerate() {
            let row_index = first_row + offset;
            stats.total_rows += 1;

            if is_project_marker(row) {
                let (id, title) = parse_project_marker(&row[0])
                    .map_err(|violation| Error::structural(row_index, violation))?;
                debug!("Row {}: project {} ({})", row_index, id, title);
                projects.push(Project::new(id, title));
                stats.projects_opened += 1;
                cursor.reset();
                continue;
            }

            let Some(fields) = self.prepare_row(header, row, row_index, &mut cursor, stats)? else {
                continue;
            };
            let Some(project) = projects.last_mut() else {
                return Err(Error::structural(
                    row_index,
                    StructuralViolation::RowOutsideProject,
                ));
            };
            self.place(&mut cursor, &mut project.positions, fields, row_index, stats)?;
        }

        for project in &projects {
            check_sums(&project.positions, stats);
        }
        Ok(projects)
    }

    /// Validate the row shape and extract its fields
    ///
    /// Returns `None` for rows the tolerant policy drops.
    fn prepare_row(
        &self,
        header: &HeaderDescriptor,
        row: &[String],
        row_index: usize,
        cursor: &mut PositionCursor,
        stats: &mut ParseStats,
    ) -> Result<Option<RowFields>> {
        if row.len() != header.column_count {
            return Err(Error::structural(
                row_index,
                StructuralViolation::ColumnCountMismatch {
                    expected: header.column_count,
                    found: row.len(),
                },
            ));
        }

        if self.policy == RowPolicy::Tolerant
            && !header.value_columns.is_empty()
            && !has_populated_values(header, row)
        {
            debug!("Row {}: no values, treated as layout artifact", row_index);
            stats.add_dropped(format!("row {}: no values", row_index));
            cursor.reset();
            return Ok(None);
        }

        parse_row(header, row).map(Some)
    }

    fn place(
        &self,
        cursor: &mut PositionCursor,
        positions: &mut Vec<Position>,
        fields: RowFields,
        row_index: usize,
        stats: &mut ParseStats,
    ) -> Result<()> {
        match cursor.accept(positions, fields) {
            Ok(()) => {
                stats.records_parsed += 1;
                Ok(())
            }
            Err(violation) if self.policy == RowPolicy::Tolerant && violation.is_tolerable() => {
                warn!("Dropping row {}: {}", row_index, violation);
                stats.add_dropped(format!("row {}: {}", row_index, violation));
                Ok(())
            }
            Err(violation) => Err(Error::structural(row_index, violation)),
        }
    }
}

fn check_sums(positions: &[Position], stats: &mut ParseStats) {
    for position in positions.iter().filter(|position| !position.children_balance()) {
        warn!(
            "Position {:?} '{}' does not equal the sum of its {} children",
            position.record.number,
            position.record.title,
            position.children.len()
        );
        stats.sum_mismatches += 1;
    }
}
