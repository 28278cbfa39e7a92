//! Tests for document traversal


use crate::app::models::Block;

pub fn heading(text: &str) -> Block {
    Block::Heading(text.to_string())
}

/// Table block from a header row and data rows (a blank secondary header
/// row is inserted)
pub fn table(header: &[&str], rows: Vec<Vec<&str>>) -> Block {
    let mut grid = vec![cells(header), vec![String::new(); header.len()]];
    grid.extend(rows.iter().map(|row| cells(row)));
    Block::Table(grid)
}

/// Header-less continuation block
pub fn continuation(rows: Vec<Vec<&str>>) -> Block {
    Block::Table(rows.iter().map(|row| cells(row)).collect())
}

fn cells(row: &[&str]) -> Vec<String> {
    row.iter().map(|cell| cell.to_string()).collect()
}

pub const FINANZ_HEADER: [&str; 4] = ["Nr.", "", "Teilfinanzhaushalt", "Ansatz 2016 EUR"];

pub const INVEST_HEADER: [&str; 4] = ["Nr.", "", "Investitionsübersicht", "Ansatz 2016 EUR"];

pub const ERGEBNIS_HEADER: [&str; 4] = ["Nr.", "", "Gesamtergebnishaushalt", "Ansatz 2016 EUR"];
