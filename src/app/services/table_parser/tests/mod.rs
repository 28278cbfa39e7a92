//! Test utilities and grid fixtures for budget table parser testing
//!
//! This module provides header rows and helpers for building cell grids
//! used across the parser test modules.

mod parser_tests;

/// Ergebnishaushalt header with Kontogruppe column (title moves to cell 3)
pub const ERGEBNIS_HEADER_KTO: [&str; 7] = [
    "Nr.",
    "Kto.\nGr.",
    "",
    "Ergebnishaushalt",
    "Ergebnis 2014 EUR",
    "Ansatz 2015 EUR",
    "Ansatz 2016 EUR",
];

/// Gesamtergebnishaushalt header without Kontogruppe column
pub const ERGEBNIS_HEADER: [&str; 6] = [
    "Nr.",
    "",
    "Gesamtergebnishaushalt",
    "Ergebnis 2014 EUR",
    "Ansatz 2015 EUR",
    "Ansatz 2016 EUR",
];

pub const FINANZ_HEADER: [&str; 5] = [
    "Nr.",
    "",
    "Finanzhaushalt",
    "Ansatz 2016 EUR",
    "Plan 2017 EUR",
];

pub const INVEST_HEADER: [&str; 5] = [
    "Nr.",
    "",
    "Investitionsübersicht",
    "Ansatz 2016 EUR",
    "Plan 2017 EUR",
];

/// Convert string slices into an owned row
pub fn row(cells: &[&str]) -> Vec<String> {
    cells.iter().map(|cell| cell.to_string()).collect()
}

/// Build a grid: header row, blank secondary header row, data rows
pub fn grid(header: &[&str], rows: Vec<Vec<&str>>) -> Vec<Vec<String>> {
    let mut grid = vec![row(header), vec![String::new(); header.len()]];
    grid.extend(rows.iter().map(|cells| row(cells)));
    grid
}

/// Build a header-less continuation grid
pub fn body(rows: Vec<Vec<&str>>) -> Vec<Vec<String>> {
    rows.iter().map(|cells| row(cells)).collect()
}

/// Marker row: one merged cell spread over `width` cells
pub fn marker(text: &str, width: usize) -> Vec<&str> {
    vec![text; width]
}
