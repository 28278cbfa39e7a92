//! CSV writing for export streams
//!
//! Each stream is written to its own file: header row first, then one line
//! per flattened row. Text cells are always quoted, even when they look like
//! numbers; only the running number, year and amount are written bare.
//! Absent values become empty quoted fields and amounts use plain decimal
//! notation.

use crate::app::services::flattener::{Cell, ExportStream, FlatRow};
use crate::{Error, Result};
use csv::{QuoteStyle, WriterBuilder};
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Result of writing one stream
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportSummary {
    pub stream: String,
    pub path: PathBuf,
    pub rows: usize,
    pub bytes: u64,
}

/// Writes flattened rows as delimited text
#[derive(Debug, Clone, Copy)]
pub struct CsvExporter {
    delimiter: u8,
}

impl CsvExporter {
    /// Create an exporter; the delimiter must be a single ASCII character
    pub fn new(delimiter: char) -> Result<Self> {
        let delimiter = u8::try_from(delimiter)
            .ok()
            .filter(u8::is_ascii)
            .ok_or_else(|| {
                Error::configuration(format!(
                    "Delimiter '{}' is not a single ASCII character",
                    delimiter
                ))
            })?;
        Ok(Self { delimiter })
    }

    /// Write the header and rows to any writer, returning the row count
    pub fn write_rows<W: Write>(&self, writer: W, header: &[String], rows: &[FlatRow]) -> Result<usize> {
        // Quoting is decided per cell below, so the writer must not add any
        let mut writer = WriterBuilder::new()
            .delimiter(self.delimiter)
            .quote_style(QuoteStyle::Never)
            .from_writer(writer);

        writer
            .write_record(header.iter().map(|label| quote_text(label)))
            .map_err(|e| Error::csv_writing("Failed to write header row", e))?;

        for row in rows {
            writer
                .write_record(row.to_cells().iter().map(render_cell))
                .map_err(|e| Error::csv_writing("Failed to write row", e))?;
        }

        writer
            .flush()
            .map_err(|e| Error::io("Failed to flush CSV output", e))?;
        Ok(rows.len())
    }

    /// Write one stream to `path`, creating parent directories as needed
    pub fn write_stream(&self, path: &Path, stream: &ExportStream, rows: &[FlatRow]) -> Result<ExportSummary> {
        if let Some(parent) = path.parent().filter(|parent| !parent.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(|e| {
                Error::io(
                    format!("Failed to create output directory '{}'", parent.display()),
                    e,
                )
            })?;
        }

        let file = std::fs::File::create(path)
            .map_err(|e| Error::io(format!("Failed to create '{}'", path.display()), e))?;
        let written = self.write_rows(std::io::BufWriter::new(file), &stream.header(), rows)?;

        let bytes = std::fs::metadata(path)
            .map(|metadata| metadata.len())
            .map_err(|e| Error::io(format!("Failed to stat '{}'", path.display()), e))?;

        info!(
            "Wrote {} rows to {} ({} bytes)",
            written,
            path.display(),
            bytes
        );

        Ok(ExportSummary {
            stream: stream.name.clone(),
            path: path.to_path_buf(),
            rows: written,
            bytes,
        })
    }
}

fn render_cell(cell: &Cell) -> String {
    match cell {
        Cell::Numeric(value) => value.clone(),
        Cell::Text(value) => quote_text(value),
    }
}

fn quote_text(value: &str) -> String {
    format!("\"{}\"", value.replace('"', "\"\""))
}

impl Default for CsvExporter {
    fn default() -> Self {
        debug!("Using default CSV delimiter");
        Self { delimiter: b';' }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::services::flattener::default_streams;
    use rust_decimal::Decimal;
    use tempfile::TempDir;

    fn flat_row(leading: Vec<Option<&str>>, title: &str, amount: i64) -> FlatRow {
        FlatRow {
            leading: leading.into_iter().map(|value| value.map(str::to_string)).collect(),
            fields: vec![Some(Cell::text(title))],
            year: 2016,
            value_type: "Ansatz".to_string(),
            amount: Decimal::new(amount, 2),
        }
    }

    #[test]
    fn test_rejects_non_ascii_delimiter() {
        assert!(CsvExporter::new('§').is_err());
        assert!(CsvExporter::new(',').is_ok());
    }

    #[test]
    fn test_write_rows_quotes_text_only() {
        let exporter = CsvExporter::new(';').unwrap();
        let header = vec!["TEILHAUSHALT".to_string(), "TITEL".to_string()];
        let rows = vec![flat_row(vec![None], "Steuern; Abgaben", -123456)];

        let mut buffer = Vec::new();
        let written = exporter.write_rows(&mut buffer, &header, &rows).unwrap();
        let output = String::from_utf8(buffer).unwrap();

        assert_eq!(written, 1);
        assert_eq!(
            output,
            "\"TEILHAUSHALT\";\"TITEL\"\n\"\";\"Steuern; Abgaben\";2016;\"Ansatz\";-1234.56\n"
        );
    }

    #[test]
    fn test_write_stream_to_file() {
        let temp_dir = TempDir::new().unwrap();
        let stream = &default_streams()[3];
        let path = temp_dir.path().join("nested").join(&stream.file_name);
        let rows = vec![
            flat_row(vec![Some("01")], "Einzahlungen", 1000),
            flat_row(vec![Some("01")], "Auszahlungen", -500),
        ];

        let summary = CsvExporter::default().write_stream(&path, stream, &rows).unwrap();

        assert_eq!(summary.rows, 2);
        assert_eq!(summary.stream, "teilfinanzhaushalte");
        let content = std::fs::read_to_string(&path).unwrap();
        assert_eq!(summary.bytes, content.len() as u64);

        let lines: Vec<&str> = content.lines().collect();
        assert_eq!(lines[0], "\"TEILHAUSHALT\";\"TITEL\";\"JAHR\";\"TYP\";\"BETRAG\"");
        assert_eq!(lines[1], "\"01\";\"Einzahlungen\";2016;\"Ansatz\";10.00");
        assert_eq!(lines.len(), 3);
    }

    #[test]
    fn test_number_like_text_stays_quoted() {
        let exporter = CsvExporter::default();
        let header = vec!["TEILHAUSHALT".to_string()];
        let row = FlatRow {
            leading: vec![Some("0201".to_string())],
            fields: vec![
                Some(Cell::numeric(5)),
                Some(Cell::text("2016")),
                Some(Cell::text("Zitat \"A\"")),
            ],
            year: 2016,
            value_type: "Ansatz".to_string(),
            amount: Decimal::new(1000, 2),
        };

        let mut buffer = Vec::new();
        exporter.write_rows(&mut buffer, &header, &[row]).unwrap();
        let output = String::from_utf8(buffer).unwrap();

        assert_eq!(
            output.lines().nth(1),
            Some("\"0201\";5;\"2016\";\"Zitat \"\"A\"\"\";2016;\"Ansatz\";10.00")
        );
    }
}
