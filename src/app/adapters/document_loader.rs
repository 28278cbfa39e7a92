//! JSON document loading and input discovery
//!
//! Documents arrive as JSON files holding the already-extracted block
//! stream of one budget document:
//!
//! ```json
//! {"name": "haushalt-2016", "blocks": [{"heading": "THH01 Bildung"}, {"table": [["Nr.", "..."]]}]}
//! ```
//!
//! Inputs may be files, directories (searched recursively for `*.json`)
//! or glob patterns. They are resolved in argument order.

use crate::app::models::{Block, Document};
use crate::constants::DOCUMENT_EXTENSION;
use crate::{Error, Result};
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};
use walkdir::WalkDir;

/// Load one document file
///
/// A missing or empty `name` falls back to the file stem.
pub fn load_document(path: &Path) -> Result<Document> {
    debug!("Loading document: {}", path.display());

    let content = std::fs::read_to_string(path)
        .map_err(|e| Error::io(format!("Failed to read document '{}'", path.display()), e))?;

    let fallback = path
        .file_stem()
        .map(|stem| stem.to_string_lossy().to_string())
        .unwrap_or_else(|| path.display().to_string());

    parse_document(&content, &fallback)
}

/// Parse document JSON, trimming every cell
pub fn parse_document(json: &str, fallback_name: &str) -> Result<Document> {
    let mut document: Document = serde_json::from_str(json).map_err(|e| {
        Error::document_format(fallback_name, "invalid document JSON", Some(e))
    })?;

    if document.name.trim().is_empty() {
        document.name = fallback_name.to_string();
    }

    for block in &mut document.blocks {
        if let Block::Table(grid) = block {
            for cell in grid.iter_mut().flatten() {
                let trimmed = cell.trim();
                if trimmed.len() != cell.len() {
                    *cell = trimmed.to_string();
                }
            }
        }
    }

    debug!(
        "Document '{}' has {} blocks",
        document.name,
        document.blocks.len()
    );
    Ok(document)
}

/// Resolve input arguments into document paths
///
/// Directory contents are sorted by file name; glob matches are sorted by
/// path. A path reached twice is only returned once.
pub fn discover_documents(inputs: &[String]) -> Result<Vec<PathBuf>> {
    let mut seen = HashSet::new();
    let mut documents = Vec::new();

    for input in inputs {
        let found = resolve_input(input)?;
        if found.is_empty() {
            warn!("No documents found for input '{}'", input);
        }

        for path in found {
            if seen.insert(path.clone()) {
                documents.push(path);
            } else {
                debug!("Skipping duplicate input {}", path.display());
            }
        }
    }

    info!("Discovered {} documents", documents.len());
    Ok(documents)
}

fn resolve_input(input: &str) -> Result<Vec<PathBuf>> {
    let path = Path::new(input);

    if path.is_dir() {
        return scan_directory(path);
    }
    if path.is_file() {
        return Ok(vec![path.to_path_buf()]);
    }
    if input.contains(['*', '?', '[']) {
        return expand_pattern(input);
    }

    Err(Error::io(
        format!("Input does not exist: {}", input),
        std::io::Error::new(std::io::ErrorKind::NotFound, "No such file or directory"),
    ))
}

fn scan_directory(dir: &Path) -> Result<Vec<PathBuf>> {
    let mut documents = Vec::new();

    for entry in WalkDir::new(dir).follow_links(true).sort_by_file_name() {
        let entry = entry.map_err(|e| {
            Error::directory_traversal(format!("Failed to scan '{}'", dir.display()), e)
        })?;
        if entry.file_type().is_file() && has_document_extension(entry.path()) {
            documents.push(entry.into_path());
        }
    }

    debug!("Found {} documents in {}", documents.len(), dir.display());
    Ok(documents)
}

fn expand_pattern(pattern: &str) -> Result<Vec<PathBuf>> {
    let mut documents = Vec::new();

    for entry in glob::glob(pattern).map_err(|e| Error::input_pattern(pattern, e))? {
        match entry {
            Ok(path) if path.is_file() => documents.push(path),
            Ok(_) => {}
            Err(e) => warn!("Skipping unreadable match of '{}': {}", pattern, e),
        }
    }

    documents.sort();
    Ok(documents)
}

fn has_document_extension(path: &Path) -> bool {
    path.extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case(DOCUMENT_EXTENSION))
}
