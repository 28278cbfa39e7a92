//! Document traversal
//!
//! Walks the blocks of one document in order. Headings update the scope;
//! tables are classified, parsed and tagged with the scope current at that
//! point, or appended to the previous table when their header carries no
//! layout keyword.

use super::stats::DocumentStats;
use crate::app::models::{Block, ParsedTable};
use crate::app::services::heading_state::{HeadingState, HeadingTransition, TeilhaushaltRegistry};
use crate::app::services::table_parser::{TableParser, classify};
use crate::config::RowPolicy;
use crate::{Error, Result};
use tracing::{debug, info, warn};

/// Tables parsed from one document, in discovery order
#[derive(Debug, Clone, PartialEq)]
pub struct DocumentResult {
    pub tables: Vec<ParsedTable>,
    pub stats: DocumentStats,
}

/// Processes documents one after another, sharing the heading registry
#[derive(Debug)]
pub struct DocumentProcessor {
    headings: HeadingState,
    parser: TableParser,
}

impl DocumentProcessor {
    /// Create a processor around an existing registry
    pub fn new(registry: TeilhaushaltRegistry, policy: RowPolicy) -> Self {
        Self {
            headings: HeadingState::new(registry),
            parser: TableParser::new(policy),
        }
    }

    /// Process the blocks of one document
    ///
    /// The heading scope is reset first; the registry keeps accumulating.
    /// Any table error aborts the document and is wrapped with the table's
    /// 1-based position among the document's table blocks.
    pub fn process_document<I>(&mut self, blocks: I) -> Result<DocumentResult>
    where
        I: IntoIterator<Item = Block>,
    {
        self.headings.reset();

        let mut tables: Vec<ParsedTable> = Vec::new();
        let mut stats = DocumentStats::new();
        let mut table_number = 0;

        for block in blocks {
            stats.blocks += 1;
            match block {
                Block::Heading(text) => {
                    stats.headings_seen += 1;
                    if let HeadingTransition::Entered { level, id, .. } =
                        self.headings.register_heading(&text)
                    {
                        debug!("Scope {:?} -> {}", level, id);
                        stats.headings_applied += 1;
                    }
                }
                Block::Table(grid) => {
                    table_number += 1;
                    self.process_table(&grid, &mut tables, &mut stats)
                        .map_err(|e| Error::table(table_number, e))?;
                }
            }
        }

        info!(
            "Document processed: {} tables from {} table blocks, {} rows dropped",
            tables.len(),
            stats.table_blocks(),
            stats.parse.rows_dropped
        );

        Ok(DocumentResult { tables, stats })
    }

    fn process_table(
        &self,
        grid: &[Vec<String>],
        tables: &mut Vec<ParsedTable>,
        stats: &mut DocumentStats,
    ) -> Result<()> {
        let Some(header) = grid.first() else {
            warn!("Skipping table without rows");
            stats.empty_grids += 1;
            return Ok(());
        };

        match classify(header) {
            Some(layout) => {
                let table = self
                    .parser
                    .parse(layout, grid, self.headings.scope(), &mut stats.parse)?;
                tables.push(table);
            }
            None => {
                let previous = tables.last_mut().ok_or_else(|| {
                    Error::orphan_continuation("no previous table in this document")
                })?;
                debug!("Appending continuation table to {}", previous.layout);
                self.parser.append(previous, grid, &mut stats.parse)?;
            }
        }

        Ok(())
    }

    pub fn registry(&self) -> &TeilhaushaltRegistry {
        self.headings.registry()
    }

    /// Finish the run and hand back the accumulated registry
    pub fn into_registry(self) -> TeilhaushaltRegistry {
        self.headings.into_registry()
    }
}
