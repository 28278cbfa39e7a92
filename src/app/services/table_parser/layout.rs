//! Layout configuration table and header dispatcher
//!
//! Each layout is described by the meta columns it starts with and by how
//! its rows are grouped. The dispatcher picks a layout from the keywords in
//! the header row; a header it cannot classify belongs to a continuation
//! table.

use crate::app::models::{Layout, MetaField};
use crate::constants::{KONTOGRUPPE_HEADER, keywords};
use tracing::debug;

/// When a configured meta column is present in a table
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Presence {
    /// The column is always there
    Always,
    /// The column is there only if its header cell carries this label;
    /// otherwise the following columns shift left by one
    HeaderEquals(&'static str),
}

/// One entry of a layout's meta column configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MetaColumnSpec {
    pub field: MetaField,
    pub presence: Presence,
}

/// How data rows are grouped
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Grouping {
    /// Rows form Positions with children
    Positions,
    /// Marker rows open Projects; other rows form Positions within them
    Projects,
}

/// Parsing configuration of one table layout
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LayoutSpec {
    pub layout: Layout,
    pub meta_columns: &'static [MetaColumnSpec],
    pub grouping: Grouping,
}

const fn always(field: MetaField) -> MetaColumnSpec {
    MetaColumnSpec {
        field,
        presence: Presence::Always,
    }
}

const ERGEBNISHAUSHALT_COLUMNS: &[MetaColumnSpec] = &[
    always(MetaField::Number),
    MetaColumnSpec {
        field: MetaField::Kontogruppe,
        presence: Presence::HeaderEquals(KONTOGRUPPE_HEADER),
    },
    always(MetaField::Sign),
    always(MetaField::Title),
];

const STANDARD_COLUMNS: &[MetaColumnSpec] = &[
    always(MetaField::Number),
    always(MetaField::Sign),
    always(MetaField::Title),
];

static ERGEBNISHAUSHALT: LayoutSpec = LayoutSpec {
    layout: Layout::Ergebnishaushalt,
    meta_columns: ERGEBNISHAUSHALT_COLUMNS,
    grouping: Grouping::Positions,
};

static FINANZHAUSHALT: LayoutSpec = LayoutSpec {
    layout: Layout::Finanzhaushalt,
    meta_columns: STANDARD_COLUMNS,
    grouping: Grouping::Positions,
};

static INVESTITIONSUEBERSICHT: LayoutSpec = LayoutSpec {
    layout: Layout::Investitionsuebersicht,
    meta_columns: STANDARD_COLUMNS,
    grouping: Grouping::Projects,
};

impl LayoutSpec {
    /// Configuration for a layout
    pub fn for_layout(layout: Layout) -> &'static LayoutSpec {
        match layout {
            Layout::Ergebnishaushalt => &ERGEBNISHAUSHALT,
            Layout::Finanzhaushalt => &FINANZHAUSHALT,
            Layout::Investitionsuebersicht => &INVESTITIONSUEBERSICHT,
        }
    }

    /// Check if records of this layout can carry the given field
    pub fn supports_field(&self, field: MetaField) -> bool {
        self.meta_columns.iter().any(|spec| spec.field == field)
    }
}

/// Keyword rule of the dispatcher: layout, keyword, header cells searched
struct KeywordRule {
    layout: Layout,
    keyword: &'static str,
    cells: &'static [usize],
}

// Priority order. The Ergebnishaushalt title moves from cell 2 to cell 3
// when the Kontogruppe column is present.
const KEYWORD_RULES: &[KeywordRule] = &[
    KeywordRule {
        layout: Layout::Finanzhaushalt,
        keyword: keywords::FINANZHAUSHALT,
        cells: &[2],
    },
    KeywordRule {
        layout: Layout::Investitionsuebersicht,
        keyword: keywords::INVESTITIONSUEBERSICHT,
        cells: &[2],
    },
    KeywordRule {
        layout: Layout::Ergebnishaushalt,
        keyword: keywords::ERGEBNISHAUSHALT,
        cells: &[2, 3],
    },
];

/// Classify a table by its first header row
///
/// Returns `None` for headers without a layout keyword, which callers treat
/// as a continuation of the previous table.
pub fn classify(header: &[String]) -> Option<Layout> {
    let layout = KEYWORD_RULES
        .iter()
        .find(|rule| {
            rule.cells.iter().any(|&index| {
                header
                    .get(index)
                    .is_some_and(|cell| cell.to_lowercase().contains(rule.keyword))
            })
        })
        .map(|rule| rule.layout);

    debug!("Classified header {:?} as {:?}", header.get(2..4), layout);
    layout
}
