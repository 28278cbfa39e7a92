//! Export stream definitions
//!
//! A stream selects parsed tables by layout and Teilhaushalt presence and
//! names the leading scope columns and meta fields it writes for them.

use crate::app::models::{Layout, MetaField, ParsedTable, TableScope};
use crate::app::services::table_parser::LayoutSpec;
use crate::constants::labels;
use serde::{Deserialize, Serialize};

use super::flatten::ExportPolicy;

/// Scope identifier written in front of every row of a table
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScopeField {
    Teilhaushalt,
    Produktbereich,
    Produktgruppe,
}

impl ScopeField {
    pub fn label(self) -> &'static str {
        match self {
            ScopeField::Teilhaushalt => labels::TEILHAUSHALT,
            ScopeField::Produktbereich => labels::PRODUKTBEREICH,
            ScopeField::Produktgruppe => labels::PRODUKTGRUPPE,
        }
    }

    /// Identifier of this level in the given scope
    pub fn value(self, scope: &TableScope) -> Option<&str> {
        match self {
            ScopeField::Teilhaushalt => scope.teilhaushalt.as_deref(),
            ScopeField::Produktbereich => scope.produktbereich.as_deref(),
            ScopeField::Produktgruppe => scope.produktgruppe.as_deref(),
        }
    }
}

/// Record or Project field a stream can export
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExportField {
    Number,
    Kontogruppe,
    Sign,
    Title,
    ProjectId,
    ProjectTitle,
}

impl ExportField {
    pub fn label(self) -> &'static str {
        match self {
            ExportField::Number => labels::NUMBER,
            ExportField::Kontogruppe => labels::KONTOGRUPPE,
            ExportField::Sign => labels::SIGN,
            ExportField::Title => labels::TITLE,
            ExportField::ProjectId => labels::PROJECT_ID,
            ExportField::ProjectTitle => labels::PROJECT_TITLE,
        }
    }

    /// Meta column backing this field, `None` for Project fields
    pub fn meta_field(self) -> Option<MetaField> {
        match self {
            ExportField::Number => Some(MetaField::Number),
            ExportField::Kontogruppe => Some(MetaField::Kontogruppe),
            ExportField::Sign => Some(MetaField::Sign),
            ExportField::Title => Some(MetaField::Title),
            ExportField::ProjectId | ExportField::ProjectTitle => None,
        }
    }
}

/// Which tables of a layout a stream takes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScopeFilter {
    #[default]
    Any,
    /// Tables inside a Teilhaushalt
    WithTeilhaushalt,
    /// Overall ("Gesamt") tables, found before any Teilhaushalt heading
    WithoutTeilhaushalt,
}

impl ScopeFilter {
    pub fn matches(self, scope: &TableScope) -> bool {
        match self {
            ScopeFilter::Any => true,
            ScopeFilter::WithTeilhaushalt => scope.has_teilhaushalt(),
            ScopeFilter::WithoutTeilhaushalt => !scope.has_teilhaushalt(),
        }
    }
}

/// One export output: a table selection plus its column list
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExportStream {
    pub name: String,
    pub file_name: String,
    pub layout: Layout,
    #[serde(default)]
    pub scope_filter: ScopeFilter,
    #[serde(default)]
    pub scope_fields: Vec<ScopeField>,
    pub fields: Vec<ExportField>,
}

impl ExportStream {
    /// Header row: scope labels, field labels, then year, type and amount
    pub fn header(&self) -> Vec<String> {
        self.scope_fields
            .iter()
            .map(|field| field.label())
            .chain(self.fields.iter().map(|field| field.label()))
            .chain([labels::YEAR, labels::VALUE_TYPE, labels::AMOUNT])
            .map(str::to_string)
            .collect()
    }

    /// Check whether a parsed table belongs to this stream
    pub fn accepts(&self, table: &ParsedTable) -> bool {
        table.layout == self.layout && self.scope_filter.matches(&table.scope)
    }

    /// Leading column values for a table's scope
    pub fn leading_fields(&self, scope: &TableScope) -> Vec<Option<String>> {
        self.scope_fields
            .iter()
            .map(|field| field.value(scope).map(str::to_string))
            .collect()
    }

    /// Fields the stream's layout cannot provide
    pub fn unsupported_fields(&self) -> Vec<ExportField> {
        let spec = LayoutSpec::for_layout(self.layout);
        self.fields
            .iter()
            .copied()
            .filter(|field| match field.meta_field() {
                Some(meta) => !spec.supports_field(meta),
                None => self.layout != Layout::Investitionsuebersicht,
            })
            .collect()
    }

    /// Flattening policy for this stream
    pub fn policy(&self, include_summaries: bool) -> ExportPolicy {
        ExportPolicy {
            include_summaries,
            fields: self.fields.clone(),
        }
    }
}

fn stream(
    name: &str,
    file_name: &str,
    layout: Layout,
    scope_filter: ScopeFilter,
    scope_fields: &[ScopeField],
    fields: &[ExportField],
) -> ExportStream {
    ExportStream {
        name: name.to_string(),
        file_name: file_name.to_string(),
        layout,
        scope_filter,
        scope_fields: scope_fields.to_vec(),
        fields: fields.to_vec(),
    }
}

/// The five standard exports: overall and per-Teilhaushalt statements
/// plus the investment overviews
pub fn default_streams() -> Vec<ExportStream> {
    use ExportField::*;
    use ScopeField::*;

    vec![
        stream(
            "gesamtergebnishaushalt",
            "gesamtergebnishaushalt.csv",
            Layout::Ergebnishaushalt,
            ScopeFilter::WithoutTeilhaushalt,
            &[],
            &[Title],
        ),
        stream(
            "teilergebnishaushalte",
            "teilergebnishaushalte.csv",
            Layout::Ergebnishaushalt,
            ScopeFilter::WithTeilhaushalt,
            &[Teilhaushalt, Produktbereich, Produktgruppe],
            &[Kontogruppe, Title],
        ),
        stream(
            "gesamtfinanzhaushalt",
            "gesamtfinanzhaushalt.csv",
            Layout::Finanzhaushalt,
            ScopeFilter::WithoutTeilhaushalt,
            &[],
            &[Title],
        ),
        stream(
            "teilfinanzhaushalte",
            "teilfinanzhaushalte.csv",
            Layout::Finanzhaushalt,
            ScopeFilter::WithTeilhaushalt,
            &[Teilhaushalt],
            &[Title],
        ),
        stream(
            "investitionsuebersichten",
            "investitionsuebersichten.csv",
            Layout::Investitionsuebersicht,
            ScopeFilter::Any,
            &[Teilhaushalt],
            &[ProjectId, ProjectTitle, Title],
        ),
    ]
}
