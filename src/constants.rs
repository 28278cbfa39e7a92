//! Application constants for the Haushalt processor
//!
//! This module contains the textual markers, header labels and keywords the
//! budget documents use, plus defaults for configuration and export.

// =============================================================================
// Table Header Markers
// =============================================================================

/// Third token of every value column header ("Ansatz 2016 EUR")
pub const CURRENCY_MARKER: &str = "EUR";

/// Header label of the optional Kontogruppe column in an Ergebnishaushalt
pub const KONTOGRUPPE_HEADER: &str = "Kto.\nGr.";

/// Sign marking a record that restates an aggregate
pub const SUMMARY_SIGN: &str = "=";

/// Separator between project id and title in a project marker row
pub const PROJECT_MARKER_SEPARATOR: char = ':';

/// Number of leading header rows; the second one is never parsed
pub const HEADER_ROWS: usize = 2;

// =============================================================================
// Layout Keywords
// =============================================================================

/// Layout keywords, matched case-insensitively against header cells
pub mod keywords {
    pub const FINANZHAUSHALT: &str = "finanzhaushalt";
    pub const INVESTITIONSUEBERSICHT: &str = "investitionsübersicht";
    pub const ERGEBNISHAUSHALT: &str = "ergebnishaushalt";
}

// =============================================================================
// Heading Markers
// =============================================================================

/// Prefix of a Teilhaushalt heading identifier ("THH01 Zentrale Dienste")
pub const TEILHAUSHALT_PREFIX: &str = "THH";

/// Digits in a Produktbereich identifier
pub const PRODUKTBEREICH_ID_LEN: usize = 2;

/// Digits in a Produktgruppe identifier
pub const PRODUKTGRUPPE_ID_LEN: usize = 4;

// =============================================================================
// Export Labels
// =============================================================================

/// Column labels used in export headers
pub mod labels {
    pub const TEILHAUSHALT: &str = "TEILHAUSHALT";
    pub const PRODUKTBEREICH: &str = "PRODUKTBEREICH";
    pub const PRODUKTGRUPPE: &str = "PRODUKTGRUPPE";
    pub const NUMBER: &str = "NUMMER";
    pub const KONTOGRUPPE: &str = "KONTOGRUPPE";
    pub const SIGN: &str = "VORZEICHEN";
    pub const TITLE: &str = "TITEL";
    pub const PROJECT_ID: &str = "PROJEKTNUMMER";
    pub const PROJECT_TITLE: &str = "PROJEKT";
    pub const YEAR: &str = "JAHR";
    pub const VALUE_TYPE: &str = "TYP";
    pub const AMOUNT: &str = "BETRAG";
}

// =============================================================================
// Defaults
// =============================================================================

/// Default output directory for CSV exports
pub const DEFAULT_OUTPUT_DIR: &str = "output";

/// Default CSV field delimiter
pub const DEFAULT_DELIMITER: char = ';';

/// File extension of input documents
pub const DOCUMENT_EXTENSION: &str = "json";

/// Directory name below the user config dir
pub const CONFIG_DIR_NAME: &str = "haushalt-processor";

/// Config file name
pub const CONFIG_FILE_NAME: &str = "config.toml";

/// Environment variables consulted after the config file
pub mod env_vars {
    pub const OUTPUT_DIR: &str = "HAUSHALT_OUTPUT_DIR";
    pub const ROW_POLICY: &str = "HAUSHALT_ROW_POLICY";
    pub const INCLUDE_SUMMARIES: &str = "HAUSHALT_INCLUDE_SUMMARIES";
}

/// Check whether a sign marks a summary record
pub fn is_summary_sign(sign: &str) -> bool {
    sign == SUMMARY_SIGN
}
