//! Heading scope state machine
//!
//! Headings do not carry their level; it is inferred from their order and
//! their identifier shape. A `THH` prefix always opens a Teilhaushalt, a
//! two-digit identifier opens a Produktbereich directly below it and a
//! four-digit identifier a Produktgruppe below that. Anything else leaves
//! the scope unchanged.

use super::registry::{Entry, TeilhaushaltRegistry};
use crate::app::models::TableScope;
use crate::app::services::table_parser::field_parsers::split_whitespace;
use crate::constants::{PRODUKTBEREICH_ID_LEN, PRODUKTGRUPPE_ID_LEN, TEILHAUSHALT_PREFIX};
use tracing::debug;

/// Deepest scope level currently entered
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ScopeLevel {
    None,
    Teilhaushalt,
    Produktbereich,
    Produktgruppe,
}

/// Effect of a heading on the scope
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HeadingTransition {
    /// Decorative or out-of-order heading; scope unchanged
    Ignored,
    /// A level was entered
    Entered {
        level: ScopeLevel,
        id: String,
        entry: Entry,
    },
}

/// Tracks the Teilhaushalt / Produktbereich / Produktgruppe scope
///
/// The registry is injected at construction and handed back with
/// [`HeadingState::into_registry`]; only the current scope is reset
/// between documents.
#[derive(Debug, Default)]
pub struct HeadingState {
    registry: TeilhaushaltRegistry,
    teilhaushalt: Option<String>,
    produktbereich: Option<String>,
    produktgruppe: Option<String>,
}

impl HeadingState {
    pub fn new(registry: TeilhaushaltRegistry) -> Self {
        Self {
            registry,
            teilhaushalt: None,
            produktbereich: None,
            produktgruppe: None,
        }
    }

    /// Leave all scope levels; called at the start of every document
    pub fn reset(&mut self) {
        self.teilhaushalt = None;
        self.produktbereich = None;
        self.produktgruppe = None;
    }

    /// Feed one heading text
    pub fn register_heading(&mut self, text: &str) -> HeadingTransition {
        let text = text.trim();
        if text.is_empty() {
            return HeadingTransition::Ignored;
        }

        // "THH01 Bildung" and "THH 01 Bildung" name the same Teilhaushalt
        if let Some(rest) = text.strip_prefix(TEILHAUSHALT_PREFIX) {
            return match split_heading(rest) {
                Some((id, title)) => self.enter_teilhaushalt(id, title),
                None => HeadingTransition::Ignored,
            };
        }

        let Some((id, title)) = split_heading(text) else {
            return HeadingTransition::Ignored;
        };

        let transition = match (&self.teilhaushalt, &self.produktbereich, &self.produktgruppe) {
            (Some(teilhaushalt), None, _) if is_numeric_id(id, PRODUKTBEREICH_ID_LEN) => {
                let teilhaushalt = teilhaushalt.clone();
                self.enter_produktbereich(&teilhaushalt, id, title)
            }
            (Some(teilhaushalt), Some(produktbereich), None)
                if is_numeric_id(id, PRODUKTGRUPPE_ID_LEN) =>
            {
                let (teilhaushalt, produktbereich) = (teilhaushalt.clone(), produktbereich.clone());
                self.enter_produktgruppe(&teilhaushalt, &produktbereich, id, title)
            }
            _ => HeadingTransition::Ignored,
        };

        if transition == HeadingTransition::Ignored {
            debug!("Ignoring heading '{}' at level {:?}", text, self.level());
        }
        transition
    }

    /// Copy of the identifiers currently entered
    pub fn scope(&self) -> TableScope {
        TableScope {
            teilhaushalt: self.teilhaushalt.clone(),
            produktbereich: self.produktbereich.clone(),
            produktgruppe: self.produktgruppe.clone(),
        }
    }

    pub fn level(&self) -> ScopeLevel {
        if self.produktgruppe.is_some() {
            ScopeLevel::Produktgruppe
        } else if self.produktbereich.is_some() {
            ScopeLevel::Produktbereich
        } else if self.teilhaushalt.is_some() {
            ScopeLevel::Teilhaushalt
        } else {
            ScopeLevel::None
        }
    }

    pub fn registry(&self) -> &TeilhaushaltRegistry {
        &self.registry
    }

    /// Hand back the registry accumulated so far
    pub fn into_registry(self) -> TeilhaushaltRegistry {
        self.registry
    }

    fn enter_teilhaushalt(&mut self, id: &str, title: &str) -> HeadingTransition {
        let entry = self.registry.enter_teilhaushalt(id, title);
        debug!("Entered Teilhaushalt {} ({:?})", id, entry);

        self.teilhaushalt = Some(id.to_string());
        self.produktbereich = None;
        self.produktgruppe = None;

        HeadingTransition::Entered {
            level: ScopeLevel::Teilhaushalt,
            id: id.to_string(),
            entry,
        }
    }

    fn enter_produktbereich(&mut self, teilhaushalt: &str, id: &str, title: &str) -> HeadingTransition {
        let Some(entry) = self.registry.enter_produktbereich(teilhaushalt, id, title) else {
            return HeadingTransition::Ignored;
        };
        debug!("Entered Produktbereich {}/{} ({:?})", teilhaushalt, id, entry);

        self.produktbereich = Some(id.to_string());
        self.produktgruppe = None;

        HeadingTransition::Entered {
            level: ScopeLevel::Produktbereich,
            id: id.to_string(),
            entry,
        }
    }

    fn enter_produktgruppe(
        &mut self,
        teilhaushalt: &str,
        produktbereich: &str,
        id: &str,
        title: &str,
    ) -> HeadingTransition {
        let Some(entry) = self
            .registry
            .enter_produktgruppe(teilhaushalt, produktbereich, id, title)
        else {
            return HeadingTransition::Ignored;
        };
        debug!(
            "Entered Produktgruppe {}/{}/{} ({:?})",
            teilhaushalt, produktbereich, id, entry
        );

        self.produktgruppe = Some(id.to_string());

        HeadingTransition::Entered {
            level: ScopeLevel::Produktgruppe,
            id: id.to_string(),
            entry,
        }
    }
}

/// Split heading text into (identifier, title) at the first whitespace run
fn split_heading(text: &str) -> Option<(&str, &str)> {
    match split_whitespace(text, Some(2)).as_slice() {
        [id, title] => Some((*id, *title)),
        _ => None,
    }
}

fn is_numeric_id(id: &str, len: usize) -> bool {
    id.len() == len && id.bytes().all(|byte| byte.is_ascii_digit())
}
