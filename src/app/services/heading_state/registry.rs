//! Teilhaushalt registry
//!
//! The registry accumulates every Teilhaushalt, Produktbereich and
//! Produktgruppe seen across all documents of a run. Entries are keyed by
//! identifier; re-entering a known identifier keeps the stored title.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Produktgruppe {
    pub id: String,
    pub title: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Produktbereich {
    pub id: String,
    pub title: String,
    pub produktgruppen: BTreeMap<String, Produktgruppe>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Teilhaushalt {
    pub id: String,
    pub title: String,
    pub produktbereiche: BTreeMap<String, Produktbereich>,
}

/// Result of entering an identifier into the registry
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Entry {
    /// First occurrence, stored with the given title
    Created,
    /// Already known, stored title kept
    Existing,
}

/// Process-wide Teilhaushalt -> Produktbereich -> Produktgruppe registry
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TeilhaushaltRegistry {
    teilhaushalte: BTreeMap<String, Teilhaushalt>,
}

impl TeilhaushaltRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Enter a Teilhaushalt, creating it on first occurrence
    pub fn enter_teilhaushalt(&mut self, id: &str, title: &str) -> Entry {
        let mut entry = Entry::Existing;
        self.teilhaushalte.entry(id.to_string()).or_insert_with(|| {
            entry = Entry::Created;
            Teilhaushalt {
                id: id.to_string(),
                title: title.to_string(),
                produktbereiche: BTreeMap::new(),
            }
        });
        entry
    }

    /// Enter a Produktbereich below a known Teilhaushalt
    ///
    /// Returns `None` if the Teilhaushalt is unknown.
    pub fn enter_produktbereich(
        &mut self,
        teilhaushalt: &str,
        id: &str,
        title: &str,
    ) -> Option<Entry> {
        let parent = self.teilhaushalte.get_mut(teilhaushalt)?;
        let mut entry = Entry::Existing;
        parent
            .produktbereiche
            .entry(id.to_string())
            .or_insert_with(|| {
                entry = Entry::Created;
                Produktbereich {
                    id: id.to_string(),
                    title: title.to_string(),
                    produktgruppen: BTreeMap::new(),
                }
            });
        Some(entry)
    }

    /// Enter a Produktgruppe below a known Produktbereich
    ///
    /// Returns `None` if the Teilhaushalt or Produktbereich is unknown.
    pub fn enter_produktgruppe(
        &mut self,
        teilhaushalt: &str,
        produktbereich: &str,
        id: &str,
        title: &str,
    ) -> Option<Entry> {
        let parent = self
            .teilhaushalte
            .get_mut(teilhaushalt)?
            .produktbereiche
            .get_mut(produktbereich)?;
        let mut entry = Entry::Existing;
        parent
            .produktgruppen
            .entry(id.to_string())
            .or_insert_with(|| {
                entry = Entry::Created;
                Produktgruppe {
                    id: id.to_string(),
                    title: title.to_string(),
                }
            });
        Some(entry)
    }

    pub fn get(&self, id: &str) -> Option<&Teilhaushalt> {
        self.teilhaushalte.get(id)
    }

    /// Teilhaushalte in identifier order
    pub fn iter(&self) -> impl Iterator<Item = &Teilhaushalt> {
        self.teilhaushalte.values()
    }

    pub fn len(&self) -> usize {
        self.teilhaushalte.len()
    }

    pub fn is_empty(&self) -> bool {
        self.teilhaushalte.is_empty()
    }

    /// Number of Produktbereiche over all Teilhaushalte
    pub fn produktbereich_count(&self) -> usize {
        self.iter().map(|thh| thh.produktbereiche.len()).sum()
    }

    /// Number of Produktgruppen over all Produktbereiche
    pub fn produktgruppe_count(&self) -> usize {
        self.iter()
            .flat_map(|thh| thh.produktbereiche.values())
            .map(|pb| pb.produktgruppen.len())
            .sum()
    }
}
