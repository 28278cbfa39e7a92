//! Tests for the heading scope state machine

use super::*;
use crate::app::models::TableScope;
use crate::app::services::heading_state::{Entry, HeadingTransition, ScopeLevel};

#[test]
fn test_full_heading_sequence() {
    let state = state_after(&["THH 01 Bildung", "02 Schulen", "0201 Grundschulen"]);

    let scope = state.scope();
    assert_eq!(scope.teilhaushalt.as_deref(), Some("01"));
    assert_eq!(scope.produktbereich.as_deref(), Some("02"));
    assert_eq!(scope.produktgruppe.as_deref(), Some("0201"));
    assert_eq!(state.level(), ScopeLevel::Produktgruppe);

    let teilhaushalt = state.registry().get("01").unwrap();
    assert_eq!(teilhaushalt.title, "Bildung");
    assert_eq!(teilhaushalt.produktbereiche["02"].title, "Schulen");
    assert_eq!(
        teilhaushalt.produktbereiche["02"].produktgruppen["0201"].title,
        "Grundschulen"
    );
}

#[test]
fn test_heading_ignored_after_reset() {
    let mut state = state_after(&["THH 01 Bildung", "02 Schulen", "0201 Grundschulen"]);
    state.reset();

    assert_eq!(state.register_heading("99 Sonstiges"), HeadingTransition::Ignored);
    assert_eq!(state.level(), ScopeLevel::None);
    assert_eq!(state.scope(), TableScope::default());
    assert_eq!(state.registry().len(), 1);
}

#[test]
fn test_prefix_with_and_without_space() {
    let joined = state_after(&["THH01 Bildung"]);
    let spaced = state_after(&["THH 01 Bildung"]);

    assert_eq!(joined.scope(), spaced.scope());
    assert_eq!(joined.registry(), spaced.registry());
    assert_eq!(joined.registry().get("01").unwrap().title, "Bildung");
}

#[test]
fn test_reentering_teilhaushalt_keeps_title() {
    let mut state = state_after(&["THH01 Bildung"]);
    state.reset();

    let transition = state.register_heading("THH01 Bildung, Kultur und Sport");
    assert_eq!(
        transition,
        HeadingTransition::Entered {
            level: ScopeLevel::Teilhaushalt,
            id: "01".to_string(),
            entry: Entry::Existing,
        }
    );
    assert_eq!(state.registry().len(), 1);
    assert_eq!(state.registry().get("01").unwrap().title, "Bildung");
}

#[test]
fn test_teilhaushalt_clears_finer_levels() {
    let mut state = state_after(&["THH 01 Bildung", "02 Schulen", "0201 Grundschulen"]);
    state.register_heading("THH 02 Soziales");

    let scope = state.scope();
    assert_eq!(scope.teilhaushalt.as_deref(), Some("02"));
    assert_eq!(scope.produktbereich, None);
    assert_eq!(scope.produktgruppe, None);
}

#[test]
fn test_levels_only_move_forward() {
    // A second Produktbereich heading is ignored once one is current
    let mut state = state_after(&["THH 01 Bildung", "02 Schulen"]);
    assert_eq!(state.register_heading("03 Kultur"), HeadingTransition::Ignored);
    assert_eq!(state.scope().produktbereich.as_deref(), Some("02"));

    // Produktgruppe requires a current Produktbereich
    let mut state = state_after(&["THH 01 Bildung"]);
    assert_eq!(state.register_heading("0201 Grundschulen"), HeadingTransition::Ignored);

    // Only one Produktgruppe per Produktbereich heading
    let mut state = state_after(&["THH 01 Bildung", "02 Schulen", "0201 Grundschulen"]);
    assert_eq!(state.register_heading("0202 Realschulen"), HeadingTransition::Ignored);
    assert_eq!(state.scope().produktgruppe.as_deref(), Some("0201"));
}

#[test]
fn test_decorative_headings_ignored() {
    let mut state = state_after(&["THH 01 Bildung"]);

    for heading in ["", "   ", "Vorbemerkungen", "2a Schulen", "Teilergebnishaushalt 2016", "THH"] {
        assert_eq!(state.register_heading(heading), HeadingTransition::Ignored, "{}", heading);
    }
    assert_eq!(state.level(), ScopeLevel::Teilhaushalt);
}

#[test]
fn test_identifier_must_be_ascii_digits() {
    let mut state = state_after(&["THH 01 Bildung"]);
    assert_eq!(state.register_heading("٠٢ Schulen"), HeadingTransition::Ignored);
    assert_eq!(state.register_heading("002 Schulen"), HeadingTransition::Ignored);
}

#[test]
fn test_title_is_rest_of_heading() {
    let state = state_after(&["THH 01   Bildung  und\nKultur"]);
    assert_eq!(state.registry().get("01").unwrap().title, "Bildung  und\nKultur");
}

#[test]
fn test_into_registry_hands_back_entries() {
    let mut state = HeadingState::new(TeilhaushaltRegistry::new());
    state.register_heading("THH 01 Bildung");
    state.reset();
    state.register_heading("THH 02 Soziales");

    let registry = state.into_registry();
    assert_eq!(registry.len(), 2);

    // A registry can be injected into the next run
    let next = HeadingState::new(registry);
    assert_eq!(next.registry().len(), 2);
    assert_eq!(next.level(), ScopeLevel::None);
}
