//! Tests for the hierarchical table parser

use super::*;
use crate::app::models::{Layout, ParsedTable, TableBody, TableScope};
use crate::app::services::table_parser::{ParseStats, TableParser};
use crate::config::RowPolicy;
use crate::{Error, StructuralViolation};
use rust_decimal::Decimal;

fn parse(
    policy: RowPolicy,
    layout: Layout,
    grid: &[Vec<String>],
) -> (crate::Result<ParsedTable>, ParseStats) {
    let mut stats = ParseStats::new();
    let result = TableParser::new(policy).parse(layout, grid, TableScope::default(), &mut stats);
    (result, stats)
}

fn violation(result: crate::Result<ParsedTable>) -> (usize, StructuralViolation) {
    match result {
        Err(Error::Structural { row, violation }) => (row, violation),
        other => panic!("expected a structural violation, got {:?}", other),
    }
}

fn ergebnis_with_kontogruppe() -> Vec<Vec<String>> {
    grid(
        &ERGEBNIS_HEADER_KTO,
        vec![
            vec!["1", "40", "+", "Steuern und ähnliche Abgaben", "1.500,00", "1.600,00", "1.700,00"],
            vec!["", "", "", "Grundsteuer A", "500,00", "600,00", "700,00"],
            vec!["", "", "", "Grundsteuer  B", "1.000,00", "1.000,00", "1.000,00"],
            vec!["2", "41", "+", "Zuwendungen", "250,00", "250,00", "250,00"],
            vec!["10", "", "=", "Ordentliche Erträge", "1.750,00", "1.850,00", "1.950,00"],
        ],
    )
}

fn investment_table() -> Vec<Vec<String>> {
    grid(
        &INVEST_HEADER,
        vec![
            marker("I-001: Neubau Grundschule: Bauabschnitt 1", 5),
            vec!["1", "-", "Auszahlungen für Baumaßnahmen", "500.000,00", "250.000,00"],
            vec!["", "", "Rohbau", "300.000,00", "150.000,00"],
            vec!["", "", "Ausbau", "200.000,00", "100.000,00"],
            vec!["2", "=", "Saldo", "-500.000,00", "-250.000,00"],
        ],
    )
}

#[test]
fn test_parse_ergebnishaushalt_with_kontogruppe() {
    let (result, stats) = parse(RowPolicy::Strict, Layout::Ergebnishaushalt, &ergebnis_with_kontogruppe());
    let table = result.unwrap();

    let TableBody::Positions(positions) = &table.body else {
        panic!("expected positions");
    };
    assert_eq!(positions.len(), 3);

    let first = &positions[0].record;
    assert_eq!(first.number, Some(1));
    assert_eq!(first.kontogruppe, Some(40));
    assert_eq!(first.sign.as_deref(), Some("+"));
    assert_eq!(first.title, "Steuern und ähnliche Abgaben");
    assert_eq!(first.values.len(), 3);
    let ergebnis = first
        .values
        .iter()
        .find(|value| value.value_type == "Ergebnis" && value.year == 2014)
        .map(|value| value.amount);
    assert_eq!(ergebnis, Some(Decimal::new(150000, 2)));

    let children = &positions[0].children;
    assert_eq!(children.len(), 2);
    assert_eq!(children[1].title, "Grundsteuer B");
    for child in children {
        assert_eq!(child.number, None);
        assert_eq!(child.sign, None);
        assert_eq!(child.kontogruppe, None);
    }

    assert!(positions[2].record.is_summary());
    assert_eq!(positions[2].record.kontogruppe, None);

    assert_eq!(stats.tables_parsed, 1);
    assert_eq!(stats.total_rows, 5);
    assert_eq!(stats.records_parsed, 5);
    assert_eq!(stats.sum_mismatches, 0);
}

#[test]
fn test_parse_without_kontogruppe_column() {
    let grid = grid(
        &ERGEBNIS_HEADER,
        vec![
            vec!["1", "+", "Steuern", "100,00", "110,00", "120,00"],
            vec!["", "", "Gewerbesteuer", "100,00", "110,00", "120,00"],
        ],
    );
    let (result, _) = parse(RowPolicy::Strict, Layout::Ergebnishaushalt, &grid);
    let table = result.unwrap();

    let positions = table.positions();
    let (_, position) = positions[0];
    assert_eq!(position.record.sign.as_deref(), Some("+"));
    assert_eq!(position.record.title, "Steuern");
    assert_eq!(position.record.kontogruppe, None);
    assert_eq!(position.children[0].kontogruppe, None);
    assert_eq!(position.children[0].title, "Gewerbesteuer");
}

#[test]
fn test_position_zero_is_a_position() {
    let grid = grid(&FINANZ_HEADER, vec![vec!["0", "+", "Anfangsbestand", "1,00", "2,00"]]);
    let (result, _) = parse(RowPolicy::Strict, Layout::Finanzhaushalt, &grid);

    assert_eq!(result.unwrap().position_count(), 1);
}

#[test]
fn test_strict_child_before_position() {
    let grid = grid(&FINANZ_HEADER, vec![vec!["", "", "Verwaist", "1,00", "2,00"]]);
    let (result, _) = parse(RowPolicy::Strict, Layout::Finanzhaushalt, &grid);

    assert_eq!(violation(result), (2, StructuralViolation::ChildBeforePosition));
}

#[test]
fn test_strict_position_without_sign() {
    let grid = grid(
        &FINANZ_HEADER,
        vec![
            vec!["1", "+", "Einzahlungen", "1,00", "2,00"],
            vec!["2", "", "Auszahlungen", "1,00", "2,00"],
        ],
    );
    let (result, _) = parse(RowPolicy::Strict, Layout::Finanzhaushalt, &grid);

    assert_eq!(
        violation(result),
        (3, StructuralViolation::PositionWithoutSign { number: 2 })
    );
}

#[test]
fn test_strict_child_with_sign() {
    let grid = grid(
        &FINANZ_HEADER,
        vec![
            vec!["1", "+", "Einzahlungen", "1,00", "2,00"],
            vec!["", "-", "Teilbetrag", "1,00", "2,00"],
        ],
    );
    let (result, _) = parse(RowPolicy::Strict, Layout::Finanzhaushalt, &grid);

    assert_eq!(
        violation(result),
        (3, StructuralViolation::ChildWithSign { sign: "-".to_string() })
    );
}

#[test]
fn test_strict_child_with_kontogruppe() {
    let grid = grid(
        &ERGEBNIS_HEADER_KTO,
        vec![
            vec!["1", "40", "+", "Steuern", "1,00", "1,00", "1,00"],
            vec!["", "41", "", "Grundsteuer", "1,00", "1,00", "1,00"],
        ],
    );
    let (result, _) = parse(RowPolicy::Strict, Layout::Ergebnishaushalt, &grid);

    assert_eq!(
        violation(result),
        (3, StructuralViolation::ChildWithKontogruppe { kontogruppe: 41 })
    );
}

#[test]
fn test_column_count_mismatch_is_always_fatal() {
    let grid = grid(&FINANZ_HEADER, vec![vec!["1", "+", "Einzahlungen", "1,00"]]);

    for policy in [RowPolicy::Strict, RowPolicy::Tolerant] {
        let (result, _) = parse(policy, Layout::Finanzhaushalt, &grid);
        assert_eq!(
            violation(result),
            (2, StructuralViolation::ColumnCountMismatch { expected: 5, found: 4 })
        );
    }
}

#[test]
fn test_numeric_errors_propagate_in_both_policies() {
    let grid = grid(&FINANZ_HEADER, vec![vec!["1a", "+", "Einzahlungen", "1,00", "2,00"]]);

    for policy in [RowPolicy::Strict, RowPolicy::Tolerant] {
        let (result, _) = parse(policy, Layout::Finanzhaushalt, &grid);
        assert!(matches!(result, Err(Error::NumericFormat { .. })));
    }

    let grid = grid_with_amount("n. v.");
    let (result, _) = parse(RowPolicy::Tolerant, Layout::Finanzhaushalt, &grid);
    assert!(matches!(result, Err(Error::NumericFormat { expected: "amount", .. })));
}

fn grid_with_amount(amount: &str) -> Vec<Vec<String>> {
    grid(&FINANZ_HEADER, vec![vec!["1", "+", "Einzahlungen", amount, "2,00"]])
}

#[test]
fn test_tolerant_drops_value_less_rows_and_resets_position() {
    let grid = grid(
        &FINANZ_HEADER,
        vec![
            vec!["1", "+", "Einzahlungen", "3,00", "3,00"],
            vec!["", "", "davon:", "", ""],
            vec!["", "", "Zuweisungen", "3,00", "3,00"],
            vec!["2", "+", "Auszahlungen", "1,00", "1,00"],
        ],
    );
    let (result, stats) = parse(RowPolicy::Tolerant, Layout::Finanzhaushalt, &grid);
    let table = result.unwrap();

    let positions = table.positions();
    assert_eq!(positions.len(), 2);
    assert!(positions[0].1.children.is_empty());
    assert_eq!(stats.rows_dropped, 2);
    assert_eq!(stats.records_parsed, 2);
    assert_eq!(stats.warnings.len(), 2);
    assert!(stats.warnings[0].starts_with("row 3"));
}

#[test]
fn test_strict_keeps_value_less_rows_as_children() {
    let grid = grid(
        &FINANZ_HEADER,
        vec![
            vec!["1", "+", "Einzahlungen", "3,00", "3,00"],
            vec!["", "", "davon:", "", ""],
        ],
    );
    let (result, _) = parse(RowPolicy::Strict, Layout::Finanzhaushalt, &grid);
    let table = result.unwrap();

    let (_, position) = table.positions()[0];
    assert_eq!(position.children.len(), 1);
    assert_eq!(position.children[0].values[0].amount, Decimal::ZERO);
}

#[test]
fn test_tolerant_drops_position_without_sign_and_its_children() {
    let grid = grid(
        &FINANZ_HEADER,
        vec![
            vec!["1", "", "Ohne Vorzeichen", "3,00", "3,00"],
            vec!["", "", "Teilbetrag", "3,00", "3,00"],
            vec!["2", "+", "Auszahlungen", "1,00", "1,00"],
            vec!["", "-", "Mit Vorzeichen", "1,00", "1,00"],
        ],
    );
    let (result, stats) = parse(RowPolicy::Tolerant, Layout::Finanzhaushalt, &grid);
    let table = result.unwrap();

    let positions = table.positions();
    assert_eq!(positions.len(), 1);
    assert_eq!(positions[0].1.record.number, Some(2));
    assert!(positions[0].1.children.is_empty());
    assert_eq!(stats.rows_dropped, 3);
}

#[test]
fn test_zero_value_columns_still_parse() {
    let grid = grid(
        &["Nr.", "", "Finanzhaushalt", "Bemerkung"],
        vec![
            vec!["1", "+", "Einzahlungen", "siehe Anlage"],
            vec!["", "", "Zuweisungen", ""],
        ],
    );

    for policy in [RowPolicy::Strict, RowPolicy::Tolerant] {
        let (result, stats) = parse(policy, Layout::Finanzhaushalt, &grid);
        let table = result.unwrap();
        let (_, position) = table.positions()[0];
        assert!(position.record.values.is_empty());
        assert_eq!(position.children.len(), 1);
        assert_eq!(stats.rows_dropped, 0);
    }
}

#[test]
fn test_sum_mismatch_is_counted_not_fatal() {
    let grid = grid(
        &FINANZ_HEADER,
        vec![
            vec!["1", "+", "Einzahlungen", "3,00", "3,00"],
            vec!["", "", "Zuweisungen", "1,00", "3,00"],
        ],
    );
    let (result, stats) = parse(RowPolicy::Strict, Layout::Finanzhaushalt, &grid);

    assert!(result.is_ok());
    assert_eq!(stats.sum_mismatches, 1);
}

#[test]
fn test_header_only_grid() {
    let grid = grid(&FINANZ_HEADER, vec![]);
    let (result, stats) = parse(RowPolicy::Strict, Layout::Finanzhaushalt, &grid);

    assert_eq!(result.unwrap().position_count(), 0);
    assert_eq!(stats.total_rows, 0);
}

#[test]
fn test_parse_investitionsuebersicht() {
    let (result, stats) = parse(RowPolicy::Strict, Layout::Investitionsuebersicht, &investment_table());
    let table = result.unwrap();

    let projects = table.projects();
    assert_eq!(projects.len(), 1);
    assert_eq!(projects[0].id, "I-001");
    assert_eq!(projects[0].title, "Neubau Grundschule: Bauabschnitt 1");
    assert_eq!(projects[0].positions.len(), 2);
    assert_eq!(projects[0].positions[0].children.len(), 2);
    assert_eq!(stats.projects_opened, 1);
    assert_eq!(stats.records_parsed, 4);
    assert_eq!(stats.sum_mismatches, 0);
}

#[test]
fn test_marker_resets_position_pointer() {
    let grid = grid(
        &INVEST_HEADER,
        vec![
            marker("I-001: Neubau Schule", 5),
            vec!["1", "-", "Auszahlungen", "1,00", "1,00"],
            marker("I-002: Sanierung Rathaus", 5),
            vec!["", "", "Rohbau", "1,00", "1,00"],
        ],
    );
    let (result, _) = parse(RowPolicy::Strict, Layout::Investitionsuebersicht, &grid);

    assert_eq!(violation(result), (5, StructuralViolation::ChildBeforePosition));
}

#[test]
fn test_row_outside_project() {
    let grid = grid(&INVEST_HEADER, vec![vec!["1", "-", "Auszahlungen", "1,00", "1,00"]]);

    for policy in [RowPolicy::Strict, RowPolicy::Tolerant] {
        let (result, _) = parse(policy, Layout::Investitionsuebersicht, &grid);
        assert_eq!(violation(result), (2, StructuralViolation::RowOutsideProject));
    }
}

#[test]
fn test_malformed_project_marker() {
    let grid = grid(&INVEST_HEADER, vec![marker("Neubau Schule", 5)]);
    let (result, _) = parse(RowPolicy::Tolerant, Layout::Investitionsuebersicht, &grid);

    assert_eq!(
        violation(result),
        (
            2,
            StructuralViolation::MalformedProjectMarker {
                text: "Neubau Schule".to_string()
            }
        )
    );
}

#[test]
fn test_append_continuation_grid() {
    let parser = TableParser::new(RowPolicy::Strict);
    let mut stats = ParseStats::new();
    let mut table = parser
        .parse(
            Layout::Investitionsuebersicht,
            &investment_table(),
            TableScope::default(),
            &mut stats,
        )
        .unwrap();

    let continuation = body(vec![
        marker("I-002: Sanierung Rathaus", 5),
        vec!["1", "-", "Auszahlungen", "80.000,00", "0,00"],
    ]);
    parser.append(&mut table, &continuation, &mut stats).unwrap();

    let projects = table.projects();
    assert_eq!(projects.len(), 2);
    assert_eq!(projects[1].id, "I-002");
    assert_eq!(projects[1].positions[0].record.title, "Auszahlungen");
    assert_eq!(table.position_count(), 3);
    assert_eq!(stats.tables_parsed, 1);
    assert_eq!(stats.continuation_tables, 1);
    assert_eq!(stats.projects_opened, 2);
}

#[test]
fn test_append_requires_project_marker_first() {
    let parser = TableParser::new(RowPolicy::Strict);
    let mut stats = ParseStats::new();
    let mut table = parser
        .parse(
            Layout::Investitionsuebersicht,
            &investment_table(),
            TableScope::default(),
            &mut stats,
        )
        .unwrap();

    let continuation = body(vec![vec!["3", "+", "Einzahlungen", "1,00", "1,00"]]);
    let result = parser.append(&mut table, &continuation, &mut stats);

    assert!(matches!(
        result,
        Err(Error::Structural {
            row: 0,
            violation: StructuralViolation::RowOutsideProject
        })
    ));
}

#[test]
fn test_append_to_statement_is_orphan() {
    let parser = TableParser::new(RowPolicy::Strict);
    let mut stats = ParseStats::new();
    let mut table = parser
        .parse(
            Layout::Ergebnishaushalt,
            &ergebnis_with_kontogruppe(),
            TableScope::default(),
            &mut stats,
        )
        .unwrap();

    let continuation = body(vec![marker("I-002: Sanierung Rathaus", 7)]);
    let result = parser.append(&mut table, &continuation, &mut stats);

    assert!(matches!(result, Err(Error::OrphanContinuation { .. })));
    assert_eq!(stats.continuation_tables, 0);
}

#[test]
fn test_scope_is_kept_on_table() {
    let scope = TableScope {
        teilhaushalt: Some("01".to_string()),
        produktbereich: Some("02".to_string()),
        produktgruppe: None,
    };
    let mut stats = ParseStats::new();
    let table = TableParser::new(RowPolicy::Strict)
        .parse(Layout::Ergebnishaushalt, &ergebnis_with_kontogruppe(), scope.clone(), &mut stats)
        .unwrap();

    assert_eq!(table.scope, scope);
    assert_eq!(table.layout, Layout::Ergebnishaushalt);
}
