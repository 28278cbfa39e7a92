//! Test fixtures for the flattening/export transform


use crate::app::models::{
    HeaderDescriptor, Layout, ParsedTable, Position, Project, Record, TableBody, TableScope, Value,
};
use rust_decimal::Decimal;

/// Values for "Ansatz 2016" and "Plan 2017", amounts in cents
pub fn values(amounts: [i64; 2]) -> Vec<Value> {
    [("Ansatz", 2016), ("Plan", 2017)]
        .into_iter()
        .zip(amounts)
        .map(|((value_type, year), cents)| Value {
            value_type: value_type.to_string(),
            year,
            amount: Decimal::new(cents, 2),
        })
        .collect()
}

pub fn position(number: i64, sign: &str, title: &str, amounts: [i64; 2]) -> Position {
    Position::new(Record {
        number: Some(number),
        kontogruppe: None,
        sign: Some(sign.to_string()),
        title: title.to_string(),
        values: values(amounts),
    })
}

pub fn child(title: &str, amounts: [i64; 2]) -> Record {
    Record {
        title: title.to_string(),
        values: values(amounts),
        ..Default::default()
    }
}

pub fn teilhaushalt(id: &str) -> TableScope {
    TableScope {
        teilhaushalt: Some(id.to_string()),
        ..Default::default()
    }
}

pub fn table(layout: Layout, scope: TableScope, body: TableBody) -> ParsedTable {
    ParsedTable {
        layout,
        header: HeaderDescriptor::default(),
        scope,
        body,
    }
}

/// Ergebnishaushalt: a Position with two children, a childless Position
/// and a summary
pub fn statement(scope: TableScope) -> ParsedTable {
    let mut steuern = position(1, "+", "Steuern", [300, 30]);
    steuern.record.kontogruppe = Some(40);
    steuern.children.push(child("Grundsteuer", [100, 10]));
    steuern.children.push(child("Gewerbesteuer", [200, 20]));

    let mut zuwendungen = position(2, "+", "Zuwendungen", [50, 5]);
    zuwendungen.record.kontogruppe = Some(41);

    let summe = position(10, "=", "Ordentliche Erträge", [350, 35]);

    table(
        Layout::Ergebnishaushalt,
        scope,
        TableBody::Positions(vec![steuern, zuwendungen, summe]),
    )
}

pub fn investments(scope: TableScope) -> ParsedTable {
    let mut project = Project::new("I-001", "Neubau Schule");
    let mut auszahlungen = position(1, "-", "Auszahlungen", [500, 250]);
    auszahlungen.children.push(child("Rohbau", [500, 250]));
    project.positions.push(auszahlungen);

    table(
        Layout::Investitionsuebersicht,
        scope,
        TableBody::Projects(vec![project]),
    )
}
