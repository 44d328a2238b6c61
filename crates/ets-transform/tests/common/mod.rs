//! Raw dyad fixtures.

#![allow(dead_code)]

use std::collections::BTreeMap;

use ets_model::required_columns;
use polars::prelude::{Column, DataFrame};

/// One raw dyad: every required column, coded as the source file codes it.
pub fn dyad(id: i64) -> BTreeMap<&'static str, String> {
    let mut row: BTreeMap<&'static str, String> = required_columns()
        .into_iter()
        .map(|name| (name, "0".to_string()))
        .collect();
    row.insert("parent_id", id.to_string());
    row.insert("pwhite", "1".to_string());
    row.insert("twhite", "1".to_string());
    row.insert("income", "45000".to_string());
    for name in [
        "mom_smoke_16wk",
        "mom_smoke_22wk",
        "mom_smoke_32wk",
        "mom_smoke_pp1",
        "mom_smoke_pp2",
        "mom_smoke_pp12wk",
        "mom_smoke_pp6mo",
    ] {
        row.insert(name, "2=No".to_string());
    }
    row.insert("cotimean_34wk", "12.5".to_string());
    row.insert("cotimean_pp6mo", "8".to_string());
    row.insert("swan_inattentive", "1.2".to_string());
    row.insert("swan_hyperactive", "0.8".to_string());
    row
}

/// Overwrite cells of a dyad; an empty value becomes a missing cell.
pub fn with(
    mut row: BTreeMap<&'static str, String>,
    cells: &[(&'static str, &str)],
) -> BTreeMap<&'static str, String> {
    for (name, value) in cells {
        row.insert(name, (*value).to_string());
    }
    row
}

/// Build a text-typed frame, as the loader produces it.
pub fn frame(rows: &[BTreeMap<&'static str, String>]) -> DataFrame {
    let columns = required_columns()
        .into_iter()
        .map(|name| {
            let values: Vec<Option<String>> = rows
                .iter()
                .map(|row| row.get(name).filter(|value| !value.is_empty()).cloned())
                .collect();
            Column::new(name.into(), values)
        })
        .collect();
    DataFrame::new(columns).unwrap()
}
