//! Column extraction and construction helpers.
//!
//! Every stage reads source columns into `Vec<Option<T>>` through these
//! helpers and writes results back as null-aware Polars columns, so missing
//! values travel as `None` end to end.

use polars::prelude::{AnyValue, Column, DataFrame, PolarsResult};

use crate::polars::{any_to_f64, any_to_i64, any_to_string_non_empty};

/// Read every value of a column through `parse`.
pub fn column_values<T>(
    df: &DataFrame,
    name: &str,
    parse: impl Fn(AnyValue<'_>) -> Option<T>,
) -> PolarsResult<Vec<Option<T>>> {
    let column = df.column(name)?;
    let mut values = Vec::with_capacity(df.height());
    for idx in 0..df.height() {
        values.push(parse(column.get(idx)?));
    }
    Ok(values)
}

/// Read a column as trimmed, non-empty strings.
pub fn column_strings(df: &DataFrame, name: &str) -> PolarsResult<Vec<Option<String>>> {
    column_values(df, name, any_to_string_non_empty)
}

/// Read a column as `f64`; unparseable cells become `None`.
pub fn column_f64(df: &DataFrame, name: &str) -> PolarsResult<Vec<Option<f64>>> {
    column_values(df, name, any_to_f64)
}

/// Read a column as `i64`; unparseable or fractional cells become `None`.
pub fn column_i64(df: &DataFrame, name: &str) -> PolarsResult<Vec<Option<i64>>> {
    column_values(df, name, any_to_i64)
}

pub fn string_column(name: &str, values: Vec<Option<String>>) -> Column {
    Column::new(name.into(), values)
}

pub fn f64_column(name: &str, values: Vec<Option<f64>>) -> Column {
    Column::new(name.into(), values)
}

pub fn i64_column(name: &str, values: Vec<Option<i64>>) -> Column {
    Column::new(name.into(), values)
}

/// The first of `names` that `df` does not carry. Names match exactly.
pub fn first_missing_column<'a>(
    df: &DataFrame,
    names: impl IntoIterator<Item = &'a str>,
) -> Option<&'a str> {
    let present = df.get_column_names();
    names
        .into_iter()
        .find(|name| !present.iter().any(|column| column.as_str() == *name))
}
