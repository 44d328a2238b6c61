//! Machine-readable renderings of the result tables.
//!
//! Null statistics are written as empty CSV fields and JSON `null`, so a
//! missing mean stays distinguishable from 0.

use std::io::Write;

use anyhow::{Context, Result};
use ets_common::any_to_string;
use ets_report::{AnalysisTables, ResultTable, ZeroPolicy};
use polars::prelude::{AnyValue, DataFrame};
use serde::Serialize;
use serde_json::Value;

/// Column names of a table, in order.
pub fn column_names(df: &DataFrame) -> Vec<String> {
    df.get_column_names()
        .iter()
        .map(|name| name.as_str().to_string())
        .collect()
}

/// Every cell of `df` as text, row by row. Nulls become empty strings.
pub fn text_rows(df: &DataFrame) -> Result<Vec<Vec<String>>> {
    let mut rows = vec![Vec::with_capacity(df.width()); df.height()];
    for column in df.get_columns() {
        for (idx, row) in rows.iter_mut().enumerate() {
            row.push(any_to_string(column.get(idx)?));
        }
    }
    Ok(rows)
}

/// Write every table as a CSV block preceded by a `# name` line; blocks are
/// separated by a blank line.
pub fn write_csv<W: Write>(tables: &AnalysisTables, mut writer: W) -> Result<()> {
    for (position, table) in tables.tables().iter().enumerate() {
        if position > 0 {
            writeln!(writer)?;
        }
        writeln!(writer, "# {}", table.name)?;
        let mut csv_writer = csv::Writer::from_writer(&mut writer);
        csv_writer.write_record(column_names(&table.data))?;
        for row in text_rows(&table.data)? {
            csv_writer.write_record(&row)?;
        }
        csv_writer
            .flush()
            .with_context(|| format!("write table {}", table.name))?;
    }
    Ok(())
}

#[derive(Debug, Serialize)]
struct JsonTable {
    name: String,
    title: &'static str,
    zero_policy: ZeroPolicy,
    columns: Vec<String>,
    rows: Vec<Vec<Value>>,
}

#[derive(Debug, Serialize)]
struct JsonReport {
    tables: Vec<JsonTable>,
}

fn json_value(value: AnyValue<'_>) -> Value {
    match value {
        AnyValue::Null => Value::Null,
        AnyValue::Boolean(v) => Value::Bool(v),
        AnyValue::Int32(v) => Value::from(v),
        AnyValue::Int64(v) => Value::from(v),
        AnyValue::UInt32(v) => Value::from(v),
        AnyValue::UInt64(v) => Value::from(v),
        AnyValue::Float32(v) => serde_json::Number::from_f64(f64::from(v))
            .map_or(Value::Null, Value::Number),
        AnyValue::Float64(v) => {
            serde_json::Number::from_f64(v).map_or(Value::Null, Value::Number)
        }
        other => {
            let text = any_to_string(other);
            if text.is_empty() {
                Value::Null
            } else {
                Value::String(text)
            }
        }
    }
}

fn json_table(table: &ResultTable) -> Result<JsonTable> {
    let df = &table.data;
    let mut rows = vec![Vec::with_capacity(df.width()); df.height()];
    for column in df.get_columns() {
        for (idx, row) in rows.iter_mut().enumerate() {
            row.push(json_value(column.get(idx)?));
        }
    }
    Ok(JsonTable {
        name: table.name.to_string(),
        title: table.title(),
        zero_policy: table.zero_policy(),
        columns: column_names(df),
        rows,
    })
}

/// Write all tables as one pretty-printed JSON document.
pub fn write_json<W: Write>(tables: &AnalysisTables, mut writer: W) -> Result<()> {
    let report = JsonReport {
        tables: tables
            .tables()
            .iter()
            .map(json_table)
            .collect::<Result<_>>()?,
    };
    serde_json::to_writer_pretty(&mut writer, &report).context("serialize tables")?;
    writeln!(writer)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use polars::prelude::Column;

    #[test]
    fn json_keeps_null_distinct_from_zero() {
        assert_eq!(json_value(AnyValue::Null), Value::Null);
        assert_eq!(json_value(AnyValue::Float64(0.0)), serde_json::json!(0.0));
        assert_eq!(json_value(AnyValue::Float64(f64::NAN)), Value::Null);
        assert_eq!(json_value(AnyValue::String("SDP")), serde_json::json!("SDP"));
    }

    #[test]
    fn text_rows_are_row_major() {
        let df = DataFrame::new(vec![
            Column::new("race".into(), ["White", "Black"]),
            Column::new("n".into(), [Some(2i64), None]),
        ])
        .unwrap();
        assert_eq!(
            text_rows(&df).unwrap(),
            vec![
                vec!["White".to_string(), "2".to_string()],
                vec!["Black".to_string(), String::new()],
            ]
        );
    }
}
