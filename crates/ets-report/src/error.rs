//! Error types for aggregation.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ReportError {
    /// A requested table name is not one of the result tables.
    #[error("unknown result table '{name}' (run `ets tables` for the list)")]
    UnknownTable { name: String },

    /// An aggregate input lacks a column it reads.
    #[error("table '{table}' needs column '{column}'")]
    MissingColumn {
        table: &'static str,
        column: String,
    },

    /// A categorical cell holds a label outside its category set.
    #[error("column '{column}' holds unknown category '{value}'")]
    UnknownCategory { column: &'static str, value: String },

    #[error(transparent)]
    Transform(#[from] ets_transform::TransformError),

    #[error(transparent)]
    Polars(#[from] polars::prelude::PolarsError),
}

pub type Result<T> = std::result::Result<T, ReportError>;
