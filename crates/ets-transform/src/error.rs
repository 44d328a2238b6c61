//! Error types for the transformation stages.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum TransformError {
    /// The input already carries columns the Recoder writes.
    #[error("table is already recoded: column '{column}' is present")]
    AlreadyRecoded { column: &'static str },

    /// A stage input lacks a column it reads.
    #[error("{stage} input is missing column '{column}'")]
    MissingColumn {
        stage: &'static str,
        column: String,
    },

    #[error(transparent)]
    Polars(#[from] polars::prelude::PolarsError),
}

pub type Result<T> = std::result::Result<T, TransformError>;
