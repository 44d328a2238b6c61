//! Column contract and identifier checks.

use std::collections::BTreeSet;
use std::path::Path;

use polars::prelude::DataFrame;

use ets_common::{any_to_i64, any_to_string, first_missing_column};
use ets_model::columns::PARENT_ID;
use ets_model::required_columns;

use crate::error::{IngestError, Result};

/// Fail on the first required column absent from `df`.
///
/// Header names are matched exactly.
pub fn check_required_columns(df: &DataFrame, path: &Path) -> Result<()> {
    match first_missing_column(df, required_columns()) {
        Some(column) => Err(IngestError::MissingColumn {
            column: column.to_string(),
            path: path.to_path_buf(),
        }),
        None => Ok(()),
    }
}

/// Parse every `parent_id` and reject blanks, non-integers and duplicates.
///
/// Returns the identifiers in row order.
pub fn check_identifiers(df: &DataFrame, path: &Path) -> Result<Vec<i64>> {
    let column = df.column(PARENT_ID)?;
    let mut seen = BTreeSet::new();
    let mut ids = Vec::with_capacity(df.height());
    for idx in 0..df.height() {
        let value = column.get(idx)?;
        let Some(id) = any_to_i64(value.clone()) else {
            return Err(IngestError::InvalidIdentifier {
                value: any_to_string(value),
                row: idx + 1,
                path: path.to_path_buf(),
            });
        };
        if !seen.insert(id) {
            return Err(IngestError::DuplicateIdentifier {
                id,
                path: path.to_path_buf(),
            });
        }
        ids.push(id);
    }
    Ok(ids)
}
