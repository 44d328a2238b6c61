//! Stage frame types for the transformation pipeline.
//!
//! Each stage consumes one frame type and produces the next, so a frame can
//! only be fed to the stage that expects it. Recoding an already-recoded
//! table is a type error at compile time; a table loaded from a file that
//! already carries recoded columns is rejected at run time (see
//! [`crate::recode`]).

use std::collections::BTreeMap;

use ets_common::first_missing_column;
use polars::prelude::DataFrame;
use serde::Serialize;

use crate::error::{Result, TransformError};

/// The dyad table exactly as loaded, every column still coded.
#[derive(Debug, Clone)]
pub struct RawFrame {
    data: DataFrame,
}

impl RawFrame {
    pub fn new(data: DataFrame) -> Self {
        Self { data }
    }

    pub fn data(&self) -> &DataFrame {
        &self.data
    }

    /// Returns the number of dyads in the frame.
    pub fn record_count(&self) -> usize {
        self.data.height()
    }
}

/// Counts collected while recoding.
///
/// A miss is a non-blank source value outside the documented code domain
/// that was recoded to missing.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RecodeReport {
    pub rows: usize,
    pub misses: BTreeMap<&'static str, usize>,
    /// Rows whose SWAN scores were forced to missing.
    pub corrected: usize,
}

impl RecodeReport {
    pub fn total_misses(&self) -> usize {
        self.misses.values().sum()
    }
}

/// The dyad table after the Recoder: semantic labels and parsed numbers.
#[derive(Debug, Clone)]
pub struct RecodedFrame {
    data: DataFrame,
    report: RecodeReport,
}

impl RecodedFrame {
    pub(crate) fn new(data: DataFrame, report: RecodeReport) -> Self {
        Self { data, report }
    }

    pub fn data(&self) -> &DataFrame {
        &self.data
    }

    pub fn report(&self) -> &RecodeReport {
        &self.report
    }

    pub fn record_count(&self) -> usize {
        self.data.height()
    }

    pub fn into_data(self) -> DataFrame {
        self.data
    }
}

/// Counts collected while deriving composite columns.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct DeriveReport {
    /// Identifiers whose child race differs between the consistent and the
    /// recorded biracial rule.
    pub child_race_disagreements: Vec<i64>,
    /// Rows with all four substance flags missing.
    pub substance_all_missing: usize,
}

/// The recoded table plus Derivation Engine columns.
#[derive(Debug, Clone)]
pub struct DerivedFrame {
    data: DataFrame,
    report: DeriveReport,
}

impl DerivedFrame {
    pub(crate) fn new(data: DataFrame, report: DeriveReport) -> Self {
        Self { data, report }
    }

    pub fn data(&self) -> &DataFrame {
        &self.data
    }

    pub fn report(&self) -> &DeriveReport {
        &self.report
    }

    pub fn record_count(&self) -> usize {
        self.data.height()
    }
}

/// Fail with [`TransformError::MissingColumn`] naming the first absent column.
pub(crate) fn require_stage_columns<'a>(
    df: &DataFrame,
    stage: &'static str,
    names: impl IntoIterator<Item = &'a str>,
) -> Result<()> {
    match first_missing_column(df, names) {
        Some(column) => Err(TransformError::MissingColumn {
            stage,
            column: column.to_string(),
        }),
        None => Ok(()),
    }
}
