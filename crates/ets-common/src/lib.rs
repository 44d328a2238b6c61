//! Shared utilities for the tobacco-exposure analysis crates.
//!
//! This crate provides the Polars helpers every stage uses to read typed,
//! null-aware values out of a `DataFrame` and to build result columns.

pub mod frame;
pub mod polars;

// Re-export commonly used functions at crate root for convenience
pub use frame::{
    column_f64, column_i64, column_strings, column_values, f64_column, first_missing_column,
    i64_column, string_column,
};
pub use polars::{
    any_to_f64, any_to_i64, any_to_string, any_to_string_non_empty, parse_f64, parse_i64,
};
