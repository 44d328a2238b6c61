//! Dyad file ingestion.
//!
//! Loads the single delimited input file into a Polars `DataFrame` with every
//! column read as text, then checks the fixed column contract and the
//! `parent_id` join key before anything downstream runs.
//!
//! # Example
//!
//! ```ignore
//! use std::path::Path;
//! use ets_ingest::read_dyad_table;
//!
//! let df = read_dyad_table(Path::new("data/project.csv"))?;
//! ```

mod error;
mod reader;
mod schema;

// === Error Types ===
pub use error::{IngestError, Result};

// === CSV Reading ===
pub use reader::{read_csv_text, read_dyad_table, validate_encoding};

// === Contract Checks ===
pub use schema::{check_identifiers, check_required_columns};
