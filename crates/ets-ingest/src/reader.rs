//! CSV file reading.

use std::fs::File;
use std::io::Read;
use std::path::Path;
use std::time::Instant;

use polars::prelude::{CsvReadOptions, DataFrame, SerReader};
use tracing::{debug, info, info_span};

use crate::error::{IngestError, Result};
use crate::schema::{check_identifiers, check_required_columns};

fn open_error(path: &Path, error: std::io::Error) -> IngestError {
    if error.kind() == std::io::ErrorKind::NotFound {
        IngestError::FileNotFound {
            path: path.to_path_buf(),
        }
    } else {
        IngestError::FileRead {
            path: path.to_path_buf(),
            source: error,
        }
    }
}

/// Detect encoding and validate it's supported (UTF-8 only).
///
/// Checks for UTF-16 BOM markers which are not supported.
pub fn validate_encoding(path: &Path) -> Result<()> {
    let mut file = File::open(path).map_err(|e| open_error(path, e))?;

    let mut buffer = [0u8; 4];
    let bytes_read = file.read(&mut buffer).map_err(|e| IngestError::FileRead {
        path: path.to_path_buf(),
        source: e,
    })?;

    if bytes_read >= 2 {
        if buffer[0..2] == [0xFF, 0xFE] {
            return Err(IngestError::UnsupportedEncoding {
                path: path.to_path_buf(),
                encoding: "UTF-16 LE",
            });
        }
        if buffer[0..2] == [0xFE, 0xFF] {
            return Err(IngestError::UnsupportedEncoding {
                path: path.to_path_buf(),
                encoding: "UTF-16 BE",
            });
        }
    }

    Ok(())
}

/// Reads a CSV file into a `DataFrame` with every column typed as text.
///
/// Schema inference is disabled so that coded cells such as `"1=Yes"` or the
/// `"250, 000"` income artifact reach the Recoder untouched.
pub fn read_csv_text(path: &Path) -> Result<DataFrame> {
    CsvReadOptions::default()
        .with_has_header(true)
        .with_infer_schema_length(Some(0))
        .try_into_reader_with_file_path(Some(path.to_path_buf()))
        .map_err(|e| IngestError::CsvParse {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?
        .finish()
        .map_err(|e| IngestError::CsvParse {
            path: path.to_path_buf(),
            message: e.to_string(),
        })
}

/// Load the dyad file and check its contract.
///
/// Fails on a missing or unreadable file, an empty table, an absent required
/// column, or a blank, non-integer or duplicated `parent_id`.
pub fn read_dyad_table(path: &Path) -> Result<DataFrame> {
    let span = info_span!("ingest", path = %path.display());
    let _guard = span.enter();
    let start = Instant::now();

    if !path.exists() {
        return Err(IngestError::FileNotFound {
            path: path.to_path_buf(),
        });
    }
    validate_encoding(path)?;
    let df = read_csv_text(path)?;
    if df.height() == 0 {
        return Err(IngestError::EmptyCsv {
            path: path.to_path_buf(),
        });
    }
    check_required_columns(&df, path)?;
    let ids = check_identifiers(&df, path)?;
    debug!(
        columns = df.width(),
        extra_columns = df.width().saturating_sub(ets_model::required_columns().len()),
        "column contract satisfied"
    );
    info!(
        rows = df.height(),
        identifiers = ids.len(),
        duration_ms = start.elapsed().as_millis(),
        "dyad table loaded"
    );
    Ok(df)
}
