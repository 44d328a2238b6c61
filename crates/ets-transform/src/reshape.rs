//! Wide-to-long views of the repeated-measures column groups.
//!
//! Each view is an explicit fan-out: for every source row and every column of
//! a group, one output row `(parent_id, occasion, value)`. Missing values are
//! kept; filtering happens in the aggregates that need it.

use ets_common::{column_i64, i64_column, string_column};
use ets_model::columns::{PARENT_ID, PARENT_RACE};
use ets_model::{CHILD_EXPOSURE, ColumnGroup, POSTPARTUM_SMOKING, Race, TRIMESTER_SMOKING};
use polars::prelude::DataFrame;

use crate::error::Result;
use crate::frame::require_stage_columns;
use crate::rules::read_race_flags;

const STAGE: &str = "reshape";

/// Trimester number (1..3) in the long trimester table.
pub const TRIMESTER: &str = "trimester";
/// Postpartum visit label (`pp1`, `pp2`, `pp12wk`, `pp6mo`).
pub const VISIT: &str = "visit";
/// Child age label (`6mo` .. `5yr`).
pub const AGE: &str = "age";
/// Smoking indicator in the long smoking tables.
pub const SMOKE: &str = "smoke";
/// Exposure indicator in the long exposure table.
pub const EXPOSED: &str = "exposed";
/// Race label in the race lookup.
pub const RACE: &str = "race";

/// One long row per (source row, group column).
struct LongRows {
    identifiers: Vec<Option<i64>>,
    positions: Vec<usize>,
    values: Vec<Option<i64>>,
}

fn fan_out(data: &DataFrame, group: &ColumnGroup) -> Result<LongRows> {
    require_stage_columns(data, STAGE, [PARENT_ID])?;
    require_stage_columns(data, STAGE, group.columns.iter().copied())?;

    let identifiers = column_i64(data, PARENT_ID)?;
    let mut wide = Vec::with_capacity(group.columns.len());
    for name in group.columns {
        wide.push(column_i64(data, name)?);
    }

    let total = data.height() * group.columns.len();
    let mut rows = LongRows {
        identifiers: Vec::with_capacity(total),
        positions: Vec::with_capacity(total),
        values: Vec::with_capacity(total),
    };
    for (idx, id) in identifiers.iter().enumerate() {
        for (position, column) in wide.iter().enumerate() {
            rows.identifiers.push(*id);
            rows.positions.push(position);
            rows.values.push(column[idx]);
        }
    }
    Ok(rows)
}

fn labeled(data: &DataFrame, group: &ColumnGroup, key: &str, value: &str) -> Result<DataFrame> {
    let rows = fan_out(data, group)?;
    let labels: Vec<&'static str> = group.labels().collect();
    let occasions: Vec<Option<String>> = rows
        .positions
        .iter()
        .map(|&position| labels.get(position).map(|label| (*label).to_string()))
        .collect();
    Ok(DataFrame::new(vec![
        i64_column(PARENT_ID, rows.identifiers),
        string_column(key, occasions),
        i64_column(value, rows.values),
    ])?)
}

/// `(parent_id, trimester, smoke)` with trimesters numbered 1 to 3.
pub fn trimester_smoking_long(data: &DataFrame) -> Result<DataFrame> {
    let rows = fan_out(data, &TRIMESTER_SMOKING)?;
    let trimesters: Vec<Option<i64>> = rows
        .positions
        .iter()
        .map(|&position| i64::try_from(position + 1).ok())
        .collect();
    Ok(DataFrame::new(vec![
        i64_column(PARENT_ID, rows.identifiers),
        i64_column(TRIMESTER, trimesters),
        i64_column(SMOKE, rows.values),
    ])?)
}

/// `(parent_id, visit, smoke)` over the four postpartum visits.
pub fn postpartum_smoking_long(data: &DataFrame) -> Result<DataFrame> {
    labeled(data, &POSTPARTUM_SMOKING, VISIT, SMOKE)
}

/// `(parent_id, age, exposed)` over the six child ages.
pub fn child_exposure_long(data: &DataFrame) -> Result<DataFrame> {
    labeled(data, &CHILD_EXPOSURE, AGE, EXPOSED)
}

/// `(parent_id, race)`, one row per set parent race flag.
///
/// Composite categories are not listed: a dyad with two flags set appears
/// once under each of its two races.
pub fn race_lookup(data: &DataFrame) -> Result<DataFrame> {
    require_stage_columns(data, STAGE, [PARENT_ID])?;
    require_stage_columns(data, STAGE, PARENT_RACE.all())?;

    let identifiers = column_i64(data, PARENT_ID)?;
    let flags = read_race_flags(data, &PARENT_RACE)?;

    let mut ids = Vec::new();
    let mut races = Vec::new();
    for (id, flags) in identifiers.iter().zip(&flags) {
        for race in Race::SINGLE {
            if flags.is_set(race) {
                ids.push(*id);
                races.push(Some(race.as_str().to_string()));
            }
        }
    }
    Ok(DataFrame::new(vec![
        i64_column(PARENT_ID, ids),
        string_column(RACE, races),
    ])?)
}
