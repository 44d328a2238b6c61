//! Behavioral inventory scores by SDP label, trimester and race.
//!
//! Unlike the race count tables, every (race, sdp, trimester) group that
//! occurs is kept, and a score with no observed value has a null mean.

use std::cmp::Reverse;
use std::collections::BTreeMap;

use ets_common::{column_f64, column_i64, column_strings, f64_column, i64_column, string_column};
use ets_model::columns::PARENT_ID;
use ets_model::{Inventory, Race, SdpLabel};
use ets_transform::derive::SDP;
use ets_transform::reshape::{RACE, TRIMESTER};
use polars::prelude::DataFrame;

use crate::error::{ReportError, Result};
use crate::join::RaceIndex;
use crate::stats::{count_i64, mean};
use crate::table::{N, TableName, require};

/// Output column holding the mean of `score`.
pub fn mean_column(score: &str) -> String {
    format!("mean_{score}")
}

fn table_name(inventory: Inventory) -> TableName {
    match inventory {
        Inventory::Swan => TableName::SwanBySdpRace,
        Inventory::Bpm => TableName::BpmBySdpRace,
    }
}

/// Sort key: SDP before No SDP, then trimester ascending, then race.
type GroupKey = (Reverse<SdpLabel>, i64, Race);

/// Mean inventory scores per (race, sdp, trimester).
///
/// `sdp_labels` is the labeled trimester table; scores are looked up on
/// `dyads` by `parent_id`.
pub fn scores_by_sdp_race(
    inventory: Inventory,
    index: &RaceIndex,
    sdp_labels: &DataFrame,
    dyads: &DataFrame,
) -> Result<DataFrame> {
    let table = table_name(inventory);
    let scores = inventory.score_columns();
    require(sdp_labels, table, [PARENT_ID, TRIMESTER, SDP])?;
    require(dyads, table, [PARENT_ID])?;
    require(dyads, table, scores.iter().copied())?;

    let dyad_ids = column_i64(dyads, PARENT_ID)?;
    let mut score_values = Vec::with_capacity(scores.len());
    for score in scores {
        score_values.push(column_f64(dyads, score)?);
    }
    let mut by_id: BTreeMap<i64, usize> = BTreeMap::new();
    for (row, id) in dyad_ids.iter().enumerate() {
        if let Some(id) = id {
            by_id.entry(*id).or_insert(row);
        }
    }

    let identifiers = column_i64(sdp_labels, PARENT_ID)?;
    let trimesters = column_i64(sdp_labels, TRIMESTER)?;
    let labels = column_strings(sdp_labels, SDP)?;

    // group -> one score vector per inventory column
    let mut groups: BTreeMap<GroupKey, Vec<Vec<Option<f64>>>> = BTreeMap::new();
    for ((id, trimester), label) in identifiers.iter().zip(&trimesters).zip(labels) {
        let (Some(id), Some(trimester), Some(label)) = (id, trimester, label) else {
            continue;
        };
        let sdp = SdpLabel::from_label(&label).ok_or(ReportError::UnknownCategory {
            column: SDP,
            value: label,
        })?;
        let row = by_id.get(id).copied();
        for race in index.races(Some(*id)) {
            let entry = groups
                .entry((Reverse(sdp), *trimester, *race))
                .or_insert_with(|| vec![Vec::new(); scores.len()]);
            for (slot, values) in entry.iter_mut().enumerate() {
                values.push(row.and_then(|row| score_values[slot][row]));
            }
        }
    }

    let mut races = Vec::with_capacity(groups.len());
    let mut sdp_column = Vec::with_capacity(groups.len());
    let mut trimester_column = Vec::with_capacity(groups.len());
    let mut counts = Vec::with_capacity(groups.len());
    let mut means: Vec<Vec<Option<f64>>> = vec![Vec::with_capacity(groups.len()); scores.len()];
    for ((Reverse(sdp), trimester, race), values) in groups {
        races.push(Some(race.as_str().to_string()));
        sdp_column.push(Some(sdp.as_str().to_string()));
        trimester_column.push(Some(trimester));
        counts.push(count_i64(values.first().map_or(0, Vec::len)));
        for (slot, column) in values.into_iter().enumerate() {
            means[slot].push(mean(column));
        }
    }

    let mut columns = vec![
        string_column(RACE, races),
        string_column(SDP, sdp_column),
        i64_column(TRIMESTER, trimester_column),
        i64_column(N, counts),
    ];
    for (score, values) in scores.iter().zip(means) {
        columns.push(f64_column(&mean_column(score), values));
    }
    Ok(DataFrame::new(columns)?)
}

pub fn swan_by_sdp_race(
    index: &RaceIndex,
    sdp_labels: &DataFrame,
    dyads: &DataFrame,
) -> Result<DataFrame> {
    scores_by_sdp_race(Inventory::Swan, index, sdp_labels, dyads)
}

pub fn bpm_by_sdp_race(
    index: &RaceIndex,
    sdp_labels: &DataFrame,
    dyads: &DataFrame,
) -> Result<DataFrame> {
    scores_by_sdp_race(Inventory::Bpm, index, sdp_labels, dyads)
}
