//! Race-stratified indicator counts over the long views.
//!
//! Each long row is joined to every race of its identifier, and the
//! indicator is summed per (race, occasion). Groups whose sum is zero are
//! dropped.

use std::collections::BTreeMap;

use ets_common::{column_i64, column_strings, i64_column, string_column};
use ets_model::columns::PARENT_ID;
use ets_model::{CHILD_EXPOSURE, ColumnGroup, POSTPARTUM_SMOKING, Race};
use ets_transform::reshape::{AGE, EXPOSED, RACE, SMOKE, TRIMESTER, VISIT};
use polars::prelude::{Column, DataFrame};

use crate::error::{ReportError, Result};
use crate::join::RaceIndex;
use crate::table::{N, TableName, require};

/// Sum `values` per (race, key) through the race index, then drop zeros.
pub fn indicator_sums_by_race<K: Ord + Copy>(
    index: &RaceIndex,
    identifiers: &[Option<i64>],
    keys: &[Option<K>],
    values: &[Option<i64>],
) -> BTreeMap<(Race, K), i64> {
    let mut sums: BTreeMap<(Race, K), i64> = BTreeMap::new();
    for ((id, key), value) in identifiers.iter().zip(keys).zip(values) {
        let (Some(key), Some(value)) = (key, value) else {
            continue;
        };
        for race in index.races(*id) {
            *sums.entry((*race, *key)).or_default() += value;
        }
    }
    sums.retain(|_, sum| *sum != 0);
    sums
}

/// Lay out `(race, key) -> n` sums as race, key and `n` columns.
fn race_count_frame<K, V>(
    sums: BTreeMap<(Race, K), i64>,
    key_value: impl Fn(K) -> Option<V>,
    key_column: impl FnOnce(Vec<Option<V>>) -> Column,
) -> Result<DataFrame> {
    let mut races = Vec::with_capacity(sums.len());
    let mut keys = Vec::with_capacity(sums.len());
    let mut counts = Vec::with_capacity(sums.len());
    for ((race, key), sum) in sums {
        races.push(Some(race.as_str().to_string()));
        keys.push(key_value(key));
        counts.push(Some(sum));
    }
    Ok(DataFrame::new(vec![
        string_column(RACE, races),
        key_column(keys),
        i64_column(N, counts),
    ])?)
}

/// Count SDP rows per (race, trimester).
pub fn trimester_smoking_by_race(
    index: &RaceIndex,
    trimester_long: &DataFrame,
) -> Result<DataFrame> {
    require(
        trimester_long,
        TableName::TrimesterSmokingByRace,
        [PARENT_ID, TRIMESTER, SMOKE],
    )?;
    let identifiers = column_i64(trimester_long, PARENT_ID)?;
    let trimesters = column_i64(trimester_long, TRIMESTER)?;
    let smoke = column_i64(trimester_long, SMOKE)?;

    let sums = indicator_sums_by_race(index, &identifiers, &trimesters, &smoke);
    race_count_frame(sums, Some, |keys| i64_column(TRIMESTER, keys))
}

/// Sum a labeled long view per (race, occasion) in the group's column order.
fn labeled_by_race(
    index: &RaceIndex,
    long: &DataFrame,
    table: TableName,
    group: &ColumnGroup,
    key: &'static str,
    value: &str,
) -> Result<DataFrame> {
    require(long, table, [PARENT_ID, key, value])?;
    let identifiers = column_i64(long, PARENT_ID)?;
    let values = column_i64(long, value)?;
    let positions = column_strings(long, key)?
        .into_iter()
        .map(|label| match label {
            None => Ok(None),
            Some(label) => group
                .position(&label)
                .map(Some)
                .ok_or(ReportError::UnknownCategory { column: key, value: label }),
        })
        .collect::<Result<Vec<Option<usize>>>>()?;

    let labels: Vec<&'static str> = group.labels().collect();
    let sums = indicator_sums_by_race(index, &identifiers, &positions, &values);
    race_count_frame(
        sums,
        |position| labels.get(position).map(|label| (*label).to_string()),
        |keys| string_column(key, keys),
    )
}

/// Count postpartum smoking per (race, visit).
pub fn postpartum_smoking_by_race(
    index: &RaceIndex,
    postpartum_long: &DataFrame,
) -> Result<DataFrame> {
    labeled_by_race(
        index,
        postpartum_long,
        TableName::PostpartumSmokingByRace,
        &POSTPARTUM_SMOKING,
        VISIT,
        SMOKE,
    )
}

/// Count exposed children per (race, age).
pub fn child_exposure_by_race(index: &RaceIndex, exposure_long: &DataFrame) -> Result<DataFrame> {
    labeled_by_race(
        index,
        exposure_long,
        TableName::ChildExposureByRace,
        &CHILD_EXPOSURE,
        AGE,
        EXPOSED,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn index() -> RaceIndex {
        let lookup = DataFrame::new(vec![
            Column::new(PARENT_ID.into(), [1i64, 1, 2]),
            Column::new(
                RACE.into(),
                ["American Indian/Alaska Native", "White", "White"],
            ),
        ])
        .unwrap();
        RaceIndex::from_lookup(&lookup).unwrap()
    }

    #[test]
    fn biracial_rows_count_under_both_races() {
        let identifiers = [Some(1), Some(2)];
        let keys = [Some(1i64), Some(1)];
        let values = [Some(1), Some(1)];
        let sums = indicator_sums_by_race(&index(), &identifiers, &keys, &values);
        assert_eq!(sums.get(&(Race::AmericanIndianAlaskaNative, 1)), Some(&1));
        assert_eq!(sums.get(&(Race::White, 1)), Some(&2));
        // identifier 1 contributes twice across races
        assert_eq!(sums.values().sum::<i64>(), 3);
    }

    #[test]
    fn zero_groups_are_dropped() {
        let identifiers = [Some(1), Some(2), Some(2)];
        let keys = [Some(1i64), Some(2), Some(3)];
        let values = [Some(0), Some(1), None];
        let sums = indicator_sums_by_race(&index(), &identifiers, &keys, &values);
        assert_eq!(sums.len(), 1);
        assert_eq!(sums.get(&(Race::White, 2)), Some(&1));
    }

    #[test]
    fn trimesters_stay_integer_keys() {
        let long = DataFrame::new(vec![
            Column::new(PARENT_ID.into(), [1i64, 1, 2, 2]),
            Column::new(TRIMESTER.into(), [3i64, 1, 1, 2]),
            Column::new(SMOKE.into(), [1i64, 1, 1, 0]),
        ])
        .unwrap();
        let table = trimester_smoking_by_race(&index(), &long).unwrap();
        let columns: Vec<&str> = table
            .get_column_names()
            .into_iter()
            .map(|name| name.as_str())
            .collect();
        assert_eq!(columns, [RACE, TRIMESTER, N]);

        let races = table.column(RACE).unwrap().str().unwrap();
        let trimesters = table.column(TRIMESTER).unwrap().i64().unwrap();
        let n = table.column(N).unwrap().i64().unwrap();
        // identifier 2 trimester 2 sums to zero and is dropped
        assert_eq!(table.height(), 4);
        assert_eq!(races.get(0), Some("American Indian/Alaska Native"));
        assert_eq!(trimesters.get(0), Some(1));
        assert_eq!(trimesters.get(1), Some(3));
        assert_eq!(races.get(2), Some("White"));
        assert_eq!(trimesters.get(2), Some(1));
        assert_eq!(n.get(2), Some(2));
        assert_eq!(trimesters.get(3), Some(3));
    }

    #[test]
    fn visits_keep_column_order() {
        let long = DataFrame::new(vec![
            Column::new(PARENT_ID.into(), [2i64, 2, 2]),
            Column::new(VISIT.into(), ["pp6mo", "pp1", "pp12wk"]),
            Column::new(SMOKE.into(), [1i64, 1, 1]),
        ])
        .unwrap();
        let table = postpartum_smoking_by_race(&index(), &long).unwrap();
        let visits = table.column(VISIT).unwrap().str().unwrap();
        assert_eq!(visits.get(0), Some("pp1"));
        assert_eq!(visits.get(1), Some("pp12wk"));
        assert_eq!(visits.get(2), Some("pp6mo"));
    }
}
