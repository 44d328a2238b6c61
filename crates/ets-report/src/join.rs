//! Race lookup join.
//!
//! The lookup is many-to-many: an identifier with two race flags set has two
//! races, and every row joined through it contributes to both.

use std::collections::BTreeMap;

use ets_common::{column_i64, column_strings};
use ets_model::Race;
use ets_model::columns::PARENT_ID;
use ets_transform::reshape::RACE;
use polars::prelude::DataFrame;

use crate::error::{ReportError, Result};

#[derive(Debug, Clone, Default)]
pub struct RaceIndex {
    races: BTreeMap<i64, Vec<Race>>,
}

impl RaceIndex {
    /// Index a `(parent_id, race)` lookup table.
    pub fn from_lookup(lookup: &DataFrame) -> Result<Self> {
        let identifiers = column_i64(lookup, PARENT_ID)?;
        let labels = column_strings(lookup, RACE)?;
        let mut races: BTreeMap<i64, Vec<Race>> = BTreeMap::new();
        for (id, label) in identifiers.into_iter().zip(labels) {
            let (Some(id), Some(label)) = (id, label) else {
                continue;
            };
            let race = Race::from_label(&label).ok_or_else(|| ReportError::UnknownCategory {
                column: RACE,
                value: label.clone(),
            })?;
            let entry = races.entry(id).or_default();
            if !entry.contains(&race) {
                entry.push(race);
            }
        }
        Ok(Self { races })
    }

    /// Races of `id`; empty when the identifier has no race flag.
    pub fn races(&self, id: Option<i64>) -> &[Race] {
        id.and_then(|id| self.races.get(&id))
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    pub fn identifier_count(&self) -> usize {
        self.races.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use polars::prelude::Column;

    #[test]
    fn biracial_identifier_has_both_races() {
        let lookup = DataFrame::new(vec![
            Column::new(PARENT_ID.into(), [1i64, 1, 2]),
            Column::new(
                RACE.into(),
                ["American Indian/Alaska Native", "White", "Black"],
            ),
        ])
        .unwrap();
        let index = RaceIndex::from_lookup(&lookup).unwrap();
        assert_eq!(
            index.races(Some(1)),
            &[Race::AmericanIndianAlaskaNative, Race::White]
        );
        assert_eq!(index.races(Some(3)), &[] as &[Race]);
        assert_eq!(index.races(None), &[] as &[Race]);
        assert_eq!(index.identifier_count(), 2);
    }

    #[test]
    fn unknown_label_is_rejected() {
        let lookup = DataFrame::new(vec![
            Column::new(PARENT_ID.into(), [1i64]),
            Column::new(RACE.into(), ["Martian"]),
        ])
        .unwrap();
        assert!(matches!(
            RaceIndex::from_lookup(&lookup),
            Err(ReportError::UnknownCategory { .. })
        ));
    }
}
