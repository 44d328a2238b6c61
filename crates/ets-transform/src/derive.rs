//! Derivation Engine: composite columns built from recoded values.

use std::collections::BTreeMap;
use std::time::Instant;

use ets_common::{column_i64, i64_column, string_column};
use ets_model::columns::{ANY_SUBSTANCE, CHILD_RACE, PARENT_ID, TRACE};
use ets_model::{ChildRaceRule, PipelineOptions, SdpLabel, Substance, TRIMESTER_SMOKING};
use polars::prelude::DataFrame;
use tracing::{debug, info, info_span, trace, warn};

use crate::error::Result;
use crate::frame::{DeriveReport, DerivedFrame, RecodedFrame, require_stage_columns};
use crate::reshape::{SMOKE, TRIMESTER};
use crate::rules::{child_race_rules, read_race_flags};

const STAGE: &str = "derive";

/// SDP label in the labeled trimester table.
pub const SDP: &str = "sdp";
/// Sum of present trimester indicators per dyad.
pub const SDP_SUM: &str = "sdp_sum";
/// 1 when the dyad smoked in every trimester.
pub const SMOKED_THROUGHOUT: &str = "smoked_throughout";

/// Composite substance-use flag.
///
/// 1 if any flag is 1, 0 if at least one flag is present and none is 1,
/// missing when every flag is missing.
pub fn any_substance(flags: impl IntoIterator<Item = Option<i64>>) -> Option<i64> {
    let mut observed = false;
    for flag in flags.into_iter().flatten() {
        if flag == 1 {
            return Some(1);
        }
        observed = true;
    }
    observed.then_some(0)
}

/// Add the child race label (`trace`) and `any_substance`.
pub fn derive(recoded: &RecodedFrame, options: &PipelineOptions) -> Result<DerivedFrame> {
    let span = info_span!("derive", rows = recoded.record_count());
    let _guard = span.enter();
    let start = Instant::now();

    let source = recoded.data();
    require_stage_columns(source, STAGE, [PARENT_ID])?;
    require_stage_columns(source, STAGE, CHILD_RACE.all())?;
    require_stage_columns(
        source,
        STAGE,
        Substance::ALL.iter().map(Substance::ever_column),
    )?;

    let identifiers = column_i64(source, PARENT_ID)?;
    let flags = read_race_flags(source, &CHILD_RACE)?;
    let chosen = child_race_rules(options.child_race_rule);
    let alternate = child_race_rules(match options.child_race_rule {
        ChildRaceRule::Consistent => ChildRaceRule::AsRecorded,
        ChildRaceRule::AsRecorded => ChildRaceRule::Consistent,
    });

    let mut report = DeriveReport::default();
    let mut child_race = Vec::with_capacity(flags.len());
    for (flags, id) in flags.iter().zip(&identifiers) {
        let race = chosen.first_match(flags);
        if race != alternate.first_match(flags)
            && let Some(id) = id
        {
            trace!(
                chosen = ?chosen.matched_rule(flags),
                alternate = ?alternate.matched_rule(flags),
                "child race rules disagree"
            );
            report.child_race_disagreements.push(*id);
        }
        child_race.push(race.map(|race| race.as_str().to_string()));
    }
    if !report.child_race_disagreements.is_empty() {
        warn!(
            rule = ?options.child_race_rule,
            dyads = report.child_race_disagreements.len(),
            "child race depends on the AIAN + White biracial rule"
        );
    }

    let mut ever = Vec::with_capacity(Substance::ALL.len());
    for substance in Substance::ALL {
        ever.push(column_i64(source, substance.ever_column())?);
    }
    let composite: Vec<Option<i64>> = (0..source.height())
        .map(|idx| any_substance(ever.iter().map(|column| column[idx])))
        .collect();
    report.substance_all_missing = composite.iter().filter(|value| value.is_none()).count();
    debug!(
        all_missing = report.substance_all_missing,
        "composite substance flag derived"
    );

    let mut data = source.clone();
    data.with_column(string_column(TRACE, child_race))?;
    data.with_column(i64_column(ANY_SUBSTANCE, composite))?;

    info!(
        disagreements = report.child_race_disagreements.len(),
        duration_ms = start.elapsed().as_millis(),
        "derive complete"
    );
    Ok(DerivedFrame::new(data, report))
}

/// `(parent_id, trimester, sdp)` for every trimester row with an observed
/// smoking indicator.
pub fn label_sdp(trimester_long: &DataFrame) -> Result<DataFrame> {
    require_stage_columns(trimester_long, STAGE, [PARENT_ID, TRIMESTER, SMOKE])?;
    let identifiers = column_i64(trimester_long, PARENT_ID)?;
    let trimesters = column_i64(trimester_long, TRIMESTER)?;
    let smoke = column_i64(trimester_long, SMOKE)?;

    let mut ids = Vec::new();
    let mut occasions = Vec::new();
    let mut labels = Vec::new();
    for idx in 0..trimester_long.height() {
        let Some(indicator) = smoke[idx] else { continue };
        ids.push(identifiers[idx]);
        occasions.push(trimesters[idx]);
        labels.push(Some(SdpLabel::from_indicator(indicator).as_str().to_string()));
    }
    Ok(DataFrame::new(vec![
        i64_column(PARENT_ID, ids),
        i64_column(TRIMESTER, occasions),
        string_column(SDP, labels),
    ])?)
}

/// Smoking-through-pregnancy summary.
#[derive(Debug, Clone)]
pub struct SmokingPersistence {
    /// `(parent_id, sdp_sum, smoked_throughout)` for dyads with any SDP row.
    pub per_dyad: DataFrame,
    pub n_sdp: usize,
    pub n_throughout: usize,
}

impl SmokingPersistence {
    /// Fraction of SDP dyads that smoked in every trimester; `None` when no
    /// dyad reported smoking.
    pub fn rate(&self) -> Option<f64> {
        (self.n_sdp > 0).then(|| self.n_throughout as f64 / self.n_sdp as f64)
    }
}

/// Sum each dyad's present trimester indicators and flag those that reach
/// the full trimester count. A missing trimester can never be made up.
pub fn smoking_persistence(trimester_long: &DataFrame) -> Result<SmokingPersistence> {
    require_stage_columns(trimester_long, STAGE, [PARENT_ID, SMOKE])?;
    let identifiers = column_i64(trimester_long, PARENT_ID)?;
    let smoke = column_i64(trimester_long, SMOKE)?;
    let trimesters = i64::try_from(TRIMESTER_SMOKING.columns.len()).unwrap_or(i64::MAX);

    // id -> (indicator sum, any SDP row)
    let mut per_id: BTreeMap<i64, (i64, bool)> = BTreeMap::new();
    for (id, indicator) in identifiers.iter().zip(&smoke) {
        let (Some(id), Some(indicator)) = (id, indicator) else {
            continue;
        };
        let entry = per_id.entry(*id).or_default();
        entry.0 += indicator;
        entry.1 |= *indicator == 1;
    }

    let mut ids = Vec::new();
    let mut sums = Vec::new();
    let mut throughout = Vec::new();
    for (id, (sum, any_sdp)) in per_id {
        if !any_sdp {
            continue;
        }
        ids.push(Some(id));
        sums.push(Some(sum));
        throughout.push(Some(i64::from(sum == trimesters)));
    }
    let n_sdp = ids.len();
    let n_throughout = throughout.iter().filter(|flag| **flag == Some(1)).count();

    Ok(SmokingPersistence {
        per_dyad: DataFrame::new(vec![
            i64_column(PARENT_ID, ids),
            i64_column(SDP_SUM, sums),
            i64_column(SMOKED_THROUGHOUT, throughout),
        ])?,
        n_sdp,
        n_throughout,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use polars::prelude::Column;
    use proptest::prelude::*;

    fn trimester_long(rows: &[(i64, i64, Option<i64>)]) -> DataFrame {
        DataFrame::new(vec![
            Column::new(
                PARENT_ID.into(),
                rows.iter().map(|row| row.0).collect::<Vec<_>>(),
            ),
            Column::new(
                TRIMESTER.into(),
                rows.iter().map(|row| row.1).collect::<Vec<_>>(),
            ),
            Column::new(SMOKE.into(), rows.iter().map(|row| row.2).collect::<Vec<_>>()),
        ])
        .unwrap()
    }

    #[test]
    fn any_substance_distinguishes_all_missing() {
        assert_eq!(any_substance([Some(0), None, Some(1), None]), Some(1));
        assert_eq!(any_substance([Some(0), None, None, None]), Some(0));
        assert_eq!(any_substance([None, None, None, None]), None);
    }

    #[test]
    fn persistence_rate_counts_exact_three() {
        // sums 3, 3, 2, 1
        let df = trimester_long(&[
            (1, 1, Some(1)),
            (1, 2, Some(1)),
            (1, 3, Some(1)),
            (2, 1, Some(1)),
            (2, 2, Some(1)),
            (2, 3, Some(1)),
            (3, 1, Some(1)),
            (3, 2, Some(1)),
            (3, 3, Some(0)),
            (4, 1, Some(1)),
            (4, 2, Some(0)),
            (4, 3, Some(0)),
        ]);
        let persistence = smoking_persistence(&df).unwrap();
        assert_eq!(persistence.n_sdp, 4);
        assert_eq!(persistence.n_throughout, 2);
        assert_eq!(persistence.rate(), Some(0.5));
    }

    #[test]
    fn missing_trimester_is_not_smoked_throughout() {
        let df = trimester_long(&[(1, 1, Some(1)), (1, 2, Some(1)), (1, 3, None)]);
        let persistence = smoking_persistence(&df).unwrap();
        assert_eq!(persistence.n_sdp, 1);
        assert_eq!(persistence.n_throughout, 0);
    }

    #[test]
    fn persistence_rate_is_missing_without_sdp() {
        let df = trimester_long(&[(1, 1, Some(0)), (1, 2, None), (1, 3, Some(0))]);
        let persistence = smoking_persistence(&df).unwrap();
        assert_eq!(persistence.n_sdp, 0);
        assert_eq!(persistence.rate(), None);
    }

    #[test]
    fn sdp_labels_skip_missing_indicators() {
        let df = trimester_long(&[(1, 1, Some(1)), (1, 2, None), (1, 3, Some(0))]);
        let labeled = label_sdp(&df).unwrap();
        assert_eq!(labeled.height(), 2);
        let labels = labeled.column(SDP).unwrap().str().unwrap();
        assert_eq!(labels.get(0), Some("SDP"));
        assert_eq!(labels.get(1), Some("No SDP"));
    }

    proptest! {
        #[test]
        fn any_substance_is_one_iff_a_flag_is_one(
            flags in proptest::collection::vec(proptest::option::of(0i64..=1), 4)
        ) {
            let result = any_substance(flags.iter().copied());
            prop_assert_eq!(result == Some(1), flags.contains(&Some(1)));
            prop_assert_eq!(result.is_none(), flags.iter().all(Option::is_none));
        }
    }
}
