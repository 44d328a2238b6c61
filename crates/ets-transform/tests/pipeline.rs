//! Tests for derivation and the full transformation pipeline.

mod common;

use common::{dyad, frame, with};
use ets_common::{column_i64, column_strings};
use ets_model::{ChildRaceRule, PipelineOptions};
use ets_transform::{RawFrame, derive, recode, transform_dyads};

#[test]
fn test_child_race_rule_choice() {
    let rows = [
        with(dyad(1), &[("taian", "1"), ("twhite", "1")]),
        with(dyad(2), &[("taian", "1"), ("tnhpi", "1"), ("twhite", "0")]),
        dyad(3),
    ];
    let raw = RawFrame::new(frame(&rows));

    let consistent = PipelineOptions::default();
    let recoded = recode(&raw, &consistent).unwrap();
    let derived = derive(&recoded, &consistent).unwrap();
    let race = column_strings(derived.data(), "trace").unwrap();
    assert_eq!(race[0].as_deref(), Some("Biracial"));
    assert_eq!(race[1].as_deref(), Some("Biracial"));
    assert_eq!(race[2].as_deref(), Some("White"));
    assert_eq!(derived.report().child_race_disagreements, vec![1]);

    let recorded = PipelineOptions::default().with_child_race_rule(ChildRaceRule::AsRecorded);
    let derived = derive(&recode(&raw, &recorded).unwrap(), &recorded).unwrap();
    let race = column_strings(derived.data(), "trace").unwrap();
    assert_eq!(race[0].as_deref(), Some("American Indian/Alaska Native"));
    assert_eq!(race[1].as_deref(), Some("Biracial"));
    assert_eq!(derived.report().child_race_disagreements, vec![1]);
}

#[test]
fn test_any_substance_missing_policy() {
    let rows = [
        with(dyad(1), &[("mj_ever", "1")]),
        dyad(2),
        with(
            dyad(3),
            &[("alc_ever", ""), ("cig_ever", ""), ("e_cig_ever", ""), ("mj_ever", "")],
        ),
    ];
    let options = PipelineOptions::default();
    let raw = RawFrame::new(frame(&rows));
    let derived = derive(&recode(&raw, &options).unwrap(), &options).unwrap();
    assert_eq!(
        column_i64(derived.data(), "any_substance").unwrap(),
        vec![Some(1), Some(0), None]
    );
    assert_eq!(derived.report().substance_all_missing, 1);
}

#[test]
fn test_transform_builds_long_views() {
    let rows = [
        with(
            dyad(1),
            &[
                ("paian", "1"),
                ("mom_smoke_16wk", "1=Yes"),
                ("mom_smoke_22wk", "1=Yes"),
                ("mom_smoke_32wk", "1=Yes"),
            ],
        ),
        with(dyad(2), &[("mom_smoke_22wk", ""), ("smoke_exposure_2yr", "1")]),
    ];
    let study = transform_dyads(&RawFrame::new(frame(&rows)), &PipelineOptions::default()).unwrap();

    assert_eq!(study.trimester_smoking.height(), 2 * 3);
    assert_eq!(study.postpartum_smoking.height(), 2 * 4);
    assert_eq!(study.child_exposure.height(), 2 * 6);
    // the missing 22-week indicator has no SDP row
    assert_eq!(study.sdp_labels.height(), 5);

    // dyad 1 has AIAN and White flags: one lookup row per flag
    let ids = column_i64(&study.race_lookup, "parent_id").unwrap();
    let races = column_strings(&study.race_lookup, "race").unwrap();
    assert_eq!(ids, vec![Some(1), Some(1), Some(2)]);
    assert_eq!(races[0].as_deref(), Some("American Indian/Alaska Native"));
    assert_eq!(races[1].as_deref(), Some("White"));

    assert_eq!(study.persistence.n_sdp, 1);
    assert_eq!(study.persistence.rate(), Some(1.0));
    assert_eq!(study.recode_report.rows, 2);
}

#[test]
fn test_derived_identifiers_are_subset_of_input() {
    let rows = [dyad(11), with(dyad(12), &[("pwhite", "0")])];
    let study = transform_dyads(&RawFrame::new(frame(&rows)), &PipelineOptions::default()).unwrap();
    for table in [
        &study.race_lookup,
        &study.trimester_smoking,
        &study.postpartum_smoking,
        &study.child_exposure,
        &study.sdp_labels,
    ] {
        for id in column_i64(table, "parent_id").unwrap() {
            assert!(matches!(id, Some(11) | Some(12)));
        }
    }
    // dyad 12 has no race flag set
    assert_eq!(study.race_lookup.height(), 1);
}
