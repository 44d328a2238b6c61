//! End-to-end tests for the result tables.

mod common;

use std::collections::BTreeMap;

use common::{dyad, frame, with};
use ets_model::PipelineOptions;
use ets_report::{AnalysisTables, TableName, ZeroPolicy, build_tables};
use ets_transform::{RawFrame, transform_dyads};
use polars::prelude::DataFrame;

type Row = BTreeMap<&'static str, String>;

fn tables(rows: &[Row]) -> AnalysisTables {
    let study = transform_dyads(&RawFrame::new(frame(rows)), &PipelineOptions::default()).unwrap();
    build_tables(&study).unwrap()
}

fn table(tables: &AnalysisTables, name: TableName) -> DataFrame {
    tables.get(name).unwrap().data.clone()
}

fn smoked_all_trimesters(row: Row) -> Row {
    with(
        row,
        &[
            ("mom_smoke_16wk", "1=Yes"),
            ("mom_smoke_22wk", "1=Yes"),
            ("mom_smoke_32wk", "1=Yes"),
        ],
    )
}

#[test]
fn test_all_tables_built_in_order() {
    let tables = tables(&[dyad(1), dyad(2)]);
    let names: Vec<TableName> = tables.tables().iter().map(|table| table.name).collect();
    assert_eq!(names, TableName::ALL.to_vec());
    assert_eq!(
        tables.get(TableName::ChildExposureByRace).unwrap().zero_policy(),
        ZeroPolicy::DropZero
    );
}

#[test]
fn test_demographics_sorted_by_frequency() {
    let rows = [
        with(dyad(1), &[("psex", "0")]),
        with(dyad(2), &[("psex", "1")]),
        with(dyad(3), &[("psex", "1")]),
        with(dyad(4), &[("psex", "")]),
    ];
    let demographics = table(&tables(&rows), TableName::Demographics);
    let characteristic = demographics.column("characteristic").unwrap().str().unwrap();
    let category = demographics.column("category").unwrap().str().unwrap();
    let n = demographics.column("n").unwrap().i64().unwrap();
    let percent = demographics.column("percent").unwrap().f64().unwrap();

    let sex_rows: Vec<usize> = (0..demographics.height())
        .filter(|idx| characteristic.get(*idx) == Some("Sex"))
        .collect();
    assert_eq!(sex_rows.len(), 3);
    assert_eq!(category.get(sex_rows[0]), Some("F"));
    assert_eq!(n.get(sex_rows[0]), Some(2));
    assert_eq!(percent.get(sex_rows[0]), Some(50.0));
    assert_eq!(category.get(sex_rows[1]), Some("M"));
    // missing forms its own category, last among equal counts
    assert_eq!(category.get(sex_rows[2]), None);
    assert_eq!(n.get(sex_rows[2]), Some(1));
}

#[test]
fn test_biracial_dyad_fans_out_and_zero_groups_drop() {
    let rows = [
        smoked_all_trimesters(with(dyad(1), &[("paian", "1")])),
        with(dyad(2), &[("pwhite", "0"), ("pblack", "1")]),
    ];
    let trimester = table(&tables(&rows), TableName::TrimesterSmokingByRace);
    // AIAN and White x 3 trimesters; Black never smoked so has no rows
    assert_eq!(trimester.height(), 6);
    let race = trimester.column("race").unwrap().str().unwrap();
    let n = trimester.column("n").unwrap().i64().unwrap();
    assert_eq!(race.get(0), Some("American Indian/Alaska Native"));
    assert_eq!(race.get(3), Some("White"));
    assert!((0..trimester.height()).all(|idx| n.get(idx) == Some(1)));
    assert!((0..trimester.height()).all(|idx| race.get(idx) != Some("Black")));
}

#[test]
fn test_swan_groups_retained_with_null_mean() {
    // 50502 is in the correction set, so both SWAN scores are missing
    let rows = [smoked_all_trimesters(dyad(50502))];
    let swan = table(&tables(&rows), TableName::SwanBySdpRace);
    assert_eq!(swan.height(), 3);
    let mean = swan.column("mean_swan_inattentive").unwrap().f64().unwrap();
    assert_eq!(mean.null_count(), 3);
    let n = swan.column("n").unwrap().i64().unwrap();
    assert_eq!(n.get(0), Some(1));
}

#[test]
fn test_persistence_rate() {
    let rows = [
        smoked_all_trimesters(dyad(1)),
        smoked_all_trimesters(dyad(2)),
        with(dyad(3), &[("mom_smoke_16wk", "1=Yes"), ("mom_smoke_22wk", "1=Yes")]),
        with(dyad(4), &[("mom_smoke_32wk", "1=Yes")]),
        dyad(5),
    ];
    let persistence = table(&tables(&rows), TableName::SmokingPersistence);
    assert_eq!(persistence.column("n_sdp").unwrap().i64().unwrap().get(0), Some(4));
    assert_eq!(
        persistence.column("n_throughout").unwrap().i64().unwrap().get(0),
        Some(2)
    );
    assert_eq!(persistence.column("rate").unwrap().f64().unwrap().get(0), Some(0.5));
}

#[test]
fn test_substance_tables() {
    let rows = [
        with(dyad(1), &[("alc_ever", "1"), ("num_alc_30", "4")]),
        with(dyad(2), &[("alc_ever", ""), ("num_alc_30", "")]),
        with(dyad(3), &[("num_alc_30", "2")]),
    ];
    let tables = tables(&rows);

    let medium = table(&tables, TableName::SubstanceUseByMedium);
    let n = medium.column("n").unwrap().i64().unwrap();
    let percent = medium.column("percent").unwrap().f64().unwrap();
    assert_eq!(n.get(0), Some(2));
    assert_eq!(percent.get(0), Some(50.0));

    let days = table(&tables, TableName::AverageDaysUsed);
    let mean = days.column("mean_days").unwrap().f64().unwrap();
    assert_eq!(mean.get(0), Some(3.0));
}

#[test]
fn test_unreached_exposure_levels_have_no_rows() {
    // cotinine 12.5 and 8: both dyads are nonsmokers at both occasions
    let tables = tables(&[dyad(1), dyad(2)]);

    let levels = table(&tables, TableName::CotinineSmokingLevel);
    assert_eq!(levels.height(), 2);
    let level = levels.column("level").unwrap().str().unwrap();
    let n = levels.column("n").unwrap().i64().unwrap();
    for row in 0..levels.height() {
        assert_eq!(level.get(row), Some("nonsmoker"));
        assert_eq!(n.get(row), Some(2));
    }

    let by_exposure = table(&tables, TableName::SubstanceUseByExposure);
    assert_eq!(by_exposure.height(), 2);
    let n = by_exposure.column("n").unwrap().i64().unwrap();
    assert!(n.into_iter().all(|count| count != Some(0)));
}

#[test]
fn test_select_keeps_requested_tables() {
    let selected = tables(&[dyad(1)]).select(&[TableName::Demographics, TableName::BpmBySdpRace]);
    assert_eq!(selected.len(), 2);
    assert!(selected.get(TableName::FinancialEducation).is_none());
}
