//! End-to-end runs over a dyad file on disk.

use std::collections::BTreeMap;

use ets_cli::output::{write_csv, write_json};
use ets_cli::pipeline::run_analysis;
use ets_model::{PipelineOptions, required_columns};
use ets_report::TableName;
use tempfile::NamedTempFile;

fn dyad(id: i64, smoking: [&str; 3]) -> BTreeMap<&'static str, String> {
    let mut row: BTreeMap<&'static str, String> = required_columns()
        .into_iter()
        .map(|name| (name, "0".to_string()))
        .collect();
    row.insert("parent_id", id.to_string());
    row.insert("pwhite", "1".to_string());
    row.insert("twhite", "1".to_string());
    row.insert("income", "250, 000".to_string());
    for name in ["mom_smoke_pp1", "mom_smoke_pp2", "mom_smoke_pp12wk", "mom_smoke_pp6mo"] {
        row.insert(name, "2=No".to_string());
    }
    for (name, value) in ["mom_smoke_16wk", "mom_smoke_22wk", "mom_smoke_32wk"]
        .into_iter()
        .zip(smoking)
    {
        row.insert(name, value.to_string());
    }
    row.insert("cotimean_34wk", "150".to_string());
    row.insert("cotimean_pp6mo", "20".to_string());
    row
}

fn write_dyads(rows: &[BTreeMap<&'static str, String>]) -> NamedTempFile {
    let file = NamedTempFile::new().unwrap();
    let mut writer = csv::Writer::from_path(file.path()).unwrap();
    writer.write_record(required_columns()).unwrap();
    for row in rows {
        writer
            .write_record(required_columns().into_iter().map(|name| row[name].as_str()))
            .unwrap();
    }
    writer.flush().unwrap();
    file
}

fn study_file() -> NamedTempFile {
    write_dyads(&[
        dyad(1, ["1=Yes", "1=Yes", "1=Yes"]),
        dyad(2, ["1=Yes", "2=No", "2=No"]),
        dyad(3, ["2=No", "2=No", "2=No"]),
    ])
}

#[test]
fn runs_every_table_by_default() {
    let file = study_file();
    let run = run_analysis(file.path(), &PipelineOptions::default(), &[]).unwrap();

    assert_eq!(run.rows, 3);
    assert_eq!(run.tables.len(), TableName::ALL.len());
    assert_eq!(run.smoking_throughout_rate, Some(0.5));
    assert_eq!(run.recode.corrected, 0);
    assert!(run.derive.child_race_disagreements.is_empty());
}

#[test]
fn csv_output_prints_selected_tables() {
    let file = study_file();
    let run = run_analysis(
        file.path(),
        &PipelineOptions::default(),
        &[TableName::SmokingPersistence],
    )
    .unwrap();

    let mut buffer = Vec::new();
    write_csv(&run.tables, &mut buffer).unwrap();
    let text = String::from_utf8(buffer).unwrap();
    assert_eq!(
        text,
        "# smoking_persistence\nn_sdp,n_throughout,rate\n2,1,0.5\n"
    );
}

#[test]
fn json_output_carries_table_metadata() {
    let file = study_file();
    let run = run_analysis(
        file.path(),
        &PipelineOptions::default(),
        &[TableName::TrimesterSmokingByRace, TableName::SmokingPersistence],
    )
    .unwrap();

    let mut buffer = Vec::new();
    write_json(&run.tables, &mut buffer).unwrap();
    let report: serde_json::Value = serde_json::from_slice(&buffer).unwrap();
    let tables = report["tables"].as_array().unwrap();
    assert_eq!(tables.len(), 2);
    assert_eq!(tables[0]["name"], "trimester_smoking_by_race");
    assert_eq!(tables[0]["zero_policy"], "DropZero");
    assert_eq!(tables[0]["columns"], serde_json::json!(["race", "trimester", "n"]));
    // White smokers: trimester 1 has two, trimesters 2 and 3 one each
    assert_eq!(
        tables[0]["rows"],
        serde_json::json!([["White", 1, 2], ["White", 2, 1], ["White", 3, 1]])
    );
    assert_eq!(tables[1]["rows"], serde_json::json!([[2, 1, 0.5]]));
}

#[test]
fn missing_column_stops_the_run() {
    let file = NamedTempFile::new().unwrap();
    let mut writer = csv::Writer::from_path(file.path()).unwrap();
    writer.write_record(["parent_id", "paian"]).unwrap();
    writer.write_record(["1", "0"]).unwrap();
    writer.flush().unwrap();

    let error = run_analysis(file.path(), &PipelineOptions::default(), &[]).unwrap_err();
    let message = format!("{error:#}");
    assert!(message.contains("load dyad file"));
}
