use std::fs;
use std::io::{self, Write};
use std::path::Path;

use anyhow::{Context, Result};
use comfy_table::Table;
use ets_cli::output::{write_csv, write_json};
use ets_cli::pipeline::run_analysis;
use ets_model::{ChildRaceRule, PipelineOptions};
use ets_report::{TableName, ZeroPolicy};

use crate::cli::{ChildRaceRuleArg, OutputFormatArg, RunArgs};
use crate::summary::{apply_table_style, header_cell, print_run_summary, print_tables};

pub fn run_tables() -> Result<()> {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Table"),
        header_cell("Title"),
        header_cell("Zero counts"),
    ]);
    apply_table_style(&mut table);
    for name in TableName::ALL {
        let zero_counts = match name.zero_policy() {
            ZeroPolicy::DropZero => "dropped",
            ZeroPolicy::Retain => "kept",
        };
        table.add_row(vec![name.as_str(), name.title(), zero_counts]);
    }
    println!("{table}");
    Ok(())
}

pub fn run(args: &RunArgs) -> Result<()> {
    let options = pipeline_options(args)?;
    let analysis = run_analysis(&args.data_file, &options, &args.tables)?;

    let stdout = io::stdout();
    match args.format {
        OutputFormatArg::Table => {
            print_run_summary(&analysis);
            print_tables(&analysis.tables);
        }
        OutputFormatArg::Csv => {
            let mut handle = stdout.lock();
            write_csv(&analysis.tables, &mut handle)?;
            handle.flush()?;
        }
        OutputFormatArg::Json => {
            let mut handle = stdout.lock();
            write_json(&analysis.tables, &mut handle)?;
            handle.flush()?;
        }
    }
    Ok(())
}

fn pipeline_options(args: &RunArgs) -> Result<PipelineOptions> {
    let mut options = match &args.options {
        Some(path) => read_options(path)?,
        None => PipelineOptions::default(),
    };
    if let Some(rule) = args.child_race_rule {
        options = options.with_child_race_rule(match rule {
            ChildRaceRuleArg::Consistent => ChildRaceRule::Consistent,
            ChildRaceRuleArg::AsRecorded => ChildRaceRule::AsRecorded,
        });
    }
    Ok(options)
}

fn read_options(path: &Path) -> Result<PipelineOptions> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("read options file {}", path.display()))?;
    serde_json::from_str(&text).with_context(|| format!("parse options file {}", path.display()))
}
