//! Load, transform and aggregate one dyad file.

use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::{Context, Result};
use ets_model::PipelineOptions;
use ets_report::{AnalysisTables, TableName, build_tables};
use ets_transform::{DeriveReport, RawFrame, RecodeReport, transform_dyads};
use tracing::{info, info_span, trace};

use crate::logging::redact_value;

/// Outcome of one analysis run.
#[derive(Debug, Clone)]
pub struct AnalysisRun {
    pub data_file: PathBuf,
    pub rows: usize,
    pub recode: RecodeReport,
    pub derive: DeriveReport,
    pub smoking_throughout_rate: Option<f64>,
    pub tables: AnalysisTables,
}

/// Run every stage over `path`, keeping only the `selection` tables (all
/// tables when empty).
///
/// A load error stops the run before any table is computed.
pub fn run_analysis(
    path: &Path,
    options: &PipelineOptions,
    selection: &[TableName],
) -> Result<AnalysisRun> {
    let span = info_span!("analysis", file = %path.display());
    let _guard = span.enter();
    let start = Instant::now();

    let data = ets_ingest::read_dyad_table(path)
        .with_context(|| format!("load dyad file {}", path.display()))?;
    let raw = RawFrame::new(data);
    let rows = raw.record_count();

    let study = transform_dyads(&raw, options).context("transform dyads")?;
    for id in &study.dyads.report().child_race_disagreements {
        trace!(
            parent_id = redact_value(&id.to_string()),
            "child race depends on biracial rule"
        );
    }
    let tables = build_tables(&study)
        .context("aggregate result tables")?
        .select(selection);

    info!(
        rows,
        tables = tables.len(),
        duration_ms = start.elapsed().as_millis(),
        "analysis complete"
    );
    Ok(AnalysisRun {
        data_file: path.to_path_buf(),
        rows,
        recode: study.recode_report,
        derive: study.dyads.report().clone(),
        smoking_throughout_rate: study.persistence.rate(),
        tables,
    })
}
