//! Recoder: coded source columns to semantic values.
//!
//! Every recoded column replaces its source column in place (same name),
//! except the three columns the Recoder adds: `prace`, `exposure_34wk` and
//! `exposure_6mo`. Their presence on input means the table has already been
//! through this stage, and it is rejected.

pub mod codes;
pub mod correction;

use std::time::Instant;

use ets_common::{column_i64, column_strings, f64_column, i64_column, string_column};
use ets_model::columns::{
    BPM_ATTENTION, BPM_EXTERNALIZING, BPM_INTERNALIZING, CHILD_RACE, EMPLOY, INCOME, PARENT_ID,
    PARENT_RACE, PEDU, PETHNIC, PRACE, PSEX, RECODED_MARKERS, SWAN_HYPERACTIVE, SWAN_INATTENTIVE,
};
use ets_model::{
    CHILD_EXPOSURE, ExposureLevel, ExposureOccasion, POSTPARTUM_SMOKING, PipelineOptions,
    Substance, TRIMESTER_SMOKING, required_columns,
};
use polars::prelude::DataFrame;
use tracing::{debug, info, info_span};

use crate::error::{Result, TransformError};
use crate::frame::{RawFrame, RecodeReport, RecodedFrame, require_stage_columns};
use crate::rules::{parent_race_rules, read_race_flags};

const STAGE: &str = "recode";

/// Reads source cells and tracks the values that fall outside their domain.
struct Recoder<'a> {
    source: &'a DataFrame,
    report: RecodeReport,
}

impl<'a> Recoder<'a> {
    fn new(source: &'a DataFrame) -> Self {
        Self {
            source,
            report: RecodeReport {
                rows: source.height(),
                ..RecodeReport::default()
            },
        }
    }

    fn column<T>(
        &mut self,
        name: &'static str,
        code: impl Fn(&str) -> Option<T>,
    ) -> Result<Vec<Option<T>>> {
        let cells = column_strings(self.source, name)?;
        let mut misses = 0;
        let values = cells
            .iter()
            .map(|cell| {
                let cell = cell.as_deref()?;
                if codes::is_missing_token(cell) {
                    return None;
                }
                let value = code(cell);
                if value.is_none() {
                    misses += 1;
                }
                value
            })
            .collect();
        if misses > 0 {
            debug!(column = name, misses, "values outside code domain recoded to missing");
            self.report.misses.insert(name, misses);
        }
        Ok(values)
    }
}

/// Recode a raw dyad table.
///
/// The output has the same rows as the input. Out-of-domain codes become
/// missing and are counted in [`RecodeReport::misses`]; they are never an
/// error.
pub fn recode(raw: &RawFrame, options: &PipelineOptions) -> Result<RecodedFrame> {
    let span = info_span!("recode", rows = raw.record_count());
    let _guard = span.enter();
    let start = Instant::now();

    let source = raw.data();
    if let Some(column) = RECODED_MARKERS
        .into_iter()
        .find(|name| source.column(name).is_ok())
    {
        return Err(TransformError::AlreadyRecoded { column });
    }
    require_stage_columns(source, STAGE, required_columns())?;

    let mut recoder = Recoder::new(source);
    let mut data = source.clone();

    let flag_columns = PARENT_RACE
        .all()
        .into_iter()
        .chain(CHILD_RACE.all())
        .chain(CHILD_EXPOSURE.columns.iter().copied())
        .chain(Substance::ALL.iter().map(Substance::ever_column));
    for name in flag_columns {
        let values = recoder.column(name, codes::flag)?;
        data.with_column(i64_column(name, values))?;
    }

    let chain = parent_race_rules();
    let race: Vec<Option<String>> = read_race_flags(&data, &PARENT_RACE)?
        .iter()
        .map(|flags| chain.first_match(flags).map(|race| race.as_str().to_string()))
        .collect();
    data.with_column(string_column(PRACE, race))?;

    let labeled: [(&'static str, fn(&str) -> Option<String>); 4] = [
        (PSEX, codes::sex),
        (PETHNIC, codes::ethnicity),
        (EMPLOY, codes::employment),
        (PEDU, codes::education),
    ];
    for (name, code) in labeled {
        let values = recoder.column(name, code)?;
        data.with_column(string_column(name, values))?;
    }

    let income = recoder.column(INCOME, codes::income)?;
    data.with_column(f64_column(INCOME, income))?;

    let smoking_columns = TRIMESTER_SMOKING
        .columns
        .iter()
        .chain(POSTPARTUM_SMOKING.columns);
    for &name in smoking_columns {
        let values = recoder.column(name, codes::smoking)?;
        data.with_column(i64_column(name, values))?;
    }

    for occasion in ExposureOccasion::ALL {
        let concentration = recoder.column(occasion.cotinine_column(), codes::number)?;
        let category: Vec<Option<String>> = concentration
            .iter()
            .map(|value| {
                value.map(|value| {
                    ExposureLevel::from_cotinine(value)
                        .label(occasion)
                        .to_string()
                })
            })
            .collect();
        data.with_column(f64_column(occasion.cotinine_column(), concentration))?;
        data.with_column(string_column(occasion.category_column(), category))?;
    }

    let numeric_columns = Substance::ALL
        .iter()
        .map(Substance::days_column)
        .chain([BPM_ATTENTION, BPM_EXTERNALIZING, BPM_INTERNALIZING]);
    for name in numeric_columns {
        let values = recoder.column(name, codes::number)?;
        data.with_column(f64_column(name, values))?;
    }

    let identifiers = column_i64(source, PARENT_ID)?;
    let mut inattentive = recoder.column(SWAN_INATTENTIVE, codes::number)?;
    let mut hyperactive = recoder.column(SWAN_HYPERACTIVE, codes::number)?;
    let corrected = correction::clear_scores_for(
        &identifiers,
        &options.swan_correction_ids,
        &mut [&mut inattentive, &mut hyperactive],
    );
    data.with_column(f64_column(SWAN_INATTENTIVE, inattentive))?;
    data.with_column(f64_column(SWAN_HYPERACTIVE, hyperactive))?;
    data.with_column(i64_column(PARENT_ID, identifiers))?;

    let mut report = recoder.report;
    report.corrected = corrected;

    info!(
        rows = report.rows,
        misses = report.total_misses(),
        corrected = report.corrected,
        duration_ms = start.elapsed().as_millis(),
        "recode complete"
    );
    Ok(RecodedFrame::new(data, report))
}
