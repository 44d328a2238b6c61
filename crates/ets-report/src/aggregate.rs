//! Builds the full set of result tables from a transformed study.

use std::time::Instant;

use ets_common::{f64_column, i64_column};
use ets_transform::{SmokingPersistence, TransformedStudy};
use polars::prelude::DataFrame;
use tracing::{debug, info, info_span};

use crate::by_race::{child_exposure_by_race, postpartum_smoking_by_race, trimester_smoking_by_race};
use crate::demographics::{demographics, financial_education};
use crate::error::Result;
use crate::inventory::{bpm_by_sdp_race, swan_by_sdp_race};
use crate::join::RaceIndex;
use crate::stats::count_i64;
use crate::substance::{
    average_days_used, cotinine_smoking_level, substance_use_by_exposure, substance_use_by_medium,
};
use crate::table::{N_SDP, N_THROUGHOUT, RATE, ResultTable, TableName};

/// One-row summary of smoking through pregnancy.
pub fn smoking_persistence_table(persistence: &SmokingPersistence) -> Result<DataFrame> {
    Ok(DataFrame::new(vec![
        i64_column(N_SDP, vec![count_i64(persistence.n_sdp)]),
        i64_column(N_THROUGHOUT, vec![count_i64(persistence.n_throughout)]),
        f64_column(RATE, vec![persistence.rate()]),
    ])?)
}

/// The named result tables, in [`TableName::ALL`] order.
#[derive(Debug, Clone, Default)]
pub struct AnalysisTables {
    tables: Vec<ResultTable>,
}

impl AnalysisTables {
    pub fn tables(&self) -> &[ResultTable] {
        &self.tables
    }

    pub fn get(&self, name: TableName) -> Option<&ResultTable> {
        self.tables.iter().find(|table| table.name == name)
    }

    /// Keep only `names`; an empty selection keeps everything.
    #[must_use]
    pub fn select(mut self, names: &[TableName]) -> Self {
        if !names.is_empty() {
            self.tables.retain(|table| names.contains(&table.name));
        }
        self
    }

    pub fn len(&self) -> usize {
        self.tables.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tables.is_empty()
    }
}

fn build(name: TableName, study: &TransformedStudy, index: &RaceIndex) -> Result<DataFrame> {
    let dyads = study.dyads.data();
    match name {
        TableName::Demographics => demographics(dyads),
        TableName::FinancialEducation => financial_education(dyads),
        TableName::CotinineSmokingLevel => cotinine_smoking_level(dyads),
        TableName::SubstanceUseByExposure => substance_use_by_exposure(dyads),
        TableName::SubstanceUseByMedium => substance_use_by_medium(dyads),
        TableName::AverageDaysUsed => average_days_used(dyads),
        TableName::TrimesterSmokingByRace => {
            trimester_smoking_by_race(index, &study.trimester_smoking)
        }
        TableName::PostpartumSmokingByRace => {
            postpartum_smoking_by_race(index, &study.postpartum_smoking)
        }
        TableName::ChildExposureByRace => child_exposure_by_race(index, &study.child_exposure),
        TableName::SwanBySdpRace => swan_by_sdp_race(index, &study.sdp_labels, dyads),
        TableName::BpmBySdpRace => bpm_by_sdp_race(index, &study.sdp_labels, dyads),
        TableName::SmokingPersistence => smoking_persistence_table(&study.persistence),
    }
}

/// Compute every result table.
pub fn build_tables(study: &TransformedStudy) -> Result<AnalysisTables> {
    let span = info_span!("aggregate");
    let _guard = span.enter();
    let start = Instant::now();

    let index = RaceIndex::from_lookup(&study.race_lookup)?;
    let mut tables = Vec::with_capacity(TableName::ALL.len());
    for name in TableName::ALL {
        let data = build(name, study, &index)?;
        debug!(table = name.as_str(), rows = data.height(), "table built");
        tables.push(ResultTable::new(name, data));
    }

    info!(
        tables = tables.len(),
        race_identifiers = index.identifier_count(),
        duration_ms = start.elapsed().as_millis(),
        "aggregation complete"
    );
    Ok(AnalysisTables { tables })
}
