//! Aggregator for the tobacco-exposure analysis.
//!
//! Turns a [`ets_transform::TransformedStudy`] into the named result tables:
//! demographic and financial summaries, cotinine exposure levels, child
//! substance use, race-stratified smoking and exposure counts, and
//! inventory score means by SDP and race.

mod aggregate;
mod by_race;
mod demographics;
mod error;
mod inventory;
mod join;
mod stats;
mod substance;
mod table;

pub use aggregate::{AnalysisTables, build_tables, smoking_persistence_table};
pub use by_race::{
    child_exposure_by_race, indicator_sums_by_race, postpartum_smoking_by_race,
    trimester_smoking_by_race,
};
pub use demographics::{CHARACTERISTICS, demographics, financial_education};
pub use error::{ReportError, Result};
pub use inventory::{bpm_by_sdp_race, mean_column, scores_by_sdp_race, swan_by_sdp_race};
pub use join::RaceIndex;
pub use stats::{mean, median, percent};
pub use substance::{
    average_days_used, cotinine_smoking_level, substance_use_by_exposure, substance_use_by_medium,
};
pub use table::{ResultTable, TableName, ZeroPolicy};
