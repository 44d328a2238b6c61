//! Named result tables.

use std::fmt;
use std::str::FromStr;

use ets_common::first_missing_column;
use polars::prelude::DataFrame;
use serde::Serialize;

use crate::error::{ReportError, Result};

// Output column names shared across tables.
pub const CHARACTERISTIC: &str = "characteristic";
pub const CATEGORY: &str = "category";
pub const N: &str = "n";
pub const N_USED: &str = "n_used";
pub const PERCENT: &str = "percent";
pub const OCCASION: &str = "occasion";
pub const LEVEL: &str = "level";
pub const EDUCATION: &str = "education";
pub const MEAN_INCOME: &str = "mean_income";
pub const MEDIAN_INCOME: &str = "median_income";
pub const SUBSTANCE: &str = "substance";
pub const MEAN_DAYS: &str = "mean_days";
pub const N_SDP: &str = "n_sdp";
pub const N_THROUGHOUT: &str = "n_throughout";
pub const RATE: &str = "rate";

/// What happens to a group whose count is zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ZeroPolicy {
    /// Groups with a zero count are removed.
    DropZero,
    /// Every group is kept; an undefined statistic is written as null.
    Retain,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub enum TableName {
    Demographics,
    FinancialEducation,
    CotinineSmokingLevel,
    SubstanceUseByExposure,
    SubstanceUseByMedium,
    AverageDaysUsed,
    TrimesterSmokingByRace,
    PostpartumSmokingByRace,
    ChildExposureByRace,
    SwanBySdpRace,
    BpmBySdpRace,
    SmokingPersistence,
}

impl TableName {
    pub const ALL: [TableName; 12] = [
        TableName::Demographics,
        TableName::FinancialEducation,
        TableName::CotinineSmokingLevel,
        TableName::SubstanceUseByExposure,
        TableName::SubstanceUseByMedium,
        TableName::AverageDaysUsed,
        TableName::TrimesterSmokingByRace,
        TableName::PostpartumSmokingByRace,
        TableName::ChildExposureByRace,
        TableName::SwanBySdpRace,
        TableName::BpmBySdpRace,
        TableName::SmokingPersistence,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            TableName::Demographics => "demographics",
            TableName::FinancialEducation => "financial_education",
            TableName::CotinineSmokingLevel => "cotinine_smoking_level",
            TableName::SubstanceUseByExposure => "substance_use_by_exposure",
            TableName::SubstanceUseByMedium => "substance_use_by_medium",
            TableName::AverageDaysUsed => "average_days_used",
            TableName::TrimesterSmokingByRace => "trimester_smoking_by_race",
            TableName::PostpartumSmokingByRace => "postpartum_smoking_by_race",
            TableName::ChildExposureByRace => "child_exposure_by_race",
            TableName::SwanBySdpRace => "swan_by_sdp_race",
            TableName::BpmBySdpRace => "bpm_by_sdp_race",
            TableName::SmokingPersistence => "smoking_persistence",
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            TableName::Demographics => "Parent and child demographics",
            TableName::FinancialEducation => "Household income by parental education",
            TableName::CotinineSmokingLevel => "Smoking level by urine cotinine",
            TableName::SubstanceUseByExposure => "Child substance use by cotinine exposure level",
            TableName::SubstanceUseByMedium => "Child substance use by substance",
            TableName::AverageDaysUsed => "Average days used in the past 30 days",
            TableName::TrimesterSmokingByRace => "Smoking during pregnancy by trimester and race",
            TableName::PostpartumSmokingByRace => "Postpartum smoking by visit and race",
            TableName::ChildExposureByRace => "Child smoke exposure by age and race",
            TableName::SwanBySdpRace => "SWAN scores by SDP, trimester and race",
            TableName::BpmBySdpRace => "BPM scores by SDP, trimester and race",
            TableName::SmokingPersistence => "Smoking through pregnancy",
        }
    }

    pub fn zero_policy(&self) -> ZeroPolicy {
        match self {
            TableName::SwanBySdpRace
            | TableName::BpmBySdpRace
            | TableName::SmokingPersistence => ZeroPolicy::Retain,
            _ => ZeroPolicy::DropZero,
        }
    }
}

impl fmt::Display for TableName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TableName {
    type Err = ReportError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let name = s.trim();
        TableName::ALL
            .into_iter()
            .find(|table| table.as_str().eq_ignore_ascii_case(name))
            .ok_or_else(|| ReportError::UnknownTable {
                name: name.to_string(),
            })
    }
}

/// One computed result table.
#[derive(Debug, Clone)]
pub struct ResultTable {
    pub name: TableName,
    pub data: DataFrame,
}

impl ResultTable {
    pub fn new(name: TableName, data: DataFrame) -> Self {
        Self { name, data }
    }

    pub fn title(&self) -> &'static str {
        self.name.title()
    }

    pub fn zero_policy(&self) -> ZeroPolicy {
        self.name.zero_policy()
    }
}

/// Fail with [`ReportError::MissingColumn`] naming the first absent column.
pub(crate) fn require<'a>(
    df: &DataFrame,
    table: TableName,
    names: impl IntoIterator<Item = &'a str>,
) -> Result<()> {
    match first_missing_column(df, names) {
        Some(column) => Err(ReportError::MissingColumn {
            table: table.as_str(),
            column: column.to_string(),
        }),
        None => Ok(()),
    }
}
