//! Cotinine exposure levels and child substance use.

use ets_common::{column_f64, column_i64, column_strings, f64_column, i64_column, string_column};
use ets_model::columns::ANY_SUBSTANCE;
use ets_model::{ExposureLevel, ExposureOccasion, Substance};
use polars::prelude::DataFrame;
use tracing::debug;

use crate::error::{ReportError, Result};
use crate::stats::{count_i64, mean, percent};
use crate::table::{
    LEVEL, MEAN_DAYS, N, N_USED, OCCASION, PERCENT, SUBSTANCE, TableName, require,
};

fn exposure_levels(
    dyads: &DataFrame,
    occasion: ExposureOccasion,
) -> Result<Vec<Option<ExposureLevel>>> {
    let column = occasion.category_column();
    column_strings(dyads, column)?
        .into_iter()
        .map(|label| match label {
            None => Ok(None),
            Some(label) => ExposureLevel::from_label(&label)
                .map(Some)
                .ok_or(ReportError::UnknownCategory { column, value: label }),
        })
        .collect()
}

/// Distribution of exposure levels per cotinine occasion.
///
/// Levels no dyad reached are left out; percentages are over dyads with an
/// observed level.
pub fn cotinine_smoking_level(dyads: &DataFrame) -> Result<DataFrame> {
    require(
        dyads,
        TableName::CotinineSmokingLevel,
        ExposureOccasion::ALL.map(|occasion| occasion.category_column()),
    )?;

    let mut occasions = Vec::new();
    let mut levels = Vec::new();
    let mut counts = Vec::new();
    let mut percents = Vec::new();
    for occasion in ExposureOccasion::ALL {
        let observed = exposure_levels(dyads, occasion)?;
        let total = observed.iter().flatten().count();
        debug!(
            occasion = occasion.as_str(),
            missing = observed.len() - total,
            "cotinine category counted"
        );
        for level in ExposureLevel::ALL {
            let n = observed.iter().filter(|value| **value == Some(level)).count();
            if n == 0 {
                continue;
            }
            occasions.push(Some(occasion.as_str().to_string()));
            levels.push(Some(level.label(occasion).to_string()));
            counts.push(count_i64(n));
            percents.push(percent(n, total));
        }
    }

    Ok(DataFrame::new(vec![
        string_column(OCCASION, occasions),
        string_column(LEVEL, levels),
        i64_column(N, counts),
        f64_column(PERCENT, percents),
    ])?)
}

/// Share of children who ever used any substance, per exposure level.
///
/// `n` counts dyads at the level with an observed composite flag. Levels
/// without such a dyad get no row.
pub fn substance_use_by_exposure(dyads: &DataFrame) -> Result<DataFrame> {
    let table = TableName::SubstanceUseByExposure;
    require(dyads, table, [ANY_SUBSTANCE])?;
    require(
        dyads,
        table,
        ExposureOccasion::ALL.map(|occasion| occasion.category_column()),
    )?;
    let used = column_i64(dyads, ANY_SUBSTANCE)?;

    let mut occasions = Vec::new();
    let mut levels = Vec::new();
    let mut counts = Vec::new();
    let mut used_counts = Vec::new();
    let mut percents = Vec::new();
    for occasion in ExposureOccasion::ALL {
        let observed = exposure_levels(dyads, occasion)?;
        for level in ExposureLevel::ALL {
            let flags: Vec<i64> = observed
                .iter()
                .zip(&used)
                .filter(|(value, _)| **value == Some(level))
                .filter_map(|(_, flag)| *flag)
                .collect();
            if flags.is_empty() {
                continue;
            }
            let n_used = flags.iter().filter(|flag| **flag == 1).count();
            occasions.push(Some(occasion.as_str().to_string()));
            levels.push(Some(level.label(occasion).to_string()));
            counts.push(count_i64(flags.len()));
            used_counts.push(count_i64(n_used));
            percents.push(percent(n_used, flags.len()));
        }
    }

    Ok(DataFrame::new(vec![
        string_column(OCCASION, occasions),
        string_column(LEVEL, levels),
        i64_column(N, counts),
        i64_column(N_USED, used_counts),
        f64_column(PERCENT, percents),
    ])?)
}

/// Ever-use rate per substance over children with an observed flag.
pub fn substance_use_by_medium(dyads: &DataFrame) -> Result<DataFrame> {
    require(
        dyads,
        TableName::SubstanceUseByMedium,
        Substance::ALL.map(|substance| substance.ever_column()),
    )?;

    let mut substances = Vec::new();
    let mut counts = Vec::new();
    let mut used_counts = Vec::new();
    let mut percents = Vec::new();
    for substance in Substance::ALL {
        let flags = column_i64(dyads, substance.ever_column())?;
        let n = flags.iter().flatten().count();
        if n == 0 {
            debug!(substance = substance.as_str(), "no observed ever-use flag");
            continue;
        }
        let n_used = flags.iter().filter(|flag| **flag == Some(1)).count();
        substances.push(Some(substance.as_str().to_string()));
        counts.push(count_i64(n));
        used_counts.push(count_i64(n_used));
        percents.push(percent(n_used, n));
    }

    Ok(DataFrame::new(vec![
        string_column(SUBSTANCE, substances),
        i64_column(N, counts),
        i64_column(N_USED, used_counts),
        f64_column(PERCENT, percents),
    ])?)
}

/// Mean days used in the past 30 days per substance.
pub fn average_days_used(dyads: &DataFrame) -> Result<DataFrame> {
    require(
        dyads,
        TableName::AverageDaysUsed,
        Substance::ALL.map(|substance| substance.days_column()),
    )?;

    let mut substances = Vec::new();
    let mut counts = Vec::new();
    let mut means = Vec::new();
    for substance in Substance::ALL {
        let days = column_f64(dyads, substance.days_column())?;
        let n = days.iter().flatten().count();
        if n == 0 {
            continue;
        }
        substances.push(Some(substance.as_str().to_string()));
        counts.push(count_i64(n));
        means.push(mean(days));
    }

    Ok(DataFrame::new(vec![
        string_column(SUBSTANCE, substances),
        i64_column(N, counts),
        f64_column(MEAN_DAYS, means),
    ])?)
}
