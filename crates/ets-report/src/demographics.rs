//! Demographic and financial summaries over the dyad table.

use std::collections::BTreeMap;

use ets_common::{column_f64, column_strings, f64_column, i64_column, string_column};
use ets_model::Education;
use ets_model::columns::{EMPLOY, INCOME, PEDU, PETHNIC, PRACE, PSEX, TRACE};
use polars::prelude::DataFrame;

use crate::error::Result;
use crate::stats::{count_i64, mean, median, percent};
use crate::table::{
    CATEGORY, CHARACTERISTIC, EDUCATION, MEAN_INCOME, MEDIAN_INCOME, N, PERCENT, TableName,
    require,
};

/// Characteristics in display order, with the column each is counted over.
pub const CHARACTERISTICS: [(&str, &str); 5] = [
    ("Race", PRACE),
    ("Child race", TRACE),
    ("Sex", PSEX),
    ("Ethnicity", PETHNIC),
    ("Employment", EMPLOY),
];

/// Frequency of each category per characteristic.
///
/// Missing values form their own (null) category. Within a characteristic,
/// categories are sorted by descending count, ties by label with missing last.
pub fn demographics(dyads: &DataFrame) -> Result<DataFrame> {
    let table = TableName::Demographics;
    require(dyads, table, CHARACTERISTICS.map(|(_, column)| column))?;

    let total = dyads.height();
    let mut characteristics = Vec::new();
    let mut categories = Vec::new();
    let mut counts = Vec::new();
    let mut percents = Vec::new();

    for (characteristic, column) in CHARACTERISTICS {
        let mut frequency: BTreeMap<Option<String>, usize> = BTreeMap::new();
        for value in column_strings(dyads, column)? {
            *frequency.entry(value).or_default() += 1;
        }
        let mut rows: Vec<(Option<String>, usize)> = frequency.into_iter().collect();
        rows.sort_by(|(a_label, a_n), (b_label, b_n)| {
            b_n.cmp(a_n)
                .then_with(|| a_label.is_none().cmp(&b_label.is_none()))
                .then_with(|| a_label.cmp(b_label))
        });
        for (category, n) in rows {
            characteristics.push(Some(characteristic.to_string()));
            categories.push(category);
            counts.push(count_i64(n));
            percents.push(percent(n, total));
        }
    }

    Ok(DataFrame::new(vec![
        string_column(CHARACTERISTIC, characteristics),
        string_column(CATEGORY, categories),
        i64_column(N, counts),
        f64_column(PERCENT, percents),
    ])?)
}

/// Income by education level, in education code order with missing last.
pub fn financial_education(dyads: &DataFrame) -> Result<DataFrame> {
    require(dyads, TableName::FinancialEducation, [PEDU, INCOME])?;
    let education = column_strings(dyads, PEDU)?;
    let income = column_f64(dyads, INCOME)?;

    // None sorts before Some, so key missing education as level count
    let mut groups: BTreeMap<usize, (Option<String>, Vec<Option<f64>>)> = BTreeMap::new();
    for (level, income) in education.into_iter().zip(income) {
        let order = level
            .as_deref()
            .and_then(Education::from_label)
            .and_then(|level| Education::ALL.iter().position(|candidate| *candidate == level))
            .unwrap_or(Education::ALL.len());
        let entry = groups.entry(order).or_insert_with(|| (level, Vec::new()));
        entry.1.push(income);
    }

    let mut levels = Vec::new();
    let mut counts = Vec::new();
    let mut means = Vec::new();
    let mut medians = Vec::new();
    for (_, (level, incomes)) in groups {
        levels.push(level);
        counts.push(count_i64(incomes.len()));
        means.push(mean(incomes.iter().copied()));
        medians.push(median(incomes));
    }

    Ok(DataFrame::new(vec![
        string_column(EDUCATION, levels),
        i64_column(N, counts),
        f64_column(MEAN_INCOME, means),
        f64_column(MEDIAN_INCOME, medians),
    ])?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use polars::prelude::Column;

    #[test]
    fn income_groups_follow_code_order() {
        let dyads = DataFrame::new(vec![
            Column::new(
                PEDU.into(),
                [Some("GED"), None, Some("Some high school"), Some("GED")],
            ),
            Column::new(INCOME.into(), [Some(10.0), Some(5.0), None, Some(30.0)]),
        ])
        .unwrap();
        let table = financial_education(&dyads).unwrap();
        let levels = table.column(EDUCATION).unwrap().str().unwrap();
        assert_eq!(levels.get(0), Some("Some high school"));
        assert_eq!(levels.get(1), Some("GED"));
        assert_eq!(levels.get(2), None);

        let means = table.column(MEAN_INCOME).unwrap().f64().unwrap();
        // every income in the first group is missing
        assert_eq!(means.get(0), None);
        assert_eq!(means.get(1), Some(20.0));
        let medians = table.column(MEDIAN_INCOME).unwrap().f64().unwrap();
        assert_eq!(medians.get(2), Some(5.0));
    }
}
