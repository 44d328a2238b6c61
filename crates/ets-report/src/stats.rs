//! Null-aware statistics.
//!
//! An input set with no observed value yields `None`, never 0.

pub fn mean(values: impl IntoIterator<Item = Option<f64>>) -> Option<f64> {
    let (sum, count) = values
        .into_iter()
        .flatten()
        .fold((0.0, 0usize), |(sum, count), value| (sum + value, count + 1));
    (count > 0).then(|| sum / count as f64)
}

pub fn median(values: impl IntoIterator<Item = Option<f64>>) -> Option<f64> {
    let mut observed: Vec<f64> = values.into_iter().flatten().collect();
    if observed.is_empty() {
        return None;
    }
    observed.sort_by(f64::total_cmp);
    let mid = observed.len() / 2;
    if observed.len() % 2 == 0 {
        Some((observed[mid - 1] + observed[mid]) / 2.0)
    } else {
        Some(observed[mid])
    }
}

/// `part / whole` as a percentage; `None` when `whole` is 0.
pub fn percent(part: usize, whole: usize) -> Option<f64> {
    (whole > 0).then(|| part as f64 * 100.0 / whole as f64)
}

pub fn count_i64(count: usize) -> Option<i64> {
    i64::try_from(count).ok()
}
