//! Known upstream defect: true-missing SWAN scores stored as 0.

use std::collections::BTreeSet;

/// Force `scores` to missing on every row whose identifier is in `ids`.
///
/// Returns the number of rows touched. Rows with a missing identifier are
/// never corrected.
pub fn clear_scores_for(
    identifiers: &[Option<i64>],
    ids: &BTreeSet<i64>,
    scores: &mut [&mut Vec<Option<f64>>],
) -> usize {
    let mut corrected = 0;
    for (idx, id) in identifiers.iter().enumerate() {
        let Some(id) = id else { continue };
        if !ids.contains(id) {
            continue;
        }
        for column in scores.iter_mut() {
            if let Some(value) = column.get_mut(idx) {
                *value = None;
            }
        }
        corrected += 1;
    }
    corrected
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clears_listed_identifiers_even_when_non_zero() {
        let ids = BTreeSet::from([50502, 51202]);
        let identifiers = vec![Some(50502), Some(1), Some(51202), None];
        let mut inattentive = vec![Some(0.0), Some(1.5), Some(2.5), Some(0.0)];
        let mut hyperactive = vec![Some(0.0), Some(0.5), None, Some(0.0)];

        let corrected = clear_scores_for(
            &identifiers,
            &ids,
            &mut [&mut inattentive, &mut hyperactive],
        );

        assert_eq!(corrected, 2);
        assert_eq!(inattentive, vec![None, Some(1.5), None, Some(0.0)]);
        assert_eq!(hyperactive, vec![None, Some(0.5), None, Some(0.0)]);
    }
}
