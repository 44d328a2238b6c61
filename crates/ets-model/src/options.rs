//! Configuration options for the analysis pipeline.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

/// Dyads whose SWAN scores were recorded as 0 where the true value is
/// missing. Both SWAN scores are forced to missing for these identifiers.
pub const SWAN_CORRECTION_IDS: [i64; 10] = [
    50502, 51202, 51602, 52302, 53002, 53502, 53902, 54402, 54602, 54702,
];

/// How the child AIAN + White biracial trigger is evaluated.
///
/// The source coding compares the child White flag against the text
/// `'white'` in that one trigger, while every other trigger compares flags
/// numerically. A numeric flag never equals that text, so the recorded rule
/// can never fire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ChildRaceRule {
    /// Compare every flag numerically, matching the parent race rule.
    #[default]
    Consistent,
    /// Reproduce the recorded comparison: AIAN + White never yields Biracial.
    AsRecorded,
}

/// Options controlling recoding and derivation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PipelineOptions {
    /// Child composite-race biracial rule.
    pub child_race_rule: ChildRaceRule,

    /// Identifiers whose SWAN scores are forced to missing.
    pub swan_correction_ids: BTreeSet<i64>,
}

impl Default for PipelineOptions {
    fn default() -> Self {
        Self {
            child_race_rule: ChildRaceRule::default(),
            swan_correction_ids: SWAN_CORRECTION_IDS.into_iter().collect(),
        }
    }
}

impl PipelineOptions {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_child_race_rule(mut self, rule: ChildRaceRule) -> Self {
        self.child_race_rule = rule;
        self
    }

    #[must_use]
    pub fn with_swan_correction_ids(mut self, ids: impl IntoIterator<Item = i64>) -> Self {
        self.swan_correction_ids = ids.into_iter().collect();
        self
    }
}
