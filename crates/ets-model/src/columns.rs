//! Column contract of the dyad file.
//!
//! Every name listed here is required at load time. Recoder and
//! derivation outputs are listed separately so a table that already carries
//! them can be recognised.

use serde::Serialize;

/// Join key shared by every derived table.
pub const PARENT_ID: &str = "parent_id";

pub const PSEX: &str = "psex";
pub const PETHNIC: &str = "pethnic";
pub const EMPLOY: &str = "employ";
pub const PEDU: &str = "pedu";
pub const INCOME: &str = "income";

pub const COTININE_34WK: &str = "cotimean_34wk";
pub const COTININE_6MO: &str = "cotimean_pp6mo";

pub const SWAN_INATTENTIVE: &str = "swan_inattentive";
pub const SWAN_HYPERACTIVE: &str = "swan_hyperactive";
pub const BPM_ATTENTION: &str = "bpm_att";
pub const BPM_EXTERNALIZING: &str = "bpm_ext";
pub const BPM_INTERNALIZING: &str = "bpm_int";

/// Parent race label written by the Recoder.
pub const PRACE: &str = "prace";
/// Cotinine category at 34 weeks gestation, written by the Recoder.
pub const EXPOSURE_34WK: &str = "exposure_34wk";
/// Cotinine category at 6 months postpartum, written by the Recoder.
pub const EXPOSURE_6MO: &str = "exposure_6mo";
/// Child race label written by the Derivation Engine.
pub const TRACE: &str = "trace";
/// Composite substance-use flag written by the Derivation Engine.
pub const ANY_SUBSTANCE: &str = "any_substance";

/// Columns whose presence marks a table as already recoded.
pub const RECODED_MARKERS: [&str; 3] = [PRACE, EXPOSURE_34WK, EXPOSURE_6MO];

/// One binary indicator column per race category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RaceColumns {
    pub aian: &'static str,
    pub asian: &'static str,
    pub nhpi: &'static str,
    pub black: &'static str,
    pub white: &'static str,
    pub other: &'static str,
}

impl RaceColumns {
    pub const fn all(&self) -> [&'static str; 6] {
        [
            self.aian,
            self.asian,
            self.nhpi,
            self.black,
            self.white,
            self.other,
        ]
    }
}

pub const PARENT_RACE: RaceColumns = RaceColumns {
    aian: "paian",
    asian: "pasian",
    nhpi: "pnhpi",
    black: "pblack",
    white: "pwhite",
    other: "prace_other",
};

pub const CHILD_RACE: RaceColumns = RaceColumns {
    aian: "taian",
    asian: "tasian",
    nhpi: "tnhpi",
    black: "tblack",
    white: "twhite",
    other: "trace_other",
};

/// A wide repeated-measures block: one column per occasion.
///
/// Occasion labels are the column names with the shared prefix stripped;
/// the position within `columns` is the chronological order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ColumnGroup {
    pub name: &'static str,
    pub prefix: &'static str,
    pub columns: &'static [&'static str],
}

impl ColumnGroup {
    /// Occasion label for `column`, or `None` if it is not in this group.
    pub fn label(&self, column: &str) -> Option<&'static str> {
        self.columns
            .iter()
            .find(|candidate| **candidate == column)
            .map(|&column| column.strip_prefix(self.prefix).unwrap_or(column))
    }

    /// Chronological position of an occasion label.
    pub fn position(&self, label: &str) -> Option<usize> {
        self.columns
            .iter()
            .position(|column| column.strip_prefix(self.prefix) == Some(label))
    }

    pub fn labels(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.columns
            .iter()
            .map(|&column| column.strip_prefix(self.prefix).unwrap_or(column))
    }
}

/// Self-reported smoking at 16, 22 and 32 weeks gestation (trimesters 1–3).
pub const TRIMESTER_SMOKING: ColumnGroup = ColumnGroup {
    name: "trimester smoking",
    prefix: "mom_smoke_",
    columns: &["mom_smoke_16wk", "mom_smoke_22wk", "mom_smoke_32wk"],
};

/// Self-reported smoking at the four postpartum visits.
pub const POSTPARTUM_SMOKING: ColumnGroup = ColumnGroup {
    name: "postpartum smoking",
    prefix: "mom_smoke_",
    columns: &[
        "mom_smoke_pp1",
        "mom_smoke_pp2",
        "mom_smoke_pp12wk",
        "mom_smoke_pp6mo",
    ],
};

/// Child environmental smoke exposure from 6 months to 5 years.
pub const CHILD_EXPOSURE: ColumnGroup = ColumnGroup {
    name: "child exposure",
    prefix: "smoke_exposure_",
    columns: &[
        "smoke_exposure_6mo",
        "smoke_exposure_12mo",
        "smoke_exposure_2yr",
        "smoke_exposure_3yr",
        "smoke_exposure_4yr",
        "smoke_exposure_5yr",
    ],
};

/// Behavioral inventories summarised by SDP and race.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Inventory {
    /// Strengths and Weaknesses of ADHD Symptoms and Normal Behavior.
    Swan,
    /// Brief Problem Monitor.
    Bpm,
}

impl Inventory {
    pub fn score_columns(&self) -> &'static [&'static str] {
        match self {
            Inventory::Swan => &[SWAN_INATTENTIVE, SWAN_HYPERACTIVE],
            Inventory::Bpm => &[BPM_ATTENTION, BPM_EXTERNALIZING, BPM_INTERNALIZING],
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Inventory::Swan => "SWAN",
            Inventory::Bpm => "BPM",
        }
    }
}

/// Every column the loader requires, in file-contract order.
pub fn required_columns() -> Vec<&'static str> {
    let mut columns = vec![PARENT_ID];
    columns.extend(PARENT_RACE.all());
    columns.extend(CHILD_RACE.all());
    columns.extend([PSEX, PETHNIC, EMPLOY, PEDU, INCOME]);
    columns.extend(TRIMESTER_SMOKING.columns);
    columns.extend(POSTPARTUM_SMOKING.columns);
    columns.extend([COTININE_34WK, COTININE_6MO]);
    columns.extend(CHILD_EXPOSURE.columns);
    for substance in crate::enums::Substance::ALL {
        columns.push(substance.ever_column());
        columns.push(substance.days_column());
    }
    columns.extend(Inventory::Swan.score_columns());
    columns.extend(Inventory::Bpm.score_columns());
    columns
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn group_labels_strip_prefix() {
        assert_eq!(
            POSTPARTUM_SMOKING.labels().collect::<Vec<_>>(),
            vec!["pp1", "pp2", "pp12wk", "pp6mo"]
        );
        assert_eq!(CHILD_EXPOSURE.label("smoke_exposure_2yr"), Some("2yr"));
        assert_eq!(CHILD_EXPOSURE.label("mom_smoke_pp1"), None);
        assert_eq!(CHILD_EXPOSURE.position("5yr"), Some(5));
    }

    #[test]
    fn required_columns_are_unique() {
        let columns = required_columns();
        let mut deduped = columns.clone();
        deduped.sort_unstable();
        deduped.dedup();
        assert_eq!(columns.len(), deduped.len());
        assert_eq!(columns.len(), 46);
        assert!(!columns.contains(&PRACE));
    }
}
