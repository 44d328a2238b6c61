//! Ordered first-match rule lists.
//!
//! Predicates overlap (a dyad with AIAN and White flags matches three race
//! rules), so evaluation order carries meaning. Rules are tried top to
//! bottom and the first match wins; no match yields `None`.

use ets_common::column_i64;
use ets_model::columns::RaceColumns;
use ets_model::{ChildRaceRule, Race};
use polars::prelude::{DataFrame, PolarsResult};

pub struct Rule<T, V> {
    pub name: &'static str,
    pub when: fn(&T) -> bool,
    pub value: V,
}

pub struct RuleChain<T, V> {
    rules: Vec<Rule<T, V>>,
}

impl<T, V: Copy> RuleChain<T, V> {
    pub fn new(rules: Vec<Rule<T, V>>) -> Self {
        Self { rules }
    }

    pub fn first_match(&self, input: &T) -> Option<V> {
        self.rules
            .iter()
            .find(|rule| (rule.when)(input))
            .map(|rule| rule.value)
    }

    /// Name of the rule that fires, for diagnostics.
    pub fn matched_rule(&self, input: &T) -> Option<&'static str> {
        self.rules
            .iter()
            .find(|rule| (rule.when)(input))
            .map(|rule| rule.name)
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

/// Race indicator flags of one dyad member. A flag is set only when the
/// recoded indicator equals 1; missing counts as unset.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RaceFlags {
    pub aian: bool,
    pub asian: bool,
    pub nhpi: bool,
    pub black: bool,
    pub white: bool,
    pub other: bool,
}

impl RaceFlags {
    /// Build from indicator values in [`RaceColumns::all`] order.
    pub fn from_indicators(values: [Option<i64>; 6]) -> Self {
        let set = |value: Option<i64>| value == Some(1);
        Self {
            aian: set(values[0]),
            asian: set(values[1]),
            nhpi: set(values[2]),
            black: set(values[3]),
            white: set(values[4]),
            other: set(values[5]),
        }
    }

    /// Whether the single-category flag for `race` is set.
    pub fn is_set(&self, race: Race) -> bool {
        match race {
            Race::Biracial => false,
            Race::AmericanIndianAlaskaNative => self.aian,
            Race::Asian => self.asian,
            Race::NativeHawaiianPacificIslander => self.nhpi,
            Race::Black => self.black,
            Race::White => self.white,
            Race::Other => self.other,
        }
    }
}

/// Read one [`RaceFlags`] per row from recoded indicator columns.
pub fn read_race_flags(df: &DataFrame, columns: &RaceColumns) -> PolarsResult<Vec<RaceFlags>> {
    let mut indicators = Vec::with_capacity(6);
    for name in columns.all() {
        indicators.push(column_i64(df, name)?);
    }
    Ok((0..df.height())
        .map(|idx| {
            RaceFlags::from_indicators(std::array::from_fn(|slot| indicators[slot][idx]))
        })
        .collect())
}

fn single_flag_rules() -> Vec<Rule<RaceFlags, Race>> {
    vec![
        Rule {
            name: "aian",
            when: |f: &RaceFlags| f.aian,
            value: Race::AmericanIndianAlaskaNative,
        },
        Rule {
            name: "asian",
            when: |f: &RaceFlags| f.asian,
            value: Race::Asian,
        },
        Rule {
            name: "nhpi",
            when: |f: &RaceFlags| f.nhpi,
            value: Race::NativeHawaiianPacificIslander,
        },
        Rule {
            name: "black",
            when: |f: &RaceFlags| f.black,
            value: Race::Black,
        },
        Rule {
            name: "white",
            when: |f: &RaceFlags| f.white,
            value: Race::White,
        },
        Rule {
            name: "other",
            when: |f: &RaceFlags| f.other,
            value: Race::Other,
        },
    ]
}

/// Parent composite race: biracial combinations first, then single flags.
pub fn parent_race_rules() -> RuleChain<RaceFlags, Race> {
    let mut rules = vec![
        Rule {
            name: "aian+white",
            when: |f: &RaceFlags| f.aian && f.white,
            value: Race::Biracial,
        },
        Rule {
            name: "aian+nhpi",
            when: |f: &RaceFlags| f.aian && f.nhpi,
            value: Race::Biracial,
        },
    ];
    rules.extend(single_flag_rules());
    RuleChain::new(rules)
}

/// Child composite race under the chosen biracial rule.
pub fn child_race_rules(rule: ChildRaceRule) -> RuleChain<RaceFlags, Race> {
    let aian_white = match rule {
        ChildRaceRule::Consistent => Rule {
            name: "aian+white",
            when: |f: &RaceFlags| f.aian && f.white,
            value: Race::Biracial,
        },
        // The recorded trigger tests the White flag against text and never holds.
        ChildRaceRule::AsRecorded => Rule {
            name: "aian+white (as recorded)",
            when: |_: &RaceFlags| false,
            value: Race::Biracial,
        },
    };
    let mut rules = vec![
        aian_white,
        Rule {
            name: "aian+nhpi",
            when: |f: &RaceFlags| f.aian && f.nhpi,
            value: Race::Biracial,
        },
    ];
    rules.extend(single_flag_rules());
    RuleChain::new(rules)
}
