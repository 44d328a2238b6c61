//! Categorical values of the dyad dataset.
//!
//! Each code table is total over its documented domain: `from_code`
//! returns `None` for anything outside it, and callers keep that `None` as a
//! missing value instead of guessing a default.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::columns::{COTININE_6MO, COTININE_34WK, EXPOSURE_6MO, EXPOSURE_34WK};

/// Composite race category.
///
/// Declaration order is the display order used by race-stratified tables.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Race {
    Biracial,
    AmericanIndianAlaskaNative,
    Asian,
    NativeHawaiianPacificIslander,
    Black,
    White,
    Other,
}

impl Race {
    pub const ALL: [Race; 7] = [
        Race::Biracial,
        Race::AmericanIndianAlaskaNative,
        Race::Asian,
        Race::NativeHawaiianPacificIslander,
        Race::Black,
        Race::White,
        Race::Other,
    ];

    /// Single-flag categories in recoding priority order.
    pub const SINGLE: [Race; 6] = [
        Race::AmericanIndianAlaskaNative,
        Race::Asian,
        Race::NativeHawaiianPacificIslander,
        Race::Black,
        Race::White,
        Race::Other,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Race::Biracial => "Biracial",
            Race::AmericanIndianAlaskaNative => "American Indian/Alaska Native",
            Race::Asian => "Asian",
            Race::NativeHawaiianPacificIslander => "Native Hawaiian/Pacific Islander",
            Race::Black => "Black",
            Race::White => "White",
            Race::Other => "Other",
        }
    }

    pub fn from_label(label: &str) -> Option<Self> {
        Race::ALL
            .into_iter()
            .find(|race| race.as_str().eq_ignore_ascii_case(label.trim()))
    }
}

impl fmt::Display for Race {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Sex {
    Female,
    Male,
}

impl Sex {
    pub fn from_code(code: i64) -> Option<Self> {
        match code {
            1 => Some(Sex::Female),
            0 => Some(Sex::Male),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Sex::Female => "F",
            Sex::Male => "M",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Ethnicity {
    NotHispanic,
    Hispanic,
}

impl Ethnicity {
    pub fn from_code(code: i64) -> Option<Self> {
        match code {
            0 => Some(Ethnicity::NotHispanic),
            1 => Some(Ethnicity::Hispanic),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Ethnicity::NotHispanic => "Not Hispanic/Latino",
            Ethnicity::Hispanic => "Hispanic/Latino",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Employment {
    Unemployed,
    PartTime,
    FullTime,
}

impl Employment {
    pub fn from_code(code: i64) -> Option<Self> {
        match code {
            0 => Some(Employment::Unemployed),
            1 => Some(Employment::PartTime),
            2 => Some(Employment::FullTime),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Employment::Unemployed => "No",
            Employment::PartTime => "Part-time",
            Employment::FullTime => "Full-time",
        }
    }
}

/// Highest parental education. There is no catch-all level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Education {
    SomeHighSchool,
    HighSchool,
    Ged,
    SomeCollege,
    TwoYearDegree,
    FourYearDegree,
    Postgraduate,
}

impl Education {
    pub const ALL: [Education; 7] = [
        Education::SomeHighSchool,
        Education::HighSchool,
        Education::Ged,
        Education::SomeCollege,
        Education::TwoYearDegree,
        Education::FourYearDegree,
        Education::Postgraduate,
    ];

    pub fn from_code(code: i64) -> Option<Self> {
        usize::try_from(code)
            .ok()
            .and_then(|idx| Education::ALL.get(idx).copied())
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Education::SomeHighSchool => "Some high school",
            Education::HighSchool => "High school",
            Education::Ged => "GED",
            Education::SomeCollege => "Some college",
            Education::TwoYearDegree => "2-year degree",
            Education::FourYearDegree => "4-year degree",
            Education::Postgraduate => "Postgraduate degree",
        }
    }

    pub fn from_label(label: &str) -> Option<Self> {
        Education::ALL
            .into_iter()
            .find(|level| level.as_str() == label.trim())
    }
}

/// Cotinine sampling occasion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum ExposureOccasion {
    /// 34 weeks gestation.
    Gestation34Wk,
    /// 6 months postpartum.
    Postpartum6Mo,
}

impl ExposureOccasion {
    pub const ALL: [ExposureOccasion; 2] = [
        ExposureOccasion::Gestation34Wk,
        ExposureOccasion::Postpartum6Mo,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ExposureOccasion::Gestation34Wk => "34wk",
            ExposureOccasion::Postpartum6Mo => "6mo",
        }
    }

    pub fn cotinine_column(&self) -> &'static str {
        match self {
            ExposureOccasion::Gestation34Wk => COTININE_34WK,
            ExposureOccasion::Postpartum6Mo => COTININE_6MO,
        }
    }

    pub fn category_column(&self) -> &'static str {
        match self {
            ExposureOccasion::Gestation34Wk => EXPOSURE_34WK,
            ExposureOccasion::Postpartum6Mo => EXPOSURE_6MO,
        }
    }
}

/// Smoke exposure level derived from urine cotinine (ng/mL).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum ExposureLevel {
    Nonsmoker,
    Passive,
    Active,
}

impl ExposureLevel {
    /// Concentrations below this are classified as nonsmoker.
    pub const PASSIVE_THRESHOLD: f64 = 100.0;
    /// Concentrations at or above this are classified as active.
    pub const ACTIVE_THRESHOLD: f64 = 500.0;

    pub const ALL: [ExposureLevel; 3] = [
        ExposureLevel::Nonsmoker,
        ExposureLevel::Passive,
        ExposureLevel::Active,
    ];

    pub fn from_cotinine(concentration: f64) -> Self {
        if concentration < Self::PASSIVE_THRESHOLD {
            ExposureLevel::Nonsmoker
        } else if concentration < Self::ACTIVE_THRESHOLD {
            ExposureLevel::Passive
        } else {
            ExposureLevel::Active
        }
    }

    /// Label as written for `occasion`. The 6-month active label differs.
    pub fn label(&self, occasion: ExposureOccasion) -> &'static str {
        match (self, occasion) {
            (ExposureLevel::Nonsmoker, _) => "nonsmoker",
            (ExposureLevel::Passive, _) => "passive",
            (ExposureLevel::Active, ExposureOccasion::Gestation34Wk) => "active",
            (ExposureLevel::Active, ExposureOccasion::Postpartum6Mo) => "active smoker",
        }
    }

    pub fn from_label(label: &str) -> Option<Self> {
        match label.trim() {
            "nonsmoker" => Some(ExposureLevel::Nonsmoker),
            "passive" => Some(ExposureLevel::Passive),
            "active" | "active smoker" => Some(ExposureLevel::Active),
            _ => None,
        }
    }
}

/// Smoking-during-pregnancy label for one trimester observation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum SdpLabel {
    NoSdp,
    Sdp,
}

impl SdpLabel {
    pub fn from_indicator(indicator: i64) -> Self {
        if indicator == 1 {
            SdpLabel::Sdp
        } else {
            SdpLabel::NoSdp
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SdpLabel::NoSdp => "No SDP",
            SdpLabel::Sdp => "SDP",
        }
    }

    pub fn from_label(label: &str) -> Option<Self> {
        match label.trim() {
            "SDP" => Some(SdpLabel::Sdp),
            "No SDP" => Some(SdpLabel::NoSdp),
            _ => None,
        }
    }
}

/// Child self-reported substance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Substance {
    Alcohol,
    Cigarettes,
    ECigarettes,
    Marijuana,
}

impl Substance {
    pub const ALL: [Substance; 4] = [
        Substance::Alcohol,
        Substance::Cigarettes,
        Substance::ECigarettes,
        Substance::Marijuana,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Substance::Alcohol => "Alcohol",
            Substance::Cigarettes => "Cigarettes",
            Substance::ECigarettes => "E-cigarettes",
            Substance::Marijuana => "Marijuana",
        }
    }

    /// Ever-used flag column.
    pub fn ever_column(&self) -> &'static str {
        match self {
            Substance::Alcohol => "alc_ever",
            Substance::Cigarettes => "cig_ever",
            Substance::ECigarettes => "e_cig_ever",
            Substance::Marijuana => "mj_ever",
        }
    }

    /// Days used in the past 30 days.
    pub fn days_column(&self) -> &'static str {
        match self {
            Substance::Alcohol => "num_alc_30",
            Substance::Cigarettes => "num_cigs_30",
            Substance::ECigarettes => "num_e_cigs_30",
            Substance::Marijuana => "num_mj_30",
        }
    }
}
