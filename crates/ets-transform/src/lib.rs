//! Transformation stages for the dyad dataset.
//!
//! - **recode**: coded source columns to semantic values, sentinel correction
//! - **derive**: child race, composite substance use, SDP labels, smoking
//!   persistence
//! - **reshape**: long views of the repeated-measures groups and the race
//!   lookup
//! - **rules**: ordered first-match rule lists
//! - **frame**: stage frame types
//! - **pipeline**: runs the stages in order

pub mod derive;
pub mod error;
pub mod frame;
pub mod pipeline;
pub mod recode;
pub mod reshape;
pub mod rules;

pub use derive::{SmokingPersistence, any_substance, derive, label_sdp, smoking_persistence};
pub use error::{Result, TransformError};
pub use frame::{DeriveReport, DerivedFrame, RawFrame, RecodeReport, RecodedFrame};
pub use pipeline::{TransformedStudy, transform_dyads};
pub use recode::recode;
pub use reshape::{
    child_exposure_long, postpartum_smoking_long, race_lookup, trimester_smoking_long,
};
pub use rules::{RaceFlags, Rule, RuleChain};
