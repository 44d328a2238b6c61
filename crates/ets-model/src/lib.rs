//! Data model for the perinatal tobacco-exposure dataset.
//!
//! - **columns**: the fixed column contract of the dyad file and the
//!   repeated-measures column groups
//! - **enums**: categorical values and the code tables that produce them
//! - **options**: pipeline configuration

pub mod columns;
pub mod enums;
pub mod options;

pub use columns::{
    CHILD_EXPOSURE, ColumnGroup, Inventory, POSTPARTUM_SMOKING, RaceColumns, TRIMESTER_SMOKING,
    required_columns,
};
pub use enums::{
    Education, Employment, Ethnicity, ExposureLevel, ExposureOccasion, Race, SdpLabel, Sex,
    Substance,
};
pub use options::{ChildRaceRule, PipelineOptions, SWAN_CORRECTION_IDS};
