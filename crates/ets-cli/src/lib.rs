//! CLI library components for the tobacco-exposure analysis.

pub mod logging;
pub mod output;
pub mod pipeline;
