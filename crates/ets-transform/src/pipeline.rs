//! Runs the transformation stages in dependency order.

use std::time::Instant;

use ets_model::PipelineOptions;
use polars::prelude::DataFrame;
use tracing::{debug, info_span};

use crate::derive::{SmokingPersistence, derive, label_sdp, smoking_persistence};
use crate::error::Result;
use crate::frame::{DerivedFrame, RawFrame, RecodeReport};
use crate::recode::recode;
use crate::reshape::{
    child_exposure_long, postpartum_smoking_long, race_lookup, trimester_smoking_long,
};

/// Every table the aggregates read, built from one raw dyad table.
#[derive(Debug, Clone)]
pub struct TransformedStudy {
    pub recode_report: RecodeReport,
    /// Recoded dyads plus `trace` and `any_substance`.
    pub dyads: DerivedFrame,
    pub race_lookup: DataFrame,
    pub trimester_smoking: DataFrame,
    pub postpartum_smoking: DataFrame,
    pub child_exposure: DataFrame,
    /// Trimester rows with an observed indicator, labeled SDP / No SDP.
    pub sdp_labels: DataFrame,
    pub persistence: SmokingPersistence,
}

/// Recode, derive and reshape a raw dyad table.
pub fn transform_dyads(raw: &RawFrame, options: &PipelineOptions) -> Result<TransformedStudy> {
    let recoded = recode(raw, options)?;
    let recode_report = recoded.report().clone();
    let dyads = derive(&recoded, options)?;

    let span = info_span!("reshape");
    let _guard = span.enter();
    let start = Instant::now();

    let data = dyads.data();
    let race_lookup = race_lookup(data)?;
    let trimester_smoking = trimester_smoking_long(data)?;
    let postpartum_smoking = postpartum_smoking_long(data)?;
    let child_exposure = child_exposure_long(data)?;
    let sdp_labels = label_sdp(&trimester_smoking)?;
    let persistence = smoking_persistence(&trimester_smoking)?;

    debug!(
        race_rows = race_lookup.height(),
        trimester_rows = trimester_smoking.height(),
        postpartum_rows = postpartum_smoking.height(),
        exposure_rows = child_exposure.height(),
        sdp_rows = sdp_labels.height(),
        duration_ms = start.elapsed().as_millis(),
        "long views built"
    );

    Ok(TransformedStudy {
        recode_report,
        dyads,
        race_lookup,
        trimester_smoking,
        postpartum_smoking,
        child_exposure,
        sdp_labels,
        persistence,
    })
}
