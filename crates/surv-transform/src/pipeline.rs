//! The staged transform runner: normalize → reshape → enrich.

use std::time::Instant;

use polars::prelude::DataFrame;
use tracing::{info, info_span};

use surv_ingest::DatasetId;

use crate::enrich::enrich_long;
use crate::error::TransformError;
use crate::long::LongTable;
use crate::normalize::{NormalizeCache, normalize_frame};
use crate::reshape::reshape_long;

/// Output of the transform pipeline: the canonical wide table and the
/// enriched long table derived from it.
#[derive(Debug, Clone)]
pub struct TransformOutput {
    pub wide: DataFrame,
    pub long: LongTable,
}

/// Run the full transform over a raw frame.
///
/// The pipeline is synchronous and runs to completion; each stage is traced
/// with row counts and durations.
pub fn run_transform(frame: &DataFrame) -> Result<TransformOutput, TransformError> {
    let span = info_span!("transform", rows = frame.height());
    let _guard = span.enter();
    let start = Instant::now();

    let wide = info_span!("normalize").in_scope(|| normalize_frame(frame))?;
    let mut long = info_span!("reshape").in_scope(|| reshape_long(&wide));
    info_span!("enrich").in_scope(|| enrich_long(&mut long));

    info!(
        wide_rows = wide.height(),
        long_rows = long.len(),
        duration_ms = start.elapsed().as_millis(),
        "transform complete"
    );
    Ok(TransformOutput { wide, long })
}

/// Like [`run_transform`], but memoizes the normalization stage keyed by
/// dataset identity.
pub fn run_transform_cached(
    cache: &mut NormalizeCache,
    id: &DatasetId,
    frame: &DataFrame,
) -> Result<TransformOutput, TransformError> {
    let span = info_span!("transform", rows = frame.height(), dataset = id.short());
    let _guard = span.enter();
    let start = Instant::now();

    let wide = info_span!("normalize").in_scope(|| cache.normalize(id, frame))?;
    let mut long = info_span!("reshape").in_scope(|| reshape_long(&wide));
    info_span!("enrich").in_scope(|| enrich_long(&mut long));

    info!(
        wide_rows = wide.height(),
        long_rows = long.len(),
        duration_ms = start.elapsed().as_millis(),
        "transform complete"
    );
    Ok(TransformOutput { wide, long })
}
