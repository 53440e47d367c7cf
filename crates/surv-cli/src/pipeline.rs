//! The staged analysis pipeline.
//!
//! Stages run in order, each taking the previous stage's output:
//! 1. **Ingest**: read the source file, fingerprint it
//! 2. **Transform**: normalize → reshape → enrich (memoized normalization)
//! 3. **Anomalies**: per-country outlier scoring (all countries or a
//!    selection; memoized per country)
//! 4. **Output**: write the long-table CSV, summary report, and anomaly CSV
//!
//! Stage 4 collects per-file soft errors instead of aborting, so a failed
//! export never loses the rest of the run.

use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::{Context, Result};
use polars::prelude::DataFrame;
use tracing::{info, info_span};

use surv_anomaly::{
    AnomalyCache, AnomalyOptions, CountryAnomalies, combine_country_frames, detect_all,
    unique_countries,
};
use surv_ingest::{DatasetId, load_frame};
use surv_report::{write_frame_csv, write_long_csv, write_summary_report};
use surv_transform::pipeline::run_transform_cached;
use surv_transform::{NormalizeCache, TransformOutput};

/// Session-scoped caches keyed by dataset identity and parameters.
#[derive(Debug, Default)]
pub struct AnalysisSession {
    pub normalize_cache: NormalizeCache,
    pub anomaly_cache: AnomalyCache,
}

impl AnalysisSession {
    pub fn new() -> Self {
        Self::default()
    }
}

// ============================================================================
// Stage 1: Ingest
// ============================================================================

/// Result of the ingest stage.
#[derive(Debug)]
pub struct IngestResult {
    pub frame: DataFrame,
    pub dataset: DatasetId,
    pub source: PathBuf,
}

/// Read and fingerprint the source file. Unreadable input is a hard error.
pub fn ingest(path: &Path) -> Result<IngestResult> {
    let span = info_span!("ingest", source = %path.display());
    let _guard = span.enter();
    let start = Instant::now();
    let (frame, dataset) =
        load_frame(path).with_context(|| format!("read {}", path.display()))?;
    info!(
        rows = frame.height(),
        columns = frame.width(),
        dataset = dataset.short(),
        duration_ms = start.elapsed().as_millis(),
        "ingest complete"
    );
    Ok(IngestResult {
        frame,
        dataset,
        source: path.to_path_buf(),
    })
}

// ============================================================================
// Stage 2: Transform
// ============================================================================

/// Run normalize → reshape → enrich with the session's normalize cache.
pub fn transform(
    session: &mut AnalysisSession,
    ingest: &IngestResult,
) -> Result<TransformOutput> {
    let output = run_transform_cached(
        &mut session.normalize_cache,
        &ingest.dataset,
        &ingest.frame,
    )?;
    Ok(output)
}

// ============================================================================
// Stage 3: Anomalies
// ============================================================================

/// Result of the anomaly stage.
#[derive(Debug, Default)]
pub struct AnomalyStageResult {
    /// Scored countries in first-appearance (or selection) order.
    pub scored: Vec<CountryAnomalies>,
    /// Countries with insufficient history.
    pub skipped: Vec<String>,
    /// All scored frames stacked, columns union-aligned.
    pub combined: Option<DataFrame>,
}

impl AnomalyStageResult {
    pub fn flagged_rows(&self) -> usize {
        self.scored.iter().map(CountryAnomalies::flagged_rows).sum()
    }
}

/// Score anomalies for `selection` (all countries when empty).
///
/// The full sweep runs countries in parallel and reports progress through
/// `progress(done, total)`; an explicit selection goes through the
/// per-country cache so repeated names cost one fit.
pub fn anomalies<F>(
    session: &mut AnalysisSession,
    ingest: &IngestResult,
    wide: &DataFrame,
    selection: &[String],
    options: &AnomalyOptions,
    progress: F,
) -> Result<AnomalyStageResult>
where
    F: Fn(usize, usize) + Sync,
{
    if selection.is_empty() {
        let sweep = detect_all(wide, options, progress)?;
        return Ok(AnomalyStageResult {
            scored: sweep.countries,
            skipped: sweep.skipped,
            combined: sweep.combined,
        });
    }

    let total = selection.len();
    let mut scored = Vec::new();
    let mut skipped = Vec::new();
    for (idx, country) in selection.iter().enumerate() {
        let result = session
            .anomaly_cache
            .detect(&ingest.dataset, wide, country, options)?;
        match result {
            Some(result) => scored.push(result),
            None => skipped.push(country.clone()),
        }
        progress(idx + 1, total);
    }
    let combined = combine_country_frames(&scored)?;
    info!(
        requested = total,
        scored = scored.len(),
        skipped = skipped.len(),
        "anomaly selection complete"
    );
    Ok(AnomalyStageResult {
        scored,
        skipped,
        combined,
    })
}

/// Countries available for scoring, in first-appearance order.
pub fn countries(wide: &DataFrame) -> Vec<String> {
    unique_countries(wide)
}

// ============================================================================
// Stage 4: Output
// ============================================================================

/// Result of the output stage.
#[derive(Debug, Default)]
pub struct OutputResult {
    pub long_csv: Option<PathBuf>,
    pub summary_report: Option<PathBuf>,
    pub anomalies_csv: Option<PathBuf>,
    /// Soft errors: an output that failed to write, by name.
    pub errors: Vec<String>,
}

/// Write output files. A dry run reports what would be written and touches
/// nothing; individual write failures are collected, not fatal.
pub fn output(
    output_dir: &Path,
    transform: &TransformOutput,
    anomalies: Option<&DataFrame>,
    dry_run: bool,
) -> Result<OutputResult> {
    let span = info_span!("output", dir = %output_dir.display());
    let _guard = span.enter();
    let start = Instant::now();
    let mut result = OutputResult::default();

    if dry_run {
        info!(
            long_rows = transform.long.len(),
            duration_ms = start.elapsed().as_millis(),
            "output skipped (dry run)"
        );
        return Ok(result);
    }

    std::fs::create_dir_all(output_dir)
        .with_context(|| format!("create output dir {}", output_dir.display()))?;

    let long_path = output_dir.join("long_table.csv");
    match write_long_csv(&long_path, &transform.long) {
        Ok(()) => result.long_csv = Some(long_path),
        Err(error) => result.errors.push(format!("long table: {error}")),
    }

    let summary_path = output_dir.join("summary.txt");
    match write_summary_report(&summary_path, &transform.wide, &transform.long) {
        Ok(()) => result.summary_report = Some(summary_path),
        Err(error) => result.errors.push(format!("summary: {error}")),
    }

    if let Some(frame) = anomalies {
        let anomalies_path = output_dir.join("anomalies.csv");
        match write_frame_csv(&anomalies_path, frame) {
            Ok(()) => result.anomalies_csv = Some(anomalies_path),
            Err(error) => result.errors.push(format!("anomalies: {error}")),
        }
    }

    info!(
        long_rows = transform.long.len(),
        outputs = [&result.long_csv, &result.summary_report, &result.anomalies_csv]
            .iter()
            .filter(|path| path.is_some())
            .count(),
        errors = result.errors.len(),
        duration_ms = start.elapsed().as_millis(),
        "output complete"
    );
    Ok(result)
}
