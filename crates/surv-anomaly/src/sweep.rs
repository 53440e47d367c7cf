//! All-countries anomaly sweep.
//!
//! Per-country fits share no state, so the sweep fans out with rayon while
//! keeping result identity and first-appearance country order. Progress is
//! reported through a caller-supplied callback as countries complete.

use std::collections::BTreeSet;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Instant;

use anyhow::Result;
use polars::prelude::{AnyValue, Column, DataFrame, IntoColumn, Series};
use rayon::prelude::{IntoParallelRefIterator, ParallelIterator};
use tracing::{info, info_span};

use surv_ingest::any_to_string;
use surv_model::columns;

use crate::detector::{AnomalyOptions, CountryAnomalies, detect_country};

/// Result of sweeping every country in the wide table.
#[derive(Debug)]
pub struct AnomalySweep {
    /// Scored countries, in first-appearance order.
    pub countries: Vec<CountryAnomalies>,
    /// Countries skipped for insufficient data, in first-appearance order.
    pub skipped: Vec<String>,
    /// All scored frames stacked into one table, columns union-aligned
    /// (a country missing a feature set gets nulls there). None when no
    /// country could be scored.
    pub combined: Option<DataFrame>,
}

/// Distinct non-empty country names in first-appearance order.
pub fn unique_countries(wide: &DataFrame) -> Vec<String> {
    let Ok(column) = wide.column(columns::COUNTRY) else {
        return Vec::new();
    };
    let mut seen = BTreeSet::new();
    let mut out = Vec::new();
    for idx in 0..wide.height() {
        let name = any_to_string(column.get(idx).unwrap_or(AnyValue::Null))
            .trim()
            .to_string();
        if name.is_empty() {
            continue;
        }
        if seen.insert(name.clone()) {
            out.push(name);
        }
    }
    out
}

/// Run anomaly detection for every country.
///
/// `progress(done, total)` fires after each country completes; completions
/// may arrive out of order under rayon, but the returned collections always
/// follow first-appearance order.
pub fn detect_all<F>(
    wide: &DataFrame,
    options: &AnomalyOptions,
    progress: F,
) -> Result<AnomalySweep>
where
    F: Fn(usize, usize) + Sync,
{
    let span = info_span!("anomaly_sweep");
    let _guard = span.enter();
    let start = Instant::now();

    let countries = unique_countries(wide);
    let total = countries.len();
    let completed = AtomicUsize::new(0);

    let results: Vec<(String, Option<CountryAnomalies>)> = countries
        .par_iter()
        .map(|country| {
            let result = detect_country(wide, country, options);
            let done = completed.fetch_add(1, Ordering::SeqCst) + 1;
            progress(done, total);
            result.map(|outcome| (country.clone(), outcome))
        })
        .collect::<Result<Vec<_>>>()?;

    let mut scored = Vec::new();
    let mut skipped = Vec::new();
    for (country, outcome) in results {
        match outcome {
            Some(result) => scored.push(result),
            None => skipped.push(country),
        }
    }
    let combined = combine_country_frames(&scored)?;

    info!(
        countries = total,
        scored = scored.len(),
        skipped = skipped.len(),
        duration_ms = start.elapsed().as_millis(),
        "anomaly sweep complete"
    );
    Ok(AnomalySweep {
        countries: scored,
        skipped,
        combined,
    })
}

/// Stack per-country frames into one table, aligning differing column sets.
///
/// Column order is first-seen across the inputs; a frame missing a column
/// contributes nulls of the recorded dtype.
pub fn combine_country_frames(results: &[CountryAnomalies]) -> Result<Option<DataFrame>> {
    if results.is_empty() {
        return Ok(None);
    }
    let mut order = Vec::new();
    let mut dtypes = Vec::new();
    for result in results {
        for column in result.frame.get_columns() {
            if !order.contains(column.name()) {
                order.push(column.name().clone());
                dtypes.push(column.dtype().clone());
            }
        }
    }

    let mut combined: Option<DataFrame> = None;
    for result in results {
        let height = result.frame.height();
        let aligned_columns: Vec<Column> = order
            .iter()
            .zip(&dtypes)
            .map(|(name, dtype)| match result.frame.column(name.as_str()) {
                Ok(column) => column.clone(),
                Err(_) => Series::full_null(name.clone(), height, dtype).into_column(),
            })
            .collect();
        let aligned = DataFrame::new(aligned_columns)?;
        combined = Some(match combined {
            None => aligned,
            Some(mut acc) => {
                acc.vstack_mut(&aligned)?;
                acc
            }
        });
    }
    Ok(combined)
}
