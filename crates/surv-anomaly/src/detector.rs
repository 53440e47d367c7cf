//! Per-country anomaly scoring over the wide table.

use anyhow::{Context, Result};
use polars::prelude::{AnyValue, Column, DataFrame, IdxCa, IdxSize};
use tracing::{debug, warn};

use surv_ingest::{any_to_f64, any_to_i64, any_to_string};
use surv_model::{Contamination, columns};

use crate::forest::{DEFAULT_SUBSAMPLE, ForestOptions, IsolationForest, label_scores};

/// Minimum observations required before a feature set is scored.
pub const MIN_OBSERVATIONS: usize = 3;

/// Tuning for one detection run. Recorded in cache keys, so any change
/// forces recomputation.
#[derive(Debug, Clone)]
pub struct AnomalyOptions {
    pub contamination: Contamination,
    pub seed: u64,
    /// Ensemble size for the single-feature models.
    pub single_trees: usize,
    /// Ensemble size for the joint model. Deliberately larger: the
    /// two-dimensional feature space gets the bigger ensemble.
    pub joint_trees: usize,
}

impl Default for AnomalyOptions {
    fn default() -> Self {
        Self {
            contamination: Contamination::default(),
            seed: 42,
            single_trees: 100,
            joint_trees: 200,
        }
    }
}

/// One country's wide subset augmented with the anomaly columns that could
/// be scored. Feature sets below [`MIN_OBSERVATIONS`] contribute no columns.
#[derive(Debug, Clone)]
pub struct CountryAnomalies {
    pub country: String,
    pub frame: DataFrame,
}

impl CountryAnomalies {
    /// Rows flagged as an outlier by any scored feature set.
    pub fn flagged_rows(&self) -> usize {
        let height = self.frame.height();
        (0..height)
            .filter(|&idx| {
                ["measles_anomaly", "rubella_anomaly", "joint_anomaly"]
                    .iter()
                    .any(|name| match self.frame.column(name) {
                        Ok(col) => {
                            any_to_i64(col.get(idx).unwrap_or(AnyValue::Null)) == Some(-1)
                        }
                        Err(_) => false,
                    })
            })
            .count()
    }
}

/// Detect anomalies for a single country.
///
/// Returns `Ok(None)` when the country has fewer than [`MIN_OBSERVATIONS`]
/// rows; insufficient data is an absent result, never an error. Unexpected
/// shape problems (missing country column) are downgraded to a warning plus
/// an absent result as well; only structural frame failures propagate.
pub fn detect_country(
    wide: &DataFrame,
    country: &str,
    options: &AnomalyOptions,
) -> Result<Option<CountryAnomalies>> {
    let Ok(country_col) = wide.column(columns::COUNTRY) else {
        warn!(country, "wide table has no country column; nothing to score");
        return Ok(None);
    };
    let year_col = wide.column(columns::YEAR).ok();

    let mut rows: Vec<(Option<i64>, usize)> = Vec::new();
    for idx in 0..wide.height() {
        let name = any_to_string(country_col.get(idx).unwrap_or(AnyValue::Null));
        if name.trim() == country {
            let year =
                year_col.and_then(|col| any_to_i64(col.get(idx).unwrap_or(AnyValue::Null)));
            rows.push((year, idx));
        }
    }
    if rows.len() < MIN_OBSERVATIONS {
        debug!(
            country,
            rows = rows.len(),
            "insufficient data for anomaly detection"
        );
        return Ok(None);
    }

    // Year ascending, null years last; stable for duplicate years.
    rows.sort_by_key(|&(year, _)| (year.is_none(), year.unwrap_or(0)));
    let indices: Vec<IdxSize> = rows.iter().map(|&(_, idx)| idx as IdxSize).collect();
    let take = IdxCa::from_vec("take".into(), indices);
    let mut frame = wide
        .take(&take)
        .with_context(|| format!("gather wide rows for {country}"))?;

    let measles = measure_values(&frame, columns::MEASLES);
    let rubella = measure_values(&frame, columns::RUBELLA);

    if let Some(values) = &measles {
        let observed: Vec<(usize, Vec<f64>)> = values
            .iter()
            .enumerate()
            .filter_map(|(idx, v)| v.map(|v| (idx, vec![v])))
            .collect();
        attach_scores(&mut frame, &observed, options.single_trees, options, "measles")?;
    }
    if let Some(values) = &rubella {
        let observed: Vec<(usize, Vec<f64>)> = values
            .iter()
            .enumerate()
            .filter_map(|(idx, v)| v.map(|v| (idx, vec![v])))
            .collect();
        attach_scores(&mut frame, &observed, options.single_trees, options, "rubella")?;
    }
    if let (Some(measles), Some(rubella)) = (&measles, &rubella) {
        // Joint set: rows with any null are dropped before fitting.
        let observed: Vec<(usize, Vec<f64>)> = measles
            .iter()
            .zip(rubella)
            .enumerate()
            .filter_map(|(idx, (m, r))| match (m, r) {
                (Some(m), Some(r)) => Some((idx, vec![*m, *r])),
                _ => None,
            })
            .collect();
        attach_scores(&mut frame, &observed, options.joint_trees, options, "joint")?;
    }

    Ok(Some(CountryAnomalies {
        country: country.to_string(),
        frame,
    }))
}

/// Pull a measure column as per-row optional values; None when absent.
fn measure_values(frame: &DataFrame, name: &str) -> Option<Vec<Option<f64>>> {
    let column = frame.column(name).ok()?;
    Some(
        (0..frame.height())
            .map(|idx| any_to_f64(column.get(idx).unwrap_or(AnyValue::Null)))
            .collect(),
    )
}

/// Fit a fresh forest on one feature set and append `<prefix>_anomaly` /
/// `<prefix>_anomaly_score` columns. Rows outside the fitted set stay null;
/// a set below [`MIN_OBSERVATIONS`] is skipped entirely (no columns).
fn attach_scores(
    frame: &mut DataFrame,
    observed: &[(usize, Vec<f64>)],
    trees: usize,
    options: &AnomalyOptions,
    prefix: &str,
) -> Result<()> {
    if observed.len() < MIN_OBSERVATIONS {
        debug!(
            feature_set = prefix,
            observations = observed.len(),
            "feature set skipped"
        );
        return Ok(());
    }
    let matrix: Vec<Vec<f64>> = observed.iter().map(|(_, point)| point.clone()).collect();
    let forest = IsolationForest::fit(
        &matrix,
        &ForestOptions {
            trees,
            seed: options.seed,
            max_subsample: DEFAULT_SUBSAMPLE,
        },
    );
    let scores = forest.score_samples(&matrix);
    let labels = label_scores(&scores, options.contamination);

    let height = frame.height();
    let mut label_col: Vec<Option<i32>> = vec![None; height];
    let mut score_col: Vec<Option<f64>> = vec![None; height];
    for (pos, &(row, _)) in observed.iter().enumerate() {
        label_col[row] = Some(labels[pos]);
        score_col[row] = Some(scores[pos]);
    }
    frame
        .with_column(Column::new(format!("{prefix}_anomaly").into(), label_col))
        .with_context(|| format!("append {prefix} labels"))?;
    frame
        .with_column(Column::new(
            format!("{prefix}_anomaly_score").into(),
            score_col,
        ))
        .with_context(|| format!("append {prefix} scores"))?;
    Ok(())
}
