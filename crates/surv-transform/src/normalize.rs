//! Schema normalization: raw table → canonical wide table.

use polars::prelude::{AnyValue, Column, DataFrame};
use tracing::debug;

use surv_ingest::{DatasetId, any_to_f64, any_to_string};
use surv_model::{ResultCache, columns};

use crate::error::TransformError;

/// Coerce a cell to an integer year. Non-numeric and fractional values
/// become null; nothing raises.
fn coerce_year(value: AnyValue<'_>) -> Option<i64> {
    let v = any_to_f64(value)?;
    if v.is_finite() && v.fract() == 0.0 {
        Some(v as i64)
    } else {
        None
    }
}

/// Normalize a raw table into the canonical wide schema.
///
/// - known source headers are renamed (`Region` → `region`, ...);
///   unrecognized columns pass through unchanged
/// - `region`/`country` are stringified and trimmed
/// - `year` is coerced to integer, invalid cells become null
/// - measure columns are coerced to float, invalid cells become null
///
/// Returns a new owned frame; the input is never mutated. Rows are neither
/// dropped nor deduplicated, and a missing identity column is not an error;
/// downstream consumers observe the resulting emptiness instead.
pub fn normalize_frame(frame: &DataFrame) -> Result<DataFrame, TransformError> {
    let height = frame.height();
    let mut out: Vec<Column> = Vec::with_capacity(frame.width());

    for column in frame.get_columns() {
        let source_name = column.name().as_str();
        let name = columns::canonical_name(source_name).unwrap_or(source_name);

        if name == columns::REGION || name == columns::COUNTRY {
            let values: Vec<String> = (0..height)
                .map(|idx| {
                    let cell = column.get(idx).unwrap_or(AnyValue::Null);
                    any_to_string(cell).trim().to_string()
                })
                .collect();
            out.push(Column::new(name.into(), values));
        } else if name == columns::YEAR {
            let values: Vec<Option<i64>> = (0..height)
                .map(|idx| coerce_year(column.get(idx).unwrap_or(AnyValue::Null)))
                .collect();
            out.push(Column::new(name.into(), values));
        } else if columns::is_measure_column(name) {
            let values: Vec<Option<f64>> = (0..height)
                .map(|idx| any_to_f64(column.get(idx).unwrap_or(AnyValue::Null)))
                .collect();
            out.push(Column::new(name.into(), values));
        } else {
            // Passthrough column: keep values and dtype untouched.
            out.push(column.clone());
        }
    }

    let normalized = DataFrame::new(out)?;
    debug!(
        rows = normalized.height(),
        columns = normalized.width(),
        "normalized wide table"
    );
    Ok(normalized)
}

/// Memoizing wrapper around [`normalize_frame`], keyed by dataset identity.
///
/// Frame clones are cheap (shared column buffers), so hits hand back an
/// owned frame without recomputation.
#[derive(Debug, Default)]
pub struct NormalizeCache {
    inner: ResultCache<DatasetId, DataFrame>,
}

impl NormalizeCache {
    pub fn new() -> Self {
        Self {
            inner: ResultCache::new(),
        }
    }

    pub fn normalize(
        &mut self,
        id: &DatasetId,
        frame: &DataFrame,
    ) -> Result<DataFrame, TransformError> {
        if let Some(hit) = self.inner.get(id) {
            debug!(dataset = id.short(), "normalize cache hit");
            return Ok(hit.clone());
        }
        let normalized = normalize_frame(frame)?;
        self.inner.insert(id.clone(), normalized.clone());
        Ok(normalized)
    }

    pub fn invalidate(&mut self, id: &DatasetId) {
        self.inner.invalidate(id);
    }

    pub fn clear(&mut self) {
        self.inner.clear();
    }

    pub fn len(&self) -> usize {
        self.inner.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }
}
