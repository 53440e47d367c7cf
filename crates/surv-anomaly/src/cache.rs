//! Memoized per-country anomaly results.

use anyhow::Result;
use polars::prelude::DataFrame;
use tracing::debug;

use surv_ingest::DatasetId;
use surv_model::ResultCache;

use crate::detector::{AnomalyOptions, CountryAnomalies, detect_country};

/// Cache key: every input the detection depends on. A changed dataset or
/// parameter produces a different key and therefore a recomputation.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct AnomalyKey {
    pub dataset: DatasetId,
    pub country: String,
    pub contamination_bits: u64,
    pub seed: u64,
    pub single_trees: usize,
    pub joint_trees: usize,
}

impl AnomalyKey {
    pub fn new(dataset: &DatasetId, country: &str, options: &AnomalyOptions) -> Self {
        Self {
            dataset: dataset.clone(),
            country: country.to_string(),
            contamination_bits: options.contamination.to_bits(),
            seed: options.seed,
            single_trees: options.single_trees,
            joint_trees: options.joint_trees,
        }
    }
}

/// Keyed cache over [`detect_country`]. Absent results (insufficient data)
/// are cached as well.
#[derive(Debug, Default)]
pub struct AnomalyCache {
    inner: ResultCache<AnomalyKey, Option<CountryAnomalies>>,
}

impl AnomalyCache {
    pub fn new() -> Self {
        Self {
            inner: ResultCache::new(),
        }
    }

    pub fn detect(
        &mut self,
        dataset: &DatasetId,
        wide: &DataFrame,
        country: &str,
        options: &AnomalyOptions,
    ) -> Result<Option<CountryAnomalies>> {
        let key = AnomalyKey::new(dataset, country, options);
        if let Some(hit) = self.inner.get(&key) {
            debug!(country, dataset = dataset.short(), "anomaly cache hit");
            return Ok(hit.clone());
        }
        let result = detect_country(wide, country, options)?;
        self.inner.insert(key, result.clone());
        Ok(result)
    }

    pub fn invalidate(&mut self, dataset: &DatasetId, country: &str, options: &AnomalyOptions) {
        self.inner.invalidate(&AnomalyKey::new(dataset, country, options));
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
