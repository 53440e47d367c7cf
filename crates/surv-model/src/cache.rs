//! Keyed memoization cache for pipeline outputs.
//!
//! The pipeline memoizes normalization and per-country anomaly results keyed
//! by (input identity, parameters). An explicit cache object keeps that state
//! visible and testable instead of hiding it in process-wide statics.

use std::collections::BTreeMap;

/// A key → value cache with explicit invalidation.
///
/// Keys embed every input the computation depends on (dataset fingerprint,
/// parameters), so a changed input naturally misses and recomputes.
#[derive(Debug, Clone)]
pub struct ResultCache<K: Ord, V> {
    entries: BTreeMap<K, V>,
}

impl<K: Ord, V> Default for ResultCache<K, V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: Ord, V> ResultCache<K, V> {
    pub fn new() -> Self {
        Self {
            entries: BTreeMap::new(),
        }
    }

    pub fn get(&self, key: &K) -> Option<&V> {
        self.entries.get(key)
    }

    pub fn insert(&mut self, key: K, value: V) {
        self.entries.insert(key, value);
    }

    /// Return the cached value for `key`, computing and storing it on a miss.
    pub fn get_or_insert_with(&mut self, key: K, compute: impl FnOnce() -> V) -> &V {
        self.entries.entry(key).or_insert_with(compute)
    }

    /// Fallible variant of [`ResultCache::get_or_insert_with`]; a failed
    /// computation leaves the cache unchanged.
    pub fn try_get_or_insert_with<E>(
        &mut self,
        key: K,
        compute: impl FnOnce() -> Result<V, E>,
    ) -> Result<&V, E> {
        use std::collections::btree_map::Entry;
        match self.entries.entry(key) {
            Entry::Occupied(entry) => Ok(entry.into_mut()),
            Entry::Vacant(entry) => Ok(entry.insert(compute()?)),
        }
    }

    /// Drop the entry for `key`, if present.
    pub fn invalidate(&mut self, key: &K) -> Option<V> {
        self.entries.remove(key)
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
