//! Rollups over the long table for presentation collaborators.
//!
//! All of these are plain reductions: null values are skipped, and rows
//! with a null year are excluded from year-keyed groupings (they stay in
//! country-only groupings, where the key is still defined). BTreeMap keys
//! keep the output order deterministic regardless of input row order.

use std::collections::BTreeMap;

use surv_model::Disease;

use crate::long::LongTable;

/// Sum of value by (disease, year).
pub fn totals_by_disease_year(table: &LongTable) -> BTreeMap<(Disease, i64), f64> {
    let mut totals = BTreeMap::new();
    for record in &table.records {
        let (Some(year), Some(value)) = (record.year, record.value) else {
            continue;
        };
        *totals.entry((record.disease, year)).or_insert(0.0) += value;
    }
    totals
}

/// Sum of value by (region, year).
pub fn totals_by_region_year(table: &LongTable) -> BTreeMap<(String, i64), f64> {
    let mut totals = BTreeMap::new();
    for record in &table.records {
        let (Some(year), Some(value)) = (record.year, record.value) else {
            continue;
        };
        *totals.entry((record.region.clone(), year)).or_insert(0.0) += value;
    }
    totals
}

/// Sum of value by country, ranked descending (ties broken by country name).
///
/// Null-year rows count here: the grouping key does not involve the year.
pub fn country_ranking(table: &LongTable) -> Vec<(String, f64)> {
    let mut totals: BTreeMap<String, f64> = BTreeMap::new();
    for record in &table.records {
        let Some(value) = record.value else {
            continue;
        };
        *totals.entry(record.country.clone()).or_insert(0.0) += value;
    }
    let mut ranked: Vec<(String, f64)> = totals.into_iter().collect();
    ranked.sort_by(|a, b| b.1.total_cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
    ranked
}

/// Sum of value by country for a single year, for geographic display.
pub fn totals_by_country_for_year(table: &LongTable, year: i64) -> BTreeMap<String, f64> {
    let mut totals = BTreeMap::new();
    for record in &table.records {
        if record.year != Some(year) {
            continue;
        }
        let Some(value) = record.value else {
            continue;
        };
        *totals.entry(record.country.clone()).or_insert(0.0) += value;
    }
    totals
}
