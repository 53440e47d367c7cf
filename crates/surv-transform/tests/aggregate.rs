//! Tests for long-table rollups.

use surv_model::Disease;
use surv_transform::LongTable;
use surv_transform::aggregate::{
    country_ranking, totals_by_country_for_year, totals_by_disease_year, totals_by_region_year,
};
use surv_transform::long::LongRecord;

fn record(
    region: &str,
    country: &str,
    year: Option<i64>,
    disease: Disease,
    value: Option<f64>,
) -> LongRecord {
    LongRecord::new(region, country, year, disease, value)
}

fn fixture() -> LongTable {
    LongTable::new(vec![
        record("EUR", "France", Some(2020), Disease::Measles, Some(100.0)),
        record("EUR", "France", Some(2021), Disease::Measles, Some(150.0)),
        record("EUR", "France", Some(2020), Disease::Rubella, Some(5.0)),
        record("AFR", "Angola", Some(2020), Disease::Measles, Some(30.0)),
        record("AFR", "Angola", Some(2021), Disease::Rubella, Some(2.0)),
        // gaps: null value and null year
        record("AFR", "Angola", Some(2021), Disease::Measles, None),
        record("EUR", "France", None, Disease::Measles, Some(999.0)),
    ])
}

#[test]
fn sums_by_disease_and_year() {
    let totals = totals_by_disease_year(&fixture());
    assert_eq!(totals.get(&(Disease::Measles, 2020)), Some(&130.0));
    assert_eq!(totals.get(&(Disease::Measles, 2021)), Some(&150.0));
    assert_eq!(totals.get(&(Disease::Rubella, 2020)), Some(&5.0));
    assert_eq!(totals.get(&(Disease::Rubella, 2021)), Some(&2.0));
    // null-year row is excluded from year-keyed rollups
    assert_eq!(totals.len(), 4);
}

#[test]
fn sums_are_independent_of_input_row_order() {
    let forward = totals_by_disease_year(&fixture());
    let mut reversed_records = fixture().records;
    reversed_records.reverse();
    let reversed = totals_by_disease_year(&LongTable::new(reversed_records));
    assert_eq!(forward, reversed);
}

#[test]
fn sums_by_region_and_year() {
    let totals = totals_by_region_year(&fixture());
    assert_eq!(totals.get(&("EUR".to_string(), 2020)), Some(&105.0));
    assert_eq!(totals.get(&("AFR".to_string(), 2020)), Some(&30.0));
    assert_eq!(totals.get(&("AFR".to_string(), 2021)), Some(&2.0));
}

#[test]
fn country_ranking_descends_and_keeps_null_year_rows() {
    let ranked = country_ranking(&fixture());
    // France: 100 + 150 + 5 + 999 (null-year row still counts) = 1254
    assert_eq!(ranked[0], ("France".to_string(), 1254.0));
    assert_eq!(ranked[1], ("Angola".to_string(), 32.0));
}

#[test]
fn ranking_breaks_ties_by_country_name() {
    let table = LongTable::new(vec![
        record("R", "B", Some(2020), Disease::Measles, Some(10.0)),
        record("R", "A", Some(2020), Disease::Measles, Some(10.0)),
    ]);
    let ranked = country_ranking(&table);
    assert_eq!(ranked[0].0, "A");
    assert_eq!(ranked[1].0, "B");
}

#[test]
fn single_year_totals_for_geographic_display() {
    let totals = totals_by_country_for_year(&fixture(), 2020);
    assert_eq!(totals.get("France"), Some(&105.0));
    assert_eq!(totals.get("Angola"), Some(&30.0));
    assert!(totals_by_country_for_year(&fixture(), 1999).is_empty());
}
