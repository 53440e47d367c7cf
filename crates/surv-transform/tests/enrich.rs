//! Tests for rolling means and year-over-year growth.

use surv_model::Disease;
use surv_transform::{LongRecord, LongTable, enrich_long};

fn record(country: &str, disease: Disease, year: i64, value: Option<f64>) -> LongRecord {
    LongRecord::new("EUR", country, Some(year), disease, value)
}

fn assert_close(actual: Option<f64>, expected: f64) {
    let actual = actual.expect("expected a value");
    assert!(
        (actual - expected).abs() < 1e-12,
        "expected {expected}, got {actual}"
    );
}

#[test]
fn worked_example_rolls_and_growth() {
    // (CountryA,2020,100), (CountryA,2021,150), (CountryA,2022,95)
    let mut table = LongTable::new(vec![
        record("CountryA", Disease::Measles, 2020, Some(100.0)),
        record("CountryA", Disease::Measles, 2021, Some(150.0)),
        record("CountryA", Disease::Measles, 2022, Some(95.0)),
    ]);
    enrich_long(&mut table);

    assert_close(table.records[0].roll3, 100.0);
    assert_close(table.records[1].roll3, 125.0);
    assert_close(table.records[2].roll3, 115.0);

    assert_eq!(table.records[0].yoy, None);
    assert_close(table.records[1].yoy, 0.5);
    assert_close(table.records[2].yoy, 95.0 / 150.0 - 1.0);
}

#[test]
fn first_row_of_every_group_has_null_yoy() {
    let mut table = LongTable::new(vec![
        record("A", Disease::Measles, 2020, Some(10.0)),
        record("A", Disease::Measles, 2021, Some(20.0)),
        record("A", Disease::Rubella, 2020, Some(5.0)),
        record("A", Disease::Rubella, 2021, Some(10.0)),
        record("B", Disease::Measles, 2020, Some(7.0)),
    ]);
    enrich_long(&mut table);
    assert_eq!(table.records[0].yoy, None);
    assert_eq!(table.records[2].yoy, None);
    assert_eq!(table.records[4].yoy, None);
    assert_close(table.records[1].yoy, 1.0);
    assert_close(table.records[3].yoy, 1.0);
}

#[test]
fn windows_reset_at_group_boundaries() {
    // Country B's first roll3 must not see country A's values.
    let mut table = LongTable::new(vec![
        record("A", Disease::Measles, 2020, Some(1000.0)),
        record("A", Disease::Measles, 2021, Some(1000.0)),
        record("B", Disease::Measles, 2020, Some(10.0)),
    ]);
    enrich_long(&mut table);
    assert_close(table.records[2].roll3, 10.0);
    assert_close(table.records[2].roll5, 10.0);
}

#[test]
fn roll5_spans_five_trailing_rows() {
    let values = [2.0, 4.0, 6.0, 8.0, 10.0, 12.0];
    let mut table = LongTable::new(
        values
            .iter()
            .enumerate()
            .map(|(i, v)| record("A", Disease::Measles, 2000 + i as i64, Some(*v)))
            .collect(),
    );
    enrich_long(&mut table);
    // row 4: mean of rows 0..=4; row 5: mean of rows 1..=5
    assert_close(table.records[4].roll5, 6.0);
    assert_close(table.records[5].roll5, 8.0);
    // roll3 at row 5: mean of rows 3..=5
    assert_close(table.records[5].roll3, 10.0);
}

#[test]
fn zero_previous_value_gives_null_yoy() {
    let mut table = LongTable::new(vec![
        record("A", Disease::Measles, 2020, Some(0.0)),
        record("A", Disease::Measles, 2021, Some(50.0)),
    ]);
    enrich_long(&mut table);
    assert_eq!(table.records[1].yoy, None);
}

#[test]
fn null_values_skip_windows_but_break_yoy() {
    let mut table = LongTable::new(vec![
        record("A", Disease::Measles, 2020, Some(10.0)),
        record("A", Disease::Measles, 2021, None),
        record("A", Disease::Measles, 2022, Some(30.0)),
    ]);
    enrich_long(&mut table);
    // roll3 at row 1 still has the row-0 observation
    assert_close(table.records[1].roll3, 10.0);
    // roll3 at row 2 averages the two non-null observations
    assert_close(table.records[2].roll3, 20.0);
    // yoy against a null previous value is undefined
    assert_eq!(table.records[1].yoy, None);
    assert_eq!(table.records[2].yoy, None);
}

#[test]
fn year_gaps_use_prior_row_not_prior_calendar_year() {
    let mut table = LongTable::new(vec![
        record("A", Disease::Measles, 2015, Some(100.0)),
        record("A", Disease::Measles, 2020, Some(150.0)),
    ]);
    enrich_long(&mut table);
    assert_close(table.records[1].yoy, 0.5);
}

#[test]
fn duplicate_years_are_consecutive_observations_in_input_order() {
    let mut table = LongTable::new(vec![
        record("A", Disease::Measles, 2020, Some(10.0)),
        record("A", Disease::Measles, 2020, Some(20.0)),
        record("A", Disease::Measles, 2021, Some(30.0)),
    ]);
    enrich_long(&mut table);
    assert_close(table.records[1].yoy, 1.0);
    assert_close(table.records[2].roll3, 20.0);
}

#[test]
fn per100k_groups_enrich_like_any_other_disease() {
    let mut table = LongTable::new(vec![
        record("A", Disease::MeaslesPer100k, 2020, Some(1.0)),
        record("A", Disease::MeaslesPer100k, 2021, Some(3.0)),
    ]);
    enrich_long(&mut table);
    assert_close(table.records[1].roll3, 2.0);
    assert_close(table.records[1].yoy, 2.0);
}
