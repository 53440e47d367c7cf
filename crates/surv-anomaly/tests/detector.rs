//! Per-country detection tests.

use polars::prelude::{AnyValue, Column, DataFrame};

use surv_anomaly::{AnomalyCache, AnomalyOptions, detect_country};
use surv_ingest::{any_to_i64, fingerprint_bytes};
use surv_model::Contamination;

type WideRow<'a> = (&'a str, Option<i64>, Option<f64>, Option<f64>);

/// Build a normalized-shape wide frame: (country, year, measles, rubella).
fn wide_frame(rows: &[WideRow<'_>]) -> DataFrame {
    DataFrame::new(vec![
        Column::new(
            "region".into(),
            rows.iter().map(|_| "EUR").collect::<Vec<_>>(),
        ),
        Column::new(
            "country".into(),
            rows.iter().map(|r| r.0).collect::<Vec<_>>(),
        ),
        Column::new("year".into(), rows.iter().map(|r| r.1).collect::<Vec<_>>()),
        Column::new(
            "measles".into(),
            rows.iter().map(|r| r.2).collect::<Vec<_>>(),
        ),
        Column::new(
            "rubella".into(),
            rows.iter().map(|r| r.3).collect::<Vec<_>>(),
        ),
    ])
    .unwrap()
}

fn steady_country() -> DataFrame {
    wide_frame(&[
        ("France", Some(2020), Some(10.0), Some(1.0)),
        ("France", Some(2021), Some(11.0), Some(1.2)),
        ("France", Some(2022), Some(10.5), Some(0.9)),
        ("France", Some(2023), Some(12.0), Some(1.1)),
        ("France", Some(2024), Some(500.0), Some(1.0)),
    ])
}

#[test]
fn fewer_than_three_rows_yields_absent_result() {
    let wide = wide_frame(&[
        ("France", Some(2020), Some(10.0), Some(1.0)),
        ("France", Some(2021), Some(11.0), Some(1.0)),
    ]);
    let result = detect_country(&wide, "France", &AnomalyOptions::default()).unwrap();
    assert!(result.is_none());
}

#[test]
fn unknown_country_yields_absent_result() {
    let result =
        detect_country(&steady_country(), "Atlantis", &AnomalyOptions::default()).unwrap();
    assert!(result.is_none());
}

#[test]
fn scoring_is_deterministic() {
    let wide = steady_country();
    let options = AnomalyOptions::default();
    let first = detect_country(&wide, "France", &options).unwrap().unwrap();
    let second = detect_country(&wide, "France", &options).unwrap().unwrap();
    assert!(first.frame.equals_missing(&second.frame));
}

#[test]
fn rows_are_sorted_by_year_ascending() {
    let wide = wide_frame(&[
        ("France", Some(2022), Some(3.0), None),
        ("France", Some(2020), Some(1.0), None),
        ("France", None, Some(9.0), None),
        ("France", Some(2021), Some(2.0), None),
    ]);
    let result = detect_country(&wide, "France", &AnomalyOptions::default())
        .unwrap()
        .unwrap();
    let years: Vec<Option<i64>> = (0..result.frame.height())
        .map(|idx| {
            any_to_i64(
                result
                    .frame
                    .column("year")
                    .unwrap()
                    .get(idx)
                    .unwrap_or(AnyValue::Null),
            )
        })
        .collect();
    assert_eq!(years, vec![Some(2020), Some(2021), Some(2022), None]);
}

#[test]
fn spike_year_is_flagged_as_outlier() {
    let options = AnomalyOptions {
        contamination: Contamination::new(0.25).unwrap(),
        ..Default::default()
    };
    let result = detect_country(&steady_country(), "France", &options)
        .unwrap()
        .unwrap();
    let labels = result.frame.column("measles_anomaly").unwrap();
    // Rows are year-sorted, so the 500-case spike is the last row.
    let spike = any_to_i64(labels.get(4).unwrap_or(AnyValue::Null));
    assert_eq!(spike, Some(-1));
    let first = any_to_i64(labels.get(0).unwrap_or(AnyValue::Null));
    assert_eq!(first, Some(1));
    assert!(result.flagged_rows() >= 1);
}

#[test]
fn sparse_feature_set_contributes_no_columns() {
    // Only two non-null rubella observations: rubella and joint sets are
    // both below the minimum, measles still scores.
    let wide = wide_frame(&[
        ("France", Some(2020), Some(10.0), Some(1.0)),
        ("France", Some(2021), Some(11.0), None),
        ("France", Some(2022), Some(10.5), None),
        ("France", Some(2023), Some(12.0), Some(1.1)),
    ]);
    let result = detect_country(&wide, "France", &AnomalyOptions::default())
        .unwrap()
        .unwrap();
    assert!(result.frame.column("measles_anomaly").is_ok());
    assert!(result.frame.column("measles_anomaly_score").is_ok());
    assert!(result.frame.column("rubella_anomaly").is_err());
    assert!(result.frame.column("joint_anomaly").is_err());
}

#[test]
fn joint_set_drops_null_rows_only_for_itself() {
    let wide = wide_frame(&[
        ("France", Some(2020), Some(10.0), Some(1.0)),
        ("France", Some(2021), Some(11.0), None),
        ("France", Some(2022), Some(10.5), Some(0.9)),
        ("France", Some(2023), Some(12.0), Some(1.1)),
        ("France", Some(2024), Some(11.5), Some(1.0)),
    ]);
    let result = detect_country(&wide, "France", &AnomalyOptions::default())
        .unwrap()
        .unwrap();
    let joint = result.frame.column("joint_anomaly").unwrap();
    // The all-null joint row stays in the frame but gets a null label.
    assert!(matches!(joint.get(1).unwrap(), AnyValue::Null));
    assert!(any_to_i64(joint.get(0).unwrap_or(AnyValue::Null)).is_some());
    // The measles set still scored every row.
    let measles = result.frame.column("measles_anomaly").unwrap();
    assert!(any_to_i64(measles.get(1).unwrap_or(AnyValue::Null)).is_some());
}

#[test]
fn null_measure_rows_receive_null_scores() {
    let wide = wide_frame(&[
        ("France", Some(2020), Some(10.0), None),
        ("France", Some(2021), None, None),
        ("France", Some(2022), Some(10.5), None),
        ("France", Some(2023), Some(12.0), None),
    ]);
    let result = detect_country(&wide, "France", &AnomalyOptions::default())
        .unwrap()
        .unwrap();
    let scores = result.frame.column("measles_anomaly_score").unwrap();
    assert!(matches!(scores.get(1).unwrap(), AnyValue::Null));
    assert!(!matches!(scores.get(0).unwrap(), AnyValue::Null));
}

#[test]
fn cache_hits_return_identical_results() {
    let wide = steady_country();
    let options = AnomalyOptions::default();
    let dataset = fingerprint_bytes(b"steady country fixture");
    let mut cache = AnomalyCache::new();

    let first = cache
        .detect(&dataset, &wide, "France", &options)
        .unwrap()
        .unwrap();
    let second = cache
        .detect(&dataset, &wide, "France", &options)
        .unwrap()
        .unwrap();
    assert!(first.frame.equals_missing(&second.frame));
    assert_eq!(cache.len(), 1);

    // A different parameter set is a different key.
    let other = AnomalyOptions {
        seed: 7,
        ..Default::default()
    };
    let _ = cache.detect(&dataset, &wide, "France", &other).unwrap();
    assert_eq!(cache.len(), 2);
}
