//! CSV export tests.

use polars::prelude::{Column, DataFrame};

use surv_model::Disease;
use surv_report::{long_csv_bytes, write_frame_csv, write_long_csv};
use surv_transform::{LongRecord, LongTable};

fn fixture() -> LongTable {
    let mut first = LongRecord::new("EUR", "France", Some(2020), Disease::Measles, Some(100.0));
    first.roll3 = Some(100.0);
    first.roll5 = Some(100.0);
    let mut second = LongRecord::new("EUR", "France", Some(2021), Disease::Measles, Some(150.0));
    second.roll3 = Some(125.0);
    second.roll5 = Some(125.0);
    second.yoy = Some(0.5);
    let third = LongRecord::new("EUR", "France", None, Disease::Rubella, None);
    LongTable::new(vec![first, second, third])
}

#[test]
fn long_csv_layout_is_stable() {
    let csv = String::from_utf8(long_csv_bytes(&fixture()).unwrap()).unwrap();
    insta::assert_snapshot!(csv.trim_end(), @r"
    region,country,year,disease,value,roll3,roll5,yoy
    EUR,France,2020,Measles,100,100,100,
    EUR,France,2021,Measles,150,125,125,0.5
    EUR,France,,Rubella,,,,
    ");
}

#[test]
fn header_row_then_one_line_per_record() {
    let csv = String::from_utf8(long_csv_bytes(&fixture()).unwrap()).unwrap();
    let lines: Vec<&str> = csv.lines().collect();
    assert_eq!(lines.len(), 1 + fixture().len());
    assert_eq!(
        lines[0],
        "region,country,year,disease,value,roll3,roll5,yoy"
    );
}

#[test]
fn nulls_become_empty_cells() {
    let csv = String::from_utf8(long_csv_bytes(&fixture()).unwrap()).unwrap();
    let last = csv.lines().last().unwrap();
    assert_eq!(last, "EUR,France,,Rubella,,,,");
}

#[test]
fn writes_long_csv_to_disk() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("long.csv");
    write_long_csv(&path, &fixture()).unwrap();
    let contents = std::fs::read_to_string(&path).unwrap();
    assert!(contents.starts_with("region,country,year,disease"));
    assert_eq!(contents.lines().count(), 4);
}

#[test]
fn frame_export_stringifies_cells() {
    let frame = DataFrame::new(vec![
        Column::new("country".into(), vec!["France", "Angola"]),
        Column::new("measles_anomaly".into(), vec![Some(1i32), None]),
        Column::new(
            "measles_anomaly_score".into(),
            vec![Some(-0.25f64), None],
        ),
    ])
    .unwrap();
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("anomalies.csv");
    write_frame_csv(&path, &frame).unwrap();
    let contents = std::fs::read_to_string(&path).unwrap();
    let lines: Vec<&str> = contents.lines().collect();
    assert_eq!(lines[0], "country,measles_anomaly,measles_anomaly_score");
    assert_eq!(lines[1], "France,1,-0.25");
    assert_eq!(lines[2], "Angola,,");
}
