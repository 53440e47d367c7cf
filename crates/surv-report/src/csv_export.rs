//! Delimited-text exports of the derived tables.

use std::path::Path;

use csv::Writer;
use polars::prelude::{AnyValue, DataFrame};
use tracing::debug;

use surv_ingest::any_to_string;
use surv_transform::LongTable;

use crate::error::ReportError;

const LONG_HEADERS: [&str; 8] = [
    "region", "country", "year", "disease", "value", "roll3", "roll5", "yoy",
];

fn opt_i64(value: Option<i64>) -> String {
    value.map(|v| v.to_string()).unwrap_or_default()
}

fn opt_f64(value: Option<f64>) -> String {
    value.map(|v| v.to_string()).unwrap_or_default()
}

/// Serialize the long table as UTF-8 CSV: comma-separated, header row,
/// no index column, empty cells for nulls.
pub fn long_csv_bytes(table: &LongTable) -> Result<Vec<u8>, ReportError> {
    let mut writer = Writer::from_writer(Vec::new());
    writer.write_record(LONG_HEADERS)?;
    for record in &table.records {
        let year = opt_i64(record.year);
        let value = opt_f64(record.value);
        let roll3 = opt_f64(record.roll3);
        let roll5 = opt_f64(record.roll5);
        let yoy = opt_f64(record.yoy);
        writer.write_record([
            record.region.as_str(),
            record.country.as_str(),
            year.as_str(),
            record.disease.label(),
            value.as_str(),
            roll3.as_str(),
            roll5.as_str(),
            yoy.as_str(),
        ])?;
    }
    writer.flush()?;
    writer
        .into_inner()
        .map_err(|error| ReportError::Io(std::io::Error::other(error.to_string())))
}

/// Write the long table to `path` as CSV.
pub fn write_long_csv(path: &Path, table: &LongTable) -> Result<(), ReportError> {
    std::fs::write(path, long_csv_bytes(table)?)?;
    debug!(path = %path.display(), rows = table.len(), "long table exported");
    Ok(())
}

/// Write any frame to `path` as CSV, stringifying cells (nulls empty).
///
/// Used for the anomaly output, whose column set varies by what could be
/// scored.
pub fn write_frame_csv(path: &Path, frame: &DataFrame) -> Result<(), ReportError> {
    let mut writer = Writer::from_path(path)?;
    let names: Vec<String> = frame
        .get_column_names()
        .iter()
        .map(|name| name.to_string())
        .collect();
    writer.write_record(&names)?;
    let columns = frame.get_columns();
    for idx in 0..frame.height() {
        let row: Vec<String> = columns
            .iter()
            .map(|column| any_to_string(column.get(idx).unwrap_or(AnyValue::Null)))
            .collect();
        writer.write_record(&row)?;
    }
    writer.flush()?;
    debug!(path = %path.display(), rows = frame.height(), "frame exported");
    Ok(())
}
