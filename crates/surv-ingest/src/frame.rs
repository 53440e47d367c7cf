//! DataFrame construction from raw CSV tables.

use std::path::Path;

use polars::prelude::{Column, DataFrame};
use tracing::debug;

use crate::csv_table::{CsvTable, parse_csv_bytes};
use crate::error::IngestError;
use crate::fingerprint::{DatasetId, fingerprint_bytes};

/// Build an all-string DataFrame from a raw table, one column per header.
pub fn build_frame(table: &CsvTable) -> Result<DataFrame, IngestError> {
    let mut columns = Vec::with_capacity(table.headers.len());
    for (idx, header) in table.headers.iter().enumerate() {
        let values: Vec<String> = table
            .rows
            .iter()
            .map(|row| row.get(idx).cloned().unwrap_or_default())
            .collect();
        columns.push(Column::new(header.as_str().into(), values));
    }
    Ok(DataFrame::new(columns)?)
}

/// Read a CSV file into a DataFrame plus its content fingerprint.
///
/// The fingerprint covers the raw bytes, so it doubles as the memoization
/// key for everything derived from this file.
pub fn load_frame(path: &Path) -> Result<(DataFrame, DatasetId), IngestError> {
    let bytes = std::fs::read(path)?;
    let id = fingerprint_bytes(&bytes);
    let table = parse_csv_bytes(&bytes)?;
    let frame = build_frame(&table)?;
    debug!(
        source = %path.display(),
        dataset = id.short(),
        rows = frame.height(),
        columns = frame.width(),
        "dataset loaded"
    );
    Ok((frame, id))
}
