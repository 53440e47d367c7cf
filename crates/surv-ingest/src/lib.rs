//! Surveillance data ingestion.
//!
//! Reads delimited tabular files into all-string polars DataFrames, computes
//! a content fingerprint for memoization keys, and provides the `AnyValue`
//! conversion utilities the rest of the pipeline leans on.

pub mod csv_table;
pub mod error;
pub mod fingerprint;
pub mod frame;
pub mod value;

pub use csv_table::{CsvTable, read_csv_table};
pub use error::IngestError;
pub use fingerprint::{DatasetId, fingerprint_bytes};
pub use frame::{build_frame, load_frame};
pub use value::{any_to_f64, any_to_i64, any_to_string, format_numeric, parse_f64, parse_i64};
