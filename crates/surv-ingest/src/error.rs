use thiserror::Error;

/// Errors from reading source data.
///
/// Unreadable or malformed input is a hard failure reported before the
/// pipeline runs; data-quality gaps inside a readable file are not errors
/// and surface as nulls downstream instead.
#[derive(Debug, Error)]
pub enum IngestError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),
    #[error("frame error: {0}")]
    Frame(#[from] polars::error::PolarsError),
}
