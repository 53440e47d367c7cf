use thiserror::Error;

/// Errors from transformation stages.
///
/// Data-quality problems never surface here; they become nulls. The only
/// failures are structural frame errors (e.g. duplicate column names after
/// rename).
#[derive(Debug, Error)]
pub enum TransformError {
    #[error("frame error: {0}")]
    Frame(#[from] polars::error::PolarsError),
}
