use thiserror::Error;

#[derive(Debug, Error)]
pub enum ReportError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),
    #[error("frame error: {0}")]
    Frame(#[from] polars::error::PolarsError),
}
