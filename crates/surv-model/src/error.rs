use thiserror::Error;

#[derive(Debug, Error)]
pub enum SurvError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid {name}: {reason}")]
    InvalidParameter { name: &'static str, reason: String },
    #[error("{0}")]
    Message(String),
}

pub type Result<T> = std::result::Result<T, SurvError>;
