use std::io;

/// Errors raised while loading configuration or exporting lessons.
///
/// Schedule queries themselves never fail: a lookup that finds nothing
/// returns an empty list.
#[derive(Debug, thiserror::Error)]
pub enum TimetableError {
    #[error("io error: {0}")]
    Io(#[from] io::Error),

    #[error("serialization error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),

    #[error("invalid config: {0}")]
    InvalidConfig(String),
}

pub type TimetableResult<T> = Result<T, TimetableError>;
