use thiserror::Error;

/// Failures while decoding or validating exported account records.
#[derive(Debug, Error)]
pub enum IngestError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("{field} must be between 1 and 31, got {value}")]
    DayOutOfRange { field: &'static str, value: i64 },

    #[error("due_offset_days must be between 1 and 60, got {0}")]
    InvalidOffset(i64),

    #[error("invalid amount for {field}: '{value}'")]
    InvalidAmount { field: &'static str, value: String },

    #[error("missing field: {0}")]
    MissingField(&'static str),
}

pub type Result<T> = std::result::Result<T, IngestError>;
