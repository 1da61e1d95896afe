use thiserror::Error;

#[derive(Error, Debug)]
pub enum DashboardMetricsError {
    #[error("Invalid input for '{argument}': {details}")]
    InvalidInput { argument: String, details: String },

    #[error("Date calculation error: {0}")]
    DateError(String),

    #[error("Invalid date range: start {start} is after end {end}")]
    InvalidDateRange { start: String, end: String },

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, DashboardMetricsError>;
