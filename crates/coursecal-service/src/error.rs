use thiserror::Error;

/// Service layer errors
#[derive(Error, Debug)]
pub enum ServiceError {
    #[error("Invalid schedule: {0}")]
    InvalidSchedule(String),

    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error(transparent)]
    RfcError(#[from] coursecal_rfc::error::RfcError),

    #[error("Event skipped: {0}")]
    Skipped(#[from] crate::skip::SkipReason),

    #[error("Recurrence error: {0}")]
    RecurrenceError(String),

    #[error("Upload failed: {0}")]
    UploadError(String),
}

pub type ServiceResult<T> = std::result::Result<T, ServiceError>;
