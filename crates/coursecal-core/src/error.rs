use thiserror::Error;

/// Core-level errors
#[derive(Error, Debug)]
pub enum CoreError {
    #[error("Unknown time zone: {0}")]
    UnknownTimeZone(String),
}

pub type CoreResult<T> = std::result::Result<T, CoreError>;
