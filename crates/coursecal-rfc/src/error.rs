use thiserror::Error;

/// iCalendar model errors
#[derive(Error, Debug)]
pub enum RfcError {
    #[error("Date-time out of range: {0}")]
    DateTimeOutOfRange(String),
}

pub type RfcResult<T> = std::result::Result<T, RfcError>;
