//! Per-record skip reasons.
//!
//! A record that cannot be placed on a calendar is dropped from the batch,
//! never failing it. The reason stays inspectable for logs and tests.

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SkipReason {
    #[error("meeting has no scheduled start/end time")]
    MissingTime,

    #[error("missing {0} date")]
    MissingDate(&'static str),

    #[error("unparseable date {0:?}")]
    UnparseableDate(String),

    #[error("unparseable time {0:?}")]
    UnparseableTime(String),

    #[error("date-time out of range")]
    OutOfRange,
}
