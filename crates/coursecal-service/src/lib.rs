//! Student schedule to calendar conversion.
//!
//! The pipeline runs raw schedule JSON through [`schedule`] (field adapter,
//! section selection, normalization) and then [`calendar`] (recurrence
//! windows, reading-break exclusions, VCALENDAR text). [`provider`] turns the
//! same normalized events into remote calendar payloads.

pub mod calendar;
pub mod error;
pub mod provider;
pub mod schedule;
pub mod skip;

pub use calendar::pipeline::SchedulePipeline;
pub use error::{ServiceError, ServiceResult};
pub use schedule::NormalizedEvent;
pub use skip::SkipReason;
