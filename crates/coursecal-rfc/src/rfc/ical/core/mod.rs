//! iCalendar core models (RFC 5545).
//!
//! Only the pieces needed to describe weekly class meetings: components,
//! text/date-time/recurrence property values and weekday codes.

mod component;
mod datetime;
mod property;
mod rrule;
mod value;

pub use component::{Component, ComponentKind, ICalendar};
pub use datetime::{DateTime, DateTimeForm};
pub use property::{Property, names};
pub use rrule::{Weekday, WeeklyRule};
pub use value::Value;
