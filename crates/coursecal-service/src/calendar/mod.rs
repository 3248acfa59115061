//! Recurrence resolution, break exclusions and calendar text assembly.

pub mod breaks;
pub mod datetime;
pub mod exclusion;
pub mod expand;
pub mod export;
pub mod pipeline;
pub mod recurrence;
pub mod weekday;

pub use breaks::{BreakCalculator, BreakPeriod};
pub use exclusion::ExclusionCalculator;
pub use expand::expand_occurrences;
pub use export::{
    CalendarSerializer, Clock, FixedClock, RandomUid, SequentialUid, SystemClock, UidGenerator,
};
pub use pipeline::SchedulePipeline;
pub use recurrence::{CutoffMap, RecurrenceResolver, RecurrenceWindow, ResolvedEvent};
pub use weekday::DayToken;
