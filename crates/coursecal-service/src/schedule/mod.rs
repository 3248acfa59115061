//! Raw schedule intake and normalization.

pub mod adapter;
pub mod event;
pub mod normalize;
pub mod raw;
pub mod selection;

pub use adapter::{adapt_events, adapt_schedule};
pub use event::{Credits, NormalizedEvent};
pub use normalize::EventNormalizer;
pub use raw::{RawDate, RawMeeting, RawPlannedCourse, RawSchedule, RawSection, RawTerm};
pub use selection::select_planned_courses;
