//! iCalendar RFC 5545 subset.
//!
//! - `core`: Type definitions for the calendar structures we emit
//! - `build`: Line serializer for those structures
//!
//! ## Example
//!
//! ```rust
//! use coursecal_rfc::rfc::ical::{build, core::*};
//!
//! let mut ical = ICalendar::new("-//My App//EN");
//! let mut event = Component::event();
//! event.add_property(Property::text("UID", "my-event-1"));
//! event.add_property(Property::text("SUMMARY", "Team Meeting"));
//! ical.add_event(event);
//!
//! let output = build::serialize(&ical);
//! assert!(output.starts_with("BEGIN:VCALENDAR\n"));
//! ```

pub mod build;
pub mod core;

pub use build::serialize;
pub use core::{Component, ComponentKind, ICalendar, Property};
