//! iCalendar property type (RFC 5545 §3.8).

use super::{DateTime, Value, WeeklyRule};

/// A single `NAME:value` property.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Property {
    /// Property name (normalized to uppercase).
    pub name: String,
    /// Typed value.
    pub value: Value,
}

impl Property {
    /// Creates a property with a text value.
    #[must_use]
    pub fn text(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into().to_ascii_uppercase(),
            value: Value::Text(value.into()),
        }
    }

    /// Creates a property with a datetime value.
    #[must_use]
    pub fn datetime(name: impl Into<String>, dt: DateTime) -> Self {
        Self {
            name: name.into().to_ascii_uppercase(),
            value: Value::DateTime(dt),
        }
    }

    /// Creates an RRULE property.
    #[must_use]
    pub fn rrule(rule: WeeklyRule) -> Self {
        Self {
            name: names::RRULE.to_string(),
            value: Value::Recur(rule),
        }
    }

    /// Returns the value as text if it is a text value.
    #[must_use]
    pub fn as_text(&self) -> Option<&str> {
        self.value.as_text()
    }
}

/// Property names written by this crate.
pub mod names {
    pub const CALSCALE: &str = "CALSCALE";
    pub const PRODID: &str = "PRODID";
    pub const VERSION: &str = "VERSION";

    pub const UID: &str = "UID";
    pub const DTSTAMP: &str = "DTSTAMP";
    pub const DTSTART: &str = "DTSTART";
    pub const DTEND: &str = "DTEND";
    pub const RRULE: &str = "RRULE";
    pub const EXDATE: &str = "EXDATE";
    pub const SUMMARY: &str = "SUMMARY";
    pub const DESCRIPTION: &str = "DESCRIPTION";
    pub const LOCATION: &str = "LOCATION";
}
