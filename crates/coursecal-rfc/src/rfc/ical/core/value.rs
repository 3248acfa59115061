//! Property value variants.

use std::fmt;

use super::{DateTime, WeeklyRule};

/// A typed property value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Value {
    /// TEXT value, written verbatim apart from line breaks.
    Text(String),
    /// DATE-TIME value.
    DateTime(DateTime),
    /// RECUR value.
    Recur(WeeklyRule),
}

impl Value {
    /// Returns the text if this is a text value.
    #[must_use]
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(s) => Some(s),
            _ => None,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text(s) => write!(f, "{s}"),
            Self::DateTime(dt) => write!(f, "{dt}"),
            Self::Recur(rule) => write!(f, "{rule}"),
        }
    }
}
