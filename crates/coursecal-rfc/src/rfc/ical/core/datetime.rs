//! iCalendar DATE-TIME value type (RFC 5545 §3.3.5).

use std::fmt;

use chrono::{Datelike, NaiveDateTime, TimeZone, Timelike, Utc};

use crate::error::{RfcError, RfcResult};

/// Form of DATE-TIME value (RFC 5545 §3.3.5).
///
/// Zoned times are never written; provider payloads carry their zone separately.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DateTimeForm {
    /// Floating time - same wall-clock time in any timezone.
    ///
    /// Example: `19980118T230000`
    Floating,

    /// UTC time - absolute instant, indicated by 'Z' suffix.
    ///
    /// Example: `19980119T070000Z`
    Utc,
}

/// DATE-TIME value (RFC 5545 §3.3.5).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DateTime {
    /// Year (e.g., 2026).
    pub year: u16,
    /// Month (1-12).
    pub month: u8,
    /// Day of month (1-31).
    pub day: u8,
    /// Hour (0-23).
    pub hour: u8,
    /// Minute (0-59).
    pub minute: u8,
    /// Second (0-59).
    pub second: u8,
    /// Floating or UTC.
    pub form: DateTimeForm,
}

impl DateTime {
    /// Creates a floating DATE-TIME.
    #[must_use]
    pub const fn floating(year: u16, month: u8, day: u8, hour: u8, minute: u8, second: u8) -> Self {
        Self {
            year,
            month,
            day,
            hour,
            minute,
            second,
            form: DateTimeForm::Floating,
        }
    }

    /// ## Summary
    /// Builds a floating DATE-TIME from the wall-clock fields of a naive timestamp.
    ///
    /// ## Errors
    /// Returns `RfcError::DateTimeOutOfRange` for years outside `0..=9999`.
    pub fn from_naive(naive: NaiveDateTime) -> RfcResult<Self> {
        Self::from_fields(naive, DateTimeForm::Floating)
    }

    /// ## Summary
    /// Builds a UTC DATE-TIME from any zoned timestamp, using its UTC fields.
    ///
    /// ## Errors
    /// Returns `RfcError::DateTimeOutOfRange` for years outside `0..=9999`.
    pub fn from_zoned<Tz: TimeZone>(instant: &chrono::DateTime<Tz>) -> RfcResult<Self> {
        Self::from_fields(instant.with_timezone(&Utc).naive_utc(), DateTimeForm::Utc)
    }

    #[expect(
        clippy::cast_possible_truncation,
        reason = "chrono guarantees month/day/hour/minute/second fit in u8"
    )]
    fn from_fields(naive: NaiveDateTime, form: DateTimeForm) -> RfcResult<Self> {
        let year = u16::try_from(naive.year())
            .ok()
            .filter(|y| *y <= 9999)
            .ok_or_else(|| RfcError::DateTimeOutOfRange(naive.to_string()))?;
        Ok(Self {
            year,
            month: naive.month() as u8,
            day: naive.day() as u8,
            hour: naive.hour() as u8,
            minute: naive.minute() as u8,
            second: naive.second() as u8,
            form,
        })
    }

    /// Returns whether this is a UTC time.
    #[must_use]
    pub const fn is_utc(&self) -> bool {
        matches!(self.form, DateTimeForm::Utc)
    }
}

impl fmt::Display for DateTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:04}{:02}{:02}T{:02}{:02}{:02}",
            self.year, self.month, self.day, self.hour, self.minute, self.second
        )?;
        if self.is_utc() {
            write!(f, "Z")?;
        }
        Ok(())
    }
}
