//! Compact weekday-letter tokenizer (`"MWF"`, `"TTh"`).

use std::collections::BTreeSet;

use coursecal_rfc::rfc::ical::core::Weekday;

/// One weekday letter group as it appears in schedule exports.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DayToken {
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
}

impl DayToken {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Monday => "M",
            Self::Tuesday => "T",
            Self::Wednesday => "W",
            Self::Thursday => "Th",
            Self::Friday => "F",
        }
    }

    #[must_use]
    pub const fn weekday(self) -> Weekday {
        match self {
            Self::Monday => Weekday::Monday,
            Self::Tuesday => Weekday::Tuesday,
            Self::Wednesday => Weekday::Wednesday,
            Self::Thursday => Weekday::Thursday,
            Self::Friday => Weekday::Friday,
        }
    }
}

/// ## Summary
/// Scans left to right, matching `Th` before the single letters so that
/// `"TTh"` is Tuesday then Thursday. Unknown characters are ignored.
#[must_use]
pub fn tokenize(days: &str) -> Vec<DayToken> {
    let mut tokens = Vec::new();
    let mut chars = days.chars().peekable();

    while let Some(c) = chars.next() {
        let token = match c {
            'T' if chars.next_if(|n| n.eq_ignore_ascii_case(&'h')).is_some() => DayToken::Thursday,
            'M' => DayToken::Monday,
            'T' => DayToken::Tuesday,
            'W' => DayToken::Wednesday,
            'F' => DayToken::Friday,
            _ => continue,
        };
        tokens.push(token);
    }

    tokens
}

/// Two-letter recurrence codes, de-duplicated in first-seen order.
#[must_use]
pub fn to_recurrence_codes(tokens: &[DayToken]) -> Vec<Weekday> {
    let mut codes: Vec<Weekday> = Vec::with_capacity(tokens.len());
    for day in tokens.iter().map(|t| t.weekday()) {
        if !codes.contains(&day) {
            codes.push(day);
        }
    }
    codes
}

/// Weekday numbers with Sunday as 0, for exclusion matching.
#[must_use]
pub fn to_calendar_weekday_numbers(codes: &[Weekday]) -> BTreeSet<u8> {
    codes.iter().map(|d| d.number_from_sunday()).collect()
}

/// Shorthand for [`tokenize`] followed by [`to_recurrence_codes`].
#[must_use]
pub fn recurrence_codes(days: &str) -> Vec<Weekday> {
    to_recurrence_codes(&tokenize(days))
}
