//! Loose date/time parsing for schedule exports.
//!
//! Dates are `M/D/YYYY` (one or two digit month and day). Times are
//! `h:mm AM/PM` in any case or bare 24-hour `HH:MM`. Results are floating
//! local values; no zone is attached.

use std::sync::OnceLock;

use chrono::{NaiveDate, NaiveTime, TimeZone, Utc};
use regex::Regex;

const TIMESTAMP_FORMAT: &str = "%Y%m%dT%H%M%S";

#[expect(clippy::expect_used, reason = "Pattern is a literal")]
fn time_regex() -> &'static Regex {
    static REGEX: OnceLock<Regex> = OnceLock::new();
    REGEX.get_or_init(|| {
        Regex::new(r"^(\d{1,2}):(\d{2})\s*([AaPp][Mm])?$").expect("valid time pattern")
    })
}

/// Parses `M/D/YYYY`.
#[must_use]
pub fn parse_date(date: &str) -> Option<NaiveDate> {
    let mut parts = date.split('/').map(|p| p.trim().parse::<u32>().ok());
    let (Some(Some(month)), Some(Some(day)), Some(Some(year)), None) =
        (parts.next(), parts.next(), parts.next(), parts.next())
    else {
        return None;
    };
    if !(1000..=9999).contains(&year) {
        return None;
    }
    NaiveDate::from_ymd_opt(i32::try_from(year).ok()?, month, day)
}

/// Parses `h:mm AM/PM` or `HH:MM`.
///
/// `12:xx AM` is hour 0 and `12:xx PM` stays hour 12.
#[must_use]
pub fn parse_time(time: &str) -> Option<NaiveTime> {
    let caps = time_regex().captures(time.trim())?;
    let mut hour: u32 = caps[1].parse().ok()?;
    let minute: u32 = caps[2].parse().ok()?;

    match caps.get(3).map(|m| m.as_str().to_ascii_uppercase()).as_deref() {
        Some("PM") if hour != 12 => hour += 12,
        Some("AM") if hour == 12 => hour = 0,
        _ => {}
    }

    NaiveTime::from_hms_opt(hour, minute, 0)
}

/// ## Summary
/// Reformats an ISO 8601 date or date-time as `MM/DD/YYYY`.
///
/// Only the calendar date as written is used; any time or offset suffix is
/// ignored. Also tolerates input already in `M/D/YYYY` form.
#[must_use]
pub fn iso_to_month_day_year(iso: &str) -> Option<String> {
    let iso = iso.trim();
    let date = match NaiveDate::parse_and_remainder(iso, "%Y-%m-%d") {
        Ok((date, rest)) if rest.is_empty() || rest.starts_with(['T', 't', ' ']) => date,
        _ => parse_date(iso)?,
    };
    Some(date.format("%m/%d/%Y").to_string())
}

/// ## Summary
/// Formats `YYYYMMDDTHHMMSS`, using UTC fields plus a `Z` suffix when `utc`
/// is set, otherwise the timestamp's own local fields with no suffix.
#[must_use]
pub fn format_calendar_timestamp<Tz: TimeZone>(ts: &chrono::DateTime<Tz>, utc: bool) -> String
where
    Tz::Offset: std::fmt::Display,
{
    if utc {
        format!("{}Z", ts.with_timezone(&Utc).format(TIMESTAMP_FORMAT))
    } else {
        ts.format(TIMESTAMP_FORMAT).to_string()
    }
}
