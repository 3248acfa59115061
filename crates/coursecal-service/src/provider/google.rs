//! Google Calendar event resource.

use chrono::{NaiveTime, TimeZone};
use chrono_tz::Tz;
use serde::Serialize;

use super::{EventDateTime, PayloadTimes};
use crate::calendar::datetime::format_calendar_timestamp;
use crate::schedule::NormalizedEvent;
use crate::skip::SkipReason;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GoogleEvent {
    pub summary: String,
    pub description: String,
    pub location: String,
    pub start: EventDateTime,
    pub end: EventDateTime,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub recurrence: Vec<String>,
}

/// ## Summary
/// Builds the insert body for one event in zone `tz`.
///
/// Weekly events get an RRULE whose UNTIL is the end date at 23:59:59 in
/// `tz`, written in UTC.
///
/// ## Errors
/// A `SkipReason` when the start date or either time does not parse.
pub fn google_event_payload(event: &NormalizedEvent, tz: Tz) -> Result<GoogleEvent, SkipReason> {
    let times = PayloadTimes::from_event(event)?;

    let mut recurrence = Vec::new();
    if let Some(last_day) = times.recurrence_end() {
        let local_until = last_day.and_time(
            NaiveTime::from_hms_opt(23, 59, 59).ok_or(SkipReason::OutOfRange)?,
        );
        let until = tz
            .from_local_datetime(&local_until)
            .earliest()
            .ok_or(SkipReason::OutOfRange)?;
        let by_day: Vec<&str> = times.by_weekdays.iter().map(|d| d.as_str()).collect();
        recurrence.push(format!(
            "RRULE:FREQ=WEEKLY;BYDAY={};UNTIL={}",
            by_day.join(","),
            format_calendar_timestamp(&until, true)
        ));
    }

    Ok(GoogleEvent {
        summary: event.summary().trim().to_string(),
        description: event.description(),
        location: event.location.clone(),
        start: EventDateTime::local(&times.start, tz),
        end: EventDateTime::local(&times.end, tz),
        recurrence,
    })
}
