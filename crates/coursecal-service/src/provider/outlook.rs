//! Microsoft Graph event resource.

use chrono_tz::Tz;
use coursecal_rfc::rfc::ical::core::Weekday;
use serde::Serialize;

use super::{EventDateTime, PayloadTimes};
use crate::schedule::NormalizedEvent;
use crate::skip::SkipReason;

const GRAPH_DATE_FORMAT: &str = "%Y-%m-%d";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GraphEvent {
    pub subject: String,
    pub body: ItemBody,
    pub start: EventDateTime,
    pub end: EventDateTime,
    pub location: GraphLocation,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub recurrence: Option<PatternedRecurrence>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemBody {
    pub content_type: &'static str,
    pub content: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GraphLocation {
    pub display_name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PatternedRecurrence {
    pub pattern: RecurrencePattern,
    pub range: RecurrenceRange,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RecurrencePattern {
    #[serde(rename = "type")]
    pub kind: &'static str,
    pub interval: u32,
    pub days_of_week: Vec<&'static str>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RecurrenceRange {
    #[serde(rename = "type")]
    pub kind: &'static str,
    pub start_date: String,
    pub end_date: String,
}

/// Graph `dayOfWeek` enum value.
#[must_use]
pub const fn graph_day_name(day: Weekday) -> &'static str {
    match day {
        Weekday::Sunday => "sunday",
        Weekday::Monday => "monday",
        Weekday::Tuesday => "tuesday",
        Weekday::Wednesday => "wednesday",
        Weekday::Thursday => "thursday",
        Weekday::Friday => "friday",
        Weekday::Saturday => "saturday",
    }
}

/// ## Summary
/// Builds the `me/events` body for one event in zone `tz`.
///
/// Weekly events with an end date get a weekly pattern bounded by the
/// first occurrence date and the end date.
///
/// ## Errors
/// A `SkipReason` when the start date or either time does not parse.
pub fn graph_event_payload(event: &NormalizedEvent, tz: Tz) -> Result<GraphEvent, SkipReason> {
    let times = PayloadTimes::from_event(event)?;

    let recurrence = times.recurrence_end().map(|last_day| PatternedRecurrence {
        pattern: RecurrencePattern {
            kind: "weekly",
            interval: 1,
            days_of_week: times.by_weekdays.iter().copied().map(graph_day_name).collect(),
        },
        range: RecurrenceRange {
            kind: "endDate",
            start_date: times.start.format(GRAPH_DATE_FORMAT).to_string(),
            end_date: last_day.format(GRAPH_DATE_FORMAT).to_string(),
        },
    });

    Ok(GraphEvent {
        subject: event.summary().trim().to_string(),
        body: ItemBody {
            content_type: "text",
            content: event.description(),
        },
        start: EventDateTime::local(&times.start, tz),
        end: EventDateTime::local(&times.end, tz),
        location: GraphLocation {
            display_name: event.location.clone(),
        },
        recurrence,
    })
}
