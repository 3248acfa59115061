//! Remote calendar payloads and the upload driver.
//!
//! Nothing here talks to the network. [`google`] and [`outlook`] build the
//! JSON bodies the upload collaborators POST, and [`import`] drives any
//! [`import::EventSink`] over a batch of events.

pub mod google;
pub mod import;
pub mod outlook;

use chrono::{NaiveDate, NaiveDateTime};
use coursecal_rfc::rfc::ical::core::Weekday;
use serde::Serialize;

use crate::calendar::datetime::{parse_date, parse_time};
use crate::calendar::recurrence::first_occurrence;
use crate::calendar::weekday::recurrence_codes;
use crate::schedule::NormalizedEvent;
use crate::skip::SkipReason;

pub use google::{GoogleEvent, google_event_payload};
pub use import::{EventSink, ImportFailure, ImportProgress, ImportReport, import_events};
pub use outlook::{GraphEvent, graph_event_payload};

const LOCAL_DATE_TIME_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";

/// Local wall-clock time plus the zone it is read in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EventDateTime {
    pub date_time: String,
    pub time_zone: String,
}

impl EventDateTime {
    fn local(at: &NaiveDateTime, tz: chrono_tz::Tz) -> Self {
        Self {
            date_time: at.format(LOCAL_DATE_TIME_FORMAT).to_string(),
            time_zone: tz.name().to_string(),
        }
    }
}

/// Parsed instants shared by both payload builders.
#[derive(Debug, Clone, PartialEq, Eq)]
struct PayloadTimes {
    start: NaiveDateTime,
    end: NaiveDateTime,
    by_weekdays: Vec<Weekday>,
    last_day: Option<NaiveDate>,
}

impl PayloadTimes {
    fn from_event(event: &NormalizedEvent) -> Result<Self, SkipReason> {
        let start_date = event
            .start_date
            .as_deref()
            .filter(|d| !d.trim().is_empty())
            .ok_or(SkipReason::MissingDate("start"))?;
        let date = parse_date(start_date)
            .ok_or_else(|| SkipReason::UnparseableDate(start_date.to_string()))?;
        let start_time = parse_time(&event.start_time)
            .ok_or_else(|| SkipReason::UnparseableTime(event.start_time.clone()))?;
        let end_time = parse_time(&event.end_time)
            .ok_or_else(|| SkipReason::UnparseableTime(event.end_time.clone()))?;

        let by_weekdays = recurrence_codes(&event.days_of_week);
        let start = first_occurrence(date.and_time(start_time), &by_weekdays);
        let end = start
            .checked_add_signed(end_time - start_time)
            .ok_or(SkipReason::OutOfRange)?;

        Ok(Self {
            start,
            end,
            by_weekdays,
            last_day: event.end_date.as_deref().and_then(parse_date),
        })
    }

    /// Last day of a weekly series, `None` for single instances.
    fn recurrence_end(&self) -> Option<NaiveDate> {
        if self.by_weekdays.is_empty() {
            return None;
        }
        self.last_day
    }
}
