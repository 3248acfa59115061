//! Weekly recurrence windows.
//!
//! Every non-exam meeting of a course section shares one UNTIL cutoff: the
//! latest end date across the section's meetings, minus
//! [`CUTOFF_LOOKBACK_DAYS`], at 23:59:59. Exams and sections with no usable
//! end date recur until their own end date instead.

use std::collections::HashMap;

use chrono::{Datelike, Days, NaiveDate, NaiveDateTime, NaiveTime, TimeDelta};
use coursecal_rfc::rfc::ical::core::Weekday;

use super::datetime::{parse_date, parse_time};
use super::weekday::recurrence_codes;
use crate::schedule::NormalizedEvent;
use crate::skip::SkipReason;

/// Days subtracted from a section's last meeting date to get its cutoff.
pub const CUTOFF_LOOKBACK_DAYS: u64 = 14;

/// Upper bound on day-by-day advances to reach a meeting weekday.
const MAX_WEEKDAY_ADVANCE: u32 = 7;

fn end_of_day(date: NaiveDate) -> NaiveDateTime {
    date.and_time(NaiveTime::from_hms_opt(23, 59, 59).unwrap_or(NaiveTime::MIN))
}

/// Shared UNTIL cutoff per course+section.
#[derive(Debug, Default, Clone)]
pub struct CutoffMap {
    cutoffs: HashMap<(String, String), NaiveDateTime>,
}

impl CutoffMap {
    /// ## Summary
    /// Scans all non-exam events with a course+section key and a parseable
    /// end date, keeping the latest end date per key.
    #[must_use]
    pub fn build(events: &[NormalizedEvent]) -> Self {
        let mut latest: HashMap<(String, String), NaiveDate> = HashMap::new();

        for event in events.iter().filter(|e| !e.is_exam()) {
            let Some((course, section)) = event.cutoff_key() else {
                continue;
            };
            let Some(end) = event.end_date.as_deref().and_then(parse_date) else {
                continue;
            };
            latest
                .entry((course.to_string(), section.to_string()))
                .and_modify(|existing| *existing = (*existing).max(end))
                .or_insert(end);
        }

        let cutoffs = latest
            .into_iter()
            .filter_map(|(key, end)| {
                let cutoff = end.checked_sub_days(Days::new(CUTOFF_LOOKBACK_DAYS))?;
                Some((key, end_of_day(cutoff)))
            })
            .collect();

        Self { cutoffs }
    }

    /// Cutoff for the event's section, if it has one.
    #[must_use]
    pub fn get(&self, event: &NormalizedEvent) -> Option<NaiveDateTime> {
        let (course, section) = event.cutoff_key()?;
        self.cutoffs
            .get(&(course.to_string(), section.to_string()))
            .copied()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.cutoffs.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cutoffs.is_empty()
    }
}

/// Derived recurrence bounds for one event.
///
/// `adjusted_start` falls on one of `by_weekdays` whenever that list is
/// non-empty, and `until` is never earlier than `adjusted_start`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecurrenceWindow {
    pub adjusted_start: NaiveDateTime,
    pub by_weekdays: Vec<Weekday>,
    pub until: NaiveDateTime,
}

impl RecurrenceWindow {
    /// Events with no weekday codes occur once.
    #[must_use]
    pub fn is_recurring(&self) -> bool {
        !self.by_weekdays.is_empty()
    }
}

/// An event with its parsed instants and recurrence window.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedEvent<'a> {
    pub event: &'a NormalizedEvent,
    /// End of the first occurrence; same duration as on the raw start date.
    pub end: NaiveDateTime,
    pub window: RecurrenceWindow,
}

impl ResolvedEvent<'_> {
    /// Start of the first occurrence.
    #[must_use]
    pub const fn start(&self) -> NaiveDateTime {
        self.window.adjusted_start
    }
}

/// Moves `start` forward, at most a week, until it lands on one of `codes`.
#[must_use]
pub fn first_occurrence(start: NaiveDateTime, codes: &[Weekday]) -> NaiveDateTime {
    let mut current = start;
    for _ in 0..MAX_WEEKDAY_ADVANCE {
        if codes.is_empty() || codes.contains(&Weekday::from_chrono(current.weekday())) {
            break;
        }
        match current.checked_add_days(Days::new(1)) {
            Some(next) => current = next,
            None => break,
        }
    }
    current
}

#[derive(Debug, Default, Clone, Copy)]
pub struct RecurrenceResolver;

impl RecurrenceResolver {
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// ## Summary
    /// Resolves every event against cutoffs built from the whole list.
    ///
    /// Events that cannot be placed are logged and left out.
    #[must_use]
    pub fn resolve_all<'a>(&self, events: &'a [NormalizedEvent]) -> Vec<ResolvedEvent<'a>> {
        let cutoffs = CutoffMap::build(events);
        tracing::trace!(sections = cutoffs.len(), "Built section cutoffs");

        events
            .iter()
            .filter_map(|event| match self.resolve(event, &cutoffs) {
                Ok(resolved) => Some(resolved),
                Err(reason) => {
                    tracing::debug!(
                        summary = %event.summary(),
                        %reason,
                        "Skipping event without a placeable time"
                    );
                    None
                }
            })
            .collect()
    }

    /// ## Summary
    /// Computes the first occurrence, its end, and the UNTIL bound.
    ///
    /// ## Errors
    /// A `SkipReason` when a date or time is missing or does not parse.
    pub fn resolve<'a>(
        &self,
        event: &'a NormalizedEvent,
        cutoffs: &CutoffMap,
    ) -> Result<ResolvedEvent<'a>, SkipReason> {
        let start_date = required_date(event.start_date.as_deref(), "start")?;
        let end_date = required_date(event.end_date.as_deref(), "end")?;
        let start_time = required_time(&event.start_time)?;
        let end_time = required_time(&event.end_time)?;

        let duration: TimeDelta = end_time - start_time;
        let by_weekdays = recurrence_codes(&event.days_of_week);
        let adjusted_start = first_occurrence(start_date.and_time(start_time), &by_weekdays);
        let end = adjusted_start
            .checked_add_signed(duration)
            .ok_or(SkipReason::OutOfRange)?;

        let until = match cutoffs.get(event) {
            Some(cutoff) if !event.is_exam() => cutoff,
            _ => end_of_day(end_date),
        };

        tracing::trace!(
            summary = %event.summary(),
            %adjusted_start,
            %until,
            "Resolved recurrence window"
        );

        Ok(ResolvedEvent {
            event,
            end,
            window: RecurrenceWindow {
                adjusted_start,
                by_weekdays,
                until: until.max(adjusted_start),
            },
        })
    }
}

fn required_date(date: Option<&str>, which: &'static str) -> Result<NaiveDate, SkipReason> {
    let date = date
        .filter(|d| !d.trim().is_empty())
        .ok_or(SkipReason::MissingDate(which))?;
    parse_date(date).ok_or_else(|| SkipReason::UnparseableDate(date.to_string()))
}

fn required_time(time: &str) -> Result<NaiveTime, SkipReason> {
    if time.trim().is_empty() {
        return Err(SkipReason::MissingTime);
    }
    parse_time(time).ok_or_else(|| SkipReason::UnparseableTime(time.to_string()))
}
