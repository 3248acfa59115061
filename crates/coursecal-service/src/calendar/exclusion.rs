//! Reading-break EXDATE computation.

use std::collections::BTreeSet;

use chrono::{Datelike, NaiveDateTime, NaiveTime, Timelike};

use super::breaks::{BreakCalculator, academic_fall_year};
use super::recurrence::RecurrenceWindow;
use super::weekday::to_calendar_weekday_numbers;

#[derive(Debug, Default, Clone, Copy)]
pub struct ExclusionCalculator {
    breaks: BreakCalculator,
}

impl ExclusionCalculator {
    #[must_use]
    pub const fn new(breaks: BreakCalculator) -> Self {
        Self { breaks }
    }

    /// ## Summary
    /// Break days on one of `weekdays` (Sunday = 0) whose midnight lies
    /// within `[start, until]`.
    ///
    /// Breaks are gathered for the academic year of `start` and the one after.
    /// Each exclusion carries the start's hour and minute, so a break on the
    /// first occurrence's own date is never excluded.
    #[must_use]
    pub fn exclusions(
        &self,
        start: NaiveDateTime,
        until: NaiveDateTime,
        weekdays: &BTreeSet<u8>,
    ) -> Vec<NaiveDateTime> {
        let fall_year = academic_fall_year(start.date());

        self.breaks
            .breaks_from(fall_year)
            .iter()
            .flat_map(|period| period.days())
            .filter(|day| {
                u8::try_from(day.weekday().num_days_from_sunday())
                    .is_ok_and(|n| weekdays.contains(&n))
            })
            .filter(|day| (start..=until).contains(&day.and_time(NaiveTime::MIN)))
            .filter_map(|day| day.and_hms_opt(start.hour(), start.minute(), 0))
            .collect()
    }

    /// Exclusions for a resolved window; none for single-instance events.
    #[must_use]
    pub fn for_window(&self, window: &RecurrenceWindow) -> Vec<NaiveDateTime> {
        if !window.is_recurring() {
            return Vec::new();
        }
        self.exclusions(
            window.adjusted_start,
            window.until,
            &to_calendar_weekday_numbers(&window.by_weekdays),
        )
    }
}
