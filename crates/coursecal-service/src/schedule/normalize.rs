//! Raw schedule to [`NormalizedEvent`] flattening.

use super::event::NormalizedEvent;
use super::raw::{RawDate, RawMeeting, RawSchedule, RawSection};
use super::selection::select_planned_courses;
use crate::calendar::datetime::iso_to_month_day_year;
use crate::skip::SkipReason;

/// Flattens selected planned courses into one event per meeting.
#[derive(Debug, Default, Clone, Copy)]
pub struct EventNormalizer;

impl EventNormalizer {
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// ## Summary
    /// Produces the event sequence for the terms matching `term_codes`
    /// (all terms when the filter is empty).
    ///
    /// Meetings without a start or end time are dropped and logged.
    #[must_use]
    pub fn normalize(&self, schedule: &RawSchedule, term_codes: &[String]) -> Vec<NormalizedEvent> {
        let mut events = Vec::new();
        let mut skipped = 0_usize;

        let terms = schedule
            .terms
            .iter()
            .filter(|term| term_codes.is_empty() || term_codes.contains(&term.code));

        for term in terms {
            let selected = select_planned_courses(term);
            tracing::trace!(
                term = %term.code,
                planned = term.planned_courses.len(),
                selected = selected.len(),
                "Selected planned courses"
            );

            for planned in selected {
                let section = &planned.section;
                for meeting in &section.meetings {
                    match self.normalize_meeting(section, meeting) {
                        Ok(event) => events.push(event),
                        Err(reason) => {
                            skipped += 1;
                            tracing::debug!(
                                course = %section.course_name,
                                section = %section.number,
                                %reason,
                                "Skipping meeting"
                            );
                        }
                    }
                }
            }
        }

        tracing::info!(
            event_count = events.len(),
            skipped,
            "Normalized schedule"
        );
        events
    }

    /// ## Summary
    /// Builds the event for a single meeting of `section`.
    ///
    /// ## Errors
    /// `SkipReason::MissingTime` when either clock time is absent. Missing or
    /// malformed dates are kept as `None` for later stages to reject.
    pub fn normalize_meeting(
        &self,
        section: &RawSection,
        meeting: &RawMeeting,
    ) -> Result<NormalizedEvent, SkipReason> {
        let (Some(start_time), Some(end_time)) = (&meeting.start_time, &meeting.end_time) else {
            return Err(SkipReason::MissingTime);
        };

        Ok(NormalizedEvent {
            course_name: section.course_name.clone(),
            section_number: section.number.clone(),
            credits: section.minimum_credits.clone(),
            instructors: section.faculty.clone(),
            instructional_method: meeting.instructional_method.clone(),
            start_date: meeting.start_date.as_ref().and_then(display_date),
            end_date: meeting.end_date.as_ref().and_then(display_date),
            start_time: start_time.clone(),
            end_time: end_time.clone(),
            days_of_week: meeting.days_of_week.clone(),
            location: meeting.location.clone(),
            formatted_time: meeting.formatted_time.clone(),
        })
    }
}

fn display_date(date: &RawDate) -> Option<String> {
    match date {
        RawDate::MonthDayYear(s) => Some(s.clone()),
        RawDate::Iso(iso) => {
            let converted = iso_to_month_day_year(iso);
            if converted.is_none() {
                tracing::debug!(iso = %iso, "Malformed ISO date");
            }
            converted
        }
    }
}
