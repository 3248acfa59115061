//! End-to-end entry points: raw schedule JSON to events and calendar text.

use chrono::NaiveDateTime;
use coursecal_core::config::CalendarConfig;
use coursecal_core::constants::DEFAULT_PRODID;
use coursecal_rfc::rfc::ical::{ICalendar, serialize};
use serde_json::Value;

use super::breaks::BreakCalculator;
use super::exclusion::ExclusionCalculator;
use super::export::CalendarSerializer;
use super::recurrence::{RecurrenceResolver, ResolvedEvent};
use crate::error::ServiceResult;
use crate::schedule::{EventNormalizer, NormalizedEvent, adapt_schedule};

/// Wires the normalizer, resolver, exclusion calculator and serializer.
#[derive(Debug)]
pub struct SchedulePipeline {
    normalizer: EventNormalizer,
    resolver: RecurrenceResolver,
    exclusions: ExclusionCalculator,
    serializer: CalendarSerializer,
}

impl Default for SchedulePipeline {
    fn default() -> Self {
        Self::new(CalendarSerializer::new(DEFAULT_PRODID))
    }
}

impl SchedulePipeline {
    #[must_use]
    pub fn new(serializer: CalendarSerializer) -> Self {
        Self {
            normalizer: EventNormalizer::new(),
            resolver: RecurrenceResolver::new(),
            exclusions: ExclusionCalculator::new(BreakCalculator::new()),
            serializer,
        }
    }

    /// Pipeline writing the configured PRODID.
    #[must_use]
    pub fn from_settings(calendar: &CalendarConfig) -> Self {
        Self::new(CalendarSerializer::new(calendar.prodid.clone()))
    }

    #[must_use]
    pub const fn serializer(&self) -> &CalendarSerializer {
        &self.serializer
    }

    /// ## Summary
    /// Normalizes a raw schedule, keeping only terms in `term_codes` when it
    /// is non-empty.
    ///
    /// ## Errors
    /// Returns `ServiceError::InvalidSchedule` if `raw` is not a JSON object.
    pub fn normalize(&self, raw: &Value, term_codes: &[String]) -> ServiceResult<Vec<NormalizedEvent>> {
        let schedule = adapt_schedule(raw)?;
        Ok(self.normalizer.normalize(&schedule, term_codes))
    }

    /// ## Summary
    /// [`Self::normalize`] followed by [`Self::events_to_calendar_text`].
    ///
    /// ## Errors
    /// Returns `ServiceError::InvalidSchedule` if `raw` is not a JSON object.
    pub fn schedule_to_calendar_text(&self, raw: &Value, term_codes: &[String]) -> ServiceResult<String> {
        let events = self.normalize(raw, term_codes)?;
        Ok(self.events_to_calendar_text(&events))
    }

    /// Calendar text for events normalized elsewhere.
    #[must_use]
    pub fn events_to_calendar_text(&self, events: &[NormalizedEvent]) -> String {
        serialize(&self.events_to_calendar(events))
    }

    #[must_use]
    pub fn events_to_calendar(&self, events: &[NormalizedEvent]) -> ICalendar {
        let resolved = self.resolve(events);
        self.serializer.to_calendar(&resolved, &self.exclusions)
    }

    /// Recurrence windows for every placeable event.
    #[must_use]
    pub fn resolve<'a>(&self, events: &'a [NormalizedEvent]) -> Vec<ResolvedEvent<'a>> {
        self.resolver.resolve_all(events)
    }

    /// EXDATE instants for one resolved event.
    #[must_use]
    pub fn exclusions(&self, resolved: &ResolvedEvent<'_>) -> Vec<NaiveDateTime> {
        self.exclusions.for_window(&resolved.window)
    }
}
