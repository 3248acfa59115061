//! VCALENDAR assembly from resolved events.

use std::sync::atomic::{AtomicU64, Ordering};

use chrono::{NaiveDateTime, Utc};
use coursecal_core::constants::UID_DOMAIN;
use coursecal_rfc::rfc::ical::core::{
    Component, DateTime, ICalendar, Property, WeeklyRule, names,
};

use super::exclusion::ExclusionCalculator;
use super::recurrence::ResolvedEvent;
use crate::error::ServiceResult;

/// Source of the DTSTAMP instant.
pub trait Clock: Send + Sync {
    fn now(&self) -> chrono::DateTime<Utc>;
}

#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> chrono::DateTime<Utc> {
        Utc::now()
    }
}

/// Always returns the same instant.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub chrono::DateTime<Utc>);

impl Clock for FixedClock {
    fn now(&self) -> chrono::DateTime<Utc> {
        self.0
    }
}

/// Source of VEVENT UIDs.
pub trait UidGenerator: Send + Sync {
    fn next_uid(&self) -> String;
}

/// 32 random hex digits (UUID v4) plus the UID domain.
#[derive(Debug, Default, Clone, Copy)]
pub struct RandomUid;

impl UidGenerator for RandomUid {
    fn next_uid(&self) -> String {
        format!("{}@{UID_DOMAIN}", uuid::Uuid::new_v4().simple())
    }
}

/// Counter rendered as 32 hex digits, starting at 1.
#[derive(Debug, Default)]
pub struct SequentialUid {
    issued: AtomicU64,
}

impl UidGenerator for SequentialUid {
    fn next_uid(&self) -> String {
        let n = self.issued.fetch_add(1, Ordering::Relaxed) + 1;
        format!("{n:032x}@{UID_DOMAIN}")
    }
}

/// Builds VEVENT components and whole calendars.
pub struct CalendarSerializer {
    prodid: String,
    clock: Box<dyn Clock>,
    uids: Box<dyn UidGenerator>,
}

impl std::fmt::Debug for CalendarSerializer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CalendarSerializer")
            .field("prodid", &self.prodid)
            .finish_non_exhaustive()
    }
}

impl CalendarSerializer {
    /// Serializer stamping with the system clock and random UIDs.
    #[must_use]
    pub fn new(prodid: impl Into<String>) -> Self {
        Self {
            prodid: prodid.into(),
            clock: Box::new(SystemClock),
            uids: Box::new(RandomUid),
        }
    }

    #[must_use]
    pub fn with_clock(mut self, clock: impl Clock + 'static) -> Self {
        self.clock = Box::new(clock);
        self
    }

    #[must_use]
    pub fn with_uid_generator(mut self, uids: impl UidGenerator + 'static) -> Self {
        self.uids = Box::new(uids);
        self
    }

    #[must_use]
    pub fn prodid(&self) -> &str {
        &self.prodid
    }

    /// ## Summary
    /// Builds one VEVENT. RRULE and EXDATE lines are written only for
    /// recurring events.
    ///
    /// ## Errors
    /// Returns an error if an instant is outside the writable year range.
    pub fn build_event(
        &self,
        resolved: &ResolvedEvent<'_>,
        exdates: &[NaiveDateTime],
    ) -> ServiceResult<Component> {
        let event = resolved.event;
        let window = &resolved.window;

        let mut vevent = Component::event();
        vevent.add_property(Property::text(names::UID, self.uids.next_uid()));
        vevent.add_property(Property::datetime(
            names::DTSTAMP,
            DateTime::from_zoned(&self.clock.now())?,
        ));
        vevent.add_property(Property::datetime(
            names::DTSTART,
            DateTime::from_naive(window.adjusted_start)?,
        ));
        vevent.add_property(Property::datetime(
            names::DTEND,
            DateTime::from_naive(resolved.end)?,
        ));

        if window.is_recurring() {
            vevent.add_property(Property::rrule(WeeklyRule::new(
                window.by_weekdays.clone(),
                DateTime::from_naive(window.until)?,
            )));
            for exdate in exdates {
                vevent.add_property(Property::datetime(
                    names::EXDATE,
                    DateTime::from_naive(*exdate)?,
                ));
            }
        }

        vevent.add_property(Property::text(names::SUMMARY, event.summary()));
        vevent.add_property(Property::text(names::DESCRIPTION, event.description()));
        vevent.add_property(Property::text(names::LOCATION, event.location.clone()));

        Ok(vevent)
    }

    /// ## Summary
    /// Builds the calendar, one VEVENT per resolved event in input order.
    ///
    /// An event that cannot be written is logged and left out.
    #[must_use]
    pub fn to_calendar(
        &self,
        resolved: &[ResolvedEvent<'_>],
        exclusions: &ExclusionCalculator,
    ) -> ICalendar {
        let mut ical = ICalendar::new(self.prodid.clone());

        for item in resolved {
            let exdates = exclusions.for_window(&item.window);
            match self.build_event(item, &exdates) {
                Ok(vevent) => ical.add_event(vevent),
                Err(err) => tracing::warn!(
                    summary = %item.event.summary(),
                    error = %err,
                    "Skipping event that cannot be serialized"
                ),
            }
        }

        tracing::debug!(event_count = ical.events().len(), "Built calendar");
        ical
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calendar::breaks::BreakCalculator;
    use crate::calendar::recurrence::RecurrenceResolver;
    use crate::schedule::{Credits, NormalizedEvent};
    use chrono::TimeZone;
    use coursecal_rfc::rfc::ical::serialize;

    fn serializer() -> CalendarSerializer {
        let stamp = Utc
            .with_ymd_and_hms(2025, 8, 20, 12, 0, 0)
            .single()
            .expect("valid literal");
        CalendarSerializer::new("-//Test//EN")
            .with_clock(FixedClock(stamp))
            .with_uid_generator(SequentialUid::default())
    }

    fn event(days: &str) -> NormalizedEvent {
        NormalizedEvent {
            course_name: "CIS*2500".into(),
            section_number: "0101".into(),
            credits: Some(Credits::Number(0.5)),
            instructors: vec!["Doe, J".into()],
            instructional_method: "LEC".into(),
            start_date: Some("09/02/2025".into()),
            end_date: Some("11/28/2025".into()),
            start_time: "11:30 AM".into(),
            end_time: "12:50 PM".into(),
            days_of_week: days.into(),
            location: "ROZH 104".into(),
            formatted_time: None,
        }
    }

    #[test]
    fn uid_formats() {
        let uid = RandomUid.next_uid();
        let (hex, domain) = uid.split_once('@').expect("domain suffix");
        assert_eq!(domain, "schedule");
        assert_eq!(hex.len(), 32);
        assert!(hex.chars().all(|c| c.is_ascii_hexdigit()));

        let seq = SequentialUid::default();
        assert_eq!(seq.next_uid(), "00000000000000000000000000000001@schedule");
        assert_eq!(seq.next_uid(), "00000000000000000000000000000002@schedule");
    }

    #[test_log::test]
    fn recurring_event_lines() {
        let events = vec![event("TTh")];
        let resolved = RecurrenceResolver::new().resolve_all(&events);
        let ical = serializer().to_calendar(&resolved, &ExclusionCalculator::new(BreakCalculator::new()));
        let text = serialize(&ical);

        assert_eq!(
            text,
            [
                "BEGIN:VCALENDAR",
                "VERSION:2.0",
                "CALSCALE:GREGORIAN",
                "PRODID:-//Test//EN",
                "BEGIN:VEVENT",
                "UID:00000000000000000000000000000001@schedule",
                "DTSTAMP:20250820T120000Z",
                "DTSTART:20250902T113000",
                "DTEND:20250902T125000",
                "RRULE:FREQ=WEEKLY;BYDAY=TU,TH;UNTIL=20251114T235959",
                "EXDATE:20251014T113000",
                "SUMMARY:LEC CIS*2500*0101",
                "DESCRIPTION:Instructor(s): Doe, J\\nCredits: 0.5",
                "LOCATION:ROZH 104",
                "END:VEVENT",
                "END:VCALENDAR",
            ]
            .join("\n")
        );
    }

    #[test]
    fn single_instance_has_no_rrule() {
        let events = vec![event("")];
        let resolved = RecurrenceResolver::new().resolve_all(&events);
        let vevent = serializer()
            .build_event(&resolved[0], &[])
            .expect("in range");
        assert!(vevent.get_property(names::RRULE).is_none());
        assert!(vevent.get_properties(names::EXDATE).is_empty());
        assert_eq!(vevent.summary(), Some("LEC CIS*2500*0101"));
    }
}
