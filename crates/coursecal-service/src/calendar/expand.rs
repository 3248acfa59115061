//! Occurrence expansion with the `rrule` crate.
//!
//! Floating local values are carried through `rrule` as UTC wall clock and
//! converted back, so no zone arithmetic shifts them.

use chrono::{NaiveDateTime, TimeZone};
use rrule::{Frequency, NWeekday, RRule, Tz};

use super::recurrence::ResolvedEvent;
use crate::error::{ServiceError, ServiceResult};

fn wall_clock(naive: &NaiveDateTime) -> chrono::DateTime<Tz> {
    Tz::UTC.from_utc_datetime(naive)
}

/// ## Summary
/// Start instants of the event's occurrences, minus `exdates`, capped at `limit`.
///
/// Single-instance events yield just their start.
///
/// ## Errors
/// Returns `ServiceError::RecurrenceError` if `rrule` rejects the rule.
pub fn expand_occurrences(
    resolved: &ResolvedEvent<'_>,
    exdates: &[NaiveDateTime],
    limit: u16,
) -> ServiceResult<Vec<NaiveDateTime>> {
    let window = &resolved.window;
    if !window.is_recurring() {
        return Ok(if limit == 0 { Vec::new() } else { vec![window.adjusted_start] });
    }

    let by_weekday: Vec<NWeekday> = window
        .by_weekdays
        .iter()
        .map(|day| NWeekday::Every(day.to_chrono()))
        .collect();

    let rule: RRule<rrule::Unvalidated> = RRule::new(Frequency::Weekly)
        .by_weekday(by_weekday)
        .until(wall_clock(&window.until));

    let rrule_set = rule
        .build(wall_clock(&window.adjusted_start))
        .map_err(|err| ServiceError::RecurrenceError(err.to_string()))?
        .set_exdates(exdates.iter().map(wall_clock).collect());

    let result = rrule_set.all(limit);
    tracing::trace!(
        summary = %resolved.event.summary(),
        count = result.dates.len(),
        limited = result.limited,
        "Expanded occurrences"
    );

    Ok(result.dates.iter().map(chrono::DateTime::naive_utc).collect())
}
