//! Field-variant resolution for raw schedule exports.
//!
//! The institution export has grown several spellings for the same concept
//! (three location keys, two meeting lists, string or split-hour times...).
//! Everything that knows about those spellings lives here; the normalizer
//! only ever sees the canonical records from [`super::raw`].

use serde::Deserialize;
use serde_json::{Map, Value};

use super::event::{Credits, NormalizedEvent};
use super::raw::{RawDate, RawMeeting, RawPlannedCourse, RawSchedule, RawSection, RawTerm};
use crate::error::{ServiceError, ServiceResult};

type Object = Map<String, Value>;

/// ## Summary
/// Maps a raw schedule JSON value into canonical records.
///
/// Entries that are not objects are skipped with a warning.
///
/// ## Errors
/// Returns `ServiceError::InvalidSchedule` if the top-level value is not an object.
pub fn adapt_schedule(value: &Value) -> ServiceResult<RawSchedule> {
    let Some(root) = value.as_object() else {
        return Err(ServiceError::InvalidSchedule(format!(
            "expected a JSON object, found {}",
            json_kind(value)
        )));
    };

    let terms: Vec<RawTerm> = objects(root.get("Terms"), "term").map(adapt_term).collect();
    tracing::trace!(term_count = terms.len(), "Adapted raw schedule");

    Ok(RawSchedule { terms })
}

/// ## Summary
/// Reads a list of already-normalized events.
///
/// Entries that do not deserialize are skipped with a warning.
///
/// ## Errors
/// Returns `ServiceError::InvalidSchedule` if `value` is not an array.
pub fn adapt_events(value: &Value) -> ServiceResult<Vec<NormalizedEvent>> {
    let Some(entries) = value.as_array() else {
        return Err(ServiceError::InvalidSchedule(format!(
            "expected a JSON array of events, found {}",
            json_kind(value)
        )));
    };

    Ok(entries
        .iter()
        .enumerate()
        .filter_map(|(index, entry)| match NormalizedEvent::deserialize(entry) {
            Ok(event) => Some(event),
            Err(err) => {
                tracing::warn!(index, error = %err, "Skipping unreadable event");
                None
            }
        })
        .collect())
}

/// Maps one term object.
#[must_use]
pub fn adapt_term(term: &Object) -> RawTerm {
    RawTerm {
        code: text(term.get("Code")).unwrap_or_default(),
        planned_courses: objects(term.get("PlannedCourses"), "planned course")
            .map(adapt_planned_course)
            .collect(),
        active_section_ids: term
            .get("ActiveSectionIds")
            .and_then(Value::as_array)
            .into_iter()
            .flatten()
            .filter_map(|id| text(Some(id)))
            .collect(),
    }
}

/// Maps one planned course, pulling registration flags from either level.
#[must_use]
pub fn adapt_planned_course(planned: &Object) -> RawPlannedCourse {
    let empty = Object::new();
    let section = planned
        .get("Section")
        .and_then(Value::as_object)
        .unwrap_or(&empty);

    RawPlannedCourse {
        section_id: first_text(section, &["Id", "SectionId"])
            .or_else(|| text(planned.get("SectionId"))),
        has_registered_section: truthy(planned.get("HasRegisteredSection"))
            || truthy(section.get("HasRegisteredSection")),
        section: adapt_section(section),
    }
}

/// Maps one section and its meetings.
#[must_use]
pub fn adapt_section(section: &Object) -> RawSection {
    // An empty PlannedMeetings array still wins over the legacy key
    let meetings = section
        .get("PlannedMeetings")
        .filter(|v| truthy(Some(v)))
        .or_else(|| section.get("Meetings"));

    RawSection {
        course_name: text(section.get("CourseName")).unwrap_or_default(),
        number: text(section.get("Number")).unwrap_or_default(),
        minimum_credits: section.get("MinimumCredits").and_then(Credits::from_json),
        faculty: section
            .get("Faculty")
            .and_then(Value::as_array)
            .into_iter()
            .flatten()
            .filter_map(|name| text(Some(name)))
            .collect(),
        meetings: objects(meetings, "meeting").map(adapt_meeting).collect(),
    }
}

/// Maps one meeting, resolving every known field-name variant.
#[must_use]
pub fn adapt_meeting(meeting: &Object) -> RawMeeting {
    RawMeeting {
        instructional_method: first_text(
            meeting,
            &["InstructionalMethod", "InstructionalMethodCode"],
        )
        .unwrap_or_default(),
        start_time: meeting_time(meeting, "StartTime", "StartTimeHour", "StartTimeMinute", "RawStartTime"),
        end_time: meeting_time(meeting, "EndTime", "EndTimeHour", "EndTimeMinute", "RawEndTime"),
        start_date: meeting_date(meeting, "StartDateString", "StartDate"),
        end_date: meeting_date(meeting, "EndDateString", "EndDate"),
        days_of_week: first_text(meeting, &["DaysOfWeek", "Days"]).unwrap_or_default(),
        location: first_text(meeting, &["MeetingLocation", "Room", "Location"])
            .map(|loc| loc.trim().to_string())
            .unwrap_or_default(),
        formatted_time: text(meeting.get("FormattedTime")),
    }
}

fn meeting_time(
    meeting: &Object,
    key: &str,
    hour_key: &str,
    minute_key: &str,
    raw_key: &str,
) -> Option<String> {
    if let Some(time) = text(meeting.get(key)) {
        return Some(time);
    }
    match meeting.get(hour_key).filter(|v| !v.is_null()) {
        Some(hour) => {
            let hour = text(Some(hour))?;
            let minute = text(meeting.get(minute_key)).unwrap_or_else(|| "0".to_string());
            Some(format!("{hour}:{minute:0>2}"))
        }
        None => text(meeting.get(raw_key)),
    }
}

fn meeting_date(meeting: &Object, display_key: &str, iso_key: &str) -> Option<RawDate> {
    text(meeting.get(display_key))
        .map(RawDate::MonthDayYear)
        .or_else(|| text(meeting.get(iso_key)).map(RawDate::Iso))
}

fn objects<'a>(
    value: Option<&'a Value>,
    what: &'static str,
) -> impl Iterator<Item = &'a Object> + 'a {
    value
        .and_then(Value::as_array)
        .into_iter()
        .flatten()
        .filter_map(move |entry| {
            let object = entry.as_object();
            if object.is_none() {
                tracing::warn!(what, found = json_kind(entry), "Skipping non-object entry");
            }
            object
        })
}

/// Non-empty string or number rendered as a string.
fn text(value: Option<&Value>) -> Option<String> {
    match value? {
        Value::String(s) if !s.is_empty() => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

fn first_text(object: &Object, keys: &[&str]) -> Option<String> {
    keys.iter().find_map(|key| text(object.get(*key)))
}

fn truthy(value: Option<&Value>) -> bool {
    match value {
        Some(Value::Bool(b)) => *b,
        Some(Value::Number(n)) => n.as_f64().is_some_and(|f| f.abs() > 0.0),
        Some(Value::String(s)) => !s.is_empty(),
        Some(Value::Array(_) | Value::Object(_)) => true,
        Some(Value::Null) | None => false,
    }
}

const fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
