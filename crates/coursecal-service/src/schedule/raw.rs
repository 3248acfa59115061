//! Canonical raw schedule records.
//!
//! These mirror the institution export after field-name variants have been
//! resolved by [`super::adapter`]. Values are still unparsed strings.

use super::event::Credits;

/// Whole export: a list of academic terms.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawSchedule {
    pub terms: Vec<RawTerm>,
}

/// One academic term and the courses planned in it.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawTerm {
    pub code: String,
    pub planned_courses: Vec<RawPlannedCourse>,
    /// Section ids the student is registered in; empty when the export has none.
    pub active_section_ids: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawPlannedCourse {
    pub section_id: Option<String>,
    pub has_registered_section: bool,
    pub section: RawSection,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawSection {
    pub course_name: String,
    pub number: String,
    pub minimum_credits: Option<Credits>,
    pub faculty: Vec<String>,
    pub meetings: Vec<RawMeeting>,
}

/// A meeting date as it appeared in the export.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RawDate {
    /// Already in `M/D/YYYY` display form.
    MonthDayYear(String),
    /// ISO 8601 date or date-time, still to be reformatted.
    Iso(String),
}

/// One weekly class or exam block.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawMeeting {
    pub instructional_method: String,
    pub start_time: Option<String>,
    pub end_time: Option<String>,
    pub start_date: Option<RawDate>,
    pub end_date: Option<RawDate>,
    pub days_of_week: String,
    pub location: String,
    pub formatted_time: Option<String>,
}
