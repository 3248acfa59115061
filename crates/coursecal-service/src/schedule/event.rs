//! The normalized event record.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// Method code that exempts an event from section cutoff grouping.
pub const EXAM_METHOD: &str = "EXAM";

/// Credit weight, keeping the export's own spelling for strings.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Credits {
    Number(f64),
    Text(String),
}

impl Credits {
    /// Numbers and non-blank strings; anything else carries no credits.
    #[must_use]
    pub fn from_json(value: &Value) -> Option<Self> {
        match value {
            Value::Number(n) => n.as_f64().map(Self::Number),
            Value::String(s) if !s.trim().is_empty() => Some(Self::Text(s.clone())),
            _ => None,
        }
    }

    /// Zero renders empty; strings render as written.
    #[must_use]
    pub fn display(&self) -> String {
        match self {
            Self::Number(n) if n.abs() > 0.0 => n.to_string(),
            Self::Number(_) => String::new(),
            Self::Text(s) => s.clone(),
        }
    }
}

fn lenient_credits<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<Credits>, D::Error> {
    Ok(Credits::from_json(&Value::deserialize(deserializer)?))
}

fn string_or_number<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    Ok(match Value::deserialize(deserializer)? {
        Value::String(s) => s,
        Value::Number(n) => n.to_string(),
        _ => String::new(),
    })
}

/// One placeable calendar block, flattened from a raw meeting.
///
/// Dates are `MM/DD/YYYY` calendar dates and times are local clock strings,
/// both still unparsed. Serializes with the export's PascalCase field names
/// so event lists written by `--json` can be read back.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct NormalizedEvent {
    #[serde(deserialize_with = "string_or_number")]
    pub course_name: String,
    #[serde(deserialize_with = "string_or_number")]
    pub section_number: String,
    #[serde(deserialize_with = "lenient_credits")]
    pub credits: Option<Credits>,
    pub instructors: Vec<String>,
    pub instructional_method: String,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    pub start_time: String,
    pub end_time: String,
    pub days_of_week: String,
    pub location: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub formatted_time: Option<String>,
}

impl NormalizedEvent {
    /// `"<method> <course>*<section>"`
    #[must_use]
    pub fn summary(&self) -> String {
        format!(
            "{} {}*{}",
            self.instructional_method, self.course_name, self.section_number
        )
    }

    /// Instructor list and credit line, separated by a line break.
    #[must_use]
    pub fn description(&self) -> String {
        format!(
            "Instructor(s): {}\nCredits: {}",
            self.instructors.join(" | "),
            self.credits_display()
        )
    }

    /// Credits as written in descriptions; absent credits render empty.
    #[must_use]
    pub fn credits_display(&self) -> String {
        self.credits.as_ref().map(Credits::display).unwrap_or_default()
    }

    #[must_use]
    pub fn is_exam(&self) -> bool {
        self.instructional_method == EXAM_METHOD
    }

    /// Course+section grouping key, `None` when either half is blank.
    #[must_use]
    pub fn cutoff_key(&self) -> Option<(&str, &str)> {
        if self.course_name.is_empty() || self.section_number.is_empty() {
            return None;
        }
        Some((&self.course_name, &self.section_number))
    }
}
