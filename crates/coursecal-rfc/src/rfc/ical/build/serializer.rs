//! iCalendar serializer.
//!
//! Serializes calendar structures to newline-separated text.

use super::escape::escape_line_breaks;
use crate::rfc::ical::core::{Component, ComponentKind, ICalendar, Property, Value};

/// Serializes an iCalendar document to a string.
///
/// Child components are separated by one blank line; the closing
/// `END:VCALENDAR` directly follows the last child. No trailing newline.
#[must_use]
pub fn serialize(ical: &ICalendar) -> String {
    let mut lines = Vec::new();
    push_component(&ical.root, &mut lines);
    tracing::trace!(
        line_count = lines.len(),
        event_count = ical.root.children.len(),
        "Serialized calendar"
    );
    lines.join("\n")
}

/// Serializes a property to a single content line.
#[must_use]
pub fn serialize_property(prop: &Property) -> String {
    let mut line = prop.name.clone();
    line.push(':');
    line.push_str(&serialize_value(&prop.value));
    line
}

fn push_component(component: &Component, lines: &mut Vec<String>) {
    lines.push(format!("BEGIN:{}", component.name()));

    for prop in canonical_property_order(&component.properties, component.kind) {
        lines.push(serialize_property(prop));
    }

    for (idx, child) in component.children.iter().enumerate() {
        if idx > 0 {
            lines.push(String::new());
        }
        push_component(child, lines);
    }

    lines.push(format!("END:{}", component.name()));
}

fn serialize_value(value: &Value) -> String {
    match value {
        Value::Text(s) => escape_line_breaks(s),
        Value::DateTime(dt) => dt.to_string(),
        Value::Recur(rule) => rule.to_string(),
    }
}

/// Returns properties in canonical order for deterministic output.
fn canonical_property_order(props: &[Property], kind: ComponentKind) -> Vec<&Property> {
    let order: &[&str] = match kind {
        ComponentKind::Calendar => &["VERSION", "CALSCALE", "PRODID"],
        ComponentKind::Event => &[
            "UID",
            "DTSTAMP",
            "DTSTART",
            "DTEND",
            "RRULE",
            "EXDATE",
            "SUMMARY",
            "DESCRIPTION",
            "LOCATION",
        ],
    };

    let mut ordered: Vec<&Property> = Vec::with_capacity(props.len());

    for &name in order {
        for prop in props {
            if prop.name.eq_ignore_ascii_case(name) {
                ordered.push(prop);
            }
        }
    }

    // Remaining properties keep their insertion order
    for prop in props {
        if !order.iter().any(|&n| prop.name.eq_ignore_ascii_case(n)) {
            ordered.push(prop);
        }
    }

    ordered
}
