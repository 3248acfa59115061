//! iCalendar component types (RFC 5545 §3.4-3.6).

use super::{Property, names};

/// Component kind for iCalendar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ComponentKind {
    /// VCALENDAR wrapper component.
    Calendar,
    /// VEVENT component.
    Event,
}

impl ComponentKind {
    /// Returns the string name for this component kind.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Calendar => "VCALENDAR",
            Self::Event => "VEVENT",
        }
    }
}

impl std::fmt::Display for ComponentKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// An iCalendar component.
///
/// Components can contain properties and nested sub-components.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Component {
    /// Component type.
    pub kind: ComponentKind,
    /// Properties in order of insertion.
    pub properties: Vec<Property>,
    /// Nested sub-components.
    pub children: Vec<Component>,
}

impl Component {
    /// Creates a new component with the given kind.
    #[must_use]
    pub fn new(kind: ComponentKind) -> Self {
        Self {
            kind,
            properties: Vec::new(),
            children: Vec::new(),
        }
    }

    /// Creates a VCALENDAR component.
    #[must_use]
    pub fn calendar() -> Self {
        Self::new(ComponentKind::Calendar)
    }

    /// Creates a VEVENT component.
    #[must_use]
    pub fn event() -> Self {
        Self::new(ComponentKind::Event)
    }

    /// Component name as written on BEGIN/END lines.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        self.kind.as_str()
    }

    /// Adds a property to this component.
    pub fn add_property(&mut self, prop: Property) {
        self.properties.push(prop);
    }

    /// Adds a child component.
    pub fn add_child(&mut self, child: Component) {
        self.children.push(child);
    }

    /// Returns the first property with the given name.
    #[must_use]
    pub fn get_property(&self, name: &str) -> Option<&Property> {
        let name_upper = name.to_ascii_uppercase();
        self.properties.iter().find(|p| p.name == name_upper)
    }

    /// Returns all properties with the given name.
    #[must_use]
    pub fn get_properties(&self, name: &str) -> Vec<&Property> {
        let name_upper = name.to_ascii_uppercase();
        self.properties
            .iter()
            .filter(|p| p.name == name_upper)
            .collect()
    }

    /// Returns the SUMMARY property value if present.
    #[must_use]
    pub fn summary(&self) -> Option<&str> {
        self.get_property(names::SUMMARY)?.as_text()
    }

    /// Returns all VEVENT children.
    #[must_use]
    pub fn events(&self) -> Vec<&Component> {
        self.children
            .iter()
            .filter(|c| c.kind == ComponentKind::Event)
            .collect()
    }
}

/// Top-level iCalendar object.
///
/// Wraps a VCALENDAR component with the header properties already set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ICalendar {
    /// The root VCALENDAR component.
    pub root: Component,
}

impl ICalendar {
    /// Creates a new empty Gregorian iCalendar.
    #[must_use]
    pub fn new(prodid: impl Into<String>) -> Self {
        let mut root = Component::calendar();
        root.add_property(Property::text(names::VERSION, "2.0"));
        root.add_property(Property::text(names::CALSCALE, "GREGORIAN"));
        root.add_property(Property::text(names::PRODID, prodid));
        Self { root }
    }

    /// Returns the PRODID value.
    #[must_use]
    pub fn prodid(&self) -> Option<&str> {
        self.root.get_property(names::PRODID)?.as_text()
    }

    /// Adds a VEVENT component.
    pub fn add_event(&mut self, event: Component) {
        self.root.add_child(event);
    }

    /// Returns all VEVENT components.
    #[must_use]
    pub fn events(&self) -> Vec<&Component> {
        self.root.events()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn icalendar_new() {
        let ical = ICalendar::new("-//Test//Test//EN");
        assert_eq!(
            ical.root.get_property("VERSION").and_then(Property::as_text),
            Some("2.0")
        );
        assert_eq!(ical.prodid(), Some("-//Test//Test//EN"));
        assert!(ical.events().is_empty());
    }

    #[test]
    fn component_properties() {
        let mut event = Component::event();
        event.add_property(Property::text("UID", "test-uid-123"));
        event.add_property(Property::text("SUMMARY", "Test Event"));
        event.add_property(Property::text("EXDATE", "a"));
        event.add_property(Property::text("EXDATE", "b"));

        assert_eq!(event.summary(), Some("Test Event"));
        assert_eq!(event.get_properties("exdate").len(), 2);
        assert!(event.get_property("DESCRIPTION").is_none());
    }

    #[test]
    fn icalendar_events() {
        let mut ical = ICalendar::new("-//Test//Test//EN");
        ical.add_event(Component::event());
        ical.add_event(Component::event());
        assert_eq!(ical.events().len(), 2);
    }
}
