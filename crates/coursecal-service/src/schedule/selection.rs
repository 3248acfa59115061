//! Registration-priority section selection.

use super::raw::{RawPlannedCourse, RawTerm};

/// ## Summary
/// Chooses which planned courses of a term become calendar events.
///
/// Rules, first match wins:
/// 1. The term lists active section ids: keep courses whose section id is
///    listed or that are flagged registered.
/// 2. Any course in the term is flagged registered: keep only flagged ones.
/// 3. Otherwise keep everything planned.
#[must_use]
pub fn select_planned_courses(term: &RawTerm) -> Vec<&RawPlannedCourse> {
    let courses = term.planned_courses.iter();

    if !term.active_section_ids.is_empty() {
        return courses
            .filter(|p| {
                p.has_registered_section
                    || p.section_id
                        .as_ref()
                        .is_some_and(|id| term.active_section_ids.contains(id))
            })
            .collect();
    }

    if term.planned_courses.iter().any(|p| p.has_registered_section) {
        return courses.filter(|p| p.has_registered_section).collect();
    }

    courses.collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schedule::raw::RawSection;

    fn course(name: &str, id: Option<&str>, registered: bool) -> RawPlannedCourse {
        RawPlannedCourse {
            section_id: id.map(str::to_string),
            has_registered_section: registered,
            section: RawSection {
                course_name: name.to_string(),
                ..RawSection::default()
            },
        }
    }

    fn names(selected: &[&RawPlannedCourse]) -> Vec<String> {
        selected
            .iter()
            .map(|p| p.section.course_name.clone())
            .collect()
    }

    #[test]
    fn active_ids_take_priority() {
        let term = RawTerm {
            code: "F25".into(),
            planned_courses: vec![
                course("A", Some("1"), false),
                course("B", Some("2"), false),
                course("C", Some("3"), true),
                course("D", None, false),
            ],
            active_section_ids: vec!["1".into()],
        };
        assert_eq!(names(&select_planned_courses(&term)), ["A", "C"]);
    }

    #[test]
    fn registered_flags_drop_unflagged() {
        let term = RawTerm {
            code: "F25".into(),
            planned_courses: vec![
                course("A", Some("1"), false),
                course("B", Some("2"), true),
            ],
            active_section_ids: Vec::new(),
        };
        assert_eq!(names(&select_planned_courses(&term)), ["B"]);
    }

    #[test]
    fn no_signal_keeps_everything() {
        let term = RawTerm {
            code: "F25".into(),
            planned_courses: vec![course("A", None, false), course("B", Some("2"), false)],
            active_section_ids: Vec::new(),
        };
        assert_eq!(names(&select_planned_courses(&term)), ["A", "B"]);
    }
}
