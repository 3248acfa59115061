//! End-to-end tests over a realistic two-term export.

use std::collections::HashMap;

use chrono::{Datelike, NaiveDate, NaiveDateTime, TimeZone, Utc};
use coursecal_service::calendar::breaks::BreakCalculator;
use coursecal_service::calendar::datetime::{parse_date, parse_time};
use coursecal_service::calendar::export::{CalendarSerializer, FixedClock, SequentialUid};
use coursecal_service::calendar::weekday::tokenize;
use coursecal_service::schedule::{Credits, adapt_events};
use coursecal_service::{NormalizedEvent, SchedulePipeline};
use serde_json::{Value, json};

fn fixture() -> Value {
    serde_json::from_str(include_str!(concat!(
        env!("CARGO_MANIFEST_DIR"),
        "/tests/fixtures/schedule.json"
    )))
    .expect("fixture is valid JSON")
}

fn pipeline() -> SchedulePipeline {
    let stamp = Utc
        .with_ymd_and_hms(2025, 8, 20, 12, 0, 0)
        .single()
        .expect("valid literal");
    SchedulePipeline::new(
        CalendarSerializer::new("-//Test//EN")
            .with_clock(FixedClock(stamp))
            .with_uid_generator(SequentialUid::default()),
    )
}

/// One VEVENT as property name to values, in file order.
type Block = HashMap<String, Vec<String>>;

fn vevents(text: &str) -> Vec<Block> {
    let mut blocks = Vec::new();
    let mut current: Option<Block> = None;
    for line in text.split('\n') {
        match line {
            "BEGIN:VEVENT" => current = Some(Block::new()),
            "END:VEVENT" => blocks.extend(current.take()),
            _ => {
                if let (Some(block), Some((name, value))) = (current.as_mut(), line.split_once(':')) {
                    block
                        .entry(name.to_string())
                        .or_default()
                        .push(value.to_string());
                }
            }
        }
    }
    blocks
}

fn one<'a>(block: &'a Block, name: &str) -> &'a str {
    block
        .get(name)
        .and_then(|values| values.first())
        .unwrap_or_else(|| panic!("missing {name}"))
}

fn stamp(value: &str) -> NaiveDateTime {
    NaiveDateTime::parse_from_str(value, "%Y%m%dT%H%M%S").expect("floating timestamp")
}

fn rrule_parts(block: &Block) -> Option<(Vec<String>, NaiveDateTime)> {
    let rule = block.get("RRULE")?.first()?;
    let mut by_day = Vec::new();
    let mut until = None;
    for part in rule.split(';') {
        match part.split_once('=') {
            Some(("BYDAY", days)) => by_day = days.split(',').map(str::to_string).collect(),
            Some(("UNTIL", value)) => until = Some(stamp(value)),
            _ => {}
        }
    }
    Some((by_day, until?))
}

fn code(date: NaiveDateTime) -> String {
    date.weekday().to_string().to_uppercase()[..2].to_string()
}

#[test_log::test]
fn normalizes_registered_sections() {
    let events = pipeline().normalize(&fixture(), &[]).expect("object input");
    let summaries: Vec<String> = events.iter().map(NormalizedEvent::summary).collect();
    assert_eq!(
        summaries,
        [
            "LEC MATH101*001",
            "LAB MATH101*001",
            "EXAM MATH101*001",
            "LEC CIS*1300*0102",
            "SEM HIST*1010*02",
        ]
    );

    let lab = &events[1];
    assert_eq!(lab.start_time, "14:30");
    assert_eq!(lab.end_time, "16:20");
    assert_eq!(lab.start_date.as_deref(), Some("09/05/2025"));
    assert_eq!(lab.days_of_week, "F");
    assert_eq!(lab.location, "MACN 113");
    assert_eq!(events[3].credits, Some(Credits::Text("0.50".into())));
}

#[test_log::test]
fn term_filter_keeps_only_selected_terms() {
    let events = pipeline()
        .normalize(&fixture(), &["202601".to_string()])
        .expect("object input");
    assert_eq!(events.len(), 1);
    assert_eq!(events[0].course_name, "HIST*1010");
}

#[test_log::test]
fn calendar_properties_hold() {
    let pipeline = pipeline();
    let events = pipeline.normalize(&fixture(), &[]).expect("object input");
    let text = pipeline.events_to_calendar_text(&events);
    let blocks = vevents(&text);
    assert_eq!(blocks.len(), events.len());

    let mut untils: HashMap<(String, String), NaiveDateTime> = HashMap::new();

    for (event, block) in events.iter().zip(&blocks) {
        let start = stamp(one(block, "DTSTART"));
        let end = stamp(one(block, "DTEND"));

        // Duration matches the raw clock times
        let raw_start = parse_time(&event.start_time).expect("start time");
        let raw_end = parse_time(&event.end_time).expect("end time");
        assert_eq!(end - start, raw_end - raw_start, "{}", event.summary());

        let Some((by_day, until)) = rrule_parts(block) else {
            assert!(tokenize(&event.days_of_week).is_empty());
            assert!(!block.contains_key("EXDATE"));
            continue;
        };

        // First occurrence falls on a meeting day
        assert!(by_day.contains(&code(start)), "{}", event.summary());
        assert!(until >= start);

        for exdate in block.get("EXDATE").into_iter().flatten() {
            let exdate = stamp(exdate);
            assert!(exdate >= start && exdate <= until, "{exdate} outside window");
            assert!(by_day.contains(&code(exdate)));
        }

        if !event.is_exam() {
            let key = (event.course_name.clone(), event.section_number.clone());
            let shared = *untils.entry(key).or_insert(until);
            assert_eq!(shared, until, "{}", event.summary());
        }
    }
}

#[test_log::test]
fn fixture_calendar_values() {
    let pipeline = pipeline();
    let text = pipeline
        .schedule_to_calendar_text(&fixture(), &[])
        .expect("object input");
    let blocks = vevents(&text);

    let lecture = &blocks[0];
    assert_eq!(one(lecture, "UID"), "00000000000000000000000000000001@schedule");
    assert_eq!(one(lecture, "DTSTAMP"), "20250820T120000Z");
    assert_eq!(one(lecture, "DTSTART"), "20250903T090000");
    assert_eq!(one(lecture, "DTEND"), "20250903T102000");
    assert_eq!(
        one(lecture, "RRULE"),
        "FREQ=WEEKLY;BYDAY=MO,WE;UNTIL=20251117T235959"
    );
    assert_eq!(lecture["EXDATE"], ["20251013T090000"]);
    assert_eq!(one(lecture, "LOCATION"), "Room 100");

    let lab = &blocks[1];
    assert_eq!(one(lab, "DTSTART"), "20250905T143000");
    assert_eq!(one(lab, "RRULE"), "FREQ=WEEKLY;BYDAY=FR;UNTIL=20251117T235959");
    assert!(!lab.contains_key("EXDATE"));

    let exam = &blocks[2];
    assert_eq!(one(exam, "DTSTART"), "20251210T083000");
    assert_eq!(one(exam, "DTEND"), "20251210T103000");
    assert!(!exam.contains_key("RRULE"));

    let cis = &blocks[3];
    assert_eq!(cis["EXDATE"], ["20251014T113000"]);
    assert_eq!(
        one(cis, "DESCRIPTION"),
        "Instructor(s): Alpha, A | Beta, B | Gamma, G\\nCredits: 0.50"
    );

    let seminar = &blocks[4];
    assert_eq!(one(seminar, "DTSTART"), "20260105T103000");
    assert_eq!(
        one(seminar, "RRULE"),
        "FREQ=WEEKLY;BYDAY=MO,WE,FR;UNTIL=20260319T235959"
    );
    assert_eq!(
        seminar["EXDATE"],
        ["20260216T103000", "20260218T103000", "20260220T103000"]
    );

    assert!(text.ends_with("END:VEVENT\nEND:VCALENDAR"));
    assert!(text.contains("END:VEVENT\n\nBEGIN:VEVENT"));
}

#[test_log::test]
fn single_course_scenario() {
    let raw = json!({
        "Terms": [{
            "Code": "202509",
            "PlannedCourses": [{
                "Section": {
                    "CourseName": "MATH101",
                    "Number": "001",
                    "MinimumCredits": 0.5,
                    "Faculty": ["Alpha, A", "Beta, B", "Gamma, G"],
                    "PlannedMeetings": [{
                        "InstructionalMethod": "LEC",
                        "StartTime": "9:00 AM",
                        "EndTime": "10:20 AM",
                        "StartDateString": "09/02/2025",
                        "EndDateString": "11/27/2025",
                        "DaysOfWeek": "MW",
                        "MeetingLocation": "Room 100"
                    }]
                }
            }]
        }]
    });

    let pipeline = SchedulePipeline::default();
    let events = pipeline.normalize(&raw, &[]).expect("object input");
    assert_eq!(events.len(), 1);
    assert_eq!(events[0].course_name, "MATH101");

    let text = pipeline
        .schedule_to_calendar_text(&raw, &[])
        .expect("object input");
    assert!(text.contains("BEGIN:VCALENDAR"));
    assert!(text.lines().any(|line| line == "SUMMARY:LEC MATH101*001"));
    assert!(text.contains("DESCRIPTION:Instructor(s): Alpha, A | Beta, B | Gamma, G"));
}

#[test_log::test]
fn event_lists_with_loose_types_still_export() {
    let events = adapt_events(&json!([
        {
            "CourseName": "CIS*1300",
            "SectionNumber": "0102",
            "Credits": "0.50",
            "InstructionalMethod": "LEC",
            "StartDate": "09/02/2025",
            "EndDate": "11/28/2025",
            "StartTime": "11:30 AM",
            "EndTime": "12:20 PM",
            "DaysOfWeek": "MWF"
        },
        {
            "CourseName": "MATH101",
            "SectionNumber": 1,
            "Credits": 0.5,
            "InstructionalMethod": "LEC",
            "StartDate": "09/02/2025",
            "EndDate": "11/27/2025",
            "StartTime": "9:00 AM",
            "EndTime": "10:20 AM",
            "DaysOfWeek": "TTh"
        },
        { "CourseName": "BROKEN", "DaysOfWeek": ["M"] }
    ]))
    .expect("array input");
    assert_eq!(events.len(), 2);

    let text = pipeline().events_to_calendar_text(&events);
    let blocks = vevents(&text);
    assert_eq!(blocks.len(), 2);
    assert!(one(&blocks[0], "DESCRIPTION").ends_with("Credits: 0.50"));
    assert_eq!(one(&blocks[1], "SUMMARY"), "LEC MATH101*1");
}

#[test_log::test]
fn section_starting_on_thanksgiving_keeps_first_meeting() {
    let events = vec![NormalizedEvent {
        course_name: "STAT*2040".into(),
        section_number: "01".into(),
        instructional_method: "LEC".into(),
        start_date: Some("10/13/2025".into()),
        end_date: Some("10/20/2025".into()),
        start_time: "9:00 AM".into(),
        end_time: "9:50 AM".into(),
        days_of_week: "M".into(),
        ..NormalizedEvent::default()
    }];
    let text = pipeline().events_to_calendar_text(&events);
    let blocks = vevents(&text);

    assert_eq!(one(&blocks[0], "DTSTART"), "20251013T090000");
    assert_eq!(one(&blocks[0], "RRULE"), "FREQ=WEEKLY;BYDAY=MO;UNTIL=20251013T090000");
    assert!(!blocks[0].contains_key("EXDATE"));
}

#[test]
fn reading_breaks_for_2025() {
    let breaks = BreakCalculator::new().reading_breaks(2025);
    let date = |s: &str| parse_date(s).expect("valid literal");

    // Tuesday after Thanksgiving (Oct 13, 2025)
    assert!(breaks[0].contains(date("10/14/2025")));
    // Friday of Family Day week (Feb 16, 2026)
    assert!(breaks[1].contains(date("02/20/2026")));
    assert_eq!(breaks[0].start, NaiveDate::from_ymd_opt(2025, 10, 11).expect("valid"));
    assert_eq!(breaks[1].start, NaiveDate::from_ymd_opt(2026, 2, 16).expect("valid"));
}

#[test_log::test]
fn events_without_dates_are_left_out() {
    let events = vec![
        NormalizedEvent {
            course_name: "NODATE".into(),
            section_number: "1".into(),
            start_time: "9:00 AM".into(),
            end_time: "10:00 AM".into(),
            days_of_week: "M".into(),
            ..NormalizedEvent::default()
        },
        NormalizedEvent {
            course_name: "TBA".into(),
            section_number: "1".into(),
            start_date: Some("09/08/2025".into()),
            end_date: Some("12/01/2025".into()),
            start_time: "TBA".into(),
            end_time: "TBA".into(),
            days_of_week: "M".into(),
            ..NormalizedEvent::default()
        },
    ];
    let text = pipeline().events_to_calendar_text(&events);
    assert!(vevents(&text).is_empty());
    assert!(text.ends_with("PRODID:-//Test//EN\nEND:VCALENDAR"));
}
