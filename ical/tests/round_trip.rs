// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Round-trip tests: parsing the serialized form of a calendar yields an
//! equal calendar.

use calends_ical::{
    Calendar, CalendarValue, ComponentKind, DateList, FoldingStyle, FormatOptions, LeafProperty,
    ParseMode, ParseOptions, Parser, RecurrenceRule,
};

fn round_trip(src: &str) -> Calendar {
    let (calendar, report) = Calendar::parse_str(src).unwrap();
    assert!(report.errors.is_empty(), "{:?}", report.errors);

    let serialized = calendar.serialize();
    assert!(serialized.split("\r\n").all(|l| l.len() <= 75));
    let (again, report) = Calendar::parse_str(&serialized).unwrap();
    assert!(report.errors.is_empty(), "{:?}", report.errors);
    assert_eq!(again, calendar);
    calendar
}

#[test]
fn round_trip_simple_calendar() {
    let calendar = round_trip(
        "\
BEGIN:VCALENDAR\r
VERSION:2.0\r
PRODID:-//Example Corp.//Cal Client 1.0//EN\r
BEGIN:VEVENT\r
UID:12345@example.com\r
DTSTAMP:20250110T120000Z\r
DTSTART:20250110T140000Z\r
DTEND:20250110T150000Z\r
SUMMARY:Test Event\r
END:VEVENT\r
END:VCALENDAR\r
",
    );
    assert_eq!(calendar.components.len(), 1);
}

#[test]
fn round_trip_todo_with_alarm() {
    let calendar = round_trip(
        "\
BEGIN:VCALENDAR\r
VERSION:2.0\r
PRODID:-//ABC Corporation//NONSGML My Product//EN\r
BEGIN:VTODO\r
DTSTAMP:19980130T134500Z\r
SEQUENCE:2\r
UID:uid4@example.com\r
ORGANIZER:mailto:unclesam@example.com\r
ATTENDEE;PARTSTAT=ACCEPTED:mailto:jqpublic@example.com\r
DUE:19980415T000000\r
STATUS:NEEDS-ACTION\r
SUMMARY:Submit Income Taxes\r
BEGIN:VALARM\r
ACTION:AUDIO\r
TRIGGER;VALUE=DATE-TIME:19980403T120000Z\r
ATTACH;FMTTYPE=audio/basic:http://example.com/pub/audio-files/ssbanner.aud\r
REPEAT:4\r
DURATION:PT1H\r
END:VALARM\r
END:VTODO\r
END:VCALENDAR\r
",
    );
    let todo = calendar.components_of(ComponentKind::Todo).next().unwrap();
    assert_eq!(todo.components.len(), 1);
}

#[test]
fn round_trip_long_and_escaped_text() {
    let calendar = round_trip(
        "\
BEGIN:VCALENDAR\r
VERSION:2.0\r
BEGIN:VJOURNAL\r
UID:19970901T130000Z-123405@example.com\r
DTSTAMP:19970901T130000Z\r
DTSTART;VALUE=DATE:19970317\r
SUMMARY:Staff meeting minutes\r
DESCRIPTION:1. Staff meeting: Participants include Joe\\, Lisa\\, and Bob. A\r
 urora project plans were reviewed. There is currently no budget reserves f\r
 or this project. Lisa will escalate to management. Next meeting on Tuesday\r
 .\\n2. Telephone Conference: ABC Corp. sales representative called to discu\r
 ss new printer. Promised to get us a demo by Friday.\\n3. Henry Miller (Hand\r
 sOn Consulting) to provide a proposal.\r
CATEGORIES:MEETING,MINUTES\r
END:VJOURNAL\r
END:VCALENDAR\r
",
    );
    let journal = calendar.components.first().unwrap();
    let description = journal.property("DESCRIPTION").unwrap().text();
    assert!(description.starts_with("1. Staff meeting: Participants include Joe, Lisa, and Bob."));
    assert_eq!(description.lines().count(), 3);
}

#[test]
fn round_trip_time_zones_and_recurrence() {
    let calendar = round_trip(
        "\
BEGIN:VCALENDAR\r
VERSION:2.0\r
PRODID:-//RDU Software//NONSGML HandCal//EN\r
BEGIN:VTIMEZONE\r
TZID:America/New_York\r
BEGIN:STANDARD\r
DTSTART:19981025T020000\r
TZOFFSETFROM:-0400\r
TZOFFSETTO:-0500\r
TZNAME:EST\r
END:STANDARD\r
BEGIN:DAYLIGHT\r
DTSTART:19990404T020000\r
TZOFFSETFROM:-0500\r
TZOFFSETTO:-0400\r
TZNAME:EDT\r
END:DAYLIGHT\r
END:VTIMEZONE\r
BEGIN:VEVENT\r
DTSTAMP:19980309T231000Z\r
UID:guid-1.example.com\r
ORGANIZER:mailto:mrbig@example.com\r
ATTENDEE;RSVP=TRUE;ROLE=REQ-PARTICIPANT;CUTYPE=GROUP:mailto:employee-A@example.com\r
DESCRIPTION:Project XYZ Review Meeting\r
CATEGORIES:MEETING\r
CLASS:PUBLIC\r
CREATED:19980309T130000Z\r
SUMMARY:XYZ Project Review\r
DTSTART;TZID=America/New_York:19980312T083000\r
DTEND;TZID=America/New_York:19980312T093000\r
RRULE:FREQ=WEEKLY;COUNT=4;BYDAY=TH\r
EXDATE;TZID=America/New_York:19980319T083000\r
LOCATION:1CP Conference Room 4350\r
END:VEVENT\r
BEGIN:X-ACME-NOTES\r
X-NOTE:kept verbatim\r
END:X-ACME-NOTES\r
END:VCALENDAR\r
",
    );
    assert_eq!(calendar.extensions.len(), 1);

    let tz = calendar.time_zone("America/New_York").unwrap();
    let event = calendar.components_of(ComponentKind::Event).next().unwrap();
    let occurrences: Vec<String> = event
        .expand(&tz, 10)
        .occurrences
        .iter()
        .map(ToString::to_string)
        .collect();
    assert_eq!(
        occurrences,
        ["19980312T083000", "19980326T083000", "19980402T083000"]
    );
}

#[test]
fn typed_values_serialize_with_their_parameters() {
    let start = CalendarValue::parse_with_tzid("20240310T090000", Some("Europe/Berlin")).unwrap();
    let line = start.to_content_line("DTSTART");
    assert_eq!(line.to_string(), "DTSTART;TZID=Europe/Berlin:20240310T090000");
    assert_eq!(CalendarValue::from_content_line(&line), Ok(start));

    let dates = DateList(vec![
        CalendarValue::parse("20240101").unwrap(),
        CalendarValue::parse("20240102").unwrap(),
    ]);
    let line = dates.to_content_line("EXDATE");
    assert_eq!(line.to_string(), "EXDATE;VALUE=DATE:20240101,20240102");
    assert_eq!(DateList::from_content_line(&line), Ok(dates));

    let rule: RecurrenceRule = "FREQ=MONTHLY;BYDAY=-1FR;COUNT=3".parse().unwrap();
    let line = rule.to_content_line("RRULE");
    assert_eq!(RecurrenceRule::from_content_line(&line), Ok(rule));
}

#[test]
fn tab_folding_reparses_equal() {
    let src = format!(
        "BEGIN:VCALENDAR\r\nVERSION:2.0\r\nX-LONG:{}\r\nEND:VCALENDAR\r\n",
        "x".repeat(300)
    );
    let (calendar, _) = Calendar::parse_str(&src).unwrap();
    let options = FormatOptions::default().folding_style(FoldingStyle::Tab);
    let folded = options.write_to_string(&calendar).unwrap();
    assert!(folded.contains("\r\n\t"));

    let parser = Parser::new(ParseOptions::default().mode(ParseMode::Strict));
    let (again, report) = Calendar::from_reader(folded.as_bytes(), &parser).unwrap();
    assert!(report.errors.is_empty());
    assert_eq!(again, calendar);
}
