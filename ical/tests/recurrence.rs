// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Recurrence expansion against the examples of RFC 5545 Section 3.8.5.3.
//!
//! The RFC examples use America/New_York; here the anchors are floating
//! and expanded in UTC, which leaves every wall-clock result unchanged.

use calends_ical::{CalendarValue, FixedOffset, OccurrenceSet, RecurrenceRule};

fn expand(dtstart: &str, rule: &str, max: usize) -> Vec<String> {
    let anchor = CalendarValue::parse(dtstart).unwrap();
    let rule: RecurrenceRule = rule.parse().unwrap();
    rule.recurrences(&anchor, &FixedOffset::UTC)
        .take(max)
        .map(|v| v.to_string())
        .collect()
}

fn at_nine(dates: &[&str]) -> Vec<String> {
    dates.iter().map(|d| format!("{d}T090000")).collect()
}

#[test]
fn daily_for_ten_occurrences() {
    let got = expand("19970902T090000", "FREQ=DAILY;COUNT=10", 100);
    assert_eq!(
        got,
        at_nine(&[
            "19970902", "19970903", "19970904", "19970905", "19970906", "19970907", "19970908",
            "19970909", "19970910", "19970911",
        ])
    );
}

#[test]
fn daily_until_december() {
    let got = expand("19970902T090000", "FREQ=DAILY;UNTIL=19971224T000000Z", 1000);
    assert_eq!(got.len(), 113);
    assert_eq!(got.first().map(String::as_str), Some("19970902T090000"));
    assert_eq!(got.last().map(String::as_str), Some("19971223T090000"));
}

#[test]
fn daily_until_counts_the_anchor() {
    let got = expand("20070501T090000", "FREQ=DAILY;UNTIL=20070506T000000Z", 100);
    assert_eq!(
        got,
        at_nine(&["20070501", "20070502", "20070503", "20070504", "20070505"])
    );
}

#[test]
fn every_other_day_forever() {
    let got = expand("19970902T090000", "FREQ=DAILY;INTERVAL=2", 5);
    assert_eq!(
        got,
        at_nine(&["19970902", "19970904", "19970906", "19970908", "19970910"])
    );
}

#[test]
fn every_ten_days_five_occurrences() {
    let got = expand("19970902T090000", "FREQ=DAILY;INTERVAL=10;COUNT=5", 100);
    assert_eq!(
        got,
        at_nine(&["19970902", "19970912", "19970922", "19971002", "19971012"])
    );
}

#[test]
fn weekly_for_ten_occurrences() {
    let got = expand("19970902T090000", "FREQ=WEEKLY;COUNT=10", 100);
    assert_eq!(got.len(), 10);
    assert_eq!(got.last().map(String::as_str), Some("19971104T090000"));
}

#[test]
fn weekly_on_tuesday_and_thursday() {
    let got = expand("19970902T090000", "FREQ=WEEKLY;COUNT=10;WKST=SU;BYDAY=TU,TH", 100);
    assert_eq!(
        got,
        at_nine(&[
            "19970902", "19970904", "19970909", "19970911", "19970916", "19970918", "19970923",
            "19970925", "19970930", "19971002",
        ])
    );
}

#[test]
fn every_other_week_on_tuesday_and_thursday() {
    let got = expand(
        "19970902T090000",
        "FREQ=WEEKLY;INTERVAL=2;COUNT=8;WKST=SU;BYDAY=TU,TH",
        100,
    );
    assert_eq!(
        got,
        at_nine(&[
            "19970902", "19970904", "19970916", "19970918", "19970930", "19971002", "19971014",
            "19971016",
        ])
    );
}

#[test]
fn week_start_changes_the_result() {
    let monday = expand(
        "19970805T090000",
        "FREQ=WEEKLY;INTERVAL=2;COUNT=4;BYDAY=TU,SU;WKST=MO",
        100,
    );
    assert_eq!(
        monday,
        at_nine(&["19970805", "19970810", "19970819", "19970824"])
    );

    let sunday = expand(
        "19970805T090000",
        "FREQ=WEEKLY;INTERVAL=2;COUNT=4;BYDAY=TU,SU;WKST=SU",
        100,
    );
    assert_eq!(
        sunday,
        at_nine(&["19970805", "19970817", "19970819", "19970831"])
    );
}

#[test]
fn monthly_on_first_friday() {
    let got = expand("19970905T090000", "FREQ=MONTHLY;COUNT=10;BYDAY=1FR", 100);
    assert_eq!(
        got,
        at_nine(&[
            "19970905", "19971003", "19971107", "19971205", "19980102", "19980206", "19980306",
            "19980403", "19980501", "19980605",
        ])
    );
}

#[test]
fn monthly_on_second_to_last_monday() {
    let got = expand("19970922T090000", "FREQ=MONTHLY;COUNT=6;BYDAY=-2MO", 100);
    assert_eq!(
        got,
        at_nine(&[
            "19970922", "19971020", "19971117", "19971222", "19980119", "19980216",
        ])
    );
}

#[test]
fn monthly_on_third_to_last_day() {
    let got = expand("19970928T090000", "FREQ=MONTHLY;BYMONTHDAY=-3", 6);
    assert_eq!(
        got,
        at_nine(&[
            "19970928", "19971029", "19971128", "19971229", "19980129", "19980226",
        ])
    );
}

#[test]
fn monthly_on_second_and_fifteenth() {
    let got = expand("19970902T090000", "FREQ=MONTHLY;COUNT=10;BYMONTHDAY=2,15", 100);
    assert_eq!(
        got,
        at_nine(&[
            "19970902", "19970915", "19971002", "19971015", "19971102", "19971115", "19971202",
            "19971215", "19980102", "19980115",
        ])
    );
}

#[test]
fn monthly_skips_invalid_dates() {
    let got = expand("20070115T090000", "FREQ=MONTHLY;BYMONTHDAY=15,30;COUNT=5", 100);
    assert_eq!(
        got,
        at_nine(&["20070115", "20070130", "20070215", "20070315", "20070330"])
    );
}

#[test]
fn yearly_in_june_and_july() {
    let got = expand("19970610T090000", "FREQ=YEARLY;COUNT=10;BYMONTH=6,7", 100);
    assert_eq!(
        got,
        at_nine(&[
            "19970610", "19970710", "19980610", "19980710", "19990610", "19990710", "20000610",
            "20000710", "20010610", "20010710",
        ])
    );
}

#[test]
fn every_other_year_in_first_quarter() {
    let got = expand(
        "19970310T090000",
        "FREQ=YEARLY;INTERVAL=2;COUNT=10;BYMONTH=1,2,3",
        100,
    );
    assert_eq!(
        got,
        at_nine(&[
            "19970310", "19990110", "19990210", "19990310", "20010110", "20010210", "20010310",
            "20030110", "20030210", "20030310",
        ])
    );
}

#[test]
fn every_third_year_on_days_of_year() {
    let got = expand(
        "19970101T090000",
        "FREQ=YEARLY;INTERVAL=3;COUNT=10;BYYEARDAY=1,100,200",
        100,
    );
    assert_eq!(
        got,
        at_nine(&[
            "19970101", "19970410", "19970719", "20000101", "20000409", "20000718", "20030101",
            "20030410", "20030719", "20060101",
        ])
    );
}

#[test]
fn yearly_on_twentieth_monday() {
    let got = expand("19970519T090000", "FREQ=YEARLY;BYDAY=20MO", 3);
    assert_eq!(got, at_nine(&["19970519", "19980518", "19990517"]));
}

#[test]
fn yearly_on_monday_of_week_twenty() {
    let got = expand("19970512T090000", "FREQ=YEARLY;BYWEEKNO=20;BYDAY=MO", 3);
    assert_eq!(got, at_nine(&["19970512", "19980511", "19990517"]));
}

#[test]
fn every_thursday_in_march() {
    let got = expand("19970313T090000", "FREQ=YEARLY;BYMONTH=3;BYDAY=TH", 11);
    assert_eq!(
        got,
        at_nine(&[
            "19970313", "19970320", "19970327", "19980305", "19980312", "19980319", "19980326",
            "19990304", "19990311", "19990318", "19990325",
        ])
    );
}

#[test]
fn first_saturday_after_first_sunday() {
    let got = expand(
        "19970913T090000",
        "FREQ=MONTHLY;BYDAY=SA;BYMONTHDAY=7,8,9,10,11,12,13",
        6,
    );
    assert_eq!(
        got,
        at_nine(&[
            "19970913", "19971011", "19971108", "19971213", "19980110", "19980207",
        ])
    );
}

#[test]
fn presidential_election_day() {
    let got = expand(
        "19961105T090000",
        "FREQ=YEARLY;INTERVAL=4;BYMONTH=11;BYDAY=TU;BYMONTHDAY=2,3,4,5,6,7,8",
        3,
    );
    assert_eq!(got, at_nine(&["19961105", "20001107", "20041102"]));
}

#[test]
fn third_weekday_instance_by_set_position() {
    let got = expand(
        "19970904T090000",
        "FREQ=MONTHLY;COUNT=3;BYDAY=TU,WE,TH;BYSETPOS=3",
        100,
    );
    assert_eq!(got, at_nine(&["19970904", "19971007", "19971106"]));
}

#[test]
fn second_to_last_weekday_of_month() {
    let got = expand(
        "19970929T090000",
        "FREQ=MONTHLY;BYDAY=MO,TU,WE,TH,FR;BYSETPOS=-2",
        7,
    );
    assert_eq!(
        got,
        at_nine(&[
            "19970929", "19971030", "19971127", "19971230", "19980129", "19980226", "19980330",
        ])
    );
}

#[test]
fn every_three_hours_during_the_day() {
    let got = expand(
        "19970902T090000",
        "FREQ=HOURLY;INTERVAL=3;UNTIL=19970902T170000Z",
        100,
    );
    assert_eq!(
        got,
        ["19970902T090000", "19970902T120000", "19970902T150000"]
    );
}

#[test]
fn every_fifteen_minutes_six_times() {
    let got = expand("19970902T090000", "FREQ=MINUTELY;INTERVAL=15;COUNT=6", 100);
    assert_eq!(
        got,
        [
            "19970902T090000",
            "19970902T091500",
            "19970902T093000",
            "19970902T094500",
            "19970902T100000",
            "19970902T101500",
        ]
    );
}

#[test]
fn friday_the_thirteenth_without_the_anchor() {
    let anchor = CalendarValue::parse("19970902T090000").unwrap();
    let rule: RecurrenceRule = "FREQ=MONTHLY;BYDAY=FR;BYMONTHDAY=13".parse().unwrap();
    let got: Vec<String> = OccurrenceSet::new(anchor.clone(), &FixedOffset::UTC)
        .rrule(rule)
        .exdates([anchor])
        .take(5)
        .map(|v| v.to_string())
        .collect();
    assert_eq!(
        got,
        at_nine(&["19980213", "19980313", "19981113", "19990813", "20001013"])
    );
}

#[test]
fn rdates_merge_in_order_after_the_anchor() {
    let anchor = CalendarValue::parse("19970902T090000").unwrap();
    let rule: RecurrenceRule = "FREQ=DAILY;COUNT=3".parse().unwrap();
    let rdates = ["19970910T090000", "19970903T090000", "19970901T090000"]
        .map(|s| CalendarValue::parse(s).unwrap());
    let got: Vec<String> = OccurrenceSet::new(anchor, &FixedOffset::UTC)
        .rrule(rule)
        .rdates(rdates)
        .map(|v| v.to_string())
        .collect();
    assert_eq!(
        got,
        at_nine(&["19970902", "19970903", "19970904", "19970910"])
    );
}

#[test]
fn date_only_anchor_yields_dates() {
    let got = expand("19970101", "FREQ=YEARLY;COUNT=3", 100);
    assert_eq!(got, ["19970101", "19980101", "19990101"]);
}

#[test]
fn impossible_rule_terminates() {
    let anchor = CalendarValue::parse("20000101T000000").unwrap();
    let rule: RecurrenceRule = "FREQ=YEARLY;BYMONTH=2;BYMONTHDAY=30".parse().unwrap();
    let mut iter = rule
        .recurrences(&anchor, &FixedOffset::UTC)
        .with_iteration_limit(100);
    assert_eq!(iter.next().map(|v| v.to_string()).as_deref(), Some("20000101T000000"));
    assert_eq!(iter.next(), None);
    assert!(iter.limit_exceeded());
}
