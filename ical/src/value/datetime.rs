// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! DATE and DATE-TIME values (RFC 5545 Sections 3.3.4, 3.3.5 and 3.3.12)
//! together with proleptic-Gregorian calendar arithmetic.

use std::fmt::{self, Display};

use chumsky::prelude::*;

use crate::value::ValueError;

/// Smallest representable year.
pub const MIN_YEAR: i16 = 0;

/// Largest representable year.
pub const MAX_YEAR: i16 = 9999;

const SECONDS_PER_DAY: i64 = 86_400;

/// Returns `true` if `year` is a leap year in the proleptic Gregorian calendar.
#[must_use]
pub const fn is_leap_year(year: i16) -> bool {
    year % 4 == 0 && (year % 100 != 0 || year % 400 == 0)
}

/// Number of days in the given month, 0 for an invalid month.
#[must_use]
pub const fn days_in_month(year: i16, month: i8) -> i8 {
    match month {
        1 | 3 | 5 | 7 | 8 | 10 | 12 => 31,
        4 | 6 | 9 | 11 => 30,
        2 if is_leap_year(year) => 29,
        2 => 28,
        _ => 0,
    }
}

/// Number of days in the given year.
#[must_use]
pub const fn days_in_year(year: i16) -> i16 {
    if is_leap_year(year) { 366 } else { 365 }
}

/// Days since 1970-01-01 for any proleptic-Gregorian date, without validation.
///
/// Algorithm from Howard Hinnant, "chrono-Compatible Low-Level Date Algorithms".
const fn days_from_civil(year: i64, month: i64, day: i64) -> i64 {
    let y = if month <= 2 { year - 1 } else { year };
    let era = y.div_euclid(400);
    let yoe = y - era * 400;
    let mp = (month + 9) % 12;
    let doy = (153 * mp + 2) / 5 + day - 1;
    let doe = yoe * 365 + yoe / 4 - yoe / 100 + doy;
    era * 146_097 + doe - 719_468
}

/// Inverse of [`days_from_civil`].
const fn civil_from_days(days: i64) -> (i64, i64, i64) {
    let z = days + 719_468;
    let era = z.div_euclid(146_097);
    let doe = z - era * 146_097;
    let yoe = (doe - doe / 1460 + doe / 36_524 - doe / 146_096) / 365;
    let doy = doe - (365 * yoe + yoe / 4 - yoe / 100);
    let mp = (5 * doy + 2) / 153;
    let day = doy - (153 * mp + 2) / 5 + 1;
    let month = if mp < 10 { mp + 3 } else { mp - 9 };
    let year = yoe + era * 400 + if month <= 2 { 1 } else { 0 };
    (year, month, day)
}

/// Day of the week.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    strum::EnumString,
    strum::Display,
    strum::IntoStaticStr,
)]
#[strum(ascii_case_insensitive)]
#[expect(missing_docs)]
pub enum Weekday {
    #[strum(to_string = "MO")]
    Monday,
    #[strum(to_string = "TU")]
    Tuesday,
    #[strum(to_string = "WE")]
    Wednesday,
    #[strum(to_string = "TH")]
    Thursday,
    #[strum(to_string = "FR")]
    Friday,
    #[strum(to_string = "SA")]
    Saturday,
    #[strum(to_string = "SU")]
    Sunday,
}

impl Weekday {
    /// Zero-based index counted from Monday.
    #[must_use]
    pub const fn index(self) -> i64 {
        match self {
            Self::Monday => 0,
            Self::Tuesday => 1,
            Self::Wednesday => 2,
            Self::Thursday => 3,
            Self::Friday => 4,
            Self::Saturday => 5,
            Self::Sunday => 6,
        }
    }

    /// Weekday for an index counted from Monday, wrapping modulo 7.
    #[must_use]
    pub const fn from_index(index: i64) -> Self {
        match index.rem_euclid(7) {
            0 => Self::Monday,
            1 => Self::Tuesday,
            2 => Self::Wednesday,
            3 => Self::Thursday,
            4 => Self::Friday,
            5 => Self::Saturday,
            _ => Self::Sunday,
        }
    }

    /// Days from `start` forward to `self`, in `0..7`.
    #[must_use]
    pub const fn days_since(self, start: Self) -> i64 {
        (self.index() - start.index()).rem_euclid(7)
    }
}

/// A calendar date, valid by construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Date {
    year: i16,
    month: i8,
    day: i8,
}

impl Date {
    /// Create a date, validating every field.
    ///
    /// # Errors
    ///
    /// Returns [`ValueError::OutOfRange`] for a year outside `0..=9999`, a
    /// month outside `1..=12` or a day that does not exist in that month.
    pub fn new(year: i16, month: i8, day: i8) -> Result<Self, ValueError> {
        if !(MIN_YEAR..=MAX_YEAR).contains(&year) {
            return Err(ValueError::out_of_range("year", year));
        }
        if !(1..=12).contains(&month) {
            return Err(ValueError::out_of_range("month", month));
        }
        if day < 1 || day > days_in_month(year, month) {
            return Err(ValueError::out_of_range("day", day));
        }
        Ok(Self { year, month, day })
    }

    fn from_wide(year: i64, month: i64, day: i64) -> Result<Self, ValueError> {
        let year = i16::try_from(year).map_err(|_| ValueError::out_of_range("year", year))?;
        let month = i8::try_from(month).map_err(|_| ValueError::out_of_range("month", month))?;
        let day = i8::try_from(day).map_err(|_| ValueError::out_of_range("day", day))?;
        Self::new(year, month, day)
    }

    /// Year component.
    #[must_use]
    pub const fn year(self) -> i16 {
        self.year
    }

    /// Month component, 1-12.
    #[must_use]
    pub const fn month(self) -> i8 {
        self.month
    }

    /// Day component, 1-31.
    #[must_use]
    pub const fn day(self) -> i8 {
        self.day
    }

    /// Days since 1970-01-01.
    #[must_use]
    pub const fn days_since_epoch(self) -> i64 {
        days_from_civil(self.year as i64, self.month as i64, self.day as i64)
    }

    /// Date for a day count since 1970-01-01, `None` outside years 0-9999.
    #[must_use]
    pub fn from_days_since_epoch(days: i64) -> Option<Self> {
        let (year, month, day) = civil_from_days(days);
        Self::from_wide(year, month, day).ok()
    }

    /// Day of the week.
    #[must_use]
    pub const fn weekday(self) -> Weekday {
        // 1970-01-01 was a Thursday
        Weekday::from_index(self.days_since_epoch() + 3)
    }

    /// Day of the year, 1-366.
    #[must_use]
    pub const fn day_of_year(self) -> i16 {
        let first = days_from_civil(self.year as i64, 1, 1);
        (self.days_since_epoch() - first + 1) as i16
    }

    /// Add (or subtract) days.
    #[must_use]
    pub fn checked_add_days(self, days: i64) -> Option<Self> {
        Self::from_days_since_epoch(self.days_since_epoch().checked_add(days)?)
    }

    /// Add (or subtract) months keeping the day, `None` when that day does
    /// not exist in the target month.
    #[must_use]
    pub fn checked_add_months(self, months: i64) -> Option<Self> {
        let total = i64::from(self.year) * 12 + i64::from(self.month) - 1 + months;
        Self::from_wide(total.div_euclid(12), total.rem_euclid(12) + 1, i64::from(self.day)).ok()
    }

    /// First day of the week containing this date.
    #[must_use]
    pub fn start_of_week(self, week_start: Weekday) -> Option<Self> {
        self.checked_add_days(-self.weekday().days_since(week_start))
    }

    /// Week number within this date's own year.
    ///
    /// Week 1 is the week (beginning on `week_start`) that contains
    /// 4 January, i.e. the first week with at least four days in the year.
    /// For a Monday week start this is the week containing the first
    /// Thursday. Dates before week 1 are in week 0.
    #[must_use]
    pub fn week_of_year(self, week_start: Weekday) -> i8 {
        let start = week_one_start(i64::from(self.year), week_start);
        let days = self.days_since_epoch();
        if days < start {
            0
        } else {
            i8::try_from((days - start) / 7 + 1).unwrap_or(i8::MAX)
        }
    }

    /// Week-numbering year and week, with boundary dates assigned to the
    /// adjacent year where their week belongs.
    #[must_use]
    pub fn week_date(self, week_start: Weekday) -> (i32, i8) {
        let days = self.days_since_epoch();
        let year = i64::from(self.year);
        let owner = [year + 1, year, year - 1]
            .into_iter()
            .find(|y| days >= week_one_start(*y, week_start))
            .unwrap_or(year - 1);
        let week = (days - week_one_start(owner, week_start)) / 7 + 1;
        (
            i32::try_from(owner).unwrap_or(i32::MAX),
            i8::try_from(week).unwrap_or(i8::MAX),
        )
    }

    /// ISO 8601 week date (Monday week start).
    #[must_use]
    pub fn iso_week(self) -> (i32, i8) {
        self.week_date(Weekday::Monday)
    }
}

/// Day count of the first day of week 1 of `year`.
fn week_one_start(year: i64, week_start: Weekday) -> i64 {
    let jan4 = days_from_civil(year, 1, 4);
    jan4 - Weekday::from_index(jan4 + 3).days_since(week_start)
}

/// Number of numbered weeks in a week-numbering year, 52 or 53.
#[must_use]
pub fn weeks_in_year(year: i32, week_start: Weekday) -> i8 {
    let year = i64::from(year);
    let weeks = (week_one_start(year + 1, week_start) - week_one_start(year, week_start)) / 7;
    i8::try_from(weeks).unwrap_or(52)
}

impl Display for Date {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}{:02}{:02}", self.year, self.month, self.day)
    }
}

/// A wall-clock time of day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Time {
    hour: i8,
    minute: i8,
    second: i8,
}

impl Time {
    /// 00:00:00
    pub const MIDNIGHT: Self = Self {
        hour: 0,
        minute: 0,
        second: 0,
    };

    /// Create a time, validating every field.
    ///
    /// # Errors
    ///
    /// Returns [`ValueError::OutOfRange`] for an hour outside `0..=23` or a
    /// minute or second outside `0..=59`.
    pub fn new(hour: i8, minute: i8, second: i8) -> Result<Self, ValueError> {
        if !(0..=23).contains(&hour) {
            return Err(ValueError::out_of_range("hour", hour));
        }
        if !(0..=59).contains(&minute) {
            return Err(ValueError::out_of_range("minute", minute));
        }
        if !(0..=59).contains(&second) {
            return Err(ValueError::out_of_range("second", second));
        }
        Ok(Self {
            hour,
            minute,
            second,
        })
    }

    /// Hour component, 0-23.
    #[must_use]
    pub const fn hour(self) -> i8 {
        self.hour
    }

    /// Minute component, 0-59.
    #[must_use]
    pub const fn minute(self) -> i8 {
        self.minute
    }

    /// Second component, 0-59.
    #[must_use]
    pub const fn second(self) -> i8 {
        self.second
    }

    /// Seconds since midnight.
    #[must_use]
    pub const fn seconds_since_midnight(self) -> i64 {
        self.hour as i64 * 3600 + self.minute as i64 * 60 + self.second as i64
    }

    fn from_seconds_since_midnight(seconds: i64) -> Self {
        let seconds = seconds.rem_euclid(SECONDS_PER_DAY);
        Self {
            hour: i8::try_from(seconds / 3600).unwrap_or(0),
            minute: i8::try_from(seconds % 3600 / 60).unwrap_or(0),
            second: i8::try_from(seconds % 60).unwrap_or(0),
        }
    }
}

impl Display for Time {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}{:02}{:02}", self.hour, self.minute, self.second)
    }
}

/// A wall-clock date and time without zone information.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct DateTime {
    /// Date component
    pub date: Date,
    /// Time component
    pub time: Time,
}

impl DateTime {
    /// Combine a date and a time.
    #[must_use]
    pub const fn new(date: Date, time: Time) -> Self {
        Self { date, time }
    }

    /// Seconds since 1970-01-01T00:00:00.
    #[must_use]
    pub const fn seconds_since_epoch(self) -> i64 {
        self.date.days_since_epoch() * SECONDS_PER_DAY + self.time.seconds_since_midnight()
    }

    /// Date-time for a second count since the epoch, `None` outside years 0-9999.
    #[must_use]
    pub fn from_seconds_since_epoch(seconds: i64) -> Option<Self> {
        let date = Date::from_days_since_epoch(seconds.div_euclid(SECONDS_PER_DAY))?;
        Some(Self {
            date,
            time: Time::from_seconds_since_midnight(seconds),
        })
    }

    /// Add (or subtract) seconds.
    #[must_use]
    pub fn checked_add_seconds(self, seconds: i64) -> Option<Self> {
        Self::from_seconds_since_epoch(self.seconds_since_epoch().checked_add(seconds)?)
    }
}

impl Display for DateTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}T{}", self.date, self.time)
    }
}

/// How a value relates to UTC.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub enum Zone {
    /// No zone: the same wall-clock time everywhere
    #[default]
    Floating,
    /// Suffixed with `Z`
    Utc,
    /// Local time in the named zone, from a `TZID` parameter
    Tzid(String),
}

/// Whether a value carries a time of day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Precision {
    /// `VALUE=DATE`
    Date,
    /// `VALUE=DATE-TIME`
    DateTime,
}

/// A validated DATE or DATE-TIME value with its zone qualifier.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CalendarValue {
    date: Date,
    time: Option<Time>,
    zone: Zone,
}

impl CalendarValue {
    /// A floating date-only value.
    #[must_use]
    pub const fn from_date(date: Date) -> Self {
        Self {
            date,
            time: None,
            zone: Zone::Floating,
        }
    }

    /// A date-time value in the given zone.
    #[must_use]
    pub const fn from_date_time(date_time: DateTime, zone: Zone) -> Self {
        Self {
            date: date_time.date,
            time: Some(date_time.time),
            zone,
        }
    }

    /// Parse `YYYYMMDD` or `YYYYMMDD"T"HHMMSS[Z]`.
    ///
    /// # Errors
    ///
    /// Returns a [`ValueError`] when the text is malformed or any field is
    /// out of range.
    pub fn parse(text: &str) -> Result<Self, ValueError> {
        Self::parse_with_tzid(text, None)
    }

    /// Parse a value that may carry a `TZID` parameter.
    ///
    /// A trailing `Z` wins over the parameter.
    ///
    /// # Errors
    ///
    /// Returns a [`ValueError`] when the text is malformed or any field is
    /// out of range.
    pub fn parse_with_tzid(text: &str, tzid: Option<&str>) -> Result<Self, ValueError> {
        let (date, time) = calendar_value()
            .parse(text)
            .into_result()
            .map_err(|errs| ValueError::invalid("DATE-TIME", text, &errs))?;

        let (time, utc) = time.map_or((None, false), |(time, utc)| (Some(time), utc));
        let zone = match tzid {
            _ if utc => Zone::Utc,
            Some(tzid) => Zone::Tzid(tzid.to_owned()),
            None => Zone::Floating,
        };
        Ok(Self { date, time, zone })
    }

    /// Date component.
    #[must_use]
    pub const fn date(&self) -> Date {
        self.date
    }

    /// Time component, `None` for date-only values.
    #[must_use]
    pub const fn time(&self) -> Option<Time> {
        self.time
    }

    /// Zone qualifier.
    #[must_use]
    pub const fn zone(&self) -> &Zone {
        &self.zone
    }

    /// Whether the value carries a time of day.
    #[must_use]
    pub const fn precision(&self) -> Precision {
        match self.time {
            Some(_) => Precision::DateTime,
            None => Precision::Date,
        }
    }

    /// Returns `true` for `Z`-suffixed values.
    #[must_use]
    pub fn is_utc(&self) -> bool {
        self.zone == Zone::Utc
    }

    /// Wall-clock date-time, midnight for date-only values.
    #[must_use]
    pub fn local(&self) -> DateTime {
        DateTime::new(self.date, self.time.unwrap_or(Time::MIDNIGHT))
    }

    /// A value at another wall-clock time with the same precision and zone.
    #[must_use]
    pub fn with_local(&self, date_time: DateTime) -> Self {
        Self {
            date: date_time.date,
            time: self.time.map(|_| date_time.time),
            zone: self.zone.clone(),
        }
    }

    /// Replace the zone qualifier.
    #[must_use]
    pub fn with_zone(mut self, zone: Zone) -> Self {
        self.zone = zone;
        self
    }

    /// Exact-instant comparison: dates must match, times only when both
    /// sides carry one.
    #[must_use]
    pub fn coincides_with(&self, other: &Self) -> bool {
        self.date == other.date
            && match (self.time, other.time) {
                (Some(a), Some(b)) => a == b,
                _ => true,
            }
    }
}

impl From<Date> for CalendarValue {
    fn from(date: Date) -> Self {
        Self::from_date(date)
    }
}

/// Writes the value text; a `TZID` travels as a parameter.
impl Display for CalendarValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.date)?;
        if let Some(time) = self.time {
            write!(f, "T{time}")?;
            if self.zone == Zone::Utc {
                f.write_str("Z")?;
            }
        }
        Ok(())
    }
}

type Extra<'src> = extra::Err<Rich<'src, char>>;

fn digits<'src>(count: usize) -> impl Parser<'src, &'src str, i64, Extra<'src>> + Clone {
    any()
        .filter(char::is_ascii_digit)
        .repeated()
        .exactly(count)
        .to_slice()
        .map(|s: &str| {
            s.bytes()
                .fold(0, |acc, b| acc * 10 + i64::from(b - b'0'))
        })
}

/// Format Definition:  This value type is defined by the following notation:
///
/// ```txt
/// date-value         = date-fullyear date-month date-mday
/// date-fullyear      = 4DIGIT
/// date-month         = 2DIGIT        ;01-12
/// date-mday          = 2DIGIT        ;01-28, 01-29, 01-30, 01-31
///                                    ;based on month/year
/// ```
pub(crate) fn date<'src>() -> impl Parser<'src, &'src str, Date, Extra<'src>> + Clone {
    digits(4)
        .then(digits(2))
        .then(digits(2))
        .try_map(|((year, month), day), span| {
            Date::from_wide(year, month, day).map_err(|err| Rich::custom(span, err))
        })
}

/// Format Definition:  This value type is defined by the following notation:
///
/// ```txt
/// time-hour    = 2DIGIT        ;00-23
/// time-minute  = 2DIGIT        ;00-59
/// time-second  = 2DIGIT        ;00-59
/// ```
pub(crate) fn time<'src>() -> impl Parser<'src, &'src str, Time, Extra<'src>> + Clone {
    digits(2)
        .then(digits(2))
        .then(digits(2))
        .try_map(|((hour, minute), second), span| {
            // two digits always fit
            let narrow = |v: i64| i8::try_from(v).unwrap_or(i8::MAX);
            Time::new(narrow(hour), narrow(minute), narrow(second))
                .map_err(|err| Rich::custom(span, err))
        })
}

/// `date [ "T" time [ "Z" ] ]`
fn calendar_value<'src>()
-> impl Parser<'src, &'src str, (Date, Option<(Time, bool)>), Extra<'src>> {
    let utc = just('Z').or_not().map(|z| z.is_some());
    date()
        .then(just('T').ignore_then(time()).then(utc).or_not())
        .then_ignore(end())
}

#[cfg(feature = "jiff")]
impl From<Date> for jiff::civil::Date {
    fn from(value: Date) -> Self {
        jiff::civil::date(value.year, value.month, value.day)
    }
}

#[cfg(feature = "jiff")]
impl From<DateTime> for jiff::civil::DateTime {
    fn from(value: DateTime) -> Self {
        jiff::civil::datetime(
            value.date.year,
            value.date.month,
            value.date.day,
            value.time.hour,
            value.time.minute,
            value.time.second,
            0,
        )
    }
}

#[cfg(feature = "jiff")]
impl TryFrom<jiff::civil::Date> for Date {
    type Error = ValueError;

    fn try_from(value: jiff::civil::Date) -> Result<Self, Self::Error> {
        Self::new(value.year(), value.month(), value.day())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i16, m: i8, d: i8) -> Date {
        Date::new(y, m, d).unwrap()
    }

    #[test]
    fn applies_leap_year_rule() {
        assert!(is_leap_year(2000));
        assert!(is_leap_year(2024));
        assert!(!is_leap_year(1900));
        assert!(!is_leap_year(2001));
        assert!(Date::new(2000, 2, 29).is_ok());
        assert_eq!(
            Date::new(2001, 2, 29),
            Err(ValueError::OutOfRange {
                field: "day",
                value: 29
            })
        );
    }

    #[test]
    fn rejects_out_of_range_fields() {
        assert!(Date::new(2025, 13, 1).is_err());
        assert!(Date::new(2025, 0, 1).is_err());
        assert!(Date::new(2025, 4, 31).is_err());
        assert!(Time::new(24, 0, 0).is_err());
        assert!(Time::new(0, 60, 0).is_err());
        assert!(Time::new(0, 0, 60).is_err());
    }

    #[test]
    fn day_count_round_trips() {
        assert_eq!(date(1970, 1, 1).days_since_epoch(), 0);
        assert_eq!(date(2000, 3, 1).days_since_epoch(), 11_017);
        assert_eq!(date(1969, 12, 31).days_since_epoch(), -1);
        for days in [-719_528, -1, 0, 59, 11_016, 2_932_896] {
            let d = Date::from_days_since_epoch(days).unwrap();
            assert_eq!(d.days_since_epoch(), days);
        }
        assert_eq!(Date::from_days_since_epoch(-719_529), None);
        assert_eq!(Date::from_days_since_epoch(2_932_897), None);
    }

    #[test]
    fn computes_weekday_and_day_of_year() {
        assert_eq!(date(1997, 9, 2).weekday(), Weekday::Tuesday);
        assert_eq!(date(2000, 1, 1).weekday(), Weekday::Saturday);
        assert_eq!(date(1700, 1, 1).weekday(), Weekday::Friday);
        assert_eq!(date(2000, 12, 31).day_of_year(), 366);
        assert_eq!(date(2001, 3, 1).day_of_year(), 60);
    }

    #[test]
    fn adds_days_and_months() {
        assert_eq!(date(1999, 12, 31).checked_add_days(1), Some(date(2000, 1, 1)));
        assert_eq!(date(2000, 3, 1).checked_add_days(-1), Some(date(2000, 2, 29)));
        assert_eq!(date(2025, 1, 31).checked_add_months(1), None);
        assert_eq!(date(2025, 1, 31).checked_add_months(2), Some(date(2025, 3, 31)));
        assert_eq!(date(2025, 1, 15).checked_add_months(-13), Some(date(2023, 12, 15)));
        assert_eq!(date(9999, 12, 31).checked_add_days(1), None);
    }

    #[test]
    fn numbers_weeks() {
        // first Thursday rule with a Sunday week start
        assert_eq!(date(1999, 1, 1).week_of_year(Weekday::Sunday), 0);
        assert_eq!(date(1999, 1, 3).week_of_year(Weekday::Sunday), 1);

        // ISO weeks
        assert_eq!(date(1999, 1, 1).week_of_year(Weekday::Monday), 0);
        assert_eq!(date(1999, 1, 4).week_of_year(Weekday::Monday), 1);
        assert_eq!(date(1999, 1, 1).iso_week(), (1998, 53));
        assert_eq!(date(2008, 12, 29).iso_week(), (2009, 1));
        assert_eq!(date(2010, 1, 3).iso_week(), (2009, 53));
        assert_eq!(date(2025, 6, 15).iso_week(), (2025, 24));

        assert_eq!(weeks_in_year(2009, Weekday::Monday), 53);
        assert_eq!(weeks_in_year(2010, Weekday::Monday), 52);
    }

    #[test]
    fn parses_calendar_values() {
        let v = CalendarValue::parse("19970714").unwrap();
        assert_eq!(v.precision(), Precision::Date);
        assert_eq!(v.date(), date(1997, 7, 14));
        assert_eq!(*v.zone(), Zone::Floating);

        let v = CalendarValue::parse("19980119T070000Z").unwrap();
        assert_eq!(v.precision(), Precision::DateTime);
        assert_eq!(v.time(), Some(Time::new(7, 0, 0).unwrap()));
        assert!(v.is_utc());

        let v = CalendarValue::parse_with_tzid("19980119T020000", Some("America/New_York")).unwrap();
        assert_eq!(*v.zone(), Zone::Tzid("America/New_York".to_owned()));

        let v = CalendarValue::parse_with_tzid("19980119T020000Z", Some("America/New_York")).unwrap();
        assert!(v.is_utc());
    }

    #[test]
    fn rejects_bogus_calendar_values() {
        for src in [
            "20010229",
            "20250230",
            "20251301",
            "20250101T240000",
            "20250101T126000",
            "2025010",
            "20250101T",
            "20250101T1200",
            "20250101T120000ZZ",
            "2025-01-01",
            "",
        ] {
            assert!(CalendarValue::parse(src).is_err(), "{src} should fail");
        }
        assert!(CalendarValue::parse("20000229").is_ok());
    }

    #[test]
    fn displays_original_qualifier() {
        for src in ["19970714", "19970714T133000", "19970714T173000Z"] {
            assert_eq!(CalendarValue::parse(src).unwrap().to_string(), src);
        }
    }

    #[test]
    fn compares_instants() {
        let day = CalendarValue::parse("19970902").unwrap();
        let morning = CalendarValue::parse("19970902T090000").unwrap();
        let noon = CalendarValue::parse("19970902T120000").unwrap();
        assert!(day.coincides_with(&morning));
        assert!(morning.coincides_with(&day));
        assert!(!morning.coincides_with(&noon));
    }

    #[cfg(feature = "jiff")]
    #[test]
    fn converts_to_jiff() {
        let d = date(2024, 2, 29);
        assert_eq!(jiff::civil::Date::from(d), jiff::civil::date(2024, 2, 29));
        assert_eq!(Date::try_from(jiff::civil::date(2024, 2, 29)), Ok(d));
    }
}
