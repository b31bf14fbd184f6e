// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Recurrence rule value type (RFC 5545 Section 3.3.10).
//!
//! ```txt
//! recur           = recur-rule-part *( ";" recur-rule-part )
//!                 ;
//!                 ; The rule parts are not ordered in any
//!                 ; particular sequence.
//!                 ;
//!                 ; The FREQ rule part is REQUIRED,
//!                 ; but MUST NOT occur more than once.
//!                 ;
//!                 ; The UNTIL or COUNT rule parts are OPTIONAL,
//!                 ; but they MUST NOT occur in the same 'recur'.
//!                 ;
//!                 ; The other rule parts are OPTIONAL,
//!                 ; but MUST NOT occur more than once.
//! ```

use std::fmt::{self, Display};
use std::ops::RangeInclusive;
use std::str::FromStr;

use crate::keyword::{
    KW_RRULE_BYDAY, KW_RRULE_BYHOUR, KW_RRULE_BYMINUTE, KW_RRULE_BYMONTH, KW_RRULE_BYMONTHDAY,
    KW_RRULE_BYSECOND, KW_RRULE_BYSETPOS, KW_RRULE_BYWEEKNO, KW_RRULE_BYYEARDAY, KW_RRULE_COUNT,
    KW_RRULE_FREQ, KW_RRULE_INTERVAL, KW_RRULE_UNTIL, KW_RRULE_WKST,
};
use crate::parser::ParseMode;
use crate::value::ValueError;
use crate::value::datetime::{CalendarValue, Weekday};

/// Recurrence frequency, ordered from finest to coarsest.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    strum::EnumString,
    strum::Display,
    strum::IntoStaticStr,
)]
#[strum(ascii_case_insensitive)]
#[expect(missing_docs)]
pub enum Frequency {
    #[strum(to_string = "SECONDLY")]
    Secondly,
    #[strum(to_string = "MINUTELY")]
    Minutely,
    #[strum(to_string = "HOURLY")]
    Hourly,
    #[strum(to_string = "DAILY")]
    Daily,
    #[strum(to_string = "WEEKLY")]
    Weekly,
    #[strum(to_string = "MONTHLY")]
    Monthly,
    #[strum(to_string = "YEARLY")]
    Yearly,
}

/// Day of week with optional occurrence, e.g. `-2MO` or `FR`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct WeekdayNum {
    /// Occurrence within the month or year, `1..=53` or `-53..=-1`
    pub ordinal: Option<i8>,
    /// Day of the week
    pub weekday: Weekday,
}

impl WeekdayNum {
    /// Every occurrence of a weekday.
    #[must_use]
    pub const fn every(weekday: Weekday) -> Self {
        Self {
            ordinal: None,
            weekday,
        }
    }

    /// The `ordinal`-th occurrence of a weekday.
    #[must_use]
    pub const fn nth(ordinal: i8, weekday: Weekday) -> Self {
        Self {
            ordinal: Some(ordinal),
            weekday,
        }
    }

    fn parse(text: &str) -> Option<Self> {
        let split = text.len().checked_sub(2)?;
        let weekday = text.get(split..)?.parse().ok()?;
        let ordinal = match text.get(..split)? {
            "" => None,
            num => Some(parse_int(num)?),
        };
        Some(Self {
            ordinal: ordinal.map(|n| i8::try_from(n).unwrap_or(i8::MAX)),
            weekday,
        })
    }
}

impl Display for WeekdayNum {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(ordinal) = self.ordinal {
            write!(f, "{ordinal}")?;
        }
        write!(f, "{}", self.weekday)
    }
}

/// Recurrence rule error.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RecurError {
    /// The FREQ rule part is absent.
    #[error("missing FREQ rule part")]
    MissingFrequency,

    /// The FREQ value is not a known frequency.
    #[error("unknown frequency `{0}`")]
    UnknownFrequency(String),

    /// A rule part without `=`.
    #[error("malformed rule part `{0}`")]
    MalformedPart(String),

    /// A rule part name that is not defined.
    #[error("unknown rule part `{0}`")]
    UnknownPart(String),

    /// A rule part given more than once.
    #[error("duplicate rule part {0}")]
    DuplicatePart(&'static str),

    /// A value that does not parse.
    #[error("invalid {part} value `{value}`")]
    InvalidValue {
        /// Rule part name
        part: &'static str,
        /// Offending text
        value: String,
    },

    /// A numeric value outside the range of its rule part.
    #[error("{part} value {value} out of range")]
    OutOfRange {
        /// Rule part name
        part: &'static str,
        /// Offending value
        value: i64,
    },

    /// UNTIL is not a valid DATE or DATE-TIME.
    #[error("invalid UNTIL: {0}")]
    InvalidUntil(#[source] ValueError),

    /// A rule part that must not be combined with the frequency.
    #[error("{part} is not allowed with FREQ={freq}")]
    InvalidCombination {
        /// Rule part name
        part: &'static str,
        /// Rule frequency
        freq: Frequency,
    },

    /// Both COUNT and UNTIL are present.
    #[error("COUNT and UNTIL must not occur in the same rule")]
    CountAndUntil,
}

/// A parsed recurrence rule.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecurrenceRule {
    /// Frequency of recurrence
    pub freq: Frequency,
    /// Inclusive end of the recurrence
    pub until: Option<CalendarValue>,
    /// Number of occurrences, the anchor included
    pub count: Option<u32>,
    /// Interval between periods, at least 1
    pub interval: u32,
    /// Second specifier, 0-59
    pub by_second: Vec<i8>,
    /// Minute specifier, 0-59
    pub by_minute: Vec<i8>,
    /// Hour specifier, 0-23
    pub by_hour: Vec<i8>,
    /// Day of week specifier
    pub by_day: Vec<WeekdayNum>,
    /// Day of month specifier, `1..=31` or `-31..=-1`
    pub by_month_day: Vec<i8>,
    /// Day of year specifier, `1..=366` or `-366..=-1`
    pub by_year_day: Vec<i16>,
    /// Week number specifier, `1..=53` or `-53..=-1`
    pub by_week_no: Vec<i8>,
    /// Month specifier, 1-12
    pub by_month: Vec<i8>,
    /// Position within the period's set, `1..=366` or `-366..=-1`
    pub by_set_pos: Vec<i16>,
    /// Start day of week
    pub wkst: Option<Weekday>,
}

impl RecurrenceRule {
    /// A rule with the given frequency and nothing else.
    #[must_use]
    pub const fn new(freq: Frequency) -> Self {
        Self {
            freq,
            until: None,
            count: None,
            interval: 1,
            by_second: Vec::new(),
            by_minute: Vec::new(),
            by_hour: Vec::new(),
            by_day: Vec::new(),
            by_month_day: Vec::new(),
            by_year_day: Vec::new(),
            by_week_no: Vec::new(),
            by_month: Vec::new(),
            by_set_pos: Vec::new(),
            wkst: None,
        }
    }

    /// Start day of week, Monday unless WKST says otherwise.
    #[must_use]
    pub fn week_start(&self) -> Weekday {
        self.wkst.unwrap_or(Weekday::Monday)
    }

    /// Parse a RECUR value.
    ///
    /// In [`ParseMode::Loose`], out-of-range items, unknown or duplicate rule
    /// parts and disallowed combinations are dropped and returned alongside
    /// the rule; in [`ParseMode::Strict`] the first of them is the error.
    ///
    /// # Errors
    ///
    /// A missing or unknown FREQ, an invalid UNTIL, or an invalid COUNT or
    /// INTERVAL is an error in both modes.
    pub fn parse(text: &str, mode: ParseMode) -> Result<(Self, Vec<RecurError>), RecurError> {
        let mut diag = Diagnostics {
            mode,
            warnings: Vec::new(),
        };
        let mut freq = None;
        let mut rule = Self::new(Frequency::Yearly);
        let mut seen: Vec<&'static str> = Vec::new();

        for part in text.split(';') {
            let Some((name, value)) = part.split_once('=') else {
                diag.tolerate(RecurError::MalformedPart(part.to_owned()))?;
                continue;
            };

            let Some(key) = PART_NAMES
                .iter()
                .copied()
                .find(|kw| kw.eq_ignore_ascii_case(name.trim()))
            else {
                diag.tolerate(RecurError::UnknownPart(name.to_owned()))?;
                continue;
            };
            if seen.contains(&key) {
                // last one wins
                diag.tolerate(RecurError::DuplicatePart(key))?;
            } else {
                seen.push(key);
            }

            match key {
                KW_RRULE_FREQ => {
                    let parsed = value
                        .parse()
                        .map_err(|_| RecurError::UnknownFrequency(value.to_owned()))?;
                    freq = Some(parsed);
                }
                KW_RRULE_UNTIL => {
                    rule.until = Some(CalendarValue::parse(value).map_err(RecurError::InvalidUntil)?);
                }
                KW_RRULE_COUNT => rule.count = Some(parse_positive(key, value)?),
                KW_RRULE_INTERVAL => rule.interval = parse_positive(key, value)?,
                KW_RRULE_WKST => match value.parse() {
                    Ok(day) => rule.wkst = Some(day),
                    Err(_) => diag.tolerate(RecurError::InvalidValue {
                        part: key,
                        value: value.to_owned(),
                    })?,
                },
                KW_RRULE_BYSECOND => rule.by_second = diag.list(key, value, &[0..=59])?,
                KW_RRULE_BYMINUTE => rule.by_minute = diag.list(key, value, &[0..=59])?,
                KW_RRULE_BYHOUR => rule.by_hour = diag.list(key, value, &[0..=23])?,
                KW_RRULE_BYMONTHDAY => {
                    rule.by_month_day = diag.list(key, value, &[1..=31, -31..=-1])?;
                }
                KW_RRULE_BYYEARDAY => {
                    rule.by_year_day = diag.list(key, value, &[1..=366, -366..=-1])?;
                }
                KW_RRULE_BYWEEKNO => {
                    rule.by_week_no = diag.list(key, value, &[1..=53, -53..=-1])?;
                }
                KW_RRULE_BYMONTH => rule.by_month = diag.list(key, value, &[1..=12])?,
                KW_RRULE_BYSETPOS => {
                    rule.by_set_pos = diag.list(key, value, &[1..=366, -366..=-1])?;
                }
                _ => rule.by_day = diag.weekdays(value)?,
            }
        }

        rule.freq = freq.ok_or(RecurError::MissingFrequency)?;
        rule.check_combinations(&mut diag)?;
        Ok((rule, diag.warnings))
    }

    fn check_combinations(&mut self, diag: &mut Diagnostics) -> Result<(), RecurError> {
        let freq = self.freq;
        if self.count.is_some() && self.until.is_some() {
            // kept; whichever limit is reached first ends the set
            diag.tolerate(RecurError::CountAndUntil)?;
        }

        let ordinals_allowed = match freq {
            Frequency::Monthly => true,
            Frequency::Yearly => self.by_week_no.is_empty(),
            _ => false,
        };
        if !ordinals_allowed && self.by_day.iter().any(|d| d.ordinal.is_some()) {
            diag.tolerate(RecurError::InvalidCombination {
                part: KW_RRULE_BYDAY,
                freq,
            })?;
            for day in &mut self.by_day {
                day.ordinal = None;
            }
        }

        if freq != Frequency::Yearly && !self.by_week_no.is_empty() {
            diag.tolerate(RecurError::InvalidCombination {
                part: KW_RRULE_BYWEEKNO,
                freq,
            })?;
            self.by_week_no.clear();
        }

        if matches!(
            freq,
            Frequency::Daily | Frequency::Weekly | Frequency::Monthly
        ) && !self.by_year_day.is_empty()
        {
            diag.tolerate(RecurError::InvalidCombination {
                part: KW_RRULE_BYYEARDAY,
                freq,
            })?;
            self.by_year_day.clear();
        }

        if freq == Frequency::Weekly && !self.by_month_day.is_empty() {
            diag.tolerate(RecurError::InvalidCombination {
                part: KW_RRULE_BYMONTHDAY,
                freq,
            })?;
            self.by_month_day.clear();
        }
        Ok(())
    }
}

/// Strict parsing.
impl FromStr for RecurrenceRule {
    type Err = RecurError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s, ParseMode::Strict).map(|(rule, _)| rule)
    }
}

impl Display for RecurrenceRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fn list<T: Display>(
            f: &mut fmt::Formatter<'_>,
            name: &str,
            items: &[T],
        ) -> fmt::Result {
            if items.is_empty() {
                return Ok(());
            }
            write!(f, ";{name}=")?;
            for (i, item) in items.iter().enumerate() {
                if i > 0 {
                    f.write_str(",")?;
                }
                write!(f, "{item}")?;
            }
            Ok(())
        }

        write!(f, "{KW_RRULE_FREQ}={}", self.freq)?;
        if let Some(until) = &self.until {
            write!(f, ";{KW_RRULE_UNTIL}={until}")?;
        }
        if let Some(count) = self.count {
            write!(f, ";{KW_RRULE_COUNT}={count}")?;
        }
        if self.interval != 1 {
            write!(f, ";{KW_RRULE_INTERVAL}={}", self.interval)?;
        }
        list(f, KW_RRULE_BYSECOND, &self.by_second)?;
        list(f, KW_RRULE_BYMINUTE, &self.by_minute)?;
        list(f, KW_RRULE_BYHOUR, &self.by_hour)?;
        list(f, KW_RRULE_BYDAY, &self.by_day)?;
        list(f, KW_RRULE_BYMONTHDAY, &self.by_month_day)?;
        list(f, KW_RRULE_BYYEARDAY, &self.by_year_day)?;
        list(f, KW_RRULE_BYWEEKNO, &self.by_week_no)?;
        list(f, KW_RRULE_BYMONTH, &self.by_month)?;
        list(f, KW_RRULE_BYSETPOS, &self.by_set_pos)?;
        if let Some(wkst) = self.wkst {
            write!(f, ";{KW_RRULE_WKST}={wkst}")?;
        }
        Ok(())
    }
}

const PART_NAMES: [&str; 14] = [
    KW_RRULE_FREQ,
    KW_RRULE_UNTIL,
    KW_RRULE_COUNT,
    KW_RRULE_INTERVAL,
    KW_RRULE_BYSECOND,
    KW_RRULE_BYMINUTE,
    KW_RRULE_BYHOUR,
    KW_RRULE_BYDAY,
    KW_RRULE_BYMONTHDAY,
    KW_RRULE_BYYEARDAY,
    KW_RRULE_BYWEEKNO,
    KW_RRULE_BYMONTH,
    KW_RRULE_BYSETPOS,
    KW_RRULE_WKST,
];

struct Diagnostics {
    mode: ParseMode,
    warnings: Vec<RecurError>,
}

impl Diagnostics {
    fn tolerate(&mut self, err: RecurError) -> Result<(), RecurError> {
        match self.mode {
            ParseMode::Strict => Err(err),
            ParseMode::Loose => {
                self.warnings.push(err);
                Ok(())
            }
        }
    }

    fn list<T: TryFrom<i64>>(
        &mut self,
        part: &'static str,
        value: &str,
        ranges: &[RangeInclusive<i64>],
    ) -> Result<Vec<T>, RecurError> {
        let mut items = Vec::new();
        for item in value.split(',') {
            match parse_int(item) {
                Some(v) if ranges.iter().any(|r| r.contains(&v)) => {
                    if let Ok(v) = T::try_from(v) {
                        items.push(v);
                    }
                }
                Some(v) => self.tolerate(RecurError::OutOfRange { part, value: v })?,
                None => self.tolerate(RecurError::InvalidValue {
                    part,
                    value: item.to_owned(),
                })?,
            }
        }
        Ok(items)
    }

    fn weekdays(&mut self, value: &str) -> Result<Vec<WeekdayNum>, RecurError> {
        let mut days = Vec::new();
        for item in value.split(',') {
            match WeekdayNum::parse(item) {
                Some(day) if day.ordinal.is_none_or(|n| n != 0 && n.unsigned_abs() <= 53) => days.push(day),
                Some(day) => self.tolerate(RecurError::OutOfRange {
                    part: KW_RRULE_BYDAY,
                    value: day.ordinal.map_or(0, i64::from),
                })?,
                None => self.tolerate(RecurError::InvalidValue {
                    part: KW_RRULE_BYDAY,
                    value: item.to_owned(),
                })?,
            }
        }
        Ok(days)
    }
}

fn parse_int(text: &str) -> Option<i64> {
    let digits = match text.strip_prefix('+') {
        Some(rest) if rest.starts_with(['+', '-']) => return None,
        Some(rest) => rest,
        None => text,
    };
    lexical::parse::<i64, _>(digits).ok()
}

fn parse_positive(part: &'static str, value: &str) -> Result<u32, RecurError> {
    let invalid = || RecurError::InvalidValue {
        part,
        value: value.to_owned(),
    };
    match parse_int(value) {
        Some(v) if v >= 1 => u32::try_from(v).map_err(|_| invalid()),
        _ => Err(invalid()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value::datetime::Precision;

    fn strict(src: &str) -> Result<RecurrenceRule, RecurError> {
        src.parse()
    }

    fn loose(src: &str) -> (RecurrenceRule, Vec<RecurError>) {
        RecurrenceRule::parse(src, ParseMode::Loose).unwrap()
    }

    #[test]
    fn parses_rrule_freq_only() {
        let freqs = [
            ("FREQ=SECONDLY", Frequency::Secondly),
            ("FREQ=MINUTELY", Frequency::Minutely),
            ("FREQ=HOURLY", Frequency::Hourly),
            ("FREQ=DAILY", Frequency::Daily),
            ("FREQ=WEEKLY", Frequency::Weekly),
            ("FREQ=MONTHLY", Frequency::Monthly),
            ("FREQ=YEARLY", Frequency::Yearly),
        ];

        for (src, expected_freq) in freqs {
            let result = strict(src).unwrap();
            assert_eq!(result.freq, expected_freq, "Failed for {src}");
            assert!(result.until.is_none());
            assert!(result.count.is_none());
            assert_eq!(result.interval, 1);
            assert_eq!(result.week_start(), Weekday::Monday);
        }
    }

    #[test]
    fn parses_rrule_with_until() {
        let result = strict("FREQ=DAILY;UNTIL=19971224T000000Z").unwrap();
        let until = result.until.unwrap();
        assert_eq!(until.date().year(), 1997);
        assert!(until.is_utc());

        let result = strict("FREQ=DAILY;UNTIL=19971224").unwrap();
        assert_eq!(result.until.unwrap().precision(), Precision::Date);
    }

    #[test]
    fn parses_rrule_complex() {
        let src = "FREQ=MONTHLY;INTERVAL=2;COUNT=10;BYDAY=1SU,-1SU,+2MO;BYHOUR=8,9;BYMINUTE=30;WKST=SU";
        let result = strict(src).unwrap();
        assert_eq!(result.freq, Frequency::Monthly);
        assert_eq!(result.interval, 2);
        assert_eq!(result.count, Some(10));
        assert_eq!(
            result.by_day,
            [
                WeekdayNum::nth(1, Weekday::Sunday),
                WeekdayNum::nth(-1, Weekday::Sunday),
                WeekdayNum::nth(2, Weekday::Monday),
            ]
        );
        assert_eq!(result.by_hour, [8, 9]);
        assert_eq!(result.by_minute, [30]);
        assert_eq!(result.wkst, Some(Weekday::Sunday));
    }

    #[test]
    fn handles_reordered_and_lowercase_parts() {
        let result = strict("count=5;byday=mo,we;freq=weekly").unwrap();
        assert_eq!(result.freq, Frequency::Weekly);
        assert_eq!(result.count, Some(5));
        assert_eq!(result.by_day.len(), 2);
    }

    #[test]
    fn rejects_fatal_errors_in_both_modes() {
        for mode in [ParseMode::Strict, ParseMode::Loose] {
            let parse = |src| RecurrenceRule::parse(src, mode);
            assert_eq!(parse("COUNT=5"), Err(RecurError::MissingFrequency));
            assert_eq!(
                parse("FREQ=FORTNIGHTLY"),
                Err(RecurError::UnknownFrequency("FORTNIGHTLY".to_owned()))
            );
            assert!(matches!(
                parse("FREQ=DAILY;UNTIL=20250230"),
                Err(RecurError::InvalidUntil(_))
            ));
            assert!(parse("FREQ=DAILY;COUNT=0").is_err());
            assert!(parse("FREQ=DAILY;INTERVAL=-1").is_err());
            assert!(parse("FREQ=DAILY;COUNT=x").is_err());
        }
    }

    #[test]
    fn strict_rejects_what_loose_drops() {
        let cases = [
            ("FREQ=DAILY;BYHOUR=24", KW_RRULE_BYHOUR),
            ("FREQ=MONTHLY;BYMONTHDAY=0", KW_RRULE_BYMONTHDAY),
            ("FREQ=YEARLY;BYMONTH=13", KW_RRULE_BYMONTH),
            ("FREQ=YEARLY;BYWEEKNO=54", KW_RRULE_BYWEEKNO),
            ("FREQ=MONTHLY;BYDAY=0MO", KW_RRULE_BYDAY),
            ("FREQ=MONTHLY;BYDAY=XX", KW_RRULE_BYDAY),
        ];
        for (src, part) in cases {
            assert!(strict(src).is_err(), "{src} should fail in strict mode");
            let (rule, warnings) = loose(src);
            assert_eq!(warnings.len(), 1, "{src}");
            assert!(
                matches!(
                    warnings.first(),
                    Some(RecurError::OutOfRange { part: p, .. } | RecurError::InvalidValue { part: p, .. }) if *p == part
                ),
                "{src}: {warnings:?}"
            );
            assert!(rule.by_hour.is_empty() && rule.by_month_day.is_empty());
        }
    }

    #[test]
    fn loose_keeps_valid_items() {
        let (rule, warnings) = loose("FREQ=YEARLY;BYMONTH=1,13,3");
        assert_eq!(rule.by_month, [1, 3]);
        assert_eq!(warnings, [RecurError::OutOfRange { part: KW_RRULE_BYMONTH, value: 13 }]);
    }

    #[test]
    fn tolerates_unknown_and_duplicate_parts() {
        assert!(strict("FREQ=DAILY;X-FOO=1").is_err());
        assert!(strict("FREQ=DAILY;COUNT=1;COUNT=2").is_err());

        let (rule, warnings) = loose("FREQ=DAILY;X-FOO=1;COUNT=1;COUNT=2;BOGUS");
        assert_eq!(rule.count, Some(2));
        assert_eq!(
            warnings,
            [
                RecurError::UnknownPart("X-FOO".to_owned()),
                RecurError::DuplicatePart(KW_RRULE_COUNT),
                RecurError::MalformedPart("BOGUS".to_owned()),
            ]
        );
    }

    #[test]
    fn checks_combinations() {
        assert!(strict("FREQ=DAILY;BYDAY=1MO").is_err());
        assert!(strict("FREQ=MONTHLY;BYWEEKNO=1").is_err());
        assert!(strict("FREQ=WEEKLY;BYMONTHDAY=1").is_err());
        assert!(strict("FREQ=MONTHLY;BYYEARDAY=1").is_err());
        assert!(strict("FREQ=DAILY;COUNT=1;UNTIL=19970101").is_err());

        let (rule, _) = loose("FREQ=WEEKLY;BYDAY=1MO,TU");
        assert_eq!(
            rule.by_day,
            [WeekdayNum::every(Weekday::Monday), WeekdayNum::every(Weekday::Tuesday)]
        );
        let (rule, warnings) = loose("FREQ=DAILY;COUNT=3;UNTIL=19970101");
        assert_eq!(warnings, [RecurError::CountAndUntil]);
        assert!(rule.count.is_some() && rule.until.is_some());
    }

    #[test]
    fn displays_canonical_form() {
        let cases = [
            ("FREQ=DAILY;INTERVAL=1;COUNT=5", "FREQ=DAILY;COUNT=5"),
            (
                "BYDAY=-2MO;FREQ=MONTHLY;COUNT=6",
                "FREQ=MONTHLY;COUNT=6;BYDAY=-2MO",
            ),
            (
                "FREQ=YEARLY;INTERVAL=2;BYMONTH=1,2,3;UNTIL=19971224T000000Z;WKST=SU",
                "FREQ=YEARLY;UNTIL=19971224T000000Z;INTERVAL=2;BYMONTH=1,2,3;WKST=SU",
            ),
            ("FREQ=MONTHLY;BYDAY=+1FR", "FREQ=MONTHLY;BYDAY=1FR"),
        ];
        for (src, expected) in cases {
            let rule = strict(src).unwrap();
            assert_eq!(rule.to_string(), expected);
            assert_eq!(strict(expected).unwrap(), rule);
        }
    }
}
