// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Value type parsing module for iCalendar property values.
//!
//! This module handles the parsing and validation of the iCalendar value
//! types used by dates, durations, offsets and recurrence rules, as defined
//! in RFC 5545 Section 3.3.

pub mod datetime;
pub mod duration;
pub mod offset;
pub mod rrule;
pub mod text;

use std::fmt::Display;

pub use datetime::{
    CalendarValue, Date, DateTime, Precision, Time, Weekday, Zone, days_in_month, days_in_year,
    is_leap_year, weeks_in_year,
};
pub use duration::Duration;
pub use offset::UtcOffset;
pub use rrule::{Frequency, RecurError, RecurrenceRule, WeekdayNum};

/// Error produced when a value fails validation.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValueError {
    /// A field outside its valid range.
    #[error("{field} {value} out of range")]
    OutOfRange {
        /// Field name
        field: &'static str,
        /// Offending value
        value: i64,
    },

    /// Text that does not match the value grammar.
    #[error("invalid {expected} value `{found}`: {reason}")]
    Invalid {
        /// Expected value type
        expected: &'static str,
        /// Offending text
        found: String,
        /// Parser diagnostic
        reason: String,
    },
}

impl ValueError {
    pub(crate) fn out_of_range(field: &'static str, value: impl Into<i64>) -> Self {
        Self::OutOfRange {
            field,
            value: value.into(),
        }
    }

    pub(crate) fn invalid<E: Display>(expected: &'static str, found: &str, errs: &[E]) -> Self {
        let reason = errs
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join("; ");
        Self::Invalid {
            expected,
            found: found.to_owned(),
            reason,
        }
    }
}

/// Parse a comma-separated list of DATE or DATE-TIME values sharing one
/// `TZID`, as used by RDATE and EXDATE.
///
/// # Errors
///
/// Returns the first item's [`ValueError`].
pub fn parse_date_list(text: &str, tzid: Option<&str>) -> Result<Vec<CalendarValue>, ValueError> {
    text.split(',')
        .map(|item| CalendarValue::parse_with_tzid(item.trim(), tzid))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_date_lists() {
        let values = parse_date_list("19970714T123000Z,19970715T123000Z", None).unwrap();
        assert_eq!(values.len(), 2);
        assert!(values.iter().all(CalendarValue::is_utc));

        let values = parse_date_list("19970101,19970120", Some("Europe/Paris")).unwrap();
        assert!(values.iter().all(|v| v.precision() == Precision::Date));

        assert!(parse_date_list("19970101,1997012", None).is_err());
    }

    #[test]
    fn reports_parser_reason() {
        let err = Duration::parse("P").unwrap_err();
        assert!(matches!(err, ValueError::Invalid { expected: "DURATION", .. }));
        assert!(err.to_string().starts_with("invalid DURATION value `P`"));
    }
}
