// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Duration value type parser as defined in RFC 5545 Section 3.3.6.

use std::fmt::{self, Display};
use std::str::FromStr;

use chumsky::prelude::*;

use crate::value::ValueError;

const MINUTE: i64 = 60;
const HOUR: i64 = 60 * MINUTE;
const DAY: i64 = 24 * HOUR;
const WEEK: i64 = 7 * DAY;

/// A signed duration, normalized to a total number of seconds.
///
/// Days are nominal 24-hour days.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Duration {
    seconds: i64,
}

impl Duration {
    /// Zero-length duration.
    pub const ZERO: Self = Self { seconds: 0 };

    /// Duration of the given number of seconds.
    #[must_use]
    pub const fn from_seconds(seconds: i64) -> Self {
        Self { seconds }
    }

    /// Total signed seconds.
    #[must_use]
    pub const fn seconds(self) -> i64 {
        self.seconds
    }

    /// Returns `true` for a negative duration.
    #[must_use]
    pub const fn is_negative(self) -> bool {
        self.seconds < 0
    }

    /// Parse a DURATION value.
    ///
    /// # Errors
    ///
    /// Returns [`ValueError::Invalid`] when the text does not match the grammar,
    /// including a bare `P` or `PT`.
    pub fn parse(text: &str) -> Result<Self, ValueError> {
        duration()
            .then_ignore(end())
            .parse(text)
            .into_result()
            .map_err(|errs| ValueError::invalid("DURATION", text, &errs))
    }
}

impl FromStr for Duration {
    type Err = ValueError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

/// Canonical form: whole weeks as `PnW`, otherwise `PnDTnHnMnS` with zero
/// fields left out.
impl Display for Duration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.seconds < 0 {
            f.write_str("-")?;
        }
        f.write_str("P")?;

        let total = self.seconds.unsigned_abs();
        if total == 0 {
            return f.write_str("T0S");
        }

        let week = WEEK.unsigned_abs();
        if total % week == 0 {
            return write!(f, "{}W", total / week);
        }

        let days = total / DAY.unsigned_abs();
        let hours = total % DAY.unsigned_abs() / HOUR.unsigned_abs();
        let minutes = total % HOUR.unsigned_abs() / MINUTE.unsigned_abs();
        let seconds = total % MINUTE.unsigned_abs();
        if days > 0 {
            write!(f, "{days}D")?;
        }
        if hours > 0 || minutes > 0 || seconds > 0 {
            f.write_str("T")?;
            if hours > 0 {
                write!(f, "{hours}H")?;
            }
            // dur-hour only admits a minute before the second
            if minutes > 0 || (hours > 0 && seconds > 0) {
                write!(f, "{minutes}M")?;
            }
            if seconds > 0 {
                write!(f, "{seconds}S")?;
            }
        }
        Ok(())
    }
}

type Extra<'src> = extra::Err<Rich<'src, char>>;

/// Format Definition:  This value type is defined by the following notation:
///
/// ```txt
/// dur-value  = (["+"] / "-") "P" (dur-date / dur-time / dur-week)
///
/// dur-date   = dur-day [dur-time]
/// dur-time   = "T" (dur-hour / dur-minute / dur-second)
/// dur-week   = 1*DIGIT "W"
/// dur-hour   = 1*DIGIT "H" [dur-minute]
/// dur-minute = 1*DIGIT "M" [dur-second]
/// dur-second = 1*DIGIT "S"
/// dur-day    = 1*DIGIT "D"
/// ```
pub(crate) fn duration<'src>() -> impl Parser<'src, &'src str, Duration, Extra<'src>> + Clone {
    // case-sensitive
    let int = any()
        .filter(char::is_ascii_digit)
        .repeated()
        .at_least(1)
        .at_most(10) // u32 max is 10 digits: 4_294_967_295
        .to_slice()
        .try_map(|digits: &str, span| {
            lexical::parse::<u32, _>(digits)
                .map(i64::from)
                .map_err(|err| Rich::custom(span, format!("invalid number `{digits}`: {err}")))
        });

    let unit = |designator: char, scale: i64| {
        int.clone()
            .then_ignore(just(designator))
            .map(move |v| v * scale)
    };

    let second = unit('S', 1);
    let minute = unit('M', MINUTE);
    let hour = unit('H', HOUR);

    // dur-minute = 1*DIGIT "M" [dur-second]
    let minute_with_second = minute
        .then(second.clone().or_not())
        .map(|(m, s)| m + s.unwrap_or(0));

    // dur-hour = 1*DIGIT "H" [dur-minute]
    let hour_with_minute = hour
        .then(minute_with_second.clone().or_not())
        .map(|(h, ms)| h + ms.unwrap_or(0));

    // dur-time = "T" (dur-hour / dur-minute / dur-second)
    let time = just('T').ignore_then(choice((hour_with_minute, minute_with_second, second)));

    let date = unit('D', DAY)
        .then(time.clone().or_not())
        .map(|(d, t)| d + t.unwrap_or(0));
    let week = unit('W', WEEK);

    let sign = one_of("+-")
        .or_not()
        .map(|sign| if sign == Some('-') { -1 } else { 1 });

    sign.then_ignore(just('P'))
        .then(choice((date, time, week)))
        .map(|(sign, seconds)| Duration::from_seconds(sign * seconds))
}
