// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! UTC Offset value type (RFC 5545 Section 3.3.14).

use std::fmt::{self, Display};
use std::str::FromStr;

use chumsky::prelude::*;

use crate::value::ValueError;

/// Offset from UTC to local time, in seconds east of UTC.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct UtcOffset(i32);

impl UtcOffset {
    /// The zero offset.
    pub const UTC: Self = Self(0);

    /// Offset of the given number of seconds east of UTC.
    #[must_use]
    pub const fn from_seconds(seconds: i32) -> Self {
        Self(seconds)
    }

    /// Seconds east of UTC.
    #[must_use]
    pub const fn seconds(self) -> i32 {
        self.0
    }

    /// Parse `("+" / "-") time-hour time-minute [time-second]`.
    ///
    /// # Errors
    ///
    /// Returns [`ValueError::Invalid`] for malformed text or a negative zero.
    pub fn parse(text: &str) -> Result<Self, ValueError> {
        utc_offset()
            .parse(text)
            .into_result()
            .map_err(|errs| ValueError::invalid("UTC-OFFSET", text, &errs))
    }
}

impl FromStr for UtcOffset {
    type Err = ValueError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl Display for UtcOffset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { '-' } else { '+' };
        let abs = self.0.unsigned_abs();
        write!(f, "{sign}{:02}{:02}", abs / 3600, abs % 3600 / 60)?;
        if abs % 60 != 0 {
            write!(f, "{:02}", abs % 60)?;
        }
        Ok(())
    }
}

type Extra<'src> = extra::Err<Rich<'src, char>>;

/// Format Definition:  This value type is defined by the following notation:
///
/// ```txt
/// utc-offset = time-numzone
///
/// time-numzone = ("+" / "-") time-hour time-minute [time-second]
/// ```
fn utc_offset<'src>() -> impl Parser<'src, &'src str, UtcOffset, Extra<'src>> {
    let two = any()
        .filter(char::is_ascii_digit)
        .repeated()
        .exactly(2)
        .to_slice()
        .map(|s: &str| s.bytes().fold(0, |acc, b| acc * 10 + i32::from(b - b'0')));

    one_of("+-")
        .then(two.clone())
        .then(two.clone())
        .then(two.or_not())
        .then_ignore(end())
        .try_map(|(((sign, hour), minute), second), span| {
            let second = second.unwrap_or(0);
            if hour > 23 || minute > 59 || second > 59 {
                return Err(Rich::custom(span, "offset field out of range"));
            }
            let total = hour * 3600 + minute * 60 + second;
            match sign {
                // RFC 5545 forbids "-0000"
                '-' if total == 0 => Err(Rich::custom(span, "negative zero offset")),
                '-' => Ok(UtcOffset(-total)),
                _ => Ok(UtcOffset(total)),
            }
        })
}
