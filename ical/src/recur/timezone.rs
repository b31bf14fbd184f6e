// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Sources of UTC offsets for local wall-clock times.

use crate::recur::DEFAULT_ITERATION_LIMIT;
use crate::value::{CalendarValue, DateTime, RecurrenceRule, UtcOffset, Zone};

/// Supplies the UTC offset in effect at a local wall-clock time.
pub trait TzResolver {
    /// Offset from UTC, in seconds east, at `local`.
    fn utc_offset(&self, local: DateTime) -> i32;

    /// Convert a local wall-clock time to UTC.
    fn to_utc(&self, local: DateTime) -> Option<DateTime> {
        local.checked_add_seconds(-i64::from(self.utc_offset(local)))
    }

    /// Convert a UTC time to local wall-clock time.
    fn from_utc(&self, utc: DateTime) -> Option<DateTime> {
        // the offset is keyed by local time, so settle on a fixed point
        let guess = utc.checked_add_seconds(i64::from(self.utc_offset(utc)))?;
        utc.checked_add_seconds(i64::from(self.utc_offset(guess)))
    }
}

/// A constant offset from UTC.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct FixedOffset(pub i32);

impl FixedOffset {
    /// UTC itself.
    pub const UTC: Self = Self(0);
}

impl From<UtcOffset> for FixedOffset {
    fn from(offset: UtcOffset) -> Self {
        Self(offset.seconds())
    }
}

impl TzResolver for FixedOffset {
    fn utc_offset(&self, _local: DateTime) -> i32 {
        self.0
    }
}

/// Whether an observance describes standard or daylight saving time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ObservanceKind {
    /// STANDARD sub-component
    Standard,
    /// DAYLIGHT sub-component
    Daylight,
}

/// One STANDARD or DAYLIGHT sub-component of a VTIMEZONE.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Observance {
    /// Standard or daylight time
    pub kind: ObservanceKind,
    /// First onset, local time in `offset_from`
    pub start: DateTime,
    /// Offset in use before each onset
    pub offset_from: UtcOffset,
    /// Offset in use after each onset
    pub offset_to: UtcOffset,
    /// Rule generating further onsets
    pub rrule: Option<RecurrenceRule>,
    /// Explicit further onsets
    pub rdates: Vec<DateTime>,
}

impl Observance {
    /// Latest onset at or before `local`.
    fn last_onset(&self, local: DateTime) -> Option<DateTime> {
        if self.start > local {
            return None;
        }

        let mut last = self.start;
        if let Some(rule) = &self.rrule {
            // UNTIL in onset rules is UTC, onsets are in the old offset
            let tz = FixedOffset::from(self.offset_from);
            let anchor = CalendarValue::from_date_time(self.start, Zone::Floating);
            let onset = rule
                .recurrences(&anchor, &tz)
                .with_iteration_limit(DEFAULT_ITERATION_LIMIT)
                .map(|v| v.local())
                .take_while(|onset| *onset <= local)
                .last();
            if let Some(onset) = onset {
                last = last.max(onset);
            }
        }
        for rdate in &self.rdates {
            if *rdate <= local {
                last = last.max(*rdate);
            }
        }
        Some(last)
    }
}

/// UTC offsets described by VTIMEZONE observances.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimeZoneRules {
    tzid: String,
    observances: Vec<Observance>,
}

impl TimeZoneRules {
    /// Create rules for the zone `tzid`.
    pub fn new(tzid: impl Into<String>, observances: Vec<Observance>) -> Self {
        Self {
            tzid: tzid.into(),
            observances,
        }
    }

    /// Zone identifier.
    #[must_use]
    pub fn tzid(&self) -> &str {
        &self.tzid
    }

    /// Observances in source order.
    #[must_use]
    pub fn observances(&self) -> &[Observance] {
        &self.observances
    }
}

impl TzResolver for TimeZoneRules {
    fn utc_offset(&self, local: DateTime) -> i32 {
        let current = self
            .observances
            .iter()
            .filter_map(|obs| obs.last_onset(local).map(|onset| (onset, obs)))
            .max_by_key(|(onset, _)| *onset);

        match current {
            Some((_, obs)) => obs.offset_to.seconds(),
            // before the first onset the earliest observance's old offset applies
            None => self
                .observances
                .iter()
                .min_by_key(|obs| obs.start)
                .map_or(0, |obs| obs.offset_from.seconds()),
        }
    }
}

#[cfg(feature = "jiff")]
impl TzResolver for jiff::tz::TimeZone {
    fn utc_offset(&self, local: DateTime) -> i32 {
        self.to_ambiguous_zoned(local.into())
            .compatible()
            .map_or(0, |zoned| zoned.offset().seconds())
    }
}
