// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Expansion of a single recurrence rule into occurrences.

use std::borrow::Cow;
use std::collections::VecDeque;
use std::iter::FusedIterator;

use crate::recur::TzResolver;
use crate::value::{
    CalendarValue, Date, DateTime, Frequency, RecurrenceRule, Time, Weekday, WeekdayNum,
    days_in_month, days_in_year, weeks_in_year,
};

/// Default number of consecutive empty periods after which expansion gives up.
pub const DEFAULT_ITERATION_LIMIT: usize = 10_000;

const SECONDS_PER_DAY: i64 = 86_400;

impl RecurrenceRule {
    /// Lazily expand this rule anchored at `anchor`.
    ///
    /// The anchor is always the first occurrence and counts towards COUNT.
    /// `tz` converts local candidates when UNTIL is in UTC but the anchor
    /// is not.
    pub fn recurrences<'a>(
        &'a self,
        anchor: &CalendarValue,
        tz: &'a dyn TzResolver,
    ) -> Recurrences<'a> {
        Recurrences::new(Cow::Borrowed(self), anchor, tz)
    }
}

/// Inclusive upper bound from UNTIL, in the frame of the anchor.
#[derive(Debug, Clone, Copy)]
enum Until {
    Date(Date),
    Local(DateTime),
    Utc(DateTime),
}

impl Until {
    fn admits(self, tz: &dyn TzResolver, candidate: DateTime) -> bool {
        match self {
            Self::Date(date) => candidate.date <= date,
            Self::Local(until) => candidate <= until,
            Self::Utc(until) => tz.to_utc(candidate).is_none_or(|utc| utc <= until),
        }
    }

    /// Whether everything from `floor` on is past the bound.
    fn passed(self, floor: DateTime) -> bool {
        match self {
            Self::Date(date) => floor.date > date,
            Self::Local(until) => floor > until,
            // offsets stay within a day
            Self::Utc(until) => floor
                .checked_add_seconds(-SECONDS_PER_DAY)
                .is_some_and(|earliest| earliest > until),
        }
    }
}

/// Lazy sequence of occurrences produced by [`RecurrenceRule::recurrences`].
///
/// Each period (one INTERVAL step of FREQ) is expanded in full, sorted and
/// filtered by BYSETPOS before any of its candidates is yielded.
pub struct Recurrences<'a> {
    rule: Cow<'a, RecurrenceRule>,
    tz: &'a dyn TzResolver,
    anchor: CalendarValue,
    start: DateTime,
    freq: Frequency,
    week_start: Weekday,
    by_month: Vec<i8>,
    by_month_day: Vec<i8>,
    by_day: Vec<WeekdayNum>,
    until: Option<Until>,
    force_anchor: bool,

    period: i64,
    pending: VecDeque<DateTime>,
    emitted: u32,
    started: bool,
    done: bool,
    empty_run: usize,
    produced: bool,
    limit: usize,
    limit_exceeded: bool,
}

impl<'a> Recurrences<'a> {
    pub(crate) fn new(
        rule: Cow<'a, RecurrenceRule>,
        anchor: &CalendarValue,
        tz: &'a dyn TzResolver,
    ) -> Self {
        let start = anchor.local();
        let date_only = anchor.time().is_none();
        let freq = if date_only && rule.freq < Frequency::Daily {
            Frequency::Daily
        } else {
            rule.freq
        };

        // absent date rules default from the anchor
        let mut by_month = rule.by_month.clone();
        let mut by_month_day = rule.by_month_day.clone();
        let mut by_day = rule.by_day.clone();
        if rule.by_week_no.is_empty()
            && rule.by_year_day.is_empty()
            && by_month_day.is_empty()
            && by_day.is_empty()
        {
            match freq {
                Frequency::Yearly => {
                    if by_month.is_empty() {
                        by_month.push(start.date.month());
                    }
                    by_month_day.push(start.date.day());
                }
                Frequency::Monthly => by_month_day.push(start.date.day()),
                Frequency::Weekly => by_day.push(WeekdayNum::every(start.date.weekday())),
                _ => {}
            }
        }
        by_month.sort_unstable();
        by_month.dedup();

        let until = rule.until.as_ref().map(|until| match (until.time(), date_only) {
            (None, _) | (_, true) => Until::Date(until.date()),
            (Some(_), false) if until.is_utc() && !anchor.is_utc() => Until::Utc(until.local()),
            (Some(_), false) => Until::Local(until.local()),
        });

        Self {
            week_start: rule.week_start(),
            rule,
            tz,
            anchor: anchor.clone(),
            start,
            freq,
            by_month,
            by_month_day,
            by_day,
            until,
            force_anchor: true,
            period: 0,
            pending: VecDeque::new(),
            emitted: 0,
            started: false,
            done: false,
            empty_run: 0,
            produced: false,
            limit: DEFAULT_ITERATION_LIMIT,
            limit_exceeded: false,
        }
    }

    /// Give up after `limit` consecutive periods without an occurrence.
    #[must_use]
    pub fn with_iteration_limit(mut self, limit: usize) -> Self {
        self.limit = limit.max(1);
        self
    }

    /// Yield the anchor only when the rule itself produces it.
    pub(crate) fn matching_only(mut self) -> Self {
        self.force_anchor = false;
        self
    }

    pub(crate) fn set_iteration_limit(&mut self, limit: usize) {
        self.limit = limit.max(1);
    }

    /// Whether expansion stopped at the iteration limit.
    #[must_use]
    pub const fn limit_exceeded(&self) -> bool {
        self.limit_exceeded
    }

    fn count_reached(&self) -> bool {
        self.rule.count.is_some_and(|count| self.emitted >= count)
    }

    fn fill(&mut self) {
        let Some((floor, mut candidates, next)) = self.expand_period(self.period) else {
            // a rule that never matched ran out of range before the cap
            if !self.produced && self.empty_run > 0 {
                self.give_up();
            }
            self.done = true;
            return;
        };
        if self.until.is_some_and(|until| until.passed(floor)) {
            self.done = true;
            return;
        }
        self.period = next;

        candidates.sort_unstable();
        candidates.dedup();
        let mut candidates = self.select_positions(candidates);
        self.produced |= !candidates.is_empty();
        if self.force_anchor {
            candidates.retain(|dt| *dt > self.start);
        } else {
            candidates.retain(|dt| *dt >= self.start);
        }

        if candidates.is_empty() {
            self.empty_run += 1;
            if self.empty_run >= self.limit {
                self.give_up();
            }
        } else {
            self.empty_run = 0;
            self.pending.extend(candidates);
        }
    }

    fn give_up(&mut self) {
        tracing::warn!(
            rule = %self.rule,
            limit = self.limit,
            empty_periods = self.empty_run,
            "recurrence expansion stopped after too many empty periods"
        );
        self.limit_exceeded = true;
        self.done = true;
    }

    /// Candidates of period `n`: the period floor, the candidates and the
    /// index of the next period to expand. `None` once out of range.
    fn expand_period(&self, n: i64) -> Option<(DateTime, Vec<DateTime>, i64)> {
        let step = n.checked_mul(i64::from(self.rule.interval))?;
        let days = match self.freq {
            Frequency::Yearly => {
                let year = i16::try_from(i64::from(self.start.date.year()) + step).ok()?;
                let months: Vec<i8> = if self.by_month.is_empty() {
                    (1..=12).collect()
                } else {
                    self.by_month.clone()
                };
                let mut days = Vec::new();
                for month in months {
                    for day in 1..=days_in_month(year, month) {
                        days.push(Date::new(year, month, day).ok()?);
                    }
                }
                days
            }
            Frequency::Monthly => {
                let first = Date::new(self.start.date.year(), self.start.date.month(), 1).ok()?;
                let first = first.checked_add_months(step)?;
                (0..i64::from(days_in_month(first.year(), first.month())))
                    .filter_map(|i| first.checked_add_days(i))
                    .collect()
            }
            Frequency::Weekly => {
                let first = self
                    .start
                    .date
                    .start_of_week(self.week_start)?
                    .checked_add_days(step.checked_mul(7)?)?;
                (0..7).filter_map(|i| first.checked_add_days(i)).collect()
            }
            Frequency::Daily => vec![self.start.date.checked_add_days(step)?],
            Frequency::Hourly | Frequency::Minutely | Frequency::Secondly => {
                return self.expand_sub_daily(n);
            }
        };

        let floor = DateTime::new(*days.first()?, Time::MIDNIGHT);
        let times = self.times(self.start.time);
        let candidates = days
            .into_iter()
            .filter(|date| self.day_matches(*date))
            .flat_map(|date| times.iter().map(move |time| DateTime::new(date, *time)))
            .collect();
        Some((floor, candidates, n + 1))
    }

    fn expand_sub_daily(&self, n: i64) -> Option<(DateTime, Vec<DateTime>, i64)> {
        let unit = match self.freq {
            Frequency::Hourly => 3600,
            Frequency::Minutely => 60,
            _ => 1,
        };
        let step = i64::from(self.rule.interval) * unit;
        let cursor = self.start.checked_add_seconds(n.checked_mul(step)?)?;
        let floor = DateTime::new(cursor.date, Time::MIDNIGHT);
        let secs = cursor.seconds_since_epoch();
        let time = cursor.time;

        // skip straight to the next period that can pass the coarser limits
        let boundary = if !self.day_matches(cursor.date) {
            Some((cursor.date.days_since_epoch() + 1) * SECONDS_PER_DAY)
        } else if !limits(&self.rule.by_hour, time.hour()) {
            Some(secs - i64::from(time.minute()) * 60 - i64::from(time.second()) + 3600)
        } else if self.freq <= Frequency::Minutely && !limits(&self.rule.by_minute, time.minute()) {
            Some(secs - i64::from(time.second()) + 60)
        } else {
            None
        };
        if let Some(boundary) = boundary {
            let offset = boundary - self.start.seconds_since_epoch();
            let next = (offset + step - 1).div_euclid(step);
            return Some((floor, Vec::new(), next.max(n + 1)));
        }

        let candidates = self
            .times(time)
            .into_iter()
            .map(|time| DateTime::new(cursor.date, time))
            .collect();
        Some((floor, candidates, n + 1))
    }

    /// Times of day within a period whose own time is `current`.
    ///
    /// Levels coarser than FREQ expand (defaulting to the anchor's field),
    /// the others only limit.
    fn times(&self, current: Time) -> Vec<Time> {
        if self.anchor.time().is_none() {
            return vec![Time::MIDNIGHT];
        }

        let level = |freq: Frequency, by: &[i8], anchor: i8, current: i8| -> Vec<i8> {
            if self.freq > freq {
                if by.is_empty() { vec![anchor] } else { by.to_vec() }
            } else if limits(by, current) {
                vec![current]
            } else {
                Vec::new()
            }
        };
        let hours = level(
            Frequency::Hourly,
            &self.rule.by_hour,
            self.start.time.hour(),
            current.hour(),
        );
        let minutes = level(
            Frequency::Minutely,
            &self.rule.by_minute,
            self.start.time.minute(),
            current.minute(),
        );
        let seconds = level(
            Frequency::Secondly,
            &self.rule.by_second,
            self.start.time.second(),
            current.second(),
        );

        let mut times = Vec::with_capacity(hours.len() * minutes.len() * seconds.len());
        for hour in &hours {
            for minute in &minutes {
                for second in &seconds {
                    if let Ok(time) = Time::new(*hour, *minute, *second) {
                        times.push(time);
                    }
                }
            }
        }
        times
    }

    fn day_matches(&self, date: Date) -> bool {
        let year = date.year();

        if !self.by_month.is_empty() && !self.by_month.contains(&date.month()) {
            return false;
        }

        if !self.rule.by_week_no.is_empty() {
            let (week_year, week) = date.week_date(self.week_start);
            let total = weeks_in_year(week_year, self.week_start);
            let hit = self
                .rule
                .by_week_no
                .iter()
                .any(|&n| n == week || (n < 0 && n + total + 1 == week));
            if !hit {
                return false;
            }
        }

        if !self.rule.by_year_day.is_empty() {
            let day = date.day_of_year();
            let len = days_in_year(year);
            let hit = self
                .rule
                .by_year_day
                .iter()
                .any(|&n| if n > 0 { n == day } else { len + 1 + n == day });
            if !hit {
                return false;
            }
        }

        if !self.by_month_day.is_empty() {
            let day = date.day();
            let len = days_in_month(year, date.month());
            let hit = self
                .by_month_day
                .iter()
                .any(|&n| if n > 0 { n == day } else { len + 1 + n == day });
            if !hit {
                return false;
            }
        }

        self.by_day.is_empty() || self.by_day.iter().any(|wd| self.weekday_matches(*wd, date))
    }

    fn weekday_matches(&self, wd: WeekdayNum, date: Date) -> bool {
        if wd.weekday != date.weekday() {
            return false;
        }
        let Some(ordinal) = wd.ordinal else {
            return true;
        };

        // ordinals count within the month or the year
        let in_month = (
            i64::from(date.day()) - 1,
            i64::from(days_in_month(date.year(), date.month())),
        );
        let (index, len) = match self.freq {
            Frequency::Monthly => in_month,
            Frequency::Yearly if !self.by_month.is_empty() => in_month,
            Frequency::Yearly => (
                i64::from(date.day_of_year()) - 1,
                i64::from(days_in_year(date.year())),
            ),
            _ => return true,
        };

        let ordinal = i64::from(ordinal);
        if ordinal > 0 {
            index / 7 + 1 == ordinal
        } else {
            (len - 1 - index) / 7 + 1 == -ordinal
        }
    }

    fn select_positions(&self, set: Vec<DateTime>) -> Vec<DateTime> {
        if self.rule.by_set_pos.is_empty() {
            return set;
        }
        let len = i64::try_from(set.len()).unwrap_or(i64::MAX);
        let mut picked: Vec<DateTime> = self
            .rule
            .by_set_pos
            .iter()
            .filter_map(|&pos| {
                let pos = i64::from(pos);
                let index = if pos > 0 { pos - 1 } else { len + pos };
                usize::try_from(index).ok().and_then(|i| set.get(i).copied())
            })
            .collect();
        picked.sort_unstable();
        picked.dedup();
        picked
    }
}

fn limits(by: &[i8], value: i8) -> bool {
    by.is_empty() || by.contains(&value)
}

impl Iterator for Recurrences<'_> {
    type Item = CalendarValue;

    fn next(&mut self) -> Option<Self::Item> {
        if !self.started {
            self.started = true;
            if self.force_anchor {
                self.emitted = 1;
                return Some(self.anchor.clone());
            }
        }

        loop {
            if self.count_reached() {
                return None;
            }
            if let Some(candidate) = self.pending.pop_front() {
                if self
                    .until
                    .is_some_and(|until| !until.admits(self.tz, candidate))
                {
                    self.pending.clear();
                    self.done = true;
                    return None;
                }
                self.emitted += 1;
                return Some(self.anchor.with_local(candidate));
            }
            if self.done {
                return None;
            }
            self.fill();
        }
    }
}

impl FusedIterator for Recurrences<'_> {}

impl std::fmt::Debug for Recurrences<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Recurrences")
            .field("rule", &self.rule)
            .field("anchor", &self.anchor)
            .field("period", &self.period)
            .field("emitted", &self.emitted)
            .field("limit_exceeded", &self.limit_exceeded)
            .finish_non_exhaustive()
    }
}
