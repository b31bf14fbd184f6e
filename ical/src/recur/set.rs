// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Combination of recurrence rules and explicit dates into one occurrence
//! sequence: `(anchor ∪ RRULE ∪ RDATE) − (EXRULE ∪ EXDATE)`.

use std::borrow::Cow;
use std::iter::FusedIterator;

use crate::recur::{Recurrences, TzResolver};
use crate::value::{CalendarValue, RecurrenceRule};

enum Source<'a> {
    Rule(Recurrences<'a>),
    Dates(std::vec::IntoIter<CalendarValue>),
}

impl Iterator for Source<'_> {
    type Item = CalendarValue;

    fn next(&mut self) -> Option<Self::Item> {
        match self {
            Self::Rule(iter) => iter.next(),
            Self::Dates(iter) => iter.next(),
        }
    }
}

/// A sorted source with a one-value lookahead.
struct Stream<'a> {
    source: Source<'a>,
    head: Option<CalendarValue>,
}

impl<'a> Stream<'a> {
    fn new(mut source: Source<'a>) -> Self {
        let head = source.next();
        Self { source, head }
    }

    fn advance(&mut self) -> Option<CalendarValue> {
        let next = self.source.next();
        std::mem::replace(&mut self.head, next)
    }

    fn limit_exceeded(&self) -> bool {
        matches!(&self.source, Source::Rule(iter) if iter.limit_exceeded())
    }
}

/// Lazy, sorted and de-duplicated occurrences of a recurring component.
///
/// Explicit dates are brought into the anchor's frame first: UTC values
/// become local time when the anchor is local, and the other way round.
pub struct OccurrenceSet<'a> {
    anchor: CalendarValue,
    tz: &'a dyn TzResolver,
    includes: Vec<Stream<'a>>,
    excludes: Vec<Stream<'a>>,
    last: Option<CalendarValue>,
}

impl<'a> OccurrenceSet<'a> {
    /// An occurrence set containing only `anchor`.
    pub fn new(anchor: CalendarValue, tz: &'a dyn TzResolver) -> Self {
        let includes = vec![Stream::new(Source::Dates(vec![anchor.clone()].into_iter()))];
        Self {
            anchor,
            tz,
            includes,
            excludes: Vec::new(),
            last: None,
        }
    }

    /// Add the occurrences of an RRULE.
    #[must_use]
    pub fn rrule(mut self, rule: RecurrenceRule) -> Self {
        let iter = Recurrences::new(Cow::Owned(rule), &self.anchor, self.tz);
        self.includes.push(Stream::new(Source::Rule(iter)));
        self
    }

    /// Add RDATE values.
    ///
    /// Dates before the anchor are ignored; the anchor stays the first
    /// occurrence.
    #[must_use]
    pub fn rdates(mut self, dates: impl IntoIterator<Item = CalendarValue>) -> Self {
        let mut dates = self.normalized(dates);
        dates.retain(|date| !precedes(date, &self.anchor));
        self.includes.push(Stream::new(Source::Dates(dates.into_iter())));
        self
    }

    /// Remove the occurrences of an EXRULE.
    #[must_use]
    pub fn exrule(mut self, rule: RecurrenceRule) -> Self {
        let iter = Recurrences::new(Cow::Owned(rule), &self.anchor, self.tz).matching_only();
        self.excludes.push(Stream::new(Source::Rule(iter)));
        self
    }

    /// Remove EXDATE values.
    #[must_use]
    pub fn exdates(mut self, dates: impl IntoIterator<Item = CalendarValue>) -> Self {
        let dates = self.normalized(dates);
        self.excludes.push(Stream::new(Source::Dates(dates.into_iter())));
        self
    }

    /// Give up each rule after `limit` consecutive periods without an
    /// occurrence.
    ///
    /// Applies to the rules added so far.
    #[must_use]
    pub fn with_iteration_limit(mut self, limit: usize) -> Self {
        for stream in self.includes.iter_mut().chain(self.excludes.iter_mut()) {
            if let Source::Rule(iter) = &mut stream.source {
                iter.set_iteration_limit(limit);
            }
        }
        self
    }

    /// Whether any rule stopped at its iteration limit.
    #[must_use]
    pub fn limit_exceeded(&self) -> bool {
        self.includes
            .iter()
            .chain(&self.excludes)
            .any(Stream::limit_exceeded)
    }

    fn normalized(&self, dates: impl IntoIterator<Item = CalendarValue>) -> Vec<CalendarValue> {
        let mut dates: Vec<_> = dates.into_iter().map(|v| self.to_anchor_frame(v)).collect();
        dates.sort_by_key(CalendarValue::local);
        dates
    }

    fn to_anchor_frame(&self, value: CalendarValue) -> CalendarValue {
        if value.time().is_none() || self.anchor.time().is_none() {
            return value;
        }
        let converted = match (value.is_utc(), self.anchor.is_utc()) {
            (true, false) => self.tz.from_utc(value.local()),
            (false, true) => self.tz.to_utc(value.local()),
            _ => return value,
        };
        match converted {
            Some(local) => CalendarValue::from_date_time(local, self.anchor.zone().clone()),
            None => value,
        }
    }

    fn excluded(&mut self, candidate: &CalendarValue) -> bool {
        let mut excluded = false;
        for stream in &mut self.excludes {
            while let Some(head) = &stream.head {
                if !precedes(head, candidate) {
                    break;
                }
                stream.advance();
            }
            excluded |= stream
                .head
                .as_ref()
                .is_some_and(|head| head.coincides_with(candidate));
        }
        excluded
    }
}

/// Whether `a` lies strictly before `b`, comparing times only when both
/// carry one.
fn precedes(a: &CalendarValue, b: &CalendarValue) -> bool {
    a.date() < b.date()
        || (a.date() == b.date() && matches!((a.time(), b.time()), (Some(x), Some(y)) if x < y))
}

impl Iterator for OccurrenceSet<'_> {
    type Item = CalendarValue;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let stream = self
                .includes
                .iter_mut()
                .filter(|s| s.head.is_some())
                .min_by_key(|s| s.head.as_ref().map(CalendarValue::local))?;
            let candidate = stream.advance()?;

            let duplicate = self.last.as_ref().is_some_and(|last| {
                last.date() == candidate.date() && last.time() == candidate.time()
            });
            if duplicate || self.excluded(&candidate) {
                continue;
            }
            self.last = Some(candidate.clone());
            return Some(candidate);
        }
    }
}

impl FusedIterator for OccurrenceSet<'_> {}

impl std::fmt::Debug for OccurrenceSet<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OccurrenceSet")
            .field("anchor", &self.anchor)
            .field("last", &self.last)
            .finish_non_exhaustive()
    }
}
