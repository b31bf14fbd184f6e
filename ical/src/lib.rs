// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Parse, validate, serialize and expand iCalendar (RFC 5545) data.
//!
//! Input is read line by line, so large calendars can be processed without
//! holding the whole document in memory: each top-level component is handed
//! to a [`ComponentSink`] as soon as its END line is read.
//!
//! ```
//! use calends_ical::{Calendar, ComponentKind, FixedOffset};
//!
//! let src = "\
//! BEGIN:VCALENDAR\r
//! VERSION:2.0\r
//! PRODID:-//Example//EN\r
//! BEGIN:VEVENT\r
//! UID:standup@example.com\r
//! DTSTAMP:20240101T000000Z\r
//! DTSTART:20240101T090000Z\r
//! RRULE:FREQ=DAILY;COUNT=3\r
//! END:VEVENT\r
//! END:VCALENDAR\r
//! ";
//!
//! let (calendar, report) = Calendar::parse_str(src).unwrap();
//! assert!(!report.has_errors());
//!
//! let event = calendar.components_of(ComponentKind::Event).next().unwrap();
//! let expansion = event.expand(&FixedOffset::UTC, 10);
//! assert_eq!(expansion.occurrences.len(), 3);
//! ```

#![warn(
    trivial_casts,
    trivial_numeric_casts,
    missing_copy_implementations,
    missing_debug_implementations,
    missing_docs,
    unsafe_code,
    unstable_features,
    unused_import_braces,
    unused_qualifications,
    clippy::dbg_macro,
    clippy::indexing_slicing,
    clippy::pedantic
)]
// Allow certain clippy lints that are too restrictive for this crate
#![allow(
    clippy::option_option,
    clippy::similar_names,
    clippy::single_match_else,
    clippy::match_bool
)]

mod calendar;
mod component;
mod error;
pub mod formatter;
pub mod keyword;
pub mod parameter;
mod parser;
pub mod property;
pub mod recur;
pub mod span;
pub mod syntax;
pub mod value;

pub use crate::calendar::Calendar;
pub use crate::component::{
    Component, ComponentKind, Expansion, ExtensionBlock, KindRules, Requirement,
};
pub use crate::error::{ErrorKind, ParseError, Severity};
pub use crate::formatter::{FoldingStyle, FormatOptions, Formatter};
pub use crate::keyword::{Recognition, is_x_name};
pub use crate::parameter::{Parameter, ParameterKind};
pub use crate::parser::{
    ComponentSink, ParseMode, ParseOptions, ParseReport, ParseStats, Parser,
};
pub use crate::property::{DateList, LeafProperty, PropertyKind, ValueKind};
pub use crate::recur::{
    DEFAULT_ITERATION_LIMIT, FixedOffset, Observance, ObservanceKind, OccurrenceSet, Recurrences,
    TimeZoneRules, TzResolver,
};
pub use crate::span::Span;
pub use crate::syntax::{ContentLine, ContentLineError};
pub use crate::value::{
    CalendarValue, Date, DateTime, Duration, Frequency, Precision, RecurError, RecurrenceRule,
    Time, UtcOffset, ValueError, Weekday, WeekdayNum, Zone,
};
