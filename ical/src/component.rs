// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Calendar components built by the dispatcher.
//!
//! A [`Component`] keeps its properties as content lines in source order;
//! the value-bearing ones are read through
//! [`LeafProperty`](crate::property::LeafProperty) on demand. Recurring
//! components expand into their occurrence sequence with
//! [`Component::occurrences`].

mod builder;
mod kind;

use std::fmt;
use std::io::{self, Write};

pub(crate) use crate::component::builder::{ComponentBuilder, check_property};
pub use crate::component::kind::{ComponentKind, KindRules, Requirement};
use crate::error::{ErrorKind, ParseError};
use crate::formatter::{FormatOptions, Formatter};
use crate::keyword::{
    KW_DTSTART, KW_EXRULE, KW_RRULE, KW_TZID, KW_TZOFFSETFROM, KW_TZOFFSETTO, KW_UID,
};
use crate::parser::ParseMode;
use crate::property::{DateList, LeafProperty, PropertyKind, ValueKind};
use crate::recur::{
    DEFAULT_ITERATION_LIMIT, Observance, ObservanceKind, OccurrenceSet, TimeZoneRules, TzResolver,
};
use crate::syntax::ContentLine;
use crate::value::{CalendarValue, Precision, RecurrenceRule, UtcOffset};

/// A parsed calendar component.
#[derive(Debug, Clone)]
pub struct Component {
    /// Kind of the component
    pub kind: ComponentKind,

    /// Properties in source order
    pub properties: Vec<ContentLine>,

    /// Nested components in source order
    pub components: Vec<Component>,

    /// Experimental or unrecognized nested blocks, kept verbatim
    pub extensions: Vec<ExtensionBlock>,

    /// Whether no error-severity diagnostic was recorded for it
    pub valid: bool,

    /// Diagnostics recorded while building it
    pub errors: Vec<ParseError>,
}

/// Components compare by content; diagnostics are ignored.
impl PartialEq for Component {
    fn eq(&self, other: &Self) -> bool {
        self.kind == other.kind
            && self.properties == other.properties
            && self.components == other.components
            && self.extensions == other.extensions
    }
}

impl Eq for Component {}

impl Component {
    /// Create an empty, valid component.
    #[must_use]
    pub const fn new(kind: ComponentKind) -> Self {
        Self {
            kind,
            properties: Vec::new(),
            components: Vec::new(),
            extensions: Vec::new(),
            valid: true,
            errors: Vec::new(),
        }
    }

    /// Append a property.
    #[must_use]
    pub fn with_property(mut self, line: ContentLine) -> Self {
        self.properties.push(line);
        self
    }

    /// Append a nested component.
    #[must_use]
    pub fn with_component(mut self, component: Self) -> Self {
        self.components.push(component);
        self
    }

    /// First property with the given name.
    #[must_use]
    pub fn property(&self, name: &str) -> Option<&ContentLine> {
        self.properties.iter().find(|p| p.is(name))
    }

    /// All properties with the given name, in source order.
    pub fn properties_named<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a ContentLine> {
        self.properties.iter().filter(move |p| p.is(name))
    }

    /// Value of the UID property.
    #[must_use]
    pub fn uid(&self) -> Option<&str> {
        self.property(KW_UID).map(|p| p.value.as_str())
    }

    /// Value of the DTSTART property, the recurrence anchor.
    #[must_use]
    pub fn dt_start(&self) -> Option<CalendarValue> {
        self.property(KW_DTSTART)
            .and_then(|p| CalendarValue::from_content_line(p).ok())
    }

    /// RRULE values, read leniently.
    #[must_use]
    pub fn rrules(&self) -> Vec<RecurrenceRule> {
        self.rules(KW_RRULE)
    }

    /// EXRULE values, read leniently.
    #[must_use]
    pub fn exrules(&self) -> Vec<RecurrenceRule> {
        self.rules(KW_EXRULE)
    }

    /// RDATE values; periods are skipped.
    #[must_use]
    pub fn rdates(&self) -> Vec<CalendarValue> {
        self.date_list(PropertyKind::RDate)
    }

    /// EXDATE values.
    #[must_use]
    pub fn exdates(&self) -> Vec<CalendarValue> {
        self.date_list(PropertyKind::ExDate)
    }

    fn rules(&self, name: &str) -> Vec<RecurrenceRule> {
        self.properties_named(name)
            .filter_map(|p| RecurrenceRule::parse(&p.value, ParseMode::Loose).ok())
            .map(|(rule, _)| rule)
            .collect()
    }

    fn date_list(&self, kind: PropertyKind) -> Vec<CalendarValue> {
        self.properties_named(kind.name())
            .filter(|p| kind.value_kind_of(p) == ValueKind::DateList)
            .filter_map(|p| DateList::from_content_line(p).ok())
            .flat_map(|list| list.0)
            .collect()
    }

    /// Lazy occurrence sequence anchored at DTSTART.
    ///
    /// `tz` resolves the anchor's local time when UTC values have to be
    /// compared with it. Returns `None` without a valid DTSTART.
    #[must_use]
    pub fn occurrences<'a>(&self, tz: &'a dyn TzResolver) -> Option<OccurrenceSet<'a>> {
        let anchor = self.dt_start()?;
        let mut set = OccurrenceSet::new(anchor, tz);
        for rule in self.rrules() {
            set = set.rrule(rule);
        }
        for rule in self.exrules() {
            set = set.exrule(rule);
        }
        Some(set.rdates(self.rdates()).exdates(self.exdates()))
    }

    /// Collect at most `max` occurrences.
    #[must_use]
    pub fn expand(&self, tz: &dyn TzResolver, max: usize) -> Expansion {
        self.expand_with_limit(tz, max, DEFAULT_ITERATION_LIMIT)
    }

    /// Collect at most `max` occurrences, giving up each rule after
    /// `iteration_limit` consecutive periods without an occurrence.
    ///
    /// Hitting the limit is reported as
    /// [`ErrorKind::RecurrenceIterationLimitExceeded`].
    #[must_use]
    pub fn expand_with_limit(
        &self,
        tz: &dyn TzResolver,
        max: usize,
        iteration_limit: usize,
    ) -> Expansion {
        let Some(set) = self.occurrences(tz) else {
            return Expansion::default();
        };
        let mut set = set.with_iteration_limit(iteration_limit);
        let occurrences: Vec<_> = set.by_ref().take(max).collect();

        let mut errors = Vec::new();
        if set.limit_exceeded() {
            let rule = self.property(KW_RRULE).or_else(|| self.property(KW_EXRULE));
            let mut err = ParseError::new(
                ErrorKind::RecurrenceIterationLimitExceeded,
                rule.map_or(0, |p| p.line),
                format!(
                    "expansion stopped after {iteration_limit} empty periods, {} occurrences kept",
                    occurrences.len()
                ),
            );
            if let Some(rule) = rule {
                err = err.with_source(rule.to_string(), rule.span);
            }
            errors.push(err);
        }
        Expansion {
            occurrences,
            errors,
        }
    }

    /// UTC offset rules described by a VTIMEZONE.
    ///
    /// Observances without a usable DTSTART or offsets are skipped.
    #[must_use]
    pub fn timezone_rules(&self) -> Option<TimeZoneRules> {
        if self.kind != ComponentKind::TimeZone {
            return None;
        }
        let tzid = self.property(KW_TZID)?.value.clone();
        let observances = self
            .components
            .iter()
            .filter_map(Self::observance)
            .collect();
        Some(TimeZoneRules::new(tzid, observances))
    }

    fn observance(&self) -> Option<Observance> {
        let kind = match self.kind {
            ComponentKind::Standard => ObservanceKind::Standard,
            ComponentKind::Daylight => ObservanceKind::Daylight,
            _ => return None,
        };
        let offset = |name| {
            self.property(name)
                .and_then(|p| UtcOffset::from_content_line(p).ok())
        };
        Some(Observance {
            kind,
            start: self.dt_start()?.local(),
            offset_from: offset(KW_TZOFFSETFROM)?,
            offset_to: offset(KW_TZOFFSETTO)?,
            rrule: self.rrules().into_iter().next(),
            rdates: self
                .rdates()
                .iter()
                .filter(|v| v.precision() == Precision::DateTime)
                .map(CalendarValue::local)
                .collect(),
        })
    }

    /// Write the component as folded content lines.
    ///
    /// # Errors
    ///
    /// Returns an error if writing fails.
    pub fn write<W: Write>(&self, formatter: &mut Formatter<W>) -> io::Result<()> {
        formatter.write_begin(self.kind.name())?;
        for line in &self.properties {
            formatter.write_line(line)?;
        }
        for component in &self.components {
            component.write(formatter)?;
        }
        for block in &self.extensions {
            block.write(formatter)?;
        }
        formatter.write_end(self.kind.name())
    }

    /// Serialize with the default format options.
    #[must_use]
    pub fn serialize(&self) -> String {
        let mut formatter = Formatter::new(Vec::new(), FormatOptions::default());
        // writing to a Vec cannot fail
        let _ = self.write(&mut formatter);
        String::from_utf8_lossy(&formatter.into_writer()).into_owned()
    }
}

impl fmt::Display for Component {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.serialize())
    }
}

/// Occurrences collected by [`Component::expand`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Expansion {
    /// Occurrences in order, anchor first
    pub occurrences: Vec<CalendarValue>,

    /// Truncation reports
    pub errors: Vec<ParseError>,
}

/// An experimental (`X-`) or unrecognized block, kept verbatim.
#[derive(Debug, Clone)]
pub struct ExtensionBlock {
    /// Block name as written after `BEGIN:`
    pub name: String,

    /// Properties in source order
    pub properties: Vec<ContentLine>,

    /// Nested blocks in source order
    pub children: Vec<ExtensionBlock>,

    /// Line of the `BEGIN`, 0 for blocks built in memory
    pub line: usize,
}

impl ExtensionBlock {
    /// Create an empty block.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            properties: Vec::new(),
            children: Vec::new(),
            line: 0,
        }
    }

    /// Write the block as folded content lines.
    ///
    /// # Errors
    ///
    /// Returns an error if writing fails.
    pub fn write<W: Write>(&self, formatter: &mut Formatter<W>) -> io::Result<()> {
        formatter.write_begin(&self.name)?;
        for line in &self.properties {
            formatter.write_line(line)?;
        }
        for child in &self.children {
            child.write(formatter)?;
        }
        formatter.write_end(&self.name)
    }
}

impl PartialEq for ExtensionBlock {
    fn eq(&self, other: &Self) -> bool {
        self.name.eq_ignore_ascii_case(&other.name)
            && self.properties == other.properties
            && self.children == other.children
    }
}

impl Eq for ExtensionBlock {}
