// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! In-memory calendar container.

use std::io::{self, BufRead, Write};

use crate::component::{Component, ComponentKind, ExtensionBlock};
use crate::formatter::{FormatOptions, Formatter};
use crate::keyword::{KW_TZID, KW_VCALENDAR};
use crate::parser::{ComponentSink, ParseOptions, ParseReport, Parser};
use crate::recur::TimeZoneRules;
use crate::syntax::ContentLine;

/// The contents of one or more VCALENDAR objects.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Calendar {
    /// Calendar properties such as VERSION and PRODID
    pub properties: Vec<ContentLine>,

    /// Top-level components in source order
    pub components: Vec<Component>,

    /// Experimental or unrecognized top-level blocks
    pub extensions: Vec<ExtensionBlock>,
}

impl Calendar {
    /// Read a calendar with the given parser.
    ///
    /// # Errors
    ///
    /// Returns an error only if reading `input` fails.
    pub fn from_reader<R: BufRead>(input: R, parser: &Parser) -> io::Result<(Self, ParseReport)> {
        let mut calendar = Self::default();
        let mut report = parser.parse(input, &mut calendar)?;
        calendar.properties = std::mem::take(&mut report.calendar_properties);
        Ok((calendar, report))
    }

    /// Read a calendar from a string with the default options.
    ///
    /// Diagnostics carry byte spans into `src`, ready for rendering:
    ///
    /// ```
    /// # use calends_ical::Calendar;
    /// use ariadne::{Color, Label, Report, ReportKind, Source};
    /// let src = "\
    /// BEGIN:VCALENDAR\r\n\
    /// BEGIN:VEVENT\r\n\
    /// END:VCALENDAR\r\n\
    /// END:VEVENT\r\n\
    /// ";
    /// let (_, report) = Calendar::parse_str(src).unwrap();
    /// assert!(report.has_errors());
    /// for err in &report.errors {
    ///     Report::build(ReportKind::Error, err.span.into_range())
    ///         .with_config(ariadne::Config::new().with_index_type(ariadne::IndexType::Byte))
    ///         .with_message(err.to_string())
    ///         .with_label(
    ///             Label::new(err.span.into_range())
    ///                 .with_message(err.kind.to_string())
    ///                 .with_color(Color::Red),
    ///         )
    ///         .finish()
    ///         .eprint(Source::from(src))
    ///         .unwrap();
    /// }
    /// ```
    ///
    /// # Errors
    ///
    /// Returns an error only if reading `src` fails.
    pub fn parse_str(src: &str) -> io::Result<(Self, ParseReport)> {
        Self::from_reader(src.as_bytes(), &Parser::new(ParseOptions::default()))
    }

    /// First calendar property with the given name.
    #[must_use]
    pub fn property(&self, name: &str) -> Option<&ContentLine> {
        self.properties.iter().find(|p| p.is(name))
    }

    /// Top-level components of the given kind.
    pub fn components_of(&self, kind: ComponentKind) -> impl Iterator<Item = &Component> {
        self.components.iter().filter(move |c| c.kind == kind)
    }

    /// Offset rules of the VTIMEZONE with the given TZID.
    #[must_use]
    pub fn time_zone(&self, tzid: &str) -> Option<TimeZoneRules> {
        self.components_of(ComponentKind::TimeZone)
            .find(|c| c.property(KW_TZID).is_some_and(|p| p.value == tzid))
            .and_then(Component::timezone_rules)
    }

    /// Write the calendar as one VCALENDAR object.
    ///
    /// # Errors
    ///
    /// Returns an error if writing fails.
    pub fn write<W: Write>(&self, formatter: &mut Formatter<W>) -> io::Result<()> {
        formatter.write_begin(KW_VCALENDAR)?;
        for line in &self.properties {
            formatter.write_line(line)?;
        }
        for component in &self.components {
            component.write(formatter)?;
        }
        for block in &self.extensions {
            block.write(formatter)?;
        }
        formatter.write_end(KW_VCALENDAR)
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

impl ComponentSink for Calendar {
    fn add(&mut self, component: Component) {
        self.components.push(component);
    }

    fn add_extension(&mut self, block: ExtensionBlock) {
        self.extensions.push(block);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::recur::TzResolver;
    use crate::value::CalendarValue;

    const SRC: &str = "\
BEGIN:VCALENDAR\r
VERSION:2.0\r
PRODID:-//Example Corp.//CalDAV Client//EN\r
BEGIN:VTIMEZONE\r
TZID:Fictitious\r
BEGIN:STANDARD\r
DTSTART:19671029T020000\r
TZOFFSETFROM:-0400\r
TZOFFSETTO:-0500\r
RRULE:FREQ=YEARLY;BYDAY=-1SU;BYMONTH=10\r
END:STANDARD\r
BEGIN:DAYLIGHT\r
DTSTART:19870405T020000\r
TZOFFSETFROM:-0500\r
TZOFFSETTO:-0400\r
RRULE:FREQ=YEARLY;BYDAY=1SU;BYMONTH=4\r
END:DAYLIGHT\r
END:VTIMEZONE\r
BEGIN:VEVENT\r
UID:19970901T130000Z-123401@example.com\r
DTSTAMP:19970901T130000Z\r
DTSTART;TZID=Fictitious:19970903T163000\r
SUMMARY:Annual Employee Review\r
END:VEVENT\r
BEGIN:X-VENDOR-DATA\r
X-KEY:value\r
END:X-VENDOR-DATA\r
END:VCALENDAR\r
";

    #[test]
    fn collects_properties_components_and_extensions() {
        let (calendar, report) = Calendar::parse_str(SRC).unwrap();
        assert!(report.errors.is_empty(), "{:?}", report.errors);
        assert_eq!(calendar.property("VERSION").map(|p| p.value.as_str()), Some("2.0"));
        assert_eq!(calendar.components.len(), 2);
        assert_eq!(calendar.components_of(ComponentKind::Event).count(), 1);
        assert_eq!(calendar.extensions.len(), 1);
        assert_eq!(report.stats.components, 4);
        assert_eq!(report.stats.lines, 28);
    }

    #[test]
    fn resolves_embedded_time_zones() {
        let (calendar, _) = Calendar::parse_str(SRC).unwrap();
        let tz = calendar.time_zone("Fictitious").unwrap();
        let event = calendar.components_of(ComponentKind::Event).next().unwrap();
        let start = event.dt_start().unwrap();
        assert_eq!(tz.utc_offset(start.local()), -4 * 3600);
        let winter = CalendarValue::parse("19971215T120000").unwrap();
        assert_eq!(tz.utc_offset(winter.local()), -5 * 3600);
        assert!(calendar.time_zone("Elsewhere").is_none());
    }

    #[test]
    fn serialization_reparses_equal() {
        let (calendar, _) = Calendar::parse_str(SRC).unwrap();
        let (again, report) = Calendar::parse_str(&calendar.serialize()).unwrap();
        assert!(report.errors.is_empty());
        assert_eq!(again, calendar);
    }
}
