// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Property catalog and typed property values.
//!
//! [`PropertyKind`] names every registered property together with the kind
//! of value the dispatcher validates for it. Text-like values are kept as
//! raw content lines; the value-bearing properties convert through
//! [`LeafProperty`].

use std::fmt;
use std::str::FromStr;

use crate::keyword::{
    KW_ACKNOWLEDGED, KW_ACTION, KW_ATTACH, KW_ATTENDEE, KW_BUSYTYPE, KW_CALENDAR_ADDRESS,
    KW_CALSCALE, KW_CATEGORIES, KW_CLASS, KW_COLOR, KW_COMMENT, KW_COMPLETED, KW_CONFERENCE,
    KW_CONTACT, KW_CREATED, KW_DATE, KW_DATETIME, KW_DESCRIPTION, KW_DTEND, KW_DTSTAMP,
    KW_DTSTART, KW_DUE, KW_DURATION, KW_EXDATE, KW_EXRULE, KW_FREEBUSY, KW_GEO, KW_IMAGE,
    KW_LAST_MODIFIED, KW_LOCATION, KW_LOCATION_TYPE, KW_METHOD, KW_NAME, KW_ORGANIZER,
    KW_PARTICIPANT_TYPE, KW_PERCENT_COMPLETE, KW_PERIOD, KW_PRIORITY, KW_PRODID, KW_PROXIMITY,
    KW_RDATE, KW_RECURRENCE_ID, KW_REFRESH_INTERVAL, KW_RELATED_TO, KW_REPEAT,
    KW_REQUEST_STATUS, KW_RESOURCE_TYPE, KW_RESOURCES, KW_RRULE, KW_SEQUENCE, KW_SOURCE,
    KW_STATUS, KW_STRUCTURED_DATA, KW_STYLED_DESCRIPTION, KW_SUMMARY, KW_TRANSP, KW_TRIGGER,
    KW_TZID, KW_TZNAME, KW_TZOFFSETFROM, KW_TZOFFSETTO, KW_TZURL, KW_UID, KW_URL, KW_VALUE,
    KW_VERSION,
};
use crate::syntax::ContentLine;
use crate::value::{
    CalendarValue, Duration, Precision, RecurError, RecurrenceRule, UtcOffset, ValueError, Zone,
};

/// Kind of value the dispatcher validates for a property.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValueKind {
    /// Free-form value, kept verbatim
    Text,
    /// A single DATE or DATE-TIME
    DateTime,
    /// Comma-separated DATE or DATE-TIME values
    DateList,
    /// A DURATION
    Duration,
    /// A RECUR rule
    Recur,
    /// A UTC-OFFSET
    UtcOffset,
}

/// Macro to define `PropertyKind` with the kind of value each property carries.
///
/// Usage: `property_kind!(Variant => KW => ValueKind, ...)`
macro_rules! property_kind {
    (
        $(
            $(#[$attr:meta])*
            $variant:ident => $kw:ident => $value_kind:ident $(,)?
        )*
    ) => {
        /// Kind of registered iCalendar property.
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        #[expect(missing_docs)]
        pub enum PropertyKind {
            $(
                $(#[$attr])*
                $variant,
            )*
        }

        impl PropertyKind {
            /// Returns the name keyword of the property
            #[must_use]
            pub const fn name(self) -> &'static str {
                match self {
                    $(Self::$variant => $kw,)*
                }
            }

            /// Returns the default kind of value of the property
            #[must_use]
            pub const fn value_kind(self) -> ValueKind {
                match self {
                    $(Self::$variant => ValueKind::$value_kind,)*
                }
            }
        }

        impl FromStr for PropertyKind {
            type Err = ();

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                // property names are case-insensitive
                match s.to_ascii_uppercase().as_str() {
                    $($kw => Ok(Self::$variant),)*
                    _ => Err(()),
                }
            }
        }

        impl fmt::Display for PropertyKind {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                self.name().fmt(f)
            }
        }

        #[cfg(test)]
        const KINDS: &[PropertyKind] = &[
            $(PropertyKind::$variant,)*
        ];
    };
}

property_kind! {
    // 3.7.  Calendar Properties
    CalScale        => KW_CALSCALE          => Text,
    Method          => KW_METHOD            => Text,
    ProdId          => KW_PRODID            => Text,
    Version         => KW_VERSION           => Text,
    // 3.8.1.  Descriptive Component Properties
    Attach          => KW_ATTACH            => Text,
    Categories      => KW_CATEGORIES        => Text,
    Class           => KW_CLASS             => Text,
    Comment         => KW_COMMENT           => Text,
    Description     => KW_DESCRIPTION       => Text,
    Geo             => KW_GEO               => Text,
    Location        => KW_LOCATION          => Text,
    PercentComplete => KW_PERCENT_COMPLETE  => Text,
    Priority        => KW_PRIORITY          => Text,
    Resources       => KW_RESOURCES         => Text,
    Status          => KW_STATUS            => Text,
    Summary         => KW_SUMMARY           => Text,
    // 3.8.2.  Date and Time Component Properties
    Completed       => KW_COMPLETED         => DateTime,
    DtEnd           => KW_DTEND             => DateTime,
    Due             => KW_DUE               => DateTime,
    DtStart         => KW_DTSTART           => DateTime,
    Duration        => KW_DURATION          => Duration,
    FreeBusy        => KW_FREEBUSY          => Text,
    Transp          => KW_TRANSP            => Text,
    // 3.8.3.  Time Zone Component Properties
    TzId            => KW_TZID              => Text,
    TzName          => KW_TZNAME            => Text,
    TzOffsetFrom    => KW_TZOFFSETFROM      => UtcOffset,
    TzOffsetTo      => KW_TZOFFSETTO        => UtcOffset,
    TzUrl           => KW_TZURL             => Text,
    // 3.8.4.  Relationship Component Properties
    Attendee        => KW_ATTENDEE          => Text,
    Contact         => KW_CONTACT           => Text,
    Organizer       => KW_ORGANIZER         => Text,
    RecurrenceId    => KW_RECURRENCE_ID     => DateTime,
    RelatedTo       => KW_RELATED_TO        => Text,
    Url             => KW_URL               => Text,
    Uid             => KW_UID               => Text,
    // 3.8.5.  Recurrence Component Properties
    ExDate          => KW_EXDATE            => DateList,
    ExRule          => KW_EXRULE            => Recur,
    RDate           => KW_RDATE             => DateList,
    RRule           => KW_RRULE             => Recur,
    // 3.8.6.  Alarm Component Properties
    Action          => KW_ACTION            => Text,
    Repeat          => KW_REPEAT            => Text,
    Trigger         => KW_TRIGGER           => Duration,
    // 3.8.7.  Change Management Component Properties
    Created         => KW_CREATED           => DateTime,
    DtStamp         => KW_DTSTAMP           => DateTime,
    LastModified    => KW_LAST_MODIFIED     => DateTime,
    Sequence        => KW_SEQUENCE          => Text,
    // 3.8.8.  Miscellaneous Component Properties
    RequestStatus   => KW_REQUEST_STATUS    => Text,
    // RFC 7986
    Color           => KW_COLOR             => Text,
    Conference      => KW_CONFERENCE        => Text,
    Image           => KW_IMAGE             => Text,
    Name            => KW_NAME              => Text,
    RefreshInterval => KW_REFRESH_INTERVAL  => Duration,
    Source          => KW_SOURCE            => Text,
    // RFC 7953
    BusyType        => KW_BUSYTYPE          => Text,
    // RFC 9073
    CalendarAddress => KW_CALENDAR_ADDRESS  => Text,
    LocationType    => KW_LOCATION_TYPE     => Text,
    ParticipantType => KW_PARTICIPANT_TYPE  => Text,
    ResourceType    => KW_RESOURCE_TYPE     => Text,
    StructuredData  => KW_STRUCTURED_DATA   => Text,
    StyledDescription => KW_STYLED_DESCRIPTION => Text,
    // RFC 9074
    Acknowledged    => KW_ACKNOWLEDGED      => DateTime,
    Proximity       => KW_PROXIMITY         => Text,
}

impl PropertyKind {
    /// Kind of value carried by `line`, taking its `VALUE` parameter into
    /// account.
    ///
    /// Periods are not validated and count as text.
    #[must_use]
    pub fn value_kind_of(self, line: &ContentLine) -> ValueKind {
        let declared = line.parameter_value(KW_VALUE);
        let is = |kw: &str| declared.is_some_and(|v| v.eq_ignore_ascii_case(kw));
        match self.value_kind() {
            ValueKind::DateList if is(KW_PERIOD) => ValueKind::Text,
            ValueKind::Duration if is(KW_DATETIME) || is(KW_DATE) => ValueKind::DateTime,
            kind => kind,
        }
    }
}

/// A typed property value that converts to and from a content line.
pub trait LeafProperty: Sized {
    /// Error produced when the value is not acceptable.
    type Error: std::error::Error;

    /// Read the value of `line`, honoring its parameters.
    ///
    /// # Errors
    ///
    /// Returns [`Self::Error`] when the value is malformed or out of range.
    fn from_content_line(line: &ContentLine) -> Result<Self, Self::Error>;

    /// Build the content line `name` carrying this value.
    fn to_content_line(&self, name: &str) -> ContentLine;
}

impl LeafProperty for CalendarValue {
    type Error = ValueError;

    fn from_content_line(line: &ContentLine) -> Result<Self, Self::Error> {
        let value = Self::parse_with_tzid(&line.value, line.parameter_value(KW_TZID))?;
        check_declared_precision(line, std::slice::from_ref(&value))?;
        Ok(value)
    }

    fn to_content_line(&self, name: &str) -> ContentLine {
        with_frame_parameters(ContentLine::new(name, self.to_string()), self)
    }
}

/// The values of an RDATE or EXDATE property.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DateList(pub Vec<CalendarValue>);

impl LeafProperty for DateList {
    type Error = ValueError;

    fn from_content_line(line: &ContentLine) -> Result<Self, Self::Error> {
        let values = crate::value::parse_date_list(&line.value, line.parameter_value(KW_TZID))?;
        check_declared_precision(line, &values)?;
        Ok(Self(values))
    }

    fn to_content_line(&self, name: &str) -> ContentLine {
        let value = self
            .0
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(",");
        let line = ContentLine::new(name, value);
        match self.0.first() {
            Some(first) => with_frame_parameters(line, first),
            None => line,
        }
    }
}

impl LeafProperty for Duration {
    type Error = ValueError;

    fn from_content_line(line: &ContentLine) -> Result<Self, Self::Error> {
        Self::parse(&line.value)
    }

    fn to_content_line(&self, name: &str) -> ContentLine {
        ContentLine::new(name, self.to_string())
    }
}

impl LeafProperty for UtcOffset {
    type Error = ValueError;

    fn from_content_line(line: &ContentLine) -> Result<Self, Self::Error> {
        Self::parse(&line.value)
    }

    fn to_content_line(&self, name: &str) -> ContentLine {
        ContentLine::new(name, self.to_string())
    }
}

impl LeafProperty for RecurrenceRule {
    type Error = RecurError;

    fn from_content_line(line: &ContentLine) -> Result<Self, Self::Error> {
        line.value.parse()
    }

    fn to_content_line(&self, name: &str) -> ContentLine {
        ContentLine::new(name, self.to_string())
    }
}

/// Reject values whose precision contradicts an explicit `VALUE` parameter.
fn check_declared_precision(line: &ContentLine, values: &[CalendarValue]) -> Result<(), ValueError> {
    let expected = match line.parameter_value(KW_VALUE) {
        Some(v) if v.eq_ignore_ascii_case(KW_DATE) => Precision::Date,
        Some(v) if v.eq_ignore_ascii_case(KW_DATETIME) => Precision::DateTime,
        _ => return Ok(()),
    };
    match values.iter().find(|v| v.precision() != expected) {
        Some(value) => Err(ValueError::Invalid {
            expected: if expected == Precision::Date {
                KW_DATE
            } else {
                KW_DATETIME
            },
            found: value.to_string(),
            reason: "precision contradicts the VALUE parameter".to_owned(),
        }),
        None => Ok(()),
    }
}

fn with_frame_parameters(line: ContentLine, value: &CalendarValue) -> ContentLine {
    let line = match value.precision() {
        Precision::Date => line.with_parameter(KW_VALUE, KW_DATE),
        Precision::DateTime => line,
    };
    match value.zone() {
        Zone::Tzid(tzid) if value.precision() == Precision::DateTime => {
            line.with_parameter(KW_TZID, tzid.clone())
        }
        _ => line,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::keyword::Recognition;
    use crate::syntax::scan_content_line;

    fn line(src: &str) -> ContentLine {
        scan_content_line(src, 1).unwrap()
    }

    #[test]
    fn names_round_trip_through_lookup() {
        for kind in KINDS {
            assert_eq!(kind.name().parse::<PropertyKind>(), Ok(*kind));
            assert_eq!(kind.to_string(), kind.name());
        }
    }

    #[test]
    fn recognizes_names_case_insensitively() {
        assert_eq!(
            Recognition::<PropertyKind>::of("dtstart"),
            Recognition::Known(PropertyKind::DtStart)
        );
        assert_eq!(
            Recognition::<PropertyKind>::of("X-WR-CALNAME"),
            Recognition::Extension
        );
        assert_eq!(Recognition::<PropertyKind>::of("FOO"), Recognition::Unknown);
    }

    #[test]
    fn value_parameter_overrides_kind() {
        let trigger = line("TRIGGER;VALUE=DATE-TIME:19980101T050000Z");
        assert_eq!(PropertyKind::Trigger.value_kind_of(&trigger), ValueKind::DateTime);
        let trigger = line("TRIGGER:-PT15M");
        assert_eq!(PropertyKind::Trigger.value_kind_of(&trigger), ValueKind::Duration);
        let rdate = line("RDATE;VALUE=PERIOD:19960403T020000Z/19960403T040000Z");
        assert_eq!(PropertyKind::RDate.value_kind_of(&rdate), ValueKind::Text);
    }

    #[test]
    fn reads_date_time_properties() {
        let value =
            CalendarValue::from_content_line(&line("DTSTART;TZID=America/New_York:19970902T090000"))
                .unwrap();
        assert_eq!(value.zone(), &Zone::Tzid("America/New_York".to_owned()));

        let value = CalendarValue::from_content_line(&line("DTSTART;VALUE=DATE:19970902")).unwrap();
        assert_eq!(value.precision(), Precision::Date);

        assert!(CalendarValue::from_content_line(&line("DTSTART;VALUE=DATE:19970902T090000")).is_err());
        assert!(CalendarValue::from_content_line(&line("DTSTART:20010229")).is_err());
    }

    #[test]
    fn writes_frame_parameters() {
        let value = CalendarValue::parse_with_tzid("19970902T090000", Some("Europe/Paris")).unwrap();
        assert_eq!(
            value.to_content_line("DTSTART").to_string(),
            "DTSTART;TZID=Europe/Paris:19970902T090000"
        );
        let value = CalendarValue::parse("19970902").unwrap();
        assert_eq!(
            value.to_content_line("DTSTART").to_string(),
            "DTSTART;VALUE=DATE:19970902"
        );
        let value = CalendarValue::parse("19970902T090000Z").unwrap();
        assert_eq!(value.to_content_line("DTSTAMP").to_string(), "DTSTAMP:19970902T090000Z");
    }

    #[test]
    fn date_lists_share_parameters() {
        let src = "EXDATE;TZID=Europe/Paris:19970902T090000,19970903T090000";
        let list = DateList::from_content_line(&line(src)).unwrap();
        assert_eq!(list.0.len(), 2);
        assert_eq!(list.to_content_line("EXDATE"), line(src));
    }

    #[test]
    fn converts_other_leaf_values() {
        let duration = Duration::from_content_line(&line("DURATION:PT1H30M")).unwrap();
        assert_eq!(duration.seconds(), 5400);
        assert_eq!(duration.to_content_line("DURATION").value, "PT1H30M");

        let offset = UtcOffset::from_content_line(&line("TZOFFSETTO:-0400")).unwrap();
        assert_eq!(offset.seconds(), -4 * 3600);

        let rule = RecurrenceRule::from_content_line(&line("RRULE:FREQ=WEEKLY;COUNT=10")).unwrap();
        assert_eq!(rule.count, Some(10));
        assert_eq!(rule.to_content_line("RRULE").value, "FREQ=WEEKLY;COUNT=10");
        assert!(RecurrenceRule::from_content_line(&line("RRULE:COUNT=10")).is_err());
    }
}
