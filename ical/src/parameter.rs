// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Property parameters as defined in RFC 5545 Section 3.2 and the
//! parameters registered by later RFCs.

use std::{fmt, str::FromStr};

use crate::keyword::{
    KW_ALTREP, KW_CN, KW_CUTYPE, KW_DELEGATED_FROM, KW_DELEGATED_TO, KW_DERIVED, KW_DIR,
    KW_DISPLAY, KW_EMAIL, KW_ENCODING, KW_FBTYPE, KW_FEATURE, KW_FMTTYPE, KW_GAP, KW_LABEL,
    KW_LANGUAGE, KW_MEMBER, KW_ORDER, KW_PARTSTAT, KW_RANGE, KW_RELATED, KW_RELTYPE, KW_ROLE,
    KW_RSVP, KW_SCHEDULE_AGENT, KW_SCHEDULE_FORCE_SEND, KW_SCHEDULE_STATUS, KW_SCHEMA,
    KW_SENT_BY, KW_TZID, KW_VALUE,
};

/// A property parameter, `name=value *("," value)`.
///
/// Values are stored unquoted; quotes are added back on output only when a
/// value contains `:`, `;` or `,`.
#[derive(Debug, Clone)]
pub struct Parameter {
    /// Parameter name as written
    pub name: String,

    /// Parameter values (comma-separated)
    pub values: Vec<String>,
}

impl Parameter {
    /// Create a single-valued parameter.
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            values: vec![value.into()],
        }
    }

    /// Case-insensitive name comparison.
    #[must_use]
    pub fn is(&self, name: &str) -> bool {
        self.name.eq_ignore_ascii_case(name)
    }

    /// First value, if any.
    #[must_use]
    pub fn value(&self) -> Option<&str> {
        self.values.first().map(String::as_str)
    }
}

impl PartialEq for Parameter {
    fn eq(&self, other: &Self) -> bool {
        self.is(&other.name) && self.values == other.values
    }
}

impl Eq for Parameter {}

impl fmt::Display for Parameter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}=", self.name)?;
        for (i, value) in self.values.iter().enumerate() {
            if i > 0 {
                f.write_str(",")?;
            }
            // DQUOTE cannot appear inside a parameter value
            let value = value.replace('"', "'");
            if value.contains([':', ';', ',']) {
                write!(f, "\"{value}\"")?;
            } else {
                f.write_str(&value)?;
            }
        }
        Ok(())
    }
}

macro_rules! impl_parameter_kind_mapping {
    (
        $(#[$attr:meta])*
        enum $ty:ident {
            $(
                $variant:ident => $kw:ident
            ),+ $(,)?
        }
    ) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        $(#[$attr])*
        pub enum $ty {
            $(
                $variant,
            )+
        }

        impl $ty {
            /// Returns the name keyword for the parameter type
            #[must_use]
            pub const fn name(self) -> &'static str {
                match self {
                    $(
                        Self::$variant => $kw,
                    )+
                }
            }
        }

        impl FromStr for $ty {
            type Err = ();

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                // parameter names are case-insensitive
                match s.to_ascii_uppercase().as_str() {
                    $(
                        $kw => Ok(Self::$variant),
                    )+
                    _ => Err(()),
                }
            }
        }

        impl fmt::Display for $ty {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                self.name().fmt(f)
            }
        }
    };
}

impl_parameter_kind_mapping! {
    /// Kinds of registered iCalendar parameters
    #[expect(missing_docs)]
    enum ParameterKind {
        AlternateText       => KW_ALTREP,
        CommonName          => KW_CN,
        CalendarUserType    => KW_CUTYPE,
        Delegators          => KW_DELEGATED_FROM,
        Delegatees          => KW_DELEGATED_TO,
        Directory           => KW_DIR,
        Encoding            => KW_ENCODING,
        FormatType          => KW_FMTTYPE,
        FreeBusyType        => KW_FBTYPE,
        Language            => KW_LANGUAGE,
        GroupOrListMembership => KW_MEMBER,
        ParticipationStatus => KW_PARTSTAT,
        RecurrenceIdRange   => KW_RANGE,
        AlarmTriggerRelationship => KW_RELATED,
        RelationshipType    => KW_RELTYPE,
        ParticipationRole   => KW_ROLE,
        SendBy              => KW_SENT_BY,
        RsvpExpectation     => KW_RSVP,
        TimeZoneIdentifier  => KW_TZID,
        ValueType           => KW_VALUE,
        DisplayMode         => KW_DISPLAY,
        Email               => KW_EMAIL,
        Feature             => KW_FEATURE,
        Label               => KW_LABEL,
        Order               => KW_ORDER,
        Schema              => KW_SCHEMA,
        Derived             => KW_DERIVED,
        Gap                 => KW_GAP,
        ScheduleAgent       => KW_SCHEDULE_AGENT,
        ScheduleForceSend   => KW_SCHEDULE_FORCE_SEND,
        ScheduleStatus      => KW_SCHEDULE_STATUS,
    }
}
