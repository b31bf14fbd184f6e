// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Component kinds and the rules each kind is validated against.

use crate::keyword::{
    KW_ACTION, KW_CALENDAR_ADDRESS, KW_DTEND, KW_DTSTAMP, KW_DTSTART, KW_DURATION, KW_NAME,
    KW_PARTICIPANT_TYPE, KW_TZID, KW_TZOFFSETFROM, KW_TZOFFSETTO, KW_UID,
};

/// Kind of a registered iCalendar component.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    strum::EnumString,
    strum::Display,
    strum::IntoStaticStr,
    strum::EnumIter,
)]
#[strum(ascii_case_insensitive)]
#[expect(missing_docs)]
pub enum ComponentKind {
    #[strum(to_string = "VEVENT")]
    Event,
    #[strum(to_string = "VTODO")]
    Todo,
    #[strum(to_string = "VJOURNAL")]
    Journal,
    #[strum(to_string = "VFREEBUSY")]
    FreeBusy,
    #[strum(to_string = "VTIMEZONE")]
    TimeZone,
    #[strum(to_string = "VALARM")]
    Alarm,
    #[strum(to_string = "VAVAILABILITY")]
    Availability,
    #[strum(to_string = "AVAILABLE")]
    Available,
    #[strum(to_string = "VLOCATION")]
    Location,
    #[strum(to_string = "VRESOURCE")]
    Resource,
    #[strum(to_string = "PARTICIPANT")]
    Participant,
    #[strum(to_string = "STANDARD")]
    Standard,
    #[strum(to_string = "DAYLIGHT")]
    Daylight,
}

/// A property requirement of a component kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Requirement {
    /// Without it the component is dropped in every mode.
    Critical(&'static str),
    /// Without it the component is invalid in strict mode.
    Required(&'static str),
    /// At least one of the names, enforced like [`Requirement::Required`].
    OneOf(&'static [&'static str]),
    /// Filled in with the given value when absent.
    Defaulted(&'static str, &'static str),
}

/// Validation rules of one component kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KindRules {
    /// Property requirements, checked in order
    pub requirements: &'static [Requirement],
    /// Kinds that may be nested directly inside
    pub children: &'static [ComponentKind],
    /// Whether the kind may appear directly inside VCALENDAR
    pub top_level: bool,
}

use Requirement::{Critical, Defaulted, OneOf, Required};

const SCHEDULING_CHILDREN: &[ComponentKind] = &[
    ComponentKind::Alarm,
    ComponentKind::Participant,
    ComponentKind::Location,
    ComponentKind::Resource,
];
const PUBLISHING_CHILDREN: &[ComponentKind] = &[
    ComponentKind::Participant,
    ComponentKind::Location,
    ComponentKind::Resource,
];

const EVENT: KindRules = KindRules {
    requirements: &[Critical(KW_UID), Critical(KW_DTSTART), Required(KW_DTSTAMP)],
    children: SCHEDULING_CHILDREN,
    top_level: true,
};

const TODO: KindRules = KindRules {
    requirements: &[Critical(KW_UID), Required(KW_DTSTAMP)],
    children: SCHEDULING_CHILDREN,
    top_level: true,
};

const JOURNAL: KindRules = KindRules {
    requirements: &[Critical(KW_UID), Required(KW_DTSTAMP)],
    children: PUBLISHING_CHILDREN,
    top_level: true,
};

const FREE_BUSY: KindRules = KindRules {
    requirements: &[Critical(KW_DTSTART), OneOf(&[KW_DTEND, KW_DURATION])],
    children: PUBLISHING_CHILDREN,
    top_level: true,
};

const TIME_ZONE: KindRules = KindRules {
    requirements: &[Defaulted(KW_TZID, "UTC")],
    children: &[ComponentKind::Standard, ComponentKind::Daylight],
    top_level: true,
};

const ALARM: KindRules = KindRules {
    requirements: &[Critical(KW_ACTION)],
    children: &[],
    top_level: false,
};

const AVAILABILITY: KindRules = KindRules {
    requirements: &[Critical(KW_UID), Required(KW_DTSTAMP)],
    children: &[
        ComponentKind::Available,
        ComponentKind::Participant,
        ComponentKind::Location,
        ComponentKind::Resource,
    ],
    top_level: true,
};

const AVAILABLE: KindRules = KindRules {
    requirements: &[
        Critical(KW_UID),
        Required(KW_DTSTAMP),
        Critical(KW_DTSTART),
        OneOf(&[KW_DTEND, KW_DURATION]),
    ],
    children: PUBLISHING_CHILDREN,
    top_level: false,
};

const LOCATION_OR_RESOURCE: KindRules = KindRules {
    requirements: &[Critical(KW_UID), Required(KW_NAME)],
    children: &[],
    top_level: false,
};

const PARTICIPANT: KindRules = KindRules {
    requirements: &[Required(KW_PARTICIPANT_TYPE), Required(KW_CALENDAR_ADDRESS)],
    children: &[ComponentKind::Location, ComponentKind::Resource],
    top_level: false,
};

const OBSERVANCE: KindRules = KindRules {
    requirements: &[
        Critical(KW_DTSTART),
        Required(KW_TZOFFSETFROM),
        Required(KW_TZOFFSETTO),
    ],
    children: &[],
    top_level: false,
};

impl ComponentKind {
    /// Validation rules of this kind.
    #[must_use]
    pub const fn rules(self) -> &'static KindRules {
        match self {
            Self::Event => &EVENT,
            Self::Todo => &TODO,
            Self::Journal => &JOURNAL,
            Self::FreeBusy => &FREE_BUSY,
            Self::TimeZone => &TIME_ZONE,
            Self::Alarm => &ALARM,
            Self::Availability => &AVAILABILITY,
            Self::Available => &AVAILABLE,
            Self::Location | Self::Resource => &LOCATION_OR_RESOURCE,
            Self::Participant => &PARTICIPANT,
            Self::Standard | Self::Daylight => &OBSERVANCE,
        }
    }

    /// Returns the name keyword of the component.
    #[must_use]
    pub fn name(self) -> &'static str {
        self.into()
    }

    /// Whether `child` may be nested directly inside this kind.
    #[must_use]
    pub fn allows_child(self, child: Self) -> bool {
        self.rules().children.contains(&child)
    }

    /// Whether the kind may appear directly inside VCALENDAR.
    #[must_use]
    pub const fn is_top_level(self) -> bool {
        self.rules().top_level
    }
}
