// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Keywords defined in iCalendar RFC 5545 and its extensions
//! (RFC 2445, RFC 5546, RFC 6638, RFC 7953, RFC 7986, RFC 9073, RFC 9074).

#![allow(missing_docs)]

pub const KW_BEGIN: &str = "BEGIN";
pub const KW_END: &str = "END";

// Section 3.4 - Calendar Object
pub const KW_VCALENDAR: &str = "VCALENDAR";

// Section 3.2 - Property Parameters
pub const KW_ALTREP: &str = "ALTREP";
pub const KW_CN: &str = "CN";
pub const KW_CUTYPE: &str = "CUTYPE";
pub const KW_DELEGATED_FROM: &str = "DELEGATED-FROM";
pub const KW_DELEGATED_TO: &str = "DELEGATED-TO";
pub const KW_DIR: &str = "DIR";
pub const KW_ENCODING: &str = "ENCODING";
pub const KW_FBTYPE: &str = "FBTYPE";
pub const KW_FMTTYPE: &str = "FMTTYPE";
pub const KW_LANGUAGE: &str = "LANGUAGE";
pub const KW_MEMBER: &str = "MEMBER";
pub const KW_PARTSTAT: &str = "PARTSTAT";
pub const KW_RANGE: &str = "RANGE";
pub const KW_RELATED: &str = "RELATED";
pub const KW_RELTYPE: &str = "RELTYPE";
pub const KW_ROLE: &str = "ROLE";
pub const KW_RSVP: &str = "RSVP";
pub const KW_SENT_BY: &str = "SENT-BY";
pub const KW_TZID: &str = "TZID";
pub const KW_VALUE: &str = "VALUE";
// RFC 7986
pub const KW_DISPLAY: &str = "DISPLAY";
pub const KW_EMAIL: &str = "EMAIL";
pub const KW_FEATURE: &str = "FEATURE";
pub const KW_LABEL: &str = "LABEL";
// RFC 9073
pub const KW_ORDER: &str = "ORDER";
pub const KW_SCHEMA: &str = "SCHEMA";
pub const KW_DERIVED: &str = "DERIVED";
// RFC 9074
pub const KW_GAP: &str = "GAP";
// RFC 6638 (scheduling extensions to CalDAV)
pub const KW_SCHEDULE_AGENT: &str = "SCHEDULE-AGENT";
pub const KW_SCHEDULE_FORCE_SEND: &str = "SCHEDULE-FORCE-SEND";
pub const KW_SCHEDULE_STATUS: &str = "SCHEDULE-STATUS";

// Section 3.3 - Property Value Data Types
pub const KW_DATE: &str = "DATE";
pub const KW_DATETIME: &str = "DATE-TIME";
pub const KW_PERIOD: &str = "PERIOD";

// Section 3.7 - Calendar Properties
pub const KW_CALSCALE: &str = "CALSCALE";
pub const KW_METHOD: &str = "METHOD";
pub const KW_PRODID: &str = "PRODID";
pub const KW_VERSION: &str = "VERSION";

// Section 3.8.1 - Descriptive Component Properties
pub const KW_ATTACH: &str = "ATTACH";
pub const KW_CATEGORIES: &str = "CATEGORIES";
pub const KW_CLASS: &str = "CLASS";
pub const KW_COMMENT: &str = "COMMENT";
pub const KW_DESCRIPTION: &str = "DESCRIPTION";
pub const KW_GEO: &str = "GEO";
pub const KW_LOCATION: &str = "LOCATION";
pub const KW_PERCENT_COMPLETE: &str = "PERCENT-COMPLETE";
pub const KW_PRIORITY: &str = "PRIORITY";
pub const KW_RESOURCES: &str = "RESOURCES";
pub const KW_STATUS: &str = "STATUS";
pub const KW_SUMMARY: &str = "SUMMARY";

// Section 3.8.2 - Date and Time Component Properties
pub const KW_COMPLETED: &str = "COMPLETED";
pub const KW_DTSTART: &str = "DTSTART";
pub const KW_DTEND: &str = "DTEND";
pub const KW_DURATION: &str = "DURATION";
pub const KW_DUE: &str = "DUE";
pub const KW_FREEBUSY: &str = "FREEBUSY";
pub const KW_TRANSP: &str = "TRANSP";

// Section 3.8.3 - Time Zone Component Properties
pub const KW_TZNAME: &str = "TZNAME";
pub const KW_TZOFFSETFROM: &str = "TZOFFSETFROM";
pub const KW_TZOFFSETTO: &str = "TZOFFSETTO";
pub const KW_TZURL: &str = "TZURL";

// Section 3.8.4 - Relationship Component Properties
pub const KW_ATTENDEE: &str = "ATTENDEE";
pub const KW_CONTACT: &str = "CONTACT";
pub const KW_ORGANIZER: &str = "ORGANIZER";
pub const KW_RECURRENCE_ID: &str = "RECURRENCE-ID";
pub const KW_RELATED_TO: &str = "RELATED-TO";
pub const KW_URL: &str = "URL";
pub const KW_UID: &str = "UID";

// Section 3.8.5 - Recurrence Component Properties
pub const KW_EXDATE: &str = "EXDATE";
pub const KW_EXRULE: &str = "EXRULE"; // RFC 2445
pub const KW_RDATE: &str = "RDATE";
pub const KW_RRULE: &str = "RRULE";

// Section 3.8.6 - Alarm Component Properties
pub const KW_ACTION: &str = "ACTION";
pub const KW_REPEAT: &str = "REPEAT";
pub const KW_TRIGGER: &str = "TRIGGER";

// Section 3.8.7 - Change Management Component Properties
pub const KW_CREATED: &str = "CREATED";
pub const KW_DTSTAMP: &str = "DTSTAMP";
pub const KW_LAST_MODIFIED: &str = "LAST-MODIFIED";
pub const KW_SEQUENCE: &str = "SEQUENCE";

// Section 3.8.8 - Miscellaneous Component Properties
pub const KW_REQUEST_STATUS: &str = "REQUEST-STATUS";

// RFC 7986 - New Properties for iCalendar
pub const KW_COLOR: &str = "COLOR";
pub const KW_CONFERENCE: &str = "CONFERENCE";
pub const KW_IMAGE: &str = "IMAGE";
pub const KW_NAME: &str = "NAME";
pub const KW_REFRESH_INTERVAL: &str = "REFRESH-INTERVAL";
pub const KW_SOURCE: &str = "SOURCE";

// RFC 7953 - Calendar Availability
pub const KW_BUSYTYPE: &str = "BUSYTYPE";

// RFC 9073 - Event Publishing Extensions
pub const KW_CALENDAR_ADDRESS: &str = "CALENDAR-ADDRESS";
pub const KW_LOCATION_TYPE: &str = "LOCATION-TYPE";
pub const KW_PARTICIPANT_TYPE: &str = "PARTICIPANT-TYPE";
pub const KW_RESOURCE_TYPE: &str = "RESOURCE-TYPE";
pub const KW_STRUCTURED_DATA: &str = "STRUCTURED-DATA";
pub const KW_STYLED_DESCRIPTION: &str = "STYLED-DESCRIPTION";

// RFC 9074 - VALARM Extensions
pub const KW_ACKNOWLEDGED: &str = "ACKNOWLEDGED";
pub const KW_PROXIMITY: &str = "PROXIMITY";

// Section 3.3.10 - Recurrence Rule
pub const KW_RRULE_FREQ: &str = "FREQ";
pub const KW_RRULE_UNTIL: &str = "UNTIL";
pub const KW_RRULE_COUNT: &str = "COUNT";
pub const KW_RRULE_INTERVAL: &str = "INTERVAL";
pub const KW_RRULE_BYSECOND: &str = "BYSECOND";
pub const KW_RRULE_BYMINUTE: &str = "BYMINUTE";
pub const KW_RRULE_BYHOUR: &str = "BYHOUR";
pub const KW_RRULE_BYDAY: &str = "BYDAY";
pub const KW_RRULE_BYMONTHDAY: &str = "BYMONTHDAY";
pub const KW_RRULE_BYYEARDAY: &str = "BYYEARDAY";
pub const KW_RRULE_BYWEEKNO: &str = "BYWEEKNO";
pub const KW_RRULE_BYMONTH: &str = "BYMONTH";
pub const KW_RRULE_BYSETPOS: &str = "BYSETPOS";
pub const KW_RRULE_WKST: &str = "WKST";

/// Outcome of looking a name up in one of the keyword catalogs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Recognition<K> {
    /// A registered name
    Known(K),
    /// An experimental `X-` name
    Extension,
    /// Neither registered nor experimental
    Unknown,
}

impl<K: std::str::FromStr> Recognition<K> {
    /// Look `name` up, falling back to the `X-` test.
    pub fn of(name: &str) -> Self {
        match name.parse() {
            Ok(kind) => Self::Known(kind),
            Err(_) if is_x_name(name) => Self::Extension,
            Err(_) => Self::Unknown,
        }
    }
}

/// Returns `true` for experimental `X-` names, compared case-insensitively.
#[must_use]
pub fn is_x_name(name: &str) -> bool {
    name.get(..2)
        .is_some_and(|prefix| prefix.eq_ignore_ascii_case("X-"))
}
