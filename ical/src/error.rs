// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Diagnostics recorded while parsing a calendar stream.

use crate::span::Span;

/// Category of a recorded diagnostic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, strum::Display, strum::IntoStaticStr)]
#[non_exhaustive]
pub enum ErrorKind {
    /// The line could not be lexed (control characters, invalid UTF-8,
    /// missing line terminator).
    #[strum(to_string = "malformed line")]
    MalformedLine,

    /// The line does not follow `name *(";" param) ":" value`.
    #[strum(to_string = "invalid property format")]
    InvalidPropertyFormat,

    /// A date, time, duration or recurrence field is out of range or
    /// malformed.
    #[strum(to_string = "bogus calendar value")]
    BogusCalendarValue,

    /// Property name that is neither registered nor an `X-` name.
    #[strum(to_string = "unknown property")]
    UnknownProperty,

    /// Parameter name that is neither registered nor an `X-` name.
    #[strum(to_string = "unknown parameter")]
    UnknownParameter,

    /// Component name that is neither registered nor an `X-` name.
    #[strum(to_string = "unknown component")]
    UnknownComponent,

    /// A component lacks a property its kind requires.
    #[strum(to_string = "missing required property")]
    MissingRequiredProperty,

    /// Unbalanced `BEGIN`/`END`, disallowed nesting, or content outside
    /// `VCALENDAR`.
    #[strum(to_string = "mismatched nesting")]
    MismatchedNesting,

    /// Recurrence expansion hit its iteration limit and was truncated.
    #[strum(to_string = "recurrence iteration limit exceeded")]
    RecurrenceIterationLimitExceeded,
}

/// How a diagnostic affected the parse result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, strum::Display)]
pub enum Severity {
    /// Something was dropped or invalidated.
    #[strum(to_string = "error")]
    Error,

    /// Tolerated; the data was kept.
    #[strum(to_string = "warning")]
    Warning,
}

/// A diagnostic with the logical line it was found on.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("line {line}: {kind}: {message}")]
pub struct ParseError {
    /// Category of the problem
    pub kind: ErrorKind,

    /// Whether the problem invalidated data or was only noted
    pub severity: Severity,

    /// 1-based number of the first physical line of the offending logical line
    pub line: usize,

    /// Human readable description
    pub message: String,

    /// The offending raw text, unfolded
    pub raw: String,

    /// Byte span of the offending logical line in the input
    pub span: Span,
}

impl ParseError {
    /// Create an error-severity diagnostic.
    pub fn new(kind: ErrorKind, line: usize, message: impl Into<String>) -> Self {
        Self {
            kind,
            severity: Severity::Error,
            line,
            message: message.into(),
            raw: String::new(),
            span: Span::default(),
        }
    }

    /// Attach the offending raw text and its span.
    #[must_use]
    pub fn with_source(mut self, raw: impl Into<String>, span: Span) -> Self {
        self.raw = raw.into();
        self.span = span;
        self
    }

    /// Downgrade to a warning.
    #[must_use]
    pub fn into_warning(mut self) -> Self {
        self.severity = Severity::Warning;
        self
    }

    /// Returns `true` for error severity.
    #[must_use]
    pub fn is_error(&self) -> bool {
        self.severity == Severity::Error
    }
}
