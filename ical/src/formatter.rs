// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! iCalendar (RFC 5545) formatter module.
//!
//! This module writes calendars, components and content lines in the
//! RFC 5545 text format to any `std::io::Write` implementer, folding long
//! lines on the way.
//!
//! # Example
//!
//! ```
//! use calends_ical::{Calendar, formatter::format};
//!
//! let src = "BEGIN:VCALENDAR\r\nVERSION:2.0\r\nEND:VCALENDAR\r\n";
//! let (calendar, _) = Calendar::parse_str(src).unwrap();
//! assert_eq!(format(&calendar).unwrap(), src);
//! ```

use std::io::{self, Write};

use crate::calendar::Calendar;
use crate::keyword::{KW_BEGIN, KW_END};
use crate::syntax::ContentLine;

/// Convenience function to format a [`Calendar`] to a `String` (uses default options).
///
/// # Errors
///
/// Returns an error if writing to the internal buffer fails or if the output
/// contains invalid UTF-8 data.
pub fn format(calendar: &Calendar) -> io::Result<String> {
    FormatOptions::default().write_to_string(calendar)
}

/// Formatting options for the iCalendar formatter.
#[derive(Debug, Clone, Copy)]
pub struct FormatOptions {
    /// Maximum line length in octets before folding.
    /// - `None`: no line folding
    /// - `Some(n)`: fold lines longer than n octets
    ///
    /// Default: `Some(75)` for RFC 5545 compliance.
    pub folding: Option<usize>,

    /// Line folding style.
    ///
    /// Default: `FoldingStyle::Space` (CRLF + SPACE).
    pub folding_style: FoldingStyle,
}

impl Default for FormatOptions {
    fn default() -> Self {
        Self {
            folding: Some(75),
            folding_style: FoldingStyle::default(),
        }
    }
}

impl FormatOptions {
    /// Set the line folding option.
    #[must_use]
    pub fn folding(mut self, folding: Option<usize>) -> Self {
        self.folding = folding;
        self
    }

    /// Set the line folding style.
    #[must_use]
    pub const fn folding_style(mut self, style: FoldingStyle) -> Self {
        self.folding_style = style;
        self
    }

    /// Convenience method to write a [`Calendar`] to any `Write` implementer.
    ///
    /// # Errors
    /// Returns an error if writing fails.
    pub fn write(&self, calendar: &Calendar, w: &mut impl Write) -> io::Result<()> {
        let mut formatter = Formatter::new(w, *self);
        calendar.write(&mut formatter)
    }

    /// Convenience method to write a [`Calendar`] to a `String`.
    ///
    /// # Errors
    /// Returns an error if writing fails or if the output contains invalid UTF-8 data.
    pub fn write_to_string(&self, calendar: &Calendar) -> io::Result<String> {
        let mut buffer = Vec::new();
        self.write(calendar, &mut buffer)?;
        String::from_utf8(buffer).map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))
    }
}

/// Line folding style for RFC 5545 formatting.
///
/// RFC 5545 specifies that folded lines should start with CRLF followed by
/// a whitespace character (SPACE or TAB).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum FoldingStyle {
    /// CRLF + SPACE (RFC 5545 default)
    #[default]
    Space,
    /// CRLF + TAB
    Tab,
}

impl FoldingStyle {
    /// Get the folding sequence for this style.
    #[must_use]
    pub(crate) const fn as_str(self) -> &'static str {
        match self {
            Self::Space => "\r\n ",
            Self::Tab => "\r\n\t",
        }
    }
}

/// Fold one logical line into physical lines joined by the folding
/// sequence, without a trailing terminator.
///
/// No physical line exceeds the configured number of octets, the leading
/// whitespace of continuation lines included, and multi-byte characters
/// are never split. A limit too small for a single character is exceeded
/// by that character.
#[must_use]
pub fn fold_line(line: &str, options: FormatOptions) -> String {
    let Some(max) = options.folding else {
        return line.to_owned();
    };

    let mut out = String::with_capacity(line.len() + line.len() / max.max(1) * 3);
    let mut rest = line;
    let mut budget = max;
    while rest.len() > budget {
        let mut cut = budget;
        while cut > 0 && !rest.is_char_boundary(cut) {
            cut -= 1;
        }
        if cut == 0 {
            cut = rest.chars().next().map_or(rest.len(), char::len_utf8);
        }
        let (head, tail) = rest.split_at(cut);
        out.push_str(head);
        out.push_str(options.folding_style.as_str());
        rest = tail;
        // the continuation whitespace takes one octet
        budget = max.saturating_sub(1);
    }
    out.push_str(rest);
    out
}

/// iCalendar formatter that writes to any `Write` implementer.
///
/// # Example
///
/// ```
/// use calends_ical::formatter::{FormatOptions, Formatter};
/// use calends_ical::syntax::ContentLine;
///
/// let mut formatter = Formatter::new(Vec::new(), FormatOptions::default());
/// formatter.write_begin("VCALENDAR").unwrap();
/// formatter.write_line(&ContentLine::new("VERSION", "2.0")).unwrap();
/// formatter.write_end("VCALENDAR").unwrap();
/// assert_eq!(
///     formatter.into_writer(),
///     b"BEGIN:VCALENDAR\r\nVERSION:2.0\r\nEND:VCALENDAR\r\n"
/// );
/// ```
#[derive(Debug)]
pub struct Formatter<W: Write> {
    /// The underlying writer.
    writer: W,
    /// Formatting options.
    options: FormatOptions,
}

impl<W: Write> Formatter<W> {
    /// Create a new formatter with options.
    #[must_use]
    pub const fn new(writer: W, options: FormatOptions) -> Self {
        Self { writer, options }
    }

    /// Get a mutable reference to the underlying writer.
    #[must_use]
    pub fn writer_mut(&mut self) -> &mut W {
        &mut self.writer
    }

    /// Get a reference to the underlying writer.
    #[must_use]
    pub const fn writer(&self) -> &W {
        &self.writer
    }

    /// Consumes this formatter, returning the underlying writer.
    #[must_use]
    pub fn into_writer(self) -> W {
        self.writer
    }

    /// Write a `BEGIN:<name>` line.
    ///
    /// # Errors
    /// Returns an error if writing fails.
    pub fn write_begin(&mut self, name: &str) -> io::Result<()> {
        self.write_logical(&format!("{KW_BEGIN}:{name}"))
    }

    /// Write an `END:<name>` line.
    ///
    /// # Errors
    /// Returns an error if writing fails.
    pub fn write_end(&mut self, name: &str) -> io::Result<()> {
        self.write_logical(&format!("{KW_END}:{name}"))
    }

    /// Write a content line, folded.
    ///
    /// # Errors
    /// Returns an error if writing fails.
    pub fn write_line(&mut self, line: &ContentLine) -> io::Result<()> {
        self.write_logical(&line.to_string())
    }

    fn write_logical(&mut self, logical: &str) -> io::Result<()> {
        self.writer
            .write_all(fold_line(logical, self.options).as_bytes())?;
        self.writeln()
    }

    /// Write a CRLF line ending.
    fn writeln(&mut self) -> io::Result<()> {
        self.writer.write_all(b"\r\n")
    }

    /// Flush the underlying writer.
    ///
    /// # Errors
    /// Returns an error if flushing fails.
    pub fn flush(&mut self) -> io::Result<()> {
        self.writer.flush()
    }
}
