// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Unfolding of physical lines into logical content lines (RFC 5545 Section 3.1).
//!
//! A logical line is a physical line followed by every physical line that
//! starts with exactly one SPACE or HTAB; that leading whitespace is removed
//! and the pieces are concatenated. CRLF is the canonical terminator, a bare
//! LF is tolerated.

use std::io::{self, BufRead};

use crate::span::Span;

/// One unfolded content line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogicalLine {
    /// Unfolded text without terminator
    pub text: String,

    /// 1-based number of the first physical line
    pub line: usize,

    /// Byte span covering all physical lines, terminators excluded
    pub span: Span,

    /// Whether the last physical line ended with a line feed
    pub terminated: bool,

    /// Whether invalid UTF-8 was replaced while decoding
    pub lossy: bool,
}

#[derive(Debug)]
struct PhysicalLine {
    text: String,
    line: usize,
    span: Span,
    terminated: bool,
    lossy: bool,
}

impl PhysicalLine {
    fn is_continuation(&self) -> bool {
        self.text.starts_with([' ', '\t'])
    }
}

impl From<PhysicalLine> for LogicalLine {
    fn from(physical: PhysicalLine) -> Self {
        Self {
            text: physical.text,
            line: physical.line,
            span: physical.span,
            terminated: physical.terminated,
            lossy: physical.lossy,
        }
    }
}

/// Lazy iterator of logical lines over a buffered reader.
#[derive(Debug)]
pub struct Unfolder<R> {
    reader: R,
    pending: Option<PhysicalLine>,
    line: usize,
    offset: usize,
    buf: Vec<u8>,
}

impl<R: BufRead> Unfolder<R> {
    /// Create an unfolder reading from `reader`.
    pub const fn new(reader: R) -> Self {
        Self {
            reader,
            pending: None,
            line: 0,
            offset: 0,
            buf: Vec::new(),
        }
    }

    fn read_physical(&mut self) -> io::Result<Option<PhysicalLine>> {
        self.buf.clear();
        let n = self.reader.read_until(b'\n', &mut self.buf)?;
        if n == 0 {
            return Ok(None);
        }

        let start = self.offset;
        self.offset += n;
        self.line += 1;

        let terminated = self.buf.last() == Some(&b'\n');
        if terminated {
            self.buf.pop();
            if self.buf.last() == Some(&b'\r') {
                self.buf.pop();
            }
        }

        let span = Span::new(start, start + self.buf.len());
        let (text, lossy) = match String::from_utf8(std::mem::take(&mut self.buf)) {
            Ok(text) => (text, false),
            Err(err) => (String::from_utf8_lossy(err.as_bytes()).into_owned(), true),
        };

        Ok(Some(PhysicalLine {
            text,
            line: self.line,
            span,
            terminated,
            lossy,
        }))
    }
}

impl<R: BufRead> Iterator for Unfolder<R> {
    type Item = io::Result<LogicalLine>;

    fn next(&mut self) -> Option<Self::Item> {
        let first = match self.pending.take() {
            Some(physical) => physical,
            None => match self.read_physical() {
                Ok(Some(physical)) => physical,
                Ok(None) => return None,
                Err(err) => return Some(Err(err)),
            },
        };

        let mut logical = LogicalLine::from(first);
        loop {
            match self.read_physical() {
                Ok(Some(physical)) if physical.is_continuation() => {
                    // drop exactly one leading whitespace character
                    logical.text.push_str(physical.text.get(1..).unwrap_or_default());
                    logical.span.end = physical.span.end;
                    logical.terminated = physical.terminated;
                    logical.lossy |= physical.lossy;
                }
                Ok(Some(physical)) => {
                    self.pending = Some(physical);
                    break;
                }
                Ok(None) => break,
                Err(err) => return Some(Err(err)),
            }
        }
        Some(Ok(logical))
    }
}

/// Unfold an in-memory string.
///
/// Reading from a byte slice cannot fail, so this yields plain lines.
pub fn unfold_str(src: &str) -> impl Iterator<Item = LogicalLine> + '_ {
    Unfolder::new(src.as_bytes()).map_while(Result::ok)
}
