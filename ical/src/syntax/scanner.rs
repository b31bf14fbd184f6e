// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Scanner for iCalendar content lines.
//!
//! Converts the token stream of one logical line into a [`ContentLine`].
//!
//! Per RFC 5545, a content line has the format:
//! ```text
//! contentline = name *(";" param) ":" value CRLF
//! param       = param-name "=" param-value *("," param-value)
//! ```
//!
//! # Example
//!
//! ```
//! use calends_ical::syntax::scan_content_line;
//!
//! let line = scan_content_line("DTSTART;TZID=America/New_York:20250101T090000", 1).unwrap();
//! assert_eq!(line.name, "DTSTART");
//! assert_eq!(line.parameter_value("tzid"), Some("America/New_York"));
//! assert_eq!(line.value, "20250101T090000");
//! ```

use std::fmt;
use std::iter::Peekable;

use crate::parameter::Parameter;
use crate::span::Span;
use crate::syntax::lexer::{SpannedToken, Token, tokenize};
use crate::value::text;

/// A scanned iCalendar content line.
#[derive(Debug, Clone)]
pub struct ContentLine {
    /// Property name as written (e.g., "DTSTART", "SUMMARY")
    pub name: String,

    /// Property parameters in source order
    pub parameters: Vec<Parameter>,

    /// Raw property value, escapes left in place
    pub value: String,

    /// Logical line number, 0 for lines built in memory
    pub line: usize,

    /// Span of the logical line in the input
    pub span: Span,
}

impl ContentLine {
    /// Create a content line without parameters.
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            parameters: Vec::new(),
            value: value.into(),
            line: 0,
            span: Span::default(),
        }
    }

    /// Append a single-valued parameter.
    #[must_use]
    pub fn with_parameter(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.parameters.push(Parameter::new(name, value));
        self
    }

    /// Case-insensitive name comparison.
    #[must_use]
    pub fn is(&self, name: &str) -> bool {
        self.name.eq_ignore_ascii_case(name)
    }

    /// First parameter with the given name.
    #[must_use]
    pub fn parameter(&self, name: &str) -> Option<&Parameter> {
        self.parameters.iter().find(|p| p.is(name))
    }

    /// First value of the first parameter with the given name.
    #[must_use]
    pub fn parameter_value(&self, name: &str) -> Option<&str> {
        self.parameter(name).and_then(Parameter::value)
    }

    /// The value with TEXT escapes resolved.
    #[must_use]
    pub fn text(&self) -> String {
        text::unescape(&self.value)
    }
}

/// Lines compare by content; position in the input is ignored.
impl PartialEq for ContentLine {
    fn eq(&self, other: &Self) -> bool {
        self.is(&other.name) && self.parameters == other.parameters && self.value == other.value
    }
}

impl Eq for ContentLine {}

/// Writes the unfolded logical line.
impl fmt::Display for ContentLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)?;
        for param in &self.parameters {
            write!(f, ";{param}")?;
        }
        write!(f, ":{}", self.value)
    }
}

/// Errors that can occur when scanning a content line.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ContentLineError {
    /// Missing colon separator.
    ///
    /// Example: `PROPNAME value` instead of `PROPNAME:value`
    #[error("missing colon in property")]
    MissingColon {
        /// Span where colon was expected
        expected_at: Span,
        /// Description of what was found instead
        found: Option<String>,
    },

    /// Empty content line.
    #[error("empty content line")]
    EmptyLine {
        /// Span of the empty line
        span: Span,
    },

    /// Property name missing before parameters or value.
    #[error("empty property name")]
    EmptyName {
        /// Span where the name was expected
        span: Span,
    },

    /// Invalid parameter syntax.
    #[error("{kind}")]
    InvalidParameter {
        /// Span of the invalid parameter
        span: Span,
        /// Specific error details
        kind: ParameterErrorKind,
    },

    /// Control character in the line.
    #[error("control character U+{code:04X} in content line")]
    ControlCharacter {
        /// Span of the character
        span: Span,
        /// Offending code point
        code: u32,
    },
}

impl ContentLineError {
    /// Span of the problem, relative to the start of the logical line.
    #[must_use]
    pub const fn span(&self) -> Span {
        match self {
            Self::MissingColon { expected_at, .. } => *expected_at,
            Self::EmptyLine { span }
            | Self::EmptyName { span }
            | Self::InvalidParameter { span, .. }
            | Self::ControlCharacter { span, .. } => *span,
        }
    }
}

/// Specific parameter parsing errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum ParameterErrorKind {
    /// Missing equals sign.
    ///
    /// Example: `TZID America/New_York`
    #[error("missing equals in parameter")]
    MissingEquals,

    /// Empty parameter name.
    ///
    /// Example: `;=value`
    #[error("empty parameter name")]
    EmptyName,

    /// Unterminated quoted string.
    ///
    /// Example: `PARAM="unclosed value`
    #[error("unterminated quoted string")]
    UnterminatedQuote,

    /// Text after a closing quote.
    ///
    /// Example: `CN="Doe"John`
    #[error("unexpected text after quoted string")]
    TrailingText,
}

/// Scan one logical line into a [`ContentLine`].
///
/// `line` is recorded on the result and is otherwise unused.
///
/// # Errors
///
/// Returns a [`ContentLineError`] when the line does not follow the
/// content-line grammar or contains control characters.
pub fn scan_content_line(src: &str, line: usize) -> Result<ContentLine, ContentLineError> {
    if src.is_empty() {
        return Err(ContentLineError::EmptyLine {
            span: Span::new(0, 0),
        });
    }

    let mut tokens = tokenize(src).peekable();

    let (name, name_span) = scan_name(src, &mut tokens);
    if name.is_empty() {
        return Err(ContentLineError::EmptyName { span: name_span });
    }

    let mut parameters = Vec::new();
    let value_start = loop {
        match tokens.next() {
            Some(SpannedToken(Token::Semicolon, span)) => {
                parameters.push(scan_parameter(src, span, &mut tokens)?);
            }
            Some(SpannedToken(Token::Colon, span)) => break span.end,
            Some(SpannedToken(Token::Error, span)) => return Err(control_character(src, span)),
            Some(SpannedToken(tok, span)) => {
                return Err(ContentLineError::MissingColon {
                    expected_at: span,
                    found: Some(tok.to_string()),
                });
            }
            None => {
                return Err(ContentLineError::MissingColon {
                    expected_at: Span::new(src.len(), src.len()),
                    found: None,
                });
            }
        }
    };

    let value = src.get(value_start..).unwrap_or_default();
    if let Some((i, c)) = value
        .char_indices()
        .find(|(_, c)| c.is_control() && *c != '\t')
    {
        let at = value_start + i;
        return Err(ContentLineError::ControlCharacter {
            span: Span::new(at, at + c.len_utf8()),
            code: u32::from(c),
        });
    }

    Ok(ContentLine {
        name: name.to_owned(),
        parameters,
        value: value.to_owned(),
        line,
        span: Span::new(0, src.len()),
    })
}

/// Scan a name: a run of word and non-ASCII tokens.
fn scan_name<'src, I>(src: &'src str, tokens: &mut Peekable<I>) -> (&'src str, Span)
where
    I: Iterator<Item = SpannedToken<'src>>,
{
    let start = tokens.peek().map_or(src.len(), |SpannedToken(_, span)| span.start);
    let mut end = start;
    while let Some(SpannedToken(Token::Word(_) | Token::UnicodeText(_), span)) = tokens.peek() {
        end = span.end;
        tokens.next();
    }
    (src.get(start..end).unwrap_or_default(), Span::new(start, end))
}

fn scan_parameter<'src, I>(
    src: &'src str,
    semicolon: Span,
    tokens: &mut Peekable<I>,
) -> Result<Parameter, ContentLineError>
where
    I: Iterator<Item = SpannedToken<'src>>,
{
    let (name, name_span) = scan_name(src, tokens);
    if name.is_empty() {
        return Err(ContentLineError::InvalidParameter {
            span: Span::new(semicolon.start, name_span.end),
            kind: ParameterErrorKind::EmptyName,
        });
    }

    match tokens.next() {
        Some(SpannedToken(Token::Equal, _)) => {}
        Some(SpannedToken(Token::Error, span)) => return Err(control_character(src, span)),
        other => {
            let end = other.map_or(src.len(), |SpannedToken(_, span)| span.end);
            return Err(ContentLineError::InvalidParameter {
                span: Span::new(semicolon.start, end),
                kind: ParameterErrorKind::MissingEquals,
            });
        }
    }

    let mut values = Vec::new();
    loop {
        let value = match tokens.peek() {
            Some(SpannedToken(Token::DQuote, open)) => {
                let open = *open;
                tokens.next();
                scan_quoted(src, open, tokens)?
            }
            _ => scan_unquoted(src, tokens)?,
        };
        values.push(value);

        match tokens.peek() {
            Some(SpannedToken(Token::Comma, _)) => {
                tokens.next();
            }
            Some(SpannedToken(Token::Semicolon | Token::Colon, _)) | None => break,
            Some(SpannedToken(_, span)) => {
                return Err(ContentLineError::InvalidParameter {
                    span: Span::new(semicolon.start, span.end),
                    kind: ParameterErrorKind::TrailingText,
                });
            }
        }
    }

    Ok(Parameter {
        name: name.to_owned(),
        values,
    })
}

fn scan_quoted<'src, I>(
    src: &'src str,
    open: Span,
    tokens: &mut Peekable<I>,
) -> Result<String, ContentLineError>
where
    I: Iterator<Item = SpannedToken<'src>>,
{
    for SpannedToken(tok, span) in tokens.by_ref() {
        match tok {
            Token::DQuote => {
                return Ok(src.get(open.end..span.start).unwrap_or_default().to_owned());
            }
            Token::Error => return Err(control_character(src, span)),
            _ => {}
        }
    }
    Err(ContentLineError::InvalidParameter {
        span: Span::new(open.start, src.len()),
        kind: ParameterErrorKind::UnterminatedQuote,
    })
}

fn scan_unquoted<'src, I>(
    src: &'src str,
    tokens: &mut Peekable<I>,
) -> Result<String, ContentLineError>
where
    I: Iterator<Item = SpannedToken<'src>>,
{
    let Some(SpannedToken(_, first)) = tokens.peek() else {
        return Ok(String::new());
    };
    let start = first.start;
    let mut end = start;
    loop {
        match tokens.peek() {
            Some(SpannedToken(
                Token::Comma | Token::Semicolon | Token::Colon | Token::DQuote,
                _,
            ))
            | None => break,
            Some(SpannedToken(Token::Error, span)) => return Err(control_character(src, *span)),
            Some(SpannedToken(_, span)) => {
                end = span.end;
                tokens.next();
            }
        }
    }
    Ok(src.get(start..end).unwrap_or_default().to_owned())
}

fn control_character(src: &str, span: Span) -> ContentLineError {
    let code = src
        .get(span.start..)
        .and_then(|s| s.chars().next())
        .map_or(0, u32::from);
    ContentLineError::ControlCharacter { span, code }
}
