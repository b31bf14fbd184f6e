// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Lexer for unfolded iCalendar content lines as defined in RFC 5545

use std::fmt::{self, Display};

use logos::Logos;

use crate::span::Span;

/// Tokenize one logical (already unfolded) content line.
#[must_use]
pub fn tokenize(src: &str) -> impl Iterator<Item = SpannedToken<'_>> {
    Token::lexer(src).spanned().map(|(tok, span)| match tok {
        Ok(tok) => SpannedToken(tok, Span::new(span.start, span.end)),
        Err(()) => SpannedToken(Token::Error, Span::new(span.start, span.end)),
    })
}

/// Token emitted by the iCalendar lexer
#[derive(PartialEq, Eq, Clone, Copy, Logos)]
pub enum Token<'a> {
    /// Double Quote ("), decimal codepoint 22
    #[token(r#"""#)]
    DQuote,

    /// Comma (,), decimal codepoint 44
    #[token(",")]
    Comma,

    /// Colon (:), decimal codepoint 58
    #[token(":")]
    Colon,

    /// Semicolon (;), decimal codepoint 59
    #[token(";")]
    Semicolon,

    /// Equal sign (=), decimal codepoint 61
    #[token("=")]
    Equal,

    /// ASCII symbols: sequences of printable ASCII characters
    #[regex(r#"[\t !#$%&'()*+./<>?@\[\\\]\^`\{|\}~]+"#)]
    Symbol(&'a str),

    /// ASCII word characters: 0-9, A-Z, a-z, underscore, hyphen
    #[regex("[0-9A-Za-z_-]+")]
    Word(&'a str),

    /// NON-US-ASCII  = UTF8-2 / UTF8-3 / UTF8-4
    ///    ; UTF8-2, UTF8-3, and UTF8-4 are defined in [RFC3629]
    #[regex(r#"[^\x00-\x7F]+"#)]
    UnicodeText(&'a str),

    /// Control characters other than HTAB
    Error,
}

impl Display for Token<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::DQuote => write!(f, "DQuote"),
            Self::Comma => write!(f, "Comma"),
            Self::Colon => write!(f, "Colon"),
            Self::Semicolon => write!(f, "Semicolon"),
            Self::Equal => write!(f, "Equal"),
            Self::Symbol(s) => write!(f, "Symbol({s})"),
            Self::Word(s) => write!(f, "Word({s})"),
            Self::UnicodeText(s) => write!(f, "UnicodeText({s})"),
            Self::Error => write!(f, "Error"),
        }
    }
}

impl fmt::Debug for Token<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        Display::fmt(self, f)
    }
}

/// A token with its associated span in the line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SpannedToken<'src>(pub Token<'src>, pub Span);

impl Display for SpannedToken<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}@{:?}", self.0, self.1)
    }
}

#[cfg(test)]
mod tests {
    #![expect(clippy::indexing_slicing)]

    use super::Token::*;
    use super::*;

    fn tokens(src: &str) -> Vec<Token<'_>> {
        tokenize(src).map(|SpannedToken(tok, _)| tok).collect()
    }

    #[test]
    fn tokenizes_property_line() {
        assert_eq!(
            tokens("DTSTART;TZID=America/New_York:20250101T090000"),
            [
                Word("DTSTART"),
                Semicolon,
                Word("TZID"),
                Equal,
                Word("America"),
                Symbol("/"),
                Word("New_York"),
                Colon,
                Word("20250101T090000"),
            ]
        );
    }

    #[test]
    fn tokenizes_quoted_parameter() {
        assert_eq!(
            tokens(r#"ATTENDEE;CN="Doe, J":mailto:j@x"#),
            [
                Word("ATTENDEE"),
                Semicolon,
                Word("CN"),
                Equal,
                DQuote,
                Word("Doe"),
                Comma,
                Symbol(" "),
                Word("J"),
                DQuote,
                Colon,
                Word("mailto"),
                Colon,
                Word("j"),
                Symbol("@"),
                Word("x"),
            ]
        );
    }

    #[test]
    fn tokenizes_unicode_and_tabs() {
        assert_eq!(
            tokens("X-ÄÖ:日本\t語"),
            [
                Word("X-"),
                UnicodeText("ÄÖ"),
                Colon,
                UnicodeText("日本"),
                Symbol("\t"),
                UnicodeText("語"),
            ]
        );
    }

    #[test]
    fn control_characters_are_errors() {
        for c in (0x00..0x20u8).filter(|c| *c != b'\t').chain([0x7F]) {
            let src = format!("A{}", char::from(c));
            assert_eq!(tokens(&src), [Word("A"), Error], "U+{c:02X}");
        }
    }

    #[test]
    fn reports_spans() {
        let spanned: Vec<_> = tokenize("A;B=1").collect();
        assert_eq!(spanned[0], SpannedToken(Word("A"), Span::new(0, 1)));
        assert_eq!(spanned[4], SpannedToken(Word("1"), Span::new(4, 5)));
    }
}
