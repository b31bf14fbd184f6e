// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Incremental construction of components from buffered content lines.

use crate::component::{Component, ComponentKind, ExtensionBlock, Requirement};
use crate::error::{ErrorKind, ParseError};
use crate::keyword::Recognition;
use crate::parameter::ParameterKind;
use crate::parser::ParseMode;
use crate::property::{DateList, LeafProperty, PropertyKind, ValueKind};
use crate::span::Span;
use crate::syntax::ContentLine;
use crate::value::{CalendarValue, Duration, RecurrenceRule, UtcOffset};

/// Result of checking one property line.
#[derive(Debug)]
pub(crate) struct Checked {
    /// Whether the line is kept
    pub keep: bool,
    /// Diagnostics about the line
    pub diagnostics: Vec<ParseError>,
}

/// Check the name, parameters and value of a property line.
///
/// Malformed values always drop the line. Unknown names are errors in
/// strict mode and warnings in loose mode, where the line is kept. A
/// recurrence rule that parsed with warnings is rewritten without the
/// dropped parts.
pub(crate) fn check_property(line: &mut ContentLine, mode: ParseMode) -> Checked {
    let mut diagnostics = Vec::new();
    let diagnostic = |kind, message: String| {
        let err = ParseError::new(kind, line.line, message).with_source(line.to_string(), line.span);
        match mode {
            ParseMode::Strict => err,
            ParseMode::Loose => err.into_warning(),
        }
    };

    let mut keep = true;
    let mut rewritten = None;
    match Recognition::<PropertyKind>::of(&line.name) {
        Recognition::Known(kind) => {
            match check_value(kind.value_kind_of(line), line, mode, &mut diagnostics) {
                Ok(value) => rewritten = value,
                Err(reason) => {
                    diagnostics.push(
                        ParseError::new(
                            ErrorKind::BogusCalendarValue,
                            line.line,
                            format!("{}: {reason}", kind.name()),
                        )
                        .with_source(line.to_string(), line.span),
                    );
                    keep = false;
                }
            }
        }
        Recognition::Extension => {}
        Recognition::Unknown => {
            diagnostics.push(diagnostic(
                ErrorKind::UnknownProperty,
                format!("unknown property {}", line.name),
            ));
            keep = mode == ParseMode::Loose;
        }
    }

    for param in &line.parameters {
        if Recognition::<ParameterKind>::of(&param.name) == Recognition::Unknown {
            diagnostics.push(diagnostic(
                ErrorKind::UnknownParameter,
                format!("unknown parameter {} on {}", param.name, line.name),
            ));
        }
    }

    if let Some(value) = rewritten {
        line.value = value;
    }
    Checked { keep, diagnostics }
}

fn check_value(
    kind: ValueKind,
    line: &ContentLine,
    mode: ParseMode,
    diagnostics: &mut Vec<ParseError>,
) -> Result<Option<String>, String> {
    match kind {
        ValueKind::Text => Ok(None),
        ValueKind::DateTime => CalendarValue::from_content_line(line)
            .map(|_| None)
            .map_err(|e| e.to_string()),
        ValueKind::DateList => DateList::from_content_line(line)
            .map(|_| None)
            .map_err(|e| e.to_string()),
        ValueKind::Duration => Duration::from_content_line(line)
            .map(|_| None)
            .map_err(|e| e.to_string()),
        ValueKind::UtcOffset => UtcOffset::from_content_line(line)
            .map(|_| None)
            .map_err(|e| e.to_string()),
        ValueKind::Recur => {
            let (rule, warnings) =
                RecurrenceRule::parse(&line.value, mode).map_err(|e| e.to_string())?;
            if warnings.is_empty() {
                return Ok(None);
            }
            diagnostics.extend(warnings.into_iter().map(|w| {
                ParseError::new(ErrorKind::BogusCalendarValue, line.line, w.to_string())
                    .with_source(line.to_string(), line.span)
                    .into_warning()
            }));
            Ok(Some(rule.to_string()))
        }
    }
}

/// A component between its `BEGIN` and `END` lines.
///
/// Lines are buffered first and absorbed into checked properties either
/// at the end or, when streaming, whenever the buffer grows past a
/// threshold. Absorption is per line, so both give the same result.
#[derive(Debug)]
pub(crate) struct ComponentBuilder {
    kind: ComponentKind,
    line: usize,
    span: Span,
    pending: Vec<ContentLine>,
    properties: Vec<ContentLine>,
    components: Vec<Component>,
    extensions: Vec<ExtensionBlock>,
    errors: Vec<ParseError>,
    invalid: bool,
}

impl ComponentBuilder {
    pub(crate) const fn new(kind: ComponentKind, line: usize, span: Span) -> Self {
        Self {
            kind,
            line,
            span,
            pending: Vec::new(),
            properties: Vec::new(),
            components: Vec::new(),
            extensions: Vec::new(),
            errors: Vec::new(),
            invalid: false,
        }
    }

    pub(crate) const fn kind(&self) -> ComponentKind {
        self.kind
    }

    pub(crate) fn push(&mut self, line: ContentLine) {
        self.pending.push(line);
    }

    pub(crate) fn pending_len(&self) -> usize {
        self.pending.len()
    }

    pub(crate) fn add_component(&mut self, component: Component) {
        self.components.push(component);
    }

    pub(crate) fn add_extension(&mut self, block: ExtensionBlock) {
        self.extensions.push(block);
    }

    /// Record a diagnostic about the component; errors invalidate it in
    /// strict mode.
    pub(crate) fn record(&mut self, err: ParseError, mode: ParseMode) {
        if mode == ParseMode::Strict && err.is_error() {
            self.invalid = true;
        }
        self.errors.push(err);
    }

    /// Check and keep the buffered lines.
    pub(crate) fn absorb(&mut self, mode: ParseMode) {
        for mut line in std::mem::take(&mut self.pending) {
            let Checked { keep, diagnostics } = check_property(&mut line, mode);
            for err in diagnostics {
                self.record(err, mode);
            }
            if keep {
                self.properties.push(line);
            }
        }
    }

    /// Finish the component.
    ///
    /// Returns the component unless it was invalidated in strict mode or
    /// lacks a critical property, together with every diagnostic recorded
    /// for it.
    pub(crate) fn finish(mut self, mode: ParseMode) -> (Option<Component>, Vec<ParseError>) {
        self.absorb(mode);

        let mut critical_missing = false;
        for requirement in self.kind.rules().requirements {
            let has = |name: &str| self.properties.iter().any(|p| p.is(name));
            let missing = match *requirement {
                Requirement::Critical(name) if !has(name) => {
                    critical_missing = true;
                    Some((format!("{} requires {name}", self.kind), true))
                }
                Requirement::Required(name) if !has(name) => {
                    Some((format!("{} requires {name}", self.kind), false))
                }
                Requirement::OneOf(names) if !names.iter().any(|n| has(n)) => Some((
                    format!("{} requires one of {}", self.kind, names.join(", ")),
                    false,
                )),
                Requirement::Defaulted(name, value) if !has(name) => {
                    self.properties.push(ContentLine::new(name, value));
                    let err = self.requirement_error(format!("{} without {name}, using {value}", self.kind));
                    self.errors.push(err.into_warning());
                    None
                }
                _ => None,
            };

            if let Some((message, critical)) = missing {
                let err = self.requirement_error(message);
                if critical {
                    self.errors.push(err);
                } else {
                    self.record(
                        match mode {
                            ParseMode::Strict => err,
                            ParseMode::Loose => err.into_warning(),
                        },
                        mode,
                    );
                }
            }
        }

        let errors = self.errors;
        if critical_missing || self.invalid {
            return (None, errors);
        }

        let component = Component {
            kind: self.kind,
            properties: self.properties,
            components: self.components,
            extensions: self.extensions,
            valid: !errors.iter().any(ParseError::is_error),
            errors: errors.clone(),
        };
        (Some(component), errors)
    }

    fn requirement_error(&self, message: String) -> ParseError {
        ParseError::new(ErrorKind::MissingRequiredProperty, self.line, message)
            .with_source(format!("BEGIN:{}", self.kind), self.span)
    }
}

#[cfg(test)]
mod tests {
    #![expect(clippy::indexing_slicing)]

    use super::*;
    use crate::error::Severity;
    use crate::syntax::scan_content_line;

    fn builder(kind: ComponentKind, lines: &[&str]) -> ComponentBuilder {
        let mut builder = ComponentBuilder::new(kind, 1, Span::default());
        for (i, src) in lines.iter().enumerate() {
            builder.push(scan_content_line(src, i + 2).unwrap());
        }
        builder
    }

    const EVENT: &[&str] = &["UID:1", "DTSTAMP:19970901T130000Z", "DTSTART:19970902T090000"];

    #[test]
    fn builds_valid_event() {
        let (component, errors) = builder(ComponentKind::Event, EVENT).finish(ParseMode::Strict);
        let component = component.unwrap();
        assert!(component.valid);
        assert_eq!(component.properties.len(), 3);
        assert!(errors.is_empty());
    }

    #[test]
    fn bogus_value_drops_property() {
        let lines = [EVENT, &["DTEND:20010229T100000"]].concat();
        let (component, errors) = builder(ComponentKind::Event, &lines).finish(ParseMode::Loose);
        let component = component.unwrap();
        assert!(component.property("DTEND").is_none());
        assert!(!component.valid);
        assert_eq!(errors[0].kind, ErrorKind::BogusCalendarValue);
        assert_eq!(errors[0].line, 5);

        let (component, _) = builder(ComponentKind::Event, &lines).finish(ParseMode::Strict);
        assert!(component.is_none());
    }

    #[test]
    fn unknown_names_depend_on_mode() {
        let lines = [EVENT, &["FOO:bar", "ATTENDEE;BOGUS=1:mailto:a@x", "X-OK;X-P=1:y"]].concat();

        let (component, errors) = builder(ComponentKind::Event, &lines).finish(ParseMode::Loose);
        let component = component.unwrap();
        assert!(component.valid);
        assert!(component.property("FOO").is_some());
        assert!(component.property("ATTENDEE").is_some());
        assert_eq!(errors.len(), 2);
        assert!(errors.iter().all(|e| e.severity == Severity::Warning));

        let (component, errors) = builder(ComponentKind::Event, &lines).finish(ParseMode::Strict);
        assert!(component.is_none());
        let kinds: Vec<_> = errors.iter().map(|e| e.kind).collect();
        assert_eq!(kinds, [ErrorKind::UnknownProperty, ErrorKind::UnknownParameter]);
    }

    #[test]
    fn critical_properties_drop_in_every_mode() {
        for mode in [ParseMode::Strict, ParseMode::Loose] {
            let (component, errors) =
                builder(ComponentKind::Event, &["UID:1", "DTSTAMP:19970901T130000Z"]).finish(mode);
            assert!(component.is_none());
            assert_eq!(errors[0].kind, ErrorKind::MissingRequiredProperty);
            assert!(errors[0].is_error());

            let (component, _) = builder(ComponentKind::Alarm, &["TRIGGER:-PT15M"]).finish(mode);
            assert!(component.is_none());
        }
    }

    #[test]
    fn non_critical_properties_are_tolerated_when_loose() {
        let lines = ["UID:1", "DTSTART:19970902T090000"];
        let (component, errors) = builder(ComponentKind::Event, &lines).finish(ParseMode::Loose);
        assert!(component.unwrap().valid);
        assert_eq!(errors[0].severity, Severity::Warning);

        let (component, _) = builder(ComponentKind::Event, &lines).finish(ParseMode::Strict);
        assert!(component.is_none());

        let (component, _) = builder(ComponentKind::FreeBusy, &["DTSTART:19970902T090000"])
            .finish(ParseMode::Strict);
        assert!(component.is_none());
        let (component, _) = builder(
            ComponentKind::FreeBusy,
            &["DTSTART:19970902T090000", "DURATION:PT1H"],
        )
        .finish(ParseMode::Strict);
        assert!(component.is_some());
    }

    #[test]
    fn timezone_defaults_to_utc() {
        let (component, errors) = builder(ComponentKind::TimeZone, &[]).finish(ParseMode::Strict);
        let component = component.unwrap();
        assert_eq!(component.property("TZID").unwrap().value, "UTC");
        assert!(component.valid);
        assert_eq!(errors[0].severity, Severity::Warning);
    }

    #[test]
    fn lenient_rules_keep_line_with_warnings() {
        let lines = [EVENT, &["RRULE:FREQ=DAILY;BYHOUR=25;COUNT=3"]].concat();
        let (component, errors) = builder(ComponentKind::Event, &lines).finish(ParseMode::Loose);
        let component = component.unwrap();
        assert_eq!(
            component.property("RRULE").map(|p| p.value.as_str()),
            Some("FREQ=DAILY;COUNT=3")
        );
        assert_eq!(errors[0].kind, ErrorKind::BogusCalendarValue);
        assert_eq!(errors[0].severity, Severity::Warning);

        let src = format!("BEGIN:VCALENDAR\r\n{}END:VCALENDAR\r\n", component.serialize());
        let report = crate::parser::Parser::new(crate::parser::ParseOptions::default())
            .parse_str(&src, &mut Vec::<Component>::new())
            .unwrap();
        assert!(!report.has_errors(), "{:?}", report.errors);

        let (component, errors) = builder(ComponentKind::Event, &lines).finish(ParseMode::Strict);
        assert!(component.is_none());
        assert!(errors[0].is_error());
    }

    #[test]
    fn absorbing_early_gives_same_result() {
        let lines = [EVENT, &["FOO:bar", "DTEND:bogus", "SUMMARY:x"]].concat();
        let whole = builder(ComponentKind::Event, &lines).finish(ParseMode::Loose);

        let mut streamed = ComponentBuilder::new(ComponentKind::Event, 1, Span::default());
        for (i, src) in lines.iter().enumerate() {
            streamed.push(scan_content_line(src, i + 2).unwrap());
            if streamed.pending_len() >= 2 {
                streamed.absorb(ParseMode::Loose);
            }
        }
        assert_eq!(streamed.finish(ParseMode::Loose), whole);
    }
}
