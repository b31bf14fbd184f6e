// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Component dispatcher: the state machine turning content lines into
//! components.
//!
//! ```text
//! OUTSIDE --BEGIN:VCALENDAR--> IN_CALENDAR --BEGIN:<kind>--> IN_COMPONENT --BEGIN:<kind>--> ...
//!    ^                              |                             |
//!    +--------END:VCALENDAR---------+<----------END:<kind>--------+
//! ```
//!
//! Every `BEGIN` pushes a frame, every `END` pops one and dispatches it:
//! top-level components go to the [`ComponentSink`], nested ones to their
//! parent. Diagnostics never stop the parse; they are collected in the
//! [`ParseReport`].

use std::io::{self, BufRead};
use std::time::{Duration, Instant};

use crate::component::{
    Component, ComponentBuilder, ComponentKind, Expansion, ExtensionBlock, check_property,
};
use crate::error::{ErrorKind, ParseError};
use crate::keyword::{KW_BEGIN, KW_END, KW_VCALENDAR, Recognition};
use crate::recur::{DEFAULT_ITERATION_LIMIT, TzResolver};
use crate::syntax::{ContentLine, ContentLineError, LogicalLine, Unfolder, scan_content_line};

/// Validation policy of a parse.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, strum::Display)]
pub enum ParseMode {
    /// Any structural problem drops the enclosing component.
    #[default]
    #[strum(to_string = "strict")]
    Strict,

    /// Non-ambiguous problems are tolerated and reported as warnings.
    #[strum(to_string = "loose")]
    Loose,
}

/// Options of a [`Parser`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParseOptions {
    /// Validation policy.
    ///
    /// Default: [`ParseMode::Strict`].
    pub mode: ParseMode,

    /// Absorb buffered lines into the component once this many are
    /// pending, instead of at `END`.
    ///
    /// Default: `None`, buffer whole components.
    pub streaming_threshold: Option<usize>,

    /// Consecutive empty periods after which [`Parser::expand`] gives up
    /// a recurrence rule.
    ///
    /// Default: [`DEFAULT_ITERATION_LIMIT`].
    pub recurrence_iteration_limit: usize,
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self {
            mode: ParseMode::default(),
            streaming_threshold: None,
            recurrence_iteration_limit: DEFAULT_ITERATION_LIMIT,
        }
    }
}

impl ParseOptions {
    /// Set the validation policy.
    #[must_use]
    pub const fn mode(mut self, mode: ParseMode) -> Self {
        self.mode = mode;
        self
    }

    /// Set the streaming threshold.
    #[must_use]
    pub const fn streaming_threshold(mut self, threshold: Option<usize>) -> Self {
        self.streaming_threshold = threshold;
        self
    }

    /// Set the recurrence iteration limit.
    #[must_use]
    pub const fn recurrence_iteration_limit(mut self, limit: usize) -> Self {
        self.recurrence_iteration_limit = limit;
        self
    }
}

/// Receives the components produced by a parse.
pub trait ComponentSink {
    /// Take a finished top-level component.
    fn add(&mut self, component: Component);

    /// Take an experimental or unrecognized top-level block.
    ///
    /// Ignored by default.
    fn add_extension(&mut self, block: ExtensionBlock) {
        let _ = block;
    }
}

impl ComponentSink for Vec<Component> {
    fn add(&mut self, component: Component) {
        self.push(component);
    }
}

/// Observability counters of one parse.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ParseStats {
    /// Logical lines read
    pub lines: usize,
    /// Components built, nested ones included
    pub components: usize,
    /// Wall-clock time spent
    pub elapsed: Duration,
}

/// Outcome of a parse besides the components handed to the sink.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParseReport {
    /// Diagnostics, ordered by line
    pub errors: Vec<ParseError>,

    /// Properties of the VCALENDAR objects
    pub calendar_properties: Vec<ContentLine>,

    /// Counters
    pub stats: ParseStats,
}

impl ParseReport {
    /// Whether any error-severity diagnostic was recorded.
    #[must_use]
    pub fn has_errors(&self) -> bool {
        self.errors.iter().any(ParseError::is_error)
    }
}

/// A reusable iCalendar stream parser.
///
/// # Example
///
/// ```
/// use calends_ical::{Component, ParseMode, ParseOptions, Parser};
///
/// let src = "\
/// BEGIN:VCALENDAR\r\n\
/// BEGIN:VEVENT\r\n\
/// UID:1\r\n\
/// DTSTAMP:19970901T130000Z\r\n\
/// DTSTART:19970902T090000\r\n\
/// END:VEVENT\r\n\
/// END:VCALENDAR\r\n\
/// ";
/// let parser = Parser::new(ParseOptions::default().mode(ParseMode::Strict));
/// let mut components: Vec<Component> = Vec::new();
/// let report = parser.parse(src.as_bytes(), &mut components).unwrap();
/// assert_eq!(components.len(), 1);
/// assert!(report.errors.is_empty());
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Parser {
    options: ParseOptions,
}

impl Parser {
    /// Create a parser with the given options.
    #[must_use]
    pub const fn new(options: ParseOptions) -> Self {
        Self { options }
    }

    /// Options of this parser.
    #[must_use]
    pub const fn options(&self) -> &ParseOptions {
        &self.options
    }

    /// Parse a stream, handing every finished top-level component to `sink`.
    ///
    /// # Errors
    ///
    /// Only I/O errors of `input` are returned; every problem with the
    /// data itself is recorded in the report.
    #[tracing::instrument(skip_all, fields(mode = %self.options.mode))]
    pub fn parse<R, S>(&self, input: R, sink: &mut S) -> io::Result<ParseReport>
    where
        R: BufRead,
        S: ComponentSink + ?Sized,
    {
        let started = Instant::now();
        let mut ctx = ParseContext::new(self.options);
        for line in Unfolder::new(input) {
            ctx.process(line?, sink);
        }
        Ok(ctx.finish(sink, started.elapsed()))
    }

    /// Parse an in-memory string.
    ///
    /// # Errors
    ///
    /// See [`Parser::parse`].
    pub fn parse_str<S>(&self, src: &str, sink: &mut S) -> io::Result<ParseReport>
    where
        S: ComponentSink + ?Sized,
    {
        self.parse(src.as_bytes(), sink)
    }

    /// Expand a component with the configured iteration limit.
    #[must_use]
    pub fn expand(&self, component: &Component, tz: &dyn TzResolver, max: usize) -> Expansion {
        component.expand_with_limit(tz, max, self.options.recurrence_iteration_limit)
    }
}

/// One open `BEGIN` block.
#[derive(Debug)]
enum Frame {
    Calendar,
    Component(ComponentBuilder),
    Extension(ExtensionBlock),
    /// A block being skipped up to its `END`
    Skipped(String),
}

impl Frame {
    fn name(&self) -> &str {
        match self {
            Self::Calendar => KW_VCALENDAR,
            Self::Component(builder) => builder.kind().name(),
            Self::Extension(block) => &block.name,
            Self::Skipped(name) => name,
        }
    }
}

/// State of a single parse, owned by [`Parser::parse`].
#[derive(Debug)]
struct ParseContext {
    options: ParseOptions,
    frames: Vec<Frame>,
    errors: Vec<ParseError>,
    calendar_properties: Vec<ContentLine>,
    stats: ParseStats,
}

impl ParseContext {
    fn new(options: ParseOptions) -> Self {
        Self {
            options,
            frames: Vec::new(),
            errors: Vec::new(),
            calendar_properties: Vec::new(),
            stats: ParseStats::default(),
        }
    }

    const fn mode(&self) -> ParseMode {
        self.options.mode
    }

    fn record(&mut self, err: ParseError) {
        tracing::debug!(kind = %err.kind, line = err.line, severity = %err.severity, "{}", err.message);
        self.errors.push(err);
    }

    /// Record a problem of the current block; errors invalidate the
    /// enclosing component in strict mode.
    fn record_in_frame(&mut self, err: ParseError) {
        let mode = self.mode();
        match self.frames.last_mut() {
            Some(Frame::Component(builder)) => builder.record(err, mode),
            _ => self.record(err),
        }
    }

    fn process<S: ComponentSink + ?Sized>(&mut self, logical: LogicalLine, sink: &mut S) {
        self.stats.lines += 1;
        let strict = self.mode() == ParseMode::Strict;

        if logical.lossy {
            let err = ParseError::new(ErrorKind::MalformedLine, logical.line, "invalid UTF-8 replaced")
                .with_source(logical.text.clone(), logical.span);
            self.record_in_frame(if strict { err } else { err.into_warning() });
        }
        if !logical.terminated && strict {
            let err = ParseError::new(ErrorKind::MalformedLine, logical.line, "missing line terminator")
                .with_source(logical.text.clone(), logical.span);
            self.record_in_frame(err);
        }
        if logical.text.is_empty() && !strict {
            return;
        }

        let mut line = match scan_content_line(&logical.text, logical.line) {
            Ok(line) => line,
            Err(err) => {
                let kind = match err {
                    ContentLineError::ControlCharacter { .. } => ErrorKind::MalformedLine,
                    _ => ErrorKind::InvalidPropertyFormat,
                };
                let err = ParseError::new(kind, logical.line, err.to_string())
                    .with_source(logical.text, logical.span);
                // tokenizer failures skip the line in every mode
                self.record_in_frame(if strict { err } else { err.into_warning() });
                return;
            }
        };
        line.span = logical.span;

        if line.is(KW_BEGIN) {
            self.begin(&line);
        } else if line.is(KW_END) {
            self.end(&line, sink);
        } else {
            self.property(line);
        }
    }

    fn begin(&mut self, line: &ContentLine) {
        let name = line.value.trim();
        let nesting_error = |message: String| {
            ParseError::new(ErrorKind::MismatchedNesting, line.line, message)
                .with_source(line.to_string(), line.span)
        };

        let frame = match self.frames.last() {
            None if name.eq_ignore_ascii_case(KW_VCALENDAR) => Frame::Calendar,
            None => {
                self.record(nesting_error(format!("BEGIN:{name} outside VCALENDAR")));
                Frame::Skipped(name.to_owned())
            }
            Some(Frame::Extension(_)) => Frame::Extension(extension(name, line)),
            Some(Frame::Skipped(_)) => Frame::Skipped(name.to_owned()),
            Some(_) if name.eq_ignore_ascii_case(KW_VCALENDAR) => {
                self.record_in_frame(nesting_error("nested VCALENDAR".to_owned()));
                Frame::Skipped(name.to_owned())
            }
            Some(parent) => {
                let parent_kind = match parent {
                    Frame::Component(builder) => Some(builder.kind()),
                    _ => None,
                };
                self.begin_child(parent_kind, name, line, nesting_error)
            }
        };
        self.frames.push(frame);
    }

    fn begin_child(
        &mut self,
        parent: Option<ComponentKind>,
        name: &str,
        line: &ContentLine,
        nesting_error: impl Fn(String) -> ParseError,
    ) -> Frame {
        let mode = self.mode();
        match Recognition::<ComponentKind>::of(name) {
            Recognition::Known(kind) => {
                let allowed = match parent {
                    Some(parent) => parent.allows_child(kind),
                    None => kind.is_top_level(),
                };
                let within = parent.map_or(KW_VCALENDAR, ComponentKind::name);
                if allowed {
                    Frame::Component(ComponentBuilder::new(kind, line.line, line.span))
                } else if parent.is_some() && mode == ParseMode::Loose {
                    self.record_in_frame(
                        nesting_error(format!("{kind} inside {within}")).into_warning(),
                    );
                    Frame::Component(ComponentBuilder::new(kind, line.line, line.span))
                } else {
                    self.record_in_frame(nesting_error(format!("{kind} not allowed inside {within}")));
                    Frame::Skipped(name.to_owned())
                }
            }
            Recognition::Extension => Frame::Extension(extension(name, line)),
            Recognition::Unknown => {
                let err = ParseError::new(
                    ErrorKind::UnknownComponent,
                    line.line,
                    format!("unknown component {name}"),
                )
                .with_source(line.to_string(), line.span);
                match mode {
                    ParseMode::Strict => {
                        self.record_in_frame(err);
                        Frame::Skipped(name.to_owned())
                    }
                    ParseMode::Loose => {
                        self.record_in_frame(err.into_warning());
                        Frame::Extension(extension(name, line))
                    }
                }
            }
        }
    }

    fn end<S: ComponentSink + ?Sized>(&mut self, line: &ContentLine, sink: &mut S) {
        let name = line.value.trim();
        let Some(index) = self
            .frames
            .iter()
            .rposition(|frame| frame.name().eq_ignore_ascii_case(name))
        else {
            let err = ParseError::new(
                ErrorKind::MismatchedNesting,
                line.line,
                format!("END:{name} without BEGIN"),
            )
            .with_source(line.to_string(), line.span);
            self.record_in_frame(err);
            return;
        };

        // close the inner blocks the END skips over
        while self.frames.len() > index + 1 {
            self.close_unterminated(line, sink);
        }
        self.close(sink);
    }

    fn close_unterminated<S: ComponentSink + ?Sized>(&mut self, line: &ContentLine, sink: &mut S) {
        let Some(frame) = self.frames.last() else {
            return;
        };
        let err = ParseError::new(
            ErrorKind::MismatchedNesting,
            line.line,
            format!("BEGIN:{} not closed before {line}", frame.name()),
        )
        .with_source(line.to_string(), line.span);
        self.record_in_frame(match self.mode() {
            ParseMode::Strict => err,
            ParseMode::Loose => err.into_warning(),
        });
        self.close(sink);
    }

    /// Pop the innermost frame and hand its result on.
    fn close<S: ComponentSink + ?Sized>(&mut self, sink: &mut S) {
        let Some(frame) = self.frames.pop() else {
            return;
        };
        match frame {
            Frame::Calendar | Frame::Skipped(_) => {}
            Frame::Component(builder) => {
                let (component, errors) = builder.finish(self.mode());
                for err in errors {
                    self.record(err);
                }
                let Some(component) = component else {
                    return;
                };
                self.stats.components += 1;
                tracing::debug!(kind = %component.kind, uid = component.uid(), "component built");
                match self.frames.last_mut() {
                    Some(Frame::Component(parent)) => parent.add_component(component),
                    _ => sink.add(component),
                }
            }
            Frame::Extension(block) => match self.frames.last_mut() {
                Some(Frame::Component(parent)) => parent.add_extension(block),
                Some(Frame::Extension(parent)) => parent.children.push(block),
                _ => sink.add_extension(block),
            },
        }
    }

    fn property(&mut self, mut line: ContentLine) {
        let mode = self.mode();
        match self.frames.last_mut() {
            None => {
                let err = ParseError::new(
                    ErrorKind::MismatchedNesting,
                    line.line,
                    "content outside VCALENDAR",
                )
                .with_source(line.to_string(), line.span);
                self.record(err);
            }
            Some(Frame::Calendar) => {
                let checked = check_property(&mut line, mode);
                for err in checked.diagnostics {
                    self.record(err);
                }
                if checked.keep {
                    self.calendar_properties.push(line);
                }
            }
            Some(Frame::Component(builder)) => {
                builder.push(line);
                if self
                    .options
                    .streaming_threshold
                    .is_some_and(|threshold| builder.pending_len() >= threshold)
                {
                    builder.absorb(mode);
                }
            }
            Some(Frame::Extension(block)) => block.properties.push(line),
            Some(Frame::Skipped(_)) => {}
        }
    }

    fn finish<S: ComponentSink + ?Sized>(mut self, sink: &mut S, elapsed: Duration) -> ParseReport {
        // blocks left open at end of input
        while let Some(frame) = self.frames.last() {
            let err = ParseError::new(
                ErrorKind::MismatchedNesting,
                self.stats.lines,
                format!("BEGIN:{} not closed at end of input", frame.name()),
            );
            self.record_in_frame(match self.mode() {
                ParseMode::Strict => err,
                ParseMode::Loose => err.into_warning(),
            });
            self.close(sink);
        }

        self.errors.sort_by_key(|err| err.line);
        self.stats.elapsed = elapsed;
        tracing::debug!(
            lines = self.stats.lines,
            components = self.stats.components,
            errors = self.errors.len(),
            elapsed = ?self.stats.elapsed,
            "parse finished"
        );

        ParseReport {
            errors: self.errors,
            calendar_properties: self.calendar_properties,
            stats: self.stats,
        }
    }
}

fn extension(name: &str, line: &ContentLine) -> ExtensionBlock {
    let mut block = ExtensionBlock::new(name);
    block.line = line.line;
    block
}
