/*!
 * SRT line-state-machine parser.
 *
 * An SRT document is a sequence of blocks:
 *
 * ```text
 * <index, sequential from 1>
 * <HH:MM:SS,mmm> --> <HH:MM:SS,mmm>
 * <row one>
 * [<row two>]
 * [<blank line>]
 * ```
 *
 * The parser reads one line at a time and moves through
 * `ExpectIndex -> ExpectTimeRange -> ExpectRowOne -> ExpectRowTwo ->
 * ExpectBlankSeparator -> ExpectIndex`. A caption is committed to the track
 * as soon as its second row (possibly blank) is read, so a file may end right
 * after its last caption without a trailing blank line.
 *
 * The grammar is strict: any malformed line aborts the parse with a
 * `ParseError` and no partial track. The only recoverable situations are
 * stray blank lines before an index or time range and over-long time fields,
 * both reported as diagnostics.
 */

use std::fmt;

use log::debug;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;

use crate::caption_track::CaptionTrack;
use crate::diagnostics::{Boundary, Diagnostic, DiagnosticKind, Parsed};
use crate::errors::{ParseError, ParseErrorKind};
use crate::timecode::{ClampedTimeCode, TimeCode};

/// Width of a `HH:MM:SS.mmm` time field
pub const TIME_FIELD_WIDTH: usize = 12;

/// Separator between entry and exit time
pub const TIME_RANGE_SEPARATOR: &str = "-->";

// @const: H:M:S with an optional decimal fraction, after ',' -> '.' normalization
static TIME_FIELD_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(\d{1,2}):(\d{1,2}):(\d{1,2})(?:\.(\d{1,7}))?$").unwrap());

/// What the parser expects on the next line
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ParserState {
    ExpectIndex,
    ExpectTimeRange,
    ExpectRowOne,
    ExpectRowTwo,
    ExpectBlankSeparator,
}

impl fmt::Display for ParserState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ParserState::ExpectIndex => "expecting index",
            ParserState::ExpectTimeRange => "expecting time range",
            ParserState::ExpectRowOne => "expecting first row",
            ParserState::ExpectRowTwo => "expecting second row",
            ParserState::ExpectBlankSeparator => "expecting blank line",
        };
        f.write_str(name)
    }
}

/// Parser for the SRT grammar
#[derive(Debug, Clone, Copy, Default)]
pub struct SrtParser;

impl SrtParser {
    pub fn new() -> Self {
        Self
    }

    /// Parse a whole SRT document into a track named `track_id`
    pub fn parse_str(&self, track_id: &str, content: &str) -> Result<Parsed<CaptionTrack>, ParseError> {
        // A byte-order mark is not part of the first line
        let content = content.strip_prefix('\u{feff}').unwrap_or(content);

        let mut machine = SrtMachine::new(CaptionTrack::new(track_id));
        for (offset, line) in content.lines().enumerate() {
            machine.feed(offset + 1, line)?;
        }

        machine.finish()
    }
}

/// Parse one time field (`HH:MM:SS.mmm`, already normalized)
///
/// Returns `None` when the text is not a time of day. Components outside
/// their range are clamped by `TimeCode` and reported through the clamps.
pub fn parse_time_field(field: &str) -> Option<ClampedTimeCode> {
    let caps = TIME_FIELD_REGEX.captures(field)?;

    let number = |idx: usize| -> Option<i64> { caps.get(idx)?.as_str().parse().ok() };
    let hours = number(1)?;
    let minutes = number(2)?;
    let seconds = number(3)?;

    // The fraction is decimal: ".5" is 500 ms, digits past the third are dropped
    let milliseconds = match caps.get(4) {
        Some(fraction) => {
            let digits: String = fraction.as_str().chars().take(3).collect();
            format!("{:0<3}", digits).parse().ok()?
        }
        None => 0,
    };

    Some(TimeCode::clamped(hours, minutes, seconds, milliseconds))
}

// @struct: Mutable parse state for one document
struct SrtMachine {
    state: ParserState,
    // @field: Next index the document must use
    expected_index: usize,
    // @field: Index of the block being read
    current_index: usize,
    first_row: String,
    second_row: String,
    entry: TimeCode,
    exit: TimeCode,
    last_line: usize,
    track: CaptionTrack,
    diagnostics: Vec<Diagnostic>,
}

impl SrtMachine {
    fn new(track: CaptionTrack) -> Self {
        Self {
            state: ParserState::ExpectIndex,
            expected_index: 1,
            current_index: 0,
            first_row: String::new(),
            second_row: String::new(),
            entry: TimeCode::default(),
            exit: TimeCode::default(),
            last_line: 0,
            track,
            diagnostics: Vec::new(),
        }
    }

    fn fail(&self, line: usize, kind: ParseErrorKind) -> ParseError {
        ParseError {
            line,
            state: self.state,
            kind,
        }
    }

    fn advise(&mut self, line: usize, kind: DiagnosticKind) {
        self.diagnostics.push(Diagnostic::at_line(line, kind));
    }

    fn feed(&mut self, line_no: usize, line: &str) -> Result<(), ParseError> {
        self.last_line = line_no;
        let blank = line.trim().is_empty();

        match self.state {
            ParserState::ExpectIndex => {
                if blank {
                    self.advise(line_no, DiagnosticKind::StrayBlankLine);
                    return Ok(());
                }

                let found: i64 = line
                    .trim()
                    .parse()
                    .map_err(|_| self.fail(line_no, ParseErrorKind::InvalidIndex(line.to_string())))?;

                if found != self.expected_index as i64 {
                    return Err(self.fail(
                        line_no,
                        ParseErrorKind::UnexpectedIndex {
                            found,
                            expected: self.expected_index,
                        },
                    ));
                }

                self.current_index = self.expected_index;
                self.expected_index += 1;
                self.first_row.clear();
                self.second_row.clear();
                self.state = ParserState::ExpectTimeRange;
            }
            ParserState::ExpectTimeRange => {
                if blank {
                    self.advise(line_no, DiagnosticKind::StrayBlankLine);
                    return Ok(());
                }

                let (entry, exit) = self.read_time_range(line_no, line)?;
                self.entry = entry;
                self.exit = exit;
                self.state = ParserState::ExpectRowOne;
            }
            ParserState::ExpectRowOne => {
                if blank {
                    return Err(self.fail(line_no, ParseErrorKind::EmptyFirstRow));
                }

                self.first_row = line.to_string();
                self.state = ParserState::ExpectRowTwo;
            }
            ParserState::ExpectRowTwo => {
                self.second_row = line.to_string();
                self.commit(line_no)?;

                // A blank second row already closes the block
                self.state = if blank {
                    ParserState::ExpectIndex
                } else {
                    ParserState::ExpectBlankSeparator
                };
            }
            ParserState::ExpectBlankSeparator => {
                if !blank {
                    return Err(self.fail(line_no, ParseErrorKind::MissingSeparator(line.to_string())));
                }

                self.state = ParserState::ExpectIndex;
            }
        }

        Ok(())
    }

    fn read_time_range(&mut self, line_no: usize, line: &str) -> Result<(TimeCode, TimeCode), ParseError> {
        let normalized = line.replace(',', ".");
        let fields: Vec<&str> = normalized
            .split(TIME_RANGE_SEPARATOR)
            .filter(|field| !field.is_empty())
            .collect();

        if fields.len() != 2 {
            return Err(self.fail(line_no, ParseErrorKind::InvalidTimeRange(line.to_string())));
        }

        let entry = self.read_time_field(line_no, fields[0], Boundary::Entry)?;
        let exit = self.read_time_field(line_no, fields[1], Boundary::Exit)?;
        Ok((entry, exit))
    }

    fn read_time_field(&mut self, line_no: usize, raw: &str, boundary: Boundary) -> Result<TimeCode, ParseError> {
        let trimmed = raw.trim();
        let field = if trimmed.chars().count() > TIME_FIELD_WIDTH {
            let truncated: String = trimmed.chars().take(TIME_FIELD_WIDTH).collect();
            self.advise(
                line_no,
                DiagnosticKind::TimeFieldTruncated {
                    boundary,
                    original: trimmed.to_string(),
                    truncated: truncated.clone(),
                },
            );
            truncated
        } else {
            trimmed.to_string()
        };

        let parsed = parse_time_field(&field).ok_or_else(|| {
            let kind = match boundary {
                Boundary::Entry => ParseErrorKind::InvalidEntryTime(field.clone()),
                Boundary::Exit => ParseErrorKind::InvalidExitTime(field.clone()),
            };
            self.fail(line_no, kind)
        })?;

        for clamp in parsed.clamps {
            self.advise(line_no, DiagnosticKind::TimeFieldClamped { boundary, clamp });
        }

        Ok(parsed.time_code)
    }

    fn commit(&mut self, line_no: usize) -> Result<(), ParseError> {
        let first_row = std::mem::take(&mut self.first_row);
        let second_row = std::mem::take(&mut self.second_row);

        self.track
            .try_insert(first_row, second_row, self.entry, self.exit)
            .map_err(|reason| {
                self.fail(
                    line_no,
                    ParseErrorKind::Rejected {
                        index: self.current_index,
                        reason,
                    },
                )
            })
    }

    fn finish(mut self) -> Result<Parsed<CaptionTrack>, ParseError> {
        match self.state {
            // The last caption has a single row and no line after it
            ParserState::ExpectRowTwo => self.commit(self.last_line)?,
            ParserState::ExpectTimeRange | ParserState::ExpectRowOne => {
                let index = self.current_index;
                self.diagnostics
                    .push(Diagnostic::general(DiagnosticKind::TruncatedFile { index }));
            }
            ParserState::ExpectIndex | ParserState::ExpectBlankSeparator => {}
        }

        if self.track.is_empty() {
            self.diagnostics.push(Diagnostic::general(DiagnosticKind::EmptyTrack));
        }

        debug!(
            "Parsed SRT track '{}': {} captions, {} lines, {} diagnostics",
            self.track.id(),
            self.track.len(),
            self.last_line,
            self.diagnostics.len()
        );

        Ok(Parsed::new(self.track, self.diagnostics))
    }
}
