/*!
 * Advisory diagnostics attached to successful results.
 *
 * Recoverable situations (stray blank lines, over-long time fields, clamped
 * time values, a truncated last block) never fail a parse. They are collected
 * as `Diagnostic` values next to the result so that the caller decides how to
 * surface them.
 */

use std::fmt;

use serde::Serialize;

use crate::timecode::FieldClamp;

/// Which side of a time range a diagnostic refers to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Boundary {
    Entry,
    Exit,
}

impl fmt::Display for Boundary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Boundary::Entry => f.write_str("entry"),
            Boundary::Exit => f.write_str("exit"),
        }
    }
}

/// Kinds of advisory diagnostics
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum DiagnosticKind {
    /// Blank line where an index or time range was expected
    StrayBlankLine,
    /// Time field longer than `HH:MM:SS.mmm`, cut down to that width
    TimeFieldTruncated {
        boundary: Boundary,
        original: String,
        truncated: String,
    },
    /// Time field with an out-of-range component
    TimeFieldClamped { boundary: Boundary, clamp: FieldClamp },
    /// Input ended in the middle of a caption block, which was dropped
    TruncatedFile { index: usize },
    /// A `.txt` file is being read with the SRT grammar
    TreatedAsSrt { extension: String },
    /// The input contained no captions
    EmptyTrack,
}

/// An advisory finding with the line it came from, if any
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Diagnostic {
    pub line: Option<usize>,
    #[serde(flatten)]
    pub kind: DiagnosticKind,
}

impl Diagnostic {
    pub fn at_line(line: usize, kind: DiagnosticKind) -> Self {
        Self {
            line: Some(line),
            kind,
        }
    }

    pub fn general(kind: DiagnosticKind) -> Self {
        Self { line: None, kind }
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(line) = self.line {
            write!(f, "line {}: ", line)?;
        }

        match &self.kind {
            DiagnosticKind::StrayBlankLine => write!(f, "extra line break detected"),
            DiagnosticKind::TimeFieldTruncated {
                boundary,
                original,
                truncated,
            } => write!(
                f,
                "{} time '{}' is too long, only '{}' is used",
                boundary, original, truncated
            ),
            DiagnosticKind::TimeFieldClamped { boundary, clamp } => {
                write!(f, "{} time has an {}", boundary, clamp)
            }
            DiagnosticKind::TruncatedFile { index } => write!(
                f,
                "file ends in the middle of caption {}, which was not added",
                index
            ),
            DiagnosticKind::TreatedAsSrt { extension } => write!(
                f,
                "extension is \".{}\", it is going to be treated like a \".srt\"",
                extension
            ),
            DiagnosticKind::EmptyTrack => write!(f, "no captions found"),
        }
    }
}

/// A successful result together with its advisory diagnostics
#[derive(Debug, Clone, PartialEq)]
pub struct Parsed<T> {
    pub value: T,
    pub diagnostics: Vec<Diagnostic>,
}

impl<T> Parsed<T> {
    pub fn new(value: T, diagnostics: Vec<Diagnostic>) -> Self {
        Self { value, diagnostics }
    }

    /// Drop the diagnostics
    pub fn into_value(self) -> T {
        self.value
    }

    /// Whether any diagnostic of the given kind was recorded
    pub fn has(&self, predicate: impl Fn(&DiagnosticKind) -> bool) -> bool {
        self.diagnostics.iter().any(|d| predicate(&d.kind))
    }
}
