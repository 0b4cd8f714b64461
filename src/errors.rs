/*!
 * Error types for the captionkit library.
 *
 * This module contains custom error types for every fallible stage of the
 * pipeline, from caption insertion up to file dispatch, using the thiserror
 * crate for ergonomic error definitions.
 */

use std::path::PathBuf;

use thiserror::Error;

use crate::srt_parser::ParserState;

/// Reasons a caption is refused by `CaptionTrack::try_insert`
#[derive(Error, Debug, Clone, PartialEq)]
pub enum RejectReason {
    /// Both subtitle rows are empty or whitespace-only
    #[error("caption is empty")]
    EmptyCaption,

    /// The exit time comes before the entry time
    #[error("exit time ({exit_seconds}s) is before entry time ({entry_seconds}s)")]
    InvertedInterval {
        /// Entry time in seconds
        entry_seconds: f64,
        /// Exit time in seconds
        exit_seconds: f64,
    },
}

/// Errors returned by index-based track queries
#[derive(Error, Debug, Clone, PartialEq)]
pub enum QueryError {
    /// The index is past the end of the track
    #[error("caption index {index} out of range (track has {len} captions)")]
    IndexOutOfRange {
        /// Requested index
        index: usize,
        /// Number of captions in the track
        len: usize,
    },

    /// The stored interval has its exit before its entry
    #[error("caption {index} has an exit time before its entry time")]
    InvertedInterval {
        /// Offending caption index
        index: usize,
    },
}

/// Errors raised while inserting several captions at once
#[derive(Error, Debug, Clone, PartialEq)]
pub enum BatchInsertError {
    /// The input sequences do not line up
    #[error(
        "batch sequences must have the same length: first rows {first_rows}, second rows {second_rows}, entry times {entries}, exit times {exits}"
    )]
    LengthMismatch {
        first_rows: usize,
        second_rows: usize,
        entries: usize,
        exits: usize,
    },

    /// Nothing to insert
    #[error("batch is empty")]
    Empty,

    /// One caption of the batch was refused
    #[error("caption {index} of the batch was rejected: {reason}")]
    Rejected {
        /// Position in the batch
        index: usize,
        /// Why it was rejected
        reason: RejectReason,
    },
}

/// What went wrong on a single SRT line
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ParseErrorKind {
    /// The index line is not an integer
    #[error("expected a caption index, found '{0}'")]
    InvalidIndex(String),

    /// The index is an integer but not the next one in sequence
    #[error("caption index is {found} but should be {expected}")]
    UnexpectedIndex { found: i64, expected: usize },

    /// The time line did not split into exactly two fields on `-->`
    #[error("expected a time interval, found '{0}'")]
    InvalidTimeRange(String),

    /// The entry time field is not a time of day
    #[error("incorrect entry time format: '{0}'")]
    InvalidEntryTime(String),

    /// The exit time field is not a time of day
    #[error("incorrect exit time format: '{0}'")]
    InvalidExitTime(String),

    /// The first subtitle row is blank
    #[error("subtitle row one can't be an empty line")]
    EmptyFirstRow,

    /// A caption with two rows was not followed by a blank line
    #[error("expected blank line between captions, found '{0}'")]
    MissingSeparator(String),

    /// The assembled caption was refused by the track
    #[error("caption {index} was rejected: {reason}")]
    Rejected { index: usize, reason: RejectReason },
}

/// Fatal grammar violation in an SRT document
#[derive(Error, Debug, Clone, PartialEq)]
#[error("line {line} ({state}): {kind}")]
pub struct ParseError {
    /// 1-based line number of the offending line
    pub line: usize,
    /// Parser state when the line was read
    pub state: ParserState,
    /// Detail of the violation
    pub kind: ParseErrorKind,
}

/// Errors that can occur when turning a file path into a caption track
#[derive(Error, Debug)]
pub enum DispatchError {
    /// The path does not point to an existing regular file
    #[error("file not found or not a regular file: {0}")]
    NotFound(PathBuf),

    /// The file content is not UTF-8
    #[error("file is not UTF-8 encoded, please save it with UTF-8 encoding: {0}")]
    Encoding(PathBuf),

    /// The path has no extension to select a format from
    #[error("file has no extension: {0}")]
    NoExtension(PathBuf),

    /// The extension is not one of the supported formats
    #[error("unsupported caption format: '.{0}'")]
    UnsupportedFormat(String),

    /// The content violates the caption grammar
    #[error("parse error: {0}")]
    Parse(#[from] ParseError),

    /// Reading the file failed
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Errors that can occur when building the localization export view
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ExportError {
    /// A caption contains characters the localization tables can't hold
    #[error("'{key}' has forbidden characters ({forbidden}): {text}")]
    ForbiddenCharacters {
        /// Localization key of the caption
        key: String,
        /// The forbidden character set
        forbidden: String,
        /// The offending caption text
        text: String,
    },

    /// There is nothing to export
    #[error("track '{0}' has no captions to export")]
    EmptyTrack(String),
}

/// Errors found while checking a loaded configuration
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigError {
    #[error("validation.max_row_chars must be greater than zero")]
    ZeroRowBudget,

    #[error("concurrent_files must be greater than zero")]
    ZeroConcurrency,

    #[error("output.file_suffix can't be empty")]
    EmptyFileSuffix,
}
