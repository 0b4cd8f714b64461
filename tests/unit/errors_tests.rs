/*!
 * Tests for error types and conversions
 */

use std::path::PathBuf;

use captionkit::errors::{
    BatchInsertError, ConfigError, DispatchError, ExportError, ParseError, ParseErrorKind, QueryError,
    RejectReason,
};
use captionkit::srt_parser::ParserState;

#[test]
fn test_parseError_display_shouldIncludeLineAndState() {
    let error = ParseError {
        line: 12,
        state: ParserState::ExpectIndex,
        kind: ParseErrorKind::UnexpectedIndex { found: 7, expected: 4 },
    };

    let display = error.to_string();

    assert!(display.contains("line 12"));
    assert!(display.contains("expecting index"));
    assert!(display.contains("is 7 but should be 4"));
}

#[test]
fn test_dispatchError_fromParseError_shouldWrap() {
    let parse_error = ParseError {
        line: 3,
        state: ParserState::ExpectRowOne,
        kind: ParseErrorKind::EmptyFirstRow,
    };

    let error: DispatchError = parse_error.clone().into();

    assert!(matches!(&error, DispatchError::Parse(inner) if *inner == parse_error));
    assert!(error.to_string().contains("row one can't be an empty line"));
}

#[test]
fn test_dispatchError_io_shouldExposeSource() {
    let error = DispatchError::Io {
        path: PathBuf::from("intro.srt"),
        source: std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
    };

    assert!(std::error::Error::source(&error).is_some());
    assert!(error.to_string().contains("intro.srt"));
}

#[test]
fn test_dispatchError_unsupportedFormat_shouldShowExtension() {
    let error = DispatchError::UnsupportedFormat("vtt".to_string());

    assert_eq!(error.to_string(), "unsupported caption format: '.vtt'");
}

#[test]
fn test_rejectReason_display_shouldGiveSeconds() {
    let reason = RejectReason::InvertedInterval {
        entry_seconds: 5.0,
        exit_seconds: 2.5,
    };

    assert_eq!(reason.to_string(), "exit time (2.5s) is before entry time (5s)");
    assert_eq!(RejectReason::EmptyCaption.to_string(), "caption is empty");
}

#[test]
fn test_batchInsertError_rejected_shouldNameIndex() {
    let error = BatchInsertError::Rejected {
        index: 2,
        reason: RejectReason::EmptyCaption,
    };

    assert_eq!(error.to_string(), "caption 2 of the batch was rejected: caption is empty");
}

#[test]
fn test_queryError_outOfRange_shouldShowLength() {
    let error = QueryError::IndexOutOfRange { index: 9, len: 3 };

    assert!(error.to_string().contains("track has 3 captions"));
}

#[test]
fn test_exportError_and_configError_shouldDisplay() {
    assert!(ExportError::EmptyTrack("Intro".to_string()).to_string().contains("'Intro'"));
    assert!(ConfigError::ZeroConcurrency.to_string().contains("concurrent_files"));
}

#[test]
fn test_errors_intoAnyhow_shouldKeepMessage() {
    let error: anyhow::Error = DispatchError::NoExtension(PathBuf::from("intro")).into();

    assert!(error.to_string().contains("no extension"));
}
