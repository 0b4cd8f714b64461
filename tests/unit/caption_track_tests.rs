/*!
 * Tests for time codes and caption tracks
 */

use std::path::Path;

use captionkit::caption_track::{CaptionTrack, DEFAULT_TRACK_ID, SubtitleRows, sanitize_track_id};
use captionkit::errors::{BatchInsertError, QueryError, RejectReason};
use captionkit::timecode::{TimeCode, TimeCodeField};

fn secs(total: u32) -> TimeCode {
    TimeCode::from_seconds(total)
}

#[test]
fn test_timecode_display_withAllFields_shouldUseSrtLayout() {
    let time = TimeCode::new(1, 23, 45, 678);

    assert_eq!(time.to_string(), "01:23:45,678");
    assert_eq!(time.total_millis(), 5_025_678);
}

#[test]
fn test_timecode_clamped_withHourOutOfRange_shouldClampAndRecord() {
    let clamped = TimeCode::clamped(25, 10, 0, 0);

    assert!(!clamped.is_exact());
    assert_eq!(clamped.time_code.hours(), TimeCode::MAX_HOURS);
    assert_eq!(clamped.time_code.minutes(), 10);
    assert_eq!(clamped.clamps.len(), 1);
    assert_eq!(clamped.clamps[0].field, TimeCodeField::Hours);
    assert_eq!(clamped.clamps[0].requested, 25);
}

#[test]
fn test_timecode_clamped_withNegativeValue_shouldClampToZero() {
    let clamped = TimeCode::clamped(0, 0, -4, 0);

    assert_eq!(clamped.time_code.seconds(), 0);
    assert_eq!(clamped.clamps[0].clamped_to, 0);
}

#[test]
fn test_timecode_ordering_shouldFollowTotalMillis() {
    assert!(TimeCode::new(0, 0, 59, 999) < TimeCode::new(0, 1, 0, 0));
    assert!(TimeCode::new(1, 0, 0, 0) > TimeCode::new(0, 59, 59, 999));
}

#[test]
fn test_try_insert_withBlankRows_shouldRejectAndLeaveTrackUnchanged() {
    let mut track = CaptionTrack::new("Intro");

    let result = track.try_insert("   ", "", secs(0), secs(1));

    assert_eq!(result, Err(RejectReason::EmptyCaption));
    assert!(track.is_empty());
}

#[test]
fn test_try_insert_withInvertedInterval_shouldReject() {
    let mut track = CaptionTrack::new("Intro");

    let result = track.try_insert("Hello", "", secs(5), secs(3));

    assert_eq!(
        result,
        Err(RejectReason::InvertedInterval {
            entry_seconds: 5.0,
            exit_seconds: 3.0
        })
    );
    assert_eq!(track.len(), 0);
}

#[test]
fn test_try_insert_withBlankFirstRowOnly_shouldAccept() {
    let mut track = CaptionTrack::new("Intro");

    track.try_insert("", "Second row only", secs(0), secs(1)).unwrap();

    assert_eq!(track.len(), 1);
    assert_eq!(track.get(0).unwrap().rows.second_row, "Second row only");
}

#[test]
fn test_visualization_time_withZeroLengthInterval_shouldBeZero() {
    let mut track = CaptionTrack::new("Intro");
    track.try_insert("Flash", "", secs(2), secs(2)).unwrap();

    assert_eq!(track.visualization_time(0), Ok(0.0));
}

#[test]
fn test_visualization_time_withMillis_shouldKeepFraction() {
    let mut track = CaptionTrack::new("Intro");
    track
        .try_insert("Hello", "", TimeCode::new(0, 0, 1, 0), TimeCode::new(0, 0, 4, 500))
        .unwrap();

    assert_eq!(track.visualization_time(0), Ok(3.5));
    assert_eq!(track.entry_seconds(0), Ok(1.0));
}

#[test]
fn test_visualization_time_withIndexOutOfRange_shouldFail() {
    let track = CaptionTrack::new("Intro");

    assert_eq!(
        track.visualization_time(3),
        Err(QueryError::IndexOutOfRange { index: 3, len: 0 })
    );
}

#[test]
fn test_try_insert_all_withMismatchedLengths_shouldFail() {
    let mut track = CaptionTrack::new("Batch");

    let result = track.try_insert_all(&["a", "b"], &["", ""], &[secs(0)], &[secs(1), secs(2)]);

    assert!(matches!(result, Err(BatchInsertError::LengthMismatch { entries: 1, .. })));
    assert!(track.is_empty());
}

#[test]
fn test_try_insert_all_withOneBadCaption_shouldInsertNothing() {
    let mut track = CaptionTrack::new("Batch");

    let result = track.try_insert_all(
        &["one", "two", "three"],
        &["", "", ""],
        &[secs(0), secs(5), secs(6)],
        &[secs(1), secs(4), secs(7)],
    );

    assert!(matches!(result, Err(BatchInsertError::Rejected { index: 1, .. })));
    assert!(track.is_empty());
}

#[test]
fn test_try_insert_all_withValidCaptions_shouldAppendInOrder() {
    let mut track = CaptionTrack::new("Batch");

    track
        .try_insert_all(&["one", "two"], &["", "2"], &[secs(0), secs(2)], &[secs(1), secs(3)])
        .unwrap();

    assert_eq!(track.len(), 2);
    assert_eq!(track.rows().nth(1), Some(&SubtitleRows::new("two", "2")));
    assert_eq!(track.intervals().count(), track.rows().count());
}

#[test]
fn test_track_id_withPunctuation_shouldBeSanitized() {
    assert_eq!(sanitize_track_id("intro-01_final!"), "intro01final");
    assert_eq!(sanitize_track_id("Scene 2"), "Scene 2");
    assert_eq!(sanitize_track_id("***"), DEFAULT_TRACK_ID);
}

#[test]
fn test_for_path_shouldNameTrackAfterStem() {
    let track = CaptionTrack::for_path(Path::new("/tmp/captions/boss-fight.srt"));

    assert_eq!(track.id(), "bossfight");
    assert_eq!(track.localization_key(4), "bossfight 4");
}

#[test]
fn test_subtitle_rows_joined_shouldSeparateWithNewline() {
    assert_eq!(SubtitleRows::new("Hello", "World").joined(), "Hello\nWorld");
}
