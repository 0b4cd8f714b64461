/*!
 * Caption track data model.
 *
 * A `CaptionTrack` is an ordered list of captions, each pairing up to two
 * subtitle rows with the interval during which they are visible. Captions
 * only enter a track through `try_insert`, which refuses empty captions and
 * inverted intervals, so every stored interval has its exit at or after its
 * entry.
 */

use std::path::Path;

use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;

use crate::errors::{BatchInsertError, QueryError, RejectReason};
use crate::timecode::TimeCode;

/// ID used when a track ID sanitizes down to nothing
pub const DEFAULT_TRACK_ID: &str = "Speech ID";

// @const: Anything that is not alphanumeric or a space
static TRACK_ID_FORBIDDEN: Lazy<Regex> = Lazy::new(|| Regex::new(r"[^a-zA-Z0-9 ]").unwrap());

/// Keep only ASCII alphanumerics and spaces; fall back to `DEFAULT_TRACK_ID`
pub fn sanitize_track_id(raw: &str) -> String {
    let cleaned = TRACK_ID_FORBIDDEN.replace_all(raw, "");
    if cleaned.trim().is_empty() {
        DEFAULT_TRACK_ID.to_string()
    } else {
        cleaned.into_owned()
    }
}

/// Localization key of caption `index` in track `track_id`
pub fn localization_key(track_id: &str, index: usize) -> String {
    format!("{} {}", track_id, index)
}

/// The one or two text rows of a caption
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SubtitleRows {
    pub first_row: String,
    /// Empty for single-row captions
    pub second_row: String,
}

impl SubtitleRows {
    pub fn new(first_row: impl Into<String>, second_row: impl Into<String>) -> Self {
        Self {
            first_row: first_row.into(),
            second_row: second_row.into(),
        }
    }

    /// Both rows are empty or whitespace
    pub fn is_blank(&self) -> bool {
        self.first_row.trim().is_empty() && self.second_row.trim().is_empty()
    }

    /// Whether there is a second row to show
    pub fn has_second_row(&self) -> bool {
        !self.second_row.trim().is_empty()
    }

    /// Rows as they go to a string table: first and second joined by a newline
    pub fn joined(&self) -> String {
        format!("{}\n{}", self.first_row, self.second_row)
    }

    /// Iterate over both rows, second one included even when empty
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        [self.first_row.as_str(), self.second_row.as_str()].into_iter()
    }
}

/// Visible window of a caption
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CaptionInterval {
    pub entry: TimeCode,
    pub exit: TimeCode,
}

impl CaptionInterval {
    pub fn new(entry: TimeCode, exit: TimeCode) -> Self {
        Self { entry, exit }
    }

    /// Exit comes before entry
    pub fn is_inverted(&self) -> bool {
        self.exit.total_millis() < self.entry.total_millis()
    }

    /// Visible time in milliseconds, `None` when inverted
    pub fn duration_millis(&self) -> Option<u64> {
        self.exit.total_millis().checked_sub(self.entry.total_millis())
    }
}

/// A caption: its rows and its interval
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CaptionEntry {
    pub rows: SubtitleRows,
    pub interval: CaptionInterval,
}

/// Ordered collection of captions produced by a parser
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CaptionTrack {
    id: String,
    entries: Vec<CaptionEntry>,
}

impl CaptionTrack {
    /// Create an empty track; the ID is sanitized
    pub fn new(id: &str) -> Self {
        Self {
            id: sanitize_track_id(id),
            entries: Vec::new(),
        }
    }

    /// Create an empty track named after a file stem
    pub fn for_path(path: &Path) -> Self {
        let stem = path
            .file_stem()
            .map(|stem| stem.to_string_lossy().to_string())
            .unwrap_or_default();
        Self::new(&stem)
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn entries(&self) -> &[CaptionEntry] {
        &self.entries
    }

    pub fn get(&self, index: usize) -> Option<&CaptionEntry> {
        self.entries.get(index)
    }

    /// Subtitle rows in track order
    pub fn rows(&self) -> impl Iterator<Item = &SubtitleRows> {
        self.entries.iter().map(|entry| &entry.rows)
    }

    /// Intervals in track order
    pub fn intervals(&self) -> impl Iterator<Item = &CaptionInterval> {
        self.entries.iter().map(|entry| &entry.interval)
    }

    /// Append a caption after checking it.
    ///
    /// Refuses captions whose rows are both blank and intervals whose exit
    /// is before the entry. On refusal the track is left untouched.
    pub fn try_insert(
        &mut self,
        first_row: impl Into<String>,
        second_row: impl Into<String>,
        entry: TimeCode,
        exit: TimeCode,
    ) -> Result<(), RejectReason> {
        let caption = Self::check_caption(first_row, second_row, entry, exit)?;
        self.entries.push(caption);
        Ok(())
    }

    /// Append several captions given as aligned sequences.
    ///
    /// Either every caption is inserted or none is.
    pub fn try_insert_all<S: AsRef<str>>(
        &mut self,
        first_rows: &[S],
        second_rows: &[S],
        entries: &[TimeCode],
        exits: &[TimeCode],
    ) -> Result<(), BatchInsertError> {
        let len = entries.len();
        if first_rows.len() != len || second_rows.len() != len || exits.len() != len {
            return Err(BatchInsertError::LengthMismatch {
                first_rows: first_rows.len(),
                second_rows: second_rows.len(),
                entries: len,
                exits: exits.len(),
            });
        }

        if len == 0 {
            return Err(BatchInsertError::Empty);
        }

        let mut checked = Vec::with_capacity(len);
        for index in 0..len {
            let caption = Self::check_caption(
                first_rows[index].as_ref(),
                second_rows[index].as_ref(),
                entries[index],
                exits[index],
            )
            .map_err(|reason| BatchInsertError::Rejected { index, reason })?;
            checked.push(caption);
        }

        self.entries.extend(checked);
        Ok(())
    }

    /// Seconds caption `index` stays on screen
    pub fn visualization_time(&self, index: usize) -> Result<f64, QueryError> {
        let caption = self.checked_get(index)?;
        caption
            .interval
            .duration_millis()
            .map(|millis| millis as f64 / 1000.0)
            .ok_or(QueryError::InvertedInterval { index })
    }

    /// Seconds from the start of the track until caption `index` shows
    pub fn entry_seconds(&self, index: usize) -> Result<f64, QueryError> {
        Ok(self.checked_get(index)?.interval.entry.total_seconds())
    }

    /// Localization key of caption `index`: `"{id} {index}"`
    pub fn localization_key(&self, index: usize) -> String {
        localization_key(&self.id, index)
    }

    fn checked_get(&self, index: usize) -> Result<&CaptionEntry, QueryError> {
        self.entries.get(index).ok_or(QueryError::IndexOutOfRange {
            index,
            len: self.entries.len(),
        })
    }

    fn check_caption(
        first_row: impl Into<String>,
        second_row: impl Into<String>,
        entry: TimeCode,
        exit: TimeCode,
    ) -> Result<CaptionEntry, RejectReason> {
        let rows = SubtitleRows::new(first_row, second_row);
        if rows.is_blank() {
            return Err(RejectReason::EmptyCaption);
        }

        let interval = CaptionInterval::new(entry, exit);
        if interval.is_inverted() {
            return Err(RejectReason::InvertedInterval {
                entry_seconds: entry.total_seconds(),
                exit_seconds: exit.total_seconds(),
            });
        }

        Ok(CaptionEntry { rows, interval })
    }

    /// Push without the insertion checks, for exercising validators
    #[cfg(test)]
    pub(crate) fn push_unchecked(&mut self, rows: SubtitleRows, interval: CaptionInterval) {
        self.entries.push(CaptionEntry { rows, interval });
    }
}
