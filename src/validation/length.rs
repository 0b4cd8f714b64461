/*!
 * Row length validation for caption tracks.
 *
 * A caption row should fit on screen: longer rows are reported as warnings,
 * they never fail validation.
 */

use crate::caption_track::SubtitleRows;

use super::report::{Finding, FindingCode, Row};

/// Default maximum characters per row (usually between 35 and 42)
pub const DEFAULT_MAX_ROW_CHARS: usize = 35;

/// Row length validator
pub struct RowLengthValidator {
    max_row_chars: usize,
}

impl RowLengthValidator {
    pub fn new() -> Self {
        Self::with_limit(DEFAULT_MAX_ROW_CHARS)
    }

    pub fn with_limit(max_row_chars: usize) -> Self {
        Self { max_row_chars }
    }

    pub fn max_row_chars(&self) -> usize {
        self.max_row_chars
    }

    /// Check both rows of one caption
    pub fn validate_rows(&self, index: usize, rows: &SubtitleRows) -> Vec<Finding> {
        Row::BOTH
            .into_iter()
            .zip(rows.iter())
            .filter_map(|(row, text)| {
                let count = text.chars().count();
                (count > self.max_row_chars).then(|| {
                    Finding::warning(
                        FindingCode::RowTooLong,
                        Some(index),
                        format!(
                            "subtitle with index {} ({}) has more than {} characters, a total of {}",
                            index, row, self.max_row_chars, count
                        ),
                    )
                })
            })
            .collect()
    }
}

impl Default for RowLengthValidator {
    fn default() -> Self {
        Self::new()
    }
}
