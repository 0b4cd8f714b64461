/*!
 * Forbidden character detection.
 *
 * Some characters can't travel to the localization tables (`{` and `}` are
 * placeholders there). Validation reports them as warnings; the export stage
 * refuses them.
 */

use crate::caption_track::SubtitleRows;

use super::report::{Finding, FindingCode, Row};

/// Characters captions must not contain
pub const DEFAULT_FORBIDDEN_CHARACTERS: &str = "{}";

/// Forbidden character checker
#[derive(Debug, Clone)]
pub struct ForbiddenCharacterValidator {
    forbidden: String,
}

impl ForbiddenCharacterValidator {
    pub fn new() -> Self {
        Self::with_characters(DEFAULT_FORBIDDEN_CHARACTERS)
    }

    pub fn with_characters(forbidden: impl Into<String>) -> Self {
        Self {
            forbidden: forbidden.into(),
        }
    }

    pub fn forbidden(&self) -> &str {
        &self.forbidden
    }

    /// Whether `text` has any forbidden character
    pub fn contains_forbidden(&self, text: &str) -> bool {
        text.chars().any(|c| self.forbidden.contains(c))
    }

    /// `text` with every forbidden character removed
    pub fn strip(&self, text: &str) -> String {
        text.chars().filter(|c| !self.forbidden.contains(*c)).collect()
    }

    /// Check both rows of one caption
    pub fn validate_rows(&self, index: usize, rows: &SubtitleRows) -> Vec<Finding> {
        Row::BOTH
            .into_iter()
            .zip(rows.iter())
            .filter(|(_, text)| self.contains_forbidden(text))
            .map(|(row, text)| {
                Finding::warning(
                    FindingCode::ForbiddenCharacter,
                    Some(index),
                    format!(
                        "index {} ({}) has forbidden characters ({}): {}",
                        index, row, self.forbidden, text
                    ),
                )
            })
            .collect()
    }
}

impl Default for ForbiddenCharacterValidator {
    fn default() -> Self {
        Self::new()
    }
}
