/*!
 * Validation service that orchestrates all validators.
 *
 * This module provides a unified interface for running every check on a
 * caption track and collecting the findings into one `ValidationReport`.
 * Validation is a pure scan: the track is never modified.
 */

use log::debug;
use serde::{Deserialize, Serialize};

use crate::caption_track::CaptionTrack;

use super::characters::{DEFAULT_FORBIDDEN_CHARACTERS, ForbiddenCharacterValidator};
use super::length::{DEFAULT_MAX_ROW_CHARS, RowLengthValidator};
use super::report::{Finding, FindingCode, ValidationReport};
use super::timecodes::{TimecodeValidator, TimecodeValidatorConfig};

/// Configuration for the validation service
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValidationConfig {
    /// Maximum characters per subtitle row before a warning
    #[serde(default = "default_max_row_chars")]
    pub max_row_chars: usize,

    /// Characters that must not appear in any row
    #[serde(default = "default_forbidden_characters")]
    pub forbidden_characters: String,

    /// Whether to check that captions don't overlap
    #[serde(default = "default_true")]
    pub check_ordering: bool,
}

fn default_true() -> bool {
    true
}

fn default_max_row_chars() -> usize {
    DEFAULT_MAX_ROW_CHARS
}

fn default_forbidden_characters() -> String {
    DEFAULT_FORBIDDEN_CHARACTERS.to_string()
}

impl Default for ValidationConfig {
    fn default() -> Self {
        Self {
            max_row_chars: default_max_row_chars(),
            forbidden_characters: default_forbidden_characters(),
            check_ordering: true,
        }
    }
}

/// Runs every validator over a track
pub struct ValidationService {
    timecodes: TimecodeValidator,
    lengths: RowLengthValidator,
    characters: ForbiddenCharacterValidator,
}

impl ValidationService {
    /// Create a service with default configuration
    pub fn new() -> Self {
        Self::with_config(&ValidationConfig::default())
    }

    /// Create a service with custom configuration
    pub fn with_config(config: &ValidationConfig) -> Self {
        Self {
            timecodes: TimecodeValidator::with_config(TimecodeValidatorConfig {
                check_ordering: config.check_ordering,
            }),
            lengths: RowLengthValidator::with_limit(config.max_row_chars),
            characters: ForbiddenCharacterValidator::with_characters(config.forbidden_characters.clone()),
        }
    }

    /// Validate a whole track
    pub fn validate(&self, track: &CaptionTrack) -> ValidationReport {
        let mut report = ValidationReport::new(track.id(), track.len());

        report.extend(self.check_structure(track));

        for (index, rows) in track.rows().enumerate() {
            report.extend(self.lengths.validate_rows(index, rows));
        }

        report.extend(self.timecodes.validate_intervals(track.intervals()));

        for (index, rows) in track.rows().enumerate() {
            report.extend(self.characters.validate_rows(index, rows));
        }

        debug!(
            "Validated '{}': {} captions, {} errors, {} warnings",
            track.id(),
            track.len(),
            report.error_count(),
            report.warning_count()
        );

        report
    }

    // Rows and intervals live in one record per caption, so this only fires
    // if that pairing is ever broken
    fn check_structure(&self, track: &CaptionTrack) -> Option<Finding> {
        let rows = track.rows().count();
        let intervals = track.intervals().count();
        (rows != intervals).then(|| {
            Finding::error(
                FindingCode::StructureMismatch,
                None,
                format!(
                    "different size in the data structures: {} subtitle rows, {} intervals",
                    rows, intervals
                ),
            )
        })
    }
}

impl Default for ValidationService {
    fn default() -> Self {
        Self::new()
    }
}
