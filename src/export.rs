/*!
 * Localization export view.
 *
 * Builds the entries a localization collaborator copies into its string and
 * asset tables. Every caption is keyed `"{track ID} {index}"`, so key `n`
 * of the caption table and key `n` of the interval table always describe the
 * same caption. Unlike validation, export refuses forbidden characters.
 */

use serde::Serialize;

use crate::caption_track::{CaptionInterval, CaptionTrack};
use crate::errors::ExportError;
use crate::validation::characters::ForbiddenCharacterValidator;

/// Caption text entry: `"row one\nrow two"`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CaptionTextEntry {
    pub key: String,
    pub text: String,
}

/// Interval entry with its on-screen time
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IntervalEntry {
    pub key: String,
    pub interval: CaptionInterval,
    pub entry_seconds: f64,
    pub visualization_seconds: f64,
}

/// Both tables of a track, index-aligned by key
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LocalizationExport {
    pub track_id: String,
    pub captions: Vec<CaptionTextEntry>,
    pub intervals: Vec<IntervalEntry>,
}

/// Builds `LocalizationExport` values
pub struct LocalizationExporter {
    characters: ForbiddenCharacterValidator,
}

impl LocalizationExporter {
    pub fn new() -> Self {
        Self::with_characters(ForbiddenCharacterValidator::new())
    }

    pub fn with_characters(characters: ForbiddenCharacterValidator) -> Self {
        Self { characters }
    }

    /// Build the export view of `track`
    pub fn export(&self, track: &CaptionTrack) -> Result<LocalizationExport, ExportError> {
        if track.is_empty() {
            return Err(ExportError::EmptyTrack(track.id().to_string()));
        }

        let mut captions = Vec::with_capacity(track.len());
        let mut intervals = Vec::with_capacity(track.len());

        for (index, caption) in track.entries().iter().enumerate() {
            let key = track.localization_key(index);
            let text = caption.rows.joined();

            if self.characters.contains_forbidden(&text) {
                return Err(ExportError::ForbiddenCharacters {
                    key,
                    forbidden: self.characters.forbidden().to_string(),
                    text,
                });
            }

            // Tracks only hold intervals that went through try_insert
            let visualization_seconds = caption
                .interval
                .duration_millis()
                .map(|millis| millis as f64 / 1000.0)
                .unwrap_or_default();

            intervals.push(IntervalEntry {
                key: key.clone(),
                interval: caption.interval,
                entry_seconds: caption.interval.entry.total_seconds(),
                visualization_seconds,
            });
            captions.push(CaptionTextEntry { key, text });
        }

        Ok(LocalizationExport {
            track_id: track.id().to_string(),
            captions,
            intervals,
        })
    }
}

impl Default for LocalizationExporter {
    fn default() -> Self {
        Self::new()
    }
}
