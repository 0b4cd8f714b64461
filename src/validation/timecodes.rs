/*!
 * Timecode validation for caption tracks.
 *
 * This module validates that intervals are:
 * - Internally consistent (exit at or after entry)
 * - Ordered along the track (each caption starts at or after the previous exit)
 */

use log::debug;

use crate::caption_track::CaptionInterval;

use super::report::{Finding, FindingCode};

/// Configuration for timecode validation
#[derive(Debug, Clone)]
pub struct TimecodeValidatorConfig {
    /// Whether to check ordering between consecutive captions
    pub check_ordering: bool,
}

impl Default for TimecodeValidatorConfig {
    fn default() -> Self {
        Self { check_ordering: true }
    }
}

/// Timecode validator for caption intervals
pub struct TimecodeValidator {
    config: TimecodeValidatorConfig,
}

impl TimecodeValidator {
    /// Create a new validator with default configuration
    pub fn new() -> Self {
        Self {
            config: TimecodeValidatorConfig::default(),
        }
    }

    /// Create a new validator with custom configuration
    pub fn with_config(config: TimecodeValidatorConfig) -> Self {
        Self { config }
    }

    /// Check a single interval
    pub fn validate_interval(&self, index: usize, interval: &CaptionInterval) -> Option<Finding> {
        if !interval.is_inverted() {
            return None;
        }

        Some(Finding::error(
            FindingCode::InvertedInterval,
            Some(index),
            format!(
                "entry time is greater than exit time in index {}: exit ({}s) < entry ({}s)",
                index,
                interval.exit.total_seconds(),
                interval.entry.total_seconds()
            ),
        ))
    }

    /// Check every interval and, if enabled, the order between neighbours
    pub fn validate_intervals<'a, I>(&self, intervals: I) -> Vec<Finding>
    where
        I: IntoIterator<Item = &'a CaptionInterval>,
    {
        let mut findings = Vec::new();
        let mut previous: Option<&CaptionInterval> = None;
        let mut overlap_count = 0;

        for (index, interval) in intervals.into_iter().enumerate() {
            findings.extend(self.validate_interval(index, interval));

            if let Some(prev) = previous.filter(|_| self.config.check_ordering) {
                if interval.entry.total_millis() < prev.exit.total_millis() {
                    overlap_count += 1;
                    findings.push(Finding::error(
                        FindingCode::IntervalOverlap,
                        Some(index),
                        format!(
                            "interval invading in index {}: entry ({}s) is before the exit of index {} ({}s)",
                            index,
                            interval.entry.total_seconds(),
                            index - 1,
                            prev.exit.total_seconds()
                        ),
                    ));
                }
            }

            previous = Some(interval);
        }

        debug!(
            "Timecode validation: {} findings, {} overlaps",
            findings.len(),
            overlap_count
        );

        findings
    }
}

impl Default for TimecodeValidator {
    fn default() -> Self {
        Self::new()
    }
}
