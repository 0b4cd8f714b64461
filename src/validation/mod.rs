/*!
 * Validation module for caption tracks.
 *
 * This module provides the checks run over a finished track:
 * - Timecode validation (inverted intervals, overlapping captions)
 * - Row length validation (per-row character budget)
 * - Forbidden character detection
 *
 * # Architecture
 *
 * - `report`: Findings, severities and the aggregated report
 * - `timecodes`: Validates interval integrity and ordering
 * - `length`: Validates row lengths
 * - `characters`: Detects forbidden characters
 * - `service`: Orchestrates all validators
 */

pub mod characters;
pub mod length;
pub mod report;
pub mod service;
pub mod timecodes;

// Re-export main types
pub use report::{Finding, FindingCode, Severity, ValidationReport};
pub use service::{ValidationConfig, ValidationService};
