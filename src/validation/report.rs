/*!
 * Validation findings and the report that aggregates them.
 */

use std::fmt;

use serde::Serialize;

/// How serious a finding is
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// Worth fixing, does not fail validation
    Warning,
    /// Fails validation
    Error,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Warning => f.write_str("warning"),
            Severity::Error => f.write_str("error"),
        }
    }
}

/// Machine-readable kind of a finding
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum FindingCode {
    /// Row and interval sequences have different lengths
    StructureMismatch,
    /// A row has more characters than the budget
    RowTooLong,
    /// An interval's exit is before its entry
    InvertedInterval,
    /// An interval starts before the previous one ends
    IntervalOverlap,
    /// A row contains a forbidden character
    ForbiddenCharacter,
}

impl FindingCode {
    pub fn as_str(&self) -> &'static str {
        match self {
            FindingCode::StructureMismatch => "structure-mismatch",
            FindingCode::RowTooLong => "row-too-long",
            FindingCode::InvertedInterval => "inverted-interval",
            FindingCode::IntervalOverlap => "interval-overlap",
            FindingCode::ForbiddenCharacter => "forbidden-character",
        }
    }
}

impl fmt::Display for FindingCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Which row of a caption a finding points at
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Row {
    First,
    Second,
}

impl Row {
    /// Both rows, first one first
    pub const BOTH: [Row; 2] = [Row::First, Row::Second];
}

impl fmt::Display for Row {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Row::First => f.write_str("first row"),
            Row::Second => f.write_str("second row"),
        }
    }
}

/// A single problem found in a track
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Finding {
    pub severity: Severity,
    pub code: FindingCode,
    /// Caption index, `None` for track-wide findings
    pub index: Option<usize>,
    /// Human-readable description
    pub message: String,
}

impl Finding {
    pub fn warning(code: FindingCode, index: Option<usize>, message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Warning,
            code,
            index,
            message: message.into(),
        }
    }

    pub fn error(code: FindingCode, index: Option<usize>, message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Error,
            code,
            index,
            message: message.into(),
        }
    }

    pub fn is_error(&self) -> bool {
        self.severity == Severity::Error
    }
}

impl fmt::Display for Finding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}: {}", self.severity, self.code, self.message)
    }
}

/// Every finding of a validation run over one track
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ValidationReport {
    /// Track that was validated
    pub track_id: String,
    /// Number of captions checked
    pub caption_count: usize,
    pub findings: Vec<Finding>,
}

impl ValidationReport {
    pub fn new(track_id: impl Into<String>, caption_count: usize) -> Self {
        Self {
            track_id: track_id.into(),
            caption_count,
            findings: Vec::new(),
        }
    }

    /// Successful when there is no error-severity finding
    pub fn is_success(&self) -> bool {
        !self.findings.iter().any(Finding::is_error)
    }

    pub fn errors(&self) -> impl Iterator<Item = &Finding> {
        self.findings.iter().filter(|f| f.severity == Severity::Error)
    }

    pub fn warnings(&self) -> impl Iterator<Item = &Finding> {
        self.findings.iter().filter(|f| f.severity == Severity::Warning)
    }

    pub fn error_count(&self) -> usize {
        self.errors().count()
    }

    pub fn warning_count(&self) -> usize {
        self.warnings().count()
    }

    /// Findings carrying `code`
    pub fn with_code(&self, code: FindingCode) -> impl Iterator<Item = &Finding> {
        self.findings.iter().filter(move |f| f.code == code)
    }

    pub fn extend(&mut self, findings: impl IntoIterator<Item = Finding>) {
        self.findings.extend(findings);
    }
}

impl fmt::Display for ValidationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Validation of '{}' ({} captions):", self.track_id, self.caption_count)?;
        for finding in &self.findings {
            writeln!(f, "\t✖ {}", finding)?;
        }
        if self.is_success() {
            write!(f, "\t✔ SUCCESS")
        } else {
            write!(
                f,
                "\t{} errors, {} warnings",
                self.error_count(),
                self.warning_count()
            )
        }
    }
}
