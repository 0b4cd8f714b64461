use log::{error, info, warn};

use crate::diagnostics::Diagnostic;
use crate::errors::DispatchError;
use crate::validation::{Severity, ValidationReport};

// @module: Display collaborator for diagnostics and validation reports

/// Renders parse diagnostics, failures and validation reports for a human.
///
/// The library only returns data; whoever drives it picks a reporter.
pub trait Reporter: Send + Sync {
    /// An advisory attached to a successful parse of `source`
    fn diagnostic(&self, source: &str, diagnostic: &Diagnostic);

    /// A fatal failure while reading `source`
    fn dispatch_error(&self, source: &str, error: &DispatchError);

    /// The outcome of validating a track read from `source`
    fn validation(&self, source: &str, report: &ValidationReport);
}

// @struct: Reporter writing through the log facade
#[derive(Debug, Clone, Copy, Default)]
pub struct LogReporter;

impl Reporter for LogReporter {
    fn diagnostic(&self, source: &str, diagnostic: &Diagnostic) {
        warn!("{}: {}", source, diagnostic);
    }

    fn dispatch_error(&self, source: &str, error: &DispatchError) {
        error!("{}: {}", source, error);
    }

    fn validation(&self, source: &str, report: &ValidationReport) {
        for finding in &report.findings {
            match finding.severity {
                Severity::Error => error!("{}: ✖ {}", source, finding),
                Severity::Warning => warn!("{}: ✖ {}", source, finding),
            }
        }

        if report.is_success() {
            info!(
                "{}: ✔ '{}' is valid ({} captions, {} warnings)",
                source,
                report.track_id,
                report.caption_count,
                report.warning_count()
            );
        } else {
            error!(
                "{}: '{}' failed validation with {} errors",
                source,
                report.track_id,
                report.error_count()
            );
        }
    }
}
