use anyhow::{Context, Result, anyhow};
use futures::stream::{self, StreamExt};
use indicatif::{ProgressBar, ProgressStyle};
use log::{debug, info, warn};
use serde::Serialize;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Instant;

use crate::app_config::Config;
use crate::caption_track::CaptionTrack;
use crate::diagnostics::{Diagnostic, Parsed};
use crate::dispatcher::{CaptionParser, FormatDispatcher};
use crate::errors::DispatchError;
use crate::export::LocalizationExporter;
use crate::file_utils::FileManager;
use crate::reporting::{LogReporter, Reporter};
use crate::validation::ValidationService;
use crate::validation::characters::ForbiddenCharacterValidator;

// @module: Application controller for caption processing

/// Outcome of reading one input file
pub type FileOutcome = (PathBuf, Result<Parsed<CaptionTrack>, DispatchError>);

/// What a `parse` run did with its inputs
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunSummary {
    pub written: usize,
    pub skipped: usize,
    pub failed: usize,
}

impl RunSummary {
    pub fn is_success(&self) -> bool {
        self.failed == 0
    }
}

// Shape of the JSON written for each parsed file
#[derive(Serialize)]
struct TrackDocument<'a> {
    track: &'a CaptionTrack,
    diagnostics: &'a [Diagnostic],
}

/// Main application controller
pub struct Controller {
    // @field: App configuration
    config: Config,

    // @field: Shared between the blocking parse tasks
    dispatcher: Arc<FormatDispatcher>,

    // @field: Where diagnostics and reports go
    reporter: Arc<dyn Reporter>,
}

impl Controller {
    /// Create a new controller for test purposes with default configuration
    pub fn new_for_test() -> Result<Self> {
        Self::with_config(Config::default())
    }

    // @method: Create a new controller with the given configuration
    pub fn with_config(config: Config) -> Result<Self> {
        Self::with_reporter(config, Arc::new(LogReporter))
    }

    // @method: Create a controller that reports through `reporter`
    pub fn with_reporter(config: Config, reporter: Arc<dyn Reporter>) -> Result<Self> {
        config.validate().context("Configuration validation failed")?;

        Ok(Self {
            config,
            dispatcher: Arc::new(FormatDispatcher::new()),
            reporter,
        })
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Parse every input, at most `concurrent_files` at a time.
    ///
    /// Outcomes come back in input order. A failing file doesn't stop the
    /// others.
    pub async fn parse_all(&self, inputs: &[PathBuf]) -> Result<Vec<FileOutcome>> {
        let progress_bar = Self::progress_bar(inputs.len());

        let outcomes = stream::iter(inputs.iter().cloned())
            .map(|path| {
                let dispatcher = Arc::clone(&self.dispatcher);
                let progress_bar = progress_bar.clone();

                async move {
                    let task_path = path.clone();
                    let result = tokio::task::spawn_blocking(move || dispatcher.parse(&task_path))
                        .await
                        .with_context(|| format!("Parsing task for {:?} did not complete", path))?;

                    if let Some(progress_bar) = &progress_bar {
                        progress_bar.inc(1);
                    }

                    Ok::<FileOutcome, anyhow::Error>((path, result))
                }
            })
            .buffered(self.config.concurrent_files)
            .collect::<Vec<_>>()
            .await;

        if let Some(progress_bar) = progress_bar {
            progress_bar.finish_with_message("done");
        }

        outcomes.into_iter().collect()
    }

    /// Parse inputs and write one JSON document per track.
    ///
    /// Output goes to `output_dir`, or next to each input when not given.
    /// Existing outputs are kept unless `force_overwrite` is set.
    pub async fn run_parse(
        &self,
        inputs: &[PathBuf],
        output_dir: Option<&Path>,
        force_overwrite: bool,
    ) -> Result<RunSummary> {
        let start_time = Instant::now();

        if let Some(output_dir) = output_dir {
            FileManager::ensure_dir(output_dir)?;
        }

        let mut summary = RunSummary::default();

        for (source, result) in self.parse_all(inputs).await? {
            let label = source.display().to_string();

            let parsed = match result {
                Ok(parsed) => parsed,
                Err(e) => {
                    self.reporter.dispatch_error(&label, &e);
                    summary.failed += 1;
                    continue;
                }
            };
            self.report_diagnostics(&label, &parsed);

            let target_dir = output_dir
                .map(Path::to_path_buf)
                .or_else(|| source.parent().map(Path::to_path_buf))
                .unwrap_or_else(|| PathBuf::from("."));
            let output_path =
                FileManager::generate_output_path(&source, &target_dir, &self.config.output.file_suffix, "json");

            if FileManager::file_exists(&output_path) && !force_overwrite {
                warn!("Skipping {:?}, output already exists (use -f to force overwrite)", output_path);
                summary.skipped += 1;
                continue;
            }

            let document = TrackDocument {
                track: &parsed.value,
                diagnostics: &parsed.diagnostics,
            };
            let json = self.to_json(&document)?;
            FileManager::write_to_file(&output_path, &json)?;

            info!("Success: {:?} ({} captions)", output_path, parsed.value.len());
            summary.written += 1;
        }

        debug!(
            "Parse run finished in {:?}: {} written, {} skipped, {} failed",
            start_time.elapsed(),
            summary.written,
            summary.skipped,
            summary.failed
        );

        Ok(summary)
    }

    /// Parse and validate inputs; true when every file parsed and passed
    pub async fn run_validate(&self, inputs: &[PathBuf]) -> Result<bool> {
        let service = ValidationService::with_config(&self.config.validation);
        let mut all_valid = true;

        for (source, result) in self.parse_all(inputs).await? {
            let label = source.display().to_string();

            match result {
                Ok(parsed) => {
                    self.report_diagnostics(&label, &parsed);
                    let report = service.validate(&parsed.value);
                    self.reporter.validation(&label, &report);
                    all_valid &= report.is_success();
                }
                Err(e) => {
                    self.reporter.dispatch_error(&label, &e);
                    all_valid = false;
                }
            }
        }

        Ok(all_valid)
    }

    /// Export the localization tables of one input.
    ///
    /// Written to `output` when given, printed to stdout otherwise.
    pub async fn run_export(&self, input: &Path, output: Option<&Path>) -> Result<()> {
        let (source, result) = self
            .parse_all(&[input.to_path_buf()])
            .await?
            .pop()
            .ok_or_else(|| anyhow!("No result for {:?}", input))?;
        let label = source.display().to_string();

        let parsed = result.map_err(|e| {
            self.reporter.dispatch_error(&label, &e);
            anyhow::Error::new(e)
        })?;
        self.report_diagnostics(&label, &parsed);

        let exporter = LocalizationExporter::with_characters(ForbiddenCharacterValidator::with_characters(
            self.config.validation.forbidden_characters.clone(),
        ));
        let export = exporter
            .export(&parsed.value)
            .with_context(|| format!("Failed to export {:?}", source))?;
        let json = self.to_json(&export)?;

        match output {
            Some(path) => {
                FileManager::write_to_file(path, &json)?;
                info!("Success: {:?} ({} keys)", path, export.captions.len());
            }
            None => println!("{}", json),
        }

        Ok(())
    }

    fn report_diagnostics(&self, label: &str, parsed: &Parsed<CaptionTrack>) {
        for diagnostic in &parsed.diagnostics {
            self.reporter.diagnostic(label, diagnostic);
        }
    }

    fn to_json<T: Serialize>(&self, value: &T) -> Result<String> {
        let json = if self.config.output.pretty_json {
            serde_json::to_string_pretty(value)
        } else {
            serde_json::to_string(value)
        };
        json.context("Failed to serialize output to JSON")
    }

    // Only shown when there's more than one file to go through
    fn progress_bar(total: usize) -> Option<ProgressBar> {
        if total <= 1 {
            return None;
        }

        let progress_bar = ProgressBar::new(total as u64);
        let template_result = ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} files ({percent}%) {msg} {eta}")
            .or_else(|_| ProgressStyle::default_bar().template("{spinner} [{elapsed_precise}] [{bar:40}] {pos}/{len} ({percent}%) {msg}"))
            .unwrap_or_else(|_| ProgressStyle::default_bar());
        progress_bar.set_style(template_result.progress_chars("█▓▒░"));

        Some(progress_bar)
    }
}
