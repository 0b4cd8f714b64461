// Module-specific lints configuration
#![allow(clippy::uninlined_format_args)]

use anyhow::Result;
use clap::{CommandFactory, Parser, Subcommand, ValueEnum};
use clap_complete::{Shell, generate};
use log::{Level, LevelFilter, Log, Metadata, Record, SetLoggerError, error, info};
use std::io::Write;
use std::path::PathBuf;
use std::process::ExitCode;

use captionkit::app_config::{Config, LogLevel};
use captionkit::app_controller::Controller;

/// CLI Wrapper for LogLevel to implement ValueEnum
#[derive(Debug, Clone, ValueEnum)]
enum CliLogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<CliLogLevel> for LogLevel {
    fn from(cli_level: CliLogLevel) -> Self {
        match cli_level {
            CliLogLevel::Error => LogLevel::Error,
            CliLogLevel::Warn => LogLevel::Warn,
            CliLogLevel::Info => LogLevel::Info,
            CliLogLevel::Debug => LogLevel::Debug,
            CliLogLevel::Trace => LogLevel::Trace,
        }
    }
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Parse caption files and write each track as JSON
    Parse {
        /// Caption files to parse
        #[arg(value_name = "INPUT", required = true)]
        inputs: Vec<PathBuf>,

        /// Directory for the JSON files (defaults to next to each input)
        #[arg(short, long, value_name = "DIR")]
        output_dir: Option<PathBuf>,

        /// Force overwrite of existing output files
        #[arg(short, long)]
        force_overwrite: bool,
    },

    /// Parse caption files and check them, exits with 1 on any error
    Validate {
        /// Caption files to validate
        #[arg(value_name = "INPUT", required = true)]
        inputs: Vec<PathBuf>,
    },

    /// Export the localization tables of a caption file
    Export {
        /// Caption file to export
        #[arg(value_name = "INPUT")]
        input: PathBuf,

        /// Output file (defaults to stdout)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,
    },

    /// Generate shell completions for captionkit
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

/// captionkit - caption file parser and validator
///
/// Reads SubRip caption files into caption tracks, validates them and
/// exports localization tables.
#[derive(Parser, Debug)]
#[command(name = "captionkit")]
#[command(version)]
#[command(about = "Caption file parser and validator")]
#[command(long_about = "captionkit reads SubRip (.srt) caption files, reports parse advisories and validates tracks.

EXAMPLES:
    captionkit parse intro.srt                   # Write intro.captions.json next to the input
    captionkit parse -o out/ -f *.srt            # Parse several files into out/, overwriting
    captionkit validate intro.srt outro.txt      # Check ordering, overlap and row lengths
    captionkit export intro.srt -o intro.json    # Write the localization tables
    captionkit completions bash > captionkit.bash

CONFIGURATION:
    Configuration is read from captionkit.json by default. You can specify a
    different file with --config. If the file doesn't exist, defaults are used.")]
struct CommandLineOptions {
    #[command(subcommand)]
    command: Commands,

    /// Configuration file path
    #[arg(short, long, default_value = "captionkit.json", env = "CAPTIONKIT_CONFIG", global = true)]
    config_path: PathBuf,

    /// Set logging level
    #[arg(short, long, value_enum, global = true)]
    log_level: Option<CliLogLevel>,
}

// @struct: Custom logger implementation
struct CustomLogger {
    level: LevelFilter,
}

impl CustomLogger {
    // @creates: New logger with specified level
    fn new(level: LevelFilter) -> Self {
        CustomLogger { level }
    }

    // @initializes: Global logger
    fn init(level: LevelFilter) -> Result<(), SetLoggerError> {
        let logger = Box::new(CustomLogger::new(LevelFilter::Trace));
        log::set_boxed_logger(logger)?;
        log::set_max_level(level);
        Ok(())
    }

    // @returns: ANSI color code for log level
    fn color_for_level(level: Level) -> &'static str {
        match level {
            Level::Error => "1;31",
            Level::Warn => "1;33",
            Level::Info => "1;32",
            Level::Debug => "1;36",
            Level::Trace => "1;35",
        }
    }
}

impl Log for CustomLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.level
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            let now = chrono::Local::now().format("%H:%M:%S.%3f");

            let mut stderr = std::io::stderr();
            let _ = writeln!(
                stderr,
                "\x1B[{}m{} {:<5} {}\x1B[0m",
                Self::color_for_level(record.level()),
                now,
                record.level(),
                record.args()
            );
        }
    }

    fn flush(&self) {
        let _ = std::io::stderr().flush();
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    // Start at info; the config may change it once loaded
    if CustomLogger::init(LevelFilter::Info).is_err() {
        eprintln!("Failed to initialize logger");
    }

    let cli = CommandLineOptions::parse();

    match run(cli).await {
        Ok(code) => code,
        Err(e) => {
            error!("{:#}", e);
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: CommandLineOptions) -> Result<ExitCode> {
    if let Commands::Completions { shell } = cli.command {
        let mut cmd = CommandLineOptions::command();
        generate(shell, &mut cmd, "captionkit", &mut std::io::stdout());
        return Ok(ExitCode::SUCCESS);
    }

    // If log level is set via command line, apply it before loading the config
    if let Some(cmd_log_level) = &cli.log_level {
        let level: LogLevel = cmd_log_level.clone().into();
        log::set_max_level(level.into());
    }

    let mut config = Config::load_or_default(&cli.config_path)?;

    match &cli.log_level {
        Some(log_level) => config.log_level = log_level.clone().into(),
        None => log::set_max_level(config.log_level.into()),
    }

    let controller = Controller::with_config(config)?;

    match cli.command {
        Commands::Parse {
            inputs,
            output_dir,
            force_overwrite,
        } => {
            let summary = controller
                .run_parse(&inputs, output_dir.as_deref(), force_overwrite)
                .await?;
            info!(
                "Finished: {} written, {} skipped, {} failed",
                summary.written, summary.skipped, summary.failed
            );
            Ok(exit_code(summary.is_success()))
        }
        Commands::Validate { inputs } => {
            let all_valid = controller.run_validate(&inputs).await?;
            Ok(exit_code(all_valid))
        }
        Commands::Export { input, output } => {
            controller.run_export(&input, output.as_deref()).await?;
            Ok(ExitCode::SUCCESS)
        }
        Commands::Completions { .. } => Ok(ExitCode::SUCCESS),
    }
}

fn exit_code(success: bool) -> ExitCode {
    if success { ExitCode::SUCCESS } else { ExitCode::FAILURE }
}
