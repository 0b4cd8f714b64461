use anyhow::{Context, Result};
use log::warn;
use serde::{Deserialize, Serialize};
use std::default::Default;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use crate::errors::ConfigError;
use crate::validation::ValidationConfig;

/// Application configuration module
/// This module handles the application configuration including loading,
/// validating and saving configuration settings.
/// Represents the application configuration
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Config {
    /// Log level
    #[serde(default)]
    pub log_level: LogLevel,

    /// How many files are parsed at the same time
    #[serde(default = "default_concurrent_files")]
    pub concurrent_files: usize,

    /// Track validation settings
    #[serde(default)]
    pub validation: ValidationConfig,

    /// Output file settings
    #[serde(default)]
    pub output: OutputConfig,
}

/// Where and how processed tracks are written
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct OutputConfig {
    // @field: Pretty-print JSON output
    #[serde(default = "default_pretty_json")]
    pub pretty_json: bool,

    // @field: Inserted between the file stem and ".json"
    #[serde(default = "default_file_suffix")]
    pub file_suffix: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            pretty_json: default_pretty_json(),
            file_suffix: default_file_suffix(),
        }
    }
}

/// Log level
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Error,
    Warn,
    #[default]
    Info,
    Debug,
    Trace,
}

impl From<LogLevel> for log::LevelFilter {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Error => log::LevelFilter::Error,
            LogLevel::Warn => log::LevelFilter::Warn,
            LogLevel::Info => log::LevelFilter::Info,
            LogLevel::Debug => log::LevelFilter::Debug,
            LogLevel::Trace => log::LevelFilter::Trace,
        }
    }
}

fn default_concurrent_files() -> usize {
    4
}

fn default_pretty_json() -> bool {
    true
}

fn default_file_suffix() -> String {
    "captions".to_string()
}

impl Config {
    /// Check values serde can't
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.validation.max_row_chars == 0 {
            return Err(ConfigError::ZeroRowBudget);
        }

        if self.concurrent_files == 0 {
            return Err(ConfigError::ZeroConcurrency);
        }

        if self.output.file_suffix.trim().is_empty() {
            return Err(ConfigError::EmptyFileSuffix);
        }

        Ok(())
    }

    /// Load the configuration at `path`
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path).context(format!("Failed to open config file: {:?}", path))?;

        let reader = BufReader::new(file);
        let config: Config = serde_json::from_reader(reader)
            .context(format!("Failed to parse config file: {:?}", path))?;

        Ok(config)
    }

    /// Load the configuration at `path`, or the defaults if there is no file
    pub fn load_or_default<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let config = if path.exists() {
            Self::from_file(path)?
        } else {
            warn!("Config file not found at {:?}, using default config.", path);
            Config::default()
        };

        config.validate().context("Configuration validation failed")?;
        Ok(config)
    }
}

impl Default for Config {
    fn default() -> Self {
        Config {
            log_level: LogLevel::default(),
            concurrent_files: default_concurrent_files(),
            validation: ValidationConfig::default(),
            output: OutputConfig::default(),
        }
    }
}
