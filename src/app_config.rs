use anyhow::{anyhow, Result};
use serde::{Deserialize, Serialize};
use std::default::Default;
use std::path::Path;

use crate::file_utils::FileManager;

/// Application configuration module
/// This module handles the application configuration including loading,
/// validating and saving configuration settings.
/// Represents the application configuration
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Config {
    /// File extension of corpus transcripts
    #[serde(default = "default_corpus_extension")]
    pub corpus_extension: String,

    /// Map ASCII stress marks to IPA in extracted phones
    #[serde(default = "default_true")]
    pub fix_accents: bool,

    /// Merge closure/burst plosive pairs before dictionary comparison
    #[serde(default = "default_true")]
    pub merge_plosives: bool,

    /// Drop zero-duration intervals before plosive merging
    #[serde(default = "default_true")]
    pub prune_empty: bool,

    /// Insert p: pauses between words in the derived phoneme string
    #[serde(default = "default_true")]
    pub insert_pauses: bool,

    /// Log level
    #[serde(default)]
    pub log_level: LogLevel,
}

/// Log level
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    // @level: Error only
    Error,
    // @level: Warnings and above
    Warn,
    // @level: Default
    #[default]
    Info,
    // @level: Per-record diagnostics
    Debug,
    // @level: Everything
    Trace,
}

impl LogLevel {
    // @returns: log crate filter for this level
    pub fn to_level_filter(&self) -> log::LevelFilter {
        match self {
            LogLevel::Error => log::LevelFilter::Error,
            LogLevel::Warn => log::LevelFilter::Warn,
            LogLevel::Info => log::LevelFilter::Info,
            LogLevel::Debug => log::LevelFilter::Debug,
            LogLevel::Trace => log::LevelFilter::Trace,
        }
    }
}

fn default_corpus_extension() -> String {
    "mix".to_string()
}

fn default_true() -> bool {
    true
}

impl Default for Config {
    fn default() -> Self {
        Config {
            corpus_extension: default_corpus_extension(),
            fix_accents: true,
            merge_plosives: true,
            prune_empty: true,
            insert_pauses: true,
            log_level: LogLevel::default(),
        }
    }
}

impl Config {
    /// Load configuration from a JSON file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = FileManager::read_to_string(&path)?;
        let config: Config = serde_json::from_str(&content)
            .map_err(|e| anyhow!("Invalid configuration file: {}", e))?;
        config.validate()?;
        Ok(config)
    }

    /// Load a config file if present, otherwise write the defaults there
    /// so the user has a file to edit.
    pub fn from_file_or_default<P: AsRef<Path>>(path: P) -> Result<Self> {
        if FileManager::file_exists(&path) {
            Self::from_file(path)
        } else {
            let config = Config::default();
            config.save(&path)?;
            Ok(config)
        }
    }

    /// Save configuration to a JSON file
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let content = serde_json::to_string_pretty(self)?;
        FileManager::write_to_file(path, &content)
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<()> {
        if self.corpus_extension.trim().is_empty() {
            return Err(anyhow!("corpus_extension must not be empty"));
        }
        Ok(())
    }
}
