//! Configuration for the `td` binary.
//!
//! Settings resolve with the following priority (highest first):
//! 1. CLI arguments
//! 2. Environment variables (via clap `env` attribute)
//! 3. TOML config file (`<config_dir>/taskdesk/config.toml`)
//! 4. Compiled defaults
//!
//! A missing default config file is not an error. An explicit `--config`
//! path that doesn't exist is.

use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::cli::Cli;

const APP_DIR: &str = "taskdesk";
const DEFAULT_LOG_LEVEL: &str = "info";

/// Errors that can occur when loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    ReadFile {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse config file {path}: {source}")]
    ParseToml {
        path: PathBuf,
        source: toml::de::Error,
    },

    #[error("could not determine home directory for the task store")]
    NoHomeDir,
}

/// Top-level TOML config file structure.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct ConfigFile {
    store: StoreFileConfig,
    log: LogFileConfig,
}

/// `[store]` section.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct StoreFileConfig {
    path: Option<PathBuf>,
}

/// `[log]` section.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct LogFileConfig {
    level: Option<String>,
    file: Option<PathBuf>,
}

/// Fully resolved settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// JSON file holding the tasks.
    pub db_path: PathBuf,
    /// Default tracing filter when `RUST_LOG` is unset.
    pub log_level: String,
    /// File receiving log output.
    pub log_file: PathBuf,
}

impl Config {
    /// Resolve settings from CLI/env, then the config file, then defaults.
    pub fn load(cli: &Cli) -> Result<Self, ConfigError> {
        let file = match cli.config.as_deref() {
            Some(path) => read_config_file(path)?,
            None => match default_config_path() {
                Some(path) if path.exists() => read_config_file(&path)?,
                _ => ConfigFile::default(),
            },
        };
        Self::resolve(cli, file)
    }

    fn resolve(cli: &Cli, file: ConfigFile) -> Result<Self, ConfigError> {
        let db_path = match cli.db.clone().or(file.store.path) {
            Some(p) => p,
            None => default_db_path().ok_or(ConfigError::NoHomeDir)?,
        };
        let log_level = cli
            .log_level
            .clone()
            .or(file.log.level)
            .unwrap_or_else(|| DEFAULT_LOG_LEVEL.to_string());
        let log_file = cli
            .log_file
            .clone()
            .or(file.log.file)
            .unwrap_or_else(|| std::env::temp_dir().join("taskdesk.log"));
        Ok(Self { db_path, log_level, log_file })
    }
}

fn read_config_file(path: &Path) -> Result<ConfigFile, ConfigError> {
    let text = std::fs::read_to_string(path).map_err(|source| ConfigError::ReadFile {
        path: path.to_path_buf(),
        source,
    })?;
    toml::from_str(&text).map_err(|source| ConfigError::ParseToml {
        path: path.to_path_buf(),
        source,
    })
}

/// `<config_dir>/taskdesk/config.toml`, if a config directory exists.
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join(APP_DIR).join("config.toml"))
}

/// `~/.taskdesk/tasks.json`.
pub fn default_db_path() -> Option<PathBuf> {
    dirs::home_dir().map(|h| h.join(".taskdesk").join("tasks.json"))
}
