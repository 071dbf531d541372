//! Runtime configuration.
//!
//! Values come from the environment first, then `~/.mochi/config.toml`, then
//! defaults. Builder methods let callers (CLI flags, tests) override any of
//! them afterwards.
//!
//! ```toml
//! api_url = "http://localhost:8000/api"
//! request_timeout_secs = 30
//! log_level = "info"
//! number_step = 0.05
//! ```

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::Deserialize;

use crate::auth::{DEFAULT_API_URL, MOCHI_DIR};
use crate::error::ConfigError;

const CONFIG_FILE: &str = "config.toml";

/// Default request timeout in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Default step for number sliders in the settings editor.
pub const DEFAULT_NUMBER_STEP: f64 = 0.05;

/// Resolved configuration.
///
/// # Example
///
/// ```ignore
/// use mochi::config::Config;
///
/// let config = Config::default()
///     .with_api_url("http://staging:8000/api")
///     .with_request_timeout_secs(10);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    /// Backend base URL
    pub api_url: String,
    /// Per-request timeout applied by the HTTP client
    pub request_timeout_secs: u64,
    /// `EnvFilter` directive for the log file
    pub log_level: String,
    /// Default slider step for number settings without their own step
    pub number_step: f64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            request_timeout_secs: DEFAULT_TIMEOUT_SECS,
            log_level: "info".to_string(),
            number_step: DEFAULT_NUMBER_STEP,
        }
    }
}

/// Config file structure; every key is optional.
#[derive(Debug, Deserialize, Default)]
#[serde(deny_unknown_fields)]
struct FileConfig {
    api_url: Option<String>,
    request_timeout_secs: Option<u64>,
    log_level: Option<String>,
    number_step: Option<f64>,
}

impl Config {
    /// Get the config file path: ~/.mochi/config.toml
    pub fn config_path() -> Option<PathBuf> {
        dirs::home_dir().map(|p| p.join(MOCHI_DIR).join(CONFIG_FILE))
    }

    /// Load configuration: env > file > defaults.
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(Self::config_path().as_deref(), |key| std::env::var(key).ok())
    }

    /// Load configuration from an explicit file and environment lookup.
    ///
    /// A missing file is not an error; an unreadable or malformed one is.
    pub fn load_from<F>(path: Option<&Path>, env: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let file = match path {
            Some(path) => read_file_config(path)?,
            None => FileConfig::default(),
        };
        let defaults = Self::default();

        // API URL: env > file > default
        let api_url = env("MOCHI_API_URL")
            .or(file.api_url)
            .unwrap_or(defaults.api_url);

        // Timeout: env > file > default
        let request_timeout_secs = match env("MOCHI_TIMEOUT_SECS") {
            Some(raw) => parse_timeout(&raw)?,
            None => file
                .request_timeout_secs
                .unwrap_or(defaults.request_timeout_secs),
        };

        // Log filter: env > file > default
        let log_level = env("MOCHI_LOG")
            .or(file.log_level)
            .unwrap_or(defaults.log_level);

        // Slider step: file > default
        let number_step = match file.number_step {
            Some(step) if step > 0.0 && step.is_finite() => step,
            Some(step) => {
                return Err(ConfigError::InvalidValue {
                    key: "number_step".to_string(),
                    value: step.to_string(),
                })
            }
            None => defaults.number_step,
        };

        Ok(Self {
            api_url,
            request_timeout_secs,
            log_level,
            number_step,
        })
    }

    pub fn with_api_url(mut self, url: impl Into<String>) -> Self {
        self.api_url = url.into();
        self
    }

    pub fn with_request_timeout_secs(mut self, secs: u64) -> Self {
        self.request_timeout_secs = secs;
        self
    }

    pub fn with_log_level(mut self, level: impl Into<String>) -> Self {
        self.log_level = level.into();
        self
    }

    pub fn with_number_step(mut self, step: f64) -> Self {
        self.number_step = step;
        self
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

fn read_file_config(path: &Path) -> Result<FileConfig, ConfigError> {
    match std::fs::read_to_string(path) {
        Ok(contents) => toml::from_str(&contents).map_err(|e| ConfigError::Parse {
            path: path.to_path_buf(),
            message: e.to_string(),
        }),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(FileConfig::default()),
        Err(e) => Err(ConfigError::Read {
            path: path.to_path_buf(),
            message: e.to_string(),
        }),
    }
}

fn parse_timeout(raw: &str) -> Result<u64, ConfigError> {
    match raw.trim().parse::<u64>() {
        Ok(secs) if secs > 0 => Ok(secs),
        _ => Err(ConfigError::InvalidValue {
            key: "MOCHI_TIMEOUT_SECS".to_string(),
            value: raw.to_string(),
        }),
    }
}
