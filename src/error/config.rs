//! Configuration loading errors.

use std::fmt;
use std::path::PathBuf;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// Config file exists but could not be read
    Read { path: PathBuf, message: String },
    /// Config file is not valid TOML for the expected shape
    Parse { path: PathBuf, message: String },
    /// An environment variable or file entry has an unusable value
    InvalidValue { key: String, value: String },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Read { path, message } => {
                write!(f, "Failed to read config {}: {}", path.display(), message)
            }
            ConfigError::Parse { path, message } => {
                write!(f, "Invalid config {}: {}", path.display(), message)
            }
            ConfigError::InvalidValue { key, value } => {
                write!(f, "Invalid value for {}: '{}'", key, value)
            }
        }
    }
}

impl std::error::Error for ConfigError {}
