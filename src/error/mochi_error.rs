//! Unified error type for the Mochi dashboard.

use std::fmt;

use super::api::ApiError;
use super::config::ConfigError;
use super::credentials::CredentialsError;

/// Unified error type for library operations.
#[derive(Debug)]
pub enum MochiError {
    /// Backend call failed.
    Api(ApiError),

    /// Credential storage failed.
    Credentials(CredentialsError),

    /// Configuration could not be loaded.
    Config(ConfigError),

    /// Local I/O failed (reading an upload, creating the log directory).
    Io(std::io::Error),
}

impl MochiError {
    /// Short message for display to the user.
    pub fn user_message(&self) -> String {
        match self {
            MochiError::Api(err) => err.user_message(),
            MochiError::Credentials(err) => err.to_string(),
            MochiError::Config(err) => err.to_string(),
            MochiError::Io(err) => format!("File error: {}", err),
        }
    }

    /// Get a short error code for logging.
    pub fn error_code(&self) -> &'static str {
        match self {
            MochiError::Api(err) => err.error_code(),
            MochiError::Credentials(_) => "E_CREDENTIALS",
            MochiError::Config(_) => "E_CONFIG",
            MochiError::Io(_) => "E_IO",
        }
    }

    /// Check if this error requires signing in again.
    pub fn requires_login(&self) -> bool {
        matches!(self, MochiError::Api(ApiError::Unauthorized))
    }
}

impl fmt::Display for MochiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MochiError::Api(err) => write!(f, "{}", err),
            MochiError::Credentials(err) => write!(f, "{}", err),
            MochiError::Config(err) => write!(f, "{}", err),
            MochiError::Io(err) => write!(f, "I/O error: {}", err),
        }
    }
}

impl std::error::Error for MochiError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            MochiError::Api(err) => Some(err),
            MochiError::Credentials(err) => Some(err),
            MochiError::Config(err) => Some(err),
            MochiError::Io(err) => Some(err),
        }
    }
}

impl From<ApiError> for MochiError {
    fn from(err: ApiError) -> Self {
        MochiError::Api(err)
    }
}

impl From<CredentialsError> for MochiError {
    fn from(err: CredentialsError) -> Self {
        MochiError::Credentials(err)
    }
}

impl From<ConfigError> for MochiError {
    fn from(err: ConfigError) -> Self {
        MochiError::Config(err)
    }
}

impl From<std::io::Error> for MochiError {
    fn from(err: std::io::Error) -> Self {
        MochiError::Io(err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_conversions_and_codes() {
        let err: MochiError = ApiError::Unauthorized.into();
        assert!(err.requires_login());
        assert_eq!(err.error_code(), "E_API_UNAUTHORIZED");

        let err: MochiError = CredentialsError::NoHomeDirectory.into();
        assert!(!err.requires_login());
        assert_eq!(err.error_code(), "E_CREDENTIALS");

        let err: MochiError = std::io::Error::new(std::io::ErrorKind::NotFound, "gone").into();
        assert_eq!(err.error_code(), "E_IO");
        assert!(err.user_message().contains("gone"));
    }

    #[test]
    fn test_source_chain() {
        use std::error::Error;
        let err: MochiError = ApiError::Unauthorized.into();
        assert!(err.source().is_some());
    }
}
