//! Credential storage errors.

use std::fmt;

/// Credentials operation errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CredentialsError {
    /// Home directory could not be determined
    NoHomeDirectory,
    /// Failed to save credentials
    SaveFailed(String),
    /// Failed to clear credentials
    ClearFailed(String),
    /// Serialization/deserialization error
    Serialization(String),
}

impl fmt::Display for CredentialsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CredentialsError::NoHomeDirectory => {
                write!(f, "Could not determine the home directory")
            }
            CredentialsError::SaveFailed(msg) => write!(f, "Failed to save credentials: {}", msg),
            CredentialsError::ClearFailed(msg) => {
                write!(f, "Failed to clear credentials: {}", msg)
            }
            CredentialsError::Serialization(msg) => write!(f, "Serialization error: {}", msg),
        }
    }
}

impl std::error::Error for CredentialsError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_credentials_error_display() {
        assert_eq!(
            CredentialsError::SaveFailed("disk full".to_string()).to_string(),
            "Failed to save credentials: disk full"
        );
        assert_eq!(
            CredentialsError::ClearFailed("busy".to_string()).to_string(),
            "Failed to clear credentials: busy"
        );
        assert_eq!(
            CredentialsError::Serialization("bad json".to_string()).to_string(),
            "Serialization error: bad json"
        );
        assert!(CredentialsError::NoHomeDirectory
            .to_string()
            .contains("home directory"));
    }
}
