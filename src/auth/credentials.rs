//! Credentials storage and management for Mochi.
//!
//! This module stores and loads the token pair issued by the backend's
//! `/login/` endpoint in `~/.mochi/.credentials.json`.

use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine};
use serde::{Deserialize, Serialize};
use std::fs::{self, File};
use std::io::{BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

use crate::error::CredentialsError;

/// The Mochi state directory name, relative to the home directory.
pub const MOCHI_DIR: &str = ".mochi";

/// The credentials file name.
const CREDENTIALS_FILE: &str = ".credentials.json";

/// Authentication credentials for the Mochi backend.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Credentials {
    /// JWT access token sent as the bearer credential.
    pub access_token: Option<String>,
    /// Refresh token returned alongside the access token.
    pub refresh_token: Option<String>,
    /// Token expiration time as Unix timestamp (seconds since epoch).
    pub expires_at: Option<i64>,
    /// The signed-in username.
    pub username: Option<String>,
}

impl Credentials {
    /// Create new empty credentials.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build credentials from a freshly issued token pair.
    ///
    /// The expiry comes from the access token's `exp` claim when it has one.
    pub fn from_tokens(
        access_token: impl Into<String>,
        refresh_token: Option<String>,
        username: Option<String>,
    ) -> Self {
        let access_token = access_token.into();
        let expires_at = jwt_expires_at(&access_token);
        Self {
            access_token: Some(access_token),
            refresh_token,
            expires_at,
            username,
        }
    }

    /// Check if the credentials have an access token.
    pub fn has_token(&self) -> bool {
        self.access_token.is_some()
    }

    /// Check if the token is expired.
    ///
    /// Tokens without a known expiry are treated as live; the backend
    /// answers 401 when they are not.
    pub fn is_expired(&self) -> bool {
        match self.expires_at {
            Some(expires_at) => chrono::Utc::now().timestamp() >= expires_at,
            None => false,
        }
    }

    /// Check if the credentials are usable (has token and not expired).
    pub fn is_valid(&self) -> bool {
        self.has_token() && !self.is_expired()
    }

    /// The bearer token, if it is still usable.
    pub fn bearer(&self) -> Option<&str> {
        if self.is_expired() {
            return None;
        }
        self.access_token.as_deref()
    }
}

/// JWT claims for extracting expiration time.
#[derive(Deserialize)]
struct JwtClaims {
    exp: i64,
}

/// Extract the `exp` claim (Unix seconds) from a JWT access token.
///
/// Returns None if the token is not a JWT or has no `exp`.
pub fn jwt_expires_at(access_token: &str) -> Option<i64> {
    let payload = access_token.split('.').nth(1)?;
    let decoded = URL_SAFE_NO_PAD.decode(payload.trim_end_matches('=')).ok()?;
    let claims: JwtClaims = serde_json::from_slice(&decoded).ok()?;
    Some(claims.exp)
}

/// Manages credential storage and retrieval.
#[derive(Debug, Clone)]
pub struct CredentialsManager {
    /// Path to the credentials file.
    credentials_path: PathBuf,
}

impl CredentialsManager {
    /// Create a manager for `~/.mochi/.credentials.json`.
    pub fn new() -> Result<Self, CredentialsError> {
        let home = dirs::home_dir().ok_or(CredentialsError::NoHomeDirectory)?;
        Ok(Self::with_path(home.join(MOCHI_DIR).join(CREDENTIALS_FILE)))
    }

    /// Create a manager for an explicit file path.
    pub fn with_path(credentials_path: impl Into<PathBuf>) -> Self {
        Self {
            credentials_path: credentials_path.into(),
        }
    }

    /// Get the path to the credentials file.
    pub fn credentials_path(&self) -> &Path {
        &self.credentials_path
    }

    /// Load credentials from the credentials file.
    ///
    /// Returns default credentials if the file doesn't exist or can't be read.
    pub fn load(&self) -> Credentials {
        let file = match File::open(&self.credentials_path) {
            Ok(f) => f,
            Err(_) => return Credentials::default(),
        };

        let reader = BufReader::new(file);
        match serde_json::from_reader(reader) {
            Ok(creds) => creds,
            Err(e) => {
                tracing::warn!(
                    "Ignoring unreadable credentials file {}: {}",
                    self.credentials_path.display(),
                    e
                );
                Credentials::default()
            }
        }
    }

    /// Save credentials to the credentials file.
    ///
    /// Creates the parent directory if it doesn't exist.
    pub fn save(&self, credentials: &Credentials) -> Result<(), CredentialsError> {
        if let Some(parent) = self.credentials_path.parent() {
            fs::create_dir_all(parent)
                .map_err(|e| CredentialsError::SaveFailed(e.to_string()))?;
        }

        let file = File::create(&self.credentials_path)
            .map_err(|e| CredentialsError::SaveFailed(e.to_string()))?;

        let mut writer = BufWriter::new(file);
        serde_json::to_writer_pretty(&mut writer, credentials)
            .map_err(|e| CredentialsError::Serialization(e.to_string()))?;
        writer
            .flush()
            .map_err(|e| CredentialsError::SaveFailed(e.to_string()))?;

        restrict_permissions(&self.credentials_path);
        Ok(())
    }

    /// Clear all stored credentials.
    ///
    /// Succeeds when the file is already gone.
    pub fn clear(&self) -> Result<(), CredentialsError> {
        match fs::remove_file(&self.credentials_path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(CredentialsError::ClearFailed(e.to_string())),
        }
    }
}

#[cfg(unix)]
fn restrict_permissions(path: &Path) {
    use std::os::unix::fs::PermissionsExt;
    if let Err(e) = fs::set_permissions(path, fs::Permissions::from_mode(0o600)) {
        tracing::debug!("Could not restrict {}: {}", path.display(), e);
    }
}

#[cfg(not(unix))]
fn restrict_permissions(_path: &Path) {}
