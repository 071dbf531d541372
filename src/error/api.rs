//! Errors from calls to the Mochi REST backend.
//!
//! Every backend failure seen by the views is one of these. Transport
//! problems become `Network`, non-2xx statuses are classified by code, and
//! undecodable bodies become `InvalidResponse`.

use std::fmt;

use crate::traits::HttpError;

/// Backend call failure.
#[derive(Debug, Clone, PartialEq)]
pub enum ApiError {
    /// The request could not complete (connection, DNS, timeout, I/O).
    Network { message: String, timed_out: bool },

    /// 404 from the backend.
    NotFound { path: String },

    /// 401 from the backend; the stored credential is missing or stale.
    Unauthorized,

    /// Any other non-2xx response.
    Server { status: u16, message: String },

    /// The response body did not match the expected shape.
    InvalidResponse { message: String },
}

impl ApiError {
    /// Classify a non-2xx response.
    pub fn from_status(status: u16, path: &str, body: &str) -> Self {
        match status {
            401 => ApiError::Unauthorized,
            404 => ApiError::NotFound {
                path: path.to_string(),
            },
            _ => ApiError::Server {
                status,
                message: extract_error_message(body),
            },
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, ApiError::NotFound { .. })
    }

    /// Short message suitable for the status line of a view.
    pub fn user_message(&self) -> String {
        match self {
            ApiError::Network { timed_out: true, .. } => {
                "The server took too long to respond. Please try again.".to_string()
            }
            ApiError::Network { .. } => {
                "Unable to reach the Mochi server. Check that it is running.".to_string()
            }
            ApiError::NotFound { .. } => "The requested resource was not found.".to_string(),
            ApiError::Unauthorized => {
                "Not signed in or session expired. Run `mochi login`.".to_string()
            }
            ApiError::Server { status, message } => match *status {
                400 if !message.is_empty() => format!("Rejected by server: {}", message),
                400 => "The request was invalid.".to_string(),
                403 => "Access denied.".to_string(),
                500..=599 => "The server is experiencing issues. Please try again later.".to_string(),
                _ => format!("The server returned an error (HTTP {}).", status),
            },
            ApiError::InvalidResponse { .. } => {
                "Received an unexpected response from the server.".to_string()
            }
        }
    }

    /// Get a short error code for logging.
    pub fn error_code(&self) -> &'static str {
        match self {
            ApiError::Network { timed_out: true, .. } => "E_API_TIMEOUT",
            ApiError::Network { .. } => "E_API_NETWORK",
            ApiError::NotFound { .. } => "E_API_NOT_FOUND",
            ApiError::Unauthorized => "E_API_UNAUTHORIZED",
            ApiError::Server { .. } => "E_API_SERVER",
            ApiError::InvalidResponse { .. } => "E_API_INVALID",
        }
    }
}

/// Pull `{"error": "..."}` out of a backend error body, or fall back to the
/// (truncated) raw text.
fn extract_error_message(body: &str) -> String {
    if let Ok(value) = serde_json::from_str::<serde_json::Value>(body) {
        if let Some(error) = value.get("error").and_then(|e| e.as_str()) {
            return error.to_string();
        }
        if let Some(detail) = value.get("detail").and_then(|e| e.as_str()) {
            return detail.to_string();
        }
    }
    body.chars().take(200).collect()
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiError::Network { message, .. } => write!(f, "Network error: {}", message),
            ApiError::NotFound { path } => write!(f, "Not found: {}", path),
            ApiError::Unauthorized => write!(f, "Unauthorized"),
            ApiError::Server { status, message } => {
                write!(f, "Server error ({}): {}", status, message)
            }
            ApiError::InvalidResponse { message } => write!(f, "Invalid response: {}", message),
        }
    }
}

impl std::error::Error for ApiError {}

impl From<HttpError> for ApiError {
    fn from(err: HttpError) -> Self {
        let timed_out = matches!(err, HttpError::Timeout(_));
        ApiError::Network {
            message: err.to_string(),
            timed_out,
        }
    }
}

impl From<serde_json::Error> for ApiError {
    fn from(err: serde_json::Error) -> Self {
        ApiError::InvalidResponse {
            message: err.to_string(),
        }
    }
}
