//! Per-request context: where to send a call and which credential to attach.
//!
//! Every outbound call takes a [`RequestContext`] explicitly. Nothing reads
//! the token from ambient storage.

use crate::traits::Headers;

use super::credentials::Credentials;

/// Default backend base URL.
pub const DEFAULT_API_URL: &str = "http://localhost:8000/api";

/// Base URL plus optional bearer credential for backend calls.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestContext {
    base_url: String,
    token: Option<String>,
}

impl RequestContext {
    /// Create an anonymous context for `base_url`.
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url: String = base_url.into();
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            token: None,
        }
    }

    /// Attach a bearer token.
    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    /// Attach the stored credential if it is still usable.
    pub fn with_credentials(mut self, credentials: &Credentials) -> Self {
        self.token = credentials.bearer().map(str::to_string);
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    pub fn is_authenticated(&self) -> bool {
        self.token.is_some()
    }

    /// Join a backend path (starting with `/`) onto the base URL.
    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Headers for a JSON request, with the bearer credential when present.
    pub fn headers(&self) -> Headers {
        let mut headers = Headers::new();
        headers.insert("Content-Type".to_string(), "application/json".to_string());
        headers.insert("Accept".to_string(), "application/json".to_string());
        if let Some(ref token) = self.token {
            headers.insert("Authorization".to_string(), format!("Bearer {}", token));
        }
        headers
    }
}

impl Default for RequestContext {
    fn default() -> Self {
        Self::new(DEFAULT_API_URL)
    }
}
