//! Account endpoints: login, logout, register.

use serde::Deserialize;

use crate::auth::{Credentials, RequestContext};
use crate::error::ApiError;
use crate::traits::HttpClient;

use super::client::MochiClient;

/// Response from `POST /login/`.
#[derive(Debug, Clone, Deserialize)]
pub struct LoginResponse {
    pub access: String,
    #[serde(default)]
    pub refresh: Option<String>,
    #[serde(default)]
    pub user: Option<LoginUser>,
}

/// The `user` object embedded in a login response.
#[derive(Debug, Clone, Deserialize)]
pub struct LoginUser {
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
}

impl LoginResponse {
    /// Convert into storable credentials, falling back to the username the
    /// user typed when the backend does not echo one.
    pub fn into_credentials(self, typed_username: &str) -> Credentials {
        let username = self
            .user
            .and_then(|u| u.username)
            .unwrap_or_else(|| typed_username.to_string());
        Credentials::from_tokens(self.access, self.refresh, Some(username))
    }
}

impl<H: HttpClient> MochiClient<H> {
    /// POST /login/
    pub async fn login(
        &self,
        ctx: &RequestContext,
        username: &str,
        password: &str,
    ) -> Result<Credentials, ApiError> {
        let body = serde_json::json!({ "username": username, "password": password });
        let response = self.post_json(ctx, "/login/", &body).await?;
        let login: LoginResponse = response.json()?;
        tracing::info!("Signed in as {}", username);
        Ok(login.into_credentials(username))
    }

    /// POST /logout/
    pub async fn logout(&self, ctx: &RequestContext) -> Result<(), ApiError> {
        self.post_json(ctx, "/logout/", &serde_json::json!({}))
            .await?;
        Ok(())
    }

    /// POST /register/
    pub async fn register(
        &self,
        ctx: &RequestContext,
        username: &str,
        email: &str,
        password: &str,
    ) -> Result<(), ApiError> {
        let body = serde_json::json!({
            "username": username,
            "email": email,
            "password": password,
        });
        self.post_json(ctx, "/register/", &body).await?;
        tracing::info!("Registered account {}", username);
        Ok(())
    }
}
