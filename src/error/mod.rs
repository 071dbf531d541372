//! Error handling for Mochi.
//!
//! - [`ApiError`]: backend call failures, classified for display
//! - [`CredentialsError`]: credential file problems
//! - [`ConfigError`]: configuration loading problems
//! - [`MochiError`]: the unified type
//!
//! Views never propagate these further: each component turns a failure
//! into a short status message via `user_message()` and resets its loading
//! flag.

mod api;
mod config;
mod credentials;
mod mochi_error;

pub use api::ApiError;
pub use config::ConfigError;
pub use credentials::CredentialsError;
pub use mochi_error::MochiError;
