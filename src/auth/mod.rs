//! Authentication for Mochi.
//!
//! - Credentials storage and management
//! - Explicit per-request context carrying the bearer credential
//!
//! The login, logout and register calls themselves live on
//! [`crate::api::MochiClient`].

pub mod context;
pub mod credentials;

pub use context::{RequestContext, DEFAULT_API_URL};
pub use credentials::{jwt_expires_at, Credentials, CredentialsManager, MOCHI_DIR};
