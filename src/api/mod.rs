//! Mochi REST API client.
//!
//! - [`MochiClient`]: chatbots, threads, chat, settings, logs, documents
//! - account calls (login, logout, register) in [`auth`]

pub mod auth;
pub mod client;

pub use auth::LoginResponse;
pub use client::MochiClient;
