//! Trait abstractions for dependency injection and testability.
//!
//! - [`HttpClient`] - HTTP client operations used by the API client

pub mod http;

pub use http::{Headers, HttpClient, HttpError, MultipartFile, Response};
