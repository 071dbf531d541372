//! Mock implementations for testing.
//!
//! Lets the API client and the view state machines run without a network.
//!
//! # Available Mocks
//!
//! - [`MockHttpClient`] - HTTP client with configurable responses

pub mod http;

pub use http::{MockHttpClient, MockResponse, RecordedRequest};
