//! Common test utilities for integration tests.
//!
//! Every test talks to a [`MockHttpClient`] behind a real [`MochiClient`],
//! so requests go through the same URL building and error mapping as
//! production.

#![allow(dead_code)]

use mochi::adapters::{MockHttpClient, MockResponse};
use mochi::api::MochiClient;
use mochi::auth::RequestContext;
use mochi::models::ChatbotRef;

pub const BASE: &str = "http://mochi.test/api";

/// Full URL for an API path.
pub fn url(path: &str) -> String {
    format!("{}{}", BASE, path)
}

/// A mock transport, a client over it, and a signed-in request context.
///
/// The mock is a handle onto shared state, so responses configured on it
/// after construction are seen by the client.
pub fn mock_api() -> (MockHttpClient, MochiClient<MockHttpClient>, RequestContext) {
    let mock = MockHttpClient::new();
    let api = MochiClient::new(mock.clone());
    let ctx = RequestContext::new(BASE).with_token("test-token");
    (mock, api, ctx)
}

pub fn chatbot_ref(id: &str) -> ChatbotRef {
    ChatbotRef {
        id: id.to_string(),
        name: format!("Bot {}", id),
        chatbot_type: "echo".to_string(),
    }
}

pub fn respond_json(
    mock: &MockHttpClient,
    method: &str,
    path: &str,
    status: u16,
    body: serde_json::Value,
) {
    mock.set_response_for(method, &url(path), MockResponse::json(status, body));
}

pub fn respond_status(mock: &MockHttpClient, method: &str, path: &str, status: u16) {
    mock.set_response_for(method, &url(path), MockResponse::status(status));
}
