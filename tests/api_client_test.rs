//! End-to-end checks of the reqwest transport against a local mock server.

use std::time::Duration;

use mochi::api::MochiClient;
use mochi::auth::RequestContext;
use mochi::error::ApiError;
use mochi::models::SettingValue;
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn client() -> MochiClient {
    MochiClient::with_timeout(Duration::from_secs(5)).unwrap()
}

#[tokio::test]
async fn test_bearer_token_is_sent() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/chatbot/"))
        .and(header("Authorization", "Bearer secret"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([
            {"id": 1, "name": "Helper", "chatbot_type": "echo"}
        ])))
        .expect(1)
        .mount(&server)
        .await;

    let ctx = RequestContext::new(server.uri()).with_token("secret");
    let bots = client().list_chatbots(&ctx).await.unwrap();
    assert_eq!(bots.len(), 1);
    assert_eq!(bots[0].id, "1");
}

#[tokio::test]
async fn test_unauthorized_is_classified() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/chatbot/"))
        .respond_with(ResponseTemplate::new(401))
        .mount(&server)
        .await;

    let ctx = RequestContext::new(server.uri());
    let err = client().list_chatbots(&ctx).await.unwrap_err();
    assert!(matches!(err, ApiError::Unauthorized));
}

#[tokio::test]
async fn test_update_setting_puts_value() {
    let server = MockServer::start().await;
    Mock::given(method("PUT"))
        .and(path("/chatbot/b/setting/tone/"))
        .and(body_json(serde_json::json!({"value": 0.8})))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    let ctx = RequestContext::new(server.uri()).with_token("t");
    client()
        .update_setting(&ctx, "b", "tone", &SettingValue::Number(0.8))
        .await
        .unwrap();
}

#[tokio::test]
async fn test_logs_not_found_is_empty() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/chatbot/b/logs/"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let ctx = RequestContext::new(server.uri());
    assert!(client().get_chat_logs(&ctx, "b").await.unwrap().is_empty());
}

#[tokio::test]
async fn test_upload_is_multipart() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/chatbot/b/upload_document/"))
        .respond_with(ResponseTemplate::new(201))
        .expect(1)
        .mount(&server)
        .await;

    let ctx = RequestContext::new(server.uri()).with_token("t");
    client()
        .upload_document(&ctx, "b", "faq.txt", bytes::Bytes::from_static(b"q and a"))
        .await
        .unwrap();

    let received = server.received_requests().await.unwrap();
    let content_type = received[0]
        .headers
        .get("content-type")
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
        .to_string();
    assert!(content_type.starts_with("multipart/form-data"));
    let body = String::from_utf8_lossy(&received[0].body);
    assert!(body.contains("filename=\"faq.txt\""));
}

#[tokio::test]
async fn test_unreachable_server_is_network_error() {
    // Nothing listens on port 9 on a test machine
    let ctx = RequestContext::new("http://127.0.0.1:9");
    let err = client().list_chatbots(&ctx).await.unwrap_err();
    assert!(matches!(err, ApiError::Network { .. }));
}
