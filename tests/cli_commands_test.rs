//! One-shot CLI commands against a mocked backend and a temporary
//! credentials file.

mod common;

use common::{mock_api, respond_json, respond_status, url};
use mochi::adapters::MockHttpClient;
use mochi::auth::{Credentials, CredentialsManager};
use mochi::cli::args::CliCommand;
use mochi::cli::commands::{login, run, CliEnv};
use serde_json::json;
use tempfile::TempDir;

fn env() -> (MockHttpClient, CliEnv<MockHttpClient>, TempDir) {
    let (mock, api, ctx) = mock_api();
    let dir = TempDir::new().unwrap();
    let credentials = CredentialsManager::with_path(dir.path().join("credentials.json"));
    (mock, CliEnv::new(api, ctx, credentials), dir)
}

async fn run_to_string(command: CliCommand, env: &CliEnv<MockHttpClient>) -> color_eyre::Result<String> {
    let mut out = Vec::new();
    run(command, env, &mut out).await?;
    Ok(String::from_utf8(out).unwrap())
}

#[tokio::test]
async fn test_list_prints_table() {
    let (mock, env, _dir) = env();
    respond_json(
        &mock,
        "GET",
        "/chatbot/",
        200,
        json!([{"id": 1, "name": "Helper", "chatbot_type": "echo"}]),
    );
    let out = run_to_string(CliCommand::List, &env).await.unwrap();
    assert!(out.starts_with("ID"));
    assert!(out.contains("Helper"));
}

#[tokio::test]
async fn test_list_unauthorized_suggests_login() {
    let (mock, env, _dir) = env();
    respond_status(&mock, "GET", "/chatbot/", 401);
    let err = run_to_string(CliCommand::List, &env).await.unwrap_err();
    assert!(err.to_string().contains("mochi login"));
}

#[tokio::test]
async fn test_login_saves_credentials() {
    let (mock, env, dir) = env();
    respond_json(
        &mock,
        "POST",
        "/login/",
        200,
        json!({"access": "abc", "refresh": "def", "user": {"username": "ana"}}),
    );
    let mut out = Vec::new();
    login(&env, "ana", "secret", &mut out).await.unwrap();
    assert!(String::from_utf8(out).unwrap().contains("Signed in as ana"));

    let body = mock.requests_with_method("POST")[0].json_body().unwrap();
    assert_eq!(body, json!({"username": "ana", "password": "secret"}));

    let stored = CredentialsManager::with_path(dir.path().join("credentials.json")).load();
    assert_eq!(stored.access_token.as_deref(), Some("abc"));
    assert_eq!(stored.username.as_deref(), Some("ana"));
}

#[tokio::test]
async fn test_login_rejected() {
    let (mock, env, _dir) = env();
    respond_status(&mock, "POST", "/login/", 401);
    let mut out = Vec::new();
    let err = login(&env, "ana", "wrong", &mut out).await.unwrap_err();
    assert_eq!(err.to_string(), "Wrong username or password.");
    assert!(!env.credentials.load().has_token());
}

#[tokio::test]
async fn test_logout_clears_credentials_even_if_server_fails() {
    let (mock, env, _dir) = env();
    env.credentials
        .save(&Credentials::from_tokens(String::from("abc"), None, Some("ana".into())))
        .unwrap();
    respond_status(&mock, "POST", "/logout/", 500);

    let out = run_to_string(CliCommand::Logout, &env).await.unwrap();
    assert!(out.contains("Signed out"));
    assert!(!env.credentials.load().has_token());
}

#[tokio::test]
async fn test_set_validates_and_saves() {
    let (mock, env, _dir) = env();
    respond_json(
        &mock,
        "GET",
        "/chatbot/3/settings/",
        200,
        json!({"verbose": {"value": false, "type": "boolean"}}),
    );
    respond_status(&mock, "PUT", "/chatbot/3/setting/verbose/", 200);

    let bad = CliCommand::Set {
        id: "3".into(),
        key: "verbose".into(),
        value: "maybe".into(),
    };
    assert!(run_to_string(bad, &env).await.is_err());
    assert!(mock.requests_with_method("PUT").is_empty());

    let good = CliCommand::Set {
        id: "3".into(),
        key: "verbose".into(),
        value: "on".into(),
    };
    run_to_string(good, &env).await.unwrap();
    let put = mock.requests_with_method("PUT");
    assert_eq!(put.len(), 1);
    assert_eq!(put[0].url, url("/chatbot/3/setting/verbose/"));
    assert_eq!(put[0].json_body().unwrap(), json!({"value": true}));
}

#[tokio::test]
async fn test_set_unknown_key() {
    let (mock, env, _dir) = env();
    respond_json(&mock, "GET", "/chatbot/3/settings/", 200, json!({}));
    let command = CliCommand::Set {
        id: "3".into(),
        key: "missing".into(),
        value: "1".into(),
    };
    let err = run_to_string(command, &env).await.unwrap_err();
    assert!(err.to_string().contains("no setting 'missing'"));
}

#[tokio::test]
async fn test_chat_prints_reply() {
    let (mock, env, _dir) = env();
    respond_json(&mock, "POST", "/thread/", 201, json!({"id": 5, "chatbot_id": 3}));
    respond_json(
        &mock,
        "POST",
        "/chatbot/3/5/chat/",
        200,
        json!({
            "user_message": {"role": "user", "content": "hello"},
            "assistant_message": {"role": "assistant", "content": "hi!"}
        }),
    );
    let command = CliCommand::Chat {
        id: "3".into(),
        message: "hello".into(),
    };
    assert_eq!(run_to_string(command, &env).await.unwrap(), "hi!\n");
}

#[tokio::test]
async fn test_logs_not_found_prints_empty() {
    let (mock, env, _dir) = env();
    respond_status(&mock, "GET", "/chatbot/3/logs/", 404);
    let out = run_to_string(CliCommand::Logs { id: "3".into() }, &env)
        .await
        .unwrap();
    assert!(out.contains("No logs."));
}

#[tokio::test]
async fn test_upload_sends_file_name() {
    let (mock, env, dir) = env();
    let path = dir.path().join("faq.txt");
    std::fs::write(&path, "questions").unwrap();
    respond_status(&mock, "POST", "/chatbot/3/upload_document/", 201);

    let command = CliCommand::Upload {
        id: "3".into(),
        path: path.to_string_lossy().to_string(),
    };
    let out = run_to_string(command, &env).await.unwrap();
    assert!(out.contains("Uploaded faq.txt"));
    let upload = &mock.requests_with_method("POST")[0];
    assert_eq!(upload.url, url("/chatbot/3/upload_document/"));
    assert_eq!(upload.body.as_deref(), Some("faq.txt"));
}
