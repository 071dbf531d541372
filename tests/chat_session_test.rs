//! Thread lifecycle and message dispatch against a mocked backend.

mod common;

use common::{chatbot_ref, mock_api, respond_json, respond_status};
use mochi::adapters::MockHttpClient;
use mochi::api::MochiClient;
use mochi::auth::RequestContext;
use mochi::models::MessageRole;
use mochi::state::{ChatController, Settled};
use serde_json::json;

const CHAT_PATH: &str = "/chatbot/b/1/chat/";

fn reply_body(user: &str, assistant: &str) -> serde_json::Value {
    json!({
        "user_message": {"role": "user", "content": user},
        "assistant_message": {"role": "assistant", "content": assistant}
    })
}

/// Select chatbot "b" and let thread 1 be created.
async fn ready_chat(
    mock: &MockHttpClient,
    api: &MochiClient<MockHttpClient>,
    ctx: &RequestContext,
) -> ChatController {
    respond_json(mock, "POST", "/thread/", 201, json!({"id": 1, "chatbot_id": "b"}));
    let mut chat = ChatController::new();
    let ticket = chat.select_chatbot(chatbot_ref("b")).unwrap();
    let result = api.create_thread(ctx, &ticket.chatbot_id).await;
    assert_eq!(chat.complete_create_thread(ticket, result), Settled::Applied);
    chat
}

fn transcript(chat: &ChatController) -> Vec<(MessageRole, String, bool)> {
    chat.session()
        .messages()
        .iter()
        .map(|m| (m.role, m.content.clone(), m.temporary))
        .collect()
}

#[tokio::test]
async fn test_successful_send_appends_confirmed_pair() {
    let (mock, api, ctx) = mock_api();
    let mut chat = ready_chat(&mock, &api, &ctx).await;
    assert_eq!(chat.thread().unwrap().id, "1");
    assert!(chat.session().messages().is_empty());

    respond_json(&mock, "POST", CHAT_PATH, 200, reply_body("hello", "hi!"));
    chat.set_input("hello");
    let ticket = chat.begin_send().unwrap();

    // Optimistic entry is visible while the request is out
    assert_eq!(
        transcript(&chat),
        vec![(MessageRole::User, "hello".to_string(), true)]
    );
    assert_eq!(chat.input(), "");

    let result = api
        .send_message(&ctx, &ticket.chatbot_id, &ticket.thread_id, &ticket.content)
        .await;
    assert_eq!(chat.complete_send(ticket, result), Settled::Applied);
    assert_eq!(
        transcript(&chat),
        vec![
            (MessageRole::User, "hello".to_string(), false),
            (MessageRole::Assistant, "hi!".to_string(), false),
        ]
    );
    assert!(chat.error().is_none());

    let sent = mock.requests_with_method("POST");
    let body = sent.last().unwrap().json_body().unwrap();
    assert_eq!(body["content"], "hello");
}

#[tokio::test]
async fn test_failed_send_rolls_back_to_prior_messages() {
    let (mock, api, ctx) = mock_api();
    let mut chat = ready_chat(&mock, &api, &ctx).await;

    respond_json(&mock, "POST", CHAT_PATH, 200, reply_body("first", "ok"));
    chat.set_input("first");
    chat.send(&api, &ctx).await;
    let before = transcript(&chat);
    assert_eq!(before.len(), 2);

    respond_status(&mock, "POST", CHAT_PATH, 500);
    chat.set_input("second");
    assert_eq!(chat.send(&api, &ctx).await, Some(Settled::Failed));

    assert_eq!(transcript(&chat), before);
    assert!(chat.error().is_some());
    // The typed text is not put back
    assert_eq!(chat.input(), "");
}

#[tokio::test]
async fn test_failed_first_send_leaves_empty_thread() {
    let (mock, api, ctx) = mock_api();
    let mut chat = ready_chat(&mock, &api, &ctx).await;

    respond_status(&mock, "POST", CHAT_PATH, 502);
    chat.set_input("hello");
    assert_eq!(chat.send(&api, &ctx).await, Some(Settled::Failed));
    assert!(chat.session().messages().is_empty());
    assert!(chat.error().is_some());
}

#[tokio::test]
async fn test_only_one_send_in_flight() {
    let (mock, api, ctx) = mock_api();
    let mut chat = ready_chat(&mock, &api, &ctx).await;

    chat.set_input("one");
    let first = chat.begin_send().unwrap();
    chat.set_input("two");
    assert!(chat.begin_send().is_none());
    assert_eq!(chat.session().temporary_count(), 1);

    respond_json(&mock, "POST", CHAT_PATH, 200, reply_body("one", "ack"));
    let result = api
        .send_message(&ctx, &first.chatbot_id, &first.thread_id, &first.content)
        .await;
    chat.complete_send(first, result);
    assert_eq!(chat.session().temporary_count(), 0);
    // The second message is still in the input box, ready to send
    assert_eq!(chat.input(), "two");
}

#[tokio::test]
async fn test_new_thread_replaces_messages() {
    let (mock, api, ctx) = mock_api();
    let mut chat = ready_chat(&mock, &api, &ctx).await;

    respond_json(&mock, "POST", CHAT_PATH, 200, reply_body("hello", "hi!"));
    chat.set_input("hello");
    chat.send(&api, &ctx).await;
    assert_eq!(chat.session().messages().len(), 2);

    respond_json(&mock, "POST", "/thread/", 201, json!({"id": 2, "chatbot_id": "b"}));
    assert_eq!(chat.create_thread(&api, &ctx).await, Some(Settled::Applied));
    assert_eq!(chat.thread().unwrap().id, "2");
    assert!(chat.session().messages().is_empty());
}

#[tokio::test]
async fn test_thread_creation_failure_keeps_current_thread() {
    let (mock, api, ctx) = mock_api();
    let mut chat = ready_chat(&mock, &api, &ctx).await;

    respond_status(&mock, "POST", "/thread/", 500);
    assert_eq!(chat.create_thread(&api, &ctx).await, Some(Settled::Failed));
    assert_eq!(chat.thread().unwrap().id, "1");
    assert!(chat.error().is_some());
}

#[tokio::test]
async fn test_reply_for_previous_chatbot_is_dropped() {
    let (mock, api, ctx) = mock_api();
    let mut chat = ready_chat(&mock, &api, &ctx).await;

    chat.set_input("hello");
    let ticket = chat.begin_send().unwrap();

    // Switch chatbots while the send is outstanding
    let thread_ticket = chat.select_chatbot(chatbot_ref("c")).unwrap();

    respond_json(&mock, "POST", CHAT_PATH, 200, reply_body("hello", "hi!"));
    let result = api
        .send_message(&ctx, &ticket.chatbot_id, &ticket.thread_id, &ticket.content)
        .await;
    assert_eq!(chat.complete_send(ticket, result), Settled::Stale);
    assert!(chat.session().messages().is_empty());
    assert_eq!(chat.chatbot().unwrap().id, "c");

    // The new chatbot's thread still lands
    respond_json(&mock, "POST", "/thread/", 201, json!({"id": 9, "chatbot_id": "c"}));
    let result = api.create_thread(&ctx, &thread_ticket.chatbot_id).await;
    assert_eq!(
        chat.complete_create_thread(thread_ticket, result),
        Settled::Applied
    );
    assert_eq!(chat.thread().unwrap().chatbot_id, "c");
}

#[tokio::test]
async fn test_send_without_thread_is_noop() {
    let (mock, api, ctx) = mock_api();
    let mut chat = ChatController::new();
    chat.set_input("hello");
    assert_eq!(chat.send(&api, &ctx).await, None);
    assert!(mock.get_requests().is_empty());
}
