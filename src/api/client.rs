//! REST client for the Mochi backend.
//!
//! [`MochiClient`] is generic over [`HttpClient`] so tests can swap in
//! [`crate::adapters::MockHttpClient`]. Every call takes the
//! [`RequestContext`] it should run under.

use std::sync::Arc;

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::adapters::ReqwestHttpClient;
use crate::auth::RequestContext;
use crate::error::ApiError;
use crate::models::{
    Chatbot, ChatbotType, Document, DocumentList, LogThread, NewChatbot, SendMessageResponse,
    Setting, SettingValue, SettingsMap, Thread,
};
use crate::traits::{HttpClient, MultipartFile, Response};

/// Encode a value for use as one URL path segment.
pub(crate) fn segment(value: &str) -> String {
    urlencoding::encode(value).into_owned()
}

/// Client for the Mochi REST API.
#[derive(Debug)]
pub struct MochiClient<H: HttpClient = ReqwestHttpClient> {
    http: Arc<H>,
}

impl<H: HttpClient> Clone for MochiClient<H> {
    fn clone(&self) -> Self {
        Self {
            http: Arc::clone(&self.http),
        }
    }
}

impl<H: HttpClient> MochiClient<H> {
    /// Create a client over the given transport.
    pub fn new(http: H) -> Self {
        Self {
            http: Arc::new(http),
        }
    }

    /// Create a client sharing an existing transport.
    pub fn from_arc(http: Arc<H>) -> Self {
        Self { http }
    }

    pub fn http(&self) -> &H {
        &self.http
    }

    // ---------------------------------------------------------------------
    // Request helpers
    // ---------------------------------------------------------------------

    /// Turn a non-2xx response into an [`ApiError`].
    pub(crate) fn check(response: Response, path: &str) -> Result<Response, ApiError> {
        if response.is_success() {
            return Ok(response);
        }
        let body = response.text().unwrap_or_default();
        let err = ApiError::from_status(response.status, path, &body);
        tracing::warn!("{} {} -> {}", err.error_code(), path, err);
        Err(err)
    }

    pub(crate) async fn get_json<T: DeserializeOwned>(
        &self,
        ctx: &RequestContext,
        path: &str,
    ) -> Result<T, ApiError> {
        tracing::debug!("GET {}", path);
        let response = self.http.get(&ctx.url(path), &ctx.headers()).await?;
        let response = Self::check(response, path)?;
        Ok(response.json()?)
    }

    pub(crate) async fn post_json<B: Serialize + ?Sized>(
        &self,
        ctx: &RequestContext,
        path: &str,
        body: &B,
    ) -> Result<Response, ApiError> {
        tracing::debug!("POST {}", path);
        let body = serde_json::to_string(body)?;
        let response = self.http.post(&ctx.url(path), &body, &ctx.headers()).await?;
        Self::check(response, path)
    }

    async fn put_json<B: Serialize + ?Sized>(
        &self,
        ctx: &RequestContext,
        path: &str,
        body: &B,
    ) -> Result<Response, ApiError> {
        tracing::debug!("PUT {}", path);
        let body = serde_json::to_string(body)?;
        let response = self.http.put(&ctx.url(path), &body, &ctx.headers()).await?;
        Self::check(response, path)
    }

    async fn delete_path(&self, ctx: &RequestContext, path: &str) -> Result<(), ApiError> {
        tracing::debug!("DELETE {}", path);
        let response = self.http.delete(&ctx.url(path), &ctx.headers()).await?;
        Self::check(response, path)?;
        Ok(())
    }

    // ---------------------------------------------------------------------
    // Chatbots
    // ---------------------------------------------------------------------

    /// GET /chatbot/
    pub async fn list_chatbots(&self, ctx: &RequestContext) -> Result<Vec<Chatbot>, ApiError> {
        self.get_json(ctx, "/chatbot/").await
    }

    /// POST /chatbot/
    pub async fn create_chatbot(
        &self,
        ctx: &RequestContext,
        chatbot: &NewChatbot,
    ) -> Result<Chatbot, ApiError> {
        let response = self.post_json(ctx, "/chatbot/", chatbot).await?;
        Ok(response.json()?)
    }

    /// DELETE /chatbot/{id}/
    pub async fn delete_chatbot(&self, ctx: &RequestContext, id: &str) -> Result<(), ApiError> {
        self.delete_path(ctx, &format!("/chatbot/{}/", segment(id)))
            .await
    }

    /// GET /chatbot_types/
    pub async fn chatbot_types(&self, ctx: &RequestContext) -> Result<Vec<ChatbotType>, ApiError> {
        self.get_json(ctx, "/chatbot_types/").await
    }

    // ---------------------------------------------------------------------
    // Threads and chat
    // ---------------------------------------------------------------------

    /// POST /thread/
    pub async fn create_thread(
        &self,
        ctx: &RequestContext,
        chatbot_id: &str,
    ) -> Result<Thread, ApiError> {
        let body = serde_json::json!({ "chatbot_id": chatbot_id });
        let response = self.post_json(ctx, "/thread/", &body).await?;
        let thread: Thread = response.json()?;
        tracing::info!("Created thread {} for chatbot {}", thread.id, chatbot_id);
        Ok(thread)
    }

    /// POST /chatbot/{id}/{thread_id}/chat/
    pub async fn send_message(
        &self,
        ctx: &RequestContext,
        chatbot_id: &str,
        thread_id: &str,
        content: &str,
    ) -> Result<SendMessageResponse, ApiError> {
        let path = format!(
            "/chatbot/{}/{}/chat/",
            segment(chatbot_id),
            segment(thread_id)
        );
        let body = serde_json::json!({ "content": content });
        let response = self.post_json(ctx, &path, &body).await?;
        Ok(response.json()?)
    }

    /// GET /chatbot/{id}/logs/
    ///
    /// A 404 means the chatbot has no logs yet and yields an empty list.
    pub async fn get_chat_logs(
        &self,
        ctx: &RequestContext,
        chatbot_id: &str,
    ) -> Result<Vec<LogThread>, ApiError> {
        let path = format!("/chatbot/{}/logs/", segment(chatbot_id));
        match self.get_json(ctx, &path).await {
            Ok(threads) => Ok(threads),
            Err(err) if err.is_not_found() => Ok(Vec::new()),
            Err(err) => Err(err),
        }
    }

    // ---------------------------------------------------------------------
    // Settings
    // ---------------------------------------------------------------------

    /// GET /chatbot/{id}/settings/
    pub async fn get_settings(
        &self,
        ctx: &RequestContext,
        chatbot_id: &str,
    ) -> Result<SettingsMap, ApiError> {
        let path = format!("/chatbot/{}/settings/", segment(chatbot_id));
        let payload: serde_json::Value = self.get_json(ctx, &path).await?;
        Ok(Setting::map_from_wire(payload)?)
    }

    /// PUT /chatbot/{id}/setting/{key}/
    pub async fn update_setting(
        &self,
        ctx: &RequestContext,
        chatbot_id: &str,
        key: &str,
        value: &SettingValue,
    ) -> Result<(), ApiError> {
        let path = format!(
            "/chatbot/{}/setting/{}/",
            segment(chatbot_id),
            segment(key)
        );
        let body = serde_json::json!({ "value": value });
        self.put_json(ctx, &path, &body).await?;
        Ok(())
    }

    /// DELETE /chatbot/{id}/setting/{key}/
    pub async fn delete_setting(
        &self,
        ctx: &RequestContext,
        chatbot_id: &str,
        key: &str,
    ) -> Result<(), ApiError> {
        let path = format!(
            "/chatbot/{}/setting/{}/",
            segment(chatbot_id),
            segment(key)
        );
        self.delete_path(ctx, &path).await
    }

    // ---------------------------------------------------------------------
    // Documents
    // ---------------------------------------------------------------------

    /// GET /chatbot/{id}/documents/
    ///
    /// Accepts both `{"documents": [...]}` and a bare array.
    pub async fn get_documents(
        &self,
        ctx: &RequestContext,
        chatbot_id: &str,
    ) -> Result<Vec<Document>, ApiError> {
        let path = format!("/chatbot/{}/documents/", segment(chatbot_id));
        let payload: serde_json::Value = self.get_json(ctx, &path).await?;
        if payload.is_array() {
            return Ok(serde_json::from_value(payload)?);
        }
        let list: DocumentList = serde_json::from_value(payload)?;
        Ok(list.documents)
    }

    /// POST /chatbot/{id}/upload_document/ (multipart, field `file`)
    pub async fn upload_document(
        &self,
        ctx: &RequestContext,
        chatbot_id: &str,
        file_name: &str,
        contents: bytes::Bytes,
    ) -> Result<(), ApiError> {
        let path = format!("/chatbot/{}/upload_document/", segment(chatbot_id));
        tracing::debug!("POST {} ({} bytes)", path, contents.len());
        let file = MultipartFile {
            field: "file".to_string(),
            file_name: file_name.to_string(),
            bytes: contents,
        };
        let response = self
            .http
            .post_multipart(&ctx.url(&path), file, &ctx.headers())
            .await?;
        Self::check(response, &path)?;
        Ok(())
    }

    /// DELETE /chatbot/{id}/delete_document/{name}/
    pub async fn delete_document(
        &self,
        ctx: &RequestContext,
        chatbot_id: &str,
        document_name: &str,
    ) -> Result<(), ApiError> {
        let path = format!(
            "/chatbot/{}/delete_document/{}/",
            segment(chatbot_id),
            segment(document_name)
        );
        self.delete_path(ctx, &path).await
    }
}

impl MochiClient<ReqwestHttpClient> {
    /// Production client with the given request timeout.
    pub fn with_timeout(timeout: std::time::Duration) -> Result<Self, ApiError> {
        Ok(Self::new(ReqwestHttpClient::with_timeout(timeout)?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::{MockHttpClient, MockResponse};
    use crate::traits::HttpError;
    use serde_json::json;

    const BASE: &str = "http://mochi.test/api";

    fn setup() -> (MockHttpClient, MochiClient<MockHttpClient>, RequestContext) {
        let mock = MockHttpClient::new();
        let client = MochiClient::new(mock.clone());
        (mock, client, RequestContext::new(BASE).with_token("tok"))
    }

    #[test]
    fn test_segment_encodes() {
        assert_eq!(segment("my file.pdf"), "my%20file.pdf");
        assert_eq!(segment("a/b"), "a%2Fb");
        assert_eq!(segment("tone"), "tone");
    }

    #[tokio::test]
    async fn test_create_thread_posts_chatbot_id() {
        let (mock, client, ctx) = setup();
        mock.set_response_for(
            "POST",
            &format!("{}/thread/", BASE),
            MockResponse::json(201, json!({"id": 1, "chatbot_id": 5})),
        );

        let thread = client.create_thread(&ctx, "5").await.unwrap();
        assert_eq!(thread.id, "1");
        assert_eq!(thread.chatbot_id, "5");

        let requests = mock.get_requests();
        assert_eq!(requests[0].json_body().unwrap(), json!({"chatbot_id": "5"}));
        assert_eq!(requests[0].headers.get("Authorization").unwrap(), "Bearer tok");
    }

    #[tokio::test]
    async fn test_send_message_path_and_body() {
        let (mock, client, ctx) = setup();
        mock.set_response(
            &format!("{}/chatbot/5/t-1/chat/", BASE),
            MockResponse::json(
                200,
                json!({
                    "user_message": {"role": "user", "content": "hello"},
                    "assistant_message": {"role": "assistant", "content": "hi!"}
                }),
            ),
        );

        let reply = client.send_message(&ctx, "5", "t-1", "hello").await.unwrap();
        assert_eq!(reply.assistant_message.content, "hi!");
        assert_eq!(mock.get_requests()[0].json_body().unwrap(), json!({"content": "hello"}));
    }

    #[tokio::test]
    async fn test_chat_logs_404_is_empty() {
        let (mock, client, ctx) = setup();
        mock.set_response(&format!("{}/chatbot/5/logs/", BASE), MockResponse::status(404));

        let logs = client.get_chat_logs(&ctx, "5").await.unwrap();
        assert!(logs.is_empty());
    }

    #[tokio::test]
    async fn test_chat_logs_500_is_error() {
        let (mock, client, ctx) = setup();
        mock.set_response(&format!("{}/chatbot/5/logs/", BASE), MockResponse::status(500));

        let err = client.get_chat_logs(&ctx, "5").await.unwrap_err();
        assert!(matches!(err, ApiError::Server { status: 500, .. }));
    }

    #[tokio::test]
    async fn test_update_setting_puts_value() {
        let (mock, client, ctx) = setup();
        mock.set_default_response(MockResponse::json(200, json!({})));

        client
            .update_setting(&ctx, "5", "tone", &SettingValue::Number(0.8))
            .await
            .unwrap();

        let put = &mock.requests_with_method("PUT")[0];
        assert_eq!(put.url, format!("{}/chatbot/5/setting/tone/", BASE));
        assert_eq!(put.json_body().unwrap(), json!({"value": 0.8}));
    }

    #[tokio::test]
    async fn test_network_failure_maps_to_network_error() {
        let (mock, client, ctx) = setup();
        mock.set_default_response(MockResponse::Error(HttpError::Timeout("30s".to_string())));

        let err = client.list_chatbots(&ctx).await.unwrap_err();
        assert!(matches!(err, ApiError::Network { timed_out: true, .. }));
    }

    #[tokio::test]
    async fn test_undecodable_body_is_invalid_response() {
        let (mock, client, ctx) = setup();
        mock.set_default_response(MockResponse::Success(Response::new(
            200,
            bytes::Bytes::from("<html>"),
        )));

        let err = client.list_chatbots(&ctx).await.unwrap_err();
        assert!(matches!(err, ApiError::InvalidResponse { .. }));
    }

    #[tokio::test]
    async fn test_documents_accepts_bare_array() {
        let (mock, client, ctx) = setup();
        mock.set_response(
            &format!("{}/chatbot/5/documents/", BASE),
            MockResponse::json(200, json!([{"name": "faq.pdf"}])),
        );

        let docs = client.get_documents(&ctx, "5").await.unwrap();
        assert_eq!(docs.len(), 1);
        assert_eq!(docs[0].name, "faq.pdf");
    }

    #[tokio::test]
    async fn test_delete_document_encodes_name() {
        let (mock, client, ctx) = setup();
        mock.set_default_response(MockResponse::status(204));

        client.delete_document(&ctx, "5", "my notes.txt").await.unwrap();
        assert_eq!(
            mock.get_requests()[0].url,
            format!("{}/chatbot/5/delete_document/my%20notes.txt/", BASE)
        );
    }
}
