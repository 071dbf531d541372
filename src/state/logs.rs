//! Chat log viewer state.

use crate::api::MochiClient;
use crate::auth::RequestContext;
use crate::error::ApiError;
use crate::models::LogThread;
use crate::traits::HttpClient;

use super::chat::Settled;

/// State behind the logs screen for one chatbot.
#[derive(Debug, Default)]
pub struct ChatLogs {
    chatbot_id: Option<String>,
    threads: Vec<LogThread>,
    selected: usize,
    scroll: u16,
    loading: bool,
    error: Option<String>,
}

impl ChatLogs {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn chatbot_id(&self) -> Option<&str> {
        self.chatbot_id.as_deref()
    }

    pub fn threads(&self) -> &[LogThread] {
        &self.threads
    }

    pub fn selected_index(&self) -> usize {
        self.selected
    }

    pub fn selected(&self) -> Option<&LogThread> {
        self.threads.get(self.selected)
    }

    pub fn scroll(&self) -> u16 {
        self.scroll
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn select_next(&mut self) {
        if self.selected + 1 < self.threads.len() {
            self.selected += 1;
            self.scroll = 0;
        }
    }

    pub fn select_prev(&mut self) {
        if self.selected > 0 {
            self.selected -= 1;
            self.scroll = 0;
        }
    }

    pub fn scroll_down(&mut self) {
        self.scroll = self.scroll.saturating_add(1);
    }

    pub fn scroll_up(&mut self) {
        self.scroll = self.scroll.saturating_sub(1);
    }

    /// Start loading logs for `chatbot_id`, clearing another chatbot's logs.
    pub fn begin_load(&mut self, chatbot_id: &str) {
        if self.chatbot_id.as_deref() != Some(chatbot_id) {
            self.chatbot_id = Some(chatbot_id.to_string());
            self.threads.clear();
            self.selected = 0;
            self.scroll = 0;
        }
        self.loading = true;
        self.error = None;
    }

    /// Drop the logs of `chatbot_id`, e.g. after it was deleted.
    pub fn forget_chatbot(&mut self, chatbot_id: &str) {
        if self.chatbot_id.as_deref() == Some(chatbot_id) {
            *self = Self::default();
        }
    }

    /// Apply fetched logs. The client already maps 404 to an empty list.
    pub fn complete_load(
        &mut self,
        chatbot_id: &str,
        result: Result<Vec<LogThread>, ApiError>,
    ) -> Settled {
        if self.chatbot_id.as_deref() != Some(chatbot_id) {
            return Settled::Stale;
        }
        self.loading = false;
        match result {
            Ok(threads) => {
                self.threads = threads;
                if self.selected >= self.threads.len() {
                    self.selected = 0;
                    self.scroll = 0;
                }
                Settled::Applied
            }
            Err(err) => {
                tracing::warn!("Loading chat logs failed: {}", err);
                self.error = Some(err.user_message());
                Settled::Failed
            }
        }
    }

    pub async fn load<H: HttpClient>(
        &mut self,
        api: &MochiClient<H>,
        ctx: &RequestContext,
        chatbot_id: &str,
    ) -> Settled {
        self.begin_load(chatbot_id);
        let result = api.get_chat_logs(ctx, chatbot_id).await;
        self.complete_load(chatbot_id, result)
    }
}
