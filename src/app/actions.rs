//! Background request actions for the App.
//!
//! Each action updates local state synchronously (loading flags, optimistic
//! inserts), then spawns a tokio task that performs the request and posts an
//! [`AppMessage`] with the result. Nothing here blocks the event loop.

use std::future::Future;

use tracing::debug;

use crate::state::{push_changes, ThreadTicket};
use crate::traits::HttpClient;

use super::{App, AppMessage, Dialog, Screen};

impl<H: HttpClient + 'static> App<H> {
    /// Spawn `fut` and forward its message to the event loop.
    fn spawn_request<F>(&self, fut: F)
    where
        F: Future<Output = AppMessage> + Send + 'static,
    {
        let tx = self.message_tx.clone();
        tokio::spawn(async move {
            let msg = fut.await;
            // The receiver is gone only while shutting down
            let _ = tx.send(msg);
        });
    }

    // ========================================================================
    // Chatbots
    // ========================================================================

    pub fn refresh_chatbots(&mut self) {
        self.directory.begin_refresh();
        let client = self.client.clone();
        let ctx = self.ctx.clone();
        self.spawn_request(async move {
            AppMessage::ChatbotsLoaded(client.list_chatbots(&ctx).await)
        });
    }

    pub fn load_chatbot_types(&mut self) {
        let client = self.client.clone();
        let ctx = self.ctx.clone();
        self.spawn_request(async move {
            AppMessage::TypesLoaded(client.chatbot_types(&ctx).await)
        });
    }

    /// Submit the create form. Does nothing while the form is incomplete.
    pub fn submit_new_chatbot(&mut self) {
        let Some(new) = self
            .directory
            .form
            .as_ref()
            .and_then(|form| form.build(self.directory.types()))
        else {
            debug!("Create form incomplete; not submitting");
            return;
        };
        let client = self.client.clone();
        let ctx = self.ctx.clone();
        self.spawn_request(async move {
            AppMessage::ChatbotCreated(client.create_chatbot(&ctx, &new).await)
        });
    }

    pub fn delete_chatbot(&mut self, id: String) {
        let client = self.client.clone();
        let ctx = self.ctx.clone();
        self.spawn_request(async move {
            let result = client.delete_chatbot(&ctx, &id).await;
            AppMessage::ChatbotDeleted { id, result }
        });
    }

    // ========================================================================
    // Chat
    // ========================================================================

    /// Make the highlighted chatbot active and open the chat screen.
    ///
    /// Re-opening the chatbot that is already active keeps its session.
    pub fn open_chat(&mut self) {
        let Some(chatbot) = self.directory.selected().map(|c| c.to_ref()) else {
            return;
        };
        self.screen = Screen::Chat;
        if self.chat.chatbot().map(|c| c.id.as_str()) == Some(chatbot.id.as_str())
            && (self.chat.thread().is_some() || self.chat.is_creating_thread())
        {
            return;
        }
        if let Some(ticket) = self.chat.select_chatbot(chatbot) {
            self.spawn_create_thread(ticket);
        }
    }

    /// Request a fresh thread for the active chatbot.
    pub fn new_thread(&mut self) {
        if let Some(ticket) = self.chat.begin_create_thread() {
            self.spawn_create_thread(ticket);
        }
    }

    fn spawn_create_thread(&self, ticket: ThreadTicket) {
        let client = self.client.clone();
        let ctx = self.ctx.clone();
        self.spawn_request(async move {
            let result = client.create_thread(&ctx, &ticket.chatbot_id).await;
            AppMessage::ThreadCreated { ticket, result }
        });
    }

    /// Send the typed input. A no-op without a thread or with blank input.
    pub fn send_message(&mut self) {
        let Some(ticket) = self.chat.begin_send() else {
            return;
        };
        let client = self.client.clone();
        let ctx = self.ctx.clone();
        self.spawn_request(async move {
            let result = client
                .send_message(&ctx, &ticket.chatbot_id, &ticket.thread_id, &ticket.content)
                .await;
            AppMessage::MessageSent { ticket, result }
        });
    }

    // ========================================================================
    // Settings
    // ========================================================================

    /// Open the settings screen for the highlighted chatbot.
    pub fn open_settings(&mut self) {
        let Some(id) = self.directory.selected().map(|c| c.id.clone()) else {
            return;
        };
        if self.settings.chatbot_id() != Some(id.as_str()) {
            self.settings_cursor = 0;
        }
        self.screen = Screen::Settings;
        self.load_settings(&id);
    }

    pub fn load_settings(&mut self, chatbot_id: &str) {
        let ticket = self.settings.begin_load(chatbot_id);
        let client = self.client.clone();
        let ctx = self.ctx.clone();
        self.spawn_request(async move {
            let result = client.get_settings(&ctx, &ticket.chatbot_id).await;
            AppMessage::SettingsLoaded { ticket, result }
        });
    }

    pub fn reload_settings(&mut self) {
        if let Some(id) = self.settings.chatbot_id().map(str::to_string) {
            self.load_settings(&id);
        }
    }

    pub fn save_settings(&mut self) {
        let Some(ticket) = self.settings.begin_save() else {
            return;
        };
        let client = self.client.clone();
        let ctx = self.ctx.clone();
        self.spawn_request(async move {
            let result = push_changes(&client, &ctx, &ticket).await;
            AppMessage::SettingsSaved { ticket, result }
        });
    }

    pub fn delete_setting(&mut self, key: &str) {
        let Some(ticket) = self.settings.begin_delete(key) else {
            return;
        };
        let client = self.client.clone();
        let ctx = self.ctx.clone();
        self.spawn_request(async move {
            let result = client
                .delete_setting(&ctx, &ticket.chatbot_id, &ticket.key)
                .await;
            AppMessage::SettingDeleted { ticket, result }
        });
    }

    // ========================================================================
    // Logs
    // ========================================================================

    /// Open the logs screen for the highlighted chatbot.
    pub fn open_logs(&mut self) {
        let Some(id) = self.directory.selected().map(|c| c.id.clone()) else {
            return;
        };
        self.screen = Screen::Logs;
        self.load_logs(id);
    }

    pub fn load_logs(&mut self, chatbot_id: String) {
        self.logs.begin_load(&chatbot_id);
        let client = self.client.clone();
        let ctx = self.ctx.clone();
        self.spawn_request(async move {
            let result = client.get_chat_logs(&ctx, &chatbot_id).await;
            AppMessage::LogsLoaded { chatbot_id, result }
        });
    }

    pub fn reload_logs(&mut self) {
        if let Some(id) = self.logs.chatbot_id().map(str::to_string) {
            self.load_logs(id);
        }
    }

    // ========================================================================
    // Dialogs
    // ========================================================================

    pub fn open_create_form(&mut self) {
        self.directory.form = Some(Default::default());
        self.dialog = Dialog::CreateChatbot;
    }

    pub fn close_dialog(&mut self) {
        if self.dialog == Dialog::CreateChatbot {
            self.directory.form = None;
        }
        self.dialog = Dialog::None;
    }
}
