//! Message handling for the App.

use tracing::debug;

use crate::state::Settled;
use crate::traits::HttpClient;

use super::{App, AppMessage, Dialog};

impl<H: HttpClient + 'static> App<H> {
    /// Handle an incoming async message.
    /// All message handlers mark the app as dirty since they update visible state.
    pub fn handle_message(&mut self, msg: AppMessage) {
        self.mark_dirty();
        match msg {
            AppMessage::ChatbotsLoaded(result) => self.directory.complete_refresh(result),
            AppMessage::TypesLoaded(result) => self.directory.complete_types(result),
            AppMessage::ChatbotCreated(result) => {
                self.directory.complete_create(result);
                if self.directory.form.is_none() && self.dialog == Dialog::CreateChatbot {
                    self.dialog = Dialog::None;
                }
            }
            AppMessage::ChatbotDeleted { id, result } => {
                let deleted = result.is_ok();
                self.directory.complete_delete(&id, result);
                if deleted {
                    if self.chat.chatbot().map(|c| c.id.as_str()) == Some(id.as_str()) {
                        self.chat.clear_chatbot();
                    }
                    self.settings.forget_chatbot(&id);
                    self.logs.forget_chatbot(&id);
                }
            }
            AppMessage::ThreadCreated { ticket, result } => {
                let settled = self.chat.complete_create_thread(ticket, result);
                log_settled("thread", settled);
            }
            AppMessage::MessageSent { ticket, result } => {
                let settled = self.chat.complete_send(ticket, result);
                log_settled("send", settled);
            }
            AppMessage::SettingsLoaded { ticket, result } => {
                let settled = self.settings.complete_load(ticket, result);
                log_settled("settings load", settled);
                self.clamp_settings_cursor();
            }
            AppMessage::SettingsSaved { ticket, result } => {
                let settled = self.settings.complete_save(ticket, result);
                log_settled("settings save", settled);
                self.clamp_settings_cursor();
            }
            AppMessage::SettingDeleted { ticket, result } => {
                let settled = self.settings.complete_delete(ticket, result);
                log_settled("setting delete", settled);
                self.clamp_settings_cursor();
            }
            AppMessage::LogsLoaded { chatbot_id, result } => {
                let settled = self.logs.complete_load(&chatbot_id, result);
                log_settled("logs", settled);
            }
        }
    }
}

fn log_settled(what: &str, settled: Settled) {
    if settled == Settled::Stale {
        debug!("Discarded stale {} result", what);
    }
}

#[cfg(test)]
mod tests {
    use super::super::test_support::create_test_app;
    use super::*;
    use crate::error::ApiError;
    use crate::models::{Chatbot, Message, MessageRole, SendMessageResponse, Thread};
    use crate::state::NewChatbotForm;

    fn chatbot(id: &str) -> Chatbot {
        serde_json::from_value(serde_json::json!({
            "id": id, "name": format!("Bot {}", id), "chatbot_type": "echo"
        }))
        .unwrap()
    }

    fn thread(id: &str, chatbot_id: &str) -> Thread {
        serde_json::from_value(serde_json::json!({
            "id": id, "chatbot_id": chatbot_id, "created_at": "2026-01-01T00:00:00Z"
        }))
        .unwrap()
    }

    #[test]
    fn test_chatbots_loaded_populates_directory() {
        let mut app = create_test_app();
        app.needs_redraw = false;
        app.handle_message(AppMessage::ChatbotsLoaded(Ok(vec![chatbot("1")])));
        assert!(app.needs_redraw);
        assert_eq!(app.directory.chatbots().len(), 1);
    }

    #[test]
    fn test_created_chatbot_closes_dialog() {
        let mut app = create_test_app();
        app.directory.form = Some(NewChatbotForm::default());
        app.dialog = Dialog::CreateChatbot;

        app.handle_message(AppMessage::ChatbotCreated(Err(ApiError::Unauthorized)));
        assert_eq!(app.dialog, Dialog::CreateChatbot);

        app.handle_message(AppMessage::ChatbotCreated(Ok(chatbot("7"))));
        assert_eq!(app.dialog, Dialog::None);
        assert_eq!(app.directory.selected().unwrap().id, "7");
    }

    #[test]
    fn test_deleting_active_chatbot_clears_chat() {
        let mut app = create_test_app();
        app.handle_message(AppMessage::ChatbotsLoaded(Ok(vec![chatbot("1")])));
        let ticket = app.chat.select_chatbot(chatbot("1").to_ref()).unwrap();
        app.handle_message(AppMessage::ThreadCreated {
            ticket,
            result: Ok(thread("t1", "1")),
        });
        assert!(app.chat.thread().is_some());

        app.handle_message(AppMessage::ChatbotDeleted {
            id: "1".into(),
            result: Ok(()),
        });
        assert!(app.chat.chatbot().is_none());
        assert!(app.chat.thread().is_none());
    }

    #[test]
    fn test_deleting_chatbot_forgets_its_settings_and_logs() {
        let mut app = create_test_app();
        let settings = app.settings.begin_load("1");
        app.handle_message(AppMessage::SettingsLoaded {
            ticket: settings,
            result: Ok(crate::models::SettingsMap::new()),
        });
        app.logs.begin_load("1");
        app.handle_message(AppMessage::LogsLoaded {
            chatbot_id: "1".into(),
            result: Ok(Vec::new()),
        });
        // A reload still in flight when the delete lands
        let late = app.settings.begin_load("1");

        app.handle_message(AppMessage::ChatbotDeleted {
            id: "2".into(),
            result: Ok(()),
        });
        assert_eq!(app.settings.chatbot_id(), Some("1"));

        app.handle_message(AppMessage::ChatbotDeleted {
            id: "1".into(),
            result: Ok(()),
        });
        assert!(app.settings.chatbot_id().is_none());
        assert!(app.logs.chatbot_id().is_none());
        assert_eq!(
            app.settings.complete_load(late, Ok(crate::models::SettingsMap::new())),
            Settled::Stale
        );
    }

    #[test]
    fn test_stale_send_result_is_ignored() {
        let mut app = create_test_app();
        let ticket = app.chat.select_chatbot(chatbot("1").to_ref()).unwrap();
        app.handle_message(AppMessage::ThreadCreated {
            ticket,
            result: Ok(thread("t1", "1")),
        });
        app.chat.set_input("hello");
        let send = app.chat.begin_send().unwrap();

        // Switching chatbots replaces the session before the reply lands
        app.chat.select_chatbot(chatbot("2").to_ref());
        app.handle_message(AppMessage::MessageSent {
            ticket: send,
            result: Ok(SendMessageResponse {
                user_message: Message::new(MessageRole::User, "hello"),
                assistant_message: Message::new(MessageRole::Assistant, "hi!"),
            }),
        });
        assert!(app.chat.session().messages().is_empty());
    }
}
