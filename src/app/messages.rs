//! AppMessage enum for async communication within the application.

use crate::error::ApiError;
use crate::models::{Chatbot, ChatbotType, LogThread, SendMessageResponse, SettingsMap, Thread};
use crate::state::{DeleteTicket, LoadTicket, SaveTicket, SendTicket, ThreadTicket};

/// Results of background requests, delivered back to the event loop.
///
/// Each variant carries the ticket it was started with so stale results can
/// be told apart from current ones.
#[derive(Debug, Clone)]
pub enum AppMessage {
    /// `GET /chatbot/` finished
    ChatbotsLoaded(Result<Vec<Chatbot>, ApiError>),
    /// `GET /chatbot_types/` finished
    TypesLoaded(Result<Vec<ChatbotType>, ApiError>),
    /// A chatbot was created (or creation failed)
    ChatbotCreated(Result<Chatbot, ApiError>),
    /// A chatbot delete finished
    ChatbotDeleted {
        id: String,
        result: Result<(), ApiError>,
    },
    /// Thread creation finished for the session in `ticket`
    ThreadCreated {
        ticket: ThreadTicket,
        result: Result<Thread, ApiError>,
    },
    /// The backend answered a sent message
    MessageSent {
        ticket: SendTicket,
        result: Result<SendMessageResponse, ApiError>,
    },
    SettingsLoaded {
        ticket: LoadTicket,
        result: Result<SettingsMap, ApiError>,
    },
    /// Edits were pushed and the mapping reloaded
    SettingsSaved {
        ticket: SaveTicket,
        result: Result<SettingsMap, ApiError>,
    },
    SettingDeleted {
        ticket: DeleteTicket,
        result: Result<(), ApiError>,
    },
    LogsLoaded {
        chatbot_id: String,
        result: Result<Vec<LogThread>, ApiError>,
    },
}
