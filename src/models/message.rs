use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Role of a message in a conversation
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum MessageRole {
    User,
    Assistant,
}

impl MessageRole {
    pub fn label(&self) -> &'static str {
        match self {
            MessageRole::User => "user",
            MessageRole::Assistant => "assistant",
        }
    }
}

/// A single chat message.
///
/// `temporary` marks a locally inserted user message that the backend has
/// not confirmed yet. The backend never sends it, so it defaults to false.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Message {
    pub role: MessageRole,
    #[serde(default)]
    pub content: String,
    /// When the message was created (server sends as "created_at")
    #[serde(default = "Utc::now", alias = "created_at")]
    pub timestamp: DateTime<Utc>,
    #[serde(default, skip_serializing)]
    pub temporary: bool,
}

impl Message {
    /// A confirmed message.
    pub fn new(role: MessageRole, content: impl Into<String>) -> Self {
        Self {
            role,
            content: content.into(),
            timestamp: Utc::now(),
            temporary: false,
        }
    }

    /// A locally inserted user message awaiting confirmation.
    pub fn temporary_user(content: impl Into<String>) -> Self {
        Self {
            temporary: true,
            ..Self::new(MessageRole::User, content)
        }
    }

    pub fn is_user(&self) -> bool {
        self.role == MessageRole::User
    }
}

/// Response from the chat endpoint: the persisted user message followed by
/// the assistant's reply.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SendMessageResponse {
    pub user_message: Message,
    pub assistant_message: Message,
}
