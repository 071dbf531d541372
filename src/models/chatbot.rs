use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{deserialize_id, deserialize_nullable_string};

fn default_true() -> bool {
    true
}

/// A chatbot instance as returned by `GET /chatbot/`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Chatbot {
    /// Server-assigned identifier (UUID string, sometimes an integer)
    #[serde(deserialize_with = "deserialize_id")]
    pub id: String,
    pub name: String,
    /// Free-form description
    #[serde(default, deserialize_with = "deserialize_nullable_string")]
    pub desc: String,
    #[serde(default)]
    pub owner_id: Option<String>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    /// Type tag selecting the backend implementation (e.g. "echo", "claudie")
    pub chatbot_type: String,
    /// Raw settings blob. The settings editor reads the typed view from the
    /// dedicated settings endpoint instead.
    #[serde(default)]
    pub settings: serde_json::Value,
    #[serde(default = "default_true")]
    pub visible: bool,
    #[serde(default = "default_true")]
    pub guest_allowed: bool,
}

impl Chatbot {
    /// Identity used by the chat and settings views.
    pub fn to_ref(&self) -> ChatbotRef {
        ChatbotRef {
            id: self.id.clone(),
            name: self.name.clone(),
            chatbot_type: self.chatbot_type.clone(),
        }
    }
}

/// Identity of the chatbot being chatted with. Immutable once selected.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct ChatbotRef {
    pub id: String,
    pub name: String,
    pub chatbot_type: String,
}

impl From<&Chatbot> for ChatbotRef {
    fn from(chatbot: &Chatbot) -> Self {
        chatbot.to_ref()
    }
}

/// An available chatbot implementation (`GET /chatbot_types/`)
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ChatbotType {
    /// Type tag passed back when creating a chatbot
    #[serde(rename = "type")]
    pub chatbot_type: String,
    pub name: String,
    #[serde(default, deserialize_with = "deserialize_nullable_string")]
    pub description: String,
}

/// Request body for `POST /chatbot/`
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct NewChatbot {
    pub name: String,
    pub chatbot_type: String,
    pub desc: String,
}

impl NewChatbot {
    pub fn new(name: impl Into<String>, chatbot_type: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            chatbot_type: chatbot_type.into(),
            desc: String::new(),
        }
    }

    pub fn with_desc(mut self, desc: impl Into<String>) -> Self {
        self.desc = desc.into();
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_chatbot_deserialize_full() {
        let json = r#"{
            "id": "0f7e1c2a-1111-2222-3333-444455556666",
            "name": "Echo Bot",
            "desc": "Repeats things",
            "owner_id": "7",
            "created_at": "2024-08-01T10:00:00+00:00",
            "chatbot_type": "echo",
            "settings": {"echo_prefix": "Echo: "},
            "visible": false,
            "guest_allowed": true
        }"#;

        let chatbot: Chatbot = serde_json::from_str(json).unwrap();
        assert_eq!(chatbot.name, "Echo Bot");
        assert_eq!(chatbot.chatbot_type, "echo");
        assert_eq!(chatbot.owner_id, Some("7".to_string()));
        assert!(chatbot.created_at.is_some());
        assert!(!chatbot.visible);
        assert_eq!(chatbot.settings["echo_prefix"], "Echo: ");
    }

    #[test]
    fn test_chatbot_deserialize_minimal() {
        let json = r#"{"id": 3, "name": "Tiny", "chatbot_type": "echo"}"#;
        let chatbot: Chatbot = serde_json::from_str(json).unwrap();
        assert_eq!(chatbot.id, "3");
        assert_eq!(chatbot.desc, "");
        assert!(chatbot.visible);
        assert!(chatbot.guest_allowed);
        assert!(chatbot.settings.is_null());
    }

    #[test]
    fn test_to_ref() {
        let json = r#"{"id": "bot-1", "name": "Claudie", "chatbot_type": "claudie"}"#;
        let chatbot: Chatbot = serde_json::from_str(json).unwrap();
        let chatbot_ref = ChatbotRef::from(&chatbot);
        assert_eq!(
            chatbot_ref,
            ChatbotRef {
                id: "bot-1".to_string(),
                name: "Claudie".to_string(),
                chatbot_type: "claudie".to_string(),
            }
        );
    }

    #[test]
    fn test_chatbot_type_uses_type_key() {
        let json = r#"{"type": "echo", "name": "Echo", "description": null}"#;
        let kind: ChatbotType = serde_json::from_str(json).unwrap();
        assert_eq!(kind.chatbot_type, "echo");
        assert_eq!(kind.description, "");
    }

    #[test]
    fn test_new_chatbot_serialize() {
        let body = NewChatbot::new("Helper", "claudie").with_desc("docs bot");
        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(json["name"], "Helper");
        assert_eq!(json["chatbot_type"], "claudie");
        assert_eq!(json["desc"], "docs bot");
    }
}
