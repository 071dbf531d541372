use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{deserialize_id, Message};

/// One historical conversation returned by `GET /chatbot/{id}/logs/`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LogThread {
    #[serde(deserialize_with = "deserialize_id")]
    pub id: String,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub messages: Vec<Message>,
}

impl LogThread {
    /// Timestamp of the latest message, falling back to thread creation.
    pub fn last_activity(&self) -> Option<DateTime<Utc>> {
        self.messages
            .last()
            .map(|m| m.timestamp)
            .or(self.created_at)
    }
}
