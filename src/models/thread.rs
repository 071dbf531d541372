use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::deserialize_id;

/// A server-tracked conversation between the user and one chatbot.
///
/// Threads are created by the backend and never mutated locally; requesting
/// a new thread replaces the whole value.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Thread {
    #[serde(deserialize_with = "deserialize_id")]
    pub id: String,
    /// Owning chatbot (older backends send this as "chatbot")
    #[serde(deserialize_with = "deserialize_id", alias = "chatbot")]
    pub chatbot_id: String,
    #[serde(default = "Utc::now")]
    pub created_at: DateTime<Utc>,
}
