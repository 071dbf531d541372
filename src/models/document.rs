use serde::{Deserialize, Serialize};

/// A knowledge document attached to a chatbot.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Document {
    pub name: String,
    /// Server-side storage path
    #[serde(default)]
    pub path: String,
    /// Public URL, when the backend exposes one
    #[serde(default)]
    pub url: Option<String>,
}

/// Wrapper for `GET /chatbot/{id}/documents/`.
/// The API returns {"documents": [...]} not a bare array.
#[derive(Debug, Clone, Deserialize)]
pub struct DocumentList {
    #[serde(default)]
    pub documents: Vec<Document>,
}
