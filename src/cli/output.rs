//! Plain-text output for CLI commands.
//!
//! The `format_*` functions build the full text so it can be tested; the
//! command runner prints it.

use crate::models::{Chatbot, ChatbotType, Document, LogThread, SettingsMap};
use crate::ui::helpers::{format_timestamp, pad_to_width};

/// Line width for separators.
const LINE_WIDTH: usize = 60;

/// Status icons
pub mod icons {
    pub const SUCCESS: &str = "✓";
    pub const FAILURE: &str = "✗";
    pub const WARNING: &str = "⚠";
}

/// A title underlined with a heavy rule.
///
/// ```text
/// CHATBOTS
/// ════════════════════════════════════════════════════════════
/// ```
pub fn header(title: &str) -> String {
    format!("{}\n{}\n", title, "═".repeat(LINE_WIDTH))
}

pub fn status_line(icon: &str, message: &str) -> String {
    format!("{} {}", icon, message)
}

pub fn format_chatbots(chatbots: &[Chatbot]) -> String {
    if chatbots.is_empty() {
        return "No chatbots.\n".to_string();
    }
    let mut out = format!(
        "{}{}{}\n",
        pad_to_width("ID", 8),
        pad_to_width("NAME", 24),
        "TYPE"
    );
    for chatbot in chatbots {
        out.push_str(&format!(
            "{}{}{}\n",
            pad_to_width(&chatbot.id, 8),
            pad_to_width(&chatbot.name, 24),
            chatbot.chatbot_type
        ));
    }
    out
}

pub fn format_types(types: &[ChatbotType]) -> String {
    types
        .iter()
        .map(|t| {
            if t.description.is_empty() {
                format!("{}  {}\n", pad_to_width(&t.chatbot_type, 16), t.name)
            } else {
                format!(
                    "{}  {} - {}\n",
                    pad_to_width(&t.chatbot_type, 16),
                    t.name,
                    t.description
                )
            }
        })
        .collect()
}

pub fn format_settings(settings: &SettingsMap) -> String {
    if settings.is_empty() {
        return "No settings.\n".to_string();
    }
    let mut out = String::new();
    for setting in settings.values() {
        out.push_str(&format!(
            "{}{}{}\n",
            pad_to_width(&setting.key, 24),
            pad_to_width(setting.setting_type.as_str(), 10),
            setting.value
        ));
    }
    out
}

pub fn format_logs(threads: &[LogThread]) -> String {
    if threads.is_empty() {
        return "No logs.\n".to_string();
    }
    let mut out = String::new();
    for thread in threads {
        let when = thread
            .created_at
            .map(|ts| format_timestamp(&ts))
            .unwrap_or_default();
        out.push_str(&format!("── thread {} {}\n", thread.id, when));
        for message in &thread.messages {
            out.push_str(&format!("  {:>9}: {}\n", message.role.label(), message.content));
        }
    }
    out
}

pub fn format_documents(documents: &[Document]) -> String {
    if documents.is_empty() {
        return "No documents.\n".to_string();
    }
    documents
        .iter()
        .map(|d| match &d.url {
            Some(url) => format!("{}  {}\n", pad_to_width(&d.name, 32), url),
            None => format!("{}\n", d.name),
        })
        .collect()
}
