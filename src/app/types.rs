//! Type definitions for the application state.
//!
//! Contains enums used for tracking UI state:
//! - [`Screen`] - Which screen is currently displayed
//! - [`Dialog`] - Which modal, if any, is drawn over the screen

/// Represents which screen is currently active
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Screen {
    #[default]
    ChatbotList,
    Chat,
    Settings,
    Logs,
}

impl Screen {
    pub fn title(&self) -> &'static str {
        match self {
            Screen::ChatbotList => "Chatbots",
            Screen::Chat => "Chat",
            Screen::Settings => "Settings",
            Screen::Logs => "Chat Logs",
        }
    }
}

/// Modal overlay state
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Dialog {
    #[default]
    None,
    /// The "new chatbot" form (its fields live in `ChatbotDirectory::form`)
    CreateChatbot,
    /// Waiting for y/n before deleting a chatbot
    ConfirmDeleteChatbot { id: String, name: String },
    /// Waiting for y/n before deleting a setting
    ConfirmDeleteSetting { key: String },
    /// Key binding reference
    Help,
}

impl Dialog {
    pub fn is_open(&self) -> bool {
        !matches!(self, Dialog::None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_screen_is_chatbot_list() {
        assert_eq!(Screen::default(), Screen::ChatbotList);
    }

    #[test]
    fn test_dialog_is_open() {
        assert!(!Dialog::default().is_open());
        assert!(Dialog::Help.is_open());
        assert!(Dialog::ConfirmDeleteSetting { key: "tone".into() }.is_open());
    }
}
