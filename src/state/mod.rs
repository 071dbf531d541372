//! Application state management
//!
//! This module contains the state containers behind each screen:
//! - ChatSession / SessionId: the thread on screen and its messages
//! - ChatController: thread lifecycle and message dispatch
//! - SettingsEditor: per-chatbot settings with local edits
//! - ChatbotDirectory: the chatbot list and create form
//! - ChatLogs: historical conversations
//!
//! None of these perform I/O on their own. Each operation is a `begin_*` /
//! `complete_*` pair, with async drivers that call the API in between.

pub mod chat;
pub mod chatbots;
pub mod logs;
pub mod session;
pub mod settings;

pub use chat::{ChatController, SendTicket, Settled, ThreadTicket};
pub use chatbots::{ChatbotDirectory, FormField, NewChatbotForm};
pub use logs::ChatLogs;
pub use session::{ChatSession, SessionId, SessionIds};
pub use settings::{push_changes, DeleteTicket, LoadTicket, SaveTicket, SettingsEditor};
