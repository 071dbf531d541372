//! Application state for the Mochi dashboard TUI.
//!
//! `App` owns one state container per screen plus the channel that
//! background requests report back on. Key handling lives in
//! [`navigation`], request spawning in [`actions`] and result handling in
//! [`handlers`].

mod actions;
mod handlers;
mod messages;
mod navigation;
mod types;

pub use messages::AppMessage;
pub use types::{Dialog, Screen};

use tokio::sync::mpsc;

use crate::adapters::ReqwestHttpClient;
use crate::api::MochiClient;
use crate::auth::RequestContext;
use crate::config::Config;
use crate::state::{ChatController, ChatLogs, ChatbotDirectory, SettingsEditor};
use crate::traits::HttpClient;
use crate::widgets::{WidgetContext, WidgetTable};

/// Main application state
pub struct App<H: HttpClient = ReqwestHttpClient> {
    /// Currently displayed screen
    pub screen: Screen,
    /// Modal drawn over the screen
    pub dialog: Dialog,
    /// Flag to quit the application
    pub should_quit: bool,
    /// Set on state mutations, cleared after each draw
    pub needs_redraw: bool,
    /// Tick counter for the loading spinner
    pub tick_count: u64,
    /// Chatbot list and create form
    pub directory: ChatbotDirectory,
    /// Active chatbot, its thread and messages
    pub chat: ChatController,
    /// Settings of the chatbot opened on the settings screen
    pub settings: SettingsEditor,
    /// Focused row on the settings screen
    pub settings_cursor: usize,
    pub logs: ChatLogs,
    /// Type tag → setting editor
    pub widgets: WidgetTable,
    pub widget_ctx: WidgetContext,
    /// Signed-in user, shown in the header
    pub username: Option<String>,
    /// API client (shared with spawned tasks)
    pub client: MochiClient<H>,
    /// Base URL and credential attached to every request
    pub ctx: RequestContext,
    /// Receiver for async results (taken by the event loop)
    pub message_rx: Option<mpsc::UnboundedReceiver<AppMessage>>,
    /// Sender for async results (clone this to pass to async tasks)
    pub message_tx: mpsc::UnboundedSender<AppMessage>,
}

impl<H: HttpClient + 'static> App<H> {
    /// Create a new App over the given client and request context.
    pub fn new(client: MochiClient<H>, ctx: RequestContext, config: &Config) -> Self {
        let (message_tx, message_rx) = mpsc::unbounded_channel();

        Self {
            screen: Screen::default(),
            dialog: Dialog::default(),
            should_quit: false,
            needs_redraw: true,
            tick_count: 0,
            directory: ChatbotDirectory::new(),
            chat: ChatController::new(),
            settings: SettingsEditor::new(),
            settings_cursor: 0,
            logs: ChatLogs::new(),
            widgets: WidgetTable::standard(),
            widget_ctx: WidgetContext {
                number_step: config.number_step,
            },
            username: None,
            client,
            ctx,
            message_rx: Some(message_rx),
            message_tx,
        }
    }

    pub fn with_username(mut self, username: Option<String>) -> Self {
        self.username = username;
        self
    }

    /// Kick off the initial loads.
    pub fn initialize(&mut self) {
        self.refresh_chatbots();
        self.load_chatbot_types();
    }

    pub fn mark_dirty(&mut self) {
        self.needs_redraw = true;
    }

    pub fn quit(&mut self) {
        self.should_quit = true;
    }

    /// Advance the spinner; only redraws while something is loading.
    pub fn tick(&mut self) {
        self.tick_count = self.tick_count.wrapping_add(1);
        if self.is_busy() && self.tick_count % 6 == 0 {
            self.mark_dirty();
        }
    }

    /// True while any request the user is waiting on is outstanding.
    pub fn is_busy(&self) -> bool {
        self.directory.is_loading()
            || self.chat.is_creating_thread()
            || self.chat.is_sending()
            || self.settings.is_busy()
            || self.logs.is_loading()
    }

    /// Key of the focused row on the settings screen.
    pub fn focused_setting_key(&self) -> Option<&str> {
        self.settings
            .settings()
            .keys()
            .nth(self.settings_cursor)
            .map(String::as_str)
    }

    fn clamp_settings_cursor(&mut self) {
        let len = self.settings.settings().len();
        if self.settings_cursor >= len {
            self.settings_cursor = len.saturating_sub(1);
        }
    }
}
