//! Chatbot directory: the list screen plus the "new chatbot" form.

use crate::api::MochiClient;
use crate::auth::RequestContext;
use crate::error::ApiError;
use crate::models::{Chatbot, ChatbotType, NewChatbot};
use crate::traits::HttpClient;

/// Fields of the create form, in tab order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FormField {
    #[default]
    Name,
    Type,
    Description,
}

impl FormField {
    pub fn next(self) -> Self {
        match self {
            FormField::Name => FormField::Type,
            FormField::Type => FormField::Description,
            FormField::Description => FormField::Name,
        }
    }
}

/// Input for a new chatbot.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NewChatbotForm {
    pub name: String,
    pub desc: String,
    pub type_index: usize,
    pub focus: FormField,
}

impl NewChatbotForm {
    /// Append a typed character to the focused text field.
    pub fn push_char(&mut self, c: char) {
        match self.focus {
            FormField::Name => self.name.push(c),
            FormField::Description => self.desc.push(c),
            FormField::Type => {}
        }
    }

    pub fn pop_char(&mut self) {
        match self.focus {
            FormField::Name => {
                self.name.pop();
            }
            FormField::Description => {
                self.desc.pop();
            }
            FormField::Type => {}
        }
    }

    /// Cycle the type choice.
    pub fn cycle_type(&mut self, forward: bool, type_count: usize) {
        if type_count == 0 {
            return;
        }
        self.type_index = if forward {
            (self.type_index + 1) % type_count
        } else {
            (self.type_index + type_count - 1) % type_count
        };
    }

    /// Build the request. None if the name is blank or no type is chosen.
    pub fn build(&self, types: &[ChatbotType]) -> Option<NewChatbot> {
        let name = self.name.trim();
        if name.is_empty() {
            return None;
        }
        let chatbot_type = types.get(self.type_index)?;
        Some(NewChatbot::new(name, chatbot_type.chatbot_type.clone()).with_desc(self.desc.trim()))
    }
}

/// State behind the chatbot list.
#[derive(Debug, Default)]
pub struct ChatbotDirectory {
    chatbots: Vec<Chatbot>,
    types: Vec<ChatbotType>,
    selected: usize,
    loading: bool,
    error: Option<String>,
    status: Option<String>,
    pub form: Option<NewChatbotForm>,
}

impl ChatbotDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn chatbots(&self) -> &[Chatbot] {
        &self.chatbots
    }

    pub fn types(&self) -> &[ChatbotType] {
        &self.types
    }

    pub fn selected_index(&self) -> usize {
        self.selected
    }

    pub fn selected(&self) -> Option<&Chatbot> {
        self.chatbots.get(self.selected)
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn status(&self) -> Option<&str> {
        self.status.as_deref()
    }

    pub fn clear_messages(&mut self) {
        self.error = None;
        self.status = None;
    }

    /// Display name for a type tag, falling back to the tag itself.
    pub fn type_name<'a>(&'a self, tag: &'a str) -> &'a str {
        self.types
            .iter()
            .find(|t| t.chatbot_type == tag)
            .map(|t| t.name.as_str())
            .unwrap_or(tag)
    }

    pub fn select_next(&mut self) {
        if !self.chatbots.is_empty() {
            self.selected = (self.selected + 1) % self.chatbots.len();
        }
    }

    pub fn select_prev(&mut self) {
        if !self.chatbots.is_empty() {
            self.selected = (self.selected + self.chatbots.len() - 1) % self.chatbots.len();
        }
    }

    fn clamp_selection(&mut self) {
        if self.selected >= self.chatbots.len() {
            self.selected = self.chatbots.len().saturating_sub(1);
        }
    }

    fn fail(&mut self, action: &str, err: &ApiError) {
        tracing::warn!("{} failed: {}", action, err);
        self.status = None;
        self.error = Some(err.user_message());
    }

    // ---------------------------------------------------------------------
    // Results
    // ---------------------------------------------------------------------

    pub fn begin_refresh(&mut self) {
        self.loading = true;
        self.error = None;
    }

    /// Replace the list. Failure keeps the previous list.
    pub fn complete_refresh(&mut self, result: Result<Vec<Chatbot>, ApiError>) {
        self.loading = false;
        match result {
            Ok(chatbots) => {
                let keep = self.selected().map(|c| c.id.clone());
                self.chatbots = chatbots;
                if let Some(id) = keep {
                    if let Some(pos) = self.chatbots.iter().position(|c| c.id == id) {
                        self.selected = pos;
                    }
                }
                self.clamp_selection();
            }
            Err(err) => self.fail("Loading chatbots", &err),
        }
    }

    pub fn complete_types(&mut self, result: Result<Vec<ChatbotType>, ApiError>) {
        match result {
            Ok(types) => self.types = types,
            Err(err) => self.fail("Loading chatbot types", &err),
        }
    }

    /// Add and select a newly created chatbot.
    pub fn complete_create(&mut self, result: Result<Chatbot, ApiError>) {
        match result {
            Ok(chatbot) => {
                tracing::info!("Created chatbot {} ({})", chatbot.name, chatbot.id);
                self.status = Some(format!("Created {}", chatbot.name));
                self.error = None;
                self.chatbots.push(chatbot);
                self.selected = self.chatbots.len() - 1;
                self.form = None;
            }
            Err(err) => self.fail("Creating chatbot", &err),
        }
    }

    /// Remove a chatbot once the backend confirms the delete.
    pub fn complete_delete(&mut self, id: &str, result: Result<(), ApiError>) {
        match result {
            Ok(()) => {
                tracing::info!("Deleted chatbot {}", id);
                self.chatbots.retain(|c| c.id != id);
                self.clamp_selection();
                self.status = Some("Chatbot deleted".to_string());
                self.error = None;
            }
            Err(err) => self.fail("Deleting chatbot", &err),
        }
    }

    // ---------------------------------------------------------------------
    // Async drivers
    // ---------------------------------------------------------------------

    pub async fn refresh<H: HttpClient>(&mut self, api: &MochiClient<H>, ctx: &RequestContext) {
        self.begin_refresh();
        let result = api.list_chatbots(ctx).await;
        self.complete_refresh(result);
    }

    pub async fn create<H: HttpClient>(
        &mut self,
        api: &MochiClient<H>,
        ctx: &RequestContext,
        chatbot: &NewChatbot,
    ) {
        let result = api.create_chatbot(ctx, chatbot).await;
        self.complete_create(result);
    }

    pub async fn delete<H: HttpClient>(
        &mut self,
        api: &MochiClient<H>,
        ctx: &RequestContext,
        id: &str,
    ) {
        let result = api.delete_chatbot(ctx, id).await;
        self.complete_delete(id, result);
    }
}
