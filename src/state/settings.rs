//! Settings editor state for one chatbot.
//!
//! Edits stay local until [`SettingsEditor::begin_save`]; saving pushes each
//! edited key with its own `PUT` and then reloads, and the reloaded mapping
//! replaces local state except for edits made while the save ran. Deletes are not optimistic: the key disappears only
//! after the backend confirms.

use std::collections::{BTreeMap, BTreeSet};

use crate::api::MochiClient;
use crate::auth::RequestContext;
use crate::error::ApiError;
use crate::models::{SettingValue, SettingsMap};
use crate::optimistic::{self, Mutation, Pending};
use crate::traits::HttpClient;

use super::chat::Settled;

/// Outstanding settings load.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadTicket {
    generation: u64,
    pub chatbot_id: String,
}

/// Outstanding save: the edited values to push.
#[derive(Debug, Clone, PartialEq)]
pub struct SaveTicket {
    generation: u64,
    pub chatbot_id: String,
    pub changes: Vec<(String, SettingValue)>,
}

/// Outstanding delete of one key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeleteTicket {
    generation: u64,
    pub chatbot_id: String,
    pub key: String,
}

/// Push every change, then fetch the authoritative mapping.
///
/// Stops at the first failing `PUT`.
pub async fn push_changes<H: HttpClient>(
    api: &MochiClient<H>,
    ctx: &RequestContext,
    ticket: &SaveTicket,
) -> Result<SettingsMap, ApiError> {
    for (key, value) in &ticket.changes {
        api.update_setting(ctx, &ticket.chatbot_id, key, value)
            .await?;
    }
    api.get_settings(ctx, &ticket.chatbot_id).await
}

/// Flush the dirty keys; the token is the values that were pushed.
#[derive(Debug)]
struct FlushEdits;

/// Local fields a save touches.
#[derive(Debug, Default)]
struct EditBuffer {
    settings: SettingsMap,
    dirty: BTreeSet<String>,
}

impl EditBuffer {
    fn dirty_values(&self) -> BTreeMap<String, SettingValue> {
        self.dirty
            .iter()
            .filter_map(|key| {
                self.settings
                    .get(key)
                    .map(|s| (key.clone(), s.value.clone()))
            })
            .collect()
    }
}

impl Mutation<EditBuffer> for FlushEdits {
    type Token = BTreeMap<String, SettingValue>;
    type Confirmed = SettingsMap;

    // Edits are already visible locally; remember what goes out.
    fn apply(&self, buffer: &mut EditBuffer) -> Self::Token {
        buffer.dirty_values()
    }

    /// Take the authoritative mapping, then lay edits made after the save
    /// started back on top so they stay visible and dirty.
    fn reconcile(self, buffer: &mut EditBuffer, pushed: Self::Token, authoritative: SettingsMap) {
        let later: Vec<(String, SettingValue)> = buffer
            .dirty_values()
            .into_iter()
            .filter(|(key, value)| pushed.get(key) != Some(value))
            .collect();
        buffer.settings = authoritative;
        buffer.dirty.clear();
        for (key, value) in later {
            if let Some(setting) = buffer.settings.get_mut(&key) {
                if setting.value != value {
                    setting.value = value;
                    buffer.dirty.insert(key);
                }
            }
        }
    }

    // Keep the user's edits so they can retry.
    fn rollback(self, _: &mut EditBuffer, _: Self::Token) {}
}

/// State behind the settings screen.
#[derive(Debug, Default)]
pub struct SettingsEditor {
    generation: u64,
    chatbot_id: Option<String>,
    buffer: EditBuffer,
    loading: bool,
    saving: Option<Pending<EditBuffer, FlushEdits>>,
    deleting: Option<String>,
    error: Option<String>,
}

impl SettingsEditor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn chatbot_id(&self) -> Option<&str> {
        self.chatbot_id.as_deref()
    }

    pub fn settings(&self) -> &SettingsMap {
        &self.buffer.settings
    }

    pub fn is_dirty(&self, key: &str) -> bool {
        self.buffer.dirty.contains(key)
    }

    pub fn has_changes(&self) -> bool {
        !self.buffer.dirty.is_empty()
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn is_saving(&self) -> bool {
        self.saving.is_some()
    }

    pub fn is_busy(&self) -> bool {
        self.loading || self.is_saving() || self.deleting.is_some()
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn clear_error(&mut self) {
        self.error = None;
    }

    fn is_current(&self, generation: u64, chatbot_id: &str) -> bool {
        generation == self.generation && self.chatbot_id.as_deref() == Some(chatbot_id)
    }

    // ---------------------------------------------------------------------
    // Load
    // ---------------------------------------------------------------------

    /// Start loading settings for `chatbot_id`.
    ///
    /// Switching to a different chatbot discards the previous mapping;
    /// reloading the same one keeps it visible until the result arrives.
    pub fn begin_load(&mut self, chatbot_id: &str) -> LoadTicket {
        if self.chatbot_id.as_deref() != Some(chatbot_id) {
            self.generation += 1;
            self.chatbot_id = Some(chatbot_id.to_string());
            self.buffer = EditBuffer::default();
            self.saving = None;
            self.deleting = None;
        }
        self.loading = true;
        self.error = None;
        LoadTicket {
            generation: self.generation,
            chatbot_id: chatbot_id.to_string(),
        }
    }

    /// Apply a load result. Failure keeps whatever was shown before.
    pub fn complete_load(
        &mut self,
        ticket: LoadTicket,
        result: Result<SettingsMap, ApiError>,
    ) -> Settled {
        if !self.is_current(ticket.generation, &ticket.chatbot_id) {
            return Settled::Stale;
        }
        self.loading = false;
        match result {
            Ok(settings) => {
                tracing::debug!(
                    "Loaded {} settings for chatbot {}",
                    settings.len(),
                    ticket.chatbot_id
                );
                self.buffer.settings = settings;
                self.buffer.dirty.clear();
                Settled::Applied
            }
            Err(err) => {
                tracing::warn!("Loading settings failed: {}", err);
                self.error = Some(err.user_message());
                Settled::Failed
            }
        }
    }

    /// Drop everything held for `chatbot_id`, e.g. after it was deleted.
    /// Results still in flight for it become stale.
    pub fn forget_chatbot(&mut self, chatbot_id: &str) {
        if self.chatbot_id.as_deref() != Some(chatbot_id) {
            return;
        }
        *self = Self {
            generation: self.generation + 1,
            ..Self::default()
        };
    }

    // ---------------------------------------------------------------------
    // Local edits
    // ---------------------------------------------------------------------

    /// Change a value in memory only. Returns false for unknown keys.
    pub fn set_local(&mut self, key: &str, value: SettingValue) -> bool {
        let Some(setting) = self.buffer.settings.get_mut(key) else {
            return false;
        };
        if setting.value != value {
            setting.value = value;
            self.buffer.dirty.insert(key.to_string());
        }
        true
    }

    // ---------------------------------------------------------------------
    // Save
    // ---------------------------------------------------------------------

    /// Collect edited values for saving.
    ///
    /// None when nothing is loaded or a save or delete is already running.
    /// A save with no edits still reloads. Edits made while the save runs
    /// survive it and stay dirty.
    pub fn begin_save(&mut self) -> Option<SaveTicket> {
        let chatbot_id = self.chatbot_id.clone()?;
        if self.is_saving() || self.deleting.is_some() {
            return None;
        }
        let changes = self.buffer.dirty_values().into_iter().collect();
        self.saving = Some(optimistic::apply(&mut self.buffer, FlushEdits));
        self.error = None;
        Some(SaveTicket {
            generation: self.generation,
            chatbot_id,
            changes,
        })
    }

    /// Apply a save result: the reloaded mapping on success, an error (with
    /// edits kept) on failure.
    pub fn complete_save(
        &mut self,
        ticket: SaveTicket,
        result: Result<SettingsMap, ApiError>,
    ) -> Settled {
        if !self.is_current(ticket.generation, &ticket.chatbot_id) {
            return Settled::Stale;
        }
        let Some(pending) = self.saving.take() else {
            return Settled::Stale;
        };
        match pending.settle(&mut self.buffer, result) {
            Ok(()) => {
                tracing::info!(
                    "Saved {} setting(s) for chatbot {}",
                    ticket.changes.len(),
                    ticket.chatbot_id
                );
                Settled::Applied
            }
            Err(err) => {
                tracing::warn!("Saving settings failed: {}", err);
                self.error = Some(err.user_message());
                Settled::Failed
            }
        }
    }

    // ---------------------------------------------------------------------
    // Delete
    // ---------------------------------------------------------------------

    /// Start deleting `key`. Local state is untouched until confirmation.
    ///
    /// Refused while a save runs, since its reload could bring the key back.
    pub fn begin_delete(&mut self, key: &str) -> Option<DeleteTicket> {
        let chatbot_id = self.chatbot_id.clone()?;
        if self.deleting.is_some()
            || self.is_saving()
            || !self.buffer.settings.contains_key(key)
        {
            return None;
        }
        self.deleting = Some(key.to_string());
        self.error = None;
        Some(DeleteTicket {
            generation: self.generation,
            chatbot_id,
            key: key.to_string(),
        })
    }

    /// Remove the key once the backend confirms; on failure leave the
    /// mapping exactly as it was.
    pub fn complete_delete(
        &mut self,
        ticket: DeleteTicket,
        result: Result<(), ApiError>,
    ) -> Settled {
        if !self.is_current(ticket.generation, &ticket.chatbot_id) {
            return Settled::Stale;
        }
        self.deleting = None;
        match result {
            Ok(()) => {
                self.buffer.settings.remove(&ticket.key);
                self.buffer.dirty.remove(&ticket.key);
                tracing::info!("Deleted setting {}", ticket.key);
                Settled::Applied
            }
            Err(err) => {
                tracing::warn!("Deleting setting {} failed: {}", ticket.key, err);
                self.error = Some(err.user_message());
                Settled::Failed
            }
        }
    }

    // ---------------------------------------------------------------------
    // Async drivers
    // ---------------------------------------------------------------------

    pub async fn load<H: HttpClient>(
        &mut self,
        api: &MochiClient<H>,
        ctx: &RequestContext,
        chatbot_id: &str,
    ) -> Settled {
        let ticket = self.begin_load(chatbot_id);
        let result = api.get_settings(ctx, chatbot_id).await;
        self.complete_load(ticket, result)
    }

    pub async fn save<H: HttpClient>(
        &mut self,
        api: &MochiClient<H>,
        ctx: &RequestContext,
    ) -> Option<Settled> {
        let ticket = self.begin_save()?;
        let result = push_changes(api, ctx, &ticket).await;
        Some(self.complete_save(ticket, result))
    }

    pub async fn delete_setting<H: HttpClient>(
        &mut self,
        api: &MochiClient<H>,
        ctx: &RequestContext,
        key: &str,
    ) -> Option<Settled> {
        let ticket = self.begin_delete(key)?;
        let result = api
            .delete_setting(ctx, &ticket.chatbot_id, &ticket.key)
            .await;
        Some(self.complete_delete(ticket, result))
    }
}
