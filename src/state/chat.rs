//! Chat view state: thread lifecycle and message dispatch.
//!
//! Network calls are split into a `begin_*` step that updates local state
//! and returns a ticket, and a `complete_*` step that applies the result.
//! The TUI runs the call on a spawned task between the two; the async
//! [`ChatController::create_thread`] and [`ChatController::send`] drivers do
//! all of it inline.
//!
//! Every ticket records the [`SessionId`] it was issued for. A result whose
//! session is no longer active is dropped without touching state.

use crate::api::MochiClient;
use crate::auth::RequestContext;
use crate::error::ApiError;
use crate::models::{ChatbotRef, SendMessageResponse, Thread};
use crate::optimistic::{self, Mutation, Pending};
use crate::traits::HttpClient;

use super::session::{ChatSession, SessionId, SessionIds};

/// Outstanding thread creation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ThreadTicket {
    pub session: SessionId,
    pub chatbot_id: String,
}

/// Outstanding message send.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SendTicket {
    pub session: SessionId,
    pub chatbot_id: String,
    pub thread_id: String,
    pub content: String,
}

/// How a completed request was applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Settled {
    /// The result was applied to the active session.
    Applied,
    /// The request failed; local state was restored and an error is shown.
    Failed,
    /// The session it targeted is gone; the result was dropped.
    Stale,
}

/// Optimistic insertion of the user's message.
#[derive(Debug)]
pub struct InsertUserMessage {
    content: String,
}

impl Mutation<ChatSession> for InsertUserMessage {
    type Token = ();
    type Confirmed = SendMessageResponse;

    fn apply(&self, session: &mut ChatSession) {
        session.push_temporary(self.content.clone());
    }

    fn reconcile(self, session: &mut ChatSession, _: (), confirmed: SendMessageResponse) {
        session.remove_temporary();
        session.append_confirmed(confirmed.user_message);
        session.append_confirmed(confirmed.assistant_message);
    }

    fn rollback(self, session: &mut ChatSession, _: ()) {
        session.remove_temporary();
    }
}

/// State behind the chat screen.
#[derive(Debug)]
pub struct ChatController {
    ids: SessionIds,
    chatbot: Option<ChatbotRef>,
    session: ChatSession,
    input: String,
    creating_thread: bool,
    in_flight: Option<Pending<ChatSession, InsertUserMessage>>,
    error: Option<String>,
}

impl Default for ChatController {
    fn default() -> Self {
        Self::new()
    }
}

impl ChatController {
    pub fn new() -> Self {
        let mut ids = SessionIds::new();
        let session = ChatSession::empty(ids.next_id());
        Self {
            ids,
            chatbot: None,
            session,
            input: String::new(),
            creating_thread: false,
            in_flight: None,
            error: None,
        }
    }

    // ---------------------------------------------------------------------
    // Accessors
    // ---------------------------------------------------------------------

    pub fn chatbot(&self) -> Option<&ChatbotRef> {
        self.chatbot.as_ref()
    }

    pub fn session(&self) -> &ChatSession {
        &self.session
    }

    pub fn thread(&self) -> Option<&Thread> {
        self.session.thread()
    }

    pub fn input(&self) -> &str {
        &self.input
    }

    pub fn is_creating_thread(&self) -> bool {
        self.creating_thread
    }

    pub fn is_sending(&self) -> bool {
        self.in_flight.is_some()
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Whether the send action is enabled.
    pub fn can_send(&self) -> bool {
        self.session.thread().is_some()
            && !self.is_sending()
            && !self.input.trim().is_empty()
    }

    // ---------------------------------------------------------------------
    // Input editing
    // ---------------------------------------------------------------------

    pub fn set_input(&mut self, text: impl Into<String>) {
        self.input = text.into();
    }

    pub fn push_char(&mut self, c: char) {
        self.input.push(c);
    }

    pub fn pop_char(&mut self) {
        self.input.pop();
    }

    pub fn clear_error(&mut self) {
        self.error = None;
    }

    // ---------------------------------------------------------------------
    // Session replacement
    // ---------------------------------------------------------------------

    /// Drop the current session and start a new one.
    ///
    /// Anything still in flight for the old session becomes stale.
    fn replace_session(&mut self, thread: Option<Thread>) {
        let id = self.ids.next_id();
        self.session = match thread {
            Some(thread) => ChatSession::with_thread(id, thread),
            None => ChatSession::empty(id),
        };
        self.in_flight = None;
        self.creating_thread = false;
    }

    /// Switch to another chatbot and request a thread for it.
    pub fn select_chatbot(&mut self, chatbot: ChatbotRef) -> Option<ThreadTicket> {
        tracing::info!("Selected chatbot {} ({})", chatbot.name, chatbot.id);
        self.chatbot = Some(chatbot);
        self.input.clear();
        self.error = None;
        self.replace_session(None);
        self.begin_create_thread()
    }

    /// Leave the chat entirely (e.g. the chatbot was deleted).
    pub fn clear_chatbot(&mut self) {
        self.chatbot = None;
        self.input.clear();
        self.error = None;
        self.replace_session(None);
    }

    // ---------------------------------------------------------------------
    // Thread lifecycle
    // ---------------------------------------------------------------------

    /// Start creating a thread for the active chatbot.
    ///
    /// Returns None when there is no chatbot or a creation is already in
    /// flight for this session.
    pub fn begin_create_thread(&mut self) -> Option<ThreadTicket> {
        let chatbot = self.chatbot.as_ref()?;
        if self.creating_thread {
            tracing::debug!("Thread creation already in flight; ignoring");
            return None;
        }
        self.creating_thread = true;
        self.error = None;
        Some(ThreadTicket {
            session: self.session.id(),
            chatbot_id: chatbot.id.clone(),
        })
    }

    /// Apply the result of a thread creation.
    ///
    /// Success installs the thread with an empty message list in one step.
    /// Failure keeps the current thread (if any) and shows an error.
    pub fn complete_create_thread(
        &mut self,
        ticket: ThreadTicket,
        result: Result<Thread, ApiError>,
    ) -> Settled {
        if ticket.session != self.session.id() {
            tracing::debug!("Dropping thread result for stale {}", ticket.session);
            return Settled::Stale;
        }
        self.creating_thread = false;
        match result {
            Ok(thread) => {
                tracing::info!("Thread {} ready", thread.id);
                self.replace_session(Some(thread));
                Settled::Applied
            }
            Err(err) => {
                tracing::warn!("Thread creation failed: {}", err);
                self.error = Some(err.user_message());
                Settled::Failed
            }
        }
    }

    // ---------------------------------------------------------------------
    // Message dispatch
    // ---------------------------------------------------------------------

    /// Insert the typed message optimistically and return what to send.
    ///
    /// A no-op (None) without a thread, with blank input, or while a send is
    /// in flight.
    pub fn begin_send(&mut self) -> Option<SendTicket> {
        if !self.can_send() {
            return None;
        }
        let thread = self.session.thread()?;
        let chatbot_id = self
            .chatbot
            .as_ref()
            .map(|c| c.id.clone())
            .unwrap_or_else(|| thread.chatbot_id.clone());
        let ticket = SendTicket {
            session: self.session.id(),
            chatbot_id,
            thread_id: thread.id.clone(),
            content: self.input.trim().to_string(),
        };

        let mutation = InsertUserMessage {
            content: ticket.content.clone(),
        };
        self.in_flight = Some(optimistic::apply(&mut self.session, mutation));
        self.input.clear();
        self.error = None;
        Some(ticket)
    }

    /// Reconcile or roll back a send.
    pub fn complete_send(
        &mut self,
        ticket: SendTicket,
        result: Result<SendMessageResponse, ApiError>,
    ) -> Settled {
        if ticket.session != self.session.id() {
            tracing::debug!("Dropping send result for stale {}", ticket.session);
            return Settled::Stale;
        }
        let Some(pending) = self.in_flight.take() else {
            tracing::debug!("No send in flight for {}", ticket.session);
            return Settled::Stale;
        };
        match pending.settle(&mut self.session, result) {
            Ok(()) => Settled::Applied,
            Err(err) => {
                tracing::warn!("Send failed: {}", err);
                self.error = Some(err.user_message());
                Settled::Failed
            }
        }
    }

    // ---------------------------------------------------------------------
    // Async drivers
    // ---------------------------------------------------------------------

    /// Create a thread for the active chatbot and apply the result.
    pub async fn create_thread<H: HttpClient>(
        &mut self,
        api: &MochiClient<H>,
        ctx: &RequestContext,
    ) -> Option<Settled> {
        let ticket = self.begin_create_thread()?;
        let result = api.create_thread(ctx, &ticket.chatbot_id).await;
        Some(self.complete_create_thread(ticket, result))
    }

    /// Send the current input and apply the result.
    pub async fn send<H: HttpClient>(
        &mut self,
        api: &MochiClient<H>,
        ctx: &RequestContext,
    ) -> Option<Settled> {
        let ticket = self.begin_send()?;
        let result = api
            .send_message(ctx, &ticket.chatbot_id, &ticket.thread_id, &ticket.content)
            .await;
        Some(self.complete_send(ticket, result))
    }
}
