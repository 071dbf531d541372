//! Chat session store.
//!
//! A [`ChatSession`] is the thread being shown plus its ordered messages.
//! Each session gets a fresh [`SessionId`] so responses that were requested
//! for an earlier session can be recognised and dropped.

use std::fmt;

use crate::models::{Message, Thread};

/// Identity of one chat session.
///
/// Ids are issued in increasing order by [`SessionIds`] and never reused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SessionId(u64);

impl SessionId {
    pub fn as_u64(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "session#{}", self.0)
    }
}

/// Issues session ids.
#[derive(Debug, Default)]
pub struct SessionIds {
    last: u64,
}

impl SessionIds {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn next_id(&mut self) -> SessionId {
        self.last += 1;
        SessionId(self.last)
    }
}

/// The thread on screen and its messages.
#[derive(Debug, Clone)]
pub struct ChatSession {
    id: SessionId,
    thread: Option<Thread>,
    messages: Vec<Message>,
}

impl ChatSession {
    /// A session with no thread yet.
    pub fn empty(id: SessionId) -> Self {
        Self {
            id,
            thread: None,
            messages: Vec::new(),
        }
    }

    /// A session for a freshly created thread; always starts with no messages.
    pub fn with_thread(id: SessionId, thread: Thread) -> Self {
        Self {
            id,
            thread: Some(thread),
            messages: Vec::new(),
        }
    }

    pub fn id(&self) -> SessionId {
        self.id
    }

    pub fn thread(&self) -> Option<&Thread> {
        self.thread.as_ref()
    }

    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    /// Messages the backend has confirmed, in order.
    pub fn confirmed(&self) -> impl Iterator<Item = &Message> {
        self.messages.iter().filter(|m| !m.temporary)
    }

    pub fn temporary_count(&self) -> usize {
        self.messages.iter().filter(|m| m.temporary).count()
    }

    pub fn has_temporary(&self) -> bool {
        self.messages.iter().any(|m| m.temporary)
    }

    /// Append an unconfirmed user message.
    ///
    /// Refused (returns false) when one is already present.
    pub fn push_temporary(&mut self, content: impl Into<String>) -> bool {
        if self.has_temporary() {
            return false;
        }
        self.messages.push(Message::temporary_user(content));
        true
    }

    /// Remove the unconfirmed message, if any.
    pub fn remove_temporary(&mut self) -> Option<Message> {
        let index = self.messages.iter().position(|m| m.temporary)?;
        Some(self.messages.remove(index))
    }

    /// Append a message confirmed by the backend.
    pub fn append_confirmed(&mut self, mut message: Message) {
        message.temporary = false;
        self.messages.push(message);
    }
}
