//! Conversation state.
//!
//! An explicit session object shared between the orchestrator and the
//! presentation layer via `Arc` — no ambient globals. The lock is held only
//! for field access, never across an await.

use crate::types::{Message, GREETING};
use parking_lot::Mutex;

/// Append-only conversation log plus the single-flight busy gate.
///
/// The message sequence only grows and never reorders; the busy flag
/// serializes answer cycles so at most one is in flight per session.
pub struct Session {
    inner: Mutex<SessionInner>,
}

struct SessionInner {
    messages: Vec<Message>,
    busy: bool,
}

impl Session {
    /// Create a session seeded with the greeting message.
    pub fn new() -> Self {
        Self {
            inner: Mutex::new(SessionInner {
                messages: vec![Message::assistant(GREETING)],
                busy: false,
            }),
        }
    }

    /// Append a message to the log.
    pub fn append(&self, message: Message) {
        self.inner.lock().messages.push(message);
    }

    /// Snapshot of the conversation in chronological order.
    pub fn messages(&self) -> Vec<Message> {
        self.inner.lock().messages.clone()
    }

    /// Number of messages in the log.
    pub fn len(&self) -> usize {
        self.inner.lock().messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Whether an answer cycle is currently in flight.
    pub fn is_busy(&self) -> bool {
        self.inner.lock().busy
    }

    pub fn set_busy(&self, busy: bool) {
        self.inner.lock().busy = busy;
    }

    /// Atomically claim the busy gate.
    ///
    /// Returns `false` when a cycle is already in flight; the caller must
    /// not proceed in that case.
    pub fn try_begin(&self) -> bool {
        let mut inner = self.inner.lock();
        if inner.busy {
            false
        } else {
            inner.busy = true;
            true
        }
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}
