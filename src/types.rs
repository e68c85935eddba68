//! Core types shared across the crate.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Opening message seeded into every new session.
pub const GREETING: &str = "Hello! I am your **NC 3rd Grade Curriculum** assistant. \
How can I help you support your students today?";

/// The one reply users see when any stage of the answer cycle fails. The
/// underlying cause goes to the log, never to the chat.
pub const GENERIC_ERROR_REPLY: &str =
    "Sorry, I encountered an error processing your request. Please check your configuration.";

/// A single chat message. Immutable once created; the session only ever
/// appends.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Message {
    pub role: MessageRole,
    pub content: String,
    pub timestamp: DateTime<Utc>,
}

impl Message {
    /// Build a user message stamped with the current time.
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: MessageRole::User,
            content: content.into(),
            timestamp: Utc::now(),
        }
    }

    /// Build an assistant message stamped with the current time.
    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: MessageRole::Assistant,
            content: content.into(),
            timestamp: Utc::now(),
        }
    }
}

/// Who authored a message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageRole {
    User,
    Assistant,
}

/// One passage returned by the vector store, ranked by descending score.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RetrievedPassage {
    pub content: String,
    pub score: f32,
}

/// Error type for all fallible operations in the crate.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Embedding error: {0}")]
    Embedding(String),

    #[error("Retrieval error: {0}")]
    Retrieval(String),

    #[error("Generation error: {0}")]
    Generation(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias used throughout the crate.
pub type Result<T> = std::result::Result<T, AppError>;
