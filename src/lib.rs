//! # SCOS Assist
//!
//! Retrieval-augmented chat assistant for the North Carolina 3rd Grade
//! Standard Course of Study (SCOS).
//!
//! A user question flows through one fixed pipeline: the question is
//! embedded into a 768-dimension query vector, the vector store returns the
//! nearest curriculum passages, and a generation model answers grounded in
//! that retrieved context. The formatted answer lands in an append-only
//! conversation log rendered by the terminal UI.
//!
//! ## Quick Start (Library Usage)
//!
//! ```rust,ignore
//! use scos_assist::{Config, RagPipeline, Session};
//! use std::sync::Arc;
//!
//! let config = Config::from_env()?;
//! // wire GeminiEmbeddings + SupabaseVectorStore + GeminiClient, then:
//! let reply = pipeline.answer("What are the multiplication standards?").await;
//! ```
//!
//! ## Modules
//!
//! - [`rag`] - The retrieval-augmented answer cycle (embedding, context,
//!   orchestration)
//! - [`db`] - Vector store clients (Supabase, in-memory)
//! - [`llm`] - Generation clients (Gemini)
//! - [`session`] - Conversation state and the single-flight gate
//! - [`tui`] - Terminal chat and admin views
//! - [`cli`] - Command surface (`chat`, `ask`, `status`)
//! - [`config`] - Environment-driven configuration
//! - [`types`] - Common types and error handling

pub mod cli;
pub mod config;
pub mod db;
pub mod llm;
pub mod rag;
pub mod session;
pub mod tui;
pub mod types;

// Re-export commonly used types
pub use config::Config;
pub use rag::pipeline::RagPipeline;
pub use session::Session;
pub use types::{AppError, Message, MessageRole, Result};
