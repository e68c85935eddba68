//! Text-generation clients.

pub mod client;
pub mod gemini;

pub use client::GenerationClient;
pub use gemini::GeminiClient;
