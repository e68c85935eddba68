//! Generation client abstraction.

use crate::types::Result;
use async_trait::async_trait;

/// Text-generation boundary: one prompt in, one completion out.
///
/// The pipeline is written against this trait so tests can inject canned or
/// failing clients without touching a network.
#[async_trait]
pub trait GenerationClient: Send + Sync {
    /// Generate a completion for `prompt`.
    async fn generate(&self, prompt: &str) -> Result<String>;

    /// Get the model name/identifier.
    fn model_name(&self) -> &str;
}
