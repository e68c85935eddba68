//! The retrieval-augmented answer cycle.

use std::sync::Arc;

use crate::config::RetrievalConfig;
use crate::db::VectorStore;
use crate::llm::GenerationClient;
use crate::rag::context::{build_context, build_prompt};
use crate::rag::embeddings::EmbeddingClient;
use crate::session::Session;
use crate::types::{Message, Result, GENERIC_ERROR_REPLY};

/// Sequences one question through embed → search → generate and appends the
/// outcome to the session.
///
/// All three service boundaries are injected, so tests can fail any stage
/// independently.
pub struct RagPipeline {
    embeddings: Arc<dyn EmbeddingClient>,
    store: Arc<dyn VectorStore>,
    llm: Arc<dyn GenerationClient>,
    retrieval: RetrievalConfig,
    session: Arc<Session>,
}

impl RagPipeline {
    pub fn new(
        embeddings: Arc<dyn EmbeddingClient>,
        store: Arc<dyn VectorStore>,
        llm: Arc<dyn GenerationClient>,
        retrieval: RetrievalConfig,
        session: Arc<Session>,
    ) -> Self {
        Self {
            embeddings,
            store,
            llm,
            retrieval,
            session,
        }
    }

    /// The session this pipeline appends to.
    pub fn session(&self) -> &Arc<Session> {
        &self.session
    }

    /// Identifier of the generation model behind this pipeline.
    pub fn model_name(&self) -> &str {
        self.llm.model_name()
    }

    /// Answer one question.
    ///
    /// Returns `None` without touching the session when the question is
    /// blank or another cycle is in flight. Otherwise appends exactly one
    /// assistant message — the grounded answer, or the fixed generic reply
    /// when any stage fails — and releases the busy gate before returning.
    pub async fn answer(&self, question: &str) -> Option<Message> {
        let question = question.trim();
        if question.is_empty() || !self.session.try_begin() {
            return None;
        }

        let reply = match self.run_cycle(question).await {
            Ok(text) => text,
            Err(e) => {
                tracing::error!(error = %e, "answer cycle failed");
                GENERIC_ERROR_REPLY.to_string()
            }
        };

        // Success and failure converge here: one append, then the gate opens.
        let message = Message::assistant(reply);
        self.session.append(message.clone());
        self.session.set_busy(false);
        Some(message)
    }

    async fn run_cycle(&self, question: &str) -> Result<String> {
        let embedding = self.embeddings.embed_query(question).await?;

        let passages = self
            .store
            .search(
                &embedding,
                self.retrieval.match_threshold,
                self.retrieval.match_count,
            )
            .await?;

        tracing::debug!(
            passages = passages.len(),
            store = self.store.provider_name(),
            "retrieval complete"
        );

        let context = build_context(&passages);
        let prompt = build_prompt(&context, question);

        self.llm.generate(&prompt).await
    }
}
