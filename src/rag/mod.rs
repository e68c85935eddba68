//! Retrieval Augmented Generation (RAG) pipeline.
//!
//! One user question flows through three sequential service calls:
//!
//! 1. **Embedding** — the question becomes a 768-dimension query vector
//!    ([`embeddings`])
//! 2. **Retrieval** — the vector store returns the nearest passages
//!    ([`crate::db`])
//! 3. **Generation** — the model answers grounded in the retrieved context
//!    ([`crate::llm`])
//!
//! Each call's input depends on the previous call's output, so the stages
//! never overlap within a cycle. [`pipeline`] sequences them; [`context`]
//! builds the context block and prompt in between.

pub mod context;
pub mod embeddings;
pub mod pipeline;
