//! Mock implementations for testing.
//!
//! Hand-written stand-ins for the three service boundaries so pipeline tests
//! can run without a network and fail any stage independently.

use async_trait::async_trait;
use parking_lot::Mutex;
use scos_assist::db::VectorStore;
use scos_assist::llm::GenerationClient;
use scos_assist::rag::embeddings::EmbeddingClient;
use scos_assist::types::{AppError, Result, RetrievedPassage};

/// Mock embedding client returning a constant vector, or failing.
pub struct MockEmbeddings {
    dimensions: usize,
    should_fail: bool,
}

impl MockEmbeddings {
    pub fn new() -> Self {
        Self {
            dimensions: 768,
            should_fail: false,
        }
    }

    /// Create a client that always returns an error.
    pub fn failing() -> Self {
        Self {
            dimensions: 768,
            should_fail: true,
        }
    }
}

#[async_trait]
impl EmbeddingClient for MockEmbeddings {
    async fn embed_query(&self, _text: &str) -> Result<Vec<f32>> {
        if self.should_fail {
            return Err(AppError::Embedding("mock embedding failure".to_string()));
        }
        Ok(vec![0.1; self.dimensions])
    }

    fn dimensions(&self) -> usize {
        self.dimensions
    }
}

/// Mock vector store returning canned passages, or failing.
pub struct MockVectorStore {
    passages: Vec<RetrievedPassage>,
    should_fail: bool,
}

impl MockVectorStore {
    pub fn with_passages(passages: &[(&str, f32)]) -> Self {
        Self {
            passages: passages
                .iter()
                .map(|(content, score)| RetrievedPassage {
                    content: content.to_string(),
                    score: *score,
                })
                .collect(),
            should_fail: false,
        }
    }

    pub fn empty() -> Self {
        Self::with_passages(&[])
    }

    /// Create a store whose search always fails.
    pub fn failing() -> Self {
        Self {
            passages: Vec::new(),
            should_fail: true,
        }
    }
}

#[async_trait]
impl VectorStore for MockVectorStore {
    fn provider_name(&self) -> &'static str {
        "mock"
    }

    async fn search(
        &self,
        _embedding: &[f32],
        _threshold: f32,
        _limit: usize,
    ) -> Result<Vec<RetrievedPassage>> {
        if self.should_fail {
            return Err(AppError::Retrieval("mock retrieval failure".to_string()));
        }
        Ok(self.passages.clone())
    }
}

/// Mock generation client with a canned response; records every prompt it
/// receives so tests can assert on the built prompt.
pub struct MockGeneration {
    response: String,
    should_fail: bool,
    prompts: Mutex<Vec<String>>,
}

impl MockGeneration {
    pub fn new(response: &str) -> Self {
        Self {
            response: response.to_string(),
            should_fail: false,
            prompts: Mutex::new(Vec::new()),
        }
    }

    /// Create a client that always returns an error.
    pub fn failing() -> Self {
        Self {
            response: String::new(),
            should_fail: true,
            prompts: Mutex::new(Vec::new()),
        }
    }

    /// Prompts seen so far, in call order.
    pub fn prompts(&self) -> Vec<String> {
        self.prompts.lock().clone()
    }
}

#[async_trait]
impl GenerationClient for MockGeneration {
    async fn generate(&self, prompt: &str) -> Result<String> {
        self.prompts.lock().push(prompt.to_string());
        if self.should_fail {
            return Err(AppError::Generation("mock generation failure".to_string()));
        }
        Ok(self.response.clone())
    }

    fn model_name(&self) -> &str {
        "mock-model"
    }
}
