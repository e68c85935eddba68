//! Query embedding client (`embedContent`).

use crate::config::GeminiConfig;
use crate::types::{AppError, Result};
use async_trait::async_trait;
use serde::Deserialize;
use serde_json::json;

/// Task type tag for query-side embeddings. Document-side rows are written
/// by the offline ingestion tool with `RETRIEVAL_DOCUMENT`.
const QUERY_TASK_TYPE: &str = "RETRIEVAL_QUERY";

/// Maps free text to a fixed-dimensionality query vector.
#[async_trait]
pub trait EmbeddingClient: Send + Sync {
    /// Embed a retrieval query.
    async fn embed_query(&self, text: &str) -> Result<Vec<f32>>;

    /// Dimensionality every returned vector must have.
    fn dimensions(&self) -> usize;
}

pub struct GeminiEmbeddings {
    http: reqwest::Client,
    api_base: String,
    api_key: String,
    model: String,
    dimensions: usize,
}

#[derive(Deserialize)]
struct EmbedResponse {
    embedding: EmbeddingValues,
}

#[derive(Deserialize)]
struct EmbeddingValues {
    values: Vec<f32>,
}

impl GeminiEmbeddings {
    pub fn new(http: reqwest::Client, config: &GeminiConfig, dimensions: usize) -> Self {
        Self {
            http,
            api_base: config.api_base.trim_end_matches('/').to_string(),
            api_key: config.api_key.clone(),
            model: config.embedding_model.clone(),
            dimensions,
        }
    }
}

#[async_trait]
impl EmbeddingClient for GeminiEmbeddings {
    async fn embed_query(&self, text: &str) -> Result<Vec<f32>> {
        let url = format!("{}/models/{}:embedContent", self.api_base, self.model);
        let body = json!({
            "content": { "parts": [{ "text": text }] },
            "taskType": QUERY_TASK_TYPE,
            "outputDimensionality": self.dimensions,
        });

        let response = self
            .http
            .post(&url)
            .header("x-goog-api-key", &self.api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| AppError::Embedding(format!("embedding request failed: {e}")))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(AppError::Embedding(format!(
                "embedding failed ({status}): {body}"
            )));
        }

        let parsed: EmbedResponse = response
            .json()
            .await
            .map_err(|e| AppError::Embedding(format!("malformed embedding response: {e}")))?;

        let values = parsed.embedding.values;
        if values.len() != self.dimensions {
            return Err(AppError::Embedding(format!(
                "expected a {}-dimension vector, got {}",
                self.dimensions,
                values.len()
            )));
        }

        Ok(values)
    }

    fn dimensions(&self) -> usize {
        self.dimensions
    }
}
