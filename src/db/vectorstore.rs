//! Vector store abstraction.

use crate::types::{Result, RetrievedPassage};
use async_trait::async_trait;
use parking_lot::RwLock;

/// Abstract similarity-search interface over pre-embedded document chunks.
///
/// Implementations own ranking and filtering: passages scoring below the
/// threshold never come back, results arrive best-first, and at most `limit`
/// rows are returned. An empty result set is valid and distinct from a
/// search failure.
#[async_trait]
pub trait VectorStore: Send + Sync {
    /// Get the name of this vector store provider.
    fn provider_name(&self) -> &'static str;

    /// Nearest passages for `embedding`, best first.
    async fn search(
        &self,
        embedding: &[f32],
        threshold: f32,
        limit: usize,
    ) -> Result<Vec<RetrievedPassage>>;
}

/// In-memory vector store for testing purposes.
///
/// Uses cosine similarity and applies the same threshold/limit/ordering
/// contract as the remote store. Data is lost when the process exits.
pub struct InMemoryVectorStore {
    rows: RwLock<Vec<StoredChunk>>,
}

struct StoredChunk {
    content: String,
    embedding: Vec<f32>,
}

impl InMemoryVectorStore {
    pub fn new() -> Self {
        Self {
            rows: RwLock::new(Vec::new()),
        }
    }

    /// Insert one pre-embedded chunk.
    pub fn insert(&self, content: impl Into<String>, embedding: Vec<f32>) {
        self.rows.write().push(StoredChunk {
            content: content.into(),
            embedding,
        });
    }

    fn cosine_similarity(a: &[f32], b: &[f32]) -> f32 {
        if a.len() != b.len() {
            return 0.0;
        }

        let dot_product: f32 = a.iter().zip(b.iter()).map(|(x, y)| x * y).sum();
        let norm_a: f32 = a.iter().map(|x| x * x).sum::<f32>().sqrt();
        let norm_b: f32 = b.iter().map(|x| x * x).sum::<f32>().sqrt();

        if norm_a == 0.0 || norm_b == 0.0 {
            return 0.0;
        }

        dot_product / (norm_a * norm_b)
    }
}

impl Default for InMemoryVectorStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl VectorStore for InMemoryVectorStore {
    fn provider_name(&self) -> &'static str {
        "in-memory"
    }

    async fn search(
        &self,
        embedding: &[f32],
        threshold: f32,
        limit: usize,
    ) -> Result<Vec<RetrievedPassage>> {
        let rows = self.rows.read();

        let mut results: Vec<RetrievedPassage> = rows
            .iter()
            .filter_map(|chunk| {
                let score = Self::cosine_similarity(embedding, &chunk.embedding);
                if score >= threshold {
                    Some(RetrievedPassage {
                        content: chunk.content.clone(),
                        score,
                    })
                } else {
                    None
                }
            })
            .collect();

        results.sort_by(|a, b| {
            b.score
                .partial_cmp(&a.score)
                .unwrap_or(std::cmp::Ordering::Equal)
        });
        results.truncate(limit);

        Ok(results)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn search_ranks_by_similarity() {
        let store = InMemoryVectorStore::new();
        store.insert("exact", vec![1.0, 0.0, 0.0]);
        store.insert("orthogonal", vec![0.0, 1.0, 0.0]);
        store.insert("close", vec![0.9, 0.1, 0.0]);

        let results = store.search(&[1.0, 0.0, 0.0], 0.5, 10).await.unwrap();

        assert_eq!(results.len(), 2);
        assert_eq!(results[0].content, "exact");
        assert_eq!(results[1].content, "close");
    }

    #[tokio::test]
    async fn search_applies_the_limit() {
        let store = InMemoryVectorStore::new();
        for i in 0..5 {
            store.insert(format!("chunk {i}"), vec![1.0, 0.0]);
        }

        let results = store.search(&[1.0, 0.0], 0.0, 3).await.unwrap();
        assert_eq!(results.len(), 3);
    }

    #[tokio::test]
    async fn empty_store_returns_empty_results() {
        let store = InMemoryVectorStore::new();
        let results = store.search(&[1.0, 0.0], 0.3, 8).await.unwrap();
        assert!(results.is_empty());
    }

    #[test]
    fn cosine_similarity_bounds() {
        let sim = InMemoryVectorStore::cosine_similarity(&[1.0, 0.0], &[1.0, 0.0]);
        assert!((sim - 1.0).abs() < 0.001);

        let sim = InMemoryVectorStore::cosine_similarity(&[1.0, 0.0], &[0.0, 1.0]);
        assert!(sim.abs() < 0.001);

        let sim = InMemoryVectorStore::cosine_similarity(&[1.0, 0.0], &[-1.0, 0.0]);
        assert!((sim + 1.0).abs() < 0.001);
    }
}
