//! Supabase similarity-search client.
//!
//! Speaks PostgREST: the search is a stored procedure invoked through the
//! `/rest/v1/rpc/` endpoint with the anon key in both the `apikey` and
//! `Authorization` headers.

use crate::config::SupabaseConfig;
use crate::db::vectorstore::VectorStore;
use crate::types::{AppError, Result, RetrievedPassage};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// Stored procedure that performs the similarity search over the `school`
/// table.
const MATCH_FUNCTION: &str = "match_school_documents";

/// Vector store backed by a remote Supabase/pgvector instance.
pub struct SupabaseVectorStore {
    http: reqwest::Client,
    url: String,
    anon_key: String,
}

#[derive(Serialize)]
struct MatchRequest<'a> {
    query_embedding: &'a [f32],
    match_threshold: f32,
    match_count: usize,
}

#[derive(Deserialize)]
struct MatchRow {
    content: String,
    #[serde(default)]
    similarity: f32,
}

impl SupabaseVectorStore {
    pub fn new(http: reqwest::Client, config: &SupabaseConfig) -> Self {
        Self {
            http,
            url: config.url.trim_end_matches('/').to_string(),
            anon_key: config.anon_key.clone(),
        }
    }

    fn rpc_url(&self) -> String {
        format!("{}/rest/v1/rpc/{}", self.url, MATCH_FUNCTION)
    }
}

#[async_trait]
impl VectorStore for SupabaseVectorStore {
    fn provider_name(&self) -> &'static str {
        "supabase"
    }

    async fn search(
        &self,
        embedding: &[f32],
        threshold: f32,
        limit: usize,
    ) -> Result<Vec<RetrievedPassage>> {
        let response = self
            .http
            .post(self.rpc_url())
            .header("apikey", &self.anon_key)
            .bearer_auth(&self.anon_key)
            .json(&MatchRequest {
                query_embedding: embedding,
                match_threshold: threshold,
                match_count: limit,
            })
            .send()
            .await
            .map_err(|e| AppError::Retrieval(format!("similarity search request failed: {e}")))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(AppError::Retrieval(format!(
                "similarity search failed ({status}): {body}"
            )));
        }

        let rows: Vec<MatchRow> = response
            .json()
            .await
            .map_err(|e| AppError::Retrieval(format!("malformed search response: {e}")))?;

        Ok(rows
            .into_iter()
            .map(|row| RetrievedPassage {
                content: row.content,
                score: row.similarity,
            })
            .collect())
    }
}
