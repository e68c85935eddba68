//! Gemini generation client (`generateContent`).

use crate::config::GeminiConfig;
use crate::llm::client::GenerationClient;
use crate::types::{AppError, Result};
use async_trait::async_trait;
use serde::Deserialize;
use serde_json::json;

pub struct GeminiClient {
    http: reqwest::Client,
    api_base: String,
    api_key: String,
    model: String,
}

#[derive(Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Deserialize)]
struct Candidate {
    content: CandidateContent,
}

#[derive(Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<Part>,
}

#[derive(Deserialize)]
struct Part {
    #[serde(default)]
    text: String,
}

impl GeminiClient {
    pub fn new(http: reqwest::Client, config: &GeminiConfig) -> Self {
        Self {
            http,
            api_base: config.api_base.trim_end_matches('/').to_string(),
            api_key: config.api_key.clone(),
            model: config.chat_model.clone(),
        }
    }
}

#[async_trait]
impl GenerationClient for GeminiClient {
    async fn generate(&self, prompt: &str) -> Result<String> {
        let url = format!("{}/models/{}:generateContent", self.api_base, self.model);
        let body = json!({
            "contents": [{ "parts": [{ "text": prompt }] }]
        });

        let response = self
            .http
            .post(&url)
            .header("x-goog-api-key", &self.api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| AppError::Generation(format!("generation request failed: {e}")))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(AppError::Generation(format!(
                "generation failed ({status}): {body}"
            )));
        }

        let parsed: GenerateResponse = response
            .json()
            .await
            .map_err(|e| AppError::Generation(format!("malformed generation response: {e}")))?;

        let candidate = parsed
            .candidates
            .into_iter()
            .next()
            .ok_or_else(|| AppError::Generation("response carried no candidates".to_string()))?;

        let text: String = candidate
            .content
            .parts
            .into_iter()
            .map(|part| part.text)
            .collect();

        if text.is_empty() {
            return Err(AppError::Generation("response carried no text".to_string()));
        }

        Ok(text)
    }

    fn model_name(&self) -> &str {
        &self.model
    }
}
