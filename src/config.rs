//! Environment-driven configuration.
//!
//! Everything is read once at startup and immutable for the life of the
//! process. Missing secrets do not abort startup: the admin view has to be
//! able to report them as missing, and any call made without credentials
//! fails into the generic-error path instead.

use crate::types::{AppError, Result};
use std::env;
use std::fmt::Display;
use std::str::FromStr;

const DEFAULT_API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta";
const DEFAULT_CHAT_MODEL: &str = "gemini-2.5-flash";
const DEFAULT_EMBEDDING_MODEL: &str = "gemini-embedding-001";
const DEFAULT_TIMEOUT_SECS: u64 = 30;

#[derive(Debug, Clone)]
pub struct Config {
    pub supabase: SupabaseConfig,
    pub gemini: GeminiConfig,
    pub retrieval: RetrievalConfig,
    /// Upper bound for each external call; a timed-out call surfaces as an
    /// ordinary upstream failure.
    pub request_timeout_secs: u64,
}

#[derive(Debug, Clone)]
pub struct SupabaseConfig {
    pub url: String,
    pub anon_key: String,
}

#[derive(Debug, Clone)]
pub struct GeminiConfig {
    pub api_key: String,
    pub api_base: String,
    pub chat_model: String,
    pub embedding_model: String,
}

/// Retrieval tunables. Passages below the threshold are excluded by the
/// store itself, not by the caller.
#[derive(Debug, Clone)]
pub struct RetrievalConfig {
    pub match_threshold: f32,
    pub match_count: usize,
    pub output_dimensionality: usize,
}

impl Default for RetrievalConfig {
    fn default() -> Self {
        Self {
            match_threshold: 0.3,
            match_count: 8,
            output_dimensionality: 768,
        }
    }
}

/// Presence (never validity) of the three required secrets.
#[derive(Debug, Clone, Copy)]
pub struct EnvStatus {
    pub supabase_url: bool,
    pub supabase_key: bool,
    pub gemini_key: bool,
}

impl EnvStatus {
    pub fn all_present(&self) -> bool {
        self.supabase_url && self.supabase_key && self.gemini_key
    }
}

impl Config {
    /// Load configuration from the environment, reading `.env` if present.
    ///
    /// Only malformed numeric overrides are errors; absent variables fall
    /// back to defaults (or empty strings for the secrets).
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();

        Ok(Config {
            supabase: SupabaseConfig {
                url: env::var("SUPABASE_URL").unwrap_or_default(),
                anon_key: env::var("SUPABASE_ANON_KEY").unwrap_or_default(),
            },
            gemini: GeminiConfig {
                api_key: env::var("GEMINI_API_KEY").unwrap_or_default(),
                api_base: env::var("GEMINI_API_BASE")
                    .unwrap_or_else(|_| DEFAULT_API_BASE.to_string()),
                chat_model: env::var("GEMINI_CHAT_MODEL")
                    .unwrap_or_else(|_| DEFAULT_CHAT_MODEL.to_string()),
                embedding_model: env::var("GEMINI_EMBEDDING_MODEL")
                    .unwrap_or_else(|_| DEFAULT_EMBEDDING_MODEL.to_string()),
            },
            retrieval: RetrievalConfig {
                match_threshold: env_parse("MATCH_THRESHOLD", 0.3)?,
                match_count: env_parse("MATCH_COUNT", 8)?,
                output_dimensionality: RetrievalConfig::default().output_dimensionality,
            },
            request_timeout_secs: env_parse("REQUEST_TIMEOUT_SECS", DEFAULT_TIMEOUT_SECS)?,
        })
    }

    /// Presence flags for the admin view and `status` command.
    pub fn env_status(&self) -> EnvStatus {
        EnvStatus {
            supabase_url: !self.supabase.url.is_empty(),
            supabase_key: !self.supabase.anon_key.is_empty(),
            gemini_key: !self.gemini.api_key.is_empty(),
        }
    }
}

fn env_parse<T>(name: &str, default: T) -> Result<T>
where
    T: FromStr,
    T::Err: Display,
{
    match env::var(name) {
        Ok(raw) => raw
            .parse()
            .map_err(|e| AppError::Config(format!("invalid {name}: {e}"))),
        Err(_) => Ok(default),
    }
}
