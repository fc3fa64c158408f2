use std::env;
use std::time::Duration;

use anyhow::{Context, Result};

use crate::llm::openai::{DEFAULT_BASE_URL, DEFAULT_MODEL};

/// Default location of the SQLite database file.
pub const DEFAULT_DB_PATH: &str = "./data/quarry.db";

/// Default LLM request timeout in seconds.
pub const DEFAULT_LLM_TIMEOUT_SECS: u64 = 30;

/// Central configuration loaded from environment variables.
///
/// All secrets come from env vars (never hardcoded). The .env file
/// is loaded automatically at startup via dotenvy.
#[derive(Debug, Clone)]
pub struct Config {
    /// OpenAI API key — required for any command that analyzes text
    pub openai_api_key: String,
    /// Base URL of an OpenAI-compatible API (defaults to https://api.openai.com/v1)
    pub openai_base_url: String,
    /// Chat model used for summaries and topics
    pub model: String,
    pub db_path: String,
    /// Timeout applied to each LLM request
    pub llm_timeout: Duration,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// Everything has a default except the API key, which is checked
    /// separately by `require_llm` so `init`, `list` and friends work
    /// without one.
    pub fn load() -> Result<Self> {
        let llm_timeout_secs = match env::var("QUARRY_LLM_TIMEOUT_SECS") {
            Ok(raw) => raw
                .trim()
                .parse::<u64>()
                .with_context(|| format!("QUARRY_LLM_TIMEOUT_SECS is not a number: {raw:?}"))?,
            Err(_) => DEFAULT_LLM_TIMEOUT_SECS,
        };

        Ok(Self {
            openai_api_key: env::var("OPENAI_API_KEY").unwrap_or_default(),
            openai_base_url: env::var("OPENAI_BASE_URL")
                .unwrap_or_else(|_| DEFAULT_BASE_URL.to_string()),
            model: env::var("QUARRY_MODEL").unwrap_or_else(|_| DEFAULT_MODEL.to_string()),
            db_path: env::var("QUARRY_DB_PATH").unwrap_or_else(|_| DEFAULT_DB_PATH.to_string()),
            llm_timeout: Duration::from_secs(llm_timeout_secs),
        })
    }

    /// Check that the LLM credentials are configured.
    /// Call this before any operation that analyzes text.
    pub fn require_llm(&self) -> Result<()> {
        if self.openai_api_key.trim().is_empty() {
            anyhow::bail!(
                "OPENAI_API_KEY not set. Add it to your .env file.\n\
                 See .env.example for the required variables."
            );
        }
        Ok(())
    }
}
