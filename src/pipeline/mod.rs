// Pipeline — orchestrates keyword extraction, LLM analysis and scoring.

pub mod analysis;

use std::sync::Arc;

use anyhow::Result;

use crate::config::Config;
use crate::keywords::nouns::NounFrequencyExtractor;
use crate::llm::analyzer::LlmAnalyzer;
use crate::llm::openai::OpenAiClient;
use crate::scoring::confidence::ConfidenceWeights;
use analysis::AnalysisPipeline;

/// Build the production pipeline: noun-frequency keywords, OpenAI-compatible
/// LLM, default confidence weights.
///
/// Fails if the API key is missing or the HTTP client can't be built.
pub fn build_pipeline(config: &Config) -> Result<AnalysisPipeline> {
    config.require_llm()?;

    let client = OpenAiClient::new(
        &config.openai_api_key,
        &config.openai_base_url,
        &config.model,
        config.llm_timeout,
    )?;
    tracing::info!(model = client.model(), "Using OpenAI-compatible LLM");

    Ok(AnalysisPipeline::new(
        Box::new(NounFrequencyExtractor::default()),
        LlmAnalyzer::new(Arc::new(client)),
        ConfidenceWeights::default(),
    ))
}
