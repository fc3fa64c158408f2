// Analysis pipeline: text in, storable analysis out.
//
// Keywords come from local extraction, summary/title/topics/sentiment from
// the LLM, and a confidence score ties them together. LLM trouble never
// fails a run: an unreachable LLM and an unparseable reply each swap in their
// own fixed placeholder, and the output records which one happened.
//
// Persistence is the caller's job.

use serde::Serialize;
use thiserror::Error;
use tracing::{error, info, warn};

use crate::keywords::traits::KeywordExtractor;
use crate::keywords::DEFAULT_KEYWORD_COUNT;
use crate::llm::analyzer::{LlmAnalysis, LlmAnalyzer};
use crate::llm::error::LlmErrorKind;
use crate::llm::result::{LlmResult, Sentiment};
use crate::scoring::confidence::{compute_confidence_score, ConfidenceWeights};

/// Stored in place of keywords when extraction finds nothing.
pub const KEYWORD_PLACEHOLDER: [&str; 3] = ["none", "found", "extracted"];

/// The input was empty or only whitespace.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("Text cannot be empty or only whitespace")]
pub struct EmptyInputError;

/// Why an analysis is built on a placeholder instead of real LLM output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DegradedReason {
    /// The LLM replied, but not with usable JSON.
    MalformedResponse,
    /// The LLM call failed.
    LlmUnavailable(LlmErrorKind),
}

/// Whether the LLM part of an analysis is real.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AnalysisQuality {
    Complete,
    Degraded(DegradedReason),
}

impl AnalysisQuality {
    pub fn is_degraded(&self) -> bool {
        matches!(self, AnalysisQuality::Degraded(_))
    }
}

/// A finished analysis, ready to persist. Always three topics and three keywords.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnalysisOutput {
    pub summary: String,
    pub title: Option<String>,
    pub topics: Vec<String>,
    pub sentiment: Sentiment,
    pub keywords: Vec<String>,
    pub confidence_score: u8,
    pub quality: AnalysisQuality,
}

/// Composes keyword extraction, LLM analysis and confidence scoring.
///
/// Collaborators are passed in at construction; the pipeline holds no
/// mutable state, so one instance can serve concurrent runs.
pub struct AnalysisPipeline {
    extractor: Box<dyn KeywordExtractor>,
    analyzer: LlmAnalyzer,
    weights: ConfidenceWeights,
}

impl AnalysisPipeline {
    pub fn new(
        extractor: Box<dyn KeywordExtractor>,
        analyzer: LlmAnalyzer,
        weights: ConfidenceWeights,
    ) -> Self {
        Self {
            extractor,
            analyzer,
            weights,
        }
    }

    /// Analyze one text.
    ///
    /// Fails only for empty or whitespace-only input, checked before any
    /// other work. Scoring uses the full text even though the LLM only sees
    /// a prefix of it.
    pub async fn run(&self, text: &str) -> Result<AnalysisOutput, EmptyInputError> {
        validate_input(text)?;

        info!(chars = text.chars().count(), "Analyzing text");

        let keywords = self.extractor.extract(text, DEFAULT_KEYWORD_COUNT);

        let (llm_result, quality) = match self.analyzer.analyze(text).await {
            Ok(LlmAnalysis::Parsed(result)) => (result, AnalysisQuality::Complete),
            Ok(LlmAnalysis::Malformed(result)) => (
                result,
                AnalysisQuality::Degraded(DegradedReason::MalformedResponse),
            ),
            Err(e) => {
                error!(kind = %e.kind, error = %e, "LLM analysis failed, storing fallback");
                (
                    LlmResult::llm_failure(),
                    AnalysisQuality::Degraded(DegradedReason::LlmUnavailable(e.kind)),
                )
            }
        };

        let confidence_score = compute_confidence_score(
            text,
            &llm_result.summary,
            &llm_result.topics,
            &self.weights,
        );

        let keywords = pad_keywords(keywords);

        if quality.is_degraded() {
            warn!(quality = ?quality, confidence_score, "Analysis degraded");
        } else {
            info!(
                confidence_score,
                sentiment = %llm_result.sentiment,
                "Analysis complete"
            );
        }

        Ok(AnalysisOutput {
            summary: llm_result.summary,
            title: llm_result.title,
            topics: llm_result.topics,
            sentiment: llm_result.sentiment,
            keywords,
            confidence_score,
            quality,
        })
    }
}

/// Reject empty or whitespace-only text.
pub fn validate_input(text: &str) -> Result<(), EmptyInputError> {
    if text.trim().is_empty() {
        Err(EmptyInputError)
    } else {
        Ok(())
    }
}

/// Bring an extracted keyword list up to exactly three entries.
///
/// No keywords → the full placeholder. One or two → topped up with
/// placeholder words not already present.
pub fn pad_keywords(mut keywords: Vec<String>) -> Vec<String> {
    let target = KEYWORD_PLACEHOLDER.len();
    if keywords.is_empty() {
        return KEYWORD_PLACEHOLDER.iter().map(|k| k.to_string()).collect();
    }
    for filler in KEYWORD_PLACEHOLDER {
        if keywords.len() >= target {
            break;
        }
        if !keywords.iter().any(|k| k.as_str() == filler) {
            keywords.push(filler.to_string());
        }
    }
    keywords.truncate(target);
    keywords
}
