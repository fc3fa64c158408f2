// Structured LLM output and its fixed fallbacks.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Number of topics every result carries.
pub const TOPIC_COUNT: usize = 3;

/// Filler for missing topics.
pub const UNKNOWN_TOPIC: &str = "unknown";

/// Coarse emotional polarity of a text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sentiment {
    Positive,
    Neutral,
    Negative,
}

impl Sentiment {
    /// Parse an exact lowercase label. Anything else is `None`.
    pub fn parse(label: &str) -> Option<Self> {
        match label {
            "positive" => Some(Sentiment::Positive),
            "neutral" => Some(Sentiment::Neutral),
            "negative" => Some(Sentiment::Negative),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Sentiment::Positive => "positive",
            Sentiment::Neutral => "neutral",
            Sentiment::Negative => "negative",
        }
    }
}

impl fmt::Display for Sentiment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Normalized LLM analysis: always three topics, always a valid sentiment,
/// never an empty title.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LlmResult {
    pub summary: String,
    pub title: Option<String>,
    pub topics: Vec<String>,
    pub sentiment: Sentiment,
}

impl LlmResult {
    /// Substituted when the LLM replied but the reply wasn't usable JSON.
    pub fn malformed_response() -> Self {
        Self::placeholder(
            "Unable to generate summary due to parsing error.",
            ["unknown", "error", "parsing"],
        )
    }

    /// Substituted when the LLM call itself failed.
    pub fn llm_failure() -> Self {
        Self::placeholder(
            "Analysis failed due to LLM error. Text stored for later processing.",
            ["error", "processing", "failed"],
        )
    }

    fn placeholder(summary: &str, topics: [&str; TOPIC_COUNT]) -> Self {
        Self {
            summary: summary.to_string(),
            title: None,
            topics: topics.iter().map(|t| t.to_string()).collect(),
            sentiment: Sentiment::Neutral,
        }
    }
}
