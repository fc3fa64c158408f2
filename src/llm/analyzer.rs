// LLM analyzer — prompt, call, parse, normalize.
//
// The model is asked for a JSON object with summary, title, topics and
// sentiment. Models often wrap JSON in prose or code fences, so we take
// everything between the first '{' and the last '}'. If that doesn't parse,
// the analyzer returns a fixed placeholder instead of failing: a malformed
// reply is a degraded result, not an error.

use std::sync::Arc;

use serde_json::{Map, Value};
use tracing::{debug, error, warn};

use super::error::LlmUnavailableError;
use super::result::{LlmResult, Sentiment, TOPIC_COUNT, UNKNOWN_TOPIC};
use super::traits::{ChatRequest, LlmClient};

/// Input beyond this many characters is not sent to the model.
pub const MAX_INPUT_CHARS: usize = 2000;

pub const DEFAULT_TEMPERATURE: f32 = 0.3;
pub const DEFAULT_MAX_TOKENS: u32 = 300;

pub const SYSTEM_PROMPT: &str =
    "You are a helpful assistant that analyzes text and returns structured JSON data.";

const NO_SUMMARY: &str = "No summary available.";

/// What the analyzer made of the model's reply.
#[derive(Debug, Clone, PartialEq)]
pub enum LlmAnalysis {
    /// The reply parsed as a JSON object and was normalized.
    Parsed(LlmResult),
    /// The reply had no parseable JSON object; carries the placeholder result.
    Malformed(LlmResult),
}

impl LlmAnalysis {
    pub fn result(&self) -> &LlmResult {
        match self {
            LlmAnalysis::Parsed(r) | LlmAnalysis::Malformed(r) => r,
        }
    }

    pub fn into_result(self) -> LlmResult {
        match self {
            LlmAnalysis::Parsed(r) | LlmAnalysis::Malformed(r) => r,
        }
    }

    pub fn is_malformed(&self) -> bool {
        matches!(self, LlmAnalysis::Malformed(_))
    }
}

/// Produces a normalized [`LlmResult`] for a text via an [`LlmClient`].
pub struct LlmAnalyzer {
    client: Arc<dyn LlmClient>,
    pub temperature: f32,
    pub max_tokens: u32,
}

impl LlmAnalyzer {
    pub fn new(client: Arc<dyn LlmClient>) -> Self {
        Self {
            client,
            temperature: DEFAULT_TEMPERATURE,
            max_tokens: DEFAULT_MAX_TOKENS,
        }
    }

    /// Analyze a text. Only the first [`MAX_INPUT_CHARS`] characters are sent.
    ///
    /// Errors only when the call can't be completed; a reply that can't be
    /// parsed comes back as [`LlmAnalysis::Malformed`].
    pub async fn analyze(&self, text: &str) -> Result<LlmAnalysis, LlmUnavailableError> {
        let request = ChatRequest {
            system: SYSTEM_PROMPT.to_string(),
            user: build_prompt(truncate_input(text)),
            temperature: self.temperature,
            max_tokens: self.max_tokens,
        };

        let reply = self.client.complete(&request).await?;
        let analysis = parse_response(&reply);

        debug!(
            malformed = analysis.is_malformed(),
            sentiment = %analysis.result().sentiment,
            "LLM analysis complete"
        );

        Ok(analysis)
    }
}

/// The first [`MAX_INPUT_CHARS`] characters of `text`, on a char boundary.
pub fn truncate_input(text: &str) -> &str {
    match text.char_indices().nth(MAX_INPUT_CHARS) {
        Some((byte_idx, _)) => &text[..byte_idx],
        None => text,
    }
}

/// Build the user prompt around the (already truncated) text.
pub fn build_prompt(excerpt: &str) -> String {
    format!(
        r#"Analyze the following text and provide:
1. A 1-2 sentence summary
2. A title (if one can be inferred, otherwise null)
3. Exactly 3 key topics
4. The overall sentiment (positive, neutral, or negative)

Return the result as valid JSON in this exact format:
{{
    "summary": "Your 1-2 sentence summary here",
    "title": "Title here or null",
    "topics": ["topic1", "topic2", "topic3"],
    "sentiment": "positive/neutral/negative"
}}

Text to analyze:
{excerpt}
"#
    )
}

/// Turn the model's raw reply into a normalized analysis.
pub fn parse_response(reply: &str) -> LlmAnalysis {
    let reply = reply.trim();

    let parsed = extract_json_object(reply).and_then(|json| serde_json::from_str::<Value>(json).ok());

    match parsed {
        Some(Value::Object(map)) => LlmAnalysis::Parsed(normalize(&map)),
        _ => {
            error!(response = reply, "Failed to parse LLM response as JSON");
            LlmAnalysis::Malformed(LlmResult::malformed_response())
        }
    }
}

/// The substring from the first '{' to the last '}', if they're in order.
fn extract_json_object(text: &str) -> Option<&str> {
    let start = text.find('{')?;
    let end = text.rfind('}')?;
    (end > start).then(|| &text[start..=end])
}

/// Coerce a parsed JSON object into the result shape.
fn normalize(map: &Map<String, Value>) -> LlmResult {
    let summary = match map.get("summary") {
        Some(Value::String(s)) if !s.trim().is_empty() => s.clone(),
        _ => NO_SUMMARY.to_string(),
    };

    let title = match map.get("title") {
        Some(Value::String(s)) if !s.is_empty() => Some(s.clone()),
        _ => None,
    };

    let topics = match map.get("topics") {
        Some(Value::Array(items)) => normalize_topics(items),
        _ => vec![UNKNOWN_TOPIC.to_string(); TOPIC_COUNT],
    };

    let sentiment = map
        .get("sentiment")
        .and_then(Value::as_str)
        .and_then(Sentiment::parse)
        .unwrap_or(Sentiment::Neutral);

    LlmResult {
        summary,
        title,
        topics,
        sentiment,
    }
}

/// Pad with "unknown" or cut to exactly [`TOPIC_COUNT`] topics.
fn normalize_topics(items: &[Value]) -> Vec<String> {
    if items.len() > TOPIC_COUNT {
        warn!(
            received = items.len(),
            kept = TOPIC_COUNT,
            "LLM returned too many topics, truncating"
        );
    }

    let mut topics: Vec<String> = items
        .iter()
        .take(TOPIC_COUNT)
        .map(|item| match item {
            Value::String(s) => s.clone(),
            other => other.to_string(),
        })
        .collect();

    topics.resize(TOPIC_COUNT, UNKNOWN_TOPIC.to_string());
    topics
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_clean_json() {
        let reply = r#"{"summary": "A short summary of things.", "title": "Things",
                        "topics": ["a", "b", "c"], "sentiment": "positive"}"#;
        let analysis = parse_response(reply);
        assert!(!analysis.is_malformed());
        let result = analysis.into_result();
        assert_eq!(result.summary, "A short summary of things.");
        assert_eq!(result.title.as_deref(), Some("Things"));
        assert_eq!(result.topics, vec!["a", "b", "c"]);
        assert_eq!(result.sentiment, Sentiment::Positive);
    }

    #[test]
    fn test_parse_json_wrapped_in_prose() {
        let reply = "Sure! Here you go:\n```json\n{\"summary\": \"S\", \"topics\": [\"x\", \"y\", \"z\"], \"sentiment\": \"negative\"}\n```";
        let result = parse_response(reply).into_result();
        assert_eq!(result.summary, "S");
        assert_eq!(result.sentiment, Sentiment::Negative);
    }

    #[test]
    fn test_non_json_is_malformed() {
        let analysis = parse_response("I cannot help with that.");
        assert!(analysis.is_malformed());
        assert_eq!(analysis.into_result(), LlmResult::malformed_response());
    }

    #[test]
    fn test_braces_in_wrong_order_is_malformed() {
        assert!(parse_response("} nope {").is_malformed());
    }

    #[test]
    fn test_broken_json_is_malformed() {
        assert!(parse_response(r#"{"summary": "unterminated}"#).is_malformed());
    }

    #[test]
    fn test_missing_fields_get_defaults() {
        let result = parse_response("{}").into_result();
        assert_eq!(result.summary, "No summary available.");
        assert_eq!(result.title, None);
        assert_eq!(result.topics, vec!["unknown", "unknown", "unknown"]);
        assert_eq!(result.sentiment, Sentiment::Neutral);
    }

    #[test]
    fn test_topics_padded_and_truncated() {
        let short = parse_response(r#"{"topics": ["a", "b"]}"#).into_result();
        assert_eq!(short.topics, vec!["a", "b", "unknown"]);

        let long = parse_response(r#"{"topics": ["a", "b", "c", "d", "e"]}"#).into_result();
        assert_eq!(long.topics, vec!["a", "b", "c"]);

        let not_a_list = parse_response(r#"{"topics": "a, b, c"}"#).into_result();
        assert_eq!(not_a_list.topics, vec!["unknown", "unknown", "unknown"]);
    }

    #[test]
    fn test_non_string_topics_are_stringified() {
        let result = parse_response(r#"{"topics": [42, true, "x"]}"#).into_result();
        assert_eq!(result.topics, vec!["42", "true", "x"]);
    }

    #[test]
    fn test_invalid_sentiment_becomes_neutral() {
        let result = parse_response(r#"{"sentiment": "ecstatic"}"#).into_result();
        assert_eq!(result.sentiment, Sentiment::Neutral);
        let result = parse_response(r#"{"sentiment": 5}"#).into_result();
        assert_eq!(result.sentiment, Sentiment::Neutral);
    }

    #[test]
    fn test_empty_title_becomes_none() {
        let result = parse_response(r#"{"title": ""}"#).into_result();
        assert_eq!(result.title, None);
        let result = parse_response(r#"{"title": null}"#).into_result();
        assert_eq!(result.title, None);
        // only an exactly empty title is dropped
        let result = parse_response(r#"{"title": "  "}"#).into_result();
        assert_eq!(result.title.as_deref(), Some("  "));
    }

    #[test]
    fn test_truncate_input_respects_char_boundaries() {
        let short = "hello";
        assert_eq!(truncate_input(short), "hello");

        let long: String = "é".repeat(MAX_INPUT_CHARS + 10);
        let cut = truncate_input(&long);
        assert_eq!(cut.chars().count(), MAX_INPUT_CHARS);
    }

    #[test]
    fn test_prompt_embeds_text() {
        let prompt = build_prompt("the quick brown fox");
        assert!(prompt.contains("the quick brown fox"));
        assert!(prompt.contains("Exactly 3 key topics"));
        assert!(prompt.contains("\"topics\": [\"topic1\", \"topic2\", \"topic3\"]"));
    }
}
