// LLM provider errors.
//
// Only failures to complete the call live here (auth, rate limit, transport).
// A response that arrives but can't be parsed is not an error — the analyzer
// handles it with its own fallback.

use std::fmt;

use serde::Serialize;
use thiserror::Error;

/// Why the LLM call couldn't be completed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LlmErrorKind {
    Authentication,
    RateLimit,
    Transport,
    Unknown,
}

impl LlmErrorKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            LlmErrorKind::Authentication => "authentication",
            LlmErrorKind::RateLimit => "rate_limit",
            LlmErrorKind::Transport => "transport",
            LlmErrorKind::Unknown => "unknown",
        }
    }

    /// Human-readable explanation for logs and terminal output.
    pub fn describe(&self) -> &'static str {
        match self {
            LlmErrorKind::Authentication => "LLM API authentication failed. Please check your API key.",
            LlmErrorKind::RateLimit => "LLM API rate limit exceeded. Please try again later.",
            LlmErrorKind::Transport => "Could not reach the LLM API.",
            LlmErrorKind::Unknown => "LLM analysis failed.",
        }
    }
}

impl fmt::Display for LlmErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The outbound LLM call could not be completed.
#[derive(Debug, Clone, Error)]
#[error("{} ({kind}): {message}", .kind.describe())]
pub struct LlmUnavailableError {
    pub kind: LlmErrorKind,
    pub message: String,
}

impl LlmUnavailableError {
    pub fn new(kind: LlmErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    /// Build an error whose kind is inferred from the message text.
    pub fn from_message(message: impl Into<String>) -> Self {
        let message = message.into();
        Self {
            kind: classify_error_message(&message),
            message,
        }
    }
}

/// Classify a provider error by its message text.
///
/// Used only when there's no structured signal (HTTP status, reqwest error
/// kind) to go on. Matching is case-insensitive.
pub fn classify_error_message(message: &str) -> LlmErrorKind {
    let lower = message.to_lowercase();

    if contains_any(&lower, &["authentication", "api key", "unauthorized", "permission denied"]) {
        LlmErrorKind::Authentication
    } else if contains_any(&lower, &["rate limit", "rate_limit", "too many requests", "quota"]) {
        LlmErrorKind::RateLimit
    } else if contains_any(&lower, &["connection", "timed out", "timeout", "dns", "network"]) {
        LlmErrorKind::Transport
    } else {
        LlmErrorKind::Unknown
    }
}

fn contains_any(haystack: &str, patterns: &[&str]) -> bool {
    patterns.iter().any(|p| haystack.contains(p))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_authentication() {
        assert_eq!(
            classify_error_message("Error code: 401 - Incorrect API key provided"),
            LlmErrorKind::Authentication
        );
        assert_eq!(
            classify_error_message("AuthenticationError: bad credentials"),
            LlmErrorKind::Authentication
        );
    }

    #[test]
    fn test_classify_rate_limit() {
        assert_eq!(
            classify_error_message("Rate limit reached for requests"),
            LlmErrorKind::RateLimit
        );
        assert_eq!(
            classify_error_message("429 Too Many Requests"),
            LlmErrorKind::RateLimit
        );
    }

    #[test]
    fn test_classify_transport() {
        assert_eq!(
            classify_error_message("Connection refused (os error 111)"),
            LlmErrorKind::Transport
        );
        assert_eq!(
            classify_error_message("operation timed out"),
            LlmErrorKind::Transport
        );
    }

    #[test]
    fn test_classify_unknown() {
        assert_eq!(classify_error_message("API Error"), LlmErrorKind::Unknown);
        assert_eq!(classify_error_message(""), LlmErrorKind::Unknown);
    }

    #[test]
    fn test_error_display_carries_category() {
        let err = LlmUnavailableError::new(LlmErrorKind::RateLimit, "slow down");
        let text = err.to_string();
        assert!(text.contains("rate_limit"));
        assert!(text.contains("slow down"));
    }

    #[test]
    fn test_kind_serializes_snake_case() {
        let json = serde_json::to_string(&LlmErrorKind::RateLimit).unwrap();
        assert_eq!(json, "\"rate_limit\"");
    }
}
