// OpenAI-compatible chat completions client.
//
// Works against api.openai.com or any server exposing the same
// /chat/completions shape (set OPENAI_BASE_URL). One request per call, no
// retries. The request timeout is set on the reqwest client.
//
// API docs: https://platform.openai.com/docs/api-reference/chat

use std::time::Duration;

use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::error::{classify_error_message, LlmErrorKind, LlmUnavailableError};
use super::traits::{ChatRequest, LlmClient};

pub const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";
pub const DEFAULT_MODEL: &str = "gpt-4.1-nano-2025-04-14";

/// Chat completions client for OpenAI-compatible APIs.
pub struct OpenAiClient {
    client: Client,
    api_key: String,
    base_url: String,
    model: String,
}

impl OpenAiClient {
    /// Create a client. `base_url` is the API root, e.g. `https://api.openai.com/v1`.
    pub fn new(api_key: &str, base_url: &str, model: &str, timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .context("Failed to build HTTP client")?;

        Ok(Self {
            client,
            api_key: api_key.to_string(),
            base_url: base_url.trim_end_matches('/').to_string(),
            model: model.to_string(),
        })
    }

    pub fn model(&self) -> &str {
        &self.model
    }
}

#[async_trait]
impl LlmClient for OpenAiClient {
    async fn complete(&self, request: &ChatRequest) -> Result<String, LlmUnavailableError> {
        let url = format!("{}/chat/completions", self.base_url);

        let body = CompletionRequest {
            model: &self.model,
            messages: vec![
                Message {
                    role: "system",
                    content: &request.system,
                },
                Message {
                    role: "user",
                    content: &request.user,
                },
            ],
            temperature: request.temperature,
            max_tokens: request.max_tokens,
        };

        debug!(model = %self.model, url = %url, "Sending chat completion request");

        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await
            .map_err(request_error)?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(status_error(status, &body));
        }

        let parsed: CompletionResponse = response.json().await.map_err(|e| {
            LlmUnavailableError::new(
                LlmErrorKind::Unknown,
                format!("Failed to decode chat completion response: {e}"),
            )
        })?;

        let content = parsed
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .ok_or_else(|| {
                LlmUnavailableError::new(
                    LlmErrorKind::Unknown,
                    "Chat completion response had no message content",
                )
            })?;

        debug!(chars = content.len(), "Received chat completion");
        Ok(content)
    }
}

/// Map a failed send (no HTTP response at all) to an error category.
fn request_error(err: reqwest::Error) -> LlmUnavailableError {
    let message = format!("Failed to call LLM API: {err}");
    if err.is_timeout() || err.is_connect() || err.is_request() {
        LlmUnavailableError::new(LlmErrorKind::Transport, message)
    } else {
        LlmUnavailableError::from_message(message)
    }
}

/// Map a non-success HTTP status to an error category.
///
/// 401/403 and 429 are unambiguous. Anything else falls back to matching
/// the provider's error message.
pub fn status_error(status: StatusCode, body: &str) -> LlmUnavailableError {
    let message = format!("LLM API returned {status}: {body}");
    let kind = match status {
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => LlmErrorKind::Authentication,
        StatusCode::TOO_MANY_REQUESTS => LlmErrorKind::RateLimit,
        StatusCode::BAD_GATEWAY | StatusCode::SERVICE_UNAVAILABLE | StatusCode::GATEWAY_TIMEOUT => {
            LlmErrorKind::Transport
        }
        _ => classify_error_message(body),
    };
    LlmUnavailableError::new(kind, message)
}

// --- Chat completions request/response types ---

#[derive(Serialize)]
struct CompletionRequest<'a> {
    model: &'a str,
    messages: Vec<Message<'a>>,
    temperature: f32,
    max_tokens: u32,
}

#[derive(Serialize)]
struct Message<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Deserialize)]
struct CompletionResponse {
    #[serde(default)]
    choices: Vec<Choice>,
}

#[derive(Deserialize)]
struct Choice {
    message: ResponseMessage,
}

#[derive(Deserialize)]
struct ResponseMessage {
    content: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_401_is_authentication() {
        let err = status_error(StatusCode::UNAUTHORIZED, "{}");
        assert_eq!(err.kind, LlmErrorKind::Authentication);
    }

    #[test]
    fn test_status_429_is_rate_limit() {
        let err = status_error(StatusCode::TOO_MANY_REQUESTS, "slow down");
        assert_eq!(err.kind, LlmErrorKind::RateLimit);
    }

    #[test]
    fn test_status_503_is_transport() {
        let err = status_error(StatusCode::SERVICE_UNAVAILABLE, "");
        assert_eq!(err.kind, LlmErrorKind::Transport);
    }

    #[test]
    fn test_other_status_uses_body_text() {
        let err = status_error(
            StatusCode::BAD_REQUEST,
            r#"{"error": {"message": "Incorrect API key provided"}}"#,
        );
        assert_eq!(err.kind, LlmErrorKind::Authentication);

        let err = status_error(StatusCode::INTERNAL_SERVER_ERROR, "boom");
        assert_eq!(err.kind, LlmErrorKind::Unknown);
        assert!(err.message.contains("500"));
    }

    #[test]
    fn test_base_url_trailing_slash_is_trimmed() {
        let client = OpenAiClient::new(
            "sk-test",
            "http://localhost:8080/v1/",
            DEFAULT_MODEL,
            Duration::from_secs(5),
        )
        .unwrap();
        assert_eq!(client.base_url, "http://localhost:8080/v1");
        assert_eq!(client.model(), DEFAULT_MODEL);
    }

    #[tokio::test]
    async fn test_unreachable_server_is_transport_error() {
        // Port 9 (discard) on localhost is almost never listening.
        let client = OpenAiClient::new(
            "sk-test",
            "http://127.0.0.1:9/v1",
            DEFAULT_MODEL,
            Duration::from_secs(2),
        )
        .unwrap();
        let request = ChatRequest {
            system: "sys".to_string(),
            user: "hello".to_string(),
            temperature: 0.3,
            max_tokens: 10,
        };
        let err = client.complete(&request).await.unwrap_err();
        assert_eq!(err.kind, LlmErrorKind::Transport);
    }
}
