// LLM client trait — the swap-ready abstraction.
//
// The analyzer only needs "send these two messages, give me the reply text".
// OpenAiClient implements it over HTTP; tests plug in scripted clients.

use async_trait::async_trait;

use super::error::LlmUnavailableError;

/// A single chat-completion request: one system message, one user message.
#[derive(Debug, Clone)]
pub struct ChatRequest {
    pub system: String,
    pub user: String,
    pub temperature: f32,
    pub max_tokens: u32,
}

/// Trait for chat-completion providers. Async because every real provider
/// is an HTTP API.
#[async_trait]
pub trait LlmClient: Send + Sync {
    /// Send the request and return the assistant's reply text.
    ///
    /// Fails only when the call itself can't be completed. Whatever text
    /// comes back, well-formed or not, is returned as-is.
    async fn complete(&self, request: &ChatRequest) -> Result<String, LlmUnavailableError>;
}
