// LLM analysis — trait-based abstraction over chat-completion providers.
//
// LlmClient is the seam: OpenAiClient talks to any OpenAI-compatible API,
// tests use scripted clients. LlmAnalyzer owns the prompt and the rules for
// turning a reply into a normalized LlmResult.

pub mod analyzer;
pub mod error;
pub mod openai;
pub mod result;
pub mod traits;
