/// Language-model provider abstraction
///
/// The ranking adapter talks to an external chat model through this trait, so
/// the HTTP client can be swapped for a mock in tests or for another vendor's
/// API without touching the recommendation pipeline.
use crate::error::AppResult;

pub mod openai;

pub use openai::OpenAiProvider;

/// One chat completion: a system instruction, a user prompt, and sampling knobs
#[derive(Debug, Clone, PartialEq)]
pub struct CompletionRequest {
    pub system: String,
    pub prompt: String,
    pub temperature: f32,
    pub top_p: f32,
    pub max_tokens: u32,
}

/// Trait for chat-completion providers
///
/// Implementations return the model's free-form answer text. They impose no
/// grammar on it; interpreting the answer is the caller's job.
#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait CompletionProvider: Send + Sync {
    /// Sends one completion request and returns the answer text
    async fn complete(&self, request: &CompletionRequest) -> AppResult<String>;

    /// Provider name for logging and debugging
    fn name(&self) -> &'static str;
}
