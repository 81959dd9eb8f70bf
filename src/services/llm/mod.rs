/// Generative language model abstraction
///
/// The pipeline only needs "prompt in, text out". Keeping that behind a trait
/// lets the orchestrator be exercised without a network.
use crate::error::AppResult;

pub mod gemini;

pub use gemini::GeminiClient;

/// Trait for text generation backends
#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait LanguageModel: Send + Sync {
    /// Sends one prompt and returns the model's raw text reply
    ///
    /// Transport failures, error statuses and empty replies all surface as
    /// errors; nothing is retried.
    async fn generate(&self, prompt: &str) -> AppResult<String>;
}
