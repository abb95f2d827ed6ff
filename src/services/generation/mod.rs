/// Generative-text backends
///
/// The recommendation flow only needs "prompt in, text out", so any
/// completion API can sit behind this trait.
use crate::error::AppResult;

pub mod cohere;

pub use cohere::CohereGenerator;

#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait TextGenerator: Send + Sync {
    /// Completes the prompt and returns the trimmed answer text
    ///
    /// Every failure (missing key, transport, non-success status, malformed
    /// body) is reported as `AppError::Generation`.
    async fn generate(&self, prompt: &str) -> AppResult<String>;

    /// Provider name for logging
    fn name(&self) -> &'static str;
}
