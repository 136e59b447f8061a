/// Text-generation providers used to justify recommendations
///
/// A provider turns a fixed system persona and a per-product prompt into a
/// single generated sentence. Calls are independent: no conversation state is
/// kept between them, so the enricher can fan them out freely.
use crate::error::AppResult;

pub mod groq;

pub use groq::{GroqProvider, GroqSettings};

/// Trait for explanation text generators
#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait ExplanationProvider: Send + Sync {
    /// Generate text for `prompt` under the `persona` system instruction
    async fn generate(&self, persona: &str, prompt: &str) -> AppResult<String>;

    /// Provider name for logging and debugging
    fn name(&self) -> &'static str;
}
