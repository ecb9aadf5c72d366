use async_trait::async_trait;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum GenerationError {
    /// Credential or endpoint setup is missing; raised before any request.
    #[error("generation service not configured: {0}")]
    Configuration(String),

    /// Transport failure (`status` is `None`) or non-success upstream reply.
    #[error("generation service error (status {status:?}): {body}")]
    Service { status: Option<u16>, body: String },
}

#[async_trait]
pub trait TextGenerator: Send + Sync {
    /// return the provider name (e.g. "gemini")
    fn name(&self) -> &str;

    /// single prompt in, generated text out (non-streaming, no retries)
    async fn generate(&self, prompt: &str) -> Result<String, GenerationError>;
}
