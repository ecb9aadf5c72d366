use thiserror::Error;

/// Failures that reach the caller of [`super::SupportPipeline::answer`].
///
/// Messages are safe to show to end users; upstream payloads are only logged.
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("{0}")]
    Validation(String),

    #[error("generation is not configured: {0}")]
    Configuration(String),

    #[error("failed to generate response")]
    GenerationFailed,
}
