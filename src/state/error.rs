use thiserror::Error;

#[derive(Debug, Error)]
pub enum InitializationError {
    #[error("Failed to load configuration: {0}")]
    Config(#[source] anyhow::Error),

    #[error("Failed to open knowledge store: {0}")]
    KnowledgeStore(#[source] anyhow::Error),

    #[error("Failed to seed knowledge store: {0}")]
    Seed(#[source] anyhow::Error),
}
