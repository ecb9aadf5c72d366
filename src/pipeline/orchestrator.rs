use std::sync::Arc;

use crate::knowledge::KnowledgeStore;
use crate::llm::{GenerationError, TextGenerator};
use crate::rag::{assemble, build_prompt, extract, Retriever};

use super::error::PipelineError;

/// Longest accepted query, in characters, unless configured otherwise.
pub const DEFAULT_MAX_QUERY_CHARS: usize = 4000;

/// Answer text plus the number of FAQs retrieved for it.
///
/// `matched_count` counts retrieved entries, whether or not the model quoted
/// them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PipelineResult {
    pub answer_text: String,
    pub matched_count: usize,
}

/// Sequential retrieval-augmented answering.
///
/// Holds no per-request state; share it behind an `Arc` across tasks.
#[derive(Clone)]
pub struct SupportPipeline {
    retriever: Retriever,
    generator: Arc<dyn TextGenerator>,
    max_query_chars: usize,
}

impl SupportPipeline {
    pub fn new(store: Arc<dyn KnowledgeStore>, generator: Arc<dyn TextGenerator>) -> Self {
        Self {
            retriever: Retriever::new(store),
            generator,
            max_query_chars: DEFAULT_MAX_QUERY_CHARS,
        }
    }

    pub fn with_max_query_chars(mut self, max_query_chars: usize) -> Self {
        self.max_query_chars = max_query_chars;
        self
    }

    /// Runs extract → retrieve → assemble → prompt → generate.
    ///
    /// Generation runs even when nothing was retrieved; the prompt tells the
    /// model to decline in that case.
    pub async fn answer(&self, query: &str) -> Result<PipelineResult, PipelineError> {
        self.validate(query)?;

        let tokens = extract(query);
        tracing::debug!("Extracted {} keyword tokens", tokens.len());

        let entries = self.retriever.retrieve(&tokens).await;
        let matched_count = entries.len();
        tracing::debug!("Retrieved {} FAQs", matched_count);

        let context = assemble(&entries);
        let prompt = build_prompt(&context, query);

        let answer_text = self.generator.generate(&prompt).await.map_err(|err| match err {
            GenerationError::Configuration(msg) => {
                tracing::error!("{} generation is not configured: {}", self.generator.name(), msg);
                PipelineError::Configuration(msg)
            }
            GenerationError::Service { status, body } => {
                tracing::error!(
                    "{} API error (status {:?}): {}",
                    self.generator.name(),
                    status,
                    body
                );
                PipelineError::GenerationFailed
            }
        })?;

        Ok(PipelineResult {
            answer_text,
            matched_count,
        })
    }

    fn validate(&self, query: &str) -> Result<(), PipelineError> {
        if query.trim().is_empty() {
            return Err(PipelineError::Validation("Message is required".to_string()));
        }
        if query.chars().count() > self.max_query_chars {
            return Err(PipelineError::Validation(format!(
                "Message must be at most {} characters",
                self.max_query_chars
            )));
        }
        Ok(())
    }
}
