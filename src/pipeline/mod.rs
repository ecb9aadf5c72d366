//! Question answering over the FAQ knowledge base.

mod error;
mod orchestrator;

pub use error::PipelineError;
pub use orchestrator::{PipelineResult, SupportPipeline, DEFAULT_MAX_QUERY_CHARS};
