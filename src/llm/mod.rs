pub mod gemini;
pub mod provider;
pub mod types;

pub use gemini::{GeminiClient, FALLBACK_RESPONSE};
pub use provider::{GenerationError, TextGenerator};
