//! RAG (Retrieval-Augmented Generation) stages.
//!
//! This module provides:
//! - `extract`: query → `TokenSet`
//! - `Retriever`: `TokenSet` → matching FAQ entries
//! - `assemble`: entries → context block
//! - `build_prompt`: context + query → grounded instruction prompt

mod context_builder;
mod keywords;
mod prompt;
mod retriever;

pub use context_builder::{assemble, NO_CONTEXT_SENTINEL};
pub use keywords::{extract, TokenSet, MIN_TOKEN_EXCLUSIVE_CHARS};
pub use prompt::{build as build_prompt, CONTEXT_CLOSE_MARKER, CONTEXT_OPEN_MARKER};
pub use retriever::{Retriever, MAX_RETRIEVED_ENTRIES};
