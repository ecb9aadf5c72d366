use std::sync::Arc;

use crate::knowledge::{KeywordFilter, KnowledgeEntry, KnowledgeStore};

use super::keywords::TokenSet;

/// Upper bound on entries handed to the context assembler.
pub const MAX_RETRIEVED_ENTRIES: usize = 5;

/// Keyword retriever over a knowledge store.
///
/// Matching is presence-only: an entry qualifies when any token appears in any
/// of its fields. Results keep the store's scan order.
#[derive(Clone)]
pub struct Retriever {
    store: Arc<dyn KnowledgeStore>,
}

impl Retriever {
    pub fn new(store: Arc<dyn KnowledgeStore>) -> Self {
        Self { store }
    }

    /// Returns at most [`MAX_RETRIEVED_ENTRIES`] matching entries.
    ///
    /// An empty token set short-circuits without touching the store. Store
    /// failures degrade to an empty result.
    pub async fn retrieve(&self, tokens: &TokenSet) -> Vec<KnowledgeEntry> {
        if tokens.is_empty() {
            return Vec::new();
        }

        let filter = KeywordFilter::from_tokens(tokens);
        match self.store.search(&filter, MAX_RETRIEVED_ENTRIES).await {
            Ok(mut entries) => {
                entries.truncate(MAX_RETRIEVED_ENTRIES);
                entries
            }
            Err(err) => {
                tracing::warn!("Error retrieving FAQs, continuing without context: {}", err);
                Vec::new()
            }
        }
    }
}
