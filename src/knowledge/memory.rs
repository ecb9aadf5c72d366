//! In-process knowledge store.

use async_trait::async_trait;
use tokio::sync::RwLock;

use super::filter::KeywordFilter;
use super::store::{KnowledgeEntry, KnowledgeError, KnowledgeStore, NewKnowledgeEntry};

#[derive(Default)]
pub struct InMemoryKnowledgeStore {
    entries: RwLock<Vec<KnowledgeEntry>>,
}

impl InMemoryKnowledgeStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a store holding `entries`, ids assigned from 1.
    pub fn with_entries(entries: impl IntoIterator<Item = NewKnowledgeEntry>) -> Self {
        let entries = entries
            .into_iter()
            .enumerate()
            .map(|(idx, new)| KnowledgeEntry {
                id: idx as i64 + 1,
                question: new.question,
                answer: new.answer,
                category: new.category,
            })
            .collect();
        Self {
            entries: RwLock::new(entries),
        }
    }
}

#[async_trait]
impl KnowledgeStore for InMemoryKnowledgeStore {
    async fn search(
        &self,
        filter: &KeywordFilter,
        limit: usize,
    ) -> Result<Vec<KnowledgeEntry>, KnowledgeError> {
        if filter.is_empty() {
            return Ok(Vec::new());
        }

        let entries = self.entries.read().await;
        Ok(entries
            .iter()
            .filter(|entry| filter.matches(entry))
            .take(limit)
            .cloned()
            .collect())
    }

    async fn list_all(&self) -> Result<Vec<KnowledgeEntry>, KnowledgeError> {
        Ok(self.entries.read().await.clone())
    }

    async fn insert(&self, entry: NewKnowledgeEntry) -> Result<KnowledgeEntry, KnowledgeError> {
        let mut entries = self.entries.write().await;
        let id = entries.last().map(|e| e.id + 1).unwrap_or(1);
        let stored = KnowledgeEntry {
            id,
            question: entry.question,
            answer: entry.answer,
            category: entry.category,
        };
        entries.push(stored.clone());
        Ok(stored)
    }

    async fn insert_many(
        &self,
        entries: Vec<NewKnowledgeEntry>,
    ) -> Result<Vec<KnowledgeEntry>, KnowledgeError> {
        let mut stored_entries = self.entries.write().await;
        let first_id = stored_entries.last().map(|e| e.id + 1).unwrap_or(1);
        let added: Vec<KnowledgeEntry> = entries
            .into_iter()
            .zip(first_id..)
            .map(|(new, id)| KnowledgeEntry {
                id,
                question: new.question,
                answer: new.answer,
                category: new.category,
            })
            .collect();
        stored_entries.extend(added.iter().cloned());
        Ok(added)
    }

    async fn count(&self) -> Result<usize, KnowledgeError> {
        Ok(self.entries.read().await.len())
    }
}
