//! KnowledgeStore trait: abstract interface over the FAQ knowledge base.
//!
//! The pipeline only reads through this trait. `SqliteKnowledgeStore` is the
//! production backend, `InMemoryKnowledgeStore` backs tests.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::filter::KeywordFilter;

/// A stored question/answer pair.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KnowledgeEntry {
    /// Store-assigned identifier, unique and increasing in insertion order.
    pub id: i64,
    pub question: String,
    pub answer: String,
    pub category: Option<String>,
}

/// Insertion payload; the store assigns the id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewKnowledgeEntry {
    pub question: String,
    pub answer: String,
    pub category: Option<String>,
}

impl NewKnowledgeEntry {
    pub fn new(question: &str, answer: &str, category: Option<&str>) -> Self {
        Self {
            question: question.to_string(),
            answer: answer.to_string(),
            category: category.map(|c| c.to_string()),
        }
    }
}

#[derive(Debug, Error)]
pub enum KnowledgeError {
    #[error("knowledge store unavailable: {0}")]
    Unavailable(String),
}

impl From<sqlx::Error> for KnowledgeError {
    fn from(err: sqlx::Error) -> Self {
        KnowledgeError::Unavailable(err.to_string())
    }
}

/// Abstract trait for knowledge storage backends.
///
/// Every method returns entries in ascending id order so that repeated
/// reads of an unchanged store are identical.
#[async_trait]
pub trait KnowledgeStore: Send + Sync {
    /// Entries matching `filter`, at most `limit` of them.
    ///
    /// An empty filter matches nothing.
    async fn search(
        &self,
        filter: &KeywordFilter,
        limit: usize,
    ) -> Result<Vec<KnowledgeEntry>, KnowledgeError>;

    /// Every entry in the store.
    async fn list_all(&self) -> Result<Vec<KnowledgeEntry>, KnowledgeError>;

    /// Insert an entry and return it with its assigned id.
    async fn insert(&self, entry: NewKnowledgeEntry) -> Result<KnowledgeEntry, KnowledgeError>;

    /// Insert several entries in order. Backends with transactions store all
    /// of them or none.
    async fn insert_many(
        &self,
        entries: Vec<NewKnowledgeEntry>,
    ) -> Result<Vec<KnowledgeEntry>, KnowledgeError> {
        let mut stored = Vec::with_capacity(entries.len());
        for entry in entries {
            stored.push(self.insert(entry).await?);
        }
        Ok(stored)
    }

    async fn count(&self) -> Result<usize, KnowledgeError>;
}
