//! FAQ knowledge base storage.
//!
//! - `KnowledgeStore`: async trait every backend implements
//! - `KeywordFilter`: backend-independent matching rules
//! - `SqliteKnowledgeStore` / `InMemoryKnowledgeStore`: the two backends

mod filter;
mod memory;
mod seed;
mod sqlite;
mod store;

pub use filter::KeywordFilter;
pub use memory::InMemoryKnowledgeStore;
pub use seed::{sample_faqs, seed_if_empty};
pub use sqlite::SqliteKnowledgeStore;
pub use store::{KnowledgeEntry, KnowledgeError, KnowledgeStore, NewKnowledgeEntry};
