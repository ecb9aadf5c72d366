//! SQLite-backed knowledge store.
//!
//! Keyword search walks the table in id order in pages and applies
//! [`KeywordFilter::matches`] to each row, so both backends share one set of
//! matching rules (Unicode case folding, literal `%` and `_`).

use std::path::PathBuf;

use async_trait::async_trait;
use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions, SqliteSynchronous};
use sqlx::{Row, SqlitePool};

use super::filter::KeywordFilter;
use super::store::{KnowledgeEntry, KnowledgeError, KnowledgeStore, NewKnowledgeEntry};

/// Rows fetched per round trip while scanning for matches.
const SCAN_PAGE_SIZE: i64 = 256;

const INSERT_SQL: &str = "INSERT INTO faqs (question, answer, category) VALUES (?1, ?2, ?3)";

pub struct SqliteKnowledgeStore {
    pool: SqlitePool,
    db_path: PathBuf,
}

impl SqliteKnowledgeStore {
    pub async fn with_path(db_path: PathBuf) -> Result<Self, KnowledgeError> {
        if let Some(parent) = db_path.parent() {
            std::fs::create_dir_all(parent).map_err(|err| {
                KnowledgeError::Unavailable(format!(
                    "cannot create database directory {}: {}",
                    parent.display(),
                    err
                ))
            })?;
        }

        let options = SqliteConnectOptions::new()
            .filename(&db_path)
            .create_if_missing(true)
            .journal_mode(SqliteJournalMode::Wal)
            .synchronous(SqliteSynchronous::Normal);

        let pool = SqlitePoolOptions::new()
            .min_connections(1)
            .max_connections(4)
            .connect_with(options)
            .await?;

        let store = Self { pool, db_path };
        store.init_schema().await?;
        Ok(store)
    }

    pub fn db_path(&self) -> &PathBuf {
        &self.db_path
    }

    async fn init_schema(&self) -> Result<(), KnowledgeError> {
        sqlx::query(
            "CREATE TABLE IF NOT EXISTS faqs (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                question TEXT NOT NULL,
                answer TEXT NOT NULL,
                category TEXT
            )",
        )
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    fn row_to_entry(row: &sqlx::sqlite::SqliteRow) -> KnowledgeEntry {
        KnowledgeEntry {
            id: row.get("id"),
            question: row.get("question"),
            answer: row.get("answer"),
            category: row.get("category"),
        }
    }
}

#[async_trait]
impl KnowledgeStore for SqliteKnowledgeStore {
    async fn search(
        &self,
        filter: &KeywordFilter,
        limit: usize,
    ) -> Result<Vec<KnowledgeEntry>, KnowledgeError> {
        let mut hits = Vec::new();
        if filter.is_empty() || limit == 0 {
            return Ok(hits);
        }

        let mut after_id = i64::MIN;
        loop {
            let rows = sqlx::query(
                "SELECT id, question, answer, category FROM faqs WHERE id > ? ORDER BY id LIMIT ?",
            )
            .bind(after_id)
            .bind(SCAN_PAGE_SIZE)
            .fetch_all(&self.pool)
            .await?;

            let Some(last) = rows.last() else {
                return Ok(hits);
            };
            after_id = last.get("id");
            let page_len = rows.len();

            for entry in rows.iter().map(Self::row_to_entry) {
                if filter.matches(&entry) {
                    hits.push(entry);
                    if hits.len() == limit {
                        return Ok(hits);
                    }
                }
            }

            if (page_len as i64) < SCAN_PAGE_SIZE {
                return Ok(hits);
            }
        }
    }

    async fn list_all(&self) -> Result<Vec<KnowledgeEntry>, KnowledgeError> {
        let rows = sqlx::query("SELECT id, question, answer, category FROM faqs ORDER BY id")
            .fetch_all(&self.pool)
            .await?;

        Ok(rows.iter().map(Self::row_to_entry).collect())
    }

    async fn insert(&self, entry: NewKnowledgeEntry) -> Result<KnowledgeEntry, KnowledgeError> {
        let result = sqlx::query(INSERT_SQL)
            .bind(&entry.question)
            .bind(&entry.answer)
            .bind(&entry.category)
            .execute(&self.pool)
            .await?;

        Ok(KnowledgeEntry {
            id: result.last_insert_rowid(),
            question: entry.question,
            answer: entry.answer,
            category: entry.category,
        })
    }

    /// All rows or none: a failure rolls the whole batch back.
    async fn insert_many(
        &self,
        entries: Vec<NewKnowledgeEntry>,
    ) -> Result<Vec<KnowledgeEntry>, KnowledgeError> {
        let mut tx = self.pool.begin().await?;
        let mut stored = Vec::with_capacity(entries.len());
        for entry in entries {
            let result = sqlx::query(INSERT_SQL)
                .bind(&entry.question)
                .bind(&entry.answer)
                .bind(&entry.category)
                .execute(&mut *tx)
                .await?;
            stored.push(KnowledgeEntry {
                id: result.last_insert_rowid(),
                question: entry.question,
                answer: entry.answer,
                category: entry.category,
            });
        }
        tx.commit().await?;
        Ok(stored)
    }

    async fn count(&self) -> Result<usize, KnowledgeError> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM faqs")
            .fetch_one(&self.pool)
            .await?;

        Ok(count as usize)
    }
}

#[cfg(test)]
mod tests {
    use tempfile::TempDir;

    use super::*;
    use crate::knowledge::InMemoryKnowledgeStore;

    /// The directory must outlive the store.
    async fn test_store() -> (TempDir, SqliteKnowledgeStore) {
        let tmp = tempfile::tempdir().unwrap();
        let store = SqliteKnowledgeStore::with_path(tmp.path().join("faqs.db"))
            .await
            .unwrap();
        (tmp, store)
    }

    async fn insert(store: &SqliteKnowledgeStore, q: &str, a: &str, c: Option<&str>) -> KnowledgeEntry {
        store.insert(NewKnowledgeEntry::new(q, a, c)).await.unwrap()
    }

    #[tokio::test]
    async fn insert_list_and_count() {
        let (_tmp, store) = test_store().await;

        let first = insert(&store, "How do I reset my password?", "Click forgot password.", Some("Account")).await;
        let second = insert(&store, "No category", "None here", None).await;

        assert_eq!(store.count().await.unwrap(), 2);
        assert!(first.id < second.id);
        assert_eq!(store.list_all().await.unwrap(), vec![first, second]);
    }

    #[tokio::test]
    async fn unusable_directory_reports_the_cause() {
        let tmp = tempfile::tempdir().unwrap();
        let blocker = tmp.path().join("not-a-dir");
        std::fs::write(&blocker, "").unwrap();

        let err = SqliteKnowledgeStore::with_path(blocker.join("faqs.db"))
            .await
            .err()
            .unwrap();

        assert!(err.to_string().contains("cannot create database directory"), "{err}");
    }

    #[tokio::test]
    async fn search_is_case_insensitive_across_fields() {
        let (_tmp, store) = test_store().await;
        insert(&store, "What is your REFUND policy?", "30 days", Some("Billing")).await;
        insert(&store, "Track order", "Use the tracking number", Some("Orders")).await;
        insert(&store, "Hours", "Nine to six", Some("General")).await;

        let by_question = store
            .search(&KeywordFilter::from_tokens(["refund"]), 5)
            .await
            .unwrap();
        assert_eq!(by_question.len(), 1);
        assert_eq!(by_question[0].category.as_deref(), Some("Billing"));

        let by_category = store
            .search(&KeywordFilter::from_tokens(["general"]), 5)
            .await
            .unwrap();
        assert_eq!(by_category.len(), 1);
        assert_eq!(by_category[0].question, "Hours");

        let either = store
            .search(&KeywordFilter::from_tokens(["tracking", "nine"]), 5)
            .await
            .unwrap();
        let questions: Vec<&str> = either.iter().map(|e| e.question.as_str()).collect();
        assert_eq!(questions, vec!["Track order", "Hours"]);
    }

    #[tokio::test]
    async fn search_honours_limit_and_empty_filter() {
        let (_tmp, store) = test_store().await;
        for i in 0..7 {
            insert(&store, &format!("shipping question {i}"), "answer", None).await;
        }

        let hits = store
            .search(&KeywordFilter::from_tokens(["shipping"]), 5)
            .await
            .unwrap();
        assert_eq!(hits.len(), 5);
        assert!(hits.windows(2).all(|w| w[0].id < w[1].id));

        let none = store
            .search(&KeywordFilter::from_tokens(Vec::<String>::new()), 5)
            .await
            .unwrap();
        assert!(none.is_empty());
    }

    #[tokio::test]
    async fn search_scans_past_the_first_page() {
        let (_tmp, store) = test_store().await;
        let filler = (0..SCAN_PAGE_SIZE + 10)
            .map(|i| NewKnowledgeEntry::new(&format!("filler {i}"), "nothing", None))
            .collect();
        store.insert_many(filler).await.unwrap();
        let late = insert(&store, "Where is my parcel?", "Check tracking.", Some("Orders")).await;

        let hits = store
            .search(&KeywordFilter::from_tokens(["parcel"]), 5)
            .await
            .unwrap();

        assert_eq!(hits, vec![late]);
    }

    #[tokio::test]
    async fn wildcards_in_tokens_match_literally() {
        let (_tmp, store) = test_store().await;
        insert(&store, "Discount", "Get 100% off today", None).await;
        insert(&store, "Other", "Get 1000 off", None).await;

        let hits = store
            .search(&KeywordFilter::from_tokens(["100%"]), 5)
            .await
            .unwrap();
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].question, "Discount");

        let underscore = store
            .search(&KeywordFilter::from_tokens(["get_"]), 5)
            .await
            .unwrap();
        assert!(underscore.is_empty());
    }

    #[tokio::test]
    async fn thousands_of_tokens_still_find_the_match() {
        let (_tmp, store) = test_store().await;
        let entry = insert(&store, "How do I reset my password?", "Use the login page.", None).await;

        let mut tokens: Vec<String> = (0..1200).map(|i| format!("zzzz{i}")).collect();
        tokens.push("password".to_string());
        let filter = KeywordFilter::from_tokens(&tokens);

        assert_eq!(store.search(&filter, 5).await.unwrap(), vec![entry]);
    }

    #[tokio::test]
    async fn sqlite_and_in_memory_backends_agree() {
        let (_tmp, store) = test_store().await;
        let rows = vec![
            NewKnowledgeEntry::new("Do you have a mobile app?", "Yes, iOS and Android.", Some("General")),
            NewKnowledgeEntry::new("Payment methods", "Visa, PayPal", Some("Billing")),
            NewKnowledgeEntry::new("Damaged product", "Send photos", Some("Orders")),
            NewKnowledgeEntry::new("Où est l'ÉCOLE ?", "Rue de la Paix", Some("Général")),
            NewKnowledgeEntry::new("Lieferung", "Wir liefern in die ÖSTERREICH-Filialen", None),
        ];
        store.insert_many(rows.clone()).await.unwrap();
        let memory = InMemoryKnowledgeStore::with_entries(rows);

        for tokens in [
            vec!["android", "billing", "zzzz"],
            vec!["école"],
            vec!["österreich"],
            vec!["général"],
        ] {
            let filter = KeywordFilter::from_tokens(&tokens);
            let from_sqlite = store.search(&filter, 5).await.unwrap();
            let from_memory = memory.search(&filter, 5).await.unwrap();

            assert!(!from_sqlite.is_empty(), "{tokens:?}");
            assert_eq!(from_sqlite, from_memory, "{tokens:?}");
        }
    }

    #[tokio::test]
    async fn insert_many_is_all_or_nothing() {
        let (_tmp, store) = test_store().await;
        sqlx::query(
            "CREATE TRIGGER reject_marked BEFORE INSERT ON faqs
             WHEN NEW.question = 'reject me'
             BEGIN SELECT RAISE(ABORT, 'rejected'); END",
        )
        .execute(&store.pool)
        .await
        .unwrap();

        let result = store
            .insert_many(vec![
                NewKnowledgeEntry::new("first", "kept?", None),
                NewKnowledgeEntry::new("reject me", "no", None),
            ])
            .await;

        assert!(result.is_err());
        assert_eq!(store.count().await.unwrap(), 0);
    }
}
