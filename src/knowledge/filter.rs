//! Keyword filter shared by every store backend.
//!
//! An entry matches when any token is a case-insensitive substring of any of
//! its searchable fields (OR across tokens, OR across fields).

use super::store::KnowledgeEntry;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct KeywordFilter {
    tokens: Vec<String>,
}

impl KeywordFilter {
    pub fn from_tokens<I, S>(tokens: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let tokens = tokens
            .into_iter()
            .map(|t| t.as_ref().to_lowercase())
            .filter(|t| !t.is_empty())
            .collect();
        Self { tokens }
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    pub fn tokens(&self) -> &[String] {
        &self.tokens
    }

    pub fn matches(&self, entry: &KnowledgeEntry) -> bool {
        let fields = [
            entry.question.to_lowercase(),
            entry.answer.to_lowercase(),
            entry.category.as_deref().unwrap_or_default().to_lowercase(),
        ];
        self.tokens
            .iter()
            .any(|token| fields.iter().any(|field| field.contains(token.as_str())))
    }
}
