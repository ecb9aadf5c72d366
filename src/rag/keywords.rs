//! Query tokenisation for keyword retrieval.

/// Tokens of this many characters or fewer are dropped.
pub const MIN_TOKEN_EXCLUSIVE_CHARS: usize = 3;

/// Lower-cased search tokens extracted from one query.
///
/// May be empty; may contain duplicates (they only widen an OR filter).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TokenSet(Vec<String>);

impl TokenSet {
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }

    pub fn contains(&self, token: &str) -> bool {
        self.0.iter().any(|t| t == token)
    }
}

impl<'a> IntoIterator for &'a TokenSet {
    type Item = &'a String;
    type IntoIter = std::slice::Iter<'a, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

/// Lower-cases `query`, splits on whitespace and keeps words longer than
/// three characters. No stemming, no stop words.
pub fn extract(query: &str) -> TokenSet {
    TokenSet(
        query
            .to_lowercase()
            .split_whitespace()
            .filter(|word| word.chars().count() > MIN_TOKEN_EXCLUSIVE_CHARS)
            .map(str::to_string)
            .collect(),
    )
}
