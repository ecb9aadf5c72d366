//! Renders retrieved FAQs into the context block of the prompt.

use crate::knowledge::KnowledgeEntry;

/// Context used when retrieval found nothing.
pub const NO_CONTEXT_SENTINEL: &str = "No relevant FAQs found in the knowledge base.";

/// Formats `entries` as numbered FAQ blocks separated by blank lines, or
/// returns [`NO_CONTEXT_SENTINEL`] when there are none.
pub fn assemble(entries: &[KnowledgeEntry]) -> String {
    if entries.is_empty() {
        return NO_CONTEXT_SENTINEL.to_string();
    }

    entries
        .iter()
        .enumerate()
        .map(|(idx, entry)| {
            format!(
                "FAQ {}:\nQ: {}\nA: {}\nCategory: {}",
                idx + 1,
                entry.question,
                entry.answer,
                entry.category.as_deref().unwrap_or_default()
            )
        })
        .collect::<Vec<_>>()
        .join("\n\n")
}
