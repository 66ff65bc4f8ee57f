//! The word record held by a vocabulary store.

use serde::Serialize;

/// One generated candidate word.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WordEntry {
    /// Position in the generation output; never reassigned.
    pub id: u64,
    /// The candidate text, trimmed at ingestion.
    pub word: String,
    /// False once the entry has been deleted (crossed out).
    pub active: bool,
}

impl WordEntry {
    /// Create an active entry.
    pub fn new(id: u64, word: impl Into<String>) -> Self {
        Self {
            id,
            word: word.into(),
            active: true,
        }
    }

    /// Inverse of `active`, as written to snapshots.
    pub fn is_deleted(&self) -> bool {
        !self.active
    }

    /// Case-insensitive comparison against the stored text.
    pub fn matches(&self, word: &str) -> bool {
        self.word.to_lowercase() == word.to_lowercase()
    }
}

impl std::fmt::Display for WordEntry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.active {
            write!(f, "[{}] {}", self.id, self.word)
        } else {
            write!(f, "[{}] {} (deleted)", self.id, self.word)
        }
    }
}
