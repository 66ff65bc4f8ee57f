//! Core store structure: ordered word entries plus the deletion log.

use serde::Serialize;

use crate::types::WordEntry;

/// Entry counts as reported in snapshots.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct StoreCounts {
    /// All entries, active or not.
    pub total: usize,
    /// Entries that are still active.
    pub active: usize,
    /// Length of the deletion log (repeated deletes counted each time).
    pub deleted: usize,
}

/// The vocabulary for one topic/session.
///
/// Entries are kept in generation order and are never removed or renumbered;
/// deleting only flips `active` and appends to the deletion log.
#[derive(Debug, Clone, Default)]
pub struct VocabularyStore {
    /// Topic the current entries were generated for.
    pub(crate) topic: String,
    /// All entries, in generation order.
    pub(crate) entries: Vec<WordEntry>,
    /// Word text appended on every active -> inactive transition.
    pub(crate) deleted_log: Vec<String>,
    /// Set once a generation call has populated the store.
    pub(crate) generated: bool,
}

impl VocabularyStore {
    /// Create an empty, never-generated store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store populated from already-normalized words.
    pub fn from_words<I, S>(topic: impl Into<String>, words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut store = Self::new();
        store.replace(topic, words);
        store
    }

    /// Replace topic and entries wholesale, assigning ids `0..n`.
    ///
    /// The deletion log belongs to the previous word list and is cleared.
    pub fn replace<I, S>(&mut self, topic: impl Into<String>, words: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.topic = topic.into();
        self.entries = words
            .into_iter()
            .enumerate()
            .map(|(i, w)| WordEntry::new(i as u64, w))
            .collect();
        self.deleted_log.clear();
        self.generated = true;
    }

    /// Topic of the current word list (empty before the first generation).
    pub fn topic(&self) -> &str {
        &self.topic
    }

    /// Whether a generation call has populated this store.
    pub fn is_generated(&self) -> bool {
        self.generated
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True when the store holds no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// All entries in generation order.
    pub fn list_all(&self) -> &[WordEntry] {
        &self.entries
    }

    /// Active entries in generation order.
    pub fn list_active(&self) -> Vec<&WordEntry> {
        self.entries.iter().filter(|e| e.active).collect()
    }

    /// Active word texts in generation order.
    pub fn active_words(&self) -> Vec<&str> {
        self.entries
            .iter()
            .filter(|e| e.active)
            .map(|e| e.word.as_str())
            .collect()
    }

    /// The deletion log, oldest first.
    pub fn deleted_log(&self) -> &[String] {
        &self.deleted_log
    }

    /// Entry counts for reporting.
    pub fn counts(&self) -> StoreCounts {
        StoreCounts {
            total: self.entries.len(),
            active: self.entries.iter().filter(|e| e.active).count(),
            deleted: self.deleted_log.len(),
        }
    }

    /// Get an entry by id.
    pub fn get_by_id(&self, id: u64) -> Option<&WordEntry> {
        // Ids are positions, so the index lookup always hits.
        self.entries.get(id as usize).filter(|e| e.id == id)
    }

    /// Get the first entry whose word matches, ignoring case.
    pub fn get_by_word(&self, word: &str) -> Option<&WordEntry> {
        self.entries.iter().find(|e| e.matches(word))
    }

    pub(crate) fn get_by_id_mut(&mut self, id: u64) -> Option<&mut WordEntry> {
        self.entries.get_mut(id as usize).filter(|e| e.id == id)
    }

    pub(crate) fn get_by_word_mut(&mut self, word: &str) -> Option<&mut WordEntry> {
        self.entries.iter_mut().find(|e| e.matches(word))
    }
}
