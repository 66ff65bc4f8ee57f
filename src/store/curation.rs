//! Curation operations: delete, restore, select and cross entries.
//!
//! None of these remove entries or renumber ids. An unknown id or word is
//! reported as `false`, never as an error.

use log::debug;

use super::VocabularyStore;

impl VocabularyStore {
    /// Mark the entry with this id inactive and log its word.
    ///
    /// Deleting an already-deleted entry logs the word again.
    pub fn delete_by_id(&mut self, id: u64) -> bool {
        let Some(entry) = self.get_by_id_mut(id) else {
            debug!("delete: no entry with id {}", id);
            return false;
        };
        entry.active = false;
        let word = entry.word.clone();
        debug!("delete: [{}] {}", id, word);
        self.deleted_log.push(word);
        true
    }

    /// Mark the first entry matching `word` (ignoring case) inactive.
    pub fn delete_by_word(&mut self, word: &str) -> bool {
        let Some(entry) = self.get_by_word_mut(word) else {
            debug!("delete: no entry matching {:?}", word);
            return false;
        };
        entry.active = false;
        let stored = entry.word.clone();
        debug!("delete: [{}] {}", entry.id, stored);
        self.deleted_log.push(stored);
        true
    }

    /// Reactivate the first entry matching `word`. The deletion log is left
    /// untouched.
    pub fn restore_by_word(&mut self, word: &str) -> bool {
        match self.get_by_word_mut(word) {
            Some(entry) => {
                entry.active = true;
                debug!("restore: [{}] {}", entry.id, entry.word);
                true
            }
            None => {
                debug!("restore: no entry matching {:?}", word);
                false
            }
        }
    }

    /// Reactivate the entry with this id.
    pub fn restore_by_id(&mut self, id: u64) -> bool {
        match self.get_by_id_mut(id) {
            Some(entry) => {
                entry.active = true;
                debug!("restore: [{}] {}", entry.id, entry.word);
                true
            }
            None => {
                debug!("restore: no entry with id {}", id);
                false
            }
        }
    }

    /// Cross a word out of the selection. Same as [`Self::delete_by_word`].
    pub fn cross_word(&mut self, word: &str) -> bool {
        self.delete_by_word(word)
    }

    /// Put a word back into the selection. Same as [`Self::restore_by_word`].
    pub fn select_word(&mut self, word: &str) -> bool {
        self.restore_by_word(word)
    }

    /// Delete several ids in order; returns how many were found.
    pub fn delete_many(&mut self, ids: &[u64]) -> usize {
        ids.iter().filter(|&&id| self.delete_by_id(id)).count()
    }
}

#[cfg(test)]
mod tests {
    use crate::store::VocabularyStore;

    fn gaming() -> VocabularyStore {
        VocabularyStore::from_words(
            "Gaming",
            ["respawn", "Dragon", "latency", "hitbox", "rendering"],
        )
    }

    #[test]
    fn test_delete_unknown_id() {
        let mut store = gaming();
        assert!(!store.delete_by_id(99));
        assert!(store.deleted_log().is_empty());
        assert_eq!(store.list_active().len(), 5);
    }

    #[test]
    fn test_repeated_delete_logs_twice() {
        let mut store = gaming();
        assert!(store.delete_by_id(2));
        assert!(store.delete_by_id(2));
        assert!(!store.get_by_id(2).unwrap().active);
        assert_eq!(store.deleted_log(), &["latency", "latency"]);
    }

    #[test]
    fn test_restore_does_not_log() {
        let mut store = gaming();
        store.delete_by_id(1);
        assert!(store.restore_by_word("dragon"));
        assert!(store.get_by_id(1).unwrap().active);
        assert_eq!(store.deleted_log().len(), 1);
    }

    #[test]
    fn test_cross_and_select_are_aliases() {
        let mut store = gaming();
        assert!(store.cross_word("LATENCY"));
        assert_eq!(store.deleted_log(), &["latency"]);
        assert!(store.select_word("Latency"));
        assert!(store.get_by_id(2).unwrap().active);
        assert!(!store.cross_word("missing"));
        assert!(!store.select_word("missing"));
    }

    #[test]
    fn test_delete_many_counts_found() {
        let mut store = gaming();
        assert_eq!(store.delete_many(&[0, 4, 7]), 2);
        assert_eq!(store.active_words(), vec!["Dragon", "latency", "hitbox"]);
    }

    #[test]
    fn test_restore_by_id() {
        let mut store = gaming();
        store.delete_by_id(3);
        assert!(store.restore_by_id(3));
        assert!(!store.restore_by_id(10));
        assert_eq!(store.counts().active, 5);
    }
}
