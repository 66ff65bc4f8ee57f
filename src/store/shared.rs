//! A store handle that can be used from several threads.

use std::sync::{Arc, Mutex};

use super::VocabularyStore;

/// One coarse lock around a whole store.
///
/// Every store operation is a short scan over a small list, so each call
/// holds the lock for the full operation.
#[derive(Debug, Clone, Default)]
pub struct SharedStore {
    inner: Arc<Mutex<VocabularyStore>>,
}

impl SharedStore {
    /// Wrap an existing store.
    pub fn new(store: VocabularyStore) -> Self {
        Self {
            inner: Arc::new(Mutex::new(store)),
        }
    }

    /// Run `f` with exclusive access to the store.
    pub fn with<R>(&self, f: impl FnOnce(&mut VocabularyStore) -> R) -> R {
        // A panic in another caller leaves the store consistent: every
        // mutation is a single field write or push.
        let mut guard = self.inner.lock().unwrap_or_else(|e| e.into_inner());
        f(&mut guard)
    }

    /// Clone the current store state.
    pub fn snapshot(&self) -> VocabularyStore {
        self.with(|s| s.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;

    #[test]
    fn test_concurrent_deletes_are_all_logged() {
        let words: Vec<String> = (0..64).map(|i| format!("w{}", i)).collect();
        let shared = SharedStore::new(VocabularyStore::from_words("t", words));

        let handles: Vec<_> = (0..8u64)
            .map(|t| {
                let shared = shared.clone();
                thread::spawn(move || {
                    for i in 0..8u64 {
                        shared.with(|s| s.delete_by_id(t * 8 + i));
                    }
                })
            })
            .collect();
        for h in handles {
            h.join().unwrap();
        }

        let store = shared.snapshot();
        assert_eq!(store.counts().active, 0);
        assert_eq!(store.deleted_log().len(), 64);
    }
}
