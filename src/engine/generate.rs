//! The generation engine.

use log::{info, warn};

use crate::provider::WordSource;
use crate::store::{SharedStore, VocabularyStore};
use crate::types::{CuratorError, CuratorResult, GenerationReport};

/// Split raw collaborator output on commas and trim each token.
///
/// Empty tokens (from `a,,b` or a trailing comma) are kept as empty words.
pub fn normalize_words(raw: &str) -> Vec<String> {
    raw.split(',').map(|w| w.trim().to_string()).collect()
}

/// Calls a [`WordSource`] once per generation and fills a store.
pub struct GenerationEngine {
    source: Box<dyn WordSource>,
}

impl GenerationEngine {
    /// Create an engine around a word source.
    pub fn new(source: Box<dyn WordSource>) -> Self {
        Self { source }
    }

    /// Name of the underlying source.
    pub fn source_name(&self) -> &str {
        self.source.name()
    }

    /// Fetch and normalize up to `count` words without touching any store.
    pub fn fetch(&self, topic: &str, count: usize) -> CuratorResult<Vec<String>> {
        if count == 0 {
            return Err(CuratorError::InvalidCount(count));
        }

        let raw = match self.source.fetch_words(topic, count) {
            Ok(raw) => raw,
            Err(e) => {
                warn!("{}: generation for {:?} failed: {}", self.source.name(), topic, e);
                return Err(e);
            }
        };
        if raw.trim().is_empty() {
            warn!("{}: empty response for {:?}", self.source.name(), topic);
            return Err(CuratorError::EmptyResponse);
        }

        let mut words = normalize_words(&raw);
        words.truncate(count);
        Ok(words)
    }

    /// Replace the store's contents with a fresh word list for `topic`.
    ///
    /// On error the store is left exactly as it was.
    pub fn generate(
        &self,
        store: &mut VocabularyStore,
        topic: &str,
        count: usize,
    ) -> CuratorResult<GenerationReport> {
        let words = self.fetch(topic, count)?;
        let report = report_for(topic, count, words.len());
        store.replace(topic, words);
        Ok(report)
    }

    /// Build a new store for `topic`.
    pub fn generate_store(
        &self,
        topic: &str,
        count: usize,
    ) -> CuratorResult<(VocabularyStore, GenerationReport)> {
        let mut store = VocabularyStore::new();
        let report = self.generate(&mut store, topic, count)?;
        Ok((store, report))
    }

    /// Regenerate a shared store. The network call runs without holding the
    /// lock; the replacement happens in one locked step.
    pub fn generate_shared(
        &self,
        store: &SharedStore,
        topic: &str,
        count: usize,
    ) -> CuratorResult<GenerationReport> {
        let words = self.fetch(topic, count)?;
        let report = report_for(topic, count, words.len());
        store.with(|s| s.replace(topic, words));
        Ok(report)
    }
}

fn report_for(topic: &str, requested: usize, received: usize) -> GenerationReport {
    let report = GenerationReport {
        requested,
        received,
    };
    if report.is_partial() {
        warn!(
            "Partial generation for {:?}: requested {}, received {}",
            topic, requested, received
        );
    } else {
        info!("Generated {} words for {:?}", received, topic);
    }
    report
}
