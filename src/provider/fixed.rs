//! A word source with a preset answer.

use std::sync::atomic::{AtomicUsize, Ordering};

use super::WordSource;
use crate::types::{CuratorError, CuratorResult};

enum Answer {
    Text(String),
    Failure(String),
}

/// Returns the same words (or the same failure) on every call.
pub struct FixedSource {
    answer: Answer,
    calls: AtomicUsize,
}

impl FixedSource {
    /// Answer with these words, comma-joined.
    pub fn new<I, S>(words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let joined = words
            .into_iter()
            .map(|w| w.as_ref().to_string())
            .collect::<Vec<_>>()
            .join(", ");
        Self::raw(joined)
    }

    /// Answer with this exact text.
    pub fn raw(text: impl Into<String>) -> Self {
        Self {
            answer: Answer::Text(text.into()),
            calls: AtomicUsize::new(0),
        }
    }

    /// Fail every call with a generation error.
    pub fn failing(message: impl Into<String>) -> Self {
        Self {
            answer: Answer::Failure(message.into()),
            calls: AtomicUsize::new(0),
        }
    }

    /// How many times the source has been asked.
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl WordSource for FixedSource {
    fn name(&self) -> &str {
        "fixed"
    }

    fn fetch_words(&self, _topic: &str, _count: usize) -> CuratorResult<String> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        match &self.answer {
            Answer::Text(text) => Ok(text.clone()),
            Answer::Failure(msg) => Err(CuratorError::Generation(msg.clone())),
        }
    }
}
