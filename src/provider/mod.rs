//! Generation collaborators: where raw candidate words come from.

pub mod fixed;
pub mod gemini;

pub use fixed::FixedSource;
pub use gemini::GeminiSource;

use crate::types::CuratorResult;

/// A text source that produces candidate words for a topic.
///
/// Implementations return the raw comma-separated text exactly as produced;
/// splitting, trimming, and truncation happen in the generation engine.
pub trait WordSource: Send + Sync {
    /// Source name, for logs.
    fn name(&self) -> &str;

    /// Ask for `count` words about `topic`. May return fewer or more.
    fn fetch_words(&self, topic: &str, count: usize) -> CuratorResult<String>;
}

impl<T: WordSource + ?Sized> WordSource for std::sync::Arc<T> {
    fn name(&self) -> &str {
        (**self).name()
    }

    fn fetch_words(&self, topic: &str, count: usize) -> CuratorResult<String> {
        (**self).fetch_words(topic, count)
    }
}
