//! Generation pipeline: turns collaborator output into store entries.

pub mod generate;
pub mod prompt;

pub use generate::{normalize_words, GenerationEngine};
pub use prompt::lexicon_prompt;
