//! In-memory word store, its curation operations, and the shared handle.

pub mod curation;
pub mod shared;
pub mod vocabulary;

pub use shared::SharedStore;
pub use vocabulary::{StoreCounts, VocabularyStore};
