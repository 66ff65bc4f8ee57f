//! Lexicon curator: topic-scoped vocabulary generation and curation.
//!
//! Requests candidate words from a generative text source, tracks which
//! words a curator keeps or crosses out, and writes JSON snapshots and CSV
//! exports of the result. Images for the kept words can be collected through
//! pluggable finder/fetcher implementations.

pub mod cli;
pub mod config;
pub mod engine;
pub mod format;
pub mod illustrate;
pub mod provider;
pub mod store;
pub mod types;

// Re-export commonly used types at the crate root
pub use config::{CuratorConfig, GenerationConfig, ImageConfig, NamingScheme, OutputConfig};
pub use engine::{lexicon_prompt, normalize_words, GenerationEngine};
pub use format::{CsvExporter, SnapshotDocument, SnapshotWord, SnapshotWriter};
pub use illustrate::{
    HttpFetcher, ImageFetcher, ImageFinder, ImageManifest, ImagePipeline, UrlListFinder,
};
pub use provider::{FixedSource, GeminiSource, WordSource};
pub use store::{SharedStore, StoreCounts, VocabularyStore};
pub use types::{
    timestamp_now, CuratorError, CuratorResult, GenerationReport, WordEntry, DEFAULT_WORD_COUNT,
};
