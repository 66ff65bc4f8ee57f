//! Error types for the lexicon curator.

use thiserror::Error;

/// All errors that can occur in the lexicon curator.
///
/// A delete or restore that matches nothing is not an error; curation
/// operations report that as `false`.
#[derive(Error, Debug)]
pub enum CuratorError {
    /// The generation collaborator failed or returned unparseable output.
    #[error("Generation failed: {0}")]
    Generation(String),

    /// The generation collaborator answered without any text.
    #[error("Generation returned an empty response")]
    EmptyResponse,

    /// A generation was requested for zero words.
    #[error("Requested word count must be at least 1, got {0}")]
    InvalidCount(usize),

    /// Fewer words were generated than requested (strict mode only).
    #[error("Partial generation: requested {requested}, received {received}")]
    PartialGeneration { requested: usize, received: usize },

    /// Snapshot or export requested before any generation call.
    #[error("Store has not been populated by a generation call")]
    NotGenerated,

    /// An image lookup or download failed.
    #[error("Image error: {0}")]
    Image(String),

    /// Configuration could not be read, parsed, or resolved.
    #[error("Configuration error: {0}")]
    Config(String),

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl CuratorError {
    /// True for the failures that mean "no words were generated".
    pub fn is_generation_failure(&self) -> bool {
        matches!(
            self,
            Self::Generation(_) | Self::EmptyResponse | Self::InvalidCount(_)
        )
    }

    /// True for the failures raised while writing persisted state.
    pub fn is_persistence_failure(&self) -> bool {
        matches!(self, Self::Io(_) | Self::Json(_))
    }
}

/// Convenience result type for lexicon curator operations.
pub type CuratorResult<T> = Result<T, CuratorError>;
