//! Outcome of a generation call.

use serde::Serialize;

use super::error::{CuratorError, CuratorResult};

/// What a successful generation call produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct GenerationReport {
    /// Number of words asked for.
    pub requested: usize,
    /// Number of entries stored after truncation.
    pub received: usize,
}

impl GenerationReport {
    /// True when the collaborator returned fewer words than requested.
    pub fn is_partial(&self) -> bool {
        self.received < self.requested
    }

    /// How many words are missing from the request.
    pub fn shortfall(&self) -> usize {
        self.requested.saturating_sub(self.received)
    }

    /// Turn a partial generation into an error, for callers that need the
    /// full count.
    pub fn into_strict(self) -> CuratorResult<Self> {
        if self.is_partial() {
            Err(CuratorError::PartialGeneration {
                requested: self.requested,
                received: self.received,
            })
        } else {
            Ok(self)
        }
    }
}
