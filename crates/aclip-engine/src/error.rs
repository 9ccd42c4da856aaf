//! Error types for the decision core.

use aclip_models::ChunkIndex;
use thiserror::Error;

/// Result type for engine operations.
pub type EngineResult<T> = Result<T, EngineError>;

/// Errors from the decision engine, continuity filter, and assembler.
#[derive(Debug, Error)]
pub enum EngineError {
    /// The classifier violated its contract for one chunk (empty result
    /// or entries not ranked by score).
    #[error("Malformed classification for chunk {chunk_index}: {message}")]
    MalformedClassification {
        chunk_index: ChunkIndex,
        message: String,
    },

    /// The filter policy fails validation; nothing is processed.
    #[error("Invalid filter policy: {0}")]
    InvalidPolicy(String),

    /// No chunk survived the policy and continuity filter. A valid,
    /// expected terminal outcome, distinct from infrastructure failure.
    #[error("No chunks matched the filter policy")]
    EmptyResult,
}

impl EngineError {
    pub fn malformed(chunk_index: ChunkIndex, message: impl Into<String>) -> Self {
        Self::MalformedClassification {
            chunk_index,
            message: message.into(),
        }
    }

    pub fn invalid_policy(message: impl Into<String>) -> Self {
        Self::InvalidPolicy(message.into())
    }
}
