//! Run-level error types.

use thiserror::Error;

/// Result type for run operations.
pub type RunResult<T> = Result<T, RunError>;

/// Errors from the run orchestrator.
#[derive(Debug, Error)]
pub enum RunError {
    /// The external classifier failed. Never retried here; the core has
    /// no authority over the classifier's lifecycle.
    #[error("Classifier failed: {0}")]
    ClassifierFailed(String),

    /// No chunk survived the policy and continuity filter. Expected
    /// terminal outcome, distinguishable from infrastructure failure.
    #[error("No matching content found")]
    NoMatchingContent,

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Engine error: {0}")]
    Engine(#[from] aclip_engine::EngineError),

    #[error("Audit error: {0}")]
    Audit(#[from] aclip_audit::AuditError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON parse error: {0}")]
    JsonParse(#[from] serde_json::Error),
}

impl RunError {
    pub fn classifier_failed(msg: impl Into<String>) -> Self {
        Self::ClassifierFailed(msg.into())
    }

    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }
}
