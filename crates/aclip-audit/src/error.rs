//! Error types for audit trail writing.

use std::path::PathBuf;
use thiserror::Error;

/// Result type for audit operations.
pub type AuditResult<T> = Result<T, AuditError>;

/// Errors that can occur while recording the audit trail.
#[derive(Debug, Error)]
pub enum AuditError {
    #[error("Chunk file not found: {0}")]
    ChunkNotFound(PathBuf),

    #[error("Failed to write audit log: {0}")]
    LogWrite(std::io::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
