//! Shared data models for the aclip pipeline.
//!
//! This crate provides Serde-serializable types for:
//! - Chunk handles and timestamp-style chunk naming
//! - Ranked classification results
//! - Keep/Discard verdicts with reason codes
//!
//! Everything here is pure data; no I/O happens in this crate.

pub mod chunk;
pub mod classification;
pub mod verdict;

// Re-export common types
pub use chunk::{Chunk, ChunkIndex};
pub use classification::{Classification, ClassificationEntry};
pub use verdict::{Decision, ReasonCode, Verdict};
