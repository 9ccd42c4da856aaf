//! Chunk handles and timestamp-style naming.
//!
//! A chunk is one fixed-duration slice of source audio, produced by the
//! external segmenter. The core only ever references chunks by index; the
//! attached path is an opaque handle for the audit writer and the
//! concatenator handoff.

use std::fmt;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Zero-based position of a chunk within the source recording.
///
/// Indices are dense and contiguous over `[0, N)` for a run of `N` chunks.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default,
)]
#[serde(transparent)]
pub struct ChunkIndex(pub usize);

impl ChunkIndex {
    pub fn as_usize(&self) -> usize {
        self.0
    }

    /// Timestamp-style name for this chunk: `HH-MM-SS`, zero-padded.
    ///
    /// The name encodes the chunk's start offset in the source recording
    /// (`index * chunk_secs`) and sorts lexicographically in playback order,
    /// which keeps audit bucket listings ordered without extra bookkeeping.
    pub fn timestamp_name(&self, chunk_secs: u64) -> String {
        let offset = self.0 as u64 * chunk_secs;
        let h = offset / 3600;
        let m = (offset % 3600) / 60;
        let s = offset % 60;
        format!("{:02}-{:02}-{:02}", h, m, s)
    }
}

impl fmt::Display for ChunkIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<usize> for ChunkIndex {
    fn from(i: usize) -> Self {
        Self(i)
    }
}

/// Handle to one fixed-duration slice of source audio.
///
/// Owned by the external segmenter; the core never mutates the underlying
/// file and only copies it when routing into audit buckets.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Chunk {
    /// Position within the source recording.
    pub index: ChunkIndex,
    /// Path to the chunk file on disk.
    pub path: PathBuf,
}

impl Chunk {
    pub fn new(index: impl Into<ChunkIndex>, path: impl Into<PathBuf>) -> Self {
        Self {
            index: index.into(),
            path: path.into(),
        }
    }

    /// Timestamp name plus the source file's extension (if any).
    pub fn timestamp_file_name(&self, chunk_secs: u64) -> String {
        match self.path.extension().and_then(|e| e.to_str()) {
            Some(ext) => format!("{}.{}", self.index.timestamp_name(chunk_secs), ext),
            None => self.index.timestamp_name(chunk_secs),
        }
    }
}
