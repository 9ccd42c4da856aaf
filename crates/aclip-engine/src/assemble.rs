//! Segment assembler: the ordered keep list for the concatenator.

use aclip_models::{ChunkIndex, Verdict};

use crate::error::{EngineError, EngineResult};

/// Collect the chunk indices whose final decision is keep, in ascending
/// index order. Order preservation is the core's only contract toward
/// the external concatenator.
///
/// # Errors
/// `EmptyResult` when no chunk survived; "no matching content" is a
/// terminal outcome for the whole run, not a per-chunk error.
pub fn assemble(verdicts: &[Verdict]) -> EngineResult<Vec<ChunkIndex>> {
    let kept: Vec<ChunkIndex> = verdicts
        .iter()
        .filter(|v| v.is_keep())
        .map(|v| v.chunk_index)
        .collect();

    if kept.is_empty() {
        return Err(EngineError::EmptyResult);
    }

    Ok(kept)
}
