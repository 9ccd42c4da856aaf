//! Per-chunk decision engine.
//!
//! Rules apply in strict priority order; the first match wins:
//!
//! 1. Blacklist hit  → Discard
//! 2. Target hit     → Keep
//! 3. Low confidence → Keep
//! 4. Otherwise      → Discard
//!
//! The ordering is a safety policy: discard only on strong evidence of
//! noise, otherwise prefer keeping ambiguous or quiet audio.

use aclip_models::{Classification, ChunkIndex, ReasonCode, Verdict};

use crate::error::{EngineError, EngineResult};
use crate::policy::FilterPolicy;

/// Decide keep/discard for one chunk from its ranked classification.
///
/// Pure and parallel-safe: depends only on its arguments. Thresholds use
/// inclusive lower bounds (`score >= threshold` is a hit).
///
/// # Errors
/// `MalformedClassification` if the result is empty or not ranked
/// descending by score; the classifier contract guarantees both.
pub fn decide(
    chunk_index: ChunkIndex,
    classification: &Classification,
    policy: &FilterPolicy,
) -> EngineResult<Verdict> {
    if classification.is_empty() {
        return Err(EngineError::malformed(
            chunk_index,
            "classifier returned no labels",
        ));
    }
    if !classification.is_ranked() {
        return Err(EngineError::malformed(
            chunk_index,
            "classifier entries not ranked descending by score",
        ));
    }

    // Rule 1: blacklist override. A simultaneous target hit loses.
    if let Some(hit) = classification.iter().find(|e| {
        policy.blacklist_labels.contains(&e.label) && e.score >= policy.blacklist_threshold
    }) {
        return Ok(Verdict::discard(chunk_index, ReasonCode::BlacklistHit)
            .with_trigger(&hit.label, hit.score));
    }

    // Rule 2: target match.
    if let Some(hit) = classification
        .iter()
        .find(|e| policy.target_labels.contains(&e.label) && e.score >= policy.target_threshold)
    {
        return Ok(
            Verdict::keep(chunk_index, ReasonCode::TargetHit).with_trigger(&hit.label, hit.score)
        );
    }

    // Rule 3: low-confidence fallback. A classifier confident about
    // nothing may be hearing an out-of-vocabulary sound worth keeping.
    if classification.max_score() < policy.low_confidence_threshold {
        return Ok(Verdict::keep(chunk_index, ReasonCode::LowConfidence));
    }

    // Rule 4: default discard. Trigger is the top-1 label, informational.
    let mut verdict = Verdict::discard(chunk_index, ReasonCode::NoMatch);
    if let Some(top) = classification.top() {
        verdict = verdict.with_trigger(&top.label, top.score);
    }
    Ok(verdict)
}
