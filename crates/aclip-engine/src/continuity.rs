//! Temporal continuity filter.
//!
//! Second pass over the raw per-chunk verdicts: detect contiguous keep
//! runs, drop runs shorter than the policy minimum, and regenerate the
//! final keep set from the survivors. An isolated single-chunk target hit
//! with no neighbors is deliberately downgraded to discard; short blips
//! are noise, not content.
//!
//! # State machine
//!
//! ```text
//!                        Keep verdict
//!     ┌──────────────────────────────────────────────┐
//!     │                                              │
//!     ▼                                              │
//! ┌─────────┐                                  ┌─────────┐
//! │ OpenRun │──────────────────────────────────│ NoRun   │
//! └─────────┘        Discard verdict           └─────────┘
//!                  (close run at i - 1)
//! ```
//!
//! One left-to-right pass; a trailing open run is flushed at the end.

use serde::{Deserialize, Serialize};
use tracing::debug;

use aclip_models::{Decision, ReasonCode, Verdict};

use crate::error::{EngineError, EngineResult};

/// A maximal run of consecutive kept chunk indices.
///
/// Ephemeral: computed, filtered, and discarded within one continuity
/// pass; never persisted on its own.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Segment {
    /// First chunk index in the run (inclusive).
    pub start: usize,
    /// Last chunk index in the run (inclusive).
    pub end: usize,
}

impl Segment {
    /// Number of chunks covered by this run. A run is never empty;
    /// `start == end` covers one chunk.
    pub fn chunk_count(&self) -> usize {
        self.end - self.start + 1
    }

    pub fn contains(&self, index: usize) -> bool {
        (self.start..=self.end).contains(&index)
    }
}

/// Detect maximal contiguous keep runs in index order.
///
/// Verdicts must be ordered by chunk index with no gaps; positions are
/// taken from the slice, so the caller's ordering invariant is what makes
/// the detected runs meaningful.
pub fn detect_segments(verdicts: &[Verdict]) -> Vec<Segment> {
    let mut segments = Vec::new();
    let mut open_start: Option<usize> = None;

    for (i, verdict) in verdicts.iter().enumerate() {
        match (verdict.decision, open_start) {
            (Decision::Keep, None) => open_start = Some(i),
            (Decision::Discard, Some(start)) => {
                segments.push(Segment { start, end: i - 1 });
                open_start = None;
            }
            _ => {}
        }
    }

    // Flush a trailing open run
    if let Some(start) = open_start {
        segments.push(Segment {
            start,
            end: verdicts.len() - 1,
        });
    }

    segments
}

/// Apply the continuity filter: drop keep runs shorter than
/// `min_segment_len` and reassign every verdict from the survivors.
///
/// Returns the corrected verdicts (same order, same chunk indices) plus
/// the surviving segments. Chunks inside a surviving segment keep their
/// raw reason code; downgraded chunks become discard with `NoMatch` and
/// their trigger cleared. Re-running on the corrected output yields the
/// same segments.
pub fn apply_continuity(
    verdicts: &[Verdict],
    min_segment_len: usize,
) -> EngineResult<(Vec<Verdict>, Vec<Segment>)> {
    if min_segment_len == 0 {
        return Err(EngineError::invalid_policy(
            "min_segment_len must be at least 1",
        ));
    }

    let detected = detect_segments(verdicts);
    let surviving: Vec<Segment> = detected
        .iter()
        .copied()
        .filter(|s| s.chunk_count() >= min_segment_len)
        .collect();

    debug!(
        detected = detected.len(),
        surviving = surviving.len(),
        min_segment_len,
        "Continuity filter pass complete"
    );

    // Segments are sorted and disjoint, so a single cursor suffices.
    let mut cursor = 0usize;
    let corrected = verdicts
        .iter()
        .enumerate()
        .map(|(i, verdict)| {
            while cursor < surviving.len() && surviving[cursor].end < i {
                cursor += 1;
            }
            let inside = cursor < surviving.len() && surviving[cursor].contains(i);

            if inside {
                verdict.clone()
            } else if verdict.is_keep() {
                // Isolated short run: downgrade
                Verdict::discard(verdict.chunk_index, ReasonCode::NoMatch)
            } else {
                verdict.clone()
            }
        })
        .collect();

    Ok((corrected, surviving))
}

/// Statistics over a corrected verdict sequence.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SegmentStats {
    /// Total number of chunks.
    pub total_chunks: usize,
    /// Number of chunks kept after continuity filtering.
    pub kept_chunks: usize,
    /// Number of chunks discarded after continuity filtering.
    pub discarded_chunks: usize,
    /// Number of surviving segments.
    pub segment_count: usize,
    /// Total kept audio duration in seconds.
    pub kept_secs: u64,
    /// Ratio of kept chunks (0.0 to 1.0).
    pub keep_ratio: f64,
}

/// Calculate statistics from corrected verdicts and surviving segments.
pub fn compute_segment_stats(
    verdicts: &[Verdict],
    segments: &[Segment],
    chunk_secs: u64,
) -> SegmentStats {
    let kept_chunks = verdicts.iter().filter(|v| v.is_keep()).count();
    let keep_ratio = if verdicts.is_empty() {
        0.0
    } else {
        kept_chunks as f64 / verdicts.len() as f64
    };

    SegmentStats {
        total_chunks: verdicts.len(),
        kept_chunks,
        discarded_chunks: verdicts.len() - kept_chunks,
        segment_count: segments.len(),
        kept_secs: kept_chunks as u64 * chunk_secs,
        keep_ratio,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use aclip_models::ChunkIndex;

    fn verdicts_from(pattern: &str) -> Vec<Verdict> {
        // 'k' = raw keep (target hit), '.' = raw discard (no match)
        pattern
            .chars()
            .enumerate()
            .map(|(i, c)| match c {
                'k' => Verdict::keep(ChunkIndex(i), ReasonCode::TargetHit),
                _ => Verdict::discard(ChunkIndex(i), ReasonCode::NoMatch),
            })
            .collect()
    }

    fn kept_indices(verdicts: &[Verdict]) -> Vec<usize> {
        verdicts
            .iter()
            .filter(|v| v.is_keep())
            .map(|v| v.chunk_index.as_usize())
            .collect()
    }

    #[test]
    fn test_empty_input_yields_no_segments() {
        let (corrected, segments) = apply_continuity(&[], 3).unwrap();
        assert!(corrected.is_empty());
        assert!(segments.is_empty());
    }

    #[test]
    fn test_all_keep_spans_whole_sequence() {
        let raw = verdicts_from("kkkkk");
        let segments = detect_segments(&raw);
        assert_eq!(segments, vec![Segment { start: 0, end: 4 }]);
    }

    #[test]
    fn test_trailing_open_run_is_flushed() {
        let raw = verdicts_from("..kkk");
        let segments = detect_segments(&raw);
        assert_eq!(segments, vec![Segment { start: 2, end: 4 }]);
    }

    #[test]
    fn test_isolated_single_hit_is_suppressed() {
        // 10 chunks, single target hit at index 4, min run 3
        let raw = verdicts_from("....k.....");
        let (corrected, segments) = apply_continuity(&raw, 3).unwrap();
        assert!(segments.is_empty());
        assert!(kept_indices(&corrected).is_empty());
        // Downgraded chunk carries NoMatch with no trigger
        assert_eq!(corrected[4].reason, ReasonCode::NoMatch);
        assert!(corrected[4].trigger_label.is_none());
    }

    #[test]
    fn test_qualifying_run_survives_intact() {
        // Chunks 3-6 hit (run of 4), min run 3
        let raw = verdicts_from("...kkkk...");
        let (corrected, segments) = apply_continuity(&raw, 3).unwrap();
        assert_eq!(segments, vec![Segment { start: 3, end: 6 }]);
        assert_eq!(kept_indices(&corrected), vec![3, 4, 5, 6]);
        // Raw reason survives inside the segment
        assert_eq!(corrected[3].reason, ReasonCode::TargetHit);
    }

    #[test]
    fn test_exact_min_length_boundary() {
        // Run of exactly 3 survives; run of 2 is wiped
        let raw = verdicts_from("kkk..kk...");
        let (corrected, segments) = apply_continuity(&raw, 3).unwrap();
        assert_eq!(segments, vec![Segment { start: 0, end: 2 }]);
        assert_eq!(kept_indices(&corrected), vec![0, 1, 2]);
    }

    #[test]
    fn test_continuity_is_idempotent() {
        let raw = verdicts_from("kk.kkkk.k.kkk");
        let (corrected, segments) = apply_continuity(&raw, 3).unwrap();
        let (again, segments_again) = apply_continuity(&corrected, 3).unwrap();
        assert_eq!(corrected, again);
        assert_eq!(segments, segments_again);
    }

    #[test]
    fn test_zero_min_segment_len_fails_fast() {
        let raw = verdicts_from("kkk");
        assert!(matches!(
            apply_continuity(&raw, 0),
            Err(EngineError::InvalidPolicy(_))
        ));
    }

    #[test]
    fn test_multiple_surviving_segments() {
        let raw = verdicts_from("kkkk..kkk.k");
        let (corrected, segments) = apply_continuity(&raw, 3).unwrap();
        assert_eq!(
            segments,
            vec![Segment { start: 0, end: 3 }, Segment { start: 6, end: 8 }]
        );
        assert_eq!(kept_indices(&corrected), vec![0, 1, 2, 3, 6, 7, 8]);
    }

    #[test]
    fn test_segment_stats() {
        // 2-second chunks: 7 kept chunks cover 14s of audio
        let raw = verdicts_from("kkkk..kkk.");
        let (corrected, segments) = apply_continuity(&raw, 3).unwrap();
        let stats = compute_segment_stats(&corrected, &segments, 2);
        assert_eq!(stats.total_chunks, 10);
        assert_eq!(stats.kept_chunks, 7);
        assert_eq!(stats.discarded_chunks, 3);
        assert_eq!(stats.segment_count, 2);
        assert_eq!(stats.kept_secs, 14);
        assert!((stats.keep_ratio - 0.7).abs() < 0.001);
    }
}
