//! Per-chunk keep/discard verdicts.

use serde::{Deserialize, Serialize};

use crate::chunk::ChunkIndex;

/// Final call for one chunk.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Decision {
    /// Keep this chunk in the output.
    Keep,
    /// Discard this chunk.
    Discard,
}

/// Which policy rule produced a verdict.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReasonCode {
    /// A blacklisted label scored at or above the blacklist threshold.
    BlacklistHit,
    /// A target label scored at or above the target threshold.
    TargetHit,
    /// No label reached the low-confidence threshold; kept on uncertainty.
    LowConfidence,
    /// No rule matched; default discard.
    NoMatch,
}

impl ReasonCode {
    /// Short name used in audit log lines.
    pub fn as_str(&self) -> &'static str {
        match self {
            ReasonCode::BlacklistHit => "blacklist_hit",
            ReasonCode::TargetHit => "target_hit",
            ReasonCode::LowConfidence => "low_confidence",
            ReasonCode::NoMatch => "no_match",
        }
    }
}

/// The keep/discard outcome plus rationale for one chunk.
///
/// Produced by the decision engine in chunk-index order. The continuity
/// filter may rewrite `decision` and `reason` in its second pass;
/// `chunk_index` is never touched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Verdict {
    pub chunk_index: ChunkIndex,
    pub decision: Decision,
    pub reason: ReasonCode,
    /// Label that triggered the rule. For `NoMatch` this is the top-1
    /// label, recorded for the audit trail only.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub trigger_label: Option<String>,
    /// Score of the triggering label.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub trigger_score: Option<f32>,
}

impl Verdict {
    pub fn keep(chunk_index: ChunkIndex, reason: ReasonCode) -> Self {
        Self {
            chunk_index,
            decision: Decision::Keep,
            reason,
            trigger_label: None,
            trigger_score: None,
        }
    }

    pub fn discard(chunk_index: ChunkIndex, reason: ReasonCode) -> Self {
        Self {
            chunk_index,
            decision: Decision::Discard,
            reason,
            trigger_label: None,
            trigger_score: None,
        }
    }

    /// Attach the triggering label/score.
    pub fn with_trigger(mut self, label: impl Into<String>, score: f32) -> Self {
        self.trigger_label = Some(label.into());
        self.trigger_score = Some(score);
        self
    }

    pub fn is_keep(&self) -> bool {
        self.decision == Decision::Keep
    }
}
