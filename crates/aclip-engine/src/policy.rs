//! Filter policy configuration.
//!
//! These parameters control which chunks survive classification. The
//! defaults are tuned for quiet foreground content against a YAMNet-style
//! sound-event vocabulary: the target threshold is intentionally tiny
//! (deep-rank hits count), the blacklist threshold intentionally high so
//! only unmistakable noise rejects a chunk.

use std::collections::HashSet;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};

/// Built-in target label sets, by content mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum FilterMode {
    /// Mouth/liquid sounds (trigger-style content).
    #[default]
    Licking,
    /// Spoken-word content.
    Talking,
    /// Ambient sleep sounds.
    Sleep,
}

impl FilterMode {
    /// Target labels for this mode, from the YAMNet vocabulary.
    pub fn target_labels(&self) -> HashSet<String> {
        let labels: &[&str] = match self {
            FilterMode::Licking => &[
                "Kiss",
                "Lip smack",
                "Chewing, mastication",
                "Drinking",
                "Water",
                "Liquid",
                "Gurgling",
                "Stomach rumble",
                "Drip",
                "Trickle, dribble",
                "Slurp",
                "Fizzy drink",
            ],
            FilterMode::Talking => &["Speech", "Whispering", "Conversation", "Narration"],
            FilterMode::Sleep => &["Rain", "Water", "Wind", "Silence", "White noise"],
        };
        labels.iter().map(|s| s.to_string()).collect()
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            FilterMode::Licking => "licking",
            FilterMode::Talking => "talking",
            FilterMode::Sleep => "sleep",
        }
    }
}

impl FromStr for FilterMode {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "licking" => Ok(FilterMode::Licking),
            "talking" => Ok(FilterMode::Talking),
            "sleep" => Ok(FilterMode::Sleep),
            other => Err(EngineError::invalid_policy(format!(
                "Unknown filter mode '{}'. Use licking, talking, or sleep",
                other
            ))),
        }
    }
}

/// Labels whose strong presence overrides any keep decision.
///
/// Only unmistakable interference goes here; the blacklist threshold is
/// high so borderline noise-adjacent content is not rejected.
pub fn default_blacklist() -> HashSet<String> {
    [
        "Speech",
        "Conversation",
        "Narration",
        "Vehicle",
        "Car",
        "Motor vehicle (road)",
        "Train",
        "Truck",
    ]
    .iter()
    .map(|s| s.to_string())
    .collect()
}

/// Immutable policy for one run: label sets plus decision thresholds.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FilterPolicy {
    /// Labels whose presence indicates content to retain.
    pub target_labels: HashSet<String>,

    /// Labels whose strong presence forces a discard.
    pub blacklist_labels: HashSet<String>,

    /// Minimum score for a target label to count as a hit (inclusive).
    ///
    /// YAMNet spreads probability mass across 521 classes, so a target
    /// label deep in the ranking with a tiny score is still meaningful.
    /// Reference default: 0.0001.
    pub target_threshold: f32,

    /// Minimum score for a blacklist label to force a discard (inclusive).
    ///
    /// Reference default: 0.20.
    pub blacklist_threshold: f32,

    /// If no label reaches this score, the chunk is kept on uncertainty:
    /// a classifier confident about nothing may be hearing an
    /// out-of-vocabulary sound the policy wants. Set to 0.0 to disable.
    ///
    /// Reference default: 0.15.
    pub low_confidence_threshold: f32,

    /// Minimum contiguous keep-run length (in chunks) that survives the
    /// continuity filter. Reference default: 3.
    pub min_segment_len: usize,
}

impl Default for FilterPolicy {
    fn default() -> Self {
        Self {
            target_labels: FilterMode::default().target_labels(),
            blacklist_labels: default_blacklist(),
            target_threshold: 0.0001,
            blacklist_threshold: 0.20,
            low_confidence_threshold: 0.15,
            min_segment_len: 3,
        }
    }
}

impl FilterPolicy {
    /// Policy for a built-in mode with the default blacklist and thresholds.
    pub fn for_mode(mode: FilterMode) -> Self {
        Self {
            target_labels: mode.target_labels(),
            ..Self::default()
        }
    }

    /// Builder-style setter for the target threshold.
    pub fn with_target_threshold(mut self, threshold: f32) -> Self {
        self.target_threshold = threshold;
        self
    }

    /// Builder-style setter for the blacklist threshold.
    pub fn with_blacklist_threshold(mut self, threshold: f32) -> Self {
        self.blacklist_threshold = threshold;
        self
    }

    /// Builder-style setter for the low-confidence threshold.
    pub fn with_low_confidence_threshold(mut self, threshold: f32) -> Self {
        self.low_confidence_threshold = threshold;
        self
    }

    /// Builder-style setter for the minimum segment length.
    pub fn with_min_segment_len(mut self, len: usize) -> Self {
        self.min_segment_len = len;
        self
    }

    /// Validate the policy before any chunk is processed.
    ///
    /// Fails fast on: empty target set, thresholds outside `[0, 1]`,
    /// or a non-positive minimum segment length.
    pub fn validate(&self) -> EngineResult<()> {
        if self.target_labels.is_empty() {
            return Err(EngineError::invalid_policy(
                "Target label set must not be empty",
            ));
        }
        for (name, value) in [
            ("target_threshold", self.target_threshold),
            ("blacklist_threshold", self.blacklist_threshold),
            ("low_confidence_threshold", self.low_confidence_threshold),
        ] {
            if !(0.0..=1.0).contains(&value) || value.is_nan() {
                return Err(EngineError::invalid_policy(format!(
                    "{} must be within [0, 1], got {}",
                    name, value
                )));
            }
        }
        if self.min_segment_len == 0 {
            return Err(EngineError::invalid_policy(
                "min_segment_len must be at least 1",
            ));
        }
        Ok(())
    }
}
