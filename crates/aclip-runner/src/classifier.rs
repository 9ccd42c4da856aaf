//! The narrow classifier interface and the replay implementation.
//!
//! The pipeline is oblivious to how inference happens; anything that can
//! turn a chunk into a ranked label list plugs in here. The reference
//! deployment hosts YAMNet in an external runner and exports its output
//! as JSON, which [`ReplayClassifier`] serves back by chunk index.

use std::path::Path;

use async_trait::async_trait;

use aclip_models::{Chunk, Classification};

use crate::error::{RunError, RunResult};

/// Classifies one chunk into a ranked label list.
///
/// Implementations model a single-instance, non-reentrant resource: the
/// pipeline calls `classify` once per chunk, strictly in ascending index
/// order, and awaits each call before issuing the next. Failures are
/// fatal for the run and are never retried.
#[async_trait]
pub trait ChunkClassifier: Send + Sync {
    /// Classify a chunk. Must return at least one entry, ranked
    /// descending by score.
    async fn classify(&self, chunk: &Chunk) -> RunResult<Classification>;

    /// Classifier name for logging.
    fn name(&self) -> &'static str;
}

/// Serves pre-computed classification results by chunk index.
///
/// Input format: a JSON array with one ranked label list per chunk, in
/// chunk order: `[[{"label": "...", "score": 0.x}, ...], ...]`.
pub struct ReplayClassifier {
    results: Vec<Classification>,
}

impl ReplayClassifier {
    pub fn new(results: Vec<Classification>) -> Self {
        Self { results }
    }

    /// Load a replay file exported by the external classifier runner.
    pub async fn load(path: &Path) -> RunResult<Self> {
        let bytes = tokio::fs::read(path).await?;
        let results: Vec<Classification> = serde_json::from_slice(&bytes)?;
        Ok(Self { results })
    }

    pub fn len(&self) -> usize {
        self.results.len()
    }

    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }
}

#[async_trait]
impl ChunkClassifier for ReplayClassifier {
    async fn classify(&self, chunk: &Chunk) -> RunResult<Classification> {
        self.results
            .get(chunk.index.as_usize())
            .cloned()
            .ok_or_else(|| {
                RunError::classifier_failed(format!(
                    "no replay entry for chunk {} ({} available)",
                    chunk.index,
                    self.results.len()
                ))
            })
    }

    fn name(&self) -> &'static str {
        "replay"
    }
}
