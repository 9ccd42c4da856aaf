//! Kept/discarded audit buckets.
//!
//! Each run routes a copy of every chunk into one of two directories
//! keyed by its final decision. File names are the timestamp names from
//! `aclip-models`, so a plain directory listing reads in playback order.

use std::path::{Path, PathBuf};

use tokio::fs;
use tracing::debug;

use aclip_models::{Chunk, Decision, Verdict};

use crate::error::{AuditError, AuditResult};

/// The pair of audit directories for one run.
#[derive(Debug, Clone)]
pub struct AuditBuckets {
    kept_dir: PathBuf,
    discarded_dir: PathBuf,
    chunk_secs: u64,
}

impl AuditBuckets {
    /// Create (or reset) the `kept/` and `discarded/` buckets under `root`.
    ///
    /// Existing bucket contents are removed first so a fresh run never
    /// mixes with artifacts from a previous one.
    pub async fn prepare(root: &Path, chunk_secs: u64) -> AuditResult<Self> {
        let kept_dir = root.join("kept");
        let discarded_dir = root.join("discarded");

        for dir in [&kept_dir, &discarded_dir] {
            if fs::try_exists(dir).await? {
                fs::remove_dir_all(dir).await?;
            }
            fs::create_dir_all(dir).await?;
        }

        debug!(
            kept = %kept_dir.display(),
            discarded = %discarded_dir.display(),
            "Audit buckets prepared"
        );

        Ok(Self {
            kept_dir,
            discarded_dir,
            chunk_secs,
        })
    }

    pub fn kept_dir(&self) -> &Path {
        &self.kept_dir
    }

    pub fn discarded_dir(&self) -> &Path {
        &self.discarded_dir
    }

    /// Copy `chunk` into the bucket matching its final verdict.
    ///
    /// Returns the destination path. Failures surface immediately; copies
    /// made for earlier chunks are already durable and stay in place.
    pub async fn route(&self, chunk: &Chunk, verdict: &Verdict) -> AuditResult<PathBuf> {
        if !fs::try_exists(&chunk.path).await? {
            return Err(AuditError::ChunkNotFound(chunk.path.clone()));
        }

        let dir = match verdict.decision {
            Decision::Keep => &self.kept_dir,
            Decision::Discard => &self.discarded_dir,
        };
        let dest = dir.join(chunk.timestamp_file_name(self.chunk_secs));

        fs::copy(&chunk.path, &dest).await?;
        Ok(dest)
    }
}
