//! Structured classification logs.
//!
//! Two variants, matching the two audiences:
//! - [`AuditLog`] — compact CSV, one line per chunk, machine-skimmable.
//! - [`DetailedLog`] — per-chunk blocks with the ranked top-10 list and
//!   the rule that fired, a continuity-phase section, and a run summary.
//!
//! Neither format is parsed back by any component; the layout is a
//! convenience for inspection after a run.

use std::path::Path;

use chrono::Utc;
use tokio::fs::File;
use tokio::io::AsyncWriteExt;

use aclip_engine::{FilterPolicy, Segment, SegmentStats};
use aclip_models::{Classification, ChunkIndex, Decision, Verdict};

use crate::error::{AuditError, AuditResult};

/// Width of the separator rules in the detailed log.
const RULE_WIDTH: usize = 80;

/// How many ranked entries the detailed log prints per chunk.
const DETAIL_TOP_N: usize = 10;

/// Compact one-line-per-chunk classification log.
pub struct AuditLog {
    file: File,
}

impl AuditLog {
    /// Create the log file, truncating any previous run, and write the
    /// column header.
    pub async fn create(path: &Path) -> AuditResult<Self> {
        let mut file = File::create(path).await?;
        file.write_all(b"timestamp,label,score,decision,reason\n")
            .await
            .map_err(AuditError::LogWrite)?;
        Ok(Self { file })
    }

    /// Append one chunk's line: timestamp name, top-1 label/score, final
    /// decision, and the rule that fired. Flushed immediately so earlier
    /// lines survive a later failure.
    pub async fn append(
        &mut self,
        timestamp_name: &str,
        classification: &Classification,
        verdict: &Verdict,
    ) -> AuditResult<()> {
        let (label, score) = match classification.top() {
            Some(top) => (top.label.as_str(), top.score),
            None => ("Unknown", 0.0),
        };
        let decision = match verdict.decision {
            Decision::Keep => "KEEP",
            Decision::Discard => "DISCARD",
        };

        let line = format!(
            "{},{},{:.5},{},{}\n",
            timestamp_name,
            label,
            score,
            decision,
            verdict.reason.as_str()
        );
        self.file
            .write_all(line.as_bytes())
            .await
            .map_err(AuditError::LogWrite)?;
        self.file.flush().await.map_err(AuditError::LogWrite)?;
        Ok(())
    }
}

/// Detailed per-chunk log with ranked lists and continuity reporting.
pub struct DetailedLog {
    file: File,
    policy: FilterPolicy,
    chunk_secs: u64,
}

impl DetailedLog {
    /// Create the log and write the run header: mode, thresholds, label
    /// sets, and the wall-clock start time.
    pub async fn create(
        path: &Path,
        policy: &FilterPolicy,
        mode_name: &str,
        chunk_secs: u64,
    ) -> AuditResult<Self> {
        let mut log = Self {
            file: File::create(path).await?,
            policy: policy.clone(),
            chunk_secs,
        };

        let mut targets: Vec<&str> = log.policy.target_labels.iter().map(|s| s.as_str()).collect();
        targets.sort_unstable();
        let mut blacklist: Vec<&str> = log
            .policy
            .blacklist_labels
            .iter()
            .map(|s| s.as_str())
            .collect();
        blacklist.sort_unstable();

        let header = format!(
            "=== Classification Log - Mode: {}, Threshold: {} ===\n\
             Time: {}\n\
             Target Labels: {}\n\
             Blacklist Labels: {}\n\
             Blacklist Threshold: {}\n\
             Low Confidence Threshold: {}\n\n{}\n\n",
            mode_name,
            log.policy.target_threshold,
            Utc::now().to_rfc3339(),
            targets.join(", "),
            blacklist.join(", "),
            log.policy.blacklist_threshold,
            log.policy.low_confidence_threshold,
            "=".repeat(RULE_WIDTH),
        );
        log.write(&header).await?;
        Ok(log)
    }

    /// Record one chunk: the ranked top-10 with target/blacklist markers,
    /// then the raw decision and the rule that fired.
    pub async fn chunk(
        &mut self,
        index: ChunkIndex,
        total: usize,
        classification: &Classification,
        verdict: &Verdict,
    ) -> AuditResult<()> {
        let mut block = format!(
            "[{}] Chunk {}/{}\nTop {} classifications:\n",
            index.timestamp_name(self.chunk_secs),
            index.as_usize() + 1,
            total,
            DETAIL_TOP_N.min(classification.len()),
        );

        for (rank, entry) in classification.iter().take(DETAIL_TOP_N).enumerate() {
            let marker = if self.policy.target_labels.contains(&entry.label) {
                " TARGET"
            } else if self.policy.blacklist_labels.contains(&entry.label) {
                " BLACKLIST"
            } else {
                ""
            };
            block.push_str(&format!(
                "  {}. {:<30} {:.4}%{}\n",
                rank + 1,
                entry.label,
                entry.score * 100.0,
                marker
            ));
        }

        let decision = match verdict.decision {
            Decision::Keep => "KEEP",
            Decision::Discard => "DISCARD",
        };
        let rationale = match (&verdict.trigger_label, verdict.trigger_score) {
            (Some(label), Some(score)) => format!(
                "{} ({:.4}%)",
                label,
                score * 100.0
            ),
            _ => format!("max score {:.4}%", classification.max_score() * 100.0),
        };
        block.push_str(&format!(
            "Decision: {} - {}: {}\n{}\n\n",
            decision,
            verdict.reason.as_str(),
            rationale,
            "-".repeat(RULE_WIDTH),
        ));

        self.write(&block).await
    }

    /// Record the continuity phase: every detected run and the survivors.
    pub async fn continuity(
        &mut self,
        detected: &[Segment],
        surviving: &[Segment],
        min_segment_len: usize,
    ) -> AuditResult<()> {
        let mut block = format!(
            "\n{}\nPHASE 2: Continuity Detection\n{}\n\nFound {} continuous segments:\n",
            "=".repeat(RULE_WIDTH),
            "=".repeat(RULE_WIDTH),
            detected.len(),
        );
        for (i, seg) in detected.iter().enumerate() {
            block.push_str(&self.segment_line(i, seg));
        }

        block.push_str(&format!(
            "\nAfter filtering (min {} chunks):\n  Kept segments: {}\n",
            min_segment_len,
            surviving.len()
        ));
        for (i, seg) in surviving.iter().enumerate() {
            block.push_str(&self.segment_line(i, seg));
        }

        self.write(&block).await
    }

    /// Record the final run summary.
    pub async fn summary(&mut self, raw_kept: usize, stats: &SegmentStats) -> AuditResult<()> {
        let block = format!(
            "\n{}\n\nFinal Summary:\n  \
             Total chunks: {}\n  \
             Initial kept (before continuity): {} ({:.2}%)\n  \
             Final kept (after continuity): {} ({:.2}%)\n  \
             Continuous segments: {}\n  \
             Total duration: {}s\n",
            "=".repeat(RULE_WIDTH),
            stats.total_chunks,
            raw_kept,
            percentage(raw_kept, stats.total_chunks),
            stats.kept_chunks,
            stats.keep_ratio * 100.0,
            stats.segment_count,
            stats.kept_secs,
        );
        self.write(&block).await
    }

    fn segment_line(&self, ordinal: usize, seg: &Segment) -> String {
        format!(
            "  Segment {}: {} - {} ({} chunks, {}s)\n",
            ordinal + 1,
            ChunkIndex(seg.start).timestamp_name(self.chunk_secs),
            ChunkIndex(seg.end).timestamp_name(self.chunk_secs),
            seg.chunk_count(),
            seg.chunk_count() as u64 * self.chunk_secs,
        )
    }

    async fn write(&mut self, text: &str) -> AuditResult<()> {
        self.file
            .write_all(text.as_bytes())
            .await
            .map_err(AuditError::LogWrite)?;
        self.file.flush().await.map_err(AuditError::LogWrite)
    }
}

fn percentage(part: usize, whole: usize) -> f64 {
    if whole == 0 {
        0.0
    } else {
        part as f64 / whole as f64 * 100.0
    }
}
