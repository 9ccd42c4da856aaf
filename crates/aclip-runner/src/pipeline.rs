//! The classify → decide → filter → audit → assemble pipeline.
//!
//! Runs synchronously over the chunk sequence. The classifier call is the
//! only suspension point: one call per chunk, strictly in ascending index
//! order, awaited to completion before the next (the classifier is a
//! single-instance, non-reentrant resource). Continuity filtering and
//! assembly run once over the fully materialized verdict sequence; no
//! streaming merge exists. Aborting mid-run leaves already-written audit
//! artifacts consistent but the run result unavailable.

use std::path::Path;

use tracing::info;

use aclip_audit::{AuditBuckets, AuditLog, DetailedLog};
use aclip_engine::{
    apply_continuity, assemble, compute_segment_stats, decide, detect_segments, EngineError,
    Segment, SegmentStats,
};
use aclip_models::{Chunk, ChunkIndex};

use crate::classifier::ChunkClassifier;
use crate::config::RunConfig;
use crate::error::{RunError, RunResult};
use crate::handoff::write_concat_list;
use crate::progress::ProgressSender;

/// Result of a completed run.
#[derive(Debug, Clone)]
pub struct RunOutcome {
    /// Kept chunk indices, ascending.
    pub kept: Vec<ChunkIndex>,
    /// Surviving contiguous segments.
    pub segments: Vec<Segment>,
    /// Keep/discard statistics.
    pub stats: SegmentStats,
}

/// Enumerate chunk files produced by the external segmenter.
///
/// Picks up `.wav` files in `dir`, sorted by file name (the segmenter
/// writes zero-padded names, so name order is recording order), and
/// assigns dense indices `0..N`.
pub async fn discover_chunks(dir: &Path) -> RunResult<Vec<Chunk>> {
    let mut paths = Vec::new();
    let mut entries = tokio::fs::read_dir(dir).await?;
    while let Some(entry) = entries.next_entry().await? {
        let path = entry.path();
        if path.extension().and_then(|e| e.to_str()) == Some("wav") {
            paths.push(path);
        }
    }
    paths.sort();

    Ok(paths
        .into_iter()
        .enumerate()
        .map(|(i, path)| Chunk::new(i, path))
        .collect())
}

/// Execute one full run.
///
/// On success the audit buckets and logs under `config.audit_root`
/// reflect the final (post-continuity) verdicts and the concat list at
/// `config.concat_list_path` holds the kept chunks in order. On failure,
/// artifacts written so far stay in place for inspection and a `Failed`
/// event is emitted so a channel consumer can tell an aborted run from a
/// dropped sender.
pub async fn run(
    config: &RunConfig,
    classifier: &dyn ChunkClassifier,
    progress: &ProgressSender,
) -> RunResult<RunOutcome> {
    let result = execute(config, classifier, progress).await;
    if let Err(e) = &result {
        progress.failed(e.to_string());
    }
    result
}

async fn execute(
    config: &RunConfig,
    classifier: &dyn ChunkClassifier,
    progress: &ProgressSender,
) -> RunResult<RunOutcome> {
    let policy = config.policy();
    policy.validate()?;

    progress.stage("prepare");
    let chunks = discover_chunks(&config.input_dir).await?;
    let total = chunks.len();
    info!(
        chunks = total,
        classifier = classifier.name(),
        mode = config.mode.as_str(),
        "Starting auto-clip run"
    );

    tokio::fs::create_dir_all(&config.audit_root).await?;
    let buckets = AuditBuckets::prepare(&config.audit_root, config.chunk_secs).await?;
    let mut detail = DetailedLog::create(
        &config.audit_root.join("classification_detail.log"),
        &policy,
        config.mode.as_str(),
        config.chunk_secs,
    )
    .await?;

    // Phase 1: classify and decide, one chunk at a time in index order.
    progress.stage("classify");
    let mut classifications = Vec::with_capacity(total);
    let mut raw_verdicts = Vec::with_capacity(total);
    for chunk in &chunks {
        let classification = classifier.classify(chunk).await?;
        let verdict = decide(chunk.index, &classification, &policy)?;
        detail
            .chunk(chunk.index, total, &classification, &verdict)
            .await?;
        classifications.push(classification);
        raw_verdicts.push(verdict);
        progress.chunk(chunk.index.as_usize() + 1, total);
    }
    let raw_kept = raw_verdicts.iter().filter(|v| v.is_keep()).count();

    // Phase 2: continuity filtering over the complete verdict sequence.
    progress.stage("continuity");
    let detected = detect_segments(&raw_verdicts);
    let (corrected, surviving) = apply_continuity(&raw_verdicts, policy.min_segment_len)?;
    detail
        .continuity(&detected, &surviving, policy.min_segment_len)
        .await?;

    // Single final audit write pass from the corrected verdicts.
    progress.stage("audit");
    let mut log = AuditLog::create(&config.audit_root.join("classification.log")).await?;
    for (chunk, (classification, verdict)) in
        chunks.iter().zip(classifications.iter().zip(&corrected))
    {
        buckets.route(chunk, verdict).await?;
        log.append(
            &chunk.index.timestamp_name(config.chunk_secs),
            classification,
            verdict,
        )
        .await?;
    }

    let stats = compute_segment_stats(&corrected, &surviving, config.chunk_secs);
    detail.summary(raw_kept, &stats).await?;

    progress.stage("assemble");
    let kept = assemble(&corrected).map_err(|e| match e {
        EngineError::EmptyResult => RunError::NoMatchingContent,
        other => RunError::Engine(other),
    })?;
    write_concat_list(&config.concat_list_path, &chunks, &kept).await?;

    info!(
        kept = kept.len(),
        total,
        segments = surviving.len(),
        "Auto-clip run complete"
    );
    progress.done(kept.len(), total);

    Ok(RunOutcome {
        kept,
        segments: surviving,
        stats,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use tempfile::TempDir;

    use aclip_engine::FilterMode;
    use aclip_models::{Classification, ClassificationEntry};

    use crate::progress::{progress_channel, ProgressEvent, ProgressSender};

    /// Returns a target hit for listed indices, a confident miss otherwise.
    struct ScriptedClassifier {
        hits: Vec<usize>,
    }

    #[async_trait]
    impl ChunkClassifier for ScriptedClassifier {
        async fn classify(&self, chunk: &Chunk) -> RunResult<Classification> {
            let entries = if self.hits.contains(&chunk.index.as_usize()) {
                vec![
                    ClassificationEntry::new("Kiss", 0.35),
                    ClassificationEntry::new("Music", 0.10),
                ]
            } else {
                vec![
                    ClassificationEntry::new("Music", 0.60),
                    ClassificationEntry::new("Animal", 0.20),
                ]
            };
            Ok(Classification::new(entries))
        }

        fn name(&self) -> &'static str {
            "scripted"
        }
    }

    async fn setup(hits: Vec<usize>, total: usize) -> (TempDir, RunConfig, ScriptedClassifier) {
        let root = TempDir::new().unwrap();
        let input_dir = root.path().join("chunks");
        tokio::fs::create_dir_all(&input_dir).await.unwrap();
        for i in 0..total {
            tokio::fs::write(input_dir.join(format!("chunk_{:03}.wav", i)), b"wav")
                .await
                .unwrap();
        }

        let config = RunConfig {
            input_dir,
            audit_root: root.path().join("audit"),
            mode: FilterMode::Licking,
            target_threshold: 0.10,
            chunk_secs: 1,
            min_segment_len: 3,
            concat_list_path: root.path().join("filelist.txt"),
        };
        (root, config, ScriptedClassifier { hits })
    }

    #[tokio::test]
    async fn test_discover_chunks_sorted_dense() {
        let dir = TempDir::new().unwrap();
        for name in ["chunk_002.wav", "chunk_000.wav", "chunk_001.wav", "notes.txt"] {
            tokio::fs::write(dir.path().join(name), b"x").await.unwrap();
        }

        let chunks = discover_chunks(dir.path()).await.unwrap();
        assert_eq!(chunks.len(), 3);
        for (i, chunk) in chunks.iter().enumerate() {
            assert_eq!(chunk.index.as_usize(), i);
        }
        assert!(chunks[0].path.ends_with("chunk_000.wav"));
        assert!(chunks[2].path.ends_with("chunk_002.wav"));
    }

    #[tokio::test]
    async fn test_run_keeps_contiguous_hit_run() {
        // Chunks 3-6 hit (run of 4), min run 3: all four survive.
        let (_root, config, classifier) = setup(vec![3, 4, 5, 6], 10).await;
        let outcome = run(&config, &classifier, &ProgressSender::disabled())
            .await
            .unwrap();

        let kept: Vec<usize> = outcome.kept.iter().map(|i| i.as_usize()).collect();
        assert_eq!(kept, vec![3, 4, 5, 6]);
        assert_eq!(outcome.segments, vec![Segment { start: 3, end: 6 }]);
        assert_eq!(outcome.stats.kept_chunks, 4);
        assert_eq!(outcome.stats.discarded_chunks, 6);
        assert_eq!(outcome.stats.kept_secs, 4);

        // Audit buckets hold the corrected split under timestamp names
        assert!(config.audit_root.join("kept/00-00-03.wav").exists());
        assert!(config.audit_root.join("kept/00-00-06.wav").exists());
        assert!(config.audit_root.join("discarded/00-00-00.wav").exists());
        assert!(config.audit_root.join("discarded/00-00-09.wav").exists());

        // Concat list in playback order
        let list = tokio::fs::read_to_string(&config.concat_list_path)
            .await
            .unwrap();
        let lines: Vec<&str> = list.lines().collect();
        assert_eq!(lines.len(), 4);
        assert!(lines[0].contains("chunk_003.wav"));
        assert!(lines[3].contains("chunk_006.wav"));
    }

    #[tokio::test]
    async fn test_run_suppresses_isolated_hit() {
        // Single hit at index 4 with min run 3: nothing matches.
        let (_root, config, classifier) = setup(vec![4], 10).await;
        let result = run(&config, &classifier, &ProgressSender::disabled()).await;
        assert!(matches!(result, Err(RunError::NoMatchingContent)));

        // Audit trail stays in place for inspection
        assert!(config.audit_root.join("discarded/00-00-04.wav").exists());
        assert!(config
            .audit_root
            .join("classification_detail.log")
            .exists());
    }

    #[tokio::test]
    async fn test_run_emits_ordered_progress() {
        let (_root, config, classifier) = setup(vec![0, 1, 2], 3).await;
        let (sender, mut rx) = progress_channel();

        run(&config, &classifier, &sender).await.unwrap();
        drop(sender);

        let mut events = Vec::new();
        while let Some(event) = rx.recv().await {
            events.push(event);
        }

        assert_eq!(
            events.first(),
            Some(&ProgressEvent::Stage {
                name: "prepare".into()
            })
        );
        assert!(events.contains(&ProgressEvent::Chunk { done: 3, total: 3 }));
        assert_eq!(events.last(), Some(&ProgressEvent::Done { kept: 3, total: 3 }));
    }

    #[tokio::test]
    async fn test_run_reports_failure_on_channel() {
        // Isolated hit: the run ends in NoMatchingContent, and the last
        // event on the channel says so.
        let (_root, config, classifier) = setup(vec![4], 10).await;
        let (sender, mut rx) = progress_channel();

        let result = run(&config, &classifier, &sender).await;
        drop(sender);
        assert!(matches!(result, Err(RunError::NoMatchingContent)));

        let mut last = None;
        while let Some(event) = rx.recv().await {
            last = Some(event);
        }
        assert_eq!(
            last,
            Some(ProgressEvent::Failed {
                message: "No matching content found".into()
            })
        );
    }

    #[tokio::test]
    async fn test_run_rejects_invalid_policy_before_processing() {
        let (_root, mut config, classifier) = setup(vec![], 2).await;
        config.min_segment_len = 0;

        let result = run(&config, &classifier, &ProgressSender::disabled()).await;
        assert!(matches!(
            result,
            Err(RunError::Engine(EngineError::InvalidPolicy(_)))
        ));
        // Fails fast: no audit artifacts were created
        assert!(!config.audit_root.exists());
    }
}
