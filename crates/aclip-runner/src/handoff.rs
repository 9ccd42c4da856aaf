//! Concat-list handoff to the external concatenator.

use std::path::Path;

use tracing::debug;

use aclip_models::{Chunk, ChunkIndex};

use crate::error::{RunError, RunResult};

/// Write an ffmpeg concat-demuxer file list for the kept chunks.
///
/// One `file '<path>'` line per kept chunk, in ascending chunk-index
/// order. Ordering is the core's only obligation toward the
/// concatenator; everything downstream of this file is external.
pub async fn write_concat_list(
    path: &Path,
    chunks: &[Chunk],
    kept: &[ChunkIndex],
) -> RunResult<()> {
    let mut content = String::new();
    for index in kept {
        let chunk = chunks.get(index.as_usize()).ok_or_else(|| {
            RunError::config(format!(
                "kept index {} out of range ({} chunks)",
                index,
                chunks.len()
            ))
        })?;
        content.push_str(&format!("file '{}'\n", chunk.path.display()));
    }

    tokio::fs::write(path, &content).await?;
    debug!(path = %path.display(), kept = kept.len(), "Concat list written");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_concat_list_order_and_format() {
        let dir = TempDir::new().unwrap();
        let list = dir.path().join("filelist.txt");

        let chunks: Vec<Chunk> = (0..5)
            .map(|i| Chunk::new(i, format!("/tmp/chunks/chunk_{:03}.wav", i)))
            .collect();
        let kept = vec![ChunkIndex(1), ChunkIndex(2), ChunkIndex(4)];

        write_concat_list(&list, &chunks, &kept).await.unwrap();

        let contents = tokio::fs::read_to_string(&list).await.unwrap();
        let lines: Vec<&str> = contents.lines().collect();
        assert_eq!(
            lines,
            vec![
                "file '/tmp/chunks/chunk_001.wav'",
                "file '/tmp/chunks/chunk_002.wav'",
                "file '/tmp/chunks/chunk_004.wav'",
            ]
        );
    }

    #[tokio::test]
    async fn test_out_of_range_index_fails() {
        let dir = TempDir::new().unwrap();
        let list = dir.path().join("filelist.txt");
        let chunks = vec![Chunk::new(0usize, "/tmp/chunk_000.wav")];

        let result = write_concat_list(&list, &chunks, &[ChunkIndex(3)]).await;
        assert!(matches!(result, Err(RunError::Config(_))));
    }
}
