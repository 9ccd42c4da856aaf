//! Run configuration.

use std::path::PathBuf;

use aclip_engine::{FilterMode, FilterPolicy};

/// Configuration for one run, fixed before the first chunk is processed.
#[derive(Debug, Clone)]
pub struct RunConfig {
    /// Directory of chunk files produced by the external segmenter.
    pub input_dir: PathBuf,
    /// Root for audit artifacts (buckets and logs).
    pub audit_root: PathBuf,
    /// Target label set to use.
    pub mode: FilterMode,
    /// Minimum target-label score (inclusive).
    pub target_threshold: f32,
    /// Duration of each chunk in seconds.
    pub chunk_secs: u64,
    /// Minimum contiguous keep-run length in chunks.
    pub min_segment_len: usize,
    /// Where to write the concat-demuxer file list for the concatenator.
    pub concat_list_path: PathBuf,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            input_dir: PathBuf::from("chunks"),
            audit_root: PathBuf::from("audit"),
            mode: FilterMode::default(),
            target_threshold: 0.0001,
            chunk_secs: 1,
            min_segment_len: 3,
            concat_list_path: PathBuf::from("filelist.txt"),
        }
    }
}

impl RunConfig {
    /// Create config from `ACLIP_*` environment variables, falling back
    /// to defaults per field.
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            input_dir: std::env::var("ACLIP_INPUT_DIR")
                .map(PathBuf::from)
                .unwrap_or(defaults.input_dir),
            audit_root: std::env::var("ACLIP_AUDIT_ROOT")
                .map(PathBuf::from)
                .unwrap_or(defaults.audit_root),
            mode: std::env::var("ACLIP_MODE")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(defaults.mode),
            target_threshold: std::env::var("ACLIP_TARGET_THRESHOLD")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(defaults.target_threshold),
            chunk_secs: std::env::var("ACLIP_CHUNK_SECS")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(defaults.chunk_secs),
            min_segment_len: std::env::var("ACLIP_MIN_SEGMENT_LEN")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(defaults.min_segment_len),
            concat_list_path: std::env::var("ACLIP_CONCAT_LIST")
                .map(PathBuf::from)
                .unwrap_or(defaults.concat_list_path),
        }
    }

    /// Build the filter policy for this run.
    pub fn policy(&self) -> FilterPolicy {
        FilterPolicy::for_mode(self.mode)
            .with_target_threshold(self.target_threshold)
            .with_min_segment_len(self.min_segment_len)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_policy_is_valid() {
        let config = RunConfig::default();
        config.policy().validate().unwrap();
        assert_eq!(config.chunk_secs, 1);
        assert_eq!(config.min_segment_len, 3);
    }

    #[test]
    fn test_policy_carries_overrides() {
        let config = RunConfig {
            mode: FilterMode::Talking,
            target_threshold: 0.05,
            min_segment_len: 5,
            ..RunConfig::default()
        };
        let policy = config.policy();
        assert!(policy.target_labels.contains("Speech"));
        assert!((policy.target_threshold - 0.05).abs() < f32::EPSILON);
        assert_eq!(policy.min_segment_len, 5);
    }
}
