//! Ranked classification results from the external sound classifier.

use serde::{Deserialize, Serialize};

/// One `(label, score)` pair from the classifier.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassificationEntry {
    /// Sound-event vocabulary label (e.g. "Speech", "Kiss").
    pub label: String,
    /// Confidence score in `[0, 1]`.
    pub score: f32,
}

impl ClassificationEntry {
    pub fn new(label: impl Into<String>, score: f32) -> Self {
        Self {
            label: label.into(),
            score,
        }
    }
}

/// Ranked classification result for one chunk.
///
/// Entries are ordered descending by score; rank 0 is the top-1 label.
/// The classifier contract guarantees at least one entry, but the engine
/// re-checks before deciding rather than trusting the integration.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Classification {
    entries: Vec<ClassificationEntry>,
}

impl Classification {
    pub fn new(entries: Vec<ClassificationEntry>) -> Self {
        Self { entries }
    }

    pub fn entries(&self) -> &[ClassificationEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// The top-1 entry, if any.
    pub fn top(&self) -> Option<&ClassificationEntry> {
        self.entries.first()
    }

    /// Maximum score across all entries (0.0 for an empty result).
    pub fn max_score(&self) -> f32 {
        self.entries.iter().map(|e| e.score).fold(0.0, f32::max)
    }

    /// Whether entries are in non-increasing score order.
    pub fn is_ranked(&self) -> bool {
        self.entries.windows(2).all(|w| w[0].score >= w[1].score)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ClassificationEntry> {
        self.entries.iter()
    }
}

impl FromIterator<ClassificationEntry> for Classification {
    fn from_iter<T: IntoIterator<Item = ClassificationEntry>>(iter: T) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

impl<'a> IntoIterator for &'a Classification {
    type Item = &'a ClassificationEntry;
    type IntoIter = std::slice::Iter<'a, ClassificationEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}
