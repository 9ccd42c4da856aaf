//! Per-run progress events.
//!
//! Each run owns its own channel; there is no process-wide progress
//! state, so concurrent or repeated runs cannot corrupt each other's
//! reporting. Dropping the receiver silently disables reporting without
//! affecting the run.

use serde::{Deserialize, Serialize};
use tokio::sync::mpsc;

/// A progress event emitted during a run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ProgressEvent {
    /// The run moved to a new stage.
    Stage { name: String },
    /// One more chunk finished classification.
    Chunk { done: usize, total: usize },
    /// The run completed.
    Done { kept: usize, total: usize },
    /// The run aborted before completing.
    Failed { message: String },
}

/// Sending half of a run's progress channel.
///
/// All sends are best-effort: a closed receiver is ignored, observability
/// is not part of the run's correctness contract.
#[derive(Debug, Clone)]
pub struct ProgressSender {
    tx: Option<mpsc::UnboundedSender<ProgressEvent>>,
}

impl ProgressSender {
    /// A sender that reports nowhere.
    pub fn disabled() -> Self {
        Self { tx: None }
    }

    pub fn stage(&self, name: impl Into<String>) {
        self.send(ProgressEvent::Stage { name: name.into() });
    }

    pub fn chunk(&self, done: usize, total: usize) {
        self.send(ProgressEvent::Chunk { done, total });
    }

    pub fn done(&self, kept: usize, total: usize) {
        self.send(ProgressEvent::Done { kept, total });
    }

    pub fn failed(&self, message: impl Into<String>) {
        self.send(ProgressEvent::Failed {
            message: message.into(),
        });
    }

    fn send(&self, event: ProgressEvent) {
        if let Some(tx) = &self.tx {
            let _ = tx.send(event);
        }
    }
}

/// Create a progress channel for one run.
pub fn progress_channel() -> (ProgressSender, mpsc::UnboundedReceiver<ProgressEvent>) {
    let (tx, rx) = mpsc::unbounded_channel();
    (ProgressSender { tx: Some(tx) }, rx)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_events_arrive_in_order() {
        let (sender, mut rx) = progress_channel();
        sender.stage("classify");
        sender.chunk(1, 10);
        sender.done(4, 10);

        assert_eq!(
            rx.recv().await,
            Some(ProgressEvent::Stage {
                name: "classify".into()
            })
        );
        assert_eq!(rx.recv().await, Some(ProgressEvent::Chunk { done: 1, total: 10 }));
        assert_eq!(rx.recv().await, Some(ProgressEvent::Done { kept: 4, total: 10 }));
    }

    #[tokio::test]
    async fn test_failed_event_carries_message() {
        let (sender, mut rx) = progress_channel();
        sender.failed("classifier unavailable");
        assert_eq!(
            rx.recv().await,
            Some(ProgressEvent::Failed {
                message: "classifier unavailable".into()
            })
        );
    }

    #[tokio::test]
    async fn test_dropped_receiver_is_harmless() {
        let (sender, rx) = progress_channel();
        drop(rx);
        sender.stage("classify");
        sender.chunk(1, 1);
    }

    #[test]
    fn test_disabled_sender_is_harmless() {
        let sender = ProgressSender::disabled();
        sender.stage("classify");
    }
}
