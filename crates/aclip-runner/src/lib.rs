//! Run orchestrator for the audio auto-clipper.
//!
//! Wires the pure decision core to its external collaborators: the chunk
//! classifier (a single, non-reentrant resource invoked strictly in chunk
//! order), the audit trail writer, and the concat-list handoff for the
//! external concatenator. Progress is reported through a per-run channel,
//! never through process-wide state.

pub mod classifier;
pub mod config;
pub mod error;
pub mod handoff;
pub mod pipeline;
pub mod progress;

pub use classifier::{ChunkClassifier, ReplayClassifier};
pub use config::RunConfig;
pub use error::{RunError, RunResult};
pub use handoff::write_concat_list;
pub use pipeline::{discover_chunks, run, RunOutcome};
pub use progress::{progress_channel, ProgressEvent, ProgressSender};
