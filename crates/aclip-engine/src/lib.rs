#![deny(unreachable_patterns)]
//! Classification decision engine and temporal continuity filter.
//!
//! This crate is the decision core of the auto-clipper: given ranked
//! per-chunk classification results it decides keep/discard per chunk,
//! then suppresses isolated short keep-runs so only contiguous content
//! survives.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────┐    ┌──────────────┐    ┌──────────────┐
//! │ Ranked labels│───►│ Decision     │───►│ Continuity   │
//! │ (per chunk)  │    │ Engine       │    │ Filter       │
//! └──────────────┘    └──────────────┘    └──────────────┘
//!                                                │
//!                                                ▼
//!                     ┌──────────────┐    ┌──────────────┐
//!                     │ External     │◄───│ Segment      │
//!                     │ concatenator │    │ Assembler    │
//!                     └──────────────┘    └──────────────┘
//! ```
//!
//! Every function here is pure: no I/O, no shared state. The audit trail
//! and the classifier live in sibling crates.

pub mod assemble;
pub mod continuity;
pub mod decide;
pub mod error;
pub mod policy;

pub use assemble::assemble;
pub use continuity::{
    apply_continuity, compute_segment_stats, detect_segments, Segment, SegmentStats,
};
pub use decide::decide;
pub use error::{EngineError, EngineResult};
pub use policy::{FilterMode, FilterPolicy};
