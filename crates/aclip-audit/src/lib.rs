//! Audit trail writer.
//!
//! The only side-effecting stage of the pipeline: routes a copy of every
//! chunk into a `kept/` or `discarded/` bucket under a timestamp-style
//! name, and records one structured log line per chunk. The decision
//! engine and continuity filter stay pure; everything durable lands here.
//!
//! Writes are idempotent per run (buckets are wiped before a fresh run)
//! and ordered: if routing one chunk fails, everything before it is
//! already on disk.

pub mod buckets;
pub mod error;
pub mod log;

pub use buckets::AuditBuckets;
pub use error::{AuditError, AuditResult};
pub use log::{AuditLog, DetailedLog};
