//! Sync orchestration
//!
//! The engine sequences settings generation, root template placement, and
//! tree mirroring across the requested targets, aggregating the outcome
//! into per-target reports.

mod engine;
mod report;

pub use engine::{SyncEngine, TargetSelection};
pub use report::{SyncIssue, SyncReport};
