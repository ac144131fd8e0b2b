//! Linking newly submitted transcripts back to earlier pending references.

pub mod activities;
pub mod config;
pub mod matcher;

pub use activities::{reconcile_thread, spawn_reconciliation, Outcome};
pub use config::ReconciliationConfig;
pub use matcher::{has_provider_markers, reconcile, score_candidate, Match};
