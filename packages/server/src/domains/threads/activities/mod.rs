//! Thread submission.

use anyhow::{Context, Result};
use tracing::info;

use crate::domains::reconciliation::spawn_reconciliation;
use crate::domains::threads::models::{NewThread, SubmittedThread};
use crate::kernel::ServerDeps;

/// Persist a thread, then kick off reconciliation in the background.
///
/// The thread is returned as soon as it is stored; reconciliation outcome
/// never changes the result.
pub async fn create_thread(new: NewThread, deps: &ServerDeps) -> Result<SubmittedThread> {
    let thread = deps
        .threads
        .create_thread(new)
        .await
        .context("Failed to create thread")?;

    info!(thread_id = %thread.id, source = %thread.source, "thread created");

    spawn_reconciliation(thread.clone(), deps.clone());
    Ok(thread)
}
