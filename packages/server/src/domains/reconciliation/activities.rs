//! Reconciliation side effect run after a thread is committed.

use anyhow::{Context, Result};
use chrono::Utc;
use tracing::{debug, error, info, warn};

use crate::common::ReferenceId;
use crate::domains::reconciliation::matcher::{has_provider_markers, reconcile};
use crate::domains::threads::models::SubmittedThread;
use crate::kernel::ServerDeps;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Matched(ReferenceId),
    NoMatch,
    /// Not a captured conversation, or reconciliation is switched off.
    Skipped,
}

/// Match `thread` against its author's pending references and complete the
/// winner.
pub async fn reconcile_thread(thread: &SubmittedThread, deps: &ServerDeps) -> Result<Outcome> {
    if !deps.reconciliation.enabled || !has_provider_markers(thread) {
        debug!(thread_id = %thread.id, "reconciliation skipped");
        return Ok(Outcome::Skipped);
    }

    let candidates = deps
        .references
        .list_pending_for_owner(thread.author_id)
        .await
        .context("Failed to load pending references")?;

    // Candidates are aged relative to the submission, not to when this task runs.
    let Some(found) = reconcile(thread, &candidates, thread.created_at, &deps.reconciliation) else {
        debug!(
            thread_id = %thread.id,
            candidates = candidates.len(),
            "no pending reference matched"
        );
        return Ok(Outcome::NoMatch);
    };

    let completed = deps
        .references
        .complete_reference(found.reference.id, Utc::now())
        .await
        .context("Failed to complete pending reference")?;

    match completed {
        Some(reference) => {
            info!(
                thread_id = %thread.id,
                reference_id = %reference.id,
                score = found.score,
                "pending reference completed"
            );
            Ok(Outcome::Matched(reference.id))
        }
        None => {
            warn!(
                reference_id = %found.reference.id,
                "matched reference was no longer pending"
            );
            Ok(Outcome::NoMatch)
        }
    }
}

/// Fire-and-forget reconciliation. Failures are logged and dropped so they
/// can never affect the thread creation that triggered them.
pub fn spawn_reconciliation(thread: SubmittedThread, deps: ServerDeps) -> tokio::task::JoinHandle<()> {
    tokio::spawn(async move {
        if let Err(e) = reconcile_thread(&thread, &deps).await {
            error!(thread_id = %thread.id, error = %e, "reconciliation failed");
        }
    })
}
