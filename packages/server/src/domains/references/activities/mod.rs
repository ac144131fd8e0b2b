//! Pending reference actions - entry-point functions for lifecycle operations
//!
//! Ownership is enforced here: callers only ever see or change their own
//! references.

use tracing::info;

use crate::common::{MemberId, ReferenceId};
use crate::domains::references::error::ReferenceError;
use crate::domains::references::models::{NewReference, PendingReference};
use crate::kernel::ServerDeps;

/// Save a new pending reference for `owner_id`.
pub async fn create_reference(
    owner_id: MemberId,
    source_url: String,
    title: Option<String>,
    notes: Option<String>,
    deps: &ServerDeps,
) -> Result<PendingReference, ReferenceError> {
    let source_url = source_url.trim().to_string();
    if source_url.is_empty() {
        return Err(ReferenceError::EmptySourceUrl);
    }

    let reference = deps
        .references
        .create_reference(NewReference {
            owner_id,
            source_url,
            title: non_empty(title),
            notes: non_empty(notes),
        })
        .await?;

    info!(reference_id = %reference.id, owner_id = %owner_id, "pending reference saved");
    Ok(reference)
}

pub async fn list_pending(
    owner_id: MemberId,
    deps: &ServerDeps,
) -> Result<Vec<PendingReference>, ReferenceError> {
    Ok(deps.references.list_pending_for_owner(owner_id).await?)
}

/// Cancel a pending reference. Completed or cancelled references are left
/// untouched and reported as `NotPending`.
pub async fn cancel_reference(
    id: ReferenceId,
    owner_id: MemberId,
    deps: &ServerDeps,
) -> Result<PendingReference, ReferenceError> {
    if let Some(cancelled) = deps.references.cancel_reference(id, owner_id).await? {
        info!(reference_id = %id, "pending reference cancelled");
        return Ok(cancelled);
    }

    match deps.references.find_reference(id).await? {
        Some(existing) if existing.owner_id == owner_id => Err(ReferenceError::NotPending {
            id,
            status: existing.status,
        }),
        _ => Err(ReferenceError::NotFound(id)),
    }
}

/// Delete a reference in any state.
pub async fn delete_reference(
    id: ReferenceId,
    owner_id: MemberId,
    deps: &ServerDeps,
) -> Result<(), ReferenceError> {
    if deps.references.delete_reference(id, owner_id).await? {
        info!(reference_id = %id, "reference deleted");
        Ok(())
    } else {
        Err(ReferenceError::NotFound(id))
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
