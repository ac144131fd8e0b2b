// Trait definitions for dependency injection
//
// These are storage traits only. Domain rules (status transitions, vote
// toggling, reconciliation scoring) live in the domains and use these traits.
//
// Naming convention: Base* for trait names (e.g., BaseThreadStore)

use anyhow::Result;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::common::{MemberId, ReferenceId, ThreadId};
use crate::domains::references::models::{NewReference, PendingReference};
use crate::domains::threads::models::{NewThread, SubmittedThread};
use crate::domains::votes::models::{InsertOutcome, VoteScope};

// =============================================================================
// Thread Store
// =============================================================================

#[async_trait]
pub trait BaseThreadStore: Send + Sync {
    async fn create_thread(&self, new: NewThread) -> Result<SubmittedThread>;

    async fn find_thread(&self, id: ThreadId) -> Result<Option<SubmittedThread>>;
}

// =============================================================================
// Pending Reference Store
// =============================================================================

#[async_trait]
pub trait BaseReferenceStore: Send + Sync {
    async fn create_reference(&self, new: NewReference) -> Result<PendingReference>;

    async fn find_reference(&self, id: ReferenceId) -> Result<Option<PendingReference>>;

    /// Pending references owned by `owner_id`, newest first.
    async fn list_pending_for_owner(&self, owner_id: MemberId) -> Result<Vec<PendingReference>>;

    /// Transition `pending → completed`. Returns `None` if the reference was
    /// not pending at the time of the update.
    async fn complete_reference(
        &self,
        id: ReferenceId,
        at: DateTime<Utc>,
    ) -> Result<Option<PendingReference>>;

    /// Transition `pending → cancelled` for the owner. Returns `None` if the
    /// reference is missing, not owned by `owner_id`, or no longer pending.
    async fn cancel_reference(
        &self,
        id: ReferenceId,
        owner_id: MemberId,
    ) -> Result<Option<PendingReference>>;

    async fn delete_reference(&self, id: ReferenceId, owner_id: MemberId) -> Result<bool>;
}

// =============================================================================
// Vote Store
// =============================================================================

/// Single-slot vote storage. At most one row per `(scope, user, target)`
/// must be enforced here, not by callers.
#[async_trait]
pub trait BaseVoteStore: Send + Sync {
    async fn find_vote(
        &self,
        scope: VoteScope,
        user_id: MemberId,
        target_id: Uuid,
    ) -> Result<Option<String>>;

    async fn insert_vote(
        &self,
        scope: VoteScope,
        user_id: MemberId,
        target_id: Uuid,
        kind: &str,
    ) -> Result<InsertOutcome>;

    async fn delete_vote(&self, scope: VoteScope, user_id: MemberId, target_id: Uuid)
        -> Result<bool>;

    /// Atomically replace whatever the user holds with `kind`.
    async fn switch_vote(
        &self,
        scope: VoteScope,
        user_id: MemberId,
        target_id: Uuid,
        kind: &str,
    ) -> Result<InsertOutcome>;

    async fn count_votes(&self, scope: VoteScope, target_id: Uuid) -> Result<Vec<(String, i64)>>;
}
