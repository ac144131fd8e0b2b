//! PostgreSQL-backed storage.

use anyhow::Result;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use tracing::instrument;
use uuid::Uuid;

use crate::common::{MemberId, ReferenceId, ThreadId};
use crate::domains::references::models::{NewReference, PendingReference};
use crate::domains::threads::models::{NewThread, SubmittedThread};
use crate::domains::votes::models::{InsertOutcome, VoteRecord, VoteScope};
use crate::kernel::traits::{BaseReferenceStore, BaseThreadStore, BaseVoteStore};

/// Store backed by the server's connection pool. Queries live on the models;
/// this type only routes trait calls to them.
#[derive(Clone)]
pub struct PostgresStore {
    pool: PgPool,
}

impl PostgresStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }
}

#[async_trait]
impl BaseThreadStore for PostgresStore {
    #[instrument(skip(self, new), fields(source = %new.source))]
    async fn create_thread(&self, new: NewThread) -> Result<SubmittedThread> {
        SubmittedThread::create(new, &self.pool).await
    }

    async fn find_thread(&self, id: ThreadId) -> Result<Option<SubmittedThread>> {
        SubmittedThread::find_by_id(id, &self.pool).await
    }
}

#[async_trait]
impl BaseReferenceStore for PostgresStore {
    #[instrument(skip(self, new), fields(owner_id = %new.owner_id))]
    async fn create_reference(&self, new: NewReference) -> Result<PendingReference> {
        PendingReference::create(new, &self.pool).await
    }

    async fn find_reference(&self, id: ReferenceId) -> Result<Option<PendingReference>> {
        PendingReference::find_by_id(id, &self.pool).await
    }

    async fn list_pending_for_owner(&self, owner_id: MemberId) -> Result<Vec<PendingReference>> {
        PendingReference::find_pending_for_owner(owner_id, &self.pool).await
    }

    #[instrument(skip(self))]
    async fn complete_reference(
        &self,
        id: ReferenceId,
        at: DateTime<Utc>,
    ) -> Result<Option<PendingReference>> {
        PendingReference::complete(id, at, &self.pool).await
    }

    #[instrument(skip(self))]
    async fn cancel_reference(
        &self,
        id: ReferenceId,
        owner_id: MemberId,
    ) -> Result<Option<PendingReference>> {
        PendingReference::cancel(id, owner_id, &self.pool).await
    }

    #[instrument(skip(self))]
    async fn delete_reference(&self, id: ReferenceId, owner_id: MemberId) -> Result<bool> {
        PendingReference::delete(id, owner_id, &self.pool).await
    }
}

#[async_trait]
impl BaseVoteStore for PostgresStore {
    async fn find_vote(
        &self,
        scope: VoteScope,
        user_id: MemberId,
        target_id: Uuid,
    ) -> Result<Option<String>> {
        Ok(VoteRecord::find(scope, user_id, target_id, &self.pool)
            .await?
            .map(|record| record.kind))
    }

    #[instrument(skip(self))]
    async fn insert_vote(
        &self,
        scope: VoteScope,
        user_id: MemberId,
        target_id: Uuid,
        kind: &str,
    ) -> Result<InsertOutcome> {
        VoteRecord::insert(scope, user_id, target_id, kind, &self.pool).await
    }

    #[instrument(skip(self))]
    async fn delete_vote(
        &self,
        scope: VoteScope,
        user_id: MemberId,
        target_id: Uuid,
    ) -> Result<bool> {
        VoteRecord::delete(scope, user_id, target_id, &self.pool).await
    }

    #[instrument(skip(self))]
    async fn switch_vote(
        &self,
        scope: VoteScope,
        user_id: MemberId,
        target_id: Uuid,
        kind: &str,
    ) -> Result<InsertOutcome> {
        VoteRecord::switch(scope, user_id, target_id, kind, &self.pool).await
    }

    async fn count_votes(&self, scope: VoteScope, target_id: Uuid) -> Result<Vec<(String, i64)>> {
        VoteRecord::count_by_kind(scope, target_id, &self.pool).await
    }
}
