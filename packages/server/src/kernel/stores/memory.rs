//! In-memory storage implementation for testing and development.

use anyhow::Result;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::collections::HashMap;
use std::sync::RwLock;
use uuid::Uuid;

use crate::common::{MemberId, ReferenceId, ThreadId};
use crate::domains::references::models::{NewReference, PendingReference, ReferenceStatus};
use crate::domains::threads::models::{NewThread, SubmittedThread};
use crate::domains::votes::models::{InsertOutcome, VoteScope};
use crate::kernel::traits::{BaseReferenceStore, BaseThreadStore, BaseVoteStore};

type VoteKey = (VoteScope, MemberId, Uuid);

/// In-memory storage for threads, pending references and votes.
///
/// Not suitable for production as data is lost on restart. Vote uniqueness
/// comes from the map key, mirroring the composite primary key in Postgres.
pub struct MemoryStore {
    threads: RwLock<HashMap<ThreadId, SubmittedThread>>,
    references: RwLock<HashMap<ReferenceId, PendingReference>>,
    votes: RwLock<HashMap<VoteKey, String>>,
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryStore {
    pub fn new() -> Self {
        Self {
            threads: RwLock::new(HashMap::new()),
            references: RwLock::new(HashMap::new()),
            votes: RwLock::new(HashMap::new()),
        }
    }

    /// Insert a reference as-is, keeping its timestamps and status.
    pub fn seed_reference(&self, reference: PendingReference) {
        self.references
            .write()
            .unwrap()
            .insert(reference.id, reference);
    }

    pub fn vote_count(&self) -> usize {
        self.votes.read().unwrap().len()
    }
}

#[async_trait]
impl BaseThreadStore for MemoryStore {
    async fn create_thread(&self, new: NewThread) -> Result<SubmittedThread> {
        let thread = new.into_thread(Utc::now());
        self.threads
            .write()
            .unwrap()
            .insert(thread.id, thread.clone());
        Ok(thread)
    }

    async fn find_thread(&self, id: ThreadId) -> Result<Option<SubmittedThread>> {
        Ok(self.threads.read().unwrap().get(&id).cloned())
    }
}

#[async_trait]
impl BaseReferenceStore for MemoryStore {
    async fn create_reference(&self, new: NewReference) -> Result<PendingReference> {
        let reference = new.into_reference(Utc::now());
        self.seed_reference(reference.clone());
        Ok(reference)
    }

    async fn find_reference(&self, id: ReferenceId) -> Result<Option<PendingReference>> {
        Ok(self.references.read().unwrap().get(&id).cloned())
    }

    async fn list_pending_for_owner(&self, owner_id: MemberId) -> Result<Vec<PendingReference>> {
        let mut pending: Vec<PendingReference> = self
            .references
            .read()
            .unwrap()
            .values()
            .filter(|r| r.owner_id == owner_id && r.is_pending())
            .cloned()
            .collect();
        pending.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));
        Ok(pending)
    }

    async fn complete_reference(
        &self,
        id: ReferenceId,
        at: DateTime<Utc>,
    ) -> Result<Option<PendingReference>> {
        let mut references = self.references.write().unwrap();
        Ok(references
            .get_mut(&id)
            .filter(|r| r.is_pending())
            .map(|r| {
                r.status = ReferenceStatus::Completed;
                r.completed_at = Some(at);
                r.clone()
            }))
    }

    async fn cancel_reference(
        &self,
        id: ReferenceId,
        owner_id: MemberId,
    ) -> Result<Option<PendingReference>> {
        let mut references = self.references.write().unwrap();
        Ok(references
            .get_mut(&id)
            .filter(|r| r.owner_id == owner_id && r.is_pending())
            .map(|r| {
                r.status = ReferenceStatus::Cancelled;
                r.clone()
            }))
    }

    async fn delete_reference(&self, id: ReferenceId, owner_id: MemberId) -> Result<bool> {
        let mut references = self.references.write().unwrap();
        match references.get(&id) {
            Some(r) if r.owner_id == owner_id => {
                references.remove(&id);
                Ok(true)
            }
            _ => Ok(false),
        }
    }
}

#[async_trait]
impl BaseVoteStore for MemoryStore {
    async fn find_vote(
        &self,
        scope: VoteScope,
        user_id: MemberId,
        target_id: Uuid,
    ) -> Result<Option<String>> {
        Ok(self
            .votes
            .read()
            .unwrap()
            .get(&(scope, user_id, target_id))
            .cloned())
    }

    async fn insert_vote(
        &self,
        scope: VoteScope,
        user_id: MemberId,
        target_id: Uuid,
        kind: &str,
    ) -> Result<InsertOutcome> {
        let mut votes = self.votes.write().unwrap();
        let key = (scope, user_id, target_id);
        if votes.contains_key(&key) {
            return Ok(InsertOutcome::Conflict);
        }
        votes.insert(key, kind.to_string());
        Ok(InsertOutcome::Inserted)
    }

    async fn delete_vote(
        &self,
        scope: VoteScope,
        user_id: MemberId,
        target_id: Uuid,
    ) -> Result<bool> {
        Ok(self
            .votes
            .write()
            .unwrap()
            .remove(&(scope, user_id, target_id))
            .is_some())
    }

    async fn switch_vote(
        &self,
        scope: VoteScope,
        user_id: MemberId,
        target_id: Uuid,
        kind: &str,
    ) -> Result<InsertOutcome> {
        self.votes
            .write()
            .unwrap()
            .insert((scope, user_id, target_id), kind.to_string());
        Ok(InsertOutcome::Inserted)
    }

    async fn count_votes(&self, scope: VoteScope, target_id: Uuid) -> Result<Vec<(String, i64)>> {
        let mut counts: HashMap<String, i64> = HashMap::new();
        for ((s, _, target), kind) in self.votes.read().unwrap().iter() {
            if *s == scope && *target == target_id {
                *counts.entry(kind.clone()).or_default() += 1;
            }
        }
        Ok(counts.into_iter().collect())
    }
}
