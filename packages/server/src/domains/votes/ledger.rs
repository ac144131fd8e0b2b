//! Single-slot, mutually exclusive vote toggling.

use anyhow::{Context, Result};
use serde::Serialize;
use std::collections::BTreeMap;
use std::marker::PhantomData;
use std::sync::Arc;
use tracing::debug;
use uuid::Uuid;

use crate::common::MemberId;
use crate::domains::votes::kinds::VoteKind;
use crate::domains::votes::models::InsertOutcome;
use crate::kernel::BaseVoteStore;

/// Aggregate for one target plus the caller's own vote.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VoteSummary<K: VoteKind> {
    /// Every kind is present, zero when nobody chose it.
    pub counts_by_kind: BTreeMap<K, i64>,
    pub caller_state: Option<K>,
}

impl<K: VoteKind> VoteSummary<K> {
    pub fn count(&self, kind: K) -> i64 {
        self.counts_by_kind.get(&kind).copied().unwrap_or(0)
    }
}

pub struct VoteLedger<K> {
    store: Arc<dyn BaseVoteStore>,
    _kind: PhantomData<fn() -> K>,
}

impl<K: VoteKind> VoteLedger<K> {
    pub fn new(store: Arc<dyn BaseVoteStore>) -> Self {
        Self {
            store,
            _kind: PhantomData,
        }
    }

    /// Apply `kind` for `user_id` on `target`:
    /// no vote inserts it, the same kind removes it, another kind replaces it.
    ///
    /// A uniqueness conflict means a concurrent toggle won the race; the
    /// current state is re-read and returned instead of an error.
    pub async fn toggle(
        &self,
        user_id: MemberId,
        target: K::Target,
        kind: K,
    ) -> Result<VoteSummary<K>> {
        let target_id: Uuid = target.into();
        let current = self
            .store
            .find_vote(K::SCOPE, user_id, target_id)
            .await
            .context("Failed to read current vote")?;

        let write = match current {
            Some(existing) if existing == kind.as_str() => {
                self.store
                    .delete_vote(K::SCOPE, user_id, target_id)
                    .await
                    .context("Failed to remove vote")?;
                None
            }
            Some(_) => Some(
                self.store
                    .switch_vote(K::SCOPE, user_id, target_id, kind.as_str())
                    .await
                    .context("Failed to switch vote")?,
            ),
            None => Some(
                self.store
                    .insert_vote(K::SCOPE, user_id, target_id, kind.as_str())
                    .await
                    .context("Failed to insert vote")?,
            ),
        };

        if write == Some(InsertOutcome::Conflict) {
            debug!(%user_id, %target_id, "concurrent vote won the race, re-reading");
        }

        self.summary_for(Some(user_id), target_id).await
    }

    /// Read-only aggregate. `caller_state` is `None` when `user_id` is.
    pub async fn summary(
        &self,
        user_id: Option<MemberId>,
        target: K::Target,
    ) -> Result<VoteSummary<K>> {
        self.summary_for(user_id, target.into()).await
    }

    async fn summary_for(
        &self,
        user_id: Option<MemberId>,
        target_id: Uuid,
    ) -> Result<VoteSummary<K>> {
        let mut counts_by_kind: BTreeMap<K, i64> = K::ALL.iter().map(|k| (*k, 0)).collect();
        for (kind, count) in self.store.count_votes(K::SCOPE, target_id).await? {
            if let Some(kind) = K::parse(&kind) {
                counts_by_kind.insert(kind, count);
            }
        }

        let caller_state = match user_id {
            Some(user_id) => self
                .store
                .find_vote(K::SCOPE, user_id, target_id)
                .await?
                .and_then(|kind| K::parse(&kind)),
            None => None,
        };

        Ok(VoteSummary {
            counts_by_kind,
            caller_state,
        })
    }
}
