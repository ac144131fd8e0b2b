use anyhow::Result;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;

use crate::common::{MemberId, ReferenceId};

/// Lifecycle of a pending reference.
///
/// `pending → completed` happens at most once; `cancelled` is terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "reference_status", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum ReferenceStatus {
    Pending,
    Completed,
    Cancelled,
}

impl ReferenceStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Completed => "completed",
            Self::Cancelled => "cancelled",
        }
    }
}

impl std::fmt::Display for ReferenceStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A saved "I intend to capture this" marker.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct PendingReference {
    pub id: ReferenceId,
    pub owner_id: MemberId,
    pub source_url: String,
    pub title: Option<String>,
    pub notes: Option<String>,
    pub status: ReferenceStatus,
    pub created_at: DateTime<Utc>,
    /// Set iff `status == Completed`.
    pub completed_at: Option<DateTime<Utc>>,
}

/// Input for saving a new pending reference.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewReference {
    pub owner_id: MemberId,
    pub source_url: String,
    pub title: Option<String>,
    pub notes: Option<String>,
}

impl NewReference {
    pub fn into_reference(self, now: DateTime<Utc>) -> PendingReference {
        PendingReference {
            id: ReferenceId::new(),
            owner_id: self.owner_id,
            source_url: self.source_url,
            title: self.title,
            notes: self.notes,
            status: ReferenceStatus::Pending,
            created_at: now,
            completed_at: None,
        }
    }
}

impl PendingReference {
    pub fn is_pending(&self) -> bool {
        self.status == ReferenceStatus::Pending
    }

    pub async fn create(new: NewReference, pool: &PgPool) -> Result<Self> {
        sqlx::query_as::<_, Self>(
            "INSERT INTO pending_references (id, owner_id, source_url, title, notes)
             VALUES ($1, $2, $3, $4, $5)
             RETURNING *",
        )
        .bind(ReferenceId::new())
        .bind(new.owner_id)
        .bind(new.source_url)
        .bind(new.title)
        .bind(new.notes)
        .fetch_one(pool)
        .await
        .map_err(Into::into)
    }

    pub async fn find_by_id(id: ReferenceId, pool: &PgPool) -> Result<Option<Self>> {
        sqlx::query_as::<_, Self>("SELECT * FROM pending_references WHERE id = $1")
            .bind(id)
            .fetch_optional(pool)
            .await
            .map_err(Into::into)
    }

    /// Pending references for one owner, newest first.
    pub async fn find_pending_for_owner(owner_id: MemberId, pool: &PgPool) -> Result<Vec<Self>> {
        sqlx::query_as::<_, Self>(
            "SELECT * FROM pending_references
             WHERE owner_id = $1 AND status = 'pending'
             ORDER BY created_at DESC, id DESC",
        )
        .bind(owner_id)
        .fetch_all(pool)
        .await
        .map_err(Into::into)
    }

    /// Mark completed. Returns `None` when the row was no longer pending.
    pub async fn complete(id: ReferenceId, at: DateTime<Utc>, pool: &PgPool) -> Result<Option<Self>> {
        sqlx::query_as::<_, Self>(
            "UPDATE pending_references
             SET status = 'completed', completed_at = $2
             WHERE id = $1 AND status = 'pending'
             RETURNING *",
        )
        .bind(id)
        .bind(at)
        .fetch_optional(pool)
        .await
        .map_err(Into::into)
    }

    /// Mark cancelled. Only the owner may cancel, and only while pending.
    pub async fn cancel(id: ReferenceId, owner_id: MemberId, pool: &PgPool) -> Result<Option<Self>> {
        sqlx::query_as::<_, Self>(
            "UPDATE pending_references
             SET status = 'cancelled'
             WHERE id = $1 AND owner_id = $2 AND status = 'pending'
             RETURNING *",
        )
        .bind(id)
        .bind(owner_id)
        .fetch_optional(pool)
        .await
        .map_err(Into::into)
    }

    pub async fn delete(id: ReferenceId, owner_id: MemberId, pool: &PgPool) -> Result<bool> {
        let result = sqlx::query("DELETE FROM pending_references WHERE id = $1 AND owner_id = $2")
            .bind(id)
            .bind(owner_id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
