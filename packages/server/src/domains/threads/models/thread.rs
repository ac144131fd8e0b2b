use anyhow::Result;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;

use crate::common::{MemberId, ThreadId};

/// The durable result of a capture. Immutable once created.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct SubmittedThread {
    pub id: ThreadId,
    pub title: Option<String>,
    /// Serialized transcript (or free text for manually authored posts).
    pub content: String,
    /// Source label, e.g. the provider name for captured conversations.
    pub source: String,
    pub tags: Vec<String>,
    pub author_id: MemberId,
    pub created_at: DateTime<Utc>,
}

/// Input for creating a thread.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewThread {
    pub title: Option<String>,
    pub content: String,
    pub source: String,
    #[serde(default)]
    pub tags: Vec<String>,
    pub author_id: MemberId,
}

impl NewThread {
    /// Build the row this input would create, stamped with `now`.
    pub fn into_thread(self, now: DateTime<Utc>) -> SubmittedThread {
        SubmittedThread {
            id: ThreadId::new(),
            title: self.title,
            content: self.content,
            source: self.source,
            tags: self.tags,
            author_id: self.author_id,
            created_at: now,
        }
    }
}

// =============================================================================
// Thread Queries
// =============================================================================

impl SubmittedThread {
    pub async fn create(new: NewThread, pool: &PgPool) -> Result<Self> {
        sqlx::query_as::<_, Self>(
            r#"
            INSERT INTO submitted_threads (id, title, content, source, tags, author_id)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING *
            "#,
        )
        .bind(ThreadId::new())
        .bind(new.title)
        .bind(new.content)
        .bind(new.source)
        .bind(new.tags)
        .bind(new.author_id)
        .fetch_one(pool)
        .await
        .map_err(Into::into)
    }

    pub async fn find_by_id(id: ThreadId, pool: &PgPool) -> Result<Option<Self>> {
        sqlx::query_as::<_, Self>("SELECT * FROM submitted_threads WHERE id = $1")
            .bind(id)
            .fetch_optional(pool)
            .await
            .map_err(Into::into)
    }
}
