use anyhow::Result;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use uuid::Uuid;

use crate::common::MemberId;

/// Which ledger a vote belongs to. Each scope is its own table with a
/// composite primary key on `(user_id, target_id)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VoteScope {
    Thread,
    Segment,
}

impl VoteScope {
    pub fn table(&self) -> &'static str {
        match self {
            Self::Thread => "thread_votes",
            Self::Segment => "segment_reactions",
        }
    }
}

/// Result of an insert against the uniqueness constraint.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InsertOutcome {
    Inserted,
    /// Another row for `(user_id, target_id)` already exists.
    Conflict,
}

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct VoteRecord {
    pub user_id: MemberId,
    pub target_id: Uuid,
    pub kind: String,
    pub created_at: DateTime<Utc>,
}

impl VoteRecord {
    pub async fn find(
        scope: VoteScope,
        user_id: MemberId,
        target_id: Uuid,
        pool: &PgPool,
    ) -> Result<Option<Self>> {
        let sql = format!(
            "SELECT * FROM {} WHERE user_id = $1 AND target_id = $2",
            scope.table()
        );
        sqlx::query_as::<_, Self>(&sql)
            .bind(user_id)
            .bind(target_id)
            .fetch_optional(pool)
            .await
            .map_err(Into::into)
    }

    pub async fn insert(
        scope: VoteScope,
        user_id: MemberId,
        target_id: Uuid,
        kind: &str,
        pool: &PgPool,
    ) -> Result<InsertOutcome> {
        let sql = format!(
            "INSERT INTO {} (user_id, target_id, kind) VALUES ($1, $2, $3)",
            scope.table()
        );
        let result = sqlx::query(&sql)
            .bind(user_id)
            .bind(target_id)
            .bind(kind)
            .execute(pool)
            .await;
        insert_outcome(result)
    }

    pub async fn delete(
        scope: VoteScope,
        user_id: MemberId,
        target_id: Uuid,
        pool: &PgPool,
    ) -> Result<bool> {
        let sql = format!(
            "DELETE FROM {} WHERE user_id = $1 AND target_id = $2",
            scope.table()
        );
        let result = sqlx::query(&sql)
            .bind(user_id)
            .bind(target_id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Replace the caller's vote in one transaction (delete then insert).
    pub async fn switch(
        scope: VoteScope,
        user_id: MemberId,
        target_id: Uuid,
        kind: &str,
        pool: &PgPool,
    ) -> Result<InsertOutcome> {
        let mut tx = pool.begin().await?;

        let delete = format!(
            "DELETE FROM {} WHERE user_id = $1 AND target_id = $2",
            scope.table()
        );
        sqlx::query(&delete)
            .bind(user_id)
            .bind(target_id)
            .execute(&mut *tx)
            .await?;

        let insert = format!(
            "INSERT INTO {} (user_id, target_id, kind) VALUES ($1, $2, $3)",
            scope.table()
        );
        let result = sqlx::query(&insert)
            .bind(user_id)
            .bind(target_id)
            .bind(kind)
            .execute(&mut *tx)
            .await;

        match insert_outcome(result)? {
            InsertOutcome::Inserted => {
                tx.commit().await?;
                Ok(InsertOutcome::Inserted)
            }
            InsertOutcome::Conflict => {
                tx.rollback().await?;
                Ok(InsertOutcome::Conflict)
            }
        }
    }

    /// `(kind, count)` pairs for one target. Kinds with no votes are absent.
    pub async fn count_by_kind(
        scope: VoteScope,
        target_id: Uuid,
        pool: &PgPool,
    ) -> Result<Vec<(String, i64)>> {
        let sql = format!(
            "SELECT kind, COUNT(*) FROM {} WHERE target_id = $1 GROUP BY kind",
            scope.table()
        );
        sqlx::query_as::<_, (String, i64)>(&sql)
            .bind(target_id)
            .fetch_all(pool)
            .await
            .map_err(Into::into)
    }
}

fn insert_outcome(
    result: std::result::Result<sqlx::postgres::PgQueryResult, sqlx::Error>,
) -> Result<InsertOutcome> {
    match result {
        Ok(_) => Ok(InsertOutcome::Inserted),
        Err(sqlx::Error::Database(db_err)) if db_err.is_unique_violation() => {
            Ok(InsertOutcome::Conflict)
        }
        Err(e) => Err(e.into()),
    }
}
