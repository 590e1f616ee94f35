use async_trait::async_trait;
use chrono::{Duration, Utc};

use crate::db::Db;
use crate::error::StorageError;
use crate::models::SessionRecord;
use crate::storage::SessionStore;

/// Session-table-backed store. Expiry is enforced in the read predicate, so
/// a stale row behaves exactly like a missing one until pruned.
#[derive(Clone)]
pub struct SessionRepo {
    pool: Db,
}

impl SessionRepo {
    pub fn new(pool: Db) -> Self {
        Self { pool }
    }

    pub async fn prune_expired(&self) -> Result<u64, StorageError> {
        let result = sqlx::query("DELETE FROM sessions WHERE expires_at <= now()")
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected())
    }
}

#[async_trait]
impl SessionStore for SessionRepo {
    async fn get(&self, sid: &str) -> Result<Option<SessionRecord>, StorageError> {
        let record = sqlx::query_as::<_, SessionRecord>(
            r#"
            SELECT user_id, expires_at
            FROM sessions
            WHERE sid = $1 AND expires_at > now()
            "#,
        )
        .bind(sid)
        .fetch_optional(&self.pool)
        .await?;

        Ok(record)
    }

    async fn insert(&self, sid: &str, user_id: i32, ttl: Duration) -> Result<(), StorageError> {
        sqlx::query(
            r#"
            INSERT INTO sessions (sid, user_id, expires_at)
            VALUES ($1, $2, $3)
            ON CONFLICT (sid) DO UPDATE
            SET user_id = EXCLUDED.user_id, expires_at = EXCLUDED.expires_at
            "#,
        )
        .bind(sid)
        .bind(user_id)
        .bind(Utc::now() + ttl)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn remove(&self, sid: &str) -> Result<(), StorageError> {
        sqlx::query("DELETE FROM sessions WHERE sid = $1")
            .bind(sid)
            .execute(&self.pool)
            .await?;

        Ok(())
    }
}
