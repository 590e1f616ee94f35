use crate::db::Db;
use crate::error::{StorageError, unique_conflict};
use crate::models::{NewUser, UserRow};

#[derive(Clone)]
pub struct UserRepo {
    pool: Db,
}

impl UserRepo {
    pub fn new(pool: Db) -> Self {
        Self { pool }
    }

    pub async fn get(&self, id: i32) -> Result<Option<UserRow>, StorageError> {
        let row = sqlx::query_as::<_, UserRow>(
            r#"
            SELECT id, username, password, full_name, is_admin, created_at
            FROM users
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row)
    }

    pub async fn get_by_username(&self, username: &str) -> Result<Option<UserRow>, StorageError> {
        let row = sqlx::query_as::<_, UserRow>(
            r#"
            SELECT id, username, password, full_name, is_admin, created_at
            FROM users
            WHERE username = $1
            "#,
        )
        .bind(username)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row)
    }

    pub async fn create(&self, draft: NewUser) -> Result<UserRow, StorageError> {
        sqlx::query_as::<_, UserRow>(
            r#"
            INSERT INTO users (username, password, full_name, is_admin)
            VALUES ($1, $2, $3, $4)
            RETURNING id, username, password, full_name, is_admin, created_at
            "#,
        )
        .bind(draft.username)
        .bind(draft.password)
        .bind(draft.full_name)
        .bind(draft.is_admin)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| unique_conflict(e, "username"))
    }
}
