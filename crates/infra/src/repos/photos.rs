use sqlx::QueryBuilder;

use crate::db::Db;
use crate::error::StorageError;
use crate::models::{NewPhoto, PhotoPatch, PhotoRow};

const COLUMNS: &str = "id, title, image_url, category, description, uploaded_by, upload_date";

#[derive(Clone)]
pub struct PhotoRepo {
    pool: Db,
}

impl PhotoRepo {
    pub fn new(pool: Db) -> Self {
        Self { pool }
    }

    pub async fn list(&self) -> Result<Vec<PhotoRow>, StorageError> {
        let rows = sqlx::query_as::<_, PhotoRow>(&format!(
            "SELECT {COLUMNS} FROM photos ORDER BY id ASC"
        ))
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }

    pub async fn get(&self, id: i32) -> Result<Option<PhotoRow>, StorageError> {
        let row = sqlx::query_as::<_, PhotoRow>(&format!(
            "SELECT {COLUMNS} FROM photos WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row)
    }

    pub async fn list_by_category(&self, category: &str) -> Result<Vec<PhotoRow>, StorageError> {
        let rows = sqlx::query_as::<_, PhotoRow>(&format!(
            "SELECT {COLUMNS} FROM photos WHERE category = $1 ORDER BY id ASC"
        ))
        .bind(category)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }

    pub async fn create(&self, draft: NewPhoto) -> Result<PhotoRow, StorageError> {
        let row = sqlx::query_as::<_, PhotoRow>(&format!(
            r#"
            INSERT INTO photos (title, image_url, category, description, uploaded_by)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING {COLUMNS}
            "#
        ))
        .bind(draft.title)
        .bind(draft.image_url)
        .bind(draft.category)
        .bind(draft.description)
        .bind(draft.uploaded_by)
        .fetch_one(&self.pool)
        .await?;

        Ok(row)
    }

    /// Single-row partial update. The leading no-op assignment keeps the
    /// statement valid when the patch carries no fields.
    pub async fn update(
        &self,
        id: i32,
        patch: PhotoPatch,
    ) -> Result<Option<PhotoRow>, StorageError> {
        let mut query = QueryBuilder::new("UPDATE photos SET id = id");

        if let Some(v) = patch.title {
            query.push(", title = ").push_bind(v);
        }
        if let Some(v) = patch.image_url {
            query.push(", image_url = ").push_bind(v);
        }
        if let Some(v) = patch.category {
            query.push(", category = ").push_bind(v);
        }
        if let Some(v) = patch.description {
            query.push(", description = ").push_bind(v);
        }

        query.push(" WHERE id = ").push_bind(id);
        query.push(format!(" RETURNING {COLUMNS}"));

        let row = query
            .build_query_as::<PhotoRow>()
            .fetch_optional(&self.pool)
            .await?;

        Ok(row)
    }

    pub async fn delete(&self, id: i32) -> Result<bool, StorageError> {
        let result = sqlx::query("DELETE FROM photos WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
