use sqlx::QueryBuilder;

use crate::db::Db;
use crate::error::{StorageError, unique_conflict};
use crate::models::{NewPlayer, PlayerPatch, PlayerRow};

const COLUMNS: &str = "id, first_name, surname, id_number, date_of_birth, age, race, \
     nationality, safa_id, preferred_foot, position, team_category, date_joined, \
     registration_status, photo_url, notes, created_at, updated_at";

#[derive(Clone)]
pub struct PlayerRepo {
    pool: Db,
}

impl PlayerRepo {
    pub fn new(pool: Db) -> Self {
        Self { pool }
    }

    pub async fn list(&self) -> Result<Vec<PlayerRow>, StorageError> {
        let rows = sqlx::query_as::<_, PlayerRow>(&format!(
            "SELECT {COLUMNS} FROM players ORDER BY id ASC"
        ))
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }

    pub async fn get(&self, id: i32) -> Result<Option<PlayerRow>, StorageError> {
        let row = sqlx::query_as::<_, PlayerRow>(&format!(
            "SELECT {COLUMNS} FROM players WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row)
    }

    pub async fn list_by_category(&self, category: &str) -> Result<Vec<PlayerRow>, StorageError> {
        let rows = sqlx::query_as::<_, PlayerRow>(&format!(
            "SELECT {COLUMNS} FROM players WHERE team_category = $1 ORDER BY id ASC"
        ))
        .bind(category)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }

    pub async fn create(&self, draft: NewPlayer) -> Result<PlayerRow, StorageError> {
        sqlx::query_as::<_, PlayerRow>(&format!(
            r#"
            INSERT INTO players (
                first_name, surname, id_number, date_of_birth, age, race, nationality,
                safa_id, preferred_foot, position, team_category, date_joined,
                registration_status, photo_url, notes
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15)
            RETURNING {COLUMNS}
            "#
        ))
        .bind(draft.first_name)
        .bind(draft.surname)
        .bind(draft.id_number)
        .bind(draft.date_of_birth)
        .bind(draft.age)
        .bind(draft.race)
        .bind(draft.nationality)
        .bind(draft.safa_id)
        .bind(draft.preferred_foot)
        .bind(draft.position)
        .bind(draft.team_category)
        .bind(draft.date_joined)
        .bind(draft.registration_status)
        .bind(draft.photo_url)
        .bind(draft.notes)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| unique_conflict(e, "id_number"))
    }

    /// Single-row partial update; `updated_at` is always refreshed. Returns
    /// `None` for an unknown id.
    pub async fn update(
        &self,
        id: i32,
        patch: PlayerPatch,
    ) -> Result<Option<PlayerRow>, StorageError> {
        let mut query = QueryBuilder::new("UPDATE players SET updated_at = now()");

        if let Some(v) = patch.first_name {
            query.push(", first_name = ").push_bind(v);
        }
        if let Some(v) = patch.surname {
            query.push(", surname = ").push_bind(v);
        }
        if let Some(v) = patch.id_number {
            query.push(", id_number = ").push_bind(v);
        }
        if let Some(v) = patch.date_of_birth {
            query.push(", date_of_birth = ").push_bind(v);
        }
        if let Some(v) = patch.age {
            query.push(", age = ").push_bind(v);
        }
        if let Some(v) = patch.race {
            query.push(", race = ").push_bind(v);
        }
        if let Some(v) = patch.nationality {
            query.push(", nationality = ").push_bind(v);
        }
        if let Some(v) = patch.safa_id {
            query.push(", safa_id = ").push_bind(v);
        }
        if let Some(v) = patch.preferred_foot {
            query.push(", preferred_foot = ").push_bind(v);
        }
        if let Some(v) = patch.position {
            query.push(", position = ").push_bind(v);
        }
        if let Some(v) = patch.team_category {
            query.push(", team_category = ").push_bind(v);
        }
        if let Some(v) = patch.date_joined {
            query.push(", date_joined = ").push_bind(v);
        }
        if let Some(v) = patch.registration_status {
            query.push(", registration_status = ").push_bind(v);
        }
        if let Some(v) = patch.photo_url {
            query.push(", photo_url = ").push_bind(v);
        }
        if let Some(v) = patch.notes {
            query.push(", notes = ").push_bind(v);
        }

        query.push(" WHERE id = ").push_bind(id);
        query.push(format!(" RETURNING {COLUMNS}"));

        query
            .build_query_as::<PlayerRow>()
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| unique_conflict(e, "id_number"))
    }

    pub async fn delete(&self, id: i32) -> Result<bool, StorageError> {
        let result = sqlx::query("DELETE FROM players WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
