use chrono::{DateTime, NaiveDate, Utc};
use serde::Serialize;
use sqlx::FromRow;

/// Identity record. The password column holds an opaque hash and is never
/// serialized across the API boundary; handlers convert to a sanitized view
/// before responding.
#[derive(Debug, Clone, FromRow)]
pub struct UserRow {
    pub id: i32,
    pub username: String,
    pub password: String,
    pub full_name: String,
    pub is_admin: bool,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct NewUser {
    pub username: String,
    pub password: String,
    pub full_name: String,
    pub is_admin: bool,
}

#[derive(Debug, Clone, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerRow {
    pub id: i32,
    pub first_name: String,
    pub surname: String,
    pub id_number: String,
    pub date_of_birth: NaiveDate,
    pub age: i32,
    pub race: Option<String>,
    pub nationality: String,
    pub safa_id: Option<String>,
    pub preferred_foot: String,
    pub position: String,
    pub team_category: String,
    pub date_joined: NaiveDate,
    pub registration_status: String,
    pub photo_url: Option<String>,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct NewPlayer {
    pub first_name: String,
    pub surname: String,
    pub id_number: String,
    pub date_of_birth: NaiveDate,
    pub age: i32,
    pub race: Option<String>,
    pub nationality: String,
    pub safa_id: Option<String>,
    pub preferred_foot: String,
    pub position: String,
    pub team_category: String,
    pub date_joined: NaiveDate,
    pub registration_status: String,
    pub photo_url: Option<String>,
    pub notes: Option<String>,
}

/// Partial update: only `Some` fields are merged onto the stored record.
#[derive(Debug, Clone, Default)]
pub struct PlayerPatch {
    pub first_name: Option<String>,
    pub surname: Option<String>,
    pub id_number: Option<String>,
    pub date_of_birth: Option<NaiveDate>,
    pub age: Option<i32>,
    pub race: Option<String>,
    pub nationality: Option<String>,
    pub safa_id: Option<String>,
    pub preferred_foot: Option<String>,
    pub position: Option<String>,
    pub team_category: Option<String>,
    pub date_joined: Option<NaiveDate>,
    pub registration_status: Option<String>,
    pub photo_url: Option<String>,
    pub notes: Option<String>,
}

#[derive(Debug, Clone, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PhotoRow {
    pub id: i32,
    pub title: String,
    pub image_url: String,
    pub category: String,
    pub description: Option<String>,
    pub uploaded_by: i32,
    pub upload_date: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct NewPhoto {
    pub title: String,
    pub image_url: String,
    pub category: String,
    pub description: Option<String>,
    pub uploaded_by: i32,
}

#[derive(Debug, Clone, Default)]
pub struct PhotoPatch {
    pub title: Option<String>,
    pub image_url: Option<String>,
    pub category: Option<String>,
    pub description: Option<String>,
}

/// Server-side session record keyed by the cookie's session id. Expired
/// records are treated as absent by every store implementation.
#[derive(Debug, Clone, FromRow)]
pub struct SessionRecord {
    pub user_id: i32,
    pub expires_at: DateTime<Utc>,
}
