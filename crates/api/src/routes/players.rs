use axum::{
    Json,
    extract::{Multipart, Path, Query, State},
    http::StatusCode,
};
use chrono::Utc;
use serde::Deserialize;

use infra::models::PlayerRow;

use crate::auth::AdminUser;
use crate::error::AppError;
use crate::state::AppState;
use crate::{forms, upload};

#[derive(Deserialize)]
pub struct ListQuery {
    pub category: Option<String>,
}

pub async fn list(
    State(state): State<AppState>,
    Query(query): Query<ListQuery>,
) -> Result<Json<Vec<PlayerRow>>, AppError> {
    let players = match query.category.as_deref() {
        Some(category) => state.storage.players_by_category(category).await?,
        None => state.storage.players().await?,
    };
    Ok(Json(players))
}

pub async fn show(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<PlayerRow>, AppError> {
    state
        .storage
        .player_by_id(id)
        .await?
        .map(Json)
        .ok_or(AppError::NotFound("player"))
}

pub async fn create(
    State(state): State<AppState>,
    _admin: AdminUser,
    multipart: Multipart,
) -> Result<(StatusCode, Json<PlayerRow>), AppError> {
    let form = upload::collect(multipart, "photo", &state.upload_dir).await?;
    let draft = forms::new_player(&form.fields, form.file_url, Utc::now().date_naive())?;
    let player = state.storage.create_player(draft).await?;
    Ok((StatusCode::CREATED, Json(player)))
}

pub async fn update(
    State(state): State<AppState>,
    _admin: AdminUser,
    Path(id): Path<i32>,
    multipart: Multipart,
) -> Result<Json<PlayerRow>, AppError> {
    let form = upload::collect(multipart, "photo", &state.upload_dir).await?;
    let patch = forms::player_patch(&form.fields, form.file_url, Utc::now().date_naive())?;
    state
        .storage
        .update_player(id, patch)
        .await?
        .map(Json)
        .ok_or(AppError::NotFound("player"))
}

pub async fn remove(
    State(state): State<AppState>,
    _admin: AdminUser,
    Path(id): Path<i32>,
) -> Result<StatusCode, AppError> {
    if state.storage.delete_player(id).await? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::NotFound("player"))
    }
}
