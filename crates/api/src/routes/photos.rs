use axum::{
    Json,
    extract::{Multipart, Path, Query, State},
    http::StatusCode,
};
use serde::Deserialize;

use infra::models::PhotoRow;

use crate::auth::AdminUser;
use crate::error::{AppError, FieldError};
use crate::state::AppState;
use crate::{forms, upload};

#[derive(Deserialize)]
pub struct ListQuery {
    pub category: Option<String>,
}

pub async fn list(
    State(state): State<AppState>,
    Query(query): Query<ListQuery>,
) -> Result<Json<Vec<PhotoRow>>, AppError> {
    let photos = match query.category.as_deref() {
        Some(category) => state.storage.photos_by_category(category).await?,
        None => state.storage.photos().await?,
    };
    Ok(Json(photos))
}

pub async fn show(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<PhotoRow>, AppError> {
    state
        .storage
        .photo_by_id(id)
        .await?
        .map(Json)
        .ok_or(AppError::NotFound("photo"))
}

pub async fn create(
    State(state): State<AppState>,
    admin: AdminUser,
    multipart: Multipart,
) -> Result<(StatusCode, Json<PhotoRow>), AppError> {
    let form = upload::collect(multipart, "image", &state.upload_dir).await?;
    let Some(image_url) = form.file_url else {
        return Err(AppError::Validation(vec![FieldError::new(
            "image",
            "an image file is required",
        )]));
    };
    let draft = forms::new_photo(&form.fields, image_url, admin.0.id)?;
    let photo = state.storage.create_photo(draft).await?;
    Ok((StatusCode::CREATED, Json(photo)))
}

/// The stored image is replaced only when a new file accompanies the
/// request; a file-less update touches text fields alone.
pub async fn update(
    State(state): State<AppState>,
    _admin: AdminUser,
    Path(id): Path<i32>,
    multipart: Multipart,
) -> Result<Json<PhotoRow>, AppError> {
    let form = upload::collect(multipart, "image", &state.upload_dir).await?;
    let patch = forms::photo_patch(&form.fields, form.file_url)?;
    state
        .storage
        .update_photo(id, patch)
        .await?
        .map(Json)
        .ok_or(AppError::NotFound("photo"))
}

pub async fn remove(
    State(state): State<AppState>,
    _admin: AdminUser,
    Path(id): Path<i32>,
) -> Result<StatusCode, AppError> {
    if state.storage.delete_photo(id).await? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::NotFound("photo"))
    }
}
