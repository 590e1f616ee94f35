use axum::{Json, extract::State};
use serde::Serialize;

use crate::auth::AdminUser;
use crate::error::AppError;
use crate::state::AppState;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AdminStats {
    pub total_players: usize,
    pub registered_players: usize,
    pub pending_players: usize,
    pub total_photos: usize,
}

pub async fn stats(
    State(state): State<AppState>,
    _admin: AdminUser,
) -> Result<Json<AdminStats>, AppError> {
    let players = state.storage.players().await?;
    let photos = state.storage.photos().await?;

    Ok(Json(AdminStats {
        total_players: players.len(),
        registered_players: players
            .iter()
            .filter(|p| p.registration_status == "Registered")
            .count(),
        pending_players: players
            .iter()
            .filter(|p| p.registration_status == "Pending")
            .count(),
        total_photos: photos.len(),
    }))
}
