use axum::{Json, extract::State, http::StatusCode};
use axum_extra::extract::SignedCookieJar;
use serde::Deserialize;

use infra::models::NewUser;

use crate::auth::{CurrentUser, PublicUser, password, session};
use crate::error::{AppError, FieldError};
use crate::state::AppState;

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Registration {
    pub username: String,
    pub password: String,
    pub full_name: String,
}

// One failure shape for both an unknown username and a wrong password, so
// responses cannot be used to enumerate accounts.
fn invalid_credentials() -> AppError {
    AppError::Unauthorized("invalid username or password".to_string())
}

pub async fn login(
    State(state): State<AppState>,
    jar: SignedCookieJar,
    Json(body): Json<Credentials>,
) -> Result<(SignedCookieJar, Json<PublicUser>), AppError> {
    let user = state
        .storage
        .get_user_by_username(&body.username)
        .await?
        .ok_or_else(invalid_credentials)?;

    if !password::verify_password(&body.password, &user.password) {
        return Err(invalid_credentials());
    }

    let jar = session::establish(&state, jar, user.id).await?;
    Ok((jar, Json(user.into())))
}

pub async fn register(
    State(state): State<AppState>,
    jar: SignedCookieJar,
    Json(body): Json<Registration>,
) -> Result<(StatusCode, SignedCookieJar, Json<PublicUser>), AppError> {
    let mut errors = Vec::new();
    if body.username.is_empty() {
        errors.push(FieldError::new("username", "is required"));
    }
    if body.password.is_empty() {
        errors.push(FieldError::new("password", "is required"));
    }
    if body.full_name.is_empty() {
        errors.push(FieldError::new("fullName", "is required"));
    }
    if !errors.is_empty() {
        return Err(AppError::Validation(errors));
    }

    if state
        .storage
        .get_user_by_username(&body.username)
        .await?
        .is_some()
    {
        return Err(AppError::Conflict("username already exists".to_string()));
    }

    let hash = password::hash_password(&body.password)?;
    let user = state
        .storage
        .create_user(NewUser {
            username: body.username,
            password: hash,
            full_name: body.full_name,
            is_admin: false,
        })
        .await?;

    let jar = session::establish(&state, jar, user.id).await?;
    Ok((StatusCode::CREATED, jar, Json(user.into())))
}

pub async fn logout(
    State(state): State<AppState>,
    jar: SignedCookieJar,
) -> Result<(SignedCookieJar, StatusCode), AppError> {
    let jar = session::destroy(&state, jar).await?;
    Ok((jar, StatusCode::OK))
}

pub async fn current_user(user: CurrentUser) -> Json<PublicUser> {
    Json(user.0.into())
}
