use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use axum_extra::extract::SignedCookieJar;
use axum_extra::extract::cookie::{Cookie, SameSite};
use chrono::Duration;
use uuid::Uuid;

use infra::models::UserRow;

use crate::error::AppError;
use crate::state::AppState;

pub const SESSION_COOKIE: &str = "club.sid";
const SESSION_TTL_DAYS: i64 = 7;

/// Binds a fresh session to `user_id` and returns the jar carrying the
/// signed cookie.
pub async fn establish(
    state: &AppState,
    jar: SignedCookieJar,
    user_id: i32,
) -> Result<SignedCookieJar, AppError> {
    let sid = Uuid::new_v4().to_string();
    state
        .storage
        .sessions()
        .insert(&sid, user_id, Duration::days(SESSION_TTL_DAYS))
        .await?;

    let cookie = Cookie::build((SESSION_COOKIE, sid))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .build();

    Ok(jar.add(cookie))
}

/// Removes the session record and clears the cookie. Idempotent: an
/// anonymous caller gets the same jar back.
pub async fn destroy(
    state: &AppState,
    jar: SignedCookieJar,
) -> Result<SignedCookieJar, AppError> {
    if let Some(cookie) = jar.get(SESSION_COOKIE) {
        state.storage.sessions().remove(cookie.value()).await?;
    }
    Ok(jar.remove(Cookie::build(SESSION_COOKIE).path("/").build()))
}

/// Resolves the request's identity: signed cookie -> live session record ->
/// user row. Anonymous requests resolve to `None`; a cookie pointing at an
/// expired or unknown session is treated the same as no cookie.
async fn resolve(parts: &mut Parts, state: &AppState) -> Result<Option<UserRow>, AppError> {
    let jar: SignedCookieJar = match SignedCookieJar::from_request_parts(parts, state).await {
        Ok(jar) => jar,
        Err(never) => match never {},
    };
    let Some(cookie) = jar.get(SESSION_COOKIE) else {
        return Ok(None);
    };
    let Some(record) = state.storage.sessions().get(cookie.value()).await? else {
        return Ok(None);
    };
    Ok(state.storage.get_user(record.user_id).await?)
}

/// Extractor for routes any authenticated user may call. Rejects anonymous
/// requests with 401.
pub struct CurrentUser(pub UserRow);

impl FromRequestParts<AppState> for CurrentUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        match resolve(parts, state).await? {
            Some(user) => Ok(CurrentUser(user)),
            None => Err(AppError::Unauthorized("not authenticated".into())),
        }
    }
}

/// Extractor guarding admin-only routes. Rejects with 403 before the
/// handler body runs, for anonymous and non-admin callers alike.
pub struct AdminUser(pub UserRow);

impl FromRequestParts<AppState> for AdminUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        match resolve(parts, state).await? {
            Some(user) if user.is_admin => Ok(AdminUser(user)),
            _ => Err(AppError::Forbidden),
        }
    }
}
