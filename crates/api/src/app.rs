use std::time::Duration;

use axum::{
    Router,
    extract::{DefaultBodyLimit, State},
    routing::{get, post},
};
use tower_http::{cors::CorsLayer, services::ServeDir, timeout::TimeoutLayer, trace::TraceLayer};

use crate::error::AppError;
use crate::routes;
use crate::state::AppState;
use crate::upload;

/// Builds the Axum router: public reads, admin-gated writes, session auth,
/// and static serving of uploaded files.
pub fn build_router(state: AppState) -> Router {
    let uploads = ServeDir::new(state.upload_dir.clone());

    Router::new()
        // Simple liveness check; also proves DB connectivity.
        .route("/health", get(health))
        // Session-based auth
        .route("/api/register", post(routes::auth::register))
        .route("/api/login", post(routes::auth::login))
        .route("/api/logout", post(routes::auth::logout))
        .route("/api/user", get(routes::auth::current_user))
        // Player roster
        .route(
            "/api/players",
            get(routes::players::list).post(routes::players::create),
        )
        .route(
            "/api/players/{id}",
            get(routes::players::show)
                .put(routes::players::update)
                .delete(routes::players::remove),
        )
        // Photo gallery
        .route(
            "/api/photos",
            get(routes::photos::list).post(routes::photos::create),
        )
        .route(
            "/api/photos/{id}",
            get(routes::photos::show)
                .put(routes::photos::update)
                .delete(routes::photos::remove),
        )
        // Admin dashboard
        .route("/api/admin/stats", get(routes::admin::stats))
        // Uploaded images
        .nest_service("/uploads", uploads)
        .with_state(state)
        // Useful default middlewares
        .layer(TraceLayer::new_for_http())
        .layer(TimeoutLayer::new(Duration::from_secs(30)))
        .layer(CorsLayer::permissive())
        // Multipart bodies carry up to a 5 MB image plus form fields.
        .layer(DefaultBodyLimit::max(upload::MAX_IMAGE_BYTES + 64 * 1024))
}

async fn health(State(state): State<AppState>) -> Result<&'static str, AppError> {
    state.storage.ping().await?;
    Ok("ok")
}
