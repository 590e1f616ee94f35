use std::sync::Arc;

use tokio::net::TcpListener;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use infra::{MemStorage, PgStorage, Storage};

use api::app::build_router;
use api::auth::bootstrap_admin;
use api::config::{AppConfig, StorageBackend};
use api::state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info".into()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    dotenvy::dotenv().ok();

    let config = AppConfig::from_env()?;
    std::fs::create_dir_all(&config.upload_dir)?;

    let storage: Arc<dyn Storage> = match &config.backend {
        StorageBackend::Postgres { url } => {
            let storage = PgStorage::connect(url).await?;
            tracing::info!("Connected to Postgres");
            Arc::new(storage)
        }
        StorageBackend::Memory => {
            tracing::warn!("Using in-memory storage; data will not survive a restart");
            Arc::new(MemStorage::new())
        }
    };

    bootstrap_admin(storage.as_ref(), &config).await?;

    let state = AppState::new(storage, &config)?;
    let app = build_router(state);

    let addr = format!("0.0.0.0:{}", config.port);
    let listener = TcpListener::bind(&addr).await?;
    tracing::info!("Listening on {}", addr);

    axum::serve(listener, app).await?;
    Ok(())
}
