use std::path::PathBuf;

use anyhow::{Context, bail, ensure};

#[derive(Debug, Clone)]
pub enum StorageBackend {
    Memory,
    Postgres { url: String },
}

#[derive(Debug, Clone)]
pub struct BootstrapAdmin {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub port: u16,
    pub backend: StorageBackend,
    pub session_secret: String,
    pub upload_dir: PathBuf,
    pub bootstrap_admin: Option<BootstrapAdmin>,
}

impl AppConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        let port = match std::env::var("PORT") {
            Ok(raw) => raw.parse().context("PORT must be a number")?,
            Err(_) => 8080,
        };

        let database_url = std::env::var("DATABASE_URL").ok();
        let backend = match std::env::var("STORAGE_BACKEND").ok().as_deref() {
            Some("memory") => StorageBackend::Memory,
            Some("postgres") => StorageBackend::Postgres {
                url: database_url
                    .context("DATABASE_URL is required for the postgres backend")?,
            },
            Some(other) => bail!("unknown STORAGE_BACKEND {other:?}"),
            None => match database_url {
                Some(url) => StorageBackend::Postgres { url },
                None => StorageBackend::Memory,
            },
        };

        let session_secret =
            std::env::var("SESSION_SECRET").context("SESSION_SECRET is required")?;
        ensure!(
            session_secret.len() >= 64,
            "SESSION_SECRET must be at least 64 bytes"
        );

        let upload_dir = std::env::var("UPLOAD_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("./uploads"));

        let bootstrap_admin = match (
            std::env::var("ADMIN_USERNAME").ok(),
            std::env::var("ADMIN_PASSWORD").ok(),
        ) {
            (Some(username), Some(password)) => Some(BootstrapAdmin { username, password }),
            (None, None) => None,
            _ => bail!("ADMIN_USERNAME and ADMIN_PASSWORD must be set together"),
        };

        Ok(Self {
            port,
            backend,
            session_secret,
            upload_dir,
            bootstrap_admin,
        })
    }
}
