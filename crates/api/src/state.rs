use std::path::PathBuf;
use std::sync::Arc;

use axum::extract::FromRef;
use axum_extra::extract::cookie::Key;

use infra::Storage;

use crate::config::AppConfig;

#[derive(Clone)]
pub struct AppState {
    pub storage: Arc<dyn Storage>,
    pub upload_dir: PathBuf,
    key: Key,
}

impl AppState {
    pub fn new(storage: Arc<dyn Storage>, config: &AppConfig) -> anyhow::Result<Self> {
        anyhow::ensure!(
            config.session_secret.len() >= 64,
            "session secret must be at least 64 bytes"
        );
        Ok(Self {
            storage,
            upload_dir: config.upload_dir.clone(),
            key: Key::from(config.session_secret.as_bytes()),
        })
    }
}

// Lets SignedCookieJar extract its signing key from the shared state.
impl FromRef<AppState> for Key {
    fn from_ref(state: &AppState) -> Key {
        state.key.clone()
    }
}
