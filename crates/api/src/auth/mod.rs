pub mod password;
pub mod session;

use chrono::{DateTime, Utc};
use serde::Serialize;

use infra::Storage;
use infra::models::{NewUser, UserRow};

use crate::config::AppConfig;

pub use session::{AdminUser, CurrentUser};

/// The only shape a user ever takes on the wire. Constructed from a row at
/// the auth boundary so the password hash cannot leak through any response.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PublicUser {
    pub id: i32,
    pub username: String,
    pub full_name: String,
    pub is_admin: bool,
    pub created_at: DateTime<Utc>,
}

impl From<UserRow> for PublicUser {
    fn from(user: UserRow) -> Self {
        Self {
            id: user.id,
            username: user.username,
            full_name: user.full_name,
            is_admin: user.is_admin,
            created_at: user.created_at,
        }
    }
}

/// Seeds the configured admin account on first run. A deployment concern:
/// credentials come from the environment, and an already-present username
/// leaves the store untouched.
pub async fn bootstrap_admin(storage: &dyn Storage, config: &AppConfig) -> anyhow::Result<()> {
    let Some(seed) = &config.bootstrap_admin else {
        return Ok(());
    };

    if storage.get_user_by_username(&seed.username).await?.is_some() {
        tracing::debug!(username = %seed.username, "admin user already present");
        return Ok(());
    }

    let password = password::hash_password(&seed.password)?;
    storage
        .create_user(NewUser {
            username: seed.username.clone(),
            password,
            full_name: "Club Administrator".to_string(),
            is_admin: true,
        })
        .await?;
    tracing::info!(username = %seed.username, "bootstrapped admin user");

    Ok(())
}
