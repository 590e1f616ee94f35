use std::sync::Arc;

use async_trait::async_trait;
use sqlx::PgPool;

use crate::db::{self, Db};
use crate::error::StorageError;
use crate::models::{
    NewPhoto, NewPlayer, NewUser, PhotoPatch, PhotoRow, PlayerPatch, PlayerRow, UserRow,
};
use crate::repos::{PhotoRepo, PlayerRepo, SessionRepo, UserRepo};
use crate::storage::{SessionStore, Storage};

/// Relational storage gateway: one table per entity, composed from the
/// per-entity repos. Migrations run at connect time.
#[derive(Clone)]
pub struct PgStorage {
    pool: Db,
    users: UserRepo,
    players: PlayerRepo,
    photos: PhotoRepo,
    sessions: Arc<SessionRepo>,
}

impl PgStorage {
    pub async fn connect(url: &str) -> Result<Self, StorageError> {
        let pool = PgPool::connect(url).await?;
        sqlx::migrate!().run(&pool).await?;

        let sessions = SessionRepo::new(pool.clone());
        let pruned = sessions.prune_expired().await?;
        if pruned > 0 {
            tracing::debug!(pruned, "removed expired sessions");
        }

        Ok(Self {
            users: UserRepo::new(pool.clone()),
            players: PlayerRepo::new(pool.clone()),
            photos: PhotoRepo::new(pool.clone()),
            sessions: Arc::new(sessions),
            pool,
        })
    }
}

#[async_trait]
impl Storage for PgStorage {
    async fn ping(&self) -> Result<(), StorageError> {
        db::ping(&self.pool).await?;
        Ok(())
    }

    async fn get_user(&self, id: i32) -> Result<Option<UserRow>, StorageError> {
        self.users.get(id).await
    }

    async fn get_user_by_username(
        &self,
        username: &str,
    ) -> Result<Option<UserRow>, StorageError> {
        self.users.get_by_username(username).await
    }

    async fn create_user(&self, draft: NewUser) -> Result<UserRow, StorageError> {
        self.users.create(draft).await
    }

    async fn players(&self) -> Result<Vec<PlayerRow>, StorageError> {
        self.players.list().await
    }

    async fn player_by_id(&self, id: i32) -> Result<Option<PlayerRow>, StorageError> {
        self.players.get(id).await
    }

    async fn players_by_category(
        &self,
        category: &str,
    ) -> Result<Vec<PlayerRow>, StorageError> {
        self.players.list_by_category(category).await
    }

    async fn create_player(&self, draft: NewPlayer) -> Result<PlayerRow, StorageError> {
        self.players.create(draft).await
    }

    async fn update_player(
        &self,
        id: i32,
        patch: PlayerPatch,
    ) -> Result<Option<PlayerRow>, StorageError> {
        self.players.update(id, patch).await
    }

    async fn delete_player(&self, id: i32) -> Result<bool, StorageError> {
        self.players.delete(id).await
    }

    async fn photos(&self) -> Result<Vec<PhotoRow>, StorageError> {
        self.photos.list().await
    }

    async fn photo_by_id(&self, id: i32) -> Result<Option<PhotoRow>, StorageError> {
        self.photos.get(id).await
    }

    async fn photos_by_category(&self, category: &str) -> Result<Vec<PhotoRow>, StorageError> {
        self.photos.list_by_category(category).await
    }

    async fn create_photo(&self, draft: NewPhoto) -> Result<PhotoRow, StorageError> {
        self.photos.create(draft).await
    }

    async fn update_photo(
        &self,
        id: i32,
        patch: PhotoPatch,
    ) -> Result<Option<PhotoRow>, StorageError> {
        self.photos.update(id, patch).await
    }

    async fn delete_photo(&self, id: i32) -> Result<bool, StorageError> {
        self.photos.delete(id).await
    }

    fn sessions(&self) -> Arc<dyn SessionStore> {
        self.sessions.clone()
    }
}
